//! Common types and traits for all aggregates

pub mod aggregate_root;

// Re-exports
pub use aggregate_root::{normalize_date, normalize_opt, normalize_text, AggregateRoot};
