//! Shared contracts of the farm dashboard: entity schemas, resource metadata,
//! form and payload handling, error taxonomy and client-side reports.
//!
//! Nothing in this crate touches the browser, so every rule that decides what
//! the panels show or send is testable natively.

pub mod domain;
pub mod shared;
