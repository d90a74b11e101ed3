pub mod aggregate;

pub use aggregate::{Equipment, DESCRIPTOR, STATUSES};
