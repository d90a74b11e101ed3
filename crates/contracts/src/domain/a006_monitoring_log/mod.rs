pub mod aggregate;

pub use aggregate::{MonitoringLog, DESCRIPTOR};
