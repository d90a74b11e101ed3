pub mod aggregate;

pub use aggregate::{size_bucket, total_area, Field, DESCRIPTOR, SIZE_BUCKETS};
