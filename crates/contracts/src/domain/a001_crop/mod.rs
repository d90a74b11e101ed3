pub mod aggregate;

pub use aggregate::{care_recommendation, Crop, CATEGORIES, DESCRIPTOR, SEASONS};
