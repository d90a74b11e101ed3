pub mod aggregate;

pub use aggregate::{Vehicle, CATEGORIES, DESCRIPTOR, FUEL_TYPES, STATUSES};
