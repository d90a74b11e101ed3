pub mod center;
pub mod registry;
