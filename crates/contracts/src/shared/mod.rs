pub mod error;
pub mod form;
pub mod image;
pub mod metadata;
pub mod payload;
pub mod report;
pub mod stats;
