pub mod field_type;
pub mod types;

pub use field_type::{ColumnFormat, Encoding, FieldKind};
pub use types::{ColumnSpec, FieldSpec, ResourceDescriptor, ResourceRoutes, ResourceUiMetadata};
