//! Resource descriptors: everything a generic panel needs to know about one
//! entity type, as zero-cost `'static` constants.

use super::field_type::{ColumnFormat, Encoding, FieldKind};

// ============================================================================
// Resource-level metadata
// ============================================================================

/// Static description of one REST resource and its panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceDescriptor {
    /// Index in the system, e.g. "a001"
    pub entity_index: &'static str,
    /// Collection name, e.g. "crop"
    pub collection_name: &'static str,
    /// JSON name of the natural-key field
    pub key_field: &'static str,
    pub ui: ResourceUiMetadata,
    pub routes: ResourceRoutes,
    pub encoding: Encoding,
    pub fields: &'static [FieldSpec],
    pub columns: &'static [ColumnSpec],
    /// Fields offered as exact-match facet filters next to the search box
    pub facets: &'static [&'static str],
}

impl ResourceDescriptor {
    /// Full name, e.g. "a001_crop"
    pub fn full_name(&self) -> String {
        format!("{}_{}", self.entity_index, self.collection_name)
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn image_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| f.kind.is_image())
    }

    pub fn has_images(&self) -> bool {
        self.image_fields().next().is_some()
    }

    /// Columns that carry text (image thumbnails excluded)
    pub fn text_columns(&self) -> impl Iterator<Item = &'static ColumnSpec> {
        self.columns
            .iter()
            .filter(|c| c.format != ColumnFormat::Image)
    }
}

/// UI names and texts of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceUiMetadata {
    /// Singular, e.g. "Crop"
    pub element_name: &'static str,
    /// Plural, e.g. "Crops"
    pub list_name: &'static str,
    pub icon: &'static str,
    /// Shown instead of an empty table body
    pub empty_message: &'static str,
    /// Shown in place of a missing value
    pub placeholder: &'static str,
}

/// Route templates relative to `base_path`; `{key}` is replaced by the
/// (already URL-encoded) natural key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRoutes {
    pub base_path: &'static str,
    pub list: &'static str,
    pub get: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

impl ResourceRoutes {
    pub const KEY_PLACEHOLDER: &'static str = "{key}";

    pub fn list_path(&self) -> String {
        format!("{}{}", self.base_path, self.list)
    }

    pub fn get_path(&self, key: &str) -> String {
        self.expand(self.get, key)
    }

    pub fn create_path(&self) -> String {
        format!("{}{}", self.base_path, self.create)
    }

    pub fn update_path(&self, key: &str) -> String {
        self.expand(self.update, key)
    }

    pub fn delete_path(&self, key: &str) -> String {
        self.expand(self.delete, key)
    }

    fn expand(&self, template: &str, key: &str) -> String {
        format!(
            "{}{}",
            self.base_path,
            template.replace(Self::KEY_PLACEHOLDER, key)
        )
    }
}

// ============================================================================
// Field-level metadata
// ============================================================================

/// One editable field of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// JSON name on the wire
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// For image fields: required in create mode only
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }
}

/// One column of the list table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Field the column reads
    pub field: &'static str,
    pub label: &'static str,
    pub format: ColumnFormat,
}

impl ColumnSpec {
    pub const fn plain(field: &'static str, label: &'static str) -> Self {
        Self {
            field,
            label,
            format: ColumnFormat::Plain,
        }
    }

    pub const fn with_format(
        field: &'static str,
        label: &'static str,
        format: ColumnFormat,
    ) -> Self {
        Self {
            field,
            label,
            format,
        }
    }

    /// Cell text for a raw value; missing or blank values become `placeholder`
    pub fn render(&self, raw: Option<&str>, placeholder: &str) -> String {
        let value = match raw.map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => return placeholder.to_string(),
        };
        match self.format {
            ColumnFormat::Plain | ColumnFormat::Image => value.to_string(),
            ColumnFormat::Decimal(places) => match value.parse::<f64>() {
                Ok(n) => format!("{:.*}", places, n),
                Err(_) => value.to_string(),
            },
            ColumnFormat::Truncate(max) => {
                if value.chars().count() > max {
                    let cut: String = value.chars().take(max).collect();
                    format!("{}...", cut)
                } else {
                    value.to_string()
                }
            }
        }
    }
}
