//! Form state of the create/edit popup and required-field validation

use std::collections::BTreeMap;

use super::error::ValidationError;
use super::image::encode_base64;
use super::metadata::{FieldSpec, ResourceDescriptor};
use crate::domain::common::AggregateRoot;

/// Whether the popup creates a record or edits the one with the given key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edit(_))
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Create => None,
            Self::Edit(key) => Some(key),
        }
    }

    pub fn title(&self, element_name: &str) -> String {
        match self {
            Self::Create => format!("Add New {}", element_name),
            Self::Edit(_) => format!("Edit {}", element_name),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Create => "Save",
            Self::Edit(_) => "Update",
        }
    }

    pub fn busy_label(&self) -> &'static str {
        match self {
            Self::Create => "Saving...",
            Self::Edit(_) => "Updating...",
        }
    }

    /// Image fields are only mandatory when creating; on edit an omitted
    /// image keeps the stored one.
    pub fn requires(&self, spec: &FieldSpec) -> bool {
        spec.required && !(spec.kind.is_image() && self.is_edit())
    }
}

/// A file picked in an image input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn to_base64(&self) -> String {
        encode_base64(&self.bytes)
    }
}

/// Current values of the form inputs, keyed by JSON field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<String, String>,
    images: BTreeMap<String, ImageUpload>,
}

impl FormValues {
    /// Every text input empty, no image selected
    pub fn blank(descriptor: &ResourceDescriptor) -> Self {
        let values = descriptor
            .fields
            .iter()
            .filter(|f| !f.kind.is_image())
            .map(|f| (f.name.to_string(), String::new()))
            .collect();
        Self {
            values,
            images: BTreeMap::new(),
        }
    }

    /// Pre-populated from a fetched record; images stay unselected
    pub fn from_record<R: AggregateRoot>(record: &R) -> Self {
        let mut form = Self::blank(R::descriptor());
        for spec in R::descriptor().fields.iter().filter(|f| !f.kind.is_image()) {
            if let Some(value) = record.field_value(spec.name) {
                form.set(spec.name, value);
            }
        }
        form
    }

    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn image(&self, name: &str) -> Option<&ImageUpload> {
        self.images.get(name)
    }

    pub fn set_image(&mut self, name: &str, upload: Option<ImageUpload>) {
        match upload {
            Some(upload) => {
                self.images.insert(name.to_string(), upload);
            }
            None => {
                self.images.remove(name);
            }
        }
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn images(&self) -> impl Iterator<Item = (&str, &ImageUpload)> {
        self.images.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All declared-required fields non-empty; images only in create mode
    pub fn validate(
        &self,
        descriptor: &ResourceDescriptor,
        mode: &FormMode,
    ) -> Result<(), ValidationError> {
        let missing: Vec<String> = descriptor
            .fields
            .iter()
            .filter(|spec| mode.requires(spec))
            .filter(|spec| {
                if spec.kind.is_image() {
                    self.image(spec.name).is_none()
                } else {
                    self.get(spec.name).trim().is_empty()
                }
            })
            .map(|spec| spec.label.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}
