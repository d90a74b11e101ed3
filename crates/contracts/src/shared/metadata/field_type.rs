//! Field kinds and write encodings for resource metadata

/// Kind of an editable field, drives the form widget and payload encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Date,
    Number,
    LongText,
    /// Fixed option list rendered as a select
    Choice(&'static [&'static str]),
    /// Binary upload; base64 in read responses
    Image,
}

impl FieldKind {
    /// HTML `type` attribute for the form input
    pub fn input_type(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "tel",
            Self::Date => "date",
            Self::Number => "number",
            Self::Image => "file",
            Self::Text | Self::LongText | Self::Choice(_) => "text",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image)
    }

    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Self::Choice(options) => options,
            _ => &[],
        }
    }
}

/// Body encoding of create/update requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Json,
    /// Text parts plus raw file parts for image uploads
    Multipart,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Multipart => "multipart",
        }
    }
}

/// Presentation of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnFormat {
    #[default]
    Plain,
    /// Fixed number of decimals, e.g. field area in acres
    Decimal(usize),
    /// Cut after N characters and append an ellipsis
    Truncate(usize),
    /// Thumbnail of a base64 image field
    Image,
}
