use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::shared::metadata::{ColumnSpec, ResourceDescriptor};
use crate::shared::report::{ReportSpec, SummaryLine};
use crate::shared::stats::StatItem;

/// Trait for an entity record served by one REST resource.
///
/// Records are flat and identified by a human-assigned natural key; the
/// descriptor carries everything static (routes, fields, columns).
pub trait AggregateRoot: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    // ============================================================================
    // Resource metadata (static)
    // ============================================================================

    fn descriptor() -> &'static ResourceDescriptor;

    // ============================================================================
    // Instance data
    // ============================================================================

    /// Natural key; immutable once created
    fn key(&self) -> &str;

    /// Raw text of a scalar field by its JSON name
    fn field_value(&self, name: &str) -> Option<String>;

    /// Base64 content of an image field
    fn image(&self, _name: &str) -> Option<&str> {
        None
    }

    /// Trim strings and turn blank optionals into `None`; applied once at
    /// the gateway boundary.
    fn normalize(self) -> Self;

    // ============================================================================
    // Derived views over the loaded list
    // ============================================================================

    /// Statistics strip for the panel
    fn stats(records: &[Self], today: NaiveDate) -> Vec<StatItem>;

    /// On-demand group reports
    fn reports() -> Vec<ReportSpec<Self>> {
        Vec::new()
    }

    /// Summary rows of the full report
    fn summary(records: &[Self]) -> Vec<SummaryLine> {
        vec![SummaryLine::new(
            format!("Total {}", Self::list_name()),
            records.len(),
        )]
    }

    /// Extra rows of the read-only detail view
    fn detail_notes(&self) -> Vec<SummaryLine> {
        Vec::new()
    }

    /// Hook for fields the JSON write body needs beyond the form
    fn decorate_json(_payload: &mut Map<String, Value>) {}

    // ============================================================================
    // Provided
    // ============================================================================

    fn collection_name() -> &'static str {
        Self::descriptor().collection_name
    }

    fn element_name() -> &'static str {
        Self::descriptor().ui.element_name
    }

    fn list_name() -> &'static str {
        Self::descriptor().ui.list_name
    }

    /// Full name, e.g. "a001_crop"
    fn full_name() -> String {
        Self::descriptor().full_name()
    }

    /// Field text or the resource placeholder
    fn display_value(&self, name: &str) -> String {
        let value = self.field_value(name);
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => Self::descriptor().ui.placeholder.to_string(),
        }
    }

    fn column_text(&self, column: &ColumnSpec) -> String {
        column.render(
            self.field_value(column.field).as_deref(),
            Self::descriptor().ui.placeholder,
        )
    }

    /// Label/value rows of every non-image field, for the detail view
    fn details(&self) -> Vec<SummaryLine> {
        Self::descriptor()
            .fields
            .iter()
            .filter(|f| !f.kind.is_image())
            .map(|f| SummaryLine::new(f.label, self.display_value(f.name)))
            .chain(self.detail_notes())
            .collect()
    }
}

/// Trimmed copy of a required string
pub fn normalize_text(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

/// Trimmed optional string; blank becomes `None`
pub fn normalize_opt(value: Option<String>) -> Option<String> {
    value
        .map(normalize_text)
        .filter(|v| !v.is_empty())
}

/// Optional date kept as `YYYY-MM-DD`; a trailing time part is dropped
pub fn normalize_date(value: Option<String>) -> Option<String> {
    normalize_opt(value).map(|v| match v.get(..10) {
        Some(day) if NaiveDate::parse_from_str(day, "%Y-%m-%d").is_ok() => day.to_string(),
        _ => v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_helpers() {
        assert_eq!(normalize_text("  Wheat ".into()), "Wheat");
        assert_eq!(normalize_opt(Some("   ".into())), None);
        assert_eq!(normalize_opt(Some(" L-1".into())), Some("L-1".into()));
        assert_eq!(normalize_opt(None), None);
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(
            normalize_date(Some("2024-03-01T08:30:00".into())),
            Some("2024-03-01".into())
        );
        assert_eq!(normalize_date(Some("2024-03-01".into())), Some("2024-03-01".into()));
        assert_eq!(normalize_date(Some("yesterday".into())), Some("yesterday".into()));
        assert_eq!(normalize_date(Some(" ".into())), None);
    }
}
