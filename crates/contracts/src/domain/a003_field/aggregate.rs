use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{normalize_opt, normalize_text, AggregateRoot};
use crate::shared::metadata::{
    ColumnFormat, ColumnSpec, Encoding, FieldKind, FieldSpec, ResourceDescriptor,
    ResourceRoutes, ResourceUiMetadata,
};
use crate::shared::report::{ChartKind, GroupOrder, ReportSpec, SummaryLine};
use crate::shared::stats::{distinct_count, StatItem};

pub const SIZE_BUCKETS: &[&str] = &[
    "Small (<5 acres)",
    "Medium (5-20 acres)",
    "Large (20-50 acres)",
    "Very Large (>50 acres)",
];

// ============================================================================
// Metadata
// ============================================================================

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("fieldCode", "Field Code", FieldKind::Text),
    FieldSpec::required("fieldName", "Field Name", FieldKind::Text),
    FieldSpec::required("fieldLocation", "Location", FieldKind::Text),
    FieldSpec::required("extent_size", "Extent Size (acres)", FieldKind::Number),
    FieldSpec::required("logCode", "Log Code", FieldKind::Text),
    FieldSpec::optional("fieldImageOne", "Field Image 1", FieldKind::Image),
    FieldSpec::optional("fieldImageTwo", "Field Image 2", FieldKind::Image),
];

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::with_format("fieldImageOne", "Image", ColumnFormat::Image),
    ColumnSpec::plain("fieldCode", "Code"),
    ColumnSpec::plain("fieldName", "Name"),
    ColumnSpec::plain("fieldLocation", "Location"),
    ColumnSpec::with_format("extent_size", "Size (acres)", ColumnFormat::Decimal(2)),
    ColumnSpec::plain("logCode", "Log Code"),
];

pub static DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
    entity_index: "a003",
    collection_name: "field",
    key_field: "fieldCode",
    ui: ResourceUiMetadata {
        element_name: "Field",
        list_name: "Fields",
        icon: "map",
        empty_message: "No fields found. Add your first field to get started.",
        placeholder: "N/A",
    },
    routes: ResourceRoutes {
        base_path: "/api/v1/field",
        list: "",
        get: "/{key}",
        create: "",
        update: "/{key}",
        delete: "/{key}",
    },
    encoding: Encoding::Multipart,
    fields: FIELDS,
    columns: COLUMNS,
    facets: &["fieldLocation"],
};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Cultivated field with up to two photos
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Field {
    pub field_code: String,
    pub field_name: Option<String>,
    pub field_location: Option<String>,
    /// Area in acres
    #[serde(rename = "extent_size")]
    pub extent_size: Option<f64>,
    pub log_code: Option<String>,
    pub field_image_one: Option<String>,
    pub field_image_two: Option<String>,
}

/// Size class of an area in acres
pub fn size_bucket(acres: f64) -> &'static str {
    if acres < 5.0 {
        SIZE_BUCKETS[0]
    } else if acres < 20.0 {
        SIZE_BUCKETS[1]
    } else if acres < 50.0 {
        SIZE_BUCKETS[2]
    } else {
        SIZE_BUCKETS[3]
    }
}

/// Sum of all known areas
pub fn total_area(fields: &[Field]) -> f64 {
    fields.iter().filter_map(|f| f.extent_size).sum()
}

impl AggregateRoot for Field {
    fn descriptor() -> &'static ResourceDescriptor {
        &DESCRIPTOR
    }

    fn key(&self) -> &str {
        &self.field_code
    }

    fn field_value(&self, name: &str) -> Option<String> {
        match name {
            "fieldCode" => Some(self.field_code.clone()),
            "fieldName" => self.field_name.clone(),
            "fieldLocation" => self.field_location.clone(),
            "extent_size" => self.extent_size.map(|v| v.to_string()),
            "logCode" => self.log_code.clone(),
            _ => None,
        }
    }

    fn image(&self, name: &str) -> Option<&str> {
        match name {
            "fieldImageOne" => self.field_image_one.as_deref(),
            "fieldImageTwo" => self.field_image_two.as_deref(),
            _ => None,
        }
    }

    fn normalize(self) -> Self {
        Self {
            field_code: normalize_text(self.field_code),
            field_name: normalize_opt(self.field_name),
            field_location: normalize_opt(self.field_location),
            extent_size: self.extent_size.filter(|v| v.is_finite()),
            log_code: normalize_opt(self.log_code),
            field_image_one: normalize_opt(self.field_image_one),
            field_image_two: normalize_opt(self.field_image_two),
        }
    }

    fn stats(records: &[Self], _today: NaiveDate) -> Vec<StatItem> {
        vec![
            StatItem::new("Total Fields", records.len(), "map"),
            StatItem::new(
                "Total Area (acres)",
                format!("{:.2}", total_area(records)),
                "maximize",
            ),
        ]
    }

    fn reports() -> Vec<ReportSpec<Self>> {
        vec![
            ReportSpec {
                id: "size",
                title: "Field Size Distribution",
                group_label: "Size",
                chart: ChartKind::Pie,
                order: GroupOrder::Listed(SIZE_BUCKETS),
                key: |f| Some(size_bucket(f.extent_size.unwrap_or(0.0)).to_string()),
                image: Some(|f| f.field_image_one.clone()),
            },
            ReportSpec {
                id: "location",
                title: "Fields by Location",
                group_label: "Location",
                chart: ChartKind::Bar,
                order: GroupOrder::FirstSeen,
                key: |f| f.field_location.clone(),
                image: Some(|f| f.field_image_one.clone()),
            },
        ]
    }

    fn summary(records: &[Self]) -> Vec<SummaryLine> {
        let area = total_area(records);
        let average = if records.is_empty() {
            0.0
        } else {
            area / records.len() as f64
        };
        let largest = records
            .iter()
            .filter(|f| f.extent_size.is_some())
            .max_by(|a, b| a.extent_size.partial_cmp(&b.extent_size).unwrap_or(std::cmp::Ordering::Equal));

        let mut lines = vec![
            SummaryLine::new("Total Fields", records.len()),
            SummaryLine::new("Total Area (acres)", format!("{:.2}", area)),
            SummaryLine::new(
                "Unique Locations",
                distinct_count(records.iter().filter_map(|f| f.field_location.as_deref())),
            ),
            SummaryLine::new("Average Size (acres)", format!("{:.2}", average)),
        ];
        if let Some(field) = largest {
            lines.push(SummaryLine::new(
                "Largest Field",
                format!(
                    "{} ({:.2} acres)",
                    field.field_name.as_deref().unwrap_or(&field.field_code),
                    field.extent_size.unwrap_or_default()
                ),
            ));
        }
        lines
    }

    fn detail_notes(&self) -> Vec<SummaryLine> {
        self.extent_size
            .map(|acres| vec![SummaryLine::new("Size Class", size_bucket(acres))])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(code: &str, location: &str, acres: f64) -> Field {
        Field {
            field_code: code.into(),
            field_name: Some(format!("Field {}", code)),
            field_location: Some(location.into()),
            extent_size: Some(acres),
            ..Default::default()
        }
    }

    #[test]
    fn test_size_buckets() {
        assert_eq!(size_bucket(0.0), "Small (<5 acres)");
        assert_eq!(size_bucket(5.0), "Medium (5-20 acres)");
        assert_eq!(size_bucket(19.99), "Medium (5-20 acres)");
        assert_eq!(size_bucket(20.0), "Large (20-50 acres)");
        assert_eq!(size_bucket(50.0), "Very Large (>50 acres)");
    }

    #[test]
    fn test_extent_size_keeps_snake_case() {
        let f: Field = serde_json::from_value(json!({
            "fieldCode": "F-1",
            "fieldName": "North",
            "extent_size": 12.5
        }))
        .unwrap();
        assert_eq!(f.extent_size, Some(12.5));
        assert_eq!(f.column_text(&COLUMNS[4]), "12.50");
        assert_eq!(f.column_text(&COLUMNS[3]), "N/A");
    }

    #[test]
    fn test_size_report_uses_fixed_order() {
        let fields = vec![
            field("F1", "Kandy", 60.0),
            field("F2", "Galle", 2.0),
            field("F3", "Kandy", 3.0),
        ];
        let report = Field::reports()[0].build(&fields);
        let labels: Vec<&str> = report.groups().iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Small (<5 acres)", "Very Large (>50 acres)"]);
        assert_eq!(report.groups()[0].count, 2);
    }

    #[test]
    fn test_summary() {
        let fields = vec![field("F1", "Kandy", 10.0), field("F2", "Galle", 5.5)];
        let summary = Field::summary(&fields);
        assert_eq!(summary[1].value, "15.50");
        assert_eq!(summary[2].value, "2");
        assert_eq!(summary[3].value, "7.75");
        assert_eq!(summary[4].value, "Field F1 (10.00 acres)");
        assert_eq!(Field::summary(&[])[3].value, "0.00");
    }

    #[test]
    fn test_stats_total_area() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let stats = Field::stats(&[field("F1", "Kandy", 1.25), field("F2", "Kandy", 2.0)], today);
        assert_eq!(stats[1].value, "3.25");
    }
}
