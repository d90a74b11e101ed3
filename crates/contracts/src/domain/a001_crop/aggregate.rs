use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{normalize_opt, normalize_text, AggregateRoot};
use crate::shared::metadata::{
    ColumnFormat, ColumnSpec, Encoding, FieldKind, FieldSpec, ResourceDescriptor,
    ResourceRoutes, ResourceUiMetadata,
};
use crate::shared::report::{ChartKind, GroupOrder, ReportSpec, SummaryLine};
use crate::shared::stats::{distinct_count, most_common, StatItem};

// ============================================================================
// Dictionaries
// ============================================================================

pub const CATEGORIES: &[&str] = &["Cereal", "Vegetable", "Fruit", "Legume", "Other"];
pub const SEASONS: &[&str] = &["Spring", "Summer", "Fall", "Winter", "All Season"];

const GENERAL_CARE: &str = "General care: Ensure proper soil conditions, adequate water, \
and appropriate sunlight for this crop type.";

// ============================================================================
// Metadata
// ============================================================================

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("cropCode", "Crop Code", FieldKind::Text),
    FieldSpec::required("commonName", "Common Name", FieldKind::Text),
    FieldSpec::required("scientificName", "Scientific Name", FieldKind::Text),
    FieldSpec::required("category", "Category", FieldKind::Choice(CATEGORIES)),
    FieldSpec::required("cropSeason", "Season", FieldKind::Choice(SEASONS)),
    FieldSpec::required("fieldCode", "Field Code", FieldKind::Text),
    FieldSpec::optional("logCode", "Log Code", FieldKind::Text),
    FieldSpec::required("cropImage", "Crop Image", FieldKind::Image),
];

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::with_format("cropImage", "Image", ColumnFormat::Image),
    ColumnSpec::plain("cropCode", "Code"),
    ColumnSpec::plain("commonName", "Common Name"),
    ColumnSpec::plain("scientificName", "Scientific Name"),
    ColumnSpec::plain("category", "Category"),
    ColumnSpec::plain("cropSeason", "Season"),
    ColumnSpec::plain("fieldCode", "Field"),
];

pub static DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
    entity_index: "a001",
    collection_name: "crop",
    key_field: "cropCode",
    ui: ResourceUiMetadata {
        element_name: "Crop",
        list_name: "Crops",
        icon: "sprout",
        empty_message: "No crops found. Add your first crop to get started.",
        placeholder: "N/A",
    },
    routes: ResourceRoutes {
        base_path: "/api/v1/crop",
        list: "/all",
        get: "/{key}",
        create: "",
        update: "/{key}",
        delete: "/{key}",
    },
    encoding: Encoding::Multipart,
    fields: FIELDS,
    columns: COLUMNS,
    facets: &["category", "cropSeason"],
};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Crop planted on a field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Crop {
    pub crop_code: String,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub category: Option<String>,
    pub crop_season: Option<String>,
    pub field_code: Option<String>,
    pub log_code: Option<String>,
    /// Base64 JPEG/PNG
    pub crop_image: Option<String>,
}

impl AggregateRoot for Crop {
    fn descriptor() -> &'static ResourceDescriptor {
        &DESCRIPTOR
    }

    fn key(&self) -> &str {
        &self.crop_code
    }

    fn field_value(&self, name: &str) -> Option<String> {
        match name {
            "cropCode" => Some(self.crop_code.clone()),
            "commonName" => self.common_name.clone(),
            "scientificName" => self.scientific_name.clone(),
            "category" => self.category.clone(),
            "cropSeason" => self.crop_season.clone(),
            "fieldCode" => self.field_code.clone(),
            "logCode" => self.log_code.clone(),
            _ => None,
        }
    }

    fn image(&self, name: &str) -> Option<&str> {
        match name {
            "cropImage" => self.crop_image.as_deref(),
            _ => None,
        }
    }

    fn normalize(self) -> Self {
        Self {
            crop_code: normalize_text(self.crop_code),
            common_name: normalize_opt(self.common_name),
            scientific_name: normalize_opt(self.scientific_name),
            category: normalize_opt(self.category),
            crop_season: normalize_opt(self.crop_season),
            field_code: normalize_opt(self.field_code),
            log_code: normalize_opt(self.log_code),
            crop_image: normalize_opt(self.crop_image),
        }
    }

    fn stats(records: &[Self], _today: NaiveDate) -> Vec<StatItem> {
        let season = most_common(records.iter().filter_map(|c| c.crop_season.as_deref()))
            .unwrap_or_else(|| "N/A".to_string());
        vec![
            StatItem::new("Total Crops", records.len(), "sprout"),
            StatItem::new(
                "Active Fields",
                distinct_count(records.iter().filter_map(|c| c.field_code.as_deref())),
                "map",
            ),
            StatItem::new("Most Common Season", season, "sun"),
        ]
    }

    fn reports() -> Vec<ReportSpec<Self>> {
        vec![
            ReportSpec {
                id: "season",
                title: "Seasonal Report",
                group_label: "Season",
                chart: ChartKind::Pie,
                order: GroupOrder::FirstSeen,
                key: |c| c.crop_season.clone(),
                image: Some(|c| c.crop_image.clone()),
            },
            ReportSpec {
                id: "category",
                title: "Category Report",
                group_label: "Category",
                chart: ChartKind::Bar,
                order: GroupOrder::FirstSeen,
                key: |c| c.category.clone(),
                image: Some(|c| c.crop_image.clone()),
            },
            ReportSpec {
                id: "field",
                title: "Field Distribution Report",
                group_label: "Field Code",
                chart: ChartKind::Column,
                order: GroupOrder::FirstSeen,
                key: |c| c.field_code.clone(),
                image: Some(|c| c.crop_image.clone()),
            },
        ]
    }

    fn summary(records: &[Self]) -> Vec<SummaryLine> {
        vec![
            SummaryLine::new("Total Crops", records.len()),
            SummaryLine::new(
                "Categories",
                distinct_count(records.iter().filter_map(|c| c.category.as_deref())),
            ),
            SummaryLine::new(
                "Seasons",
                distinct_count(records.iter().filter_map(|c| c.crop_season.as_deref())),
            ),
            SummaryLine::new(
                "Fields in Use",
                distinct_count(records.iter().filter_map(|c| c.field_code.as_deref())),
            ),
        ]
    }

    fn detail_notes(&self) -> Vec<SummaryLine> {
        vec![SummaryLine::new(
            "Care Recommendation",
            care_recommendation(
                self.category.as_deref().unwrap_or(""),
                self.crop_season.as_deref().unwrap_or(""),
            ),
        )]
    }
}

/// Growing advice for a category and season, with a general fallback
pub fn care_recommendation(category: &str, season: &str) -> &'static str {
    match (category, season) {
        ("Cereal", "Spring") => "Plant in well-drained soil with full sun. Requires regular watering during growth period.",
        ("Cereal", "Summer") => "Ensure adequate irrigation during hot months. Monitor for pests.",
        ("Cereal", "Fall") => "Harvest before first frost. Store in dry conditions.",
        ("Cereal", "Winter") => "Most cereals are not grown in winter. Consider winter wheat varieties.",
        ("Cereal", "All Season") => "Can be grown year-round in controlled environments with proper care.",
        ("Vegetable", "Spring") => "Ideal planting time for most vegetables. Ensure soil is warm enough.",
        ("Vegetable", "Summer") => "Provide shade during hottest parts of day. Water regularly.",
        ("Vegetable", "Fall") => "Plant cool-season vegetables. Protect from early frosts.",
        ("Vegetable", "Winter") => "Grow cold-hardy varieties or use greenhouses for protection.",
        ("Vegetable", "All Season") => "Succession planting recommended for continuous harvest.",
        ("Fruit", "Spring") => "Prune before new growth appears. Monitor for flowering and pollination.",
        ("Fruit", "Summer") => "Ensure consistent watering for fruit development. Protect from extreme heat.",
        ("Fruit", "Fall") => "Harvest mature fruits. Prepare plants for winter dormancy.",
        ("Fruit", "Winter") => "Most fruits are dormant. Prune during this period.",
        ("Fruit", "All Season") => "Evergreen varieties can produce year-round in suitable climates.",
        ("Legume", "Spring") => "Plant after last frost. Legumes fix nitrogen in soil.",
        ("Legume", "Summer") => "Provide support for climbing varieties. Harvest regularly.",
        ("Legume", "Fall") => "Plant for late harvest. Some varieties tolerate light frost.",
        ("Legume", "Winter") => "Not typically grown in winter unless in mild climates.",
        ("Legume", "All Season") => "Can be grown in succession for continuous harvest.",
        ("Other", "Spring") => "Follow specific growing instructions for this crop type.",
        ("Other", "Summer") => "Monitor for heat stress. Provide adequate water.",
        ("Other", "Fall") => "Prepare for harvest or overwintering as appropriate.",
        ("Other", "Winter") => "Most special crops require protection or indoor growing.",
        ("Other", "All Season") => "Consult specific growing guides for year-round cultivation.",
        _ => GENERAL_CARE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::report::AggregateReport;
    use serde_json::json;

    fn crop(code: &str, season: &str, field: &str) -> Crop {
        Crop {
            crop_code: code.into(),
            common_name: Some(format!("Crop {}", code)),
            crop_season: Some(season.into()),
            field_code: Some(field.into()),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_decode_and_normalize() {
        let crop: Crop = serde_json::from_value(json!({
            "cropCode": " C-001 ",
            "commonName": "Rice",
            "category": "Cereal",
            "cropSeason": "Spring",
            "fieldCode": "",
            "logCode": null,
            "cropImage": "iVBORw0KGgo="
        }))
        .unwrap();
        let crop = crop.normalize();
        assert_eq!(crop.key(), "C-001");
        assert_eq!(crop.field_code, None);
        assert_eq!(crop.display_value("fieldCode"), "N/A");
        assert_eq!(crop.image("cropImage"), Some("iVBORw0KGgo="));
    }

    #[test]
    fn test_season_report_scenario() {
        let crops = vec![
            crop("C1", "Spring", "F1"),
            crop("C2", "Spring", "F1"),
            crop("C3", "Fall", "F2"),
        ];
        let spec = Crop::reports().into_iter().find(|r| r.id == "season").unwrap();
        let report = spec.build(&crops);
        let AggregateReport::Groups { total, groups } = report else {
            panic!("expected groups");
        };
        assert_eq!(total, 3);
        assert_eq!(groups[0].label, "Spring");
        assert_eq!((groups[0].count, groups[0].percent), (2, 67));
        assert_eq!(groups[1].label, "Fall");
        assert_eq!((groups[1].count, groups[1].percent), (1, 33));
    }

    #[test]
    fn test_stats_strip() {
        let crops = vec![
            crop("C1", "Fall", "F1"),
            crop("C2", "Spring", "F1"),
            crop("C3", "Spring", "F2"),
        ];
        let stats = Crop::stats(&crops, today());
        assert_eq!(stats[0].value, "3");
        assert_eq!(stats[1].value, "2");
        assert_eq!(stats[2].value, "Spring");

        let empty = Crop::stats(&[], today());
        assert_eq!(empty[0].value, "0");
        assert_eq!(empty[2].value, "N/A");
    }

    #[test]
    fn test_care_recommendation() {
        assert_eq!(
            care_recommendation("Legume", "Spring"),
            "Plant after last frost. Legumes fix nitrogen in soil."
        );
        assert_eq!(care_recommendation("Cereal", "Monsoon"), GENERAL_CARE);
        let notes = crop("C1", "Winter", "F1").detail_notes();
        assert_eq!(notes[0].value, GENERAL_CARE);
    }

    #[test]
    fn test_descriptor() {
        assert_eq!(Crop::full_name(), "a001_crop");
        assert_eq!(DESCRIPTOR.routes.list_path(), "/api/v1/crop/all");
        assert_eq!(DESCRIPTOR.routes.create_path(), "/api/v1/crop");
        assert!(DESCRIPTOR.has_images());
    }
}
