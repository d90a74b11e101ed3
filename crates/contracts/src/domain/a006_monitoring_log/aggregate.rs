use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{normalize_date, normalize_opt, normalize_text, AggregateRoot};
use crate::shared::metadata::{
    ColumnFormat, ColumnSpec, Encoding, FieldKind, FieldSpec, ResourceDescriptor,
    ResourceRoutes, ResourceUiMetadata,
};
use crate::shared::report::{percent_of, ChartKind, GroupOrder, ReportSpec, SummaryLine};
use crate::shared::stats::{count_where, StatItem};

const DETAILS_PREVIEW: usize = 50;

// ============================================================================
// Metadata
// ============================================================================

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("logCode", "Log Code", FieldKind::Text),
    FieldSpec::required("logDate", "Log Date", FieldKind::Date),
    FieldSpec::required("logDetails", "Details", FieldKind::LongText),
    FieldSpec::required("observedImage", "Observed Image", FieldKind::Image),
];

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::plain("logCode", "Code"),
    ColumnSpec::plain("logDate", "Date"),
    ColumnSpec::with_format("logDetails", "Details", ColumnFormat::Truncate(DETAILS_PREVIEW)),
    ColumnSpec::with_format("observedImage", "Image", ColumnFormat::Image),
];

pub static DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
    entity_index: "a006",
    collection_name: "monitoring_log",
    key_field: "logCode",
    ui: ResourceUiMetadata {
        element_name: "Monitoring Log",
        list_name: "Monitoring Logs",
        icon: "clipboard",
        empty_message: "No monitoring logs found. Add your first log to get started.",
        placeholder: "N/A",
    },
    routes: ResourceRoutes {
        base_path: "/api/v1/logs",
        list: "/all",
        get: "/{key}",
        create: "",
        update: "/{key}",
        delete: "/delete/{key}",
    },
    encoding: Encoding::Multipart,
    fields: FIELDS,
    columns: COLUMNS,
    facets: &[],
};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Field observation with a photo
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonitoringLog {
    pub log_code: String,
    /// `YYYY-MM-DD`
    pub log_date: Option<String>,
    pub log_details: Option<String>,
    pub observed_image: Option<String>,
}

impl MonitoringLog {
    pub fn has_image(&self) -> bool {
        self.observed_image.is_some()
    }

    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.log_date.as_deref() == Some(day.format("%Y-%m-%d").to_string().as_str())
    }
}

impl AggregateRoot for MonitoringLog {
    fn descriptor() -> &'static ResourceDescriptor {
        &DESCRIPTOR
    }

    fn key(&self) -> &str {
        &self.log_code
    }

    fn field_value(&self, name: &str) -> Option<String> {
        match name {
            "logCode" => Some(self.log_code.clone()),
            "logDate" => self.log_date.clone(),
            "logDetails" => self.log_details.clone(),
            _ => None,
        }
    }

    fn image(&self, name: &str) -> Option<&str> {
        match name {
            "observedImage" => self.observed_image.as_deref(),
            _ => None,
        }
    }

    fn normalize(self) -> Self {
        Self {
            log_code: normalize_text(self.log_code),
            log_date: normalize_date(self.log_date),
            log_details: normalize_opt(self.log_details),
            observed_image: normalize_opt(self.observed_image),
        }
    }

    fn stats(records: &[Self], today: NaiveDate) -> Vec<StatItem> {
        vec![
            StatItem::new("Total Logs", records.len(), "clipboard"),
            StatItem::new("Today's Logs", count_where(records, |l| l.is_on(today)), "calendar"),
            StatItem::new("Logs with Images", count_where(records, MonitoringLog::has_image), "image"),
        ]
    }

    fn reports() -> Vec<ReportSpec<Self>> {
        vec![ReportSpec {
            id: "date",
            title: "Logs by Date",
            group_label: "Date",
            chart: ChartKind::Column,
            order: GroupOrder::Ascending,
            key: |l| l.log_date.clone(),
            image: Some(|l| l.observed_image.clone()),
        }]
    }

    fn summary(records: &[Self]) -> Vec<SummaryLine> {
        let with_images = count_where(records, MonitoringLog::has_image);
        let mut dates: Vec<&str> = records.iter().filter_map(|l| l.log_date.as_deref()).collect();
        dates.sort_unstable();

        let mut lines = vec![
            SummaryLine::new("Total Logs", records.len()),
            SummaryLine::new("Logs with Images", with_images),
            SummaryLine::new(
                "Percentage with Images",
                format!("{}%", percent_of(with_images, records.len())),
            ),
        ];
        if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
            lines.push(SummaryLine::new("Date Range", format!("{} to {}", first, last)));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(code: &str, date: &str, image: bool) -> MonitoringLog {
        MonitoringLog {
            log_code: code.into(),
            log_date: Some(date.into()),
            log_details: Some("Leaf rust observed on the lower leaves of the north block".into()),
            observed_image: image.then(|| "/9j/4AAQ".to_string()),
        }
    }

    #[test]
    fn test_stats_today_and_images() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let logs = vec![
            log("L1", "2024-06-02", true),
            log("L2", "2024-06-01", false),
            log("L3", "2024-06-02", false),
        ];
        let values: Vec<String> = MonitoringLog::stats(&logs, today)
            .into_iter()
            .map(|s| s.value)
            .collect();
        assert_eq!(values, vec!["3", "2", "1"]);
    }

    #[test]
    fn test_details_column_truncated() {
        let l = log("L1", "2024-06-02", false);
        let text = l.column_text(&COLUMNS[2]);
        assert!(text.ends_with("..."));
        assert_eq!(text.chars().count(), DETAILS_PREVIEW + 3);
    }

    #[test]
    fn test_summary_date_range() {
        let logs = vec![
            log("L1", "2024-06-02", true),
            log("L2", "2024-05-20", false),
        ];
        let summary = MonitoringLog::summary(&logs);
        assert_eq!(summary[2].value, "50%");
        assert_eq!(summary[3].value, "2024-05-20 to 2024-06-02");
        assert_eq!(MonitoringLog::summary(&[])[2].value, "0%");
    }
}
