use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{normalize_opt, normalize_text, AggregateRoot};
use crate::shared::metadata::{
    ColumnSpec, Encoding, FieldKind, FieldSpec, ResourceDescriptor, ResourceRoutes,
    ResourceUiMetadata,
};
use crate::shared::report::{ChartKind, GroupOrder, ReportSpec, SummaryLine};
use crate::shared::stats::{count_where, distinct_count, StatItem};

pub const STATUSES: &[&str] = &["Active", "Inactive", "Maintenance"];

// ============================================================================
// Metadata
// ============================================================================

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("equipmentId", "Equipment ID", FieldKind::Text),
    FieldSpec::required("name", "Name", FieldKind::Text),
    FieldSpec::required("type", "Type", FieldKind::Text),
    FieldSpec::required("status", "Status", FieldKind::Choice(STATUSES)),
    FieldSpec::required("staffId", "Staff ID", FieldKind::Text),
    FieldSpec::required("fieldCode", "Field Code", FieldKind::Text),
];

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::plain("equipmentId", "ID"),
    ColumnSpec::plain("name", "Name"),
    ColumnSpec::plain("type", "Type"),
    ColumnSpec::plain("status", "Status"),
    ColumnSpec::plain("staffId", "Staff"),
    ColumnSpec::plain("fieldCode", "Field"),
];

pub static DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
    entity_index: "a002",
    collection_name: "equipment",
    key_field: "equipmentId",
    ui: ResourceUiMetadata {
        element_name: "Equipment",
        list_name: "Equipment",
        icon: "wrench",
        empty_message: "No equipment found. Add your first equipment to get started.",
        placeholder: "N/A",
    },
    routes: ResourceRoutes {
        base_path: "/api/v1/equipment",
        list: "",
        get: "/{key}",
        create: "/save",
        update: "/{key}",
        delete: "/{key}",
    },
    encoding: Encoding::Json,
    fields: FIELDS,
    columns: COLUMNS,
    facets: &["status"],
};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Farm equipment assigned to a staff member and a field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Equipment {
    pub equipment_id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub equipment_type: Option<String>,
    pub status: Option<String>,
    pub staff_id: Option<String>,
    pub field_code: Option<String>,
}

impl Equipment {
    fn has_status(&self, status: &str) -> bool {
        self.status.as_deref() == Some(status)
    }
}

impl AggregateRoot for Equipment {
    fn descriptor() -> &'static ResourceDescriptor {
        &DESCRIPTOR
    }

    fn key(&self) -> &str {
        &self.equipment_id
    }

    fn field_value(&self, name: &str) -> Option<String> {
        match name {
            "equipmentId" => Some(self.equipment_id.clone()),
            "name" => self.name.clone(),
            "type" => self.equipment_type.clone(),
            "status" => self.status.clone(),
            "staffId" => self.staff_id.clone(),
            "fieldCode" => self.field_code.clone(),
            _ => None,
        }
    }

    fn normalize(self) -> Self {
        Self {
            equipment_id: normalize_text(self.equipment_id),
            name: normalize_opt(self.name),
            equipment_type: normalize_opt(self.equipment_type),
            status: normalize_opt(self.status),
            staff_id: normalize_opt(self.staff_id),
            field_code: normalize_opt(self.field_code),
        }
    }

    fn stats(records: &[Self], _today: NaiveDate) -> Vec<StatItem> {
        vec![
            StatItem::new("Total Equipment", records.len(), "wrench"),
            StatItem::new(
                "Active",
                count_where(records, |e| e.has_status("Active")),
                "check-circle",
            ),
            StatItem::new(
                "Under Maintenance",
                count_where(records, |e| e.has_status("Maintenance")),
                "alert-triangle",
            ),
        ]
    }

    fn reports() -> Vec<ReportSpec<Self>> {
        vec![
            ReportSpec {
                id: "status",
                title: "Equipment Status Distribution",
                group_label: "Status",
                chart: ChartKind::Pie,
                order: GroupOrder::FirstSeen,
                key: |e| e.status.clone(),
                image: None,
            },
            ReportSpec {
                id: "type",
                title: "Equipment Type Distribution",
                group_label: "Type",
                chart: ChartKind::Bar,
                order: GroupOrder::FirstSeen,
                key: |e| e.equipment_type.clone(),
                image: None,
            },
            ReportSpec {
                id: "field",
                title: "Field Assignment Distribution",
                group_label: "Field Code",
                chart: ChartKind::Column,
                order: GroupOrder::FirstSeen,
                key: |e| e.field_code.clone(),
                image: None,
            },
        ]
    }

    fn summary(records: &[Self]) -> Vec<SummaryLine> {
        vec![
            SummaryLine::new("Total Equipment", records.len()),
            SummaryLine::new("Active", count_where(records, |e| e.has_status("Active"))),
            SummaryLine::new("Inactive", count_where(records, |e| e.has_status("Inactive"))),
            SummaryLine::new(
                "Under Maintenance",
                count_where(records, |e| e.has_status("Maintenance")),
            ),
            SummaryLine::new(
                "Equipment Types",
                distinct_count(records.iter().filter_map(|e| e.equipment_type.as_deref())),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn equipment(id: &str, kind: &str, status: &str) -> Equipment {
        Equipment {
            equipment_id: id.into(),
            name: Some(format!("Item {}", id)),
            equipment_type: Some(kind.into()),
            status: Some(status.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_type_is_renamed_on_the_wire() {
        let e: Equipment = serde_json::from_value(json!({
            "equipmentId": "E-1",
            "type": "Tractor",
            "status": "Active"
        }))
        .unwrap();
        assert_eq!(e.equipment_type.as_deref(), Some("Tractor"));
        assert_eq!(e.field_value("type").as_deref(), Some("Tractor"));
        assert_eq!(serde_json::to_value(&e).unwrap()["type"], json!("Tractor"));
    }

    #[test]
    fn test_stats_count_by_status() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let list = vec![
            equipment("E1", "Plough", "Active"),
            equipment("E2", "Plough", "Maintenance"),
            equipment("E3", "Sprayer", "Active"),
            equipment("E4", "Sprayer", "Inactive"),
        ];
        let stats = Equipment::stats(&list, today);
        let values: Vec<&str> = stats.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["4", "2", "1"]);
    }

    #[test]
    fn test_status_report_percentages() {
        let list = vec![
            equipment("E1", "Plough", "Active"),
            equipment("E2", "Plough", "Maintenance"),
            equipment("E3", "Sprayer", "Active"),
            equipment("E4", "Sprayer", "Active"),
        ];
        let report = Equipment::reports()[0].build(&list);
        assert_eq!(report.groups()[0].percent, 75);
        assert_eq!(report.groups()[1].percent, 25);
    }

    #[test]
    fn test_routes() {
        assert_eq!(DESCRIPTOR.routes.list_path(), "/api/v1/equipment");
        assert_eq!(DESCRIPTOR.routes.create_path(), "/api/v1/equipment/save");
        assert_eq!(DESCRIPTOR.routes.update_path("E-1"), "/api/v1/equipment/E-1");
    }
}
