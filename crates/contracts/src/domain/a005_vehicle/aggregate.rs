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
pub const CATEGORIES: &[&str] = &["Truck", "Car", "Van", "Motorcycle", "Tractor", "Other"];
pub const FUEL_TYPES: &[&str] = &["Petrol", "Diesel", "Electric", "Hybrid", "Other"];

const TOP_STAFF: usize = 10;

// ============================================================================
// Metadata
// ============================================================================

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("vehicleCode", "Vehicle Code", FieldKind::Text),
    FieldSpec::required("licensePlateNumber", "License Plate", FieldKind::Text),
    FieldSpec::required("vehicleCategory", "Category", FieldKind::Choice(CATEGORIES)),
    FieldSpec::required("fuelType", "Fuel Type", FieldKind::Choice(FUEL_TYPES)),
    FieldSpec::required("status", "Status", FieldKind::Choice(STATUSES)),
    FieldSpec::required("staffId", "Staff ID", FieldKind::Text),
];

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::plain("vehicleCode", "Code"),
    ColumnSpec::plain("licensePlateNumber", "License Plate"),
    ColumnSpec::plain("vehicleCategory", "Category"),
    ColumnSpec::plain("fuelType", "Fuel"),
    ColumnSpec::plain("status", "Status"),
    ColumnSpec::plain("staffId", "Staff"),
];

pub static DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
    entity_index: "a005",
    collection_name: "vehicle",
    key_field: "vehicleCode",
    ui: ResourceUiMetadata {
        element_name: "Vehicle",
        list_name: "Vehicles",
        icon: "truck",
        empty_message: "No vehicles found. Add your first vehicle to get started.",
        placeholder: "N/A",
    },
    routes: ResourceRoutes {
        base_path: "/api/v1/vehicle",
        list: "/getAll",
        get: "/{key}",
        create: "/save",
        update: "/update/{key}",
        delete: "/delete/{key}",
    },
    encoding: Encoding::Json,
    fields: FIELDS,
    columns: COLUMNS,
    facets: &["status", "vehicleCategory", "fuelType"],
};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Farm vehicle assigned to a staff member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vehicle {
    pub vehicle_code: String,
    pub license_plate_number: Option<String>,
    pub vehicle_category: Option<String>,
    pub fuel_type: Option<String>,
    pub status: Option<String>,
    pub staff_id: Option<String>,
}

impl Vehicle {
    fn has_status(&self, status: &str) -> bool {
        self.status.as_deref() == Some(status)
    }
}

impl AggregateRoot for Vehicle {
    fn descriptor() -> &'static ResourceDescriptor {
        &DESCRIPTOR
    }

    fn key(&self) -> &str {
        &self.vehicle_code
    }

    fn field_value(&self, name: &str) -> Option<String> {
        match name {
            "vehicleCode" => Some(self.vehicle_code.clone()),
            "licensePlateNumber" => self.license_plate_number.clone(),
            "vehicleCategory" => self.vehicle_category.clone(),
            "fuelType" => self.fuel_type.clone(),
            "status" => self.status.clone(),
            "staffId" => self.staff_id.clone(),
            _ => None,
        }
    }

    fn normalize(self) -> Self {
        Self {
            vehicle_code: normalize_text(self.vehicle_code),
            license_plate_number: normalize_opt(self.license_plate_number),
            vehicle_category: normalize_opt(self.vehicle_category),
            fuel_type: normalize_opt(self.fuel_type),
            status: normalize_opt(self.status),
            staff_id: normalize_opt(self.staff_id),
        }
    }

    fn stats(records: &[Self], _today: NaiveDate) -> Vec<StatItem> {
        vec![
            StatItem::new("Total Vehicles", records.len(), "truck"),
            StatItem::new(
                "Active",
                count_where(records, |v| v.has_status("Active")),
                "check-circle",
            ),
            StatItem::new(
                "Under Maintenance",
                count_where(records, |v| v.has_status("Maintenance")),
                "alert-triangle",
            ),
        ]
    }

    fn reports() -> Vec<ReportSpec<Self>> {
        vec![
            ReportSpec {
                id: "status",
                title: "Vehicle Status Distribution",
                group_label: "Status",
                chart: ChartKind::Pie,
                order: GroupOrder::FirstSeen,
                key: |v| v.status.clone(),
                image: None,
            },
            ReportSpec {
                id: "category",
                title: "Vehicle Categories",
                group_label: "Category",
                chart: ChartKind::Bar,
                order: GroupOrder::FirstSeen,
                key: |v| v.vehicle_category.clone(),
                image: None,
            },
            ReportSpec {
                id: "fuel",
                title: "Fuel Type Distribution",
                group_label: "Fuel Type",
                chart: ChartKind::Pie,
                order: GroupOrder::FirstSeen,
                key: |v| v.fuel_type.clone(),
                image: None,
            },
            ReportSpec {
                id: "staff",
                title: "Top Staff by Assigned Vehicles",
                group_label: "Staff ID",
                chart: ChartKind::Column,
                order: GroupOrder::Top { limit: TOP_STAFF },
                key: |v| v.staff_id.clone(),
                image: None,
            },
        ]
    }

    fn summary(records: &[Self]) -> Vec<SummaryLine> {
        vec![
            SummaryLine::new("Total Vehicles", records.len()),
            SummaryLine::new("Active", count_where(records, |v| v.has_status("Active"))),
            SummaryLine::new("Inactive", count_where(records, |v| v.has_status("Inactive"))),
            SummaryLine::new(
                "Under Maintenance",
                count_where(records, |v| v.has_status("Maintenance")),
            ),
            SummaryLine::new(
                "Assigned Staff",
                distinct_count(records.iter().filter_map(|v| v.staff_id.as_deref())),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(code: &str, staff: &str) -> Vehicle {
        Vehicle {
            vehicle_code: code.into(),
            status: Some("Active".into()),
            staff_id: Some(staff.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_top_staff_sorted_and_truncated() {
        let mut list = Vec::new();
        for i in 0..12 {
            list.push(vehicle(&format!("V{}", i), &format!("S{:02}", i)));
        }
        list.push(vehicle("V-extra-1", "S05"));
        list.push(vehicle("V-extra-2", "S05"));
        list.push(vehicle("V-extra-3", "S07"));

        let spec = Vehicle::reports().into_iter().find(|r| r.id == "staff").unwrap();
        let report = spec.build(&list);
        let groups = report.groups();
        assert_eq!(groups.len(), 10);
        assert_eq!((groups[0].label.as_str(), groups[0].count), ("S05", 3));
        assert_eq!((groups[1].label.as_str(), groups[1].count), ("S07", 2));
        // ties keep first-seen order
        assert_eq!(groups[2].label, "S00");
        assert_eq!(report.total(), 15);
    }

    #[test]
    fn test_routes() {
        assert_eq!(DESCRIPTOR.routes.list_path(), "/api/v1/vehicle/getAll");
        assert_eq!(DESCRIPTOR.routes.update_path("V 1"), "/api/v1/vehicle/update/V 1");
        assert_eq!(DESCRIPTOR.routes.delete_path("V1"), "/api/v1/vehicle/delete/V1");
    }

    #[test]
    fn test_stats() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut list = vec![vehicle("V1", "S1"), vehicle("V2", "S1")];
        list[1].status = Some("Maintenance".into());
        let values: Vec<String> = Vehicle::stats(&list, today).into_iter().map(|s| s.value).collect();
        assert_eq!(values, vec!["2", "1", "1"]);
    }
}
