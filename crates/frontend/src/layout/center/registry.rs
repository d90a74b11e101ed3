//! Section registry: maps `?active=` keys to sidebar entries and page content

use leptos::prelude::*;

use crate::dashboards::d400_overview::ui::dashboard::OverviewDashboard;
use crate::domain::a001_crop::ui::list::CropList;
use crate::domain::a002_equipment::ui::list::EquipmentList;
use crate::domain::a003_field::ui::list::FieldList;
use crate::domain::a004_staff::ui::list::StaffList;
use crate::domain::a005_vehicle::ui::list::VehicleList;
use crate::domain::a006_monitoring_log::ui::list::MonitoringLogList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const DEFAULT_SECTION: &str = "d400_overview";

/// Sidebar order
pub static SECTIONS: &[Section] = &[
    Section { key: "d400_overview", label: "Dashboard", icon: "dashboard" },
    Section { key: "a001_crop", label: "Crops", icon: "sprout" },
    Section { key: "a002_equipment", label: "Equipment", icon: "wrench" },
    Section { key: "a003_field", label: "Fields", icon: "map" },
    Section { key: "a004_staff", label: "Staff", icon: "users" },
    Section { key: "a005_vehicle", label: "Vehicles", icon: "truck" },
    Section { key: "a006_monitoring_log", label: "Monitoring Logs", icon: "clipboard" },
];

pub fn is_known_section(key: &str) -> bool {
    SECTIONS.iter().any(|s| s.key == key)
}

pub fn section_label(key: &str) -> &'static str {
    SECTIONS
        .iter()
        .find(|s| s.key == key)
        .map(|s| s.label)
        .unwrap_or("Farm Manager")
}

pub fn render_section_content(key: &str) -> AnyView {
    match key {
        "a001_crop" => view! { <CropList /> }.into_any(),
        "a002_equipment" => view! { <EquipmentList /> }.into_any(),
        "a003_field" => view! { <FieldList /> }.into_any(),
        "a004_staff" => view! { <StaffList /> }.into_any(),
        "a005_vehicle" => view! { <VehicleList /> }.into_any(),
        "a006_monitoring_log" => view! { <MonitoringLogList /> }.into_any(),
        "d400_overview" => view! { <OverviewDashboard /> }.into_any(),
        other => {
            log::warn!("unknown section '{}'", other);
            view! { <div class="placeholder">{format!("Unknown section: {}", other)}</div> }
                .into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::{
        a001_crop, a002_equipment, a003_field, a004_staff, a005_vehicle, a006_monitoring_log,
    };

    #[test]
    fn test_sections_follow_descriptors() {
        let descriptors = [
            &a001_crop::DESCRIPTOR,
            &a002_equipment::DESCRIPTOR,
            &a003_field::DESCRIPTOR,
            &a004_staff::DESCRIPTOR,
            &a005_vehicle::DESCRIPTOR,
            &a006_monitoring_log::DESCRIPTOR,
        ];
        for (section, desc) in SECTIONS[1..].iter().zip(descriptors) {
            assert_eq!(section.label, desc.ui.list_name);
            assert_eq!(section.icon, desc.ui.icon);
        }
        assert_eq!(SECTIONS.len(), descriptors.len() + 1);
    }

    #[test]
    fn test_lookup() {
        assert!(is_known_section(DEFAULT_SECTION));
        assert!(!is_known_section("a999_unknown"));
        assert_eq!(section_label("a005_vehicle"), "Vehicles");
        assert_eq!(section_label("nope"), "Farm Manager");
    }
}
