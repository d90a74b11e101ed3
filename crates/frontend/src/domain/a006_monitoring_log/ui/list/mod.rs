use contracts::domain::a006_monitoring_log::MonitoringLog;
use leptos::prelude::*;

use crate::shared::resource_panel::resource_panel;

/// Field monitoring log entries
#[component]
#[allow(non_snake_case)]
pub fn MonitoringLogList() -> impl IntoView {
    resource_panel::<MonitoringLog>()
}
