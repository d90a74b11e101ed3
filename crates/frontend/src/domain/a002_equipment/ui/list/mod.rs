use contracts::domain::a002_equipment::Equipment;
use leptos::prelude::*;

use crate::shared::resource_panel::resource_panel;

#[component]
#[allow(non_snake_case)]
pub fn EquipmentList() -> impl IntoView {
    resource_panel::<Equipment>()
}
