use contracts::domain::a005_vehicle::Vehicle;
use leptos::prelude::*;

use crate::shared::resource_panel::resource_panel;

#[component]
#[allow(non_snake_case)]
pub fn VehicleList() -> impl IntoView {
    resource_panel::<Vehicle>()
}
