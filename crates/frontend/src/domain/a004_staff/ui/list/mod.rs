use contracts::domain::a004_staff::Staff;
use leptos::prelude::*;

use crate::shared::resource_panel::resource_panel;

#[component]
#[allow(non_snake_case)]
pub fn StaffList() -> impl IntoView {
    resource_panel::<Staff>()
}
