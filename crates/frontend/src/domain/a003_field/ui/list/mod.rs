use contracts::domain::a003_field::Field;
use leptos::prelude::*;

use crate::shared::resource_panel::resource_panel;

/// Fields with their extent and location
#[component]
#[allow(non_snake_case)]
pub fn FieldList() -> impl IntoView {
    resource_panel::<Field>()
}
