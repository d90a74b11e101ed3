use contracts::domain::a001_crop::Crop;
use leptos::prelude::*;

use crate::shared::resource_panel::resource_panel;

/// Crops: seasons, categories and field assignment
#[component]
#[allow(non_snake_case)]
pub fn CropList() -> impl IntoView {
    resource_panel::<Crop>()
}
