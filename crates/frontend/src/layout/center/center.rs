use leptos::prelude::*;

use super::registry::render_section_content;
use crate::layout::global_context::AppGlobalContext;

/// Content area; swaps the page whenever the active section changes
#[component]
pub fn Center() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div data-zone="center" class="app-center">
            {move || render_section_content(&ctx.active.get())}
        </div>
    }
}
