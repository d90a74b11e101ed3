//! Top bar: sidebar toggle, brand, current section and dark/light switch

use crate::layout::center::registry::section_label;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::shared::theme::ThemeToggle;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__logo">{icon("sprout")}</span>
                <span class="top-header__title">"Farm Manager"</span>
            </div>
            <div class="top-header__section">{move || section_label(&ctx.active.get())}</div>
            <div class="top-header__actions">
                <ThemeToggle />
            </div>
        </div>
    }
}
