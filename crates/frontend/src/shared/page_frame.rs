//! PageFrame: root wrapper of every page rendered in the center area.
//!
//! Sets `id="{entity}--{category}"` (e.g. `"a001_crop--list"`) and
//! `data-page-category`, so an id copied from the DOM inspector leads
//! straight to the `domain/a001_crop/` directory.

use leptos::prelude::*;

/// Table of records with filters and forms
pub const PAGE_CAT_LIST: &str = "list";
/// Overview cards
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

#[component]
pub fn PageFrame(
    #[prop(into)] page_id: String,
    /// One of the PAGE_CAT_* constants
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
