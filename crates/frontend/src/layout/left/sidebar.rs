//! Sidebar navigation: overview plus one entry per resource panel

use crate::layout::center::registry::SECTIONS;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <nav class="sidebar">
            <ul class="sidebar__menu">
                {SECTIONS
                    .iter()
                    .map(|section| {
                        let key = section.key;
                        let is_active = move || ctx.active.get() == key;
                        view! {
                            <li
                                class=move || {
                                    if is_active() {
                                        "sidebar__item sidebar__item--active"
                                    } else {
                                        "sidebar__item"
                                    }
                                }
                                title=section.label
                                on:click=move |_| ctx.activate(key)
                            >
                                <span class="sidebar__icon">{icon(section.icon)}</span>
                                <span class="sidebar__label">{section.label}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}
