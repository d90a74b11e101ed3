use crate::shared::icons::icon;
use leptos::prelude::*;

/// One card of a statistics strip
#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(optional)] on_click: Option<Callback<()>>,
) -> impl IntoView {
    let clickable = on_click.is_some();
    view! {
        <div
            class=if clickable { "stat-card stat-card--clickable" } else { "stat-card" }
            on:click=move |_| {
                if let Some(cb) = on_click {
                    cb.run(());
                }
            }
        >
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{move || value.get()}</div>
            </div>
        </div>
    }
}
