use contracts::domain::a001_crop::Crop;
use contracts::domain::a002_equipment::Equipment;
use contracts::domain::a003_field::Field;
use contracts::domain::a004_staff::Staff;
use contracts::domain::a005_vehicle::Vehicle;
use contracts::domain::a006_monitoring_log::MonitoringLog;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dashboards::d400_overview::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::api_utils::api_base;
use crate::shared::components::stat_card::StatCard;
use crate::shared::config::Config;
use crate::shared::date_utils::{format_long_date, today};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};

/// One card per resource: loads the count of `R` and opens its section on click
fn count_card<R: AggregateRoot>(base: String, ctx: AppGlobalContext) -> impl IntoView {
    let desc = R::descriptor();
    let value = RwSignal::new("...".to_string());

    spawn_local(async move {
        let result = api::record_count::<R>(&base).await;
        if let Err(e) = &result {
            log::warn!("overview: {} count unavailable: {}", R::collection_name(), e);
        }
        value.try_set(api::count_label(&result));
    });

    let section = format!("{}_{}", desc.entity_index, desc.collection_name);
    view! {
        <StatCard
            label=desc.ui.list_name
            icon_name=desc.ui.icon
            value=value
            on_click=Callback::new(move |_| ctx.activate(&section))
        />
    }
}

#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let base = api_base(&use_context::<Config>().unwrap_or_default());

    view! {
        <PageFrame page_id="d400_overview--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Dashboard"</h1>
                </div>
                <div class="page__header-right">
                    <span class="page__subtitle">{format_long_date(today())}</span>
                </div>
            </div>
            <div class="page__content">
                <div class="stats-strip stats-strip--overview">
                    {count_card::<Crop>(base.clone(), ctx)}
                    {count_card::<Equipment>(base.clone(), ctx)}
                    {count_card::<Field>(base.clone(), ctx)}
                    {count_card::<Staff>(base.clone(), ctx)}
                    {count_card::<Vehicle>(base.clone(), ctx)}
                    {count_card::<MonitoringLog>(base, ctx)}
                </div>
            </div>
        </PageFrame>
    }
}
