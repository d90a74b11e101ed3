use std::collections::BTreeMap;

use contracts::domain::common::AggregateRoot;
use contracts::shared::image::image_data_url;
use contracts::shared::metadata::{ColumnFormat, ColumnSpec};
use leptos::prelude::*;
use thaw::*;

use super::controller::ListStatus;
use super::details::details_modal;
use super::form::form_modal;
use super::handle::{use_panel, PanelHandle};
use super::report::{report_modal, ReportChoice};
use crate::shared::components::stat_card::StatCard;
use crate::shared::date_utils::today;
use crate::shared::export::download_csv;
use crate::shared::icons::{icon, icon_sized};
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::notify::{use_toasts, Notifier, NotifyKind};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};

/// Inputs of the table body; the rows re-render only when one of these changes
#[derive(Clone, PartialEq)]
struct ListKey {
    version: u64,
    status: ListStatus,
    filter: String,
    facets: BTreeMap<&'static str, String>,
}

/// List page of one resource: stats strip, filters, table and popups
pub fn resource_panel<R: AggregateRoot>() -> impl IntoView {
    let panel = use_panel::<R>();
    let toasts = use_toasts();
    let desc = R::descriptor();
    let report_open = RwSignal::new(None::<ReportChoice>);

    panel.reload();

    let list_key = Memo::new(move |_| {
        panel.read(|c| {
            let s = c.state();
            ListKey {
                version: s.version,
                status: s.list_status.clone(),
                filter: s.filter.clone(),
                facets: s.facets.clone(),
            }
        })
    });
    let form_open = Memo::new(move |_| panel.read(|c| c.state().form.is_some()));
    let detail_open = Memo::new(move |_| panel.read(|c| c.state().detail.is_some()));
    let is_loading = Memo::new(move |_| list_key.get().status == ListStatus::Loading);

    let stats = move || {
        list_key.track();
        panel
            .with(|c| c.stats())
            .into_iter()
            .map(|item| {
                view! { <StatCard label=item.label icon_name=item.icon value=item.value /> }
            })
            .collect_view()
    };

    let record_count = move || {
        list_key.track();
        panel.with(|c| c.visible_records().len())
    };

    let export_csv = move |_| {
        let records = panel.with(|c| c.visible_records());
        if let Err(e) = download_csv(&records, today()) {
            log::warn!("{}: csv export: {}", R::collection_name(), e);
            toasts.notify(NotifyKind::Warning, "Export", &e);
        }
    };

    let on_report_select = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        report_open.set(ReportChoice::parse::<R>(&value));
    };

    view! {
        <PageFrame page_id=format!("{}--list", R::full_name()) category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <span class="page__icon">{icon(desc.ui.icon)}</span>
                    <h1 class="page__title">{desc.ui.list_name}</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        {record_count}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Space>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| panel.with(|c| c.open_create_form())
                        >
                            {icon_sized("plus", 16)}
                            {format!(" Add {}", desc.ui.element_name)}
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=Signal::derive(move || is_loading.get())
                            on_click=move |_| panel.reload()
                        >
                            {icon_sized("refresh", 16)}
                            " Refresh"
                        </Button>
                        <Button appearance=ButtonAppearance::Secondary on_click=export_csv>
                            {icon_sized("download", 16)}
                            " CSV"
                        </Button>
                        <select
                            class="form__select report-select"
                            prop:value=move || {
                                report_open.get().map(|r| r.as_value()).unwrap_or_default()
                            }
                            on:change=on_report_select
                        >
                            <option value="">"Reports..."</option>
                            {R::reports()
                                .into_iter()
                                .map(|r| view! { <option value=r.id>{r.title}</option> })
                                .collect_view()}
                            <option value={ReportChoice::FULL}>"Full Report"</option>
                        </select>
                    </Space>
                </div>
            </div>

            <div class="page__content">
                <div class="stats-strip">{stats}</div>

                <div class="filter-panel">
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <SearchInput
                            value=Signal::derive(move || list_key.get().filter)
                            on_change=Callback::new(move |term: String| {
                                panel.with(|c| c.set_filter(term))
                            })
                            placeholder=format!(
                                "Search {}...",
                                desc.ui.list_name.to_lowercase(),
                            )
                        />
                        {desc
                            .facets
                            .iter()
                            .map(|&field| facet_select(panel, field, list_key))
                            .collect_view()}
                    </Flex>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {desc
                                    .columns
                                    .iter()
                                    .map(|c| view! { <TableHeaderCell>{c.label}</TableHeaderCell> })
                                    .collect_view()}
                                <TableHeaderCell attr:style="width: 140px;">"Actions"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>{move || table_body(panel, list_key.get())}</TableBody>
                    </Table>
                </div>
            </div>

            <Show when=move || form_open.get()>{move || form_modal(panel)}</Show>
            <Show when=move || detail_open.get()>{move || details_modal(panel)}</Show>
            {move || report_open.get().map(|choice| report_modal(panel, choice, report_open))}
        </PageFrame>
    }
}

fn facet_select<R: AggregateRoot>(
    panel: PanelHandle<R>,
    field: &'static str,
    list_key: Memo<ListKey>,
) -> impl IntoView {
    let label = R::descriptor()
        .field(field)
        .map(|f| f.label)
        .unwrap_or(field);

    let options = move || {
        list_key.track();
        panel
            .with(|c| c.facet_options(field))
            .into_iter()
            .map(|o| {
                let value = o.clone();
                view! { <option value=value>{o}</option> }
            })
            .collect_view()
    };

    view! {
        <select
            class="form__select"
            title=label
            prop:value=move || list_key.get().facets.get(field).cloned().unwrap_or_default()
            on:change=move |ev| {
                let value = event_target_value(&ev);
                panel.with(|c| c.set_facet(field, Some(value)));
            }
        >
            <option value="">{format!("All {}", label)}</option>
            {options}
        </select>
    }
}

fn message_row(colspan: usize, content: AnyView) -> AnyView {
    view! {
        <tr class="table-message-row">
            <td colspan=colspan.to_string()>{content}</td>
        </tr>
    }
    .into_any()
}

fn table_body<R: AggregateRoot>(panel: PanelHandle<R>, key: ListKey) -> AnyView {
    let desc = R::descriptor();
    let colspan = desc.columns.len() + 1;
    let records = panel.with(|c| c.visible_records());

    match key.status {
        ListStatus::Idle | ListStatus::Loading if records.is_empty() => message_row(
            colspan,
            view! {
                <Flex gap=FlexGap::Small justify=FlexJustify::Center align=FlexAlign::Center>
                    <Spinner />
                    <span>{format!("Loading {}...", desc.ui.list_name.to_lowercase())}</span>
                </Flex>
            }
            .into_any(),
        ),
        ListStatus::Failed(message) => message_row(
            colspan,
            view! {
                <div class="table-empty table-empty--error">
                    {icon("alert-triangle")}
                    <p>{message}</p>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| panel.reload()>
                        "Retry"
                    </Button>
                </div>
            }
            .into_any(),
        ),
        _ if records.is_empty() => {
            let text = if key.filter.trim().is_empty() && key.facets.is_empty() {
                desc.ui.empty_message.to_string()
            } else {
                format!("No {} match the current filter.", desc.ui.list_name.to_lowercase())
            };
            message_row(
                colspan,
                view! {
                    <div class="table-empty">
                        {icon(desc.ui.icon)}
                        <p>{text}</p>
                    </div>
                }
                .into_any(),
            )
        }
        _ => records
            .into_iter()
            .map(|record| record_row(panel, record, &key.filter))
            .collect_view()
            .into_any(),
    }
}

fn cell_view<R: AggregateRoot>(record: &R, column: &'static ColumnSpec, filter: &str) -> AnyView {
    match column.format {
        ColumnFormat::Image => match record.image(column.field) {
            Some(b64) => view! {
                <img class="table-thumb" src=image_data_url(b64) alt=column.label />
            }
            .into_any(),
            None => view! {
                <span class="table-thumb table-thumb--empty">{icon_sized("image", 16)}</span>
            }
            .into_any(),
        },
        _ => highlight_matches(&record.column_text(column), filter),
    }
}

fn record_row<R: AggregateRoot>(panel: PanelHandle<R>, record: R, filter: &str) -> impl IntoView {
    let key = record.key().to_string();
    let cells = R::descriptor()
        .columns
        .iter()
        .map(|column| {
            let content = cell_view(&record, column, filter);
            view! {
                <TableCell>
                    <TableCellLayout truncate=true>{content}</TableCellLayout>
                </TableCell>
            }
        })
        .collect_view();

    let view_key = key.clone();
    let edit_key = key.clone();
    let delete_key = key;

    view! {
        <TableRow>
            {cells}
            <TableCell>
                <Flex gap=FlexGap::Small>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| {
                            let key = view_key.clone();
                            panel.spawn(|c| async move {
                                let _ = c.view_record(&key).await;
                            });
                        }
                    >
                        {icon_sized("eye", 16)}
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| {
                            let key = edit_key.clone();
                            panel.spawn(|c| async move {
                                let _ = c.open_edit_form(&key).await;
                            });
                        }
                    >
                        {icon_sized("edit", 16)}
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| {
                            let key = delete_key.clone();
                            panel.spawn(|c| async move {
                                c.delete_record(&key).await;
                            });
                        }
                    >
                        {icon_sized("trash", 16)}
                    </Button>
                </Flex>
            </TableCell>
        </TableRow>
    }
}
