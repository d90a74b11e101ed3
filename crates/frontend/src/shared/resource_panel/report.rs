use contracts::domain::common::AggregateRoot;
use contracts::shared::image::image_data_url;
use contracts::shared::report::{AggregateReport, SummaryLine};
use leptos::prelude::*;
use thaw::*;

use super::chart::render_svg;
use super::handle::PanelHandle;
use crate::shared::date_utils::{format_long_date, today};
use crate::shared::export::{open_print_window, pdf_html, print_html, GroupTable, ReportDocument};
use crate::shared::icons::{icon, icon_sized};
use crate::shared::modal_frame::ModalFrame;
use crate::shared::notify::{use_toasts, Notifier, NotifyKind};

/// Which report the report popup shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportChoice {
    Group(&'static str),
    /// Summary plus every group table
    Full,
}

impl ReportChoice {
    pub const FULL: &'static str = "__full";

    pub fn parse<R: AggregateRoot>(value: &str) -> Option<Self> {
        if value == Self::FULL {
            return Some(Self::Full);
        }
        R::reports()
            .into_iter()
            .find(|r| r.id == value)
            .map(|r| Self::Group(r.id))
    }

    pub fn as_value(&self) -> String {
        match self {
            Self::Group(id) => id.to_string(),
            Self::Full => Self::FULL.to_string(),
        }
    }
}

fn group_summary(group_label: &str, report: &AggregateReport) -> Vec<SummaryLine> {
    match report {
        AggregateReport::NoData => Vec::new(),
        AggregateReport::Groups { total, groups } => {
            let mut lines = vec![
                SummaryLine::new("Total Records", total),
                SummaryLine::new(format!("Distinct {}", group_label), groups.len()),
            ];
            // first of equal maxima
            if let Some(top) = groups.iter().rev().max_by_key(|g| g.count) {
                lines.push(SummaryLine::new(
                    format!("Most Common {}", group_label),
                    format!("{} ({})", top.label, top.count),
                ));
            }
            lines
        }
    }
}

/// Assembles the printable document from the loaded list
pub fn build_document<R: AggregateRoot>(panel: PanelHandle<R>, choice: ReportChoice) -> ReportDocument {
    panel.with(|c| match choice {
        ReportChoice::Group(id) => match c.report(id) {
            Some((spec, report)) => ReportDocument {
                title: format!("{} - {}", R::list_name(), spec.title),
                generated: Some(today()),
                chart_svg: render_svg(spec.chart, report.groups()),
                summary: group_summary(spec.group_label, &report),
                tables: vec![GroupTable {
                    label: spec.group_label.to_string(),
                    groups: report.groups().to_vec(),
                }],
            },
            None => ReportDocument {
                title: R::list_name().to_string(),
                generated: Some(today()),
                ..Default::default()
            },
        },
        ReportChoice::Full => {
            let specs = R::reports();
            let mut chart_svg = String::new();
            let mut tables = Vec::new();
            for spec in &specs {
                if let Some((_, report)) = c.report(spec.id) {
                    if chart_svg.is_empty() {
                        chart_svg = render_svg(spec.chart, report.groups());
                    }
                    tables.push(GroupTable {
                        label: spec.group_label.to_string(),
                        groups: report.groups().to_vec(),
                    });
                }
            }
            ReportDocument {
                title: format!("{} Full Report", R::list_name()),
                generated: Some(today()),
                chart_svg,
                summary: c.summary(),
                tables,
            }
        }
    })
}

fn group_table_view(table: GroupTable) -> impl IntoView {
    let with_images = table.groups.iter().any(|g| g.image.is_some());
    let rows = table
        .groups
        .into_iter()
        .map(|g| {
            let image_cell = with_images.then(|| {
                let thumb = g.image.as_deref().map(|b64| {
                    view! { <img class="table-thumb" src=image_data_url(b64) alt=g.label.clone() /> }
                });
                view! { <TableCell>{thumb}</TableCell> }
            });
            view! {
                <TableRow>
                    <TableCell>{g.label.clone()}</TableCell>
                    {image_cell}
                    <TableCell>{g.count}</TableCell>
                    <TableCell>{format!("{}%", g.percent)}</TableCell>
                </TableRow>
            }
        })
        .collect_view();

    view! {
        <Table attr:style="width: 100%;">
            <TableHeader>
                <TableRow>
                    <TableHeaderCell>{table.label}</TableHeaderCell>
                    {with_images.then(|| view! { <TableHeaderCell>"Image"</TableHeaderCell> })}
                    <TableHeaderCell>"Count"</TableHeaderCell>
                    <TableHeaderCell>"Percentage"</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>{rows}</TableBody>
        </Table>
    }
}

/// Chart, summary and group tables with print and PDF actions
pub fn report_modal<R: AggregateRoot>(
    panel: PanelHandle<R>,
    choice: ReportChoice,
    report_open: RwSignal<Option<ReportChoice>>,
) -> impl IntoView {
    let toasts = use_toasts();
    let doc = build_document(panel, choice);
    let has_data = doc.tables.iter().any(|t| !t.groups.is_empty()) || !doc.summary.is_empty();
    let print_source = StoredValue::new(doc.clone());

    let close = Callback::new(move |_| report_open.set(None));
    let run_print = move |pdf: bool| {
        let html = print_source.with_value(|d| if pdf { pdf_html(d) } else { print_html(d) });
        if let Err(e) = open_print_window(&html) {
            log::error!("print failed: {}", e);
            toasts.notify(NotifyKind::Error, "Print", &e);
        }
    };

    let summary_rows = doc
        .summary
        .clone()
        .into_iter()
        .map(|line| {
            view! {
                <TableRow>
                    <TableCell>{line.label.clone()}</TableCell>
                    <TableCell>{line.value.clone()}</TableCell>
                </TableRow>
            }
        })
        .collect_view();

    view! {
        <ModalFrame on_close=close modal_class="modal--report">
            <div class="modal-header">
                <h3 class="modal-title">{doc.title.clone()}</h3>
                <div class="modal-header-actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=!has_data
                        on_click=move |_| run_print(false)
                    >
                        {icon_sized("printer", 16)}
                        " Print"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=!has_data
                        on_click=move |_| run_print(true)
                    >
                        {icon_sized("file-text", 16)}
                        " PDF"
                    </Button>
                    <button class="modal-close" on:click=move |_| close.run(())>{icon("x")}</button>
                </div>
            </div>
            <div class="report-meta">
                {doc.generated.map(|d| format!("Generated on {}", format_long_date(d)))}
            </div>
            <div class="report-chart-wrap" inner_html=doc.chart_svg.clone()></div>
            {(!doc.summary.is_empty()).then(|| view! {
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Metric"</TableHeaderCell>
                            <TableHeaderCell>"Value"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>{summary_rows}</TableBody>
                </Table>
            })}
            {doc.tables.into_iter().map(group_table_view).collect_view()}
        </ModalFrame>
    }
}
