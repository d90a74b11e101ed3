//! Экспорт: CSV, окно печати и постраничный PDF-макет.
//!
//! Builders are pure string functions; only `download_csv` and
//! `open_print_window` touch the browser.

use std::fmt::Write;

use chrono::NaiveDate;
use contracts::domain::common::AggregateRoot;
use contracts::shared::image::image_data_url;
use contracts::shared::report::{GroupCount, SummaryLine};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Rows of summary table that fit on the first PDF page (below the chart)
pub const FIRST_PAGE_ROWS: usize = 8;
/// Rows of summary table on every following page
pub const PAGE_ROWS: usize = 30;

// ============================================================================
// CSV
// ============================================================================

/// Оборачивает ячейку в кавычки, если она содержит разделитель, кавычку или перевод строки
pub fn escape_csv_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// UTF-8 BOM, header of column labels, one row per record
pub fn build_csv<R: AggregateRoot>(records: &[R]) -> String {
    let columns: Vec<_> = R::descriptor().text_columns().collect();
    let mut csv = String::from('\u{FEFF}');

    let header: Vec<String> = columns.iter().map(|c| escape_csv_cell(c.label)).collect();
    csv.push_str(&header.join(","));
    csv.push('\n');

    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|c| escape_csv_cell(&record.column_text(c)))
            .collect();
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}

pub fn csv_filename(collection: &str, today: NaiveDate) -> String {
    format!("{}_data_{}.csv", collection, today.format("%Y-%m-%d"))
}

/// Экспортирует записи в CSV и инициирует скачивание
pub fn download_csv<R: AggregateRoot>(records: &[R], today: NaiveDate) -> Result<(), String> {
    if records.is_empty() {
        return Err("No data to export".to_string());
    }
    let blob = create_blob(&build_csv(records), "text/csv;charset=utf-8;")?;
    download_blob(&blob, &csv_filename(R::collection_name(), today))
}

fn create_blob(content: &str, mime: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

/// Скачивание Blob через временную ссылку
fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;
    log::info!("downloaded {}", filename);
    Ok(())
}

// ============================================================================
// Print view / PDF layout
// ============================================================================

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Everything a printed report shows
#[derive(Debug, Clone, Default)]
pub struct ReportDocument {
    pub title: String,
    pub generated: Option<NaiveDate>,
    /// Ready-made SVG markup
    pub chart_svg: String,
    pub summary: Vec<SummaryLine>,
    pub tables: Vec<GroupTable>,
}

/// Group counts under a heading column label
#[derive(Debug, Clone, Default)]
pub struct GroupTable {
    pub label: String,
    pub groups: Vec<GroupCount>,
}

const PRINT_STYLE: &str = "body{font-family:Arial,sans-serif;margin:24px;color:#222}\
h1{color:#2e7d32;margin-bottom:4px}.meta{color:#666;margin-bottom:16px}\
table{border-collapse:collapse;width:100%;margin:16px 0}\
th,td{border:1px solid #ccc;padding:6px 8px;text-align:left}\
th{background:#e8f5e9}img.thumb{width:40px;height:40px;object-fit:cover;border-radius:4px}\
.page{page-break-after:always;position:relative;min-height:260mm}\
.page:last-child{page-break-after:auto}\
.footer{position:absolute;bottom:0;width:100%;text-align:center;color:#888;font-size:11px}";

fn open_document(out: &mut String, title: &str) {
    let _ = write!(
        out,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head><body>",
        escape_html(title),
        PRINT_STYLE
    );
}

fn title_block(out: &mut String, doc: &ReportDocument) {
    let _ = write!(out, "<h1>{}</h1>", escape_html(&doc.title));
    if let Some(date) = doc.generated {
        let _ = write!(out, "<div class=\"meta\">Generated on {}</div>", date.format("%Y-%m-%d"));
    }
}

fn summary_table(out: &mut String, rows: &[SummaryLine]) {
    if rows.is_empty() {
        return;
    }
    out.push_str("<table><thead><tr><th>Metric</th><th>Value</th></tr></thead><tbody>");
    for row in rows {
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(&row.label),
            escape_html(&row.value)
        );
    }
    out.push_str("</tbody></table>");
}

fn group_table(out: &mut String, label: &str, groups: &[GroupCount]) {
    if groups.is_empty() {
        return;
    }
    let with_images = groups.iter().any(|g| g.image.is_some());
    let _ = write!(out, "<table><thead><tr><th>{}</th>", escape_html(label));
    if with_images {
        out.push_str("<th>Image</th>");
    }
    out.push_str("<th>Count</th><th>Percentage</th></tr></thead><tbody>");
    for g in groups {
        let _ = write!(out, "<tr><td>{}</td>", escape_html(&g.label));
        if with_images {
            match &g.image {
                Some(img) => {
                    let _ = write!(
                        out,
                        "<td><img class=\"thumb\" src=\"{}\"></td>",
                        escape_html(&image_data_url(img))
                    );
                }
                None => out.push_str("<td></td>"),
            }
        }
        let _ = write!(out, "<td>{}</td><td>{}%</td></tr>", g.count, g.percent);
    }
    out.push_str("</tbody></table>");
}

/// Single-page print document
pub fn print_html(doc: &ReportDocument) -> String {
    let mut out = String::new();
    open_document(&mut out, &doc.title);
    title_block(&mut out, doc);
    out.push_str(&doc.chart_svg);
    summary_table(&mut out, &doc.summary);
    for table in &doc.tables {
        group_table(&mut out, &table.label, &table.groups);
    }
    out.push_str("</body></html>");
    out
}

/// One sheet of the PDF layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPage {
    pub number: usize,
    pub total: usize,
    pub with_header: bool,
    /// Range into the summary rows
    pub rows: std::ops::Range<usize>,
}

impl PdfPage {
    pub fn footer(&self) -> String {
        format!("Page {} of {}", self.number, self.total)
    }
}

/// Page one holds the title block, chart and the first rows; the rest flow on
pub fn paginate(row_count: usize, first_capacity: usize, page_capacity: usize) -> Vec<PdfPage> {
    let page_capacity = page_capacity.max(1);
    let first = row_count.min(first_capacity);
    let mut ranges = vec![0..first];
    let mut start = first;
    while start < row_count {
        let end = (start + page_capacity).min(row_count);
        ranges.push(start..end);
        start = end;
    }
    let total = ranges.len();
    ranges
        .into_iter()
        .enumerate()
        .map(|(i, rows)| PdfPage {
            number: i + 1,
            total,
            with_header: i == 0,
            rows,
        })
        .collect()
}

/// Paginated document handed to the print dialog ("Save as PDF")
pub fn pdf_html(doc: &ReportDocument) -> String {
    let rows = if doc.summary.is_empty() {
        doc.tables
            .iter()
            .flat_map(|t| t.groups.iter())
            .map(|g| SummaryLine::new(g.label.clone(), format!("{} ({}%)", g.count, g.percent)))
            .collect()
    } else {
        doc.summary.clone()
    };

    let mut out = String::new();
    open_document(&mut out, &doc.title);
    for page in paginate(rows.len(), FIRST_PAGE_ROWS, PAGE_ROWS) {
        out.push_str("<section class=\"page\">");
        if page.with_header {
            title_block(&mut out, doc);
            out.push_str(&doc.chart_svg);
        }
        summary_table(&mut out, &rows[page.rows.clone()]);
        let _ = write!(out, "<div class=\"footer\">{}</div></section>", page.footer());
    }
    out.push_str("</body></html>");
    out
}

/// Пишет документ в новое окно и вызывает печать
pub fn open_print_window(html: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let target = window
        .open_with_url_and_target("", "_blank")
        .map_err(|e| format!("Failed to open window: {:?}", e))?
        .ok_or("Popup blocked")?;
    let root = target
        .document()
        .and_then(|d| d.document_element())
        .ok_or("No document in print window")?;
    root.set_inner_html(html);
    target
        .print()
        .map_err(|e| format!("Failed to print: {:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_equipment::Equipment;
    use serde_json::json;

    #[test]
    fn test_escape_csv_cell() {
        assert_eq!(escape_csv_cell("plain"), "plain");
        assert_eq!(escape_csv_cell("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_cell("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_build_csv_with_bom_and_placeholder() {
        let equipment: Equipment = serde_json::from_value(json!({
            "equipmentId": "E-1",
            "name": "Plough, heavy",
            "type": "Tillage",
            "status": "Active",
        }))
        .unwrap();
        let csv = build_csv(&[equipment]);
        assert!(csv.starts_with('\u{FEFF}'));
        let lines: Vec<&str> = csv.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID,"));
        assert!(lines[1].contains("\"Plough, heavy\""));
        assert!(lines[1].contains("N/A"));
    }

    #[test]
    fn test_csv_filename() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(csv_filename("crop", day), "crop_data_2024-03-09.csv");
    }

    #[test]
    fn test_print_html_escapes_text() {
        let doc = ReportDocument {
            title: "Crops & <Fields>".into(),
            summary: vec![SummaryLine::new("Total", 3)],
            tables: vec![GroupTable {
                label: "Season".into(),
                groups: vec![GroupCount {
                    label: "Spring".into(),
                    count: 2,
                    percent: 67,
                    image: None,
                }],
            }],
            ..Default::default()
        };
        let html = print_html(&doc);
        assert!(html.contains("Crops &amp; &lt;Fields&gt;"));
        assert!(html.contains("<td>67%</td>"));
        assert!(!html.contains("<th>Image</th>"));
    }

    #[test]
    fn test_paginate_flows_rows() {
        let pages = paginate(45, 8, 30);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].rows, 0..8);
        assert_eq!(pages[1].rows, 8..38);
        assert_eq!(pages[2].rows, 38..45);
        assert!(pages[0].with_header && !pages[1].with_header);
        assert_eq!(pages[2].footer(), "Page 3 of 3");
    }

    #[test]
    fn test_paginate_empty_still_has_title_page() {
        let pages = paginate(0, 8, 30);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].footer(), "Page 1 of 1");
    }

    #[test]
    fn test_pdf_html_has_footer_per_page() {
        let doc = ReportDocument {
            title: "Report".into(),
            summary: (0..10).map(|i| SummaryLine::new(format!("row {i}"), i)).collect(),
            ..Default::default()
        };
        let html = pdf_html(&doc);
        assert_eq!(html.matches("class=\"page\"").count(), 2);
        assert!(html.contains("Page 2 of 2"));
    }
}
