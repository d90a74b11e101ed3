//! Inline SVG charts for group reports.
//!
//! Output is a plain SVG string so the same markup feeds the panel view,
//! the print window and the PDF layout.

use std::f64::consts::PI;
use std::fmt::Write;

use contracts::shared::report::{ChartKind, GroupCount};

use crate::shared::export::escape_html;

const WIDTH: f64 = 560.0;
const HEIGHT: f64 = 320.0;
const MARGIN: f64 = 40.0;

pub const PALETTE: &[&str] = &[
    "#4caf50", "#2196f3", "#ff9800", "#9c27b0", "#f44336", "#00bcd4", "#8bc34a", "#ffc107",
    "#795548", "#607d8b",
];

pub fn color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// One pie sector, angles in radians clockwise from 12 o'clock
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub start: f64,
    pub end: f64,
}

pub fn pie_slices(groups: &[GroupCount]) -> Vec<Slice> {
    let total: usize = groups.iter().map(|g| g.count).sum();
    if total == 0 {
        return Vec::new();
    }
    let mut start = 0.0;
    groups
        .iter()
        .map(|g| {
            let end = start + g.count as f64 / total as f64 * 2.0 * PI;
            let slice = Slice { start, end };
            start = end;
            slice
        })
        .collect()
}

fn point(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.sin(), cy - r * angle.cos())
}

/// SVG path of a sector; a full circle is drawn as two half arcs
pub fn arc_path(cx: f64, cy: f64, r: f64, slice: &Slice) -> String {
    let sweep = slice.end - slice.start;
    if sweep >= 2.0 * PI - 1e-9 {
        return format!(
            "M {cx:.2} {top:.2} A {r:.2} {r:.2} 0 1 1 {cx:.2} {bottom:.2} A {r:.2} {r:.2} 0 1 1 {cx:.2} {top:.2} Z",
            top = cy - r,
            bottom = cy + r,
        );
    }
    let (x1, y1) = point(cx, cy, r, slice.start);
    let (x2, y2) = point(cx, cy, r, slice.end);
    let large = if sweep > PI { 1 } else { 0 };
    format!("M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {r:.2} {r:.2} 0 {large} 1 {x2:.2} {y2:.2} Z")
}

pub fn render_svg(kind: ChartKind, groups: &[GroupCount]) -> String {
    let mut svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" class="report-chart" viewBox="0 0 {w} {h}" width="{w}" height="{h}" font-family="sans-serif" font-size="11">"##,
        w = WIDTH,
        h = HEIGHT,
    );
    if groups.is_empty() {
        let _ = write!(
            svg,
            r##"<text x="{}" y="{}" text-anchor="middle" fill="#888">No data available</text>"##,
            WIDTH / 2.0,
            HEIGHT / 2.0
        );
    } else {
        match kind {
            ChartKind::Pie => pie(&mut svg, groups),
            ChartKind::Bar => bars(&mut svg, groups),
            ChartKind::Column => columns(&mut svg, groups),
            ChartKind::Line => line(&mut svg, groups),
        }
    }
    svg.push_str("</svg>");
    svg
}

fn max_count(groups: &[GroupCount]) -> f64 {
    groups.iter().map(|g| g.count).max().unwrap_or(1).max(1) as f64
}

fn pie(svg: &mut String, groups: &[GroupCount]) {
    let (cx, cy, r) = (HEIGHT / 2.0, HEIGHT / 2.0, HEIGHT / 2.0 - MARGIN / 2.0);
    for (i, slice) in pie_slices(groups).iter().enumerate() {
        let _ = write!(
            svg,
            r##"<path d="{}" fill="{}" stroke="#fff" stroke-width="1"/>"##,
            arc_path(cx, cy, r, slice),
            color(i)
        );
    }
    // legend
    for (i, g) in groups.iter().enumerate() {
        let y = MARGIN + i as f64 * 20.0;
        let _ = write!(
            svg,
            r##"<rect x="{x}" y="{y}" width="12" height="12" fill="{c}"/><text x="{tx}" y="{ty}">{label} ({count}, {pct}%)</text>"##,
            x = HEIGHT + 10.0,
            c = color(i),
            tx = HEIGHT + 28.0,
            ty = y + 10.0,
            label = escape_html(&g.label),
            count = g.count,
            pct = g.percent,
        );
    }
}

fn bars(svg: &mut String, groups: &[GroupCount]) {
    let label_width = 120.0;
    let band = (HEIGHT - 2.0 * MARGIN) / groups.len() as f64;
    let scale = (WIDTH - label_width - 2.0 * MARGIN) / max_count(groups);
    for (i, g) in groups.iter().enumerate() {
        let y = MARGIN + i as f64 * band;
        let w = g.count as f64 * scale;
        let _ = write!(
            svg,
            r##"<text x="{lx}" y="{ty:.2}" text-anchor="end">{label}</text><rect x="{x}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{c}"/><text x="{vx:.2}" y="{ty:.2}">{count}</text>"##,
            lx = MARGIN + label_width - 6.0,
            x = MARGIN + label_width,
            h = band * 0.7,
            ty = y + band * 0.45,
            c = color(i),
            vx = MARGIN + label_width + w + 4.0,
            label = escape_html(&g.label),
            count = g.count,
        );
    }
}

fn columns(svg: &mut String, groups: &[GroupCount]) {
    let band = (WIDTH - 2.0 * MARGIN) / groups.len() as f64;
    let base = HEIGHT - MARGIN;
    let scale = (HEIGHT - 2.0 * MARGIN - 14.0) / max_count(groups);
    let _ = write!(
        svg,
        r##"<line x1="{x1}" y1="{base}" x2="{x2}" y2="{base}" stroke="#999"/>"##,
        x1 = MARGIN,
        x2 = WIDTH - MARGIN
    );
    for (i, g) in groups.iter().enumerate() {
        let x = MARGIN + i as f64 * band;
        let h = g.count as f64 * scale;
        let _ = write!(
            svg,
            r##"<rect x="{rx:.2}" y="{ry:.2}" width="{w:.2}" height="{h:.2}" fill="{c}"/><text x="{cx:.2}" y="{vy:.2}" text-anchor="middle">{count}</text><text x="{cx:.2}" y="{ly:.2}" text-anchor="middle">{label}</text>"##,
            rx = x + band * 0.15,
            ry = base - h,
            w = band * 0.7,
            c = color(i),
            cx = x + band / 2.0,
            vy = base - h - 4.0,
            ly = base + 14.0,
            count = g.count,
            label = escape_html(&g.label),
        );
    }
}

fn line(svg: &mut String, groups: &[GroupCount]) {
    let step = if groups.len() > 1 {
        (WIDTH - 2.0 * MARGIN) / (groups.len() - 1) as f64
    } else {
        0.0
    };
    let base = HEIGHT - MARGIN;
    let scale = (HEIGHT - 2.0 * MARGIN - 14.0) / max_count(groups);
    let points: Vec<(f64, f64)> = groups
        .iter()
        .enumerate()
        .map(|(i, g)| (MARGIN + i as f64 * step, base - g.count as f64 * scale))
        .collect();
    let path: Vec<String> = points.iter().map(|(x, y)| format!("{x:.2},{y:.2}")).collect();
    let _ = write!(
        svg,
        r##"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"##,
        path.join(" "),
        color(0)
    );
    for ((x, y), g) in points.iter().zip(groups) {
        let _ = write!(
            svg,
            r##"<circle cx="{x:.2}" cy="{y:.2}" r="3" fill="{c}"/><text x="{x:.2}" y="{vy:.2}" text-anchor="middle">{count}</text><text x="{x:.2}" y="{ly:.2}" text-anchor="middle">{label}</text>"##,
            c = color(0),
            vy = y - 6.0,
            ly = base + 14.0,
            count = g.count,
            label = escape_html(&g.label),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(label: &str, count: usize) -> GroupCount {
        GroupCount {
            label: label.into(),
            count,
            percent: 0,
            image: None,
        }
    }

    #[test]
    fn test_pie_slices_cover_circle() {
        let slices = pie_slices(&[group("Spring", 2), group("Fall", 1), group("Winter", 1)]);
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].start, 0.0);
        assert!((slices[0].end - PI).abs() < 1e-9);
        assert!((slices[2].end - 2.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_pie_slices_empty_total() {
        assert!(pie_slices(&[group("x", 0)]).is_empty());
    }

    #[test]
    fn test_arc_path_large_flag() {
        let small = arc_path(0.0, 0.0, 10.0, &Slice { start: 0.0, end: 1.0 });
        let large = arc_path(0.0, 0.0, 10.0, &Slice { start: 0.0, end: 4.0 });
        assert!(small.contains(" 0 0 1 "));
        assert!(large.contains(" 0 1 1 "));
    }

    #[test]
    fn test_render_escapes_labels() {
        let svg = render_svg(ChartKind::Bar, &[group("<b>", 3)]);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("&lt;b&gt;"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_render_empty_shows_no_data() {
        let svg = render_svg(ChartKind::Pie, &[]);
        assert!(svg.contains("No data available"));
    }
}
