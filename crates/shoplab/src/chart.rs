//! Monthly revenue line chart rendered as standalone SVG.

use shoplab_db::MonthlyRevenue;
use std::fmt::{self, Write as _};
use std::path::Path;

pub const CHART_TITLE: &str = "Monthly revenue (status=PAID)";
const X_LABEL: &str = "Year-Month";
const Y_LABEL: &str = "Revenue";

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 540.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 110.0;
const Y_TICKS: usize = 5;

/// Render `rows` (one point per month, in order) as an SVG document.
pub fn render_monthly_revenue(rows: &[MonthlyRevenue]) -> Result<String, fmt::Error> {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let bottom = MARGIN_TOP + plot_h;
    let y_max = nice_ceiling(rows.iter().map(|r| r.revenue).fold(0.0, f64::max));

    let x_at = |i: usize| -> f64 {
        if rows.len() <= 1 {
            MARGIN_LEFT + plot_w / 2.0
        } else {
            MARGIN_LEFT + plot_w * i as f64 / (rows.len() - 1) as f64
        }
    };
    let y_at = |v: f64| -> f64 { bottom - plot_h * (v / y_max) };

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = WIDTH,
        h = HEIGHT
    )?;
    writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
    writeln!(
        svg,
        r#"<text x="{:.1}" y="30" font-size="18" text-anchor="middle">{}</text>"#,
        WIDTH / 2.0,
        escape(CHART_TITLE)
    )?;

    // Gridlines and y tick labels
    for tick in 0..=Y_TICKS {
        let value = y_max * tick as f64 / Y_TICKS as f64;
        let y = y_at(value);
        writeln!(
            svg,
            r##"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#e0e0e0"/>"##,
            MARGIN_LEFT,
            MARGIN_LEFT + plot_w
        )?;
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end">{:.0}</text>"#,
            MARGIN_LEFT - 8.0,
            y + 4.0,
            value
        )?;
    }

    // Axes
    writeln!(
        svg,
        r#"<line x1="{l:.1}" y1="{t:.1}" x2="{l:.1}" y2="{b:.1}" stroke="black"/>"#,
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = bottom
    )?;
    writeln!(
        svg,
        r#"<line x1="{:.1}" y1="{b:.1}" x2="{:.1}" y2="{b:.1}" stroke="black"/>"#,
        MARGIN_LEFT,
        MARGIN_LEFT + plot_w,
        b = bottom
    )?;
    writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" font-size="13" text-anchor="middle">{}</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 12.0,
        X_LABEL
    )?;
    writeln!(
        svg,
        r#"<text x="20" y="{y:.1}" font-size="13" text-anchor="middle" transform="rotate(-90 20 {y:.1})">{}</text>"#,
        Y_LABEL,
        y = MARGIN_TOP + plot_h / 2.0
    )?;

    if rows.is_empty() {
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="14" text-anchor="middle">No data</text>"#,
            MARGIN_LEFT + plot_w / 2.0,
            MARGIN_TOP + plot_h / 2.0
        )?;
    } else {
        let points: Vec<String> = rows
            .iter()
            .enumerate()
            .map(|(i, r)| format!("{:.1},{:.1}", x_at(i), y_at(r.revenue)))
            .collect();
        writeln!(
            svg,
            r##"<polyline fill="none" stroke="#1f77b4" stroke-width="2" points="{}"/>"##,
            points.join(" ")
        )?;

        for (i, row) in rows.iter().enumerate() {
            let (x, y) = (x_at(i), y_at(row.revenue));
            writeln!(
                svg,
                r##"<circle class="marker" cx="{x:.1}" cy="{y:.1}" r="4" fill="#1f77b4"><title>{} {:.2}</title></circle>"##,
                escape(&row.ym),
                row.revenue
            )?;
            // x labels read bottom-left to top-right, anchored at their tick
            let label_y = bottom + 16.0;
            writeln!(
                svg,
                r#"<text x="{x:.1}" y="{label_y:.1}" font-size="11" text-anchor="end" transform="rotate(-45 {x:.1} {label_y:.1})">{}</text>"#,
                escape(&row.ym)
            )?;
        }
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Render and write the chart to `path`.
pub fn write_monthly_revenue(rows: &[MonthlyRevenue], path: &Path) -> std::io::Result<()> {
    let svg = render_monthly_revenue(rows).map_err(std::io::Error::other)?;
    std::fs::write(path, svg)
}

/// Smallest 1/2/5 x 10^k at or above `value`; 1 for empty or zero data.
fn nice_ceiling(value: f64) -> f64 {
    if value <= 0.0 || !value.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powi(value.log10().floor() as i32);
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|step| step * magnitude)
        .find(|candidate| *candidate >= value)
        .unwrap_or(10.0 * magnitude)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
