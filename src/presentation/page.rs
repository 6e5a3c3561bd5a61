//! Server-rendered HTML for the dashboard page.
//!
//! Charts are inlined as SVG; expand and download controls are plain links so
//! the page needs no client-side script.

use crate::domain::dashboard::{Dashboard, QuestionPanel};
use crate::infrastructure::config::ChartSettings;
use crate::infrastructure::svg_chart::{
    render_no_data_svg, render_pareto_svg, ChartError, ChartOptions,
};
use crate::presentation::view_state::ViewState;
use std::fmt::Write;

const STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; margin: 0; background: #f9fafb; color: #111827; }
.container { max-width: 1240px; margin: 0 auto; padding: 24px; }
.caption { color: #6b7280; font-size: 0.9em; }
.banner { padding: 10px 14px; border-radius: 6px; margin: 12px 0; }
.banner.ok { background: #ecfdf5; color: #065f46; }
.banner.error { background: #fef2f2; color: #991b1b; }
.question { background: white; border-radius: 8px; padding: 16px; margin: 16px 0; box-shadow: 0 1px 2px rgba(0,0,0,0.06); }
.question h3 { margin: 0 0 8px 0; }
.question svg { max-width: 100%; height: auto; }
.actions a { margin-right: 12px; font-size: 0.9em; color: #2563eb; text-decoration: none; }
.summary { color: #6b7280; font-size: 0.85em; margin-top: 6px; }
"#;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
        <h1>📊 {title}</h1>
        <p class="caption">Source: Google Sheets survey responses (refreshed on every load)</p>
        {content}
    </div>
</body>
</html>"#,
        title = html_escape(title),
        content = content,
    )
}

pub fn chart_options(settings: &ChartSettings, expanded: bool) -> ChartOptions {
    ChartOptions {
        orientation: settings.orientation,
        label_wrap: settings.label_wrap,
        expanded,
    }
}

/// Chart SVG for one question panel
pub fn render_panel_svg(
    panel: &QuestionPanel,
    options: &ChartOptions,
) -> Result<String, ChartError> {
    match &panel.series {
        Some(series) => render_pareto_svg(&panel.title, series, options),
        None => render_no_data_svg(&panel.title, options),
    }
}

pub fn render_dashboard_page(
    dashboard: &Dashboard,
    view: &ViewState,
    settings: &ChartSettings,
) -> String {
    let mut content = String::new();
    let _ = write!(
        content,
        r#"<div class="banner ok">✅ Spreadsheet loaded successfully.</div>
<p class="caption">Rows loaded: {} &middot; {}</p>"#,
        dashboard.row_count,
        dashboard.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for panel in &dashboard.panels {
        let expanded = view.is_expanded(panel.number);
        let svg = match render_panel_svg(panel, &chart_options(settings, expanded)) {
            Ok(svg) => svg,
            Err(e) => {
                tracing::error!("Chart for question {} failed: {}", panel.number, e);
                r#"<p class="caption">Chart unavailable.</p>"#.to_string()
            }
        };
        let toggle_label = if expanded { "Collapse" } else { "Expand" };

        let summary = match &panel.series {
            Some(series) => format!(
                "{} answers across {} options; the top {} reach {:.0}% of answers.",
                series.total(),
                series.len(),
                series.vital_few(),
                series.cumulative_percent[series.vital_few() - 1]
            ),
            None => "No answers yet.".to_string(),
        };

        let _ = write!(
            content,
            r#"<section class="question" id="q{n}">
<h3>{title}</h3>
<div class="actions"><a href="/{toggle}#q{n}">{toggle_label}</a><a href="/charts/{n}.svg{download}">Download SVG</a></div>
{svg}
<p class="summary">{summary}</p>
</section>"#,
            n = panel.number,
            title = html_escape(&panel.title),
            toggle = view.toggled(panel.number).to_query(),
            toggle_label = toggle_label,
            download = if expanded {
                format!("?expanded={}", panel.number)
            } else {
                String::new()
            },
            svg = svg,
            summary = summary,
        );
    }

    base_html(&dashboard.title, &content)
}

/// Top-level failure page: no charts, only the reason
pub fn render_error_page(title: &str, message: &str) -> String {
    let content = format!(
        r#"<div class="banner error">❌ Could not load the spreadsheet data.</div>
<p class="caption">{}</p>"#,
        html_escape(message)
    );
    base_html(title, &content)
}
