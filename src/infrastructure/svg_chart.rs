// Pareto chart rendering with plotters' SVG backend
use crate::domain::pareto::{ParetoSeries, REFERENCE_PERCENT};
use crate::infrastructure::config::Orientation;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;

const BAR_COLOR: RGBColor = RGBColor(100, 149, 237);
const LINE_COLOR: RGBColor = RGBColor(220, 38, 38);
const REFERENCE_COLOR: RGBColor = RGBColor(156, 163, 175);
const AXIS_COLOR: RGBColor = RGBColor(55, 65, 81);
const MUTED_COLOR: RGBColor = RGBColor(107, 114, 128);
const PERCENT_AXIS_MAX: f64 = 110.0;
const FONT: &str = "sans-serif";

#[derive(Debug, Error)]
#[error("failed to draw chart: {0}")]
pub struct ChartError(String);

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError(e.to_string())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    pub orientation: Orientation,
    pub label_wrap: usize,
    pub expanded: bool,
}

impl ChartOptions {
    fn width(&self) -> u32 {
        if self.expanded { 1200 } else { 800 }
    }

    fn font_scale(&self) -> f64 {
        if self.expanded { 1.3 } else { 1.0 }
    }
}

/// Dual-axis Pareto chart: count bars, cumulative-% line and the dashed 80% reference
pub fn render_pareto_svg(
    title: &str,
    series: &ParetoSeries,
    options: &ChartOptions,
) -> Result<String, ChartError> {
    match options.orientation {
        Orientation::Vertical => render_vertical(title, series, options),
        Orientation::Horizontal => render_horizontal(title, series, options),
    }
}

/// Placeholder panel for a question nobody answered
pub fn render_no_data_svg(title: &str, options: &ChartOptions) -> Result<String, ChartError> {
    let scale = options.font_scale();
    let width = options.width();
    let height = (140.0 * scale) as u32;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;
        let body = root.titled(title, title_style(title, width, scale))?;
        let (w, h) = body.dim_in_pixel();
        body.draw(&Text::new(
            "No data to display",
            (w as i32 / 2, h as i32 / 2),
            text_style(14.0 * scale, &MUTED_COLOR, HPos::Center, VPos::Center),
        ))?;
        root.present()?;
    }
    Ok(svg)
}

fn render_vertical(
    title: &str,
    series: &ParetoSeries,
    options: &ChartOptions,
) -> Result<String, ChartError> {
    let scale = options.font_scale();
    let width = options.width();
    let line_height = 13.0 * scale;
    let wrapped: Vec<Vec<String>> = series
        .labels
        .iter()
        .map(|l| wrap_label(l, options.label_wrap))
        .collect();
    let max_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
    let label_area = (20.0 + max_lines as f64 * line_height) as u32;
    let height = (340.0 * scale) as u32 + label_area;

    let n = series.len() as f64;
    let count_top = count_axis_top(series.max_count());

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, title_style(title, width, scale))
            .margin(10)
            .x_label_area_size(label_area)
            .y_label_area_size((50.0 * scale) as u32)
            .right_y_label_area_size((55.0 * scale) as u32)
            .build_cartesian_2d(0f64..n, 0u64..count_top)?
            .set_secondary_coord(0f64..n, 0f64..PERCENT_AXIS_MAX);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|_: &f64| String::new())
            .y_desc("Frequency")
            .label_style((FONT, 11.0 * scale))
            .axis_desc_style((FONT, 12.0 * scale))
            .draw()?;
        chart
            .configure_secondary_axes()
            .y_desc("Cumulative %")
            .y_label_formatter(&|v: &f64| format!("{:.0}%", v))
            .label_style((FONT, 11.0 * scale))
            .axis_desc_style((FONT, 12.0 * scale))
            .draw()?;

        chart.draw_series(series.counts.iter().enumerate().map(|(i, count)| {
            let x = i as f64;
            Rectangle::new([(x + 0.15, 0), (x + 0.85, *count)], BAR_COLOR.filled())
        }))?;

        let points: Vec<(f64, f64)> = series
            .cumulative_percent
            .iter()
            .enumerate()
            .map(|(i, pct)| (i as f64 + 0.5, *pct))
            .collect();
        let radius = (3.0 * scale) as i32;
        chart.draw_secondary_series(LineSeries::new(
            points.iter().copied(),
            LINE_COLOR.stroke_width(2),
        ))?;
        chart.draw_secondary_series(
            points
                .iter()
                .map(|p| Circle::new(*p, radius, LINE_COLOR.filled())),
        )?;
        chart.draw_secondary_series(DashedLineSeries::new(
            [(0.0, REFERENCE_PERCENT), (n, REFERENCE_PERCENT)],
            6,
            4,
            REFERENCE_COLOR.stroke_width(1),
        ))?;

        // Wrapped category labels under each bar
        let style = text_style(10.0 * scale, &AXIS_COLOR, HPos::Center, VPos::Top);
        for (i, lines) in wrapped.iter().enumerate() {
            let (x, y) = chart.backend_coord(&(i as f64 + 0.5, 0));
            for (k, line) in lines.iter().enumerate() {
                let y = y + 6 + (k as f64 * line_height) as i32;
                root.draw(&Text::new(line.as_str(), (x, y), style.clone()))?;
            }
        }

        root.present()?;
    }
    Ok(svg)
}

fn render_horizontal(
    title: &str,
    series: &ParetoSeries,
    options: &ChartOptions,
) -> Result<String, ChartError> {
    let scale = options.font_scale();
    let width = options.width();
    let line_height = 13.0 * scale;
    let wrapped: Vec<Vec<String>> = series
        .labels
        .iter()
        .map(|l| wrap_label(l, options.label_wrap))
        .collect();
    let max_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
    let slot = (max_lines as f64 * line_height + 14.0).max(28.0 * scale);
    let height = (130.0 * scale + slot * series.len() as f64) as u32;

    let n = series.len() as f64;
    let count_top = count_axis_top(series.max_count());
    // Largest category on top
    let row = |i: usize| n - 1.0 - i as f64;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, title_style(title, width, scale))
            .margin(10)
            .x_label_area_size((40.0 * scale) as u32)
            .top_x_label_area_size((40.0 * scale) as u32)
            .y_label_area_size((20.0 + options.label_wrap as f64 * 6.0 * scale) as u32)
            .build_cartesian_2d(0u64..count_top, 0f64..n)?
            .set_secondary_coord(0f64..PERCENT_AXIS_MAX, 0f64..n);

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_label_formatter(&|_: &f64| String::new())
            .x_desc("Frequency")
            .label_style((FONT, 11.0 * scale))
            .axis_desc_style((FONT, 12.0 * scale))
            .draw()?;
        chart
            .configure_secondary_axes()
            .x_desc("Cumulative %")
            .x_label_formatter(&|v: &f64| format!("{:.0}%", v))
            .label_style((FONT, 11.0 * scale))
            .axis_desc_style((FONT, 12.0 * scale))
            .draw()?;

        chart.draw_series(series.counts.iter().enumerate().map(|(i, count)| {
            let y = row(i);
            Rectangle::new([(0, y + 0.15), (*count, y + 0.85)], BAR_COLOR.filled())
        }))?;

        let points: Vec<(f64, f64)> = series
            .cumulative_percent
            .iter()
            .enumerate()
            .map(|(i, pct)| (*pct, row(i) + 0.5))
            .collect();
        let radius = (3.0 * scale) as i32;
        chart.draw_secondary_series(LineSeries::new(
            points.iter().copied(),
            LINE_COLOR.stroke_width(2),
        ))?;
        chart.draw_secondary_series(
            points
                .iter()
                .map(|p| Circle::new(*p, radius, LINE_COLOR.filled())),
        )?;
        chart.draw_secondary_series(DashedLineSeries::new(
            [(REFERENCE_PERCENT, 0.0), (REFERENCE_PERCENT, n)],
            6,
            4,
            REFERENCE_COLOR.stroke_width(1),
        ))?;

        // Wrapped category labels left of each bar, vertically centred
        let style = text_style(10.0 * scale, &AXIS_COLOR, HPos::Right, VPos::Center);
        for (i, lines) in wrapped.iter().enumerate() {
            let (x, y) = chart.backend_coord(&(0, row(i) + 0.5));
            let first = y as f64 - (lines.len() as f64 - 1.0) * line_height / 2.0;
            for (k, line) in lines.iter().enumerate() {
                let y = (first + k as f64 * line_height) as i32;
                root.draw(&Text::new(line.as_str(), (x - 8, y), style.clone()))?;
            }
        }

        root.present()?;
    }
    Ok(svg)
}

fn title_style(title: &str, width: u32, scale: f64) -> TextStyle<'static> {
    TextStyle::from((FONT, title_font_size(title, width as f64, scale)).into_font())
        .color(&AXIS_COLOR)
}

fn text_style(size: f64, color: &'static RGBColor, h: HPos, v: VPos) -> TextStyle<'static> {
    TextStyle::from((FONT, size).into_font())
        .color(color)
        .pos(Pos::new(h, v))
}

/// Leave a little headroom above the tallest bar
fn count_axis_top(max: u64) -> u64 {
    max + max / 10 + 1
}

/// Shrink long titles so they fit on one line
pub fn title_font_size(title: &str, width: f64, scale: f64) -> f64 {
    let base = 16.0 * scale;
    let chars = title.chars().count().max(1) as f64;
    // average glyph is roughly 0.6em wide
    let fitted = (width - 40.0) / (chars * 0.6);
    fitted.clamp(10.0, base)
}

/// Word-wrap a category label; words longer than `width` are split
pub fn wrap_label(label: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in label.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }
        let needed = current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
        if !current.is_empty() && needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tally::Tally;

    fn options(orientation: Orientation) -> ChartOptions {
        ChartOptions {
            orientation,
            label_wrap: 12,
            expanded: false,
        }
    }

    fn series() -> ParetoSeries {
        let tally = Tally::from_answers(["Agendamento, Preço", "Preço", "Atendimento <rápido>, Preço"]);
        ParetoSeries::from_tally(&tally).unwrap()
    }

    #[test]
    fn test_vertical_chart_elements() {
        let svg = render_pareto_svg("1) Serviços", &series(), &options(Orientation::Vertical)).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("Frequency"));
        assert!(svg.contains("Cumulative %"));
        assert!(svg.contains("Preço"));
        assert!(svg.contains("Agendamento"));
    }

    #[test]
    fn test_horizontal_chart_elements() {
        let svg = render_pareto_svg("1) Serviços", &series(), &options(Orientation::Horizontal)).unwrap();
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("Frequency"));
        assert!(svg.contains("Agendamento"));
    }

    #[test]
    fn test_labels_and_titles_are_escaped() {
        let svg = render_pareto_svg("2) A & B", &series(), &options(Orientation::Vertical)).unwrap();
        assert!(svg.contains("2) A &amp; B"));
        assert!(svg.contains("&lt;rápido&gt;"));
        assert!(!svg.contains("<rápido>"));
    }

    #[test]
    fn test_no_data_placeholder() {
        let svg = render_no_data_svg("3) Vazio", &options(Orientation::Vertical)).unwrap();
        assert!(svg.contains("No data to display"));
        assert!(svg.contains("3) Vazio"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_expanded_chart_is_larger() {
        let mut opts = options(Orientation::Vertical);
        opts.expanded = true;
        let svg = render_pareto_svg("1) Serviços", &series(), &opts).unwrap();
        assert!(svg.contains("width=\"1200\""));
    }

    #[test]
    fn test_single_category_chart() {
        let tally = Tally::from_answers(["Sim"]);
        let series = ParetoSeries::from_tally(&tally).unwrap();
        let svg = render_pareto_svg("4) Única", &series, &options(Orientation::Vertical)).unwrap();
        assert_eq!(svg.matches("<circle").count(), 1);
    }

    #[test]
    fn test_wrap_label() {
        assert_eq!(wrap_label("Sim", 10), vec!["Sim"]);
        assert_eq!(
            wrap_label("Tempo de espera na recepção", 12),
            vec!["Tempo de", "espera na", "recepção"]
        );
        assert_eq!(wrap_label("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_label("", 4), vec![""]);
    }

    #[test]
    fn test_title_font_size_shrinks() {
        assert_eq!(title_font_size("Curto", 800.0, 1.0), 16.0);
        let long = "x".repeat(200);
        let size = title_font_size(&long, 800.0, 1.0);
        assert!(size < 16.0 && size >= 10.0);
    }

    #[test]
    fn test_count_axis_top() {
        assert_eq!(count_axis_top(3), 4);
        assert_eq!(count_axis_top(20), 23);
    }
}
