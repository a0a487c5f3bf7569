//! Two-axis play time chart.
//!
//! Per-session hours are drawn as bars against the left axis.  Cumulative
//! hours are drawn as a dashed line rescaled into the same plot, with their
//! own axis labels in a narrow column on the right.  Both share a category
//! axis of session dates.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols::Marker,
    text::{Line, Span, Text},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use playtime_core::formatting::{format_breakdown, format_hours, format_number};
use playtime_core::models::{ChartSeries, PlaytimeBreakdown};

use crate::components::header::Header;
use crate::themes::Theme;

const CHART_TITLE: &str = " Playtime per session and cumulative playtime ";
const DATE_LABEL_FORMAT: &str = "%Y-%m-%d";
/// Width of the right-hand cumulative axis column, borders included.
const SECONDARY_AXIS_WIDTH: u16 = 12;
/// Samples drawn per category step along the cumulative line.
const DASH_SAMPLES_PER_STEP: usize = 24;
const DASH_ON: usize = 4;
const DASH_OFF: usize = 3;

/// Everything the chart screen needs to draw one frame.
#[derive(Debug, Clone)]
pub struct ChartViewData<'a> {
    pub series: &'a ChartSeries,
    pub total: PlaytimeBreakdown,
    pub log_dir: &'a str,
}

/// Render the chart screen (header, chart, footer) into `area`.
pub fn render_chart_view(frame: &mut Frame, area: Rect, data: &ChartViewData, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Header::new(data.series.len(), data.log_dir, theme);
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(SECONDARY_AXIS_WIDTH),
        ])
        .split(rows[1]);

    render_chart(frame, columns[0], data.series, theme);
    render_secondary_axis(frame, columns[1], data.series, theme);

    let footer = Line::from(vec![
        Span::styled("Total: ", theme.label),
        Span::styled(format_breakdown(&data.total), theme.value),
        Span::styled("  ·  Press 'q' or Ctrl+C to exit", theme.dim),
    ]);
    frame.render_widget(Paragraph::new(footer), rows[2]);
}

/// Render a placeholder when no session was found.
pub fn render_no_data(frame: &mut Frame, area: Rect, log_dir: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No play sessions found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(format!("Looked in {}", log_dir), theme.dim)),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" SC Playtime "),
        ),
        area,
    );
}

fn render_chart(frame: &mut Frame, area: Rect, series: &ChartSeries, theme: &Theme) {
    let n = series.len();
    let x_max = n as f64 + 1.0;
    let y_max = nice_ceiling(series.max_session_hours());
    let cumulative_max = nice_ceiling(series.total_hours());
    let scale = y_max / cumulative_max;

    let bars: Vec<(f64, f64)> = series
        .session_hours
        .iter()
        .enumerate()
        .map(|(i, h)| (i as f64 + 1.0, *h))
        .collect();
    let cumulative: Vec<(f64, f64)> = series
        .cumulative_hours
        .iter()
        .enumerate()
        .map(|(i, h)| (i as f64 + 1.0, h * scale))
        .collect();
    let dashes = dashed_line_points(&cumulative, DASH_SAMPLES_PER_STEP, DASH_ON, DASH_OFF);

    let datasets = vec![
        Dataset::default()
            .name("Hours per session")
            .marker(Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(theme.session_bar)
            .data(&bars),
        Dataset::default()
            .name("Cumulative hours")
            .marker(Marker::Braille)
            .graph_type(GraphType::Scatter)
            .style(theme.cumulative_line)
            .data(&dashes),
    ];

    let x_labels = category_labels(series, area.width.saturating_sub(10));
    let y_labels: Vec<String> = [0.0, y_max / 2.0, y_max]
        .iter()
        .map(|v| format_hours(*v))
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(CHART_TITLE)
                .title_style(theme.header),
        )
        .style(theme.text)
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme.label))
                .style(theme.axis)
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Hours per session", theme.session_bar))
                .style(theme.axis)
                .bounds([0.0, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

fn render_secondary_axis(frame: &mut Frame, area: Rect, series: &ChartSeries, theme: &Theme) {
    let inner_rows = area.height.saturating_sub(2);
    let cumulative_max = nice_ceiling(series.total_hours());
    let lines: Vec<Line> = secondary_axis_labels(cumulative_max, inner_rows)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, theme.cumulative_line)))
        .collect();

    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Total h ", theme.cumulative_line)),
        ),
        area,
    );
}

// ── Layout helpers ────────────────────────────────────────────────────────────

/// Round `value` up to 1, 2, 2.5 or 5 times a power of ten, so axis ticks
/// land on readable numbers.  Non-positive values give `1.0`.
pub fn nice_ceiling(value: f64) -> f64 {
    if value.is_nan() || value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10_f64.powf(value.log10().floor());
    [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|candidate| *candidate >= value)
        .unwrap_or(10.0 * magnitude)
}

/// X-axis labels for `series`: one slot per session plus an empty slot at
/// each end, so slot `i + 1` sits under bar `i`.  When the dates do not fit
/// in `width` columns, only every k-th one is printed.
pub fn category_labels(series: &ChartSeries, width: u16) -> Vec<String> {
    let dates: Vec<String> = series
        .dates
        .iter()
        .map(|d| d.format(DATE_LABEL_FORMAT).to_string())
        .collect();

    let slot = dates.iter().map(|d| d.width()).max().unwrap_or(0) + 1;
    let fit = (usize::from(width) / slot.max(1)).max(1);
    let stride = dates.len().div_ceil(fit).max(1);

    let mut labels = Vec::with_capacity(dates.len() + 2);
    labels.push(String::new());
    for (i, date) in dates.into_iter().enumerate() {
        labels.push(if i % stride == 0 { date } else { String::new() });
    }
    labels.push(String::new());
    labels
}

/// Sample the polyline through `points` and keep alternating runs of
/// `on` samples, dropping `off` samples between them.
///
/// A single point is returned unchanged.
pub fn dashed_line_points(
    points: &[(f64, f64)],
    samples_per_step: usize,
    on: usize,
    off: usize,
) -> Vec<(f64, f64)> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let samples_per_step = samples_per_step.max(1);
    let period = (on + off).max(1);

    let mut out = Vec::new();
    let mut k = 0usize;
    for pair in points.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        for s in 0..samples_per_step {
            let t = s as f64 / samples_per_step as f64;
            if k % period < on {
                out.push((x0 + (x1 - x0) * t, y0 + (y1 - y0) * t));
            }
            k += 1;
        }
    }
    if k % period < on {
        if let Some(last) = points.last() {
            out.push(*last);
        }
    }
    out
}

/// Lines of the right-hand axis column: `max` on the first row, half of it
/// midway, `0` level with the x-axis line, blank rows in between.
pub fn secondary_axis_labels(max: f64, rows: u16) -> Vec<String> {
    let rows = usize::from(rows);
    if rows == 0 {
        return Vec::new();
    }
    let mut lines = vec![String::new(); rows];
    let bottom = rows.saturating_sub(2);
    lines[bottom] = format_number(0.0, 1);
    if bottom >= 2 {
        lines[bottom / 2] = format_number(max / 2.0, 1);
    }
    if bottom >= 1 {
        lines[0] = format_number(max, 1);
    }
    lines
}

// ── Tests ──────────────────────────────────────────────────────────────────────
