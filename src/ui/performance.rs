//! Performance view rendering.
//!
//! Shows the host performance series with a metric selector, the hourly
//! request chart, and the request summary line.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::{App, ChartMetric};
use crate::sim::series::format_rate;
use crate::sim::{PerformancePoint, RequestPoint};

/// Render the Performance view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Percentage(55), // Host performance
        Constraint::Min(6),         // Requests
        Constraint::Length(1),      // Summary
    ])
    .split(area);

    render_host_chart(frame, app, chunks[0]);
    render_request_chart(frame, app, chunks[1]);
    render_summary(frame, app, chunks[2]);
}

/// Series points for one host metric, x = position in the series.
fn host_points(
    series: &[PerformancePoint],
    value: impl Fn(&PerformancePoint) -> f64,
) -> Vec<(f64, f64)> {
    series.iter().enumerate().map(|(i, p)| (i as f64, value(p))).collect()
}

/// Upper y bound rounded up to the next multiple of 50.
fn y_ceiling(points: &[&[(f64, f64)]]) -> f64 {
    let max = points
        .iter()
        .flat_map(|series| series.iter().map(|(_, y)| *y))
        .fold(0.0_f64, f64::max);
    ((max / 50.0).ceil() * 50.0).max(50.0)
}

/// First, middle and last label of a series for the x axis.
fn x_labels(labels: &[String]) -> Vec<String> {
    match labels.len() {
        0 => Vec::new(),
        1 => vec![labels[0].clone()],
        n => vec![labels[0].clone(), labels[n / 2].clone(), labels[n - 1].clone()],
    }
}

fn render_host_chart(frame: &mut Frame, app: &App, area: Rect) {
    let series = &app.performance.performance;
    let cpu = host_points(series, |p| p.cpu);
    let memory = host_points(series, |p| p.memory);
    let network = host_points(series, |p| p.network);

    let metrics = [
        (ChartMetric::Cpu, "cpu %", &cpu, app.theme.series[0]),
        (ChartMetric::Memory, "memory %", &memory, app.theme.series[1]),
        (ChartMetric::Network, "network Mbps", &network, app.theme.series[2]),
    ];

    let visible: Vec<_> = metrics.iter().filter(|(m, ..)| app.chart_metric.shows(*m)).collect();
    let visible_points: Vec<&[(f64, f64)]> =
        visible.iter().map(|(_, _, pts, _)| pts.as_slice()).collect();
    let ceiling = y_ceiling(&visible_points);

    let datasets: Vec<Dataset> = visible
        .iter()
        .map(|(_, name, pts, color)| {
            Dataset::default()
                .name(*name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(*color))
                .data(pts)
        })
        .collect();

    let labels: Vec<String> = series.iter().map(|p| p.label.clone()).collect();
    let x_max = series.len().saturating_sub(1).max(1) as f64;

    let title = format!(" Real-time Performance [m:{}] ", app.chart_metric.label());
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().add_modifier(Modifier::DIM))
                .bounds([0.0, x_max])
                .labels(x_labels(&labels)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().add_modifier(Modifier::DIM))
                .bounds([0.0, ceiling])
                .labels(vec![
                    "0".to_string(),
                    format!("{:.0}", ceiling / 2.0),
                    format!("{:.0}", ceiling),
                ]),
        );

    frame.render_widget(chart, area);
}

fn request_points(
    series: &[RequestPoint],
    value: impl Fn(&RequestPoint) -> f64,
) -> Vec<(f64, f64)> {
    series.iter().enumerate().map(|(i, p)| (i as f64, value(p))).collect()
}

fn render_request_chart(frame: &mut Frame, app: &App, area: Rect) {
    let series = &app.performance.requests;
    // Latency is scaled by 10 so both lines share one axis
    let requests = request_points(series, |p| p.requests);
    let latency = request_points(series, |p| p.latency_ms * 10.0);

    let ceiling = y_ceiling(&[requests.as_slice(), latency.as_slice()]);
    let datasets = vec![
        Dataset::default()
            .name("requests")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.series[0]))
            .data(&requests),
        Dataset::default()
            .name("latency ms ×10")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.series[2]))
            .data(&latency),
    ];

    let labels: Vec<String> = series.iter().map(|p| p.label()).collect();
    let x_max = series.len().saturating_sub(1).max(1) as f64;

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Application Performance ")
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().add_modifier(Modifier::DIM))
                .bounds([0.0, x_max])
                .labels(x_labels(&labels)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().add_modifier(Modifier::DIM))
                .bounds([0.0, ceiling])
                .labels(vec!["0".to_string(), format!("{:.0}", ceiling)]),
        );

    frame.render_widget(chart, area);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary = app.performance.request_summary();
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let errors_style = if summary.total_errors > 0 {
        Style::default().fg(app.theme.warning)
    } else {
        Style::default().fg(app.theme.success)
    };

    let line = Line::from(vec![
        Span::raw(" Request Rate "),
        Span::styled(format_rate(summary.request_rate), bold),
        Span::raw(" │ Errors "),
        Span::styled(summary.total_errors.to_string(), errors_style),
        Span::raw(" │ Avg Latency "),
        Span::styled(format!("{:.0}ms", summary.avg_latency_ms), bold),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceiling_rounds_up_to_fifty() {
        let a = [(0.0, 12.0), (1.0, 61.0)];
        assert_eq!(y_ceiling(&[&a]), 100.0);
        assert_eq!(y_ceiling(&[]), 50.0);
    }

    #[test]
    fn x_labels_pick_ends_and_middle() {
        let labels: Vec<String> = (0..5).map(|i| format!("{i}")).collect();
        assert_eq!(x_labels(&labels), vec!["0", "2", "4"]);
        assert!(x_labels(&[]).is_empty());
    }
}
