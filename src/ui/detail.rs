//! Detail overlay rendering.
//!
//! Displays a modal overlay with the selected gauge's full rolling history.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::sim::GaugeSnapshot;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 14;

/// Chart points for a gauge: x = sample sequence, y = value.
pub fn history_points(gauge: &GaugeSnapshot) -> Vec<(f64, f64)> {
    gauge.history.iter().map(|s| (s.sequence as f64, s.value)).collect()
}

/// `percent`% of a terminal dimension, computed without `u16` overflow.
fn percent_of(size: u16, percent: u32) -> u16 {
    (u32::from(size) * percent / 100) as u16
}

/// Render the gauge detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }
    let (Some(snapshot), Some(gauge)) = (app.snapshot.as_ref(), app.selected_gauge()) else {
        return;
    };

    let overlay_width = percent_of(area.width, 90).clamp(MIN_OVERLAY_WIDTH, 100);
    let overlay_height = percent_of(area.height, 80).clamp(MIN_OVERLAY_HEIGHT, 30);
    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(5), // Header with gauge info
        Constraint::Min(6),    // History chart
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    // ===== HEADER SECTION =====
    let status_style = app.theme.status_style(gauge.status);
    let thresholds = snapshot.thresholds;
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let header_lines = vec![
        Line::from(vec![Span::styled(format!(" {} ", gauge.name), bold)]),
        Line::from(vec![
            Span::raw(" Value: "),
            Span::styled(gauge.display_value(), bold),
            Span::raw("    Status: "),
            Span::styled(
                format!("{} {}", gauge.status.symbol(), gauge.status.label()),
                status_style.add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("    Trend: {:?}", gauge.trend_bias)),
        ]),
        Line::from(vec![Span::raw(format!(
            " Range: {:.0}-{:.0}    Warning ≥ {:.0}    Danger ≥ {:.0}    Samples: {}",
            gauge.min_value,
            gauge.max_value,
            thresholds.warning,
            thresholds.danger,
            gauge.history.len()
        ))]),
    ];

    let header_block = Block::default()
        .title(" Gauge Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));
    frame.render_widget(Paragraph::new(header_lines).block(header_block), chunks[0]);

    // ===== HISTORY CHART =====
    let points = history_points(gauge);
    let (x_min, x_max) = match (points.first(), points.last()) {
        (Some(first), Some(last)) if last.0 > first.0 => (first.0, last.0),
        (Some(first), _) => (first.0, first.0 + 1.0),
        _ => (0.0, 1.0),
    };

    let dataset = Dataset::default()
        .name(gauge.name.clone())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.status_color(gauge.status)))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .title(" History ")
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .x_axis(
            Axis::default()
                .title("sequence")
                .style(Style::default().add_modifier(Modifier::DIM))
                .bounds([x_min, x_max])
                .labels(vec![format!("{:.0}", x_min), format!("{:.0}", x_max)]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().add_modifier(Modifier::DIM))
                .bounds([gauge.min_value, gauge.max_value])
                .labels(vec![
                    format!("{:.0}", gauge.min_value),
                    format!("{:.0}", gauge.max_value),
                ]),
        );
    frame.render_widget(chart, chunks[1]);

    // ===== FOOTER =====
    let footer = Paragraph::new(" ↑↓:previous/next gauge  Esc:close")
        .style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(footer, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GaugeConfig, MetricsSimulator, Sample, StatusLevel, Thresholds, TrendBias};
    use crate::source::ChannelSource;
    use crate::ui::Theme;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn history_points_use_sequence_as_x() {
        let gauge = GaugeSnapshot {
            name: "cpu".to_string(),
            unit: "%".to_string(),
            value: 42.0,
            status: StatusLevel::Success,
            trend_bias: TrendBias::Stable,
            min_value: 0.0,
            max_value: 100.0,
            history: vec![
                Sample {
                    sequence: 7,
                    value: 40.0,
                },
                Sample {
                    sequence: 8,
                    value: 42.0,
                },
            ],
        };
        assert_eq!(history_points(&gauge), vec![(7.0, 40.0), (8.0, 42.0)]);
    }

    #[test]
    fn percent_of_wide_terminal() {
        assert_eq!(percent_of(1000, 90), 900);
        assert_eq!(percent_of(u16::MAX, 90), 58981);
        assert_eq!(percent_of(40, 80), 32);
    }

    #[test]
    fn overlay_renders_snapshot_thresholds_on_wide_terminal() {
        let (tx, source) = ChannelSource::create("test");
        let mut sim = MetricsSimulator::seeded(3).with_thresholds(Thresholds {
            warning: 60.0,
            danger: 90.0,
        });
        sim.initialize(GaugeConfig::defaults()).unwrap();
        tx.send(sim.current_snapshot().unwrap()).unwrap();

        let mut app = App::seeded(Box::new(source), 3, Theme::dark());
        app.reload_data();
        app.enter_detail();
        assert!(app.show_detail_overlay);

        let backend = TestBackend::new(800, 40);
        let mut terminal = Terminal::new(backend).expect("failed to create terminal");
        terminal
            .draw(|f| render_overlay(f, &app, f.area()))
            .expect("failed to draw");

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Warning ≥ 60"));
        assert!(text.contains("Danger ≥ 90"));
    }
}
