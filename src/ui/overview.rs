//! Overview rendering.
//!
//! One card per gauge: value with unit, status indicator, a ratio bar, and a
//! sparkline of the rolling history.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::render_sparkline;
use crate::app::App;
use crate::sim::GaugeSnapshot;

/// Cards per row when the terminal is wide enough.
const CARDS_PER_ROW: usize = 2;
/// Minimum card height: borders plus value, bar and sparkline rows.
const CARD_HEIGHT: u16 = 6;

/// Render the Overview view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref snapshot) = app.snapshot else {
        return;
    };
    if snapshot.gauges.is_empty() {
        let msg = Paragraph::new(" Waiting for simulator...")
            .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(msg, area);
        return;
    }

    let rows: Vec<&[GaugeSnapshot]> = snapshot.gauges.chunks(CARDS_PER_ROW).collect();
    let row_areas =
        Layout::vertical(rows.iter().map(|_| Constraint::Min(CARD_HEIGHT))).split(area);

    for (row_index, (gauges, row_area)) in rows.iter().zip(row_areas.iter()).enumerate() {
        let col_areas =
            Layout::horizontal((0..CARDS_PER_ROW).map(|_| Constraint::Fill(1))).split(*row_area);

        for (col_index, gauge) in gauges.iter().enumerate() {
            let index = row_index * CARDS_PER_ROW + col_index;
            let selected = index == app.selected_gauge_index;
            render_card(frame, app, gauge, selected, col_areas[col_index]);
        }
    }
}

fn render_card(frame: &mut Frame, app: &App, gauge: &GaugeSnapshot, selected: bool, area: Rect) {
    let status_style = app.theme.status_style(gauge.status);
    let border_style = if selected {
        Style::default().fg(app.theme.highlight)
    } else {
        Style::default().fg(app.theme.border)
    };

    let title = if selected {
        Span::styled(format!(" ▶ {} ", gauge.name), app.theme.selected)
    } else {
        Span::raw(format!(" {} ", gauge.name))
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Value
        Constraint::Length(1), // Ratio bar
        Constraint::Min(1),    // Sparkline
    ])
    .split(inner);

    let value_line = Line::from(vec![
        Span::styled(
            gauge.display_value(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("● {}", gauge.status.symbol()), status_style),
        Span::styled(
            format!("  trend {:?}", gauge.trend_bias).to_lowercase(),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(value_line), chunks[0]);

    let bar = Gauge::default()
        .gauge_style(Style::default().fg(app.theme.status_color(gauge.status)))
        .ratio(gauge.ratio())
        .label("");
    frame.render_widget(bar, chunks[1]);

    let width = chunks[2].width as usize;
    let sparkline = render_sparkline(&gauge.sparkline(), width);
    frame.render_widget(Paragraph::new(sparkline).style(status_style), chunks[2]);
}
