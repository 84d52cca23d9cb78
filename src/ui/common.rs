//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar with overall health and the wall clock.
///
/// Displays: status indicator, gauge counts by status, tick count, clock.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref snapshot) = app.snapshot else {
        let line = Line::from(vec![
            Span::styled(" PULSEBOARD ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Loading... │ "),
            Span::raw(app.clock.clone()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let (success, warning, danger) = snapshot.status_counts();
    let status_style = app.theme.status_style(snapshot.overall_status());

    let dim = Style::default().add_modifier(Modifier::DIM);
    let count = |n: usize, style: Style| {
        if n > 0 {
            Span::styled(n.to_string(), style)
        } else {
            Span::styled("0", dim)
        }
    };

    let line = Line::from(vec![
        Span::styled(" ● ", status_style),
        Span::styled("PULSEBOARD ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        count(success, Style::default().fg(app.theme.success)),
        Span::raw(" ok "),
        count(warning, Style::default().fg(app.theme.warning)),
        Span::raw(" warn "),
        count(
            danger,
            Style::default().fg(app.theme.danger).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" crit │ "),
        Span::raw(format!("tick {}", snapshot.tick)),
        Span::raw(" │ "),
        Span::styled(app.clock.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" UTC"),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![Line::from(" 1:Overview "), Line::from(" 2:Performance ")];

    let selected = match app.current_view {
        View::Overview => 0,
        View::Performance => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: current view, time since last snapshot, available controls.
/// Also displays temporary status messages and stale-data warnings.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Overview => "↑↓:select Enter:detail Tab:switch e:export ?:help q:quit",
        View::Performance => "m:metric r:regenerate Tab:switch ?:help q:quit",
    };

    let status = match (app.last_updated, app.load_error.as_deref()) {
        (Some(updated), Some(err)) => format!(
            " {} | STALE ({}) {:.1}s ago | {}",
            app.current_view.label(),
            err,
            updated.elapsed().as_secs_f64(),
            controls,
        ),
        (Some(updated), None) => format!(
            " {} | {} | Updated {:.1}s ago | {}",
            app.current_view.label(),
            app.source_description(),
            updated.elapsed().as_secs_f64(),
            controls,
        ),
        (None, Some(err)) => format!(" Error: {} | q:quit", err),
        (None, None) => " Loading... | q:quit".to_string(),
    };

    let style = if app.is_stale() {
        Style::default().fg(app.theme.warning)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    frame.render_widget(Paragraph::new(status).style(style), area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(" Navigation", bold)]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1/2         Jump to view"),
        Line::from("  ↑/↓ j/k     Select gauge"),
        Line::from("  Home/End    First/last gauge"),
        Line::from("  Enter       Gauge detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(" Performance", bold)]),
        Line::from("  m           Cycle chart metric"),
        Line::from("  r           Regenerate series"),
        Line::from(""),
        Line::from(vec![Span::styled(" General", bold)]),
        Line::from("  e         Export snapshot to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 21u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
