//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::sim::StatusLevel;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for warning-level status.
    pub warning: Color,
    /// Color for danger-level status.
    pub danger: Color,
    /// Color for success status.
    pub success: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Line colors for the cpu, memory and network chart series.
    pub series: [Color; 3],
    /// Style for headings.
    pub header: Style,
    /// Style for the selected card.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            danger: Color::Red,
            success: Color::Green,
            border: Color::Gray,
            series: [Color::Magenta, Color::Green, Color::Cyan],
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            danger: Color::Red,
            success: Color::Green,
            border: Color::DarkGray,
            series: [Color::Magenta, Color::Green, Color::Blue],
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a status level
    pub fn status_style(&self, status: StatusLevel) -> Style {
        match status {
            StatusLevel::Success => Style::default().fg(self.success),
            StatusLevel::Warning => Style::default().fg(self.warning),
            StatusLevel::Danger => Style::default().fg(self.danger).add_modifier(Modifier::BOLD),
        }
    }

    /// Color for a status level, without modifiers.
    pub fn status_color(&self, status: StatusLevel) -> Color {
        match status {
            StatusLevel::Success => self.success,
            StatusLevel::Warning => self.warning,
            StatusLevel::Danger => self.danger,
        }
    }
}
