//! Terminal UI rendering using ratatui.
//!
//! This is the rendering collaborator for the simulator: every frame is
//! drawn from the latest [`SimulatorSnapshot`](crate::sim::SimulatorSnapshot)
//! held by the [`App`](crate::app::App).
//!
//! ## Submodules
//!
//! - [`overview`]: Gauge cards with value, status and sparkline
//! - [`performance`]: Host performance and request charts
//! - [`detail`]: Modal overlay with a gauge's full history
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (overview/performance::render)       │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - detail::render_overlay
//!    - common::render_help
//! ```

pub mod common;
pub mod detail;
pub mod overview;
pub mod performance;
pub mod theme;

pub use theme::Theme;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render sparkline levels (0-7) as block characters, keeping the last `width`.
pub fn render_sparkline(levels: &[u8], width: usize) -> String {
    if levels.is_empty() {
        return " ".repeat(width);
    }

    let skip = levels.len().saturating_sub(width);
    levels[skip..].iter().map(|&v| SPARKLINE_CHARS[v.min(7) as usize]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparkline_maps_levels() {
        assert_eq!(render_sparkline(&[0, 3, 7, 9], 8), "▁▄██");
    }

    #[test]
    fn sparkline_keeps_most_recent() {
        assert_eq!(render_sparkline(&[0, 1, 2, 3], 2), "▃▄");
    }

    #[test]
    fn empty_sparkline_is_padding() {
        assert_eq!(render_sparkline(&[], 3), "   ");
    }
}
