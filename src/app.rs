//! Application state and navigation logic.

use std::time::Instant;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

use crate::sim::series::{format_clock, unix_now};
use crate::sim::{GaugeSnapshot, PerformanceData, SimulatorSnapshot};
use crate::source::DataSource;
use crate::ui::Theme;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// One card per gauge with value, status and sparkline.
    Overview,
    /// Host performance and request charts.
    Performance,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Overview => View::Performance,
            View::Performance => View::Overview,
        }
    }

    /// Cycle to the previous view. With two views this equals `next`.
    pub fn prev(self) -> Self {
        self.next()
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Performance => "Performance",
        }
    }
}

/// Which series the performance chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartMetric {
    Cpu,
    Memory,
    Network,
    #[default]
    All,
}

impl ChartMetric {
    pub fn next(self) -> Self {
        match self {
            ChartMetric::Cpu => ChartMetric::Memory,
            ChartMetric::Memory => ChartMetric::Network,
            ChartMetric::Network => ChartMetric::All,
            ChartMetric::All => ChartMetric::Cpu,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartMetric::Cpu => "CPU",
            ChartMetric::Memory => "MEMORY",
            ChartMetric::Network => "NETWORK",
            ChartMetric::All => "ALL",
        }
    }

    /// Whether the given series is visible under this selection.
    pub fn shows(&self, metric: ChartMetric) -> bool {
        *self == ChartMetric::All || *self == metric
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub snapshot: Option<SimulatorSnapshot>,
    pub last_updated: Option<Instant>,
    pub load_error: Option<String>,

    // Static chart data
    pub performance: PerformanceData,
    rng: StdRng,

    // Navigation state
    pub selected_gauge_index: usize,
    pub chart_metric: ChartMetric,

    /// Wall clock shown in the header, refreshed on its own timer.
    pub clock: String,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading snapshots from `source`.
    pub fn new(source: Box<dyn DataSource>) -> Self {
        Self::with_rng(source, StdRng::from_entropy(), Theme::auto_detect())
    }

    /// Create an App with a fixed seed for the chart data and a given theme.
    pub fn seeded(source: Box<dyn DataSource>, seed: u64, theme: Theme) -> Self {
        Self::with_rng(source, StdRng::seed_from_u64(seed), theme)
    }

    fn with_rng(source: Box<dyn DataSource>, mut rng: StdRng, theme: Theme) -> Self {
        let performance = PerformanceData::generate(&mut rng);
        Self {
            running: true,
            current_view: View::Overview,
            show_help: false,
            show_detail_overlay: false,
            source,
            snapshot: None,
            last_updated: None,
            load_error: None,
            performance,
            rng,
            selected_gauge_index: 0,
            chart_metric: ChartMetric::default(),
            clock: format_clock(unix_now(), true),
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source for a new snapshot.
    ///
    /// Returns true if new data was received. When the source has failed the
    /// previous snapshot is kept and marked stale.
    pub fn reload_data(&mut self) -> bool {
        if let Some(snapshot) = self.source.poll() {
            self.snapshot = Some(snapshot);
            self.last_updated = Some(Instant::now());
            self.load_error = None;

            if let Some(ref snapshot) = self.snapshot {
                if self.selected_gauge_index >= snapshot.gauges.len() {
                    self.selected_gauge_index = snapshot.gauges.len().saturating_sub(1);
                }
            }
            return true;
        }

        if let Some(err) = self.source.error() {
            if self.load_error.is_none() {
                warn!(source = self.source.description(), error = err, "Data source failed");
            }
            self.load_error = Some(err.to_string());
        }
        false
    }

    /// Whether the snapshot on screen will no longer update.
    pub fn is_stale(&self) -> bool {
        self.load_error.is_some() && self.snapshot.is_some()
    }

    /// Refresh the header clock.
    pub fn tick_clock(&mut self) {
        self.clock = format_clock(unix_now(), true);
    }

    /// Regenerate the performance and request series.
    pub fn regenerate_series(&mut self) {
        self.performance = PerformanceData::generate(&mut self.rng);
    }

    /// The gauge currently selected in the Overview view.
    pub fn selected_gauge(&self) -> Option<&GaugeSnapshot> {
        self.snapshot.as_ref()?.gauges.get(self.selected_gauge_index)
    }

    fn gauge_count(&self) -> usize {
        self.snapshot.as_ref().map_or(0, |s| s.gauges.len())
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one gauge.
    pub fn select_next(&mut self) {
        let max = self.gauge_count().saturating_sub(1);
        self.selected_gauge_index = (self.selected_gauge_index + 1).min(max);
    }

    /// Move selection up by one gauge.
    pub fn select_prev(&mut self) {
        self.selected_gauge_index = self.selected_gauge_index.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected_gauge_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_gauge_index = self.gauge_count().saturating_sub(1);
    }

    /// Cycle the metric shown by the performance chart.
    pub fn cycle_chart_metric(&mut self) {
        self.chart_metric = self.chart_metric.next();
    }

    /// Open the detail overlay for the selected gauge.
    pub fn enter_detail(&mut self) {
        if self.current_view == View::Overview && self.selected_gauge().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlay first, then return to Overview.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
            return;
        }
        self.current_view = View::Overview;
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current snapshot to a file.
    pub fn export_state(&self, path: &std::path::Path) -> Result<()> {
        let Some(ref snapshot) = self.snapshot else {
            anyhow::bail!("No data to export");
        };
        crate::export::write_snapshot(snapshot, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GaugeConfig, MetricsSimulator};
    use crate::source::ChannelSource;
    use tokio::sync::watch;

    fn app_with_channel() -> (watch::Sender<SimulatorSnapshot>, App) {
        let (tx, source) = ChannelSource::create("test");
        let app = App::seeded(Box::new(source), 5, Theme::dark());
        (tx, app)
    }

    fn snapshot(seed: u64) -> SimulatorSnapshot {
        let mut sim = MetricsSimulator::seeded(seed);
        sim.initialize(GaugeConfig::defaults()).unwrap();
        sim.current_snapshot().unwrap()
    }

    #[test]
    fn view_cycles() {
        assert_eq!(View::Overview.next(), View::Performance);
        assert_eq!(View::Performance.next(), View::Overview);
        assert_eq!(View::Overview.prev(), View::Performance);
    }

    #[test]
    fn chart_metric_cycles_through_all() {
        let mut m = ChartMetric::default();
        let mut seen = vec![m];
        for _ in 0..3 {
            m = m.next();
            seen.push(m);
        }
        assert_eq!(m.next(), ChartMetric::All);
        assert_eq!(seen.len(), 4);
        assert!(ChartMetric::All.shows(ChartMetric::Cpu));
        assert!(!ChartMetric::Memory.shows(ChartMetric::Cpu));
    }

    #[test]
    fn reload_picks_up_new_snapshot() {
        let (tx, mut app) = app_with_channel();
        // Initial empty snapshot
        assert!(app.reload_data());
        assert!(!app.reload_data());

        tx.send(snapshot(1)).unwrap();
        assert!(app.reload_data());
        assert_eq!(app.snapshot.as_ref().unwrap().gauges.len(), 4);
        assert!(app.last_updated.is_some());
    }

    #[test]
    fn stopped_source_keeps_stale_snapshot() {
        let (tx, mut app) = app_with_channel();
        tx.send(snapshot(2)).unwrap();
        assert!(app.reload_data());

        drop(tx);
        assert!(!app.reload_data());
        assert!(app.is_stale());
        assert_eq!(app.snapshot.as_ref().unwrap().gauges.len(), 4);
    }

    #[test]
    fn selection_is_clamped() {
        let (tx, mut app) = app_with_channel();
        tx.send(snapshot(3)).unwrap();
        app.reload_data();

        for _ in 0..10 {
            app.select_next();
        }
        assert_eq!(app.selected_gauge_index, 3);
        app.select_first();
        app.select_prev();
        assert_eq!(app.selected_gauge_index, 0);
        app.select_last();
        assert_eq!(app.selected_gauge().unwrap().name, "network");
    }

    #[test]
    fn detail_overlay_and_back() {
        let (tx, mut app) = app_with_channel();
        app.enter_detail();
        assert!(!app.show_detail_overlay, "no gauges yet");

        tx.send(snapshot(4)).unwrap();
        app.reload_data();
        app.enter_detail();
        assert!(app.show_detail_overlay);

        app.go_back();
        assert!(!app.show_detail_overlay);

        app.set_view(View::Performance);
        app.go_back();
        assert_eq!(app.current_view, View::Overview);
    }

    #[test]
    fn regenerate_replaces_series() {
        let (_tx, mut app) = app_with_channel();
        let before = app.performance.clone();
        app.regenerate_series();
        assert_ne!(before.requests, app.performance.requests);
        assert_eq!(app.performance.performance.len(), 24);
    }

    #[test]
    fn export_without_data_fails() {
        let (_tx, app) = app_with_channel();
        let dir = tempfile::tempdir().unwrap();
        assert!(app.export_state(&dir.path().join("out.json")).is_err());
    }
}
