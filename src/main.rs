use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pulseboard::app::{App, View};
use pulseboard::sim::MetricsSimulator;
use pulseboard::source::{DataSource, SimulatorTicker};
use pulseboard::{events, export, ui, DashboardConfig};

#[derive(Parser, Debug)]
#[command(name = "pulseboard")]
#[command(about = "Terminal infrastructure dashboard driven by a synthetic metrics simulator")]
struct Args {
    /// Config file (TOML, JSON or YAML) with gauge definitions
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between simulator steps
    #[arg(short, long)]
    interval: Option<f64>,

    /// Seconds between header clock refreshes
    #[arg(long)]
    clock_interval: Option<f64>,

    /// Samples kept per gauge (overrides every gauge's history_length)
    #[arg(long)]
    history: Option<usize>,

    /// Fixed RNG seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Value at which a gauge turns to warning
    #[arg(long)]
    warn: Option<f64>,

    /// Value at which a gauge turns to danger
    #[arg(long)]
    danger: Option<f64>,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Export a snapshot to JSON and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Steps to run before exporting (used with --export)
    #[arg(long, default_value = "0")]
    steps: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }

    let config = load_config(&args)?;
    let simulator = build_simulator(&config)?;

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_headless(simulator, args.steps, export_path);
    }

    run_dashboard(simulator, &config)
}

/// Install a file-backed tracing subscriber.
fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

/// Merge file/env configuration with command line overrides.
fn load_config(args: &Args) -> Result<DashboardConfig> {
    let mut config = DashboardConfig::load(args.config.as_deref())?;

    if let Some(secs) = args.interval {
        config.tick_interval_ms = secs_to_millis(secs)?;
    }
    if let Some(secs) = args.clock_interval {
        config.clock_interval_ms = secs_to_millis(secs)?;
    }
    if let Some(history) = args.history {
        config.set_history_length(history);
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(warn) = args.warn {
        config.thresholds.warning = warn;
    }
    if let Some(danger) = args.danger {
        config.thresholds.danger = danger;
    }

    Ok(config)
}

fn secs_to_millis(secs: f64) -> Result<u64> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(anyhow!("Interval must be a positive number of seconds, got {}", secs));
    }
    Ok((secs * 1000.0).round().max(1.0) as u64)
}

/// Create and initialize a simulator from configuration.
fn build_simulator(config: &DashboardConfig) -> Result<MetricsSimulator> {
    let simulator = match config.seed {
        Some(seed) => MetricsSimulator::seeded(seed),
        None => MetricsSimulator::new(),
    };
    let mut simulator = simulator.with_thresholds(config.thresholds);
    simulator.initialize(config.gauges.clone())?;
    Ok(simulator)
}

/// Run the simulator without a UI and write one snapshot.
fn export_headless(mut simulator: MetricsSimulator, steps: u64, path: &Path) -> Result<()> {
    for _ in 0..steps {
        simulator.step()?;
    }
    let snapshot = simulator.current_snapshot()?;
    export::write_snapshot(&snapshot, path)?;

    println!("Exported simulator snapshot to: {}", path.display());
    Ok(())
}

/// Run the TUI with the simulator stepping in the background.
fn run_dashboard(simulator: MetricsSimulator, config: &DashboardConfig) -> Result<()> {
    // Build a tokio runtime for the ticker task
    let rt = tokio::runtime::Runtime::new()?;

    let (mut ticker, source) = {
        let _guard = rt.enter();
        SimulatorTicker::spawn(simulator, config.tick_interval())?
    };

    let result = run_tui(Box::new(source), config);
    if let Err(ref e) = result {
        error!("Dashboard exited with error: {}", e);
    }

    // Signal shutdown
    ticker.stop();
    info!("Dashboard closed");

    result
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn DataSource>, config: &DashboardConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and load the pre-warmed snapshot
    let mut app = App::new(source);
    app.reload_data();

    let result = run_app(&mut terminal, &mut app, config.clock_interval());

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    clock_interval: Duration,
) -> Result<()> {
    let mut last_clock = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 16;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    5u16.min(area.height),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Overview => ui::overview::render(frame, app, chunks[2]),
                View::Performance => ui::performance::render(frame, app, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_detail_overlay {
                ui::detail::render_overlay(frame, app, area);
            }
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                _ => {}
            }
        }

        // Snapshots are pushed by the ticker; polling is non-blocking
        app.reload_data();

        // The clock runs on its own timer, independent of simulator steps
        if last_clock.elapsed() >= clock_interval {
            app.tick_clock();
            last_clock = Instant::now();
        }
    }

    Ok(())
}
