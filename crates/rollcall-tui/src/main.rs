//! Rollcall - a keyboard-driven attendance roster for the terminal.
//!
//! Fetches names and groups from a roster endpoint, lays them out in
//! sorted, labeled columns and submits the checked names with an optional
//! group reassignment.

mod app;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rollcall_core::{prefs, ApiClient, Config, RosterLayout, SelectionStore};

use app::{open_prefs_store, App, AppState};
use ui::input::handle_input;
use ui::render::{render, EMPTY_ROSTER_MESSAGE};

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 50;

/// Log file written while the TUI owns the terminal
const LOG_FILE: &str = "rollcall.log";

/// Column count used by `--dump` when none is given
const DEFAULT_DUMP_COLUMNS: usize = 1;

const USAGE: &str = "\
Usage: rollcall [--dump [COLUMNS]] [--help]

  (no args)         Start the interactive roster
  --dump [COLUMNS]  Fetch the roster and print the layout as text
  --help            Show this message

Environment:
  ROLLCALL_ENDPOINT  Roster endpoint URL (overrides config.json)
  RUST_LOG           Log filter, e.g. RUST_LOG=debug";

/// Log to a file so output does not corrupt the alternate screen.
/// The returned guard must live until shutdown to flush the writer.
fn init_file_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = Config::cache_dir().ok()?;
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Logging disabled: cannot create {}: {}", log_dir.display(), e);
        return None;
    }

    let appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Some(guard)
}

/// Log to stderr for non-interactive commands.
fn init_stderr_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some("--dump") => {
            init_stderr_tracing();
            let columns = match args.get(1) {
                Some(raw) => parse_columns(raw)?,
                None => DEFAULT_DUMP_COLUMNS,
            };
            return dump_layout(columns).await;
        }
        Some(other) => {
            eprintln!("Unknown argument: {}\n\n{}", other, USAGE);
            std::process::exit(2);
        }
        None => {}
    }

    // Initialize logging
    let _log_guard = init_file_tracing();
    info!("Rollcall starting");

    let config = load_config();

    let (width, _) = terminal::size().context("Failed to read terminal size")?;
    let mut app = App::new(config, open_prefs_store(), width);
    app.start_load();

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Rollcall shutting down");
    Ok(())
}

/// Load the config file, keeping environment overrides when it is unusable.
fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::from_env()
        }
    }
}

fn parse_columns(raw: &str) -> Result<usize> {
    let columns: usize = raw
        .parse()
        .with_context(|| format!("Invalid column count: {}", raw))?;
    if columns == 0 {
        anyhow::bail!("Column count must be at least 1");
    }
    Ok(columns)
}

/// Fetch the roster once and print its layout as plain text.
async fn dump_layout(columns: usize) -> Result<()> {
    let config = load_config();
    let endpoint = config
        .endpoint()
        .map_err(|e| anyhow::anyhow!("Configuration error: {}.", e))?;

    let api = ApiClient::new(endpoint, config.request_timeout())?;
    let rows = api
        .fetch_roster()
        .await
        .map_err(|e| anyhow::anyhow!("Error loading students: {}", e))?;

    let store = open_prefs_store();
    let options = prefs::load_options(store.as_ref());
    let layout = RosterLayout::compute(&rows, &options, columns, &SelectionStore::new());

    if layout.is_empty() {
        eprintln!("{}", EMPTY_ROSTER_MESSAGE);
    } else {
        print!("{}", layout.to_text());
    }
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_input(app, key) {
                        return Ok(());
                    }
                }
                Event::Resize(width, _) => app.note_resize(width, Instant::now()),
                _ => {}
            }
        }

        app.apply_pending_resize(Instant::now());

        // Check for completed background tasks
        app.check_background_tasks();

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_columns() {
        assert_eq!(parse_columns("3").unwrap(), 3);
        assert!(parse_columns("0").is_err());
        assert!(parse_columns("wide").is_err());
    }
}
