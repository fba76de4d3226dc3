//! Handheld TUI - calculator and lockout-protected login in the terminal
//!
//! Log output goes to a file in the data directory so it never draws over
//! the interface. Set `RUST_LOG` to change the filter.

use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use handheld_core::Config;
use handheld_tui::app::{EventHandler, REDRAW_RATE};
use handheld_tui::App;
use ratatui::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log file name inside the data directory
const LOG_FILE_NAME: &str = "handheld-tui.log";

/// Application entry point with panic handling for terminal restoration
#[tokio::main]
async fn main() -> Result<()> {
    // Set up panic hook to restore terminal on crash
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let config = Config::load();
    let data_dir = config.resolve_data_dir()?;
    init_logging(&data_dir)?;

    let result = run_app(&config).await;

    if let Err(e) = &result {
        tracing::error!("Application error: {:#}", e);
    }

    result
}

/// Route tracing output to `<data_dir>/handheld-tui.log`
fn init_logging(data_dir: &Path) -> Result<()> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("creating data directory {:?}", data_dir))?;
    let path = data_dir.join(LOG_FILE_NAME);
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(EnvFilter::from_default_env().add_directive("handheld=info".parse()?))
        .init();

    Ok(())
}

/// Main application runner
async fn run_app(config: &Config) -> Result<()> {
    let mut events = EventHandler::new(REDRAW_RATE);
    let mut app = App::from_config(config, events.sender())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    events.start();
    let result = app.run(&mut terminal, &mut events).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
