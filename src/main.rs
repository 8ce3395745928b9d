use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

mod animation;
mod app;
mod commands;
mod config;
mod constants;
mod domain;
mod error;
mod event;
mod theme;
mod tui;
mod ui;
mod widgets;

#[cfg(test)]
mod test_utils;

use crate::{
    app::App,
    commands::KeyMapper,
    config::AppConfig,
    constants::{IDLE_POLL, TICK_RATE},
    domain::sample_models,
    tui::{Backend, TerminalSession},
};

// cardfold version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// cardfold - a terminal list of expandable cards
#[derive(Parser)]
#[command(version = VERSION, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Number of demo rows to show
    #[arg(long)]
    rows: Option<usize>,

    /// Duration of each toggle phase in milliseconds
    #[arg(long = "duration-ms")]
    duration_ms: Option<u64>,

    /// Read configuration from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of the default cache location
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display the version
    Version,
    /// Print the effective configuration as JSON
    Config {
        /// Also save it, to the `--config` file or the default location
        #[arg(long)]
        write: bool,
    },
}

/// Application entry point
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = effective_config(&cli)?;

    match cli.command {
        Some(Commands::Version) => {
            println!("cardfold v{VERSION}");
            println!("A terminal list of expandable cards");
            return Ok(());
        }
        Some(Commands::Config { write }) => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            if write {
                let path = match cli.config {
                    Some(path) => path,
                    None => AppConfig::config_path()?,
                };
                config.save_to(&path)?;
                eprintln!("saved to {}", path.display());
            }
            return Ok(());
        }
        None => {}
    }

    init_logging(cli.log_file)?;
    tracing::info!(rows = config.rows, animation_ms = config.animation_ms, "starting");

    let mut app = App::new(&config, sample_models(config.rows));
    let mut session = TerminalSession::enter()?;
    let result = run_app(session.terminal(), &mut app).await;
    drop(session);
    if let Err(err) = &result {
        tracing::error!(%err, "exited with error");
    }
    result
}

/// Loads the configuration file and applies command-line overrides.
fn effective_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::try_load_from(path)?,
        None => AppConfig::load(),
    };
    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(duration_ms) = cli.duration_ms {
        config.animation_ms = duration_ms;
    }
    config.validate()?;
    Ok(config)
}

/// Sends tracing output to a log file; the terminal belongs to the UI.
fn init_logging(log_file: Option<PathBuf>) -> Result<()> {
    let Some(path) = log_file.or_else(default_log_path) else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(config::APP_NAME).join("cardfold.log"))
}

/// Main application loop.
///
/// Each pass draws (which lays out the list and binds cells), waits for at
/// most one input event, then advances animations and applies the events
/// they settled. The wait is a frame while anything animates and
/// [`IDLE_POLL`] otherwise.
async fn run_app(terminal: &mut Terminal<Backend>, app: &mut App) -> Result<()> {
    while !app.exit {
        terminal.draw(|frame| ui::render(app, frame, Instant::now()))?;

        let wait = if app.is_animating() { TICK_RATE } else { IDLE_POLL };
        if crossterm::event::poll(wait)? {
            let event = crossterm::event::read()?;
            if let Some(action) = KeyMapper::map_event(&event) {
                app.update(action, Instant::now());
            }
        }

        app.tick(Instant::now());
        tokio::task::yield_now().await;
    }
    Ok(())
}
