//! clicktrack - Terminal metronome
//!
//! Run with: cargo run -- [snapshot.json]

mod app;
mod ui;

use std::{env, fs, path::PathBuf, sync::Mutex};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use clicktrack::{CpalOutput, Metronome};

/// The TUI owns the terminal, so logs go to a file
fn init_logging() -> EyreResult<PathBuf> {
    let path = env::temp_dir().join("clicktrack.log");
    let file = fs::File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("clicktrack=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(path)
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let log_path = init_logging()?;
    info!(log = %log_path.display(), "clicktrack starting");

    let mut metronome = Metronome::new(CpalOutput::default());

    if let Some(path) = env::args_os().nth(1) {
        let path = PathBuf::from(path);
        let json = fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read snapshot {}", path.display()))?;
        metronome
            .import_snapshot(&json)
            .wrap_err_with(|| format!("failed to import snapshot {}", path.display()))?;
    }

    let mut terminal = ratatui::init();
    let result = App::new(metronome).run(&mut terminal);
    ratatui::restore();
    result
}
