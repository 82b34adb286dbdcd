pub mod commands;

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::io::config_io::load_config;
use crate::tui;
use self::commands::Cli;

pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&cli.log_level, cli.log_file.clone())?;

    let config = load_config(cli.config.as_deref())?;
    tracing::info!(offline = cli.offline, demo = cli.demo, "starting tidemark");

    tui::run(config, cli.offline, cli.demo)
}

/// Logs go to a file so the alternate screen stays clean.
fn init_logging(level: &str, path: Option<PathBuf>) -> Result<(), std::io::Error> {
    let path = match path.or_else(default_log_path) {
        Some(p) => p,
        None => return Ok(()),
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(&path)?;

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn default_log_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "tidemark")
        .map(|dirs| dirs.cache_dir().join("tidemark.log"))
}
