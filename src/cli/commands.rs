use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "tm", about = concat!("[~] tidemark v", env!("CARGO_PKG_VERSION"), " - a timeline canvas in your terminal"), version)]
pub struct Cli {
    /// Path to the config file (default: $TIDEMARK_CONFIG, then the platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Don't call the title service; new events keep their fallback titles
    #[arg(long)]
    pub offline: bool,

    /// Seed the canvas with five demo events
    #[arg(long)]
    pub demo: bool,

    /// Minimum log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log file path (default: tidemark.log in the platform cache dir)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
