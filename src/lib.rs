use clap::Parser;

pub mod config;
pub mod interrupt;
pub mod logging;
pub mod monitor;
pub mod ui;

#[derive(Parser)]
#[command(name = "tmwatch")]
#[command(about = "A live terminal view of Time Machine backup status")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Seconds between two polls of the status tool
    #[arg(short = 'i', long = "interval", default_value = "1")]
    pub interval: u64,

    /// Program invoked with the `status` subcommand
    #[arg(long = "tool", default_value = "tmutil")]
    pub tool: String,

    /// Print a single snapshot and exit
    #[arg(long = "once")]
    pub once: bool,

    /// Snapshot format used with --once (text or json)
    #[arg(long = "format", default_value = "text")]
    pub format: String,

    #[arg(long = "log-file")]
    pub log_file: Option<std::path::PathBuf>,

    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
