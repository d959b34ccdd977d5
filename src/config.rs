use crate::monitor::ExportFormat;
use crate::Cli;
use anyhow::{bail, Result};
use std::path::PathBuf;
use tokio::time::Duration;

pub const DEFAULT_TOOL: &str = "tmutil";

#[derive(Debug, Clone)]
pub struct Config {
    pub interval_seconds: u64,
    pub tool: String,
    pub once: bool,
    pub export_format: ExportFormat,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}

impl Config {
    pub fn new(cli: Cli) -> Result<Self> {
        if cli.interval == 0 {
            bail!("Refresh interval must be at least 1 second");
        }
        if cli.tool.trim().is_empty() {
            bail!("Tool path must not be empty");
        }

        let mut config = Self::default();

        config.interval_seconds = cli.interval;
        config.tool = cli.tool;
        config.once = cli.once;
        config.export_format = ExportFormat::from_str(&cli.format)?;
        config.log_file = cli.log_file;
        config.verbose = cli.verbose;

        Ok(config)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_seconds: 1,
            tool: DEFAULT_TOOL.to_string(),
            once: false,
            export_format: ExportFormat::Text,
            log_file: None,
            verbose: false,
        }
    }
}
