use crate::config::Config;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn level(config: &Config) -> &'static str {
    if config.verbose {
        "debug"
    } else {
        "info"
    }
}

/// Sends tracing output to the configured log file.
///
/// The terminal belongs to the live table, so without `--log-file` nothing is
/// installed and events are dropped.
pub fn init(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("tmwatch={}", level(config))))
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_log_file_is_a_no_op() {
        let config = Config::default();
        assert!(init(&config).is_ok());
    }

    #[test]
    fn test_level_follows_verbose() {
        let mut config = Config::default();
        assert_eq!(level(&config), "info");
        config.verbose = true;
        assert_eq!(level(&config), "debug");
    }

    #[test]
    fn test_unwritable_log_file_is_reported() {
        let mut config = Config::default();
        config.log_file = Some(std::path::PathBuf::from("/nonexistent-dir/tmwatch.log"));
        let err = init(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to open log file"));
    }
}
