use std::io;
use thiserror::Error;
use tokio::process::Command;

/// The only subcommand ever passed to the status tool.
pub const STATUS_SUBCOMMAND: &str = "status";

pub const NOT_FOUND_MESSAGE: &str = "tmutil command not found. Are you on macOS?";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    #[error("Command failed: {stderr}")]
    CommandFailed { stderr: String },

    #[error("Failed to run {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Runs `<program> status` and captures what it prints.
#[derive(Debug, Clone)]
pub struct StatusFetcher {
    program: String,
}

impl StatusFetcher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub async fn fetch_status(&self) -> Result<String, FetchError> {
        let output = Command::new(&self.program)
            .arg(STATUS_SUBCOMMAND)
            .output()
            .await
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => FetchError::NotFound,
                _ => FetchError::Io {
                    program: self.program.clone(),
                    source,
                },
            })?;

        if !output.status.success() {
            return Err(FetchError::CommandFailed {
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_is_fixed() {
        assert_eq!(FetchError::NotFound.to_string(), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_command_failed_carries_stderr() {
        let err = FetchError::CommandFailed {
            stderr: "No destinations configured.".to_string(),
        };
        assert_eq!(err.to_string(), "Command failed: No destinations configured.");
    }

    #[tokio::test]
    async fn test_missing_program_is_not_found() {
        let fetcher = StatusFetcher::new("tmwatch-definitely-missing-binary");
        let result = fetcher.fetch_status().await;
        assert!(matches!(result, Err(FetchError::NotFound)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_run_returns_stdout() {
        // `echo status` prints the subcommand back.
        let fetcher = StatusFetcher::new("echo");
        let raw = fetcher.fetch_status().await.expect("echo should succeed");
        assert_eq!(raw.trim(), "status");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_command_failed() {
        // `false` ignores its arguments and exits 1.
        let fetcher = StatusFetcher::new("false");
        match fetcher.fetch_status().await {
            Err(FetchError::CommandFailed { stderr }) => assert!(stderr.is_empty()),
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_failed_captures_diagnostics() {
        // The script ignores its `status` argument and fails with a padded message.
        let dir = std::env::temp_dir().join(format!("tmwatch-fetch-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create script dir");
        let script = dir.join("failing-tool");
        std::fs::write(&script, "#!/bin/sh\necho \"  no destination  \" >&2\nexit 3\n").expect("write script");
        let mut perms = std::fs::metadata(&script).expect("script metadata").permissions();
        std::os::unix::fs::PermissionsExt::set_mode(&mut perms, 0o755);
        std::fs::set_permissions(&script, perms).expect("chmod script");

        let fetcher = StatusFetcher::new(script.to_string_lossy());
        let result = fetcher.fetch_status().await;
        let _ = std::fs::remove_dir_all(&dir);

        match result {
            Err(FetchError::CommandFailed { stderr }) => assert_eq!(stderr, "no destination"),
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }
}
