use std::io;

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};

/// Shutdown request from the outside: Ctrl+C, or SIGTERM/SIGHUP on unix.
///
/// Handlers are registered in [`ShutdownSignal::install`], so a signal that
/// arrives while a tick is running is remembered and seen by the next
/// [`ShutdownSignal::recv`].
pub struct ShutdownSignal {
    #[cfg(unix)]
    interrupt: Signal,
    #[cfg(unix)]
    terminate: Signal,
    #[cfg(unix)]
    hangup: Signal,
}

impl ShutdownSignal {
    pub fn install() -> io::Result<Self> {
        #[cfg(unix)]
        {
            Ok(Self {
                interrupt: signal(SignalKind::interrupt())?,
                terminate: signal(SignalKind::terminate())?,
                hangup: signal(SignalKind::hangup())?,
            })
        }
        #[cfg(not(unix))]
        {
            Ok(Self {})
        }
    }

    pub async fn recv(&mut self) {
        #[cfg(unix)]
        {
            tokio::select! {
                _ = self.interrupt.recv() => tracing::info!("interrupt received"),
                _ = self.terminate.recv() => tracing::info!("terminate received"),
                _ = self.hangup.recv() => tracing::info!("hangup received"),
            }
        }
        #[cfg(not(unix))]
        {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %err, "ctrl-c listener failed");
                std::future::pending::<()>().await;
            }
            tracing::info!("interrupt received");
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_recv_waits_for_a_signal() {
        let mut shutdown = ShutdownSignal::install().expect("install handlers");
        let waited = tokio::time::timeout(Duration::from_millis(50), shutdown.recv()).await;
        assert!(waited.is_err());
    }
}
