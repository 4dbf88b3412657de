//! Process shutdown on Ctrl-C / SIGTERM.

use tokio_util::sync::CancellationToken;
use tracing::info;

/// Cancels a token once the process is asked to stop.
///
/// Hand out child tokens from [`Shutdown::token`]; cancelling the parent
/// aborts every in-flight gateway call tied to it.
pub struct Shutdown {
    token: CancellationToken,
}

impl Shutdown {
    /// Install the signal listeners. Fails if a handler cannot be registered.
    pub fn try_new() -> std::io::Result<Self> {
        #[cfg(unix)]
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

        let token = CancellationToken::new();
        let trigger = token.clone();

        tokio::spawn(async move {
            #[cfg(unix)]
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {},
                _ = sigterm.recv() => {},
            }
            #[cfg(not(unix))]
            let _ = tokio::signal::ctrl_c().await;

            info!("Shutdown signal received");
            trigger.cancel();
        });

        Ok(Self { token })
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}
