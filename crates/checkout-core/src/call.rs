//! # Call Options
//!
//! Deadline and cancellation signal carried by every gateway call.

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Per-call deadline and cancellation signal
#[derive(Debug, Clone)]
pub struct CallOptions {
    /// Upper bound for the whole request/response cycle.
    /// `None` falls back to the client's configured default.
    pub timeout: Option<Duration>,

    /// Cancelling this token aborts the in-flight request
    pub cancellation: CancellationToken,
}

impl CallOptions {
    pub fn new() -> Self {
        Self {
            timeout: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Builder: set the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builder: tie the call to an outer cancellation signal
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

impl Default for CallOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_token_follows_parent() {
        let shutdown = CancellationToken::new();
        let call = CallOptions::new()
            .with_timeout(Duration::from_secs(5))
            .with_cancellation(shutdown.child_token());

        assert_eq!(call.timeout, Some(Duration::from_secs(5)));
        assert!(!call.is_cancelled());

        shutdown.cancel();
        assert!(call.is_cancelled());
    }
}
