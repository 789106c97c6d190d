//! Cooperative cancellation of in-flight invocations
//!
//! A [`CancelToken`] is handed to [`Runner::run_with_cancel`] by the caller
//! and fired from wherever the caller likes - another task, a timer, a signal
//! handler. Firing it causes prompt forcible termination of the child
//! process; the invocation then returns [`Error::Signaled`] rather than an
//! exit status.
//!
//! [`Runner::run_with_cancel`]: crate::Runner::run_with_cancel
//! [`Error::Signaled`]: crate::Error::Signaled
//!
//! # Example
//!
//! Time-bound an invocation by cancelling from a timer:
//!
//! ```no_run
//! use std::time::Duration;
//! use command_runner::{CancelToken, Command, LocalRunner, Runner, Streams};
//!
//! # futures::executor::block_on(async {
//! let runner = LocalRunner::new();
//! let token = CancelToken::new();
//!
//! let deadline = async {
//!     smol::Timer::after(Duration::from_secs(5)).await;
//!     token.cancel();
//! };
//! let run = runner.run_with_cancel(
//!     &token,
//!     Streams::null(),
//!     Command::builder("sleep").arg("60").build(),
//! );
//!
//! let (result, _) = futures::future::join(run, deadline).await;
//! assert!(result.unwrap_err().is_killed());
//! # });
//! ```

use async_channel::{bounded, Receiver, Sender};

/// A caller-triggered cancellation signal shared by all of its clones.
///
/// The token starts unfired; [`cancel`](CancelToken::cancel) fires it for
/// every clone at once and is idempotent. A token that is never cancelled
/// never fires - dropping clones does not count as cancellation.
///
/// Internally this is an `async-channel` channel that nothing ever sends on:
/// closing the channel wakes every receiver, which is exactly the broadcast
/// this needs without a runtime dependency.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Sender<()>,
    rx: Receiver<()>,
}

impl CancelToken {
    /// Create a new, unfired token
    pub fn new() -> Self {
        let (tx, rx) = bounded(1);
        Self { tx, rx }
    }

    /// Fire the token, waking every clone. Idempotent.
    pub fn cancel(&self) {
        self.tx.close();
    }

    /// Returns true once the token has fired
    pub fn is_cancelled(&self) -> bool {
        self.tx.is_closed()
    }

    /// Completes when the token fires; pends forever on an unfired token
    pub async fn cancelled(&self) {
        let _ = self.rx.recv().await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_is_not_cancelled() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let token = CancelToken::new();
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancel_reaches_every_clone() {
        let token = CancelToken::new();
        let observer = token.clone();
        token.cancel();

        assert!(observer.is_cancelled());
        futures::executor::block_on(observer.cancelled());
    }

    #[test]
    fn test_dropping_clones_does_not_fire() {
        let token = CancelToken::new();
        let clone = token.clone();
        drop(clone);
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancelled_completes_after_firing() {
        let token = CancelToken::new();
        token.cancel();
        futures::executor::block_on(token.cancelled());
    }
}
