//! Runner trait for executing commands in different contexts

use async_trait::async_trait;

use crate::cancel::CancelToken;
use crate::command::Command;
use crate::error::Result;
use crate::io::Streams;

/// A runner that can deliver commands for execution in a specific context.
///
/// All runners share one contract regardless of how a command is ultimately
/// delivered - directly, through `sudo`, or on a remote host over `ssh`:
/// identical stream semantics, identical cancellation semantics, and a
/// success/failure outcome with no other return value (output is observed
/// through [`Streams`]).
///
/// Wrapping runners compose by plain nesting: a [`TracedRunner`] may wrap an
/// [`SshCliRunner`] which wraps a [`LocalRunner`], and each layer sees this
/// same trait on the layer below.
///
/// # Configuration vs. execution
///
/// [`set_env`](Runner::set_env) takes `&mut self` while the run methods take
/// `&self`. Treat a configured runner as single-writer: reconfigure it, then
/// share it for as many invocations as you like. Concurrent invocations of
/// the same instance are the caller's composition; no runner manages more
/// than the one child process per call.
///
/// [`TracedRunner`]: crate::TracedRunner
/// [`SshCliRunner`]: crate::SshCliRunner
/// [`LocalRunner`]: crate::LocalRunner
#[async_trait]
pub trait Runner: Send + Sync {
    /// Execute the command, blocking until it completes.
    ///
    /// Returns `Ok(())` only for a zero exit status; see [`Error`] for the
    /// failure kinds.
    ///
    /// [`Error`]: crate::Error
    async fn run(&self, streams: Streams<'_>, command: Command) -> Result<()>;

    /// Execute the command, forcibly terminating it if `cancel` fires.
    ///
    /// A cancelled invocation returns [`Error::Signaled`] promptly, even if
    /// the child is blocked on its own I/O. There is no graceful-shutdown
    /// negotiation with the child.
    ///
    /// [`Error::Signaled`]: crate::Error::Signaled
    async fn run_with_cancel(
        &self,
        cancel: &CancelToken,
        streams: Streams<'_>,
        command: Command,
    ) -> Result<()>;

    /// Replace the environment for all subsequent invocations.
    ///
    /// Each entry is of the form `"KEY=VALUE"`. Entries with duplicate keys
    /// are kept as given; the spawn primitive resolves them last-wins.
    /// Calling with an empty vector explicitly sets "no variables", which is
    /// distinct from never calling at all (the local executor then inherits
    /// its own environment).
    ///
    /// Wrapping runners delegate this down to the innermost executor, so the
    /// target command receives the variables no matter how many layers sit
    /// in between.
    fn set_env(&mut self, vars: Vec<String>);
}
