//! Invocation tracing
//!
//! [`TracedRunner`] observes commands on their way down a runner stack and
//! records them to a [`LogSink`]. It transforms nothing: streams, commands,
//! cancellation, and environment all pass through unchanged.

use std::fmt;

use async_trait::async_trait;

use crate::cancel::CancelToken;
use crate::command::Command;
use crate::error::Result;
use crate::io::Streams;
use crate::runner::Runner;

/// Capability that receives one line per observed operation.
///
/// Implementations must not block; logging is best-effort and never gates
/// execution.
pub trait LogSink: Send + Sync {
    /// Record a single log line
    fn log(&self, line: &str);
}

/// Sink that forwards lines to [`tracing`] at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, line: &str) {
        tracing::debug!("{line}");
    }
}

/// Runner that wraps another runner and logs every invocation before
/// delegating it unchanged.
///
/// Without a sink it is a pure pass-through; with one, each run emits a line
/// of the form `run: command=<program> args=<JSON array>`. Environment
/// changes are logged only when enabled via
/// [`with_env_logging`](TracedRunner::with_env_logging).
pub struct TracedRunner<R> {
    inner: R,
    sink: Option<Box<dyn LogSink>>,
    log_env: bool,
}

impl<R> TracedRunner<R> {
    /// Create a traced runner wrapping the given runner, with no sink
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            sink: None,
            log_env: false,
        }
    }

    /// Record observed operations to the given sink
    pub fn with_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Also log `set_env` calls
    pub fn with_env_logging(mut self, enabled: bool) -> Self {
        self.log_env = enabled;
        self
    }

    fn observe(&self, operation: &str, command: &Command) {
        if let Some(sink) = &self.sink {
            let args = serde_json::to_string(command.get_args()).unwrap_or_default();
            sink.log(&format!(
                "{operation}: command={} args={args}",
                command.get_program()
            ));
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for TracedRunner<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracedRunner")
            .field("inner", &self.inner)
            .field("sink", &self.sink.is_some())
            .field("log_env", &self.log_env)
            .finish()
    }
}

#[async_trait]
impl<R> Runner for TracedRunner<R>
where
    R: Runner,
{
    async fn run(&self, streams: Streams<'_>, command: Command) -> Result<()> {
        self.observe("run", &command);
        self.inner.run(streams, command).await
    }

    async fn run_with_cancel(
        &self,
        cancel: &CancelToken,
        streams: Streams<'_>,
        command: Command,
    ) -> Result<()> {
        self.observe("run_with_cancel", &command);
        self.inner.run_with_cancel(cancel, streams, command).await
    }

    fn set_env(&mut self, vars: Vec<String>) {
        if self.log_env {
            if let Some(sink) = &self.sink {
                let json = serde_json::to_string(&vars).unwrap_or_default();
                sink.log(&format!("set_env: vars={json}"));
            }
        }
        self.inner.set_env(vars);
    }
}
