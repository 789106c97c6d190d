//! Local process execution

use async_process::{Child, Stdio};
use async_trait::async_trait;
use futures::future::{select, Either};
use futures::pin_mut;
use futures_lite::io::copy;
use tracing::debug;

use crate::cancel::CancelToken;
use crate::command::Command;
use crate::error::{Error, Result};
use crate::io::Streams;
use crate::runner::Runner;

/// Runner that executes commands directly on the host machine.
///
/// This is the only runner that actually creates an OS process; every other
/// runner rewrites the command and delegates, with a `LocalRunner` at the
/// bottom of the stack. Exactly one process is created and torn down per
/// call, with no retries.
///
/// # Environment
///
/// Until [`set_env`](Runner::set_env) is called the child inherits this
/// process's environment. Once called - even with an empty vector - the
/// given entries replace the environment entirely. To inherit wholesale
/// while still layering entries on top, start from [`os_env`].
#[derive(Debug, Clone, Default)]
pub struct LocalRunner {
    env: Option<Vec<String>>,
}

impl LocalRunner {
    /// Create a runner that executes commands on the host machine
    pub fn new() -> Self {
        Self::default()
    }

    /// The configured environment entries, exactly as given to `set_env`.
    ///
    /// `None` until `set_env` is first called.
    pub fn env(&self) -> Option<&[String]> {
        self.env.as_deref()
    }

    async fn run_inner(
        &self,
        cancel: Option<&CancelToken>,
        streams: Streams<'_>,
        command: Command,
    ) -> Result<()> {
        let mut cmd = command.prepare();

        if let Some(vars) = &self.env {
            cmd.env_clear();
            for entry in vars {
                let (key, value) = split_env_entry(entry);
                cmd.env(key, value);
            }
        }

        cmd.stdin(stdio_for(streams.stdin.is_some()));
        cmd.stdout(stdio_for(streams.stdout.is_some()));
        cmd.stderr(stdio_for(streams.stderr.is_some()));

        let mut child = cmd.spawn()?;
        debug!(
            program = command.get_program(),
            pid = child.id(),
            "spawned process"
        );

        let stdin_pipe = child.stdin.take();
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let Streams {
            stdin,
            stdout,
            stderr,
        } = streams;

        // Forward all three streams concurrently with the status wait. The
        // stdin pipe is dropped at end-of-input so the child sees EOF; a
        // failed stdin copy is normal (the child may exit without reading).
        let completed = {
            let forward = async move {
                let feed_stdin = async move {
                    if let (Some(reader), Some(mut pipe)) = (stdin, stdin_pipe) {
                        let _ = copy(reader, &mut pipe).await;
                    }
                };
                let drain_stdout = async move {
                    match (stdout, stdout_pipe) {
                        (Some(mut writer), Some(mut pipe)) => {
                            copy(&mut pipe, &mut writer).await.map(drop)
                        }
                        _ => Ok(()),
                    }
                };
                let drain_stderr = async move {
                    match (stderr, stderr_pipe) {
                        (Some(mut writer), Some(mut pipe)) => {
                            copy(&mut pipe, &mut writer).await.map(drop)
                        }
                        _ => Ok(()),
                    }
                };

                let ((), out, err) = futures::join!(feed_stdin, drain_stdout, drain_stderr);
                out.and(err)
            };
            let run = futures::future::join(forward, child.status());

            match cancel {
                None => Some(run.await),
                Some(token) => {
                    pin_mut!(run);
                    let cancelled = token.cancelled();
                    pin_mut!(cancelled);
                    match select(run, cancelled).await {
                        Either::Left((done, _)) => Some(done),
                        Either::Right(((), _)) => None,
                    }
                }
            }
        };

        let (copied, status) = match completed {
            Some(done) => done,
            None => {
                force_kill(&mut child);
                // Reap the killed child so no zombie is left behind.
                let _ = child.status().await;
                return Err(Error::killed());
            }
        };

        let status = status?;
        if !status.success() {
            return Err(status_failure(status));
        }
        copied?;
        Ok(())
    }
}

#[async_trait]
impl Runner for LocalRunner {
    async fn run(&self, streams: Streams<'_>, command: Command) -> Result<()> {
        self.run_inner(None, streams, command).await
    }

    async fn run_with_cancel(
        &self,
        cancel: &CancelToken,
        streams: Streams<'_>,
        command: Command,
    ) -> Result<()> {
        self.run_inner(Some(cancel), streams, command).await
    }

    fn set_env(&mut self, vars: Vec<String>) {
        self.env = Some(vars);
    }
}

/// This process's own environment as `"KEY=VALUE"` entries.
///
/// Passing the result to [`Runner::set_env`] makes children inherit the
/// caller's environment even through runners that otherwise replace it.
pub fn os_env() -> Vec<String> {
    std::env::vars()
        .map(|(key, value)| format!("{key}={value}"))
        .collect()
}

fn stdio_for(attached: bool) -> Stdio {
    if attached {
        Stdio::piped()
    } else {
        Stdio::null()
    }
}

fn split_env_entry(entry: &str) -> (&str, &str) {
    entry.split_once('=').unwrap_or((entry, ""))
}

fn force_kill(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{self, Signal};
        use nix::unistd::Pid;

        let _ = signal::kill(Pid::from_raw(child.id() as i32), Signal::SIGKILL);
    }

    #[cfg(not(unix))]
    {
        let _ = child.kill();
    }
}

fn status_failure(status: std::process::ExitStatus) -> Error {
    if let Some(code) = status.code() {
        return Error::exit_status(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            return Error::signaled(signal);
        }
    }

    Error::exit_status(-1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_env_entry() {
        assert_eq!(split_env_entry("KEY=VALUE"), ("KEY", "VALUE"));
        assert_eq!(split_env_entry("KEY=a=b"), ("KEY", "a=b"));
        assert_eq!(split_env_entry("BARE"), ("BARE", ""));
        assert_eq!(split_env_entry("EMPTY="), ("EMPTY", ""));
    }

    #[test]
    fn test_env_starts_unset() {
        let runner = LocalRunner::new();
        assert_eq!(runner.env(), None);
    }

    #[test]
    fn test_set_env_replaces_wholesale() {
        let mut runner = LocalRunner::new();
        runner.set_env(vec!["A=1".to_string(), "B=2".to_string()]);
        runner.set_env(vec!["C=3".to_string()]);

        assert_eq!(runner.env(), Some(&["C=3".to_string()][..]));
    }

    #[test]
    fn test_set_env_empty_is_distinct_from_unset() {
        let mut runner = LocalRunner::new();
        runner.set_env(Vec::new());

        assert_eq!(runner.env(), Some(&[][..]));
    }

    #[test]
    fn test_os_env_entries_are_key_value() {
        for entry in os_env() {
            assert!(entry.contains('='), "entry {entry:?} missing separator");
        }
    }
}
