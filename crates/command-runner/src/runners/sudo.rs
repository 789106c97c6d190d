//! Privilege escalation via sudo
//!
//! Password prompts are not supported: every escalated command carries the
//! non-interactive flag, so sudo fails immediately instead of blocking when
//! it would prompt. Commands must be runnable without a password (NOPASSWD
//! in the sudoers file, or cached credentials).

use async_trait::async_trait;

use crate::cancel::CancelToken;
use crate::command::Command;
use crate::error::Result;
use crate::io::Streams;
use crate::runner::Runner;

/// Runner that wraps another runner and delivers commands through `sudo`.
///
/// The command is rewritten as
/// `sudo -n [-u user] [extra args...] -- program [args...]` and handed to
/// the wrapped runner; all failures are the wrapped runner's own.
///
/// # Example
///
/// ```no_run
/// use command_runner::{Command, LocalRunner, Runner, Streams, SudoRunner};
///
/// # futures::executor::block_on(async {
/// // Runs: sudo -n -u postgres -- pg_ctl reload
/// let runner = SudoRunner::new(LocalRunner::new()).with_user("postgres");
/// runner
///     .run(
///         Streams::null(),
///         Command::builder("pg_ctl").arg("reload").build(),
///     )
///     .await?;
/// # Ok::<(), command_runner::Error>(())
/// # }).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SudoRunner<R> {
    inner: R,
    user: Option<String>,
    sudo_args: Vec<String>,
}

impl<R> SudoRunner<R> {
    /// Create a sudo runner wrapping the given runner
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            user: None,
            sudo_args: Vec::new(),
        }
    }

    /// Run commands as the given user (sudo's `-u` flag)
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Pass an extra argument to sudo itself
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.sudo_args.push(arg.into());
        self
    }

    /// Pass extra arguments to sudo itself
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sudo_args.extend(args.into_iter().map(Into::into));
        self
    }

    fn escalate(&self, command: &Command) -> Command {
        let mut sudo = Command::new("sudo");
        sudo.arg("-n");
        if let Some(user) = &self.user {
            sudo.arg("-u").arg(user);
        }
        sudo.args(self.sudo_args.iter().cloned());
        sudo.arg("--");
        sudo.arg(command.get_program());
        sudo.args(command.get_args().iter().cloned());
        sudo
    }
}

#[async_trait]
impl<R> Runner for SudoRunner<R>
where
    R: Runner,
{
    async fn run(&self, streams: Streams<'_>, command: Command) -> Result<()> {
        self.inner.run(streams, self.escalate(&command)).await
    }

    async fn run_with_cancel(
        &self,
        cancel: &CancelToken,
        streams: Streams<'_>,
        command: Command,
    ) -> Result<()> {
        self.inner
            .run_with_cancel(cancel, streams, self.escalate(&command))
            .await
    }

    // Escalation and environment are orthogonal: the variables belong to the
    // target command, not to sudo, so they go straight down.
    fn set_env(&mut self, vars: Vec<String>) {
        self.inner.set_env(vars);
    }
}
