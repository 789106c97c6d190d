//! Remote execution through the ssh CLI client
//!
//! Commands are prefixed with `ssh`, the relevant client options, and the
//! destination, then handed to the wrapped runner - no in-process SSH
//! implementation involved. Interactive authentication is not supported:
//! the remote host's key should already be known and trusted, and logins
//! must not prompt for a password.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::cancel::CancelToken;
use crate::command::Command;
use crate::error::{Error, Result};
use crate::io::Streams;
use crate::runner::Runner;

/// Runner that wraps another runner and delivers commands to a remote host
/// via the `ssh` CLI client.
///
/// The command is rewritten as
/// `ssh [-p port] [-i identity] [-l login] [extra args...] destination --
/// [env KEY=VALUE...] program [args...]` and handed to the wrapped runner.
///
/// The remote shell does not inherit this process's environment, so
/// variables given to [`set_env`](Runner::set_env) are forwarded on the
/// remote command line through an `env` wrapper - they are part of the
/// remote command, not options to the ssh client.
///
/// # Example
///
/// ```no_run
/// use command_runner::{Command, LocalRunner, Runner, SshCliRunner, Streams};
///
/// # futures::executor::block_on(async {
/// // Runs: ssh -l deploy web1.example.com -- docker ps -a
/// let runner = SshCliRunner::new(LocalRunner::new(), "web1.example.com").with_login("deploy");
/// runner
///     .run(
///         Streams::null(),
///         Command::builder("docker").args(["ps", "-a"]).build(),
///     )
///     .await?;
/// # Ok::<(), command_runner::Error>(())
/// # }).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SshCliRunner<R> {
    inner: R,
    destination: String,
    port: Option<u16>,
    identity_file: Option<PathBuf>,
    login: Option<String>,
    ssh_args: Vec<String>,
    env: Vec<String>,
}

impl<R> SshCliRunner<R> {
    /// Create an ssh runner wrapping the given runner.
    ///
    /// `destination` is `"[user@]host"` or `"ssh://[user@]host[:port]"`,
    /// passed to the client verbatim. It must be non-empty by the time a
    /// command runs; runs against an empty destination fail with
    /// [`Error::InvalidConfig`] before the wrapped runner is touched.
    pub fn new(inner: R, destination: impl Into<String>) -> Self {
        Self {
            inner,
            destination: destination.into(),
            port: None,
            identity_file: None,
            login: None,
            ssh_args: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Connect to the given port (ssh's `-p` flag)
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Authenticate with the given identity file (ssh's `-i` flag)
    pub fn with_identity_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.identity_file = Some(path.into());
        self
    }

    /// Log in as the given user (ssh's `-l` flag)
    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    /// Pass an extra option to the ssh client
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.ssh_args.push(arg.into());
        self
    }

    /// Pass extra options to the ssh client
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ssh_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The environment entries forwarded to the remote command
    pub fn env(&self) -> &[String] {
        &self.env
    }

    fn remote_command(&self, command: &Command) -> Result<Command> {
        if self.destination.is_empty() {
            return Err(Error::invalid_config("sshcli: destination must be set"));
        }

        let mut ssh = Command::new("ssh");
        if let Some(port) = self.port {
            ssh.arg("-p").arg(port.to_string());
        }
        if let Some(identity) = &self.identity_file {
            ssh.arg("-i").arg(identity.to_string_lossy());
        }
        if let Some(login) = &self.login {
            ssh.arg("-l").arg(login);
        }
        ssh.args(self.ssh_args.iter().cloned());
        ssh.arg(&self.destination);
        ssh.arg("--");

        // Environment travels as part of the remote command line; the remote
        // shell never sees this process's environment.
        if !self.env.is_empty() {
            ssh.arg("env");
            ssh.args(self.env.iter().cloned());
        }
        ssh.arg(command.get_program());
        ssh.args(command.get_args().iter().cloned());

        Ok(ssh)
    }
}

#[async_trait]
impl<R> Runner for SshCliRunner<R>
where
    R: Runner,
{
    async fn run(&self, streams: Streams<'_>, command: Command) -> Result<()> {
        let remote = self.remote_command(&command)?;
        self.inner.run(streams, remote).await
    }

    async fn run_with_cancel(
        &self,
        cancel: &CancelToken,
        streams: Streams<'_>,
        command: Command,
    ) -> Result<()> {
        let remote = self.remote_command(&command)?;
        self.inner.run_with_cancel(cancel, streams, remote).await
    }

    // Keep a copy for remote forwarding, and still hand the entries down the
    // stack like every other layer.
    fn set_env(&mut self, vars: Vec<String>) {
        self.env = vars.clone();
        self.inner.set_env(vars);
    }
}
