//! Uniform command execution across local, privileged, and remote contexts
//!
//! This crate provides one small interface - [`Runner`] - for invoking
//! external programs, and a set of composable delivery strategies behind it:
//! direct execution on the host ([`LocalRunner`]), privilege escalation via
//! `sudo` ([`SudoRunner`]), remote execution through the `ssh` CLI client
//! ([`SshCliRunner`]), and invocation tracing ([`TracedRunner`]). Callers
//! depend only on the trait; how a command is delivered is decided by how
//! the runners are nested.
//!
//! # Examples
//!
//! Run a command locally, capturing stdout:
//!
//! ```
//! use command_runner::{Command, LocalRunner, Runner, Streams};
//!
//! # futures::executor::block_on(async {
//! let runner = LocalRunner::new();
//! let mut stdout = Vec::new();
//!
//! runner
//!     .run(
//!         Streams::null().stdout(&mut stdout),
//!         Command::builder("echo").arg("Hello world!").build(),
//!     )
//!     .await?;
//!
//! assert_eq!(stdout, b"Hello world!\n");
//! # Ok::<(), command_runner::Error>(())
//! # }).unwrap();
//! ```
//!
//! Pipe input through a child:
//!
//! ```
//! use command_runner::{Command, LocalRunner, Runner, Streams};
//!
//! # futures::executor::block_on(async {
//! let runner = LocalRunner::new();
//! let mut input: &[u8] = b"Hello world!";
//! let mut stdout = Vec::new();
//!
//! runner
//!     .run(
//!         Streams::null().stdin(&mut input).stdout(&mut stdout),
//!         Command::new("cat"),
//!     )
//!     .await?;
//!
//! assert_eq!(stdout, b"Hello world!");
//! # Ok::<(), command_runner::Error>(())
//! # }).unwrap();
//! ```
//!
//! Replace the environment wholesale:
//!
//! ```
//! use command_runner::{Command, LocalRunner, Runner, Streams};
//!
//! # futures::executor::block_on(async {
//! let mut runner = LocalRunner::new();
//! runner.set_env(vec!["USER=johndoe".into(), "HOME=/home/johnny".into()]);
//!
//! let mut stdout = Vec::new();
//! runner
//!     .run(
//!         Streams::null().stdout(&mut stdout),
//!         Command::builder("sh")
//!             .args(["-c", r#"echo "Hi, ${USER} (${HOME})""#])
//!             .build(),
//!     )
//!     .await?;
//!
//! assert_eq!(stdout, b"Hi, johndoe (/home/johnny)\n");
//! # Ok::<(), command_runner::Error>(())
//! # }).unwrap();
//! ```
//!
//! Deliver the same command on a remote host instead, escalated there - the
//! call site does not change, only the nesting does:
//!
//! ```no_run
//! use command_runner::{Command, LocalRunner, Runner, SshCliRunner, SudoRunner, Streams};
//!
//! # futures::executor::block_on(async {
//! // Runs: ssh -l admin db1.internal -- sudo -n -- systemctl restart postgres
//! let runner = SudoRunner::new(
//!     SshCliRunner::new(LocalRunner::new(), "db1.internal").with_login("admin"),
//! );
//!
//! runner
//!     .run(
//!         Streams::null(),
//!         Command::builder("systemctl")
//!             .args(["restart", "postgres"])
//!             .build(),
//!     )
//!     .await?;
//! # Ok::<(), command_runner::Error>(())
//! # }).unwrap();
//! ```
//!
//! Wrapping order decides the final command line: each layer rewrites the
//! command it is given and hands the result to the layer below, so the
//! outermost wrapper's program ends up innermost on the wire. A
//! `SudoRunner<SshCliRunner<LocalRunner>>` runs `sudo` on the *remote* end;
//! an `SshCliRunner<SudoRunner<LocalRunner>>` runs `ssh` *through* `sudo`.
//!
//! # Cancellation
//!
//! Every runner honors one cancellation contract: hand
//! [`run_with_cancel`](Runner::run_with_cancel) a [`CancelToken`], and when
//! the token fires the child is forcibly terminated and the call returns
//! [`Error::Signaled`]. See [`cancel`](mod@cancel) for wiring a deadline.

#![warn(missing_docs)]

pub mod cancel;
pub mod command;
pub mod error;
pub mod io;
pub mod runner;
pub mod runners;

pub use cancel::CancelToken;
pub use command::{Command, CommandBuilder};
pub use error::{Error, Result};
pub use io::Streams;
pub use runner::Runner;
pub use runners::local::{os_env, LocalRunner};
pub use runners::ssh_cli::SshCliRunner;
pub use runners::sudo::SudoRunner;
pub use runners::traced::{LogSink, TracedRunner, TracingSink};
