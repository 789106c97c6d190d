//! Runner implementations for the built-in delivery strategies
//!
//! This module provides the built-in strategies: direct local execution,
//! privilege escalation, remote delivery over ssh, and invocation tracing.
//! Users can add their own by implementing the [`Runner`](crate::Runner)
//! trait and wrapping any of these.

pub mod local;
pub mod ssh_cli;
pub mod sudo;
pub mod traced;

pub use local::{os_env, LocalRunner};
pub use ssh_cli::SshCliRunner;
pub use sudo::SudoRunner;
pub use traced::{LogSink, TracedRunner, TracingSink};
