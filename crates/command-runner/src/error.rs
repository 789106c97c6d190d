//! Error types for command execution

use thiserror::Error;

/// Unified error type for command execution
///
/// This is a closed set: wrapping runners never add their own failure kinds
/// beyond `InvalidConfig`, and inner failures pass through unmodified so
/// callers can match on the original kind.
#[derive(Error, Debug)]
pub enum Error {
    /// Child process ran and exited with a nonzero status
    #[error("exit status {code}")]
    ExitStatus {
        /// The child's numeric exit code
        code: i32,
    },

    /// Child process was terminated by a signal before it could exit
    ///
    /// This is what a cancelled invocation returns; callers that need to
    /// tell "cancelled" apart from "failed" match on this instead of
    /// [`Error::ExitStatus`].
    #[error("signal: {name}")]
    Signaled {
        /// Human-readable signal name, e.g. "killed"
        name: String,
    },

    /// A required configuration field was missing or invalid
    ///
    /// Detected before any process is spawned; never retried, no side
    /// effects have occurred.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong with the configuration
        reason: String,
    },

    /// The platform could not create the process at all
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an exit status error
    pub fn exit_status(code: i32) -> Self {
        Self::ExitStatus { code }
    }

    /// Create the error a forcibly killed child reports
    pub fn killed() -> Self {
        Self::Signaled {
            name: "killed".to_string(),
        }
    }

    /// Create a signal termination error from a raw signal number
    #[cfg(unix)]
    pub fn signaled(signal: i32) -> Self {
        Self::Signaled {
            name: signal_name(signal),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// The child's exit code, if it ran and exited on its own
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ExitStatus { code } => Some(*code),
            _ => None,
        }
    }

    /// Returns true if the child was forcibly terminated
    pub fn is_killed(&self) -> bool {
        matches!(self, Self::Signaled { name } if name == "killed")
    }

    /// Returns true for configuration errors detected before spawning
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(unix)]
fn signal_name(signal: i32) -> String {
    use nix::sys::signal::Signal;

    match Signal::try_from(signal) {
        Ok(Signal::SIGHUP) => "hangup".to_string(),
        Ok(Signal::SIGINT) => "interrupt".to_string(),
        Ok(Signal::SIGQUIT) => "quit".to_string(),
        Ok(Signal::SIGKILL) => "killed".to_string(),
        Ok(Signal::SIGPIPE) => "broken pipe".to_string(),
        Ok(Signal::SIGTERM) => "terminated".to_string(),
        Ok(other) => other.as_str().trim_start_matches("SIG").to_lowercase(),
        Err(_) => format!("signal {signal}"),
    }
}
