//! Per-invocation I/O endpoints

use futures_lite::io::{AsyncRead, AsyncWrite};

/// Caller-supplied stdin, stdout, and stderr for a single invocation.
///
/// Every endpoint is optional. An absent stdout or stderr is a discard sink -
/// the child's output is dropped, never an error. An absent stdin means the
/// child reads no input (it sees end-of-file immediately).
///
/// Endpoints are borrowed for the duration of the invocation, so plain
/// buffers work directly:
///
/// ```
/// use command_runner::Streams;
///
/// let mut stdout = Vec::new();
/// let mut input: &[u8] = b"piped input";
/// let streams = Streams::null().stdin(&mut input).stdout(&mut stdout);
/// # let _ = streams;
/// ```
#[derive(Default)]
pub struct Streams<'a> {
    /// Input fed to the child; `None` means no input
    pub stdin: Option<&'a mut (dyn AsyncRead + Send + Unpin)>,
    /// Destination for the child's stdout; `None` discards
    pub stdout: Option<&'a mut (dyn AsyncWrite + Send + Unpin)>,
    /// Destination for the child's stderr; `None` discards
    pub stderr: Option<&'a mut (dyn AsyncWrite + Send + Unpin)>,
}

impl<'a> Streams<'a> {
    /// No input, all output discarded
    pub fn null() -> Self {
        Self::default()
    }

    /// Attach a reader as the child's stdin
    pub fn stdin(mut self, reader: &'a mut (dyn AsyncRead + Send + Unpin)) -> Self {
        self.stdin = Some(reader);
        self
    }

    /// Attach a writer receiving the child's stdout
    pub fn stdout(mut self, writer: &'a mut (dyn AsyncWrite + Send + Unpin)) -> Self {
        self.stdout = Some(writer);
        self
    }

    /// Attach a writer receiving the child's stderr
    pub fn stderr(mut self, writer: &'a mut (dyn AsyncWrite + Send + Unpin)) -> Self {
        self.stderr = Some(writer);
        self
    }
}
