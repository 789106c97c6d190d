//! Common test utilities

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use command_runner::{CancelToken, Command, Error, Result, Runner, Streams};

/// One delegated invocation observed by [`RecordingRunner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub cancellable: bool,
}

/// Runner double that records every delegated call instead of spawning.
///
/// Clones share their recordings, so tests can keep a handle while handing
/// ownership to a wrapping runner.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    env_sets: Arc<Mutex<Vec<Vec<String>>>>,
    exit_code: Option<i32>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A double whose every run fails with the given exit status
    pub fn failing_with_exit(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn env_sets(&self) -> Vec<Vec<String>> {
        self.env_sets.lock().unwrap().clone()
    }

    fn record(&self, command: &Command, cancellable: bool) -> Result<()> {
        self.calls.lock().unwrap().push(RecordedCall {
            program: command.get_program().to_string(),
            args: command.get_args().to_vec(),
            cancellable,
        });

        match self.exit_code {
            Some(code) => Err(Error::exit_status(code)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Runner for RecordingRunner {
    async fn run(&self, _streams: Streams<'_>, command: Command) -> Result<()> {
        self.record(&command, false)
    }

    async fn run_with_cancel(
        &self,
        _cancel: &CancelToken,
        _streams: Streams<'_>,
        command: Command,
    ) -> Result<()> {
        self.record(&command, true)
    }

    fn set_env(&mut self, vars: Vec<String>) {
        self.env_sets.lock().unwrap().push(vars);
    }
}
