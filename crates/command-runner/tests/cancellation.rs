//! Tests for the shared cancellation contract

use std::time::{Duration, Instant};

use command_runner::{CancelToken, Command, LocalRunner, Runner, Streams};

#[test]
fn test_cancellation_kills_promptly() {
    futures::executor::block_on(async {
        let runner = LocalRunner::new();
        let token = CancelToken::new();

        let run = runner.run_with_cancel(
            &token,
            Streams::null(),
            Command::builder("sleep").arg("1").build(),
        );
        let deadline = async {
            smol::Timer::after(Duration::from_millis(100)).await;
            token.cancel();
        };

        let started = Instant::now();
        let (result, ()) = futures::future::join(run, deadline).await;
        let elapsed = started.elapsed();

        let err = result.unwrap_err();
        assert!(err.is_killed(), "expected kill, got {err}");
        assert_eq!(err.to_string(), "signal: killed");

        // Close to the 100ms deadline, nowhere near the child's full second.
        assert!(elapsed >= Duration::from_millis(90), "returned early: {elapsed:?}");
        assert!(elapsed < Duration::from_millis(800), "returned late: {elapsed:?}");
    });
}

/// Reader that never yields data and never reaches end-of-file
struct PendingReader;

impl futures::io::AsyncRead for PendingReader {
    fn poll_read(
        self: std::pin::Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
        _buf: &mut [u8],
    ) -> std::task::Poll<std::io::Result<usize>> {
        std::task::Poll::Pending
    }
}

#[test]
fn test_cancellation_interrupts_blocked_io() {
    futures::executor::block_on(async {
        let runner = LocalRunner::new();
        let token = CancelToken::new();

        // cat never sees input or EOF, so it blocks on its stdin read until
        // the kill arrives.
        let mut stdout = Vec::new();
        let mut pending = PendingReader;
        let run = runner.run_with_cancel(
            &token,
            Streams::null().stdin(&mut pending).stdout(&mut stdout),
            Command::new("cat"),
        );
        let deadline = async {
            smol::Timer::after(Duration::from_millis(100)).await;
            token.cancel();
        };

        let (result, ()) = futures::future::join(run, deadline).await;
        assert!(result.unwrap_err().is_killed());
    });
}

#[test]
fn test_unfired_token_does_not_interfere() {
    futures::executor::block_on(async {
        let runner = LocalRunner::new();
        let token = CancelToken::new();

        let mut stdout = Vec::new();
        runner
            .run_with_cancel(
                &token,
                Streams::null().stdout(&mut stdout),
                Command::builder("echo").arg("done").build(),
            )
            .await
            .unwrap();

        assert_eq!(stdout, b"done\n");
    });
}

#[test]
fn test_token_fired_before_invocation() {
    futures::executor::block_on(async {
        let runner = LocalRunner::new();
        let token = CancelToken::new();
        token.cancel();

        let result = runner
            .run_with_cancel(
                &token,
                Streams::null(),
                Command::builder("sleep").arg("5").build(),
            )
            .await;

        assert!(result.unwrap_err().is_killed());
    });
}

#[test]
fn test_run_without_token_completes() {
    futures::executor::block_on(async {
        let runner = LocalRunner::new();

        let started = Instant::now();
        runner
            .run(
                Streams::null(),
                Command::builder("sleep").arg("0.2").build(),
            )
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(200));
    });
}
