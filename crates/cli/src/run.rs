// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level capture runner, shared by `main` and integration tests.

use std::fs::File;
use std::io::Write;
use std::process::Stdio;

use anyhow::Context;
use circbuf::RingBuffer;
use tokio::process::{ChildStderr, ChildStdout, Command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::capture::{Capture, DrainEnd};
use crate::config::Config;
use crate::report;

/// Exit status reported when capture was interrupted by a signal.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Result of a completed capture.
#[derive(Debug)]
pub struct Outcome {
    pub ring: RingBuffer,
    /// Child exit code; `None` in stdin mode or when the child died by signal.
    pub exit_code: Option<i32>,
    pub spawned: bool,
    pub interrupted: bool,
}

impl Outcome {
    /// Process exit status circtail should finish with.
    pub fn exit_status(&self) -> i32 {
        if self.interrupted {
            EXIT_INTERRUPTED
        } else if !self.spawned {
            0
        } else {
            self.exit_code.unwrap_or(1)
        }
    }
}

/// Capture the configured input until it ends or `shutdown` fires.
pub async fn run(config: &Config, shutdown: CancellationToken) -> anyhow::Result<Outcome> {
    let ring = RingBuffer::new(config.ring_size)?;
    let mut capture = Capture::new(ring);
    if config.tee {
        capture = capture.with_tee(Box::new(tokio::io::stdout()), Box::new(tokio::io::stderr()));
    }

    if config.reads_stdin() {
        info!(ring_size = config.ring_size, "capturing stdin");
        let end = capture.drain(Some(tokio::io::stdin()), None::<tokio::io::Stdin>, &shutdown).await?;
        return Ok(finish(capture, None, false, end));
    }

    let streams = config.stream_select()?;
    let (program, args) = config.command.split_first().context("no command specified")?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(if streams.captures_stdout() { Stdio::piped() } else { Stdio::inherit() })
        .stderr(if streams.captures_stderr() { Stdio::piped() } else { Stdio::inherit() })
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("failed to spawn {program}"))?;

    info!(pid = child.id(), command = ?config.command, %streams, "spawned child");

    let stdout: Option<ChildStdout> = child.stdout.take();
    let stderr: Option<ChildStderr> = child.stderr.take();
    let end = capture.drain(stdout, stderr, &shutdown).await?;

    if end == DrainEnd::Cancelled {
        debug!("killing child after interrupt");
        if let Err(e) = child.start_kill() {
            warn!("failed to kill child: {e}");
        }
    }

    let status = child.wait().await.context("failed to wait for child")?;
    info!(%status, total_written = capture.ring().total_written(), "child exited");

    Ok(finish(capture, status.code(), true, end))
}

fn finish(capture: Capture, exit_code: Option<i32>, spawned: bool, end: DrainEnd) -> Outcome {
    debug!(chunks = capture.chunks(), "capture finished");
    Outcome {
        ring: capture.into_ring(),
        exit_code,
        spawned,
        interrupted: end == DrainEnd::Cancelled,
    }
}

/// Write the retained tail to `--output` or stdout.
pub fn write_tail(config: &Config, outcome: &Outcome) -> anyhow::Result<()> {
    let format = config.output_format()?;
    let mut out: Box<dyn Write> = match config.output {
        Some(ref path) => Box::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };
    report::emit(&mut *out, format, &outcome.ring, outcome.exit_code)
}

/// Cancel `shutdown` on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown: CancellationToken) {
    tokio::spawn(async move {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()).ok();
        let mut sigint =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt()).ok();

        tokio::select! {
            _ = async {
                if let Some(ref mut s) = sigterm { s.recv().await } else { std::future::pending().await }
            } => {
                info!("received SIGTERM");
                shutdown.cancel();
            }
            _ = async {
                if let Some(ref mut s) = sigint { s.recv().await } else { std::future::pending().await }
            } => {
                info!("received SIGINT");
                shutdown.cancel();
            }
        }
    });
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
