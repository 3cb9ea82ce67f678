// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pump bytes from one or two async readers into a [`RingBuffer`].

use circbuf::RingBuffer;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Bytes requested per read.
pub const READ_CHUNK: usize = 8192;

/// Origin of a captured chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Stdout,
    Stderr,
}

/// Why [`Capture::drain`] stopped reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainEnd {
    /// Every reader hit EOF.
    Eof,
    /// The shutdown token fired first.
    Cancelled,
}

pub type TeeWriter = Box<dyn AsyncWrite + Unpin + Send>;

/// Owns the ring buffer while output is being recorded.
pub struct Capture {
    ring: RingBuffer,
    tee_stdout: Option<TeeWriter>,
    tee_stderr: Option<TeeWriter>,
    chunks: u64,
}

impl Capture {
    pub fn new(ring: RingBuffer) -> Self {
        Self { ring, tee_stdout: None, tee_stderr: None, chunks: 0 }
    }

    /// Mirror captured chunks to the given writers as they arrive.
    pub fn with_tee(mut self, stdout: TeeWriter, stderr: TeeWriter) -> Self {
        self.tee_stdout = Some(stdout);
        self.tee_stderr = Some(stderr);
        self
    }

    pub fn ring(&self) -> &RingBuffer {
        &self.ring
    }

    pub fn into_ring(self) -> RingBuffer {
        self.ring
    }

    /// Number of non-empty chunks recorded.
    pub fn chunks(&self) -> u64 {
        self.chunks
    }

    /// Record one chunk, mirroring it if tee is enabled.
    pub async fn feed(&mut self, source: Source, chunk: &[u8]) -> anyhow::Result<()> {
        if chunk.is_empty() {
            return Ok(());
        }

        let was_wrapped = self.ring.is_wrapped();
        self.ring.write(chunk);
        self.chunks += 1;
        debug!(?source, len = chunk.len(), total = self.ring.total_written(), "captured chunk");

        if !was_wrapped && self.ring.is_wrapped() {
            warn!(
                capacity = self.ring.capacity(),
                "ring buffer full, discarding oldest output"
            );
        }

        let tee = match source {
            Source::Stdout => self.tee_stdout.as_mut(),
            Source::Stderr => self.tee_stderr.as_mut(),
        };
        if let Some(w) = tee {
            w.write_all(chunk).await?;
            w.flush().await?;
        }
        Ok(())
    }

    /// Read both streams to EOF (a `None` stream counts as already closed),
    /// recording chunks in arrival order.
    pub async fn drain<O, E>(
        &mut self,
        mut stdout: Option<O>,
        mut stderr: Option<E>,
        shutdown: &CancellationToken,
    ) -> anyhow::Result<DrainEnd>
    where
        O: AsyncRead + Unpin,
        E: AsyncRead + Unpin,
    {
        let mut out_buf = vec![0u8; READ_CHUNK];
        let mut err_buf = vec![0u8; READ_CHUNK];

        while stdout.is_some() || stderr.is_some() {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    debug!("capture cancelled");
                    return Ok(DrainEnd::Cancelled);
                }

                n = read_some(&mut stdout, &mut out_buf) => {
                    match n? {
                        0 => stdout = None,
                        n => self.feed(Source::Stdout, &out_buf[..n]).await?,
                    }
                }

                n = read_some(&mut stderr, &mut err_buf) => {
                    match n? {
                        0 => stderr = None,
                        n => self.feed(Source::Stderr, &err_buf[..n]).await?,
                    }
                }
            }
        }

        Ok(DrainEnd::Eof)
    }
}

async fn read_some<R: AsyncRead + Unpin>(
    reader: &mut Option<R>,
    buf: &mut [u8],
) -> std::io::Result<usize> {
    match reader {
        Some(r) => r.read(buf).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
