// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use circbuf::RingBuffer;
use serde::Serialize;

use crate::config::OutputFormat;

/// Summary of a finished capture, emitted with `--format json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub capacity: usize,
    pub total_written: u64,
    pub retained: usize,
    pub discarded: u64,
    pub wrapped: bool,
    pub exit_code: Option<i32>,
    pub tail: String,
}

impl Report {
    pub fn new(ring: &RingBuffer, exit_code: Option<i32>) -> Self {
        Self {
            capacity: ring.capacity(),
            total_written: ring.total_written(),
            retained: ring.len(),
            discarded: ring.discarded(),
            wrapped: ring.is_wrapped(),
            exit_code,
            tail: ring.to_string_lossy(),
        }
    }
}

/// Write the retained tail to `out` in the requested format.
///
/// Text output is the raw retained bytes, untouched.
pub fn emit(
    out: &mut dyn Write,
    format: OutputFormat,
    ring: &RingBuffer,
    exit_code: Option<i32>,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let (a, b) = ring.as_slices();
            out.write_all(a)?;
            out.write_all(b)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &Report::new(ring, exit_code))?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
