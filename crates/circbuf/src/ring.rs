// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io;

use crate::error::RingError;

/// Fixed-capacity circular byte buffer.
///
/// Retains the most recent `capacity` bytes written and silently discards
/// older data once the buffer wraps. Tracks the total number of bytes ever
/// written so consumers can tell how much output flowed through and replay
/// from a global byte offset.
///
/// The write cursor always equals `total_written % capacity`, so the oldest
/// retained byte sits exactly where the next write lands once the buffer has
/// wrapped.
#[derive(Debug)]
pub struct RingBuffer {
    buf: Vec<u8>,
    capacity: usize,
    write_pos: usize,
    total_written: u64,
}

impl RingBuffer {
    /// Create a new ring buffer holding at most `capacity` bytes.
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        if capacity == 0 {
            return Err(RingError::InvalidCapacity { requested: 0 });
        }
        Ok(Self { buf: vec![0u8; capacity], capacity, write_pos: 0, total_written: 0 })
    }

    /// Append data into the circular buffer.
    ///
    /// Always accepts the whole slice and returns its length. When `data` is
    /// at least `capacity` bytes long only its tail is copied.
    pub fn write(&mut self, data: &[u8]) -> usize {
        if data.is_empty() {
            return 0;
        }

        let next_pos = (self.write_pos + data.len() % self.capacity) % self.capacity;
        let tail = &data[data.len().saturating_sub(self.capacity)..];
        // A full-capacity tail must begin at the new cursor, where the oldest
        // retained byte lives once wrapped.
        let start = if tail.len() == self.capacity { next_pos } else { self.write_pos };
        let end = start + tail.len();

        if end <= self.capacity {
            self.buf[start..end].copy_from_slice(tail);
        } else {
            let first = self.capacity - start;
            self.buf[start..].copy_from_slice(&tail[..first]);
            self.buf[..tail.len() - first].copy_from_slice(&tail[first..]);
        }

        self.write_pos = next_pos;
        self.total_written += data.len() as u64;
        data.len()
    }

    /// Append a single byte.
    pub fn write_byte(&mut self, byte: u8) {
        self.buf[self.write_pos] = byte;
        self.write_pos += 1;
        if self.write_pos == self.capacity {
            self.write_pos = 0;
        }
        self.total_written += 1;
    }

    /// Byte at `index` within the retained content, 0 being the oldest.
    pub fn get(&self, index: usize) -> Result<u8, RingError> {
        let len = self.len();
        if index >= len {
            return Err(RingError::IndexOutOfRange { index, len });
        }
        let pos = self.start() + index;
        Ok(if pos < self.capacity { self.buf[pos] } else { self.buf[pos - self.capacity] })
    }

    /// Owned copy of the retained content, oldest byte first.
    pub fn snapshot(&self) -> Vec<u8> {
        let (a, b) = self.as_slices();
        let mut out = Vec::with_capacity(a.len() + b.len());
        out.extend_from_slice(a);
        out.extend_from_slice(b);
        out
    }

    /// Retained content as two borrowed slices in logical order.
    ///
    /// The second slice is empty unless the content wraps past the physical
    /// end of storage.
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        if self.is_wrapped() {
            (&self.buf[self.write_pos..], &self.buf[..self.write_pos])
        } else {
            (&self.buf[..self.len()], &[])
        }
    }

    /// Retained content decoded as UTF-8, replacing invalid sequences.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.snapshot()).into_owned()
    }

    /// Read bytes starting from the given global byte offset.
    ///
    /// Returns `None` if the requested offset has already been overwritten
    /// (too old) or is beyond the newest byte (too new). Otherwise returns one
    /// or two slices covering the requested range.
    pub fn read_from(&self, offset: u64) -> Option<(&[u8], &[u8])> {
        if offset > self.total_written || offset < self.oldest_offset() {
            return None;
        }

        let skip = (offset - self.oldest_offset()) as usize;
        let (a, b) = self.as_slices();
        if skip <= a.len() {
            Some((&a[skip..], b))
        } else {
            Some((&b[skip - a.len()..], &[]))
        }
    }

    /// How many bytes are readable starting from the given offset.
    pub fn available_from(&self, offset: u64) -> u64 {
        if offset > self.total_written || offset < self.oldest_offset() {
            return 0;
        }
        self.total_written - offset
    }

    /// Global offset of the oldest byte still retained.
    pub fn oldest_offset(&self) -> u64 {
        self.total_written - self.len() as u64
    }

    /// Total bytes ever written through this buffer.
    pub fn total_written(&self) -> u64 {
        self.total_written
    }

    /// Bytes written and since overwritten.
    pub fn discarded(&self) -> u64 {
        self.oldest_offset()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of bytes currently retained.
    pub fn len(&self) -> usize {
        self.total_written.min(self.capacity as u64) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.total_written == 0
    }

    /// Whether older bytes have been overwritten since the last reset.
    pub fn is_wrapped(&self) -> bool {
        self.total_written > self.capacity as u64
    }

    /// Forget all content without touching the allocation.
    pub fn reset(&mut self) {
        self.write_pos = 0;
        self.total_written = 0;
    }

    fn start(&self) -> usize {
        if self.is_wrapped() {
            self.write_pos
        } else {
            0
        }
    }
}

impl TryFrom<i64> for RingBuffer {
    type Error = RingError;

    fn try_from(capacity: i64) -> Result<Self, Self::Error> {
        match usize::try_from(capacity) {
            Ok(n) if n > 0 => Self::new(n),
            _ => Err(RingError::InvalidCapacity { requested: capacity }),
        }
    }
}

impl io::Write for RingBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(RingBuffer::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "ring_tests.rs"]
mod tests;
