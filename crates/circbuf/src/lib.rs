// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-capacity, overwrite-on-full circular byte buffer.
//!
//! [`RingBuffer`] keeps the most recent bytes written to it and counts every
//! byte that ever flowed through, so callers can bound memory spent on an
//! unbounded stream (process output, traces) and still know how much was
//! dropped.

pub mod error;
pub mod ring;

pub use error::RingError;
pub use ring::RingBuffer;
