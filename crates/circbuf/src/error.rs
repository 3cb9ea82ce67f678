// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

/// Errors returned by [`RingBuffer`](crate::RingBuffer).
///
/// Writes never fail; only construction and indexed reads do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    /// Construction with a capacity that is zero or negative.
    InvalidCapacity { requested: i64 },
    /// Indexed read outside the retained content.
    IndexOutOfRange { index: usize, len: usize },
}

impl RingError {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCapacity { .. } => "INVALID_CAPACITY",
            Self::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
        }
    }
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity { requested } => {
                write!(f, "invalid capacity {requested}: must be greater than zero")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} retained bytes")
            }
        }
    }
}

impl std::error::Error for RingError {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
