// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test infrastructure: builders and assertion helpers.

use clap::Parser;

use crate::config::Config;

/// Parse a [`Config`] from arguments following the program name.
pub fn config_from(args: &[&str]) -> Config {
    let mut argv = vec!["circtail"];
    argv.extend_from_slice(args);
    Config::parse_from(argv)
}

/// Assert that an expression evaluates to `Err` whose Display output
/// contains the given substring.
#[macro_export]
macro_rules! assert_err_contains {
    ($expr:expr, $substr:expr) => {{
        let result = $expr;
        let err = result.expect_err(concat!("expected Err for: ", stringify!($expr)));
        let msg = err.to_string();
        assert!(msg.contains($substr), "expected error containing {:?}, got: {msg:?}", $substr);
    }};
}
