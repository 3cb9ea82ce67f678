// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod capture;
pub mod config;
pub mod report;
pub mod run;
pub mod test_support;
