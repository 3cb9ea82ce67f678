// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;

use super::{Config, OutputFormat, StreamSelect};

fn parse(args: &[&str]) -> Config {
    Config::parse_from(args)
}

#[test]
fn valid_config_with_command() -> anyhow::Result<()> {
    let config = parse(&["circtail", "--ring-size", "128", "--", "echo", "hello"]);
    config.validate()?;
    assert_eq!(config.ring_size, 128);
    assert_eq!(config.command, vec!["echo", "hello"]);
    assert!(!config.reads_stdin());
    Ok(())
}

#[test]
fn valid_config_stdin() -> anyhow::Result<()> {
    let config = parse(&["circtail"]);
    config.validate()?;
    assert!(config.reads_stdin());
    Ok(())
}

#[test]
fn command_keeps_hyphen_args() -> anyhow::Result<()> {
    let config = parse(&["circtail", "--", "ls", "-la", "--color=never"]);
    config.validate()?;
    assert_eq!(config.command, vec!["ls", "-la", "--color=never"]);
    Ok(())
}

#[yare::parameterized(
    zero_ring_size  = { &["circtail", "--ring-size", "0", "--", "echo"], "greater than zero" },
    stream_on_stdin = { &["circtail", "--stream", "stdout"], "--stream requires a command" },
    bad_stream      = { &["circtail", "--stream", "stdin", "--", "echo"], "invalid stream" },
    bad_format      = { &["circtail", "--format", "yaml", "--", "echo"], "invalid format" },
    bad_log_format  = { &["circtail", "--log-format", "xml", "--", "echo"], "invalid log format" },
)]
fn invalid_config(args: &[&str], expected_substr: &str) {
    let config = parse(args);
    crate::assert_err_contains!(config.validate(), expected_substr);
}

#[test]
fn negative_ring_size_rejected_by_parser() {
    let result = Config::try_parse_from(["circtail", "--ring-size", "-5", "--", "echo"]);
    assert!(result.is_err());
}

#[yare::parameterized(
    default = { None, StreamSelect::Both },
    both    = { Some("both"), StreamSelect::Both },
    stdout  = { Some("stdout"), StreamSelect::Stdout },
    stderr  = { Some("STDERR"), StreamSelect::Stderr },
)]
fn stream_select(value: Option<&str>, expected: StreamSelect) {
    let mut args = vec!["circtail"];
    if let Some(v) = value {
        args.extend(["--stream", v]);
    }
    args.extend(["--", "echo"]);
    let config = parse(&args);
    assert_eq!(config.stream_select().ok(), Some(expected));
}

#[test]
fn stream_select_captures() {
    assert!(StreamSelect::Both.captures_stdout());
    assert!(StreamSelect::Both.captures_stderr());
    assert!(StreamSelect::Stdout.captures_stdout());
    assert!(!StreamSelect::Stdout.captures_stderr());
    assert!(!StreamSelect::Stderr.captures_stdout());
    assert!(StreamSelect::Stderr.captures_stderr());
}

#[test]
fn stream_select_display_roundtrips() -> anyhow::Result<()> {
    for stream in [StreamSelect::Both, StreamSelect::Stdout, StreamSelect::Stderr] {
        assert_eq!(stream.to_string().parse::<StreamSelect>()?, stream);
    }
    Ok(())
}

#[test]
fn format_json() -> anyhow::Result<()> {
    let config = parse(&["circtail", "--format", "JSON", "--", "echo"]);
    assert_eq!(config.output_format()?, OutputFormat::Json);
    Ok(())
}

#[test]
fn defaults_are_correct() -> anyhow::Result<()> {
    let config = parse(&["circtail", "--", "echo"]);
    assert_eq!(config.ring_size, 65536);
    assert_eq!(config.stream, None);
    assert!(!config.tee);
    assert_eq!(config.output_format()?, OutputFormat::Text);
    assert_eq!(config.output, None);
    assert_eq!(config.log_format, "text");
    assert_eq!(config.log_level, "warn");
    Ok(())
}
