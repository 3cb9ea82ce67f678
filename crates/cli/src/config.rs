// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::Parser;

/// Which of the child's output streams feed the ring buffer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StreamSelect {
    #[default]
    Both,
    Stdout,
    Stderr,
}

impl StreamSelect {
    pub fn captures_stdout(&self) -> bool {
        matches!(self, Self::Both | Self::Stdout)
    }

    pub fn captures_stderr(&self) -> bool {
        matches!(self, Self::Both | Self::Stderr)
    }
}

impl std::fmt::Display for StreamSelect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Both => f.write_str("both"),
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
        }
    }
}

impl std::str::FromStr for StreamSelect {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "both" => Ok(Self::Both),
            "stdout" => Ok(Self::Stdout),
            "stderr" => Ok(Self::Stderr),
            other => anyhow::bail!("invalid stream: {other}"),
        }
    }
}

/// How the retained tail is emitted once capture ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raw retained bytes.
    #[default]
    Text,
    /// A [`Report`](crate::report::Report) object.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("invalid format: {other}"),
        }
    }
}

/// Keep only the tail of a command's output within a fixed memory budget.
#[derive(Debug, Parser)]
#[command(name = "circtail", version, about)]
pub struct Config {
    /// Ring buffer size in bytes.
    #[arg(long, env = "CIRCTAIL_RING_SIZE", default_value = "65536")]
    pub ring_size: usize,

    /// Streams to capture (both, stdout, stderr).
    #[arg(long, env = "CIRCTAIL_STREAM")]
    pub stream: Option<String>,

    /// Pass captured output through while it is being recorded.
    #[arg(long, env = "CIRCTAIL_TEE")]
    pub tee: bool,

    /// Output format for the retained tail (text or json).
    #[arg(long, env = "CIRCTAIL_FORMAT", default_value = "text")]
    pub format: String,

    /// Write the tail to this file instead of stdout.
    #[arg(long, env = "CIRCTAIL_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Log format (json or text).
    #[arg(long, env = "CIRCTAIL_LOG_FORMAT", default_value = "text")]
    pub log_format: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "CIRCTAIL_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Command to run (after --). Reads stdin when omitted.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Config {
    /// Validate the configuration after parsing.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ring_size == 0 {
            anyhow::bail!("--ring-size must be greater than zero");
        }

        if self.stream.is_some() && self.command.is_empty() {
            anyhow::bail!("--stream requires a command");
        }
        self.stream_select()?;
        self.output_format()?;

        match self.log_format.as_str() {
            "json" | "text" => {}
            other => anyhow::bail!("invalid log format: {other}"),
        }

        Ok(())
    }

    pub fn stream_select(&self) -> anyhow::Result<StreamSelect> {
        match self.stream {
            Some(ref s) => s.parse(),
            None => Ok(StreamSelect::default()),
        }
    }

    pub fn output_format(&self) -> anyhow::Result<OutputFormat> {
        self.format.parse()
    }

    /// Whether input comes from stdin rather than a spawned command.
    pub fn reads_stdin(&self) -> bool {
        self.command.is_empty()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
