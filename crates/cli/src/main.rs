// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::error;

use circtail::config::Config;
use circtail::run;

#[tokio::main]
async fn main() {
    let config = Config::parse();

    if let Err(e) = config.validate() {
        eprintln!("error: {e}");
        std::process::exit(2);
    }

    init_tracing(&config);

    let shutdown = CancellationToken::new();
    run::spawn_signal_handler(shutdown.clone());

    let outcome = match run::run(&config, shutdown).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("fatal: {e:#}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run::write_tail(&config, &outcome) {
        error!("failed to write tail: {e:#}");
        std::process::exit(1);
    }

    std::process::exit(outcome.exit_status());
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    match config.log_format.as_str() {
        "json" => {
            fmt::fmt().with_env_filter(filter).with_writer(std::io::stderr).json().init();
        }
        _ => {
            fmt::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
        }
    }
}
