// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Booth - photo persistence from the command line.
//!
//! Results go to stdout as pretty JSON; logs go to stderr.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;

/// Booth - save, find and share processed photos.
#[derive(Parser, Debug)]
#[command(name = "booth", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Save a photo, uploading it when the photo service is reachable.
    Save(commands::SaveArgs),
    /// Look up a photo by share code.
    Get {
        share_code: String,
    },
    /// List recent photos, cloud and local, newest first.
    List,
    /// Delete a photo by id.
    Delete {
        id: String,
    },
    /// Show local storage usage.
    Stats,
    /// Remove every locally stored photo.
    Clear {
        /// Confirm the removal.
        #[arg(long)]
        yes: bool,
    },
    /// Print the public link for a share code.
    ShareUrl {
        share_code: String,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => booth_config::load_and_validate_path(path),
        None => booth_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            booth_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log.level);

    match commands::run(cli.command, &config).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("booth: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize the tracing subscriber with the configured log level.
///
/// `RUST_LOG` takes precedence when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("booth={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
