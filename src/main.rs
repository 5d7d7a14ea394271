//! EncodeForge CLI
//!
//! Builds a 10-bit HEVC/AVC encode from a handful of preferences and runs
//! ffmpeg with it.
//!
//! # Usage
//!
//! ```bash
//! encodeforge -i movie.mkv -o movie.hevc.mkv --quality high
//! encodeforge -i movie.mkv -o out.mkv --crop --resize 1920x1080 --dry-run
//! encodeforge -i movie.mkv -o out.mkv --audio-streams 1,2 --audio-codec aac
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use encodeforge::adapters::AppConfig;
use encodeforge::cli::{self, commands, Cli};
use encodeforge::error::ConvertError;
use encodeforge::utils::init_logging;

/// Main entry point for the EncodeForge CLI application
fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return cli::handle_parse_error(e),
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            match e.downcast_ref::<ConvertError>() {
                Some(err) => {
                    if err.wants_usage() {
                        eprintln!("{}", cli::usage());
                    }
                    ExitCode::from(err.exit_code())
                }
                None => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    init_logging(&commands::log_level(&cli, &config), cli.log_format);

    info!("Starting EncodeForge {}", env!("CARGO_PKG_VERSION"));
    match config.source {
        Some(ref path) => info!("Loaded configuration from {}", path.display()),
        None => debug!("No config file found, using built-in defaults"),
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(commands::convert(cli, config))
}
