//! CLI module for EncodeForge
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::{ContextKind, ErrorKind};
use clap::{CommandFactory, Parser};

use crate::error::ConvertError;
use crate::utils::LogFormat;

pub mod args;
pub mod commands;
pub mod request;

pub use args::ConvertArgs;
pub use request::RequestParser;

/// EncodeForge
///
/// Turns transcoding preferences into one correctly ordered ffmpeg
/// invocation, asking which audio and subtitle streams to keep.
#[derive(Parser, Debug)]
#[command(name = "encodeforge")]
#[command(about = "Build and run a 10-bit HEVC/AVC ffmpeg encode from simple preferences")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./encodeforge.toml when present)
    #[arg(long, env = "ENCODEFORGE_CONFIG", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    /// ffmpeg program to run
    #[arg(long, env = "ENCODEFORGE_FFMPEG", value_name = "PATH")]
    pub ffmpeg_path: Option<String>,

    /// ffprobe program used to list streams
    #[arg(long, env = "ENCODEFORGE_FFPROBE", value_name = "PATH")]
    pub ffprobe_path: Option<String>,

    #[command(flatten)]
    pub convert: ConvertArgs,
}

/// Usage line shown with argument errors
pub fn usage() -> String {
    Cli::command().render_usage().to_string()
}

/// Report a clap parse failure and pick the exit status.
///
/// Help and version are successes; every other failure exits with 1.
pub fn handle_parse_error(error: clap::Error) -> ExitCode {
    match error.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = error.print();
            ExitCode::SUCCESS
        }
        ErrorKind::UnknownArgument => {
            let option = error
                .get(ContextKind::InvalidArg)
                .map(|value| value.to_string())
                .unwrap_or_default();
            let err = ConvertError::UnknownOption { option };
            eprintln!("error: {}", err);
            eprintln!("{}", usage());
            ExitCode::from(err.exit_code())
        }
        _ => {
            let rendered = error.render().to_string();
            let message = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_string();
            let err = ConvertError::InvalidArgument { message };
            eprintln!("error: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
