//! Command implementations

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::adapters::AppConfig;
use crate::app::{AppContainer, DefaultAppContainer, ToolPaths};
use crate::cli::request::RequestParser;
use crate::cli::Cli;
use crate::output::{render_command_line, render_summary};

/// Level used when neither the flag nor the config file sets one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Resolve the log level: flag, then config file, then the default
pub fn log_level(cli: &Cli, config: &AppConfig) -> String {
    cli.log_level
        .clone()
        .or_else(|| config.defaults.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Resolve tool locations: flag or environment, then config file
pub fn tool_paths(cli: &Cli, config: &AppConfig) -> ToolPaths {
    ToolPaths {
        ffmpeg: cli
            .ffmpeg_path
            .clone()
            .unwrap_or_else(|| config.tools.ffmpeg.clone()),
        ffprobe: cli
            .ffprobe_path
            .clone()
            .unwrap_or_else(|| config.tools.ffprobe.clone()),
    }
}

/// Execute the convert command
pub async fn convert(cli: Cli, config: AppConfig) -> Result<()> {
    let request = RequestParser::parse(&cli.convert, &config)?;
    info!("Input: {}", request.input.display());
    info!("Output: {}", request.output.display());

    let container = DefaultAppContainer::new(tool_paths(&cli, &config), cli.convert.selection_answers());
    let mut interactor = container.convert_interactor();
    let plan = interactor.plan(&request).await?;

    for advisory in &plan.advisories {
        warn!("{}", advisory);
        eprintln!("warning: {}", advisory);
    }

    eprint!("{}", render_summary(&plan));

    if request.dry_run {
        if cli.convert.json {
            let json = serde_json::to_string_pretty(&plan.command)
                .context("Failed to serialize command plan")?;
            println!("{}", json);
        } else {
            println!("{}", render_command_line(&plan.command));
        }
        return Ok(());
    }

    interactor
        .execute(&plan)
        .await
        .with_context(|| format!("Conversion of {} failed", request.input.display()))?;

    info!("Wrote {}", request.output.display());
    Ok(())
}
