//! FFmpeg execution adapter
//!
//! Launches the assembled command as a direct argument vector. No shell
//! is involved, so paths and values are never re-interpreted.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{error, info};

use crate::domain::model::CommandPlan;
use crate::error::{ConvertError, ConvertResult};
use crate::ports::ExecutePort;

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter;

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for FFmpegAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExecutePort for FFmpegAdapter {
    async fn execute(&self, plan: &CommandPlan) -> ConvertResult<()> {
        let argv = plan.argv();
        let Some((program, args)) = argv.split_first() else {
            return Err(ConvertError::Encoder {
                message: "empty command".to_string(),
            });
        };

        info!("Launching {} with {} arguments", program, args.len());

        // Encoder progress goes straight to the terminal
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ConvertError::Encoder {
                message: format!("failed to run {}: {}", program, e),
            })?;

        if status.success() {
            info!("Encoder finished successfully");
            Ok(())
        } else {
            error!("Encoder exited with {}", status);
            Err(ConvertError::Encoder {
                message: format!("{} exited with {}", plan.program, status),
            })
        }
    }
}
