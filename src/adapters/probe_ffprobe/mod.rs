//! FFprobe adapter for stream discovery
//!
//! Runs one ffprobe query per media kind and hands the text output to the
//! record parser.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::model::*;
use crate::error::{ConvertError, ConvertResult};
use crate::ports::ProbePort;
use crate::probe;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    program: String,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter for the given program path
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_streams(
        &self,
        input: &Path,
        kind: MediaKind,
    ) -> ConvertResult<Vec<StreamDescriptor>> {
        let args = probe::query_args(kind, input);
        debug!("Running {} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ConvertError::Probe {
                message: format!("failed to run {}: {}", self.program, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                "{} exited with {} while listing {} streams: {}",
                self.program,
                output.status,
                kind,
                stderr.trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(probe::parse_stream_records(kind, &stdout))
    }
}
