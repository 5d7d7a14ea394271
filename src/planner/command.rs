//! Encoder command assembly
//!
//! Merges the resolved pieces into a [`CommandPlan`] whose argument groups
//! always appear in [`GroupKind`] order. Nothing here launches a process.

use tracing::{debug, info};

use crate::domain::model::*;
use crate::planner::filters::FilterChainBuilder;
use crate::streams::{AudioMapper, StreamMapper, SubtitleProcessor};

/// Analysis window and probe size, about 20x the encoder defaults, so
/// late-starting streams in busy containers are detected
pub const ANALYZE_DURATION: &str = "100M";
pub const PROBE_SIZE: &str = "100M";

/// Preview encodes stop after this many seconds
pub const PREVIEW_SECONDS: u32 = 60;

/// Prefix that lowers the scheduling priority of the encoder
pub const LOW_PRIORITY_WRAPPER: [&str; 3] = ["nice", "-n", "10"];

/// Everything the assembler consumes
#[derive(Debug, Clone, Copy)]
pub struct CommandInputs<'a> {
    pub request: &'a ConversionRequest,
    pub video: &'a VideoEncodeSpec,
    pub filters: &'a FilterChain,
    pub audio: &'a [AudioTrackPlan],
    pub subtitles: &'a SubtitleSelection,
}

/// Command assembler for the encoder invocation
pub struct CommandAssembler {
    program: String,
}

impl CommandAssembler {
    /// Create an assembler targeting the given encoder program
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Build the plan in the fixed group order
    pub fn assemble(&self, inputs: &CommandInputs<'_>) -> CommandPlan {
        let request = inputs.request;
        let mut groups = Vec::new();
        let mut push = |kind: GroupKind, args: Vec<String>| {
            if !args.is_empty() {
                groups.push(ArgGroup { kind, args });
            }
        };

        push(
            GroupKind::Overwrite,
            vec![if request.overwrite { "-y" } else { "-n" }.to_string()],
        );
        push(
            GroupKind::AnalysisBuffer,
            strings(&["-analyzeduration", ANALYZE_DURATION, "-probesize", PROBE_SIZE]),
        );
        push(
            GroupKind::Input,
            vec!["-i".to_string(), request.input.to_string_lossy().into_owned()],
        );
        if request.preview {
            push(
                GroupKind::Preview,
                vec!["-t".to_string(), PREVIEW_SECONDS.to_string()],
            );
        }
        push(GroupKind::VideoEncode, inputs.video.to_args());
        push(GroupKind::Filters, FilterChainBuilder::filter_args(inputs.filters));
        push(GroupKind::Audio, AudioMapper::track_args(inputs.audio));
        push(GroupKind::Subtitles, SubtitleProcessor::options(inputs.subtitles));
        push(
            GroupKind::StreamMaps,
            StreamMapper::map_args(inputs.audio, inputs.subtitles),
        );
        push(
            GroupKind::Chapters,
            vec![
                "-map_chapters".to_string(),
                if request.no_chapters { "-1" } else { "0" }.to_string(),
            ],
        );
        if let Some(bytes) = request.max_size {
            push(GroupKind::SizeLimit, vec!["-fs".to_string(), bytes.to_string()]);
        }
        push(
            GroupKind::Output,
            vec![request.output.to_string_lossy().into_owned()],
        );

        let wrapper = match request.priority {
            Priority::Low => strings(&LOW_PRIORITY_WRAPPER),
            Priority::Normal => Vec::new(),
        };

        let plan = CommandPlan {
            wrapper,
            program: self.program.clone(),
            groups,
        };

        info!("Assembled command with {} argument groups", plan.groups.len());
        debug!("Command: {:?}", plan.argv());
        plan
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
