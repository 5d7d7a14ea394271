// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{ConvertError, ConvertResult};

/// Pixel format written for every supported encoder (10-bit planar 4:2:0)
pub const OUTPUT_PIXEL_FORMAT: &str = "yuv420p10le";

/// Encoder presets accepted by both libx264 and libx265
pub const ENCODER_PRESETS: &[&str] = &[
    "ultrafast",
    "superfast",
    "veryfast",
    "faster",
    "fast",
    "medium",
    "slow",
    "slower",
    "veryslow",
    "placebo",
];

/// Scheduling hint for the encoder process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    Low,
}

impl Priority {
    /// Parse priority from string
    pub fn parse(value: &str) -> ConvertResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "normal" => Ok(Priority::Normal),
            "low" => Ok(Priority::Low),
            _ => Err(ConvertError::InvalidPriority {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Normal => write!(f, "normal"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// Colour conversion target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Colorspace {
    /// Standard HD
    Bt709,
    /// Wide-gamut, HDR-capable
    Bt2020,
}

impl Colorspace {
    /// Parse colorspace from string
    pub fn parse(value: &str) -> ConvertResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "bt709" => Ok(Colorspace::Bt709),
            "bt2020" => Ok(Colorspace::Bt2020),
            _ => Err(ConvertError::UnknownColorspace {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Colorspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colorspace::Bt709 => write!(f, "bt709"),
            Colorspace::Bt2020 => write!(f, "bt2020"),
        }
    }
}

/// Video encoder implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCodec {
    H264,
    H265,
}

impl VideoCodec {
    /// Parse codec from string
    pub fn parse(value: &str) -> ConvertResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "h264" | "avc" | "x264" | "libx264" => Ok(VideoCodec::H264),
            "h265" | "hevc" | "x265" | "libx265" => Ok(VideoCodec::H265),
            _ => Err(ConvertError::InvalidArgument {
                message: format!("unknown video codec '{}'. Expected h264 or h265", value),
            }),
        }
    }

    /// Encoder name passed to ffmpeg
    pub fn encoder(&self) -> &'static str {
        match self {
            VideoCodec::H264 => "libx264",
            VideoCodec::H265 => "libx265",
        }
    }
}

/// Elementary stream kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    Subtitle,
}

impl MediaKind {
    /// Stream specifier letter used by ffmpeg/ffprobe
    pub fn specifier(&self) -> &'static str {
        match self {
            MediaKind::Video => "v",
            MediaKind::Audio => "a",
            MediaKind::Subtitle => "s",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Video => write!(f, "video"),
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Subtitle => write!(f, "subtitle"),
        }
    }
}

/// Per-stream disposition markers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Disposition {
    pub default: bool,
    pub forced: bool,
    pub hearing_impaired: bool,
}

/// One elementary stream as reported by the prober
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamDescriptor {
    /// File-relative stream index
    pub index: u32,
    pub kind: MediaKind,
    pub codec_name: Option<String>,
    /// Audio only
    pub channels: Option<u32>,
    pub language: Option<String>,
    pub title: Option<String>,
    pub disposition: Disposition,
    /// Subtitle payload size
    pub size_bytes: Option<u64>,
}

impl StreamDescriptor {
    /// Create a descriptor carrying only index and kind
    pub fn new(index: u32, kind: MediaKind) -> Self {
        Self {
            index,
            kind,
            codec_name: None,
            channels: None,
            language: None,
            title: None,
            disposition: Disposition::default(),
            size_bytes: None,
        }
    }

    /// One-line description used when presenting choices
    pub fn describe(&self) -> String {
        let mut parts = vec![self.codec_name.clone().unwrap_or_else(|| "unknown".to_string())];

        if let Some(channels) = self.channels {
            parts.push(format!("{} ch", channels));
        }
        parts.push(self.language.clone().unwrap_or_else(|| "und".to_string()));
        if let Some(size) = self.size_bytes {
            parts.push(crate::domain::rules::UnitConverter::format_size(size));
        }

        let mut line = format!("[{}] {}", self.index, parts.join(", "));
        if let Some(ref title) = self.title {
            line.push_str(&format!(" \"{}\"", title));
        }

        let mut flags = Vec::new();
        if self.disposition.default {
            flags.push("default");
        }
        if self.disposition.forced {
            flags.push("forced");
        }
        if self.disposition.hearing_impaired {
            flags.push("SDH");
        }
        if !flags.is_empty() {
            line.push_str(&format!(" ({})", flags.join(", ")));
        }

        line
    }
}

/// All resolved options for one run. Built once by the option parser.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Raw tier name given on the command line; resolved by the
    /// rate-control resolver
    pub quality: Option<String>,
    /// Tier from the config file, used when none was given on the command line
    pub configured_quality: Option<String>,
    pub crf: Option<u8>,
    pub target_bitrate: Option<String>,
    pub preset: String,
    pub codec: VideoCodec,
    pub keep_original_audio: bool,
    pub no_subtitles: bool,
    pub no_chapters: bool,
    pub normalize_loudness: bool,
    pub overwrite: bool,
    pub preview: bool,
    pub dry_run: bool,
    pub deinterlace: bool,
    pub crop: bool,
    pub hdr_to_sdr: bool,
    pub audio_channels: Option<u32>,
    pub audio_bitrate: String,
    pub audio_samplerate: Option<u32>,
    /// Milliseconds; negative values trim the start of the track
    pub audio_delay_ms: Option<i64>,
    pub colorspace: Option<Colorspace>,
    pub resize: Option<String>,
    pub threads: Option<u32>,
    pub priority: Priority,
    /// Output size cap in bytes
    pub max_size: Option<u64>,
}

/// Rate-control mode: exactly one is active
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateControl {
    ConstantQuality { crf: u8 },
    Bitrate { target: String },
}

impl fmt::Display for RateControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateControl::ConstantQuality { crf } => write!(f, "CRF {}", crf),
            RateControl::Bitrate { target } => write!(f, "target bitrate {}", target),
        }
    }
}

/// Video encoder settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoEncodeSpec {
    pub codec: VideoCodec,
    pub preset: String,
    pub rate_control: RateControl,
    pub pixel_format: String,
    pub threads: Option<u32>,
}

impl VideoEncodeSpec {
    /// Encoder arguments in ffmpeg order
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-c:v".to_string(),
            self.codec.encoder().to_string(),
            "-preset".to_string(),
            self.preset.clone(),
        ];

        match &self.rate_control {
            RateControl::ConstantQuality { crf } => {
                args.push("-crf".to_string());
                args.push(crf.to_string());
            }
            RateControl::Bitrate { target } => {
                args.push("-b:v".to_string());
                args.push(target.clone());
            }
        }

        args.push("-pix_fmt".to_string());
        args.push(self.pixel_format.clone());

        if let Some(threads) = self.threads {
            args.push("-threads".to_string());
            args.push(threads.to_string());
        }

        args
    }
}

/// Global audio encoding choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodecChoice {
    Copy,
    Ac3,
    Aac,
    Mp3,
    Other(String),
}

impl AudioCodecChoice {
    /// Choices offered to the user, default first
    pub const OPTIONS: [&'static str; 4] = ["copy", "ac3", "aac", "mp3"];

    /// Interpret an answer. Blank means copy; unknown names pass through verbatim.
    pub fn from_answer(answer: &str) -> Self {
        let trimmed = answer.trim();
        match trimmed.to_lowercase().as_str() {
            "" | "copy" => AudioCodecChoice::Copy,
            "ac3" => AudioCodecChoice::Ac3,
            "aac" => AudioCodecChoice::Aac,
            "mp3" => AudioCodecChoice::Mp3,
            _ => AudioCodecChoice::Other(trimmed.to_string()),
        }
    }

    /// Encoder name passed to ffmpeg
    pub fn encoder(&self) -> &str {
        match self {
            AudioCodecChoice::Copy => "copy",
            AudioCodecChoice::Ac3 => "ac3",
            AudioCodecChoice::Aac => "aac",
            AudioCodecChoice::Mp3 => "libmp3lame",
            AudioCodecChoice::Other(name) => name,
        }
    }

    pub fn is_copy(&self) -> bool {
        matches!(self, AudioCodecChoice::Copy)
    }
}

impl fmt::Display for AudioCodecChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioCodecChoice::Copy => write!(f, "copy"),
            AudioCodecChoice::Ac3 => write!(f, "ac3"),
            AudioCodecChoice::Aac => write!(f, "aac"),
            AudioCodecChoice::Mp3 => write!(f, "mp3"),
            AudioCodecChoice::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Result of audio stream selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioSelection {
    /// Selected source indexes in selection order
    pub indexes: Vec<u32>,
    pub codec: AudioCodecChoice,
}

/// Encode plan for one output audio track
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioTrackPlan {
    pub source_index: u32,
    /// 0-based, contiguous, in selection order
    pub output_position: usize,
    pub codec: AudioCodecChoice,
    /// None in copy mode
    pub bitrate: Option<String>,
    pub channels: Option<u32>,
    pub sample_rate: Option<u32>,
    pub delay_ms: Option<i64>,
    pub normalize: bool,
}

/// Subtitle streams to carry, in selection order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleSelection {
    /// All subtitle streams suppressed
    None,
    Streams(Vec<u32>),
}

impl SubtitleSelection {
    /// Build from an ordered list; empty means suppressed
    pub fn from_indexes(indexes: Vec<u32>) -> Self {
        if indexes.is_empty() {
            SubtitleSelection::None
        } else {
            SubtitleSelection::Streams(indexes)
        }
    }

    pub fn indexes(&self) -> &[u32] {
        match self {
            SubtitleSelection::None => &[],
            SubtitleSelection::Streams(indexes) => indexes,
        }
    }
}

/// Filter stage category. Declaration order is the chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Deinterlace,
    Crop,
    Resize,
    HdrToSdr,
    Colorspace,
}

/// One filter expression in the video graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterStage {
    pub kind: StageKind,
    pub expression: String,
}

impl FilterStage {
    pub fn new(kind: StageKind, expression: impl Into<String>) -> Self {
        Self {
            kind,
            expression: expression.into(),
        }
    }
}

/// Ordered video filter chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterChain {
    stages: Vec<FilterStage>,
}

impl FilterChain {
    /// Build a chain; stages are put in canonical order, keeping the
    /// relative order of stages of the same kind
    pub fn from_stages(mut stages: Vec<FilterStage>) -> Self {
        stages.sort_by_key(|stage| stage.kind);
        Self { stages }
    }

    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Distinct stage kinds in chain order
    pub fn kinds(&self) -> Vec<StageKind> {
        let mut kinds: Vec<StageKind> = self.stages.iter().map(|s| s.kind).collect();
        kinds.dedup();
        kinds
    }

    /// Comma-joined filter graph, or None when empty
    pub fn to_graph(&self) -> Option<String> {
        if self.stages.is_empty() {
            return None;
        }
        Some(
            self.stages
                .iter()
                .map(|s| s.expression.as_str())
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

/// Argument group category. Declaration order is the order the encoder requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Overwrite,
    AnalysisBuffer,
    Input,
    Preview,
    VideoEncode,
    Filters,
    Audio,
    Subtitles,
    StreamMaps,
    Chapters,
    SizeLimit,
    Output,
}

/// A run of arguments belonging to one concern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgGroup {
    pub kind: GroupKind,
    pub args: Vec<String>,
}

/// The fully assembled encoder invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandPlan {
    /// Scheduling prefix, e.g. `nice -n 10`; empty for normal priority
    pub wrapper: Vec<String>,
    pub program: String,
    pub groups: Vec<ArgGroup>,
}

impl CommandPlan {
    /// Group kinds in plan order
    pub fn group_kinds(&self) -> Vec<GroupKind> {
        self.groups.iter().map(|g| g.kind).collect()
    }

    pub fn group(&self, kind: GroupKind) -> Option<&ArgGroup> {
        self.groups.iter().find(|g| g.kind == kind)
    }

    /// Encoder arguments without wrapper or program name
    pub fn encoder_args(&self) -> Vec<String> {
        self.groups.iter().flat_map(|g| g.args.iter().cloned()).collect()
    }

    /// Complete argument vector: wrapper, program, encoder arguments
    pub fn argv(&self) -> Vec<String> {
        let mut argv = self.wrapper.clone();
        argv.push(self.program.clone());
        argv.extend(self.encoder_args());
        argv
    }
}

/// Non-fatal notice raised while resolving a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    /// Bitrate given together with CRF or quality; bitrate wins
    RateControlConflict { target_bitrate: String, crf: u8 },
    /// Output is capped and may be cut short
    SizeLimitTruncation { bytes: u64 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::RateControlConflict { target_bitrate, crf } => write!(
                f,
                "target bitrate {} overrides CRF {} (quality settings are ignored in bitrate mode)",
                target_bitrate, crf
            ),
            Advisory::SizeLimitTruncation { bytes } => write!(
                f,
                "output is limited to {}; the encode stops when the limit is reached and may be truncated",
                crate::domain::rules::UnitConverter::format_size(*bytes)
            ),
        }
    }
}

#[cfg(test)]
mod tests;
