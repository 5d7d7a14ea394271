//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::adapters::SelectionAnswers;

/// Transcoding options
#[derive(Args, Debug, Clone, Default)]
pub struct ConvertArgs {
    /// Input media file
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output media file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Quality tier: ultra, high, medium or low (default: high)
    #[arg(long)]
    pub quality: Option<String>,

    /// Constant Rate Factor (0-51); overrides --quality
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=51))]
    pub crf: Option<u8>,

    /// Encoder preset, ultrafast to placebo (default: medium)
    #[arg(long)]
    pub speed: Option<String>,

    /// Video codec: h264 or h265 (default: h265)
    #[arg(long)]
    pub codec: Option<String>,

    /// Copy every selected audio stream unchanged
    #[arg(long)]
    pub keep_original_audio: bool,

    /// Drop all subtitle streams
    #[arg(long)]
    pub no_subtitles: bool,

    /// Normalize loudness of re-encoded audio
    #[arg(long)]
    pub normalize_loudness: bool,

    /// Stop writing once the output reaches this size (e.g. 2GB, 700MB)
    #[arg(long, value_name = "SIZE")]
    pub max_size: Option<String>,

    /// Encode at a target bitrate instead of constant quality (e.g. 8M)
    #[arg(long, value_name = "RATE")]
    pub target_bitrate: Option<String>,

    /// Deinterlace the video
    #[arg(long)]
    pub deinterlace: bool,

    /// Report black bars with cropdetect; the crop stage keeps the full frame
    #[arg(long)]
    pub crop: bool,

    /// Channel count for re-encoded audio
    #[arg(long, value_name = "N")]
    pub audio_channels: Option<u32>,

    /// Bitrate for re-encoded audio (default: 384k)
    #[arg(long, value_name = "RATE")]
    pub audio_bitrate: Option<String>,

    /// Sample rate for re-encoded audio in Hz
    #[arg(long, value_name = "HZ")]
    pub audio_samplerate: Option<u32>,

    /// Scale the video, e.g. 1920x1080
    #[arg(long, value_name = "WxH")]
    pub resize: Option<String>,

    /// Tone-map HDR video to SDR
    #[arg(long)]
    pub hdr_to_sdr: bool,

    /// Encode only the first 60 seconds
    #[arg(long)]
    pub preview: bool,

    /// Colour conversion target: bt709 or bt2020
    #[arg(long)]
    pub colorspace: Option<String>,

    /// Shift re-encoded audio by milliseconds; negative values trim
    #[arg(long, value_name = "MS", allow_negative_numbers = true)]
    pub audio_delay: Option<i64>,

    /// Do not copy chapters
    #[arg(long)]
    pub no_chapters: bool,

    /// Encoder thread count (default: automatic)
    #[arg(long, value_name = "N")]
    pub threads: Option<u32>,

    /// Scheduling priority: normal or low
    #[arg(long)]
    pub priority: Option<String>,

    /// Replace the output file if it exists
    #[arg(long)]
    pub overwrite: bool,

    /// Print the encoder command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, print the command plan as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Audio streams to keep, e.g. "1,2"; skips the audio prompt
    #[arg(long, value_name = "LIST")]
    pub audio_streams: Option<String>,

    /// Subtitle streams to keep, e.g. "3 4" or "none"; skips the subtitle prompt
    #[arg(long, value_name = "LIST")]
    pub subtitle_streams: Option<String>,

    /// Audio encoding: copy, ac3, aac, mp3 or any encoder name
    #[arg(long, value_name = "CODEC")]
    pub audio_codec: Option<String>,
}

impl ConvertArgs {
    /// Answers that bypass interactive questions
    pub fn selection_answers(&self) -> SelectionAnswers {
        SelectionAnswers {
            audio_streams: self.audio_streams.clone(),
            subtitle_streams: self.subtitle_streams.clone(),
            audio_codec: self.audio_codec.clone(),
        }
    }
}
