//! Option parsing and validation into a `ConversionRequest`
//!
//! Values come from flags first, then the `[defaults]` config section, then
//! built-in defaults. Checks run in a fixed order and the first failure wins.

use std::path::PathBuf;

use tracing::debug;

use crate::adapters::AppConfig;
use crate::cli::args::ConvertArgs;
use crate::domain::model::*;
use crate::domain::rules::UnitConverter;
use crate::error::{ConvertError, ConvertResult};

pub const DEFAULT_PRESET: &str = "medium";
pub const DEFAULT_CODEC: &str = "h265";
pub const DEFAULT_AUDIO_BITRATE: &str = "384k";
pub const DEFAULT_PRIORITY: &str = "normal";

/// Builds the immutable request for one run
pub struct RequestParser;

impl RequestParser {
    pub fn parse(args: &ConvertArgs, config: &AppConfig) -> ConvertResult<ConversionRequest> {
        let defaults = &config.defaults;

        let input = required(args.input.as_ref(), "--input")?;
        let output = required(args.output.as_ref(), "--output")?;

        if !input.exists() {
            return Err(ConvertError::InputNotFound {
                path: input.display().to_string(),
            });
        }
        if output.exists() && !args.overwrite {
            return Err(ConvertError::OutputExists {
                path: output.display().to_string(),
            });
        }

        let priority = Priority::parse(pick(&args.priority, &defaults.priority, DEFAULT_PRIORITY))?;
        let colorspace = args.colorspace.as_deref().map(Colorspace::parse).transpose()?;
        let codec = VideoCodec::parse(pick(&args.codec, &defaults.codec, DEFAULT_CODEC))?;

        let preset = pick(&args.speed, &defaults.speed, DEFAULT_PRESET).to_lowercase();
        if !ENCODER_PRESETS.contains(&preset.as_str()) {
            return Err(ConvertError::InvalidArgument {
                message: format!(
                    "unknown speed '{}'. Expected one of: {}",
                    preset,
                    ENCODER_PRESETS.join(", ")
                ),
            });
        }

        let max_size = args
            .max_size
            .as_deref()
            .map(UnitConverter::parse_size)
            .transpose()?;

        let request = ConversionRequest {
            input,
            output,
            quality: args.quality.clone(),
            configured_quality: defaults.quality.clone(),
            crf: args.crf,
            target_bitrate: args.target_bitrate.clone(),
            preset,
            codec,
            keep_original_audio: args.keep_original_audio,
            no_subtitles: args.no_subtitles,
            no_chapters: args.no_chapters,
            normalize_loudness: args.normalize_loudness,
            overwrite: args.overwrite,
            preview: args.preview,
            dry_run: args.dry_run,
            deinterlace: args.deinterlace,
            crop: args.crop,
            hdr_to_sdr: args.hdr_to_sdr,
            audio_channels: args.audio_channels,
            audio_bitrate: pick(&args.audio_bitrate, &defaults.audio_bitrate, DEFAULT_AUDIO_BITRATE)
                .to_string(),
            audio_samplerate: args.audio_samplerate,
            audio_delay_ms: args.audio_delay,
            colorspace,
            resize: args.resize.clone(),
            threads: args.threads.or(defaults.threads),
            priority,
            max_size,
        };

        debug!("Parsed request: {:?}", request);
        Ok(request)
    }
}

fn required(value: Option<&PathBuf>, name: &str) -> ConvertResult<PathBuf> {
    value.cloned().ok_or_else(|| ConvertError::MissingRequiredArgument {
        name: name.to_string(),
    })
}

fn pick<'a>(flag: &'a Option<String>, configured: &'a Option<String>, fallback: &'a str) -> &'a str {
    flag.as_deref()
        .or(configured.as_deref())
        .unwrap_or(fallback)
}
