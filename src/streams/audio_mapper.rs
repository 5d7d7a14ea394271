//! Audio track planning: one encode plan per selected audio stream

use tracing::{debug, info};

use crate::domain::model::*;

/// EBU R128 loudness target applied when normalization is requested
pub const LOUDNORM_FILTER: &str = "loudnorm=I=-14:TP=-1.5:LRA=11";

/// Builds per-track audio plans
pub struct AudioMapper;

impl AudioMapper {
    /// One plan per selected index, positions `0..N-1` in selection order.
    ///
    /// Channel, sample-rate, delay and loudness settings are attached only
    /// when the tracks are re-encoded; copied tracks pass through untouched.
    pub fn build_plans(
        selection: &AudioSelection,
        request: &ConversionRequest,
    ) -> Vec<AudioTrackPlan> {
        let copy = selection.codec.is_copy();

        let plans: Vec<AudioTrackPlan> = selection
            .indexes
            .iter()
            .enumerate()
            .map(|(position, &source_index)| {
                if copy {
                    AudioTrackPlan {
                        source_index,
                        output_position: position,
                        codec: AudioCodecChoice::Copy,
                        bitrate: None,
                        channels: None,
                        sample_rate: None,
                        delay_ms: None,
                        normalize: false,
                    }
                } else {
                    AudioTrackPlan {
                        source_index,
                        output_position: position,
                        codec: selection.codec.clone(),
                        bitrate: Some(request.audio_bitrate.clone()),
                        channels: request.audio_channels,
                        sample_rate: request.audio_samplerate,
                        delay_ms: request.audio_delay_ms.filter(|&ms| ms != 0),
                        normalize: request.normalize_loudness,
                    }
                }
            })
            .collect();

        info!(
            "Planned {} audio track(s) ({})",
            plans.len(),
            selection.codec
        );
        plans
    }

    /// Encoder arguments for every track, in output position order
    pub fn track_args(plans: &[AudioTrackPlan]) -> Vec<String> {
        plans.iter().flat_map(|plan| plan.to_args()).collect()
    }
}

impl AudioTrackPlan {
    /// Per-position encoder arguments (`-c:a:N`, `-b:a:N`, ...)
    pub fn to_args(&self) -> Vec<String> {
        let position = self.output_position;
        let mut args = vec![format!("-c:a:{}", position), self.codec.encoder().to_string()];

        if self.codec.is_copy() {
            return args;
        }

        if let Some(ref bitrate) = self.bitrate {
            args.push(format!("-b:a:{}", position));
            args.push(bitrate.clone());
        }
        if let Some(channels) = self.channels {
            args.push(format!("-ac:a:{}", position));
            args.push(channels.to_string());
        }
        if let Some(rate) = self.sample_rate {
            args.push(format!("-ar:a:{}", position));
            args.push(rate.to_string());
        }
        if let Some(chain) = self.filter_chain() {
            args.push(format!("-filter:a:{}", position));
            args.push(chain);
        }

        debug!("Audio track {} args: {:?}", position, args);
        args
    }

    /// Delay then loudness normalization, comma-joined
    pub fn filter_chain(&self) -> Option<String> {
        let mut filters = Vec::new();

        match self.delay_ms {
            Some(ms) if ms > 0 => filters.push(format!("adelay={}:all=1", ms)),
            Some(ms) if ms < 0 => filters.push(format!(
                "atrim=start={:.3},asetpts=PTS-STARTPTS",
                ms.unsigned_abs() as f64 / 1000.0
            )),
            _ => {}
        }
        if self.normalize {
            filters.push(LOUDNORM_FILTER.to_string());
        }

        if filters.is_empty() {
            None
        } else {
            Some(filters.join(","))
        }
    }
}
