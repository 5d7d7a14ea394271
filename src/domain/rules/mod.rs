// Domain rules - Business logic and policies

use tracing::debug;

use crate::domain::model::*;
use crate::error::{ConvertError, ConvertResult};

/// CRF used when neither quality nor CRF is given
pub const DEFAULT_CRF: u8 = 18;

/// Rate-control policy: CRF beats quality tier, target bitrate beats both
pub struct RateControlResolver;

/// Outcome of rate-control resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRateControl {
    /// The single active mode
    pub rate_control: RateControl,
    /// CRF derived from the request, computed even in bitrate mode
    pub crf: u8,
    pub advisory: Option<Advisory>,
}

impl RateControlResolver {
    /// Map a quality tier to its CRF
    pub fn crf_for_quality(quality: Option<&str>) -> ConvertResult<u8> {
        let Some(quality) = quality else {
            return Ok(DEFAULT_CRF);
        };

        match quality.trim().to_lowercase().as_str() {
            "ultra" => Ok(16),
            "high" => Ok(18),
            "medium" => Ok(22),
            "low" => Ok(28),
            _ => Err(ConvertError::UnknownQualityLevel {
                value: quality.to_string(),
            }),
        }
    }

    /// Resolve the effective rate-control mode for a request
    pub fn resolve(request: &ConversionRequest) -> ConvertResult<ResolvedRateControl> {
        let crf = match request.crf {
            Some(crf) => crf,
            None => Self::crf_for_quality(
                request
                    .quality
                    .as_deref()
                    .or(request.configured_quality.as_deref()),
            )?,
        };

        let Some(ref target) = request.target_bitrate else {
            debug!("Rate control: CRF {}", crf);
            return Ok(ResolvedRateControl {
                rate_control: RateControl::ConstantQuality { crf },
                crf,
                advisory: None,
            });
        };

        // Only settings typed for this run count as a conflict
        let advisory = if request.crf.is_some() || request.quality.is_some() {
            Some(Advisory::RateControlConflict {
                target_bitrate: target.clone(),
                crf,
            })
        } else {
            None
        };

        debug!("Rate control: bitrate {} (computed CRF {})", target, crf);
        Ok(ResolvedRateControl {
            rate_control: RateControl::Bitrate {
                target: target.clone(),
            },
            crf,
            advisory,
        })
    }

    /// Build the video encoder settings for a request
    pub fn video_spec(
        request: &ConversionRequest,
        resolved: &ResolvedRateControl,
    ) -> VideoEncodeSpec {
        VideoEncodeSpec {
            codec: request.codec,
            preset: request.preset.clone(),
            rate_control: resolved.rate_control.clone(),
            pixel_format: OUTPUT_PIXEL_FORMAT.to_string(),
            threads: request.threads,
        }
    }
}

/// Human size strings to byte counts
pub struct UnitConverter;

/// Suffixes checked longest first so `MB` is not read as `B`
const SIZE_SUFFIXES: [(&str, u64); 4] = [
    ("GB", 1024 * 1024 * 1024),
    ("MB", 1024 * 1024),
    ("KB", 1024),
    ("B", 1),
];

impl UnitConverter {
    /// Parse a size such as `2GB`, `500mb` or `12345` into bytes
    pub fn parse_size(value: &str) -> ConvertResult<u64> {
        let invalid = || ConvertError::InvalidSizeUnit {
            value: value.to_string(),
        };

        let normalized = value.trim().to_uppercase();
        let (number, multiplier) = SIZE_SUFFIXES
            .iter()
            .find_map(|(suffix, multiplier)| {
                normalized
                    .strip_suffix(suffix)
                    .map(|number| (number.trim_end(), *multiplier))
            })
            .unwrap_or((normalized.as_str(), 1));

        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        number
            .parse::<u64>()
            .ok()
            .and_then(|n| n.checked_mul(multiplier))
            .ok_or_else(invalid)
    }

    /// Render bytes with the largest whole binary unit
    pub fn format_size(bytes: u64) -> String {
        for (suffix, multiplier) in SIZE_SUFFIXES {
            if multiplier > 1 && bytes >= multiplier {
                return format!("{:.1} {}", bytes as f64 / multiplier as f64, suffix);
            }
        }
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests;
