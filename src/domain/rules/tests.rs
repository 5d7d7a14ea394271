// Unit tests for business rules

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::domain::model::*;
    use crate::domain::rules::*;
    use crate::error::ConvertError;

    fn create_test_request() -> ConversionRequest {
        ConversionRequest {
            input: PathBuf::from("in.mkv"),
            output: PathBuf::from("out.mkv"),
            quality: None,
            configured_quality: None,
            crf: None,
            target_bitrate: None,
            preset: "medium".to_string(),
            codec: VideoCodec::H265,
            keep_original_audio: false,
            no_subtitles: false,
            no_chapters: false,
            normalize_loudness: false,
            overwrite: false,
            preview: false,
            dry_run: false,
            deinterlace: false,
            crop: false,
            hdr_to_sdr: false,
            audio_channels: None,
            audio_bitrate: "384k".to_string(),
            audio_samplerate: None,
            audio_delay_ms: None,
            colorspace: None,
            resize: None,
            threads: None,
            priority: Priority::Normal,
            max_size: None,
        }
    }

    #[test]
    fn test_quality_tiers() {
        for (quality, crf) in [("ultra", 16), ("high", 18), ("medium", 22), ("low", 28)] {
            assert_eq!(
                RateControlResolver::crf_for_quality(Some(quality)).unwrap(),
                crf,
                "quality {}",
                quality
            );
        }
    }

    #[test]
    fn test_unset_quality_defaults_to_18() {
        assert_eq!(RateControlResolver::crf_for_quality(None).unwrap(), 18);

        let resolved = RateControlResolver::resolve(&create_test_request()).unwrap();
        assert_eq!(resolved.rate_control, RateControl::ConstantQuality { crf: 18 });
        assert!(resolved.advisory.is_none());
    }

    #[test]
    fn test_unknown_quality_fails() {
        let mut request = create_test_request();
        request.quality = Some("insane".to_string());

        assert!(matches!(
            RateControlResolver::resolve(&request),
            Err(ConvertError::UnknownQualityLevel { .. })
        ));
    }

    #[test]
    fn test_explicit_crf_overrides_any_quality() {
        let mut request = create_test_request();
        request.crf = Some(24);

        for quality in ["ultra", "low", "not-a-tier"] {
            request.quality = Some(quality.to_string());
            let resolved = RateControlResolver::resolve(&request).unwrap();
            assert_eq!(resolved.rate_control, RateControl::ConstantQuality { crf: 24 });
        }
    }

    #[test]
    fn test_target_bitrate_wins_with_advisory() {
        let mut request = create_test_request();
        request.quality = Some("ultra".to_string());
        request.target_bitrate = Some("8M".to_string());

        let resolved = RateControlResolver::resolve(&request).unwrap();
        assert_eq!(
            resolved.rate_control,
            RateControl::Bitrate {
                target: "8M".to_string()
            }
        );
        assert_eq!(resolved.crf, 16);
        assert_eq!(
            resolved.advisory,
            Some(Advisory::RateControlConflict {
                target_bitrate: "8M".to_string(),
                crf: 16
            })
        );

        let spec = RateControlResolver::video_spec(&request, &resolved);
        assert!(!spec.to_args().contains(&"-crf".to_string()));
    }

    #[test]
    fn test_target_bitrate_alone_has_no_advisory() {
        let mut request = create_test_request();
        request.target_bitrate = Some("6000k".to_string());

        let resolved = RateControlResolver::resolve(&request).unwrap();
        assert!(resolved.advisory.is_none());
    }

    #[test]
    fn test_configured_quality_applies_without_conflict() {
        let mut request = create_test_request();
        request.configured_quality = Some("low".to_string());

        let resolved = RateControlResolver::resolve(&request).unwrap();
        assert_eq!(resolved.crf, 28);

        request.target_bitrate = Some("6000k".to_string());
        let resolved = RateControlResolver::resolve(&request).unwrap();
        assert_eq!(resolved.crf, 28);
        assert!(resolved.advisory.is_none());
    }

    #[test]
    fn test_command_line_quality_beats_configured() {
        let mut request = create_test_request();
        request.quality = Some("ultra".to_string());
        request.configured_quality = Some("low".to_string());

        assert_eq!(RateControlResolver::resolve(&request).unwrap().crf, 16);
    }

    #[test]
    fn test_video_spec_uses_10_bit_output() {
        let mut request = create_test_request();
        request.threads = Some(8);
        let resolved = RateControlResolver::resolve(&request).unwrap();
        let spec = RateControlResolver::video_spec(&request, &resolved);

        assert_eq!(spec.pixel_format, "yuv420p10le");
        assert_eq!(spec.threads, Some(8));
        assert_eq!(spec.codec, VideoCodec::H265);
    }

    #[test]
    fn test_size_conversion() {
        assert_eq!(UnitConverter::parse_size("2GB").unwrap(), 2_147_483_648);
        assert_eq!(UnitConverter::parse_size("500MB").unwrap(), 524_288_000);
        assert_eq!(UnitConverter::parse_size("100KB").unwrap(), 102_400);
        assert_eq!(UnitConverter::parse_size("100B").unwrap(), 100);
        assert_eq!(UnitConverter::parse_size("12345").unwrap(), 12_345);
    }

    #[test]
    fn test_size_conversion_is_case_insensitive() {
        assert_eq!(UnitConverter::parse_size("1gb").unwrap(), 1_073_741_824);
        assert_eq!(UnitConverter::parse_size("3 Mb").unwrap(), 3_145_728);
    }

    #[test]
    fn test_invalid_sizes_fail() {
        for value in ["", "GB", "abc", "1.5GB", "10TB", "-5MB", "99999999999999999999GB"] {
            assert!(
                matches!(
                    UnitConverter::parse_size(value),
                    Err(ConvertError::InvalidSizeUnit { .. })
                ),
                "value {:?}",
                value
            );
        }
    }

    #[test]
    fn test_format_size() {
        assert_eq!(UnitConverter::format_size(512), "512 B");
        assert_eq!(UnitConverter::format_size(2048), "2.0 KB");
        assert_eq!(UnitConverter::format_size(2_147_483_648), "2.0 GB");
    }
}
