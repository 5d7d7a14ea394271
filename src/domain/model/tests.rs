// Unit tests for domain models

#[cfg(test)]
mod tests {
    use crate::domain::model::*;
    use crate::error::ConvertError;

    #[test]
    fn test_priority_parse() {
        assert_eq!(Priority::parse("normal").unwrap(), Priority::Normal);
        assert_eq!(Priority::parse("LOW").unwrap(), Priority::Low);
        assert!(matches!(
            Priority::parse("realtime"),
            Err(ConvertError::InvalidPriority { .. })
        ));
    }

    #[test]
    fn test_colorspace_parse() {
        assert_eq!(Colorspace::parse("bt709").unwrap(), Colorspace::Bt709);
        assert_eq!(Colorspace::parse("BT2020").unwrap(), Colorspace::Bt2020);
        assert!(matches!(
            Colorspace::parse("bt601"),
            Err(ConvertError::UnknownColorspace { .. })
        ));
    }

    #[test]
    fn test_video_codec_aliases() {
        assert_eq!(VideoCodec::parse("hevc").unwrap(), VideoCodec::H265);
        assert_eq!(VideoCodec::parse("x264").unwrap(), VideoCodec::H264);
        assert_eq!(VideoCodec::H265.encoder(), "libx265");
        assert!(VideoCodec::parse("vp9").is_err());
    }

    #[test]
    fn test_audio_codec_choice_from_answer() {
        assert_eq!(AudioCodecChoice::from_answer(""), AudioCodecChoice::Copy);
        assert_eq!(AudioCodecChoice::from_answer(" AAC "), AudioCodecChoice::Aac);
        assert_eq!(AudioCodecChoice::from_answer("mp3").encoder(), "libmp3lame");
        assert_eq!(
            AudioCodecChoice::from_answer("libopus"),
            AudioCodecChoice::Other("libopus".to_string())
        );
        assert_eq!(AudioCodecChoice::from_answer("libopus").encoder(), "libopus");
    }

    #[test]
    fn test_video_encode_spec_crf_args() {
        let spec = VideoEncodeSpec {
            codec: VideoCodec::H265,
            preset: "slow".to_string(),
            rate_control: RateControl::ConstantQuality { crf: 18 },
            pixel_format: OUTPUT_PIXEL_FORMAT.to_string(),
            threads: Some(4),
        };

        assert_eq!(
            spec.to_args(),
            vec![
                "-c:v", "libx265", "-preset", "slow", "-crf", "18", "-pix_fmt", "yuv420p10le",
                "-threads", "4"
            ]
        );
    }

    #[test]
    fn test_video_encode_spec_bitrate_args_have_no_crf() {
        let spec = VideoEncodeSpec {
            codec: VideoCodec::H264,
            preset: "medium".to_string(),
            rate_control: RateControl::Bitrate {
                target: "5M".to_string(),
            },
            pixel_format: OUTPUT_PIXEL_FORMAT.to_string(),
            threads: None,
        };

        let args = spec.to_args();
        assert!(args.contains(&"-b:v".to_string()));
        assert!(!args.contains(&"-crf".to_string()));
        assert!(!args.contains(&"-threads".to_string()));
    }

    #[test]
    fn test_subtitle_selection_empty_is_none() {
        assert_eq!(SubtitleSelection::from_indexes(vec![]), SubtitleSelection::None);
        assert_eq!(
            SubtitleSelection::from_indexes(vec![5, 3]).indexes(),
            &[5, 3]
        );
    }

    #[test]
    fn test_filter_chain_canonical_order() {
        let chain = FilterChain::from_stages(vec![
            FilterStage::new(StageKind::Colorspace, "colorspace=all=bt709"),
            FilterStage::new(StageKind::Resize, "scale=1280:720"),
            FilterStage::new(StageKind::Crop, "cropdetect"),
            FilterStage::new(StageKind::Crop, "crop"),
            FilterStage::new(StageKind::Deinterlace, "yadif"),
        ]);

        assert_eq!(
            chain.kinds(),
            vec![
                StageKind::Deinterlace,
                StageKind::Crop,
                StageKind::Resize,
                StageKind::Colorspace
            ]
        );
        assert_eq!(
            chain.to_graph().unwrap(),
            "yadif,cropdetect,crop,scale=1280:720,colorspace=all=bt709"
        );
    }

    #[test]
    fn test_empty_filter_chain_has_no_graph() {
        assert!(FilterChain::default().to_graph().is_none());
    }

    #[test]
    fn test_stream_descriptor_describe() {
        let mut stream = StreamDescriptor::new(2, MediaKind::Audio);
        stream.codec_name = Some("truehd".to_string());
        stream.channels = Some(8);
        stream.language = Some("eng".to_string());
        stream.title = Some("Atmos".to_string());
        stream.disposition.default = true;

        assert_eq!(stream.describe(), "[2] truehd, 8 ch, eng \"Atmos\" (default)");
    }

    #[test]
    fn test_command_plan_argv_includes_wrapper() {
        let plan = CommandPlan {
            wrapper: vec!["nice".to_string(), "-n".to_string(), "10".to_string()],
            program: "ffmpeg".to_string(),
            groups: vec![
                ArgGroup {
                    kind: GroupKind::Overwrite,
                    args: vec!["-y".to_string()],
                },
                ArgGroup {
                    kind: GroupKind::Output,
                    args: vec!["out.mkv".to_string()],
                },
            ],
        };

        assert_eq!(plan.argv(), vec!["nice", "-n", "10", "ffmpeg", "-y", "out.mkv"]);
        assert_eq!(plan.encoder_args(), vec!["-y", "out.mkv"]);
    }
}
