// Convert interactor - Orchestrates the transcoding use case

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::model::*;
use crate::domain::rules::*;
use crate::error::ConvertResult;
use crate::planner::{CommandAssembler, CommandInputs, FilterChainBuilder};
use crate::ports::*;
use crate::streams::{AudioMapper, StreamSelector};

/// Everything resolved for one run, ready to print or execute
#[derive(Debug, Clone, Serialize)]
pub struct ConversionPlan {
    pub request: ConversionRequest,
    pub video: VideoEncodeSpec,
    /// CRF derived from quality or given explicitly, even in bitrate mode
    pub crf: u8,
    pub audio_tracks: Vec<AudioTrackPlan>,
    pub audio_codec: AudioCodecChoice,
    pub subtitles: SubtitleSelection,
    pub filters: FilterChain,
    pub command: CommandPlan,
    pub advisories: Vec<Advisory>,
}

/// Interactor for the convert use case
pub struct ConvertInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    selection: Box<dyn SelectionPort>,
    ffmpeg_program: String,
}

impl ConvertInteractor {
    /// Create new convert interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        selection: Box<dyn SelectionPort>,
        ffmpeg_program: impl Into<String>,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            selection,
            ffmpeg_program: ffmpeg_program.into(),
        }
    }

    /// Run the forward pipeline up to an assembled command.
    ///
    /// Nothing is executed here. Rate control is resolved before the input
    /// is probed so an invalid quality fails without touching the prober.
    pub async fn plan(&mut self, request: &ConversionRequest) -> ConvertResult<ConversionPlan> {
        info!("Planning conversion of {}", request.input.display());

        let resolved = RateControlResolver::resolve(request)?;
        let video = RateControlResolver::video_spec(request, &resolved);

        let mut advisories = Vec::new();
        advisories.extend(resolved.advisory.clone());
        if let Some(bytes) = request.max_size {
            advisories.push(Advisory::SizeLimitTruncation { bytes });
        }

        let audio_streams = self.discover(request, MediaKind::Audio).await;
        let subtitle_streams = if request.no_subtitles {
            debug!("Subtitles suppressed, skipping subtitle probe");
            Vec::new()
        } else {
            self.discover(request, MediaKind::Subtitle).await
        };

        let (audio_selection, subtitles) = {
            let mut selector = StreamSelector::new(&mut *self.selection);
            let audio = selector.select_audio(&audio_streams, request.keep_original_audio)?;
            let subtitles = selector.select_subtitles(&subtitle_streams, request.no_subtitles)?;
            (audio, subtitles)
        };

        let audio_tracks = AudioMapper::build_plans(&audio_selection, request);
        let filters = FilterChainBuilder::build(request);

        let command = CommandAssembler::new(self.ffmpeg_program.clone()).assemble(&CommandInputs {
            request,
            video: &video,
            filters: &filters,
            audio: &audio_tracks,
            subtitles: &subtitles,
        });

        Ok(ConversionPlan {
            request: request.clone(),
            video,
            crf: resolved.crf,
            audio_tracks,
            audio_codec: audio_selection.codec,
            subtitles,
            filters,
            command,
            advisories,
        })
    }

    /// Hand the assembled command to the execution port
    pub async fn execute(&self, plan: &ConversionPlan) -> ConvertResult<()> {
        info!("Executing {}", plan.command.program);
        self.execute_port.execute(&plan.command).await
    }

    async fn discover(&self, request: &ConversionRequest, kind: MediaKind) -> Vec<StreamDescriptor> {
        match self.probe_port.probe_streams(&request.input, kind).await {
            Ok(streams) => {
                debug!("Found {} {} stream(s)", streams.len(), kind);
                streams
            }
            Err(e) => {
                warn!("Could not list {} streams: {}", kind, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ScriptedSelection;
    use crate::error::ConvertError;
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    struct CannedProbe {
        audio: Vec<StreamDescriptor>,
        subtitles: Vec<StreamDescriptor>,
        calls: Mutex<Vec<MediaKind>>,
    }

    #[async_trait]
    impl ProbePort for CannedProbe {
        async fn probe_streams(
            &self,
            _input: &Path,
            kind: MediaKind,
        ) -> ConvertResult<Vec<StreamDescriptor>> {
            self.calls.lock().unwrap().push(kind);
            Ok(match kind {
                MediaKind::Audio => self.audio.clone(),
                MediaKind::Subtitle => self.subtitles.clone(),
                MediaKind::Video => Vec::new(),
            })
        }
    }

    struct FailingProbe;

    #[async_trait]
    impl ProbePort for FailingProbe {
        async fn probe_streams(
            &self,
            _input: &Path,
            _kind: MediaKind,
        ) -> ConvertResult<Vec<StreamDescriptor>> {
            Err(ConvertError::Probe {
                message: "ffprobe missing".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingExecutor {
        runs: Mutex<Vec<Vec<String>>>,
    }

    #[async_trait]
    impl ExecutePort for RecordingExecutor {
        async fn execute(&self, plan: &CommandPlan) -> ConvertResult<()> {
            self.runs.lock().unwrap().push(plan.argv());
            Ok(())
        }
    }

    fn probe() -> Arc<CannedProbe> {
        Arc::new(CannedProbe {
            audio: vec![
                StreamDescriptor::new(1, MediaKind::Audio),
                StreamDescriptor::new(2, MediaKind::Audio),
                StreamDescriptor::new(3, MediaKind::Audio),
            ],
            subtitles: vec![
                StreamDescriptor::new(4, MediaKind::Subtitle),
                StreamDescriptor::new(5, MediaKind::Subtitle),
            ],
            calls: Mutex::new(Vec::new()),
        })
    }

    fn request() -> ConversionRequest {
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

    fn interactor(
        probe: Arc<dyn ProbePort>,
        executor: Arc<RecordingExecutor>,
        selection: ScriptedSelection,
    ) -> ConvertInteractor {
        ConvertInteractor::new(probe, executor, Box::new(selection), "ffmpeg")
    }

    #[tokio::test]
    async fn test_plan_follows_selection_order() {
        let selection = ScriptedSelection::new()
            .with_choice(MediaKind::Audio, "3,2")
            .with_choice(MediaKind::Subtitle, "5")
            .with_answer("aac");
        let mut interactor = interactor(probe(), Arc::default(), selection);

        let plan = interactor.plan(&request()).await.unwrap();

        let sources: Vec<(u32, usize)> = plan
            .audio_tracks
            .iter()
            .map(|t| (t.source_index, t.output_position))
            .collect();
        assert_eq!(sources, vec![(3, 0), (2, 1)]);
        assert_eq!(plan.subtitles, SubtitleSelection::Streams(vec![5]));

        let maps = plan.command.group(GroupKind::StreamMaps).unwrap();
        assert_eq!(
            maps.args,
            vec!["-map", "0:v:0", "-map", "0:3", "-map", "0:2", "-map", "0:5"]
        );
        assert!(plan.advisories.is_empty());
    }

    #[tokio::test]
    async fn test_no_subtitles_skips_probe_and_prompt() {
        let probe = probe();
        let selection = ScriptedSelection::new()
            .with_choice(MediaKind::Audio, "")
            .with_answer("");
        let mut interactor = interactor(probe.clone(), Arc::default(), selection);

        let mut request = request();
        request.no_subtitles = true;
        let plan = interactor.plan(&request).await.unwrap();

        assert_eq!(*probe.calls.lock().unwrap(), vec![MediaKind::Audio]);
        assert_eq!(plan.subtitles, SubtitleSelection::None);
        assert_eq!(plan.audio_tracks.len(), 3);
        assert_eq!(plan.audio_codec, AudioCodecChoice::Copy);
    }

    #[tokio::test]
    async fn test_invalid_quality_fails_before_probing() {
        let probe = probe();
        let mut interactor = interactor(probe.clone(), Arc::default(), ScriptedSelection::new());

        let mut request = request();
        request.quality = Some("extreme".to_string());

        assert!(matches!(
            interactor.plan(&request).await,
            Err(ConvertError::UnknownQualityLevel { .. })
        ));
        assert!(probe.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_probe_failure_means_no_streams() {
        let mut interactor =
            interactor(Arc::new(FailingProbe), Arc::default(), ScriptedSelection::new());

        let plan = interactor.plan(&request()).await.unwrap();
        assert!(plan.audio_tracks.is_empty());
        assert_eq!(plan.subtitles, SubtitleSelection::None);
        assert_eq!(
            plan.command.group(GroupKind::Subtitles).unwrap().args,
            vec!["-sn"]
        );
    }

    #[tokio::test]
    async fn test_advisories_are_collected() {
        let selection = ScriptedSelection::new()
            .with_choice(MediaKind::Audio, "1")
            .with_choice(MediaKind::Subtitle, "")
            .with_answer("copy");
        let mut interactor = interactor(probe(), Arc::default(), selection);

        let mut request = request();
        request.crf = Some(20);
        request.target_bitrate = Some("8M".to_string());
        request.max_size = Some(1024);
        let plan = interactor.plan(&request).await.unwrap();

        assert_eq!(
            plan.advisories,
            vec![
                Advisory::RateControlConflict {
                    target_bitrate: "8M".to_string(),
                    crf: 20
                },
                Advisory::SizeLimitTruncation { bytes: 1024 },
            ]
        );
        assert!(!plan.command.argv().contains(&"-crf".to_string()));
    }

    #[tokio::test]
    async fn test_execute_hands_command_to_port() {
        let executor = Arc::new(RecordingExecutor::default());
        let selection = ScriptedSelection::new()
            .with_choice(MediaKind::Audio, "none")
            .with_choice(MediaKind::Subtitle, "none");
        let mut interactor = interactor(probe(), executor.clone(), selection);

        let plan = interactor.plan(&request()).await.unwrap();
        interactor.execute(&plan).await.unwrap();

        let runs = executor.runs.lock().unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].first().map(String::as_str), Some("ffmpeg"));
        assert_eq!(runs[0].last().map(String::as_str), Some("out.mkv"));
    }
}
