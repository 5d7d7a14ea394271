//! Stream map list construction

use crate::domain::model::{AudioTrackPlan, SubtitleSelection};

/// First video stream of the first input
pub const VIDEO_MAP: &str = "0:v:0";

/// Stream mapper for building `-map` arguments
pub struct StreamMapper;

impl StreamMapper {
    /// Video first, then audio in output position order, then subtitles
    /// in selection order
    pub fn map_args(audio: &[AudioTrackPlan], subtitles: &SubtitleSelection) -> Vec<String> {
        let mut args = vec!["-map".to_string(), VIDEO_MAP.to_string()];

        let mut tracks: Vec<&AudioTrackPlan> = audio.iter().collect();
        tracks.sort_by_key(|t| t.output_position);
        for track in tracks {
            args.push("-map".to_string());
            args.push(format!("0:{}", track.source_index));
        }

        for index in subtitles.indexes() {
            args.push("-map".to_string());
            args.push(format!("0:{}", index));
        }

        args
    }
}
