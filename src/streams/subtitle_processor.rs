//! Subtitle stream handling

use tracing::debug;

use crate::domain::model::SubtitleSelection;

/// Turns a subtitle selection into encoder options
pub struct SubtitleProcessor;

impl SubtitleProcessor {
    /// `-sn` when suppressed, otherwise stream copy.
    /// The matching `-map` entries come from the stream mapper.
    pub fn options(selection: &SubtitleSelection) -> Vec<String> {
        let args = match selection {
            SubtitleSelection::None => vec!["-sn".to_string()],
            SubtitleSelection::Streams(_) => vec!["-c:s".to_string(), "copy".to_string()],
        };
        debug!("Subtitle options: {:?}", args);
        args
    }
}
