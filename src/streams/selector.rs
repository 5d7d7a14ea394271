//! Stream selection over the discovered audio and subtitle streams

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::domain::model::*;
use crate::error::ConvertResult;
use crate::ports::{SelectionPort, StreamChoice};

/// Parse a typed answer such as `2,3`, `2 3` or `none`
pub fn parse_choice(input: &str) -> StreamChoice {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return StreamChoice::Default;
    }
    if trimmed.eq_ignore_ascii_case("none") {
        return StreamChoice::Indexes(Vec::new());
    }

    let indexes = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.parse::<u32>() {
            Ok(index) => Some(index),
            Err(_) => {
                warn!("Ignoring '{}': not a stream index", token);
                None
            }
        })
        .collect();

    StreamChoice::Indexes(indexes)
}

/// Keep offered indexes in the order chosen, dropping repeats and unknowns
pub fn normalize_selection(chosen: &[u32], offered: &[StreamDescriptor]) -> Vec<u32> {
    let available: HashSet<u32> = offered.iter().map(|s| s.index).collect();
    let mut seen = HashSet::new();

    chosen
        .iter()
        .copied()
        .filter(|index| {
            if !available.contains(index) {
                warn!("Stream {} is not among the offered streams, skipping", index);
                return false;
            }
            seen.insert(*index)
        })
        .collect()
}

/// Drives the selection port for each media kind
pub struct StreamSelector<'a> {
    port: &'a mut dyn SelectionPort,
}

impl<'a> StreamSelector<'a> {
    pub fn new(port: &'a mut dyn SelectionPort) -> Self {
        Self { port }
    }

    /// Select audio streams and the global encoding choice.
    ///
    /// A blank answer keeps every offered stream. The encoding question is
    /// skipped when original audio is kept or nothing was selected.
    pub fn select_audio(
        &mut self,
        streams: &[StreamDescriptor],
        keep_original: bool,
    ) -> ConvertResult<AudioSelection> {
        if streams.is_empty() {
            info!("No audio streams to choose from");
            return Ok(AudioSelection {
                indexes: Vec::new(),
                codec: AudioCodecChoice::Copy,
            });
        }

        let indexes = match self.port.choose(MediaKind::Audio, streams)? {
            StreamChoice::Default => streams.iter().map(|s| s.index).collect(),
            StreamChoice::Indexes(chosen) => normalize_selection(&chosen, streams),
        };

        let codec = if keep_original || indexes.is_empty() {
            AudioCodecChoice::Copy
        } else {
            let answer = self.port.choose_one(
                "Audio encoding",
                &AudioCodecChoice::OPTIONS,
                AudioCodecChoice::OPTIONS[0],
            )?;
            AudioCodecChoice::from_answer(&answer)
        };

        debug!("Audio selection: {:?} ({})", indexes, codec);
        Ok(AudioSelection { indexes, codec })
    }

    /// Select subtitle streams; a blank or empty answer suppresses subtitles
    pub fn select_subtitles(
        &mut self,
        streams: &[StreamDescriptor],
        suppressed: bool,
    ) -> ConvertResult<SubtitleSelection> {
        if suppressed {
            return Ok(SubtitleSelection::None);
        }
        if streams.is_empty() {
            info!("No subtitle streams to choose from");
            return Ok(SubtitleSelection::None);
        }

        let selection = match self.port.choose(MediaKind::Subtitle, streams)? {
            StreamChoice::Default => SubtitleSelection::None,
            StreamChoice::Indexes(chosen) => {
                SubtitleSelection::from_indexes(normalize_selection(&chosen, streams))
            }
        };

        debug!("Subtitle selection: {:?}", selection);
        Ok(selection)
    }
}
