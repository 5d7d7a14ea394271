// Preset selection adapter - Answers questions from command-line presets

use tracing::debug;

use crate::domain::model::{MediaKind, StreamDescriptor};
use crate::error::ConvertResult;
use crate::ports::{SelectionPort, StreamChoice};
use crate::streams::parse_choice;

/// Answers supplied up front on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionAnswers {
    pub audio_streams: Option<String>,
    pub subtitle_streams: Option<String>,
    pub audio_codec: Option<String>,
}

/// Uses preset answers where given and asks the fallback port otherwise
pub struct PresetSelection {
    answers: SelectionAnswers,
    fallback: Box<dyn SelectionPort>,
}

impl PresetSelection {
    pub fn new(answers: SelectionAnswers, fallback: Box<dyn SelectionPort>) -> Self {
        Self { answers, fallback }
    }
}

impl SelectionPort for PresetSelection {
    fn choose(
        &mut self,
        kind: MediaKind,
        streams: &[StreamDescriptor],
    ) -> ConvertResult<StreamChoice> {
        let preset = match kind {
            MediaKind::Audio => self.answers.audio_streams.as_deref(),
            MediaKind::Subtitle => self.answers.subtitle_streams.as_deref(),
            MediaKind::Video => None,
        };

        match preset {
            Some(answer) => {
                debug!("Using preset {} stream answer '{}'", kind, answer);
                Ok(parse_choice(answer))
            }
            None => self.fallback.choose(kind, streams),
        }
    }

    fn choose_one(
        &mut self,
        prompt: &str,
        options: &[&str],
        default: &str,
    ) -> ConvertResult<String> {
        // The audio encoding is the only single-value question
        match self.answers.audio_codec.as_deref().map(str::trim) {
            Some("") => Ok(default.to_string()),
            Some(answer) => {
                debug!("Using preset answer '{}' for {}", answer, prompt);
                Ok(answer.to_string())
            }
            None => self.fallback.choose_one(prompt, options, default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ScriptedSelection;

    #[test]
    fn test_presets_skip_the_fallback() {
        let answers = SelectionAnswers {
            audio_streams: Some("2,1".to_string()),
            subtitle_streams: Some("none".to_string()),
            audio_codec: Some("ac3".to_string()),
        };
        let mut port = PresetSelection::new(answers, Box::new(ScriptedSelection::new()));

        assert_eq!(
            port.choose(MediaKind::Audio, &[]).unwrap(),
            StreamChoice::Indexes(vec![2, 1])
        );
        assert_eq!(
            port.choose(MediaKind::Subtitle, &[]).unwrap(),
            StreamChoice::Indexes(vec![])
        );
        assert_eq!(port.choose_one("Audio encoding", &[], "copy").unwrap(), "ac3");
    }

    #[test]
    fn test_missing_presets_ask_the_fallback() {
        let fallback = ScriptedSelection::new()
            .with_choice(MediaKind::Subtitle, "3")
            .with_answer("mp3");
        let answers = SelectionAnswers {
            audio_streams: Some("1".to_string()),
            ..Default::default()
        };
        let mut port = PresetSelection::new(answers, Box::new(fallback));

        assert_eq!(
            port.choose(MediaKind::Subtitle, &[]).unwrap(),
            StreamChoice::Indexes(vec![3])
        );
        assert_eq!(port.choose_one("Audio encoding", &[], "copy").unwrap(), "mp3");
    }
}
