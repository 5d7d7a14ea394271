// Scripted selection adapter - Replays canned answers instead of prompting

use std::collections::VecDeque;

use crate::domain::model::{MediaKind, StreamDescriptor};
use crate::error::{ConvertError, ConvertResult};
use crate::ports::{SelectionPort, StreamChoice};
use crate::streams::parse_choice;

/// Selection port fed from a script of typed answers
#[derive(Debug, Default)]
pub struct ScriptedSelection {
    choices: Vec<(MediaKind, String)>,
    answers: VecDeque<String>,
    asked: usize,
}

impl ScriptedSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer to the next stream question for `kind`
    pub fn with_choice(mut self, kind: MediaKind, answer: &str) -> Self {
        self.choices.push((kind, answer.to_string()));
        self
    }

    /// Queue the answer to the next single-value question
    pub fn with_answer(mut self, answer: &str) -> Self {
        self.answers.push_back(answer.to_string());
        self
    }

    /// Number of questions put to this port so far
    pub fn questions_asked(&self) -> usize {
        self.asked
    }
}

impl SelectionPort for ScriptedSelection {
    fn choose(
        &mut self,
        kind: MediaKind,
        _streams: &[StreamDescriptor],
    ) -> ConvertResult<StreamChoice> {
        self.asked += 1;
        let position = self
            .choices
            .iter()
            .position(|(k, _)| *k == kind)
            .ok_or_else(|| ConvertError::Prompt {
                message: format!("no scripted answer for {} streams", kind),
            })?;
        let (_, answer) = self.choices.remove(position);
        Ok(parse_choice(&answer))
    }

    fn choose_one(
        &mut self,
        prompt: &str,
        _options: &[&str],
        default: &str,
    ) -> ConvertResult<String> {
        self.asked += 1;
        let answer = self
            .answers
            .pop_front()
            .ok_or_else(|| ConvertError::Prompt {
                message: format!("no scripted answer for '{}'", prompt),
            })?;

        let answer = answer.trim();
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choices_are_matched_by_kind() {
        let mut port = ScriptedSelection::new()
            .with_choice(MediaKind::Subtitle, "4")
            .with_choice(MediaKind::Audio, "1 2");

        assert_eq!(
            port.choose(MediaKind::Audio, &[]).unwrap(),
            StreamChoice::Indexes(vec![1, 2])
        );
        assert_eq!(
            port.choose(MediaKind::Subtitle, &[]).unwrap(),
            StreamChoice::Indexes(vec![4])
        );
        assert_eq!(port.questions_asked(), 2);
    }

    #[test]
    fn test_exhausted_script_is_a_prompt_error() {
        let mut port = ScriptedSelection::new();
        assert!(matches!(
            port.choose(MediaKind::Audio, &[]),
            Err(ConvertError::Prompt { .. })
        ));
        assert!(matches!(
            port.choose_one("Audio encoding", &[], "copy"),
            Err(ConvertError::Prompt { .. })
        ));
    }

    #[test]
    fn test_blank_answer_uses_default() {
        let mut port = ScriptedSelection::new().with_answer("  ");
        assert_eq!(port.choose_one("Audio encoding", &[], "copy").unwrap(), "copy");
    }
}
