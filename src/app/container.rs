use std::sync::Arc;

use tracing::debug;

use crate::adapters::{FFmpegAdapter, FFprobeAdapter, PresetSelection, SelectionAnswers, TerminalPrompt};
use crate::app::convert_interactor::ConvertInteractor;
use crate::ports::{ExecutePort, ProbePort, SelectionPort};

/// External programs resolved from flags, environment and config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub ffmpeg: String,
    pub ffprobe: String,
}

pub trait AppContainer {
    fn convert_interactor(&self) -> ConvertInteractor;
}

pub struct DefaultAppContainer {
    tools: ToolPaths,
    answers: SelectionAnswers,
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
}

impl DefaultAppContainer {
    pub fn new(tools: ToolPaths, answers: SelectionAnswers) -> Self {
        debug!("Using {} and {}", tools.ffmpeg, tools.ffprobe);
        let probe_port = Arc::new(FFprobeAdapter::new(tools.ffprobe.clone()));
        let execute_port = Arc::new(FFmpegAdapter::new());

        Self {
            tools,
            answers,
            probe_port,
            execute_port,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn convert_interactor(&self) -> ConvertInteractor {
        let prompt = Box::new(TerminalPrompt::stdio()) as Box<dyn SelectionPort>;
        let selection = PresetSelection::new(self.answers.clone(), prompt);

        ConvertInteractor::new(
            Arc::clone(&self.probe_port),
            Arc::clone(&self.execute_port),
            Box::new(selection),
            self.tools.ffmpeg.clone(),
        )
    }
}
