// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod preset_selection;
pub mod probe_ffprobe;
pub mod scripted_selection;
pub mod terminal_prompt;
pub mod toml_config;

// Re-export adapters
pub use exec_ffmpeg::FFmpegAdapter;
pub use preset_selection::{PresetSelection, SelectionAnswers};
pub use probe_ffprobe::FFprobeAdapter;
pub use scripted_selection::ScriptedSelection;
pub use terminal_prompt::TerminalPrompt;
pub use toml_config::{AppConfig, DefaultsSection, ToolsSection, DEFAULT_CONFIG_FILE};
