//! Stream discovery results, selection and per-track planning

pub mod audio_mapper;
pub mod mapper;
pub mod selector;
pub mod subtitle_processor;

pub use audio_mapper::AudioMapper;
pub use mapper::StreamMapper;
pub use selector::{normalize_selection, parse_choice, StreamSelector};
pub use subtitle_processor::SubtitleProcessor;
