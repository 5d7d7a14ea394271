//! EncodeForge library
//!
//! Turns transcoding preferences into a single, correctly ordered ffmpeg
//! invocation. Streams are discovered with ffprobe and selected
//! interactively or from presets; the encoder is launched with a direct
//! argument vector.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod output;
pub mod planner;
pub mod ports;
pub mod probe;
pub mod streams;
pub mod utils;

// Re-export commonly used types
pub use app::{ConversionPlan, ConvertInteractor};
pub use domain::model::{CommandPlan, ConversionRequest, StreamDescriptor};
pub use error::{ConvertError, ConvertResult};
