//! Error handling module for EncodeForge

use thiserror::Error;

/// Main error type for EncodeForge operations
///
/// Every variant is fatal: the pipeline stops before any external process
/// is launched and the binary exits with status 1.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// A required flag was not supplied
    #[error("Missing required argument: {name}")]
    MissingRequiredArgument { name: String },

    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    /// Output file exists and overwriting was not requested
    #[error("Output file already exists: {path} (use --overwrite to replace it)")]
    OutputExists { path: String },

    /// Quality tier outside ultra/high/medium/low
    #[error("Unknown quality level: {value}. Expected ultra, high, medium or low")]
    UnknownQualityLevel { value: String },

    /// Colorspace target outside bt709/bt2020
    #[error("Unknown colorspace: {value}. Expected bt709 or bt2020")]
    UnknownColorspace { value: String },

    /// Priority outside normal/low
    #[error("Invalid priority: {value}. Expected normal or low")]
    InvalidPriority { value: String },

    /// Size string that could not be converted to bytes
    #[error("Invalid size: {value}. Expected a number with optional GB, MB, KB or B suffix")]
    InvalidSizeUnit { value: String },

    /// Flag not recognised by the parser
    #[error("Unknown option: {option}")]
    UnknownOption { option: String },

    /// Flag value that failed to parse
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Configuration file error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Metadata prober could not be run
    #[error("Failed to probe media file: {message}")]
    Probe { message: String },

    /// Interactive input could not be read
    #[error("Failed to read selection: {message}")]
    Prompt { message: String },

    /// Encoder could not be launched or reported failure
    #[error("Encoder failed: {message}")]
    Encoder { message: String },
}

impl ConvertError {
    /// Whether the usage line should accompany the message
    pub fn wants_usage(&self) -> bool {
        matches!(
            self,
            ConvertError::UnknownOption { .. } | ConvertError::MissingRequiredArgument { .. }
        )
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Result type alias for EncodeForge operations
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;
