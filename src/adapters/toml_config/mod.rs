// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConvertError, ConvertResult};

/// Config file picked up from the working directory when none is named
pub const DEFAULT_CONFIG_FILE: &str = "encodeforge.toml";

/// File configuration; every field is optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub tools: ToolsSection,
    pub defaults: DefaultsSection,
    /// File the values came from; `None` for built-in defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// External program locations
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsSection {
    pub ffmpeg: String,
    pub ffprobe: String,
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

/// Defaults for flags not given on the command line
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsSection {
    pub quality: Option<String>,
    pub speed: Option<String>,
    pub codec: Option<String>,
    pub audio_bitrate: Option<String>,
    pub threads: Option<u32>,
    pub priority: Option<String>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicitly named file must exist and parse. Without one, the
    /// default file in the working directory is used when present.
    pub fn load(explicit: Option<&Path>) -> ConvertResult<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(&fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Read and parse one config file
    pub fn from_file(path: &Path) -> ConvertResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConvertError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;

        let mut config = Self::from_toml_str(&content).map_err(|e| ConvertError::Config {
            message: format!("{}: {}", path.display(), e),
        })?;

        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse TOML content
    pub fn from_toml_str(content: &str) -> ConvertResult<Self> {
        toml::from_str(content).map_err(|e| ConvertError::Config {
            message: e.to_string(),
        })
    }
}
