//! Configuration for the PatternKit tools.
//!
//! Settings are grouped into sections:
//! - Logging (level filter, JSON output)
//! - Editor (duplicate detection precision, default stroke width)
//! - Replay (output formatting of the replay tool)
//!
//! Files may be JSON or TOML, chosen by extension. Missing sections and
//! fields fall back to their defaults.

use std::path::{Path, PathBuf};

use patternkit_designer::ReducerOptions;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Largest accepted `editor.key_precision`.
pub const MAX_KEY_PRECISION: u32 = 12;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level filter; `RUST_LOG` takes precedence when set
    pub level: String,
    /// Emit one JSON object per event instead of pretty text
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Editor behaviour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Decimal places kept when comparing paths for duplicates
    pub key_precision: u32,
    /// Stroke width of newly drawn open paths
    pub default_line_width: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        let options = ReducerOptions::default();
        Self {
            key_precision: options.key_precision,
            default_line_width: options.default_line_width,
        }
    }
}

impl From<&EditorSettings> for ReducerOptions {
    fn from(editor: &EditorSettings) -> Self {
        ReducerOptions {
            key_precision: editor.key_precision,
            default_line_width: editor.default_line_width,
        }
    }
}

/// Replay tool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaySettings {
    /// Indent the written state
    pub pretty: bool,
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// On-disk formats, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub editor: EditorSettings,
    #[serde(default)]
    pub replay: ReplaySettings,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<platform config dir>/patternkit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("patternkit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Loads `path` if given, else the default location if it exists, else
    /// the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Ok(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    pub fn validate(&self) -> SettingsResult<()> {
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(SettingsError::InvalidSetting {
                key: "logging.level".to_string(),
                reason: format!(
                    "unknown level '{}', expected one of {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }

        if self.editor.key_precision > MAX_KEY_PRECISION {
            return Err(ConfigError::ValueOutOfRange {
                key: "editor.key_precision".to_string(),
                value: self.editor.key_precision.to_string(),
            }
            .into());
        }

        let width = self.editor.default_line_width;
        if !width.is_finite() || width <= 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "editor.default_line_width".to_string(),
                value: width.to_string(),
            }
            .into());
        }

        Ok(())
    }

    pub fn reducer_options(&self) -> ReducerOptions {
        ReducerOptions::from(&self.editor)
    }
}
