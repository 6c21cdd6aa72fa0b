//! PatternKit Settings Crate
//!
//! Loads, validates and saves the configuration shared by the PatternKit
//! tools.

pub mod config;
pub mod error;

pub use config::{Config, EditorSettings, LoggingSettings, ReplaySettings, MAX_KEY_PRECISION};
pub use error::{ConfigError, SettingsError, SettingsResult};
