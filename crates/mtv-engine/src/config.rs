//! Configuration types for the timeline viewer.
//!
//! Every field has a default, so a missing or partial config file still
//! yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::playhead::{DEFAULT_PLAY_INTERVAL_MS, DEFAULT_PLAY_STEP_SECONDS};
use crate::zoom::ZoomLevel;

/// Default event dictionary file name.
pub const DEFAULT_DICTIONARY_PATH: &str = "event_dictionary.json";

/// Default event timeline file name.
pub const DEFAULT_TIMELINE_PATH: &str = "events_timeline.json";

/// Viewer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Path to the event dictionary document.
    #[serde(default = "default_dictionary_path")]
    pub event_dictionary: PathBuf,

    /// Path to the event timeline document.
    #[serde(default = "default_timeline_path")]
    pub events_timeline: PathBuf,

    /// Simulated seconds advanced per auto-play tick.
    #[serde(default = "default_play_step")]
    pub play_step_seconds: u64,

    /// Real-time milliseconds between auto-play ticks.
    #[serde(default = "default_play_interval")]
    pub play_interval_ms: u64,

    /// Seconds moved by a single manual slider nudge.
    #[serde(default = "default_nudge")]
    pub nudge_seconds: u64,

    /// Zoom level at startup.
    #[serde(default)]
    pub initial_zoom: ZoomLevel,

    /// Events per row in the edit grid.
    #[serde(default = "default_grid_columns")]
    pub grid_columns: usize,
}

fn default_dictionary_path() -> PathBuf {
    PathBuf::from(DEFAULT_DICTIONARY_PATH)
}

fn default_timeline_path() -> PathBuf {
    PathBuf::from(DEFAULT_TIMELINE_PATH)
}

fn default_play_step() -> u64 {
    DEFAULT_PLAY_STEP_SECONDS
}

fn default_play_interval() -> u64 {
    DEFAULT_PLAY_INTERVAL_MS
}

fn default_nudge() -> u64 {
    60
}

fn default_grid_columns() -> usize {
    5
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            event_dictionary: default_dictionary_path(),
            events_timeline: default_timeline_path(),
            play_step_seconds: default_play_step(),
            play_interval_ms: default_play_interval(),
            nudge_seconds: default_nudge(),
            initial_zoom: ZoomLevel::default(),
            grid_columns: default_grid_columns(),
        }
    }
}

impl ViewerConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Reject values the viewer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.play_interval_ms == 0 {
            return Err(ConfigError::Invalid("play_interval_ms must be positive".into()));
        }
        if self.play_step_seconds == 0 {
            return Err(ConfigError::Invalid("play_step_seconds must be positive".into()));
        }
        if self.grid_columns == 0 {
            return Err(ConfigError::Invalid("grid_columns must be positive".into()));
        }
        Ok(())
    }

    /// Override the document paths (CLI flags win over the file).
    #[must_use]
    pub fn with_paths(mut self, dictionary: Option<PathBuf>, timeline: Option<PathBuf>) -> Self {
        if let Some(path) = dictionary {
            self.event_dictionary = path;
        }
        if let Some(path) = timeline {
            self.events_timeline = path;
        }
        self
    }

    /// Auto-play tick interval.
    pub fn play_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.play_interval_ms)
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A value is out of range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}
