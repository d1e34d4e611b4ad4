//! User-tunable configuration.
//!
//! Settings are stored as TOML with kebab-case keys. Every field has a default,
//! so partial files are accepted:
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [navigation]
//! edge-activation-width = 24.0
//! completion-duration-ms = 200
//! ```

use crate::helpers::{load_toml, save_toml};
use anyhow::Error;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub logging: LoggingSettings,
    pub navigation: NavigationSettings,
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings, Error> {
        load_toml(path)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        save_toml(self, path)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggingSettings {
    pub enabled: bool,
    /// Default filter when `RUST_LOG` isn't set.
    pub level: String,
    /// Number of run logs to keep, `0` keeps everything.
    pub max_files: usize,
    pub directory: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            enabled: true,
            level: "info".to_string(),
            max_files: 3,
            directory: PathBuf::from("logs"),
        }
    }
}

/// Tuning constants of the navigation stack and its back-swipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NavigationSettings {
    /// Width of the leading-edge strip where a back-swipe may start.
    pub edge_activation_width: f32,
    /// Progress past which releasing the swipe pops the screen.
    pub commit_progress: f32,
    /// Horizontal release velocity (units/ms) past which the swipe pops.
    pub commit_velocity: f32,
    pub completion_duration_ms: u64,
    pub slide_duration_ms: u64,
    /// How far the covered screen is pushed back while another one is on top.
    pub peek_distance: f32,
    pub bar_height: u32,
}

impl NavigationSettings {
    pub fn completion_duration(&self) -> Duration {
        Duration::from_millis(self.completion_duration_ms)
    }

    pub fn slide_duration(&self) -> Duration {
        Duration::from_millis(self.slide_duration_ms)
    }
}

impl Default for NavigationSettings {
    fn default() -> Self {
        NavigationSettings {
            edge_activation_width: 30.0,
            commit_progress: 0.75,
            commit_velocity: 2.0,
            completion_duration_ms: 250,
            slide_duration_ms: 350,
            peek_distance: crate::transition::PEEK_DISTANCE,
            bar_height: 44,
        }
    }
}
