use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::input::{default_bindings, KeyBind, ScrollAction};
use super::labels::LabelConfig;
use crate::scroll::StripConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScrollerConfig {
    #[serde(default)]
    pub strip: StripConfig,
    #[serde(default)]
    pub labels: LabelConfig,
    #[serde(default)]
    pub scrolling: ScrollingConfig,
    #[serde(default)]
    pub graphics: GraphicsConfig,
    #[serde(default = "default_bindings")]
    pub key_bindings: HashMap<ScrollAction, KeyBind>,
    #[serde(default)]
    pub debug: DebugConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollingConfig {
    /// Speed while a scroll key is held, in points per second.
    pub key_speed: f64,
    /// Velocity imparted by a fling, in points per second.
    pub fling_speed: f64,
    /// Exponential velocity decay rate per second.
    pub friction: f64,
    pub wheel_scale: f64,
}

impl Default for ScrollingConfig {
    fn default() -> Self {
        Self {
            key_speed: 600.0,
            fling_speed: 3000.0,
            friction: 2.5,
            wheel_scale: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphicsConfig {
    pub frame_rate_cap: u32,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self { frame_rate_cap: 60 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugConfig {
    pub show_hud: bool,
    /// Also log every recenter at info level.
    #[serde(default)]
    pub log_recenters: bool,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            strip: StripConfig::default(),
            labels: LabelConfig::default(),
            scrolling: ScrollingConfig::default(),
            graphics: GraphicsConfig::default(),
            key_bindings: default_bindings(),
            debug: DebugConfig::default(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "street-scroller")
        .map(|dirs| dirs.config_dir().join("settings.toml"))
}

impl ScrollerConfig {
    pub fn load() -> Self {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Read `path`, writing defaults there if it does not exist yet.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Failed to parse config {}: {e}. Using defaults.", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                let config = Self::default();
                config.save_to(path);
                config
            }
        }
    }

    pub fn save(&self) {
        let Some(path) = config_path() else {
            log::warn!("Could not determine config directory");
            return;
        };
        self.save_to(&path);
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {e}");
                return;
            }
        }

        match toml::to_string_pretty(self) {
            Ok(contents) => {
                if let Err(e) = std::fs::write(path, contents) {
                    log::warn!("Failed to write config: {e}");
                }
            }
            Err(e) => log::warn!("Failed to serialize config: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScrollerConfig::default();
        assert_eq!(config.strip.tile_width, 500.0);
        assert_eq!(config.strip.total_width, 5000.0);
        assert_eq!(config.strip.recenter_fraction, 0.25);
        assert_eq!(config.graphics.frame_rate_cap, 60);
        assert_eq!(config.labels.lines.len(), 3);
        assert!(!config.key_bindings.is_empty());
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = ScrollerConfig::default();
        let serialized = toml::to_string_pretty(&config).expect("serialize");
        let deserialized: ScrollerConfig = toml::from_str(&serialized).expect("deserialize");
        assert_eq!(deserialized.strip, config.strip);
        assert_eq!(deserialized.scrolling, config.scrolling);
        assert_eq!(deserialized.labels, config.labels);
        assert_eq!(deserialized.key_bindings, config.key_bindings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: ScrollerConfig = toml::from_str(
            "[strip]\ntile_width = 320.0\ntile_height = 64.0\ntotal_width = 8000.0\nrecenter_fraction = 0.3\n",
        )
        .expect("deserialize");
        assert_eq!(config.strip.tile_width, 320.0);
        assert_eq!(config.scrolling, ScrollingConfig::default());
        assert_eq!(config.key_bindings.len(), ScrollAction::all().len());
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("settings.toml");
        let config = ScrollerConfig::load_from(&path);
        assert_eq!(config.strip, StripConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.toml");
        let mut config = ScrollerConfig::default();
        config.scrolling.friction = 4.0;
        config.debug.show_hud = true;
        config.save_to(&path);

        let loaded = ScrollerConfig::load_from(&path);
        assert_eq!(loaded.scrolling.friction, 4.0);
        assert!(loaded.debug.show_hud);
    }

    #[test]
    fn test_garbage_file_falls_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "strip = 12").expect("write");
        let loaded = ScrollerConfig::load_from(&path);
        assert_eq!(loaded.strip, StripConfig::default());
    }
}
