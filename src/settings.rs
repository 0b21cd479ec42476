//! Display settings for the game window
//!
//! Loads the window size and title from config/display.json. The stage is
//! sized from these values once at startup and never resized afterwards.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::{DEFAULT_STAGE_HEIGHT, DEFAULT_STAGE_WIDTH};

/// Path to the settings file
pub const SETTINGS_FILE: &str = "config/display.json";

/// Window configuration that survives between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Window width in logical pixels
    pub width: f32,
    /// Window height in logical pixels
    pub height: f32,
    /// Window title
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    "Earth Diver".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_STAGE_WIDTH,
            height: DEFAULT_STAGE_HEIGHT,
            title: default_title(),
        }
    }
}

impl DisplaySettings {
    /// Load settings from file, or return defaults if file doesn't exist
    pub fn load() -> Self {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No {} found, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON, rejecting sizes that cannot hold a stage
    pub fn parse(content: &str) -> Result<Self, String> {
        let settings: Self = serde_json::from_str(content).map_err(|e| e.to_string())?;
        if settings.width <= 0.0 || settings.height <= 0.0 {
            return Err(format!(
                "window size must be positive, got {}x{}",
                settings.width, settings.height
            ));
        }
        Ok(settings)
    }

    /// Save settings to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(Path::new(SETTINGS_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        info!("Saved display settings to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fills_default_title() {
        let settings = DisplaySettings::parse(r#"{ "width": 800.0, "height": 600.0 }"#).unwrap();
        assert_eq!(settings.width, 800.0);
        assert_eq!(settings.height, 600.0);
        assert_eq!(settings.title, "Earth Diver");
    }

    #[test]
    fn test_parse_rejects_empty_stage() {
        assert!(DisplaySettings::parse(r#"{ "width": 0.0, "height": 600.0 }"#).is_err());
        assert!(DisplaySettings::parse("not json").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = DisplaySettings::load_from(Path::new("does/not/exist.json"));
        assert_eq!(settings, DisplaySettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("earthdiver-settings-{}", std::process::id()));
        let path = dir.join("display.json");
        let settings = DisplaySettings {
            width: 1024.0,
            height: 768.0,
            title: "Test".to_string(),
        };
        settings.save_to(&path).unwrap();
        assert_eq!(DisplaySettings::load_from(&path), settings);
        let _ = fs::remove_dir_all(dir);
    }
}
