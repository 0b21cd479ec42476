//! Debug logging configuration shared across binaries.

use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEBUG_LOG_SETTINGS_FILE: &str = "config/debug_logging.json";

/// Filter applied when debug logging is off
const QUIET_FILTER: &str = "wgpu=error,naga=warn";

#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
pub struct DebugLogConfig {
    pub enabled: bool,
    /// Extra `tracing` filter directives appended to the defaults
    #[serde(default)]
    pub extra_filter: Option<String>,
}

impl Default for DebugLogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            extra_filter: None,
        }
    }
}

impl DebugLogConfig {
    pub fn load() -> Self {
        let path = Path::new(DEBUG_LOG_SETTINGS_FILE);
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn enabled_from_args(args: &[String]) -> bool {
        args.iter().any(|arg| arg == "--debug-log")
    }

    pub fn load_with_args(args: &[String]) -> Self {
        let mut config = Self::load();
        if Self::enabled_from_args(args) {
            config.enabled = true;
        }
        config
    }

    /// Filter string handed to the log plugin
    pub fn filter(&self) -> String {
        let mut filter = if self.enabled {
            format!("{QUIET_FILTER},earthdiver=debug")
        } else {
            QUIET_FILTER.to_string()
        };
        if let Some(extra) = self.extra_filter.as_deref().filter(|s| !s.is_empty()) {
            filter.push(',');
            filter.push_str(extra);
        }
        filter
    }

    pub fn log_plugin(&self) -> LogPlugin {
        LogPlugin {
            filter: self.filter(),
            level: if self.enabled { Level::DEBUG } else { Level::INFO },
            ..default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_enables_debug() {
        let args = vec!["earthdiver".to_string(), "--debug-log".to_string()];
        assert!(DebugLogConfig::enabled_from_args(&args));
        assert!(!DebugLogConfig::enabled_from_args(&args[..1]));
    }

    #[test]
    fn test_filter_includes_crate_level_when_enabled() {
        let config = DebugLogConfig {
            enabled: true,
            extra_filter: Some("bevy_ecs=trace".to_string()),
        };
        let filter = config.filter();
        assert!(filter.contains("earthdiver=debug"));
        assert!(filter.ends_with(",bevy_ecs=trace"));
        assert_eq!(DebugLogConfig::default().filter(), QUIET_FILTER);
    }
}
