//! TOML scenario file parsing

use bevy::prelude::KeyCode;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::story::StoryScene;

/// Complete scenario definition from a TOML file
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub setup: ScenarioSetup,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// App configuration for a scenario
#[derive(Debug, Deserialize)]
pub struct ScenarioSetup {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default = "default_fps")]
    pub fps: f32,
    /// Jump straight to this scene instead of starting at the intro
    pub scene: Option<String>,
}

impl Default for ScenarioSetup {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            scene: None,
        }
    }
}

fn default_width() -> f32 {
    crate::constants::DEFAULT_STAGE_WIDTH
}

fn default_height() -> f32 {
    crate::constants::DEFAULT_STAGE_HEIGHT
}

fn default_fps() -> f32 {
    60.0
}

/// What a step does with the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Tap `key` for one frame, then let one more frame pass
    Press,
    /// Do nothing for `ms`
    Wait,
    /// Keep `keys` down for `ms`, then release them
    Hold,
}

/// One scripted step
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub action: Action,
    pub key: Option<String>,
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub ms: u64,
    /// Scene that must be live once the step is done
    pub expect_scene: Option<String>,
    /// Rocks that must still be on the sea floor once the step is done
    pub expect_rocks_left: Option<u32>,
}

impl Step {
    /// Every key the step touches, `key` first
    pub fn all_keys(&self) -> Vec<&str> {
        self.key
            .iter()
            .chain(self.keys.iter())
            .map(String::as_str)
            .collect()
    }
}

/// Parse a key name as written in scenario files
pub fn parse_key(name: &str) -> Result<KeyCode, String> {
    let key = match name.trim().to_ascii_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "space" => KeyCode::Space,
        "escape" | "esc" => KeyCode::Escape,
        "up" | "arrowup" => KeyCode::ArrowUp,
        "down" | "arrowdown" => KeyCode::ArrowDown,
        "left" | "arrowleft" => KeyCode::ArrowLeft,
        "right" | "arrowright" => KeyCode::ArrowRight,
        "a" => KeyCode::KeyA,
        "d" => KeyCode::KeyD,
        "s" => KeyCode::KeyS,
        "w" => KeyCode::KeyW,
        "x" => KeyCode::KeyX,
        "z" => KeyCode::KeyZ,
        other => return Err(format!("Unknown key '{}'", other)),
    };
    Ok(key)
}

pub fn parse_scene(name: &str) -> Result<StoryScene, String> {
    StoryScene::from_name(name).ok_or_else(|| format!("Unknown scene '{}'", name))
}

/// Parse a scenario from TOML text
pub fn parse_scenario(content: &str) -> Result<Scenario, String> {
    let scenario: Scenario = toml::from_str(content).map_err(|e| e.to_string())?;
    validate(&scenario)?;
    Ok(scenario)
}

/// Parse a scenario file from path
pub fn parse_scenario_file(path: &Path) -> Result<Scenario, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    parse_scenario(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Check key and scene names up front so a typo fails before any frames run
fn validate(scenario: &Scenario) -> Result<(), String> {
    if scenario.setup.fps <= 0.0 {
        return Err(format!("fps must be positive, got {}", scenario.setup.fps));
    }
    if let Some(scene) = &scenario.setup.scene {
        parse_scene(scene)?;
    }
    for (i, step) in scenario.steps.iter().enumerate() {
        let keys = step.all_keys();
        match step.action {
            Action::Press if keys.len() != 1 => {
                return Err(format!("step {}: press needs exactly one key", i + 1));
            }
            Action::Hold if keys.is_empty() => {
                return Err(format!("step {}: hold needs at least one key", i + 1));
            }
            _ => {}
        }
        for key in keys {
            parse_key(key).map_err(|e| format!("step {}: {}", i + 1, e))?;
        }
        if let Some(scene) = &step.expect_scene {
            parse_scene(scene).map_err(|e| format!("step {}: {}", i + 1, e))?;
        }
    }
    Ok(())
}
