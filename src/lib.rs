//! Earth Diver - the Turtle, Eagle and Coyote creation story, built with Bevy
//!
//! This crate provides the scenes, the underwater challenge, and the
//! headless tooling used to replay the story in tests.

// Core modules
pub mod constants;
pub mod countdown;
pub mod debug_logging;
pub mod headless;
pub mod helpers;
pub mod settings;
pub mod testing;

// Story modules
pub mod dialogue;
pub mod input;
pub mod minigame;
pub mod story;
pub mod ui;
pub mod world;

// Re-export commonly used types for convenience
pub use constants::*;
pub use countdown::{Countdown, CountdownLabel, spawn_countdown_label};
pub use debug_logging::DebugLogConfig;
pub use dialogue::{DialogueEvent, DialogueLine, DialoguePlayer};
pub use headless::HeadlessAppBuilder;
pub use input::{KeyGate, StoryInput};
pub use minigame::{Challenge, ChallengePlugin, Diver, Outcome, Rock, Shark};
pub use settings::{DisplaySettings, SETTINGS_FILE};
pub use story::{FrameSet, Role, SceneContext, StoryPlugin, StoryScene};
pub use world::{Art, ArtLibrary, Stage};
