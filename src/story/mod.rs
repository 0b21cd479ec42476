//! Story module - scene states, cast, and the per-frame schedule

mod content;
mod script;
mod systems;

pub use content::*;
pub use script::*;
pub use systems::*;

use bevy::prelude::*;
use std::collections::HashMap;

use crate::input::{StoryInput, capture_input};
use crate::ui::{advance_patrols, advance_tweens};
use crate::world::{ArtLibrary, Stage, sync_screen_positions, teardown_tableau};

/// Named characters that scripts refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Eagle,
    Coyote,
    Turtle,
}

/// The scenes, in story order. Exactly one is live at a time.
#[derive(States, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StoryScene {
    #[default]
    Intro,
    UnderwaterChallenge,
    MudReturnMessage,
    SeedReturnDialogue,
    TurtleThanksMessage,
    LandMixingDialogue,
    EagleFlightMessage,
    SeedSpreadAnimation,
    FinalMessage,
    LandReveal,
}

impl StoryScene {
    pub const ALL: [StoryScene; 10] = [
        StoryScene::Intro,
        StoryScene::UnderwaterChallenge,
        StoryScene::MudReturnMessage,
        StoryScene::SeedReturnDialogue,
        StoryScene::TurtleThanksMessage,
        StoryScene::LandMixingDialogue,
        StoryScene::EagleFlightMessage,
        StoryScene::SeedSpreadAnimation,
        StoryScene::FinalMessage,
        StoryScene::LandReveal,
    ];

    /// Everything except the minigame is driven by a cue script
    pub fn is_narrative(self) -> bool {
        self != StoryScene::UnderwaterChallenge
    }

    /// Parse a scene name as written in scenario files (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|scene| format!("{:?}", scene).eq_ignore_ascii_case(name.trim()))
    }
}

/// Per-frame ordering
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Read the keyboard into `StoryInput`
    Input,
    /// Tweens, patrols, droppers
    Animate,
    /// Scene logic: cue runner, challenge rules
    Script,
    /// Copy screen positions into transforms
    Sync,
}

/// A cast member on stage in the live scene
#[derive(Debug, Clone, Copy)]
pub struct CastMember {
    pub entity: Entity,
    /// Where the member entered; used when its entity is gone
    pub home: Vec2,
}

/// State of the live narrative scene. Inserted on enter, removed on exit.
#[derive(Resource, Debug)]
pub struct SceneContext {
    pub scene: StoryScene,
    pub runner: CueRunner,
    pub cast: HashMap<Role, CastMember>,
}

impl SceneContext {
    pub fn new(scene: StoryScene, cues: Vec<Cue>) -> Self {
        Self {
            scene,
            runner: CueRunner::new(cues),
            cast: HashMap::new(),
        }
    }
}

/// Scene state machine plus the shared per-frame systems
pub struct StoryPlugin;

impl Plugin for StoryPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<StoryScene>()
            .init_resource::<StoryInput>()
            .init_resource::<Stage>()
            .init_resource::<ArtLibrary>()
            .configure_sets(
                Update,
                (
                    FrameSet::Input,
                    FrameSet::Animate,
                    FrameSet::Script,
                    FrameSet::Sync,
                )
                    .chain(),
            )
            .add_systems(Update, capture_input.in_set(FrameSet::Input))
            .add_systems(
                Update,
                (advance_tweens, advance_patrols, drop_seeds).in_set(FrameSet::Animate),
            )
            .add_systems(
                Update,
                run_scene_script
                    .in_set(FrameSet::Script)
                    .run_if(resource_exists::<SceneContext>),
            )
            .add_systems(Update, sync_screen_positions.in_set(FrameSet::Sync));

        for scene in StoryScene::ALL {
            app.add_systems(OnExit(scene), teardown_tableau);
            if scene.is_narrative() {
                app.add_systems(OnEnter(scene), enter_story_scene)
                    .add_systems(OnExit(scene), exit_story_scene);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_is_intro() {
        assert_eq!(StoryScene::default(), StoryScene::Intro);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            StoryScene::from_name("MudReturnMessage"),
            Some(StoryScene::MudReturnMessage)
        );
        assert_eq!(StoryScene::from_name(" landreveal "), Some(StoryScene::LandReveal));
        assert_eq!(StoryScene::from_name("Credits"), None);
    }

    #[test]
    fn test_only_challenge_is_not_narrative() {
        let narrative = StoryScene::ALL.iter().filter(|s| s.is_narrative()).count();
        assert_eq!(narrative, StoryScene::ALL.len() - 1);
        assert!(!StoryScene::UnderwaterChallenge.is_narrative());
    }
}
