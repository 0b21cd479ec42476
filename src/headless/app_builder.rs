//! Headless App Builder
//!
//! Builds a windowless story app that steps at a fixed frame time.
//! Used by app-level tests and the scenario runner.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use crate::minigame::ChallengePlugin;
use crate::story::{StoryPlugin, StoryScene};
use crate::world::Stage;

/// Builder for creating headless Bevy apps
pub struct HeadlessAppBuilder {
    stage: Stage,
    fps: f32,
    minimal_threads: bool,
}

impl Default for HeadlessAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessAppBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            stage: Stage::default(),
            fps: 60.0,
            minimal_threads: false,
        }
    }

    /// Set the stage size (default: 1280x720)
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    /// Set the frame rate (default: 60)
    pub fn with_fps(mut self, fps: f32) -> Self {
        self.fps = fps;
        self
    }

    /// Enable minimal thread mode (task pools = 1)
    ///
    /// Use this when running many apps in parallel to avoid hitting OS thread limits.
    pub fn with_minimal_threads(mut self) -> Self {
        self.minimal_threads = true;
        self
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.fps.max(1.0))
    }

    /// Build the app with minimal plugins and the whole story
    ///
    /// The returned app has:
    /// - MinimalPlugins plus StatesPlugin
    /// - A fixed frame time of 1/fps per `update()`
    /// - A keyboard the caller drives directly (see `press`, `hold`, `release`)
    /// - StoryPlugin and ChallengePlugin, starting in Intro
    pub fn build(self) -> App {
        let frame = self.frame_time();
        let mut app = App::new();

        if self.minimal_threads {
            app.add_plugins(
                MinimalPlugins
                    .set(ScheduleRunnerPlugin::run_loop(frame))
                    .set(TaskPoolPlugin {
                        task_pool_options: TaskPoolOptions::with_num_threads(1),
                    }),
            );
        } else {
            app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame)));
        }

        app.add_plugins(StatesPlugin)
            .insert_resource(TimeUpdateStrategy::ManualDuration(frame))
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(self.stage)
            .add_plugins((StoryPlugin, ChallengePlugin));

        app
    }
}

/// Run one frame, then retire this frame's presses and releases
pub fn step(app: &mut App) {
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
}

/// Run `frames` frames
pub fn step_n(app: &mut App, frames: u32) {
    for _ in 0..frames {
        step(app);
    }
}

/// Tap a key: down for one frame, released before the next
pub fn press(app: &mut App, key: KeyCode) {
    hold(app, key);
    step(app);
    release(app, key);
}

/// Put a key down; it stays held until released
pub fn hold(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
}

pub fn release(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(key);
}

/// The scene currently live
pub fn current_scene(app: &App) -> StoryScene {
    *app.world().resource::<State<StoryScene>>().get()
}
