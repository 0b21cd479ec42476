//! Scenario execution engine

use bevy::prelude::*;

use crate::headless::{HeadlessAppBuilder, current_scene, hold, release, step};
use crate::minigame::Challenge;
use crate::story::StoryScene;
use crate::world::Stage;

use super::assertions::{AssertionError, check_rocks_left, check_scene};
use super::parser::{Action, Scenario, Step, parse_key, parse_scene};

/// Result of running a scenario
#[derive(Debug)]
pub enum ScenarioResult {
    Pass { frames: u64 },
    Fail { step: usize, error: AssertionError },
    Error { message: String },
}

impl ScenarioResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, ScenarioResult::Pass { .. })
    }
}

/// Number of frames covering `ms` at `fps`, rounded up
pub fn frames_for(ms: u64, fps: f32) -> u64 {
    (ms as f64 * fps as f64 / 1000.0).ceil() as u64
}

/// A headless app plus a frame counter
struct Playthrough {
    app: App,
    frame: u64,
    fps: f32,
}

impl Playthrough {
    fn step(&mut self) {
        step(&mut self.app);
        self.frame += 1;
    }

    fn step_for(&mut self, ms: u64) {
        for _ in 0..frames_for(ms, self.fps) {
            self.step();
        }
    }

    fn run(&mut self, step: &Step) -> Result<(), String> {
        let keys = step
            .all_keys()
            .into_iter()
            .map(parse_key)
            .collect::<Result<Vec<_>, _>>()?;

        match step.action {
            Action::Press => {
                let Some(key) = keys.first().copied() else {
                    return Err("press needs a key".to_string());
                };
                hold(&mut self.app, key);
                self.step();
                release(&mut self.app, key);
                // Let the scene change requested by the press land
                self.step();
            }
            Action::Wait => self.step_for(step.ms),
            Action::Hold => {
                for key in &keys {
                    hold(&mut self.app, *key);
                }
                self.step_for(step.ms);
                for key in &keys {
                    release(&mut self.app, *key);
                }
            }
        }
        Ok(())
    }

    fn check(&self, index: usize, step: &Step) -> Result<(), AssertionError> {
        if let Some(name) = &step.expect_scene
            && let Ok(expected) = parse_scene(name)
        {
            check_scene(index, self.frame, expected, current_scene(&self.app))?;
        }
        if let Some(expected) = step.expect_rocks_left {
            let actual = self
                .app
                .world()
                .get_resource::<Challenge>()
                .map(|challenge| challenge.rocks_left);
            check_rocks_left(index, self.frame, expected, actual)?;
        }
        Ok(())
    }
}

/// Run a single scenario and return the result
pub fn run_scenario(scenario: &Scenario) -> ScenarioResult {
    let setup = &scenario.setup;
    let start = match setup.scene.as_deref().map(parse_scene).transpose() {
        Ok(scene) => scene,
        Err(message) => return ScenarioResult::Error { message },
    };

    let app = HeadlessAppBuilder::new()
        .with_stage(Stage::new(setup.width, setup.height))
        .with_fps(setup.fps)
        .with_minimal_threads()
        .build();
    let mut play = Playthrough {
        app,
        frame: 0,
        fps: setup.fps,
    };

    // First frame enters the intro
    play.step();
    if let Some(scene) = start
        && scene != StoryScene::Intro
    {
        play.app
            .world_mut()
            .resource_mut::<NextState<StoryScene>>()
            .set(scene);
        play.step();
    }

    for (i, step) in scenario.steps.iter().enumerate() {
        let index = i + 1;
        if let Err(message) = play.run(step) {
            return ScenarioResult::Error {
                message: format!("step {}: {}", index, message),
            };
        }
        if let Err(error) = play.check(index, step) {
            return ScenarioResult::Fail { step: index, error };
        }
    }

    ScenarioResult::Pass { frames: play.frame }
}
