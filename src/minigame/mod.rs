//! Underwater challenge - steer Turtle along the sea floor to pick up every rock
//! before the countdown runs out, while sharks patrol overhead.

mod rules;

pub use rules::*;

use bevy::prelude::*;

use crate::constants::*;
use crate::countdown::{CountdownLabel, spawn_countdown_label};
use crate::helpers::{boxes_overlap, clamp_box_to_area};
use crate::input::StoryInput;
use crate::story::{FrameSet, StoryScene};
use crate::ui::{Patrol, PingPong};
use crate::world::{
    ActorSpec, Art, ArtLibrary, Body, ScreenPos, Stage, spawn_actor, spawn_backdrop,
};

/// The player-controlled diver
#[derive(Component)]
pub struct Diver;

/// A rock on the sea floor, numbered left to right
#[derive(Component, Debug)]
pub struct Rock {
    pub index: u32,
}

/// Cosmetic patrolling shark
#[derive(Component)]
pub struct Shark;

/// Screen position of rock `index`
pub fn rock_position(stage: &Stage, index: u32) -> Vec2 {
    Vec2::new(
        ROCK_ROW_START_X + ROCK_ROW_SPACING * index as f32,
        stage.height - ROCK_ROW_LIFT,
    )
}

/// OnEnter(UnderwaterChallenge)
pub fn enter_challenge(mut commands: Commands, stage: Res<Stage>, art: Res<ArtLibrary>) {
    spawn_backdrop(&mut commands, &art, &stage, Art::Underwater);

    let diver = ActorSpec::new(Art::Diver, DIVER_SPAWN).scaled(CHARACTER_SCALE);
    let entity = spawn_actor(&mut commands, &art, &stage, &diver, Z_ACTOR);
    commands
        .entity(entity)
        .insert((Diver, Body(diver.display_size())));

    for index in 0..ROCK_COUNT {
        let rock = ActorSpec::new(Art::Rock, rock_position(&stage, index)).scaled(ROCK_SCALE);
        let entity = spawn_actor(&mut commands, &art, &stage, &rock, Z_ACTOR);
        commands
            .entity(entity)
            .insert((Rock { index }, Body(rock.display_size())));
    }

    // Sharks start at opposite edges
    let shark_y = stage.height - SHARK_LIFT;
    for (picture, from, to, leg) in [
        (Art::Shark1, 0.0, stage.width, SHARK1_LEG_TIME),
        (Art::Shark2, stage.width, 0.0, SHARK2_LEG_TIME),
    ] {
        let shark = ActorSpec::new(picture, Vec2::new(from, shark_y)).scaled(SHARK_SCALE);
        let entity = spawn_actor(&mut commands, &art, &stage, &shark, Z_ACTOR);
        commands
            .entity(entity)
            .insert((Shark, Patrol::new(PingPong::new(from, to, leg))));
    }

    let challenge = Challenge::default();
    spawn_countdown_label(&mut commands, &stage, &challenge.countdown);
    commands.insert_resource(challenge);
    info!(
        "Challenge started: {} rocks, {} s",
        ROCK_COUNT, CHALLENGE_SECONDS
    );
}

pub fn exit_challenge(mut commands: Commands) {
    commands.remove_resource::<Challenge>();
}

/// Move the diver with the arrow keys, keeping its body on stage
pub fn steer_diver(
    input: Res<StoryInput>,
    stage: Res<Stage>,
    mut diver: Query<(&mut ScreenPos, &Body), With<Diver>>,
) {
    if input.steer == Vec2::ZERO {
        return;
    }
    for (mut pos, body) in &mut diver {
        let moved = pos.0 + input.steer * DIVER_STEP;
        pos.0 = clamp_box_to_area(moved, body.0, stage.size());
    }
}

/// Pick up every rock the diver touches
pub fn collect_rocks(
    mut commands: Commands,
    mut challenge: ResMut<Challenge>,
    diver: Query<(&ScreenPos, &Body), With<Diver>>,
    rocks: Query<(Entity, &ScreenPos, &Body, &Rock)>,
) {
    if challenge.outcome.is_some() {
        return;
    }
    for (diver_pos, diver_body) in &diver {
        for (entity, rock_pos, rock_body, rock) in &rocks {
            if boxes_overlap(diver_pos.0, diver_body.0, rock_pos.0, rock_body.0) {
                commands.entity(entity).despawn();
                challenge.collect();
                debug!("Rock {} collected, {} left", rock.index, challenge.rocks_left);
            }
        }
    }
}

/// Apply win and loss, handing off to the next scene when decided
pub fn resolve_challenge(
    time: Res<Time>,
    mut challenge: ResMut<Challenge>,
    mut next: ResMut<NextState<StoryScene>>,
) {
    if let Some(scene) = challenge.update(time.delta_secs()) {
        info!("UnderwaterChallenge -> {:?}", scene);
        next.set(scene);
    }
}

pub fn update_countdown_label(
    challenge: Res<Challenge>,
    mut labels: Query<&mut Text2d, With<CountdownLabel>>,
) {
    let label = challenge.countdown.label();
    for mut text in &mut labels {
        if text.0 != label {
            text.0 = label.clone();
        }
    }
}

/// Scene hooks and per-frame systems for the challenge
pub struct ChallengePlugin;

impl Plugin for ChallengePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(StoryScene::UnderwaterChallenge), enter_challenge)
            .add_systems(OnExit(StoryScene::UnderwaterChallenge), exit_challenge)
            .add_systems(
                Update,
                (
                    steer_diver,
                    collect_rocks,
                    resolve_challenge,
                    update_countdown_label,
                )
                    .chain()
                    .in_set(FrameSet::Script)
                    .run_if(resource_exists::<Challenge>),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steer_app(steer: Vec2) -> (App, Entity) {
        let mut app = App::new();
        app.insert_resource(Stage::new(400.0, 300.0))
            .insert_resource(StoryInput {
                steer,
                ..default()
            })
            .add_systems(Update, steer_diver);
        let diver = app
            .world_mut()
            .spawn((Diver, ScreenPos(DIVER_SPAWN), Body(Vec2::splat(80.0))))
            .id();
        (app, diver)
    }

    #[test]
    fn test_diver_moves_five_per_tick() {
        let (mut app, diver) = steer_app(Vec2::new(1.0, 0.0));
        app.update();
        app.update();
        let pos = app.world().get::<ScreenPos>(diver).unwrap();
        assert_eq!(pos.0, Vec2::new(60.0, 50.0));
    }

    #[test]
    fn test_diver_stays_on_stage() {
        let (mut app, diver) = steer_app(Vec2::new(-1.0, -1.0));
        for _ in 0..50 {
            app.update();
        }
        assert_eq!(app.world().get::<ScreenPos>(diver).unwrap().0, Vec2::new(40.0, 40.0));

        app.world_mut().resource_mut::<StoryInput>().steer = Vec2::new(1.0, 1.0);
        for _ in 0..200 {
            app.update();
        }
        assert_eq!(app.world().get::<ScreenPos>(diver).unwrap().0, Vec2::new(360.0, 260.0));
    }

    #[test]
    fn test_rock_row_layout() {
        let stage = Stage::new(1280.0, 720.0);
        assert_eq!(rock_position(&stage, 0), Vec2::new(50.0, 620.0));
        assert_eq!(rock_position(&stage, 12), Vec2::new(1130.0, 620.0));
    }

    #[test]
    fn test_touching_rock_collects_it_once() {
        let mut app = App::new();
        app.insert_resource(Challenge::new(20, 2))
            .add_systems(Update, collect_rocks);
        app.world_mut()
            .spawn((Diver, ScreenPos(Vec2::new(100.0, 100.0)), Body(Vec2::splat(80.0))));
        let near = app
            .world_mut()
            .spawn((Rock { index: 0 }, ScreenPos(Vec2::new(130.0, 100.0)), Body(Vec2::splat(32.0))))
            .id();
        let far = app
            .world_mut()
            .spawn((Rock { index: 1 }, ScreenPos(Vec2::new(400.0, 100.0)), Body(Vec2::splat(32.0))))
            .id();

        app.update();
        app.update();
        assert!(app.world().get_entity(near).is_err());
        assert!(app.world().get_entity(far).is_ok());
        assert_eq!(app.world().resource::<Challenge>().rocks_left, 1);
    }
}
