//! Story systems - scene entry and exit, cue effects, seed drops

use bevy::prelude::*;

use super::content::{Backdrop, script_for};
use super::script::{Effect, Placement};
use super::{CastMember, Role, SceneContext, StoryScene};
use crate::constants::*;
use crate::input::StoryInput;
use crate::ui::{CaptionText, Ease, LineText, TextStyle, Tween, spawn_text};
use crate::world::{
    ActorSpec, Art, ArtLibrary, ScreenPos, Stage, spawn_actor, spawn_backdrop, spawn_blackout,
};

/// Drops seeds from a moving carrier at a fixed interval
#[derive(Component, Debug, Clone)]
pub struct SeedDropper {
    pub interval: f32,
    pub elapsed: f32,
    pub remaining: u32,
}

impl SeedDropper {
    pub fn new(interval: f32, count: u32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            remaining: count,
        }
    }

    /// Advance by `dt` and return how many drops came due
    pub fn tick(&mut self, dt: f32) -> u32 {
        if self.remaining == 0 || self.interval <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut due = 0;
        while self.remaining > 0 && self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            self.remaining -= 1;
            due += 1;
        }
        due
    }

    pub fn is_spent(&self) -> bool {
        self.remaining == 0
    }
}

/// A falling seed
#[derive(Component)]
pub struct Seed;

/// OnEnter for narrative scenes: backdrop, starting cast, fresh cue runner
pub fn enter_story_scene(
    mut commands: Commands,
    scene: Res<State<StoryScene>>,
    stage: Res<Stage>,
    art: Res<ArtLibrary>,
) {
    let scene = *scene.get();
    let Some(script) = script_for(scene, &stage) else {
        return;
    };

    match script.backdrop {
        Backdrop::Picture(picture) => spawn_backdrop(&mut commands, &art, &stage, picture),
        Backdrop::Black => spawn_blackout(&mut commands, &stage),
    }

    let mut context = SceneContext::new(scene, script.cues);
    for (role, spec) in &script.cast {
        let entity = spawn_actor(&mut commands, &art, &stage, spec, Z_ACTOR);
        context.cast.insert(
            *role,
            CastMember {
                entity,
                home: spec.pos,
            },
        );
    }
    commands.insert_resource(context);
    info!("Entered {:?}", scene);
}

pub fn exit_story_scene(mut commands: Commands) {
    commands.remove_resource::<SceneContext>();
}

/// Where a cast member is right now, or where it entered if its
/// position isn't visible yet (spawned earlier this frame)
fn cast_position(context: &SceneContext, positions: &Query<&ScreenPos>, role: Role) -> Option<Vec2> {
    let member = context.cast.get(&role)?;
    Some(
        positions
            .get(member.entity)
            .map(|pos| pos.0)
            .unwrap_or(member.home),
    )
}

/// Step the live scene's cue runner and apply what it asks for
#[allow(clippy::too_many_arguments)]
pub fn run_scene_script(
    mut commands: Commands,
    time: Res<Time>,
    input: Res<StoryInput>,
    stage: Res<Stage>,
    art: Res<ArtLibrary>,
    mut context: ResMut<SceneContext>,
    mut next: ResMut<NextState<StoryScene>>,
    positions: Query<&ScreenPos>,
    captions: Query<Entity, With<CaptionText>>,
    lines: Query<Entity, With<LineText>>,
) {
    let effects = context.runner.update(time.delta_secs(), &input);
    if effects.is_empty() {
        return;
    }

    // Text spawned this frame isn't visible to the queries yet
    let mut fresh_captions: Vec<Entity> = Vec::new();
    let mut fresh_line: Option<Entity> = None;
    let mut old_captions_cleared = false;
    let mut old_lines_cleared = false;

    for effect in effects {
        match effect {
            Effect::Caption(caption) => {
                let pos = match caption.placement {
                    Placement::At(pos) => Some(pos),
                    Placement::Above(role, offset) => cast_position(&context, &positions, role)
                        .map(|pos| pos - Vec2::new(0.0, offset)),
                };
                let Some(pos) = pos else {
                    warn!("Caption {:?} has no one to sit above", caption.text);
                    continue;
                };
                let entity = spawn_text(
                    &mut commands,
                    &stage,
                    pos,
                    &caption.text,
                    caption.style,
                    CaptionText,
                );
                fresh_captions.push(entity);
            }
            Effect::ClearCaptions => {
                if !old_captions_cleared {
                    for entity in &captions {
                        commands.entity(entity).despawn();
                    }
                    old_captions_cleared = true;
                }
                for entity in fresh_captions.drain(..) {
                    commands.entity(entity).despawn();
                }
            }
            Effect::Enter(role, spec) => {
                let entity = spawn_actor(&mut commands, &art, &stage, &spec, Z_ACTOR);
                context.cast.insert(
                    role,
                    CastMember {
                        entity,
                        home: spec.pos,
                    },
                );
            }
            Effect::Blackout => spawn_blackout(&mut commands, &stage),
            Effect::Move {
                role,
                to,
                duration,
                ease,
            } => {
                let (Some(member), Some(from)) = (
                    context.cast.get(&role).copied(),
                    cast_position(&context, &positions, role),
                ) else {
                    warn!("Move for {:?}, who is not on stage", role);
                    continue;
                };
                commands
                    .entity(member.entity)
                    .insert(Tween::new(from, to, duration, ease));
            }
            Effect::ShowLine(line) => {
                let Some(speaker) = cast_position(&context, &positions, line.speaker) else {
                    warn!("{:?} speaks but is not on stage", line.speaker);
                    continue;
                };
                let pos = speaker - Vec2::new(0.0, BUBBLE_OFFSET);
                fresh_line = Some(spawn_text(
                    &mut commands,
                    &stage,
                    pos,
                    &line.text,
                    TextStyle::Bubble,
                    LineText,
                ));
            }
            Effect::HideLine => {
                if !old_lines_cleared {
                    for entity in &lines {
                        commands.entity(entity).despawn();
                    }
                    old_lines_cleared = true;
                }
                if let Some(entity) = fresh_line.take() {
                    commands.entity(entity).despawn();
                }
            }
            Effect::DropSeeds {
                role,
                interval,
                count,
            } => {
                if let Some(member) = context.cast.get(&role) {
                    commands
                        .entity(member.entity)
                        .insert(SeedDropper::new(interval, count));
                }
            }
            Effect::Advance(scene) => {
                info!("{:?} -> {:?}", context.scene, scene);
                next.set(scene);
            }
        }
    }
}

/// Spawn seeds under droppers while they are still over the stage
pub fn drop_seeds(
    mut commands: Commands,
    time: Res<Time>,
    stage: Res<Stage>,
    art: Res<ArtLibrary>,
    mut droppers: Query<(Entity, &ScreenPos, &mut SeedDropper)>,
) {
    let dt = time.delta_secs();
    for (entity, pos, mut dropper) in &mut droppers {
        let due = dropper.tick(dt);
        for _ in 0..due {
            if pos.0.x >= stage.width {
                debug!("Seed skipped, carrier is off stage at x={:.0}", pos.0.x);
                continue;
            }
            let spec = ActorSpec::new(Art::Seed, pos.0).scaled(SEED_SCALE);
            let landing = Vec2::new(pos.0.x, stage.height + spec.display_size().y);
            let seed = spawn_actor(&mut commands, &art, &stage, &spec, Z_SEED);
            commands.entity(seed).insert((
                Seed,
                Tween::new(pos.0, landing, SEED_FALL_TIME, Ease::Linear),
            ));
        }
        if dropper.is_spent() {
            commands.entity(entity).remove::<SeedDropper>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropper_fires_on_interval() {
        let mut dropper = SeedDropper::new(1.0, 3);
        assert_eq!(dropper.tick(0.5), 0);
        assert_eq!(dropper.tick(0.5), 1);
        assert_eq!(dropper.tick(0.99), 0);
        assert_eq!(dropper.tick(0.01), 1);
        assert!(!dropper.is_spent());
    }

    #[test]
    fn test_dropper_stops_after_count() {
        let mut dropper = SeedDropper::new(1.0, 3);
        assert_eq!(dropper.tick(10.0), 3);
        assert!(dropper.is_spent());
        assert_eq!(dropper.tick(10.0), 0);
    }

    #[test]
    fn test_no_seeds_past_stage_edge() {
        use bevy::time::TimeUpdateStrategy;
        use std::time::Duration;

        let mut app = App::new();
        app.add_plugins(bevy::time::TimePlugin)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)))
            .insert_resource(Stage::new(100.0, 100.0))
            .init_resource::<ArtLibrary>()
            .add_systems(Update, drop_seeds);
        app.world_mut()
            .spawn((ScreenPos(Vec2::new(150.0, 10.0)), SeedDropper::new(0.25, 1)));
        app.world_mut()
            .spawn((ScreenPos(Vec2::new(50.0, 10.0)), SeedDropper::new(0.25, 1)));

        // The first update carries no elapsed time
        for _ in 0..3 {
            app.update();
        }
        let seeds = app
            .world_mut()
            .query_filtered::<&ScreenPos, With<Seed>>()
            .iter(app.world())
            .count();
        assert_eq!(seeds, 1);
    }
}
