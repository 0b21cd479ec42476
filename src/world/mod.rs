//! Stage geometry, actor spawning, and tableau teardown

mod art;

pub use art::*;

use bevy::prelude::*;

use crate::constants::*;

/// Size of the play surface, captured once at startup.
///
/// Story positions use screen coordinates: origin top-left, +y down.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub width: f32,
    pub height: f32,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(DEFAULT_STAGE_WIDTH, DEFAULT_STAGE_HEIGHT)
    }
}

impl Stage {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.size() / 2.0
    }

    pub fn waterline_y(&self) -> f32 {
        self.height * WATERLINE_FRACTION
    }

    pub fn island_y(&self) -> f32 {
        self.height * ISLAND_FRACTION
    }

    pub fn tree_y(&self) -> f32 {
        self.height * TREE_FRACTION
    }

    /// Convert a screen position to a centered, y-up world translation
    pub fn to_world(&self, pos: Vec2, z: f32) -> Vec3 {
        Vec3::new(pos.x - self.width / 2.0, self.height / 2.0 - pos.y, z)
    }
}

/// Position in screen coordinates; mirrored into `Transform` every frame
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPos(pub Vec2);

/// Marks root entities owned by the live scene (despawned on scene exit)
#[derive(Component, Default)]
pub struct Tableau;

/// Collision extent of an actor, already scaled
#[derive(Component, Debug, Clone, Copy)]
pub struct Body(pub Vec2);

/// How to place one character or prop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSpec {
    pub art: Art,
    pub pos: Vec2,
    pub scale: f32,
    pub flip_x: bool,
}

impl ActorSpec {
    pub fn new(art: Art, pos: Vec2) -> Self {
        Self {
            art,
            pos,
            scale: 1.0,
            flip_x: false,
        }
    }

    pub fn scaled(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn display_size(&self) -> Vec2 {
        self.art.size() * self.scale
    }
}

/// Spawn an actor sprite and return its entity
pub fn spawn_actor(
    commands: &mut Commands,
    art: &ArtLibrary,
    stage: &Stage,
    spec: &ActorSpec,
    z: f32,
) -> Entity {
    commands
        .spawn((
            Sprite {
                image: art.get(spec.art),
                custom_size: Some(spec.art.size()),
                flip_x: spec.flip_x,
                ..default()
            },
            Transform::from_translation(stage.to_world(spec.pos, z))
                .with_scale(Vec3::new(spec.scale, spec.scale, 1.0)),
            ScreenPos(spec.pos),
            Tableau,
        ))
        .id()
}

/// Spawn a full-stage background image
pub fn spawn_backdrop(commands: &mut Commands, art: &ArtLibrary, stage: &Stage, backdrop: Art) {
    commands.spawn((
        Sprite {
            image: art.get(backdrop),
            custom_size: Some(stage.size()),
            ..default()
        },
        Transform::from_translation(stage.to_world(stage.center(), Z_BACKDROP)),
        Tableau,
    ));
}

/// Spawn an opaque black sheet over everything except text
pub fn spawn_blackout(commands: &mut Commands, stage: &Stage) {
    commands.spawn((
        Sprite::from_color(Color::BLACK, stage.size()),
        Transform::from_translation(stage.to_world(stage.center(), Z_BLACKOUT)),
        Tableau,
    ));
}

/// Mirror screen positions into transforms, keeping each entity's z
pub fn sync_screen_positions(
    stage: Res<Stage>,
    mut query: Query<(&ScreenPos, &mut Transform), Changed<ScreenPos>>,
) {
    for (pos, mut transform) in &mut query {
        let z = transform.translation.z;
        transform.translation = stage.to_world(pos.0, z);
    }
}

/// Despawn every tableau entity of the scene being left
pub fn teardown_tableau(mut commands: Commands, query: Query<Entity, With<Tableau>>) {
    let mut count = 0;
    for entity in &query {
        commands.entity(entity).despawn();
        count += 1;
    }
    debug!("Tore down {} tableau entities", count);
}
