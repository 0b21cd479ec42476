//! Tweens: timed moves with easing, and endless ping-pong patrols

use bevy::prelude::*;

use crate::world::ScreenPos;

/// Easing curves, named after the Power family (PowerN = ease-out of degree N+1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    #[default]
    Linear,
    Power1,
    Power2,
}

impl Ease {
    /// Map linear progress `t` in 0..=1 to eased progress
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1 => 1.0 - (1.0 - t).powi(2),
            Ease::Power2 => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// One-shot move of an entity's `ScreenPos`. Removed when it arrives.
#[derive(Component, Debug, Clone)]
pub struct Tween {
    pub from: Vec2,
    pub to: Vec2,
    pub duration: f32,
    pub elapsed: f32,
    pub ease: Ease,
}

impl Tween {
    pub fn new(from: Vec2, to: Vec2, duration: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            ease,
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    /// Advance by `dt` seconds and return the new position
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        self.elapsed += dt;
        self.from.lerp(self.to, self.ease.apply(self.progress()))
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// Linear back-and-forth along x between two edges, forever.
///
/// The outbound leg runs `from -> to`; the return leg runs back and reports
/// `returning`, which callers use as the facing flip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PingPong {
    pub from: f32,
    pub to: f32,
    pub leg: f32,
}

impl PingPong {
    pub fn new(from: f32, to: f32, leg: f32) -> Self {
        Self { from, to, leg }
    }

    /// Position and leg direction after `elapsed` seconds
    pub fn sample(&self, elapsed: f32) -> (f32, bool) {
        if self.leg <= 0.0 {
            return (self.from, false);
        }
        let phase = elapsed.rem_euclid(self.leg * 2.0);
        if phase < self.leg {
            let t = phase / self.leg;
            (self.from + (self.to - self.from) * t, false)
        } else {
            let t = (phase - self.leg) / self.leg;
            (self.to + (self.from - self.to) * t, true)
        }
    }
}

/// Patrolling sprite driven by a ping-pong
#[derive(Component, Debug, Clone)]
pub struct Patrol {
    pub path: PingPong,
    pub elapsed: f32,
}

impl Patrol {
    pub fn new(path: PingPong) -> Self {
        Self { path, elapsed: 0.0 }
    }
}

/// Step every running tween; finished tweens snap to their target and are removed
pub fn advance_tweens(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut ScreenPos, &mut Tween)>,
) {
    let dt = time.delta_secs();
    for (entity, mut pos, mut tween) in &mut query {
        pos.0 = tween.advance(dt);
        if tween.is_finished() {
            commands.entity(entity).remove::<Tween>();
        }
    }
}

/// Move patrols along their paths and face them along the current leg
pub fn advance_patrols(
    time: Res<Time>,
    mut query: Query<(&mut ScreenPos, &mut Patrol, Option<&mut Sprite>)>,
) {
    let dt = time.delta_secs();
    for (mut pos, mut patrol, sprite) in &mut query {
        patrol.elapsed += dt;
        let (x, returning) = patrol.path.sample(patrol.elapsed);
        pos.0.x = x;
        if let Some(mut sprite) = sprite
            && sprite.flip_x != returning
        {
            sprite.flip_x = returning;
        }
    }
}
