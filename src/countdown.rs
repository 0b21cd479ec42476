//! Challenge countdown - whole seconds ticking down to zero
//!
//! Shown as "Time: N" at the top of the underwater scene.

use bevy::prelude::*;

use crate::constants::*;
use crate::world::{Stage, Tableau};

/// Seconds left in the challenge
#[derive(Debug, Clone)]
pub struct Countdown {
    /// Whole seconds remaining (never below zero)
    remaining: u32,
    /// Time accumulated toward the next tick
    elapsed: f32,
    paused: bool,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            elapsed: 0.0,
            paused: false,
        }
    }

    /// Accumulate `dt` and return how many ticks fired
    pub fn tick(&mut self, dt: f32) -> u32 {
        if self.paused || self.remaining == 0 {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.remaining > 0 && self.elapsed >= COUNTDOWN_TICK {
            self.elapsed -= COUNTDOWN_TICK;
            self.remaining -= 1;
            fired += 1;
        }
        fired
    }

    /// Stop ticking for good
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn label(&self) -> String {
        format!("Time: {}", self.remaining)
    }
}

/// Marker for the countdown text entity
#[derive(Component)]
pub struct CountdownLabel;

/// Spawn the countdown label: white text on a black plate, top center
pub fn spawn_countdown_label(commands: &mut Commands, stage: &Stage, countdown: &Countdown) {
    let pos = Vec2::new(stage.width / 2.0, COUNTDOWN_LABEL_Y);
    commands
        .spawn((
            Sprite::from_color(Color::BLACK, Vec2::new(160.0, 44.0)),
            Transform::from_translation(stage.to_world(pos, Z_TEXT)),
            Tableau,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text2d::new(countdown.label()),
                TextFont {
                    font_size: NOTICE_FONT,
                    ..default()
                },
                TextLayout::new_with_justify(bevy::text::Justify::Center),
                TextColor(PAPER),
                Transform::from_xyz(0.0, 0.0, 0.1),
                CountdownLabel,
            ));
        });
}
