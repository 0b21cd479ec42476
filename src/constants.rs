//! Tunable constants for earthdiver
//!
//! All layout, timing and text values for the story live here.

use bevy::prelude::*;

// =============================================================================
// COLORS
// =============================================================================

pub const SKY_COLOR: Color = Color::srgb(0.529, 0.808, 0.922); // #87CEEB
pub const INK: Color = Color::BLACK;
pub const PAPER: Color = Color::WHITE;

// =============================================================================
// STAGE
// =============================================================================

pub const DEFAULT_STAGE_WIDTH: f32 = 1280.0;
pub const DEFAULT_STAGE_HEIGHT: f32 = 720.0;

/// Fractions of stage height where characters stand on the island backdrop
pub const WATERLINE_FRACTION: f32 = 0.8;
pub const ISLAND_FRACTION: f32 = 0.75;
pub const TREE_FRACTION: f32 = 0.4;

// =============================================================================
// Z ORDER
// =============================================================================

pub const Z_BACKDROP: f32 = 0.0;
pub const Z_ACTOR: f32 = 1.0;
pub const Z_SEED: f32 = 1.5;
pub const Z_BLACKOUT: f32 = 5.0;
pub const Z_TEXT: f32 = 10.0;

// =============================================================================
// ART SIZES (unscaled display size of each image)
// =============================================================================

pub const EAGLE_SIZE: Vec2 = Vec2::new(64.0, 64.0);
pub const COYOTE_SIZE: Vec2 = Vec2::new(64.0, 64.0);
pub const TURTLE_SIZE: Vec2 = Vec2::new(64.0, 48.0);
pub const DIVER_SIZE: Vec2 = Vec2::new(32.0, 32.0);
pub const ROCK_SIZE: Vec2 = Vec2::new(64.0, 64.0);
pub const SHARK_SIZE: Vec2 = Vec2::new(96.0, 48.0);
pub const SEED_SIZE: Vec2 = Vec2::new(8.0, 8.0);

pub const CHARACTER_SCALE: f32 = 2.5;
pub const ROCK_SCALE: f32 = 0.5;
pub const SHARK_SCALE: f32 = 1.5;
pub const SEED_SCALE: f32 = 3.0;

// =============================================================================
// STORY TIMING (seconds)
// =============================================================================

pub const LINE_DURATION: f32 = 5.0; // How long each dialogue line stays up
pub const BEAT_PAUSE: f32 = 5.0; // Narrative pauses between beats
pub const TURTLE_SURFACE_TIME: f32 = 5.0; // Intro: turtle swims up to the waterline
pub const TURTLE_RETURN_TIME: f32 = 9.0; // Turtle comes back with the mud
pub const EAGLE_RISE_TIME: f32 = 1.0;
pub const EAGLE_RISE_HEIGHT: f32 = 100.0;
pub const EAGLE_DEPART_TIME: f32 = 6.0;
pub const EAGLE_CROSSING_TIME: f32 = 5.0; // Seed spread flight
pub const SEED_DROP_INTERVAL: f32 = 1.0;
pub const SEED_DROP_COUNT: u32 = 3;
pub const SEED_FALL_TIME: f32 = 3.0;

/// Dialogue bubbles float this far above the speaker
pub const BUBBLE_OFFSET: f32 = 100.0;
pub const WHISPER_OFFSET: f32 = 50.0;

// =============================================================================
// CHALLENGE
// =============================================================================

pub const CHALLENGE_SECONDS: u32 = 20;
pub const COUNTDOWN_TICK: f32 = 1.0; // Seconds per countdown step
pub const WIN_DELAY: f32 = 2.0; // Pause between last pickup and the next scene
pub const DIVER_SPAWN: Vec2 = Vec2::new(50.0, 50.0);
pub const DIVER_STEP: f32 = 5.0; // Units moved per update tick while an arrow is held

/// Rock row: `ROCK_COUNT` rocks starting at `ROCK_ROW_START_X`, `ROCK_ROW_SPACING` apart,
/// `ROCK_ROW_LIFT` above the bottom edge
pub const ROCK_COUNT: u32 = 13;
pub const ROCK_ROW_START_X: f32 = 50.0;
pub const ROCK_ROW_SPACING: f32 = 90.0;
pub const ROCK_ROW_LIFT: f32 = 100.0;

pub const SHARK_LIFT: f32 = 100.0;
pub const SHARK1_LEG_TIME: f32 = 3.0;
pub const SHARK2_LEG_TIME: f32 = 5.0;

pub const COUNTDOWN_LABEL_Y: f32 = 50.0;

// =============================================================================
// TEXT SIZES
// =============================================================================

pub const PROMPT_FONT: f32 = 30.0;
pub const BUBBLE_FONT: f32 = 20.0;
pub const SMALL_BUBBLE_FONT: f32 = 16.0;
pub const BANNER_FONT: f32 = 24.0;
pub const WHISPER_FONT: f32 = 18.0;
pub const NOTICE_FONT: f32 = 24.0;

pub const BUBBLE_WRAP: f32 = 300.0;
pub const BANNER_WRAP: f32 = 600.0;
pub const BUBBLE_PADDING: Vec2 = Vec2::new(10.0, 5.0);
