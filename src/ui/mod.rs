//! UI module - tweens and story text

mod animations;
mod hud;

pub use animations::*;
pub use hud::*;
