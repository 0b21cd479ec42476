//! Headless module - windowless apps for tests and scripted playthroughs

mod app_builder;
mod parallel;

pub use app_builder::*;
pub use parallel::*;
