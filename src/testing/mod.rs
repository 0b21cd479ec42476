//! Scripted playthroughs for deterministic story testing
//!
//! Scenarios are TOML files of keyboard steps with expected scenes,
//! replayed against a headless app.

pub mod assertions;
pub mod parser;
pub mod runner;

pub use assertions::{AssertionError, check_rocks_left, check_scene};
pub use parser::{Action, Scenario, ScenarioSetup, Step, parse_scenario, parse_scenario_file};
pub use runner::{ScenarioResult, frames_for, run_scenario};

/// Default path for scenario files
pub const SCENARIOS_DIR: &str = "tests/scenarios";
