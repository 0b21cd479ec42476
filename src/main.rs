//! Earth Diver - window entry point

use bevy::prelude::*;
use earthdiver::{ChallengePlugin, DebugLogConfig, DisplaySettings, SKY_COLOR, Stage, StoryPlugin};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let log_config = DebugLogConfig::load_with_args(&args);

    // Load persistent settings (uses defaults if file doesn't exist)
    let settings = DisplaySettings::load();

    // Save settings on first run to ensure file exists
    if let Err(e) = settings.save() {
        warn!("Failed to save initial settings: {}", e);
    }

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        // The stage is sized once from these settings; no resizing
                        resolution: bevy::window::WindowResolution::new(
                            settings.width as u32,
                            settings.height as u32,
                        )
                        .with_scale_factor_override(1.0),
                        title: settings.title.clone(),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(log_config.log_plugin()),
        )
        .insert_resource(ClearColor(SKY_COLOR))
        .insert_resource(Stage::new(settings.width, settings.height))
        .add_plugins((StoryPlugin, ChallengePlugin))
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}
