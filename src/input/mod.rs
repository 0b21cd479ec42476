//! Input module - StoryInput resource and capture_input system

use bevy::prelude::*;

use crate::helpers::exclusive_axis;

/// Keyboard state sampled once per frame for the story and the challenge
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct StoryInput {
    pub any_pressed: bool,   // Any key went down this frame
    pub enter_pressed: bool, // Enter went down this frame
    /// Held arrow keys collapsed per axis, screen space (+y is down)
    pub steer: Vec2,
}

/// Which key releases a keypress gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyGate {
    Any,
    Enter,
}

impl StoryInput {
    /// Whether this frame's presses open the given gate
    pub fn opens(&self, gate: KeyGate) -> bool {
        match gate {
            KeyGate::Any => self.any_pressed,
            KeyGate::Enter => self.enter_pressed,
        }
    }
}

/// Runs first in Update so every system in the frame sees the same snapshot.
pub fn capture_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<StoryInput>) {
    input.any_pressed = keyboard.get_just_pressed().next().is_some();
    input.enter_pressed = keyboard.just_pressed(KeyCode::Enter);

    let x = exclusive_axis(
        keyboard.pressed(KeyCode::ArrowLeft),
        keyboard.pressed(KeyCode::ArrowRight),
    );
    let y = exclusive_axis(
        keyboard.pressed(KeyCode::ArrowUp),
        keyboard.pressed(KeyCode::ArrowDown),
    );
    input.steer = Vec2::new(x, y);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(keys: &[KeyCode], held: &[KeyCode]) -> StoryInput {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<StoryInput>()
            .add_systems(Update, capture_input);
        {
            let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            for key in keys {
                keyboard.press(*key);
            }
            for key in held {
                keyboard.press(*key);
                keyboard.clear_just_pressed(*key);
            }
        }
        app.update();
        app.world().resource::<StoryInput>().clone()
    }

    #[test]
    fn test_enter_opens_both_gates() {
        let input = snapshot(&[KeyCode::Enter], &[]);
        assert!(input.opens(KeyGate::Any));
        assert!(input.opens(KeyGate::Enter));
    }

    #[test]
    fn test_other_key_only_opens_any() {
        let input = snapshot(&[KeyCode::Space], &[]);
        assert!(input.opens(KeyGate::Any));
        assert!(!input.opens(KeyGate::Enter));
    }

    #[test]
    fn test_held_keys_steer_but_do_not_press() {
        let input = snapshot(
            &[],
            &[KeyCode::ArrowLeft, KeyCode::ArrowRight, KeyCode::ArrowDown],
        );
        assert!(!input.any_pressed);
        assert_eq!(input.steer, Vec2::new(-1.0, 1.0));
    }
}
