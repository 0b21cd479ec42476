//! Cue runner - steps through a scene's script one cue at a time
//!
//! A scene script is a flat list of cues. Instant cues (captions, spawns,
//! blackouts) fire back to back; holding cues (waits, blocking moves,
//! dialogue, keypress gates) suspend the runner until a later frame.
//! The runner only produces [`Effect`]s; the Bevy glue applies them.

use bevy::prelude::*;

use super::{Role, StoryScene};
use crate::dialogue::{DialogueEvent, DialogueLine, DialoguePlayer};
use crate::input::{KeyGate, StoryInput};
use crate::ui::{Ease, TextStyle};
use crate::world::ActorSpec;

/// Where a caption goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Fixed screen position
    At(Vec2),
    /// This far above a cast member's current position
    Above(Role, f32),
}

/// Text that stays on screen until cleared
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    pub placement: Placement,
    pub style: TextStyle,
}

impl Caption {
    pub fn new(text: impl Into<String>, placement: Placement, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            placement,
            style,
        }
    }
}

/// One step of a scene script
#[derive(Debug, Clone, PartialEq)]
pub enum Cue {
    Caption(Caption),
    ClearCaptions,
    /// Bring a cast member on stage
    Enter(Role, ActorSpec),
    Blackout,
    /// Hold for this many seconds
    Wait(f32),
    /// Tween a cast member to a screen position; blocking moves hold until arrival
    Move {
        role: Role,
        to: Vec2,
        duration: f32,
        ease: Ease,
        blocking: bool,
    },
    /// Play lines through the dialogue player, holding until the last one ends
    Dialogue(Vec<DialogueLine>),
    /// Hold until the gate's key is pressed
    AwaitKey(KeyGate),
    /// Attach a seed dropper to a cast member
    DropSeeds { role: Role, interval: f32, count: u32 },
    /// Hand off to the next scene; nothing after this runs
    Advance(StoryScene),
}

/// Something the glue must do this frame
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Caption(Caption),
    ClearCaptions,
    Enter(Role, ActorSpec),
    Blackout,
    Move {
        role: Role,
        to: Vec2,
        duration: f32,
        ease: Ease,
    },
    ShowLine(DialogueLine),
    HideLine,
    DropSeeds { role: Role, interval: f32, count: u32 },
    Advance(StoryScene),
}

#[derive(Debug, Clone)]
enum Hold {
    Ready,
    Wait(f32),
    Dialogue(DialoguePlayer),
    Key(KeyGate),
    Done,
}

/// Walks a cue list frame by frame
#[derive(Debug, Clone)]
pub struct CueRunner {
    cues: Vec<Cue>,
    cursor: usize,
    hold: Hold,
}

impl CueRunner {
    pub fn new(cues: Vec<Cue>) -> Self {
        Self {
            cues,
            cursor: 0,
            hold: Hold::Ready,
        }
    }

    /// Run until the next holding cue.
    ///
    /// Cues reached on a runner's first call start counting next frame.
    /// Time left over when a wait or dialogue ends carries into the cue
    /// that follows, so a long frame can pass several timed holds. Blocking
    /// moves start from zero to stay in step with their tween. A keypress
    /// opens at most one gate per call.
    pub fn update(&mut self, dt: f32, input: &StoryInput) -> Vec<Effect> {
        let mut effects = Vec::new();
        let mut dt = if matches!(self.hold, Hold::Ready) { 0.0 } else { dt };
        let mut key_spent = false;

        loop {
            match &mut self.hold {
                Hold::Done => break,
                Hold::Wait(remaining) => {
                    *remaining -= dt;
                    if *remaining > 0.0 {
                        break;
                    }
                    dt = -*remaining;
                    self.hold = Hold::Ready;
                }
                Hold::Dialogue(player) => {
                    let events = player.advance(dt);
                    if !push_dialogue(events, &mut effects) {
                        break;
                    }
                    dt = player.overshoot();
                    self.hold = Hold::Ready;
                }
                Hold::Key(gate) => {
                    if key_spent || !input.opens(*gate) {
                        break;
                    }
                    key_spent = true;
                    dt = 0.0;
                    debug!("Key gate {:?} opened at cue {}", gate, self.cursor);
                    self.hold = Hold::Ready;
                }
                Hold::Ready => {
                    let Some(cue) = self.cues.get(self.cursor).cloned() else {
                        self.hold = Hold::Done;
                        break;
                    };
                    self.cursor += 1;
                    // Tweens start counting the frame after they spawn
                    if matches!(cue, Cue::Move { blocking: true, .. }) {
                        dt = 0.0;
                    }
                    self.hold = begin(cue, &mut effects);
                }
            }
        }
        effects
    }

    pub fn is_done(&self) -> bool {
        matches!(self.hold, Hold::Done)
    }

    /// The gate the runner is parked on, if any
    pub fn awaiting_key(&self) -> Option<KeyGate> {
        match self.hold {
            Hold::Key(gate) => Some(gate),
            _ => None,
        }
    }
}

/// Start a cue and return what it holds on
fn begin(cue: Cue, effects: &mut Vec<Effect>) -> Hold {
    match cue {
        Cue::Caption(caption) => {
            effects.push(Effect::Caption(caption));
            Hold::Ready
        }
        Cue::ClearCaptions => {
            effects.push(Effect::ClearCaptions);
            Hold::Ready
        }
        Cue::Enter(role, spec) => {
            effects.push(Effect::Enter(role, spec));
            Hold::Ready
        }
        Cue::Blackout => {
            effects.push(Effect::Blackout);
            Hold::Ready
        }
        Cue::Wait(seconds) => Hold::Wait(seconds),
        Cue::Move {
            role,
            to,
            duration,
            ease,
            blocking,
        } => {
            effects.push(Effect::Move {
                role,
                to,
                duration,
                ease,
            });
            if blocking {
                Hold::Wait(duration)
            } else {
                Hold::Ready
            }
        }
        Cue::Dialogue(lines) => {
            let mut player = DialoguePlayer::new(lines);
            if push_dialogue(player.start(), effects) {
                Hold::Ready
            } else {
                Hold::Dialogue(player)
            }
        }
        Cue::AwaitKey(gate) => Hold::Key(gate),
        Cue::DropSeeds {
            role,
            interval,
            count,
        } => {
            effects.push(Effect::DropSeeds {
                role,
                interval,
                count,
            });
            Hold::Ready
        }
        Cue::Advance(scene) => {
            effects.push(Effect::Advance(scene));
            Hold::Done
        }
    }
}

/// Translate dialogue events; returns true once the dialogue has finished
fn push_dialogue(events: Vec<DialogueEvent>, effects: &mut Vec<Effect>) -> bool {
    let mut finished = false;
    for event in events {
        match event {
            DialogueEvent::Show(line) => effects.push(Effect::ShowLine(line)),
            DialogueEvent::Hide => effects.push(Effect::HideLine),
            DialogueEvent::Finished => finished = true,
        }
    }
    finished
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Art;

    fn idle() -> StoryInput {
        StoryInput::default()
    }

    fn press_enter() -> StoryInput {
        StoryInput {
            any_pressed: true,
            enter_pressed: true,
            ..default()
        }
    }

    fn press_space() -> StoryInput {
        StoryInput {
            any_pressed: true,
            ..default()
        }
    }

    fn caption(text: &str) -> Cue {
        Cue::Caption(Caption::new(text, Placement::At(Vec2::ZERO), TextStyle::Notice))
    }

    fn advances(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::Advance(_)))
            .count()
    }

    #[test]
    fn test_instant_cues_fire_together() {
        let mut runner = CueRunner::new(vec![
            Cue::Blackout,
            caption("hello"),
            Cue::Enter(Role::Eagle, ActorSpec::new(Art::Eagle, Vec2::ZERO)),
        ]);
        let effects = runner.update(0.0, &idle());
        assert_eq!(effects.len(), 3);
        assert_eq!(effects[0], Effect::Blackout);
        assert!(runner.is_done());
    }

    #[test]
    fn test_wait_holds_for_duration() {
        let mut runner = CueRunner::new(vec![Cue::Wait(1.0), caption("after")]);
        assert!(runner.update(0.5, &idle()).is_empty()); // Frame that started the wait
        assert!(runner.update(0.5, &idle()).is_empty());
        assert!(runner.update(0.25, &idle()).is_empty());
        let effects = runner.update(0.25, &idle());
        assert_eq!(effects.len(), 1);
        assert!(runner.is_done());
    }

    #[test]
    fn test_wait_overshoot_carries_into_next_wait() {
        let mut runner = CueRunner::new(vec![Cue::Wait(1.0), Cue::Wait(1.0), caption("after")]);
        assert!(runner.update(0.0, &idle()).is_empty());
        // Half a second of this frame belongs to the second wait
        assert!(runner.update(1.5, &idle()).is_empty());
        assert_eq!(runner.update(0.5, &idle()).len(), 1);
        assert!(runner.is_done());
    }

    #[test]
    fn test_long_frame_passes_several_waits() {
        let mut runner = CueRunner::new(vec![
            Cue::Wait(0.5),
            caption("one"),
            Cue::Wait(0.5),
            caption("two"),
        ]);
        runner.update(0.0, &idle());
        assert_eq!(runner.update(1.0, &idle()).len(), 2);
        assert!(runner.is_done());
    }

    #[test]
    fn test_dialogue_overshoot_carries_into_wait() {
        let line = DialogueLine::new(Role::Coyote, "only", 1.0);
        let mut runner = CueRunner::new(vec![
            Cue::Dialogue(vec![line.clone()]),
            Cue::Wait(1.0),
            caption("after"),
        ]);
        assert_eq!(runner.update(0.0, &idle()), vec![Effect::ShowLine(line)]);
        assert_eq!(runner.update(1.5, &idle()), vec![Effect::HideLine]);
        assert_eq!(runner.update(0.5, &idle()).len(), 1);
        assert!(runner.is_done());
    }

    #[test]
    fn test_blocking_move_ignores_overshoot() {
        let mut runner = CueRunner::new(vec![
            Cue::Wait(1.0),
            Cue::Move {
                role: Role::Eagle,
                to: Vec2::ZERO,
                duration: 1.0,
                ease: Ease::Linear,
                blocking: true,
            },
            caption("landed"),
        ]);
        runner.update(0.0, &idle());
        assert_eq!(runner.update(1.5, &idle()).len(), 1); // The move
        assert!(runner.update(0.5, &idle()).is_empty());
        assert_eq!(runner.update(0.5, &idle()).len(), 1);
    }

    #[test]
    fn test_time_before_keypress_does_not_carry() {
        let mut runner = CueRunner::new(vec![
            Cue::AwaitKey(KeyGate::Any),
            Cue::Wait(1.0),
            caption("after"),
        ]);
        runner.update(0.0, &idle());
        assert!(runner.update(5.0, &press_space()).is_empty());
        assert!(runner.update(0.5, &idle()).is_empty());
        assert_eq!(runner.update(0.5, &idle()).len(), 1);
    }

    #[test]
    fn test_key_gate_fires_once() {
        let mut runner = CueRunner::new(vec![
            Cue::AwaitKey(KeyGate::Enter),
            Cue::Advance(StoryScene::SeedReturnDialogue),
        ]);
        assert!(runner.update(0.1, &idle()).is_empty());
        assert_eq!(runner.awaiting_key(), Some(KeyGate::Enter));

        let effects = runner.update(0.1, &press_enter());
        assert_eq!(effects, vec![Effect::Advance(StoryScene::SeedReturnDialogue)]);

        // Further presses after the hand-off do nothing
        assert!(runner.update(0.1, &press_enter()).is_empty());
        assert!(runner.update(0.1, &press_enter()).is_empty());
    }

    #[test]
    fn test_other_keys_do_not_open_enter_gate() {
        let mut runner = CueRunner::new(vec![
            Cue::AwaitKey(KeyGate::Enter),
            Cue::Advance(StoryScene::LandReveal),
        ]);
        for _ in 0..5 {
            assert!(runner.update(0.1, &press_space()).is_empty());
        }
        assert_eq!(advances(&runner.update(0.1, &press_enter())), 1);
    }

    #[test]
    fn test_one_press_opens_one_gate() {
        let mut runner = CueRunner::new(vec![
            Cue::AwaitKey(KeyGate::Enter),
            caption("first"),
            Cue::AwaitKey(KeyGate::Enter),
            caption("second"),
        ]);
        runner.update(0.0, &idle());
        let effects = runner.update(0.1, &press_enter());
        assert_eq!(effects.len(), 1);
        assert_eq!(runner.awaiting_key(), Some(KeyGate::Enter));
        let effects = runner.update(0.1, &press_enter());
        assert_eq!(effects.len(), 1);
        assert!(runner.is_done());
    }

    #[test]
    fn test_blocking_move_waits_for_arrival() {
        let mut runner = CueRunner::new(vec![
            Cue::Move {
                role: Role::Turtle,
                to: Vec2::new(10.0, 10.0),
                duration: 1.0,
                ease: Ease::Power2,
                blocking: true,
            },
            caption("arrived"),
        ]);
        let effects = runner.update(0.0, &idle());
        assert!(matches!(effects[0], Effect::Move { .. }));
        assert!(runner.update(0.5, &idle()).is_empty());
        assert_eq!(runner.update(0.5, &idle()).len(), 1);
    }

    #[test]
    fn test_non_blocking_move_continues() {
        let mut runner = CueRunner::new(vec![
            Cue::Move {
                role: Role::Eagle,
                to: Vec2::ZERO,
                duration: 5.0,
                ease: Ease::Linear,
                blocking: false,
            },
            caption("right away"),
        ]);
        assert_eq!(runner.update(0.0, &idle()).len(), 2);
    }

    #[test]
    fn test_empty_dialogue_continues_immediately() {
        let mut runner = CueRunner::new(vec![
            Cue::Dialogue(Vec::new()),
            Cue::Advance(StoryScene::TurtleThanksMessage),
        ]);
        let effects = runner.update(0.0, &idle());
        assert_eq!(effects, vec![Effect::Advance(StoryScene::TurtleThanksMessage)]);
    }

    #[test]
    fn test_dialogue_shows_each_line_then_continues() {
        let lines = vec![
            DialogueLine::new(Role::Turtle, "one", 1.0),
            DialogueLine::new(Role::Eagle, "two", 1.0),
        ];
        let mut runner = CueRunner::new(vec![
            Cue::Dialogue(lines.clone()),
            Cue::Advance(StoryScene::LandReveal),
        ]);
        assert_eq!(runner.update(0.0, &idle()), vec![Effect::ShowLine(lines[0].clone())]);
        assert!(runner.update(0.5, &idle()).is_empty());
        assert_eq!(
            runner.update(0.5, &idle()),
            vec![Effect::HideLine, Effect::ShowLine(lines[1].clone())]
        );
        assert_eq!(
            runner.update(1.0, &idle()),
            vec![Effect::HideLine, Effect::Advance(StoryScene::LandReveal)]
        );
    }

    #[test]
    fn test_runs_out_of_cues_without_advancing() {
        let mut runner = CueRunner::new(Vec::new());
        assert!(runner.update(1.0, &press_enter()).is_empty());
        assert!(runner.is_done());
    }
}
