//! Challenge rules - win and loss, decided once

use bevy::prelude::*;

use crate::constants::*;
use crate::countdown::Countdown;
use crate::story::StoryScene;

/// How the challenge ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// Decide this frame's outcome. The win check comes before the tick, so
/// clearing the last rock on the frame the clock would hit zero still wins.
pub fn judge(rocks_left: u32, countdown: &mut Countdown, dt: f32) -> Option<Outcome> {
    if rocks_left == 0 {
        return Some(Outcome::Won);
    }
    let fired = countdown.tick(dt);
    if fired > 0 {
        debug!("Countdown at {}", countdown.remaining());
    }
    countdown.is_expired().then_some(Outcome::Lost)
}

/// Live state of the underwater challenge. Inserted on enter, removed on exit.
#[derive(Resource, Debug, Clone)]
pub struct Challenge {
    pub countdown: Countdown,
    /// Tracked here because despawns land after the frame
    pub rocks_left: u32,
    pub outcome: Option<Outcome>,
    /// Time since the win, counted toward the hand-off delay
    pub win_elapsed: f32,
    pub handed_off: bool,
}

impl Default for Challenge {
    fn default() -> Self {
        Self::new(CHALLENGE_SECONDS, ROCK_COUNT)
    }
}

impl Challenge {
    pub fn new(seconds: u32, rocks: u32) -> Self {
        Self {
            countdown: Countdown::new(seconds),
            rocks_left: rocks,
            outcome: None,
            win_elapsed: 0.0,
            handed_off: false,
        }
    }

    pub fn collect(&mut self) {
        self.rocks_left = self.rocks_left.saturating_sub(1);
    }

    /// Advance one frame. Returns the scene to hand off to, at most once.
    pub fn update(&mut self, dt: f32) -> Option<StoryScene> {
        if self.handed_off {
            return None;
        }
        match self.outcome {
            None => match judge(self.rocks_left, &mut self.countdown, dt) {
                Some(Outcome::Won) => {
                    self.outcome = Some(Outcome::Won);
                    self.countdown.pause();
                    info!(
                        "All rocks collected with {} s left",
                        self.countdown.remaining()
                    );
                    None
                }
                Some(Outcome::Lost) => {
                    self.outcome = Some(Outcome::Lost);
                    self.handed_off = true;
                    info!("Out of time with {} rocks left", self.rocks_left);
                    Some(StoryScene::LandReveal)
                }
                None => None,
            },
            Some(Outcome::Won) => {
                self.win_elapsed += dt;
                if self.win_elapsed >= WIN_DELAY {
                    self.handed_off = true;
                    Some(StoryScene::MudReturnMessage)
                } else {
                    None
                }
            }
            Some(Outcome::Lost) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_loses_once_at_tick_twenty() {
        let mut challenge = Challenge::default();
        let mut handoffs = Vec::new();
        for tick in 1..=30 {
            if let Some(scene) = challenge.update(1.0) {
                handoffs.push((tick, scene));
            }
        }
        assert_eq!(handoffs, vec![(20, StoryScene::LandReveal)]);
        assert_eq!(challenge.outcome, Some(Outcome::Lost));
    }

    #[test]
    fn test_win_on_last_tick_beats_expiry() {
        let mut challenge = Challenge::new(20, 2);
        for _ in 0..19 {
            assert!(challenge.update(1.0).is_none());
        }
        challenge.collect();
        challenge.collect();
        // This frame would take the clock to zero
        assert!(challenge.update(1.0).is_none());
        assert_eq!(challenge.outcome, Some(Outcome::Won));
        assert_eq!(challenge.countdown.remaining(), 1);
    }

    #[test]
    fn test_win_waits_before_handing_off() {
        let mut challenge = Challenge::new(20, 1);
        challenge.collect();
        assert!(challenge.update(0.5).is_none());
        assert!(challenge.countdown.is_paused());
        assert!(challenge.update(1.0).is_none());
        assert_eq!(challenge.update(1.0), Some(StoryScene::MudReturnMessage));
        // Nothing after the hand-off, and the clock stays put
        assert!(challenge.update(30.0).is_none());
        assert_eq!(challenge.countdown.remaining(), 20);
    }

    #[test]
    fn test_collect_saturates() {
        let mut challenge = Challenge::new(20, 1);
        challenge.collect();
        challenge.collect();
        assert_eq!(challenge.rocks_left, 0);
    }
}
