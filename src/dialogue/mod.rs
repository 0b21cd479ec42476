//! Dialogue player - timed lines shown one at a time above their speakers
//!
//! The player is frame-driven: callers feed it elapsed time and apply the
//! events it returns. It never blocks and never recurses, so a list of any
//! length plays in constant stack space.

use crate::story::Role;

/// One spoken line
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueLine {
    pub speaker: Role,
    pub text: String,
    /// Seconds the line stays on screen
    pub duration: f32,
}

impl DialogueLine {
    pub fn new(speaker: Role, text: impl Into<String>, duration: f32) -> Self {
        Self {
            speaker,
            text: text.into(),
            duration,
        }
    }
}

/// What the caller should do this frame
#[derive(Debug, Clone, PartialEq)]
pub enum DialogueEvent {
    /// Put this line on screen
    Show(DialogueLine),
    /// Take the current line down
    Hide,
    /// Every line has played; continue with whatever comes next
    Finished,
}

/// Plays an ordered list of lines
#[derive(Debug, Clone)]
pub struct DialoguePlayer {
    lines: Vec<DialogueLine>,
    index: usize,
    elapsed: f32,
    started: bool,
    finished: bool,
}

impl DialoguePlayer {
    pub fn new(lines: Vec<DialogueLine>) -> Self {
        Self {
            lines,
            index: 0,
            elapsed: 0.0,
            started: false,
            finished: false,
        }
    }

    /// Show the first line, or finish at once when there are none
    pub fn start(&mut self) -> Vec<DialogueEvent> {
        if self.started {
            return Vec::new();
        }
        self.started = true;
        match self.lines.first() {
            Some(line) => vec![DialogueEvent::Show(line.clone())],
            None => {
                self.finished = true;
                vec![DialogueEvent::Finished]
            }
        }
    }

    /// Let `dt` seconds pass. Time left over after a line ends counts
    /// toward the next one, so a long frame can retire several lines.
    pub fn advance(&mut self, dt: f32) -> Vec<DialogueEvent> {
        let mut events = Vec::new();
        if !self.started || self.finished {
            return events;
        }
        self.elapsed += dt;

        while let Some(line) = self.lines.get(self.index) {
            if self.elapsed < line.duration {
                break;
            }
            self.elapsed -= line.duration;
            self.index += 1;
            events.push(DialogueEvent::Hide);
            match self.lines.get(self.index) {
                Some(next) => events.push(DialogueEvent::Show(next.clone())),
                None => {
                    self.finished = true;
                    events.push(DialogueEvent::Finished);
                }
            }
        }
        events
    }

    pub fn current(&self) -> Option<&DialogueLine> {
        if self.started && !self.finished {
            self.lines.get(self.index)
        } else {
            None
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Time left over past the end of the last line
    pub fn overshoot(&self) -> f32 {
        if self.finished { self.elapsed } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize, duration: f32) -> Vec<DialogueLine> {
        (0..n)
            .map(|i| DialogueLine::new(Role::Turtle, format!("line {i}"), duration))
            .collect()
    }

    fn shown(events: &[DialogueEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| match e {
                DialogueEvent::Show(line) => Some(line.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_finishes_immediately() {
        let mut player = DialoguePlayer::new(Vec::new());
        assert_eq!(player.start(), vec![DialogueEvent::Finished]);
        assert!(player.is_finished());
        assert!(player.advance(10.0).is_empty());
    }

    #[test]
    fn test_lines_play_in_order_for_their_duration() {
        let mut player = DialoguePlayer::new(lines(3, 5.0));
        let mut events = player.start();
        assert_eq!(shown(&events), vec!["line 0"]);

        // Just short of the duration: nothing changes
        assert!(player.advance(4.5).is_empty());
        assert_eq!(player.current().map(|l| l.text.as_str()), Some("line 0"));

        events = player.advance(0.5);
        assert_eq!(events[0], DialogueEvent::Hide);
        assert_eq!(shown(&events), vec!["line 1"]);

        events = player.advance(5.0);
        assert_eq!(shown(&events), vec!["line 2"]);

        events = player.advance(5.0);
        assert_eq!(events, vec![DialogueEvent::Hide, DialogueEvent::Finished]);
        assert!(player.is_finished());
        assert!(player.current().is_none());
    }

    #[test]
    fn test_exactly_n_show_hide_cycles() {
        for n in 1..6 {
            let mut player = DialoguePlayer::new(lines(n, 1.0));
            let mut events = player.start();
            while !player.is_finished() {
                events.extend(player.advance(0.25));
            }
            let shows = events.iter().filter(|e| matches!(e, DialogueEvent::Show(_))).count();
            let hides = events.iter().filter(|e| **e == DialogueEvent::Hide).count();
            assert_eq!(shows, n);
            assert_eq!(hides, n);
            assert_eq!(events.last(), Some(&DialogueEvent::Finished));
        }
    }

    #[test]
    fn test_long_frame_retires_several_lines() {
        let mut player = DialoguePlayer::new(lines(3, 1.0));
        player.start();
        let events = player.advance(2.5);
        assert_eq!(shown(&events), vec!["line 1", "line 2"]);
        assert_eq!(player.current().map(|l| l.text.as_str()), Some("line 2"));
    }

    #[test]
    fn test_overshoot_only_after_last_line() {
        let mut player = DialoguePlayer::new(lines(2, 1.0));
        player.start();
        player.advance(1.25);
        assert_eq!(player.overshoot(), 0.0);
        player.advance(1.5);
        assert!(player.is_finished());
        assert_eq!(player.overshoot(), 0.75);
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut player = DialoguePlayer::new(lines(1, 1.0));
        assert_eq!(player.start().len(), 1);
        assert!(player.start().is_empty());
    }

    #[test]
    fn test_advance_before_start_does_nothing() {
        let mut player = DialoguePlayer::new(lines(2, 1.0));
        assert!(player.advance(5.0).is_empty());
        assert!(!player.is_finished());
    }
}
