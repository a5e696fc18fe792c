//! Stage navigation.
//!
//! Screens advance one step at a time (`Home → Input → Review → Play`) and go
//! back one step at a time. When history mirroring is on, every transition is
//! also recorded so history back/forward replay exactly the same transitions.

use crate::types::Stage;

/// Linear history of visited stages with a cursor, browser style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageHistory {
    entries: Vec<Stage>,
    cursor: usize,
}

impl StageHistory {
    pub fn new() -> Self {
        Self {
            entries: vec![Stage::Home],
            cursor: 0,
        }
    }

    pub fn current(&self) -> Stage {
        self.entries[self.cursor]
    }

    /// Record a forward transition, discarding any forward entries.
    pub fn push(&mut self, stage: Stage) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(stage);
        self.cursor += 1;
    }

    pub fn retreat(&mut self) -> Option<Stage> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor])
    }

    pub fn peek_forward(&self) -> Option<Stage> {
        self.entries.get(self.cursor + 1).copied()
    }

    pub fn advance(&mut self) -> Option<Stage> {
        let next = self.peek_forward()?;
        self.cursor += 1;
        Some(next)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StageHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Current stage plus optional history mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    stage: Stage,
    history: Option<StageHistory>,
}

impl Navigator {
    pub fn new(mirror_history: bool) -> Self {
        Self {
            stage: Stage::Home,
            history: mirror_history.then(StageHistory::new),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn history(&self) -> Option<&StageHistory> {
        self.history.as_ref()
    }

    /// Move forward to `to`. Only the next stage in order is accepted.
    pub fn advance(&mut self, to: Stage) -> bool {
        if self.stage.forward_target() != Some(to) {
            return false;
        }
        self.stage = to;
        if let Some(history) = self.history.as_mut() {
            history.push(to);
        }
        true
    }

    /// Go back one step. Returns the new stage, or `None` on `Home`.
    pub fn back(&mut self) -> Option<Stage> {
        let target = self.stage.back_target()?;
        self.stage = target;
        if let Some(history) = self.history.as_mut() {
            history.retreat();
        }
        Some(target)
    }

    /// Stage a history forward step would enter, if any.
    pub fn peek_forward(&self) -> Option<Stage> {
        let next = self.history.as_ref()?.peek_forward()?;
        (self.stage.forward_target() == Some(next)).then_some(next)
    }

    /// Replay the recorded forward transition.
    pub fn replay_forward(&mut self) -> Option<Stage> {
        let next = self.peek_forward()?;
        self.history.as_mut()?.advance();
        self.stage = next;
        Some(next)
    }

    /// Return to `Home` and forget history.
    pub fn reset(&mut self) {
        self.stage = Stage::Home;
        if let Some(history) = self.history.as_mut() {
            *history = StageHistory::new();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_only_to_next_stage() {
        let mut nav = Navigator::new(false);
        assert!(!nav.advance(Stage::Review));
        assert!(nav.advance(Stage::Input));
        assert!(!nav.advance(Stage::Play));
        assert!(nav.advance(Stage::Review));
        assert!(nav.advance(Stage::Play));
        assert_eq!(nav.stage(), Stage::Play);
    }

    #[test]
    fn test_back_one_step() {
        let mut nav = Navigator::new(false);
        nav.advance(Stage::Input);
        nav.advance(Stage::Review);
        nav.advance(Stage::Play);

        assert_eq!(nav.back(), Some(Stage::Review));
        assert_eq!(nav.back(), Some(Stage::Input));
        assert_eq!(nav.back(), Some(Stage::Home));
        assert_eq!(nav.back(), None);
        assert_eq!(nav.stage(), Stage::Home);
    }

    #[test]
    fn test_history_disabled_has_no_forward() {
        let mut nav = Navigator::new(false);
        nav.advance(Stage::Input);
        nav.back();
        assert!(nav.history().is_none());
        assert_eq!(nav.peek_forward(), None);
        assert_eq!(nav.replay_forward(), None);
    }

    #[test]
    fn test_history_replays_forward() {
        let mut nav = Navigator::new(true);
        nav.advance(Stage::Input);
        nav.advance(Stage::Review);
        nav.back();
        nav.back();
        assert_eq!(nav.stage(), Stage::Home);

        assert_eq!(nav.replay_forward(), Some(Stage::Input));
        assert_eq!(nav.replay_forward(), Some(Stage::Review));
        assert_eq!(nav.replay_forward(), None);
        assert_eq!(nav.history().unwrap().current(), Stage::Review);
    }

    #[test]
    fn test_new_forward_transition_truncates_history() {
        let mut nav = Navigator::new(true);
        nav.advance(Stage::Input);
        nav.advance(Stage::Review);
        nav.back();
        nav.back();
        nav.advance(Stage::Input);

        assert_eq!(nav.history().unwrap().len(), 2);
        assert_eq!(nav.peek_forward(), None);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut nav = Navigator::new(true);
        nav.advance(Stage::Input);
        nav.advance(Stage::Review);
        nav.reset();

        assert_eq!(nav.stage(), Stage::Home);
        assert_eq!(nav.history().unwrap().len(), 1);
        assert_eq!(nav.peek_forward(), None);
    }

    #[test]
    fn test_stage_history_cursor() {
        let mut history = StageHistory::new();
        assert_eq!(history.retreat(), None);
        history.push(Stage::Input);
        assert_eq!(history.current(), Stage::Input);
        assert_eq!(history.retreat(), Some(Stage::Home));
        assert_eq!(history.advance(), Some(Stage::Input));
        assert_eq!(history.advance(), None);
    }
}
