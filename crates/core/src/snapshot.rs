use arrayvec::ArrayVec;

use crate::types::{Card, CardId, Phase};

/// Read-only view of the engine handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Cards in presentation (shuffled) order.
    pub cards: Vec<Card>,
    pub flipped: ArrayVec<CardId, 2>,
    pub matched_pairs: u32,
    pub total_pairs: u32,
    pub moves: u32,
    pub completed: bool,
    pub phase: Phase,
    /// A mismatched pair is face-up waiting to turn back.
    pub resolving: bool,
    pub revert_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.cards.clear();
        self.flipped.clear();
        self.matched_pairs = 0;
        self.total_pairs = 0;
        self.moves = 0;
        self.completed = false;
        self.phase = Phase::Play;
        self.resolving = false;
        self.revert_ms = 0;
    }

    /// Whether a click could currently change anything.
    pub fn playable(&self) -> bool {
        !self.completed && !self.resolving && self.phase == Phase::Play && !self.cards.is_empty()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cards: Vec::new(),
            flipped: ArrayVec::new(),
            matched_pairs: 0,
            total_pairs: 0,
            moves: 0,
            completed: false,
            phase: Phase::Play,
            resolving: false,
            revert_ms: 0,
        }
    }
}
