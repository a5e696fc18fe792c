//! Game state module - the flip-and-match engine
//!
//! Owns the deck, the face-up selection, move counting and completion. All
//! mutation goes through [`MemoryGame::initialize`], [`MemoryGame::handle_click`],
//! [`MemoryGame::tick`] and [`MemoryGame::reset`].
//!
//! The mismatch delay is a scheduled revert owned by the engine and advanced by
//! `tick`, so it can never fire against a game that was reset or re-dealt in
//! the meantime.

use arrayvec::ArrayVec;

use crate::deck::{Deck, PairCards};
use crate::rng::DeckRng;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Engine options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Deal cards face-up for inspection until [`MemoryGame::begin_play`].
    pub reveal_during_setup: bool,
    /// How long a mismatched pair stays visible.
    pub reveal_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reveal_during_setup: false,
            reveal_ms: MISMATCH_REVEAL_MS,
        }
    }
}

/// Mismatched cards waiting to be turned back over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingRevert {
    cards: [CardId; 2],
    remaining_ms: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct MemoryGame {
    config: EngineConfig,
    rng: DeckRng,
    deck: Deck,
    /// Face-up, unmatched cards of the current attempt (in click order).
    flipped: ArrayVec<CardId, 2>,
    matched_pairs: u32,
    total_pairs: u32,
    moves: u32,
    completed: bool,
    phase: Phase,
    pending_revert: Option<PendingRevert>,
}

impl MemoryGame {
    /// Create an empty game with the given RNG seed
    pub fn new(config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, DeckRng::new(seed))
    }

    pub fn with_rng(config: EngineConfig, rng: DeckRng) -> Self {
        Self {
            config,
            rng,
            deck: Deck::new(),
            flipped: ArrayVec::new(),
            matched_pairs: 0,
            total_pairs: 0,
            moves: 0,
            completed: false,
            phase: Phase::Play,
            pending_revert: None,
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Deal a fresh, shuffled table for `pairs`, replacing any previous game.
    ///
    /// An empty pair set leaves the engine empty (and never completed).
    pub fn initialize(&mut self, pairs: &[WordImagePair]) {
        self.reset();
        if pairs.is_empty() {
            return;
        }

        let face_up = self.config.reveal_during_setup;
        self.deck = Deck::deal(pairs, face_up, &mut self.rng);
        self.total_pairs = self.deck.pair_count() as u32;
        self.phase = if face_up { Phase::Setup } else { Phase::Play };
    }

    /// Clear all session state. Cancels a pending mismatch revert.
    pub fn reset(&mut self) {
        self.deck = Deck::new();
        self.flipped.clear();
        self.matched_pairs = 0;
        self.total_pairs = 0;
        self.moves = 0;
        self.completed = false;
        self.phase = Phase::Play;
        self.pending_revert = None;
    }

    /// Leave the setup phase: every card turns face-down and clicks count.
    pub fn begin_play(&mut self) -> bool {
        if self.phase != Phase::Setup {
            return false;
        }
        self.deck.set_all_flipped(false);
        self.phase = Phase::Play;
        true
    }

    /// Handle a click on `card_id`.
    pub fn handle_click(&mut self, card_id: CardId) -> ClickOutcome {
        if self.flipped.is_full() {
            return ClickOutcome::Ignored(IgnoreReason::Resolving);
        }
        let Some(card) = self.deck.card(card_id) else {
            return ClickOutcome::Ignored(IgnoreReason::UnknownCard);
        };
        if card.is_matched {
            return ClickOutcome::Ignored(IgnoreReason::AlreadyMatched);
        }
        if self.flipped.contains(&card_id) {
            return ClickOutcome::Ignored(IgnoreReason::AlreadyFlipped);
        }
        if self.phase == Phase::Setup {
            return ClickOutcome::Ignored(IgnoreReason::SetupPhase);
        }

        let clicked_pair = card.pair_id;
        let first = self.flipped.first().copied();

        if let Some(card) = self.deck.card_mut(card_id) {
            card.is_flipped = true;
        }
        self.flipped.push(card_id);

        let Some(first_id) = first else {
            return ClickOutcome::Flipped;
        };

        // Second flip: one comparison attempt.
        self.moves += 1;

        let first_pair = self.deck.card(first_id).map(|c| c.pair_id);
        if first_pair == Some(clicked_pair) {
            for id in [first_id, card_id] {
                if let Some(card) = self.deck.card_mut(id) {
                    card.is_matched = true;
                    card.is_flipped = true;
                }
            }
            self.matched_pairs += 1;
            if self.matched_pairs == self.total_pairs {
                self.completed = true;
            }
            self.flipped.clear();
            ClickOutcome::Matched {
                pair_id: clicked_pair,
                completed: self.completed,
            }
        } else {
            self.pending_revert = Some(PendingRevert {
                cards: [first_id, card_id],
                remaining_ms: self.config.reveal_ms,
            });
            ClickOutcome::Mismatched
        }
    }

    /// Advance scheduled work by `elapsed_ms`.
    ///
    /// Returns true when a mismatched pair was turned back over.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let Some(pending) = self.pending_revert.as_mut() else {
            return false;
        };

        pending.remaining_ms = pending.remaining_ms.saturating_sub(elapsed_ms);
        if pending.remaining_ms > 0 {
            return false;
        }

        let cards = pending.cards;
        self.pending_revert = None;
        for id in cards {
            if let Some(card) = self.deck.card_mut(id) {
                if !card.is_matched {
                    card.is_flipped = false;
                }
            }
        }
        self.flipped.clear();
        true
    }

    /// Point the image card of `pair_id` at a new URL.
    ///
    /// Flip and match state are left alone.
    pub fn refresh_pair_image(&mut self, pair_id: PairId, image_url: &str) -> bool {
        let Some(cards) = self.deck.cards_of_pair(pair_id) else {
            return false;
        };
        match self.deck.card_mut(cards.image) {
            Some(card) => {
                card.value = image_url.to_string();
                true
            }
            None => false,
        }
    }

    pub fn cards(&self) -> &[Card] {
        self.deck.cards()
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.card(id)
    }

    pub fn pair_of_card(&self, id: CardId) -> Option<PairId> {
        self.deck.card(id).map(|c| c.pair_id)
    }

    pub fn cards_of_pair(&self, pair_id: PairId) -> Option<PairCards> {
        self.deck.cards_of_pair(pair_id)
    }

    pub fn flipped(&self) -> &[CardId] {
        &self.flipped
    }

    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> u32 {
        self.total_pairs
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// A mismatched pair is face-up waiting for its revert.
    pub fn is_resolving(&self) -> bool {
        self.pending_revert.is_some()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.cards.clear();
        out.cards.extend_from_slice(self.deck.cards());
        out.flipped = self.flipped.clone();
        out.matched_pairs = self.matched_pairs;
        out.total_pairs = self.total_pairs;
        out.moves = self.moves;
        out.completed = self.completed;
        out.phase = self.phase;
        out.resolving = self.pending_revert.is_some();
        out.revert_ms = self.pending_revert.map(|p| p.remaining_ms).unwrap_or(0);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for MemoryGame {
    fn default() -> Self {
        Self::new(EngineConfig::default(), 1)
    }
}
