//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (game engine, image acquisition, terminal rendering).
//!
//! # Identity
//!
//! - [`PairId`]: dense index `0..n-1` of a word/image pair within one pair set
//! - [`CardId`]: stable id of one card on the table (two cards per pair)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `MISMATCH_REVEAL_MS` | 1000 | How long a mismatched pair stays face-up |
//!
//! # Examples
//!
//! ```
//! use memory_match_types::{GameSize, Stage, CardKind};
//!
//! // Parse a game size from the number of pairs
//! let size = GameSize::from_pairs(6).unwrap();
//! assert_eq!(size.pairs(), 6);
//! assert_eq!(size.cards(), 12);
//!
//! // Stages step back one screen at a time
//! assert_eq!(Stage::Play.back_target(), Some(Stage::Review));
//! assert_eq!(Stage::Home.back_target(), None);
//!
//! assert_eq!(CardKind::from_str("image"), Some(CardKind::Image));
//! ```

/// Identifier of a word/image pair (dense, `0..n-1` within one pair set).
pub type PairId = u32;

/// Identifier of a single card on the table.
pub type CardId = u32;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Time a mismatched pair stays visible before both cards turn back over.
pub const MISMATCH_REVEAL_MS: u32 = 1000;

/// Number of candidates sampled from one page of search hits.
pub const CANDIDATES_PER_QUERY: usize = 3;

/// Game sizes offered on the home screen, in display order.
pub const GAME_SIZES: [GameSize; 4] = [
    GameSize::Four,
    GameSize::Six,
    GameSize::Eight,
    GameSize::Ten,
];

/// Number of pairs the player asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSize {
    Four,
    Six,
    Eight,
    Ten,
}

impl GameSize {
    /// Parse from a pair count
    ///
    /// # Examples
    ///
    /// ```
    /// use memory_match_types::GameSize;
    ///
    /// assert_eq!(GameSize::from_pairs(4), Some(GameSize::Four));
    /// assert_eq!(GameSize::from_pairs(10), Some(GameSize::Ten));
    /// assert_eq!(GameSize::from_pairs(5), None);
    /// ```
    pub fn from_pairs(pairs: usize) -> Option<Self> {
        match pairs {
            4 => Some(GameSize::Four),
            6 => Some(GameSize::Six),
            8 => Some(GameSize::Eight),
            10 => Some(GameSize::Ten),
            _ => None,
        }
    }

    /// Number of pairs (and therefore words) this size asks for.
    pub fn pairs(&self) -> usize {
        match self {
            GameSize::Four => 4,
            GameSize::Six => 6,
            GameSize::Eight => 8,
            GameSize::Ten => 10,
        }
    }

    /// Number of cards dealt when every word yields an image.
    pub fn cards(&self) -> usize {
        self.pairs() * 2
    }
}

/// Credit line for an image, shown next to it on the review screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageCredit {
    pub user: String,
    pub page_url: String,
}

/// One word together with the image chosen for it.
///
/// `image_url` and `image_credit` are replaced in place when the pair is
/// regenerated; `word` and `pair_id` never change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordImagePair {
    pub word: String,
    pub image_url: String,
    pub pair_id: PairId,
    pub image_credit: Option<ImageCredit>,
}

/// Which face of a pair a card carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    Word,
    Image,
}

impl CardKind {
    /// Parse card kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "word" => Some(CardKind::Word),
            "image" => Some(CardKind::Image),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::Word => "word",
            CardKind::Image => "image",
        }
    }
}

/// A single card on the table
///
/// `value` is the word text for [`CardKind::Word`] and the image URL for
/// [`CardKind::Image`]. A matched card is always flipped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
    pub value: String,
    pub is_flipped: bool,
    pub is_matched: bool,
    pub pair_id: PairId,
}

/// One hit returned by the image search service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ImageCandidate {
    pub id: u64,
    pub image_url: String,
    pub preview_url: String,
    pub tags: String,
    pub user: String,
    pub page_url: String,
}

impl ImageCandidate {
    pub fn credit(&self) -> ImageCredit {
        ImageCredit {
            user: self.user.clone(),
            page_url: self.page_url.clone(),
        }
    }
}

/// Result of asking the image service for one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// First sampled candidate.
    Found(ImageCandidate),
    /// The service answered but had no hits.
    Empty,
    /// Transport or API failure, with a human-readable reason.
    Fault(String),
}

impl FetchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, FetchOutcome::Found(_))
    }

    /// Short description for logs and notices. `None` when an image was found.
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            FetchOutcome::Found(_) => None,
            FetchOutcome::Empty => Some("no images found"),
            FetchOutcome::Fault(reason) => Some(reason.as_str()),
        }
    }
}

/// A submitted word that did not produce a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedWord {
    pub word: String,
    pub outcome: FetchOutcome,
}

/// Result of resolving a whole batch of words into pairs.
///
/// `pairs` carry dense pair ids in submission order of the words that
/// produced an image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcquisitionReport {
    pub pairs: Vec<WordImagePair>,
    pub dropped: Vec<DroppedWord>,
}

/// Tag attached to every image request so late answers can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestTicket(pub u64);

/// Screens of the game, in forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Home,
    Input,
    Review,
    Play,
}

impl Stage {
    /// Screen reached by going back one step.
    pub fn back_target(&self) -> Option<Stage> {
        match self {
            Stage::Home => None,
            Stage::Input => Some(Stage::Home),
            Stage::Review => Some(Stage::Input),
            Stage::Play => Some(Stage::Review),
        }
    }

    /// Screen reached by going forward one step.
    pub fn forward_target(&self) -> Option<Stage> {
        match self {
            Stage::Home => Some(Stage::Input),
            Stage::Input => Some(Stage::Review),
            Stage::Review => Some(Stage::Play),
            Stage::Play => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Home => "home",
            Stage::Input => "input",
            Stage::Review => "review",
            Stage::Play => "play",
        }
    }
}

/// Engine phase: cards dealt face-up for inspection, or normal play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Setup,
    Play,
}

/// Why a click did not change anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Two cards are face-up waiting to be resolved.
    Resolving,
    /// No card with this id on the table.
    UnknownCard,
    AlreadyMatched,
    AlreadyFlipped,
    /// Cards are dealt face-up for inspection.
    SetupPhase,
}

/// What a click did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored(IgnoreReason),
    /// First card of an attempt turned over.
    Flipped,
    /// Second card matched the first.
    Matched { pair_id: PairId, completed: bool },
    /// Second card did not match; both turn back after the reveal delay.
    Mismatched,
}

impl ClickOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, ClickOutcome::Ignored(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(TICK_MS, 16);
        assert_eq!(MISMATCH_REVEAL_MS, 1000);
        assert_eq!(CANDIDATES_PER_QUERY, 3);
    }

    #[test]
    fn game_sizes_round_trip_through_pair_counts() {
        for size in GAME_SIZES {
            assert_eq!(GameSize::from_pairs(size.pairs()), Some(size));
            assert_eq!(size.cards(), size.pairs() * 2);
        }
        assert_eq!(GameSize::from_pairs(0), None);
        assert_eq!(GameSize::from_pairs(12), None);
    }

    #[test]
    fn stage_back_targets_step_one_screen() {
        assert_eq!(Stage::Home.back_target(), None);
        assert_eq!(Stage::Input.back_target(), Some(Stage::Home));
        assert_eq!(Stage::Review.back_target(), Some(Stage::Input));
        assert_eq!(Stage::Play.back_target(), Some(Stage::Review));
    }

    #[test]
    fn stage_forward_is_inverse_of_back() {
        for stage in [Stage::Home, Stage::Input, Stage::Review] {
            let next = stage.forward_target().unwrap();
            assert_eq!(next.back_target(), Some(stage));
        }
        assert_eq!(Stage::Play.forward_target(), None);
    }

    #[test]
    fn fetch_outcome_failure_reason() {
        assert_eq!(FetchOutcome::Empty.failure_reason(), Some("no images found"));
        assert_eq!(
            FetchOutcome::Fault("timeout".to_string()).failure_reason(),
            Some("timeout")
        );

        let found = FetchOutcome::Found(ImageCandidate {
            id: 1,
            image_url: "https://img/1.jpg".to_string(),
            preview_url: String::new(),
            tags: "cat".to_string(),
            user: "alice".to_string(),
            page_url: "https://page/1".to_string(),
        });
        assert!(found.is_found());
        assert_eq!(found.failure_reason(), None);
    }

    #[test]
    fn card_kind_parse() {
        assert_eq!(CardKind::from_str("WORD"), Some(CardKind::Word));
        assert_eq!(CardKind::from_str("Image"), Some(CardKind::Image));
        assert_eq!(CardKind::from_str("sound"), None);
        assert_eq!(CardKind::Word.as_str(), "word");
    }
}
