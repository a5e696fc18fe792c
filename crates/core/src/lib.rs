//! Core game logic - pure, deterministic, and testable
//!
//! Everything here is free of terminal, network and clock access. Time enters
//! only through [`MemoryGame::tick`] and the `now_ms` passed to
//! [`Session::apply_regeneration`], so a fixed seed replays a whole session.
//!
//! # Module Structure
//!
//! - [`deck`]: card creation from pairs and the shuffled deal
//! - [`game_state`]: the flip/match engine with its timed mismatch revert
//! - [`pairs`]: the session's word/image list and in-place image replacement
//! - [`navigation`]: stage order, back steps and the optional history mirror
//! - [`session`]: one owner for stage, pairs, game and outstanding requests
//! - [`rng`]: seedable Fisher-Yates shuffle
//!
//! # Game Rules
//!
//! - Every pair deals two cards: the word and its image
//! - At most two unmatched cards are face up at once
//! - Flipping the second card counts one move
//! - Two cards of the same pair stay face up for good
//! - A mismatch stays visible for 1000ms, then both cards turn back
//! - The game is complete when every pair is matched
//!
//! # Example
//!
//! ```
//! use memory_match_core::{EngineConfig, MemoryGame};
//! use memory_match_core::types::{ClickOutcome, WordImagePair};
//!
//! let pairs: Vec<WordImagePair> = ["cat", "dog"]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, w)| WordImagePair {
//!         word: w.to_string(),
//!         image_url: format!("https://img/{}.jpg", w),
//!         pair_id: i as u32,
//!         image_credit: None,
//!     })
//!     .collect();
//!
//! let mut game = MemoryGame::new(EngineConfig::default(), 12345);
//! game.initialize(&pairs);
//!
//! let cat = game.cards_of_pair(0).unwrap();
//! game.handle_click(cat.word);
//! let outcome = game.handle_click(cat.image);
//! assert_eq!(outcome, ClickOutcome::Matched { pair_id: 0, completed: false });
//! assert_eq!(game.moves(), 1);
//! ```

pub mod config;
pub mod deck;
pub mod game_state;
pub mod navigation;
pub mod pairs;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use memory_match_types as types;

pub use config::SessionConfig;
pub use deck::{Deck, PairCards};
pub use game_state::{EngineConfig, MemoryGame};
pub use navigation::{Navigator, StageHistory};
pub use pairs::{cache_busted, pairs_from_candidates, PairSet, PairSetVersion};
pub use rng::DeckRng;
pub use session::{AcquireRequest, AcquisitionProgress, Notice, RegenerateRequest, Session};
pub use snapshot::GameSnapshot;
