//! Terminal input module.
//!
//! Maps `crossterm` key events into per-stage [`Command`]s and keeps the small
//! pieces of editing state the screens need: the word form and the card grid
//! cursor. Nothing here touches the session; the binary wires commands to it.

pub mod form;
pub mod grid;
pub mod map;

pub use memory_match_types as types;

pub use form::WordForm;
pub use grid::{columns_for, GridCursor};
pub use map::{handle_key_event, should_quit, Command, Direction};
