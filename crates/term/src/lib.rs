//! Terminal "game renderer" module.
//!
//! A small rendering layer for the memory game. It avoids widget toolkits and
//! renders into a framebuffer that is diffed and flushed to the terminal.
//!
//! - [`screens`]: one screen per stage plus notices and key help
//! - [`game_view`]: the card grid, HUD and completion panel
//! - [`renderer`]: crossterm output of changed cell runs

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod screens;

pub use memory_match_core as core;
pub use memory_match_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{image_label, BoardState, GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
pub use screens::{Chrome, Screen, ScreenView};
