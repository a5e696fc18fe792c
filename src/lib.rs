//! Memory Match (workspace facade crate).
//!
//! Re-exports the workspace crates as `memory_match::{core,images,input,term,types}`
//! and holds the pieces shared by the binaries: the front-end [`app::App`], the
//! loop [`clock::TickClock`] and file logging setup.

pub mod app;
pub mod clock;
pub mod logging;

pub use memory_match_core as core;
pub use memory_match_images as images;
pub use memory_match_input as input;
pub use memory_match_term as term;
pub use memory_match_types as types;
