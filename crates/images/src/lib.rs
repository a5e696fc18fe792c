//! Image acquisition for word/image pairs.
//!
//! - [`client`]: the [`ImageSearch`] seam and the Pixabay implementation
//! - [`acquire`]: one image per word, and whole batches into pairs
//! - [`worker`]: a tokio runtime that runs jobs off the game loop
//!
//! Failures never escape as errors past [`acquire`]: every word ends up either
//! as a pair or as a [`types::DroppedWord`] with its [`types::FetchOutcome`].

pub mod acquire;
pub mod client;
pub mod config;
pub mod error;
pub mod worker;

pub use memory_match_core as core;
pub use memory_match_types as types;

pub use acquire::{acquire_pairs, fetch_candidate};
pub use client::{parse_hits, sample_candidates, ImageSearch, PixabayClient};
pub use config::SearchConfig;
pub use error::SearchError;
pub use worker::{ImageJob, ImageWorker, WorkerEvent};
