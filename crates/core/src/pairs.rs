//! Pair set - the authoritative word/image list of one session.
//!
//! `generation` identifies the set as a whole (a new submission or a restart
//! makes a new one); `edits` counts in-place image replacements. Together they
//! tell the session whether the dealt game still reflects the pairs.

use crate::types::{ImageCandidate, PairId, WordImagePair};

/// Version stamp of a pair set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PairSetVersion {
    pub generation: u64,
    pub edits: u64,
}

#[derive(Debug, Clone, Default)]
pub struct PairSet {
    pairs: Vec<WordImagePair>,
    generation: u64,
    edits: u64,
}

impl PairSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every pair. Starts a new generation.
    pub fn replace_all(&mut self, pairs: Vec<WordImagePair>) {
        self.pairs = pairs;
        self.generation = self.generation.wrapping_add(1);
        self.edits = 0;
    }

    /// Drop every pair. Starts a new generation.
    pub fn clear(&mut self) {
        self.replace_all(Vec::new());
    }

    pub fn pairs(&self) -> &[WordImagePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, pair_id: PairId) -> Option<&WordImagePair> {
        self.pairs.iter().find(|p| p.pair_id == pair_id)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn version(&self) -> PairSetVersion {
        PairSetVersion {
            generation: self.generation,
            edits: self.edits,
        }
    }

    /// Swap in `candidate` as the image of `pair_id`.
    ///
    /// The URL gets a `t=<now_ms>` parameter so a cached copy of the same
    /// address is never shown. Returns the new URL, or `None` when the pair
    /// does not exist.
    pub fn replace_image(
        &mut self,
        pair_id: PairId,
        candidate: &ImageCandidate,
        now_ms: u64,
    ) -> Option<String> {
        let pair = self.pairs.iter_mut().find(|p| p.pair_id == pair_id)?;
        let url = cache_busted(&candidate.image_url, now_ms);
        pair.image_url = url.clone();
        pair.image_credit = Some(candidate.credit());
        self.edits = self.edits.wrapping_add(1);
        Some(url)
    }
}

/// Append a `t=<now_ms>` query parameter to `url`.
pub fn cache_busted(url: &str, now_ms: u64) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}t={}", url, sep, now_ms)
}

/// Assemble pairs with dense ids from `(word, candidate)` results, in order.
pub fn pairs_from_candidates<'a>(
    found: impl IntoIterator<Item = (&'a str, &'a ImageCandidate)>,
) -> Vec<WordImagePair> {
    found
        .into_iter()
        .enumerate()
        .map(|(i, (word, candidate))| WordImagePair {
            word: word.to_string(),
            image_url: candidate.image_url.clone(),
            pair_id: i as PairId,
            image_credit: Some(candidate.credit()),
        })
        .collect()
}
