//! Word to pair resolution.

use log::{debug, warn};

use crate::client::ImageSearch;
use crate::core::pairs_from_candidates;
use crate::types::{AcquisitionReport, DroppedWord, FetchOutcome, ImageCandidate};

/// Ask `search` for one image for `word`.
pub async fn fetch_candidate<S: ImageSearch>(search: &S, word: &str) -> FetchOutcome {
    match search.search(word).await {
        Ok(candidates) => match candidates.into_iter().next() {
            Some(candidate) => FetchOutcome::Found(candidate),
            None => FetchOutcome::Empty,
        },
        Err(e) => {
            warn!("image search for {:?} failed: {}", word, e);
            FetchOutcome::Fault(e.to_string())
        }
    }
}

/// Resolve every word in order, one request at a time.
///
/// `progress(done, total)` is called after each word. Blank words are skipped.
/// Words without an image are reported in [`AcquisitionReport::dropped`].
pub async fn acquire_pairs<S: ImageSearch>(
    search: &S,
    words: &[String],
    mut progress: impl FnMut(usize, usize),
) -> AcquisitionReport {
    let total = words.len();
    let mut found: Vec<(&str, ImageCandidate)> = Vec::with_capacity(total);
    let mut dropped = Vec::new();

    for (i, word) in words.iter().enumerate() {
        let word = word.trim();
        if !word.is_empty() {
            match fetch_candidate(search, word).await {
                FetchOutcome::Found(candidate) => found.push((word, candidate)),
                outcome => dropped.push(DroppedWord {
                    word: word.to_string(),
                    outcome,
                }),
            }
        }
        progress(i + 1, total);
    }

    debug!("{} of {} words produced pairs", found.len(), total);
    AcquisitionReport {
        pairs: pairs_from_candidates(found.iter().map(|(w, c)| (*w, c))),
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::types::PairId;

    /// Serves one candidate per word, nothing for "zzz" and an error for "boom".
    struct FakeSearch;

    impl ImageSearch for FakeSearch {
        async fn search(&self, query: &str) -> Result<Vec<ImageCandidate>, SearchError> {
            match query {
                "zzz" => Ok(Vec::new()),
                "boom" => Err(SearchError::Status(500)),
                _ => Ok(vec![ImageCandidate {
                    id: query.len() as u64,
                    image_url: format!("https://cdn/{}.jpg", query),
                    user: "ann".to_string(),
                    ..ImageCandidate::default()
                }]),
            }
        }
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fetch_candidate_outcomes() {
        let found = tokio_test::block_on(fetch_candidate(&FakeSearch, "cat"));
        assert!(found.is_found());
        assert_eq!(
            tokio_test::block_on(fetch_candidate(&FakeSearch, "zzz")),
            FetchOutcome::Empty
        );
        assert_eq!(
            tokio_test::block_on(fetch_candidate(&FakeSearch, "boom")),
            FetchOutcome::Fault("image service returned status 500".to_string())
        );
    }

    #[test]
    fn test_acquire_pairs_all_found() {
        let report = tokio_test::block_on(acquire_pairs(
            &FakeSearch,
            &words(&["cat", "dog", "owl", "fox"]),
            |_, _| {},
        ));
        assert!(report.dropped.is_empty());
        let ids: Vec<PairId> = report.pairs.iter().map(|p| p.pair_id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(report.pairs[1].word, "dog");
        assert_eq!(report.pairs[1].image_url, "https://cdn/dog.jpg");
    }

    #[test]
    fn test_acquire_pairs_drops_failures_and_keeps_ids_dense() {
        let report = tokio_test::block_on(acquire_pairs(
            &FakeSearch,
            &words(&["cat", "zzz", "boom", "fox"]),
            |_, _| {},
        ));
        assert_eq!(report.pairs.len(), 2);
        assert_eq!(report.pairs[1].word, "fox");
        assert_eq!(report.pairs[1].pair_id, 1);

        assert_eq!(report.dropped.len(), 2);
        assert_eq!(report.dropped[0].word, "zzz");
        assert_eq!(report.dropped[0].outcome, FetchOutcome::Empty);
        assert!(matches!(report.dropped[1].outcome, FetchOutcome::Fault(_)));
    }

    #[test]
    fn test_acquire_pairs_reports_progress() {
        let mut seen = Vec::new();
        tokio_test::block_on(acquire_pairs(
            &FakeSearch,
            &words(&["cat", " ", "owl"]),
            |done, total| seen.push((done, total)),
        ));
        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_acquire_pairs_trims_words() {
        let report =
            tokio_test::block_on(acquire_pairs(&FakeSearch, &words(&["  cat "]), |_, _| {}));
        assert_eq!(report.pairs[0].word, "cat");
    }
}
