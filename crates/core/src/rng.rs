//! RNG module - deck shuffling
//!
//! Wraps a seedable [`StdRng`] so a game can be replayed card-for-card from a
//! seed (tests, benches, `MEMORY_MATCH_SEED`) or dealt from OS entropy.
//!
//! Shuffling is an unbiased Fisher-Yates: every permutation is equally likely.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable RNG used to deal cards.
#[derive(Debug, Clone)]
pub struct DeckRng {
    inner: StdRng,
}

impl DeckRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Create an RNG seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }

    /// Generate random value in range [0, max]
    pub fn next_index(&mut self, max_inclusive: usize) -> usize {
        self.inner.random_range(0..=max_inclusive)
    }

    /// Shuffle a slice in place using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_index(i);
            slice.swap(i, j);
        }
    }

    /// Return a shuffled copy, leaving `items` untouched.
    pub fn shuffled<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        self.shuffle(&mut out);
        out
    }
}

impl Default for DeckRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = DeckRng::new(12345);
        let mut rng2 = DeckRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_index(1000), rng2.next_index(1000));
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = DeckRng::new(7);
        let original: Vec<u32> = (0..20).collect();

        let mut shuffled = rng.shuffled(&original);
        assert_eq!(shuffled.len(), original.len());
        shuffled.sort_unstable();
        assert_eq!(shuffled, original);
    }

    #[test]
    fn test_shuffled_leaves_input_untouched() {
        let mut rng = DeckRng::new(99);
        let original = vec!['a', 'b', 'c', 'd', 'e'];
        let copy = original.clone();

        let _ = rng.shuffled(&original);
        assert_eq!(original, copy);
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut rng = DeckRng::new(1);

        let mut empty: Vec<u8> = Vec::new();
        rng.shuffle(&mut empty);
        assert!(empty.is_empty());

        let mut one = vec![42];
        rng.shuffle(&mut one);
        assert_eq!(one, vec![42]);
    }

    #[test]
    fn test_shuffle_has_no_positional_bias() {
        // 4 items x 4 positions, chi-square over 16 cells.
        const N: usize = 4;
        const ROUNDS: usize = 40_000;

        let mut rng = DeckRng::new(2024);
        let mut counts = [[0u32; N]; N];
        let base: Vec<usize> = (0..N).collect();

        for _ in 0..ROUNDS {
            let deck = rng.shuffled(&base);
            for (pos, &item) in deck.iter().enumerate() {
                counts[item][pos] += 1;
            }
        }

        let expected = (ROUNDS / N) as f64;
        let chi_square: f64 = counts
            .iter()
            .flat_map(|row| row.iter())
            .map(|&observed| {
                let d = observed as f64 - expected;
                d * d / expected
            })
            .sum();

        // 9 degrees of freedom; 40 is far beyond any plausible noise.
        assert!(chi_square < 40.0, "chi-square too large: {}", chi_square);
    }

    #[test]
    fn test_every_permutation_of_three_appears() {
        let mut rng = DeckRng::new(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..600 {
            seen.insert(rng.shuffled(&[1, 2, 3]));
        }
        assert_eq!(seen.len(), 6);
    }
}
