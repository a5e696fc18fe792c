//! Tick clock for the game loop.
//!
//! Engine timers advance by the wall time that actually passed, so a slow
//! frame does not stretch the mismatch reveal.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TickClock {
    step: Duration,
    last: Instant,
}

impl TickClock {
    pub fn new(step_ms: u32, now: Instant) -> Self {
        Self {
            step: Duration::from_millis(u64::from(step_ms)),
            last: now,
        }
    }

    /// Time left until the next tick is due.
    pub fn until_due(&self, now: Instant) -> Duration {
        self.step
            .saturating_sub(now.saturating_duration_since(self.last))
    }

    /// Whole milliseconds elapsed since the last tick, once at least one step
    /// has passed.
    ///
    /// Sub-millisecond remainders carry over to the next tick.
    pub fn due(&mut self, now: Instant) -> Option<u32> {
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed < self.step {
            return None;
        }
        let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
        self.last += Duration::from_millis(u64::from(ms));
        Some(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_not_due_before_one_step() {
        let start = Instant::now();
        let mut clock = TickClock::new(16, start);
        assert_eq!(clock.due(start + ms(15)), None);
        assert_eq!(clock.until_due(start + ms(10)), ms(6));
        assert_eq!(clock.due(start + ms(16)), Some(16));
    }

    #[test]
    fn test_stalled_frame_reports_full_elapsed_time() {
        let start = Instant::now();
        let mut clock = TickClock::new(16, start);
        assert_eq!(clock.due(start + ms(250)), Some(250));
        assert_eq!(clock.due(start + ms(260)), None);
        assert_eq!(clock.due(start + ms(266)), Some(16));
    }

    #[test]
    fn test_sub_millisecond_remainder_carries_over() {
        let start = Instant::now();
        let mut clock = TickClock::new(16, start);
        assert_eq!(clock.due(start + Duration::from_micros(16_600)), Some(16));
        assert_eq!(clock.due(start + Duration::from_micros(32_300)), Some(16));
        assert_eq!(clock.until_due(start + Duration::from_micros(32_300)), Duration::from_micros(15_700));
    }

    #[test]
    fn test_drives_mismatch_reveal_in_wall_time() {
        use crate::core::{EngineConfig, MemoryGame};
        use crate::types::{WordImagePair, MISMATCH_REVEAL_MS, TICK_MS};

        let pairs: Vec<WordImagePair> = ["cat", "dog"]
            .iter()
            .enumerate()
            .map(|(i, w)| WordImagePair {
                word: w.to_string(),
                image_url: format!("https://img/{}.jpg", w),
                pair_id: i as u32,
                image_credit: None,
            })
            .collect();
        let mut game = MemoryGame::new(EngineConfig::default(), 1);
        game.initialize(&pairs);
        let cat = game.cards_of_pair(0).unwrap();
        let dog = game.cards_of_pair(1).unwrap();
        game.handle_click(cat.word);
        game.handle_click(dog.image);
        assert!(game.is_resolving());

        // One stalled frame covering the whole reveal resolves it at once.
        let start = Instant::now();
        let mut clock = TickClock::new(TICK_MS, start);
        let elapsed = clock.due(start + ms(u64::from(MISMATCH_REVEAL_MS))).unwrap();
        game.tick(elapsed);
        assert!(!game.is_resolving());
    }
}
