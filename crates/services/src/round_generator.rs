use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use guess_core::model::{HiddenPair, Level};

/// Source of hidden pairs for new rounds.
pub trait PairSource: Send {
    /// Draw a fresh pair for `level`. Every call is a new draw.
    fn draw(&mut self, level: Level) -> HiddenPair;
}

/// Draws both hidden numbers independently and uniformly from `[1, level.range()]`.
#[derive(Debug, Clone)]
pub struct RoundGenerator<R = StdRng> {
    rng: R,
}

impl RoundGenerator<StdRng> {
    /// Generator seeded from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic generator, mostly for tests.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RoundGenerator<R> {
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self, level: Level) -> HiddenPair {
        let max = level.range();
        HiddenPair::new(
            self.rng.random_range(1..=max),
            self.rng.random_range(1..=max),
        )
    }
}

impl<R: Rng + Send> PairSource for RoundGenerator<R> {
    fn draw(&mut self, level: Level) -> HiddenPair {
        self.generate(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guess_core::model::LEVEL_COUNT;
    use std::collections::HashSet;

    #[test]
    fn draws_stay_within_level_range() {
        let mut generator = RoundGenerator::seeded(7);
        for level in Level::all() {
            let max = level.range();
            for _ in 0..200 {
                let pair = generator.generate(level);
                assert!((1..=max).contains(&pair.a), "{pair:?} outside 1..={max}");
                assert!((1..=max).contains(&pair.b), "{pair:?} outside 1..={max}");
            }
        }
    }

    #[test]
    fn unmapped_levels_draw_from_default_range() {
        let mut generator = RoundGenerator::seeded(11);
        for raw in [0, LEVEL_COUNT + 1, 99] {
            for _ in 0..100 {
                let pair = generator.generate(Level::new(raw));
                assert!((1..=10).contains(&pair.a));
                assert!((1..=10).contains(&pair.b));
            }
        }
    }

    #[test]
    fn repeated_draws_are_independent() {
        let mut generator = RoundGenerator::seeded(3);
        let pairs: HashSet<_> = (0..50)
            .map(|_| generator.draw(Level::new(15)))
            .collect();
        assert!(pairs.len() > 1);
    }

    #[test]
    fn whole_range_is_reachable() {
        let mut generator = RoundGenerator::seeded(42);
        let seen: HashSet<i64> = (0..2_000)
            .map(|_| generator.generate(Level::FIRST).a)
            .collect();
        assert_eq!(seen.len(), 10);
    }
}
