use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LevelError {
    #[error("Level is locked. Complete previous levels.")]
    Locked { level: u32, frontier: u32 },

    #[error("level {level} does not exist")]
    OutOfRange { level: u32 },
}

//
// ─── RANGE TABLE ──────────────────────────────────────────────────────────────
//

/// Number of playable levels.
pub const LEVEL_COUNT: u32 = 15;

/// Upper bound used for any level outside the table.
const DEFAULT_RANGE: i64 = 10;

/// Inclusive upper bound of the hidden numbers, indexed by `level - 1`.
///
/// Steps by two from 10, then plateaus at 34 before the last level.
const RANGE_TABLE: [i64; LEVEL_COUNT as usize] =
    [10, 12, 14, 16, 18, 20, 22, 24, 26, 28, 30, 32, 34, 34, 36];

//
// ─── LEVEL ────────────────────────────────────────────────────────────────────
//

/// A level number. Level 1 is the first level.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Level(u32);

impl Level {
    pub const FIRST: Level = Level(1);

    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Returns true when the level has an entry in the range table.
    #[must_use]
    pub fn is_modeled(&self) -> bool {
        (1..=LEVEL_COUNT).contains(&self.0)
    }

    /// Inclusive upper bound for the hidden numbers of this level.
    ///
    /// Levels outside the table fall back to the level-1 bound.
    #[must_use]
    pub fn range(&self) -> i64 {
        if self.is_modeled() {
            RANGE_TABLE[(self.0 - 1) as usize]
        } else {
            DEFAULT_RANGE
        }
    }

    /// All playable levels in ascending order.
    pub fn all() -> impl Iterator<Item = Level> {
        (1..=LEVEL_COUNT).map(Level)
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level({})", self.0)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Level {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A level together with its unlock state, as shown by a level picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSlot {
    pub level: Level,
    pub unlocked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_nondecreasing() {
        let ranges: Vec<i64> = Level::all().map(|level| level.range()).collect();
        assert!(ranges.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn range_table_matches_design() {
        assert_eq!(Level::new(1).range(), 10);
        assert_eq!(Level::new(2).range(), 12);
        assert_eq!(Level::new(13).range(), 34);
        assert_eq!(Level::new(14).range(), 34);
        assert_eq!(Level::new(15).range(), 36);
    }

    #[test]
    fn unmapped_levels_use_level_one_range() {
        assert_eq!(Level::new(0).range(), 10);
        assert_eq!(Level::new(16).range(), 10);
        assert_eq!(Level::new(u32::MAX).range(), 10);
    }

    #[test]
    fn all_lists_every_playable_level() {
        let levels: Vec<u32> = Level::all().map(|level| level.value()).collect();
        assert_eq!(levels.len(), LEVEL_COUNT as usize);
        assert_eq!(levels.first(), Some(&1));
        assert_eq!(levels.last(), Some(&LEVEL_COUNT));
    }
}
