use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::level::{LEVEL_COUNT, Level, LevelError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RulesError {
    #[error("unlock offset must be 0 or 1, got {0}")]
    InvalidUnlockOffset(u32),

    #[error("wrong answer penalty must be 0 or {max}, got {provided}", max = GameRules::PENALTY)]
    InvalidPenalty { provided: i64 },
}

/// Scoring and unlock policy shared by every game variant.
///
/// * `unlock_offset` - levels up to `completed_levels + unlock_offset` are playable
/// * `wrong_answer_penalty` - points deducted for a valid but incorrect submission
/// * `completion_reward` - points awarded when both numbers are guessed
///
/// Level 1 is always playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    unlock_offset: u32,
    wrong_answer_penalty: i64,
    completion_reward: i64,
}

impl GameRules {
    pub const COMPLETION_REWARD: i64 = 10;
    pub const PENALTY: i64 = 5;

    /// Build rules from the two variant knobs.
    ///
    /// # Errors
    ///
    /// Returns `RulesError` if the offset is not 0/1 or the penalty is not 0/5.
    pub fn new(unlock_offset: u32, wrong_answer_penalty: i64) -> Result<Self, RulesError> {
        if unlock_offset > 1 {
            return Err(RulesError::InvalidUnlockOffset(unlock_offset));
        }
        if wrong_answer_penalty != 0 && wrong_answer_penalty != Self::PENALTY {
            return Err(RulesError::InvalidPenalty {
                provided: wrong_answer_penalty,
            });
        }
        Ok(Self {
            unlock_offset,
            wrong_answer_penalty,
            completion_reward: Self::COMPLETION_REWARD,
        })
    }

    /// Rules with the wrong-answer penalty turned on.
    #[must_use]
    pub fn penalized() -> Self {
        Self {
            wrong_answer_penalty: Self::PENALTY,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn unlock_offset(&self) -> u32 {
        self.unlock_offset
    }

    #[must_use]
    pub fn wrong_answer_penalty(&self) -> i64 {
        self.wrong_answer_penalty
    }

    #[must_use]
    pub fn completion_reward(&self) -> i64 {
        self.completion_reward
    }

    /// The lowest not-yet-completed level.
    #[must_use]
    pub fn frontier(&self, completed_levels: u32) -> Level {
        Level::new(completed_levels.saturating_add(1))
    }

    #[must_use]
    pub fn is_unlocked(&self, level: Level, completed_levels: u32) -> bool {
        level == Level::FIRST
            || level.value() <= completed_levels.saturating_add(self.unlock_offset)
    }

    /// Highest level that may be played, capped at the last level.
    #[must_use]
    pub fn highest_unlocked(&self, completed_levels: u32) -> Level {
        let highest = completed_levels
            .saturating_add(self.unlock_offset)
            .clamp(1, LEVEL_COUNT);
        Level::new(highest)
    }

    /// Checks that `level` is unlocked and exists.
    ///
    /// The lock is checked first so that any level above the frontier reports `Locked`.
    ///
    /// # Errors
    ///
    /// Returns `LevelError::Locked` or `LevelError::OutOfRange`.
    pub fn ensure_playable(&self, level: Level, completed_levels: u32) -> Result<(), LevelError> {
        if !self.is_unlocked(level, completed_levels) {
            return Err(LevelError::Locked {
                level: level.value(),
                frontier: self.frontier(completed_levels).value(),
            });
        }
        if !level.is_modeled() {
            return Err(LevelError::OutOfRange {
                level: level.value(),
            });
        }
        Ok(())
    }

    /// Score change applied after a valid submission.
    #[must_use]
    pub fn score_delta(&self, fully_correct: bool) -> i64 {
        if fully_correct {
            self.completion_reward
        } else {
            -self.wrong_answer_penalty
        }
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            unlock_offset: 1,
            wrong_answer_penalty: 0,
            completion_reward: Self::COMPLETION_REWARD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_unlocks_frontier_level() {
        let rules = GameRules::default();
        assert!(rules.is_unlocked(Level::new(1), 0));
        assert!(!rules.is_unlocked(Level::new(2), 0));
        assert!(rules.is_unlocked(Level::new(3), 2));
        assert!(!rules.is_unlocked(Level::new(4), 2));
    }

    #[test]
    fn zero_offset_still_unlocks_first_level() {
        let rules = GameRules::new(0, 0).unwrap();
        assert!(rules.is_unlocked(Level::new(1), 0));
        assert!(rules.is_unlocked(Level::new(2), 2));
        assert!(!rules.is_unlocked(Level::new(3), 2));
    }

    #[test]
    fn rejects_unknown_variants() {
        assert_eq!(
            GameRules::new(2, 0),
            Err(RulesError::InvalidUnlockOffset(2))
        );
        assert_eq!(
            GameRules::new(1, 3),
            Err(RulesError::InvalidPenalty { provided: 3 })
        );
    }

    #[test]
    fn lock_is_reported_before_range() {
        let rules = GameRules::default();
        assert_eq!(
            rules.ensure_playable(Level::new(40), 0),
            Err(LevelError::Locked {
                level: 40,
                frontier: 1
            })
        );
        assert_eq!(
            rules.ensure_playable(Level::new(16), 15),
            Err(LevelError::OutOfRange { level: 16 })
        );
        assert_eq!(
            rules.ensure_playable(Level::new(0), 0),
            Err(LevelError::OutOfRange { level: 0 })
        );
        assert_eq!(rules.ensure_playable(Level::new(1), 0), Ok(()));
    }

    #[test]
    fn score_delta_follows_penalty_setting() {
        assert_eq!(GameRules::default().score_delta(true), 10);
        assert_eq!(GameRules::default().score_delta(false), 0);
        assert_eq!(GameRules::penalized().score_delta(false), -5);
    }

    #[test]
    fn highest_unlocked_is_capped() {
        let rules = GameRules::default();
        assert_eq!(rules.highest_unlocked(0), Level::new(1));
        assert_eq!(rules.highest_unlocked(4), Level::new(5));
        assert_eq!(rules.highest_unlocked(15), Level::new(LEVEL_COUNT));
        assert_eq!(GameRules::new(0, 0).unwrap().highest_unlocked(0), Level::new(1));
    }
}
