use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::level::{LEVEL_COUNT, Level};
use crate::model::rules::GameRules;

//
// ─── KEYS ─────────────────────────────────────────────────────────────────────
//

/// Names of the persisted progress scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgressKey {
    Level,
    Score,
    CompletedLevels,
}

impl ProgressKey {
    /// Keys in the order they are written.
    pub const ALL: [ProgressKey; 3] = [Self::Level, Self::Score, Self::CompletedLevels];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressKey::Level => "level",
            ProgressKey::Score => "score",
            ProgressKey::CompletedLevels => "completedLevels",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for ProgressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── PROGRESS ─────────────────────────────────────────────────────────────────
//

/// Player progress that survives between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    level: Level,
    score: i64,
    completed_levels: u32,
}

/// What a graded submission changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressChange {
    pub score_delta: i64,
    pub frontier_advanced: bool,
}

impl ProgressChange {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.score_delta == 0 && !self.frontier_advanced
    }
}

impl Progress {
    /// Rehydrate progress from stored scalars, repairing anything out of bounds.
    ///
    /// Missing values take their defaults. `completed_levels` is clamped to
    /// `[0, LEVEL_COUNT]`, and a level that is unknown or locked is lowered to the
    /// highest level the rules allow.
    #[must_use]
    pub fn restore(
        level: Option<i64>,
        score: Option<i64>,
        completed_levels: Option<i64>,
        rules: &GameRules,
    ) -> Self {
        let completed_levels: u32 = completed_levels
            .map_or(0, |value| value.clamp(0, i64::from(LEVEL_COUNT)))
            .try_into()
            .unwrap_or(0);

        let level = level
            .and_then(|value| u32::try_from(value).ok())
            .map_or(Level::FIRST, Level::new);
        let level = if level.is_modeled() && rules.is_unlocked(level, completed_levels) {
            level
        } else {
            rules.highest_unlocked(completed_levels)
        };

        Self {
            level,
            score: score.unwrap_or(0),
            completed_levels,
        }
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub fn completed_levels(&self) -> u32 {
        self.completed_levels
    }

    /// Scalar value stored under `key`.
    #[must_use]
    pub fn value_of(&self, key: ProgressKey) -> i64 {
        match key {
            ProgressKey::Level => i64::from(self.level.value()),
            ProgressKey::Score => self.score,
            ProgressKey::CompletedLevels => i64::from(self.completed_levels),
        }
    }

    /// Record that `level` is now the level being played.
    pub fn enter_level(&mut self, level: Level) {
        self.level = level;
    }

    /// Apply the outcome of a valid submission for `level`.
    ///
    /// Completing the frontier level advances `completed_levels` once; replaying an
    /// earlier level only changes the score.
    pub fn apply_grade(
        &mut self,
        level: Level,
        fully_correct: bool,
        rules: &GameRules,
    ) -> ProgressChange {
        let score_delta = rules.score_delta(fully_correct);
        self.score = self.score.saturating_add(score_delta);

        let frontier_advanced =
            fully_correct && level.value().checked_sub(1) == Some(self.completed_levels);
        if frontier_advanced {
            self.completed_levels += 1;
        }

        ProgressChange {
            score_delta,
            frontier_advanced,
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            level: Level::FIRST,
            score: 0,
            completed_levels: 0,
        }
    }
}
