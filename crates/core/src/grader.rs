use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Which of the two guess fields a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessSlot {
    A,
    B,
}

impl fmt::Display for GuessSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuessSlot::A => f.write_str("A"),
            GuessSlot::B => f.write_str("B"),
        }
    }
}

/// A guess that could not be graded. Nothing changes when this is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GuessError {
    #[error("guess {slot} is empty")]
    Empty { slot: GuessSlot },

    #[error("guess {slot} is not a whole number: {raw:?}")]
    NotANumber { slot: GuessSlot, raw: String },
}

impl GuessError {
    pub const USER_MESSAGE: &'static str = "Please enter valid numbers.";

    #[must_use]
    pub fn slot(&self) -> GuessSlot {
        match self {
            GuessError::Empty { slot } | GuessError::NotANumber { slot, .. } => *slot,
        }
    }
}

//
// ─── GRADE ────────────────────────────────────────────────────────────────────
//

/// Per-field correctness of a valid submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeResult {
    pub a_correct: bool,
    pub b_correct: bool,
}

impl GradeResult {
    pub const COMPLETED_LINE: &'static str = "Level Completed!";

    #[must_use]
    pub fn fully_correct(&self) -> bool {
        self.a_correct && self.b_correct
    }

    /// One feedback line per field, plus the completion line when both are right.
    #[must_use]
    pub fn feedback_lines(&self) -> Vec<&'static str> {
        let mut lines = vec![
            if self.a_correct {
                "First number is correct"
            } else {
                "First number is wrong!"
            },
            if self.b_correct {
                "Second number is correct"
            } else {
                "Second number is wrong!"
            },
        ];
        if self.fully_correct() {
            lines.push(Self::COMPLETED_LINE);
        }
        lines
    }
}

impl fmt::Display for GradeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.feedback_lines().join("\n"))
    }
}

/// Parse one guess field. Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns `GuessError` if the field is blank or not a base-10 integer.
pub fn parse_guess(slot: GuessSlot, raw: &str) -> Result<i64, GuessError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GuessError::Empty { slot });
    }
    trimmed.parse::<i64>().map_err(|_| GuessError::NotANumber {
        slot,
        raw: raw.to_owned(),
    })
}

/// Grade a pair of guesses against the hidden numbers.
///
/// Both fields are validated before either is compared, so an invalid field
/// rejects the submission even when the other one is right.
///
/// # Errors
///
/// Returns `GuessError` for the first field that fails validation.
pub fn check(guess_a: &str, guess_b: &str, a: i64, b: i64) -> Result<GradeResult, GuessError> {
    let value_a = parse_guess(GuessSlot::A, guess_a)?;
    let value_b = parse_guess(GuessSlot::B, guess_b)?;
    Ok(GradeResult {
        a_correct: value_a == a,
        b_correct: value_b == b,
    })
}
