#![forbid(unsafe_code)]

pub mod grader;
pub mod hints;
pub mod model;

pub use grader::{GradeResult, GuessError, GuessSlot, check, parse_guess};
pub use hints::{Hints, Quotient, compute_hints};
