use std::fmt;

use crate::hints::{Hints, compute_hints};
use crate::model::level::Level;

/// The two numbers the player has to find.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HiddenPair {
    pub a: i64,
    pub b: i64,
}

impl HiddenPair {
    #[must_use]
    pub fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    /// Text shown when the player gives up and reveals the answer.
    #[must_use]
    pub fn answer_lines(&self) -> Vec<String> {
        vec![
            "___Answer___".to_owned(),
            "-------------------".to_owned(),
            format!("A is : {}", self.a),
            format!("B is : {}", self.b),
            "--------------------".to_owned(),
        ]
    }
}

impl fmt::Debug for HiddenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HiddenPair({}, {})", self.a, self.b)
    }
}

/// Which text the round currently displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Hints,
    Answer,
}

/// One attempt at a level: the hidden pair, its hints and the last submitted guesses.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    level: Level,
    pair: HiddenPair,
    hints: Hints,
    panel: Panel,
    text: Vec<String>,
    guess_a: String,
    guess_b: String,
}

impl Round {
    #[must_use]
    pub fn new(level: Level, pair: HiddenPair) -> Self {
        let hints = compute_hints(pair.a, pair.b);
        let text = hints.lines();
        Self {
            level,
            pair,
            hints,
            panel: Panel::Hints,
            text,
            guess_a: String::new(),
            guess_b: String::new(),
        }
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn pair(&self) -> HiddenPair {
        self.pair
    }

    #[must_use]
    pub fn hints(&self) -> &Hints {
        &self.hints
    }

    #[must_use]
    pub fn panel(&self) -> Panel {
        self.panel
    }

    /// Lines currently on display: the hints, or the answer after a reveal.
    #[must_use]
    pub fn text(&self) -> &[String] {
        &self.text
    }

    #[must_use]
    pub fn guesses(&self) -> (&str, &str) {
        (&self.guess_a, &self.guess_b)
    }

    pub fn record_guesses(&mut self, guess_a: &str, guess_b: &str) {
        guess_a.clone_into(&mut self.guess_a);
        guess_b.clone_into(&mut self.guess_b);
    }

    /// Swap the hint text for the literal hidden pair.
    pub fn reveal(&mut self) {
        self.panel = Panel::Answer;
        self.text = self.pair.answer_lines();
    }
}
