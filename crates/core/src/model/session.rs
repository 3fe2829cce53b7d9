use std::fmt;

/// What the game currently allows the player to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// Title screen.
    #[default]
    Home,
    /// Picking a level.
    LevelSelect,
    /// A round is active and accepts guesses.
    Playing,
    /// The hidden pair has been shown; guesses are still accepted.
    AnswerRevealed,
}

impl SessionMode {
    /// Returns true while a round is active.
    #[must_use]
    pub fn in_level(&self) -> bool {
        matches!(self, SessionMode::Playing | SessionMode::AnswerRevealed)
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionMode::Home => "home",
            SessionMode::LevelSelect => "level select",
            SessionMode::Playing => "playing",
            SessionMode::AnswerRevealed => "answer revealed",
        };
        f.write_str(name)
    }
}
