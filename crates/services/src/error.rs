//! Shared error types for the services crate.

use std::fmt;

use thiserror::Error;

use guess_core::model::{LevelError, ProgressKey, RulesError, SessionMode};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Operations a presentation layer can trigger on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Init,
    Play,
    SelectLevel,
    SubmitGuess,
    Reveal,
    Reset,
    GoHome,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Init => "init",
            Action::Play => "play",
            Action::SelectLevel => "select level",
            Action::SubmitGuess => "submit guess",
            Action::Reveal => "reveal",
            Action::Reset => "reset",
            Action::GoHome => "go home",
        };
        f.write_str(name)
    }
}

/// Errors emitted by `ProgressController`.
///
/// None of these leave the controller in an unplayable state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ControllerError {
    #[error("progress has not been loaded yet")]
    NotInitialized,
    #[error("progress is already loaded")]
    AlreadyInitialized,
    #[error("cannot {action} while in {mode}")]
    InvalidTransition { mode: SessionMode, action: Action },
    #[error("no round is active")]
    NoActiveRound,
    #[error(transparent)]
    Level(#[from] LevelError),
}

/// Errors emitted by `ProgressService` when writing progress.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error("failed to store {key}: {source}")]
    Storage {
        key: ProgressKey,
        #[source]
        source: StorageError,
    },
    #[error("failed to encode {key}: {source}")]
    Encode {
        key: ProgressKey,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors emitted while reading `GameConfig`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid {var} value: {raw}")]
    Invalid { var: &'static str, raw: String },
    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Errors emitted while bootstrapping game services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameServicesError {
    #[error("invalid database url: {raw}")]
    InvalidDbUrl { raw: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Controller(#[from] ControllerError),
}
