use std::path::{Path, PathBuf};
use std::time::Duration;

use guess_core::model::GameRules;

use crate::error::ConfigError;
use crate::progress_controller::DEFAULT_SUCCESS_DELAY;

pub const DB_URL_VAR: &str = "GUESS_DB_URL";
pub const UNLOCK_OFFSET_VAR: &str = "GUESS_UNLOCK_OFFSET";
pub const WRONG_PENALTY_VAR: &str = "GUESS_WRONG_PENALTY";
pub const SUCCESS_DELAY_VAR: &str = "GUESS_SUCCESS_DELAY_MS";
pub const LOG_VAR: &str = "GUESS_LOG";

/// Runtime settings for a game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub db_url: String,
    pub rules: GameRules,
    pub success_delay: Duration,
    pub log_filter: Option<String>,
}

impl GameConfig {
    pub const DEFAULT_DB_URL: &'static str = "sqlite://guess.sqlite3";

    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset names.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let db_url = lookup(DB_URL_VAR)
            .map_or_else(|| Self::DEFAULT_DB_URL.into(), normalize_sqlite_url);

        let defaults = GameRules::default();
        let unlock_offset = match lookup(UNLOCK_OFFSET_VAR) {
            Some(raw) => parse_var(UNLOCK_OFFSET_VAR, &raw)?,
            None => defaults.unlock_offset(),
        };
        let wrong_answer_penalty = match lookup(WRONG_PENALTY_VAR) {
            Some(raw) => parse_var(WRONG_PENALTY_VAR, &raw)?,
            None => defaults.wrong_answer_penalty(),
        };
        let rules = GameRules::new(unlock_offset, wrong_answer_penalty)?;

        let success_delay = match lookup(SUCCESS_DELAY_VAR) {
            Some(raw) => Duration::from_millis(parse_var(SUCCESS_DELAY_VAR, &raw)?),
            None => DEFAULT_SUCCESS_DELAY,
        };

        let log_filter = lookup(LOG_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(Self {
            db_url,
            rules,
            success_delay,
            log_filter,
        })
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            db_url: Self::DEFAULT_DB_URL.into(),
            rules: GameRules::default(),
            success_delay: DEFAULT_SUCCESS_DELAY,
            log_filter: None,
        }
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        raw: raw.to_string(),
    })
}

/// Turn a path or `sqlite:` URL into an absolute `sqlite://` URL.
///
/// In-memory URLs are returned unchanged.
#[must_use]
pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") || raw.contains("mode=memory") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}
