use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use guess_core::grader::{self, GradeResult, GuessError};
use guess_core::model::{
    GameRules, Level, LevelError, LevelSlot, Progress, Round, SessionMode,
};
use storage::repository::ProgressRepository;
use tracing::{debug, info, warn};

use crate::error::{Action, ControllerError};
use crate::progress_service::ProgressService;
use crate::round_generator::PairSource;
use crate::transition::ScheduledTransition;

/// Pause before the level picker is shown again after a completed level.
pub const DEFAULT_SUCCESS_DELAY: Duration = Duration::from_millis(200);

//
// ─── OUTCOMES ─────────────────────────────────────────────────────────────────
//

/// Whether a submission's progress change reached storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    /// Nothing changed, so nothing was written.
    NotNeeded,
    Saved,
    /// Storage failed; the in-memory progress is still applied.
    Failed,
}

/// Result of `ProgressController::submit_guess`.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A field was empty or not a number. Nothing changed.
    Rejected(GuessError),
    /// At least one number was wrong.
    Incorrect {
        grade: GradeResult,
        score_delta: i64,
        save: SaveStatus,
    },
    /// Both numbers were right; the controller is back in `LevelSelect`.
    Completed {
        grade: GradeResult,
        frontier_advanced: bool,
        save: SaveStatus,
        transition: ScheduledTransition,
    },
}

impl SubmitOutcome {
    #[must_use]
    pub fn grade(&self) -> Option<GradeResult> {
        match self {
            SubmitOutcome::Rejected(_) => None,
            SubmitOutcome::Incorrect { grade, .. } | SubmitOutcome::Completed { grade, .. } => {
                Some(*grade)
            }
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitOutcome::Completed { .. })
    }
}

/// The latest message for the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Graded { grade: GradeResult, save: SaveStatus },
    Invalid(GuessError),
    Level(LevelError),
}

impl Notice {
    pub const SAVE_FAILED_LINE: &'static str = "Progress could not be saved.";
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Graded { grade, save } => {
                write!(f, "{grade}")?;
                if *save == SaveStatus::Failed {
                    write!(f, "\n{}", Self::SAVE_FAILED_LINE)?;
                }
                Ok(())
            }
            Notice::Invalid(_) => f.write_str(GuessError::USER_MESSAGE),
            Notice::Level(err) => write!(f, "{err}"),
        }
    }
}

//
// ─── CONTROLLER ───────────────────────────────────────────────────────────────
//

/// Owns the player's progress and the active round, and sequences every game action.
///
/// Mutating operations take `&mut self`, so a new action cannot start while the
/// persistence write of a previous one is still pending. Read accessors take `&self`.
pub struct ProgressController {
    rules: GameRules,
    success_delay: Duration,
    store: ProgressService,
    generator: Box<dyn PairSource>,
    progress: Progress,
    mode: SessionMode,
    round: Option<Round>,
    notice: Option<Notice>,
    last_save_failed: bool,
    initialized: bool,
}

impl ProgressController {
    #[must_use]
    pub fn new(
        repo: Arc<dyn ProgressRepository>,
        generator: Box<dyn PairSource>,
        rules: GameRules,
    ) -> Self {
        Self {
            rules,
            success_delay: DEFAULT_SUCCESS_DELAY,
            store: ProgressService::new(repo),
            generator,
            progress: Progress::default(),
            mode: SessionMode::Home,
            round: None,
            notice: None,
            last_save_failed: false,
            initialized: false,
        }
    }

    #[must_use]
    pub fn with_success_delay(mut self, delay: Duration) -> Self {
        self.success_delay = delay;
        self
    }

    /// Load persisted progress. Must run once before any other action.
    ///
    /// Missing or unreadable values fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::AlreadyInitialized` on a second call.
    pub async fn init(&mut self) -> Result<&Progress, ControllerError> {
        if self.initialized {
            return Err(ControllerError::AlreadyInitialized);
        }
        self.progress = self.store.load(&self.rules).await;
        self.mode = SessionMode::Home;
        self.initialized = true;
        info!(
            level = self.progress.level().value(),
            score = self.progress.score(),
            completed_levels = self.progress.completed_levels(),
            "progress loaded"
        );
        Ok(&self.progress)
    }

    /// Leave the title screen for the level picker.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError` unless the controller is at `Home`.
    pub fn play(&mut self) -> Result<(), ControllerError> {
        self.require(Action::Play, |mode| mode == SessionMode::Home)?;
        self.notice = None;
        self.mode = SessionMode::LevelSelect;
        Ok(())
    }

    /// Start a round for level `n` if it is unlocked.
    ///
    /// A locked or unknown level leaves progress and mode untouched and sets the
    /// level notice.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Level` for a locked or unknown level, or a
    /// transition error outside `LevelSelect`.
    pub fn select_level(&mut self, n: u32) -> Result<&Round, ControllerError> {
        self.require(Action::SelectLevel, |mode| mode == SessionMode::LevelSelect)?;

        let level = Level::new(n);
        if let Err(err) = self
            .rules
            .ensure_playable(level, self.progress.completed_levels())
        {
            info!(level = n, error = %err, "level not playable");
            self.notice = Some(Notice::Level(err.clone()));
            return Err(err.into());
        }

        self.progress.enter_level(level);
        self.mode = SessionMode::Playing;
        Ok(self.start_round(level))
    }

    /// Grade a pair of guesses for the active round.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError` when no round is active. Invalid guesses are a
    /// `SubmitOutcome::Rejected`, not an error.
    pub async fn submit_guess(
        &mut self,
        guess_a: &str,
        guess_b: &str,
    ) -> Result<SubmitOutcome, ControllerError> {
        self.require(Action::SubmitGuess, |mode| mode.in_level())?;
        let round = self.round.as_mut().ok_or(ControllerError::NoActiveRound)?;
        round.record_guesses(guess_a, guess_b);
        let level = round.level();
        let pair = round.pair();

        let grade = match grader::check(guess_a, guess_b, pair.a, pair.b) {
            Ok(grade) => grade,
            Err(err) => {
                debug!(error = %err, "guess rejected");
                self.notice = Some(Notice::Invalid(err.clone()));
                return Ok(SubmitOutcome::Rejected(err));
            }
        };

        let change = self
            .progress
            .apply_grade(level, grade.fully_correct(), &self.rules);
        let save = if change.is_empty() {
            SaveStatus::NotNeeded
        } else {
            self.persist().await
        };
        self.notice = Some(Notice::Graded { grade, save });

        if !grade.fully_correct() {
            debug!(
                level = level.value(),
                a_correct = grade.a_correct,
                b_correct = grade.b_correct,
                "incorrect guess"
            );
            return Ok(SubmitOutcome::Incorrect {
                grade,
                score_delta: change.score_delta,
                save,
            });
        }

        info!(
            level = level.value(),
            score = self.progress.score(),
            completed_levels = self.progress.completed_levels(),
            frontier_advanced = change.frontier_advanced,
            "level completed"
        );
        self.round = None;
        self.mode = SessionMode::LevelSelect;
        Ok(SubmitOutcome::Completed {
            grade,
            frontier_advanced: change.frontier_advanced,
            save,
            transition: ScheduledTransition::new(SessionMode::LevelSelect, self.success_delay),
        })
    }

    /// Replace the hint text with the hidden pair. Guesses are still accepted.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError` when no round is active.
    pub fn reveal(&mut self) -> Result<&[String], ControllerError> {
        self.require(Action::Reveal, |mode| mode.in_level())?;
        let round = self.round.as_mut().ok_or(ControllerError::NoActiveRound)?;
        round.reveal();
        self.mode = SessionMode::AnswerRevealed;
        Ok(round.text())
    }

    /// Throw away the active round and start the same level with a fresh pair.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError` when no round is active.
    pub fn reset(&mut self) -> Result<&Round, ControllerError> {
        self.require(Action::Reset, |mode| mode.in_level())?;
        let level = self
            .round
            .as_ref()
            .map(Round::level)
            .ok_or(ControllerError::NoActiveRound)?;
        self.mode = SessionMode::Playing;
        Ok(self.start_round(level))
    }

    /// Discard any round and return to the title screen.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::NotInitialized` before `init`.
    pub fn go_home(&mut self) -> Result<(), ControllerError> {
        self.require(Action::GoHome, |_| true)?;
        self.round = None;
        // a pair is drawn and dropped, matching a restart of the current level
        let _ = self.generator.draw(self.progress.level());
        self.notice = None;
        self.mode = SessionMode::Home;
        Ok(())
    }

    //
    // ─── READ ACCESSORS ───────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.progress.level()
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.progress.score()
    }

    #[must_use]
    pub fn completed_levels(&self) -> u32 {
        self.progress.completed_levels()
    }

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    #[must_use]
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Lines on display for the active round; empty when there is none.
    #[must_use]
    pub fn hint_text(&self) -> &[String] {
        self.round.as_ref().map(Round::text).unwrap_or_default()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// The latest grading, validation or level message.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.notice.as_ref().map(ToString::to_string)
    }

    /// True when the most recent write to storage failed.
    #[must_use]
    pub fn last_save_failed(&self) -> bool {
        self.last_save_failed
    }

    #[must_use]
    pub fn is_unlocked(&self, n: u32) -> bool {
        let level = Level::new(n);
        level.is_modeled()
            && self
                .rules
                .is_unlocked(level, self.progress.completed_levels())
    }

    /// Every level with its unlock state.
    #[must_use]
    pub fn level_board(&self) -> Vec<LevelSlot> {
        Level::all()
            .map(|level| LevelSlot {
                level,
                unlocked: self.is_unlocked(level.value()),
            })
            .collect()
    }

    //
    // ─── INTERNALS ────────────────────────────────────────────────────────────
    //

    fn require(
        &self,
        action: Action,
        allowed: impl Fn(SessionMode) -> bool,
    ) -> Result<(), ControllerError> {
        if !self.initialized {
            return Err(ControllerError::NotInitialized);
        }
        if !allowed(self.mode) {
            return Err(ControllerError::InvalidTransition {
                mode: self.mode,
                action,
            });
        }
        Ok(())
    }

    fn start_round(&mut self, level: Level) -> &Round {
        let pair = self.generator.draw(level);
        debug!(level = level.value(), range = level.range(), "new round");
        self.notice = None;
        self.round.insert(Round::new(level, pair))
    }

    async fn persist(&mut self) -> SaveStatus {
        match self.store.save(&self.progress).await {
            Ok(()) => {
                self.last_save_failed = false;
                SaveStatus::Saved
            }
            Err(err) => {
                warn!(error = %err, "progress not saved; keeping in-memory state");
                self.last_save_failed = true;
                SaveStatus::Failed
            }
        }
    }
}

impl fmt::Debug for ProgressController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressController")
            .field("rules", &self.rules)
            .field("progress", &self.progress)
            .field("mode", &self.mode)
            .field("round", &self.round.as_ref().map(Round::level))
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}
