use std::time::Duration;

use guess_core::model::SessionMode;

/// A screen change the presentation layer should show after a short pause.
///
/// The controller has already moved to `target` when this is handed out; the
/// delay only lets the player read the result. Dropping the future returned by
/// `wait` cancels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTransition {
    target: SessionMode,
    delay: Duration,
}

impl ScheduledTransition {
    #[must_use]
    pub fn new(target: SessionMode, delay: Duration) -> Self {
        Self { target, delay }
    }

    #[must_use]
    pub fn target(&self) -> SessionMode {
        self.target
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleep for the display delay, then yield the mode to show.
    pub async fn wait(self) -> SessionMode {
        tokio::time::sleep(self.delay).await;
        self.target
    }
}
