mod level;
mod progress;
mod round;
mod rules;
mod session;

pub use level::{LEVEL_COUNT, Level, LevelError, LevelSlot};
pub use progress::{Progress, ProgressChange, ProgressKey};
pub use round::{HiddenPair, Panel, Round};
pub use rules::{GameRules, RulesError};
pub use session::SessionMode;
