#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod logging;
pub mod progress_controller;
pub mod progress_service;
pub mod round_generator;
pub mod transition;

pub use app_services::GameServices;
pub use config::GameConfig;
pub use error::{Action, ConfigError, ControllerError, GameServicesError, ProgressServiceError};
pub use progress_controller::{Notice, ProgressController, SaveStatus, SubmitOutcome};
pub use progress_service::ProgressService;
pub use round_generator::{PairSource, RoundGenerator};
pub use transition::ScheduledTransition;
