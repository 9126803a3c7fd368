//! Core domain logic for the Clarity wellness tracker.
//! This crate is the single source of truth for persistence and view-sync
//! invariants; UI layers only forward events and display rendered fragments.

pub mod config;
pub mod context;
pub mod controller;
pub mod dates;
pub mod db;
pub mod ids;
pub mod logging;
pub mod model;
pub mod quiz;
pub mod render;
pub mod store;

pub use config::{ConfigError, CoreConfig, SeedGoal, StorageKeys};
pub use context::CoreContext;
pub use controller::assessment_controller::{
    AssessmentController, AssessmentSnapshot, QuizSession,
};
pub use controller::goal_controller::{GoalController, GoalSnapshot};
pub use controller::habit_controller::{HabitController, HabitSnapshot};
pub use controller::mood_controller::{MoodController, MoodSnapshot};
pub use controller::{ControllerResult, InputError, Outcome};
pub use dates::{Calendar, Clock, FixedClock, SystemClock};
pub use ids::generate_id;
pub use logging::{default_log_level, init_logging, logging_status, LoggingStatus};
pub use model::assessment::AssessmentResult;
pub use model::goal::GoalRecord;
pub use model::habit::HabitRecord;
pub use model::mood::{MoodChoice, MoodEntry};
pub use model::RecordId;
pub use quiz::{FeedbackBand, LikertAnswer, QuizCatalog, QuizDefinition, QuizId};
pub use store::{JsonStore, KvBackend, MemoryKvBackend, SqliteKvBackend, StorageError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
