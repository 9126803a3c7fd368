//! Runtime configuration for the wellness core.
//!
//! # Responsibility
//! - Hold immutable settings injected into controllers: storage keys,
//!   history limits, mood palette and first-run seed data.
//! - Resolve environment overrides (`CLARITY_*`).
//!
//! # Invariants
//! - Defaults reproduce the stored layout (`clarity_moods`, ...).
//! - Invalid environment values are reported, never silently ignored.

use crate::logging::{default_log_level, parse_level};
use crate::model::mood::MoodChoice;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "CLARITY_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "CLARITY_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CLARITY_LOG_DIR";
pub const ENV_MOOD_HISTORY_LIMIT: &str = "CLARITY_MOOD_HISTORY_LIMIT";
pub const ENV_ASSESSMENT_HISTORY_LIMIT: &str = "CLARITY_ASSESSMENT_HISTORY_LIMIT";

const DEFAULT_DB_FILE_NAME: &str = "clarity_wellness.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    InvalidLimit { var: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::InvalidLimit { var, value } => {
                write!(f, "{var} must be a positive integer, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Storage key per collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub moods: String,
    pub habits: String,
    pub goals: String,
    pub assessments: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            moods: "clarity_moods".to_string(),
            habits: "clarity_habits".to_string(),
            goals: "clarity_goals".to_string(),
            assessments: "clarity_assessments".to_string(),
        }
    }
}

/// First-run goal template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedGoal {
    pub name: String,
    pub target_date: NaiveDate,
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
    pub storage_keys: StorageKeys,
    /// Moods shown in the history view; older entries stay stored.
    pub mood_history_limit: usize,
    /// Assessments shown in the history view.
    pub assessment_history_limit: usize,
    pub mood_palette: Vec<MoodChoice>,
    pub seed_habits: Vec<String>,
    pub seed_goals: Vec<SeedGoal>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
            storage_keys: StorageKeys::default(),
            mood_history_limit: 7,
            assessment_history_limit: 6,
            mood_palette: vec![
                MoodChoice::new("Great", "😄"),
                MoodChoice::new("Good", "🙂"),
                MoodChoice::new("Okay", "😐"),
                MoodChoice::new("Low", "😔"),
                MoodChoice::new("Stressed", "😣"),
            ],
            seed_habits: vec![
                "Meditate for 10 minutes".to_string(),
                "Read 30 pages".to_string(),
                "Drink 8 glasses of water".to_string(),
            ],
            seed_goals: vec![
                SeedGoal {
                    name: "Learn a new language".to_string(),
                    target_date: seed_date(2024, 12, 31),
                    progress: 50,
                },
                SeedGoal {
                    name: "Save $500".to_string(),
                    target_date: seed_date(2025, 3, 1),
                    progress: 30,
                },
            ],
        }
    }
}

impl CoreConfig {
    /// Defaults overlaid with `CLARITY_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overlaid with values from `lookup`; blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| {
            lookup(var)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = get(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            config.log_level = parse_level(&level).map_err(ConfigError::InvalidLogLevel)?;
        }
        if let Some(dir) = get(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = get(ENV_MOOD_HISTORY_LIMIT) {
            config.mood_history_limit = parse_limit(ENV_MOOD_HISTORY_LIMIT, &raw)?;
        }
        if let Some(raw) = get(ENV_ASSESSMENT_HISTORY_LIMIT) {
            config.assessment_history_limit = parse_limit(ENV_ASSESSMENT_HISTORY_LIMIT, &raw)?;
        }
        Ok(config)
    }
}

fn parse_limit(var: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match raw.parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidLimit {
            var,
            value: raw.to_string(),
        }),
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
