//! Collection controllers: mutate, persist, re-render.
//!
//! # Responsibility
//! - Own one collection each and expose its mutation operations.
//! - Keep in-memory state, the persisted copy and the rendered view in step
//!   after every applied mutation.
//!
//! # Invariants
//! - Invalid user input returns `InputError` and mutates nothing.
//! - Unknown ids are silent no-ops (`Outcome::Ignored`).
//! - Each controller is the only writer of its storage key.
//! - A collection whose read failed is never written back; its controller
//!   keeps working in memory only.

use crate::store::{JsonStore, KvBackend};
use log::warn;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod assessment_controller;
pub mod goal_controller;
pub mod habit_controller;
pub mod mood_controller;

/// Result of an operation that may legitimately do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored,
}

/// User-correctable input problems, surfaced as a blocking notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    NoMoodSelected,
    AlreadyLoggedToday { habit_id: String },
    /// Zero-based indexes of questions without an answer.
    UnansweredQuestions { missing: Vec<usize> },
}

impl InputError {
    /// Text shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NoMoodSelected => "Please choose a mood before saving.",
            Self::AlreadyLoggedToday { .. } => "Already logged for today.",
            Self::UnansweredQuestions { .. } => "Please answer every question before saving.",
        }
    }
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMoodSelected => write!(f, "no mood selected"),
            Self::AlreadyLoggedToday { habit_id } => {
                write!(f, "habit already completed today: {habit_id}")
            }
            Self::UnansweredQuestions { missing } => {
                write!(f, "unanswered questions: {missing:?}")
            }
        }
    }
}

impl Error for InputError {}

pub type ControllerResult<T> = Result<T, InputError>;

/// What a controller found under its key at load time.
pub(crate) enum LoadedCollection<T> {
    Stored(Vec<T>),
    /// Nothing usable stored: missing, blank or undecodable.
    Absent,
    /// The backend failed, so a stored copy may exist unseen.
    Unreadable,
}

pub(crate) fn load_collection<B: KvBackend, T: DeserializeOwned>(
    store: &JsonStore<B>,
    key: &str,
) -> LoadedCollection<T> {
    match store.try_get::<Vec<T>>(key) {
        Ok(Some(items)) => LoadedCollection::Stored(items),
        Ok(None) => LoadedCollection::Absent,
        Err(_) => LoadedCollection::Unreadable,
    }
}

pub(crate) fn skip_detached_write(module: &str, key: &str) {
    warn!("event=store_write module={module} status=skipped key={key} reason=unread_collection");
}
