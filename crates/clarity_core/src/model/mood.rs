//! Mood log entries.

use crate::model::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One option from the mood palette (for example `Great` / `😄`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodChoice {
    pub label: String,
    pub icon: String,
}

impl MoodChoice {
    pub fn new(label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: icon.into(),
        }
    }
}

/// A saved mood. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: RecordId,
    pub date: NaiveDate,
    pub label: String,
    pub icon: String,
    #[serde(default)]
    pub note: String,
}

impl MoodEntry {
    pub fn new(id: RecordId, date: NaiveDate, choice: &MoodChoice, note: &str) -> Self {
        Self {
            id,
            date,
            label: choice.label.clone(),
            icon: choice.icon.clone(),
            note: note.trim().to_string(),
        }
    }
}
