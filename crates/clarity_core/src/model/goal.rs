//! Goal records with a 0-100 progress value.

use crate::model::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    pub id: RecordId,
    pub name: String,
    pub target_date: NaiveDate,
    /// Percentage complete. The range control keeps it within 0..=100.
    pub progress: u8,
}

impl GoalRecord {
    pub fn new(id: RecordId, name: impl Into<String>, target_date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            target_date,
            progress: 0,
        }
    }
}
