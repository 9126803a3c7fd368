//! Saved self-assessment results.

use crate::model::RecordId;
use crate::quiz::{QuizDefinition, QuizId, ScoreSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable history entry for one submitted quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub id: RecordId,
    pub quiz_id: QuizId,
    pub quiz_title: String,
    /// Integer percentage in 25..=100.
    pub score: u8,
    /// Full guidance text of the feedback band.
    pub feedback: String,
    pub date: DateTime<Utc>,
}

impl AssessmentResult {
    pub fn from_summary(
        id: RecordId,
        quiz: &QuizDefinition,
        summary: &ScoreSummary,
        taken_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            quiz_id: quiz.id,
            quiz_title: quiz.title.clone(),
            score: summary.score,
            feedback: summary.band.text().to_string(),
            date: taken_at,
        }
    }
}
