//! Self-assessment quiz catalog and scoring policy.
//!
//! # Responsibility
//! - Define the static quiz catalog (stress, burnout, anxiety).
//! - Define the shared 4-point ordinal answer scale.
//! - Turn a complete answer set into a score and feedback band.
//!
//! # Invariants
//! - Every answer maps to 1..=4; an average therefore lies in 1.0..=4.0.
//! - `score = round(average * 25)`, so scores lie in 25..=100.
//! - Feedback bands are closed on the upper bound: <=1.5, <=2.5, <=3.5, rest.

use serde::{Deserialize, Serialize};

/// Known quiz identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizId {
    Stress,
    Burnout,
    Anxiety,
}

impl QuizId {
    pub const ALL: [QuizId; 3] = [QuizId::Stress, QuizId::Burnout, QuizId::Anxiety];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stress => "stress",
            Self::Burnout => "burnout",
            Self::Anxiety => "anxiety",
        }
    }

    /// Parses the wire id sent by the UI. Unknown ids yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "stress" => Some(Self::Stress),
            "burnout" => Some(Self::Burnout),
            "anxiety" => Some(Self::Anxiety),
            _ => None,
        }
    }
}

/// Ordinal answer scale shared by all quizzes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LikertAnswer {
    Rarely,
    Sometimes,
    Often,
    Always,
}

impl LikertAnswer {
    pub const ALL: [LikertAnswer; 4] = [
        LikertAnswer::Rarely,
        LikertAnswer::Sometimes,
        LikertAnswer::Often,
        LikertAnswer::Always,
    ];

    pub fn value(self) -> u8 {
        match self {
            Self::Rarely => 1,
            Self::Sometimes => 2,
            Self::Often => 3,
            Self::Always => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Rarely => "Rarely",
            Self::Sometimes => "Sometimes",
            Self::Often => "Often",
            Self::Always => "Always",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|answer| answer.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// Static quiz content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDefinition {
    pub id: QuizId,
    pub title: String,
    pub questions: Vec<String>,
}

impl QuizDefinition {
    pub fn new(id: QuizId, title: impl Into<String>, questions: &[&str]) -> Self {
        Self {
            id,
            title: title.into(),
            questions: questions.iter().map(|q| (*q).to_string()).collect(),
        }
    }
}

/// Immutable catalog injected into the assessment controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizCatalog {
    quizzes: Vec<QuizDefinition>,
}

impl QuizCatalog {
    pub fn new(quizzes: Vec<QuizDefinition>) -> Self {
        Self { quizzes }
    }

    /// The three built-in quizzes with five prompts each.
    pub fn builtin() -> Self {
        Self::new(vec![
            QuizDefinition::new(
                QuizId::Stress,
                "Stress Level Assessment",
                &[
                    "I feel overwhelmed by my responsibilities.",
                    "I find it difficult to relax.",
                    "I experience headaches or tension frequently.",
                    "I feel irritable or on edge.",
                    "My sleep feels disrupted.",
                ],
            ),
            QuizDefinition::new(
                QuizId::Burnout,
                "Burnout Score",
                &[
                    "I feel emotionally drained from my work or duties.",
                    "I feel detached from what I used to enjoy.",
                    "Small tasks feel exhausting.",
                    "I have trouble focusing on a single task.",
                    "I question the value of my work.",
                ],
            ),
            QuizDefinition::new(
                QuizId::Anxiety,
                "Anxiety & Worry Tally",
                &[
                    "I worry about things I cannot control.",
                    "My mind races with 'what if' scenarios.",
                    "I experience restlessness.",
                    "I avoid situations that might make me anxious.",
                    "I notice physical signs like rapid heartbeat.",
                ],
            ),
        ])
    }

    pub fn get(&self, id: QuizId) -> Option<&QuizDefinition> {
        self.quizzes.iter().find(|quiz| quiz.id == id)
    }

    /// Looks up a quiz by its wire id.
    pub fn lookup(&self, raw_id: &str) -> Option<&QuizDefinition> {
        QuizId::parse(raw_id).and_then(|id| self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuizDefinition> {
        self.quizzes.iter()
    }
}

impl Default for QuizCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Categorical feedback derived from an answer average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackBand {
    Low,
    Moderate,
    Elevated,
    High,
}

impl FeedbackBand {
    pub fn from_average(average: f64) -> Self {
        if average <= 1.5 {
            Self::Low
        } else if average <= 2.5 {
            Self::Moderate
        } else if average <= 3.5 {
            Self::Elevated
        } else {
            Self::High
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::Low => "Low - Keep nurturing your routines.",
            Self::Moderate => "Moderate - Consider quick breaks and breathing exercises.",
            Self::Elevated => "Elevated - Plan intentional rest soon.",
            Self::High => "High - Reach out for support and prioritize recovery.",
        }
    }
}

/// Derived scoring for one complete submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    pub average: f64,
    pub score: u8,
    pub band: FeedbackBand,
}

/// Scores a complete answer set. Returns `None` for an empty set.
pub fn score_answers(answers: &[LikertAnswer]) -> Option<ScoreSummary> {
    if answers.is_empty() {
        return None;
    }

    let total: u32 = answers.iter().map(|answer| u32::from(answer.value())).sum();
    let average = f64::from(total) / answers.len() as f64;
    let score = (average * 25.0).round().clamp(0.0, 100.0) as u8;

    Some(ScoreSummary {
        average,
        score,
        band: FeedbackBand::from_average(average),
    })
}
