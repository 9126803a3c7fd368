//! Self-assessment quiz controller.
//!
//! # Invariants
//! - The quiz modal is open exactly when a `QuizSession` exists.
//! - Submission requires an answer for every question of the open quiz.
//! - Results are prepended; the view shows `assessment_history_limit` items.

use crate::context::CoreContext;
use crate::controller::{
    load_collection, skip_detached_write, ControllerResult, InputError, LoadedCollection, Outcome,
};
use crate::ids::generate_id;
use crate::model::assessment::AssessmentResult;
use crate::quiz::{score_answers, LikertAnswer, QuizDefinition, QuizId};
use crate::render::{render_assessment_history, render_quiz_form};
use crate::store::KvBackend;
use log::{debug, info};

/// Answers collected while a quiz modal is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    pub quiz_id: QuizId,
    pub answers: Vec<Option<LikertAnswer>>,
}

impl QuizSession {
    fn new(quiz: &QuizDefinition) -> Self {
        Self {
            quiz_id: quiz.id,
            answers: vec![None; quiz.questions.len()],
        }
    }

    /// Indexes of unanswered questions.
    pub fn missing(&self) -> Vec<usize> {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, answer)| answer.is_none())
            .map(|(index, _)| index)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentSnapshot {
    pub recent: Vec<AssessmentResult>,
    pub total: usize,
    pub session: Option<QuizSession>,
    pub history_markup: String,
    pub degraded: bool,
}

pub struct AssessmentController<'ctx, B: KvBackend> {
    ctx: &'ctx CoreContext<B>,
    history: Vec<AssessmentResult>,
    writable: bool,
    current_quiz: Option<QuizSession>,
    history_view: String,
}

impl<'ctx, B: KvBackend> AssessmentController<'ctx, B> {
    pub fn load(ctx: &'ctx CoreContext<B>) -> Self {
        let key = &ctx.config().storage_keys.assessments;
        let (history, writable) = match load_collection(ctx.store(), key) {
            LoadedCollection::Stored(history) => (history, true),
            LoadedCollection::Absent => (Vec::new(), true),
            LoadedCollection::Unreadable => (Vec::new(), false),
        };
        info!(
            "event=collection_load module=assessment status=ok count={}",
            history.len()
        );
        let mut controller = Self {
            ctx,
            history,
            writable,
            current_quiz: None,
            history_view: String::new(),
        };
        controller.refresh_view();
        controller
    }

    /// Opens the quiz with wire id `raw_id`; unknown ids are ignored.
    ///
    /// Opening while another quiz is open replaces it and drops its answers.
    pub fn open_quiz(&mut self, raw_id: &str) -> Outcome {
        let Some(quiz) = self.ctx.catalog().lookup(raw_id) else {
            debug!("event=quiz_open module=assessment status=ignored reason=unknown_quiz");
            return Outcome::Ignored;
        };
        self.current_quiz = Some(QuizSession::new(quiz));
        info!(
            "event=quiz_open module=assessment status=ok quiz={}",
            quiz.id.as_str()
        );
        Outcome::Applied
    }

    /// Records the answer for question `index` of the open quiz.
    pub fn answer(&mut self, index: usize, answer: LikertAnswer) -> Outcome {
        match self
            .current_quiz
            .as_mut()
            .and_then(|session| session.answers.get_mut(index))
        {
            Some(slot) => {
                *slot = Some(answer);
                Outcome::Applied
            }
            None => Outcome::Ignored,
        }
    }

    /// Hides the modal and discards any in-progress answers.
    pub fn close_modal(&mut self) {
        if let Some(session) = self.current_quiz.take() {
            debug!(
                "event=quiz_close module=assessment status=ok quiz={}",
                session.quiz_id.as_str()
            );
        }
    }

    pub fn is_modal_open(&self) -> bool {
        self.current_quiz.is_some()
    }

    pub fn current_quiz(&self) -> Option<&QuizSession> {
        self.current_quiz.as_ref()
    }

    /// Scores the open quiz, stores the result and closes the modal.
    ///
    /// Returns `Ok(None)` when no quiz is open.
    pub fn submit_assessment(&mut self) -> ControllerResult<Option<AssessmentResult>> {
        let Some(session) = self.current_quiz.as_ref() else {
            return Ok(None);
        };
        let Some(quiz) = self.ctx.catalog().get(session.quiz_id) else {
            return Ok(None);
        };

        let missing = session.missing();
        if !missing.is_empty() {
            info!(
                "event=quiz_submit module=assessment status=rejected quiz={} missing={}",
                quiz.id.as_str(),
                missing.len()
            );
            return Err(InputError::UnansweredQuestions { missing });
        }

        let answers: Vec<LikertAnswer> = session.answers.iter().flatten().copied().collect();
        let Some(summary) = score_answers(&answers) else {
            return Ok(None);
        };

        let result =
            AssessmentResult::from_summary(generate_id(), quiz, &summary, self.ctx.calendar().now());
        self.history.insert(0, result.clone());
        self.persist();
        self.refresh_view();
        self.close_modal();

        info!(
            "event=quiz_submit module=assessment status=ok quiz={} score={} id={}",
            result.quiz_id.as_str(),
            result.score,
            result.id
        );
        Ok(Some(result))
    }

    /// Markup for the open quiz form, or `None` when the modal is hidden.
    pub fn quiz_form_view(&self) -> Option<String> {
        let session = self.current_quiz.as_ref()?;
        let quiz = self.ctx.catalog().get(session.quiz_id)?;
        Some(render_quiz_form(quiz, &session.answers))
    }

    pub fn history(&self) -> &[AssessmentResult] {
        &self.history
    }

    pub fn recent(&self) -> &[AssessmentResult] {
        let limit = self
            .ctx
            .config()
            .assessment_history_limit
            .min(self.history.len());
        &self.history[..limit]
    }

    pub fn history_view(&self) -> &str {
        &self.history_view
    }

    pub fn snapshot(&self) -> AssessmentSnapshot {
        AssessmentSnapshot {
            recent: self.recent().to_vec(),
            total: self.history.len(),
            session: self.current_quiz.clone(),
            history_markup: self.history_view.clone(),
            degraded: self.ctx.degraded(),
        }
    }

    fn persist(&self) {
        let key = &self.ctx.config().storage_keys.assessments;
        if !self.writable {
            skip_detached_write("assessment", key);
            return;
        }
        self.ctx.store().set(key, &self.history);
    }

    fn refresh_view(&mut self) {
        self.history_view = render_assessment_history(
            &self.history,
            self.ctx.config().assessment_history_limit,
        );
    }
}
