use chrono::{TimeZone, Utc};
use clarity_core::{
    AssessmentController, AssessmentResult, CoreConfig, CoreContext, FeedbackBand, FixedClock,
    InputError, KvBackend, LikertAnswer, MemoryKvBackend, Outcome, QuizId,
};

fn context() -> CoreContext<MemoryKvBackend> {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 18, 8, 15, 0).unwrap());
    CoreContext::new(MemoryKvBackend::new(), CoreConfig::default()).with_clock(clock)
}

fn answer_all<B: KvBackend>(controller: &mut AssessmentController<'_, B>, answer: LikertAnswer) {
    for index in 0..5 {
        assert_eq!(controller.answer(index, answer), Outcome::Applied);
    }
}

fn stored_history(ctx: &CoreContext<MemoryKvBackend>) -> Vec<AssessmentResult> {
    ctx.store()
        .backend()
        .get_item("clarity_assessments")
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
        .unwrap_or_default()
}

#[test]
fn all_rarely_scores_25_with_low_feedback() {
    let ctx = context();
    let mut controller = AssessmentController::load(&ctx);

    assert_eq!(controller.open_quiz("stress"), Outcome::Applied);
    answer_all(&mut controller, LikertAnswer::Rarely);
    let result = controller.submit_assessment().unwrap().expect("result saved");

    assert_eq!(result.quiz_id, QuizId::Stress);
    assert_eq!(result.quiz_title, "Stress Level Assessment");
    assert_eq!(result.score, 25);
    assert_eq!(result.feedback, FeedbackBand::Low.text());
    assert_eq!(result.date, Utc.with_ymd_and_hms(2026, 10, 18, 8, 15, 0).unwrap());
    assert!(!controller.is_modal_open());
}

#[test]
fn all_always_scores_100_with_high_feedback() {
    let ctx = context();
    let mut controller = AssessmentController::load(&ctx);

    controller.open_quiz("anxiety");
    answer_all(&mut controller, LikertAnswer::Always);
    let result = controller.submit_assessment().unwrap().unwrap();

    assert_eq!(result.score, 100);
    assert_eq!(
        result.feedback,
        "High - Reach out for support and prioritize recovery."
    );
    assert_eq!(stored_history(&ctx), vec![result]);
}

#[test]
fn unknown_quiz_id_leaves_modal_closed() {
    let ctx = context();
    let mut controller = AssessmentController::load(&ctx);

    assert_eq!(controller.open_quiz("sleep"), Outcome::Ignored);
    assert!(!controller.is_modal_open());
    assert!(controller.quiz_form_view().is_none());
}

#[test]
fn submit_without_open_quiz_is_a_no_op() {
    let ctx = context();
    let mut controller = AssessmentController::load(&ctx);

    assert_eq!(controller.submit_assessment(), Ok(None));
    assert!(controller.history().is_empty());
    assert!(stored_history(&ctx).is_empty());
}

#[test]
fn incomplete_answers_block_submission_and_keep_session() {
    let ctx = context();
    let mut controller = AssessmentController::load(&ctx);
    controller.open_quiz("burnout");
    controller.answer(0, LikertAnswer::Often);
    controller.answer(3, LikertAnswer::Sometimes);

    let err = controller.submit_assessment().unwrap_err();
    assert_eq!(
        err,
        InputError::UnansweredQuestions {
            missing: vec![1, 2, 4]
        }
    );
    assert!(controller.is_modal_open());
    assert!(controller.history().is_empty());
}

#[test]
fn answer_out_of_range_or_without_session_is_ignored() {
    let ctx = context();
    let mut controller = AssessmentController::load(&ctx);

    assert_eq!(controller.answer(0, LikertAnswer::Often), Outcome::Ignored);
    controller.open_quiz("stress");
    assert_eq!(controller.answer(5, LikertAnswer::Often), Outcome::Ignored);
}

#[test]
fn closing_modal_discards_answers() {
    let ctx = context();
    let mut controller = AssessmentController::load(&ctx);
    controller.open_quiz("stress");
    answer_all(&mut controller, LikertAnswer::Often);

    controller.close_modal();
    assert!(!controller.is_modal_open());
    assert_eq!(controller.submit_assessment(), Ok(None));

    controller.open_quiz("stress");
    let session = controller.current_quiz().unwrap();
    assert!(session.answers.iter().all(Option::is_none));
}

#[test]
fn quiz_form_reflects_open_quiz() {
    let ctx = context();
    let mut controller = AssessmentController::load(&ctx);
    controller.open_quiz("burnout");

    let form = controller.quiz_form_view().unwrap();
    assert!(form.contains("Burnout Score"));
    assert!(form.contains("Small tasks feel exhausting."));
    assert_eq!(form.matches("<select").count(), 5);
}

#[test]
fn history_is_prepended_and_view_shows_six_most_recent() {
    let ctx = context();
    let mut controller = AssessmentController::load(&ctx);

    for round in 0..8 {
        controller.open_quiz(QuizId::ALL[round % 3].as_str());
        answer_all(&mut controller, LikertAnswer::Sometimes);
        controller.submit_assessment().unwrap();
    }

    assert_eq!(controller.history().len(), 8);
    assert_eq!(controller.recent().len(), 6);
    // Round 7 used the burnout quiz and is the newest entry.
    assert_eq!(controller.history()[0].quiz_id, QuizId::Burnout);
    assert_eq!(controller.history_view().matches("<li").count(), 6);
    assert!(controller.history_view().contains("50% · Oct 18, 2026"));
    assert_eq!(stored_history(&ctx).len(), 8);
}

#[test]
fn stored_history_survives_reload() {
    let ctx = context();
    {
        let mut controller = AssessmentController::load(&ctx);
        controller.open_quiz("stress");
        answer_all(&mut controller, LikertAnswer::Often);
        controller.submit_assessment().unwrap();
    }

    let reloaded = AssessmentController::load(&ctx);
    assert_eq!(reloaded.history().len(), 1);
    assert_eq!(reloaded.history()[0].score, 75);
    assert_eq!(
        reloaded.history()[0].feedback,
        "Elevated - Plan intentional rest soon."
    );
}
