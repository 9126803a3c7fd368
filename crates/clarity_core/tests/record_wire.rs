use chrono::NaiveDate;
use clarity_core::{
    AssessmentController, AssessmentResult, CoreConfig, CoreContext, GoalRecord, HabitController,
    HabitRecord, MemoryKvBackend, MoodEntry, QuizId,
};
use serde_json::json;

#[test]
fn habit_serializes_with_camel_case_fields() {
    let habit = HabitRecord {
        id: "h-1".to_string(),
        name: "Stretch".to_string(),
        streak: 3,
        last_completed: Some(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()),
    };

    let value = serde_json::to_value(&habit).unwrap();
    assert_eq!(
        value,
        json!({"id": "h-1", "name": "Stretch", "streak": 3, "lastCompleted": "2026-10-17"})
    );
}

#[test]
fn never_completed_habit_stores_null_last_completed() {
    let value = serde_json::to_value(HabitRecord::new("h-2".to_string(), "Read")).unwrap();
    assert!(value["lastCompleted"].is_null());
}

#[test]
fn records_written_by_earlier_web_builds_decode() {
    let mood: MoodEntry = serde_json::from_value(json!({
        "id": "1718000000000-9f3a",
        "date": "2026-10-12",
        "label": "Stressed",
        "icon": "😣",
        "note": ""
    }))
    .unwrap();
    assert_eq!(mood.id, "1718000000000-9f3a");

    let goal: GoalRecord = serde_json::from_value(json!({
        "id": "g-1",
        "name": "Save $500",
        "targetDate": "2025-03-01",
        "progress": 30
    }))
    .unwrap();
    assert_eq!(goal.progress, 30);

    let result: AssessmentResult = serde_json::from_value(json!({
        "id": "a-1",
        "quizId": "anxiety",
        "quizTitle": "Anxiety & Worry Tally",
        "score": 60,
        "feedback": "Elevated - Plan intentional rest soon.",
        "date": "2026-10-18T07:45:12.345Z"
    }))
    .unwrap();
    assert_eq!(result.quiz_id, QuizId::Anxiety);
    assert_eq!(result.date.date_naive(), NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
}

#[test]
fn corrupted_habits_fall_back_to_seed_and_flag_degraded() {
    let backend = MemoryKvBackend::new();
    backend.insert_raw("clarity_habits", "[{\"id\":");
    let ctx = CoreContext::new(backend, CoreConfig::default());

    let controller = HabitController::load(&ctx);
    assert_eq!(controller.habits().len(), 3);
    assert!(controller.snapshot().degraded);
}

#[test]
fn unreadable_history_loads_empty_without_overwriting() {
    let backend = MemoryKvBackend::new();
    backend.insert_raw("clarity_assessments", "not json");
    let ctx = CoreContext::new(backend, CoreConfig::default());

    let controller = AssessmentController::load(&ctx);
    assert!(controller.history().is_empty());
    assert_eq!(
        ctx.store().backend().raw("clarity_assessments").as_deref(),
        Some("not json")
    );
    assert!(ctx.degraded());
}
