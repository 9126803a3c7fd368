use chrono::NaiveDate;
use clarity_core::{
    CoreConfig, CoreContext, FixedClock, InputError, KvBackend, MemoryKvBackend, MoodChoice,
    MoodController, MoodEntry,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn context() -> CoreContext<MemoryKvBackend> {
    CoreContext::new(MemoryKvBackend::new(), CoreConfig::default())
        .with_clock(FixedClock::at_date(date(2026, 10, 18)))
}

fn stored_moods(ctx: &CoreContext<MemoryKvBackend>) -> Option<Vec<MoodEntry>> {
    ctx.store()
        .backend()
        .get_item("clarity_moods")
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

#[test]
fn saving_without_selection_is_rejected_and_changes_nothing() {
    let ctx = context();
    let mut controller = MoodController::load(&ctx);

    let err = controller.save_mood(None, "note").unwrap_err();
    assert_eq!(err, InputError::NoMoodSelected);
    assert_eq!(err.user_message(), "Please choose a mood before saving.");
    assert!(controller.entries().is_empty());
    assert_eq!(stored_moods(&ctx), None);
}

#[test]
fn save_defaults_to_today_and_trims_note() {
    let ctx = context();
    let mut controller = MoodController::load(&ctx);
    assert_eq!(controller.date_field_default(), date(2026, 10, 18));

    controller.select_mood(MoodChoice::new("Great", "😄"));
    let entry = controller.save_mood(None, "  slept well \n").unwrap();

    assert_eq!(entry.date, date(2026, 10, 18));
    assert_eq!(entry.label, "Great");
    assert_eq!(entry.icon, "😄");
    assert_eq!(entry.note, "slept well");
    assert_eq!(stored_moods(&ctx).unwrap(), vec![entry]);
    assert!(controller.history_view().contains("Oct 18, 2026"));
}

#[test]
fn entries_are_prepended_most_recent_first() {
    let ctx = context();
    let mut controller = MoodController::load(&ctx);

    controller.select_mood(MoodChoice::new("Low", "😔"));
    controller.save_mood(Some(date(2026, 10, 16)), "").unwrap();
    controller.select_mood(MoodChoice::new("Good", "🙂"));
    controller.save_mood(Some(date(2026, 10, 17)), "").unwrap();

    let labels: Vec<&str> = controller.entries().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Good", "Low"]);
    assert_eq!(controller.selected_mood().unwrap().label, "Good");
}

#[test]
fn view_shows_seven_most_recent_but_all_are_stored() {
    let ctx = context();
    let mut controller = MoodController::load(&ctx);
    controller.select_mood(MoodChoice::new("Okay", "😐"));

    for day in 1..=10 {
        controller.save_mood(Some(date(2026, 10, day)), "").unwrap();
    }

    assert_eq!(controller.entries().len(), 10);
    assert_eq!(controller.recent().len(), 7);
    assert_eq!(controller.recent()[0].date, date(2026, 10, 10));
    assert_eq!(controller.history_view().matches("<li").count(), 7);
    assert!(!controller.history_view().contains("Oct 3, 2026"));
    assert_eq!(stored_moods(&ctx).unwrap().len(), 10);
}

#[test]
fn reload_restores_entries_but_not_selection() {
    let ctx = context();
    {
        let mut controller = MoodController::load(&ctx);
        controller.select_mood(MoodChoice::new("Great", "😄"));
        controller.save_mood(None, "").unwrap();
    }

    let reloaded = MoodController::load(&ctx);
    assert_eq!(reloaded.entries().len(), 1);
    assert!(reloaded.selected_mood().is_none());
    let snapshot = reloaded.snapshot();
    assert_eq!(snapshot.total, 1);
    assert!(!snapshot.palette_markup.contains("active"));
    assert!(!snapshot.degraded);
}

#[test]
fn empty_history_renders_placeholder() {
    let ctx = context();
    let controller = MoodController::load(&ctx);
    assert!(controller
        .history_view()
        .contains("No entries yet. Log your first mood!"));
}

#[test]
fn save_after_failed_read_keeps_stored_history_intact() {
    let ctx = context();
    let own = r#"[{"id":"m1","date":"2026-10-17","label":"Calm","icon":"😌","note":""}]"#;
    ctx.store().backend().insert_raw("clarity_moods", own);
    ctx.store().backend().fail_next_reads(1);

    let mut controller = MoodController::load(&ctx);
    controller.select_mood(MoodChoice::new("Great", "😄"));
    controller.save_mood(None, "").unwrap();

    assert_eq!(controller.entries().len(), 1);
    assert!(controller.snapshot().degraded);
    assert_eq!(ctx.store().backend().raw("clarity_moods").as_deref(), Some(own));
}
