use chrono::NaiveDate;
use clarity_core::{
    CoreConfig, CoreContext, GoalController, GoalRecord, KvBackend, MemoryKvBackend, Outcome,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn context() -> CoreContext<MemoryKvBackend> {
    CoreContext::new(MemoryKvBackend::new(), CoreConfig::default())
}

fn stored_raw(ctx: &CoreContext<MemoryKvBackend>) -> String {
    ctx.store()
        .backend()
        .get_item("clarity_goals")
        .unwrap()
        .expect("goals persisted")
}

#[test]
fn first_load_seeds_two_default_goals() {
    let ctx = context();
    let controller = GoalController::load(&ctx);

    let seeded: Vec<(&str, NaiveDate, u8)> = controller
        .goals()
        .iter()
        .map(|g| (g.name.as_str(), g.target_date, g.progress))
        .collect();
    assert_eq!(
        seeded,
        vec![
            ("Learn a new language", date(2024, 12, 31), 50),
            ("Save $500", date(2025, 3, 1), 30),
        ]
    );
    let stored: Vec<GoalRecord> = serde_json::from_str(&stored_raw(&ctx)).unwrap();
    assert_eq!(stored, controller.goals());
}

#[test]
fn stored_goals_are_not_reseeded() {
    let ctx = context();
    let first = GoalController::load(&ctx).goals().to_vec();
    let second = GoalController::load(&ctx).goals().to_vec();
    assert_eq!(first, second);
}

#[test]
fn add_goal_requires_name_and_target_date() {
    let ctx = context();
    let mut controller = GoalController::load(&ctx);

    assert_eq!(controller.add_goal("  ", Some(date(2027, 1, 1))), Outcome::Ignored);
    assert_eq!(controller.add_goal("Run 5k", None), Outcome::Ignored);
    assert_eq!(controller.goals().len(), 2);

    assert_eq!(
        controller.add_goal(" Run 5k ", Some(date(2027, 1, 1))),
        Outcome::Applied
    );
    let added = controller.goals().last().unwrap();
    assert_eq!(added.name, "Run 5k");
    assert_eq!(added.progress, 0);
    assert!(controller.view().contains("Target date: Jan 1, 2027"));
}

#[test]
fn progress_updates_persist_and_are_idempotent() {
    let ctx = context();
    let mut controller = GoalController::load(&ctx);
    let id = controller.goals()[1].id.clone();

    assert_eq!(controller.update_progress(&id, 75), Outcome::Applied);
    let after_first = stored_raw(&ctx);
    assert_eq!(controller.update_progress(&id, 75), Outcome::Applied);

    assert_eq!(stored_raw(&ctx), after_first);
    assert_eq!(controller.goals()[1].progress, 75);
    assert!(controller.view().contains("75% complete"));
}

#[test]
fn unknown_goal_id_is_ignored() {
    let ctx = context();
    let mut controller = GoalController::load(&ctx);
    let before = stored_raw(&ctx);

    assert_eq!(controller.update_progress("missing", 10), Outcome::Ignored);
    assert_eq!(stored_raw(&ctx), before);
}

#[test]
fn failed_read_never_replaces_stored_goals_with_defaults() {
    let ctx = context();
    let own = r#"[{"id":"g1","name":"Run a marathon","targetDate":"2027-04-20","progress":60}]"#;
    ctx.store().backend().insert_raw("clarity_goals", own);
    ctx.store().backend().fail_next_reads(1);

    let mut controller = GoalController::load(&ctx);
    assert_eq!(controller.goals().len(), 2);
    assert!(controller.snapshot().degraded);

    let seeded_id = controller.goals()[0].id.clone();
    assert_eq!(controller.update_progress(&seeded_id, 90), Outcome::Applied);
    assert_eq!(stored_raw(&ctx), own);

    let reloaded = GoalController::load(&ctx);
    assert_eq!(reloaded.goals().len(), 1);
    assert_eq!(reloaded.goals()[0].name, "Run a marathon");
    assert_eq!(reloaded.goals()[0].progress, 60);
}
