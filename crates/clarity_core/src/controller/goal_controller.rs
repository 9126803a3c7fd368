//! Goal progress controller.
//!
//! # Invariants
//! - First load with nothing usable stored seeds the configured goals.
//! - An unreadable stored collection is never overwritten by those seeds.
//! - `progress` is stored as given; the range control bounds it to 0..=100.

use crate::context::CoreContext;
use crate::controller::{load_collection, skip_detached_write, LoadedCollection, Outcome};
use crate::ids::generate_id;
use crate::model::goal::GoalRecord;
use crate::render::render_goal_list;
use crate::store::KvBackend;
use chrono::NaiveDate;
use log::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalSnapshot {
    pub goals: Vec<GoalRecord>,
    pub markup: String,
    pub degraded: bool,
}

pub struct GoalController<'ctx, B: KvBackend> {
    ctx: &'ctx CoreContext<B>,
    goals: Vec<GoalRecord>,
    writable: bool,
    view: String,
}

impl<'ctx, B: KvBackend> GoalController<'ctx, B> {
    pub fn load(ctx: &'ctx CoreContext<B>) -> Self {
        let key = &ctx.config().storage_keys.goals;
        let (goals, writable) = match load_collection(ctx.store(), key) {
            LoadedCollection::Stored(stored) => (stored, true),
            LoadedCollection::Absent => {
                let seeded = seed_defaults(ctx);
                ctx.store().set(key, &seeded);
                (seeded, true)
            }
            LoadedCollection::Unreadable => (seed_defaults(ctx), false),
        };
        info!(
            "event=collection_load module=goal status=ok count={}",
            goals.len()
        );

        let mut controller = Self {
            ctx,
            goals,
            writable,
            view: String::new(),
        };
        controller.refresh_view();
        controller
    }

    /// Appends a goal at 0% progress. Ignored without a name or target date.
    pub fn add_goal(&mut self, name: &str, target_date: Option<NaiveDate>) -> Outcome {
        let name = name.trim();
        let Some(target_date) = target_date.filter(|_| !name.is_empty()) else {
            return Outcome::Ignored;
        };

        let goal = GoalRecord::new(generate_id(), name, target_date);
        info!("event=goal_add module=goal status=ok id={}", goal.id);
        self.goals.push(goal);
        self.persist();
        self.refresh_view();
        Outcome::Applied
    }

    /// Sets goal `id` to `value` percent.
    pub fn update_progress(&mut self, id: &str, value: u8) -> Outcome {
        let Some(goal) = self.goals.iter_mut().find(|goal| goal.id == id) else {
            return Outcome::Ignored;
        };

        goal.progress = value;
        debug!("event=goal_progress module=goal status=ok id={id} progress={value}");
        self.persist();
        self.refresh_view();
        Outcome::Applied
    }

    pub fn goals(&self) -> &[GoalRecord] {
        &self.goals
    }

    pub fn view(&self) -> &str {
        &self.view
    }

    pub fn snapshot(&self) -> GoalSnapshot {
        GoalSnapshot {
            goals: self.goals.clone(),
            markup: self.view.clone(),
            degraded: self.ctx.degraded(),
        }
    }

    fn persist(&self) {
        let key = &self.ctx.config().storage_keys.goals;
        if !self.writable {
            skip_detached_write("goal", key);
            return;
        }
        self.ctx.store().set(key, &self.goals);
    }

    fn refresh_view(&mut self) {
        self.view = render_goal_list(&self.goals);
    }
}

fn seed_defaults<B: KvBackend>(ctx: &CoreContext<B>) -> Vec<GoalRecord> {
    let seeded: Vec<GoalRecord> = ctx
        .config()
        .seed_goals
        .iter()
        .map(|seed| GoalRecord {
            progress: seed.progress,
            ..GoalRecord::new(generate_id(), seed.name.as_str(), seed.target_date)
        })
        .collect();
    info!(
        "event=collection_seed module=goal status=ok count={}",
        seeded.len()
    );
    seeded
}
