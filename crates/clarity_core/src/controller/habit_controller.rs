//! Habit streak controller.
//!
//! # Invariants
//! - First load with nothing usable stored seeds the configured defaults
//!   and persists them immediately; a stored collection is never reseeded.
//! - When the stored collection cannot be read, defaults are shown but
//!   nothing is written back.
//! - Completion follows `HabitRecord::complete_on` using the context clock.
//! - The view always lists every habit.

use crate::context::CoreContext;
use crate::controller::{
    load_collection, skip_detached_write, ControllerResult, InputError, LoadedCollection, Outcome,
};
use crate::ids::generate_id;
use crate::model::habit::{CompletionRejected, HabitRecord};
use crate::render::render_habit_list;
use crate::store::KvBackend;
use log::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitSnapshot {
    pub habits: Vec<HabitRecord>,
    pub markup: String,
    pub degraded: bool,
}

pub struct HabitController<'ctx, B: KvBackend> {
    ctx: &'ctx CoreContext<B>,
    habits: Vec<HabitRecord>,
    writable: bool,
    view: String,
}

impl<'ctx, B: KvBackend> HabitController<'ctx, B> {
    pub fn load(ctx: &'ctx CoreContext<B>) -> Self {
        let key = &ctx.config().storage_keys.habits;
        let (habits, writable) = match load_collection(ctx.store(), key) {
            LoadedCollection::Stored(stored) => (stored, true),
            LoadedCollection::Absent => {
                let seeded = seed_defaults(ctx);
                ctx.store().set(key, &seeded);
                (seeded, true)
            }
            LoadedCollection::Unreadable => (seed_defaults(ctx), false),
        };
        info!(
            "event=collection_load module=habit status=ok count={}",
            habits.len()
        );

        let mut controller = Self {
            ctx,
            habits,
            writable,
            view: String::new(),
        };
        controller.refresh_view();
        controller
    }

    /// Appends a habit named `name`. Blank names are ignored.
    pub fn add_habit(&mut self, name: &str) -> Outcome {
        let name = name.trim();
        if name.is_empty() {
            return Outcome::Ignored;
        }

        let habit = HabitRecord::new(generate_id(), name);
        info!("event=habit_add module=habit status=ok id={}", habit.id);
        self.habits.push(habit);
        self.persist();
        self.refresh_view();
        Outcome::Applied
    }

    /// Marks habit `id` complete for today.
    pub fn complete_habit(&mut self, id: &str) -> ControllerResult<Outcome> {
        let calendar = self.ctx.calendar();
        let Some(habit) = self.habits.iter_mut().find(|habit| habit.id == id) else {
            return Ok(Outcome::Ignored);
        };

        match habit.complete_on(&calendar) {
            Ok(streak) => {
                info!("event=habit_complete module=habit status=ok id={id} streak={streak}");
            }
            Err(CompletionRejected::AlreadyLoggedToday) => {
                info!("event=habit_complete module=habit status=rejected id={id} reason=same_day");
                return Err(InputError::AlreadyLoggedToday {
                    habit_id: id.to_string(),
                });
            }
        }

        self.persist();
        self.refresh_view();
        Ok(Outcome::Applied)
    }

    pub fn habits(&self) -> &[HabitRecord] {
        &self.habits
    }

    pub fn view(&self) -> &str {
        &self.view
    }

    pub fn snapshot(&self) -> HabitSnapshot {
        HabitSnapshot {
            habits: self.habits.clone(),
            markup: self.view.clone(),
            degraded: self.ctx.degraded(),
        }
    }

    fn persist(&self) {
        let key = &self.ctx.config().storage_keys.habits;
        if !self.writable {
            skip_detached_write("habit", key);
            return;
        }
        self.ctx.store().set(key, &self.habits);
    }

    fn refresh_view(&mut self) {
        self.view = render_habit_list(&self.habits);
    }
}

fn seed_defaults<B: KvBackend>(ctx: &CoreContext<B>) -> Vec<HabitRecord> {
    let seeded: Vec<HabitRecord> = ctx
        .config()
        .seed_habits
        .iter()
        .map(|name| HabitRecord::new(generate_id(), name.as_str()))
        .collect();
    info!(
        "event=collection_seed module=habit status=ok count={}",
        seeded.len()
    );
    seeded
}
