//! Mood logging controller.
//!
//! # Invariants
//! - At most one mood choice is selected at a time.
//! - Saved entries are prepended; the collection is newest-first.
//! - The view shows `mood_history_limit` entries; nothing is ever dropped
//!   from storage.

use crate::context::CoreContext;
use crate::controller::{
    load_collection, skip_detached_write, ControllerResult, InputError, LoadedCollection,
};
use crate::ids::generate_id;
use crate::model::mood::{MoodChoice, MoodEntry};
use crate::render::{render_mood_history, render_mood_palette};
use crate::store::KvBackend;
use chrono::NaiveDate;
use log::info;

/// Read-only view state for the mood section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodSnapshot {
    pub recent: Vec<MoodEntry>,
    pub total: usize,
    pub selected: Option<MoodChoice>,
    pub palette_markup: String,
    pub history_markup: String,
    pub degraded: bool,
}

pub struct MoodController<'ctx, B: KvBackend> {
    ctx: &'ctx CoreContext<B>,
    entries: Vec<MoodEntry>,
    writable: bool,
    selected_mood: Option<MoodChoice>,
    history_view: String,
}

impl<'ctx, B: KvBackend> MoodController<'ctx, B> {
    /// Loads stored moods (empty when nothing usable is stored).
    ///
    /// After a failed read, saves stay in memory so the unseen history is
    /// not replaced.
    pub fn load(ctx: &'ctx CoreContext<B>) -> Self {
        let key = &ctx.config().storage_keys.moods;
        let (entries, writable) = match load_collection(ctx.store(), key) {
            LoadedCollection::Stored(entries) => (entries, true),
            LoadedCollection::Absent => (Vec::new(), true),
            LoadedCollection::Unreadable => (Vec::new(), false),
        };
        info!(
            "event=collection_load module=mood status=ok count={}",
            entries.len()
        );
        let mut controller = Self {
            ctx,
            entries,
            writable,
            selected_mood: None,
            history_view: String::new(),
        };
        controller.refresh_view();
        controller
    }

    /// Date input default on first render.
    pub fn date_field_default(&self) -> NaiveDate {
        self.ctx.calendar().today()
    }

    pub fn select_mood(&mut self, choice: MoodChoice) {
        self.selected_mood = Some(choice);
    }

    pub fn selected_mood(&self) -> Option<&MoodChoice> {
        self.selected_mood.as_ref()
    }

    /// Saves the selected mood for `date` (today when `None`).
    ///
    /// On success the caller clears its note input. The selection is kept so
    /// the same mood can be logged again.
    pub fn save_mood(&mut self, date: Option<NaiveDate>, note: &str) -> ControllerResult<MoodEntry> {
        let Some(choice) = self.selected_mood.as_ref() else {
            info!("event=mood_save module=mood status=rejected reason=no_selection");
            return Err(InputError::NoMoodSelected);
        };

        let date = date.unwrap_or_else(|| self.ctx.calendar().today());
        let entry = MoodEntry::new(generate_id(), date, choice, note);
        self.entries.insert(0, entry.clone());
        self.persist();
        self.refresh_view();

        info!(
            "event=mood_save module=mood status=ok id={} count={}",
            entry.id,
            self.entries.len()
        );
        Ok(entry)
    }

    /// Full stored collection, newest first.
    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    /// Entries visible in the history view.
    pub fn recent(&self) -> &[MoodEntry] {
        let limit = self.ctx.config().mood_history_limit.min(self.entries.len());
        &self.entries[..limit]
    }

    pub fn history_view(&self) -> &str {
        &self.history_view
    }

    pub fn snapshot(&self) -> MoodSnapshot {
        MoodSnapshot {
            recent: self.recent().to_vec(),
            total: self.entries.len(),
            selected: self.selected_mood.clone(),
            palette_markup: render_mood_palette(
                &self.ctx.config().mood_palette,
                self.selected_mood.as_ref(),
            ),
            history_markup: self.history_view.clone(),
            degraded: self.ctx.degraded(),
        }
    }

    fn persist(&self) {
        let key = &self.ctx.config().storage_keys.moods;
        if !self.writable {
            skip_detached_write("mood", key);
            return;
        }
        self.ctx.store().set(key, &self.entries);
    }

    fn refresh_view(&mut self) {
        self.history_view =
            render_mood_history(&self.entries, self.ctx.config().mood_history_limit);
    }
}
