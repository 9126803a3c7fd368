//! FFI use-case API for the Flutter presentation layer.
//!
//! # Responsibility
//! - Bind UI events (click, form submit, range input) to core controller
//!   operations.
//! - Hand back rendered fragments and user-facing notifications.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Every call opens its own context; UI-side selection and modal state
//!   travel with the call.
//! - `degraded=true` means persistence failed during this call or earlier
//!   in the same context and the UI should warn the user.

use clarity_core::dates::parse_date;
use clarity_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AssessmentController, CoreConfig, CoreContext, GoalController, HabitController, InputError,
    LikertAnswer, MoodChoice, MoodController, Outcome, SqliteKvBackend,
};
use log::error;
use std::sync::OnceLock;

static CORE_CONFIG: OnceLock<Result<CoreConfig, String>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Result envelope for one user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// False when the action was rejected or could not run.
    pub ok: bool,
    /// Id of the record created or touched, when there is one.
    pub record_id: Option<String>,
    /// Notification text for the user (empty on quiet success).
    pub message: String,
    /// Re-rendered fragment for the affected section.
    pub markup: String,
    pub degraded: bool,
}

impl ActionResponse {
    fn applied(record_id: Option<String>, markup: String, degraded: bool) -> Self {
        Self {
            ok: true,
            record_id,
            message: String::new(),
            markup,
            degraded,
        }
    }

    fn rejected(err: &InputError, markup: String, degraded: bool) -> Self {
        Self {
            ok: false,
            record_id: None,
            message: err.user_message().to_string(),
            markup,
            degraded,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            record_id: None,
            message: message.into(),
            markup: String::new(),
            degraded: true,
        }
    }
}

/// Every section rendered from current storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardResponse {
    pub ok: bool,
    pub message: String,
    pub mood_palette_markup: String,
    pub mood_history_markup: String,
    /// ISO date pre-filled into the mood date input.
    pub mood_date_default: String,
    pub assessment_history_markup: String,
    pub habit_markup: String,
    pub goal_markup: String,
    pub degraded: bool,
}

/// Static quiz content for building the quiz buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizItem {
    pub id: String,
    pub title: String,
    pub questions: Vec<String>,
}

/// Renders the whole page state, seeding habits and goals on first run.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_render() -> DashboardResponse {
    let ctx = match open_context() {
        Ok(ctx) => ctx,
        Err(message) => {
            return DashboardResponse {
                ok: false,
                message,
                mood_palette_markup: String::new(),
                mood_history_markup: String::new(),
                mood_date_default: String::new(),
                assessment_history_markup: String::new(),
                habit_markup: String::new(),
                goal_markup: String::new(),
                degraded: true,
            };
        }
    };

    let moods = MoodController::load(&ctx).snapshot();
    let mood_date_default = clarity_core::dates::iso_date(ctx.calendar().today());
    let assessments = AssessmentController::load(&ctx).snapshot();
    let habits = HabitController::load(&ctx).snapshot();
    let goals = GoalController::load(&ctx).snapshot();

    DashboardResponse {
        ok: true,
        message: String::new(),
        mood_palette_markup: moods.palette_markup,
        mood_history_markup: moods.history_markup,
        mood_date_default,
        assessment_history_markup: assessments.history_markup,
        habit_markup: habits.markup,
        goal_markup: goals.markup,
        degraded: ctx.degraded(),
    }
}

/// Saves a mood. `label`/`icon` carry the UI's current selection (`None`
/// when nothing is selected); a blank `date` means today.
#[flutter_rust_bridge::frb(sync)]
pub fn mood_save(
    label: Option<String>,
    icon: Option<String>,
    date: String,
    note: String,
) -> ActionResponse {
    with_context(|ctx| {
        let mut controller = MoodController::load(ctx);
        if let Some(label) = label.filter(|value| !value.trim().is_empty()) {
            controller.select_mood(MoodChoice::new(label, icon.unwrap_or_default()));
        }
        match controller.save_mood(parse_date(&date), &note) {
            Ok(entry) => ActionResponse::applied(
                Some(entry.id),
                controller.history_view().to_string(),
                ctx.degraded(),
            ),
            Err(err) => ActionResponse::rejected(
                &err,
                controller.history_view().to_string(),
                ctx.degraded(),
            ),
        }
    })
}

/// Adds a habit from the habit form.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_add(name: String) -> ActionResponse {
    with_context(|ctx| {
        let mut controller = HabitController::load(ctx);
        let outcome = controller.add_habit(&name);
        let record_id = match outcome {
            Outcome::Applied => controller.habits().last().map(|habit| habit.id.clone()),
            Outcome::Ignored => None,
        };
        ActionResponse::applied(record_id, controller.view().to_string(), ctx.degraded())
    })
}

/// Marks a habit complete for today.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_complete(habit_id: String) -> ActionResponse {
    with_context(|ctx| {
        let mut controller = HabitController::load(ctx);
        match controller.complete_habit(&habit_id) {
            Ok(Outcome::Applied) => ActionResponse::applied(
                Some(habit_id),
                controller.view().to_string(),
                ctx.degraded(),
            ),
            Ok(Outcome::Ignored) => {
                ActionResponse::applied(None, controller.view().to_string(), ctx.degraded())
            }
            Err(err) => {
                ActionResponse::rejected(&err, controller.view().to_string(), ctx.degraded())
            }
        }
    })
}

/// Adds a goal from the goal form; `target_date` is `YYYY-MM-DD`.
#[flutter_rust_bridge::frb(sync)]
pub fn goal_add(name: String, target_date: String) -> ActionResponse {
    with_context(|ctx| {
        let mut controller = GoalController::load(ctx);
        let record_id = match controller.add_goal(&name, parse_date(&target_date)) {
            Outcome::Applied => controller.goals().last().map(|goal| goal.id.clone()),
            Outcome::Ignored => None,
        };
        ActionResponse::applied(record_id, controller.view().to_string(), ctx.degraded())
    })
}

/// Range-input change on a goal slider.
///
/// The slider's own bounds apply here: values are clamped to 0..=100.
#[flutter_rust_bridge::frb(sync)]
pub fn goal_update_progress(goal_id: String, value: i64) -> ActionResponse {
    let progress = u8::try_from(value.clamp(0, 100)).unwrap_or(0);
    with_context(|ctx| {
        let mut controller = GoalController::load(ctx);
        let record_id = match controller.update_progress(&goal_id, progress) {
            Outcome::Applied => Some(goal_id),
            Outcome::Ignored => None,
        };
        ActionResponse::applied(record_id, controller.view().to_string(), ctx.degraded())
    })
}

/// Lists the quiz catalog.
#[flutter_rust_bridge::frb(sync)]
pub fn quiz_catalog() -> Vec<QuizItem> {
    clarity_core::QuizCatalog::builtin()
        .iter()
        .map(|quiz| QuizItem {
            id: quiz.id.as_str().to_string(),
            title: quiz.title.clone(),
            questions: quiz.questions.clone(),
        })
        .collect()
}

/// Submits the quiz form. `answers` holds one ordinal label per question,
/// with blank strings for unanswered selects.
#[flutter_rust_bridge::frb(sync)]
pub fn assessment_submit(quiz_id: String, answers: Vec<String>) -> ActionResponse {
    with_context(|ctx| {
        let mut controller = AssessmentController::load(ctx);
        if controller.open_quiz(&quiz_id) == Outcome::Ignored {
            return ActionResponse::applied(
                None,
                controller.history_view().to_string(),
                ctx.degraded(),
            );
        }
        for (index, raw) in answers.iter().enumerate() {
            if let Some(answer) = LikertAnswer::from_label(raw) {
                controller.answer(index, answer);
            }
        }
        match controller.submit_assessment() {
            Ok(result) => ActionResponse::applied(
                result.map(|result| result.id),
                controller.history_view().to_string(),
                ctx.degraded(),
            ),
            Err(err) => ActionResponse::rejected(
                &err,
                controller.quiz_form_view().unwrap_or_default(),
                ctx.degraded(),
            ),
        }
    })
}

fn resolve_config() -> Result<CoreConfig, String> {
    CORE_CONFIG
        .get_or_init(|| CoreConfig::from_env().map_err(|err| err.to_string()))
        .clone()
}

fn open_context() -> Result<CoreContext<SqliteKvBackend>, String> {
    let config = resolve_config()?;
    CoreContext::open(config).map_err(|err| {
        error!("event=context_open module=ffi status=error error={err}");
        format!("storage open failed: {err}")
    })
}

fn with_context(
    f: impl FnOnce(&CoreContext<SqliteKvBackend>) -> ActionResponse,
) -> ActionResponse {
    match open_context() {
        Ok(ctx) => f(&ctx),
        Err(message) => ActionResponse::failure(message),
    }
}
