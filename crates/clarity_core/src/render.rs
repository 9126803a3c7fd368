//! View renderers: collection state in, HTML fragment out.
//!
//! # Responsibility
//! - Produce the markup the presentation layer injects for each section.
//!
//! # Invariants
//! - Renderers are pure; same input, same output.
//! - All user-entered text is HTML-escaped.
//! - Empty collections render a single placeholder item.

use crate::dates::format_date;
use crate::model::assessment::AssessmentResult;
use crate::model::goal::GoalRecord;
use crate::model::habit::HabitRecord;
use crate::model::mood::{MoodChoice, MoodEntry};
use crate::quiz::{LikertAnswer, QuizDefinition};

pub const EMPTY_MOODS: &str = "No entries yet. Log your first mood!";
pub const EMPTY_ASSESSMENTS: &str = "No assessments yet. Start with Stress or Burnout.";
pub const EMPTY_HABITS: &str = "No habits yet. Add your first routine.";
pub const EMPTY_GOALS: &str = "No goals yet. Define your next milestone.";

/// Escapes `& < > " '` for safe interpolation into markup.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Mood picker buttons; the selected choice carries the `active` class.
pub fn render_mood_palette(palette: &[MoodChoice], selected: Option<&MoodChoice>) -> String {
    palette
        .iter()
        .map(|choice| {
            let class = if selected == Some(choice) {
                "mood-option active"
            } else {
                "mood-option"
            };
            format!(
                r#"<button class="{class}" data-mood="{label}" data-icon="{icon}">{icon}</button>"#,
                label = escape_html(&choice.label),
                icon = escape_html(&choice.icon),
            )
        })
        .collect()
}

/// The `limit` most recent moods (the collection is newest-first).
pub fn render_mood_history(entries: &[MoodEntry], limit: usize) -> String {
    if entries.is_empty() {
        return placeholder_item(EMPTY_MOODS);
    }
    entries
        .iter()
        .take(limit)
        .map(|entry| {
            format!(
                r#"<li class="history-item"><span>{} {}</span><span>{}</span></li>"#,
                escape_html(&entry.icon),
                escape_html(&entry.label),
                format_date(entry.date),
            )
        })
        .collect()
}

pub fn render_assessment_history(history: &[AssessmentResult], limit: usize) -> String {
    if history.is_empty() {
        return placeholder_item(EMPTY_ASSESSMENTS);
    }
    history
        .iter()
        .take(limit)
        .map(|item| {
            format!(
                r#"<li class="history-item"><span>{}</span><span>{}% · {}</span></li>"#,
                escape_html(&item.quiz_title),
                item.score,
                format_date(item.date.date_naive()),
            )
        })
        .collect()
}

pub fn render_habit_list(habits: &[HabitRecord]) -> String {
    if habits.is_empty() {
        return placeholder_item(EMPTY_HABITS);
    }
    habits
        .iter()
        .map(|habit| {
            format!(
                concat!(
                    r#"<li><div class="habit-meta"><strong>{name}</strong>"#,
                    r#"<span>{streak}-day streak</span></div>"#,
                    r#"<button class="check" data-complete="{id}">Complete Today</button></li>"#,
                ),
                name = escape_html(&habit.name),
                streak = habit.streak,
                id = escape_html(&habit.id),
            )
        })
        .collect()
}

pub fn render_goal_list(goals: &[GoalRecord]) -> String {
    if goals.is_empty() {
        return format!(r#"<p class="history-item">{EMPTY_GOALS}</p>"#);
    }
    goals
        .iter()
        .map(|goal| {
            format!(
                concat!(
                    r#"<div class="goal"><div class="goal__info"><p>{name}</p>"#,
                    r#"<span>Target date: {target}</span></div>"#,
                    r#"<div class="progress-bar"><span style="width: {progress}%"></span></div>"#,
                    r#"<div class="goal-controls"><label for="goal-{id}">{progress}% complete</label>"#,
                    r#"<input id="goal-{id}" class="goal-range" type="range" min="0" max="100" "#,
                    r#"value="{progress}" data-goal-range="{id}" /></div></div>"#,
                ),
                name = escape_html(&goal.name),
                target = format_date(goal.target_date),
                progress = goal.progress,
                id = escape_html(&goal.id),
            )
        })
        .collect()
}

/// Quiz form: one required select per question, pre-selecting given answers.
pub fn render_quiz_form(quiz: &QuizDefinition, answers: &[Option<LikertAnswer>]) -> String {
    let mut markup = format!(r#"<h2 id="modal-title">{}</h2>"#, escape_html(&quiz.title));
    for (index, question) in quiz.questions.iter().enumerate() {
        let chosen = answers.get(index).copied().flatten();
        let options: String = LikertAnswer::ALL
            .iter()
            .map(|option| {
                let selected = if chosen == Some(*option) { " selected" } else { "" };
                format!(
                    r#"<option value="{label}"{selected}>{label}</option>"#,
                    label = option.label()
                )
            })
            .collect();
        markup.push_str(&format!(
            concat!(
                r#"<div class="question-block"><label for="q-{index}">{question}</label>"#,
                r#"<select id="q-{index}" name="q-{index}" required>"#,
                r#"<option value="" disabled{placeholder}>Choose</option>{options}</select></div>"#,
            ),
            index = index,
            question = escape_html(question),
            placeholder = if chosen.is_none() { " selected" } else { "" },
            options = options,
        ));
    }
    markup.push_str(r#"<button type="submit" class="secondary">Save Result</button>"#);
    markup
}

fn placeholder_item(text: &str) -> String {
    format!(r#"<li class="history-item">{text}</li>"#)
}
