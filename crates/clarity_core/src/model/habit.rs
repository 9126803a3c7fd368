//! Habit records and streak rules.
//!
//! # Invariants
//! - `streak` counts consecutive calendar days ending at `last_completed`.
//! - A habit completes at most once per calendar day.

use crate::dates::Calendar;
use crate::model::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitRecord {
    pub id: RecordId,
    pub name: String,
    pub streak: u32,
    #[serde(default)]
    pub last_completed: Option<NaiveDate>,
}

/// Rejection reason for a completion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionRejected {
    AlreadyLoggedToday,
}

impl HabitRecord {
    /// Creates a habit that has never been completed.
    pub fn new(id: RecordId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            streak: 0,
            last_completed: None,
        }
    }

    /// Marks the habit complete on the calendar's today and returns the new
    /// streak.
    ///
    /// Continues the streak when the previous completion was yesterday,
    /// otherwise restarts it at 1. Leaves the record untouched when it was
    /// already completed today.
    pub fn complete_on(&mut self, calendar: &Calendar<'_>) -> Result<u32, CompletionRejected> {
        match self.last_completed {
            Some(last) if calendar.is_today(last) => {
                return Err(CompletionRejected::AlreadyLoggedToday);
            }
            Some(last) if calendar.is_yesterday(last) => {
                self.streak = self.streak.saturating_add(1);
            }
            _ => self.streak = 1,
        }
        self.last_completed = Some(calendar.today());
        Ok(self.streak)
    }
}

#[cfg(test)]
mod tests {
    use super::{CompletionRejected, HabitRecord};
    use crate::dates::{Calendar, FixedClock};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn complete(habit: &mut HabitRecord, d: u32) -> Result<u32, CompletionRejected> {
        let clock = FixedClock::at_date(day(d));
        habit.complete_on(&Calendar::new(&clock))
    }

    #[test]
    fn first_completion_starts_streak_at_one() {
        let mut habit = HabitRecord::new("h1".to_string(), "Stretch");
        assert_eq!(complete(&mut habit, 5), Ok(1));
        assert_eq!(habit.last_completed, Some(day(5)));
    }

    #[test]
    fn gap_of_more_than_one_day_resets_streak() {
        let mut habit = HabitRecord::new("h1".to_string(), "Stretch");
        complete(&mut habit, 1).unwrap();
        complete(&mut habit, 2).unwrap();
        assert_eq!(complete(&mut habit, 4), Ok(1));
    }

    #[test]
    fn same_day_completion_is_rejected_without_mutation() {
        let mut habit = HabitRecord::new("h1".to_string(), "Stretch");
        complete(&mut habit, 1).unwrap();
        complete(&mut habit, 2).unwrap();
        let before = habit.clone();

        assert_eq!(
            complete(&mut habit, 2),
            Err(CompletionRejected::AlreadyLoggedToday)
        );
        assert_eq!(habit, before);
    }
}
