//! Calendar-date utilities and the injectable clock.
//!
//! # Responsibility
//! - Provide a single source of current time (`Clock`).
//! - Derive "today", "yesterday" and same-day checks from that clock.
//! - Format dates for rendered views.
//!
//! # Invariants
//! - Calendar days are UTC days; a day boundary is UTC midnight.
//! - Nothing in core reads the system time except `SystemClock`.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by the host system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for deterministic tests and replays.
///
/// Clones share the same instant, so a test can keep one handle while a
/// context owns another.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    /// Pins the clock at noon UTC of `date`.
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(midday(date))
    }

    pub fn set_date(&self, date: NaiveDate) {
        self.now.set(midday(date));
    }

    /// Moves the clock forward by whole calendar days.
    pub fn advance_days(&self, days: u64) {
        let current = self.now.get();
        let next = current.checked_add_days(Days::new(days)).unwrap_or(current);
        self.now.set(next);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Calendar view over a clock.
#[derive(Clone, Copy)]
pub struct Calendar<'a> {
    clock: &'a dyn Clock,
}

impl<'a> Calendar<'a> {
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self { clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }

    pub fn yesterday(&self) -> NaiveDate {
        previous_day(self.today())
    }

    pub fn is_today(&self, date: NaiveDate) -> bool {
        same_day(date, self.today())
    }

    pub fn is_yesterday(&self, date: NaiveDate) -> bool {
        same_day(date, self.yesterday())
    }
}

/// Returns the calendar day before `date` (saturating at the minimum date).
pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

pub fn same_day(left: NaiveDate, right: NaiveDate) -> bool {
    left == right
}

/// Parses a `YYYY-MM-DD` date input.
///
/// Also accepts a full RFC 3339 timestamp and keeps its UTC date part, which
/// is the shape date inputs occasionally arrive in from the UI.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc).date_naive())
}

/// Formats a date as `Mon D, YYYY` (for example `Oct 18, 2026`).
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Returns the ISO `YYYY-MM-DD` form used by date inputs.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn midday(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default())
        .and_utc()
}
