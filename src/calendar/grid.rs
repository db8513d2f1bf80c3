use std::iter::successors;
use thiserror::Error;
use time::{Date, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    /// Number of days from `start` forwards to `self`, in `0..7`
    fn days_since(&self, start: Weekday) -> u8;
}

impl WeekdayExt for Weekday {
    fn days_since(&self, start: Weekday) -> u8 {
        (self.number_days_from_monday() + 7 - start.number_days_from_monday()) % 7
    }
}

/// Display flags for a single day cell.  The flags are independent of each
/// other, and all three may be set at once.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct CellState {
    pub(crate) in_current_month: bool,
    pub(crate) is_today: bool,
    pub(crate) is_selected: bool,
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

/// Returns every date shown when displaying the month containing `reference`:
/// the whole month plus the days of the adjacent months needed to fill out
/// its first and last weeks, in ascending order.
///
/// Fails only if those weeks extend past the range of representable dates.
pub(crate) fn build_month_grid(
    reference: Date,
    week_start: Weekday,
) -> Result<Vec<Date>, OutOfTimeError> {
    let first = first_of_month(reference);
    let last = last_of_month(reference);
    let leading = usize::from(first.weekday().days_since(week_start));
    let trailing = DAYS_IN_WEEK - 1 - usize::from(last.weekday().days_since(week_start));
    let start = iter_days_from(first, Date::previous_day)
        .nth(leading)
        .ok_or(OutOfTimeError)?;
    let end = iter_days_from(last, Date::next_day)
        .nth(trailing)
        .ok_or(OutOfTimeError)?;
    Ok(iter_days_from(start, Date::next_day)
        .take_while(|&d| d <= end)
        .collect())
}

pub(crate) fn classify_day(day: Date, reference: Date, today: Date, selected: Date) -> CellState {
    CellState {
        in_current_month: same_month(day, reference),
        is_today: day == today,
        is_selected: day == selected,
    }
}

pub(crate) fn same_month(a: Date, b: Date) -> bool {
    (a.year(), a.month()) == (b.year(), b.month())
}

/// The same day of the following month, clamped to that month's length
pub(crate) fn month_after(date: Date) -> Option<Date> {
    let month = date.month().next();
    let year = if month == Month::January {
        date.year().checked_add(1)?
    } else {
        date.year()
    };
    clamped_date(year, month, date.day())
}

/// The same day of the preceding month, clamped to that month's length
pub(crate) fn month_before(date: Date) -> Option<Date> {
    let month = date.month().previous();
    let year = if month == Month::December {
        date.year().checked_sub(1)?
    } else {
        date.year()
    };
    clamped_date(year, month, date.day())
}

fn clamped_date(year: i32, month: Month, day: u8) -> Option<Date> {
    (1..=day)
        .rev()
        .find_map(|d| Date::from_calendar_date(year, month, d).ok())
}

fn first_of_month(date: Date) -> Date {
    date.replace_day(1)
        .expect("every month should have a first day")
}

fn last_of_month(date: Date) -> Date {
    successors(Some(date), |&d| d.next_day().filter(|&t| t.month() == d.month()))
        .last()
        .unwrap_or(date)
}

// Includes `date` itself
fn iter_days_from(date: Date, step: fn(Date) -> Option<Date>) -> impl Iterator<Item = Date> {
    successors(Some(date), move |&d| step(d))
}
