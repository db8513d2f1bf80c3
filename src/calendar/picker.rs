use super::grid::{
    build_month_grid, classify_day, month_after, month_before, CellState, OutOfTimeError,
};
use crate::locale::{weekday_labels, Locale};
use log::{debug, info};
use std::fmt;
use time::Date;

/// The state of a date picker: which month is on display, which day is
/// selected, and who to tell when the selection changes
pub(crate) struct DatePicker<L, F> {
    today: Date,
    month: Date,
    selected: Date,
    locale: L,
    on_day_select: F,
}

impl<L: Locale, F: FnMut(Date)> DatePicker<L, F> {
    pub(crate) fn new(today: Date, locale: L, on_day_select: F) -> Self {
        DatePicker {
            today,
            month: today,
            selected: today,
            locale,
            on_day_select,
        }
    }

    pub(crate) fn start_month(mut self, date: Date) -> Self {
        self.month = date;
        self
    }

    pub(crate) fn grid(&self) -> Result<Vec<Date>, OutOfTimeError> {
        build_month_grid(self.month, self.locale.week_start_day())
    }

    pub(crate) fn cell_state(&self, day: Date) -> CellState {
        classify_day(day, self.month, self.today, self.selected)
    }

    pub(crate) fn header(&self) -> String {
        self.locale.format_month_year(self.month)
    }

    pub(crate) fn weekday_labels(&self) -> Vec<String> {
        weekday_labels(&self.locale)
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        let month = month_before(self.month).ok_or(OutOfTimeError)?;
        self.show_month(month)
    }

    pub(crate) fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        let month = month_after(self.month).ok_or(OutOfTimeError)?;
        self.show_month(month)
    }

    // Only months whose whole grid is representable can be shown.
    fn show_month(&mut self, month: Date) -> Result<(), OutOfTimeError> {
        build_month_grid(month, self.locale.week_start_day())?;
        debug!("Showing {}", self.locale.format_month_year(month));
        self.month = month;
        Ok(())
    }

    pub(crate) fn select(&mut self, day: Date) {
        info!("Selected {day}");
        self.selected = day;
        (self.on_day_select)(day);
    }
}

impl<L: fmt::Debug, F> fmt::Debug for DatePicker<L, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePicker")
            .field("today", &self.today)
            .field("month", &self.month)
            .field("selected", &self.selected)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}
