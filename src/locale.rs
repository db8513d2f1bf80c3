use crate::calendar::{WeekdayExt, DAYS_IN_WEEK};
use std::fmt;
use std::iter::successors;
use std::str::FromStr;
use thiserror::Error;
use time::{macros::date, Date, Weekday};

/// A Monday, used as the source of dates for formatting weekday names
const REFERENCE_MONDAY: Date = date!(2024 - 01 - 01);

/// Formatting and week-layout conventions for displaying a calendar
pub(crate) trait Locale {
    /// Abbreviated name of the day of the week on which `date` falls
    fn format_short(&self, date: Date) -> String;

    /// Name of the month and year in which `date` falls
    fn format_month_year(&self, date: Date) -> String;

    /// The day of the week on which displayed weeks begin
    fn week_start_day(&self) -> Weekday;
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum BuiltinLocale {
    #[default]
    EnUs,
    Fr,
}

impl BuiltinLocale {
    // Monday first
    fn weekday_names(self) -> [&'static str; DAYS_IN_WEEK] {
        match self {
            BuiltinLocale::EnUs => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
            BuiltinLocale::Fr => ["lun.", "mar.", "mer.", "jeu.", "ven.", "sam.", "dim."],
        }
    }

    fn month_names(self) -> [&'static str; 12] {
        match self {
            BuiltinLocale::EnUs => [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ],
            BuiltinLocale::Fr => [
                "janvier",
                "février",
                "mars",
                "avril",
                "mai",
                "juin",
                "juillet",
                "août",
                "septembre",
                "octobre",
                "novembre",
                "décembre",
            ],
        }
    }
}

impl Locale for BuiltinLocale {
    fn format_short(&self, date: Date) -> String {
        let i = usize::from(date.weekday().number_days_from_monday());
        self.weekday_names()[i].to_owned()
    }

    fn format_month_year(&self, date: Date) -> String {
        let name = self.month_names()[usize::from(u8::from(date.month())) - 1];
        let year = date.year();
        format!("{name} {year}")
    }

    fn week_start_day(&self) -> Weekday {
        Weekday::Monday
    }
}

impl fmt::Display for BuiltinLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuiltinLocale::EnUs => write!(f, "en-US"),
            BuiltinLocale::Fr => write!(f, "fr"),
        }
    }
}

impl FromStr for BuiltinLocale {
    type Err = UnknownLocaleError;

    fn from_str(s: &str) -> Result<BuiltinLocale, UnknownLocaleError> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" => Ok(BuiltinLocale::EnUs),
            "fr" | "fr-fr" => Ok(BuiltinLocale::Fr),
            _ => Err(UnknownLocaleError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown locale {0:?}; expected \"en-US\" or \"fr\"")]
pub(crate) struct UnknownLocaleError(String);

/// Returns the abbreviated names of the seven days of the week, in display
/// order for `locale`
pub(crate) fn weekday_labels<L: Locale + ?Sized>(locale: &L) -> Vec<String> {
    let offset = locale.week_start_day().days_since(Weekday::Monday);
    successors(Some(REFERENCE_MONDAY), |&d| d.next_day())
        .skip(usize::from(offset))
        .take(DAYS_IN_WEEK)
        .map(|d| locale.format_short(d))
        .collect()
}
