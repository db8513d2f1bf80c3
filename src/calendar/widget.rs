use super::grid::{CellState, DAYS_IN_WEEK};
use super::picker::DatePicker;
use crate::locale::Locale;
use crate::theme::{
    DAY_STYLE, HEADER_STYLE, NAV_STYLE, OTHER_MONTH_STYLE, SELECTED_STYLE, WEEKDAY_STYLE,
};
use ratatui::{prelude::*, widgets::*};
use std::marker::PhantomData;
use time::Date;

/// Number of columns taken up by the text of a single day
const CELL_WIDTH: u16 = 4;

/// Number of columns per day of week, including the gap after the day
const DAY_WIDTH: u16 = 5;

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = DAY_WIDTH * 6 + CELL_WIDTH;

/// Number of columns taken up by each of the month navigation buttons
const BUTTON_WIDTH: u16 = 3;

const NAV_LINE: u16 = 0;

const WEEKDAY_LINE: u16 = 2;

/// Number of lines above the first week: the navigation line, a blank line,
/// the weekday names, and their rule
const HEADER_LINES: u16 = 4;

/// Number of lines taken up by each week of the calendar
const WEEK_LINES: u16 = 2;

const ACS_HLINE: char = '─';

/// A clickable part of the calendar
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Target {
    PreviousMonth,
    NextMonth,
    /// Index into the displayed month's grid
    Day(usize),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Calendar<L, F> {
    _data: PhantomData<(L, F)>,
}

impl<L, F> Calendar<L, F> {
    pub(crate) fn new() -> Calendar<L, F> {
        Calendar { _data: PhantomData }
    }
}

impl<L: Locale, F: FnMut(Date)> StatefulWidget for Calendar<L, F> {
    type State = DatePicker<L, F>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let grid = state.grid().unwrap_or_default();
        let area = calendar_area(area, grid.len() / DAYS_IN_WEEK);
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_nav(&capitalize(&state.header()));
        canvas.draw_weekdays(&state.weekday_labels());
        for (week_no, week) in std::iter::zip(0u16.., grid.chunks(DAYS_IN_WEEK)) {
            for (col, &date) in std::iter::zip(0u16.., week) {
                canvas.draw_day(week_no, col, date.day(), state.cell_state(date));
            }
        }
    }
}

/// Determines what part of the calendar, if any, is at terminal coordinates
/// (`column`, `row`) when a month of `weeks` weeks was rendered into `area`
pub(crate) fn hit_test(area: Rect, weeks: usize, column: u16, row: u16) -> Option<Target> {
    let area = calendar_area(area, weeks);
    let x = column.checked_sub(area.x).filter(|&x| x < area.width)?;
    let y = row.checked_sub(area.y).filter(|&y| y < area.height)?;
    if y == NAV_LINE {
        return if x < BUTTON_WIDTH {
            Some(Target::PreviousMonth)
        } else if x >= MAIN_WIDTH - BUTTON_WIDTH {
            Some(Target::NextMonth)
        } else {
            None
        };
    }
    let week = usize::from(y.checked_sub(HEADER_LINES)? / WEEK_LINES);
    if week >= weeks {
        return None;
    }
    Some(Target::Day(week * DAYS_IN_WEEK + usize::from(x / DAY_WIDTH)))
}

// The calendar is centered within the available area.
fn calendar_area(area: Rect, weeks: usize) -> Rect {
    let height = u16::try_from(weeks)
        .unwrap_or(u16::MAX)
        .saturating_mul(WEEK_LINES)
        .saturating_add(HEADER_LINES)
        .min(area.height);
    let width = MAIN_WIDTH.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn cell_style(state: CellState) -> Style {
    let style = if state.in_current_month {
        DAY_STYLE
    } else {
        OTHER_MONTH_STYLE
    };
    if state.is_selected {
        style.patch(SELECTED_STYLE)
    } else {
        style
    }
}

fn day_text(day: u8, is_today: bool) -> String {
    if is_today {
        format!("[{day:2}]")
    } else {
        format!(" {day:2} ")
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    first.to_uppercase().chain(chars).collect()
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_nav(&mut self, header: &str) {
        self.mvprint(NAV_LINE, 0, " < ", Some(NAV_STYLE));
        let width = u16::try_from(Line::raw(header).width()).unwrap_or(u16::MAX);
        self.mvprint(
            NAV_LINE,
            MAIN_WIDTH.saturating_sub(width) / 2,
            header,
            Some(HEADER_STYLE),
        );
        self.mvprint(NAV_LINE, MAIN_WIDTH - BUTTON_WIDTH, " > ", Some(NAV_STYLE));
    }

    fn draw_weekdays(&mut self, labels: &[String]) {
        for (col, label) in std::iter::zip(0u16.., labels) {
            let label = capitalize(label);
            self.mvprint(
                WEEKDAY_LINE,
                DAY_WIDTH * col,
                format!("{label:^width$}", width = usize::from(CELL_WIDTH)),
                Some(WEEKDAY_STYLE),
            );
        }
        self.hline(WEEKDAY_LINE + 1, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, col: u16, day: u8, state: CellState) {
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            DAY_WIDTH * col,
            day_text(day, state.is_today),
            Some(cell_style(state)),
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::BuiltinLocale;
    use crate::theme::BASE_STYLE;
    use time::macros::date;

    #[test]
    fn test_render_march_2024() {
        let mut picker = DatePicker::new(date!(2024 - 03 - 15), BuiltinLocale::EnUs, |_| ());
        picker.select(date!(2024 - 03 - 20));
        let area = Rect::new(0, 0, 34, 14);
        let mut buffer = Buffer::empty(area);
        buffer.set_style(area, BASE_STYLE);
        Calendar::new().render(area, &mut buffer, &mut picker);
        let mut expected = Buffer::with_lines([
            " <          March 2024          > ",
            "                                  ",
            "Mon  Tue  Wed  Thu  Fri  Sat  Sun ",
            "──────────────────────────────────",
            " 26   27   28   29    1    2    3 ",
            "                                  ",
            "  4    5    6    7    8    9   10 ",
            "                                  ",
            " 11   12   13   14  [15]  16   17 ",
            "                                  ",
            " 18   19   20   21   22   23   24 ",
            "                                  ",
            " 25   26   27   28   29   30   31 ",
            "                                  ",
        ]);
        expected.set_style(*expected.area(), BASE_STYLE);
        expected.set_style(Rect::new(0, 0, 3, 1), NAV_STYLE);
        expected.set_style(Rect::new(12, 0, 10, 1), HEADER_STYLE);
        expected.set_style(Rect::new(31, 0, 3, 1), NAV_STYLE);
        for x in [0, 5, 10, 15, 20, 25, 30] {
            expected.set_style(Rect::new(x, 2, 4, 1), WEEKDAY_STYLE);
        }
        for x in [0, 5, 10, 15] {
            expected.set_style(Rect::new(x, 4, 4, 1), OTHER_MONTH_STYLE);
        }
        expected.set_style(Rect::new(10, 10, 4, 1), SELECTED_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_hit_test() {
        let area = Rect::new(0, 0, 80, 24);
        // 34x14 calendar centered at (23, 5)
        assert_eq!(hit_test(area, 5, 23, 5), Some(Target::PreviousMonth));
        assert_eq!(hit_test(area, 5, 25, 5), Some(Target::PreviousMonth));
        assert_eq!(hit_test(area, 5, 26, 5), None);
        assert_eq!(hit_test(area, 5, 40, 5), None);
        assert_eq!(hit_test(area, 5, 54, 5), Some(Target::NextMonth));
        assert_eq!(hit_test(area, 5, 56, 5), Some(Target::NextMonth));
        assert_eq!(hit_test(area, 5, 57, 5), None);
        assert_eq!(hit_test(area, 5, 30, 7), None);
        assert_eq!(hit_test(area, 5, 30, 8), None);
        assert_eq!(hit_test(area, 5, 23, 9), Some(Target::Day(0)));
        assert_eq!(hit_test(area, 5, 23, 10), Some(Target::Day(0)));
        assert_eq!(hit_test(area, 5, 43, 13), Some(Target::Day(18)));
        assert_eq!(hit_test(area, 5, 56, 17), Some(Target::Day(34)));
        assert_eq!(hit_test(area, 5, 56, 19), None);
        assert_eq!(hit_test(area, 5, 10, 13), None);
    }

    #[test]
    fn test_hit_test_six_weeks() {
        let area = Rect::new(0, 0, 80, 24);
        // 34x16 calendar centered at (23, 4)
        assert_eq!(hit_test(area, 6, 23, 4), Some(Target::PreviousMonth));
        assert_eq!(hit_test(area, 6, 56, 18), Some(Target::Day(41)));
        assert_eq!(hit_test(area, 6, 56, 20), None);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("mars 2024"), "Mars 2024");
        assert_eq!(capitalize("éte"), "Éte");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_day_text() {
        assert_eq!(day_text(3, false), "  3 ");
        assert_eq!(day_text(15, true), "[15]");
    }
}
