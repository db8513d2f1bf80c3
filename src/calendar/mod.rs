mod grid;
mod picker;
mod widget;
pub(crate) use self::grid::{build_month_grid, WeekdayExt, DAYS_IN_WEEK};
pub(crate) use self::picker::DatePicker;
pub(crate) use self::widget::{hit_test, Calendar, Target};
