use serde::{Deserialize, Serialize};

use crate::bounds::DateBounds;
use crate::calendar::{Calendar, Instant};
use crate::consts::{DAYS_PER_WEEK, GRID_CELLS};
use crate::day::Day;
use crate::prelude::*;

/// The month a grid page displays, independent of the selected date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[display(fmt = "{year:04}-{month:02}")]
pub struct CurrentMonth {
    year: i32,
    month: u32,
}

impl CurrentMonth {
    /// Creates a page, wrapping an out-of-range month into the adjacent year
    pub fn new(calendar: &Calendar, year: i32, month: u32) -> Self {
        let months = calendar.month_range(year);
        if months.contains(&month) {
            Self { year, month }
        } else if month > *months.end() {
            Self::new(calendar, year + 1, month - *months.end())
        } else {
            Self {
                year: year - 1,
                month: *calendar.month_range(year - 1).end(),
            }
        }
    }

    /// The page that contains `instant`
    pub fn containing(calendar: &Calendar, instant: Instant) -> Self {
        let components = calendar.decompose(instant);
        Self {
            year: components.year,
            month: components.month,
        }
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u32 {
        self.month
    }

    /// The following page, rolling into the next year after its last month
    #[must_use]
    pub fn next(self, calendar: &Calendar) -> Self {
        let months = calendar.month_range(self.year);
        if self.month >= *months.end() {
            Self {
                year: self.year + 1,
                month: *calendar.month_range(self.year + 1).start(),
            }
        } else {
            Self {
                month: self.month + 1,
                ..self
            }
        }
    }

    /// The preceding page, rolling into the previous year before its first month
    #[must_use]
    pub fn previous(self, calendar: &Calendar) -> Self {
        let months = calendar.month_range(self.year);
        if self.month <= *months.start() {
            Self {
                year: self.year - 1,
                month: *calendar.month_range(self.year - 1).end(),
            }
        } else {
            Self {
                month: self.month - 1,
                ..self
            }
        }
    }

    /// Moves `delta` pages forward (positive) or back (negative)
    #[must_use]
    pub fn shifted(self, calendar: &Calendar, delta: i32) -> Self {
        let step = if delta >= 0 { Self::next } else { Self::previous };
        (0..delta.unsigned_abs()).fold(self, |page, _| step(page, calendar))
    }
}

/// The 6x7 day grid of one month page.
///
/// The first cell always falls on the locale's first weekday. Cells before
/// day 1 and after the last day belong to the neighbouring months.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    current: CurrentMonth,
    days: Vec<Day>,
}

impl MonthGrid {
    pub fn build(calendar: &Calendar, current: CurrentMonth) -> Self {
        let year = current.year();
        let month = current.month();
        let month_index = i32::try_from(month).unwrap_or(i32::MAX);
        let leading = calendar
            .weekday(year, month, 1)
            .map_or(0, |weekday| calendar.weekday_column(weekday));
        let leading = i32::try_from(leading).unwrap_or(0);

        // day numbers start at 1 - leading (spilling into the previous month)
        // and run past the last day (spilling into the next one)
        let days = (1 - leading..)
            .take(GRID_CELLS)
            .map(|day| Day::new(calendar.clone(), year, month_index, day))
            .collect();

        Self { current, days }
    }

    pub const fn current(&self) -> CurrentMonth {
        self.current
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn day(&self, index: usize) -> Option<&Day> {
        self.days.get(index)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Day]> {
        self.days.chunks(DAYS_PER_WEEK)
    }

    /// Whether the cell belongs to the displayed month
    pub fn is_in_current_month(&self, index: usize) -> bool {
        self.day(index)
            .is_some_and(|day| day.is_in_month(self.current.year(), self.current.month()))
    }

    /// Whether tapping the cell would produce a date inside `bounds`, keeping
    /// the time of day of `selected`. Degenerate bounds exclude nothing.
    pub fn is_selectable(&self, index: usize, bounds: &DateBounds, selected: Instant) -> bool {
        self.day(index)
            .and_then(|day| day.at_time_of(selected))
            .is_some_and(|date| bounds.permits(date))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc, Weekday};

    use super::*;
    use crate::locale::Locale;

    fn us() -> Calendar {
        Calendar::gregorian(Locale::en_us())
    }

    fn gb() -> Calendar {
        Calendar::gregorian(Locale::en_gb())
    }

    #[test]
    fn test_current_month_wraps() {
        let calendar = us();
        let december = CurrentMonth::new(&calendar, 2023, 12);
        assert_eq!(december.next(&calendar), CurrentMonth::new(&calendar, 2024, 1));

        let january = CurrentMonth::new(&calendar, 2024, 1);
        assert_eq!(january.previous(&calendar), december);

        assert_eq!(CurrentMonth::new(&calendar, 2024, 13), CurrentMonth::new(&calendar, 2025, 1));
        assert_eq!(CurrentMonth::new(&calendar, 2024, 0), december);
        assert_eq!(january.shifted(&calendar, -13), CurrentMonth::new(&calendar, 2022, 12));
        assert_eq!(january.shifted(&calendar, 25).to_string(), "2026-02");
    }

    #[test]
    fn test_grid_has_42_days_for_every_month() {
        for calendar in [us(), gb()] {
            for year in [1999, 2000, 2023, 2024, 2100] {
                for month in 1..=12 {
                    let grid = MonthGrid::build(&calendar, CurrentMonth::new(&calendar, year, month));
                    assert_eq!(grid.days().len(), GRID_CELLS, "{year}-{month}");
                    assert_eq!(grid.rows().count(), 6);

                    let first = grid.days()[0].resolved().unwrap();
                    let weekday = calendar.weekday(first.0, first.1, first.2).unwrap();
                    assert_eq!(weekday, calendar.first_weekday(), "{year}-{month}");

                    let in_month: Vec<u32> = grid
                        .days()
                        .iter()
                        .filter(|day| day.is_in_month(year, month))
                        .map(|day| day.resolved().unwrap().2)
                        .collect();
                    let expected = calendar.day_range(year, month).unwrap();
                    assert_eq!(in_month.len(), *expected.end() as usize);
                    assert!(in_month.windows(2).all(|pair| pair[0] < pair[1]));
                }
            }
        }
    }

    #[test]
    fn test_february_2024_layout() {
        // 1 February 2024 is a Thursday
        let calendar = us();
        let grid = MonthGrid::build(&calendar, CurrentMonth::new(&calendar, 2024, 2));
        assert_eq!(grid.days()[0].resolved(), Some((2024, 1, 28)));
        assert_eq!(grid.days()[4].resolved(), Some((2024, 2, 1)));
        assert_eq!(grid.days()[32].resolved(), Some((2024, 2, 29)));
        assert_eq!(grid.days()[33].resolved(), Some((2024, 3, 1)));
        assert!(!grid.is_in_current_month(3));
        assert!(grid.is_in_current_month(4));

        let monday_first = gb();
        let grid = MonthGrid::build(&monday_first, CurrentMonth::new(&monday_first, 2024, 2));
        assert_eq!(grid.days()[0].resolved(), Some((2024, 1, 29)));
        assert_eq!(
            monday_first.weekday(2024, 1, 29),
            Some(Weekday::Mon)
        );
    }

    #[test]
    fn test_selectability_respects_bounds() {
        let calendar = us();
        let grid = MonthGrid::build(&calendar, CurrentMonth::new(&calendar, 2024, 1));
        let selected = Utc.with_ymd_and_hms(2024, 1, 7, 12, 0, 0).unwrap();
        let bounds = DateBounds::new(
            Some(Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap()),
            Some(Utc.with_ymd_and_hms(2024, 1, 10, 23, 0, 0).unwrap()),
        );
        // 1 January 2024 is a Monday, so index 1 is day 1
        assert!(!grid.is_selectable(4, &bounds, selected));
        assert!(grid.is_selectable(5, &bounds, selected));
        assert!(grid.is_selectable(10, &bounds, selected));
        assert!(!grid.is_selectable(11, &bounds, selected));
    }

    #[test]
    fn test_degenerate_bounds_make_every_cell_selectable() {
        let calendar = us();
        let grid = MonthGrid::build(&calendar, CurrentMonth::new(&calendar, 2024, 1));
        let selected = Utc.with_ymd_and_hms(2024, 1, 7, 12, 0, 0).unwrap();
        let bounds = DateBounds::new(
            Some(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()),
            Some(Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap()),
        );
        assert!((0..GRID_CELLS).all(|index| grid.is_selectable(index, &bounds, selected)));
    }
}
