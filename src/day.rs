use std::fmt;

use crate::calendar::{Calendar, DateComponents, Instant};

/// One cell of the month grid.
///
/// `month` and `day` are stored as the grid produced them; leading and
/// trailing cells use values such as day `0` or `32` that the calendar
/// resolves into the neighbouring month.
#[derive(Debug, Clone)]
pub struct Day {
    calendar: Calendar,
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

impl Day {
    pub const fn new(calendar: Calendar, year: i32, month: i32, day: i32) -> Self {
        Self {
            calendar,
            year,
            month,
            day,
        }
    }

    pub const fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// The real (year, month, day) this cell stands for
    pub fn resolved(&self) -> Option<(i32, u32, u32)> {
        self.calendar.normalize(self.year, self.month, self.day)
    }

    /// Midnight at the start of the day
    pub fn date(&self) -> Option<Instant> {
        let (year, month, day) = self.resolved()?;
        self.calendar
            .compose(&DateComponents::midnight(year, month, day))
            .ok()
    }

    /// This day combined with the time of day of `instant`
    pub fn at_time_of(&self, instant: Instant) -> Option<Instant> {
        let (year, month, day) = self.resolved()?;
        let components = self.calendar.decompose(instant).with_day(year, month, day);
        self.calendar.compose(&components).ok()
    }

    /// Whether the day falls in the given month, after resolving spillover
    pub fn is_in_month(&self, year: i32, month: u32) -> bool {
        self.resolved()
            .is_some_and(|(y, m, _)| y == year && m == month)
    }

    pub fn is_today(&self, now: Instant) -> bool {
        let today = self.calendar.decompose(now);
        self.resolved()
            .is_some_and(|resolved| resolved == (today.year, today.month, today.day))
    }
}

impl PartialEq for Day {
    fn eq(&self, other: &Self) -> bool {
        if self.day == other.day && self.month == other.month && self.year == other.year {
            return true;
        }
        match (self.date(), other.date()) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolved() {
            Some((year, month, day)) => write!(f, "{year:04}-{month:02}-{day:02}"),
            None => write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day),
        }
    }
}
