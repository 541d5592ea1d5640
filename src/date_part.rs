use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::calendar::{Calendar, CalendarError, DateComponents};
use crate::consts::{HOURS_PER_MERIDIEM, MAX_YEAR, MIN_YEAR, NOON};
use crate::prelude::*;

const HOUR12_RANGE: RangeInclusive<i64> = 1..=12;
const HOUR24_RANGE: RangeInclusive<i64> = 0..=23;
const MINUTE_RANGE: RangeInclusive<i64> = 0..=59;

/// One editable segment of the date/time text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum DatePart {
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "hour")]
    Hour12,
    #[display(fmt = "hour")]
    Hour24,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "am/pm")]
    AmPm,
}

impl DatePart {
    pub const ALL: [Self; 7] = [
        Self::Day,
        Self::Month,
        Self::Year,
        Self::Hour12,
        Self::Hour24,
        Self::Minute,
        Self::AmPm,
    ];

    /// Day, month and year are edited alongside the calendar grid
    pub const fn is_date_part(self) -> bool {
        matches!(self, Self::Day | Self::Month | Self::Year)
    }

    pub const fn is_time_part(self) -> bool {
        !self.is_date_part()
    }

    /// Characters the field holds before it commits on its own
    pub fn max_length(self, calendar: &Calendar) -> usize {
        match self {
            Self::Day | Self::Month | Self::Hour12 | Self::Hour24 | Self::Minute => 2,
            Self::Year => 4,
            Self::AmPm => calendar
                .am_symbol()
                .chars()
                .count()
                .max(calendar.pm_symbol().chars().count()),
        }
    }

    /// Values the field accepts given the date currently being edited.
    /// `None` for the AM/PM field, which takes letters.
    pub fn legal_range(
        self,
        calendar: &Calendar,
        current: &DateComponents,
    ) -> Option<RangeInclusive<i64>> {
        match self {
            Self::Day => calendar
                .day_range(current.year, current.month)
                .map(|days| i64::from(*days.start())..=i64::from(*days.end())),
            Self::Month => {
                let months = calendar.month_range(current.year);
                Some(i64::from(*months.start())..=i64::from(*months.end()))
            }
            Self::Year => Some(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)),
            Self::Hour12 => Some(HOUR12_RANGE),
            Self::Hour24 => Some(HOUR24_RANGE),
            Self::Minute => Some(MINUTE_RANGE),
            Self::AmPm => None,
        }
    }

    /// Whether `digits` could still become a legal value, either as typed
    /// or zero-padded to the field width (`"0"` may lead to `"05"`).
    pub fn admits_prefix(self, digits: &str, calendar: &Calendar, current: &DateComponents) -> bool {
        let Some(range) = self.legal_range(calendar, current) else {
            return false;
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        let width = self.max_length(calendar);
        let length = digits.len();
        if length > width {
            return false;
        }
        let Ok(value) = digits.parse::<i64>() else {
            return false;
        };
        let overlaps = |lo: i64, hi: i64| lo <= *range.end() && hi >= *range.start();

        let padded_span = decimal_span(width - length);
        if overlaps(value * padded_span, (value + 1) * padded_span - 1) {
            return true;
        }

        let has_leading_zero = digits.starts_with('0');
        let extra_digits = if has_leading_zero { 0 } else { width - length };
        (0..=extra_digits).any(|extra| {
            let span = decimal_span(extra);
            overlaps(value * span, value * span + span - 1)
        })
    }

    /// Writes `value` into `components`. Twelve-hour input is converted with
    /// `is_pm`: 12 AM is hour 0 and 1-11 PM are hours 13-23.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidComponent` if `value` does not fit the field.
    pub fn fold(
        self,
        value: i64,
        components: &mut DateComponents,
        is_pm: bool,
    ) -> Result<(), CalendarError> {
        let field = |field: &'static str| CalendarError::InvalidComponent { field, value };
        match self {
            Self::Day => components.day = u32::try_from(value).map_err(|_| field("day"))?,
            Self::Month => components.month = u32::try_from(value).map_err(|_| field("month"))?,
            Self::Year => components.year = i32::try_from(value).map_err(|_| field("year"))?,
            Self::Hour12 => {
                let hour = u32::try_from(value).map_err(|_| field("hour"))?;
                components.hour = match hour {
                    NOON if !is_pm => 0,
                    1..NOON if is_pm => hour + HOURS_PER_MERIDIEM,
                    _ => hour,
                };
            }
            Self::Hour24 => components.hour = u32::try_from(value).map_err(|_| field("hour"))?,
            Self::Minute => {
                components.minute = u32::try_from(value).map_err(|_| field("minute"))?;
            }
            Self::AmPm => {}
        }
        Ok(())
    }

    /// The field's text for a date, truncated to the field width
    pub fn format(self, calendar: &Calendar, components: &DateComponents) -> String {
        let text = match self {
            Self::Day => format!("{:02}", components.day),
            Self::Month => format!("{:02}", components.month),
            Self::Year => format!("{:04}", components.year),
            Self::Hour12 => match components.hour % HOURS_PER_MERIDIEM {
                0 => HOURS_PER_MERIDIEM.to_string(),
                hour => hour.to_string(),
            },
            Self::Hour24 => format!("{:02}", components.hour),
            Self::Minute => format!("{:02}", components.minute),
            Self::AmPm => meridiem_symbol(calendar, components.hour >= NOON).to_owned(),
        };
        text.chars().take(self.max_length(calendar)).collect()
    }
}

/// The calendar's AM or PM symbol
pub fn meridiem_symbol(calendar: &Calendar, is_pm: bool) -> &str {
    if is_pm {
        calendar.pm_symbol()
    } else {
        calendar.am_symbol()
    }
}

fn decimal_span(digits: usize) -> i64 {
    (0..digits).fold(1, |span, _| span * 10)
}
