use std::ops::RangeInclusive;

use chrono::{Datelike, FixedOffset, Local, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone, Timelike, Utc, Weekday};

use crate::calendar::{CalendarError, CalendarSystem, DateComponents, Instant};
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DECEMBER, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    JANUARY, LEAP_YEAR_CYCLE,
};

const MONTHS_PER_YEAR: i64 = DECEMBER as i64;
const MAX_HOUR: u32 = 23;
const MAX_MINUTE: u32 = 59;
const MAX_SECOND: u32 = 59;

/// Proleptic Gregorian calendar evaluated at a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gregorian {
    offset: FixedOffset,
}

impl Gregorian {
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// Uses the offset the process is running at right now
    pub fn local() -> Self {
        Self::new(Local::now().offset().fix())
    }

    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Default for Gregorian {
    fn default() -> Self {
        Self::utc()
    }
}

impl CalendarSystem for Gregorian {
    fn identifier(&self) -> &str {
        "gregorian"
    }

    fn month_range(&self, _year: i32) -> RangeInclusive<u32> {
        JANUARY..=DECEMBER
    }

    fn day_range(&self, year: i32, month: u32) -> Option<RangeInclusive<u32>> {
        if !(JANUARY..=DECEMBER).contains(&month) {
            return None;
        }
        Some(1..=days_in_month(year, month))
    }

    fn weekday(&self, year: i32, month: u32, day: u32) -> Option<Weekday> {
        NaiveDate::from_ymd_opt(year, month, day).map(|date| date.weekday())
    }

    fn normalize(&self, year: i32, month: i32, day: i32) -> Option<(i32, u32, u32)> {
        let months = i64::from(year) * MONTHS_PER_YEAR + i64::from(month) - 1;
        let year = i32::try_from(months.div_euclid(MONTHS_PER_YEAR)).ok()?;
        let month = u32::try_from(months.rem_euclid(MONTHS_PER_YEAR) + 1).ok()?;
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let date = first.checked_add_signed(TimeDelta::try_days(i64::from(day) - 1)?)?;
        Some((date.year(), date.month(), date.day()))
    }

    fn compose(&self, components: &DateComponents) -> Result<Instant, CalendarError> {
        let DateComponents {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanosecond,
        } = *components;

        check_component("month", month, JANUARY..=DECEMBER)?;
        check_component("hour", hour, 0..=MAX_HOUR)?;
        check_component("minute", minute, 0..=MAX_MINUTE)?;
        check_component("second", second, 0..=MAX_SECOND)?;

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(CalendarError::NonexistentDate { year, month, day })?;
        let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanosecond).ok_or(
            CalendarError::InvalidComponent {
                field: "nanosecond",
                value: i64::from(nanosecond),
            },
        )?;

        self.offset
            .from_local_datetime(&date.and_time(time))
            .single()
            .map(|local| local.with_timezone(&Utc))
            .ok_or(CalendarError::UnrepresentableLocalTime)
    }

    fn decompose(&self, instant: Instant) -> DateComponents {
        let local = instant.with_timezone(&self.offset);
        DateComponents {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: local.second(),
            nanosecond: local.nanosecond(),
        }
    }
}

fn check_component(
    field: &'static str,
    value: u32,
    range: RangeInclusive<u32>,
) -> Result<(), CalendarError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(CalendarError::InvalidComponent {
            field,
            value: i64::from(value),
        })
    }
}

// Helper functions

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i32, month: u32) -> u32 {
    debug_assert!(month != 0 && month <= DECEMBER);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> Instant {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: i32,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2024,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2100,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_day_range_follows_month_length() {
        let calendar = Gregorian::utc();
        assert_eq!(calendar.day_range(2023, 2), Some(1..=28));
        assert_eq!(calendar.day_range(2024, 2), Some(1..=29));
        assert_eq!(calendar.day_range(2024, 4), Some(1..=30));
        assert_eq!(calendar.day_range(2024, 12), Some(1..=31));
        assert_eq!(calendar.day_range(2024, 13), None);
        assert_eq!(calendar.day_range(2024, 0), None);
    }

    #[test]
    fn test_weekday() {
        let calendar = Gregorian::utc();
        assert_eq!(calendar.weekday(2024, 2, 1), Some(Weekday::Thu));
        assert_eq!(calendar.weekday(2023, 10, 1), Some(Weekday::Sun));
        assert_eq!(calendar.weekday(2023, 2, 29), None);
    }

    #[test]
    fn test_normalize_spills_into_neighbouring_months() {
        let calendar = Gregorian::utc();
        assert_eq!(calendar.normalize(2024, 3, 0), Some((2024, 2, 29)));
        assert_eq!(calendar.normalize(2023, 3, -1), Some((2023, 2, 27)));
        assert_eq!(calendar.normalize(2024, 1, 32), Some((2024, 2, 1)));
        assert_eq!(calendar.normalize(2024, 1, -1), Some((2023, 12, 30)));
        assert_eq!(calendar.normalize(2024, 13, 1), Some((2025, 1, 1)));
        assert_eq!(calendar.normalize(2024, 0, 1), Some((2023, 12, 1)));
        assert_eq!(calendar.normalize(2024, 6, 15), Some((2024, 6, 15)));
    }

    #[test]
    fn test_compose_round_trips_decompose() {
        let calendar = Gregorian::utc();
        let instant = utc(2024, 8, 15, 17, 45);
        let components = calendar.decompose(instant);
        assert_eq!(components.year, 2024);
        assert_eq!(components.hour, 17);
        assert_eq!(calendar.compose(&components), Ok(instant));
    }

    #[test]
    fn test_compose_rejects_nonexistent_day() {
        let calendar = Gregorian::utc();
        let result = calendar.compose(&DateComponents::midnight(2023, 2, 30));
        assert_eq!(
            result,
            Err(CalendarError::NonexistentDate {
                year: 2023,
                month: 2,
                day: 30
            })
        );
    }

    #[test]
    fn test_compose_rejects_out_of_range_fields() {
        let calendar = Gregorian::utc();
        let mut components = DateComponents::midnight(2024, 1, 1);
        components.hour = 24;
        assert!(matches!(
            calendar.compose(&components),
            Err(CalendarError::InvalidComponent { field: "hour", value: 24 })
        ));

        let components = DateComponents::midnight(2024, 13, 1);
        assert!(matches!(
            calendar.compose(&components),
            Err(CalendarError::InvalidComponent { field: "month", .. })
        ));
    }

    #[test]
    fn test_offset_applies_to_fields() {
        let tokyo = Gregorian::new(FixedOffset::east_opt(9 * 3600).unwrap());
        let instant = utc(2024, 12, 31, 20, 0);
        let components = tokyo.decompose(instant);
        assert_eq!((components.year, components.month, components.day), (2025, 1, 1));
        assert_eq!(components.hour, 5);
        assert_eq!(tokyo.compose(&components), Ok(instant));
    }
}
