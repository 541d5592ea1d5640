use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::consts::DAYS_PER_WEEK;
use crate::gregorian::Gregorian;
use crate::locale::Locale;

/// A calendar-agnostic point in time.
pub type Instant = DateTime<Utc>;

/// An instant broken into the fields a calendar system understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateComponents {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub nanosecond: u32,
}

impl DateComponents {
    /// Midnight at the start of the given day
    pub const fn midnight(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            nanosecond: 0,
        }
    }

    /// Same fields with the calendar day replaced, keeping the time of day
    #[must_use]
    pub const fn with_day(self, year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            ..self
        }
    }
}

/// Error type for composing an instant from date components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A single field is outside the range the calendar allows.
    #[error("Invalid {field}: {value}")]
    InvalidComponent { field: &'static str, value: i64 },

    /// The fields are individually valid but name a day that does not exist.
    #[error("Nonexistent date {year:04}-{month:02}-{day:02}")]
    NonexistentDate { year: i32, month: u32, day: u32 },

    /// The local wall-clock time cannot be mapped to a single instant.
    #[error("Local time cannot be represented as an instant")]
    UnrepresentableLocalTime,
}

/// Date arithmetic and field ranges for one calendar system.
///
/// All date math in the picker goes through this trait so non-Gregorian
/// calendars can be plugged in without touching the grid or the editor.
pub trait CalendarSystem: fmt::Debug + Send + Sync {
    fn identifier(&self) -> &str;

    /// Months of the given year, usually `1..=12`
    fn month_range(&self, year: i32) -> RangeInclusive<u32>;

    /// Days of the given month, or `None` if the month does not exist
    fn day_range(&self, year: i32, month: u32) -> Option<RangeInclusive<u32>>;

    /// Weekday of a real (already normalized) day
    fn weekday(&self, year: i32, month: u32, day: u32) -> Option<Weekday>;

    /// Resolves out-of-range month or day values by spilling into the
    /// neighbouring months, e.g. day 0 of March is the last day of February.
    fn normalize(&self, year: i32, month: i32, day: i32) -> Option<(i32, u32, u32)>;

    /// Strictly builds an instant; out-of-range fields are an error, never wrapped.
    ///
    /// # Errors
    /// Returns `CalendarError` when any field is out of range or the
    /// combination does not name a real instant.
    fn compose(&self, components: &DateComponents) -> Result<Instant, CalendarError>;

    fn decompose(&self, instant: Instant) -> DateComponents;
}

/// A calendar system together with the locale it is presented in.
///
/// The pair is an immutable value: changing the locale produces a new
/// `Calendar`, so the grid and the editor can hold copies safely.
#[derive(Clone)]
pub struct Calendar {
    system: Arc<dyn CalendarSystem>,
    locale: Locale,
}

impl Calendar {
    pub fn new(system: Arc<dyn CalendarSystem>, locale: Locale) -> Self {
        Self { system, locale }
    }

    /// Gregorian calendar in UTC
    pub fn gregorian(locale: Locale) -> Self {
        Self::new(Arc::new(Gregorian::utc()), locale)
    }

    /// The process default: Gregorian at the local UTC offset in the current locale
    pub fn current() -> Self {
        Self::new(Arc::new(Gregorian::local()), Locale::current())
    }

    pub fn system(&self) -> &dyn CalendarSystem {
        self.system.as_ref()
    }

    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    #[must_use]
    pub fn with_locale(&self, locale: Locale) -> Self {
        Self {
            system: Arc::clone(&self.system),
            locale,
        }
    }

    pub fn identifier(&self) -> &str {
        self.system.identifier()
    }

    pub fn month_range(&self, year: i32) -> RangeInclusive<u32> {
        self.system.month_range(year)
    }

    pub fn day_range(&self, year: i32, month: u32) -> Option<RangeInclusive<u32>> {
        self.system.day_range(year, month)
    }

    pub fn weekday(&self, year: i32, month: u32, day: u32) -> Option<Weekday> {
        self.system.weekday(year, month, day)
    }

    pub fn normalize(&self, year: i32, month: i32, day: i32) -> Option<(i32, u32, u32)> {
        self.system.normalize(year, month, day)
    }

    /// # Errors
    /// See [`CalendarSystem::compose`].
    pub fn compose(&self, components: &DateComponents) -> Result<Instant, CalendarError> {
        self.system.compose(components)
    }

    pub fn decompose(&self, instant: Instant) -> DateComponents {
        self.system.decompose(instant)
    }

    pub const fn first_weekday(&self) -> Weekday {
        self.locale.first_weekday()
    }

    /// Column of a weekday in a week that starts on the locale's first weekday
    pub fn weekday_column(&self, weekday: Weekday) -> usize {
        let first = self.first_weekday().num_days_from_sunday() as usize;
        let day = weekday.num_days_from_sunday() as usize;
        (day + DAYS_PER_WEEK - first) % DAYS_PER_WEEK
    }

    pub fn am_symbol(&self) -> &str {
        self.locale.am_symbol()
    }

    pub fn pm_symbol(&self) -> &str {
        self.locale.pm_symbol()
    }

    /// Header labels for the grid columns, starting on the first weekday.
    /// English uses two-letter abbreviations, other languages the very short symbols.
    pub fn weekday_header(&self) -> Vec<String> {
        let symbols: Vec<String> = if self.locale.language_code() == "en" {
            self.locale
                .short_weekday_symbols()
                .iter()
                .map(|s| s.chars().take(2).collect())
                .collect()
        } else {
            self.locale.very_short_weekday_symbols().to_vec()
        };
        if symbols.is_empty() {
            return symbols;
        }
        let first = self.first_weekday().num_days_from_sunday() as usize % symbols.len();
        symbols[first..]
            .iter()
            .chain(&symbols[..first])
            .cloned()
            .collect()
    }

    /// Title for a grid page, e.g. `Feb 2024`
    pub fn month_title(&self, year: i32, month: u32) -> String {
        let index = month.saturating_sub(1) as usize;
        self.locale.short_month_symbols().get(index).map_or_else(
            || format!("{month:02} {year:04}"),
            |symbol| format!("{symbol} {year:04}"),
        )
    }
}

impl fmt::Debug for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calendar")
            .field("system", &self.system)
            .field("locale", &self.locale.identifier())
            .finish()
    }
}

impl PartialEq for Calendar {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.system, &other.system) || self.identifier() == other.identifier())
            && self.locale == other.locale
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::current()
    }
}
