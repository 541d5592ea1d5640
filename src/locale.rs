use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Order in which a locale writes the day, month and year fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    #[display(fmt = "MM/dd/yyyy")]
    MonthDayYear,
    #[display(fmt = "dd/MM/yyyy")]
    DayMonthYear,
    #[display(fmt = "yyyy/MM/dd")]
    YearMonthDay,
}

/// Whether a locale shows hours on a 12-hour clock with an AM/PM marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum HourCycle {
    #[display(fmt = "h12")]
    H12,
    #[display(fmt = "h23")]
    H23,
}

/// Locale-dependent symbols and conventions consumed by the picker.
///
/// Weekday symbol lists start on Sunday, month symbol lists on January.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    identifier: String,
    am_symbol: String,
    pm_symbol: String,
    hour_cycle: HourCycle,
    date_order: DateOrder,
    first_weekday: Weekday,
    short_weekday_symbols: Vec<String>,
    very_short_weekday_symbols: Vec<String>,
    short_month_symbols: Vec<String>,
}

fn owned(symbols: &[&str]) -> Vec<String> {
    symbols.iter().map(|s| (*s).to_owned()).collect()
}

const EN_WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const EN_WEEKDAYS_VERY_SHORT: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];
const EN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Locale {
    /// English (United States): month-day-year, 12-hour clock, weeks start on Sunday
    pub fn en_us() -> Self {
        Self {
            identifier: "en_US".to_owned(),
            am_symbol: "AM".to_owned(),
            pm_symbol: "PM".to_owned(),
            hour_cycle: HourCycle::H12,
            date_order: DateOrder::MonthDayYear,
            first_weekday: Weekday::Sun,
            short_weekday_symbols: owned(&EN_WEEKDAYS),
            very_short_weekday_symbols: owned(&EN_WEEKDAYS_VERY_SHORT),
            short_month_symbols: owned(&EN_MONTHS),
        }
    }

    /// English (United Kingdom): day-month-year, 24-hour clock, weeks start on Monday
    pub fn en_gb() -> Self {
        Self {
            identifier: "en_GB".to_owned(),
            am_symbol: "am".to_owned(),
            pm_symbol: "pm".to_owned(),
            hour_cycle: HourCycle::H23,
            date_order: DateOrder::DayMonthYear,
            first_weekday: Weekday::Mon,
            ..Self::en_us()
        }
    }

    /// German (Germany): day-month-year, 24-hour clock, weeks start on Monday
    pub fn de_de() -> Self {
        Self {
            identifier: "de_DE".to_owned(),
            am_symbol: "AM".to_owned(),
            pm_symbol: "PM".to_owned(),
            hour_cycle: HourCycle::H23,
            date_order: DateOrder::DayMonthYear,
            first_weekday: Weekday::Mon,
            short_weekday_symbols: owned(&["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."]),
            very_short_weekday_symbols: owned(&["S", "M", "D", "M", "D", "F", "S"]),
            short_month_symbols: owned(&[
                "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.",
                "Nov.", "Dez.",
            ]),
        }
    }

    /// Looks up a built-in locale by identifier (`en_US`, `en-GB`, `de_DE.UTF-8`, ...)
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        let base = identifier.split('.').next().unwrap_or(identifier).replace('-', "_");
        match base.as_str() {
            "en_US" | "en" => Some(Self::en_us()),
            "en_GB" => Some(Self::en_gb()),
            "de_DE" | "de" => Some(Self::de_de()),
            _ => None,
        }
    }

    /// The locale of the running process, taken from `LANG`, falling back to `en_US`
    pub fn current() -> Self {
        std::env::var("LANG")
            .ok()
            .and_then(|lang| Self::from_identifier(&lang))
            .unwrap_or_else(Self::en_us)
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The language part of the identifier (`en` for `en_US`)
    pub fn language_code(&self) -> &str {
        self.identifier
            .split(['_', '-'])
            .next()
            .unwrap_or(&self.identifier)
    }

    pub fn am_symbol(&self) -> &str {
        &self.am_symbol
    }

    pub fn pm_symbol(&self) -> &str {
        &self.pm_symbol
    }

    pub const fn hour_cycle(&self) -> HourCycle {
        self.hour_cycle
    }

    pub const fn uses_12_hour_clock(&self) -> bool {
        matches!(self.hour_cycle, HourCycle::H12)
    }

    pub const fn date_order(&self) -> DateOrder {
        self.date_order
    }

    pub const fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    pub fn short_weekday_symbols(&self) -> &[String] {
        &self.short_weekday_symbols
    }

    pub fn very_short_weekday_symbols(&self) -> &[String] {
        &self.very_short_weekday_symbols
    }

    pub fn short_month_symbols(&self) -> &[String] {
        &self.short_month_symbols
    }

    #[must_use]
    pub fn with_am_pm_symbols(mut self, am: impl Into<String>, pm: impl Into<String>) -> Self {
        self.am_symbol = am.into();
        self.pm_symbol = pm.into();
        self
    }

    #[must_use]
    pub const fn with_hour_cycle(mut self, hour_cycle: HourCycle) -> Self {
        self.hour_cycle = hour_cycle;
        self
    }

    #[must_use]
    pub const fn with_date_order(mut self, date_order: DateOrder) -> Self {
        self.date_order = date_order;
        self
    }

    #[must_use]
    pub const fn with_first_weekday(mut self, first_weekday: Weekday) -> Self {
        self.first_weekday = first_weekday;
        self
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_identifier_variants() {
        assert_eq!(Locale::from_identifier("en_US"), Some(Locale::en_us()));
        assert_eq!(Locale::from_identifier("en-GB"), Some(Locale::en_gb()));
        assert_eq!(Locale::from_identifier("de_DE.UTF-8"), Some(Locale::de_de()));
        assert_eq!(Locale::from_identifier("fr_FR"), None);
    }

    #[test]
    fn test_language_code() {
        assert_eq!(Locale::en_gb().language_code(), "en");
        assert_eq!(Locale::de_de().language_code(), "de");
    }

    #[test]
    fn test_presets() {
        let us = Locale::en_us();
        assert!(us.uses_12_hour_clock());
        assert_eq!(us.date_order(), DateOrder::MonthDayYear);
        assert_eq!(us.first_weekday(), Weekday::Sun);

        let gb = Locale::en_gb();
        assert!(!gb.uses_12_hour_clock());
        assert_eq!(gb.date_order(), DateOrder::DayMonthYear);
        assert_eq!(gb.first_weekday(), Weekday::Mon);
        assert_eq!(gb.short_month_symbols()[0], "Jan");
    }

    #[test]
    fn test_with_overrides() {
        let locale = Locale::en_us()
            .with_am_pm_symbols("a.m.", "p.m.")
            .with_hour_cycle(HourCycle::H23)
            .with_date_order(DateOrder::YearMonthDay)
            .with_first_weekday(Weekday::Sat);
        assert_eq!(locale.am_symbol(), "a.m.");
        assert_eq!(locale.pm_symbol(), "p.m.");
        assert_eq!(locale.hour_cycle(), HourCycle::H23);
        assert_eq!(locale.date_order(), DateOrder::YearMonthDay);
        assert_eq!(locale.first_weekday(), Weekday::Sat);
    }

    #[test]
    fn test_locale_serde() {
        let locale = Locale::en_gb();
        let json = serde_json::to_string(&locale).unwrap();
        assert!(json.contains("\"date_order\":\"day_month_year\""));
        let parsed: Locale = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, locale);
    }

    #[test]
    fn test_date_order_display() {
        assert_eq!(DateOrder::MonthDayYear.to_string(), "MM/dd/yyyy");
        assert_eq!(HourCycle::H12.to_string(), "h12");
    }
}
