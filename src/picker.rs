use serde::{Deserialize, Serialize};

use crate::calendar::{Calendar, Instant};
use crate::date_part::DatePart;
use crate::locale::{DateOrder, Locale};
use crate::prelude::*;

/// What a picker lets the user choose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum PickerMode {
    #[display(fmt = "date")]
    Date,
    #[display(fmt = "time")]
    Time,
    #[default]
    #[display(fmt = "date_and_time")]
    DateAndTime,
    /// Accepted for interface compatibility only; pickers ignore it.
    #[display(fmt = "count_down_timer")]
    CountDownTimer,
}

impl PickerMode {
    pub const fn shows_date(self) -> bool {
        !matches!(self, Self::Time)
    }

    pub const fn shows_time(self) -> bool {
        !matches!(self, Self::Date)
    }

    /// The editable fields in visible order for this mode and locale
    pub fn visible_parts(self, locale: &Locale) -> Vec<DatePart> {
        let mut parts = Vec::with_capacity(6);
        if self.shows_date() {
            parts.extend_from_slice(match locale.date_order() {
                DateOrder::MonthDayYear => &[DatePart::Month, DatePart::Day, DatePart::Year],
                DateOrder::DayMonthYear => &[DatePart::Day, DatePart::Month, DatePart::Year],
                DateOrder::YearMonthDay => &[DatePart::Year, DatePart::Month, DatePart::Day],
            });
        }
        if self.shows_time() {
            if locale.uses_12_hour_clock() {
                parts.extend_from_slice(&[DatePart::Hour12, DatePart::Minute, DatePart::AmPm]);
            } else {
                parts.extend_from_slice(&[DatePart::Hour24, DatePart::Minute]);
            }
        }
        parts
    }
}

/// The property surface shared by the calendar popover and the segmented
/// editor, matching a native platform date picker.
pub trait DatePicker {
    fn date(&self) -> Instant;

    /// Stores `date` clamped into the usable bounds
    fn set_date(&mut self, date: Instant);

    fn calendar(&self) -> &Calendar;

    /// `None` resets to [`Calendar::current`]
    fn set_calendar(&mut self, calendar: Option<Calendar>);

    fn locale(&self) -> &Locale {
        self.calendar().locale()
    }

    /// Re-scopes the calendar to `locale`; `None` resets to [`Locale::current`]
    fn set_locale(&mut self, locale: Option<Locale>);

    fn minimum_date(&self) -> Option<Instant>;

    fn set_minimum_date(&mut self, date: Option<Instant>);

    fn maximum_date(&self) -> Option<Instant>;

    fn set_maximum_date(&mut self, date: Option<Instant>);

    fn date_picker_mode(&self) -> PickerMode;

    /// Switching to [`PickerMode::CountDownTimer`] is ignored
    fn set_date_picker_mode(&mut self, mode: PickerMode);
}
