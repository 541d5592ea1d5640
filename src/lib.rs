//! Headless state for a calendar date picker.
//!
//! Two views share one date: a month-grid [`CalendarPopover`] and a segmented
//! text entry driven by [`PickerCoordinator`]. The host toolkit renders what
//! these types expose and feeds them decoded input events (keystrokes, taps,
//! drags, button presses) plus periodic [`PickerCoordinator::tick`] calls for
//! the commit and paging timers.
//!
//! ```
//! use std::rc::Rc;
//!
//! use calendar_picker::{Calendar, DatePart, DatePicker, Locale, ManualClock, PickerCoordinator};
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 20, 14, 30, 0).unwrap();
//! let clock = Rc::new(ManualClock::new(now));
//! let mut picker = PickerCoordinator::new(Calendar::gregorian(Locale::en_us()), clock);
//!
//! picker.select_part(DatePart::Day);
//! picker.insert_text("28");
//! assert_eq!(picker.date(), Utc.with_ymd_and_hms(2024, 1, 28, 14, 30, 0).unwrap());
//! assert_eq!(picker.field_text(DatePart::Day), "28");
//! ```

mod bounds;
mod calendar;
mod config;
mod consts;
mod coordinator;
mod date_part;
mod day;
mod editor;
mod gregorian;
mod grid;
mod locale;
mod picker;
mod popover;
mod prelude;
mod timer;

pub use bounds::DateBounds;
pub use calendar::{Calendar, CalendarError, CalendarSystem, DateComponents, Instant};
pub use config::{ConfigError, PagingConfig, PickerConfig};
pub use consts::*;
pub use coordinator::PickerCoordinator;
pub use date_part::{DatePart, meridiem_symbol};
pub use day::Day;
pub use editor::{DatePartEditor, EditContext, EditOutcome};
pub use gregorian::{Gregorian, days_in_month, is_leap_year};
pub use grid::{CurrentMonth, MonthGrid};
pub use locale::{DateOrder, HourCycle, Locale};
pub use picker::{DatePicker, PickerMode};
pub use popover::{CalendarPopover, CellStyle, PageDirection, PopoverEvent};
pub use timer::{Clock, ManualClock, OneShotTimer, RepeatTimer, SystemClock, Throttle, TimerHandle};
