//! Segmented text entry for date and time fields.
//!
//! The editor accumulates keystrokes for the selected [`DatePart`],
//! validates each one against the calendar, and turns a finished field into
//! a candidate date. It never stores the authoritative date itself: every
//! method takes an [`EditContext`] snapshot and reports an [`EditOutcome`]
//! that the owner applies through its clamping setter.

use chrono::TimeDelta;
use tracing::{debug, trace};

use crate::calendar::{Calendar, Instant};
use crate::consts::{HOURS_PER_MERIDIEM, NOON};
use crate::date_part::DatePart;
use crate::timer::{OneShotTimer, TimerHandle};

/// What the editor needs to know about the picker for one input event.
#[derive(Debug, Clone, Copy)]
pub struct EditContext<'a> {
    pub calendar: &'a Calendar,
    /// The authoritative date
    pub date: Instant,
}

/// Result of feeding one input event to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The input had no effect.
    Rejected,
    /// Editor state changed (digits, selection) but the date did not.
    Accepted,
    /// A field was finished; the date should become this value.
    Committed(Instant),
    /// A field was finished but named no real date; relabel from the
    /// authoritative value.
    Reverted,
}

#[derive(Debug)]
pub struct DatePartEditor {
    selected: Option<DatePart>,
    pending: String,
    is_pm: bool,
    commit_timer: OneShotTimer,
    commit_delay: TimeDelta,
}

impl DatePartEditor {
    pub fn new(commit_delay: TimeDelta) -> Self {
        Self {
            selected: None,
            pending: String::new(),
            is_pm: false,
            commit_timer: OneShotTimer::new(),
            commit_delay,
        }
    }

    pub const fn selected(&self) -> Option<DatePart> {
        self.selected
    }

    pub fn pending_digits(&self) -> &str {
        &self.pending
    }

    pub fn has_text(&self) -> bool {
        !self.pending.is_empty()
    }

    pub const fn is_pm(&self) -> bool {
        self.is_pm
    }

    pub fn commit_deadline(&self) -> Option<Instant> {
        self.commit_timer.deadline()
    }

    pub fn commit_timer(&self) -> Option<TimerHandle> {
        self.commit_timer.handle()
    }

    /// Tracks the meridiem of the authoritative hour
    pub const fn sync_meridiem(&mut self, hour: u32) {
        self.is_pm = hour >= NOON;
    }

    /// Changes the selected field, discarding any pending input
    pub fn select(&mut self, part: Option<DatePart>) {
        self.clear_pending();
        self.selected = part;
    }

    /// Drops pending digits and the commit timer
    pub fn clear_pending(&mut self) {
        self.pending.clear();
        self.commit_timer.cancel();
    }

    /// The field after the selected one, wrapping to the first
    pub fn next_part(&self, fields: &[DatePart]) -> Option<DatePart> {
        let selected = self.selected?;
        let next = fields
            .iter()
            .position(|&part| part == selected)
            .map_or(0, |index| index + 1);
        fields.get(next).or_else(|| fields.first()).copied()
    }

    /// Feeds one typed character.
    pub fn insert_char(&mut self, c: char, ctx: &EditContext<'_>, now: Instant) -> EditOutcome {
        let Some(part) = self.selected else {
            trace!(?c, "no field selected");
            return EditOutcome::Rejected;
        };
        if part == DatePart::AmPm {
            return self.insert_meridiem(c, ctx);
        }

        let mut candidate = self.pending.clone();
        candidate.push(c);
        let components = ctx.calendar.decompose(ctx.date);
        if !part.admits_prefix(&candidate, ctx.calendar, &components) {
            trace!(%part, %candidate, "rejected keystroke");
            return EditOutcome::Rejected;
        }

        self.pending = candidate;
        if self.pending.len() >= part.max_length(ctx.calendar) {
            self.commit_pending(ctx)
        } else {
            self.commit_timer.arm(now, self.commit_delay);
            EditOutcome::Accepted
        }
    }

    /// Removes the last pending digit
    pub fn delete_backward(&mut self, now: Instant) -> EditOutcome {
        if self.pending.pop().is_none() {
            return EditOutcome::Rejected;
        }
        if self.pending.is_empty() {
            self.commit_timer.cancel();
        } else {
            self.commit_timer.arm(now, self.commit_delay);
        }
        EditOutcome::Accepted
    }

    /// Commits the pending digits if the commit timer has expired
    pub fn poll(&mut self, ctx: &EditContext<'_>, now: Instant) -> Option<EditOutcome> {
        self.commit_timer.fire_if_due(now)?;
        trace!("commit timer fired");
        Some(self.commit_pending(ctx))
    }

    /// Finishes the selected field with whatever digits are pending
    pub fn commit_pending(&mut self, ctx: &EditContext<'_>) -> EditOutcome {
        self.commit_timer.cancel();
        let digits = std::mem::take(&mut self.pending);
        let Some(part) = self.selected else {
            return EditOutcome::Rejected;
        };
        if digits.is_empty() {
            return EditOutcome::Accepted;
        }
        let Ok(value) = digits.parse::<i64>() else {
            return EditOutcome::Reverted;
        };

        let mut components = ctx.calendar.decompose(ctx.date);
        let is_legal = part
            .legal_range(ctx.calendar, &components)
            .is_some_and(|range| range.contains(&value));
        if !is_legal {
            debug!(%part, value, "field reverted, value out of range");
            return EditOutcome::Reverted;
        }
        let composed = part
            .fold(value, &mut components, self.is_pm)
            .and_then(|()| ctx.calendar.compose(&components));
        match composed {
            Ok(date) => {
                debug!(%part, value, %date, "field committed");
                EditOutcome::Committed(date)
            }
            Err(error) => {
                debug!(%part, value, %error, "field reverted");
                EditOutcome::Reverted
            }
        }
    }

    fn insert_meridiem(&mut self, c: char, ctx: &EditContext<'_>) -> EditOutcome {
        if !c.is_alphabetic() {
            trace!(?c, "am/pm takes letters only");
            return EditOutcome::Rejected;
        }
        let typed = c.to_lowercase().to_string();
        let matches = |symbol: &str| symbol.to_lowercase().starts_with(&typed);
        let to_pm = if matches(ctx.calendar.am_symbol()) {
            false
        } else if matches(ctx.calendar.pm_symbol()) {
            true
        } else {
            trace!(?c, "matches neither am nor pm");
            return EditOutcome::Rejected;
        };

        self.clear_pending();
        let mut components = ctx.calendar.decompose(ctx.date);
        if to_pm && !self.is_pm {
            components.hour += HOURS_PER_MERIDIEM;
        } else if !to_pm && self.is_pm {
            components.hour = components.hour.saturating_sub(HOURS_PER_MERIDIEM);
        }
        match ctx.calendar.compose(&components) {
            Ok(date) => {
                debug!(to_pm, %date, "meridiem committed");
                EditOutcome::Committed(date)
            }
            Err(error) => {
                debug!(to_pm, %error, "meridiem reverted");
                EditOutcome::Reverted
            }
        }
    }
}
