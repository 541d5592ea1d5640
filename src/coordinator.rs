use std::rc::Rc;

use tracing::debug;

use crate::bounds::DateBounds;
use crate::calendar::{Calendar, Instant};
use crate::config::PickerConfig;
use crate::consts::TAB;
use crate::date_part::DatePart;
use crate::editor::{DatePartEditor, EditContext, EditOutcome};
use crate::locale::Locale;
use crate::picker::{DatePicker, PickerMode};
use crate::popover::{CalendarPopover, PopoverEvent};
use crate::timer::{Clock, SystemClock};

/// The segmented date/time control.
///
/// Owns the authoritative date and its bounds. Keystrokes go through the
/// [`DatePartEditor`], taps through the [`CalendarPopover`]; both end up in
/// [`DatePicker::set_date`], which clamps and then pushes the result back out.
pub struct PickerCoordinator {
    date: Instant,
    calendar: Calendar,
    bounds: DateBounds,
    mode: PickerMode,
    editor: DatePartEditor,
    popover: Option<CalendarPopover>,
    config: PickerConfig,
    clock: Rc<dyn Clock>,
    revision: u64,
}

impl PickerCoordinator {
    /// A picker showing the clock's current time
    pub fn new(calendar: Calendar, clock: Rc<dyn Clock>) -> Self {
        let config = PickerConfig::default();
        let date = clock.now();
        let mut coordinator = Self {
            date,
            calendar,
            bounds: DateBounds::unbounded(),
            mode: PickerMode::default(),
            editor: DatePartEditor::new(config.commit_delay()),
            popover: None,
            config,
            clock,
            revision: 0,
        };
        coordinator.sync_editor();
        coordinator
    }

    /// Current calendar and locale on the wall clock
    pub fn system() -> Self {
        Self::new(Calendar::current(), Rc::new(SystemClock))
    }

    #[must_use]
    pub fn with_date(mut self, date: Instant) -> Self {
        self.set_date(date);
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: DateBounds) -> Self {
        self.set_minimum_date(bounds.minimum());
        self.set_maximum_date(bounds.maximum());
        self.set_date(self.date);
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: PickerMode) -> Self {
        self.set_date_picker_mode(mode);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: PickerConfig) -> Self {
        self.editor = DatePartEditor::new(config.commit_delay());
        self.config = config;
        self.sync_editor();
        self
    }

    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub const fn bounds(&self) -> &DateBounds {
        &self.bounds
    }

    /// Incremented whenever the labels or the selection change
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn visible_parts(&self) -> Vec<DatePart> {
        self.mode.visible_parts(self.calendar.locale())
    }

    pub const fn selected_part(&self) -> Option<DatePart> {
        self.editor.selected()
    }

    pub const fn is_pm(&self) -> bool {
        self.editor.is_pm()
    }

    pub fn pending_digits(&self) -> &str {
        self.editor.pending_digits()
    }

    /// Selects the first field unless one is already selected
    pub fn focus(&mut self) {
        if self.editor.selected().is_some() {
            return;
        }
        if let Some(&first) = self.visible_parts().first() {
            self.select_part(first);
        }
    }

    pub fn resign_focus(&mut self) {
        self.editor.select(None);
        if let Some(popover) = self.popover.as_mut() {
            popover.dismiss();
        }
        self.process_popover_events();
        self.touch();
    }

    /// Selects a visible field. Date fields bring up the calendar; time
    /// fields leave it on screen but inert.
    pub fn select_part(&mut self, part: DatePart) -> bool {
        if !self.visible_parts().contains(&part) {
            debug!(%part, mode = %self.mode, "field not visible");
            return false;
        }
        self.editor.select(Some(part));
        if part.is_date_part() {
            self.present_calendar();
        } else if let Some(popover) = self.popover.as_mut() {
            popover.set_interactive(false);
        }
        self.touch();
        true
    }

    /// Feeds typed text one character at a time. A tab moves to the next field.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let mut changed = false;
        for c in text.chars() {
            if c == TAB {
                changed |= self.advance();
                continue;
            }
            let now = self.clock.now();
            let ctx = EditContext {
                calendar: &self.calendar,
                date: self.date,
            };
            let outcome = self.editor.insert_char(c, &ctx, now);
            changed |= self.apply(outcome);
        }
        changed
    }

    pub fn delete_backward(&mut self) -> bool {
        let outcome = self.editor.delete_backward(self.clock.now());
        self.apply(outcome)
    }

    /// Commits the selected field and moves to the next one, wrapping
    pub fn advance(&mut self) -> bool {
        if self.editor.selected().is_none() {
            return false;
        }
        let ctx = EditContext {
            calendar: &self.calendar,
            date: self.date,
        };
        let outcome = self.editor.commit_pending(&ctx);
        self.apply(outcome);
        match self.editor.next_part(&self.visible_parts()) {
            Some(next) => self.select_part(next),
            None => false,
        }
    }

    /// Fires due timers: the commit debounce and popover paging.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        let ctx = EditContext {
            calendar: &self.calendar,
            date: self.date,
        };
        let committed = self
            .editor
            .poll(&ctx, now)
            .is_some_and(|outcome| self.apply(outcome));
        let paged = self
            .with_calendar_popover(CalendarPopover::tick)
            .is_some_and(|pages| pages > 0);
        committed || paged
    }

    /// Text shown in a field: the pending digits while it is being edited,
    /// otherwise the formatted authoritative value.
    pub fn field_text(&self, part: DatePart) -> String {
        if self.editor.selected() == Some(part) && self.editor.has_text() {
            return self.editor.pending_digits().to_owned();
        }
        part.format(&self.calendar, &self.calendar.decompose(self.date))
    }

    pub fn labels(&self) -> Vec<(DatePart, String)> {
        self.visible_parts()
            .into_iter()
            .map(|part| (part, self.field_text(part)))
            .collect()
    }

    pub const fn calendar_popover(&self) -> Option<&CalendarPopover> {
        self.popover.as_ref()
    }

    /// Runs `f` against the presented popover, then handles what it raised
    pub fn with_calendar_popover<R>(
        &mut self,
        f: impl FnOnce(&mut CalendarPopover) -> R,
    ) -> Option<R> {
        let result = self.popover.as_mut().map(f);
        self.process_popover_events();
        result
    }

    pub fn tap_day(&mut self, index: usize) -> bool {
        self.with_calendar_popover(|popover| popover.select_cell(index))
            .unwrap_or(false)
    }

    pub fn dismiss_calendar(&mut self) {
        self.with_calendar_popover(CalendarPopover::dismiss);
    }

    pub fn process_popover_events(&mut self) {
        let events = self
            .popover
            .as_mut()
            .map(CalendarPopover::drain_events)
            .unwrap_or_default();
        for event in events {
            match event {
                PopoverEvent::DateChanged(date) => self.set_date(date),
                PopoverEvent::WillDismiss => {
                    self.editor.select(None);
                    self.touch();
                }
                PopoverEvent::DidDismiss => {
                    self.popover = None;
                    self.touch();
                }
            }
        }
    }

    fn present_calendar(&mut self) {
        match self.popover.as_mut() {
            Some(popover) => popover.set_interactive(true),
            None => {
                debug!(date = %self.date, "calendar presented");
                self.popover = Some(CalendarPopover::new(
                    self.calendar.clone(),
                    self.date,
                    self.bounds,
                    &self.config,
                    Rc::clone(&self.clock),
                ));
            }
        }
    }

    fn apply(&mut self, outcome: EditOutcome) -> bool {
        match outcome {
            EditOutcome::Rejected => false,
            EditOutcome::Accepted | EditOutcome::Reverted => {
                self.touch();
                true
            }
            EditOutcome::Committed(date) => {
                self.set_date(date);
                true
            }
        }
    }

    fn sync_editor(&mut self) {
        self.editor.clear_pending();
        let hour = self.calendar.decompose(self.date).hour;
        self.editor.sync_meridiem(hour);
    }

    /// Drops the selection if the field is no longer visible
    fn sync_selection(&mut self) {
        let hidden = self
            .editor
            .selected()
            .is_some_and(|part| !self.visible_parts().contains(&part));
        if hidden {
            self.editor.select(None);
        }
    }

    fn propagate(&mut self, f: impl FnOnce(&mut CalendarPopover)) {
        if let Some(popover) = self.popover.as_mut() {
            popover.with_detached_delegate(f);
        }
    }

    const fn touch(&mut self) {
        self.revision += 1;
    }
}

impl DatePicker for PickerCoordinator {
    fn date(&self) -> Instant {
        self.date
    }

    fn set_date(&mut self, date: Instant) {
        let clamped = self.bounds.clamp(date);
        if clamped != date {
            debug!(requested = %date, %clamped, "date clamped");
        }
        self.date = clamped;
        self.sync_editor();
        self.touch();
        debug!(date = %clamped, "date changed");
        self.propagate(|popover| popover.set_date(clamped));
    }

    fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    fn set_calendar(&mut self, calendar: Option<Calendar>) {
        self.calendar = calendar.unwrap_or_else(Calendar::current);
        self.sync_editor();
        self.sync_selection();
        self.touch();
        let calendar = self.calendar.clone();
        self.propagate(|popover| popover.set_calendar(Some(calendar)));
    }

    fn set_locale(&mut self, locale: Option<Locale>) {
        let calendar = self
            .calendar
            .with_locale(locale.unwrap_or_else(Locale::current));
        self.set_calendar(Some(calendar));
    }

    fn minimum_date(&self) -> Option<Instant> {
        self.bounds.minimum()
    }

    fn set_minimum_date(&mut self, date: Option<Instant>) {
        self.bounds.set_minimum(date);
        self.touch();
        self.propagate(|popover| popover.set_minimum_date(date));
    }

    fn maximum_date(&self) -> Option<Instant> {
        self.bounds.maximum()
    }

    fn set_maximum_date(&mut self, date: Option<Instant>) {
        self.bounds.set_maximum(date);
        self.touch();
        self.propagate(|popover| popover.set_maximum_date(date));
    }

    fn date_picker_mode(&self) -> PickerMode {
        self.mode
    }

    fn set_date_picker_mode(&mut self, mode: PickerMode) {
        if mode == PickerMode::CountDownTimer {
            debug!(current = %self.mode, "count-down mode ignored");
            return;
        }
        self.mode = mode;
        self.editor.clear_pending();
        self.sync_selection();
        self.touch();
        if !mode.shows_date() {
            self.dismiss_calendar();
        }
    }
}

impl std::fmt::Debug for PickerCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickerCoordinator")
            .field("date", &self.date)
            .field("calendar", &self.calendar)
            .field("bounds", &self.bounds)
            .field("mode", &self.mode)
            .field("editor", &self.editor)
            .field("popover", &self.popover)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}
