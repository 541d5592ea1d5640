//! The month-grid calendar shown next to the date fields.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::bounds::DateBounds;
use crate::calendar::{Calendar, Instant};
use crate::config::PickerConfig;
use crate::day::Day;
use crate::grid::{CurrentMonth, MonthGrid};
use crate::locale::Locale;
use crate::picker::{DatePicker, PickerMode};
use crate::prelude::*;
use crate::timer::{Clock, RepeatTimer, Throttle};

/// Notifications the popover raises for its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverEvent {
    DateChanged(Instant),
    WillDismiss,
    DidDismiss,
}

/// How a grid cell should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CellStyle {
    #[display(fmt = "selected_today")]
    SelectedToday,
    #[display(fmt = "selected")]
    Selected,
    #[display(fmt = "today")]
    Today,
    /// Outside the usable bounds
    #[display(fmt = "disabled")]
    Disabled,
    #[display(fmt = "in_month")]
    InMonth,
    /// Belongs to the previous or next month
    #[display(fmt = "spillover")]
    Spillover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum PageDirection {
    #[display(fmt = "back")]
    Back,
    #[display(fmt = "forward")]
    Forward,
}

pub struct CalendarPopover {
    calendar: Calendar,
    date: Instant,
    bounds: DateBounds,
    grid: MonthGrid,
    clock: Rc<dyn Clock>,
    paging: RepeatTimer,
    paging_direction: Option<PageDirection>,
    drag_throttle: Throttle,
    dragging: bool,
    events: Vec<PopoverEvent>,
    delegate_attached: bool,
    interactive: bool,
    presented: bool,
    revision: u64,
}

impl CalendarPopover {
    /// Seeds the popover with its owner's date as is. Bounds apply from the
    /// next [`DatePicker::set_date`], so the grid never disagrees with the owner.
    pub fn new(
        calendar: Calendar,
        date: Instant,
        bounds: DateBounds,
        config: &PickerConfig,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let grid = MonthGrid::build(&calendar, CurrentMonth::containing(&calendar, date));
        Self {
            calendar,
            date,
            bounds,
            grid,
            clock,
            paging: RepeatTimer::new(&config.paging),
            paging_direction: None,
            drag_throttle: Throttle::new(config.drag_throttle()),
            dragging: false,
            events: Vec::new(),
            delegate_attached: true,
            interactive: true,
            presented: true,
            revision: 0,
        }
    }

    pub const fn current_month(&self) -> CurrentMonth {
        self.grid.current()
    }

    pub const fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub fn days(&self) -> &[Day] {
        self.grid.days()
    }

    pub const fn bounds(&self) -> &DateBounds {
        &self.bounds
    }

    /// Incremented whenever what the popover displays changes
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub const fn is_presented(&self) -> bool {
        self.presented
    }

    pub const fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// While inert the popover stays visible but ignores taps, drags and paging
    pub fn set_interactive(&mut self, interactive: bool) {
        if !interactive {
            self.end_paging();
            self.end_drag();
        }
        if self.interactive != interactive {
            self.interactive = interactive;
            self.touch();
        }
    }

    pub fn title(&self) -> String {
        let current = self.current_month();
        self.calendar.month_title(current.year(), current.month())
    }

    pub fn weekday_header(&self) -> Vec<String> {
        self.calendar.weekday_header()
    }

    /// The grid cell of the selected date
    pub fn selected_day(&self) -> Day {
        let c = self.calendar.decompose(self.date);
        Day::new(
            self.calendar.clone(),
            c.year,
            i32::try_from(c.month).unwrap_or(i32::MAX),
            i32::try_from(c.day).unwrap_or(i32::MAX),
        )
    }

    /// Day number shown in a cell
    pub fn cell_label(&self, index: usize) -> Option<String> {
        let (_, _, day) = self.grid.day(index)?.resolved()?;
        Some(day.to_string())
    }

    pub fn is_selectable(&self, index: usize) -> bool {
        self.grid.is_selectable(index, &self.bounds, self.date)
    }

    pub fn cell_style(&self, index: usize) -> Option<CellStyle> {
        let day = self.grid.day(index)?;
        let is_selected = *day == self.selected_day();
        let is_today = day.is_today(self.clock.now());
        let style = match (is_selected, is_today) {
            (true, true) => CellStyle::SelectedToday,
            (true, false) => CellStyle::Selected,
            (false, true) => CellStyle::Today,
            (false, false) if !self.is_selectable(index) => CellStyle::Disabled,
            (false, false) if self.grid.is_in_current_month(index) => CellStyle::InMonth,
            (false, false) => CellStyle::Spillover,
        };
        Some(style)
    }

    /// Selects the day in a cell, keeping the time of day. Cells outside the
    /// usable bounds are ignored; spillover cells page to their month.
    pub fn select_cell(&mut self, index: usize) -> bool {
        if !self.interactive {
            return false;
        }
        let Some(date) = self.grid.day(index).and_then(|day| day.at_time_of(self.date)) else {
            return false;
        };
        if !self.bounds.permits(date) {
            trace!(index, %date, "cell outside bounds");
            return false;
        }
        self.set_date(date);
        true
    }

    pub fn page_forward(&mut self) {
        self.page(PageDirection::Forward);
    }

    pub fn page_back(&mut self) {
        self.page(PageDirection::Back);
    }

    pub fn page(&mut self, direction: PageDirection) {
        if !self.interactive {
            return;
        }
        let current = self.current_month();
        let page = match direction {
            PageDirection::Forward => current.next(&self.calendar),
            PageDirection::Back => current.previous(&self.calendar),
        };
        self.show_month(page);
    }

    /// Returns to the page of the selected date
    pub fn show_selected_month(&mut self) {
        self.show_month(CurrentMonth::containing(&self.calendar, self.date));
    }

    /// Press on a paging button: pages once now and keeps paging until released
    pub fn begin_paging(&mut self, direction: PageDirection) {
        if !self.interactive {
            return;
        }
        self.page(direction);
        self.paging.start(self.clock.now());
        self.paging_direction = Some(direction);
    }

    pub fn end_paging(&mut self) {
        self.paging.stop();
        self.paging_direction = None;
    }

    pub const fn is_paging(&self) -> bool {
        self.paging.is_running()
    }

    pub fn begin_drag(&mut self) {
        self.dragging = self.interactive;
    }

    /// Drag over a cell. Cells of the displayed month are selected right
    /// away; cells of another month only once the drag throttle allows it.
    pub fn drag_to(&mut self, index: usize) -> bool {
        if !self.dragging {
            return false;
        }
        let now = self.clock.now();
        if !self.grid.is_in_current_month(index) && !self.drag_throttle.is_ready(now) {
            trace!(index, "drag into another month throttled");
            return false;
        }
        self.drag_throttle.record(now);
        self.select_cell(index)
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Runs due paging repeats; returns how many pages were turned
    pub fn tick(&mut self) -> usize {
        let Some(direction) = self.paging_direction else {
            return 0;
        };
        let fires = self.paging.due_fires(self.clock.now());
        for _ in 0..fires {
            self.page(direction);
        }
        fires
    }

    pub fn dismiss(&mut self) {
        if !self.presented {
            return;
        }
        self.end_paging();
        self.end_drag();
        self.push_event(PopoverEvent::WillDismiss);
        self.presented = false;
        debug!(date = %self.date, "calendar dismissed");
        self.push_event(PopoverEvent::DidDismiss);
    }

    pub fn drain_events(&mut self) -> Vec<PopoverEvent> {
        std::mem::take(&mut self.events)
    }

    pub const fn is_delegate_attached(&self) -> bool {
        self.delegate_attached
    }

    /// Runs `f` with event delivery suspended, so the owner can push its own
    /// state into the popover without hearing it echoed back.
    pub fn with_detached_delegate<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let attached = std::mem::replace(&mut self.delegate_attached, false);
        let result = f(self);
        self.delegate_attached = attached;
        result
    }

    fn show_month(&mut self, page: CurrentMonth) {
        if page != self.current_month() {
            self.grid = MonthGrid::build(&self.calendar, page);
            self.touch();
        }
    }

    fn rebuild(&mut self) {
        self.grid = MonthGrid::build(&self.calendar, self.current_month());
        self.touch();
    }

    const fn touch(&mut self) {
        self.revision += 1;
    }

    fn push_event(&mut self, event: PopoverEvent) {
        if self.delegate_attached {
            self.events.push(event);
        }
    }
}

impl DatePicker for CalendarPopover {
    fn date(&self) -> Instant {
        self.date
    }

    fn set_date(&mut self, date: Instant) {
        let previous = CurrentMonth::containing(&self.calendar, self.date);
        self.date = self.bounds.clamp(date);
        let selected = CurrentMonth::containing(&self.calendar, self.date);
        if selected == previous {
            self.touch();
        } else {
            self.show_month(selected);
        }
        self.push_event(PopoverEvent::DateChanged(self.date));
    }

    fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    fn set_calendar(&mut self, calendar: Option<Calendar>) {
        self.calendar = calendar.unwrap_or_else(Calendar::current);
        let page = CurrentMonth::containing(&self.calendar, self.date);
        self.grid = MonthGrid::build(&self.calendar, page);
        self.touch();
    }

    fn set_locale(&mut self, locale: Option<Locale>) {
        self.calendar = self
            .calendar
            .with_locale(locale.unwrap_or_else(Locale::current));
        self.rebuild();
    }

    fn minimum_date(&self) -> Option<Instant> {
        self.bounds.minimum()
    }

    fn set_minimum_date(&mut self, date: Option<Instant>) {
        self.bounds.set_minimum(date);
        self.touch();
    }

    fn maximum_date(&self) -> Option<Instant> {
        self.bounds.maximum()
    }

    fn set_maximum_date(&mut self, date: Option<Instant>) {
        self.bounds.set_maximum(date);
        self.touch();
    }

    /// Always [`PickerMode::Date`]
    fn date_picker_mode(&self) -> PickerMode {
        PickerMode::Date
    }

    fn set_date_picker_mode(&mut self, _mode: PickerMode) {}
}

impl std::fmt::Debug for CalendarPopover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarPopover")
            .field("date", &self.date)
            .field("current", &self.current_month())
            .field("bounds", &self.bounds)
            .field("presented", &self.presented)
            .field("interactive", &self.interactive)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}
