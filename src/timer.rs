//! Time source and the timers the picker owns.
//!
//! Nothing here spawns threads or sleeps. The host calls `tick` on the
//! picker from its event loop; timers only compare deadlines against the
//! clock, so a [`ManualClock`] makes every delay deterministic in tests.

use std::cell::Cell;

use chrono::{DateTime, TimeDelta, Utc};

use crate::calendar::Instant;
use crate::config::PagingConfig;

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Utc::now()
    }
}

/// Virtual clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    pub const fn new(start: Instant) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: Instant) {
        self.now.set(now);
    }

    pub fn advance(&self, by: TimeDelta) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, millis: i64) {
        self.advance(TimeDelta::milliseconds(millis));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Identifies one arming of a timer; re-arming yields a new handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

fn deadline_after(now: Instant, delay: TimeDelta) -> Instant {
    now.checked_add_signed(delay)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// A cancelable one-shot timer. At most one deadline is pending at a time.
#[derive(Debug, Default)]
pub struct OneShotTimer {
    pending: Option<(TimerHandle, Instant)>,
    generation: u64,
}

impl OneShotTimer {
    pub const fn new() -> Self {
        Self {
            pending: None,
            generation: 0,
        }
    }

    /// Replaces any pending deadline with `now + delay`
    pub fn arm(&mut self, now: Instant, delay: TimeDelta) -> TimerHandle {
        self.cancel();
        self.generation += 1;
        let handle = TimerHandle(self.generation);
        self.pending = Some((handle, deadline_after(now, delay)));
        tracing::trace!(?handle, "timer armed");
        handle
    }

    /// Returns true if a deadline was pending
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub const fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.pending.map(|(handle, _)| handle)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, deadline)| deadline)
    }

    /// Consumes the deadline if it has passed
    pub fn fire_if_due(&mut self, now: Instant) -> Option<TimerHandle> {
        match self.pending {
            Some((handle, deadline)) if deadline <= now => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }
}

/// Press-and-hold repeat schedule.
///
/// The action runs once on press (by the caller), again after
/// `initial_delay`, then every `interval`; once `accelerate_after` has
/// elapsed since the press it repeats every `fast_interval`.
#[derive(Debug)]
pub struct RepeatTimer {
    initial_delay: TimeDelta,
    interval: TimeDelta,
    accelerate_after: TimeDelta,
    fast_interval: TimeDelta,
    running: Option<RepeatState>,
    generation: u64,
}

#[derive(Debug, Clone, Copy)]
struct RepeatState {
    handle: TimerHandle,
    started_at: Instant,
    next_fire: Instant,
}

impl RepeatTimer {
    pub fn new(config: &PagingConfig) -> Self {
        // a zero interval would never let `due_fires` catch up
        let min_interval = TimeDelta::milliseconds(1);
        Self {
            initial_delay: config.initial_delay(),
            interval: config.interval().max(min_interval),
            accelerate_after: config.accelerate_after(),
            fast_interval: config.fast_interval().max(min_interval),
            running: None,
            generation: 0,
        }
    }

    /// Starts a new hold, replacing any hold in progress
    pub fn start(&mut self, now: Instant) -> TimerHandle {
        self.generation += 1;
        let handle = TimerHandle(self.generation);
        self.running = Some(RepeatState {
            handle,
            started_at: now,
            next_fire: deadline_after(now, self.initial_delay),
        });
        handle
    }

    pub fn stop(&mut self) -> bool {
        self.running.take().is_some()
    }

    pub const fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.running.map(|state| state.handle)
    }

    pub fn next_fire(&self) -> Option<Instant> {
        self.running.map(|state| state.next_fire)
    }

    /// Number of repeats that have come due since the last call
    pub fn due_fires(&mut self, now: Instant) -> usize {
        let Some(state) = self.running.as_mut() else {
            return 0;
        };
        let accelerate_at = deadline_after(state.started_at, self.accelerate_after);
        let mut fired = 0;
        while state.next_fire <= now {
            fired += 1;
            let slow = deadline_after(state.next_fire, self.interval);
            state.next_fire = if slow < accelerate_at {
                slow
            } else {
                deadline_after(state.next_fire.max(accelerate_at), self.fast_interval)
            };
        }
        fired
    }
}

/// Enforces a minimum spacing between accepted events.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    spacing: TimeDelta,
    last: Option<Instant>,
}

impl Throttle {
    pub const fn new(spacing: TimeDelta) -> Self {
        Self {
            spacing,
            last: None,
        }
    }

    /// More than `spacing` has passed since the last recorded event
    pub fn is_ready(&self, now: Instant) -> bool {
        self.last.is_none_or(|last| now - last > self.spacing)
    }

    pub const fn record(&mut self, now: Instant) {
        self.last = Some(now);
    }
}
