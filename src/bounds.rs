use serde::{Deserialize, Serialize};

use crate::calendar::Instant;

/// Optional minimum and maximum dates a picker may select.
///
/// A pair where the minimum is not strictly before the maximum is treated as
/// if neither bound were set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateBounds {
    minimum: Option<Instant>,
    maximum: Option<Instant>,
}

impl DateBounds {
    pub const fn new(minimum: Option<Instant>, maximum: Option<Instant>) -> Self {
        Self { minimum, maximum }
    }

    pub const fn unbounded() -> Self {
        Self::new(None, None)
    }

    /// The minimum as configured, usable or not
    pub const fn minimum(&self) -> Option<Instant> {
        self.minimum
    }

    /// The maximum as configured, usable or not
    pub const fn maximum(&self) -> Option<Instant> {
        self.maximum
    }

    pub const fn set_minimum(&mut self, minimum: Option<Instant>) {
        self.minimum = minimum;
    }

    pub const fn set_maximum(&mut self, maximum: Option<Instant>) {
        self.maximum = maximum;
    }

    /// Both bounds are set but do not describe a non-empty range
    pub fn is_degenerate(&self) -> bool {
        matches!((self.minimum, self.maximum), (Some(min), Some(max)) if min >= max)
    }

    /// The minimum, unless the pair is degenerate
    pub fn usable_minimum(&self) -> Option<Instant> {
        if self.is_degenerate() { None } else { self.minimum }
    }

    /// The maximum, unless the pair is degenerate
    pub fn usable_maximum(&self) -> Option<Instant> {
        if self.is_degenerate() { None } else { self.maximum }
    }

    /// Moves `date` into the usable range; dates already inside are returned unchanged
    pub fn clamp(&self, date: Instant) -> Instant {
        match (self.usable_minimum(), self.usable_maximum()) {
            (Some(min), Some(max)) => date.clamp(min, max),
            (Some(min), None) => date.max(min),
            (None, Some(max)) => date.min(max),
            (None, None) => date,
        }
    }

    /// Whether `date` lies inside the usable range (inclusive)
    pub fn permits(&self, date: Instant) -> bool {
        let above_min = self.usable_minimum().is_none_or(|min| date >= min);
        let below_max = self.usable_maximum().is_none_or(|max| date <= max);
        above_min && below_max
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};

    use super::*;

    fn day(d: u32) -> Instant {
        Utc.with_ymd_and_hms(2024, 1, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_clamp_with_usable_pair() {
        let bounds = DateBounds::new(Some(day(5)), Some(day(10)));
        assert_eq!(bounds.clamp(day(1)), day(5));
        assert_eq!(bounds.clamp(day(7)), day(7));
        assert_eq!(bounds.clamp(day(20)), day(10));
    }

    #[test]
    fn test_clamp_with_single_bound() {
        let floor = DateBounds::new(Some(day(5)), None);
        assert_eq!(floor.clamp(day(1)), day(5));
        assert_eq!(floor.clamp(day(20)), day(20));

        let ceiling = DateBounds::new(None, Some(day(10)));
        assert_eq!(ceiling.clamp(day(1)), day(1));
        assert_eq!(ceiling.clamp(day(20)), day(10));
    }

    #[test]
    fn test_degenerate_pair_constrains_nothing() {
        let reversed = DateBounds::new(Some(day(10)), Some(day(5)));
        assert!(reversed.is_degenerate());
        assert_eq!(reversed.usable_minimum(), None);
        assert_eq!(reversed.usable_maximum(), None);
        assert_eq!(reversed.clamp(day(1)), day(1));
        assert_eq!(reversed.clamp(day(31)), day(31));
        assert!(reversed.permits(day(31)));

        let equal = DateBounds::new(Some(day(5)), Some(day(5)));
        assert!(equal.is_degenerate());
        assert_eq!(equal.clamp(day(20)), day(20));
    }

    #[test]
    fn test_clamp_output_always_in_range() {
        let min = day(3);
        let max = day(28);
        let bounds = DateBounds::new(Some(min), Some(max));
        let start = Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap();
        for hours in (0..24 * 70).step_by(7) {
            let date = start + TimeDelta::hours(hours);
            let clamped = bounds.clamp(date);
            assert!(min <= clamped && clamped <= max, "{date} clamped to {clamped}");
            assert_eq!(bounds.clamp(clamped), clamped, "clamping is idempotent");
        }
    }

    #[test]
    fn test_permits_is_inclusive() {
        let bounds = DateBounds::new(Some(day(5)), Some(day(10)));
        assert!(bounds.permits(day(5)));
        assert!(bounds.permits(day(10)));
        assert!(!bounds.permits(day(4)));
        assert!(!bounds.permits(day(11)));
        assert!(DateBounds::unbounded().permits(day(1)));
    }

    #[test]
    fn test_bounds_serde() {
        let bounds = DateBounds::new(Some(day(5)), None);
        let json = serde_json::to_string(&bounds).unwrap();
        let parsed: DateBounds = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, bounds);
    }
}
