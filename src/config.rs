use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::consts::{
    COMMIT_DELAY_MS, DRAG_THROTTLE_MS, PAGING_ACCELERATE_AFTER_MS, PAGING_FAST_INTERVAL_MS,
    PAGING_INITIAL_DELAY_MS, PAGING_INTERVAL_MS,
};

/// Error type for picker configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A delay or interval was configured as zero.
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

fn millis(value: u64) -> TimeDelta {
    TimeDelta::milliseconds(i64::try_from(value).unwrap_or(i64::MAX))
}

fn non_zero(name: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::ZeroDuration(name))
    } else {
        Ok(())
    }
}

/// Timing of press-and-hold month paging, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    pub initial_delay_ms: u64,
    pub interval_ms: u64,
    pub accelerate_after_ms: u64,
    pub fast_interval_ms: u64,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: PAGING_INITIAL_DELAY_MS,
            interval_ms: PAGING_INTERVAL_MS,
            accelerate_after_ms: PAGING_ACCELERATE_AFTER_MS,
            fast_interval_ms: PAGING_FAST_INTERVAL_MS,
        }
    }
}

impl PagingConfig {
    pub fn initial_delay(&self) -> TimeDelta {
        millis(self.initial_delay_ms)
    }

    pub fn interval(&self) -> TimeDelta {
        millis(self.interval_ms)
    }

    pub fn accelerate_after(&self) -> TimeDelta {
        millis(self.accelerate_after_ms)
    }

    pub fn fast_interval(&self) -> TimeDelta {
        millis(self.fast_interval_ms)
    }
}

/// Tunable timing for the editor and the calendar popover.
///
/// Missing fields deserialize to their defaults, so a host can override
/// only what it needs:
///
/// ```
/// let config: calendar_picker::PickerConfig =
///     serde_json::from_str(r#"{ "commit_delay_ms": 1500 }"#).unwrap();
/// assert_eq!(config.commit_delay_ms, 1500);
/// assert_eq!(config.drag_throttle_ms, 800);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Pause after a keystroke before a partially typed field is committed
    pub commit_delay_ms: u64,
    /// Minimum spacing between drag selections that change the displayed month
    pub drag_throttle_ms: u64,
    pub paging: PagingConfig,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            commit_delay_ms: COMMIT_DELAY_MS,
            drag_throttle_ms: DRAG_THROTTLE_MS,
            paging: PagingConfig::default(),
        }
    }
}

impl PickerConfig {
    pub fn commit_delay(&self) -> TimeDelta {
        millis(self.commit_delay_ms)
    }

    pub fn drag_throttle(&self) -> TimeDelta {
        millis(self.drag_throttle_ms)
    }

    /// Checks that every delay and interval is positive.
    ///
    /// # Errors
    /// Returns `ConfigError::ZeroDuration` naming the first zero field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_zero("commit_delay_ms", self.commit_delay_ms)?;
        non_zero("paging.initial_delay_ms", self.paging.initial_delay_ms)?;
        non_zero("paging.interval_ms", self.paging.interval_ms)?;
        non_zero("paging.fast_interval_ms", self.paging.fast_interval_ms)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PickerConfig::default();
        assert_eq!(config.commit_delay(), TimeDelta::seconds(1));
        assert_eq!(config.drag_throttle(), TimeDelta::milliseconds(800));
        assert_eq!(config.paging.initial_delay(), TimeDelta::milliseconds(500));
        assert_eq!(config.paging.interval(), TimeDelta::milliseconds(250));
        assert_eq!(config.paging.accelerate_after(), TimeDelta::seconds(4));
        assert_eq!(config.paging.fast_interval(), TimeDelta::milliseconds(75));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PickerConfig =
            serde_json::from_str(r#"{"paging": {"fast_interval_ms": 50}}"#).unwrap();
        assert_eq!(config.commit_delay_ms, COMMIT_DELAY_MS);
        assert_eq!(config.paging.fast_interval_ms, 50);
        assert_eq!(config.paging.interval_ms, PAGING_INTERVAL_MS);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let config = PickerConfig {
            commit_delay_ms: 0,
            ..PickerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroDuration("commit_delay_ms"))
        );
        assert_eq!(
            ConfigError::ZeroDuration("commit_delay_ms").to_string(),
            "commit_delay_ms must be greater than zero"
        );
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = PickerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: PickerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
