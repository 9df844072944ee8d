// Timeline configuration
// Caller-supplied time window, snap granularity, and label column width

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default snap granularity in minutes.
pub const DEFAULT_SNAP_INTERVAL_MINUTES: u32 = 15;
/// Default pixel width of the lane-label column.
pub const DEFAULT_COLUMN_WIDTH: f32 = 112.0;

/// Validation errors for a [`TimelineConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("time window is empty: start_hour {start} must be below end_hour {end}")]
    EmptyWindow { start: u32, end: u32 },
    #[error("end_hour {0} exceeds 24")]
    EndHourOutOfRange(u32),
    #[error("snap interval must be a positive number of minutes")]
    ZeroSnapInterval,
    #[error("column width must be positive, got {0}")]
    NonPositiveColumnWidth(f32),
}

/// The visible time window and grid granularity of a board.
///
/// Immutable for the lifetime of a scheduler; all layout math derives from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub start_hour: u32,
    pub end_hour: u32,
    #[serde(default = "default_snap_interval")]
    pub snap_interval_minutes: u32,
    #[serde(default = "default_column_width")]
    pub column_width: f32,
}

fn default_snap_interval() -> u32 {
    DEFAULT_SNAP_INTERVAL_MINUTES
}

fn default_column_width() -> f32 {
    DEFAULT_COLUMN_WIDTH
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self::new(8, 18)
    }
}

impl TimelineConfig {
    /// Create a config with the given window and default snapping/column width.
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
            snap_interval_minutes: DEFAULT_SNAP_INTERVAL_MINUTES,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }

    pub fn with_snap_interval(mut self, minutes: u32) -> Self {
        self.snap_interval_minutes = minutes;
        self
    }

    pub fn with_column_width(mut self, pixels: f32) -> Self {
        self.column_width = pixels;
        self
    }

    /// Check the invariants the rest of the board relies on:
    /// `0 <= start_hour < end_hour <= 24`, positive snap interval and column width.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.end_hour > 24 {
            return Err(ConfigError::EndHourOutOfRange(self.end_hour));
        }
        if self.start_hour >= self.end_hour {
            return Err(ConfigError::EmptyWindow {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        if self.snap_interval_minutes == 0 {
            return Err(ConfigError::ZeroSnapInterval);
        }
        if self.column_width <= 0.0 {
            return Err(ConfigError::NonPositiveColumnWidth(self.column_width));
        }
        Ok(())
    }

    /// First visible minute of the window.
    pub fn start_minutes(&self) -> i32 {
        (self.start_hour * 60) as i32
    }

    /// First minute past the window.
    pub fn end_minutes(&self) -> i32 {
        (self.end_hour * 60) as i32
    }

    pub fn total_minutes(&self) -> i32 {
        self.end_minutes() - self.start_minutes()
    }

    /// Latest minute a dragged slot may start at: the top of the last
    /// displayable hour.
    pub fn last_start_minutes(&self) -> i32 {
        ((self.end_hour - 1) * 60) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TimelineConfig::new(7, 18);
        assert_eq!(config.snap_interval_minutes, 15);
        assert_eq!(config.column_width, DEFAULT_COLUMN_WIDTH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_window() {
        assert_eq!(
            TimelineConfig::new(9, 9).validate(),
            Err(ConfigError::EmptyWindow { start: 9, end: 9 })
        );
        assert!(matches!(
            TimelineConfig::new(18, 7).validate(),
            Err(ConfigError::EmptyWindow { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_end() {
        assert_eq!(
            TimelineConfig::new(7, 25).validate(),
            Err(ConfigError::EndHourOutOfRange(25))
        );
    }

    #[test]
    fn test_validate_rejects_zero_snap() {
        let config = TimelineConfig::new(7, 18).with_snap_interval(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroSnapInterval));
    }

    #[test]
    fn test_validate_rejects_bad_column_width() {
        let config = TimelineConfig::new(7, 18).with_column_width(0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveColumnWidth(_))
        ));
    }

    #[test]
    fn test_minute_accessors() {
        let config = TimelineConfig::new(7, 18);
        assert_eq!(config.start_minutes(), 420);
        assert_eq!(config.end_minutes(), 1080);
        assert_eq!(config.total_minutes(), 660);
        assert_eq!(config.last_start_minutes(), 1020);
    }

    #[test]
    fn test_serde_defaults_apply() {
        let config: TimelineConfig = serde_json::from_str(r#"{"start_hour":7,"end_hour":18}"#)
            .expect("config should deserialize");
        assert_eq!(config.snap_interval_minutes, DEFAULT_SNAP_INTERVAL_MINUTES);
        assert_eq!(config.column_width, DEFAULT_COLUMN_WIDTH);
    }
}
