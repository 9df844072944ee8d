//! Conversions between "HH:MM" wall-clock strings and integer minute offsets,
//! plus the snapping and clamping helpers used while dragging.
//!
//! These functions sit on the pointer-move hot path, so they stay
//! allocation-light and never panic. Validation belongs at the data-ingestion
//! boundary (`parse_time`), not on every conversion call.

use thiserror::Error;

/// Error produced when a time string fails boundary validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("expected \"HH:MM\", got {0:?}")]
    Malformed(String),
    #[error("hour {0} out of range (0-23)")]
    HourOutOfRange(u32),
    #[error("minute {0} out of range (0-59)")]
    MinuteOutOfRange(u32),
}

/// Strictly parse an "HH:MM" string into minutes since midnight.
///
/// Use this when slot data enters the system; the conversion helpers below
/// assume their input already passed through here (or is otherwise trusted).
pub fn parse_time(time: &str) -> Result<i32, TimeParseError> {
    let Some((hours_str, minutes_str)) = time.split_once(':') else {
        return Err(TimeParseError::Malformed(time.to_owned()));
    };

    let hours: u32 = hours_str
        .parse()
        .map_err(|_| TimeParseError::Malformed(time.to_owned()))?;
    let minutes: u32 = minutes_str
        .parse()
        .map_err(|_| TimeParseError::Malformed(time.to_owned()))?;

    if hours > 23 {
        return Err(TimeParseError::HourOutOfRange(hours));
    }
    if minutes > 59 {
        return Err(TimeParseError::MinuteOutOfRange(minutes));
    }

    Ok((hours * 60 + minutes) as i32)
}

/// Convert a trusted "HH:MM" string into minutes since midnight.
///
/// Malformed input is a host bug; it maps to 0 rather than panicking so a bad
/// record cannot take the UI thread down mid-drag.
pub fn time_to_minutes(time: &str) -> i32 {
    parse_time(time).unwrap_or(0)
}

/// Convert minutes since midnight back to a zero-padded "HH:MM" string.
///
/// Minutes are taken modulo 60 and hours via integer division; callers clamp
/// into `[0, 24*60)` beforehand. Round-trips with [`time_to_minutes`] for any
/// valid zero-padded input.
pub fn minutes_to_time(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Round a minute value to the nearest multiple of `interval`.
///
/// Half-way values round up, matching the drag feel of snapping forward once
/// the pointer crosses the midpoint. Already-snapped values pass through
/// unchanged. A non-positive interval disables snapping.
pub fn snap_to_interval(minutes: i32, interval: i32) -> i32 {
    if interval <= 0 {
        return minutes;
    }

    let floored = minutes.div_euclid(interval) * interval;
    let remainder = minutes.rem_euclid(interval);
    if remainder * 2 >= interval {
        floored + interval
    } else {
        floored
    }
}

/// Clamp a minute value into `[min, max]` inclusive.
pub fn clamp_minutes(minutes: i32, min: i32, max: i32) -> i32 {
    if min > max {
        return min;
    }
    minutes.clamp(min, max)
}
