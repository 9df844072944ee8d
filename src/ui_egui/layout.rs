//! Layout math for the time axis.
//!
//! Derives the pixels-per-minute scalar and total timeline width from the
//! configured window, the measured viewport, and the zoom factor. This is a
//! pure derivation recomputed every frame, not stored state that can desync.

use crate::models::config::TimelineConfig;

/// Pixels-per-minute used before the viewport has been measured, so the first
/// frame never divides by zero.
pub const FALLBACK_PIXELS_PER_MINUTE: f32 = 10.0;

/// Minimum rendered slot width so short items stay interactive.
pub const MIN_SLOT_WIDTH: f32 = 60.0;

/// Pixel geometry of the board for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineLayout {
    /// First visible minute of the window.
    pub start_minutes: i32,
    pub total_minutes: i32,
    pub pixels_per_minute: f32,
    /// Width of the grid area (excludes the label column).
    pub timeline_width: f32,
    pub column_width: f32,
}

impl TimelineLayout {
    /// Derive the layout from the config, the measured grid viewport width,
    /// and the zoom percentage (`percentage_in_view`: 100 fits the window to
    /// the viewport, smaller values zoom in by expanding total width).
    pub fn compute(config: &TimelineConfig, viewport_width: f32, percentage_in_view: f32) -> Self {
        let total_minutes = config.total_minutes();

        let base_pixels_per_minute = if viewport_width > 0.0 && total_minutes > 0 {
            viewport_width / total_minutes as f32
        } else {
            FALLBACK_PIXELS_PER_MINUTE
        };
        let zoom = if percentage_in_view > 0.0 {
            100.0 / percentage_in_view
        } else {
            1.0
        };
        let pixels_per_minute = base_pixels_per_minute * zoom;

        Self {
            start_minutes: config.start_minutes(),
            total_minutes,
            pixels_per_minute,
            timeline_width: total_minutes as f32 * pixels_per_minute,
            column_width: config.column_width,
        }
    }

    /// X offset within the grid area for a minute of the day.
    pub fn minutes_to_x(&self, minutes: i32) -> f32 {
        (minutes - self.start_minutes) as f32 * self.pixels_per_minute
    }

    /// Inverse-map an x offset within the grid area to a minute of the day.
    pub fn x_to_minutes(&self, x: f32) -> i32 {
        (x / self.pixels_per_minute).floor() as i32 + self.start_minutes
    }

    /// Convert a pixel displacement to a minute delta, rounded to nearest.
    pub fn delta_to_minutes(&self, delta_x: f32) -> i32 {
        (delta_x / self.pixels_per_minute).round() as i32
    }

    /// `(left, width)` of a slot rect within the grid area, with the minimum
    /// visual width floor applied.
    pub fn slot_span(&self, start_minutes: i32, duration_minutes: u32) -> (f32, f32) {
        let left = self.minutes_to_x(start_minutes);
        let width = (duration_minutes as f32 * self.pixels_per_minute).max(MIN_SLOT_WIDTH);
        (left, width)
    }

    /// Whether a minute of the day falls inside the visible window.
    pub fn contains_minutes(&self, minutes: i32) -> bool {
        minutes >= self.start_minutes && minutes < self.start_minutes + self.total_minutes
    }
}
