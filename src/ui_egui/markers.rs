//! Pure presentational overlays computed from the session and layout: the
//! current-time line, the idle pointer-time readout, the drop ghost, and the
//! drop-region band.

use chrono::{Local, Timelike};
use egui::{FontId, Pos2, Rect, Stroke, Vec2};

use crate::ui_egui::layout::TimelineLayout;
use crate::ui_egui::palette::BoardPalette;
use crate::utils::time::minutes_to_time;

/// Draw the vertical "now" line across the grid.
///
/// Hidden entirely while the current time falls outside the window. Repaint is
/// rescheduled once a minute; no other state is kept.
pub fn draw_current_time_marker(
    ui: &egui::Ui,
    grid_rect: Rect,
    layout: &TimelineLayout,
    palette: &BoardPalette,
) {
    ui.ctx()
        .request_repaint_after(std::time::Duration::from_secs(60));

    let now = Local::now();
    let now_minutes = (now.hour() * 60 + now.minute()) as i32;
    if !layout.contains_minutes(now_minutes) {
        return;
    }

    let x = grid_rect.left() + layout.minutes_to_x(now_minutes);
    let painter = ui.painter();
    painter.line_segment(
        [
            Pos2::new(x, grid_rect.top()),
            Pos2::new(x, grid_rect.bottom()),
        ],
        Stroke::new(2.0, palette.now_marker),
    );
    painter.circle_filled(Pos2::new(x, grid_rect.top() + 4.0), 3.0, palette.now_marker);
}

/// While no drag is active, show the time-of-day under the cursor: a vertical
/// line plus a label derived by inverse-mapping the pointer x.
pub fn draw_pointer_time_marker(
    ui: &egui::Ui,
    grid_rect: Rect,
    pointer_x: f32,
    layout: &TimelineLayout,
    palette: &BoardPalette,
) {
    let minutes = layout.x_to_minutes(pointer_x - grid_rect.left());
    if !layout.contains_minutes(minutes) {
        return;
    }

    let painter = ui.painter();
    painter.line_segment(
        [
            Pos2::new(pointer_x, grid_rect.top()),
            Pos2::new(pointer_x, grid_rect.bottom()),
        ],
        Stroke::new(1.0, palette.pointer_marker),
    );
    painter.text(
        Pos2::new(pointer_x + 4.0, grid_rect.top() + 2.0),
        egui::Align2::LEFT_TOP,
        minutes_to_time(minutes),
        FontId::proportional(11.0),
        palette.pointer_marker,
    );
}

/// Ghost rectangle at the candidate resting rect inside one lane, derived
/// exactly like a slot's resting rect but from the candidate start time.
pub fn draw_drop_ghost(
    ui: &egui::Ui,
    lane_grid_rect: Rect,
    layout: &TimelineLayout,
    candidate_minutes: i32,
    duration_minutes: u32,
    palette: &BoardPalette,
) {
    let (left, width) = layout.slot_span(candidate_minutes, duration_minutes);
    let rect = Rect::from_min_size(
        Pos2::new(lane_grid_rect.left() + left, lane_grid_rect.top() + 2.0),
        Vec2::new(width, lane_grid_rect.height() - 4.0),
    );
    ui.painter().rect_filled(rect, 4.0, palette.ghost_fill);
}

/// Translucent band across the whole grid at the candidate span, with the
/// tentative "start - end" times labelled at the top edge.
pub fn draw_drop_region(
    ui: &egui::Ui,
    grid_rect: Rect,
    layout: &TimelineLayout,
    candidate_minutes: i32,
    duration_minutes: u32,
    palette: &BoardPalette,
) {
    let left = grid_rect.left() + layout.minutes_to_x(candidate_minutes);
    let right = grid_rect.left()
        + layout.minutes_to_x(candidate_minutes + duration_minutes as i32);
    let band = Rect::from_min_max(
        Pos2::new(left, grid_rect.top()),
        Pos2::new(right, grid_rect.bottom()),
    );

    let painter = ui.painter();
    painter.rect_filled(band, 0.0, palette.region_accent.gamma_multiply(0.07));
    painter.line_segment(
        [band.left_top(), band.left_bottom()],
        Stroke::new(2.0, palette.region_accent),
    );
    painter.line_segment(
        [band.right_top(), band.right_bottom()],
        Stroke::new(2.0, palette.region_accent),
    );

    let label = format!(
        "{} - {}",
        minutes_to_time(candidate_minutes),
        minutes_to_time(candidate_minutes + duration_minutes as i32)
    );
    painter.text(
        Pos2::new(band.center().x, grid_rect.top() + 4.0),
        egui::Align2::CENTER_TOP,
        label,
        FontId::proportional(12.0),
        palette.region_accent,
    );
}
