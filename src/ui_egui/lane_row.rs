//! One droppable lane: a label cell plus a grid strip hosting its slots.
//!
//! The grid strip paints hour and snap-interval gridlines, highlights itself
//! with a validity-colored ring while it is the hovered drop target, and shows
//! the drop ghost for the candidate position.

use egui::{Pos2, Rect, Sense, Stroke, Vec2};

use crate::models::config::TimelineConfig;
use crate::models::lane::Lane;
use crate::models::slot::Slot;
use crate::ui_egui::drag::DragState;
use crate::ui_egui::layout::TimelineLayout;
use crate::ui_egui::markers;
use crate::ui_egui::palette::BoardPalette;
use crate::ui_egui::preview::PreviewChannel;
use crate::ui_egui::slot_box::{self, SlotEvent};
use crate::utils::time::time_to_minutes;

/// Height of every lane row.
pub const LANE_HEIGHT: f32 = 54.0;

pub struct LaneRowResponse {
    /// The lane's grid strip in screen coordinates; doubles as its drop
    /// hit-region.
    pub grid_rect: Rect,
}

/// Fixed-width label cell for the sticky left column.
pub fn label_cell(ui: &mut egui::Ui, lane: &Lane, layout: &TimelineLayout, palette: &BoardPalette) {
    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(layout.column_width, LANE_HEIGHT),
        Sense::hover(),
    );

    ui.painter().rect_filled(rect, 0.0, palette.label_bg);
    ui.painter().line_segment(
        [rect.right_top(), rect.right_bottom()],
        Stroke::new(1.0, palette.border),
    );
    ui.painter().line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(1.0, palette.border),
    );

    ui.painter().text(
        Pos2::new(rect.left() + 10.0, rect.center().y),
        egui::Align2::LEFT_CENTER,
        &lane.label,
        egui::FontId::proportional(13.0),
        palette.text,
    );
}

/// Render the lane's grid strip and its slots; report slot interactions.
#[allow(clippy::too_many_arguments)]
pub fn show(
    ui: &mut egui::Ui,
    lane: &Lane,
    lane_slots: &[&Slot],
    config: &TimelineConfig,
    layout: &TimelineLayout,
    palette: &BoardPalette,
    striped: bool,
    drag: &DragState,
    preview: &mut PreviewChannel,
    events: &mut Vec<SlotEvent>,
) -> LaneRowResponse {
    let (grid_rect, _) = ui.allocate_exact_size(
        Vec2::new(layout.timeline_width, LANE_HEIGHT),
        Sense::hover(),
    );

    let bg = if striped {
        palette.lane_alt_bg
    } else {
        palette.lane_bg
    };
    ui.painter().rect_filled(grid_rect, 0.0, bg);

    draw_grid_lines(ui, grid_rect, config, layout, palette);

    // Hover feedback is driven purely by the session: ring and fill when this
    // lane is the drop target, colored by the last validation result.
    let session = drag.session();
    let hovered = session
        .map(|session| session.hovered_lane_id.as_deref() == Some(lane.id.as_str()))
        .unwrap_or(false);
    if let Some(session) = session.filter(|_| hovered) {
        ui.painter()
            .rect_filled(grid_rect, 0.0, palette.hover_fill(session.is_valid));
        ui.painter().rect_stroke(
            grid_rect.shrink(1.0),
            2.0,
            Stroke::new(2.0, palette.ring(session.is_valid)),
        );

        // Ghost of the would-be resting rect, suppressed on invalid targets.
        if session.is_valid {
            if let Some(candidate) = &session.candidate_start_time {
                markers::draw_drop_ghost(
                    ui,
                    grid_rect,
                    layout,
                    time_to_minutes(candidate),
                    session.duration_minutes,
                    palette,
                );
            }
        }
    }

    for slot in lane_slots {
        slot_box::show(ui, grid_rect, slot, layout, palette, drag, preview, events);
    }

    ui.painter().line_segment(
        [grid_rect.left_bottom(), grid_rect.right_bottom()],
        Stroke::new(1.0, palette.border),
    );

    LaneRowResponse { grid_rect }
}

fn draw_grid_lines(
    ui: &egui::Ui,
    grid_rect: Rect,
    config: &TimelineConfig,
    layout: &TimelineLayout,
    palette: &BoardPalette,
) {
    let interval = config.snap_interval_minutes as i32;

    // Sub-interval lines first so hour lines paint over them.
    let mut minutes = interval;
    while minutes < layout.total_minutes {
        if minutes % 60 != 0 {
            let x = grid_rect.left() + minutes as f32 * layout.pixels_per_minute;
            ui.painter().line_segment(
                [
                    Pos2::new(x, grid_rect.top()),
                    Pos2::new(x, grid_rect.bottom()),
                ],
                Stroke::new(1.0, palette.sub_line),
            );
        }
        minutes += interval;
    }

    let mut minutes = 0;
    while minutes <= layout.total_minutes {
        let x = grid_rect.left() + minutes as f32 * layout.pixels_per_minute;
        ui.painter().line_segment(
            [
                Pos2::new(x, grid_rect.top()),
                Pos2::new(x, grid_rect.bottom()),
            ],
            Stroke::new(1.0, palette.hour_line),
        );
        minutes += 60;
    }
}
