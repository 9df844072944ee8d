//! Draggable slot rectangles.
//!
//! A slot at rest renders at the rect derived from its start time and
//! duration. While it is the active drag target it renders twice: the
//! in-place element becomes a faded trail translated by the raw (unsnapped)
//! pointer delta, and its resolved visual is relayed through the preview
//! channel so the pointer-following overlay shows the same content without a
//! second interactive copy existing anywhere.

use egui::{Color32, CursorIcon, FontId, Pos2, Rect, Sense, Vec2};

use crate::models::slot::Slot;
use crate::ui_egui::drag::DragState;
use crate::ui_egui::layout::TimelineLayout;
use crate::ui_egui::palette::BoardPalette;
use crate::ui_egui::preview::{PreviewChannel, PreviewFrame};

/// Vertical inset of a slot inside its lane.
pub const SLOT_INSET: f32 = 3.0;
/// Opacity of the in-place trail while its slot is being dragged.
const TRAIL_ALPHA: f32 = 0.4;

/// Pointer interactions a slot reported this frame, applied by the board
/// after all lanes have rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotEvent {
    /// Released without exceeding the drag activation threshold; fires
    /// `on_select`, never a drag.
    Clicked { slot_id: String },
    DragStarted { slot_id: String, grab_offset: Vec2 },
    Dragged { slot_id: String, delta: Vec2 },
    DragStopped { slot_id: String },
}

/// A slot's content resolved for painting, shared verbatim by the resting
/// rect, the trail, and the drag overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotVisual {
    pub label: String,
    pub time_range: String,
    pub fill: Color32,
}

impl SlotVisual {
    pub fn resolve(slot: &Slot, palette: &BoardPalette) -> Self {
        let label = slot
            .payload_str("label")
            .unwrap_or(slot.id.as_str())
            .to_owned();
        let fill = slot
            .payload_str("color")
            .and_then(parse_color)
            .unwrap_or(palette.slot_fill);
        Self {
            label,
            time_range: format!("{} - {}", slot.start_time, slot.end_time()),
            fill,
        }
    }
}

/// Parse a hex color string to Color32.
///
/// # Arguments
/// * `hex` - A hex color string, optionally prefixed with '#' (e.g., "#FF5500")
pub fn parse_color(hex: &str) -> Option<Color32> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color32::from_rgb(r, g, b))
}

/// Paint a slot visual into `rect`: fill, darker accent bar, time range on
/// top, label underneath with truncation.
pub fn draw_slot_visual(
    ui: &egui::Ui,
    rect: Rect,
    visual: &SlotVisual,
    palette: &BoardPalette,
    alpha: f32,
) {
    let fill = visual.fill.gamma_multiply(alpha);
    let text_color = palette.slot_text.gamma_multiply(alpha);

    ui.painter().rect_filled(rect, 3.0, fill);

    let bar_rect = Rect::from_min_size(rect.min, Vec2::new(4.0, rect.height()));
    ui.painter()
        .rect_filled(bar_rect, 3.0, visual.fill.linear_multiply(0.7).gamma_multiply(alpha));

    let text_left = bar_rect.right() + 5.0;
    let available_width = (rect.right() - text_left - 4.0).max(0.0);

    ui.painter().text(
        Pos2::new(text_left, rect.top() + 3.0),
        egui::Align2::LEFT_TOP,
        &visual.time_range,
        FontId::proportional(10.0),
        text_color,
    );

    let layout_job = egui::text::LayoutJob::simple_singleline(
        visual.label.clone(),
        FontId::proportional(13.0),
        text_color,
    );
    let galley = ui.fonts(|fonts| fonts.layout_job(layout_job));
    let clipped = ui
        .painter()
        .with_clip_rect(Rect::from_min_max(
            Pos2::new(text_left, rect.top()),
            Pos2::new(text_left + available_width, rect.bottom()),
        ));
    clipped.galley(
        Pos2::new(text_left, rect.top() + 16.0),
        galley,
        text_color,
    );
}

/// Render one slot inside its lane's grid rect and report its interactions.
#[allow(clippy::too_many_arguments)]
pub fn show(
    ui: &mut egui::Ui,
    grid_rect: Rect,
    slot: &Slot,
    layout: &TimelineLayout,
    palette: &BoardPalette,
    drag: &DragState,
    preview: &mut PreviewChannel,
    events: &mut Vec<SlotEvent>,
) {
    let (left, width) = layout.slot_span(slot.start_minutes(), slot.duration_minutes);
    let rect = Rect::from_min_size(
        Pos2::new(grid_rect.left() + left, grid_rect.top() + SLOT_INSET),
        Vec2::new(width, grid_rect.height() - 2.0 * SLOT_INSET),
    );

    let response = ui.interact(
        rect,
        ui.id().with(("slot", slot.id.as_str())),
        Sense::click_and_drag(),
    );

    let visual = SlotVisual::resolve(slot, palette);

    if drag.is_dragging_slot(&slot.id) {
        // Ghost trail: the raw pointer displacement, deliberately unsnapped.
        // Snapped feedback is the drop ghost's job.
        let raw_delta = drag
            .session()
            .map(|session| session.pointer_delta)
            .unwrap_or(Vec2::ZERO);
        draw_slot_visual(ui, rect.translate(raw_delta), &visual, palette, TRAIL_ALPHA);

        let active_id = drag.session().map(|session| session.slot_id.clone());
        preview.publish(
            active_id.as_deref(),
            PreviewFrame {
                producer_id: slot.id.clone(),
                size: rect.size(),
                visual: visual.clone(),
            },
        );
    } else {
        draw_slot_visual(ui, rect, &visual, palette, 1.0);
        response
            .clone()
            .on_hover_text(format!("{}\n{}", visual.label, visual.time_range));
    }

    if response.hovered() {
        ui.output_mut(|out| out.cursor_icon = CursorIcon::Grab);
    }
    if response.dragged() {
        ui.output_mut(|out| out.cursor_icon = CursorIcon::Grabbing);
    }

    // egui only reports a drag once the pointer moves past its activation
    // threshold; a press-and-release below it comes back as a click instead,
    // which keeps select and drag mutually exclusive.
    if response.drag_started() {
        let grab_offset = response
            .interact_pointer_pos()
            .map(|pos| pos - rect.min)
            .unwrap_or(Vec2::ZERO);
        events.push(SlotEvent::DragStarted {
            slot_id: slot.id.clone(),
            grab_offset,
        });
    }
    if response.dragged() {
        events.push(SlotEvent::Dragged {
            slot_id: slot.id.clone(),
            delta: response.drag_delta(),
        });
    }
    if response.drag_stopped() {
        events.push(SlotEvent::DragStopped {
            slot_id: slot.id.clone(),
        });
    }
    if response.clicked() {
        events.push(SlotEvent::Clicked {
            slot_id: slot.id.clone(),
        });
    }
}
