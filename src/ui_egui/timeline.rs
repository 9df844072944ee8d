//! The timeline board widget.
//!
//! Owns the drag session, the preview channel, and the in-flight commits;
//! renders the header, the lanes, and the overlays; and routes every slot
//! interaction through the host callbacks. The host owns the widget value
//! itself, so all session state is explicit rather than stashed in ambient
//! globals.

use egui::{Rect, Sense, Stroke, Vec2};

use crate::models::config::{ConfigError, TimelineConfig};
use crate::models::lane::Lane;
use crate::models::slot::Slot;
use crate::ui_egui::drag::{DragSnapshot, DragState, DropResolution};
use crate::ui_egui::host::{CommitResolution, PendingCommits, SchedulerHost};
use crate::ui_egui::lane_row;
use crate::ui_egui::layout::TimelineLayout;
use crate::ui_egui::markers;
use crate::ui_egui::palette::BoardPalette;
use crate::ui_egui::preview::PreviewChannel;
use crate::ui_egui::slot_box::{self, SlotEvent};
use crate::utils::time::time_to_minutes;

/// Height of the hour-label header row.
const HEADER_HEIGHT: f32 = 28.0;

/// A time-axis board of lanes and draggable slots.
///
/// Construct once with a validated config, keep it in host state, and call
/// [`show`](Self::show) every frame with the current lanes and slots. The
/// board never mutates slot data: moves are proposed to the host through
/// `commit_position` and become visible when the host re-supplies slots.
pub struct TimelineScheduler {
    config: TimelineConfig,
    percentage_in_view: f32,
    drag: DragState,
    preview: PreviewChannel,
    commits: PendingCommits,
}

impl TimelineScheduler {
    pub fn new(config: TimelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            percentage_in_view: 100.0,
            drag: DragState::Idle,
            preview: PreviewChannel::default(),
            commits: PendingCommits::default(),
        })
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Percentage of the window kept in view; 100 fits the viewport, smaller
    /// values zoom in.
    pub fn zoom(&self) -> f32 {
        self.percentage_in_view
    }

    pub fn set_zoom(&mut self, percentage_in_view: f32) {
        self.percentage_in_view = percentage_in_view.clamp(10.0, 400.0);
    }

    /// Snapshot of the active drag for host-side rendering decisions.
    pub fn drag_snapshot(&self) -> DragSnapshot {
        self.drag.snapshot()
    }

    pub fn pending_commit_count(&self) -> usize {
        self.commits.len()
    }

    /// Render the board and process one frame of interactions.
    ///
    /// Returns the commits that resolved this frame, so the host can refresh
    /// its data or surface the outcome.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        lanes: &[Lane],
        slots: &[Slot],
        host: &mut dyn SchedulerHost,
    ) -> Vec<CommitResolution> {
        let resolutions = self.commits.poll();

        let palette = BoardPalette::from_ui(ui);
        let viewport_width = (ui.available_width() - self.config.column_width).max(0.0);
        let layout = TimelineLayout::compute(&self.config, viewport_width, self.percentage_in_view);

        let mut events: Vec<SlotEvent> = Vec::new();
        let mut lane_rects: Vec<(String, Rect)> = Vec::new();

        egui::Frame::none()
            .stroke(Stroke::new(1.0, palette.border))
            .show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    ui.spacing_mut().item_spacing = Vec2::ZERO;

                    // Sticky label column, outside the scroll area.
                    ui.vertical(|ui| {
                        ui.spacing_mut().item_spacing = Vec2::ZERO;
                        header_label_cell(ui, &layout, &palette);
                        for lane in lanes {
                            lane_row::label_cell(ui, lane, &layout, &palette);
                        }
                    });

                    egui::ScrollArea::horizontal()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            let mut grid_rect = Rect::NOTHING;
                            ui.vertical(|ui| {
                                ui.spacing_mut().item_spacing = Vec2::ZERO;
                                header_hours_row(ui, &self.config, &layout, &palette);
                                for (index, lane) in lanes.iter().enumerate() {
                                    let lane_slots: Vec<&Slot> = slots
                                        .iter()
                                        .filter(|slot| slot.lane_id == lane.id)
                                        .collect();
                                    let row = lane_row::show(
                                        ui,
                                        lane,
                                        &lane_slots,
                                        &self.config,
                                        &layout,
                                        &palette,
                                        index % 2 == 1,
                                        &self.drag,
                                        &mut self.preview,
                                        &mut events,
                                    );
                                    grid_rect = grid_rect.union(row.grid_rect);
                                    lane_rects.push((lane.id.clone(), row.grid_rect));
                                }
                            });

                            draw_grid_overlays(ui, grid_rect, &self.drag, &layout, &palette);
                        });
                });
            });

        let ctx = ui.ctx().clone();
        self.apply_events(&ctx, events, &lane_rects, &layout, slots, host);

        if self.drag.is_active() && ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.drag.cancel();
            self.preview.clear();
        }

        self.draw_drag_overlay(&ctx, &palette);

        resolutions
    }

    fn apply_events(
        &mut self,
        ctx: &egui::Context,
        events: Vec<SlotEvent>,
        lane_rects: &[(String, Rect)],
        layout: &TimelineLayout,
        slots: &[Slot],
        host: &mut dyn SchedulerHost,
    ) {
        for event in events {
            match event {
                SlotEvent::Clicked { slot_id } => {
                    log::debug!("slot selected: {}", slot_id);
                    host.on_select(&slot_id);
                }
                SlotEvent::DragStarted {
                    slot_id,
                    grab_offset,
                } => {
                    if let Some(slot) = slots.iter().find(|slot| slot.id == slot_id) {
                        self.drag.begin(slot, grab_offset);
                    }
                }
                SlotEvent::Dragged { slot_id, delta } => {
                    if !self.drag.is_dragging_slot(&slot_id) {
                        continue;
                    }
                    let pointer = ctx
                        .pointer_interact_pos()
                        .or_else(|| ctx.pointer_hover_pos());
                    let hovered_lane = pointer.and_then(|pos| {
                        lane_rects
                            .iter()
                            .find(|(_, rect)| rect.contains(pos))
                            .map(|(lane_id, _)| lane_id.as_str())
                    });
                    self.drag.update_pointer(
                        delta,
                        hovered_lane,
                        &self.config,
                        layout,
                        |slot, candidate, lane| host.validate_drop(slot, candidate, lane),
                    );
                    ctx.request_repaint();
                }
                SlotEvent::DragStopped { .. } => self.finish_drag(host),
            }
        }
    }

    /// Consume the session on drop: commit through the host when the drop is
    /// valid and actually moves the slot, otherwise discard. The preview
    /// channel is emptied on every path.
    fn finish_drag(&mut self, host: &mut dyn SchedulerHost) {
        match self.drag.resolve_drop() {
            DropResolution::Commit {
                slot_id,
                start_time,
                lane_id,
            } => {
                let ticket = host.commit_position(&slot_id, &start_time, &lane_id);
                self.commits.track(slot_id, start_time, lane_id, ticket);
            }
            DropResolution::Discard => {}
        }
        self.preview.clear();
    }

    fn draw_drag_overlay(&mut self, ctx: &egui::Context, palette: &BoardPalette) {
        let Some(session) = self.drag.session() else {
            self.preview.clear();
            return;
        };
        let grab_offset = session.grab_offset;

        let Some(frame) = self.preview.take() else {
            return;
        };
        let Some(pointer) = ctx
            .pointer_interact_pos()
            .or_else(|| ctx.pointer_hover_pos())
        else {
            return;
        };

        let anchor = pointer - grab_offset;
        egui::Area::new(egui::Id::new("timeboard_drag_overlay"))
            .order(egui::Order::Tooltip)
            .interactable(false)
            .fixed_pos(anchor)
            .show(ctx, |ui| {
                let (rect, _) = ui.allocate_exact_size(frame.size, Sense::hover());
                slot_box::draw_slot_visual(ui, rect, &frame.visual, palette, 0.95);
            });
    }
}

fn header_label_cell(ui: &mut egui::Ui, layout: &TimelineLayout, palette: &BoardPalette) {
    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(layout.column_width, HEADER_HEIGHT),
        Sense::hover(),
    );
    ui.painter().rect_filled(rect, 0.0, palette.label_bg);
    ui.painter().line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(1.0, palette.border),
    );
    ui.painter().line_segment(
        [rect.right_top(), rect.right_bottom()],
        Stroke::new(1.0, palette.border),
    );
    ui.painter().text(
        egui::Pos2::new(rect.left() + 10.0, rect.center().y),
        egui::Align2::LEFT_CENTER,
        "Lane",
        egui::FontId::proportional(12.0),
        palette.muted_text,
    );
}

fn draw_grid_overlays(
    ui: &egui::Ui,
    grid_rect: Rect,
    drag: &DragState,
    layout: &TimelineLayout,
    palette: &BoardPalette,
) {
    if !grid_rect.is_positive() {
        return;
    }

    markers::draw_current_time_marker(ui, grid_rect, layout, palette);

    if let Some(session) = drag.session() {
        if session.is_valid {
            if let Some(candidate) = &session.candidate_start_time {
                markers::draw_drop_region(
                    ui,
                    grid_rect,
                    layout,
                    time_to_minutes(candidate),
                    session.duration_minutes,
                    palette,
                );
            }
        }
    } else if let Some(pointer) = ui.input(|i| i.pointer.hover_pos()) {
        if grid_rect.contains(pointer) {
            markers::draw_pointer_time_marker(ui, grid_rect, pointer.x, layout, palette);
        }
    }
}

fn header_hours_row(
    ui: &mut egui::Ui,
    config: &TimelineConfig,
    layout: &TimelineLayout,
    palette: &BoardPalette,
) {
    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(layout.timeline_width, HEADER_HEIGHT),
        Sense::hover(),
    );
    ui.painter().rect_filled(rect, 0.0, palette.label_bg);
    ui.painter().line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(1.0, palette.border),
    );

    for hour in config.start_hour..config.end_hour {
        let x = rect.left() + layout.minutes_to_x((hour * 60) as i32);
        ui.painter().line_segment(
            [
                egui::Pos2::new(x, rect.bottom() - 6.0),
                egui::Pos2::new(x, rect.bottom()),
            ],
            Stroke::new(1.0, palette.hour_line),
        );
        ui.painter().text(
            egui::Pos2::new(x + 4.0, rect.center().y),
            egui::Align2::LEFT_CENTER,
            format!("{:02}:00", hour),
            egui::FontId::proportional(11.0),
            palette.muted_text,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui_egui::host::{CommitOutcome, CommitTicket, MockSchedulerHost};

    fn scheduler() -> TimelineScheduler {
        TimelineScheduler::new(TimelineConfig::new(7, 18)).unwrap()
    }

    /// pixels_per_minute == 2.0
    fn layout(scheduler: &TimelineScheduler) -> TimelineLayout {
        TimelineLayout::compute(scheduler.config(), 1320.0, 100.0)
    }

    fn slot() -> Slot {
        Slot::new("s1", "L1", "10:00", 30)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(TimelineScheduler::new(TimelineConfig::new(18, 7)).is_err());
    }

    #[test]
    fn test_set_zoom_clamps() {
        let mut scheduler = scheduler();
        scheduler.set_zoom(1.0);
        assert_eq!(scheduler.zoom(), 10.0);
        scheduler.set_zoom(1000.0);
        assert_eq!(scheduler.zoom(), 400.0);
    }

    #[test]
    fn test_valid_drop_commits_exactly_once() {
        let mut scheduler = scheduler();
        let layout = layout(&scheduler);

        let mut host = MockSchedulerHost::new();
        host.expect_commit_position()
            .withf(|slot_id, start, lane| slot_id == "s1" && start == "10:30" && lane == "L2")
            .times(1)
            .returning(|_, _, _| CommitTicket::resolved(true));

        scheduler.drag.begin(&slot(), Vec2::ZERO);
        let config = scheduler.config().clone();
        scheduler
            .drag
            .update_pointer(Vec2::new(60.0, 0.0), Some("L2"), &config, &layout, |_, _, _| true);
        scheduler.finish_drag(&mut host);

        assert_eq!(scheduler.drag_snapshot(), DragSnapshot::default());
        assert_eq!(scheduler.pending_commit_count(), 1);

        let resolutions = scheduler.commits.poll();
        assert_eq!(resolutions.len(), 1);
        assert_eq!(resolutions[0].outcome, CommitOutcome::Accepted);
        assert_eq!(scheduler.pending_commit_count(), 0);
    }

    #[test]
    fn test_invalid_drop_never_commits() {
        let mut scheduler = scheduler();
        let layout = layout(&scheduler);

        let mut host = MockSchedulerHost::new();
        host.expect_commit_position().times(0);

        scheduler.drag.begin(&slot(), Vec2::ZERO);
        let config = scheduler.config().clone();
        scheduler
            .drag
            .update_pointer(Vec2::new(60.0, 0.0), Some("L2"), &config, &layout, |_, _, _| false);
        scheduler.finish_drag(&mut host);

        assert_eq!(scheduler.drag_snapshot(), DragSnapshot::default());
        assert_eq!(scheduler.pending_commit_count(), 0);
    }

    #[test]
    fn test_unmoved_drop_never_commits() {
        let mut scheduler = scheduler();
        let layout = layout(&scheduler);

        let mut host = MockSchedulerHost::new();
        host.expect_commit_position().times(0);

        scheduler.drag.begin(&slot(), Vec2::ZERO);
        let config = scheduler.config().clone();
        // A wiggle that snaps back onto the original position.
        scheduler
            .drag
            .update_pointer(Vec2::new(4.0, 0.0), Some("L1"), &config, &layout, |_, _, _| true);
        scheduler.finish_drag(&mut host);

        assert_eq!(scheduler.pending_commit_count(), 0);
    }
}
