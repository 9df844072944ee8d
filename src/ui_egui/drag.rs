use egui::Vec2;

use crate::models::config::TimelineConfig;
use crate::models::slot::Slot;
use crate::ui_egui::layout::TimelineLayout;
use crate::utils::time::{clamp_minutes, minutes_to_time, snap_to_interval, time_to_minutes};

/// Read surface over the active drag, for host-side rendering decisions.
///
/// The idle default has every field cleared; after any drag end or cancel the
/// snapshot equals `DragSnapshot::default()` again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragSnapshot {
    pub active_slot_id: Option<String>,
    pub hovered_lane_id: Option<String>,
    pub candidate_start_time: Option<String>,
    pub is_valid: bool,
}

/// Ephemeral state of one pointer drag. Created on drag start, mutated on
/// every pointer move, consumed on drop, destroyed on drop or cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub slot_id: String,
    pub origin_lane_id: String,
    pub origin_start_time: String,
    pub duration_minutes: u32,
    /// Pointer offset from the slot rect origin at grab time; anchors the
    /// pointer-following preview overlay.
    pub grab_offset: Vec2,
    /// Raw accumulated pointer displacement. Drives the unsnapped trail
    /// transform of the in-place slot; the snapped position lives in
    /// `candidate_start_time`.
    pub pointer_delta: Vec2,
    pub hovered_lane_id: Option<String>,
    /// Snapped, clamped tentative start time, present while over a lane.
    pub candidate_start_time: Option<String>,
    /// Result of the last `validate_drop` call for the current candidate.
    pub is_valid: bool,
}

/// Drag state machine: idle -> dragging -> (commit | discard) -> idle.
///
/// At most one session exists at a time; a second pointer cannot start a drag
/// while one is active. Every exit path resets to `Idle` before the next drag
/// can begin.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// What a finished drag asks the host to do.
#[derive(Debug, Clone, PartialEq)]
pub enum DropResolution {
    /// Released over a valid lane with an actual position change: invoke
    /// `commit_position` with these values.
    Commit {
        slot_id: String,
        start_time: String,
        lane_id: String,
    },
    /// Released outside any lane, over an invalid target, or without moving.
    /// No commit call is made.
    Discard,
}

impl DragState {
    /// Begin a session for `slot`. Ignored while another session is active
    /// (single-pointer assumption; concurrent drags are unsupported).
    pub fn begin(&mut self, slot: &Slot, grab_offset: Vec2) {
        if let DragState::Dragging(session) = self {
            log::debug!(
                "ignoring drag begin for slot {} while slot {} is active",
                slot.id,
                session.slot_id
            );
            return;
        }

        log::debug!("drag begin: slot {}", slot.id);
        *self = DragState::Dragging(DragSession {
            slot_id: slot.id.clone(),
            origin_lane_id: slot.lane_id.clone(),
            origin_start_time: slot.start_time.clone(),
            duration_minutes: slot.duration_minutes,
            grab_offset,
            pointer_delta: Vec2::ZERO,
            hovered_lane_id: None,
            candidate_start_time: None,
            is_valid: false,
        });
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn is_dragging_slot(&self, slot_id: &str) -> bool {
        matches!(self, DragState::Dragging(session) if session.slot_id == slot_id)
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }

    pub fn snapshot(&self) -> DragSnapshot {
        match self {
            DragState::Idle => DragSnapshot::default(),
            DragState::Dragging(session) => DragSnapshot {
                active_slot_id: Some(session.slot_id.clone()),
                hovered_lane_id: session.hovered_lane_id.clone(),
                candidate_start_time: session.candidate_start_time.clone(),
                is_valid: session.is_valid,
            },
        }
    }

    /// Re-entered on every pointer move while dragging: accumulate the raw
    /// displacement, recompute the snapped candidate for the hovered lane, and
    /// ask the host to validate it. `validate` must be cheap and
    /// side-effect-free; it runs dozens of times per second.
    pub fn update_pointer(
        &mut self,
        delta: Vec2,
        hovered_lane_id: Option<&str>,
        config: &TimelineConfig,
        layout: &TimelineLayout,
        validate: impl FnOnce(&str, &str, &str) -> bool,
    ) {
        let DragState::Dragging(session) = self else {
            return;
        };

        session.pointer_delta += delta;
        match hovered_lane_id {
            Some(lane_id) => {
                let candidate = candidate_start_time(
                    &session.origin_start_time,
                    session.pointer_delta.x,
                    config,
                    layout,
                );
                session.is_valid = validate(&session.slot_id, &candidate, lane_id);
                session.hovered_lane_id = Some(lane_id.to_owned());
                session.candidate_start_time = Some(candidate);
            }
            None => {
                session.hovered_lane_id = None;
                session.candidate_start_time = None;
                session.is_valid = false;
            }
        }
    }

    /// Consume the session on pointer release and decide what the host should
    /// do. Cleanup is unconditional: the state is `Idle` again on return no
    /// matter which branch was taken.
    pub fn resolve_drop(&mut self) -> DropResolution {
        let state = std::mem::take(self);
        let DragState::Dragging(session) = state else {
            return DropResolution::Discard;
        };

        let (Some(lane_id), Some(start_time)) =
            (session.hovered_lane_id, session.candidate_start_time)
        else {
            log::debug!(
                "drag discard: slot {} released outside any lane",
                session.slot_id
            );
            return DropResolution::Discard;
        };

        if !session.is_valid {
            log::debug!(
                "drag discard: host rejected {} at {} in lane {}",
                session.slot_id,
                start_time,
                lane_id
            );
            return DropResolution::Discard;
        }

        if lane_id == session.origin_lane_id && start_time == session.origin_start_time {
            log::debug!("drag discard: slot {} did not move", session.slot_id);
            return DropResolution::Discard;
        }

        log::debug!(
            "drag commit: slot {} -> {} in lane {}",
            session.slot_id,
            start_time,
            lane_id
        );
        DropResolution::Commit {
            slot_id: session.slot_id,
            start_time,
            lane_id,
        }
    }

    /// Escape or lost pointer capture: drop the session without committing.
    pub fn cancel(&mut self) {
        if let DragState::Dragging(session) = self {
            log::debug!("drag cancel: slot {}", session.slot_id);
        }
        *self = DragState::Idle;
    }
}

/// Snapped, clamped tentative start time for a drag displacement:
/// delta pixels -> delta minutes -> snap to interval -> clamp into the window
/// (a slot can never start at or after the last displayable hour).
pub fn candidate_start_time(
    origin_start: &str,
    delta_x: f32,
    config: &TimelineConfig,
    layout: &TimelineLayout,
) -> String {
    let origin_minutes = time_to_minutes(origin_start);
    let delta_minutes = layout.delta_to_minutes(delta_x);
    let snapped = snap_to_interval(
        origin_minutes + delta_minutes,
        config.snap_interval_minutes as i32,
    );
    let clamped = clamp_minutes(snapped, config.start_minutes(), config.last_start_minutes());
    minutes_to_time(clamped)
}
