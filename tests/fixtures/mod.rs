// Test fixtures - reusable test data
// Provides a consistent workshop board and a recording host across test files

use std::cell::RefCell;

use timeboard::models::config::TimelineConfig;
use timeboard::models::slot::Slot;
use timeboard::ui_egui::host::{CommitTicket, SchedulerHost};
use timeboard::ui_egui::layout::TimelineLayout;

/// The window every scenario runs in: 07:00-18:00, snapping to 15 minutes.
pub fn workshop_config() -> TimelineConfig {
    TimelineConfig::new(7, 18)
}

/// Layout with a round 2.0 pixels per minute (660 minutes in 1320 px).
pub fn workshop_layout() -> TimelineLayout {
    TimelineLayout::compute(&workshop_config(), 1320.0, 100.0)
}

pub fn slot_at(id: &str, lane_id: &str, start_time: &str, duration_minutes: u32) -> Slot {
    Slot::new(id, lane_id, start_time, duration_minutes)
}

/// Host double that records every callback invocation.
///
/// Validation is scripted per lane: drops into `rejected_lanes` fail, all
/// others pass. Commits resolve immediately with `commit_result`.
pub struct RecordingHost {
    pub rejected_lanes: Vec<String>,
    pub commit_result: bool,
    pub validate_calls: RefCell<Vec<(String, String, String)>>,
    pub commit_calls: Vec<(String, String, String)>,
    pub selected: Vec<String>,
}

impl RecordingHost {
    pub fn accepting() -> Self {
        Self {
            rejected_lanes: Vec::new(),
            commit_result: true,
            validate_calls: RefCell::new(Vec::new()),
            commit_calls: Vec::new(),
            selected: Vec::new(),
        }
    }

    pub fn rejecting_lane(lane_id: &str) -> Self {
        Self {
            rejected_lanes: vec![lane_id.to_owned()],
            ..Self::accepting()
        }
    }
}

impl SchedulerHost for RecordingHost {
    fn validate_drop(&self, slot_id: &str, candidate_start: &str, lane_id: &str) -> bool {
        self.validate_calls.borrow_mut().push((
            slot_id.to_owned(),
            candidate_start.to_owned(),
            lane_id.to_owned(),
        ));
        !self.rejected_lanes.iter().any(|lane| lane == lane_id)
    }

    fn commit_position(
        &mut self,
        slot_id: &str,
        new_start: &str,
        new_lane_id: &str,
    ) -> CommitTicket {
        self.commit_calls.push((
            slot_id.to_owned(),
            new_start.to_owned(),
            new_lane_id.to_owned(),
        ));
        CommitTicket::resolved(self.commit_result)
    }

    fn on_select(&mut self, slot_id: &str) {
        self.selected.push(slot_id.to_owned());
    }
}
