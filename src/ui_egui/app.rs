//! Demo host application for the board.
//!
//! Owns the canonical lane/slot data, implements the three host callbacks,
//! and simulates a slow backend: commits resolve on a worker thread after a
//! short delay, and the board only reflects a move once the applied change
//! flows back into the slot list.

use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::models::config::TimelineConfig;
use crate::models::lane::Lane;
use crate::models::slot::Slot;
use crate::ui_egui::host::{CommitOutcome, CommitTicket, SchedulerHost};
use crate::ui_egui::timeline::TimelineScheduler;

/// Embedded sample board: three service bays, one locked for walk-ins only.
const SAMPLE_BOARD: &str = r##"{
  "config": { "start_hour": 7, "end_hour": 18 },
  "lanes": [
    { "id": "bay-1", "label": "Bay 1" },
    { "id": "bay-2", "label": "Bay 2" },
    { "id": "bay-3", "label": "Bay 3 (walk-ins)", "locked": true }
  ],
  "slots": [
    { "id": "job-101", "lane_id": "bay-1", "start_time": "08:00", "duration_minutes": 60,
      "label": "Brake inspection", "color": "#5A8BC4" },
    { "id": "job-102", "lane_id": "bay-1", "start_time": "10:30", "duration_minutes": 90,
      "label": "Timing belt", "color": "#C48A5A" },
    { "id": "job-103", "lane_id": "bay-2", "start_time": "09:15", "duration_minutes": 45,
      "label": "Oil change", "color": "#6AA36A" },
    { "id": "job-104", "lane_id": "bay-2", "start_time": "13:00", "duration_minutes": 120,
      "label": "Transmission service", "color": "#9A6AB0" },
    { "id": "job-105", "lane_id": "bay-3", "start_time": "11:00", "duration_minutes": 30,
      "label": "Tire rotation", "color": "#B05A5A" }
  ]
}"##;

#[derive(serde::Deserialize)]
struct SampleBoard {
    config: TimelineConfig,
    lanes: Vec<Lane>,
    slots: Vec<Slot>,
}

struct AppliedMove {
    slot_id: String,
    start_time: String,
    lane_id: String,
}

/// Host callbacks backed by a simulated slow scheduler backend.
struct DemoHost {
    locked_lane_ids: HashSet<String>,
    applied_tx: Sender<AppliedMove>,
    commit_latency: Duration,
    selected_slot_id: Option<String>,
}

impl SchedulerHost for DemoHost {
    fn validate_drop(&self, _slot_id: &str, _candidate_start: &str, lane_id: &str) -> bool {
        !self.locked_lane_ids.contains(lane_id)
    }

    fn commit_position(
        &mut self,
        slot_id: &str,
        new_start: &str,
        new_lane_id: &str,
    ) -> CommitTicket {
        let (ticket, resolver) = CommitTicket::pending();
        let applied = AppliedMove {
            slot_id: slot_id.to_owned(),
            start_time: new_start.to_owned(),
            lane_id: new_lane_id.to_owned(),
        };
        let applied_tx = self.applied_tx.clone();
        let latency = self.commit_latency;

        std::thread::spawn(move || {
            std::thread::sleep(latency);
            let _ = applied_tx.send(applied);
            resolver.resolve(true);
        });
        ticket
    }

    fn on_select(&mut self, slot_id: &str) {
        self.selected_slot_id = Some(slot_id.to_owned());
    }
}

pub struct SchedulerApp {
    scheduler: TimelineScheduler,
    lanes: Vec<Lane>,
    slots: Vec<Slot>,
    host: DemoHost,
    applied_rx: Receiver<AppliedMove>,
    zoom: f32,
    status: String,
}

impl SchedulerApp {
    pub fn new() -> anyhow::Result<Self> {
        let board: SampleBoard = serde_json::from_str(SAMPLE_BOARD)?;
        let scheduler = TimelineScheduler::new(board.config)?;

        let locked_lane_ids = board
            .lanes
            .iter()
            .filter(|lane| lane.payload_flag("locked"))
            .map(|lane| lane.id.clone())
            .collect();

        let (applied_tx, applied_rx) = mpsc::channel();
        Ok(Self {
            scheduler,
            lanes: board.lanes,
            slots: board.slots,
            host: DemoHost {
                locked_lane_ids,
                applied_tx,
                commit_latency: Duration::from_millis(400),
                selected_slot_id: None,
            },
            applied_rx,
            zoom: 100.0,
            status: "Drag a job to reschedule it.".to_owned(),
        })
    }

    /// Fold backend-confirmed moves into the canonical slot list.
    fn drain_applied_moves(&mut self) {
        while let Ok(applied) = self.applied_rx.try_recv() {
            if let Some(slot) = self.slots.iter_mut().find(|slot| slot.id == applied.slot_id) {
                slot.start_time = applied.start_time;
                slot.lane_id = applied.lane_id;
            }
        }
    }

    fn side_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Details");
        ui.separator();

        match self
            .host
            .selected_slot_id
            .as_deref()
            .and_then(|id| self.slots.iter().find(|slot| slot.id == id))
        {
            Some(slot) => {
                let label = slot.payload_str("label").unwrap_or(slot.id.as_str());
                ui.label(egui::RichText::new(label).strong());
                ui.label(format!("Lane: {}", slot.lane_id));
                ui.label(format!("{} - {}", slot.start_time, slot.end_time()));
                ui.label(format!("{} min", slot.duration_minutes));
            }
            None => {
                ui.label(egui::RichText::new("Click a job to inspect it.").weak());
            }
        }

        // The engine's drag snapshot lets the host narrate the drag.
        let snapshot = self.scheduler.drag_snapshot();
        if let (Some(lane_id), Some(candidate)) =
            (&snapshot.hovered_lane_id, &snapshot.candidate_start_time)
        {
            ui.separator();
            if snapshot.is_valid {
                ui.label(format!("Drop here to reschedule to {candidate} in {lane_id}"));
            } else {
                ui.colored_label(egui::Color32::LIGHT_RED, "This lane does not accept drops");
            }
        }
    }
}

impl eframe::App for SchedulerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_applied_moves();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Timeboard");
                ui.separator();
                ui.label("Zoom");
                if ui
                    .add(egui::Slider::new(&mut self.zoom, 25.0..=100.0).suffix("%"))
                    .changed()
                {
                    self.scheduler.set_zoom(self.zoom);
                }
                ui.separator();
                ui.label(&self.status);
            });
        });

        egui::SidePanel::right("details")
            .default_width(220.0)
            .show(ctx, |ui| self.side_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let resolutions = self
                .scheduler
                .show(ui, &self.lanes, &self.slots, &mut self.host);

            for resolution in resolutions {
                self.status = match resolution.outcome {
                    CommitOutcome::Accepted => format!(
                        "Moved {} to {} in {}.",
                        resolution.slot_id, resolution.start_time, resolution.lane_id
                    ),
                    CommitOutcome::Rejected => {
                        format!("Backend rejected the move of {}.", resolution.slot_id)
                    }
                    CommitOutcome::Abandoned => {
                        format!("Backend never answered for {}.", resolution.slot_id)
                    }
                };
            }

            if self.scheduler.pending_commit_count() > 0 {
                // Keep polling while a commit is in flight so the applied move
                // shows up without waiting for the next input event.
                ctx.request_repaint_after(Duration::from_millis(100));
            }
        });
    }
}
