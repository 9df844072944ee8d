// Integration tests for the drag lifecycle: snapping, clamping, validation,
// and commit dispatch through the host callbacks.

mod fixtures;

use egui::Vec2;
use pretty_assertions::assert_eq;

use fixtures::{slot_at, workshop_config, workshop_layout, RecordingHost};
use timeboard::ui_egui::drag::{DragSnapshot, DragState, DropResolution};
use timeboard::ui_egui::host::{CommitOutcome, PendingCommits, SchedulerHost};

/// Pointer-release glue: exactly what the board does on drag stop.
fn release(drag: &mut DragState, host: &mut RecordingHost, commits: &mut PendingCommits) {
    match drag.resolve_drop() {
        DropResolution::Commit {
            slot_id,
            start_time,
            lane_id,
        } => {
            let ticket = host.commit_position(&slot_id, &start_time, &lane_id);
            commits.track(slot_id, start_time, lane_id, ticket);
        }
        DropResolution::Discard => {}
    }
}

#[test]
fn test_snap_to_grid_from_off_grid_start() {
    let config = workshop_config();
    let layout = workshop_layout();
    let host = RecordingHost::accepting();

    // Slot already off-grid at 09:05, dragged by a pixel delta worth +12
    // minutes at 2 px/min: raw target 09:17 snaps to 09:15.
    let slot = slot_at("s1", "L1", "09:05", 30);
    let mut drag = DragState::default();
    drag.begin(&slot, Vec2::ZERO);
    drag.update_pointer(
        Vec2::new(24.0, 0.0),
        Some("L1"),
        &config,
        &layout,
        |slot_id, candidate, lane_id| host.validate_drop(slot_id, candidate, lane_id),
    );

    let snapshot = drag.snapshot();
    assert_eq!(snapshot.candidate_start_time.as_deref(), Some("09:15"));

    let validated = host.validate_calls.borrow();
    assert_eq!(
        validated.as_slice(),
        &[("s1".to_owned(), "09:15".to_owned(), "L1".to_owned())]
    );
}

#[test]
fn test_clamp_at_window_edge() {
    let config = workshop_config();
    let layout = workshop_layout();
    let host = RecordingHost::accepting();

    let slot = slot_at("s1", "L1", "16:30", 30);
    let mut drag = DragState::default();
    drag.begin(&slot, Vec2::ZERO);

    // However far right the pointer travels, the candidate never passes the
    // top of the last displayable hour.
    for _ in 0..40 {
        drag.update_pointer(
            Vec2::new(500.0, 0.0),
            Some("L1"),
            &config,
            &layout,
            |slot_id, candidate, lane_id| host.validate_drop(slot_id, candidate, lane_id),
        );
        let snapshot = drag.snapshot();
        assert!(snapshot.candidate_start_time.as_deref() <= Some("17:00"));
    }
    assert_eq!(
        drag.snapshot().candidate_start_time.as_deref(),
        Some("17:00")
    );
}

#[test]
fn test_invalid_drop_reverts_without_commit() {
    let config = workshop_config();
    let layout = workshop_layout();
    let mut host = RecordingHost::rejecting_lane("L2");
    let mut commits = PendingCommits::default();

    let slot = slot_at("s1", "L1", "10:00", 30);
    let mut drag = DragState::default();
    drag.begin(&slot, Vec2::ZERO);
    drag.update_pointer(
        Vec2::new(60.0, 10.0),
        Some("L2"),
        &config,
        &layout,
        |slot_id, candidate, lane_id| host.validate_drop(slot_id, candidate, lane_id),
    );
    assert!(!drag.snapshot().is_valid);

    release(&mut drag, &mut host, &mut commits);

    // The slot record is untouched, nothing was committed, and the session is
    // back at its idle default.
    assert_eq!(slot.lane_id, "L1");
    assert_eq!(slot.start_time, "10:00");
    assert_eq!(host.commit_calls.len(), 0);
    assert!(commits.is_empty());
    assert_eq!(drag.snapshot(), DragSnapshot::default());
}

#[test]
fn test_successful_commit_called_exactly_once() {
    let config = workshop_config();
    let layout = workshop_layout();
    let mut host = RecordingHost::accepting();
    let mut commits = PendingCommits::default();

    let slot = slot_at("s1", "L1", "10:00", 30);
    let mut drag = DragState::default();
    drag.begin(&slot, Vec2::ZERO);
    // +60 px at 2 px/min is +30 minutes: 10:00 -> 10:30, dropped in L2.
    drag.update_pointer(
        Vec2::new(60.0, 20.0),
        Some("L2"),
        &config,
        &layout,
        |_, _, _| true,
    );

    release(&mut drag, &mut host, &mut commits);

    assert_eq!(
        host.commit_calls,
        vec![("s1".to_owned(), "10:30".to_owned(), "L2".to_owned())]
    );
    assert_eq!(drag.snapshot(), DragSnapshot::default());

    let resolutions = commits.poll();
    assert_eq!(resolutions.len(), 1);
    assert_eq!(resolutions[0].outcome, CommitOutcome::Accepted);
    assert_eq!(resolutions[0].start_time, "10:30");
}

#[test]
fn test_unmoved_release_suppresses_commit() {
    let config = workshop_config();
    let layout = workshop_layout();
    let mut host = RecordingHost::accepting();
    let mut commits = PendingCommits::default();

    let slot = slot_at("s1", "L1", "10:00", 30);
    let mut drag = DragState::default();
    drag.begin(&slot, Vec2::ZERO);
    // A 3-minute wiggle snaps back onto the original position.
    drag.update_pointer(Vec2::new(6.0, 0.0), Some("L1"), &config, &layout, |_, _, _| {
        true
    });
    assert_eq!(
        drag.snapshot().candidate_start_time.as_deref(),
        Some("10:00")
    );

    release(&mut drag, &mut host, &mut commits);

    assert_eq!(host.commit_calls.len(), 0);
    assert!(commits.is_empty());
}

#[test]
fn test_release_outside_any_lane_discards() {
    let config = workshop_config();
    let layout = workshop_layout();
    let mut host = RecordingHost::accepting();
    let mut commits = PendingCommits::default();

    let slot = slot_at("s1", "L1", "10:00", 30);
    let mut drag = DragState::default();
    drag.begin(&slot, Vec2::ZERO);
    drag.update_pointer(Vec2::new(60.0, 0.0), Some("L2"), &config, &layout, |_, _, _| {
        true
    });
    // Pointer leaves every lane before release.
    drag.update_pointer(Vec2::new(0.0, 200.0), None, &config, &layout, |_, _, _| true);

    release(&mut drag, &mut host, &mut commits);

    assert_eq!(host.commit_calls.len(), 0);
    assert_eq!(drag.snapshot(), DragSnapshot::default());
}

#[test]
fn test_rejected_commit_leaves_slot_untouched() {
    let config = workshop_config();
    let layout = workshop_layout();
    let mut host = RecordingHost::accepting();
    host.commit_result = false;
    let mut commits = PendingCommits::default();

    let slot = slot_at("s1", "L1", "10:00", 30);
    let mut drag = DragState::default();
    drag.begin(&slot, Vec2::ZERO);
    drag.update_pointer(Vec2::new(60.0, 0.0), Some("L2"), &config, &layout, |_, _, _| {
        true
    });

    release(&mut drag, &mut host, &mut commits);

    let resolutions = commits.poll();
    assert_eq!(resolutions[0].outcome, CommitOutcome::Rejected);
    // No rollback needed: the canonical record was never mutated.
    assert_eq!(slot.lane_id, "L1");
    assert_eq!(slot.start_time, "10:00");
}

#[test]
fn test_select_is_not_a_drag() {
    let mut host = RecordingHost::accepting();
    let drag = DragState::default();

    // A pointer release below the activation threshold reports a selection;
    // no session ever exists for it.
    host.on_select("s1");
    assert_eq!(host.selected, vec!["s1".to_owned()]);
    assert!(!drag.is_active());
    assert_eq!(host.commit_calls.len(), 0);
}

#[test]
fn test_cancel_reaches_cleanup_from_any_point() {
    let config = workshop_config();
    let layout = workshop_layout();
    let host = RecordingHost::accepting();

    let slot = slot_at("s1", "L1", "10:00", 30);
    let mut drag = DragState::default();
    drag.begin(&slot, Vec2::ZERO);
    drag.update_pointer(
        Vec2::new(60.0, 0.0),
        Some("L2"),
        &config,
        &layout,
        |slot_id, candidate, lane_id| host.validate_drop(slot_id, candidate, lane_id),
    );

    drag.cancel();
    assert_eq!(drag.snapshot(), DragSnapshot::default());

    // A fresh drag can start immediately afterwards.
    drag.begin(&slot, Vec2::ZERO);
    assert!(drag.is_dragging_slot("s1"));
}
