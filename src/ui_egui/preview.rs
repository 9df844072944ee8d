//! Single-producer relay carrying the dragged slot's visual to the overlay.
//!
//! Exactly one slot (the active drag target) may publish per frame, and the
//! pointer-following overlay consumes the frame in the same paint pass.
//! Content therefore appears in the overlay if and only if one slot is
//! active-and-dragging, and switching sessions can never leave a stale render
//! behind: an unconsumed frame is replaced on the next publish and dropped on
//! [`PreviewChannel::clear`].

use egui::Vec2;

use crate::ui_egui::slot_box::SlotVisual;

/// One frame of relayed content.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFrame {
    /// Slot that produced the content; must match the active drag target.
    pub producer_id: String,
    /// Size of the overlay surface (the slot's resting rect size).
    pub size: Vec2,
    pub visual: SlotVisual,
}

#[derive(Debug, Default)]
pub struct PreviewChannel {
    frame: Option<PreviewFrame>,
}

impl PreviewChannel {
    /// Accept content from the active drag target; anyone else is dropped.
    pub fn publish(&mut self, active_slot_id: Option<&str>, frame: PreviewFrame) {
        if active_slot_id != Some(frame.producer_id.as_str()) {
            log::debug!(
                "preview publish dropped: {} is not the active drag target",
                frame.producer_id
            );
            return;
        }
        self.frame = Some(frame);
    }

    /// Consume this frame's content for the overlay.
    pub fn take(&mut self) -> Option<PreviewFrame> {
        self.frame.take()
    }

    /// Drop any unconsumed content; called whenever a session ends.
    pub fn clear(&mut self) {
        self.frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    fn frame(producer: &str) -> PreviewFrame {
        PreviewFrame {
            producer_id: producer.to_owned(),
            size: Vec2::new(120.0, 48.0),
            visual: SlotVisual {
                label: "Tune-up".to_owned(),
                time_range: "10:00 - 10:30".to_owned(),
                fill: Color32::from_rgb(100, 150, 200),
            },
        }
    }

    #[test]
    fn test_publish_then_take() {
        let mut channel = PreviewChannel::default();
        channel.publish(Some("s1"), frame("s1"));
        let taken = channel.take().expect("frame should be relayed");
        assert_eq!(taken.producer_id, "s1");
        // Consuming leaves nothing behind.
        assert!(channel.take().is_none());
    }

    #[test]
    fn test_non_active_producer_is_dropped() {
        let mut channel = PreviewChannel::default();
        channel.publish(Some("s1"), frame("s2"));
        assert!(channel.take().is_none());
        channel.publish(None, frame("s2"));
        assert!(channel.take().is_none());
    }

    #[test]
    fn test_new_session_swaps_content_cleanly() {
        let mut channel = PreviewChannel::default();
        channel.publish(Some("s1"), frame("s1"));
        channel.clear();
        channel.publish(Some("s2"), frame("s2"));
        let taken = channel.take().expect("frame should be relayed");
        assert_eq!(taken.producer_id, "s2");
    }
}
