mod app;
pub mod drag;
pub mod host;
mod lane_row;
pub mod layout;
mod markers;
pub mod palette;
pub mod preview;
mod slot_box;
pub mod timeline;

pub use app::SchedulerApp;
pub use slot_box::{SlotEvent, SlotVisual};
pub use timeline::TimelineScheduler;
