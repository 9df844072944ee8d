// Slot module
// One schedulable item positioned by (lane, start time, duration)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::time::{minutes_to_time, time_to_minutes};

/// A draggable item on the board.
///
/// A slot belongs to exactly one lane and has exactly one
/// `(start_time, duration_minutes)` pair at any instant. The engine never
/// writes to these records; a committed move only becomes visible once the
/// host re-supplies updated data. Fields beyond the positional ones pass
/// through untouched in `payload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: String,
    pub lane_id: String,
    /// Time of day as "HH:MM". Normalized to the snap interval once committed;
    /// externally supplied data is taken as-is.
    pub start_time: String,
    pub duration_minutes: u32,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Slot {
    pub fn new(
        id: impl Into<String>,
        lane_id: impl Into<String>,
        start_time: impl Into<String>,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id: id.into(),
            lane_id: lane_id.into(),
            start_time: start_time.into(),
            duration_minutes,
            payload: Map::new(),
        }
    }

    /// Start of the slot in minutes since midnight.
    pub fn start_minutes(&self) -> i32 {
        time_to_minutes(&self.start_time)
    }

    /// End of the slot in minutes since midnight.
    pub fn end_minutes(&self) -> i32 {
        self.start_minutes() + self.duration_minutes as i32
    }

    /// End of the slot as "HH:MM".
    pub fn end_time(&self) -> String {
        minutes_to_time(self.end_minutes())
    }

    /// Read a string-valued payload field, if present.
    pub fn payload_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }
}
