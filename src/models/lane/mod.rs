// Lane module
// One schedulable resource row on the board

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A droppable horizontal row identified by `id`.
///
/// Lanes arrive as a flat ordered sequence; their order determines vertical
/// stacking. Fields beyond `id` and `label` pass through untouched in
/// `payload` for the host's own use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub id: String,
    pub label: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Lane {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            payload: Map::new(),
        }
    }

    /// Read a string-valued payload field, if present.
    pub fn payload_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }

    /// Read a boolean payload field, defaulting to false.
    pub fn payload_flag(&self, key: &str) -> bool {
        self.payload
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_passthrough_round_trip() {
        let json = r#"{"id":"L1","label":"Bay 1","team":"alpha","locked":true}"#;
        let lane: Lane = serde_json::from_str(json).expect("lane should deserialize");
        assert_eq!(lane.id, "L1");
        assert_eq!(lane.payload_str("team"), Some("alpha"));
        assert!(lane.payload_flag("locked"));

        let back = serde_json::to_value(&lane).expect("lane should serialize");
        assert_eq!(back["team"], "alpha");
        assert_eq!(back["locked"], true);
    }

    #[test]
    fn test_payload_flag_defaults_false() {
        let lane = Lane::new("L1", "Bay 1");
        assert!(!lane.payload_flag("locked"));
    }
}
