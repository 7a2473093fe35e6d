//! Editor configuration.
//!
//! The host application persists these settings as JSON alongside its own preferences.
//! Missing keys fall back to the defaults in [`crate::constants`].

use crate::constants::{DEFAULT_HISTORY_CAPACITY, PASTE_OFFSET_X, PASTE_OFFSET_Y};
use egui::Vec2;
use serde::{Deserialize, Serialize};

/// Tunable behaviour of a [`crate::CanvasEditor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Number of snapshots kept on the undo/redo timeline
    pub history_capacity: usize,
    /// Nudge applied to pasted widgets, in canvas units
    pub paste_offset: (f32, f32),
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            paste_offset: (PASTE_OFFSET_X, PASTE_OFFSET_Y),
        }
    }
}

impl EditorConfig {
    /// The paste nudge as a vector.
    pub fn paste_offset(&self) -> Vec2 {
        Vec2::new(self.paste_offset.0, self.paste_offset.1)
    }

    /// Serializes the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a configuration from JSON. Absent keys take their default value.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
