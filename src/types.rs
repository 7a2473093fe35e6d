//! Core data types for the canvas editing core.
//!
//! This module defines the widget record stored in the canvas model, its identifier,
//! and the JSON boundary used by the persistence layer. Saved layouts written by older
//! versions of the dashboard builder carry the stacking index under `z`, `zIndex` or both;
//! they are migrated here to the single canonical `z` field.

use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a widget placed on the canvas.
///
/// Identifiers are opaque: layouts loaded from the backend may use any string (or number),
/// while widgets created by the editor receive a random UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Generates a fresh, globally unique identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WidgetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A single entry in the canvas model.
///
/// The core only interprets `id`, the position and the stacking index. Everything else
/// (shape tag, size, tag bindings, colors, titles) is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WidgetRecord")]
pub struct Widget {
    /// Unique identifier, immutable for the widget's lifetime
    pub id: WidgetId,
    /// Renderer discriminator such as `"tank"`, `"valveControl"` or `"textBox"`
    pub shape: String,
    /// Left edge in canvas coordinates
    pub x: f32,
    /// Top edge in canvas coordinates
    pub y: f32,
    /// Stacking index (1-based, higher paints on top). `None` until the widget is placed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<u32>,
    /// Optional width
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<f32>,
    /// Optional height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<f32>,
    /// Shape-specific configuration, opaque to the core
    pub properties: Map<String, Value>,
    /// Any other top-level fields present in the saved layout
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Widget {
    /// Creates a new unplaced widget with a fresh identifier.
    ///
    /// # Arguments
    ///
    /// * `shape` - The renderer discriminator
    /// * `position` - Top-left corner in canvas coordinates
    ///
    /// # Returns
    ///
    /// A widget with no stacking index and empty properties. The store assigns the
    /// stacking index when the widget is added to the canvas.
    pub fn new(shape: impl Into<String>, position: Pos2) -> Self {
        Self {
            id: WidgetId::new(),
            shape: shape.into(),
            x: position.x,
            y: position.y,
            z: None,
            w: None,
            h: None,
            properties: Map::new(),
            extra: Map::new(),
        }
    }

    /// Builder-style helper setting the widget size.
    pub fn with_size(mut self, w: f32, h: f32) -> Self {
        self.w = Some(w);
        self.h = Some(h);
        self
    }

    /// Builder-style helper setting the stacking index.
    pub fn with_z(mut self, z: u32) -> Self {
        self.z = Some(z);
        self
    }

    /// Builder-style helper setting a single property.
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Top-left corner in canvas coordinates.
    pub fn position(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }

    /// Moves the top-left corner to `position`.
    pub fn set_position(&mut self, position: Pos2) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Shifts the widget by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

/// Identifier as it may appear in a saved layout.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawWidgetId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawWidgetId> for WidgetId {
    fn from(raw: RawWidgetId) -> Self {
        match raw {
            RawWidgetId::Text(text) => WidgetId(text),
            RawWidgetId::Number(number) => WidgetId(number.to_string()),
        }
    }
}

/// Wire shape of a widget, accepting the legacy `zIndex` spelling.
#[derive(Deserialize)]
struct WidgetRecord {
    id: RawWidgetId,
    #[serde(default)]
    shape: String,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    z: Option<Value>,
    #[serde(default, rename = "zIndex")]
    z_index: Option<Value>,
    #[serde(default)]
    w: Option<f32>,
    #[serde(default)]
    h: Option<f32>,
    #[serde(default)]
    properties: Map<String, Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<WidgetRecord> for Widget {
    fn from(record: WidgetRecord) -> Self {
        // `z` wins over `zIndex` when both are present and usable
        let z = record
            .z
            .as_ref()
            .and_then(stacking_index)
            .or_else(|| record.z_index.as_ref().and_then(stacking_index));

        Self {
            id: record.id.into(),
            shape: record.shape,
            x: record.x,
            y: record.y,
            z,
            w: record.w,
            h: record.h,
            properties: record.properties,
            extra: record.extra,
        }
    }
}

/// Reads a legacy stacking index. Numbers and numeric strings are accepted; anything below 1
/// counts as missing.
fn stacking_index(value: &Value) -> Option<u32> {
    let raw = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() || raw < 1.0 {
        return None;
    }
    Some(raw.round().min(u32::MAX as f64) as u32)
}

/// Parses a saved layout (a JSON array of widget records).
///
/// Legacy `zIndex` fields are migrated to `z` and the stacking order is repaired so the
/// returned list satisfies the dense `1..=N` invariant.
///
/// # Arguments
///
/// * `json` - JSON text produced by the persistence layer
///
/// # Returns
///
/// The migrated widget list, or the parse error.
pub fn load_layout(json: &str) -> Result<Vec<Widget>, serde_json::Error> {
    let mut widgets: Vec<Widget> = serde_json::from_str(json)?;
    crate::editor::zorder::normalize(&mut widgets);
    Ok(widgets)
}

/// Serializes a widget list in the canonical layout format (only `z`, never `zIndex`).
pub fn layout_to_json(widgets: &[Widget]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(widgets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_widget_creation() {
        let widget = Widget::new("tank", Pos2::new(40.0, 60.0)).with_size(120.0, 200.0);

        assert_eq!(widget.shape, "tank");
        assert_eq!(widget.position(), Pos2::new(40.0, 60.0));
        assert_eq!(widget.z, None);
        assert_eq!(widget.w, Some(120.0));
        assert!(!widget.id.as_str().is_empty());
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = WidgetId::new();
        let b = WidgetId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_translate_moves_by_delta() {
        let mut widget = Widget::new("textBox", Pos2::new(10.0, 10.0));
        widget.translate(Vec2::new(5.0, -3.0));
        assert_eq!(widget.position(), Pos2::new(15.0, 7.0));
    }

    #[test]
    fn test_legacy_z_index_is_migrated() {
        let widget: Widget = serde_json::from_value(json!({
            "id": "valve-1",
            "shape": "valveControl",
            "x": 5,
            "y": 6,
            "zIndex": 3
        }))
        .unwrap();

        assert_eq!(widget.z, Some(3));
        assert!(!widget.extra.contains_key("zIndex"));
    }

    #[test]
    fn test_z_preferred_over_z_index() {
        let widget: Widget = serde_json::from_value(json!({
            "id": "a",
            "shape": "tank",
            "x": 0,
            "y": 0,
            "z": 2,
            "zIndex": 7
        }))
        .unwrap();

        assert_eq!(widget.z, Some(2));
    }

    #[test]
    fn test_unusable_z_falls_back_to_z_index() {
        let widget: Widget = serde_json::from_value(json!({
            "id": "a",
            "shape": "tank",
            "x": 0,
            "y": 0,
            "z": 0,
            "zIndex": "4"
        }))
        .unwrap();

        assert_eq!(widget.z, Some(4));
    }

    #[test]
    fn test_missing_stacking_index() {
        let widget: Widget = serde_json::from_value(json!({
            "id": "a",
            "shape": "img",
            "x": 1,
            "y": 2
        }))
        .unwrap();

        assert_eq!(widget.z, None);
    }

    #[test]
    fn test_numeric_id_is_accepted() {
        let widget: Widget = serde_json::from_value(json!({
            "id": 1699999999123_u64,
            "shape": "counterInput",
            "x": 0,
            "y": 0,
            "z": 1
        }))
        .unwrap();

        assert_eq!(widget.id.as_str(), "1699999999123");
    }

    #[test]
    fn test_unknown_fields_survive_roundtrip() {
        let input = json!({
            "id": "display-9",
            "shape": "graphicDisplay",
            "x": 10,
            "y": 20,
            "zIndex": 1,
            "w": 300,
            "h": 150,
            "locked": true,
            "properties": { "tag": "PT-101", "color": "#00ff00" }
        });
        let widget: Widget = serde_json::from_value(input).unwrap();
        let output = serde_json::to_value(&widget).unwrap();

        assert_eq!(output["locked"], json!(true));
        assert_eq!(output["properties"]["tag"], json!("PT-101"));
        assert_eq!(output["w"], json!(300.0));
        assert_eq!(output["z"], json!(1));
        assert!(output.get("zIndex").is_none());
    }

    #[test]
    fn test_load_layout_repairs_stacking() {
        let json = r#"[
            {"id": "a", "shape": "tank", "x": 0, "y": 0, "zIndex": 5},
            {"id": "b", "shape": "tank", "x": 0, "y": 0},
            {"id": "c", "shape": "tank", "x": 0, "y": 0, "z": 2}
        ]"#;
        let widgets = load_layout(json).unwrap();
        let zs: Vec<Option<u32>> = widgets.iter().map(|w| w.z).collect();

        // a=5, b gets 6 from the running counter, c=2 -> ranked c, a, b
        assert_eq!(zs, vec![Some(2), Some(3), Some(1)]);
    }

    #[test]
    fn test_load_layout_rejects_invalid_json() {
        assert!(load_layout("{not json").is_err());
    }

    #[test]
    fn test_layout_roundtrip_is_stable() {
        let widgets = vec![
            Widget::new("tank", Pos2::new(1.0, 2.0)).with_z(1),
            Widget::new("img", Pos2::new(3.0, 4.0)).with_z(2),
        ];
        let json = layout_to_json(&widgets).unwrap();
        let loaded = load_layout(&json).unwrap();
        assert_eq!(loaded, widgets);
    }
}
