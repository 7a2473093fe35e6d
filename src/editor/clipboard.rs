//! Copy and paste of canvas widgets.
//!
//! The clipboard holds at most one copy-set. Pasting re-creates the copied widgets around an
//! anchor point with fresh ids, stacked above everything already on the canvas.

use super::state::{CanvasEditor, EditorMode};
use super::store::fresh_id;
use super::zorder::{get_z, max_z};
use crate::types::{Widget, WidgetId};
use egui::{Pos2, Vec2};
use log::debug;
use std::time::SystemTime;

/// The most recent copy-set.
#[derive(Debug, Clone, PartialEq)]
pub struct Clipboard {
    /// Copied widgets, unchanged from the moment of copying
    pub items: Vec<Widget>,
    /// When the copy happened
    pub captured_at: SystemTime,
}

/// Picks the widgets a copy action captures.
///
/// # Arguments
///
/// * `widgets` - The canvas model
/// * `target` - The widget the copy was invoked on
/// * `selection` - The current selection, in selection order
///
/// # Returns
///
/// The whole selection (in selection order) when `target` is part of a multi-selection,
/// otherwise just `target`. Empty if `target` is not on the canvas.
pub fn copy_set(widgets: &[Widget], target: &WidgetId, selection: &[WidgetId]) -> Vec<Widget> {
    let find = |id: &WidgetId| widgets.iter().find(|w| &w.id == id).cloned();
    if find(target).is_none() {
        return Vec::new();
    }
    if selection.len() > 1 && selection.contains(target) {
        selection.iter().filter_map(find).collect()
    } else {
        find(target).into_iter().collect()
    }
}

/// Builds the widgets a paste adds to the canvas.
///
/// The first copied widget is the reference point: each clone keeps its offset from that
/// widget, shifted so the reference lands on `anchor + offset`. Clones get ids unused on
/// `canvas`, and stacking indices counting up from the canvas maximum in the copy-set's
/// original stacking order.
///
/// # Arguments
///
/// * `items` - The copy-set
/// * `canvas` - The canvas model the clones will join
/// * `anchor` - Paste position in canvas coordinates
/// * `offset` - Nudge added to every clone
pub fn paste_clones(items: &[Widget], canvas: &[Widget], anchor: Pos2, offset: Vec2) -> Vec<Widget> {
    let Some(reference) = items.first().map(Widget::position) else {
        return Vec::new();
    };

    let mut stacking: Vec<usize> = (0..items.len()).collect();
    stacking.sort_by_key(|&index| (get_z(&items[index]), index));
    let mut z_values = vec![0u32; items.len()];
    let mut next_z = max_z(canvas);
    for index in stacking {
        next_z = next_z.saturating_add(1);
        z_values[index] = next_z;
    }

    let mut clones: Vec<Widget> = Vec::with_capacity(items.len());
    for (item, z) in items.iter().zip(z_values) {
        let mut clone = item.clone();
        clone.id = fresh_id(canvas);
        while clones.iter().any(|c| c.id == clone.id) {
            clone.id = fresh_id(canvas);
        }
        clone.set_position(anchor + (item.position() - reference) + offset);
        clone.z = Some(z);
        clones.push(clone);
    }
    clones
}

impl CanvasEditor {
    /// Captures a copy-set, replacing whatever the clipboard held.
    ///
    /// # Returns
    ///
    /// `false` (clipboard untouched) if `target` is not on the canvas.
    pub fn copy(&mut self, target: &WidgetId, selection: &[WidgetId]) -> bool {
        let items = copy_set(&self.widgets, target, selection);
        if items.is_empty() {
            return false;
        }
        debug!("copied {} widgets", items.len());
        self.clipboard = Some(Clipboard {
            items,
            captured_at: SystemTime::now(),
        });
        true
    }

    /// Copies from the context menu target, taking the current selection into account.
    pub fn copy_from_context(&mut self) -> bool {
        let Some(target) = self.context_menu.target.clone() else {
            return false;
        };
        let selection = self.interaction.selected_widgets.clone();
        self.copy(&target, &selection)
    }

    /// Pastes the clipboard so its first widget lands at `anchor` plus the paste nudge.
    ///
    /// The pasted widgets become the selection. Pasting is ignored in play mode.
    ///
    /// # Returns
    ///
    /// Ids of the pasted widgets; empty if the clipboard is empty.
    pub fn paste_at(&mut self, anchor: Pos2) -> Vec<WidgetId> {
        if self.mode != EditorMode::Edit {
            return Vec::new();
        }
        let Some(clipboard) = &self.clipboard else {
            return Vec::new();
        };

        let clones = paste_clones(
            &clipboard.items,
            &self.widgets,
            anchor,
            self.config.paste_offset(),
        );
        if clones.is_empty() {
            return Vec::new();
        }
        let ids: Vec<WidgetId> = clones.iter().map(|w| w.id.clone()).collect();
        debug!("pasting {} widgets at {:?}", ids.len(), anchor);

        self.mutate(|widgets| widgets.extend(clones));
        self.set_selection(&ids);
        ids
    }

    /// Pastes at the position where the context menu was opened.
    ///
    /// The screen position is translated into canvas coordinates and clamped to the visible
    /// part of the canvas.
    pub fn paste_at_context(&mut self) -> Vec<WidgetId> {
        let anchor = self.viewport.screen_to_canvas(self.context_menu.screen_pos);
        self.paste_at(anchor)
    }

    /// Returns true if a copy-set is waiting to be pasted.
    pub fn has_clipboard(&self) -> bool {
        self.clipboard
            .as_ref()
            .is_some_and(|clipboard| !clipboard.items.is_empty())
    }

    /// The current copy-set, if any.
    pub fn clipboard(&self) -> Option<&Clipboard> {
        self.clipboard.as_ref()
    }

    /// Forgets the current copy-set.
    pub fn clear_clipboard(&mut self) {
        self.clipboard = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn widget(id: &str, x: f32, y: f32, z: u32) -> Widget {
        let mut w = Widget::new("tank", Pos2::new(x, y)).with_z(z);
        w.id = WidgetId::from(id);
        w
    }

    #[test]
    fn test_copy_set_single_target() {
        let widgets = vec![widget("a", 0.0, 0.0, 1), widget("b", 5.0, 5.0, 2)];
        let items = copy_set(&widgets, &WidgetId::from("b"), &[]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, WidgetId::from("b"));
    }

    #[test]
    fn test_copy_set_target_outside_selection() {
        let widgets = vec![
            widget("a", 0.0, 0.0, 1),
            widget("b", 5.0, 5.0, 2),
            widget("c", 9.0, 9.0, 3),
        ];
        let selection = vec![WidgetId::from("a"), WidgetId::from("b")];
        let items = copy_set(&widgets, &WidgetId::from("c"), &selection);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, WidgetId::from("c"));
    }

    #[test]
    fn test_copy_set_whole_selection() {
        let widgets = vec![
            widget("a", 0.0, 0.0, 1),
            widget("b", 5.0, 5.0, 2),
            widget("c", 9.0, 9.0, 3),
        ];
        let selection = vec![WidgetId::from("c"), WidgetId::from("a")];
        let items = copy_set(&widgets, &WidgetId::from("a"), &selection);
        let ids: Vec<&str> = items.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn test_copy_set_unknown_target() {
        let widgets = vec![widget("a", 0.0, 0.0, 1)];
        assert!(copy_set(&widgets, &WidgetId::from("zzz"), &[]).is_empty());
    }

    #[test]
    fn test_paste_clones_offsets_and_stacking() {
        let canvas = vec![
            widget("a", 10.0, 20.0, 1),
            widget("b", 40.0, 60.0, 2),
            widget("c", 0.0, 0.0, 3),
        ];
        let items = vec![canvas[0].clone(), canvas[1].clone()];
        let clones = paste_clones(&items, &canvas, Pos2::new(100.0, 100.0), Vec2::new(18.0, 18.0));

        assert_eq!(clones.len(), 2);
        assert_eq!(clones[0].position(), Pos2::new(118.0, 118.0));
        assert_eq!(clones[1].position(), Pos2::new(148.0, 158.0));
        assert_eq!(clones[0].z, Some(4));
        assert_eq!(clones[1].z, Some(5));

        let existing: HashSet<&WidgetId> = canvas.iter().map(|w| &w.id).collect();
        assert!(clones.iter().all(|c| !existing.contains(&c.id)));
        assert_ne!(clones[0].id, clones[1].id);
    }

    #[test]
    fn test_paste_clones_keep_relative_stacking() {
        let canvas = vec![widget("a", 0.0, 0.0, 2), widget("b", 0.0, 0.0, 1)];
        let items = canvas.clone();
        let clones = paste_clones(&items, &canvas, Pos2::ZERO, Vec2::ZERO);
        // "a" was above "b" and stays above it
        assert_eq!(clones[0].z, Some(4));
        assert_eq!(clones[1].z, Some(3));
    }

    #[test]
    fn test_paste_clones_preserve_payload() {
        let source = widget("a", 1.0, 2.0, 1)
            .with_size(64.0, 32.0)
            .with_property("tag", serde_json::json!("LT-200"));
        let clones = paste_clones(&[source.clone()], &[source.clone()], Pos2::ZERO, Vec2::ZERO);

        assert_eq!(clones[0].shape, source.shape);
        assert_eq!(clones[0].w, Some(64.0));
        assert_eq!(clones[0].h, Some(32.0));
        assert_eq!(clones[0].properties, source.properties);
    }

    #[test]
    fn test_paste_clones_onto_unnormalized_canvas_near_limit() {
        let canvas = vec![widget("a", 0.0, 0.0, u32::MAX - 1)];
        let items = vec![widget("b", 0.0, 0.0, 1), widget("c", 0.0, 0.0, 2)];
        let clones = paste_clones(&items, &canvas, Pos2::ZERO, Vec2::ZERO);
        assert_eq!(clones[0].z, Some(u32::MAX));
        assert_eq!(clones[1].z, Some(u32::MAX));
    }

    #[test]
    fn test_paste_clones_empty_set() {
        assert!(paste_clones(&[], &[], Pos2::ZERO, Vec2::ZERO).is_empty());
    }
}
