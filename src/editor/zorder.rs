//! Stacking order for canvas widgets.
//!
//! The canvas model is an unordered list; the `z` field is the sole authority on paint
//! order. Every function here leaves the list dense: with `N` widgets, the stacking
//! indices are exactly `1..=N`, each used once.

use crate::constants::FALLBACK_Z;
use crate::types::{Widget, WidgetId};

/// Returns the stacking index of a widget, or `1` when it has not been placed yet.
pub fn get_z(widget: &Widget) -> u32 {
    widget.z.filter(|z| *z >= 1).unwrap_or(FALLBACK_Z)
}

/// Returns the highest stacking index on the canvas, or `0` for an empty canvas.
pub fn max_z(widgets: &[Widget]) -> u32 {
    widgets.iter().map(get_z).max().unwrap_or(0)
}

/// Returns true if any widget is unplaced or the indices are not exactly `1..=N`.
pub fn needs_normalize(widgets: &[Widget]) -> bool {
    let mut seen = vec![false; widgets.len()];
    for widget in widgets {
        match widget.z {
            Some(z) if z >= 1 && (z as usize) <= widgets.len() && !seen[z as usize - 1] => {
                seen[z as usize - 1] = true;
            }
            _ => return true,
        }
    }
    false
}

/// Repairs the stacking order in place.
///
/// Unplaced widgets receive the next index after the largest one seen so far in the walk,
/// so they land above everything before them. The resolved indices are then ranked into
/// `1..=N`, keeping their relative order (ties go to the earlier array entry).
///
/// Calling this on an already dense list changes nothing.
pub fn normalize(widgets: &mut [Widget]) {
    let mut counter = 0u32;
    let mut resolved: Vec<(u32, usize)> = Vec::with_capacity(widgets.len());
    for (index, widget) in widgets.iter().enumerate() {
        let z = match widget.z {
            Some(z) if z >= 1 => z,
            _ => counter.saturating_add(1),
        };
        counter = counter.max(z);
        resolved.push((z, index));
    }

    resolved.sort_unstable();
    for (rank, (_, index)) in resolved.into_iter().enumerate() {
        widgets[index].z = Some(rank as u32 + 1);
    }
}

/// Closes the gaps left by removed widgets.
pub fn compact(widgets: &mut [Widget]) {
    if needs_normalize(widgets) {
        normalize(widgets);
    }
}

/// Moves a widget to the top of the stack.
///
/// Widgets that were above it move down by one, so no index is duplicated or skipped.
///
/// # Arguments
///
/// * `widgets` - The canvas model (repaired first if it is not dense)
/// * `id` - The widget to raise
///
/// # Returns
///
/// `true` if the widget changed place; `false` for unknown ids or a widget already on top.
pub fn bring_to_front(widgets: &mut [Widget], id: &WidgetId) -> bool {
    let Some(target) = widgets.iter().position(|w| &w.id == id) else {
        return false;
    };
    compact(widgets);
    let old_z = get_z(&widgets[target]);
    let top = max_z(widgets);
    if old_z == top {
        return false;
    }

    for (index, widget) in widgets.iter_mut().enumerate() {
        if index == target {
            widget.z = Some(top);
        } else {
            let z = get_z(widget);
            if z > old_z {
                widget.z = Some(z - 1);
            }
        }
    }
    true
}

/// Moves a widget to the bottom of the stack.
///
/// Widgets that were below it move up by one.
///
/// # Returns
///
/// `true` if the widget changed place; `false` for unknown ids or a widget already at the bottom.
pub fn send_to_back(widgets: &mut [Widget], id: &WidgetId) -> bool {
    let Some(target) = widgets.iter().position(|w| &w.id == id) else {
        return false;
    };
    compact(widgets);
    let old_z = get_z(&widgets[target]);
    if old_z == 1 {
        return false;
    }

    for (index, widget) in widgets.iter_mut().enumerate() {
        if index == target {
            widget.z = Some(1);
        } else {
            let z = get_z(widget);
            if z < old_z {
                widget.z = Some(z + 1);
            }
        }
    }
    true
}
