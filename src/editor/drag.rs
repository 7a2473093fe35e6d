//! Drag gesture coalescing.
//!
//! A drag produces many pointer-move events but must land on the timeline as at most two
//! entries: the state before the first move and the state after release. Auto-capture is
//! suppressed for the whole gesture by the `Dragging`/`Settling` gesture states, which are
//! entered in the same call that starts the gesture.

use super::state::{CanvasEditor, EditorMode, GestureState};
use crate::types::WidgetId;
use egui::{Pos2, Vec2};
use log::debug;

impl CanvasEditor {
    /// Starts a drag gesture (the first pointer move after pointer-down).
    ///
    /// Suppresses auto-capture and records the pre-drag state unless it is already the last
    /// captured snapshot. Does nothing while a gesture is already in progress; a gesture
    /// still settling from a previous release is finished first.
    pub fn on_drag_move_begin(&mut self) {
        if matches!(self.gesture, GestureState::Settling { .. }) {
            self.tick();
        }
        if !self.gesture.is_idle() {
            return;
        }

        let pre_drag = self.widgets.clone();
        self.gesture = GestureState::Dragging {
            pre_drag: pre_drag.clone(),
        };
        if self.is_editing_dashboard() && self.last_captured.as_ref() != Some(&pre_drag) {
            self.push_snapshot(&pre_drag);
        }
        debug!("drag started with {} widgets on canvas", pre_drag.len());
    }

    /// Moves the dragged widget (and the rest of its multi-selection) by `delta`.
    ///
    /// Starts the gesture implicitly if needed. When `id` belongs to a selection of more than
    /// one widget, every selected widget moves by the same delta; otherwise only `id` moves.
    ///
    /// # Arguments
    ///
    /// * `id` - The widget under the pointer
    /// * `delta` - Pointer movement in canvas units since the previous move event
    ///
    /// # Returns
    ///
    /// `false` if nothing moved (unknown id, or the editor is in play mode).
    pub fn drag_move(&mut self, id: &WidgetId, delta: Vec2) -> bool {
        if self.mode != EditorMode::Edit || self.widget(id).is_none() {
            return false;
        }
        if !self.gesture.is_dragging() {
            self.on_drag_move_begin();
        }
        if !self.gesture.is_dragging() {
            return false;
        }

        let selection = &self.interaction.selected_widgets;
        let moving: Vec<WidgetId> = if selection.len() > 1 && selection.contains(id) {
            selection.clone()
        } else {
            vec![id.clone()]
        };

        self.mutate(|widgets| {
            for widget in widgets.iter_mut().filter(|w| moving.contains(&w.id)) {
                widget.translate(delta);
            }
        });
        true
    }

    /// Drags a widget so its top-left corner ends up at `position`.
    ///
    /// Selected companions move by the same amount.
    pub fn drag_to(&mut self, id: &WidgetId, position: Pos2) -> bool {
        match self.widget(id).map(|w| w.position()) {
            Some(current) => self.drag_move(id, position - current),
            None => false,
        }
    }

    /// Ends the drag gesture (pointer-up).
    ///
    /// The after-drag snapshot is taken on the next [`CanvasEditor::tick`], once the final
    /// positions have settled.
    pub fn on_drag_end_commit(&mut self) {
        self.gesture = match std::mem::take(&mut self.gesture) {
            GestureState::Dragging { pre_drag } => GestureState::Settling { pre_drag },
            other => other,
        };
    }

    /// Runs the deferred turn of the event loop.
    ///
    /// Finishes a released drag: auto-capture is enabled again and the final state is
    /// recorded if it differs from the pre-drag state.
    pub fn tick(&mut self) {
        let pre_drag = match std::mem::take(&mut self.gesture) {
            GestureState::Settling { pre_drag } => pre_drag,
            other => {
                self.gesture = other;
                return;
            }
        };

        if self.widgets != pre_drag && self.is_editing_dashboard() {
            let widgets = self.widgets.clone();
            self.push_snapshot(&widgets);
            debug!("drag committed");
        } else {
            debug!("drag ended without movement");
        }
    }

    /// Abandons the drag gesture (escape or pointer-cancel).
    ///
    /// Widgets return to their pre-drag positions, nothing is recorded, and auto-capture is
    /// enabled again.
    ///
    /// # Returns
    ///
    /// `false` if no drag was in progress.
    pub fn cancel_drag(&mut self) -> bool {
        let pre_drag = match std::mem::take(&mut self.gesture) {
            GestureState::Dragging { pre_drag } | GestureState::Settling { pre_drag } => pre_drag,
            other => {
                self.gesture = other;
                return false;
            }
        };

        self.gesture = GestureState::Restoring;
        self.set_widgets(pre_drag);
        self.gesture = GestureState::Idle;
        debug!("drag cancelled");
        true
    }

    /// Returns true while the pointer is moving widgets.
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }
}
