//! The canvas editing core.
//!
//! This module contains the editor controller and the components it coordinates.
//!
//! # Module Organization
//!
//! - `state` - Gesture state machine, selection, context menu, viewport and the `CanvasEditor`
//! - `history` - Bounded undo/redo timeline over canvas snapshots
//! - `zorder` - Dense stacking order, bring-to-front and send-to-back
//! - `store` - The canvas model setter and add/move/delete/update entry points
//! - `drag` - Coalescing of drag gestures into one history entry
//! - `clipboard` - Copy-set capture and anchored paste

mod clipboard;
mod drag;
pub mod history;
mod state;
mod store;
pub mod zorder;

pub use clipboard::{copy_set, paste_clones, Clipboard};
pub use history::{Snapshot, UndoHistory};
pub use state::{
    CanvasEditor, CanvasViewport, ContextMenuState, EditorMode, GestureState, InteractionState,
    Page,
};

use crate::types::Widget;
use log::debug;

impl CanvasEditor {
    /// Records a snapshot on the timeline and remembers it as the last captured state.
    ///
    /// # Arguments
    ///
    /// * `widgets` - The canvas model to record
    pub fn push_snapshot(&mut self, widgets: &[Widget]) {
        self.history.push(widgets);
        self.last_captured = Some(widgets.to_vec());
    }

    /// Clears the timeline and makes `widgets` the new baseline.
    ///
    /// Called after an explicit save, a restore from the backend, or when switching to a
    /// different dashboard. Undo never crosses this baseline, even when it is empty.
    pub fn hard_reset_history(&mut self, widgets: &[Widget]) {
        debug!("history reset with {} widgets as baseline", widgets.len());
        self.history.reset();
        self.push_snapshot(widgets);
    }

    /// Returns true if an earlier snapshot is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns true if a later snapshot is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restores the previous snapshot.
    ///
    /// # Returns
    ///
    /// `false` (and nothing changes) if there is nothing to undo or a gesture is in progress.
    pub fn undo(&mut self) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }
        match self.history.undo() {
            Some(snapshot) => {
                debug!("undo to entry {:?}", self.history.pointer());
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Re-applies the next snapshot.
    ///
    /// # Returns
    ///
    /// `false` (and nothing changes) if there is nothing to redo or a gesture is in progress.
    pub fn redo(&mut self) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }
        match self.history.redo() {
            Some(snapshot) => {
                debug!("redo to entry {:?}", self.history.pointer());
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Replaces the whole canvas with a freshly loaded layout and makes it the history baseline.
    pub fn load_layout(&mut self, widgets: Vec<Widget>) {
        self.restore(widgets);
        let baseline = self.widgets.clone();
        self.hard_reset_history(&baseline);
        self.clear_selection();
    }

    /// Writes a snapshot back into the model without recording it again.
    fn restore(&mut self, snapshot: Snapshot) {
        self.gesture = GestureState::Restoring;
        self.set_widgets(snapshot);
        self.gesture = GestureState::Idle;
        self.last_captured = Some(self.widgets.clone());
        self.prune_selection();
    }

    /// Records the canvas model if it changed since the last capture.
    ///
    /// Capture only happens while editing the dashboard page with no gesture in progress.
    /// An empty canvas never seeds an empty timeline, so "blank" cannot become the undo floor
    /// by accident.
    pub(crate) fn auto_capture(&mut self) {
        if !self.is_editing_dashboard() || !self.gesture.is_idle() {
            return;
        }
        if self.last_captured.as_deref() == Some(self.widgets.as_slice()) {
            return;
        }
        if self.history.is_empty() && self.widgets.is_empty() {
            return;
        }
        let widgets = self.widgets.clone();
        self.push_snapshot(&widgets);
    }
}
