//! The canvas model store.
//!
//! Every change to the widget list goes through [`CanvasEditor::set_widgets`] or the
//! private `mutate` helper, so stacking repair and history capture happen in one place.

use super::state::CanvasEditor;
use super::zorder;
use crate::types::{Widget, WidgetId};
use egui::Pos2;
use log::{debug, warn};
use serde_json::{Map, Value};

impl CanvasEditor {
    /// Replaces the canvas model.
    ///
    /// The stacking order is repaired if needed and the new state is captured on the
    /// timeline when capture is active.
    pub fn set_widgets(&mut self, widgets: Vec<Widget>) {
        self.mutate(|current| *current = widgets);
    }

    /// Applies `f` to the canvas model, then repairs stacking and runs auto-capture.
    pub(super) fn mutate<R>(&mut self, f: impl FnOnce(&mut Vec<Widget>) -> R) -> R {
        let result = f(&mut self.widgets);
        if zorder::needs_normalize(&self.widgets) {
            debug!("repairing stacking order of {} widgets", self.widgets.len());
            zorder::normalize(&mut self.widgets);
        }
        self.auto_capture();
        result
    }

    /// Places a new widget on top of the stack (the drop action).
    ///
    /// # Arguments
    ///
    /// * `widget` - The widget to add. Its id is replaced if it collides with an existing one.
    ///
    /// # Returns
    ///
    /// The id under which the widget was added.
    pub fn add_widget(&mut self, mut widget: Widget) -> WidgetId {
        if self.widget(&widget.id).is_some() {
            warn!("widget id {} already on canvas, assigning a new one", widget.id);
            widget.id = fresh_id(&self.widgets);
        }
        let id = widget.id.clone();
        self.mutate(|widgets| {
            widget.z = Some(zorder::max_z(widgets) + 1);
            widgets.push(widget);
        });
        id
    }

    /// Moves a widget's top-left corner to `position`.
    ///
    /// # Returns
    ///
    /// `false` if no widget has that id.
    pub fn move_widget(&mut self, id: &WidgetId, position: Pos2) -> bool {
        self.update_widget(id, |widget| widget.set_position(position))
    }

    /// Changes a widget's size.
    pub fn resize_widget(&mut self, id: &WidgetId, w: f32, h: f32) -> bool {
        self.update_widget(id, |widget| {
            widget.w = Some(w);
            widget.h = Some(h);
        })
    }

    /// Replaces a widget's properties (the settings-save action).
    pub fn update_properties(&mut self, id: &WidgetId, properties: Map<String, Value>) -> bool {
        self.update_widget(id, |widget| widget.properties = properties)
    }

    /// Applies `f` to one widget in place. Id and shape are restored if `f` touched them.
    pub fn update_widget(&mut self, id: &WidgetId, f: impl FnOnce(&mut Widget)) -> bool {
        if self.widget(id).is_none() {
            return false;
        }
        self.mutate(|widgets| {
            if let Some(widget) = widgets.iter_mut().find(|w| &w.id == id) {
                let shape = widget.shape.clone();
                f(widget);
                widget.id = id.clone();
                widget.shape = shape;
            }
        });
        true
    }

    /// Removes a widget from the canvas.
    ///
    /// Only allowed while editing the dashboard page. The stacking order is compacted and the
    /// widget leaves the selection.
    ///
    /// # Returns
    ///
    /// `true` if the widget was removed.
    pub fn delete_widget(&mut self, id: &WidgetId) -> bool {
        self.delete_widgets(std::slice::from_ref(id)) == 1
    }

    /// Removes every selected widget.
    ///
    /// # Returns
    ///
    /// The number of widgets removed.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.interaction.selected_widgets.clone();
        self.delete_widgets(&ids)
    }

    fn delete_widgets(&mut self, ids: &[WidgetId]) -> usize {
        if !self.is_editing_dashboard() || !self.gesture.is_idle() {
            return 0;
        }
        if !self.widgets.iter().any(|w| ids.contains(&w.id)) {
            return 0;
        }
        let removed = self.mutate(|widgets| {
            let before = widgets.len();
            widgets.retain(|w| !ids.contains(&w.id));
            zorder::compact(widgets);
            before - widgets.len()
        });
        debug!("deleted {removed} widgets");
        self.prune_selection();
        removed
    }

    /// Repairs the stacking order of the canvas model.
    pub fn normalize(&mut self) {
        self.mutate(|widgets| zorder::normalize(widgets));
    }

    /// Stacking index of a widget, if it exists.
    pub fn get_z(&self, id: &WidgetId) -> Option<u32> {
        self.widget(id).map(zorder::get_z)
    }

    /// Raises a widget above all others.
    ///
    /// # Returns
    ///
    /// `false` for unknown ids or a widget already on top.
    pub fn bring_to_front(&mut self, id: &WidgetId) -> bool {
        self.mutate(|widgets| zorder::bring_to_front(widgets, id))
    }

    /// Lowers a widget below all others.
    ///
    /// # Returns
    ///
    /// `false` for unknown ids or a widget already at the bottom.
    pub fn send_to_back(&mut self, id: &WidgetId) -> bool {
        self.mutate(|widgets| zorder::send_to_back(widgets, id))
    }

    /// Selects exactly one widget. Unknown ids are ignored.
    pub fn select(&mut self, id: &WidgetId) {
        if self.widget(id).is_none() {
            return;
        }
        self.interaction.selected_widgets = vec![id.clone()];
        self.interaction.sync_single_selection();
    }

    /// Adds a widget to the selection, or removes it if already selected.
    pub fn toggle_selection(&mut self, id: &WidgetId) {
        let selected = &mut self.interaction.selected_widgets;
        if let Some(pos) = selected.iter().position(|s| s == id) {
            selected.remove(pos);
        } else if self.widgets.iter().any(|w| &w.id == id) {
            selected.push(id.clone());
        }
        self.interaction.sync_single_selection();
    }

    /// Replaces the selection. Unknown and repeated ids are dropped.
    pub fn set_selection(&mut self, ids: &[WidgetId]) {
        let mut selected: Vec<WidgetId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !selected.contains(id) && self.widget(id).is_some() {
                selected.push(id.clone());
            }
        }
        self.interaction.selected_widgets = selected;
        self.interaction.sync_single_selection();
    }

    /// Empties the selection.
    pub fn clear_selection(&mut self) {
        self.interaction.selected_widgets.clear();
        self.interaction.sync_single_selection();
    }

    /// The selected widget ids, in selection order.
    pub fn selection(&self) -> &[WidgetId] {
        &self.interaction.selected_widgets
    }

    /// The selected widget when exactly one is selected.
    pub fn selected_widget(&self) -> Option<&WidgetId> {
        self.interaction.selected_widget.as_ref()
    }

    /// Drops selected ids that are no longer on the canvas.
    pub(super) fn prune_selection(&mut self) {
        let widgets = &self.widgets;
        self.interaction
            .selected_widgets
            .retain(|id| widgets.iter().any(|w| &w.id == id));
        self.interaction.sync_single_selection();
    }

    /// Records where the context menu was opened and which widget it targets.
    pub fn open_context_menu(&mut self, screen_pos: Pos2, target: Option<WidgetId>) {
        self.context_menu.show = true;
        self.context_menu.screen_pos = screen_pos;
        self.context_menu.target = target;
    }

    /// Hides the context menu. Its position and target are kept for a later paste.
    pub fn close_context_menu(&mut self) {
        self.context_menu.show = false;
    }
}

/// Generates an id not used by any widget in `widgets`.
pub(super) fn fresh_id(widgets: &[Widget]) -> WidgetId {
    loop {
        let id = WidgetId::new();
        if !widgets.iter().any(|w| w.id == id) {
            return id;
        }
    }
}
