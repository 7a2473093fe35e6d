//! Editor state structures.
//!
//! This module contains the state tracked alongside the canvas model: the gesture state
//! machine, selection, the context menu record, the canvas viewport and the mode/page flags
//! that gate history capture.

use super::clipboard::Clipboard;
use super::history::{Snapshot, UndoHistory};
use crate::config::EditorConfig;
use crate::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_ZOOM};
use crate::types::{Widget, WidgetId};
use egui::{Pos2, Rect, Vec2};

/// Whether the dashboard is being edited or operated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Widgets can be placed, moved, reordered and deleted
    #[default]
    Edit,
    /// Widgets are live controls; the layout is frozen
    Play,
}

/// The page currently shown by the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// The dashboard canvas
    #[default]
    Dashboard,
    /// Customer management
    Customers,
    /// Device management
    Devices,
    /// Image library
    Images,
}

/// Where the editor is in a gesture.
///
/// Anything other than `Idle` suppresses automatic history capture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    /// No gesture in progress
    #[default]
    Idle,
    /// Pointer is down and moving widgets
    Dragging {
        /// Canvas model before the first move of the gesture
        pre_drag: Snapshot,
    },
    /// Pointer released; the after-drag snapshot is taken on the next tick
    Settling {
        /// Canvas model before the first move of the gesture
        pre_drag: Snapshot,
    },
    /// A snapshot is being written back into the model
    Restoring,
}

impl GestureState {
    /// Returns true if no gesture is in progress.
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    /// Returns true while the pointer is moving widgets.
    pub fn is_dragging(&self) -> bool {
        matches!(self, GestureState::Dragging { .. })
    }
}

/// Selection state.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    /// Currently selected widget when exactly one is selected
    pub selected_widget: Option<WidgetId>,
    /// All selected widgets, in the order they were selected
    pub selected_widgets: Vec<WidgetId>,
}

impl InteractionState {
    /// Keeps `selected_widget` in step with `selected_widgets`.
    pub(crate) fn sync_single_selection(&mut self) {
        self.selected_widget = match self.selected_widgets.as_slice() {
            [only] => Some(only.clone()),
            _ => None,
        };
    }
}

/// Right-click context menu record.
#[derive(Debug, Clone, Default)]
pub struct ContextMenuState {
    /// Whether the context menu is currently visible
    pub show: bool,
    /// Screen position where the menu was opened
    pub screen_pos: Pos2,
    /// Widget under the pointer when the menu was opened, if any
    pub target: Option<WidgetId>,
}

/// Placement of the canvas on screen.
///
/// Screen coordinates relate to canvas coordinates by
/// `screen = screen_rect.min + offset + canvas * zoom_factor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasViewport {
    /// Screen rectangle of the canvas element
    pub screen_rect: Rect,
    /// Pan offset in screen space
    pub offset: Vec2,
    /// Current zoom level (1.0 = normal)
    pub zoom_factor: f32,
}

impl Default for CanvasViewport {
    fn default() -> Self {
        Self {
            screen_rect: Rect::from_min_size(
                Pos2::ZERO,
                Vec2::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT),
            ),
            offset: Vec2::ZERO,
            zoom_factor: DEFAULT_ZOOM,
        }
    }
}

impl CanvasViewport {
    fn zoom(&self) -> f32 {
        if self.zoom_factor.is_finite() && self.zoom_factor > 0.0 {
            self.zoom_factor
        } else {
            DEFAULT_ZOOM
        }
    }

    /// The part of the canvas currently visible, in canvas coordinates.
    pub fn visible_bounds(&self) -> Rect {
        let zoom = self.zoom();
        Rect::from_min_size(
            (-self.offset / zoom).to_pos2(),
            self.screen_rect.size() / zoom,
        )
    }

    /// Converts a screen position to canvas coordinates, clamped to the visible canvas.
    ///
    /// # Arguments
    ///
    /// * `screen_pos` - Position in screen space (pixels)
    ///
    /// # Returns
    ///
    /// The corresponding canvas position, never outside [`Self::visible_bounds`].
    pub fn screen_to_canvas(&self, screen_pos: Pos2) -> Pos2 {
        let local = (screen_pos - self.screen_rect.min - self.offset) / self.zoom();
        let bounds = self.visible_bounds();
        local.to_pos2().clamp(bounds.min, bounds.max)
    }

    /// Converts a canvas position to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_pos: Pos2) -> Pos2 {
        self.screen_rect.min + self.offset + canvas_pos.to_vec2() * self.zoom()
    }
}

/// The canvas editing core.
///
/// Owns the canvas model and every piece of state layered over it: the undo/redo timeline,
/// the gesture state machine, the clipboard and the selection. All changes to the model go
/// through one setter, which repairs the stacking order and records history snapshots.
#[derive(Debug, Clone)]
pub struct CanvasEditor {
    /// The canvas model
    pub(super) widgets: Vec<Widget>,
    /// Undo/redo timeline
    pub(super) history: UndoHistory,
    /// Snapshot most recently recorded on the timeline
    pub(super) last_captured: Option<Snapshot>,
    /// Current gesture
    pub(super) gesture: GestureState,
    /// Most recent copy-set
    pub(super) clipboard: Option<Clipboard>,
    /// Edit or play mode
    pub(super) mode: EditorMode,
    /// Page shown by the host
    pub(super) page: Page,
    /// Editor settings
    pub(super) config: EditorConfig,
    /// Selection state
    pub interaction: InteractionState,
    /// Context menu record
    pub context_menu: ContextMenuState,
    /// Canvas placement on screen
    pub viewport: CanvasViewport,
}

impl Default for CanvasEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl CanvasEditor {
    /// Creates an editor with an empty canvas and empty history.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            widgets: Vec::new(),
            history: UndoHistory::new(config.history_capacity),
            last_captured: None,
            gesture: GestureState::Idle,
            clipboard: None,
            mode: EditorMode::Edit,
            page: Page::Dashboard,
            config,
            interaction: InteractionState::default(),
            context_menu: ContextMenuState::default(),
            viewport: CanvasViewport::default(),
        }
    }

    /// The canvas model.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Looks up a widget by id.
    pub fn widget(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| &w.id == id)
    }

    /// The undo/redo timeline.
    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    /// The current gesture.
    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Edit or play mode.
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Page shown by the host.
    pub fn page(&self) -> Page {
        self.page
    }

    /// Editor settings.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Returns true when edits on the canvas are recorded and deletion is allowed.
    pub fn is_editing_dashboard(&self) -> bool {
        self.mode == EditorMode::Edit && self.page == Page::Dashboard
    }

    /// Switches between edit and play mode.
    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
        self.auto_capture();
    }

    /// Records the page shown by the host.
    pub fn set_page(&mut self, page: Page) {
        self.page = page;
        self.auto_capture();
    }
}
