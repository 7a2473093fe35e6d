//! Shared editor-wide constants.
//! Centralizes tweakable values used by the history, paste and drag logic.

// Undo/redo
/// Number of canvas snapshots retained by the undo/redo timeline.
pub const DEFAULT_HISTORY_CAPACITY: usize = 6;

// Clipboard
/// Horizontal nudge (in canvas units) applied to pasted widgets so copies pasted in place
/// stay distinguishable from their originals.
pub const PASTE_OFFSET_X: f32 = 18.0;
/// Vertical nudge (in canvas units) applied to pasted widgets.
pub const PASTE_OFFSET_Y: f32 = 18.0;

// Stacking
/// Stacking index reported for widgets that have not been placed yet.
pub const FALLBACK_Z: u32 = 1;

// Viewport
/// Default zoom factor of the canvas viewport (1.0 = one canvas unit per screen pixel).
pub const DEFAULT_ZOOM: f32 = 1.0;
/// Canvas width (in screen pixels) assumed until the host reports the real canvas rectangle.
pub const DEFAULT_CANVAS_WIDTH: f32 = 1280.0;
/// Canvas height (in screen pixels) assumed until the host reports the real canvas rectangle.
pub const DEFAULT_CANVAS_HEIGHT: f32 = 720.0;
