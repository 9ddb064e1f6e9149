//! Shared numeric constants for the route engine.

// ── Gestures ────────────────────────────────────────────────────

/// Movement in either axis, in pixels, that turns a press into a drag.
/// Anything below this is a click. Not user-tunable.
pub const CLICK_THRESHOLD_PX: f64 = 5.0;

/// Additive scale change applied per wheel notch.
pub const ZOOM_SPEED: f64 = 0.15;

/// Lowest scale; content never shrinks below its laid-out size.
pub const MIN_SCALE: f64 = 1.0;

/// Highest scale reachable by wheel or pinch.
pub const MAX_SCALE: f64 = 5.0;

// ── Long press ──────────────────────────────────────────────────

/// Hold time before a long press on a handle deletes its point.
pub const LONG_PRESS_MS: f64 = 600.0;

/// Movement that cancels a pending long press.
pub const LONG_PRESS_SLOP_PX: f64 = 10.0;

// ── Virtual coordinate space ────────────────────────────────────

/// Width of the fixed virtual viewBox routes are drawn into.
/// Height is `VIRTUAL_WIDTH / aspect_ratio`.
pub const VIRTUAL_WIDTH: f64 = 1000.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Hit-stroke width for unselected routes in the viewer, in virtual units.
pub const VIEWER_HIT_WIDTH: f64 = 12.0;

/// Hit-stroke width for unselected routes in the editor, in virtual units.
pub const EDITOR_HIT_WIDTH: f64 = 20.0;

/// Multiplier applied to the hit-stroke width of the selected route.
pub const SELECTED_HIT_RATIO: f64 = 2.4;

/// Screen-space grab radius of an edit handle, in pixels.
pub const HANDLE_RADIUS_PX: f64 = 12.0;

// ── Styling ─────────────────────────────────────────────────────

/// Visible stroke width in the viewer, in virtual units.
pub const VIEWER_STROKE_WIDTH: f64 = 4.0;

/// Visible stroke width in the editor, in virtual units.
pub const EDITOR_STROKE_WIDTH: f64 = 5.0;

/// Stroke color used when a route carries none.
pub const DEFAULT_ROUTE_COLOR: &str = "#E4572E";
