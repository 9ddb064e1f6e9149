//! Viewer and editor behavior presets.
//!
//! Both screens run the same gesture primitives; they differ only in the
//! numbers and in how eagerly the transform is pulled back inside the
//! viewport. The policy is fixed when a [`crate::viewport::Viewport`] is
//! built and never re-checked per event.

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    EDITOR_HIT_WIDTH, EDITOR_STROKE_WIDTH, LONG_PRESS_MS, LONG_PRESS_SLOP_PX, MAX_SCALE, MIN_SCALE,
    SELECTED_HIT_RATIO, VIEWER_HIT_WIDTH, VIEWER_STROKE_WIDTH, ZOOM_SPEED,
};

/// Which screen a viewport serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Inspection: routes are selected but never edited.
    Viewer,
    /// Drawing: the selected route's points can be added, dragged, and removed.
    Editor,
}

/// When the translate is clamped back inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstrainMode {
    /// After every incremental move as well as at the end of each gesture.
    Always,
    /// Only when a gesture completes.
    OnRelease,
}

/// Tunables for one viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportPolicy {
    pub mode: Mode,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Additive scale change per wheel notch.
    pub zoom_speed: f64,
    pub constrain: ConstrainMode,
    /// Hit-stroke width for unselected routes, in virtual units.
    pub hit_width: f64,
    /// Visible stroke width, in virtual units.
    pub stroke_width: f64,
    /// Long-press hold time before a handle's point is deleted.
    pub long_press_ms: f64,
    /// Movement that cancels a pending long press.
    pub long_press_slop_px: f64,
}

impl ViewportPolicy {
    /// Inspection preset: thinner hit areas, constrained on release.
    #[must_use]
    pub fn viewer() -> Self {
        Self {
            mode: Mode::Viewer,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_speed: ZOOM_SPEED,
            constrain: ConstrainMode::OnRelease,
            hit_width: VIEWER_HIT_WIDTH,
            stroke_width: VIEWER_STROKE_WIDTH,
            long_press_ms: LONG_PRESS_MS,
            long_press_slop_px: LONG_PRESS_SLOP_PX,
        }
    }

    /// Drawing preset: wider hit areas, constrained on every move.
    #[must_use]
    pub fn editor() -> Self {
        Self {
            mode: Mode::Editor,
            constrain: ConstrainMode::Always,
            hit_width: EDITOR_HIT_WIDTH,
            stroke_width: EDITOR_STROKE_WIDTH,
            ..Self::viewer()
        }
    }

    #[must_use]
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Viewer => Self::viewer(),
            Mode::Editor => Self::editor(),
        }
    }

    /// Clamp a requested scale into `[min_scale, max_scale]`.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min_scale;
        }
        scale.clamp(self.min_scale, self.max_scale.max(self.min_scale))
    }

    /// Hit-stroke width for a route, widened when it is selected.
    #[must_use]
    pub fn hit_stroke_width(&self, selected: bool) -> f64 {
        if selected { self.hit_width * SELECTED_HIT_RATIO } else { self.hit_width }
    }

    #[must_use]
    pub fn constrains_live(&self) -> bool {
        self.constrain == ConstrainMode::Always
    }

    #[must_use]
    pub fn is_editor(&self) -> bool {
        self.mode == Mode::Editor
    }
}
