//! The zoom/pan gesture state machine.
//!
//! `GestureState` owns the camera of one viewport plus the gesture currently
//! being tracked. Wheel events are applied instantly; pointer and touch
//! sequences move through [`GesturePhase`]:
//!
//! ```text
//! Idle ──down──▶ Dragging ──up/leave──▶ Idle
//! Idle ──2 touches──▶ Pinching ──all lifted──▶ Idle
//! Dragging ──2nd finger──▶ Pinching   (pan aborted, nothing carried over)
//! Pinching ──1 finger lifted──▶ Dragging
//! ```
//!
//! A single-pointer sequence that never moved past [`CLICK_THRESHOLD_PX`] is
//! reported as [`Release::Click`]; callers must treat it as a click and
//! never as a pan.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use tracing::{debug, trace};

use crate::camera::Camera;
use crate::consts::CLICK_THRESHOLD_PX;
use crate::coords::{Point, ViewGeometry};
use crate::input::{Touch, WheelInput, two_finger_geometry};
use crate::policy::ViewportPolicy;

/// The gesture being tracked between press and release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GesturePhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Single-pointer pan.
    Dragging {
        /// Client position of the press.
        start: Point,
        /// Most recent client position.
        last: Point,
        /// Translate the pan offsets from. Taken at the press and re-based
        /// after a wheel zoom.
        initial_translate: Point,
    },
    /// Two-finger pinch zoom.
    Pinching {
        /// Finger distance when the pinch began.
        initial_distance: f64,
        /// Scale when the pinch began.
        initial_scale: f64,
        /// Client midpoint when the pinch began. The zoom stays anchored
        /// here even as the live midpoint drifts.
        initial_center: Point,
        /// Translate when the pinch began.
        initial_translate: Point,
    },
}

/// How a pointer sequence ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// Never moved past the click threshold. Carries the last client position.
    Click(Point),
    /// Moved; the sequence was a pan or pinch.
    Drag,
    /// Nothing was being tracked.
    Ignored,
}

/// Result of a move or wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// The host should call `preventDefault` on the native event.
    pub prevent_default: bool,
    /// The camera changed and the view needs re-rendering.
    pub changed: bool,
}

/// Per-viewport camera plus the active gesture.
#[derive(Debug, Clone)]
pub struct GestureState {
    pub camera: Camera,
    pub phase: GesturePhase,
    /// Set once the current sequence moves past the click threshold.
    pub has_moved: bool,
    policy: ViewportPolicy,
}

impl GestureState {
    #[must_use]
    pub fn new(policy: ViewportPolicy) -> Self {
        Self { camera: Camera::default(), phase: GesturePhase::Idle, has_moved: false, policy }
    }

    #[must_use]
    pub fn policy(&self) -> &ViewportPolicy {
        &self.policy
    }

    /// A single-pointer pan is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. })
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        matches!(self.phase, GesturePhase::Pinching { .. })
    }

    /// Back to scale 1 at the origin with no gesture. Called on image load.
    pub fn reset(&mut self) {
        self.camera = Camera::default();
        self.phase = GesturePhase::Idle;
        self.has_moved = false;
    }

    /// Clamp the camera so content covers the viewport.
    pub fn constrain(&mut self, geometry: &ViewGeometry) {
        if !geometry.is_ready() {
            return;
        }
        self.camera.constrain(geometry.container.size(), geometry.content);
    }

    // --- Wheel ---

    /// Zoom one step toward or away from the cursor.
    ///
    /// The content point under the cursor stays under the cursor. The
    /// result is constrained immediately since a wheel step is a complete
    /// gesture on its own.
    pub fn on_wheel(&mut self, wheel: WheelInput, geometry: &ViewGeometry) -> Outcome {
        if !geometry.is_ready() {
            return Outcome::default();
        }
        let mut outcome = Outcome { prevent_default: wheel.cancelable, changed: false };

        let direction = if wheel.delta_y < 0.0 {
            1.0
        } else if wheel.delta_y > 0.0 {
            -1.0
        } else {
            0.0
        };
        let new_scale = self.policy.clamp_scale(self.camera.scale + direction * self.policy.zoom_speed);
        if (new_scale - self.camera.scale).abs() < f64::EPSILON {
            return outcome;
        }

        let anchor = geometry.container.to_local(wheel.client);
        self.camera.zoom_about(anchor, new_scale);
        self.constrain(geometry);
        // A pan in progress continues from the zoomed camera.
        if let GesturePhase::Dragging { start, last, .. } = self.phase {
            let translate = self.camera.translate;
            let initial_translate = Point::new(translate.x - (last.x - start.x), translate.y - (last.y - start.y));
            self.phase = GesturePhase::Dragging { start, last, initial_translate };
        }
        trace!(scale = self.camera.scale, "wheel zoom");
        outcome.changed = true;
        outcome
    }

    // --- Single pointer ---

    /// Begin a pan. Returns false when the image is not ready.
    pub fn on_pointer_down(&mut self, client: Point, geometry: &ViewGeometry) -> bool {
        if !geometry.is_ready() {
            return false;
        }
        self.begin_drag(client, false);
        true
    }

    /// Continue a pan. Movement under the click threshold is ignored.
    pub fn on_pointer_move(&mut self, client: Point, geometry: &ViewGeometry) -> Outcome {
        let GesturePhase::Dragging { start, initial_translate, .. } = self.phase else {
            return Outcome::default();
        };
        self.phase = GesturePhase::Dragging { start, last: client, initial_translate };

        let dx = client.x - start.x;
        let dy = client.y - start.y;
        if !self.has_moved && exceeds_click_threshold(dx, dy) {
            self.has_moved = true;
        }
        if !self.has_moved {
            return Outcome::default();
        }

        self.camera.translate = Point::new(initial_translate.x + dx, initial_translate.y + dy);
        if self.policy.constrains_live() {
            self.constrain(geometry);
        }
        Outcome { prevent_default: true, changed: true }
    }

    /// End a pan at `client`.
    pub fn on_pointer_up(&mut self, client: Point, geometry: &ViewGeometry) -> Release {
        if self.is_dragging() {
            self.on_pointer_move(client, geometry);
        }
        self.finish(geometry)
    }

    /// The pointer left the window. Ends the gesture exactly like a release
    /// at the last known position.
    pub fn on_pointer_leave(&mut self, geometry: &ViewGeometry) -> Release {
        self.finish(geometry)
    }

    // --- Touch ---

    /// Touches were added. `touches` is the full list of active touches.
    pub fn on_touch_start(&mut self, touches: &[Touch], geometry: &ViewGeometry) {
        if !geometry.is_ready() {
            return;
        }
        self.restart_from(touches, geometry, false);
    }

    /// Touches moved. `touches` is the full list of active touches.
    pub fn on_touch_move(&mut self, touches: &[Touch], geometry: &ViewGeometry) -> Outcome {
        match self.phase {
            GesturePhase::Idle => Outcome::default(),
            GesturePhase::Dragging { .. } => match touches.first() {
                Some(touch) if touches.len() == 1 => self.on_pointer_move(touch.client, geometry),
                _ => Outcome::default(),
            },
            GesturePhase::Pinching { initial_distance, initial_scale, initial_center, initial_translate } => {
                let Some((distance, _)) = two_finger_geometry(touches) else {
                    return Outcome::default();
                };
                if initial_distance <= 0.0 {
                    return Outcome::default();
                }
                let new_scale = self.policy.clamp_scale(distance / initial_distance * initial_scale);
                let mut camera = Camera { scale: initial_scale, translate: initial_translate };
                camera.zoom_about(geometry.container.to_local(initial_center), new_scale);
                self.camera = camera;
                if self.policy.constrains_live() {
                    self.constrain(geometry);
                }
                Outcome { prevent_default: true, changed: true }
            }
        }
    }

    /// Touches were lifted. `remaining` is the list still on the surface.
    pub fn on_touch_end(&mut self, remaining: &[Touch], geometry: &ViewGeometry) -> Release {
        if remaining.is_empty() {
            return self.finish(geometry);
        }
        if self.is_pinching() {
            self.constrain(geometry);
        }
        let was_active = self.phase != GesturePhase::Idle || self.has_moved;
        self.restart_from(remaining, geometry, was_active);
        Release::Ignored
    }

    // --- Internals ---

    fn begin_drag(&mut self, client: Point, carried_motion: bool) {
        self.phase = GesturePhase::Dragging { start: client, last: client, initial_translate: self.camera.translate };
        self.has_moved = carried_motion;
        trace!(x = client.x, y = client.y, "drag start");
    }

    /// Re-detect the gesture from the current touch count.
    fn restart_from(&mut self, touches: &[Touch], geometry: &ViewGeometry, carried_motion: bool) {
        match touches {
            [only] => {
                if self.is_dragging() && !carried_motion {
                    return;
                }
                self.begin_drag(only.client, carried_motion);
            }
            [a, b] => {
                let distance = a.client.distance(b.client);
                let center = a.client.midpoint(b.client);
                self.phase = GesturePhase::Pinching {
                    initial_distance: distance,
                    initial_scale: self.camera.scale,
                    initial_center: center,
                    initial_translate: self.camera.translate,
                };
                self.has_moved = true;
                debug!(distance, scale = self.camera.scale, "pinch start");
            }
            _ => {
                if self.phase != GesturePhase::Idle {
                    self.has_moved = true;
                }
                self.phase = GesturePhase::Idle;
                self.constrain(geometry);
            }
        }
    }

    fn finish(&mut self, geometry: &ViewGeometry) -> Release {
        let release = match self.phase {
            GesturePhase::Idle => Release::Ignored,
            GesturePhase::Dragging { last, .. } => {
                if self.has_moved {
                    Release::Drag
                } else {
                    Release::Click(last)
                }
            }
            GesturePhase::Pinching { .. } => Release::Drag,
        };
        self.phase = GesturePhase::Idle;
        self.constrain(geometry);
        trace!(?release, "gesture end");
        release
    }
}

/// True when `(dx, dy)` is far enough from the press to count as a drag.
#[must_use]
pub fn exceeds_click_threshold(dx: f64, dy: f64) -> bool {
    dx.abs() >= CLICK_THRESHOLD_PX || dy.abs() >= CLICK_THRESHOLD_PX
}
