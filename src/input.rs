//! Input model: the minimal event shapes the gesture engine consumes.
//!
//! Hosts translate their native mouse, touch, and wheel events into these
//! types. Only client coordinates and the few flags that change behavior
//! are carried; everything else about the native event is left behind.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::coords::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button; raises the context menu.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// The device that produced a pointer sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// One active touch point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    /// Host-assigned identifier, stable for the lifetime of the touch.
    pub id: i32,
    /// Position in client pixels.
    pub client: Point,
}

impl Touch {
    #[must_use]
    pub fn new(id: i32, x: f64, y: f64) -> Self {
        Self { id, client: Point::new(x, y) }
    }
}

/// Wheel / trackpad scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelInput {
    /// Cursor position in client pixels.
    pub client: Point,
    /// Vertical scroll amount (positive = down, i.e. zoom out).
    pub delta_y: f64,
    /// Whether the host event can still be cancelled.
    #[serde(default = "default_cancelable")]
    pub cancelable: bool,
}

fn default_cancelable() -> bool {
    true
}

/// Distance between the first two touches and their midpoint, in client pixels.
///
/// `None` unless at least two touches are present.
#[must_use]
pub fn two_finger_geometry(touches: &[Touch]) -> Option<(f64, Point)> {
    let [a, b, ..] = touches else {
        return None;
    };
    Some((a.client.distance(b.client), a.client.midpoint(b.client)))
}
