//! Long-press timer for deleting a point on touch screens.
//!
//! There is no background timer: the host passes timestamps in and polls.
//! The press fires once the hold time elapses, unless the pointer travelled
//! beyond the slop first or was released first. Whichever happens first wins.

#[cfg(test)]
#[path = "long_press_test.rs"]
mod long_press_test;

use crate::coords::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Armed {
    started_ms: f64,
    origin: Point,
}

/// A single pending long press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongPress {
    hold_ms: f64,
    slop_px: f64,
    armed: Option<Armed>,
}

impl LongPress {
    #[must_use]
    pub fn new(hold_ms: f64, slop_px: f64) -> Self {
        Self { hold_ms, slop_px, armed: None }
    }

    /// Start timing a press at `origin`. Replaces any pending press.
    pub fn arm(&mut self, now_ms: f64, origin: Point) {
        self.armed = Some(Armed { started_ms: now_ms, origin });
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Track movement; cancels the press once it strays past the slop.
    /// Returns true if this call cancelled it.
    pub fn on_move(&mut self, client: Point) -> bool {
        let Some(armed) = self.armed else {
            return false;
        };
        let dx = (client.x - armed.origin.x).abs();
        let dy = (client.y - armed.origin.y).abs();
        if dx > self.slop_px || dy > self.slop_px {
            self.armed = None;
            return true;
        }
        false
    }

    /// Drop the pending press.
    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// Fire if the hold time has elapsed. Firing disarms the timer.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.armed {
            Some(armed) if now_ms - armed.started_ms >= self.hold_ms => {
                self.armed = None;
                true
            }
            _ => false,
        }
    }
}
