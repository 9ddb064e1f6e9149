#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::coords::{Point, Size};

/// The `{scale, translate}` pair the host turns into
/// `translate(tx, ty) scale(s)` on the image layer.
///
/// `translate` is in container pixels; `scale` is a factor (1.0 = laid-out size).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub scale: f64,
    pub translate: Point,
}

impl Default for Camera {
    fn default() -> Self {
        Self { scale: 1.0, translate: Point::default() }
    }
}

impl Camera {
    /// Convert a container-relative point to unscaled content coordinates.
    #[must_use]
    pub fn screen_to_content(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.translate.x) / self.scale,
            y: (screen.y - self.translate.y) / self.scale,
        }
    }

    /// Convert an unscaled content point to container-relative coordinates.
    #[must_use]
    pub fn content_to_screen(&self, content: Point) -> Point {
        Point {
            x: content.x * self.scale + self.translate.x,
            y: content.y * self.scale + self.translate.y,
        }
    }

    /// Convert a screen-space distance (pixels) to content-space distance.
    #[must_use]
    pub fn screen_dist_to_content(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Change the scale while keeping the content point under `anchor` fixed.
    ///
    /// `anchor` is container-relative. The content point is resolved with the
    /// current scale/translate, then the translate is solved so the same
    /// point lands back under `anchor` at `new_scale`.
    pub fn zoom_about(&mut self, anchor: Point, new_scale: f64) {
        let content = self.screen_to_content(anchor);
        self.scale = new_scale;
        self.translate = Point::new(anchor.x - content.x * new_scale, anchor.y - content.y * new_scale);
    }

    /// Clamp the translate so scaled content always covers the viewport.
    ///
    /// At `scale <= 1` the translate snaps back to the origin. Above that,
    /// each axis is held in `[container - content * scale, 0]`; an axis whose
    /// scaled content is still narrower than the container pins to 0.
    pub fn constrain(&mut self, container: Size, content: Size) {
        if self.scale <= 1.0 {
            self.translate = Point::default();
            return;
        }
        self.translate.x = clamp_axis(self.translate.x, container.width, content.width * self.scale);
        self.translate.y = clamp_axis(self.translate.y, container.height, content.height * self.scale);
    }

    /// True when the camera is at rest at the identity transform.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        (self.scale - 1.0).abs() < f64::EPSILON && self.translate == Point::default()
    }
}

fn clamp_axis(value: f64, container: f64, scaled_content: f64) -> f64 {
    let lower = (container - scaled_content).min(0.0);
    value.clamp(lower, 0.0)
}
