//! Coordinate spaces and the conversions between them.
//!
//! Three spaces are in play:
//!
//! - **client**: raw pointer coordinates as reported by the host (page pixels).
//! - **container**: client minus the container's top-left corner.
//! - **normalized**: a fraction of the laid-out image, `[0, 1]` on both axes,
//!   independent of zoom and display size.
//!
//! Rendering uses a fourth, fixed **virtual** space (a `VIRTUAL_WIDTH`-wide
//! viewBox whose height follows the image aspect ratio) so stored routes draw
//! identically on every screen.

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::consts::VIRTUAL_WIDTH;

/// A point in client, container, or virtual pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, negative, or not finite.
    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    /// Width divided by height; `None` for empty sizes.
    #[must_use]
    pub fn aspect_ratio(self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.width / self.height)
    }
}

/// A bounding rectangle in client pixels, as returned by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    #[must_use]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Convert a client point into container-relative pixels.
    #[must_use]
    pub fn to_local(self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }
}

/// A point expressed as a fraction of the image. Always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Point", into = "Point")]
pub struct NormalizedPoint {
    x: f64,
    y: f64,
}

impl NormalizedPoint {
    /// Build a point, clamping both axes into `[0, 1]`. NaN collapses to 0.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x: clamp_unit(x), y: clamp_unit(y) }
    }

    #[must_use]
    pub fn x(self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn y(self) -> f64 {
        self.y
    }
}

impl From<Point> for NormalizedPoint {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<NormalizedPoint> for Point {
    fn from(p: NormalizedPoint) -> Self {
        Point::new(p.x, p.y)
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Everything needed to interpret a pointer position: where the container
/// sits on the page and how large the image is laid out inside it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewGeometry {
    /// Container bounding rectangle in client pixels.
    pub container: Rect,
    /// Laid-out image size at scale 1, in container pixels.
    pub content: Size,
    /// The image's natural pixel size.
    pub natural: Size,
}

impl ViewGeometry {
    /// Fit the natural image size inside the container, preserving aspect ratio.
    #[must_use]
    pub fn new(container: Rect, natural: Size) -> Self {
        Self { container, content: fit_within(natural, container.size()), natural }
    }

    /// True once both the container and the image have non-zero size.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.container.size().is_empty() && !self.content.is_empty()
    }

    /// Size of the virtual viewBox for this image.
    #[must_use]
    pub fn virtual_size(&self) -> Size {
        virtual_size(self.natural)
    }
}

/// Largest size with `natural`'s aspect ratio that fits inside `bounds`.
#[must_use]
pub fn fit_within(natural: Size, bounds: Size) -> Size {
    if natural.is_empty() || bounds.is_empty() {
        return Size::default();
    }
    let k = (bounds.width / natural.width).min(bounds.height / natural.height);
    Size::new(natural.width * k, natural.height * k)
}

/// Size of the virtual viewBox: `VIRTUAL_WIDTH` wide, height from the aspect ratio.
#[must_use]
pub fn virtual_size(natural: Size) -> Size {
    match natural.aspect_ratio() {
        Some(aspect) => Size::new(VIRTUAL_WIDTH, VIRTUAL_WIDTH / aspect),
        None => Size::default(),
    }
}

/// Map a client point to normalized image space.
///
/// Undoes the container offset, then the translate, then the scale, and
/// divides by the laid-out content size. Returns `None` when the camera
/// scale or the content size is zero.
#[must_use]
pub fn to_normalized(client: Point, container: Rect, camera: &Camera, content: Size) -> Option<NormalizedPoint> {
    if content.is_empty() || camera.scale <= 0.0 {
        return None;
    }
    let local = container.to_local(client);
    let on_content = camera.screen_to_content(local);
    Some(NormalizedPoint::new(on_content.x / content.width, on_content.y / content.height))
}

/// Map a normalized point to container-relative pixels under `camera`.
/// Inverse of [`to_normalized`] for points inside the image.
#[must_use]
pub fn normalized_to_container(point: NormalizedPoint, camera: &Camera, content: Size) -> Point {
    camera.content_to_screen(Point::new(point.x * content.width, point.y * content.height))
}

/// Map a normalized point into the virtual viewBox.
#[must_use]
pub fn from_normalized(point: NormalizedPoint, virtual_size: Size) -> Point {
    Point::new(point.x * virtual_size.width, point.y * virtual_size.height)
}

/// Map a virtual viewBox point back to normalized space. `None` for an empty box.
#[must_use]
pub fn virtual_to_normalized(point: Point, virtual_size: Size) -> Option<NormalizedPoint> {
    if virtual_size.is_empty() {
        return None;
    }
    Some(NormalizedPoint::new(point.x / virtual_size.width, point.y / virtual_size.height))
}
