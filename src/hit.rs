//! Z-order and hit-testing among overlapping routes.
//!
//! Routes paint and hit-test in the same order: ascending priority (plain,
//! hovered, selected), ties broken by display number. Hit-testing walks
//! that order backwards so whatever is drawn on top wins the click.
//! All geometry here is in virtual viewBox units.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::coords::{Point, Size, from_normalized};
use crate::path::{PathStore, RouteId, RoutePath};
use crate::policy::ViewportPolicy;
use crate::selection::SelectionState;

/// Which part of a route was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The route's (widened) hit stroke.
    Stroke,
    /// The edit handle of the point at this index.
    Handle(usize),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub route_id: RouteId,
    pub part: HitPart,
}

/// Paint/interaction priority: 2 selected, 1 hovered, 0 otherwise.
#[must_use]
pub fn priority(id: &RouteId, selection: &SelectionState) -> u8 {
    if selection.is_selected(id) {
        2
    } else if selection.is_hovered(id) {
        1
    } else {
        0
    }
}

/// Drawable routes in paint order, bottom first.
#[must_use]
pub fn z_order<'a>(paths: &'a PathStore, selection: &SelectionState) -> Vec<&'a RoutePath> {
    let mut routes: Vec<&RoutePath> = paths.sorted_routes().into_iter().filter(|r| r.is_drawable()).collect();
    routes.sort_by_key(|r| priority(&r.id, selection));
    routes
}

/// Route vertices projected into the virtual viewBox.
#[must_use]
pub fn virtual_points(route: &RoutePath, virtual_size: Size) -> Vec<Point> {
    route.points.iter().map(|p| from_normalized(*p, virtual_size)).collect()
}

/// Find the topmost route or edit handle under `pt`.
///
/// When `handle_radius` is given (edit mode), handles of the selected route
/// are checked before any stroke. The radius is in virtual units.
#[must_use]
pub fn hit_test(
    pt: Point,
    paths: &PathStore,
    selection: &SelectionState,
    policy: &ViewportPolicy,
    virtual_size: Size,
    handle_radius: Option<f64>,
) -> Option<Hit> {
    if virtual_size.is_empty() {
        return None;
    }

    if let Some(radius) = handle_radius {
        let selected = selection.selected_id.and_then(|id| paths.get(&id));
        if let Some(route) = selected {
            if let Some(index) = hit_handle(pt, route, virtual_size, radius) {
                return Some(Hit { route_id: route.id, part: HitPart::Handle(index) });
            }
        }
    }

    z_order(paths, selection)
        .into_iter()
        .rev()
        .find(|route| {
            let half_width = policy.hit_stroke_width(selection.is_selected(&route.id)) * 0.5;
            distance_to_polyline(pt, &virtual_points(route, virtual_size)) <= half_width
        })
        .map(|route| Hit { route_id: route.id, part: HitPart::Stroke })
}

/// Index of the handle within `radius` of `pt`, nearest first.
/// On equal distance the later point wins since it paints above.
#[must_use]
pub fn hit_handle(pt: Point, route: &RoutePath, virtual_size: Size, radius: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, vertex) in virtual_points(route, virtual_size).into_iter().enumerate() {
        let d = pt.distance(vertex);
        if d > radius {
            continue;
        }
        if best.is_none_or(|(_, best_d)| d <= best_d) {
            best = Some((index, d));
        }
    }
    best.map(|(index, _)| index)
}

/// Shortest distance from `pt` to a polyline. A single vertex is a point;
/// an empty polyline is infinitely far away.
#[must_use]
pub fn distance_to_polyline(pt: Point, vertices: &[Point]) -> f64 {
    match vertices {
        [] => f64::INFINITY,
        [only] => pt.distance(*only),
        _ => vertices
            .windows(2)
            .map(|w| distance_to_segment(pt, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Shortest distance from `pt` to the segment `a`–`b`.
#[must_use]
pub fn distance_to_segment(pt: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f64::EPSILON {
        return pt.distance(a);
    }
    let t = (((pt.x - a.x) * dx + (pt.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    pt.distance(Point::new(a.x + t * dx, a.y + t * dy))
}
