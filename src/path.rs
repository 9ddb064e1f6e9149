//! Route model: polyline paths in normalized image space and the store that owns them.
//!
//! A route's points are kept in drawing order; the first point is the start
//! of the route. Editing only ever appends, replaces in place, or removes
//! by index. Persisting the result is the caller's job; this store keeps
//! the in-memory list only.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::DEFAULT_ROUTE_COLOR;
use crate::coords::NormalizedPoint;

/// Unique identifier for a route.
pub type RouteId = Uuid;

/// One route drawn over the photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    pub id: RouteId,
    /// Stable display number shown next to the route; breaks z-order ties.
    pub number: u32,
    /// Vertices in drawing order.
    #[serde(default)]
    pub points: Vec<NormalizedPoint>,
    /// Stroke color as a CSS color string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl RoutePath {
    #[must_use]
    pub fn new(id: RouteId, number: u32) -> Self {
        Self { id, number, points: Vec::new(), color: None }
    }

    /// Routes without points are neither drawn nor hit-tested.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        !self.points.is_empty()
    }

    /// Stroke color, falling back to the default route color.
    #[must_use]
    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_ROUTE_COLOR)
    }
}

/// Why a path edit was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("route not found: {0}")]
    UnknownRoute(RouteId),
    #[error("point index {index} out of range for route with {len} points")]
    IndexOutOfRange { index: usize, len: usize },
}

/// In-memory store of routes keyed by id.
#[derive(Debug, Clone, Default)]
pub struct PathStore {
    routes: HashMap<RouteId, RoutePath>,
}

impl PathStore {
    #[must_use]
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Insert or replace a route.
    pub fn insert(&mut self, route: RoutePath) {
        self.routes.insert(route.id, route);
    }

    /// Remove a route, returning it if it was present.
    pub fn remove(&mut self, id: &RouteId) -> Option<RoutePath> {
        self.routes.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &RouteId) -> Option<&RoutePath> {
        self.routes.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &RouteId) -> bool {
        self.routes.contains_key(id)
    }

    /// Replace every route with `routes`.
    pub fn load_snapshot(&mut self, routes: Vec<RoutePath>) {
        self.routes.clear();
        for route in routes {
            self.routes.insert(route.id, route);
        }
    }

    /// Append a point to the end of a route. Returns the new point's index.
    ///
    /// # Errors
    ///
    /// [`PathError::UnknownRoute`] if the route does not exist.
    pub fn add_point(&mut self, id: &RouteId, point: NormalizedPoint) -> Result<usize, PathError> {
        let route = self.route_mut(id)?;
        route.points.push(point);
        Ok(route.points.len() - 1)
    }

    /// Replace the point at `index` in place.
    ///
    /// # Errors
    ///
    /// [`PathError::UnknownRoute`] or [`PathError::IndexOutOfRange`].
    pub fn move_point(&mut self, id: &RouteId, index: usize, point: NormalizedPoint) -> Result<(), PathError> {
        let route = self.route_mut(id)?;
        let len = route.points.len();
        let slot = route.points.get_mut(index).ok_or(PathError::IndexOutOfRange { index, len })?;
        *slot = point;
        Ok(())
    }

    /// Remove the point at `index`; later points shift down by one.
    ///
    /// # Errors
    ///
    /// [`PathError::UnknownRoute`] or [`PathError::IndexOutOfRange`].
    pub fn remove_point(&mut self, id: &RouteId, index: usize) -> Result<NormalizedPoint, PathError> {
        let route = self.route_mut(id)?;
        let len = route.points.len();
        if index >= len {
            return Err(PathError::IndexOutOfRange { index, len });
        }
        Ok(route.points.remove(index))
    }

    /// Set or clear a route's stroke color.
    ///
    /// # Errors
    ///
    /// [`PathError::UnknownRoute`] if the route does not exist.
    pub fn set_color(&mut self, id: &RouteId, color: Option<String>) -> Result<(), PathError> {
        self.route_mut(id)?.color = color;
        Ok(())
    }

    /// All routes ordered by `(number, id)`.
    #[must_use]
    pub fn sorted_routes(&self) -> Vec<&RoutePath> {
        let mut routes: Vec<&RoutePath> = self.routes.values().collect();
        routes.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.id.cmp(&b.id)));
        routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn route_mut(&mut self, id: &RouteId) -> Result<&mut RoutePath, PathError> {
        self.routes.get_mut(id).ok_or(PathError::UnknownRoute(*id))
    }
}
