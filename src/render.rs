//! Render layering: the deterministic stack the host draws into the viewBox.
//!
//! This module produces plain data; it never touches a drawing surface.
//! Routes are emitted in [`hit::z_order`], each as a group of
//! hit area → visible stroke → start marker, so a route on top is on top
//! both visually and for pointer events. Edit handles of the selected route
//! come last, above every route.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::coords::{Point, Size};
use crate::hit::{self, virtual_points};
use crate::path::{PathStore, RouteId};
use crate::policy::ViewportPolicy;
use crate::selection::SelectionState;

/// Handle radius in virtual units.
const HANDLE_RADIUS_VIRTUAL: f64 = 9.0;

/// Start marker radius in virtual units.
const START_MARKER_RADIUS_VIRTUAL: f64 = 14.0;

/// Visual emphasis of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Normal,
    Hovered,
    Selected,
}

/// One drawable item, in paint order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layer", rename_all = "snake_case")]
pub enum Layer {
    /// Invisible wide stroke used only for pointer hits.
    HitArea { route_id: RouteId, points: Vec<Point>, width: f64 },
    /// The visible polyline.
    Stroke { route_id: RouteId, points: Vec<Point>, width: f64, color: String, emphasis: Emphasis },
    /// Numbered marker at the first point.
    StartMarker { route_id: RouteId, at: Point, radius: f64, number: u32, color: String },
    /// Draggable edit handle for one point of the selected route.
    Handle { route_id: RouteId, index: usize, at: Point, radius: f64 },
}

/// The full layer stack for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    /// Size of the viewBox the layers are expressed in.
    pub view_box: Size,
    pub layers: Vec<Layer>,
}

impl Scene {
    /// Route ids in the order their strokes are painted.
    #[must_use]
    pub fn stroke_order(&self) -> Vec<RouteId> {
        self.layers
            .iter()
            .filter_map(|layer| match layer {
                Layer::Stroke { route_id, .. } => Some(*route_id),
                _ => None,
            })
            .collect()
    }
}

/// Build the layer stack for the current state.
///
/// Empty routes are skipped. Handles are emitted only when `show_handles`
/// is set (edit mode).
#[must_use]
pub fn build_scene(
    paths: &PathStore,
    selection: &SelectionState,
    policy: &ViewportPolicy,
    view_box: Size,
    show_handles: bool,
) -> Scene {
    let mut layers = Vec::new();
    if view_box.is_empty() {
        return Scene { view_box, layers };
    }

    for route in hit::z_order(paths, selection) {
        let selected = selection.is_selected(&route.id);
        let emphasis = if selected {
            Emphasis::Selected
        } else if selection.is_hovered(&route.id) {
            Emphasis::Hovered
        } else {
            Emphasis::Normal
        };
        let points = virtual_points(route, view_box);
        let color = route.color_or_default().to_owned();

        layers.push(Layer::HitArea { route_id: route.id, points: points.clone(), width: policy.hit_stroke_width(selected) });
        if let Some(first) = points.first().copied() {
            layers.push(Layer::Stroke {
                route_id: route.id,
                points,
                width: policy.stroke_width,
                color: color.clone(),
                emphasis,
            });
            layers.push(Layer::StartMarker {
                route_id: route.id,
                at: first,
                radius: START_MARKER_RADIUS_VIRTUAL,
                number: route.number,
                color,
            });
        }
    }

    if show_handles {
        let selected = selection.selected_id.and_then(|id| paths.get(&id));
        if let Some(route) = selected {
            for (index, at) in virtual_points(route, view_box).into_iter().enumerate() {
                layers.push(Layer::Handle { route_id: route.id, index, at, radius: HANDLE_RADIUS_VIRTUAL });
            }
        }
    }

    Scene { view_box, layers }
}
