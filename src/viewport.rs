//! One interactive viewport: camera, selection, routes, and edit gestures.
//!
//! `Viewport` is what a host screen holds. It receives raw input, runs it
//! through the gesture machine and the path editor, and answers with a list
//! of [`Action`]s for the host to act on (prevent the native default, schedule
//! a frame, persist a route). The same actions are published on the
//! viewport's [`ActionBus`] for hosts that prefer subscribing.
//!
//! Nothing here runs until [`Viewport::load_image`] has supplied the image's
//! natural size. Edits that cannot apply are logged and dropped; there is no
//! error channel back to the user.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use std::cmp::Ordering;

use serde::Serialize;
use tracing::{debug, trace};

use crate::bus::{ActionBus, Listener, Subscription};
use crate::camera::Camera;
use crate::consts::{CLICK_THRESHOLD_PX, HANDLE_RADIUS_PX};
use crate::coords::{NormalizedPoint, Point, Rect, Size, ViewGeometry, from_normalized, to_normalized};
use crate::gesture::{GestureState, Release};
use crate::hit::{self, Hit, HitPart};
use crate::input::{Button, Touch, WheelInput};
use crate::long_press::LongPress;
use crate::path::{PathError, PathStore, RouteId, RoutePath};
use crate::policy::ViewportPolicy;
use crate::render::{self, Scene};
use crate::selection::SelectionState;

/// What the host should do in response to an input event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Call `preventDefault` on the native event.
    PreventDefault,
    /// Schedule an animation frame. Emitted at most once per frame.
    RenderNeeded,
    Selected { route_id: RouteId },
    Deselected,
    HoverChanged { route_id: Option<RouteId> },
    PointAdded { route_id: RouteId, index: usize, point: NormalizedPoint },
    PointMoved { route_id: RouteId, index: usize, point: NormalizedPoint },
    PointRemoved { route_id: RouteId, index: usize },
    /// An edit gesture finished; the host should persist this route's points.
    PathCommitted { route_id: RouteId },
}

/// Why a direct edit call was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("image not loaded")]
    NotReady,
    #[error("viewport is not in edit mode")]
    NotEditing,
    #[error("route {0} is not the selected route")]
    NotSelected(RouteId),
    #[error(transparent)]
    Path(#[from] PathError),
}

/// A handle being dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PointDrag {
    route_id: RouteId,
    index: usize,
    /// Client position of the press.
    origin: Point,
    /// Movement needed before the drag starts.
    threshold: f64,
    moved: bool,
    /// Latest position not yet written to the store.
    pending: Option<NormalizedPoint>,
}

/// State and input handling for one viewport.
#[derive(Debug)]
pub struct Viewport {
    pub gesture: GestureState,
    pub selection: SelectionState,
    pub paths: PathStore,
    policy: ViewportPolicy,
    container: Rect,
    natural: Option<Size>,
    editing: bool,
    point_drag: Option<PointDrag>,
    long_press: LongPress,
    render_pending: bool,
    bus: ActionBus,
}

impl Viewport {
    /// Create a viewport. Edit mode starts on for editor policies.
    #[must_use]
    pub fn new(policy: ViewportPolicy) -> Self {
        Self {
            gesture: GestureState::new(policy),
            selection: SelectionState::default(),
            paths: PathStore::new(),
            policy,
            container: Rect::default(),
            natural: None,
            editing: policy.is_editor(),
            point_drag: None,
            long_press: LongPress::new(policy.long_press_ms, policy.long_press_slop_px),
            render_pending: false,
            bus: ActionBus::new(),
        }
    }

    // --- Setup ---

    /// The image finished loading. Resets the camera to scale 1 at the origin.
    pub fn load_image(&mut self, natural: Size) -> Vec<Action> {
        self.natural = Some(natural);
        self.gesture.reset();
        self.abort_point_drag();
        debug!(width = natural.width, height = natural.height, "image loaded");
        let mut out = Vec::new();
        self.request_render(&mut out);
        self.dispatch(out)
    }

    /// The container moved or resized.
    pub fn set_container(&mut self, container: Rect) -> Vec<Action> {
        self.container = container;
        let mut out = Vec::new();
        if let Some(geometry) = self.geometry() {
            self.gesture.constrain(&geometry);
            self.request_render(&mut out);
        }
        self.dispatch(out)
    }

    /// Turn edit mode on or off. Viewer policies never edit.
    pub fn set_editing(&mut self, on: bool) {
        self.editing = on && self.policy.is_editor();
        if !self.editing {
            self.abort_point_drag();
        }
    }

    /// Replace every route.
    pub fn load_routes(&mut self, routes: Vec<RoutePath>) {
        self.paths.load_snapshot(routes);
        for id in [self.selection.selected_id, self.selection.hovered_id].into_iter().flatten() {
            if !self.paths.contains(&id) {
                self.selection.forget(&id);
            }
        }
        if self.point_drag.is_some() && !self.point_drag_target_exists() {
            self.abort_point_drag();
        }
    }

    /// Remove a route and any reference to it.
    pub fn remove_route(&mut self, id: &RouteId) -> Option<RoutePath> {
        self.selection.forget(id);
        if self.point_drag.is_some_and(|d| d.route_id == *id) {
            self.abort_point_drag();
        }
        self.paths.remove(id)
    }

    /// Register for every action this viewport emits.
    #[must_use = "dropping the subscription unregisters the listener immediately"]
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        self.bus.subscribe(listener)
    }

    // --- Queries ---

    #[must_use]
    pub fn policy(&self) -> &ViewportPolicy {
        &self.policy
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Geometry once the image is loaded, `None` before.
    #[must_use]
    pub fn geometry(&self) -> Option<ViewGeometry> {
        self.natural.map(|natural| ViewGeometry::new(self.container, natural))
    }

    /// The current `{scale, translate}`.
    #[must_use]
    pub fn transform(&self) -> Camera {
        self.gesture.camera
    }

    /// A handle drag is in progress.
    #[must_use]
    pub fn is_dragging_point(&self) -> bool {
        self.point_drag.is_some()
    }

    /// Map a client point to normalized image space.
    #[must_use]
    pub fn to_normalized(&self, client: Point) -> Option<NormalizedPoint> {
        let geometry = self.ready_geometry()?;
        to_normalized(client, geometry.container, &self.gesture.camera, geometry.content)
    }

    /// The layer stack to draw.
    #[must_use]
    pub fn scene(&self) -> Scene {
        let view_box = self.geometry().map(|g| g.virtual_size()).unwrap_or_default();
        render::build_scene(&self.paths, &self.selection, &self.policy, view_box, self.editing)
    }

    /// Topmost route part under `client`. Handles only count in edit mode.
    #[must_use]
    pub fn hit_at(&self, client: Point) -> Option<Hit> {
        self.hit_at_with(client, self.editing)
    }

    // --- Direct edits ---

    /// Append the point under `client` to `route_id`.
    ///
    /// # Errors
    ///
    /// Refused unless the image is loaded, edit mode is on, and `route_id`
    /// is the selected route.
    pub fn add_point(&mut self, route_id: RouteId, client: Point) -> Result<usize, EditError> {
        if !self.editing {
            return Err(EditError::NotEditing);
        }
        if !self.selection.is_selected(&route_id) {
            return Err(EditError::NotSelected(route_id));
        }
        let point = self.to_normalized(client).ok_or(EditError::NotReady)?;
        Ok(self.paths.add_point(&route_id, point)?)
    }

    /// Move the point at `index` of `route_id` to the position under `client`.
    ///
    /// # Errors
    ///
    /// Refused unless the image is loaded and edit mode is on, or when the
    /// route or index does not exist.
    pub fn move_point(&mut self, route_id: RouteId, index: usize, client: Point) -> Result<NormalizedPoint, EditError> {
        if !self.editing {
            return Err(EditError::NotEditing);
        }
        let point = self.to_normalized(client).ok_or(EditError::NotReady)?;
        self.paths.move_point(&route_id, index, point)?;
        Ok(point)
    }

    /// Remove the point at `index` of `route_id`.
    ///
    /// # Errors
    ///
    /// Refused outside edit mode, or when the route or index does not exist.
    /// An active handle drag on a later vertex of the same route follows its
    /// vertex; a drag on the removed vertex is dropped.
    pub fn remove_point(&mut self, route_id: RouteId, index: usize) -> Result<NormalizedPoint, EditError> {
        if !self.editing {
            return Err(EditError::NotEditing);
        }
        let removed = self.paths.remove_point(&route_id, index)?;
        self.shift_point_drag_after_removal(route_id, index);
        Ok(removed)
    }

    /// Select a route programmatically.
    pub fn select(&mut self, route_id: RouteId) -> Vec<Action> {
        let mut out = Vec::new();
        if self.paths.contains(&route_id) && self.selection.select(route_id) {
            out.push(Action::Selected { route_id });
            self.request_render(&mut out);
        }
        self.dispatch(out)
    }

    /// Clear the selection.
    pub fn deselect(&mut self) -> Vec<Action> {
        let mut out = Vec::new();
        self.abort_point_drag();
        if self.selection.deselect() {
            out.push(Action::Deselected);
            self.request_render(&mut out);
        }
        self.dispatch(out)
    }

    // --- Mouse ---

    pub fn on_mouse_down(&mut self, client: Point, button: Button) -> Vec<Action> {
        let mut out = Vec::new();
        let Some(geometry) = self.ready_geometry() else {
            return out;
        };
        if button != Button::Primary {
            return out;
        }
        if self.try_begin_point_drag(client, CLICK_THRESHOLD_PX) {
            out.push(Action::PreventDefault);
        } else {
            self.gesture.on_pointer_down(client, &geometry);
        }
        self.dispatch(out)
    }

    pub fn on_mouse_move(&mut self, client: Point) -> Vec<Action> {
        let mut out = Vec::new();
        let Some(geometry) = self.ready_geometry() else {
            return out;
        };
        if self.point_drag.is_some() {
            self.drag_point_to(client, &mut out);
        } else if self.gesture.is_dragging() {
            let outcome = self.gesture.on_pointer_move(client, &geometry);
            self.apply_outcome(outcome.prevent_default, outcome.changed, &mut out);
        } else {
            let hovered = self.hit_at_with(client, false).map(|h| h.route_id);
            if self.selection.hover(hovered) {
                out.push(Action::HoverChanged { route_id: hovered });
                self.request_render(&mut out);
            }
        }
        self.dispatch(out)
    }

    pub fn on_mouse_up(&mut self, client: Point) -> Vec<Action> {
        let mut out = Vec::new();
        let Some(geometry) = self.ready_geometry() else {
            return out;
        };
        if self.point_drag.is_some() {
            self.drag_point_to(client, &mut out);
            self.finish_point_drag(&mut out);
        } else {
            let release = self.gesture.on_pointer_up(client, &geometry);
            self.handle_release(release, &mut out);
        }
        self.dispatch(out)
    }

    /// The pointer left the window. Ends any gesture like a release, but
    /// never resolves a click.
    pub fn on_mouse_leave(&mut self) -> Vec<Action> {
        let mut out = Vec::new();
        let Some(geometry) = self.ready_geometry() else {
            return out;
        };
        if self.point_drag.is_some() {
            self.finish_point_drag(&mut out);
        }
        let before = self.gesture.camera;
        if self.gesture.on_pointer_leave(&geometry) == Release::Drag || self.gesture.camera != before {
            self.request_render(&mut out);
        }
        if self.selection.hover(None) {
            out.push(Action::HoverChanged { route_id: None });
            self.request_render(&mut out);
        }
        self.dispatch(out)
    }

    /// Right-click: delete the point under a handle in edit mode.
    pub fn on_context_menu(&mut self, client: Point) -> Vec<Action> {
        let mut out = Vec::new();
        if !self.editing || self.point_drag.is_some() {
            return out;
        }
        if let Some(Hit { route_id, part: HitPart::Handle(index) }) = self.hit_at(client) {
            out.push(Action::PreventDefault);
            self.remove_point_with_actions(route_id, index, &mut out);
        }
        self.dispatch(out)
    }

    // --- Wheel ---

    pub fn on_wheel(&mut self, wheel: WheelInput) -> Vec<Action> {
        let mut out = Vec::new();
        let Some(geometry) = self.ready_geometry() else {
            return out;
        };
        let outcome = self.gesture.on_wheel(wheel, &geometry);
        self.apply_outcome(outcome.prevent_default, outcome.changed, &mut out);
        self.dispatch(out)
    }

    // --- Touch ---

    /// Touches were added; `touches` lists every active touch.
    pub fn on_touch_start(&mut self, touches: &[Touch], now_ms: f64) -> Vec<Action> {
        let mut out = Vec::new();
        let Some(geometry) = self.ready_geometry() else {
            return out;
        };
        if let [only] = touches {
            if self.point_drag.is_none() && self.try_begin_point_drag(only.client, self.policy.long_press_slop_px) {
                self.long_press.arm(now_ms, only.client);
                out.push(Action::PreventDefault);
                return self.dispatch(out);
            }
        } else if self.point_drag.is_some() {
            self.long_press.cancel();
            self.finish_point_drag(&mut out);
        }
        self.gesture.on_touch_start(touches, &geometry);
        self.dispatch(out)
    }

    /// Touches moved; `touches` lists every active touch.
    pub fn on_touch_move(&mut self, touches: &[Touch]) -> Vec<Action> {
        let mut out = Vec::new();
        let Some(geometry) = self.ready_geometry() else {
            return out;
        };
        if self.point_drag.is_some() {
            if let [only] = touches {
                self.long_press.on_move(only.client);
                self.drag_point_to(only.client, &mut out);
            }
        } else {
            let outcome = self.gesture.on_touch_move(touches, &geometry);
            self.apply_outcome(outcome.prevent_default, outcome.changed, &mut out);
        }
        self.dispatch(out)
    }

    /// Touches were lifted; `remaining` lists those still down.
    pub fn on_touch_end(&mut self, remaining: &[Touch], now_ms: f64) -> Vec<Action> {
        let mut out = Vec::new();
        let Some(geometry) = self.ready_geometry() else {
            return out;
        };
        if self.point_drag.is_some() {
            if self.long_press.poll(now_ms) {
                self.fire_long_press(&mut out);
            } else {
                self.long_press.cancel();
                self.finish_point_drag(&mut out);
            }
        } else {
            let release = self.gesture.on_touch_end(remaining, &geometry);
            self.handle_release(release, &mut out);
        }
        self.dispatch(out)
    }

    // --- Time ---

    /// Advance the long-press timer.
    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        let mut out = Vec::new();
        if self.point_drag.is_some() && self.long_press.poll(now_ms) {
            self.fire_long_press(&mut out);
        }
        self.dispatch(out)
    }

    /// Call once per animation frame, before drawing. Writes the latest
    /// dragged handle position to the store and re-arms render requests.
    pub fn on_animation_frame(&mut self) -> Vec<Action> {
        let mut out = Vec::new();
        self.flush_point_drag(&mut out);
        self.render_pending = false;
        self.dispatch(out)
    }

    // --- Internals ---

    fn ready_geometry(&self) -> Option<ViewGeometry> {
        self.geometry().filter(ViewGeometry::is_ready)
    }

    fn dispatch(&self, actions: Vec<Action>) -> Vec<Action> {
        self.bus.emit_all(&actions);
        actions
    }

    fn request_render(&mut self, out: &mut Vec<Action>) {
        if !self.render_pending {
            self.render_pending = true;
            out.push(Action::RenderNeeded);
        }
    }

    fn apply_outcome(&mut self, prevent_default: bool, changed: bool, out: &mut Vec<Action>) {
        if prevent_default {
            out.push(Action::PreventDefault);
        }
        if changed {
            self.request_render(out);
        }
    }

    fn hit_at_with(&self, client: Point, handles: bool) -> Option<Hit> {
        let geometry = self.ready_geometry()?;
        let point = to_normalized(client, geometry.container, &self.gesture.camera, geometry.content)?;
        let view_box = geometry.virtual_size();
        let radius = handles.then(|| self.handle_radius_virtual(&geometry));
        hit::hit_test(from_normalized(point, view_box), &self.paths, &self.selection, &self.policy, view_box, radius)
    }

    /// Handle grab radius converted from screen pixels to viewBox units.
    fn handle_radius_virtual(&self, geometry: &ViewGeometry) -> f64 {
        let content_px = self.gesture.camera.screen_dist_to_content(HANDLE_RADIUS_PX);
        content_px * geometry.virtual_size().width / geometry.content.width
    }

    fn try_begin_point_drag(&mut self, client: Point, threshold: f64) -> bool {
        if !self.editing {
            return false;
        }
        let Some(Hit { route_id, part: HitPart::Handle(index) }) = self.hit_at(client) else {
            return false;
        };
        self.point_drag = Some(PointDrag { route_id, index, origin: client, threshold, moved: false, pending: None });
        trace!(%route_id, index, "point drag start");
        true
    }

    fn drag_point_to(&mut self, client: Point, out: &mut Vec<Action>) {
        let Some(mut drag) = self.point_drag else {
            return;
        };
        if !drag.moved {
            let dx = (client.x - drag.origin.x).abs();
            let dy = (client.y - drag.origin.y).abs();
            if dx < drag.threshold && dy < drag.threshold {
                return;
            }
            drag.moved = true;
            self.long_press.cancel();
        }
        drag.pending = self.to_normalized(client);
        self.point_drag = Some(drag);
        out.push(Action::PreventDefault);
        self.request_render(out);
    }

    /// Write the pending drag position to the store.
    ///
    /// Returns false when no drag survives the write. A write that fails
    /// drops the drag so nothing is committed for it.
    fn flush_point_drag(&mut self, out: &mut Vec<Action>) -> bool {
        let Some(mut drag) = self.point_drag else {
            return false;
        };
        let Some(point) = drag.pending.take() else {
            return true;
        };
        match self.paths.move_point(&drag.route_id, drag.index, point) {
            Ok(()) => {
                self.point_drag = Some(drag);
                out.push(Action::PointMoved { route_id: drag.route_id, index: drag.index, point });
                true
            }
            Err(e) => {
                debug!(error = %e, "point drag target gone");
                self.abort_point_drag();
                false
            }
        }
    }

    /// Commit the final position of a handle drag.
    fn finish_point_drag(&mut self, out: &mut Vec<Action>) {
        if !self.flush_point_drag(out) {
            return;
        }
        let Some(drag) = self.point_drag.take() else {
            return;
        };
        if drag.moved && self.point_drag_target_exists_for(&drag) {
            out.push(Action::PathCommitted { route_id: drag.route_id });
            self.request_render(out);
        }
    }

    fn point_drag_target_exists(&self) -> bool {
        self.point_drag.is_some_and(|d| self.point_drag_target_exists_for(&d))
    }

    /// The dragged vertex is still in the store.
    fn point_drag_target_exists_for(&self, drag: &PointDrag) -> bool {
        self.paths.get(&drag.route_id).is_some_and(|r| drag.index < r.points.len())
    }

    /// Keep a handle drag on its vertex after `removed` left the same route.
    fn shift_point_drag_after_removal(&mut self, route_id: RouteId, removed: usize) {
        let Some(mut drag) = self.point_drag.filter(|d| d.route_id == route_id) else {
            return;
        };
        match removed.cmp(&drag.index) {
            Ordering::Less => {
                drag.index -= 1;
                self.point_drag = Some(drag);
            }
            Ordering::Equal => self.abort_point_drag(),
            Ordering::Greater => {}
        }
    }

    fn abort_point_drag(&mut self) {
        self.point_drag = None;
        self.long_press.cancel();
    }

    fn fire_long_press(&mut self, out: &mut Vec<Action>) {
        let Some(drag) = self.point_drag.take() else {
            return;
        };
        self.long_press.cancel();
        debug!(route_id = %drag.route_id, index = drag.index, "long press");
        self.remove_point_with_actions(drag.route_id, drag.index, out);
    }

    fn remove_point_with_actions(&mut self, route_id: RouteId, index: usize, out: &mut Vec<Action>) {
        match self.paths.remove_point(&route_id, index) {
            Ok(_) => {
                out.push(Action::PointRemoved { route_id, index });
                out.push(Action::PathCommitted { route_id });
                self.request_render(out);
            }
            Err(e) => debug!(error = %e, "point removal ignored"),
        }
    }

    fn handle_release(&mut self, release: Release, out: &mut Vec<Action>) {
        match release {
            Release::Click(at) => self.resolve_click(at, out),
            Release::Drag => self.request_render(out),
            Release::Ignored => {}
        }
    }

    /// Interpret a click that was not part of any drag.
    ///
    /// A click on a route other than the selected one selects it. Otherwise,
    /// while editing with a route selected, the click appends a point to that
    /// route. A click on nothing deselects.
    fn resolve_click(&mut self, at: Point, out: &mut Vec<Action>) {
        if self.gesture.has_moved || self.point_drag.is_some() {
            return;
        }
        let hit = self.hit_at_with(at, false);
        match (hit, self.selection.selected_id) {
            (Some(h), selected) if selected != Some(h.route_id) => {
                self.selection.select(h.route_id);
                out.push(Action::Selected { route_id: h.route_id });
                self.request_render(out);
            }
            (_, Some(selected)) if self.editing => match self.add_point(selected, at) {
                Ok(index) => {
                    if let Some(point) = self.paths.get(&selected).and_then(|r| r.points.get(index)).copied() {
                        out.push(Action::PointAdded { route_id: selected, index, point });
                    }
                    out.push(Action::PathCommitted { route_id: selected });
                    self.request_render(out);
                }
                Err(e) => debug!(error = %e, "click ignored"),
            },
            (None, Some(_)) => {
                self.selection.deselect();
                out.push(Action::Deselected);
                self.request_render(out);
            }
            _ => {}
        }
    }
}
