//! End-to-end gesture scenarios driven through the public `Viewport` API.
#![allow(clippy::float_cmp)]

use routetopo::camera::Camera;
use routetopo::coords::{NormalizedPoint, Point, Rect, Size};
use routetopo::input::{Button, Touch, WheelInput};
use routetopo::path::{RouteId, RoutePath};
use routetopo::policy::ViewportPolicy;
use routetopo::render::Layer;
use routetopo::viewport::{Action, Viewport};
use uuid::Uuid;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn id(n: u128) -> RouteId {
    Uuid::from_u128(n)
}

fn route(n: u128, number: u32, points: &[(f64, f64)]) -> RoutePath {
    let mut r = RoutePath::new(id(n), number);
    r.points = points.iter().map(|&(x, y)| NormalizedPoint::new(x, y)).collect();
    r
}

/// 2000x1000 image in a 1000x500 container offset from the page origin.
fn viewport(policy: ViewportPolicy, routes: Vec<RoutePath>) -> Viewport {
    let mut vp = Viewport::new(policy);
    vp.set_container(Rect::new(40.0, 20.0, 1000.0, 500.0));
    vp.load_routes(routes);
    vp.load_image(Size::new(2000.0, 1000.0));
    vp.on_animation_frame();
    vp
}

/// Client position of a normalized point under the current transform.
fn client_of(vp: &Viewport, x: f64, y: f64) -> Point {
    let camera = vp.transform();
    let local = camera.content_to_screen(Point::new(x * 1000.0, y * 500.0));
    Point::new(local.x + 40.0, local.y + 20.0)
}

fn wheel(at: Point, delta_y: f64) -> WheelInput {
    WheelInput { client: at, delta_y, cancelable: true }
}

#[test]
fn wheel_zoom_keeps_point_under_cursor() {
    let mut vp = viewport(ViewportPolicy::viewer(), Vec::new());
    let cursor = Point::new(540.0, 270.0);
    let before = vp.to_normalized(cursor).unwrap();

    let out = vp.on_wheel(wheel(cursor, -100.0));

    assert_eq!(out, vec![Action::PreventDefault, Action::RenderNeeded]);
    assert!(approx_eq(vp.transform().scale, 1.15));
    let after = client_of(&vp, before.x(), before.y());
    assert!(after.distance(cursor) < 1.0);
}

#[test]
fn click_appends_first_point_to_empty_selected_route() {
    let mut vp = viewport(ViewportPolicy::editor(), vec![RoutePath::new(id(1), 1)]);
    vp.select(id(1));
    let at = client_of(&vp, 0.5, 0.5);

    vp.on_mouse_down(at, Button::Primary);
    vp.on_mouse_up(at);

    let points = &vp.paths.get(&id(1)).unwrap().points;
    assert_eq!(points.len(), 1);
    assert!(approx_eq(points[0].x(), 0.5));
    assert!(approx_eq(points[0].y(), 0.5));
}

#[test]
fn dragging_a_handle_moves_only_that_point() {
    let mut vp = viewport(ViewportPolicy::editor(), vec![route(1, 1, &[(0.1, 0.1), (0.9, 0.9)])]);
    vp.select(id(1));

    vp.on_mouse_down(client_of(&vp, 0.1, 0.1), Button::Primary);
    vp.on_mouse_move(client_of(&vp, 0.2, 0.2));
    vp.on_animation_frame();
    let out = vp.on_mouse_up(client_of(&vp, 0.3, 0.3));

    assert!(out.contains(&Action::PathCommitted { route_id: id(1) }));
    let points = &vp.paths.get(&id(1)).unwrap().points;
    assert!(approx_eq(points[0].x(), 0.3));
    assert!(approx_eq(points[0].y(), 0.3));
    assert_eq!(points[1], NormalizedPoint::new(0.9, 0.9));
}

#[test]
fn pinch_to_double_distance_doubles_scale() {
    let mut vp = viewport(ViewportPolicy::viewer(), Vec::new());
    vp.on_touch_start(&[Touch::new(0, 490.0, 270.0), Touch::new(1, 590.0, 270.0)], 0.0);
    vp.on_touch_move(&[Touch::new(0, 440.0, 270.0), Touch::new(1, 640.0, 270.0)]);
    assert!(approx_eq(vp.transform().scale, 2.0));

    vp.on_touch_end(&[], 100.0);
    let camera = vp.transform();
    assert!(approx_eq(camera.scale, 2.0));
    assert!(camera.translate.x <= 0.0 && camera.translate.x >= 1000.0 - 2000.0);
}

#[test]
fn long_press_on_handle_removes_point_without_drag_updates() {
    let mut vp = viewport(ViewportPolicy::editor(), vec![route(1, 1, &[(0.1, 0.1), (0.5, 0.5), (0.9, 0.9)])]);
    vp.select(id(1));
    vp.on_animation_frame();
    let handle = client_of(&vp, 0.5, 0.5);

    let mut seen = Vec::new();
    seen.extend(vp.on_touch_start(&[Touch::new(0, handle.x, handle.y)], 0.0));
    seen.extend(vp.on_touch_move(&[Touch::new(0, handle.x + 6.0, handle.y - 4.0)]));
    seen.extend(vp.on_animation_frame());
    seen.extend(vp.on_touch_move(&[Touch::new(0, handle.x + 9.0, handle.y + 9.0)]));
    seen.extend(vp.on_touch_end(&[], 700.0));

    assert!(seen.contains(&Action::PointRemoved { route_id: id(1), index: 1 }));
    assert!(!seen.iter().any(|a| matches!(a, Action::PointMoved { .. })));
    let points = &vp.paths.get(&id(1)).unwrap().points;
    assert_eq!(points, &vec![NormalizedPoint::new(0.1, 0.1), NormalizedPoint::new(0.9, 0.9)]);
}

#[test]
fn scale_stays_within_limits_for_any_wheel_sequence() {
    let mut vp = viewport(ViewportPolicy::viewer(), Vec::new());
    let deltas = [-100.0, -1.0, -500.0, 3.0, -0.5, 120.0, -120.0, 1e9, -1e9, 0.0];
    let mut flip = false;
    for round in 0..20_u32 {
        let y = 60.0 + 20.0 * f64::from(round);
        for (x, delta) in [100.0, 180.0, 260.0, 340.0, 420.0, 500.0, 580.0, 660.0, 740.0, 820.0].into_iter().zip(deltas) {
            flip = !flip;
            let sign = if flip { -1.0 } else { 1.0 };
            vp.on_wheel(wheel(Point::new(x, y), delta * sign));
            let scale = vp.transform().scale;
            assert!((1.0..=5.0).contains(&scale), "scale {scale} escaped limits");
        }
    }
}

#[test]
fn content_covers_viewport_after_pan_and_zoom() {
    let mut vp = viewport(ViewportPolicy::viewer(), Vec::new());
    for _ in 0..8 {
        vp.on_wheel(wheel(Point::new(900.0, 100.0), -100.0));
    }
    vp.on_mouse_down(Point::new(500.0, 300.0), Button::Primary);
    vp.on_mouse_move(Point::new(1500.0, 1200.0));
    vp.on_mouse_up(Point::new(1500.0, 1200.0));

    let Camera { scale, translate } = vp.transform();
    assert!(scale > 1.0);
    assert!(translate.x <= 0.0 && translate.y <= 0.0);
    assert!(translate.x + 1000.0 * scale >= 1000.0 - EPSILON);
    assert!(translate.y + 500.0 * scale >= 500.0 - EPSILON);

    for _ in 0..40 {
        vp.on_wheel(wheel(Point::new(900.0, 100.0), 100.0));
    }
    assert_eq!(vp.transform(), Camera::default());
}

#[test]
fn click_drag_boundary_is_five_pixels() {
    for (dx, dy, selects) in [(0.0, 0.0, true), (4.0, 4.0, true), (-4.9, 4.9, true), (5.0, 0.0, false), (0.0, -5.0, false)] {
        let mut vp = viewport(ViewportPolicy::viewer(), vec![route(1, 1, &[(0.0, 0.5), (1.0, 0.5)])]);
        let start = Point::new(540.0, 270.0);
        vp.on_mouse_down(start, Button::Primary);
        vp.on_mouse_move(Point::new(start.x + dx, start.y + dy));
        vp.on_mouse_up(Point::new(start.x + dx, start.y));
        assert_eq!(vp.selection.is_selected(&id(1)), selects, "movement ({dx}, {dy})");
    }
}

#[test]
fn render_order_is_plain_then_hovered_then_selected() {
    let mut vp = viewport(
        ViewportPolicy::viewer(),
        vec![route(1, 3, &[(0.0, 0.2), (1.0, 0.2)]), route(2, 2, &[(0.0, 0.5), (1.0, 0.5)]), route(3, 1, &[(0.0, 0.8), (1.0, 0.8)])],
    );
    vp.select(id(3));
    vp.on_mouse_move(client_of(&vp, 0.5, 0.5));

    let scene = vp.scene();
    assert_eq!(scene.stroke_order(), vec![id(1), id(2), id(3)]);
    assert!(matches!(scene.layers.last(), Some(Layer::StartMarker { .. })));
}
