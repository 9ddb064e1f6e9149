#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn cam(scale: f64, tx: f64, ty: f64) -> Camera {
    Camera { scale, translate: Point::new(tx, ty) }
}

// --- Defaults ---

#[test]
fn camera_default_is_identity() {
    let c = Camera::default();
    assert_eq!(c.scale, 1.0);
    assert_eq!(c.translate, Point::default());
    assert!(c.is_identity());
}

#[test]
fn camera_with_translate_is_not_identity() {
    assert!(!cam(1.0, 3.0, 0.0).is_identity());
    assert!(!cam(2.0, 0.0, 0.0).is_identity());
}

// --- screen_to_content / content_to_screen ---

#[test]
fn screen_to_content_identity() {
    let c = Camera::default();
    assert!(point_approx_eq(c.screen_to_content(Point::new(50.0, 75.0)), Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_content_undoes_translate_then_scale() {
    let c = cam(2.0, 20.0, 10.0);
    // (20 - 20) / 2 = 0, (10 - 10) / 2 = 0
    assert!(point_approx_eq(c.screen_to_content(Point::new(20.0, 10.0)), Point::new(0.0, 0.0)));
    assert!(point_approx_eq(c.screen_to_content(Point::new(120.0, 50.0)), Point::new(50.0, 20.0)));
}

#[test]
fn content_to_screen_inverts_screen_to_content() {
    let c = cam(2.5, -130.0, -42.0);
    let screen = Point::new(317.0, 211.0);
    let back = c.content_to_screen(c.screen_to_content(screen));
    assert!(point_approx_eq(back, screen));
}

#[test]
fn screen_dist_to_content_divides_by_scale() {
    assert!(approx_eq(cam(4.0, 0.0, 0.0).screen_dist_to_content(12.0), 3.0));
}

// --- zoom_about ---

#[test]
fn zoom_about_keeps_anchor_fixed() {
    let mut c = cam(1.3, -40.0, -25.0);
    let anchor = Point::new(412.0, 180.0);
    let before = c.screen_to_content(anchor);
    c.zoom_about(anchor, 2.7);
    assert_eq!(c.scale, 2.7);
    assert!(point_approx_eq(c.content_to_screen(before), anchor));
}

#[test]
fn zoom_about_origin_leaves_translate_at_origin() {
    let mut c = Camera::default();
    c.zoom_about(Point::new(0.0, 0.0), 3.0);
    assert!(point_approx_eq(c.translate, Point::new(0.0, 0.0)));
}

#[test]
fn zoom_about_center_from_identity() {
    let mut c = Camera::default();
    c.zoom_about(Point::new(500.0, 250.0), 2.0);
    assert!(point_approx_eq(c.translate, Point::new(-500.0, -250.0)));
}

#[test]
fn zoom_about_anchor_invariance_over_many_states() {
    for (scale, tx, ty) in [(1.0, 0.0, 0.0), (1.7, -120.0, -33.0), (4.2, -900.0, -410.0), (2.0, 15.0, 80.0)] {
        for anchor in [Point::new(0.0, 0.0), Point::new(333.0, 111.0), Point::new(999.0, 499.0)] {
            for new_scale in [1.0, 1.15, 3.3, 5.0] {
                let mut c = cam(scale, tx, ty);
                let before = c.screen_to_content(anchor);
                c.zoom_about(anchor, new_scale);
                assert!(c.content_to_screen(before).distance(anchor) < 1.0);
            }
        }
    }
}

// --- constrain ---

#[test]
fn constrain_at_scale_one_resets_translate() {
    let mut c = cam(1.0, -30.0, 40.0);
    c.constrain(Size::new(1000.0, 500.0), Size::new(1000.0, 500.0));
    assert_eq!(c.translate, Point::default());
}

#[test]
fn constrain_below_one_resets_translate() {
    let mut c = cam(0.5, -30.0, 40.0);
    c.constrain(Size::new(1000.0, 500.0), Size::new(1000.0, 500.0));
    assert_eq!(c.translate, Point::default());
}

#[test]
fn constrain_clamps_positive_translate_to_zero() {
    let mut c = cam(2.0, 50.0, 30.0);
    c.constrain(Size::new(1000.0, 500.0), Size::new(1000.0, 500.0));
    assert!(point_approx_eq(c.translate, Point::new(0.0, 0.0)));
}

#[test]
fn constrain_clamps_far_negative_translate() {
    let mut c = cam(2.0, -5000.0, -5000.0);
    c.constrain(Size::new(1000.0, 500.0), Size::new(1000.0, 500.0));
    // container - content * scale
    assert!(point_approx_eq(c.translate, Point::new(-1000.0, -500.0)));
}

#[test]
fn constrain_leaves_valid_translate_alone() {
    let mut c = cam(3.0, -700.0, -120.0);
    c.constrain(Size::new(1000.0, 500.0), Size::new(1000.0, 500.0));
    assert!(point_approx_eq(c.translate, Point::new(-700.0, -120.0)));
}

#[test]
fn constrain_pins_axis_when_scaled_content_is_narrower() {
    // Portrait image in a landscape container: 250 wide at scale 1.
    let mut c = cam(2.0, -80.0, -300.0);
    c.constrain(Size::new(1000.0, 500.0), Size::new(250.0, 500.0));
    assert_eq!(c.translate.x, 0.0);
    assert!(approx_eq(c.translate.y, -300.0));
}

#[test]
fn constrained_content_covers_viewport() {
    let container = Size::new(800.0, 600.0);
    let content = Size::new(800.0, 600.0);
    for (scale, tx, ty) in [(1.5, 100.0, -2000.0), (4.0, -10_000.0, 10_000.0), (2.2, -300.0, -200.0)] {
        let mut c = cam(scale, tx, ty);
        c.constrain(container, content);
        let top_left = c.content_to_screen(Point::new(0.0, 0.0));
        let bottom_right = c.content_to_screen(Point::new(content.width, content.height));
        assert!(top_left.x <= EPSILON && top_left.y <= EPSILON);
        assert!(bottom_right.x >= container.width - EPSILON);
        assert!(bottom_right.y >= container.height - EPSILON);
    }
}
