#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn viewer_preset() {
    let p = ViewportPolicy::viewer();
    assert_eq!(p.mode, Mode::Viewer);
    assert_eq!(p.constrain, ConstrainMode::OnRelease);
    assert_eq!(p.hit_width, VIEWER_HIT_WIDTH);
    assert_eq!(p.min_scale, 1.0);
    assert_eq!(p.max_scale, 5.0);
    assert_eq!(p.zoom_speed, 0.15);
    assert!(!p.constrains_live());
    assert!(!p.is_editor());
}

#[test]
fn editor_preset() {
    let p = ViewportPolicy::editor();
    assert_eq!(p.mode, Mode::Editor);
    assert_eq!(p.constrain, ConstrainMode::Always);
    assert_eq!(p.hit_width, EDITOR_HIT_WIDTH);
    assert_eq!(p.stroke_width, EDITOR_STROKE_WIDTH);
    assert_eq!(p.long_press_ms, 600.0);
    assert!(p.constrains_live());
    assert!(p.is_editor());
}

#[test]
fn presets_share_zoom_limits() {
    let v = ViewportPolicy::viewer();
    let e = ViewportPolicy::editor();
    assert_eq!(v.min_scale, e.min_scale);
    assert_eq!(v.max_scale, e.max_scale);
    assert_eq!(v.zoom_speed, e.zoom_speed);
}

#[test]
fn for_mode_picks_preset() {
    assert_eq!(ViewportPolicy::for_mode(Mode::Viewer), ViewportPolicy::viewer());
    assert_eq!(ViewportPolicy::for_mode(Mode::Editor), ViewportPolicy::editor());
}

// --- clamp_scale ---

#[test]
fn clamp_scale_bounds() {
    let p = ViewportPolicy::viewer();
    assert_eq!(p.clamp_scale(0.2), 1.0);
    assert_eq!(p.clamp_scale(2.5), 2.5);
    assert_eq!(p.clamp_scale(99.0), 5.0);
}

#[test]
fn clamp_scale_nan_is_min() {
    assert_eq!(ViewportPolicy::viewer().clamp_scale(f64::NAN), 1.0);
}

#[test]
fn clamp_scale_survives_inverted_range() {
    let p = ViewportPolicy { min_scale: 3.0, max_scale: 2.0, ..ViewportPolicy::viewer() };
    assert_eq!(p.clamp_scale(10.0), 3.0);
}

// --- hit widths ---

#[test]
fn selected_hit_width_is_widened() {
    let p = ViewportPolicy::viewer();
    assert_eq!(p.hit_stroke_width(false), 12.0);
    assert!((p.hit_stroke_width(true) - 28.8).abs() < 1e-9);
}

#[test]
fn mode_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Mode::Editor).unwrap(), "\"editor\"");
    assert_eq!(serde_json::to_string(&ConstrainMode::OnRelease).unwrap(), "\"on_release\"");
}
