//! Scripted input replay.
//!
//! A [`Script`] describes a viewport setup and a sequence of input events in
//! JSON. Replaying it drives a real [`Viewport`] and records what came out,
//! which makes gesture behavior reproducible outside a browser.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::coords::{Point, Rect, Size};
use crate::input::{Button, Touch, WheelInput};
use crate::path::{RouteId, RoutePath};
use crate::policy::ViewportPolicy;
use crate::selection::SelectionState;
use crate::viewport::{Action, Viewport};

/// Setup plus the events to feed in.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub container: Rect,
    /// Natural image size. Omit to replay against an image that never loaded.
    #[serde(default)]
    pub image: Option<Size>,
    #[serde(default)]
    pub routes: Vec<RoutePath>,
    /// Route selected before the first event.
    #[serde(default)]
    pub select: Option<RouteId>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

/// One input event. Coordinates are client pixels; times are milliseconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    MouseDown {
        x: f64,
        y: f64,
        #[serde(default = "primary")]
        button: Button,
    },
    MouseMove { x: f64, y: f64 },
    MouseUp { x: f64, y: f64 },
    MouseLeave,
    ContextMenu { x: f64, y: f64 },
    Wheel(WheelInput),
    TouchStart { touches: Vec<Touch>, at_ms: f64 },
    TouchMove { touches: Vec<Touch> },
    TouchEnd { touches: Vec<Touch>, at_ms: f64 },
    Tick { at_ms: f64 },
    Frame,
}

fn primary() -> Button {
    Button::Primary
}

/// Actions produced by one event.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub event: usize,
    pub actions: Vec<Action>,
}

/// Everything a replay produced.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<Step>,
    pub transform: Camera,
    pub selection: SelectionState,
    pub routes: Vec<RoutePath>,
}

/// Run `script` against a fresh viewport built from `policy`.
#[must_use]
pub fn run(script: &Script, policy: ViewportPolicy) -> ReplayReport {
    let mut viewport = Viewport::new(policy);
    viewport.set_container(script.container);
    viewport.load_routes(script.routes.clone());
    if let Some(natural) = script.image {
        viewport.load_image(natural);
    }
    if let Some(id) = script.select {
        viewport.select(id);
    }
    viewport.on_animation_frame();

    let steps = script
        .events
        .iter()
        .enumerate()
        .map(|(event, e)| Step { event, actions: apply(&mut viewport, e) })
        .filter(|step| !step.actions.is_empty())
        .collect();

    ReplayReport {
        steps,
        transform: viewport.transform(),
        selection: viewport.selection,
        routes: viewport.paths.sorted_routes().into_iter().cloned().collect(),
    }
}

fn apply(viewport: &mut Viewport, event: &ScriptEvent) -> Vec<Action> {
    match event {
        ScriptEvent::MouseDown { x, y, button } => viewport.on_mouse_down(Point::new(*x, *y), *button),
        ScriptEvent::MouseMove { x, y } => viewport.on_mouse_move(Point::new(*x, *y)),
        ScriptEvent::MouseUp { x, y } => viewport.on_mouse_up(Point::new(*x, *y)),
        ScriptEvent::MouseLeave => viewport.on_mouse_leave(),
        ScriptEvent::ContextMenu { x, y } => viewport.on_context_menu(Point::new(*x, *y)),
        ScriptEvent::Wheel(wheel) => viewport.on_wheel(*wheel),
        ScriptEvent::TouchStart { touches, at_ms } => viewport.on_touch_start(touches, *at_ms),
        ScriptEvent::TouchMove { touches } => viewport.on_touch_move(touches),
        ScriptEvent::TouchEnd { touches, at_ms } => viewport.on_touch_end(touches, *at_ms),
        ScriptEvent::Tick { at_ms } => viewport.tick(*at_ms),
        ScriptEvent::Frame => viewport.on_animation_frame(),
    }
}
