//! Gesture and route-editing core for annotating photos with polyline routes.
//!
//! An editor draws routes over a photo; a viewer pans, zooms, and picks
//! among them. This crate owns everything between raw input and plain
//! geometry: deriving scale/translate from wheel, drag, and pinch input,
//! telling clicks from drags, mapping pointer positions to resolution-free
//! normalized coordinates, editing route points, and deciding which of
//! several overlapping routes sits on top. Hosts wire native events in and
//! draw the resulting transform and layers; persistence stays with the host.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`viewport`] | Top-level [`viewport::Viewport`] and the [`viewport::Action`]s it emits |
//! | [`gesture`] | Zoom/pan state machine (idle, dragging, pinching) |
//! | [`camera`] | Scale/translate transform, anchor-preserving zoom, containment |
//! | [`coords`] | Client, container, normalized, and virtual coordinate spaces |
//! | [`path`] | Route paths and the in-memory route store |
//! | [`selection`] | Selected and hovered route |
//! | [`hit`] | Z-order and hit-testing among overlapping routes |
//! | [`render`] | Deterministic layer stack for drawing |
//! | [`replay`] | JSON input scripts replayed through a viewport |
//! | [`long_press`] | Caller-clocked long-press timer |
//! | [`bus`] | Scoped action subscriptions |
//! | [`input`] | Input event shapes |
//! | [`policy`] | Viewer/editor behavior presets |
//! | [`config`] | Environment overrides for the presets |
//! | [`consts`] | Shared numeric constants |

pub mod bus;
pub mod camera;
pub mod config;
pub mod consts;
pub mod coords;
pub mod gesture;
pub mod hit;
pub mod input;
pub mod long_press;
pub mod path;
pub mod policy;
pub mod render;
pub mod replay;
pub mod selection;
pub mod viewport;
