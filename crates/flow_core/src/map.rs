//! The narrow surface the controller needs from a map engine.

use crate::station::LngLat;

/// Position in screen pixels relative to the map's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Geographic to screen projection for the current viewport.
pub trait Projection {
    fn project(&self, position: LngLat) -> ScreenPoint;
}

/// Viewport notifications emitted by the map engine. All of them trigger the
/// same marker reposition pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportEvent {
    Move,
    Zoom,
    Resize,
    MoveEnd,
}

impl ViewportEvent {
    pub const ALL: [ViewportEvent; 4] = [
        ViewportEvent::Move,
        ViewportEvent::Zoom,
        ViewportEvent::Resize,
        ViewportEvent::MoveEnd,
    ];
}
