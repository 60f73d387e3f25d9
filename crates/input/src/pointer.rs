use glam::Vec2;
use panelview_common::Viewport;

/// Pointer position plus the two signals that gate picking: whether the
/// pointer is over the render surface, and whether a camera gesture owns it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    ndc: Option<Vec2>,
    gesture_active: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer moved to a pixel position on the surface.
    pub fn move_to(&mut self, viewport: &Viewport, x: f32, y: f32) {
        self.ndc = Some(viewport.to_ndc(x, y));
    }

    /// Pointer moved to a position already in normalized device coordinates.
    pub fn move_to_ndc(&mut self, ndc: Vec2) {
        self.ndc = Some(ndc);
    }

    /// Pointer left the surface.
    pub fn leave(&mut self) {
        self.ndc = None;
    }

    pub fn begin_gesture(&mut self) {
        self.gesture_active = true;
    }

    pub fn end_gesture(&mut self) {
        self.gesture_active = false;
    }

    pub fn gesture_active(&self) -> bool {
        self.gesture_active
    }

    /// Last known position in normalized device coordinates.
    pub fn ndc(&self) -> Option<Vec2> {
        self.ndc
    }

    /// The pointer may drive hover picking.
    pub fn active(&self) -> bool {
        self.ndc.is_some() && !self.gesture_active
    }
}
