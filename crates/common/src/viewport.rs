use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pixel dimensions of the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Convert a pixel position (origin top-left, y down) into normalized
    /// device coordinates (x and y in [-1, 1], y up).
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        let w = self.width.max(1) as f32;
        let h = self.height.max(1) as f32;
        Vec2::new(x / w * 2.0 - 1.0, -(y / h) * 2.0 + 1.0)
    }

    /// Adopt a new surface size. Returns true when the size actually changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let changed = self.width != width || self.height != height;
        if changed {
            self.width = width;
            self.height = height;
        }
        changed
    }
}

impl Default for Viewport {
    fn default() -> Self {
        // 2:1 matches the default camera aspect.
        Self::new(300, 150)
    }
}
