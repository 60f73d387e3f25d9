use glam::Vec3;
use panelview_common::ObjectId;
use panelview_kernel::{ObjectRegistry, VisualState, VisualUpdate};
use std::collections::BTreeMap;

use crate::camera::OrbitCamera;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(-2.5, 2.25, 2.0),
            target: Vec3::ZERO,
            fov_degrees: 45.0,
        }
    }
}

impl From<&OrbitCamera> for RenderView {
    fn from(camera: &OrbitCamera) -> Self {
        Self {
            eye: camera.position,
            target: camera.look_at,
            fov_degrees: camera.fov.to_degrees(),
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer only learns two things per object: whether it is visible and
/// its emissive level. Interaction flags stay in the registry.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Apply a per-object material change.
    fn apply_visual(&mut self, update: &VisualUpdate);

    /// Render one frame of the scene from the given view.
    fn render(&self, registry: &ObjectRegistry, view: &RenderView) -> Self::Output;
}

/// Text renderer for CLI output, logging and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    materials: BTreeMap<ObjectId, VisualState>,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Material state last applied for `id`.
    pub fn material(&self, id: ObjectId) -> Option<VisualState> {
        self.materials.get(&id).copied()
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn apply_visual(&mut self, update: &VisualUpdate) {
        self.materials.insert(update.id, update.state);
    }

    fn render(&self, registry: &ObjectRegistry, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Scene ({} objects) ===\n", registry.len()));
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        for object in registry.iter() {
            let line = match self.materials.get(&object.id) {
                Some(state) if state.visible => {
                    format!("visible emissive=#{:06x}", state.emissive.rgb())
                }
                Some(_) => "hidden".to_string(),
                None => "no material".to_string(),
            };
            out.push_str(&format!(
                "  [{} {} {}] {}\n",
                object.id, object.class, object.name, line
            ));
        }

        out
    }
}
