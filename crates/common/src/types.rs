use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle for an interactive object in the scene registry.
///
/// Handles are dense indices assigned in registration order and are never
/// reused for the lifetime of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of structural element an object represents.
///
/// Hover permission is granted per class by the active transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectClass {
    Panel,
    Junction,
}

impl ObjectClass {
    /// Visibility an object of this class has when nothing highlights or hovers it.
    pub fn default_base_visible(self) -> bool {
        match self {
            Self::Panel => true,
            // Junctions stay hidden until selected or hovered.
            Self::Junction => false,
        }
    }
}

impl fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Panel => f.write_str("panel"),
            Self::Junction => f.write_str("junction"),
        }
    }
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    /// Place an object at `position`, turned by `radians` about the vertical axis.
    pub fn from_position_yaw(position: Vec3, radians: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_rotation_y(radians),
            ..Self::default()
        }
    }

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}
