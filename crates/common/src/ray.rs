use glam::{Mat4, Vec2, Vec3};

use crate::Transform;

/// A ray in world space. The direction is always normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Like [`Ray::new`], but `None` when the origin is not finite or the
    /// direction cannot be normalized (zero, infinite or NaN).
    pub fn try_new(origin: Vec3, direction: Vec3) -> Option<Self> {
        if !origin.is_finite() {
            return None;
        }
        direction
            .try_normalize()
            .map(|direction| Self { origin, direction })
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the surface of a box of the given
    /// half-extents placed by `transform`, or `None` on a miss.
    ///
    /// When the origin is inside the box the exit distance is returned.
    pub fn intersect_box(&self, transform: &Transform, half_extents: Vec3) -> Option<f32> {
        // The ray is carried into box-local space with the inverse affine, so the
        // parameter `t` stays a world-space distance.
        let inv = transform.to_affine().inverse();
        let o = inv.transform_point3(self.origin);
        let d = inv.transform_vector3(self.direction);
        if !o.is_finite() || !d.is_finite() || !half_extents.is_finite() {
            return None;
        }

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        for axis in 0..3 {
            let (o, d, h) = (o[axis], d[axis], half_extents[axis]);
            if d.abs() < 1e-8 {
                if o < -h || o > h {
                    return None;
                }
                continue;
            }
            let t1 = (-h - o) / d;
            let t2 = (h - o) / d;
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
        }

        if t_far < t_near.max(0.0) {
            return None;
        }
        Some(if t_near >= 0.0 { t_near } else { t_far })
    }
}

/// Read-only camera contract needed to turn a pointer position into a pick ray.
pub trait PickCamera {
    /// Camera position in world space.
    fn eye(&self) -> Vec3;

    /// Combined projection * view matrix (depth range 0..1, right-handed).
    fn view_projection(&self) -> Mat4;

    /// Ray from the eye through a point in normalized device coordinates.
    ///
    /// `None` when the camera is degenerate (zero aspect, eye on its target)
    /// and the unprojection does not produce a usable direction.
    fn ray_through(&self, ndc: Vec2) -> Option<Ray> {
        let eye = self.eye();
        let inv = self.view_projection().inverse();
        let on_far = inv.project_point3(ndc.extend(1.0));
        Ray::try_new(eye, on_far - eye)
    }
}
