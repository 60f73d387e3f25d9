use glam::{Mat4, Vec3};
use panelview_common::PickCamera;

/// Camera-control contract used by the view controller.
///
/// Implementations own the motion algorithm. Retargeting while an animation
/// is in flight supersedes it.
pub trait CameraControls: PickCamera {
    /// Move the camera to `eye` looking at `target`, animated or immediately.
    fn set_look_at(&mut self, eye: Vec3, target: Vec3, animate: bool);

    /// Advance motion by `dt` seconds. Returns true while the camera moved.
    fn update(&mut self, dt: f32) -> bool;

    /// Orbit around the current target by a pointer drag delta in pixels.
    fn rotate(&mut self, dx: f32, dy: f32);

    /// Adopt a new viewport aspect ratio.
    fn set_aspect(&mut self, aspect: f32);
}

/// Orbit camera with exponential damping toward a goal pose.
pub struct OrbitCamera {
    pub position: Vec3,
    pub look_at: Vec3,
    goal_position: Vec3,
    goal_look_at: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Fraction of the remaining distance covered per 60 Hz frame.
    pub damping: f32,
    pub sensitivity: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(Vec3::new(-2.5, 2.25, 2.0))
    }
}

impl OrbitCamera {
    /// A camera resting at `position`, looking at the origin.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            look_at: Vec3::ZERO,
            goal_position: position,
            goal_look_at: Vec3::ZERO,
            fov: 45.0_f32.to_radians(),
            aspect: 2.0,
            near: 0.1,
            far: 500.0,
            damping: 0.1,
            sensitivity: 0.005,
        }
    }

    /// Pose the camera is heading toward.
    pub fn goal(&self) -> (Vec3, Vec3) {
        (self.goal_position, self.goal_look_at)
    }

    pub fn is_settled(&self) -> bool {
        self.position == self.goal_position && self.look_at == self.goal_look_at
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }
}

impl PickCamera for OrbitCamera {
    fn eye(&self) -> Vec3 {
        self.position
    }

    fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl CameraControls for OrbitCamera {
    fn set_look_at(&mut self, eye: Vec3, target: Vec3, animate: bool) {
        self.goal_position = eye;
        self.goal_look_at = target;
        if !animate {
            self.position = eye;
            self.look_at = target;
        }
    }

    fn update(&mut self, dt: f32) -> bool {
        if self.is_settled() {
            return false;
        }
        // Frame-rate independent form of "cover `damping` of the gap per frame".
        let k = 1.0 - (1.0 - self.damping).powf(dt * 60.0);
        self.position = self.position.lerp(self.goal_position, k);
        self.look_at = self.look_at.lerp(self.goal_look_at, k);
        if self.position.distance(self.goal_position) < 1e-4
            && self.look_at.distance(self.goal_look_at) < 1e-4
        {
            self.position = self.goal_position;
            self.look_at = self.goal_look_at;
        }
        true
    }

    fn rotate(&mut self, dx: f32, dy: f32) {
        let offset = self.goal_position - self.goal_look_at;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let mut yaw = offset.x.atan2(offset.z);
        let mut pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
        yaw -= dx * self.sensitivity;
        pitch += dy * self.sensitivity;
        pitch = pitch.clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
        let offset = Vec3::new(
            radius * pitch.cos() * yaw.sin(),
            radius * pitch.sin(),
            radius * pitch.cos() * yaw.cos(),
        );
        self.goal_position = self.goal_look_at + offset;
    }

    fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }
}
