//! View coordination: the controller drivers call, the frame clock, and
//! scene configuration.
//!
//! # Invariants
//! - Within a frame tick the camera updates before hover is re-picked.
//! - Only the controller mutates interaction state.
//! - Bad transition indices are reported, never clamped.

mod clock;
mod config;
mod controller;
mod scene;

pub use clock::{Clock, FixedClock, MAX_FRAME_DELTA, SystemClock};
pub use config::{
    CameraConfig, ConfigError, FileFormat, ObjectConfig, SceneConfig, TransitionConfig,
};
pub use controller::ViewController;
pub use scene::Scene;
