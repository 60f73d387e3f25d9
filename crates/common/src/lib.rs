//! Shared types for the panelview engine: object handles, transforms, pick
//! rays and viewport math.

mod ray;
mod types;
mod viewport;

pub use ray::{PickCamera, Ray};
pub use types::{ObjectClass, ObjectId, Transform};
pub use viewport::Viewport;
