//! Rendering adapter: renderer-agnostic interface and camera controls.
//!
//! # Invariants
//! - Renderers never mutate interaction state.
//! - Render state derives from pushed visual updates and the view.
//!
//! # Workaround
//! Ships a debug text renderer in place of a GPU backend. The trait is
//! stable; a real backend plugs in without changing consumers.

mod camera;
mod renderer;

pub use camera::{CameraControls, OrbitCamera};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};
