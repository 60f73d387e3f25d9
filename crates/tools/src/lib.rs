//! Developer tooling: read-only inspection of interaction state.

mod inspector;

pub use inspector::{ObjectInfo, SceneInspector, SceneSummary};
