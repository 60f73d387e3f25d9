//! Interaction kernel: object registry, transition table and the
//! highlight/hover resolver.
//!
//! # Invariants
//! - Visibility and emissive level come only from `compute_visual_state`.
//! - Highlighted objects are exactly the members of the active highlight set.
//! - At most one object is the pointer-hover target.
//! - Transition indices are stable; the table is append-only.

pub mod registry;
pub mod resolve;
pub mod transition;

pub use registry::{InteractiveObject, ObjectRegistry, ObjectSpec, RegistryError, VisualUpdate};
pub use resolve::{EmissiveLevel, HighlightResolver, VisualState, compute_visual_state};
pub use transition::{HighlightSet, Transition, TransitionError, TransitionTable};
