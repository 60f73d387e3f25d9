//! Pointer input: hover picking and the action set drivers send to the
//! view controller.
//!
//! # Invariants
//! - Picking only reads the registry; it never mutates object state.
//! - An inactive pointer (off-surface or gesture in progress) picks nothing.

pub mod action;
pub mod picker;
pub mod pointer;

pub use action::Action;
pub use picker::{Hit, first_allowed, intersect_all, pick};
pub use pointer::PointerState;
