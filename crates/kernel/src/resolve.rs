use panelview_common::ObjectId;
use serde::{Deserialize, Serialize};

use crate::registry::{InteractiveObject, ObjectRegistry};
use crate::transition::HighlightSet;

/// Emissive intensity tier pushed to an object's material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmissiveLevel {
    None,
    Low,
    High,
}

impl EmissiveLevel {
    /// Emissive colour as 0xRRGGBB.
    pub fn rgb(self) -> u32 {
        match self {
            Self::None => 0x000000,
            Self::Low => 0x554422,
            Self::High => 0xaa8844,
        }
    }
}

/// The only two outputs a renderer receives for an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualState {
    pub visible: bool,
    pub emissive: EmissiveLevel,
}

/// Derive an object's visual state.
///
/// Highlight outranks hover; hover is either the explicit flag or the object
/// being the current pointer target. Otherwise the object falls back to its
/// base visibility with no emissive.
pub fn compute_visual_state(object: &InteractiveObject, pointer_target: Option<ObjectId>) -> VisualState {
    if object.highlighted {
        VisualState {
            visible: true,
            emissive: EmissiveLevel::High,
        }
    } else if object.hovered || pointer_target == Some(object.id) {
        VisualState {
            visible: true,
            emissive: EmissiveLevel::Low,
        }
    } else {
        VisualState {
            visible: object.base_visible,
            emissive: EmissiveLevel::None,
        }
    }
}

/// Owns the selection state (active highlight set and pointer-hover target)
/// and is the only writer of the `highlighted` and `hovered` flags.
///
/// Every flag change is followed by a recompute of that object's visual
/// state, which the registry logs for the renderer when it changed.
#[derive(Debug, Clone, Default)]
pub struct HighlightResolver {
    active: HighlightSet,
    pointer_target: Option<ObjectId>,
}

impl HighlightResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Objects currently highlighted.
    pub fn active_highlight(&self) -> &HighlightSet {
        &self.active
    }

    /// Object currently under the pointer, if any.
    pub fn pointer_target(&self) -> Option<ObjectId> {
        self.pointer_target
    }

    /// Replace the active highlight set.
    ///
    /// Objects present in both sets keep `highlighted == true` throughout and
    /// produce no visual update.
    pub fn set_highlight(&mut self, registry: &mut ObjectRegistry, highlight: HighlightSet) {
        let previous = std::mem::replace(&mut self.active, highlight);
        for id in previous.iter().filter(|id| !self.active.contains(**id)) {
            if let Some(object) = registry.get_mut(*id) {
                object.highlighted = false;
            }
            self.refresh(registry, *id);
        }
        for id in self.active.iter() {
            if let Some(object) = registry.get_mut(*id) {
                object.highlighted = true;
            }
            self.refresh(registry, *id);
        }
        tracing::debug!(count = self.active.len(), "highlight set replaced");
    }

    /// Set the explicit hover flag on every listed object.
    pub fn set_hovered(&mut self, registry: &mut ObjectRegistry, ids: &HighlightSet, enable: bool) {
        for id in ids.iter() {
            if let Some(object) = registry.get_mut(*id) {
                object.hovered = enable;
            }
            self.refresh(registry, *id);
        }
    }

    /// Move the pointer-hover target. Both the old and the new target are
    /// recomputed. Returns true when the target changed.
    pub fn set_pointer_target(&mut self, registry: &mut ObjectRegistry, target: Option<ObjectId>) -> bool {
        if self.pointer_target == target {
            return false;
        }
        let old = std::mem::replace(&mut self.pointer_target, target);
        tracing::debug!(?old, new = ?target, "pointer hover changed");
        if let Some(id) = old {
            self.refresh(registry, id);
        }
        if let Some(id) = target {
            self.refresh(registry, id);
        }
        true
    }

    /// Recompute one object's visual state and log it if it changed.
    pub fn refresh(&self, registry: &mut ObjectRegistry, id: ObjectId) {
        let Some(object) = registry.get(id) else {
            return;
        };
        let state = compute_visual_state(object, self.pointer_target);
        registry.push_visual(id, state);
    }
}
