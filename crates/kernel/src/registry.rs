use glam::Vec3;
use panelview_common::{ObjectClass, ObjectId, Transform};
use serde::{Deserialize, Serialize};

use crate::resolve::{EmissiveLevel, VisualState};

/// Errors from registering objects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("registry is full ({0} objects)")]
    Full(usize),
}

/// Handle for the object at registration position `index`.
fn handle_for(index: usize) -> Result<ObjectId, RegistryError> {
    u32::try_from(index)
        .map(ObjectId)
        .map_err(|_| RegistryError::Full(index))
}

/// Placement and pick shape of an object, supplied by the scene builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub name: String,
    pub transform: Transform,
    /// Half-extents of the object's box in its local space.
    pub half_extents: Vec3,
}

impl ObjectSpec {
    /// A unit-box object at the origin.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            half_extents: Vec3::splat(0.5),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_half_extents(mut self, half_extents: Vec3) -> Self {
        self.half_extents = half_extents;
        self
    }
}

/// Interaction record for one panel or junction.
///
/// The renderer's scene nodes never carry these flags. It only receives the
/// derived [`VisualState`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractiveObject {
    pub id: ObjectId,
    pub class: ObjectClass,
    pub name: String,
    pub transform: Transform,
    pub half_extents: Vec3,
    /// Visibility when neither highlighted nor hovered.
    pub base_visible: bool,
    /// Whether pointer picking may select this object. Set per transition.
    pub hover_allowed: bool,
    pub highlighted: bool,
    /// Explicit hover flag, independent of the pointer.
    pub hovered: bool,
    /// Transition that highlights this object alone, if any.
    pub best_transition: Option<usize>,
    /// Last visual state pushed for this object.
    pub visual: VisualState,
}

/// A visual state change waiting to be applied by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualUpdate {
    pub id: ObjectId,
    pub state: VisualState,
}

/// Side table of every interactive object in the scene.
///
/// Objects are created once at scene build and live until teardown; handles
/// are indices into registration order.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    objects: Vec<InteractiveObject>,
    /// Append-only log of visual changes, drained by the renderer.
    updates: Vec<VisualUpdate>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object and return its handle.
    ///
    /// The object's initial visual state is logged so a renderer starts in sync.
    /// Fails once every `u32` handle is taken.
    pub fn register(
        &mut self,
        spec: ObjectSpec,
        class: ObjectClass,
        base_visible: bool,
    ) -> Result<ObjectId, RegistryError> {
        let id = handle_for(self.objects.len())?;
        let visual = VisualState {
            visible: base_visible,
            emissive: EmissiveLevel::None,
        };
        self.objects.push(InteractiveObject {
            id,
            class,
            name: spec.name,
            transform: spec.transform,
            half_extents: spec.half_extents,
            base_visible,
            hover_allowed: false,
            highlighted: false,
            hovered: false,
            best_transition: None,
            visual,
        });
        self.updates.push(VisualUpdate { id, state: visual });
        Ok(id)
    }

    /// Handles of every object, or only those of `class`, in registration order.
    pub fn all(&self, class: Option<ObjectClass>) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|o| class.is_none_or(|c| o.class == c))
            .map(|o| o.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        id.index() < self.objects.len()
    }

    pub fn get(&self, id: ObjectId) -> Option<&InteractiveObject> {
        self.objects.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: ObjectId) -> Option<&mut InteractiveObject> {
        self.objects.get_mut(id.index())
    }

    /// Find an object by its scene name.
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects.iter().find(|o| o.name == name).map(|o| o.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InteractiveObject> {
        self.objects.iter()
    }

    /// Grant or revoke pointer hover for every object of `class`.
    pub fn set_class_hover_allowed(&mut self, class: ObjectClass, allowed: bool) {
        for object in self.objects.iter_mut().filter(|o| o.class == class) {
            object.hover_allowed = allowed;
        }
    }

    /// Grant or revoke pointer hover for a single object. Returns false for
    /// an unknown handle.
    pub fn set_hover_allowed(&mut self, id: ObjectId, allowed: bool) -> bool {
        match self.get_mut(id) {
            Some(object) => {
                object.hover_allowed = allowed;
                true
            }
            None => false,
        }
    }

    /// Record the transition that highlights `id` alone. A later call
    /// overwrites an earlier one.
    pub(crate) fn link_best_transition(&mut self, id: ObjectId, index: usize) {
        if let Some(object) = self.get_mut(id) {
            if let Some(previous) = object.best_transition.replace(index) {
                tracing::debug!(%id, previous, index, "best transition link overwritten");
            }
        }
    }

    /// Store a freshly computed visual state, logging it when it differs from
    /// the last one pushed.
    pub(crate) fn push_visual(&mut self, id: ObjectId, state: VisualState) {
        let Some(object) = self.get_mut(id) else {
            return;
        };
        if object.visual != state {
            object.visual = state;
            self.updates.push(VisualUpdate { id, state });
        }
    }

    /// Drain and return pending visual updates.
    pub fn drain_visual_updates(&mut self) -> Vec<VisualUpdate> {
        std::mem::take(&mut self.updates)
    }

    /// Read-only access to pending visual updates.
    pub fn pending_visual_updates(&self) -> &[VisualUpdate] {
        &self.updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_starts_empty() {
        let reg = ObjectRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.all(None).is_empty());
    }

    #[test]
    fn handles_are_unique_and_sequential() {
        let mut reg = ObjectRegistry::new();
        let a = reg.register(ObjectSpec::named("a"), ObjectClass::Panel, true).unwrap();
        let b = reg.register(ObjectSpec::named("b"), ObjectClass::Junction, false).unwrap();
        assert_ne!(a, b);
        assert_eq!(reg.all(None), vec![a, b]);
        assert!(reg.contains(b));
        assert!(!reg.contains(ObjectId(2)));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn handles_stop_at_u32_range() {
        assert_eq!(handle_for(7), Ok(ObjectId(7)));
        assert_eq!(handle_for(u32::MAX as usize), Ok(ObjectId(u32::MAX)));
        let past = u32::MAX as usize + 1;
        assert_eq!(handle_for(past), Err(RegistryError::Full(past)));
    }

    #[test]
    fn all_filters_by_class() {
        let mut reg = ObjectRegistry::new();
        let p = reg.register(ObjectSpec::named("p"), ObjectClass::Panel, true).unwrap();
        let j = reg.register(ObjectSpec::named("j"), ObjectClass::Junction, false).unwrap();
        assert_eq!(reg.all(Some(ObjectClass::Panel)), vec![p]);
        assert_eq!(reg.all(Some(ObjectClass::Junction)), vec![j]);
    }

    #[test]
    fn registration_logs_initial_visual() {
        let mut reg = ObjectRegistry::new();
        let j = reg.register(ObjectSpec::named("j"), ObjectClass::Junction, false).unwrap();
        let updates = reg.drain_visual_updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].id, j);
        assert!(!updates[0].state.visible);
        assert!(reg.pending_visual_updates().is_empty());
    }

    #[test]
    fn unchanged_visual_is_not_logged() {
        let mut reg = ObjectRegistry::new();
        let p = reg.register(ObjectSpec::named("p"), ObjectClass::Panel, true).unwrap();
        reg.drain_visual_updates();
        let same = reg.get(p).unwrap().visual;
        reg.push_visual(p, same);
        assert!(reg.pending_visual_updates().is_empty());
    }

    #[test]
    fn hover_permission_by_class_and_object() {
        let mut reg = ObjectRegistry::new();
        let p = reg.register(ObjectSpec::named("p"), ObjectClass::Panel, true).unwrap();
        let j = reg.register(ObjectSpec::named("j"), ObjectClass::Junction, false).unwrap();
        reg.set_class_hover_allowed(ObjectClass::Junction, true);
        assert!(!reg.get(p).unwrap().hover_allowed);
        assert!(reg.get(j).unwrap().hover_allowed);
        assert!(reg.set_hover_allowed(p, true));
        assert!(reg.get(p).unwrap().hover_allowed);
        assert!(!reg.set_hover_allowed(ObjectId(9), true));
    }

    #[test]
    fn find_by_name() {
        let mut reg = ObjectRegistry::new();
        reg.register(ObjectSpec::named("p1"), ObjectClass::Panel, true).unwrap();
        let p2 = reg.register(ObjectSpec::named("p2"), ObjectClass::Panel, true).unwrap();
        assert_eq!(reg.find("p2"), Some(p2));
        assert_eq!(reg.find("nope"), None);
    }

    #[test]
    fn best_transition_last_link_wins() {
        let mut reg = ObjectRegistry::new();
        let p = reg.register(ObjectSpec::named("p"), ObjectClass::Panel, true).unwrap();
        reg.link_best_transition(p, 2);
        reg.link_best_transition(p, 5);
        assert_eq!(reg.get(p).unwrap().best_transition, Some(5));
    }
}
