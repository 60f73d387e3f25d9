use glam::Vec3;
use panelview_common::{ObjectClass, ObjectId};
use serde::{Deserialize, Serialize};

use crate::registry::ObjectRegistry;

/// Errors from transition lookups and definitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("transition index {index} out of range (table has {len})")]
    OutOfRange { index: i64, len: usize },
    #[error("object {0} is not registered")]
    UnknownObject(ObjectId),
}

/// Ordered, duplicate-free set of objects highlighted together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSet(Vec<ObjectId>);

impl HighlightSet {
    pub fn new(ids: impl IntoIterator<Item = ObjectId>) -> Self {
        ids.into_iter().collect()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObjectId> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ObjectId] {
        &self.0
    }

    /// The sole member, when the set has exactly one.
    pub fn single(&self) -> Option<ObjectId> {
        match self.0.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}

impl FromIterator<ObjectId> for HighlightSet {
    fn from_iter<I: IntoIterator<Item = ObjectId>>(iter: I) -> Self {
        let mut ids = Vec::new();
        for id in iter {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Self(ids)
    }
}

/// A bare object highlights on its own.
impl From<ObjectId> for HighlightSet {
    fn from(id: ObjectId) -> Self {
        Self(vec![id])
    }
}

impl From<Vec<ObjectId>> for HighlightSet {
    fn from(ids: Vec<ObjectId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<&[ObjectId]> for HighlightSet {
    fn from(ids: &[ObjectId]) -> Self {
        ids.iter().copied().collect()
    }
}

/// A named camera viewpoint with its highlight set and hover permissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub name: String,
    /// Camera position; the camera always looks at the scene origin.
    pub target: Vec3,
    pub highlight: HighlightSet,
    pub panel_hover: bool,
    pub junction_hover: bool,
}

impl Transition {
    /// A viewpoint with nothing highlighted and hover disabled for both classes.
    pub fn new(name: impl Into<String>, target: Vec3) -> Self {
        Self {
            name: name.into(),
            target,
            highlight: HighlightSet::default(),
            panel_hover: false,
            junction_hover: false,
        }
    }

    pub fn highlight(mut self, highlight: impl Into<HighlightSet>) -> Self {
        self.highlight = highlight.into();
        self
    }

    pub fn hover(mut self, panel: bool, junction: bool) -> Self {
        self.panel_hover = panel;
        self.junction_hover = junction;
        self
    }

    /// Whether pointer hover is granted to objects of `class` while active.
    pub fn hover_allowed(&self, class: ObjectClass) -> bool {
        match class {
            ObjectClass::Panel => self.panel_hover,
            ObjectClass::Junction => self.junction_hover,
        }
    }
}

/// Append-only table of transitions. Index = definition order, stable for
/// the life of the process.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    transitions: Vec<Transition>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transition and return its index.
    ///
    /// A singleton highlight set links its object back to this transition;
    /// if the object already had a link, this definition replaces it.
    pub fn define(&mut self, registry: &mut ObjectRegistry, transition: Transition) -> Result<usize, TransitionError> {
        if let Some(missing) = transition.highlight.iter().find(|id| !registry.contains(**id)) {
            return Err(TransitionError::UnknownObject(*missing));
        }
        let index = self.transitions.len();
        if let Some(only) = transition.highlight.single() {
            registry.link_best_transition(only, index);
        }
        tracing::debug!(index, name = %transition.name, members = transition.highlight.len(), "transition defined");
        self.transitions.push(transition);
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Result<&Transition, TransitionError> {
        self.transitions.get(index).ok_or(TransitionError::OutOfRange {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len: self.transitions.len(),
        })
    }

    /// Validate a raw index coming from a driver, which may be negative.
    pub fn checked_index(&self, index: i64) -> Result<usize, TransitionError> {
        usize::try_from(index)
            .ok()
            .filter(|i| *i < self.transitions.len())
            .ok_or(TransitionError::OutOfRange {
                index,
                len: self.transitions.len(),
            })
    }

    /// Index of the first transition with the given name.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.transitions.iter().position(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter()
    }
}
