use panelview_common::{ObjectClass, ObjectId};
use panelview_kernel::{EmissiveLevel, ObjectRegistry, TransitionTable};
use panelview_render::CameraControls;
use panelview_view::{Clock, ViewController};
use serde::Serialize;

/// Scene inspector for developer tooling.
///
/// Read-only queries against the controller state for debugging and CLI
/// output.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the interaction state.
    pub fn summary<C: CameraControls, K: Clock>(view: &ViewController<C, K>) -> SceneSummary {
        let registry = view.registry();
        SceneSummary {
            frame: view.frame_count(),
            object_count: registry.len(),
            transition_count: view.transitions().len(),
            active_transition: view
                .active_transition()
                .and_then(|i| view.transitions().get(i).ok())
                .map(|t| t.name.clone()),
            hovered: view
                .hovered_object()
                .and_then(|id| registry.get(id))
                .map(|o| o.name.clone()),
            highlighted: view.active_highlight().len(),
            pending_updates: registry.pending_visual_updates().len(),
        }
    }

    /// Interaction flags and visual output of a single object.
    pub fn inspect_object(registry: &ObjectRegistry, id: ObjectId) -> Option<ObjectInfo> {
        registry.get(id).map(|o| ObjectInfo {
            id,
            name: o.name.clone(),
            class: o.class,
            hover_allowed: o.hover_allowed,
            highlighted: o.highlighted,
            hovered: o.hovered,
            best_transition: o.best_transition,
            visible: o.visual.visible,
            emissive: o.visual.emissive,
        })
    }

    /// Info for every object in registration order.
    pub fn list_objects(registry: &ObjectRegistry) -> Vec<ObjectInfo> {
        registry
            .all(None)
            .into_iter()
            .filter_map(|id| Self::inspect_object(registry, id))
            .collect()
    }

    /// One line per transition: index, name and highlighted object names.
    pub fn list_transitions(transitions: &TransitionTable, registry: &ObjectRegistry) -> Vec<String> {
        transitions
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let names: Vec<&str> = t
                    .highlight
                    .iter()
                    .filter_map(|id| registry.get(*id).map(|o| o.name.as_str()))
                    .collect();
                format!(
                    "{i:>2} {:<10} target=({:.2}, {:.2}, {:.2}) highlight=[{}] hover(panel={}, junction={})",
                    t.name,
                    t.target.x,
                    t.target.y,
                    t.target.z,
                    names.join(", "),
                    t.panel_hover,
                    t.junction_hover
                )
            })
            .collect()
    }
}

/// Summary of the interaction state.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub frame: u64,
    pub object_count: usize,
    pub transition_count: usize,
    pub active_transition: Option<String>,
    pub hovered: Option<String>,
    pub highlighted: usize,
    pub pending_updates: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: frame={} objects={} transitions={} active={} hovered={} highlighted={} pending_updates={}",
            self.frame,
            self.object_count,
            self.transition_count,
            self.active_transition.as_deref().unwrap_or("-"),
            self.hovered.as_deref().unwrap_or("-"),
            self.highlighted,
            self.pending_updates
        )
    }
}

/// Detailed info about a single object.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectInfo {
    pub id: ObjectId,
    pub name: String,
    pub class: ObjectClass,
    pub hover_allowed: bool,
    pub highlighted: bool,
    pub hovered: bool,
    pub best_transition: Option<usize>,
    pub visible: bool,
    pub emissive: EmissiveLevel,
}

impl std::fmt::Display for ObjectInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} visible={} emissive={:?} highlighted={} hovered={} hover_allowed={}",
            self.id,
            self.class,
            self.name,
            self.visible,
            self.emissive,
            self.highlighted,
            self.hovered,
            self.hover_allowed,
        )?;
        if let Some(best) = self.best_transition {
            write!(f, " best={best}")?;
        }
        Ok(())
    }
}
