use panelview_common::Transform;
use panelview_kernel::{HighlightSet, ObjectRegistry, ObjectSpec, Transition, TransitionTable};
use std::collections::HashSet;

use crate::config::{ConfigError, SceneConfig};

/// The interactive part of a built scene: objects and viewpoints.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub registry: ObjectRegistry,
    pub transitions: TransitionTable,
}

impl Scene {
    /// Register every configured object, then define every transition in
    /// order, so transition indices match their position in the config.
    pub fn build(config: &SceneConfig) -> Result<Self, ConfigError> {
        config.camera.validate()?;
        let mut registry = ObjectRegistry::new();
        let mut seen = HashSet::new();
        for object in &config.objects {
            if !seen.insert(object.name.as_str()) {
                return Err(ConfigError::DuplicateObject(object.name.clone()));
            }
            let spec = ObjectSpec::named(object.name.clone())
                .with_transform(Transform::from_position_yaw(
                    object.position,
                    object.yaw_degrees.to_radians(),
                ))
                .with_half_extents(object.size * 0.5);
            let base_visible = object
                .base_visible
                .unwrap_or(object.class.default_base_visible());
            registry.register(spec, object.class, base_visible)?;
        }

        let mut transitions = TransitionTable::new();
        for t in &config.transitions {
            t.validate(&config.camera)?;
            let highlight = t
                .highlight
                .iter()
                .map(|name| {
                    registry.find(name).ok_or_else(|| ConfigError::UnknownObject {
                        transition: t.name.clone(),
                        object: name.clone(),
                    })
                })
                .collect::<Result<HighlightSet, _>>()?;
            let target = t.resolved_position(&config.camera);
            transitions.define(
                &mut registry,
                Transition::new(t.name.clone(), target)
                    .highlight(highlight)
                    .hover(t.panel_hover, t.junction_hover),
            )?;
        }

        tracing::info!(
            objects = registry.len(),
            transitions = transitions.len(),
            "scene built"
        );
        Ok(Self {
            registry,
            transitions,
        })
    }
}
