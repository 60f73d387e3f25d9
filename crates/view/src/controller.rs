use glam::Vec3;
use panelview_common::{ObjectClass, ObjectId, Viewport};
use panelview_input::{Action, PointerState, pick};
use panelview_kernel::{HighlightResolver, HighlightSet, ObjectRegistry, TransitionError, TransitionTable};
use panelview_render::{CameraControls, Renderer};

use crate::clock::Clock;
use crate::scene::Scene;

/// Façade that drivers call to move between viewpoints and to feed pointer
/// input. Owns all mutable interaction state.
///
/// Each frame the external loop calls [`ViewController::on_frame_tick`],
/// then [`ViewController::flush_visuals`], then renders.
pub struct ViewController<C: CameraControls, K: Clock> {
    registry: ObjectRegistry,
    transitions: TransitionTable,
    resolver: HighlightResolver,
    pointer: PointerState,
    viewport: Viewport,
    camera: C,
    clock: K,
    active_transition: Option<usize>,
    frames: u64,
}

impl<C: CameraControls, K: Clock> ViewController<C, K> {
    pub fn new(scene: Scene, camera: C, clock: K) -> Self {
        let mut camera = camera;
        let viewport = Viewport::default();
        camera.set_aspect(viewport.aspect());
        Self {
            registry: scene.registry,
            transitions: scene.transitions,
            resolver: HighlightResolver::new(),
            pointer: PointerState::new(),
            viewport,
            camera,
            clock,
            active_transition: None,
            frames: 0,
        }
    }

    /// Fly to a transition, highlight its objects and apply its hover
    /// permissions.
    pub fn activate_transition(&mut self, index: usize) -> Result<(), TransitionError> {
        let transition = self.transitions.get(index)?;
        tracing::debug!(index, name = %transition.name, "activating transition");

        self.camera.set_look_at(transition.target, Vec3::ZERO, true);
        self.resolver
            .set_highlight(&mut self.registry, transition.highlight.clone());
        self.registry
            .set_class_hover_allowed(ObjectClass::Panel, transition.panel_hover);
        self.registry
            .set_class_hover_allowed(ObjectClass::Junction, transition.junction_hover);
        self.active_transition = Some(index);
        Ok(())
    }

    /// Set or clear the explicit hover flag on a transition's objects.
    pub fn set_transition_hover(&mut self, index: usize, enable: bool) -> Result<(), TransitionError> {
        let members = self.transitions.get(index)?.highlight.clone();
        self.resolver.set_hovered(&mut self.registry, &members, enable);
        Ok(())
    }

    /// Advance one frame: camera motion first, then hover re-picking against
    /// the updated camera.
    pub fn on_frame_tick(&mut self) {
        let _span = tracing::info_span!("frame_tick", frame = self.frames).entered();
        let dt = self.clock.delta();
        self.camera.update(dt);
        let target = pick(&self.pointer, &self.camera, &self.registry);
        self.resolver.set_pointer_target(&mut self.registry, target);
        self.frames += 1;
    }

    /// Activate the transition that highlights the hovered object alone.
    ///
    /// Returns `None`, with no side effects, when nothing is hovered or the
    /// hovered object has no such transition.
    pub fn best_transition_for_hover(&mut self) -> Option<usize> {
        let index = self
            .hovered_object()
            .and_then(|id| self.registry.get(id))
            .and_then(|object| object.best_transition)?;
        match self.activate_transition(index) {
            Ok(()) => Some(index),
            Err(e) => {
                tracing::warn!("best transition link is stale: {e}");
                None
            }
        }
    }

    /// Pointer moved to a pixel position on the render surface.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer.move_to(&self.viewport, x, y);
    }

    /// Pointer left the render surface.
    pub fn pointer_left(&mut self) {
        self.pointer.leave();
    }

    /// A camera drag started. Hover picking pauses until it ends.
    pub fn begin_gesture(&mut self) {
        self.pointer.begin_gesture();
    }

    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.camera.rotate(dx, dy);
    }

    pub fn end_gesture(&mut self) {
        self.pointer.end_gesture();
    }

    /// Adopt a new surface size. Returns true when the camera aspect changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let changed = self.viewport.resize(width, height);
        if changed {
            self.camera.set_aspect(self.viewport.aspect());
            tracing::debug!(width, height, "viewport resized");
        }
        changed
    }

    /// Dispatch a driver action.
    ///
    /// Returns the index of the transition the action activated, if any.
    pub fn apply(&mut self, action: &Action) -> Result<Option<usize>, TransitionError> {
        match *action {
            Action::Activate { index } => {
                let index = self.transitions.checked_index(index)?;
                self.activate_transition(index)?;
                Ok(Some(index))
            }
            Action::Hover { index, enable } => {
                let index = self.transitions.checked_index(index)?;
                self.set_transition_hover(index, enable)?;
                Ok(None)
            }
            Action::PointerMove { x, y } => {
                self.pointer_moved(x, y);
                Ok(None)
            }
            Action::PointerLeave => {
                self.pointer_left();
                Ok(None)
            }
            Action::GestureStart => {
                self.begin_gesture();
                Ok(None)
            }
            Action::GestureDrag { dx, dy } => {
                self.drag(dx, dy);
                Ok(None)
            }
            Action::GestureEnd => {
                self.end_gesture();
                Ok(None)
            }
            Action::Tick { frames } => {
                for _ in 0..frames {
                    self.on_frame_tick();
                }
                Ok(None)
            }
            Action::BestTransition => Ok(self.best_transition_for_hover()),
            Action::Resize { width, height } => {
                self.resize(width, height);
                Ok(None)
            }
        }
    }

    /// Push pending visual changes to a renderer. Returns how many were applied.
    pub fn flush_visuals<R: Renderer>(&mut self, renderer: &mut R) -> usize {
        let updates = self.registry.drain_visual_updates();
        for update in &updates {
            renderer.apply_visual(update);
        }
        updates.len()
    }

    /// Object currently under the pointer.
    pub fn hovered_object(&self) -> Option<ObjectId> {
        self.resolver.pointer_target()
    }

    pub fn active_highlight(&self) -> &HighlightSet {
        self.resolver.active_highlight()
    }

    /// Most recently activated transition.
    pub fn active_transition(&self) -> Option<usize> {
        self.active_transition
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of frame ticks run so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::{CameraConfig, ObjectConfig, SceneConfig, TransitionConfig};
    use panelview_common::PickCamera;
    use panelview_kernel::EmissiveLevel;
    use panelview_render::{DebugTextRenderer, OrbitCamera};

    type Controller = ViewController<OrbitCamera, FixedClock>;

    fn controller() -> Controller {
        let config = SceneConfig::default();
        let scene = Scene::build(&config).unwrap();
        ViewController::new(scene, config.camera.build_camera(), FixedClock::default())
    }

    fn id(c: &Controller, name: &str) -> ObjectId {
        c.registry().find(name).unwrap()
    }

    fn visual(c: &Controller, name: &str) -> (bool, EmissiveLevel) {
        let v = c.registry().get(id(c, name)).unwrap().visual;
        (v.visible, v.emissive)
    }

    /// Put the pointer over the projection of a world-space point.
    fn point_at(c: &mut Controller, world: Vec3) {
        let ndc = c.camera().view_projection().project_point3(world);
        let vp = c.viewport();
        let x = (ndc.x + 1.0) / 2.0 * vp.width as f32;
        let y = (1.0 - ndc.y) / 2.0 * vp.height as f32;
        c.pointer_moved(x, y);
    }

    fn point_at_centre(c: &mut Controller) {
        let vp = c.viewport();
        c.pointer_moved(vp.width as f32 / 2.0, vp.height as f32 / 2.0);
    }

    #[test]
    fn single_panel_transition_highlights_only_it() {
        let mut c = controller();
        c.activate_transition(3).unwrap();
        assert_eq!(visual(&c, "p2"), (true, EmissiveLevel::High));
        assert_eq!(visual(&c, "p1"), (true, EmissiveLevel::None));
        assert_eq!(visual(&c, "p3"), (true, EmissiveLevel::None));
        assert_eq!(c.active_transition(), Some(3));
        assert_eq!(c.camera().goal().0, Vec3::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn switching_transitions_moves_highlight() {
        let mut c = controller();
        c.activate_transition(1).unwrap();
        c.activate_transition(5).unwrap();
        let highlighted: Vec<&str> = c
            .registry()
            .iter()
            .filter(|o| o.highlighted)
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(highlighted, vec!["j1", "j2", "j3", "j4"]);
        assert_eq!(visual(&c, "p1"), (true, EmissiveLevel::None));
        assert_eq!(visual(&c, "j1"), (true, EmissiveLevel::High));
    }

    #[test]
    fn hover_permissions_follow_transition() {
        let mut c = controller();
        c.activate_transition(5).unwrap();
        assert!(!c.registry().get(id(&c, "p1")).unwrap().hover_allowed);
        assert!(c.registry().get(id(&c, "j1")).unwrap().hover_allowed);
        c.activate_transition(0).unwrap();
        assert!(c.registry().get(id(&c, "p1")).unwrap().hover_allowed);
        assert!(!c.registry().get(id(&c, "j1")).unwrap().hover_allowed);
    }

    #[test]
    fn out_of_range_indices_are_reported() {
        let mut c = controller();
        let n = c.transitions().len();
        assert!(matches!(
            c.apply(&Action::Activate { index: -1 }),
            Err(TransitionError::OutOfRange { index: -1, .. })
        ));
        assert!(matches!(
            c.apply(&Action::Activate { index: n as i64 }),
            Err(TransitionError::OutOfRange { .. })
        ));
        assert!(c.activate_transition(n).is_err());
        assert!(c.set_transition_hover(n, true).is_err());
        assert!(matches!(
            c.apply(&Action::Hover { index: -1, enable: true }),
            Err(TransitionError::OutOfRange { index: -1, .. })
        ));
        assert!(matches!(
            c.apply(&Action::Hover { index: n as i64, enable: true }),
            Err(TransitionError::OutOfRange { .. })
        ));
        assert!(c.registry().iter().all(|o| !o.hovered));
        assert_eq!(c.active_transition(), None);

        assert!(c.activate_transition(0).is_ok());
        assert_eq!(c.apply(&Action::Activate { index: n as i64 - 1 }), Ok(Some(n - 1)));
    }

    #[test]
    fn transition_hover_reveals_hidden_junction() {
        let mut c = controller();
        assert_eq!(visual(&c, "j2"), (false, EmissiveLevel::None));
        c.set_transition_hover(7, true).unwrap();
        assert_eq!(visual(&c, "j2"), (true, EmissiveLevel::Low));
        c.set_transition_hover(7, false).unwrap();
        assert_eq!(visual(&c, "j2"), (false, EmissiveLevel::None));
    }

    #[test]
    fn transition_hover_is_outranked_by_highlight() {
        let mut c = controller();
        c.activate_transition(2).unwrap();
        c.set_transition_hover(1, true).unwrap();
        assert_eq!(visual(&c, "p1"), (true, EmissiveLevel::High));
        assert_eq!(visual(&c, "p2"), (true, EmissiveLevel::Low));
    }

    #[test]
    fn pointer_hover_then_best_transition() {
        let mut c = controller();
        c.activate_transition(1).unwrap();
        point_at_centre(&mut c);
        c.on_frame_tick();
        // From the start pose the view ray to the origin crosses p1 first.
        assert_eq!(c.hovered_object(), Some(id(&c, "p1")));

        assert_eq!(c.best_transition_for_hover(), Some(2));
        assert_eq!(c.active_transition(), Some(2));
        assert_eq!(visual(&c, "p1"), (true, EmissiveLevel::High));
        assert_eq!(visual(&c, "p2"), (true, EmissiveLevel::None));
    }

    #[test]
    fn best_transition_without_hover_has_no_effect() {
        let mut c = controller();
        c.activate_transition(1).unwrap();
        assert_eq!(c.best_transition_for_hover(), None);
        assert_eq!(c.active_transition(), Some(1));
        assert_eq!(c.apply(&Action::BestTransition), Ok(None));
    }

    #[test]
    fn hovering_an_object_without_link_has_no_effect() {
        let config = SceneConfig {
            camera: CameraConfig {
                start: Vec3::new(0.0, 0.0, 4.0),
                ..CameraConfig::default()
            },
            objects: vec![ObjectConfig {
                name: "wall".into(),
                class: ObjectClass::Panel,
                position: Vec3::ZERO,
                yaw_degrees: 0.0,
                size: Vec3::new(1.0, 1.0, 0.1),
                base_visible: None,
            }],
            transitions: vec![TransitionConfig {
                name: "front".into(),
                position: None,
                highlight: Vec::new(),
                panel_hover: true,
                junction_hover: false,
            }],
        };
        let scene = Scene::build(&config).unwrap();
        let mut c = ViewController::new(scene, config.camera.build_camera(), FixedClock::default());
        c.activate_transition(0).unwrap();
        point_at_centre(&mut c);
        c.on_frame_tick();
        assert_eq!(c.hovered_object(), Some(id(&c, "wall")));
        assert_eq!(visual(&c, "wall"), (true, EmissiveLevel::Low));
        assert_eq!(c.best_transition_for_hover(), None);
        assert_eq!(c.active_transition(), Some(0));
    }

    #[test]
    fn junction_hover_needs_permission() {
        let mut c = controller();
        let j2 = id(&c, "j2");
        let j2_pos = c.registry().get(j2).unwrap().transform.position;
        c.activate_transition(1).unwrap();
        point_at(&mut c, j2_pos);
        c.on_frame_tick();
        assert_ne!(c.hovered_object(), Some(j2));
        assert_eq!(visual(&c, "j2"), (false, EmissiveLevel::None));
    }

    #[test]
    fn pointer_reveals_junction_behind_disallowed_panel() {
        let mut c = controller();
        let j2 = id(&c, "j2");
        let j2_pos = c.registry().get(j2).unwrap().transform.position;
        c.activate_transition(6).unwrap();
        c.apply(&Action::Tick { frames: 600 }).unwrap();
        assert_eq!(c.camera().position, Vec3::new(-3.0, 0.0, -3.0));

        // From the j1 view p1 sits in front of j2, but panels are not hoverable.
        point_at(&mut c, j2_pos);
        c.on_frame_tick();
        assert_eq!(c.hovered_object(), Some(j2));
        assert_eq!(visual(&c, "j2"), (true, EmissiveLevel::Low));
        assert_eq!(visual(&c, "j1"), (true, EmissiveLevel::High));

        c.pointer_left();
        c.on_frame_tick();
        assert_eq!(c.hovered_object(), None);
        assert_eq!(visual(&c, "j2"), (false, EmissiveLevel::None));
    }

    #[test]
    fn gesture_suppresses_hover() {
        let mut c = controller();
        c.activate_transition(1).unwrap();
        point_at_centre(&mut c);
        c.on_frame_tick();
        assert!(c.hovered_object().is_some());

        c.apply(&Action::GestureStart).unwrap();
        c.on_frame_tick();
        assert_eq!(c.hovered_object(), None);
        assert_eq!(visual(&c, "p1"), (true, EmissiveLevel::High));

        c.apply(&Action::GestureEnd).unwrap();
        c.on_frame_tick();
        assert_eq!(c.hovered_object(), Some(id(&c, "p1")));
    }

    #[test]
    fn camera_settles_on_transition_target() {
        let mut c = controller();
        c.activate_transition(3).unwrap();
        c.apply(&Action::Tick { frames: 600 }).unwrap();
        assert_eq!(c.camera().position, Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(c.frame_count(), 600);

        // Looking straight at p2 now, which is highlighted and hover-allowed.
        point_at_centre(&mut c);
        c.on_frame_tick();
        assert_eq!(c.hovered_object(), Some(id(&c, "p2")));
        assert_eq!(visual(&c, "p2"), (true, EmissiveLevel::High));
    }

    #[test]
    fn resize_updates_camera_aspect_once() {
        let mut c = controller();
        assert!(c.resize(800, 400));
        assert_eq!(c.apply(&Action::Resize { width: 800, height: 400 }), Ok(None));
        assert!((c.camera().aspect - 2.0).abs() < 1e-6);
        assert!(c.resize(800, 800));
        assert!((c.camera().aspect - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_width_surface_hovers_nothing() {
        let mut c = controller();
        c.activate_transition(1).unwrap();
        c.pointer_moved(0.0, 0.0);
        c.on_frame_tick();
        assert_eq!(c.hovered_object(), None);

        assert!(c.resize(0, 150));
        c.pointer_moved(0.0, 0.0);
        c.on_frame_tick();
        assert_eq!(c.hovered_object(), None);
        assert!(c.registry().iter().all(|o| o.visual.emissive != EmissiveLevel::Low));
    }

    #[test]
    fn flush_feeds_renderer_only_changes() {
        let mut c = controller();
        let mut renderer = DebugTextRenderer::new();
        assert_eq!(c.flush_visuals(&mut renderer), 7);
        assert_eq!(c.flush_visuals(&mut renderer), 0);

        c.activate_transition(3).unwrap();
        assert_eq!(c.flush_visuals(&mut renderer), 1);
        let p2 = id(&c, "p2");
        assert_eq!(renderer.material(p2).unwrap().emissive, EmissiveLevel::High);

        // Re-activating the same view changes nothing.
        c.activate_transition(3).unwrap();
        assert_eq!(c.flush_visuals(&mut renderer), 0);
    }
}
