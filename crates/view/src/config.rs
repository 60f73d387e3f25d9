use glam::Vec3;
use panelview_common::ObjectClass;
use panelview_kernel::{RegistryError, TransitionError};
use panelview_render::OrbitCamera;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or building a scene configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported file format: {0:?}")]
    UnsupportedFormat(String),
    #[error("transition {transition:?} highlights unknown object {object:?}")]
    UnknownObject { transition: String, object: String },
    #[error("duplicate object name {0:?}")]
    DuplicateObject(String),
    #[error("invalid camera config: {0}")]
    InvalidCamera(String),
    #[error("transition {transition:?} is invalid: {reason}")]
    InvalidTransition { transition: String, reason: String },
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Text formats accepted for scene configs and action scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    /// Pick the format from the file extension: `.yaml`/`.yml` or `.json`,
    /// case-insensitive. Anything else is rejected.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Camera start pose and projection/damping parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub start: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub damping: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start: Vec3::new(-2.5, 2.25, 2.0),
            fov_degrees: 45.0,
            near: 0.1,
            far: 500.0,
            damping: 0.1,
        }
    }
}

/// Closest a camera position may sit to the scene origin it looks at.
const MIN_VIEW_DISTANCE: f32 = 1e-3;

/// Reason a camera position cannot look at the scene origin, if any.
fn view_position_problem(position: Vec3) -> Option<String> {
    if !position.is_finite() {
        Some(format!("position {position} is not finite"))
    } else if position.length() < MIN_VIEW_DISTANCE {
        Some(format!("position {position} coincides with the look-at target"))
    } else {
        None
    }
}

impl CameraConfig {
    /// Reject parameters that would give a degenerate projection or a
    /// camera that never settles.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::InvalidCamera(reason));
        if let Some(reason) = view_position_problem(self.start) {
            return invalid(format!("start {reason}"));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return invalid(format!("fov_degrees {} must be in (0, 180)", self.fov_degrees));
        }
        if !(self.near > 0.0 && self.near.is_finite()) {
            return invalid(format!("near {} must be positive", self.near));
        }
        if !(self.far > self.near && self.far.is_finite()) {
            return invalid(format!("far {} must exceed near {}", self.far, self.near));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return invalid(format!("damping {} must be in (0, 1]", self.damping));
        }
        Ok(())
    }

    pub fn build_camera(&self) -> OrbitCamera {
        let mut camera = OrbitCamera::new(self.start);
        camera.fov = self.fov_degrees.to_radians();
        camera.near = self.near;
        camera.far = self.far;
        camera.damping = self.damping;
        camera
    }
}

/// One panel or junction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectConfig {
    pub name: String,
    pub class: ObjectClass,
    pub position: Vec3,
    /// Rotation about the vertical axis.
    #[serde(default)]
    pub yaw_degrees: f32,
    /// Full box dimensions (width, height, depth).
    pub size: Vec3,
    /// Overrides the class default (panels shown, junctions hidden).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_visible: Option<bool>,
}

/// One camera viewpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionConfig {
    pub name: String,
    /// Camera position; omitted means the camera start position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    /// Names of the objects highlighted by this viewpoint.
    #[serde(default)]
    pub highlight: Vec<String>,
    #[serde(default)]
    pub panel_hover: bool,
    #[serde(default)]
    pub junction_hover: bool,
}

/// Complete scene description. The default is the three-panel,
/// four-junction structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub objects: Vec<ObjectConfig>,
    pub transitions: Vec<TransitionConfig>,
}

const PANEL_WIDTH: f32 = 1.5;
const PANEL_HEIGHT: f32 = 2.0;
const THICKNESS: f32 = 0.025;
const PANEL_VIEW_DISTANCE: f32 = 4.0;
const JUNCTION_VIEW_DISTANCE: f32 = 3.0;

impl Default for SceneConfig {
    fn default() -> Self {
        let x = (PANEL_WIDTH + THICKNESS) / 2.0;
        let panel_size = Vec3::new(PANEL_WIDTH, PANEL_HEIGHT, THICKNESS);
        let junction_size = Vec3::new(THICKNESS, PANEL_HEIGHT, THICKNESS);

        let panel = |name: &str, position: Vec3, yaw_degrees: f32| ObjectConfig {
            name: name.into(),
            class: ObjectClass::Panel,
            position,
            yaw_degrees,
            size: panel_size,
            base_visible: None,
        };
        let junction = |name: &str, position: Vec3| ObjectConfig {
            name: name.into(),
            class: ObjectClass::Junction,
            position,
            yaw_degrees: 0.0,
            size: junction_size,
            base_visible: None,
        };
        let view = |name: &str, position: Option<Vec3>, highlight: &[&str], panels: bool| TransitionConfig {
            name: name.into(),
            position,
            highlight: highlight.iter().map(|s| s.to_string()).collect(),
            panel_hover: panels,
            junction_hover: !panels,
        };

        let (p, j) = (PANEL_VIEW_DISTANCE, JUNCTION_VIEW_DISTANCE);
        Self {
            camera: CameraConfig::default(),
            objects: vec![
                panel("p1", Vec3::new(-x, 0.0, 0.0), 90.0),
                panel("p2", Vec3::new(0.0, 0.0, x), 0.0),
                panel("p3", Vec3::new(x, 0.0, 0.0), 90.0),
                junction("j1", Vec3::new(-x, 0.0, -x)),
                junction("j2", Vec3::new(-x, 0.0, x)),
                junction("j3", Vec3::new(x, 0.0, x)),
                junction("j4", Vec3::new(x, 0.0, -x)),
            ],
            transitions: vec![
                view("start", None, &[], true),
                view("panels", None, &["p1", "p2", "p3"], true),
                view("p1", Some(Vec3::new(-p, 0.0, 0.0)), &["p1"], true),
                view("p2", Some(Vec3::new(0.0, 0.0, p)), &["p2"], true),
                view("p3", Some(Vec3::new(p, 0.0, 0.0)), &["p3"], true),
                view("junctions", None, &["j1", "j2", "j3", "j4"], false),
                view("j1", Some(Vec3::new(-j, 0.0, -j)), &["j1"], false),
                view("j2", Some(Vec3::new(-j, 0.0, j)), &["j2"], false),
                view("j3", Some(Vec3::new(j, 0.0, j)), &["j3"], false),
                view("j4", Some(Vec3::new(j, 0.0, -j)), &["j4"], false),
            ],
        }
    }
}

impl TransitionConfig {
    /// Camera position for this viewpoint, falling back to the camera start.
    pub fn resolved_position(&self, camera: &CameraConfig) -> Vec3 {
        self.position.unwrap_or(camera.start)
    }

    pub fn validate(&self, camera: &CameraConfig) -> Result<(), ConfigError> {
        match view_position_problem(self.resolved_position(camera)) {
            Some(reason) => Err(ConfigError::InvalidTransition {
                transition: self.name.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

impl SceneConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load a config file, choosing the format by extension
    /// (`.yaml`/`.yml` or `.json`).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = FileFormat::from_path(path)?;
        let data = std::fs::read_to_string(path)?;
        let config = match format {
            FileFormat::Yaml => Self::from_yaml_str(&data)?,
            FileFormat::Json => Self::from_json_str(&data)?,
        };
        tracing::info!(
            path = %path.display(),
            objects = config.objects.len(),
            transitions = config.transitions.len(),
            "scene config loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_structure_shape() {
        let config = SceneConfig::default();
        let panels = config.objects.iter().filter(|o| o.class == ObjectClass::Panel).count();
        let junctions = config.objects.iter().filter(|o| o.class == ObjectClass::Junction).count();
        assert_eq!((panels, junctions), (3, 4));
        assert_eq!(config.transitions.len(), 10);
        assert_eq!(config.transitions[0].name, "start");
        assert!(config.transitions[0].highlight.is_empty());
    }

    #[test]
    fn default_panel_offsets() {
        let config = SceneConfig::default();
        assert!((config.objects[0].position.x + 0.7625).abs() < 1e-6);
        assert!((config.objects[1].position.z - 0.7625).abs() < 1e-6);
    }

    #[test]
    fn yaml_round_trip_of_default() {
        let config = SceneConfig::default();
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(SceneConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let yaml = r#"
camera:
  start: [0.0, 1.0, 5.0]
objects:
  - name: wall
    class: panel
    position: [0.0, 0.0, 0.0]
    size: [1.0, 2.0, 0.1]
transitions:
  - name: front
    position: [0.0, 0.0, 4.0]
    highlight: [wall]
    panel_hover: true
"#;
        let config = SceneConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.camera.start, Vec3::new(0.0, 1.0, 5.0));
        assert_eq!(config.camera.fov_degrees, 45.0);
        assert_eq!(config.objects[0].yaw_degrees, 0.0);
        assert!(!config.transitions[0].junction_hover);
    }

    #[test]
    fn json_config_parses() {
        let json = r#"{"objects":[{"name":"j","class":"junction","position":[1,0,1],"size":[0.1,2,0.1],"base_visible":true}]}"#;
        let config = SceneConfig::from_json_str(json).unwrap();
        assert_eq!(config.objects[0].base_visible, Some(true));
        assert!(config.transitions.is_empty());
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.yml")).unwrap(), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path(Path::new("a.YAML")).unwrap(), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path(Path::new("a.json")).unwrap(), FileFormat::Json);
        assert!(matches!(
            FileFormat::from_path(Path::new("script")),
            Err(ConfigError::UnsupportedFormat(ref e)) if e.is_empty()
        ));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = std::env::temp_dir().join("panelview_config_test.toml");
        std::fs::write(&path, "x = 1").unwrap();
        let err = SceneConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ref e) if e == "toml"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn default_camera_is_valid() {
        assert!(CameraConfig::default().validate().is_ok());
    }

    #[test]
    fn degenerate_camera_values_are_rejected() {
        let cases: [fn(&mut CameraConfig); 7] = [
            |c| c.damping = 0.0,
            |c| c.damping = 1.5,
            |c| c.fov_degrees = 0.0,
            |c| c.near = 0.0,
            |c| c.far = c.near,
            |c| c.start = Vec3::ZERO,
            |c| c.start = Vec3::new(f32::NAN, 0.0, 1.0),
        ];
        for break_it in cases {
            let mut camera = CameraConfig::default();
            break_it(&mut camera);
            assert!(
                matches!(camera.validate(), Err(ConfigError::InvalidCamera(_))),
                "accepted {camera:?}"
            );
        }
    }

    #[test]
    fn transition_at_look_at_target_is_rejected() {
        let camera = CameraConfig::default();
        let mut view = SceneConfig::default().transitions[2].clone();
        assert!(view.validate(&camera).is_ok());
        view.position = Some(Vec3::ZERO);
        assert!(matches!(
            view.validate(&camera),
            Err(ConfigError::InvalidTransition { ref transition, .. }) if transition == "p1"
        ));
    }

    #[test]
    fn camera_config_builds_camera() {
        let camera = CameraConfig::default().build_camera();
        assert_eq!(camera.position, Vec3::new(-2.5, 2.25, 2.0));
        assert!((camera.fov - 45f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.damping, 0.1);
    }
}
