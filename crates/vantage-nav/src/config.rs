use serde::{Deserialize, Serialize};

use crate::input::NavAction;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// World units travelled per frame while a locomotion intent is held.
    pub walk_speed: f64,
    /// Radians of yaw/pitch per unit of relative pointer motion.
    pub look_sensitivity: f64,
    /// Seconds.
    pub teleport_duration: f64,
    pub marker_radius: f64,
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
    pub keys: KeyBindings,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            walk_speed: 0.07,
            look_sensitivity: 0.002,
            teleport_duration: 1.2,
            marker_radius: 0.12,
            camera: CameraConfig::default(),
            orbit: OrbitConfig::default(),
            keys: KeyBindings::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    pub position: [f64; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 70.0,
            near: 0.01,
            far: 500.0,
            position: [0.0, 2.0, 5.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrbitConfig {
    pub target: [f64; 3],
    pub rotate_speed: f64,
    pub zoom_speed: f64,
    pub damping: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            target: [0.0, 0.0, 0.0],
            rotate_speed: 0.005,
            zoom_speed: 0.001,
            damping: 0.05,
            min_distance: 0.1,
            max_distance: 400.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyBindings {
    pub forward: char,
    pub back: char,
    pub left: char,
    pub right: char,
    pub toggle_walk: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: 'w',
            back: 's',
            left: 'a',
            right: 'd',
            toggle_walk: 'f',
        }
    }
}

impl KeyBindings {
    /// Case-insensitive lookup of the action bound to `key`.
    pub fn action(&self, key: char) -> Option<NavAction> {
        let key = key.to_ascii_lowercase();
        let bound = |c: char| c.to_ascii_lowercase() == key;
        if bound(self.toggle_walk) {
            Some(NavAction::ToggleWalk)
        } else if bound(self.forward) {
            Some(NavAction::Forward)
        } else if bound(self.back) {
            Some(NavAction::Back)
        } else if bound(self.left) {
            Some(NavAction::Left)
        } else if bound(self.right) {
            Some(NavAction::Right)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_are_case_insensitive() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action('W'), Some(NavAction::Forward));
        assert_eq!(keys.action('f'), Some(NavAction::ToggleWalk));
        assert_eq!(keys.action('q'), None);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: NavConfig =
            serde_json::from_str(r#"{ "walk_speed": 0.1, "camera": { "fov_y_deg": 60.0 } }"#)
                .unwrap();
        assert_eq!(config.walk_speed, 0.1);
        assert_eq!(config.camera.fov_y_deg, 60.0);
        assert_eq!(config.camera.position, [0.0, 2.0, 5.0]);
        assert_eq!(config.teleport_duration, 1.2);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<NavConfig, _> = serde_json::from_str(r#"{ "run_speed": 1.0 }"#);
        assert!(result.is_err());
    }
}
