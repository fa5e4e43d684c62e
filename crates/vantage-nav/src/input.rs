use serde::{Deserialize, Serialize};

/// Raw input, queued by the host and drained once per frame.
///
/// Pointer positions are in pixels relative to the top-left of the render
/// surface. `MouseMotion` carries relative deltas and is only meaningful
/// while the pointer is captured.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    KeyDown {
        key: char,
        #[serde(default)]
        repeat: bool,
    },
    KeyUp {
        key: char,
    },
    PointerDown {
        x: f64,
        y: f64,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    Click {
        x: f64,
        y: f64,
    },
    MouseMotion {
        dx: f64,
        dy: f64,
    },
    Wheel {
        delta: f64,
    },
    CaptureChanged {
        engaged: bool,
    },
    Resize {
        width: f64,
        height: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    Forward,
    Back,
    Left,
    Right,
    ToggleWalk,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationMode {
    #[default]
    Orbit,
    Walk,
}

impl NavigationMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Orbit => Self::Walk,
            Self::Walk => Self::Orbit,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Orbit => "Orbit",
            Self::Walk => "Walk",
        }
    }
}

/// Held movement keys. Only written while Walk mode is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LocomotionState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl LocomotionState {
    pub fn set(&mut self, action: NavAction, held: bool) {
        match action {
            NavAction::Forward => self.forward = held,
            NavAction::Back => self.back = held,
            NavAction::Left => self.left = held,
            NavAction::Right => self.right = held,
            NavAction::ToggleWalk => {}
        }
    }
}

/// Walk-mode view angles in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LookState {
    pub yaw: f64,
    pub pitch: f64,
}

impl LookState {
    pub const PITCH_LIMIT: f64 = std::f64::consts::FRAC_PI_2;

    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT),
        }
    }

    pub fn apply_delta(&mut self, dx: f64, dy: f64, sensitivity: f64) {
        self.yaw -= dx * sensitivity;
        self.pitch = (self.pitch - dy * sensitivity).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }
}

/// Side effects the host platform must carry out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformCommand {
    RequestCapture,
    ReleaseCapture,
}
