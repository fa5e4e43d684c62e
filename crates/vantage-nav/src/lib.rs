//! Navigation core for a static-scene viewer: orbit inspection, first-person
//! walking, and click-to-teleport between viewpoints loaded from a camera
//! document.

pub mod camera;
pub mod config;
pub mod input;
pub mod motion;
pub mod orbit;
pub mod pick;
pub mod registry;
pub mod scene;
pub mod state;
pub mod transform;

pub use camera::{Camera, Pose, Ray};
pub use config::{CameraConfig, KeyBindings, NavConfig, OrbitConfig};
pub use input::{InputEvent, LocomotionState, LookState, NavAction, NavigationMode, PlatformCommand};
pub use motion::{TeleportJob, TeleportStatus};
pub use orbit::OrbitControls;
pub use pick::{PickHit, Viewport, pick};
pub use registry::{LoadSummary, Marker, StaticSource, Viewpoint, ViewpointRegistry, ViewpointSource};
pub use scene::{NullScene, SceneSink};
pub use state::{FrameReport, NavigationState, PoseAuthority};
pub use transform::{SkipReason, TransformMatrix, TransformOutcome, parse_transform};
pub use vantage_base::{Error, Result, ViewpointId};
