use std::collections::VecDeque;

use cgmath::Point3;
use tracing::{debug, info, trace};
use vantage_base::ViewpointId;

use crate::camera::{Camera, Pose, yaw_pitch_of};
use crate::config::NavConfig;
use crate::input::{
    InputEvent, LocomotionState, LookState, NavAction, NavigationMode, PlatformCommand,
};
use crate::motion::{TeleportJob, TeleportStatus, apply_look, target_pose, walk_step};
use crate::orbit::OrbitControls;
use crate::pick::{Viewport, pick};
use crate::registry::ViewpointRegistry;
use crate::scene::SceneSink;

/// Which motor wrote the pose during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PoseAuthority {
    #[default]
    None,
    Orbit,
    Walk,
    Teleport,
}

#[derive(Clone, Debug)]
pub struct FrameReport {
    pub mode: NavigationMode,
    pub pose: Pose,
    pub authority: PoseAuthority,
    pub commands: Vec<PlatformCommand>,
    pub teleport_started: Option<ViewpointId>,
    pub teleport_finished: bool,
}

#[derive(Clone, Copy, Debug, Default)]
struct CaptureState {
    engaged: bool,
    requested: bool,
}

/// All navigation state, advanced by one [`NavigationState::frame`] call per
/// display refresh. Input is queued with [`NavigationState::push`] and only
/// interpreted inside `frame`.
#[derive(Clone, Debug)]
pub struct NavigationState {
    config: NavConfig,
    camera: Camera,
    mode: NavigationMode,
    locomotion: LocomotionState,
    look: LookState,
    look_dirty: bool,
    capture: CaptureState,
    orbit: OrbitControls,
    teleport: Option<TeleportJob>,
    registry: ViewpointRegistry,
    viewport: Viewport,
    queue: VecDeque<InputEvent>,
}

impl NavigationState {
    pub fn new(config: NavConfig) -> Self {
        Self::with_registry(config, ViewpointRegistry::default())
    }

    pub fn with_registry(config: NavConfig, registry: ViewpointRegistry) -> Self {
        let orbit = OrbitControls::new(config.orbit.clone());
        let camera = Camera::from_config(&config.camera, orbit.target());
        let (yaw, pitch) = yaw_pitch_of(camera.pose.orientation);
        Self {
            config,
            camera,
            mode: NavigationMode::Orbit,
            locomotion: LocomotionState::default(),
            look: LookState::new(yaw, pitch),
            look_dirty: false,
            capture: CaptureState::default(),
            orbit,
            teleport: None,
            registry,
            viewport: Viewport::default(),
            queue: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn pose(&self) -> Pose {
        self.camera.pose
    }

    pub fn locomotion(&self) -> LocomotionState {
        self.locomotion
    }

    pub fn look(&self) -> LookState {
        self.look
    }

    pub fn is_capture_engaged(&self) -> bool {
        self.capture.engaged
    }

    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }

    pub fn teleport(&self) -> Option<&TeleportJob> {
        self.teleport.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn registry(&self) -> &ViewpointRegistry {
        &self.registry
    }

    pub fn attach_markers(&self, scene: &mut dyn SceneSink) {
        for marker in self.registry.markers() {
            scene.add_marker(marker);
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// Drains queued input, then lets exactly one motor write the pose.
    pub fn frame(&mut self, now: f64) -> FrameReport {
        let mut report = FrameReport {
            mode: self.mode,
            pose: self.camera.pose,
            authority: PoseAuthority::None,
            commands: Vec::new(),
            teleport_started: None,
            teleport_finished: false,
        };

        while let Some(event) = self.queue.pop_front() {
            self.apply_event(event, now, &mut report);
        }

        report.authority = if let Some(job) = self.teleport.as_mut() {
            if job.step(now, &mut self.camera.pose) == TeleportStatus::Finished {
                self.teleport = None;
                self.finish_teleport();
                report.teleport_finished = true;
            }
            PoseAuthority::Teleport
        } else {
            match self.mode {
                NavigationMode::Walk => self.run_walk_motor(),
                NavigationMode::Orbit => {
                    if self.orbit.update(&mut self.camera.pose) {
                        PoseAuthority::Orbit
                    } else {
                        PoseAuthority::None
                    }
                }
            }
        };

        report.mode = self.mode;
        report.pose = self.camera.pose;
        report
    }

    fn apply_event(&mut self, event: InputEvent, now: f64, report: &mut FrameReport) {
        match event {
            InputEvent::KeyDown { key, repeat } => match self.config.keys.action(key) {
                Some(NavAction::ToggleWalk) if !repeat => self.toggle_mode(report),
                Some(NavAction::ToggleWalk) | None => {}
                Some(action) => {
                    if self.mode == NavigationMode::Walk {
                        self.locomotion.set(action, true);
                    }
                }
            },
            InputEvent::KeyUp { key } => {
                if let Some(action) = self.config.keys.action(key) {
                    self.locomotion.set(action, false);
                }
            }
            InputEvent::PointerDown { x, y } => {
                if self.intercept_pointer("down") {
                    return;
                }
                self.orbit.pointer_down(x, y);
            }
            InputEvent::PointerMove { x, y } => {
                if self.intercept_pointer("move") {
                    return;
                }
                self.orbit.pointer_move(x, y);
            }
            InputEvent::PointerUp { .. } => {
                if self.intercept_pointer("up") {
                    return;
                }
                self.orbit.pointer_up();
            }
            InputEvent::Click { x, y } => match self.mode {
                NavigationMode::Walk => {
                    if !self.capture.engaged && !self.capture.requested {
                        self.capture.requested = true;
                        report.commands.push(PlatformCommand::RequestCapture);
                    }
                }
                NavigationMode::Orbit => {
                    if let Some(id) = self.begin_teleport(x, y, now) {
                        report.teleport_started = Some(id);
                    }
                }
            },
            InputEvent::MouseMotion { dx, dy } => {
                if self.mode == NavigationMode::Walk
                    && self.capture.engaged
                    && self.teleport.is_none()
                {
                    self.look.apply_delta(dx, dy, self.config.look_sensitivity);
                    self.look_dirty = true;
                }
            }
            InputEvent::Wheel { delta } => {
                if self.mode == NavigationMode::Orbit {
                    self.orbit.wheel(delta);
                }
            }
            InputEvent::CaptureChanged { engaged } => {
                self.capture.requested = false;
                if engaged && self.mode != NavigationMode::Walk {
                    debug!("stale pointer capture in orbit mode, releasing");
                    self.capture.engaged = false;
                    report.commands.push(PlatformCommand::ReleaseCapture);
                } else {
                    debug!(engaged, "pointer capture changed");
                    self.capture.engaged = engaged;
                }
            }
            InputEvent::Resize { width, height } => {
                self.viewport = Viewport { width, height };
                self.camera.resize(width, height);
            }
        }
    }

    fn intercept_pointer(&self, kind: &str) -> bool {
        if self.mode == NavigationMode::Walk {
            trace!(kind, "pointer event withheld from orbit controls");
            return true;
        }
        false
    }

    fn toggle_mode(&mut self, report: &mut FrameReport) {
        self.mode = self.mode.toggled();
        self.locomotion = LocomotionState::default();
        match self.mode {
            NavigationMode::Walk => {
                self.orbit.set_enabled(false);
                self.rebase_look();
            }
            NavigationMode::Orbit => {
                if self.capture.engaged || self.capture.requested {
                    report.commands.push(PlatformCommand::ReleaseCapture);
                }
                self.capture = CaptureState::default();
                self.orbit.set_enabled(true);
                self.orbit.rebase(&self.camera.pose);
            }
        }
        info!(mode = self.mode.label(), "navigation mode changed");
    }

    fn begin_teleport(&mut self, x: f64, y: f64, now: f64) -> Option<ViewpointId> {
        let Some(viewpoint) = pick(x, y, self.viewport, &self.camera, &self.registry) else {
            trace!(x, y, "click hit no viewpoint");
            return None;
        };
        let id = viewpoint.id();
        let target = target_pose(viewpoint.transform());
        if self.teleport.is_some() {
            debug!(viewpoint = %id, "superseding active teleport");
        }
        // Start from the live pose, not the previous job's target.
        self.teleport = Some(TeleportJob::new(
            self.camera.pose,
            target,
            now,
            self.config.teleport_duration,
        ));
        info!(
            viewpoint = %id,
            label = %viewpoint.label().unwrap_or_default(),
            "teleport started"
        );
        Some(id)
    }

    fn finish_teleport(&mut self) {
        // Orbit mode picks the look angles up again on the next toggle.
        if self.mode == NavigationMode::Walk {
            self.rebase_look();
        }
        self.orbit.rebase(&self.camera.pose);
        debug!(position = ?point_tuple(self.camera.pose.position), "teleport finished");
    }

    fn rebase_look(&mut self) {
        let (yaw, pitch) = yaw_pitch_of(self.camera.pose.orientation);
        self.look = LookState::new(yaw, pitch);
        self.look_dirty = false;
    }

    fn run_walk_motor(&mut self) -> PoseAuthority {
        let mut wrote = false;
        if self.look_dirty {
            apply_look(&mut self.camera.pose, self.look);
            self.look_dirty = false;
            wrote = true;
        }
        if walk_step(
            &mut self.camera.pose,
            self.look,
            self.locomotion,
            self.config.walk_speed,
        ) {
            wrote = true;
        }
        if wrote {
            PoseAuthority::Walk
        } else {
            PoseAuthority::None
        }
    }
}

fn point_tuple(point: Point3<f64>) -> (f64, f64, f64) {
    (point.x, point.y, point.z)
}
