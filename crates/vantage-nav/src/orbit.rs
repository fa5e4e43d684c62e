//! Pivot-centred inspection controls with damped motion.

use cgmath::{InnerSpace, MetricSpace, Point3, Vector3};

use crate::camera::{Pose, look_rotation};
use crate::config::OrbitConfig;

const POLAR_EPS: f64 = 1.0e-6;
const SETTLE_EPS: f64 = 1.0e-6;

#[derive(Clone, Debug)]
pub struct OrbitControls {
    config: OrbitConfig,
    enabled: bool,
    target: Point3<f64>,
    pending_yaw: f64,
    pending_pitch: f64,
    pending_zoom: f64,
    drag_pos: Option<(f64, f64)>,
}

impl OrbitControls {
    pub fn new(config: OrbitConfig) -> Self {
        let [x, y, z] = config.target;
        Self {
            config,
            enabled: true,
            target: Point3::new(x, y, z),
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
            drag_pos: None,
        }
    }

    pub fn target(&self) -> Point3<f64> {
        self.target
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.drag_pos = None;
            self.clear_pending();
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_pos.is_some()
    }

    pub fn has_pending_motion(&self) -> bool {
        self.pending_yaw.abs() > SETTLE_EPS
            || self.pending_pitch.abs() > SETTLE_EPS
            || self.pending_zoom.abs() > SETTLE_EPS
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if self.enabled {
            self.drag_pos = Some((x, y));
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Some((last_x, last_y)) = self.drag_pos else {
            return;
        };
        self.pending_yaw -= (x - last_x) * self.config.rotate_speed;
        self.pending_pitch -= (y - last_y) * self.config.rotate_speed;
        self.drag_pos = Some((x, y));
    }

    pub fn pointer_up(&mut self) {
        self.drag_pos = None;
    }

    pub fn wheel(&mut self, delta: f64) {
        if self.enabled {
            self.pending_zoom += delta * self.config.zoom_speed;
        }
    }

    /// Re-centres the pivot in front of `pose` so the next update does not
    /// swing the camera back toward a stale target.
    pub fn rebase(&mut self, pose: &Pose) {
        let distance = pose
            .position
            .distance(self.target)
            .clamp(self.config.min_distance, self.config.max_distance);
        self.target = pose.position + pose.forward() * distance;
        self.drag_pos = None;
        self.clear_pending();
    }

    /// Applies a damped share of the pending motion. Returns whether `pose`
    /// was written.
    pub fn update(&mut self, pose: &mut Pose) -> bool {
        if !self.enabled {
            return false;
        }
        if !self.has_pending_motion() {
            self.clear_pending();
            return false;
        }

        let share = if self.config.damping > 0.0 && self.config.damping < 1.0 {
            self.config.damping
        } else {
            1.0
        };
        let yaw = self.pending_yaw * share;
        let pitch = self.pending_pitch * share;
        let zoom = self.pending_zoom * share;
        self.pending_yaw -= yaw;
        self.pending_pitch -= pitch;
        self.pending_zoom -= zoom;

        let offset = pose.position - self.target;
        let distance = offset.magnitude().max(self.config.min_distance);
        let theta = f64::atan2(offset.x, offset.z) + yaw;
        let phi = ((offset.y / distance).clamp(-1.0, 1.0).acos() + pitch)
            .clamp(POLAR_EPS, std::f64::consts::PI - POLAR_EPS);
        let distance = (distance * zoom.exp())
            .clamp(self.config.min_distance, self.config.max_distance);

        let offset = Vector3::new(
            distance * phi.sin() * theta.sin(),
            distance * phi.cos(),
            distance * phi.sin() * theta.cos(),
        );
        pose.position = self.target + offset;
        pose.orientation = look_rotation(self.target - pose.position);
        true
    }

    fn clear_pending(&mut self) {
        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
        self.pending_zoom = 0.0;
    }
}
