//! The two camera motors: continuous walk locomotion and one-shot teleport.

use cgmath::{InnerSpace, Vector3, Zero};

use crate::camera::{Pose, yaw_pitch_rotation};
use crate::input::{LocomotionState, LookState};
use crate::transform::TransformMatrix;

/// Moves `pose` on the horizontal plane for one frame. Returns whether it moved.
pub fn walk_step(pose: &mut Pose, look: LookState, intents: LocomotionState, speed: f64) -> bool {
    let (sin, cos) = look.yaw.sin_cos();
    let forward = Vector3::new(-sin, 0.0, -cos);
    let right = Vector3::new(cos, 0.0, -sin);

    let mut direction = Vector3::zero();
    if intents.forward {
        direction += forward;
    }
    if intents.back {
        direction -= forward;
    }
    if intents.left {
        direction -= right;
    }
    if intents.right {
        direction += right;
    }

    if direction.magnitude2() <= 0.0 {
        return false;
    }
    pose.position += direction.normalize() * speed;
    true
}

pub fn apply_look(pose: &mut Pose, look: LookState) {
    pose.orientation = yaw_pitch_rotation(look.yaw, look.pitch);
}

pub fn target_pose(transform: &TransformMatrix) -> Pose {
    Pose::new(transform.translation(), transform.rotation())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TeleportStatus {
    Running(f64),
    Finished,
}

/// An in-flight camera transition. Time values are seconds on the frame clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TeleportJob {
    start: Pose,
    target: Pose,
    start_time: f64,
    duration: f64,
    progress: f64,
}

impl TeleportJob {
    pub fn new(start: Pose, target: Pose, start_time: f64, duration: f64) -> Self {
        Self {
            start,
            target,
            start_time,
            duration,
            progress: 0.0,
        }
    }

    pub fn start(&self) -> &Pose {
        &self.start
    }

    pub fn target(&self) -> &Pose {
        &self.target
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    fn progress_at(&self, now: f64) -> f64 {
        if !(self.duration > 0.0) {
            return 1.0;
        }
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    /// Writes the interpolated pose for `now`. Progress never moves backwards,
    /// even if the clock does.
    pub fn step(&mut self, now: f64, pose: &mut Pose) -> TeleportStatus {
        self.progress = self.progress.max(self.progress_at(now));
        let t = self.progress;
        if t >= 1.0 {
            *pose = self.target;
            return TeleportStatus::Finished;
        }

        let mut to = self.target.orientation;
        if self.start.orientation.dot(to) < 0.0 {
            to = -to;
        }
        pose.position = self.start.position + (self.target.position - self.start.position) * t;
        pose.orientation = self.start.orientation.slerp(to, t).normalize();
        TeleportStatus::Running(t)
    }
}
