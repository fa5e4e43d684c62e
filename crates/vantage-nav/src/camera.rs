use cgmath::{InnerSpace, Matrix3, Point3, Quaternion, Rad, Rotation3, Vector2, Vector3};

use crate::config::CameraConfig;

pub fn world_up() -> Vector3<f64> {
    Vector3::unit_y()
}

/// Camera pose. The camera looks down its local -Z axis with +Y up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Point3<f64>,
    pub orientation: Quaternion<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 0.0),
            orientation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
        }
    }
}

impl Pose {
    pub fn new(position: Point3<f64>, orientation: Quaternion<f64>) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn looking_at(position: Point3<f64>, target: Point3<f64>) -> Self {
        Self::new(position, look_rotation(target - position))
    }

    pub fn forward(&self) -> Vector3<f64> {
        self.orientation * Vector3::new(0.0, 0.0, -1.0)
    }

    pub fn right(&self) -> Vector3<f64> {
        self.orientation * Vector3::new(1.0, 0.0, 0.0)
    }
}

/// Orientation from yaw about world +Y followed by pitch about the local X axis.
/// Roll is always zero.
pub fn yaw_pitch_rotation(yaw: f64, pitch: f64) -> Quaternion<f64> {
    Quaternion::from_angle_y(Rad(yaw)) * Quaternion::from_angle_x(Rad(pitch))
}

/// Inverse of [`yaw_pitch_rotation`] for the view direction of `orientation`.
pub fn yaw_pitch_of(orientation: Quaternion<f64>) -> (f64, f64) {
    let forward = orientation * Vector3::new(0.0, 0.0, -1.0);
    let pitch = forward.y.clamp(-1.0, 1.0).asin();
    let horizontal = Vector2::new(forward.x, forward.z);
    if horizontal.magnitude2() <= 1.0e-12 {
        // Looking straight up or down: recover yaw from the right vector.
        let right = orientation * Vector3::new(1.0, 0.0, 0.0);
        return (f64::atan2(-right.z, right.x), pitch);
    }
    (f64::atan2(-forward.x, -forward.z), pitch)
}

/// Rotation that points -Z along `direction` while keeping +Y as close to world up as possible.
pub fn look_rotation(direction: Vector3<f64>) -> Quaternion<f64> {
    if direction.magnitude2() <= f64::EPSILON {
        return Quaternion::new(1.0, 0.0, 0.0, 0.0);
    }
    let forward = direction.normalize();
    let mut right = forward.cross(world_up());
    if right.magnitude2() <= 1.0e-12 {
        right = forward.cross(Vector3::new(0.0, 0.0, -1.0));
    }
    let right = right.normalize();
    let up = right.cross(forward).normalize();
    Quaternion::from(Matrix3::from_cols(right, up, -forward)).normalize()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }
}

/// Perspective camera holding the live pose.
#[derive(Clone, Debug)]
pub struct Camera {
    pub pose: Pose,
    pub fov_y_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    pub fn from_config(config: &CameraConfig, target: Point3<f64>) -> Self {
        let [x, y, z] = config.position;
        Self {
            pose: Pose::looking_at(Point3::new(x, y, z), target),
            fov_y_deg: config.fov_y_deg,
            aspect: 1.0,
            near: config.near,
            far: config.far,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Ray from the camera through a point in normalised device coordinates.
    pub fn ray(&self, ndc: Vector2<f64>) -> Ray {
        let half_height = (self.fov_y_deg.to_radians() * 0.5).tan();
        let half_width = half_height * self.aspect;
        let local = Vector3::new(ndc.x * half_width, ndc.y * half_height, -1.0);
        Ray {
            origin: self.pose.position,
            direction: (self.pose.orientation * local).normalize(),
        }
    }
}

/// Maps a pointer position in pixels to NDC, Y pointing up.
pub fn screen_to_ndc(x: f64, y: f64, width: f64, height: f64) -> Option<Vector2<f64>> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(Vector2::new(x / width * 2.0 - 1.0, -(y / height) * 2.0 + 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1.0e-9
    }

    #[test]
    fn yaw_pitch_round_trip() {
        for (yaw, pitch) in [(0.0, 0.0), (0.7, -0.3), (-2.5, 1.2), (3.0, -1.5)] {
            let (y, p) = yaw_pitch_of(yaw_pitch_rotation(yaw, pitch));
            assert!(close(y, yaw), "yaw {y} != {yaw}");
            assert!(close(p, pitch), "pitch {p} != {pitch}");
        }
    }

    #[test]
    fn look_rotation_faces_direction() {
        let direction = Vector3::new(1.0, -0.5, 2.0).normalize();
        let pose = Pose::new(Point3::new(0.0, 0.0, 0.0), look_rotation(direction));
        assert!((pose.forward() - direction).magnitude() < 1.0e-9);
        assert!(pose.right().y.abs() < 1.0e-9);
    }

    #[test]
    fn ndc_inverts_y() {
        let ndc = screen_to_ndc(0.0, 0.0, 800.0, 600.0).unwrap();
        assert_eq!(ndc, Vector2::new(-1.0, 1.0));
        let ndc = screen_to_ndc(400.0, 300.0, 800.0, 600.0).unwrap();
        assert_eq!(ndc, Vector2::new(0.0, 0.0));
        assert!(screen_to_ndc(1.0, 1.0, 0.0, 600.0).is_none());
    }
}
