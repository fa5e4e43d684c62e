use cgmath::InnerSpace;

use crate::camera::{Camera, Ray, screen_to_ndc};
use crate::registry::{Marker, Viewpoint, ViewpointRegistry};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub marker: Marker,
    pub distance: f64,
}

/// Distance along `ray` to the first entry into the sphere. Rays starting
/// inside the sphere or pointing away from it miss.
pub fn ray_intersect_sphere(ray: &Ray, center: cgmath::Point3<f64>, radius: f64) -> Option<f64> {
    let eps = 1.0e-9;
    let oc = ray.origin - center;
    let c = oc.magnitude2() - radius * radius;
    if c <= 0.0 {
        return None;
    }
    let b = oc.dot(ray.direction);
    if b >= 0.0 {
        return None;
    }
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let t = -b - discriminant.sqrt();
    if t > eps { Some(t) } else { None }
}

/// Nearest marker along `ray`; the first one wins on exact ties.
pub fn pick_ray(ray: &Ray, markers: &[Marker]) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;
    for marker in markers {
        let Some(distance) = ray_intersect_sphere(ray, marker.center, marker.radius) else {
            continue;
        };
        match best {
            Some(current) if distance >= current.distance => {}
            _ => {
                best = Some(PickHit {
                    marker: *marker,
                    distance,
                })
            }
        }
    }
    best
}

pub fn pick<'a>(
    pointer_x: f64,
    pointer_y: f64,
    viewport: Viewport,
    camera: &Camera,
    registry: &'a ViewpointRegistry,
) -> Option<&'a Viewpoint> {
    let ndc = screen_to_ndc(pointer_x, pointer_y, viewport.width, viewport.height)?;
    let ray = camera.ray(ndc);
    let hit = pick_ray(&ray, registry.markers())?;
    registry.resolve(&hit.marker)
}
