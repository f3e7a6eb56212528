//! Collision queries for the runner capsule
//!
//! The runner is an upright capsule, obstacles are axis-aligned boxes and
//! pickups are trigger spheres. Because the capsule segment is always
//! vertical, the capsule-vs-box distance separates per axis and is exact.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        let d = (point - self.center).abs();
        d.x <= self.half_extents.x && d.y <= self.half_extents.y && d.z <= self.half_extents.z
    }
}

/// Upright capsule (segment along +Y swept by a radius)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub center: Vec3,
    pub radius: f32,
    /// Half length of the inner segment (0 for a sphere)
    pub half_segment: f32,
}

impl Capsule {
    /// Capsule of total `height` centred on `center`
    pub fn upright(center: Vec3, radius: f32, height: f32) -> Self {
        Self {
            center,
            radius,
            half_segment: (height / 2.0 - radius).max(0.0),
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y - self.half_segment
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y + self.half_segment
    }

    /// Closest point on the inner segment to `point`
    pub fn closest_segment_point(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            self.center.x,
            point.y.clamp(self.bottom(), self.top()),
            self.center.z,
        )
    }
}

/// Distance between the capsule's inner segment and the box surface
/// (0 when the segment touches or enters the box)
pub fn segment_aabb_distance(capsule: &Capsule, aabb: &Aabb) -> f32 {
    let min = aabb.min();
    let max = aabb.max();

    let dx = ((capsule.center.x - aabb.center.x).abs() - aabb.half_extents.x).max(0.0);
    let dz = ((capsule.center.z - aabb.center.z).abs() - aabb.half_extents.z).max(0.0);
    let dy = (min.y - capsule.top()).max(capsule.bottom() - max.y).max(0.0);

    Vec3::new(dx, dy, dz).length()
}

/// True when the capsule touches the box
pub fn capsule_aabb_overlap(capsule: &Capsule, aabb: &Aabb) -> bool {
    segment_aabb_distance(capsule, aabb) <= capsule.radius
}

/// True when the capsule touches a sphere (trigger volume)
pub fn capsule_sphere_overlap(capsule: &Capsule, center: Vec3, radius: f32) -> bool {
    let closest = capsule.closest_segment_point(center);
    closest.distance_squared(center) <= (capsule.radius + radius).powi(2)
}
