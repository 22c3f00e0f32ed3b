//! Ray casting against planes and axis-aligned boxes.

use crate::tile::Tile;
use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum `normal · direction` for a plane hit. Parallel and back-facing rays miss.
pub const PLANE_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ray {
    pub origin: Vec2,
    /// Expected to be unit length.
    pub direction: Vec2,
}

impl Ray {
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        Self { origin, direction }
    }

    /// Ray from `from` toward `to`, or `None` if the points coincide.
    pub fn between(from: Vec2, to: Vec2) -> Option<Self> {
        let direction = (to - from).try_normalize()?;
        Some(Self::new(from, direction))
    }

    pub fn at(&self, t: f32) -> Vec2 {
        self.origin + self.direction * t
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plane {
    pub point: Vec2,
    pub normal: Vec2,
}

impl Plane {
    pub fn new(point: Vec2, normal: Vec2) -> Self {
        Self { point, normal }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box covered by a tile (centre ± half its size).
    pub fn from_tile(tile: &Tile) -> Self {
        let half = tile.size() * 0.5;
        Self::new(tile.position() - half, tile.position() + half)
    }

    /// Inclusive point containment.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Parametric distances along a ray where it enters and leaves a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayInterval {
    pub enter: f32,
    pub exit: f32,
}

/// Distance `t` along the ray to the plane, if the ray faces the plane's normal
/// side-on (`normal · direction > PLANE_EPSILON`) and the hit is not behind the origin.
pub fn ray_plane_intersect(ray: &Ray, plane: &Plane) -> Option<f32> {
    let denom = plane.normal.dot(ray.direction);
    if denom <= PLANE_EPSILON {
        return None;
    }
    let t = (plane.point - ray.origin).dot(plane.normal) / denom;
    (t >= 0.0).then_some(t)
}

/// Slab test. `enter` is clamped to zero so a ray starting inside the box enters at
/// its origin. Touching a corner or running along an edge is a miss.
pub fn ray_aabb_intersect(ray: &Ray, aabb: &Aabb) -> Option<RayInterval> {
    let (near_x, far_x) = slab(ray.origin.x, ray.direction.x, aabb.min.x, aabb.max.x)?;
    let (near_y, far_y) = slab(ray.origin.y, ray.direction.y, aabb.min.y, aabb.max.y)?;

    let enter = near_x.max(near_y).max(0.0);
    let exit = far_x.min(far_y);
    (exit > 0.0 && enter < exit).then_some(RayInterval { enter, exit })
}

/// Entry/exit distances for one axis. A ray with no motion on the axis either lies
/// strictly inside the slab for its whole length or never enters it.
fn slab(origin: f32, direction: f32, min: f32, max: f32) -> Option<(f32, f32)> {
    if direction == 0.0 {
        return (origin > min && origin < max).then_some((f32::NEG_INFINITY, f32::INFINITY));
    }
    let a = (min - origin) / direction;
    let b = (max - origin) / direction;
    Some((a.min(b), a.max(b)))
}
