/// Bounding volumes: axis-aligned cube, axis-aligned box, oriented box.
///
/// All three expose the same 8-corner enumeration: top face then bottom
/// face, each counter-clockwise (seen from above, starting at +x/+z).
/// That order is load-bearing (`BOX_EDGES` and the segment-clipping code
/// index into it) and must not be reordered.

use glam::{Mat4, Vec3};
use super::coordinate::WorldPoint;

/// Corner-index pairs forming the 12 edges of any 8-corner box, in terms
/// of the fixed corner winding: top loop, bottom loop, then verticals.
pub const BOX_EDGES: [(usize, usize); 12] = [
    // top face loop
    (0, 1), (1, 2), (2, 3), (3, 0),
    // bottom face loop
    (4, 5), (5, 6), (6, 7), (7, 4),
    // vertical edges
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// Enumerate the 8 corners of a box from its center and half-extents.
///
/// Winding: top face (+y) counter-clockwise viewed from above, starting at
/// (+x, +z); then the bottom face (-y) in the same x/z order.
fn corners_of(center: Vec3, half: Vec3) -> [Vec3; 8] {
    [
        center + Vec3::new(half.x, half.y, half.z),
        center + Vec3::new(-half.x, half.y, half.z),
        center + Vec3::new(-half.x, half.y, -half.z),
        center + Vec3::new(half.x, half.y, -half.z),
        center + Vec3::new(half.x, -half.y, half.z),
        center + Vec3::new(-half.x, -half.y, half.z),
        center + Vec3::new(-half.x, -half.y, -half.z),
        center + Vec3::new(half.x, -half.y, -half.z),
    ]
}

// ===== AXIS-ALIGNED BOUNDING CUBE =====

/// Axis-aligned bounding cube: world-space center + scalar half-span.
///
/// Used only for octree node bounds, cubic so that subdivision stays
/// uniform on every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabc {
    center: WorldPoint,
    half_span: f32,
}

impl Aabc {
    /// Create a cube from its center and half-span.
    pub fn new(center: WorldPoint, half_span: f32) -> Self {
        Self { center, half_span }
    }

    /// World-space center.
    pub fn center(&self) -> WorldPoint {
        self.center
    }

    /// Half the edge length.
    pub fn half_span(&self) -> f32 {
        self.half_span
    }

    /// The equivalent axis-aligned box (uniform half-extents).
    pub fn to_aabb(&self) -> Aabb {
        Aabb::new(self.center.position(), Vec3::splat(self.half_span))
    }

    /// The 8 corners, in the fixed box winding.
    pub fn corners(&self) -> [Vec3; 8] {
        corners_of(self.center.position(), Vec3::splat(self.half_span))
    }

    /// Whether a point lies inside the cube (boundary counts as inside).
    pub fn contains_point(&self, point: Vec3) -> bool {
        let delta = (point - self.center.position()).abs();
        delta.x <= self.half_span && delta.y <= self.half_span && delta.z <= self.half_span
    }
}

// ===== AXIS-ALIGNED BOUNDING BOX =====

/// Axis-aligned bounding box: center + per-axis half-extents.
///
/// Primitive bounds are stored as a model-space `Aabb` and turned into a
/// world-space `Obb` at culling time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    center: Vec3,
    half_extents: Vec3,
}

impl Aabb {
    /// Create a box from its center and per-axis half-extents.
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Create a box from its minimum and maximum corners.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self {
            center: (min + max) * 0.5,
            half_extents: (max - min) * 0.5,
        }
    }

    /// Box center.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Per-axis half-extents.
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Minimum corner.
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    /// Maximum corner.
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// The 8 corners, in the fixed box winding (top face then bottom face,
    /// each counter-clockwise).
    pub fn corners(&self) -> [Vec3; 8] {
        corners_of(self.center, self.half_extents)
    }
}

// ===== ORIENTED BOUNDING BOX =====

/// Oriented bounding box: world-space corners plus the box's own axes.
///
/// Built from a model-space `Aabb` and the owning object's model-to-world
/// matrix; the orientation is carried implicitly by that transform. Corner
/// winding is preserved through the transform.
#[derive(Debug, Clone, Copy)]
pub struct Obb {
    corners: [Vec3; 8],
    axes: [Vec3; 3],
}

impl Obb {
    /// Transform a model-space box into a world-space oriented box.
    ///
    /// The axes are the matrix's right/up/forward columns, normalized.
    /// A zero-scaled axis degenerates to zero and is skipped by the
    /// separating-axis test.
    pub fn from_aabb(local: &Aabb, model_to_world: &Mat4) -> Self {
        let corners = local
            .corners()
            .map(|corner| model_to_world.transform_point3(corner));
        let axes = [
            model_to_world.col(0).truncate().normalize_or_zero(),
            model_to_world.col(1).truncate().normalize_or_zero(),
            model_to_world.col(2).truncate().normalize_or_zero(),
        ];
        Self { corners, axes }
    }

    /// World-space corners, in the fixed box winding.
    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    /// The box's right/up/forward axes (unit length, or zero if the
    /// source transform collapsed that axis).
    pub fn axes(&self) -> &[Vec3; 3] {
        &self.axes
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
