/// Frustum: six inward-facing planes plus corner points for SAT tests.
///
/// Two representations exist at runtime:
/// - a *base* frustum in camera-local space (forward = -Z), built once from
///   field-of-view/aspect/near/far and reused for the camera's lifetime
/// - a *world* frustum obtained by transforming the base frustum with the
///   camera's current model-to-world matrix
///
/// Visibility answers are conservative: zero false negatives (nothing
/// actually visible is ever culled), false positives allowed.

use glam::{Mat4, Vec3};
use crate::error::{Error, Result};
use crate::geometry::{Aabb, Aabc, Obb, Plane};

/// Frustum plane indices
pub const PLANE_NEAR: usize = 0;
pub const PLANE_FAR: usize = 1;
pub const PLANE_TOP: usize = 2;
pub const PLANE_BOTTOM: usize = 3;
pub const PLANE_LEFT: usize = 4;
pub const PLANE_RIGHT: usize = 5;

/// Axes shorter than this are treated as degenerate and skipped by the
/// separating-axis loop (a zero-scaled box axis separates nothing).
const DEGENERATE_AXIS_EPSILON: f32 = 1e-12;

/// Six-plane view volume with its 8 corner points.
///
/// Planes face inward: a point is inside when it is strictly in front of
/// all six. The corner points back the separating-axis projections.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// Planes in near, far, top, bottom, left, right order
    planes: [Plane; 6],
    /// Near face then far face, each counter-clockwise seen from the camera
    corners: [Vec3; 8],
    /// The position the frustum was built relative to (camera apex)
    origin: Vec3,
}

impl Frustum {
    /// Build a camera-local frustum from perspective parameters.
    ///
    /// Forward is -Z, up is +Y. The near/far planes sit along forward at the
    /// given distances; the four side planes pass through the apex with
    /// normals derived from the far-plane half-extents
    /// (`far * tan(fov_y / 2)`, widened by `aspect`) crossed with forward.
    ///
    /// # Errors
    ///
    /// `Error::DegenerateCamera` when `fov_y` or `aspect` is not strictly
    /// positive, `fov_y` reaches half a turn, `near` is not strictly
    /// positive, or `near >= far`. These are caller bugs, surfaced hard.
    pub fn from_perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Result<Self> {
        if !(fov_y > 0.0) || fov_y >= std::f32::consts::PI {
            return Err(Error::DegenerateCamera(format!(
                "field of view must be in (0, pi), got {}",
                fov_y
            )));
        }
        if !(aspect > 0.0) {
            return Err(Error::DegenerateCamera(format!(
                "aspect ratio must be positive, got {}",
                aspect
            )));
        }
        if !(near > 0.0) || near >= far {
            return Err(Error::DegenerateCamera(format!(
                "need 0 < near < far, got near {} far {}",
                near, far
            )));
        }

        let forward = Vec3::NEG_Z;
        let up = Vec3::Y;
        let right = Vec3::X;

        let far_half_height = far * (fov_y * 0.5).tan();
        let far_half_width = far_half_height * aspect;
        let far_center = forward * far;

        let planes = [
            // near/far: perpendicular to forward at their distances
            Plane::from_point_normal(forward * near, forward),
            Plane::from_point_normal(far_center, -forward),
            // side planes pass through the apex; normals face inward
            Plane::from_point_normal(Vec3::ZERO, (far_center + up * far_half_height).cross(right)),
            Plane::from_point_normal(Vec3::ZERO, right.cross(far_center - up * far_half_height)),
            Plane::from_point_normal(Vec3::ZERO, (far_center - right * far_half_width).cross(up)),
            Plane::from_point_normal(Vec3::ZERO, up.cross(far_center + right * far_half_width)),
        ];

        let near_half_height = near * (fov_y * 0.5).tan();
        let near_half_width = near_half_height * aspect;
        let corners = [
            // near face, counter-clockwise seen from the camera
            Vec3::new(near_half_width, near_half_height, -near),
            Vec3::new(-near_half_width, near_half_height, -near),
            Vec3::new(-near_half_width, -near_half_height, -near),
            Vec3::new(near_half_width, -near_half_height, -near),
            // far face, same order
            Vec3::new(far_half_width, far_half_height, -far),
            Vec3::new(-far_half_width, far_half_height, -far),
            Vec3::new(-far_half_width, -far_half_height, -far),
            Vec3::new(far_half_width, -far_half_height, -far),
        ];

        let frustum = Self {
            planes,
            corners,
            origin: Vec3::ZERO,
        };
        frustum.debug_check_opposing_planes();
        Ok(frustum)
    }

    /// Transform this frustum by a model-to-world matrix.
    ///
    /// Each plane is transformed individually (rotate normal, recompute
    /// distance from a transformed point-on-plane); corners and origin are
    /// transformed as points.
    pub fn transformed(&self, matrix: &Mat4) -> Frustum {
        let frustum = Frustum {
            planes: self.planes.map(|plane| plane.transformed(matrix)),
            corners: self.corners.map(|corner| matrix.transform_point3(corner)),
            origin: matrix.transform_point3(self.origin),
        };
        frustum.debug_check_opposing_planes();
        frustum
    }

    /// Opposing plane pairs must never share a normal direction.
    fn debug_check_opposing_planes(&self) {
        for (a, b) in [
            (PLANE_NEAR, PLANE_FAR),
            (PLANE_TOP, PLANE_BOTTOM),
            (PLANE_LEFT, PLANE_RIGHT),
        ] {
            debug_assert!(
                self.planes[a].normal().dot(self.planes[b].normal()) < 1.0 - 1e-4,
                "opposing frustum planes share a normal direction"
            );
        }
    }

    // ===== ACCESSORS =====

    /// The six planes in near, far, top, bottom, left, right order.
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// The 8 corner points (near face then far face).
    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    /// The apex position the frustum was built relative to.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    // ===== CONTAINMENT & INTERSECTION =====

    /// Whether a point is strictly inside the frustum.
    ///
    /// Strict inequality on every plane: a point exactly on a plane is NOT
    /// inside. Boundary objects rely on the interval tests below instead.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.is_in_front(point))
    }

    /// Test a box's world-space corners and axes against this frustum with
    /// the separating-axis theorem.
    ///
    /// Fast-accept when any box corner is contained. Otherwise up to 9
    /// candidate axes are tried in order (the 6 plane normals, then the
    /// box's own axes) and a single axis with a strict gap between the
    /// projected intervals proves separation. Exactly touching intervals
    /// count as overlap, so tangent boxes are never culled.
    fn intersects_hull(&self, corners: &[Vec3; 8], axes: &[Vec3; 3]) -> bool {
        if corners.iter().any(|&corner| self.contains_point(corner)) {
            return true;
        }

        let candidates = self
            .planes
            .iter()
            .map(|plane| plane.normal())
            .chain(axes.iter().copied());

        for axis in candidates {
            if axis.length_squared() < DEGENERATE_AXIS_EPSILON {
                continue;
            }
            let (frustum_min, frustum_max) = project(&self.corners, axis);
            let (box_min, box_max) = project(corners, axis);
            if frustum_max < box_min || box_max < frustum_min {
                return false;
            }
        }

        true
    }

    /// SAT test against an axis-aligned box.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.intersects_hull(&aabb.corners(), &[Vec3::X, Vec3::Y, Vec3::Z])
    }

    /// SAT test against an axis-aligned cube (octree node bounds).
    pub fn intersects_cube(&self, cube: &Aabc) -> bool {
        self.intersects_hull(&cube.corners(), &[Vec3::X, Vec3::Y, Vec3::Z])
    }

    /// SAT test against an oriented box.
    pub fn intersects_obb(&self, obb: &Obb) -> bool {
        self.intersects_hull(obb.corners(), obb.axes())
    }

    /// Clip a line segment against all six planes.
    ///
    /// Each plane crossing is classified as an entry (direction agrees with
    /// the inward normal) or an exit; the segment intersects the frustum iff
    /// the latest entry does not come after the earliest exit along the
    /// segment's parametric direction.
    pub fn intersects_segment(&self, start: Vec3, end: Vec3) -> bool {
        let direction = end - start;
        let mut latest_entry = 0.0_f32;
        let mut earliest_exit = 1.0_f32;

        for plane in &self.planes {
            let along = plane.normal().dot(direction);
            let start_distance = plane.signed_distance(start);

            if along.abs() < 1e-6 {
                // Parallel to the plane: fully behind it means no hit
                if start_distance < 0.0 {
                    return false;
                }
                continue;
            }

            let t = -start_distance / along;
            if along > 0.0 {
                latest_entry = latest_entry.max(t);
            } else {
                earliest_exit = earliest_exit.min(t);
            }
            if latest_entry > earliest_exit {
                return false;
            }
        }

        true
    }
}

/// Project a point set onto an axis, returning the (min, max) interval.
fn project(points: &[Vec3], axis: Vec3) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for point in points {
        let d = axis.dot(*point);
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
