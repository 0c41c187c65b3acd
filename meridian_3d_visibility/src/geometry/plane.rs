/// Plane: a unit normal plus a signed distance from the origin.
///
/// The distance is measured from the space origin along the normal, so a
/// point P lies on the plane when `normal · P == distance`. Sign
/// convention: positive signed distance = point is in front of the plane
/// (on the side the normal points toward).

use glam::{Mat4, Vec3};

/// An infinite plane with an inward/outward orientation.
///
/// The normal is unit length once constructed; both constructors
/// normalize their input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vec3,
    distance: f32,
}

impl Plane {
    /// Create a plane from a (not necessarily unit) normal and a distance
    /// measured along that normal.
    ///
    /// The distance is interpreted against the *normalized* direction, so
    /// `Plane::new(Vec3::Y * 5.0, 2.0)` is the plane `y == 2`.
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self {
            normal: normal.normalize(),
            distance,
        }
    }

    /// Create a plane passing through `point` with the given normal.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            distance: normal.dot(point),
        }
    }

    /// The unit normal direction.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Signed distance from the origin along the normal.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Signed distance from `point` to this plane.
    ///
    /// Positive = in front (the normal side), negative = behind,
    /// zero = exactly on the plane.
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.distance
    }

    /// Whether `point` is strictly in front of the plane.
    ///
    /// Strict inequality: a point exactly on the plane is NOT in front.
    pub fn is_in_front(&self, point: Vec3) -> bool {
        self.signed_distance(point) > 0.0
    }

    /// Transform this plane by a model-to-world matrix.
    ///
    /// Rotates the normal, then recomputes the distance from a transformed
    /// point-on-plane, so non-uniform translation/rotation are both handled.
    pub fn transformed(&self, matrix: &Mat4) -> Plane {
        let normal = matrix.transform_vector3(self.normal).normalize();
        let point_on_plane = matrix.transform_point3(self.normal * self.distance);
        Plane {
            normal,
            distance: normal.dot(point_on_plane),
        }
    }
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;
