/// Camera: perspective parameters plus a cached world-space frustum.
///
/// The base frustum is immutable after construction; the world frustum is
/// recomputed only when the camera actually moves. Setting the same
/// transform twice is free (equality check against the last known
/// transform).

use glam::Mat4;
use crate::error::Result;
use super::frustum::Frustum;

/// A perspective camera owning its culling frustum.
///
/// The caller (simulation/input code) drives the world transform; this
/// core only consumes it. Construction fails hard on degenerate
/// projection parameters; there is no such thing as a camera with a
/// zero field of view.
#[derive(Debug, Clone)]
pub struct Camera {
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
    /// Camera-local frustum, built once from the projection parameters
    base_frustum: Frustum,
    /// Last known model-to-world transform
    world_transform: Mat4,
    /// Base frustum transformed by `world_transform`, kept in sync
    world_frustum: Frustum,
}

impl Camera {
    /// Create a camera from perspective parameters, at the world origin
    /// with default orientation (looking down -Z).
    ///
    /// # Errors
    ///
    /// `Error::DegenerateCamera` on non-positive `fov_y`/`aspect`/`near`
    /// or `near >= far`; see [`Frustum::from_perspective`].
    pub fn new(fov_y: f32, aspect: f32, near: f32, far: f32) -> Result<Self> {
        let base_frustum = Frustum::from_perspective(fov_y, aspect, near, far)?;
        Ok(Self {
            fov_y,
            aspect,
            near,
            far,
            base_frustum,
            world_transform: Mat4::IDENTITY,
            world_frustum: base_frustum,
        })
    }

    /// Update the camera's model-to-world transform.
    ///
    /// Recomputes the world frustum only if the transform actually changed.
    pub fn set_world_transform(&mut self, transform: Mat4) {
        if transform == self.world_transform {
            return;
        }
        self.world_transform = transform;
        self.world_frustum = self.base_frustum.transformed(&transform);
    }

    // ===== ACCESSORS =====

    /// Vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Width / height aspect ratio.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Near clipping distance.
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clipping distance.
    pub fn far(&self) -> f32 {
        self.far
    }

    /// The camera-local frustum (immutable after construction).
    pub fn base_frustum(&self) -> &Frustum {
        &self.base_frustum
    }

    /// Current model-to-world transform.
    pub fn world_transform(&self) -> &Mat4 {
        &self.world_transform
    }

    /// The world-space frustum for the current transform.
    pub fn world_frustum(&self) -> &Frustum {
        &self.world_frustum
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
