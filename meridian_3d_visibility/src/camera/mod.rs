//! Camera and frustum module
//!
//! Provides the six-plane view frustum, the separating-axis intersection
//! tests against bounding volumes, and a camera that caches its world-space
//! frustum between moves.

mod frustum;
mod camera;

pub use frustum::{
    Frustum, PLANE_NEAR, PLANE_FAR, PLANE_TOP, PLANE_BOTTOM, PLANE_LEFT, PLANE_RIGHT,
};
pub use camera::Camera;
