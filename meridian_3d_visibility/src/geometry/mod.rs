//! Bounding volume geometry
//!
//! Pure geometry with no dependencies on the rest of the crate: coordinate
//! spaces, planes, axis-aligned cubes/boxes and oriented boxes. The corner
//! enumeration order defined here is load-bearing for the intersection and
//! edge-walking code in `camera::frustum`.

mod coordinate;
mod plane;
mod bounds;

pub use coordinate::{Coordinate, LocalPoint, WorldPoint, LocalSpace, WorldSpace, Space};
pub use plane::Plane;
pub use bounds::{Aabb, Aabc, Obb, BOX_EDGES};
