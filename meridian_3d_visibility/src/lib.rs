/*!
# Meridian 3D Visibility

Visibility and draw-batching core for the Meridian 3D renderer.

This crate decides, every frame, what a camera can see and how to draw it
with the fewest GPU submissions. It is a pure in-process computation layer:
the GPU command layer, asset import, memory allocation and windowing live in
sibling crates and are consumed through plain data (transforms, index ranges,
material ids).

## Architecture

- **geometry**: bounding volumes (planes, axis-aligned cubes/boxes, oriented
  boxes) with the fixed corner enumeration the intersection code relies on
- **camera**: the six-plane frustum, separating-axis intersection tests, and
  the camera that caches its world-space frustum between moves
- **scene**: the adaptive octree spatial index, the background culling pass,
  and the draw batcher that folds visible primitives into instanced draws

Data flows Camera → Frustum → CullingPass (worker thread) → Octree walk →
DrawBatcher → indirect draw commands + instance records.
*/

// Internal modules
mod error;
pub mod log;
pub mod geometry;
pub mod camera;
pub mod scene;
pub mod utils;

// Main meridian3d namespace module
pub mod meridian3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Geometry sub-module with bounding volumes
    pub mod geometry {
        pub use crate::geometry::*;
    }

    // Camera sub-module (frustum + intersection tests)
    pub mod camera {
        pub use crate::camera::*;
    }

    // Scene sub-module (octree, culling pass, draw batcher)
    pub mod scene {
        pub use crate::scene::*;
    }

    // Utility sub-module (id allocation)
    pub mod utils {
        pub use crate::utils::*;
    }
}

// Re-export math library at crate root
pub use glam;
