//! Scene visibility module
//!
//! Scene objects, the adaptive octree spatial index, the background
//! culling pass and the instanced draw batcher.

mod object;
mod octree;
mod culling;
mod batcher;

pub use object::{
    SceneObject, ObjectId, ObjectFlags, MaterialId, Primitive, RenderComponent,
};
pub use octree::{Octree, NodeId, LEAF_CAPACITY, ROOT_HALF_SPAN};
pub use culling::{CullingPass, FrameInput, PassOutput};
pub use batcher::{
    DrawBatcher, DrawBatchSet, DrawCommand, DrawKey, InstanceData, BatchRequest,
    MaterialPass, NO_MATERIAL_SLOT,
};
