/// Draw batcher: folds visible primitives into instanced draw commands.
///
/// Consumes the frustum-filtered leaf set produced by the culling pass and
/// groups primitives by (material, index-range) draw key, so identical
/// geometry+material pairs become one indexed-indirect draw with many
/// instances. Output is a pair of parallel arrays (draw commands and
/// per-instance records) ready for the external GPU submission layer.
///
/// Accumulation state is thread-local to the batcher instance; several
/// batchers may run concurrently (one per render sub-pass) as long as each
/// writes its own output.

use glam::Mat4;
use rustc_hash::FxHashMap;
use crate::camera::Frustum;
use crate::engine_trace;
use crate::geometry::Obb;
use super::object::{MaterialId, ObjectFlags, SceneObject};
use super::octree::{NodeId, Octree};

/// Material slot written into instance records of textureless primitives.
pub const NO_MATERIAL_SLOT: u32 = u32::MAX;

// ===== DRAW KEY =====

/// Identity of a batchable unit: material + geometry index-range offset.
///
/// Two primitives with equal keys draw the same geometry with the same
/// material and therefore collapse into one instanced command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawKey {
    /// Material reference (None batches the textureless variant)
    pub material: Option<MaterialId>,
    /// First index into the shared index buffer
    pub first_index: u32,
}

// ===== OUTPUT RECORDS =====

/// Per-instance record, laid out for direct GPU upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    /// World transform of the instance (object world x component local)
    pub world: Mat4,
    /// Material slot, or `NO_MATERIAL_SLOT` for textureless instances
    pub material_slot: u32,
    /// Keeps the struct a multiple of 16 bytes for SSBO array strides
    pub _pad: [u32; 3],
}

impl InstanceData {
    /// Build a record from a world matrix and an optional material.
    pub fn new(world: Mat4, material: Option<MaterialId>) -> Self {
        Self {
            world,
            material_slot: material.map_or(NO_MATERIAL_SLOT, |m| m.get()),
            _pad: [0; 3],
        }
    }
}

/// One indexed-indirect draw descriptor (VkDrawIndexedIndirectCommand
/// field order).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawCommand {
    /// Number of indices per instance
    pub index_count: u32,
    /// Number of instances batched under this command
    pub instance_count: u32,
    /// First index into the shared index buffer
    pub first_index: u32,
    /// Base vertex offset
    pub vertex_offset: i32,
    /// Offset of this command's first record in the instance array
    pub first_instance: u32,
}

/// Batching output: parallel draw-command and instance-record arrays.
///
/// Invariants: `sum(instance_count) == instances.len()`, every command's
/// `[first_instance, first_instance + instance_count)` slice belongs to
/// exactly one draw key, and no command has zero instances.
#[derive(Debug, Default)]
pub struct DrawBatchSet {
    commands: Vec<DrawCommand>,
    instances: Vec<InstanceData>,
}

impl DrawBatchSet {
    /// The ordered draw commands.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// The instance records, parallel to the commands.
    pub fn instances(&self) -> &[InstanceData] {
        &self.instances
    }

    /// Whether the pass produced no draw work at all.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The instance slice belonging to one draw command.
    pub fn instances_of(&self, command: &DrawCommand) -> &[InstanceData] {
        let start = command.first_instance as usize;
        &self.instances[start..start + command.instance_count as usize]
    }
}

// ===== REQUEST =====

/// Which primitives a batching pass accepts, by material presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialPass {
    /// Only primitives carrying a material
    Textured,
    /// Only primitives without a material
    Untextured,
}

/// Caller-side filtering for one batching pass.
pub struct BatchRequest<'a> {
    required_flags: ObjectFlags,
    material_pass: MaterialPass,
    filter: Option<&'a dyn Fn(&SceneObject) -> bool>,
}

impl<'a> BatchRequest<'a> {
    /// A request accepting objects whose flag mask contains
    /// `required_flags` (e.g. VISIBLE | ENTITY) in the given material pass.
    pub fn new(required_flags: ObjectFlags, material_pass: MaterialPass) -> Self {
        Self {
            required_flags,
            material_pass,
            filter: None,
        }
    }

    /// Add a per-object predicate; objects it rejects are skipped.
    pub fn with_filter(mut self, filter: &'a dyn Fn(&SceneObject) -> bool) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Required flag set.
    pub fn required_flags(&self) -> ObjectFlags {
        self.required_flags
    }

    /// Selected material pass.
    pub fn material_pass(&self) -> MaterialPass {
        self.material_pass
    }
}

// ===== BATCHER =====

/// Accumulation map entry while a pass is being built.
struct PendingBatch {
    index_count: u32,
    first_index: u32,
    vertex_offset: i32,
    instances: Vec<InstanceData>,
}

/// Groups visible primitives into the fewest possible instanced draws.
///
/// `&mut self` so the accumulation map's allocation is reused across
/// frames; the map is drained into the output on every build.
#[derive(Default)]
pub struct DrawBatcher {
    pending: FxHashMap<DrawKey, PendingBatch>,
}

impl DrawBatcher {
    /// Create a batcher with an empty accumulation map.
    pub fn new() -> Self {
        Self {
            pending: FxHashMap::default(),
        }
    }

    /// Build draw batches from the culling pass's surviving leaves.
    ///
    /// Walks `leaves` (already pruned to potentially-visible space) and,
    /// for every object passing the flag/predicate filters, re-tests each
    /// GPU-ready primitive's world-space oriented box against the frustum,
    /// finer-grained than the node-level test since a leaf can be
    /// partially visible while most of its contents are not. Survivors
    /// accumulate under their draw key and flatten into parallel arrays;
    /// iteration order of the flatten is not stable across frames, but the
    /// running `first_instance` offsets are always consistent between the
    /// two arrays of one pass.
    pub fn build(
        &mut self,
        tree: &Octree,
        leaves: &[NodeId],
        frustum: &Frustum,
        request: &BatchRequest<'_>,
    ) -> DrawBatchSet {
        self.pending.clear();

        for &leaf in leaves {
            for object in tree.leaf_objects(leaf) {
                if !object.flags().contains(request.required_flags) {
                    continue;
                }
                if let Some(filter) = request.filter {
                    if !filter(object) {
                        continue;
                    }
                }
                if object.components().is_empty() {
                    continue;
                }
                self.accumulate_object(object, frustum, request.material_pass);
            }
        }

        self.flatten()
    }

    fn accumulate_object(
        &mut self,
        object: &SceneObject,
        frustum: &Frustum,
        material_pass: MaterialPass,
    ) {
        let object_world = object.world_matrix();

        for component in object.components() {
            let component_world = object_world * *component.transform();

            for primitive in component.primitives() {
                if !primitive.is_gpu_ready() {
                    continue;
                }
                let world_box = Obb::from_aabb(primitive.bounds(), &component_world);
                if !frustum.intersects_obb(&world_box) {
                    continue;
                }
                match material_pass {
                    MaterialPass::Textured if primitive.material().is_none() => continue,
                    MaterialPass::Untextured if primitive.material().is_some() => continue,
                    _ => {}
                }

                let key = DrawKey {
                    material: primitive.material(),
                    first_index: primitive.first_index(),
                };
                self.pending
                    .entry(key)
                    .or_insert_with(|| PendingBatch {
                        index_count: primitive.index_count(),
                        first_index: primitive.first_index(),
                        vertex_offset: primitive.vertex_offset(),
                        instances: Vec::new(),
                    })
                    .instances
                    .push(InstanceData::new(component_world, primitive.material()));
            }
        }
    }

    /// Drain the accumulation map into parallel command/instance arrays,
    /// assigning each command's first-instance offset as the running total
    /// of previously flattened instances.
    fn flatten(&mut self) -> DrawBatchSet {
        let mut commands = Vec::with_capacity(self.pending.len());
        let mut instances = Vec::new();

        for (_, batch) in self.pending.drain() {
            debug_assert!(
                !batch.instances.is_empty(),
                "zero-instance draw command reached the output array"
            );
            let first_instance = instances.len() as u32;
            commands.push(DrawCommand {
                index_count: batch.index_count,
                instance_count: batch.instances.len() as u32,
                first_index: batch.first_index,
                vertex_offset: batch.vertex_offset,
                first_instance,
            });
            instances.extend(batch.instances);
        }

        debug_assert_eq!(
            commands
                .iter()
                .map(|command| command.instance_count as usize)
                .sum::<usize>(),
            instances.len(),
            "instance counts must cover the instance array exactly"
        );

        engine_trace!(
            "meridian3d::DrawBatcher",
            "flattened {} commands over {} instances",
            commands.len(),
            instances.len()
        );

        DrawBatchSet { commands, instances }
    }
}

#[cfg(test)]
#[path = "batcher_tests.rs"]
mod tests;
