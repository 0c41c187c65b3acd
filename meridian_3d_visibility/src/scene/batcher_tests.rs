use glam::{Mat4, Vec3};
use crate::camera::Frustum;
use crate::geometry::Aabb;
use crate::scene::{ObjectId, Primitive, RenderComponent};
use super::*;

fn standard_frustum() -> Frustum {
    Frustum::from_perspective(std::f32::consts::FRAC_PI_2, 16.0 / 9.0, 0.1, 1000.0).unwrap()
}

fn primitive(first_index: u32) -> Primitive {
    Primitive::new(Aabb::new(Vec3::ZERO, Vec3::ONE), first_index, 36, 0)
}

fn renderable(id: u64, position: Vec3, first_index: u32) -> SceneObject {
    SceneObject::new(ObjectId::new(id))
        .at(position)
        .with_flags(ObjectFlags::VISIBLE)
        .with_component(RenderComponent::new(Mat4::IDENTITY).with_primitive(primitive(first_index)))
}

fn visible_scene(objects: Vec<SceneObject>) -> (Octree, Vec<NodeId>) {
    let mut tree = Octree::new();
    for object in objects {
        tree.insert(object);
    }
    let leaves = tree.leaves_in_frustum(&standard_frustum());
    (tree, leaves)
}

// ============================================================================
// Batching & instancing
// ============================================================================

#[test]
fn test_identical_keys_collapse_into_one_instanced_command() {
    let (tree, leaves) = visible_scene(vec![
        renderable(1, Vec3::new(-2.0, 0.0, -10.0), 0),
        renderable(2, Vec3::new(2.0, 0.0, -10.0), 0),
    ]);

    let mut batcher = DrawBatcher::new();
    let request = BatchRequest::new(ObjectFlags::VISIBLE, MaterialPass::Untextured);
    let batches = batcher.build(&tree, &leaves, &standard_frustum(), &request);

    assert_eq!(batches.commands().len(), 1);
    assert_eq!(batches.commands()[0].instance_count, 2);
    assert_eq!(batches.commands()[0].index_count, 36);
    assert_eq!(batches.commands()[0].first_instance, 0);
    assert_eq!(batches.instances().len(), 2);
}

#[test]
fn test_distinct_geometry_gets_distinct_commands() {
    let (tree, leaves) = visible_scene(vec![
        renderable(1, Vec3::new(-2.0, 0.0, -10.0), 0),
        renderable(2, Vec3::new(2.0, 0.0, -10.0), 36),
    ]);

    let mut batcher = DrawBatcher::new();
    let request = BatchRequest::new(ObjectFlags::VISIBLE, MaterialPass::Untextured);
    let batches = batcher.build(&tree, &leaves, &standard_frustum(), &request);

    assert_eq!(batches.commands().len(), 2);
    for command in batches.commands() {
        assert_eq!(command.instance_count, 1);
    }
}

#[test]
fn test_same_geometry_different_material_does_not_batch() {
    let textured = SceneObject::new(ObjectId::new(1))
        .at(Vec3::new(-2.0, 0.0, -10.0))
        .with_flags(ObjectFlags::VISIBLE)
        .with_component(
            RenderComponent::new(Mat4::IDENTITY)
                .with_primitive(primitive(0).with_material(MaterialId::new(1))),
        );
    let also_textured = SceneObject::new(ObjectId::new(2))
        .at(Vec3::new(2.0, 0.0, -10.0))
        .with_flags(ObjectFlags::VISIBLE)
        .with_component(
            RenderComponent::new(Mat4::IDENTITY)
                .with_primitive(primitive(0).with_material(MaterialId::new(2))),
        );
    let (tree, leaves) = visible_scene(vec![textured, also_textured]);

    let mut batcher = DrawBatcher::new();
    let request = BatchRequest::new(ObjectFlags::VISIBLE, MaterialPass::Textured);
    let batches = batcher.build(&tree, &leaves, &standard_frustum(), &request);

    // Same index range, different material slot: two commands
    assert_eq!(batches.commands().len(), 2);
}

#[test]
fn test_instance_counts_partition_the_instance_array() {
    let mut objects = Vec::new();
    for i in 0..12u64 {
        // Three geometry groups of four instances each
        let first_index = (i % 3) as u32 * 36;
        let x = i as f32 * 2.0 - 11.0;
        objects.push(renderable(i + 1, Vec3::new(x, 0.0, -20.0), first_index));
    }
    let (tree, leaves) = visible_scene(objects);

    let mut batcher = DrawBatcher::new();
    let request = BatchRequest::new(ObjectFlags::VISIBLE, MaterialPass::Untextured);
    let batches = batcher.build(&tree, &leaves, &standard_frustum(), &request);

    assert_eq!(batches.commands().len(), 3);
    let total: u32 = batches.commands().iter().map(|c| c.instance_count).sum();
    assert_eq!(total as usize, batches.instances().len());
    assert_eq!(batches.instances().len(), 12);

    // Each command's slice is disjoint and the slices cover the array
    let mut covered = vec![false; batches.instances().len()];
    for command in batches.commands() {
        assert!(command.instance_count > 0);
        let start = command.first_instance as usize;
        for slot in &mut covered[start..start + command.instance_count as usize] {
            assert!(!*slot, "instance covered by two commands");
            *slot = true;
        }
    }
    assert!(covered.iter().all(|&c| c));
}

#[test]
fn test_instance_records_carry_world_transform_and_material_slot() {
    let (tree, leaves) = visible_scene(vec![renderable(1, Vec3::new(3.0, 1.0, -10.0), 0)]);

    let mut batcher = DrawBatcher::new();
    let request = BatchRequest::new(ObjectFlags::VISIBLE, MaterialPass::Untextured);
    let batches = batcher.build(&tree, &leaves, &standard_frustum(), &request);

    let command = &batches.commands()[0];
    let instances = batches.instances_of(command);
    assert_eq!(instances.len(), 1);
    assert_eq!(
        instances[0].world,
        Mat4::from_translation(Vec3::new(3.0, 1.0, -10.0))
    );
    assert_eq!(instances[0].material_slot, NO_MATERIAL_SLOT);
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn test_objects_without_required_flags_are_skipped() {
    let flagged = renderable(1, Vec3::new(-2.0, 0.0, -10.0), 0);
    let unflagged = renderable(2, Vec3::new(2.0, 0.0, -10.0), 0).with_flags(ObjectFlags::empty());
    let (tree, leaves) = visible_scene(vec![flagged, unflagged]);

    let mut batcher = DrawBatcher::new();
    let request = BatchRequest::new(ObjectFlags::VISIBLE, MaterialPass::Untextured);
    let batches = batcher.build(&tree, &leaves, &standard_frustum(), &request);

    assert_eq!(batches.instances().len(), 1);
}

#[test]
fn test_caller_filter_rejects_objects() {
    let (tree, leaves) = visible_scene(vec![
        renderable(1, Vec3::new(-2.0, 0.0, -10.0), 0),
        renderable(2, Vec3::new(2.0, 0.0, -10.0), 0),
    ]);

    let only_even = |object: &SceneObject| object.id().get() % 2 == 0;
    let mut batcher = DrawBatcher::new();
    let request =
        BatchRequest::new(ObjectFlags::VISIBLE, MaterialPass::Untextured).with_filter(&only_even);
    let batches = batcher.build(&tree, &leaves, &standard_frustum(), &request);

    assert_eq!(batches.instances().len(), 1);
}

#[test]
fn test_material_pass_selects_by_material_presence() {
    let untextured = renderable(1, Vec3::new(-2.0, 0.0, -10.0), 0);
    let textured = SceneObject::new(ObjectId::new(2))
        .at(Vec3::new(2.0, 0.0, -10.0))
        .with_flags(ObjectFlags::VISIBLE)
        .with_component(
            RenderComponent::new(Mat4::IDENTITY)
                .with_primitive(primitive(0).with_material(MaterialId::new(7))),
        );
    let (tree, leaves) = visible_scene(vec![untextured, textured]);
    let frustum = standard_frustum();
    let mut batcher = DrawBatcher::new();

    let untextured_pass = BatchRequest::new(ObjectFlags::VISIBLE, MaterialPass::Untextured);
    let batches = batcher.build(&tree, &leaves, &frustum, &untextured_pass);
    assert_eq!(batches.instances().len(), 1);
    assert_eq!(batches.instances()[0].material_slot, NO_MATERIAL_SLOT);

    let textured_pass = BatchRequest::new(ObjectFlags::VISIBLE, MaterialPass::Textured);
    let batches = batcher.build(&tree, &leaves, &frustum, &textured_pass);
    assert_eq!(batches.instances().len(), 1);
    assert_eq!(batches.instances()[0].material_slot, 7);
}

#[test]
fn test_not_gpu_ready_primitives_are_skipped() {
    let mut object = renderable(1, Vec3::new(0.0, 0.0, -10.0), 0);
    object.components_mut()[0].primitives_mut()[0].set_gpu_ready(false);
    let (tree, leaves) = visible_scene(vec![object]);

    let mut batcher = DrawBatcher::new();
    let request = BatchRequest::new(ObjectFlags::VISIBLE, MaterialPass::Untextured);
    let batches = batcher.build(&tree, &leaves, &standard_frustum(), &request);

    assert!(batches.is_empty());
}

#[test]
fn test_out_of_view_primitives_are_retested_per_primitive() {
    // The object's leaf survived the node-level walk, but this primitive's
    // own box is far outside the view volume
    let object = SceneObject::new(ObjectId::new(1))
        .at(Vec3::new(0.0, 0.0, -10.0))
        .with_flags(ObjectFlags::VISIBLE)
        .with_component(
            RenderComponent::new(Mat4::from_translation(Vec3::new(0.0, 0.0, 3000.0)))
                .with_primitive(primitive(0)),
        );
    let mut tree = Octree::new();
    tree.insert(object);
    let leaves = tree.leaves();

    let mut batcher = DrawBatcher::new();
    let request = BatchRequest::new(ObjectFlags::VISIBLE, MaterialPass::Untextured);
    let batches = batcher.build(&tree, &leaves, &standard_frustum(), &request);

    assert!(batches.is_empty());
    assert!(batches.commands().is_empty());
    assert!(batches.instances().is_empty());
}

#[test]
fn test_empty_leaf_set_yields_empty_batches() {
    let tree = Octree::new();
    let mut batcher = DrawBatcher::new();
    let request = BatchRequest::new(ObjectFlags::VISIBLE, MaterialPass::Untextured);
    let batches = batcher.build(&tree, &[], &standard_frustum(), &request);

    assert!(batches.is_empty());
}

// ============================================================================
// GPU layout
// ============================================================================

#[test]
fn test_instance_data_layout_is_gpu_friendly() {
    // Mat4 (64) + u32 slot (4) + 12 bytes padding
    assert_eq!(std::mem::size_of::<InstanceData>(), 80);
    assert_eq!(std::mem::size_of::<InstanceData>() % 16, 0);
}

#[test]
fn test_draw_command_matches_indexed_indirect_layout() {
    // Five tightly packed u32-sized fields
    assert_eq!(std::mem::size_of::<DrawCommand>(), 20);

    let command = DrawCommand {
        index_count: 36,
        instance_count: 2,
        first_index: 72,
        vertex_offset: -4,
        first_instance: 8,
    };
    let bytes: &[u8] = bytemuck::bytes_of(&command);
    assert_eq!(&bytes[0..4], &36u32.to_ne_bytes());
    assert_eq!(&bytes[16..20], &8u32.to_ne_bytes());
}
