/// Scene object types.
///
/// A SceneObject is the unit the octree stores and the culling pass flags:
/// a stable identity, a world transform, a flag mask and zero or more
/// renderable components. Each component owns primitives with their own
/// model-space bounds and GPU-resident geometry ranges; those ranges and
/// material ids are produced by the asset-import/upload layers and only
/// consumed here.

use glam::{Mat4, Quat, Vec3};
use bitflags::bitflags;
use crate::geometry::{Aabb, WorldPoint};

// ===== IDENTITY =====

/// Stable scene-object identity.
///
/// Monotonically assigned by an injected [`crate::utils::IdAllocator`] and
/// never reused, so a stale id can never alias a newer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Wrap a raw allocated id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ===== FLAGS =====

bitflags! {
    /// Scene object flag mask.
    ///
    /// VISIBLE is written by the culling pass every frame; the others are
    /// owned by simulation/editor code outside this core.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ObjectFlags: u32 {
        /// Passed the last culling pass
        const VISIBLE = 1 << 0;
        /// Never moves after insertion
        const STATIC  = 1 << 1;
        /// Gameplay entity (as opposed to level geometry)
        const ENTITY  = 1 << 2;
    }
}

// ===== MATERIAL =====

/// Identifier of a material in the external material storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(u32);

impl MaterialId {
    /// Wrap a raw material slot index.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw slot index.
    pub fn get(&self) -> u32 {
        self.0
    }
}

// ===== PRIMITIVE =====

/// One renderable piece of geometry inside a component.
///
/// Carries its model-space bounding box, the GPU-resident index/vertex
/// range and an optional material. Primitives with `gpu_ready == false`
/// are skipped by the draw batcher until the upload layer flips them.
#[derive(Debug, Clone)]
pub struct Primitive {
    /// Model-space bounding box
    bounds: Aabb,
    /// First index into the shared index buffer
    first_index: u32,
    /// Number of indices to draw
    index_count: u32,
    /// Base vertex offset into the shared vertex buffer
    vertex_offset: i32,
    /// Material, if any (None = textureless pass)
    material: Option<MaterialId>,
    /// Whether the GPU-side data is staged and drawable
    gpu_ready: bool,
}

impl Primitive {
    /// Create a primitive over a GPU geometry range.
    ///
    /// Starts GPU-ready; the upload layer clears/sets readiness as it
    /// restages data.
    pub fn new(bounds: Aabb, first_index: u32, index_count: u32, vertex_offset: i32) -> Self {
        Self {
            bounds,
            first_index,
            index_count,
            vertex_offset,
            material: None,
            gpu_ready: true,
        }
    }

    /// Attach a material reference.
    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }

    /// Model-space bounding box.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// First index into the shared index buffer.
    pub fn first_index(&self) -> u32 {
        self.first_index
    }

    /// Number of indices to draw.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Base vertex offset.
    pub fn vertex_offset(&self) -> i32 {
        self.vertex_offset
    }

    /// Material reference, if any.
    pub fn material(&self) -> Option<MaterialId> {
        self.material
    }

    /// Whether the GPU-side data is staged and drawable.
    pub fn is_gpu_ready(&self) -> bool {
        self.gpu_ready
    }

    /// Set by the upload layer when geometry is (re)staged.
    pub fn set_gpu_ready(&mut self, ready: bool) {
        self.gpu_ready = ready;
    }
}

// ===== RENDER COMPONENT =====

/// A renderable component attached to a scene object.
///
/// Owns one or more primitives and a component-local transform applied
/// between the object's world transform and the primitive bounds.
#[derive(Debug, Clone)]
pub struct RenderComponent {
    /// Component-local transform (relative to the owning object)
    transform: Mat4,
    /// Geometry primitives owned by this component
    primitives: Vec<Primitive>,
}

impl RenderComponent {
    /// Create an empty component with the given local transform.
    pub fn new(transform: Mat4) -> Self {
        Self {
            transform,
            primitives: Vec::new(),
        }
    }

    /// Append a primitive (builder style).
    pub fn with_primitive(mut self, primitive: Primitive) -> Self {
        self.primitives.push(primitive);
        self
    }

    /// Append a primitive.
    pub fn push_primitive(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Component-local transform.
    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    /// The owned primitives.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Mutable access for the upload layer (GPU-readiness updates).
    pub fn primitives_mut(&mut self) -> &mut [Primitive] {
        &mut self.primitives
    }
}

// ===== SCENE OBJECT =====

/// A dynamic scene object.
///
/// Once inserted, the octree exclusively owns the object: it is moved into
/// the tree and moved back out before relocation or deletion, never
/// aliased.
#[derive(Debug, Clone)]
pub struct SceneObject {
    id: ObjectId,
    translation: Vec3,
    rotation: Quat,
    scale: Vec3,
    flags: ObjectFlags,
    components: Vec<RenderComponent>,
}

impl SceneObject {
    /// Create an object at the world origin with identity rotation, unit
    /// scale, empty flags and no components.
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            flags: ObjectFlags::empty(),
            components: Vec::new(),
        }
    }

    /// Set the world translation (builder style).
    pub fn at(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Set the flag mask (builder style).
    pub fn with_flags(mut self, flags: ObjectFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Attach a render component (builder style).
    pub fn with_component(mut self, component: RenderComponent) -> Self {
        self.components.push(component);
        self
    }

    // ===== ACCESSORS =====

    /// Stable identity.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// World translation, as a tagged world-space coordinate.
    pub fn world_position(&self) -> WorldPoint {
        WorldPoint::new(self.translation)
    }

    /// World translation component.
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// World rotation component.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// World scale component.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// The model-to-world matrix (scale, then rotation, then translation).
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Attached render components.
    pub fn components(&self) -> &[RenderComponent] {
        &self.components
    }

    /// Mutable component access (upload layer, editor).
    pub fn components_mut(&mut self) -> &mut Vec<RenderComponent> {
        &mut self.components
    }

    /// Whether the object carries any renderable primitive at all.
    pub fn has_primitives(&self) -> bool {
        self.components
            .iter()
            .any(|component| !component.primitives().is_empty())
    }

    // ===== TRANSFORM =====

    /// Set the world translation.
    ///
    /// Relocating an object already stored in an octree requires removing
    /// it first; the tree does not watch transforms.
    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }

    /// Set the world rotation.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    /// Set the world scale.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    // ===== FLAGS =====

    /// Current flag mask.
    pub fn flags(&self) -> ObjectFlags {
        self.flags
    }

    /// Replace the flag mask.
    pub fn set_flags(&mut self, flags: ObjectFlags) {
        self.flags = flags;
    }

    /// Raise flags.
    pub fn insert_flags(&mut self, flags: ObjectFlags) {
        self.flags |= flags;
    }

    /// Clear flags.
    pub fn remove_flags(&mut self, flags: ObjectFlags) {
        self.flags &= !flags;
    }

    /// Set or clear the VISIBLE flag (written by the culling pass).
    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.flags |= ObjectFlags::VISIBLE;
        } else {
            self.flags &= !ObjectFlags::VISIBLE;
        }
    }

    /// Whether the last culling pass flagged this object visible.
    pub fn is_visible(&self) -> bool {
        self.flags.contains(ObjectFlags::VISIBLE)
    }
}

#[cfg(test)]
#[path = "object_tests.rs"]
mod tests;
