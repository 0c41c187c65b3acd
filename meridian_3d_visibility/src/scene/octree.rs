/// Octree: adaptive spatial index over scene objects.
///
/// Nodes live in a flat arena (`Vec<Node>`) addressed by `NodeId`; child
/// links and the non-owning parent back-reference are arena indices, so no
/// node ever owns another through a pointer. A node is either a leaf (an
/// ordered, capacity-bounded collection of objects) or a branch of exactly
/// eight children; the transition leaf→branch happens exactly once via
/// `split` and is never reversed; removals leave the structure in place.
///
/// Octant addressing is a 3-bit index: bit0 = right/left (x), bit1 =
/// back/forward (z), bit2 = top/bottom (y); a bit is set when the position
/// is >= the node center on that axis.

use glam::Vec3;
use crate::camera::Frustum;
use crate::engine_trace;
use crate::geometry::{Aabc, WorldPoint};
use super::object::{ObjectId, SceneObject};

/// Maximum number of objects a leaf holds before an insertion splits it.
///
/// The check is an exact match on the way up through the capacity: a leaf
/// seeded beyond capacity by a split (all objects landing in one octant)
/// stays a leaf and keeps accepting, which bounds splitting for coincident
/// objects at one level instead of recursing forever.
pub const LEAF_CAPACITY: usize = 32;

/// Root half-span: effectively unbounded (a power of two keeps child
/// centers exactly representable through repeated halving).
pub const ROOT_HALF_SPAN: f32 = 8_388_608.0; // 2^23

/// Index of a node in the octree arena.
///
/// Stable for the lifetime of the tree; nodes are never deallocated
/// individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    fn index(&self) -> usize {
        self.0
    }
}

/// A node is exactly one of: a bag of objects, or eight children.
#[derive(Debug)]
enum NodeKind {
    /// Ordered object storage, split-bounded by `LEAF_CAPACITY`
    Leaf(Vec<SceneObject>),
    /// Child arena indices addressed by the 3-bit octant
    Branch([NodeId; 8]),
}

/// One octree node: cubic bounds, parent back-reference, leaf/branch state.
#[derive(Debug)]
struct Node {
    bounds: Aabc,
    /// Non-owning back-reference (None for the root)
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// Adaptive octree owning the scene-object storage.
///
/// Objects are moved in on insertion and moved back out on removal, never
/// aliased. Insertion never fails: capacity is virtual, a full leaf
/// splits instead of rejecting.
#[derive(Debug)]
pub struct Octree {
    nodes: Vec<Node>,
    root: NodeId,
    len: usize,
}

impl Octree {
    /// Create an empty tree whose root leaf spans effectively all of world
    /// space, centered at the origin.
    pub fn new() -> Self {
        let root = Node {
            bounds: Aabc::new(WorldPoint::new(Vec3::ZERO), ROOT_HALF_SPAN),
            parent: None,
            kind: NodeKind::Leaf(Vec::new()),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            len: 0,
        }
    }

    /// Number of objects stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of nodes (leaves + branches) allocated so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Cubic bounds of a node.
    pub fn node_bounds(&self, node: NodeId) -> &Aabc {
        &self.nodes[node.index()].bounds
    }

    /// Non-owning parent back-reference (None for the root).
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    /// Whether a node is currently a leaf.
    pub fn is_leaf(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.index()].kind, NodeKind::Leaf(_))
    }

    /// Objects stored directly in a leaf (empty slice for a branch).
    pub fn leaf_objects(&self, node: NodeId) -> &[SceneObject] {
        match &self.nodes[node.index()].kind {
            NodeKind::Leaf(objects) => objects,
            NodeKind::Branch(_) => &[],
        }
    }

    /// Mutable access to a leaf's objects (empty slice for a branch).
    pub fn leaf_objects_mut(&mut self, node: NodeId) -> &mut [SceneObject] {
        match &mut self.nodes[node.index()].kind {
            NodeKind::Leaf(objects) => objects,
            NodeKind::Branch(_) => &mut [],
        }
    }

    // ===== INSERTION =====

    /// Insert an object, splitting leaves as needed.
    ///
    /// Descends by octant from the root, appends to the first leaf with
    /// room, and returns the leaf that stored the object; callers may keep
    /// it for `remove_from`. A leaf exactly at capacity is split once and
    /// the object goes directly into the matching fresh child; that child
    /// is not split again even if redistribution filled it, so coincident
    /// objects settle instead of splitting forever.
    pub fn insert(&mut self, object: SceneObject) -> NodeId {
        let position = object.world_position().position();
        let mut node = self.root;

        loop {
            let center = self.nodes[node.index()].bounds.center().position();
            let at_capacity = match &self.nodes[node.index()].kind {
                NodeKind::Branch(children) => {
                    node = children[octant_index(center, position)];
                    continue;
                }
                NodeKind::Leaf(objects) => objects.len() == LEAF_CAPACITY,
            };

            if at_capacity {
                self.split(node);
                let child = self.child(node, octant_index(center, position));
                self.push_to_leaf(child, object);
                return child;
            }

            self.push_to_leaf(node, object);
            return node;
        }
    }

    /// Child of a branch by octant index.
    fn child(&self, node: NodeId, octant: usize) -> NodeId {
        match &self.nodes[node.index()].kind {
            NodeKind::Branch(children) => children[octant],
            NodeKind::Leaf(_) => unreachable!("octant lookup on a leaf node"),
        }
    }

    fn push_to_leaf(&mut self, node: NodeId, object: SceneObject) {
        match &mut self.nodes[node.index()].kind {
            NodeKind::Leaf(objects) => {
                objects.push(object);
                self.len += 1;
            }
            NodeKind::Branch(_) => unreachable!("append on a branch node"),
        }
    }

    /// Split a leaf into eight children and redistribute its objects.
    ///
    /// Child spans are half the parent span; child centers offset by half
    /// the child span on each axis. Every object is moved (never dropped)
    /// into the child matching its octant; redistribution itself never
    /// triggers further splits. The leaf becomes a branch exactly once.
    fn split(&mut self, node: NodeId) {
        let (center, half_span, held) = {
            let entry = &mut self.nodes[node.index()];
            let held = match &mut entry.kind {
                NodeKind::Leaf(objects) => std::mem::take(objects),
                NodeKind::Branch(_) => unreachable!("split on a branch node"),
            };
            (
                entry.bounds.center().position(),
                entry.bounds.half_span(),
                held,
            )
        };

        let child_half = half_span * 0.5;
        let mut children = [NodeId(0); 8];
        for (octant, child) in children.iter_mut().enumerate() {
            let offset = Vec3::new(
                if octant & 0b001 != 0 { child_half } else { -child_half },
                if octant & 0b100 != 0 { child_half } else { -child_half },
                if octant & 0b010 != 0 { child_half } else { -child_half },
            );
            *child = NodeId(self.nodes.len());
            self.nodes.push(Node {
                bounds: Aabc::new(WorldPoint::new(center + offset), child_half),
                parent: Some(node),
                kind: NodeKind::Leaf(Vec::new()),
            });
        }

        for object in held {
            let octant = octant_index(center, object.world_position().position());
            if let NodeKind::Leaf(objects) = &mut self.nodes[children[octant].index()].kind {
                objects.push(object);
            }
        }

        self.nodes[node.index()].kind = NodeKind::Branch(children);
        engine_trace!(
            "meridian3d::Octree",
            "split node {:?} (half span {})",
            node,
            half_span
        );
    }

    // ===== REMOVAL =====

    /// Find the leaf currently holding an object, by depth-first identity
    /// search from the root.
    pub fn find_leaf(&self, id: ObjectId) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            match &self.nodes[node.index()].kind {
                NodeKind::Leaf(objects) => {
                    if objects.iter().any(|object| object.id() == id) {
                        return Some(node);
                    }
                }
                NodeKind::Branch(children) => stack.extend_from_slice(children),
            }
        }
        None
    }

    /// Extract an object by id, searching from the root.
    ///
    /// The object is moved out of the tree; relocation is remove +
    /// re-insert. Returns None if no object with this id is stored.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let leaf = self.find_leaf(id)?;
        self.remove_from(leaf, id)
    }

    /// Extract an object from a known leaf (the fast path for callers that
    /// kept the `NodeId` returned by `insert`).
    pub fn remove_from(&mut self, leaf: NodeId, id: ObjectId) -> Option<SceneObject> {
        match &mut self.nodes[leaf.index()].kind {
            NodeKind::Leaf(objects) => {
                let position = objects.iter().position(|object| object.id() == id)?;
                self.len -= 1;
                // Vec::remove keeps the leaf's insertion order intact
                Some(objects.remove(position))
            }
            NodeKind::Branch(_) => None,
        }
    }

    // ===== ENUMERATION =====

    /// Depth-first walk returning every non-empty leaf whose cube
    /// intersects the frustum; subtrees failing the cube test are pruned
    /// whole. Read-only: this is the per-frame path and never mutates the
    /// tree. An empty tree yields an empty set, not an error.
    pub fn leaves_in_frustum(&self, frustum: &Frustum) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            let entry = &self.nodes[node.index()];
            if !frustum.intersects_cube(&entry.bounds) {
                continue;
            }
            match &entry.kind {
                NodeKind::Leaf(objects) => {
                    if !objects.is_empty() {
                        leaves.push(node);
                    }
                }
                NodeKind::Branch(children) => stack.extend_from_slice(children),
            }
        }
        leaves
    }

    /// Every leaf node, unfiltered (including empty leaves).
    pub fn leaves(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|node| self.is_leaf(*node))
            .collect()
    }

    /// Iterate over every stored object.
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.nodes.iter().filter_map(leaf_storage).flatten()
    }

    /// Apply a closure to every stored object, mutably.
    pub fn for_each_object_mut(&mut self, mut f: impl FnMut(&mut SceneObject)) {
        for node in &mut self.nodes {
            if let NodeKind::Leaf(objects) = &mut node.kind {
                for object in objects {
                    f(object);
                }
            }
        }
    }
}

impl Default for Octree {
    fn default() -> Self {
        Self::new()
    }
}

fn leaf_storage(node: &Node) -> Option<&Vec<SceneObject>> {
    match &node.kind {
        NodeKind::Leaf(objects) => Some(objects),
        NodeKind::Branch(_) => None,
    }
}

/// 3-bit octant of `position` relative to `center`:
/// bit0 = x (right/left), bit1 = z (back/forward), bit2 = y (top/bottom);
/// a bit is set when the coordinate is >= the center.
fn octant_index(center: Vec3, position: Vec3) -> usize {
    ((position.x >= center.x) as usize)
        | (((position.z >= center.z) as usize) << 1)
        | (((position.y >= center.y) as usize) << 2)
}

#[cfg(test)]
#[path = "octree_tests.rs"]
mod tests;
