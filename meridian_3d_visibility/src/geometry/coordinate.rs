/// Coordinate: a position tagged with the space it lives in.
///
/// Object-local and world-space positions are different types; the compiler
/// rejects accidental mixing. Every cross-space operation goes through an
/// explicit matrix transform (`to_world` / `to_local`).

use std::fmt;
use std::marker::PhantomData;
use glam::Mat4;
use glam::Vec3;

/// Marker trait for coordinate spaces.
pub trait Space {
    /// Short space name used in Debug output ("local" / "world")
    const NAME: &'static str;
}

/// Object-local space (model space, before the world transform).
pub enum LocalSpace {}

/// World space (after the object's model-to-world transform).
pub enum WorldSpace {}

impl Space for LocalSpace {
    const NAME: &'static str = "local";
}

impl Space for WorldSpace {
    const NAME: &'static str = "world";
}

/// A 3-component position tagged with its coordinate space.
///
/// The space tag is a zero-sized phantom: `Coordinate<S>` costs exactly
/// one `Vec3` at runtime.
pub struct Coordinate<S: Space> {
    position: Vec3,
    _space: PhantomData<S>,
}

/// Position in object-local space.
pub type LocalPoint = Coordinate<LocalSpace>;

/// Position in world space.
pub type WorldPoint = Coordinate<WorldSpace>;

impl<S: Space> Coordinate<S> {
    /// Wrap a raw position in this space.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            _space: PhantomData,
        }
    }

    /// The raw untagged position.
    pub fn position(&self) -> Vec3 {
        self.position
    }
}

impl LocalPoint {
    /// Transform into world space with a model-to-world matrix.
    pub fn to_world(&self, model_to_world: &Mat4) -> WorldPoint {
        WorldPoint::new(model_to_world.transform_point3(self.position))
    }
}

impl WorldPoint {
    /// Transform into object-local space with a world-to-model matrix
    /// (the inverse of the object's model-to-world matrix).
    pub fn to_local(&self, world_to_model: &Mat4) -> LocalPoint {
        LocalPoint::new(world_to_model.transform_point3(self.position))
    }
}

// Manual impls: derived ones would put unwanted bounds on S
impl<S: Space> Clone for Coordinate<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Space> Copy for Coordinate<S> {}

impl<S: Space> PartialEq for Coordinate<S> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<S: Space> fmt::Debug for Coordinate<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate<{}>({:?})", S::NAME, self.position)
    }
}

#[cfg(test)]
#[path = "coordinate_tests.rs"]
mod tests;
