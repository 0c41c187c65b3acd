//! Utility types
//!
//! Small helpers shared across the crate.

mod id_allocator;

pub use id_allocator::IdAllocator;
