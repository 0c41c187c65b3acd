/// Allocates unique, monotonically increasing `u64` identifiers.
///
/// Unlike a slot allocator, freed identifiers are never recycled: an id
/// handed out once stays retired forever, so a stale reference can never
/// alias a newer object.
///
/// Not internally synchronized; the owner is the single writer. Inject an
/// instance where ids are minted instead of reaching for global state; that
/// keeps tests hermetic and id streams independent per scene.
///
/// # Example
///
/// ```ignore
/// let mut ids = IdAllocator::new();
/// let a = ids.alloc(); // 1
/// let b = ids.alloc(); // 2
/// assert_ne!(a, b);    // and no future alloc() ever returns 1 or 2 again
/// ```
#[derive(Debug)]
pub struct IdAllocator {
    next_id: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    /// Create a new allocator. The first allocated id is 1; 0 is reserved
    /// as a never-allocated sentinel.
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Allocate the next identifier.
    pub fn alloc(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Number of identifiers allocated so far.
    pub fn allocated(&self) -> u64 {
        self.next_id.saturating_sub(1)
    }
}

#[cfg(test)]
#[path = "id_allocator_tests.rs"]
mod tests;
