//! Identifier allocation for a single resource store.

/// Hands out strictly increasing identifiers starting at 1.
///
/// Identifiers are never reused, even after the record that held one is deleted. The allocator
/// is not synchronized; the owning store serializes access through its lock.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    /// Create an allocator whose first identifier will be `1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next identifier.
    pub fn next_id(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    /// Most recently allocated identifier, or `0` when nothing has been allocated yet.
    pub fn last(&self) -> u64 {
        self.last
    }
}
