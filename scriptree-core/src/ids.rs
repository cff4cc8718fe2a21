//! Identifier allocation for freshly built records.

use std::collections::HashSet;

use crate::types::FragmentId;

/// Hands out [`FragmentId`]s that are unique within one allocator.
///
/// Ids come from a monotonic counter; the `issued` set keeps them unique
/// even after the counter wraps.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u32,
    issued: HashSet<FragmentId>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next id not yet issued.
    pub fn next_id(&mut self) -> FragmentId {
        loop {
            self.next = self.next.wrapping_add(1);
            let id = FragmentId(self.next);
            if self.issued.insert(id) {
                return id;
            }
        }
    }
}
