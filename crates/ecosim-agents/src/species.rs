//! The single counter that mints species IDs.

use ecosim_types::SpeciesId;

/// Monotonic source of [`SpeciesId`]s.
///
/// Every ID it hands out is strictly greater than all earlier ones, so an
/// ID is never reused even after its lineage dies out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesAllocator {
    next: SpeciesId,
    last: Option<SpeciesId>,
}

impl Default for SpeciesAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeciesAllocator {
    /// A fresh allocator; the first ID minted is 1.
    pub const fn new() -> Self {
        Self {
            next: SpeciesId::new(1),
            last: None,
        }
    }

    /// Allocate the next species ID.
    pub const fn mint(&mut self) -> SpeciesId {
        let id = self.next;
        self.next = id.successor();
        self.last = Some(id);
        id
    }

    /// The most recently minted ID, if any.
    pub const fn last(&self) -> Option<SpeciesId> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mints_strictly_increasing_ids() {
        let mut species = SpeciesAllocator::new();
        assert_eq!(species.last(), None);
        let a = species.mint();
        let b = species.mint();
        let c = species.mint();
        assert_eq!(a, SpeciesId::new(1));
        assert!(a < b && b < c);
        assert_eq!(species.last(), Some(c));
    }
}
