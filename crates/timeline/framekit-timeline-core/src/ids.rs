//! Record identifiers.

use serde::{Deserialize, Serialize};

/// Handle returned when a record is scheduled; used to cancel it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct RecordId(pub u32);

#[derive(Default, Debug)]
pub(crate) struct RecordIdAllocator {
    next: u32,
}

impl RecordIdAllocator {
    #[inline]
    pub(crate) fn alloc(&mut self) -> RecordId {
        let id = RecordId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let mut a = RecordIdAllocator::default();
        assert_eq!(a.alloc(), RecordId(0));
        assert_eq!(a.alloc(), RecordId(1));
    }
}
