use core::cmp::Ordering;

use super::ZIndex;

/// Paint-order key for a render queue entry.
///
/// Ordering rules:
/// 1) `z`: ascending (back-to-front)
/// 2) `order`: ascending (insertion order for equal z)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    /// Sequence number assigned when the entry was queued.
    pub order: u64,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u64) -> Self {
        Self { z, order }
    }
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.z.cmp(&other.z).then(self.order.cmp(&other.order))
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_dominates_order() {
        assert!(SortKey::new(ZIndex(1), 9) < SortKey::new(ZIndex(2), 0));
    }

    #[test]
    fn equal_z_falls_back_to_order() {
        assert!(SortKey::new(ZIndex(3), 1) < SortKey::new(ZIndex(3), 2));
    }
}
