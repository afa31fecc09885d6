/// Declared paint-order hint set by the author of a shape.
///
/// Higher values are painted later and therefore sit on top.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ZIndex(pub i32);

impl ZIndex {
    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}

impl From<i32> for ZIndex {
    #[inline]
    fn from(v: i32) -> Self {
        Self(v)
    }
}

/// Resolved layer assigned to a shape during a render pass.
///
/// Unlike [`ZIndex`], layer indices are unique per painted entry and
/// comparable across passes: a larger value was painted later.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LayerIndex(pub u64);

/// Monotonic source of [`LayerIndex`] values.
///
/// Never reset after construction, so indices handed out in a later pass are
/// always above those of earlier passes. `u64` cannot be exhausted by any
/// realistic number of passes; the counter saturates instead of wrapping.
#[derive(Debug, Default)]
pub struct LayerCounter {
    next: u64,
}

impl LayerCounter {
    #[inline]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Returns the next layer index and advances the counter.
    #[inline]
    pub fn advance(&mut self) -> LayerIndex {
        let layer = LayerIndex(self.next);
        self.next = self.next.saturating_add(1);
        layer
    }
}
