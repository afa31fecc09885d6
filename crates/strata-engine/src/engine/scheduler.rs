use std::rc::Rc;

use crate::coords::SurfaceInfo;
use crate::scene::{LayerCounter, PaintCtx, RenderOptions, ShapeId, ShapeRef, SortKey};
use crate::surface::Surface;

use super::Engine;

/// Completion callback for a queue entry; runs once after its first pass.
pub type DoneFn = Box<dyn FnOnce(&mut Engine, &ShapeRef)>;

struct RenderEntry {
    shape: ShapeRef,
    options: RenderOptions,
    on_done: Option<DoneFn>,
    /// Queue sequence number; breaks z-index ties.
    order: u64,
}

impl RenderEntry {
    #[inline]
    fn key(&self) -> SortKey {
        SortKey::new(self.shape.z_index(), self.order)
    }
}

/// Render queue plus the deferred-pass state machine.
///
/// Entries persist across passes: queuing a shape means "this shape is part
/// of the scene", not "draw it once". At most one pass is pending at a time;
/// any number of mutations before the flush coalesce into it.
#[derive(Default)]
pub struct RenderScheduler {
    queue: Vec<RenderEntry>,
    next_order: u64,
    layers: LayerCounter,
    pending: bool,
    passes: u64,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry for `shape` and schedules a pass.
    ///
    /// Queuing an already-queued shape appends a second entry.
    pub fn enqueue(&mut self, shape: ShapeRef, options: RenderOptions, on_done: Option<DoneFn>) {
        let order = self.next_order;
        self.next_order += 1;
        self.queue.push(RenderEntry { shape, options, on_done, order });
        self.schedule();
    }

    /// Marks a pass as pending. Returns `false` if one already was.
    pub fn schedule(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        log::trace!("render pass scheduled");
        true
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Clears the pending flag, returning whether a pass was pending.
    #[inline]
    pub(crate) fn take_pending(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }

    /// Removes every entry for `shape`. Returns how many were removed.
    pub fn remove(&mut self, shape: ShapeId) -> usize {
        let before = self.queue.len();
        self.queue.retain(|entry| entry.shape.id() != shape);
        before - self.queue.len()
    }

    pub fn contains(&self, shape: ShapeId) -> bool {
        self.queue.iter().any(|entry| entry.shape.id() == shape)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of passes executed since construction.
    #[inline]
    pub fn pass_count(&self) -> u64 {
        self.passes
    }

    /// Order the next pass would paint in, given current z-indices.
    pub fn paint_order(&self) -> Vec<ShapeId> {
        let mut entries: Vec<&RenderEntry> = self.queue.iter().collect();
        entries.sort_by_key(|entry| entry.key());
        entries.into_iter().map(|entry| entry.shape.id()).collect()
    }

    /// Runs one pass: sort, clear, assign layers, paint.
    ///
    /// Returns the completion callbacks that became due, for the engine to
    /// invoke once the pass is over.
    pub(crate) fn run_pass(
        &mut self,
        surface: &mut dyn Surface,
        info: &SurfaceInfo,
    ) -> Vec<(DoneFn, ShapeRef)> {
        self.passes += 1;
        self.queue.sort_by_key(RenderEntry::key);
        surface.clear_rect(info.bounds());

        let mut due = Vec::new();
        for entry in &mut self.queue {
            let layer = self.layers.advance();
            entry.shape.set_layer(layer);

            let mut ctx = PaintCtx { surface: &mut *surface, info, layer };
            entry.shape.before_render(&mut ctx, &entry.options);
            entry.shape.render(&mut ctx, &entry.options);

            if let Some(on_done) = entry.on_done.take() {
                due.push((on_done, Rc::clone(&entry.shape)));
            }
        }

        log::debug!(
            "render pass {} painted {} entr{}",
            self.passes,
            self.queue.len(),
            if self.queue.len() == 1 { "y" } else { "ies" }
        );
        due
    }
}
