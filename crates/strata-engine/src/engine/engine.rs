use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use kurbo::Size;

use crate::coords::SurfaceInfo;
use crate::events::{EventFn, EventRegistry, ProbeCtx, ProbeFactory, Subscription};
use crate::input::{EventKind, PointerEvent};
use crate::scene::{RenderOptions, Shape, ShapeId, ShapeRef, ZIndex};
use crate::surface::{Surface, SurfaceBackend};

use super::scheduler::{DoneFn, RenderScheduler};
use super::{EngineConfig, EngineError};

/// Scene owner: render queue, event registry and the drawing surface.
///
/// The engine is single-threaded and turn based. Mutating calls
/// ([`render`](Self::render), [`clear`](Self::clear),
/// [`modify_shape_layer`](Self::modify_shape_layer)) only schedule a pass;
/// the pass runs when the current turn ends, i.e. on [`flush`](Self::flush),
/// at the end of [`batch`](Self::batch), or after [`dispatch`](Self::dispatch)
/// has invoked its callback.
pub struct Engine {
    config: EngineConfig,
    surface: Box<dyn Surface>,
    info: SurfaceInfo,
    scheduler: RenderScheduler,
    events: EventRegistry,
}

impl Engine {
    /// Resolves `config.target` through `backend` and sets up the engine on it.
    pub fn new(config: EngineConfig, backend: &mut dyn SurfaceBackend) -> Result<Self> {
        let surface = backend
            .acquire(&config.target)
            .ok_or_else(|| EngineError::SurfaceNotFound { target: config.target.clone() })
            .context("failed to acquire drawing surface")?;
        Self::with_surface(config, surface)
    }

    /// Sets up the engine on an already acquired surface.
    ///
    /// The surface is resized to the configured dimensions.
    pub fn with_surface(config: EngineConfig, mut surface: Box<dyn Surface>) -> Result<Self> {
        config.validate().context("invalid engine configuration")?;

        surface.resize(Size::new(config.width, config.height));
        let mut info = SurfaceInfo::new(config.width, config.height);
        info.refresh_offset(surface.offset());

        log::info!(
            "engine attached to `{}` ({}x{})",
            config.target,
            config.width,
            config.height
        );

        Ok(Self {
            config,
            surface,
            info,
            scheduler: RenderScheduler::new(),
            events: EventRegistry::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn surface_info(&self) -> SurfaceInfo {
        self.info
    }

    #[inline]
    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    #[inline]
    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    /// Re-reads the surface position in the pointer frame.
    pub fn update_surface_offset(&mut self) {
        self.info.refresh_offset(self.surface.offset());
    }

    // ── render queue ──────────────────────────────────────────────────────

    /// Adds `shape` to the scene and schedules a pass.
    pub fn render(&mut self, shape: &ShapeRef, options: RenderOptions) {
        self.scheduler.enqueue(Rc::clone(shape), options, None);
    }

    /// Like [`render`](Self::render), calling `on_done` after the first pass
    /// that paints this entry.
    pub fn render_with<F>(&mut self, shape: &ShapeRef, options: RenderOptions, on_done: F)
    where
        F: FnOnce(&mut Engine, &ShapeRef) + 'static,
    {
        let on_done: DoneFn = Box::new(on_done);
        self.scheduler.enqueue(Rc::clone(shape), options, Some(on_done));
    }

    /// Removes `shape` from the scene and drops all its event registrations.
    ///
    /// Returns `false` if the shape was not queued; its registrations are
    /// purged either way.
    pub fn clear(&mut self, shape: &Shape) -> bool {
        let removed = self.scheduler.remove(shape.id());
        self.empty_events(shape);
        if removed == 0 {
            return false;
        }
        self.scheduler.schedule();
        true
    }

    /// Changes the declared z-index of `shape` and schedules a pass.
    pub fn modify_shape_layer(&mut self, shape: &Shape, z: impl Into<ZIndex>) {
        shape.set_z_index(z.into());
        self.scheduler.schedule();
    }

    /// Clears the surface and repaints the whole queue immediately.
    ///
    /// A pending pass is left pending.
    pub fn reload(&mut self) {
        let due = self.scheduler.run_pass(self.surface.as_mut(), &self.info);
        for (on_done, shape) in due {
            on_done(self, &shape);
        }
    }

    /// Clears the whole surface without repainting.
    pub fn clear_view(&mut self) {
        self.surface.clear_rect(self.info.bounds());
    }

    /// Ends the current turn: runs the pending pass, and any pass scheduled
    /// by completion callbacks, until nothing is pending.
    ///
    /// Returns the number of passes run.
    pub fn flush(&mut self) -> usize {
        let mut passes = 0;
        while self.scheduler.take_pending() {
            self.reload();
            passes += 1;
        }
        passes
    }

    /// Runs `f` as one turn: everything it schedules collapses into a single
    /// pass at the end.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Engine) -> R) -> R {
        let out = f(self);
        self.flush();
        out
    }

    #[inline]
    pub fn is_render_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    #[inline]
    pub fn pass_count(&self) -> u64 {
        self.scheduler.pass_count()
    }

    pub fn paint_order(&self) -> Vec<ShapeId> {
        self.scheduler.paint_order()
    }

    // ── events ────────────────────────────────────────────────────────────

    /// Registers `callback` for `kind` events landing on `shape`.
    pub fn add_event_listener<F>(&mut self, shape: &ShapeRef, kind: EventKind, callback: F) -> Subscription
    where
        F: FnMut(&mut Engine, &PointerEvent) + 'static,
    {
        let callback: EventFn = Rc::new(RefCell::new(callback));
        self.events.push_event(self.surface.as_mut(), shape, kind, callback)
    }

    /// Removes the single callback behind `subscription`.
    pub fn remove_subscription(&mut self, subscription: &Subscription) -> bool {
        self.events.unsubscribe(self.surface.as_mut(), subscription)
    }

    /// Removes every `kind` callback registered on `shape`.
    pub fn clear_events(&mut self, shape: &Shape, kind: EventKind) {
        self.events.remove_listener(self.surface.as_mut(), shape, kind);
    }

    /// Removes every callback registered on `shape`.
    pub fn empty_events(&mut self, shape: &Shape) {
        self.events.remove_all(self.surface.as_mut(), shape);
    }

    /// Uses `factory` to build probes for future `kind` registrations.
    pub fn set_probe_factory(&mut self, kind: EventKind, factory: Box<dyn ProbeFactory>) {
        self.events.set_probe_factory(kind, factory);
    }

    #[inline]
    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.events.is_listening(kind)
    }

    /// Delivers a raw pointer event, as the surface's listener would.
    ///
    /// Only the topmost shape containing the pointer receives the event.
    /// Passes scheduled by the callback run before this returns. Returns the
    /// shape that received the event.
    pub fn dispatch(&mut self, event: &PointerEvent) -> Option<ShapeId> {
        let hit = {
            let mut ctx = ProbeCtx { surface: self.surface.as_ref(), info: &mut self.info };
            self.events.resolve(event, &mut ctx)
        };
        let target = hit.map(|hit| {
            let id = hit.shape().id();
            log::trace!("{} dispatched to {id}", event.kind);
            hit.fire(self);
            id
        });
        self.flush();
        target
    }
}
