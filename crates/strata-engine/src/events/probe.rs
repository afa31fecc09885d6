use std::cell::RefCell;
use std::rc::Rc;

use crate::coords::SurfaceInfo;
use crate::engine::Engine;
use crate::input::PointerEvent;
use crate::scene::{LayerIndex, ShapeRef};
use crate::surface::Surface;

use super::hit_test;

/// User callback for a shape event.
///
/// Receives the engine so it can render, clear or re-layer shapes; any pass
/// it schedules runs after the callback returns.
pub type EventFn = Rc<RefCell<dyn FnMut(&mut Engine, &PointerEvent)>>;

/// Everything a probe may consult while testing one event.
pub struct ProbeCtx<'a> {
    pub surface: &'a dyn Surface,
    pub info: &'a mut SurfaceInfo,
}

/// Per-registration test: a candidate dispatch on hit, `None` on miss.
pub type Probe = Box<dyn Fn(&PointerEvent, &mut ProbeCtx<'_>) -> Option<Hit>>;

/// Builds the probe for a (shape, callback) registration.
///
/// One factory is installed per event kind; the shared dispatch logic in
/// [`EventHandler`](super::EventHandler) stays the same for every kind.
pub trait ProbeFactory {
    fn build(&self, shape: ShapeRef, callback: EventFn) -> Probe;
}

/// A shape that contains the event point, with its callback bound to the event.
pub struct Hit {
    shape: ShapeRef,
    callback: EventFn,
    event: PointerEvent,
}

impl Hit {
    pub fn new(shape: ShapeRef, callback: EventFn, event: PointerEvent) -> Self {
        Self { shape, callback, event }
    }

    #[inline]
    pub fn shape(&self) -> &ShapeRef {
        &self.shape
    }

    #[inline]
    pub fn layer(&self) -> Option<LayerIndex> {
        self.shape.layer()
    }

    /// Invokes the bound callback.
    ///
    /// A callback that dispatches an event which lands on itself again is
    /// already borrowed; that nested invocation is skipped.
    pub(crate) fn fire(self, engine: &mut Engine) {
        match self.callback.try_borrow_mut() {
            Ok(mut callback) => (&mut *callback)(engine, &self.event),
            Err(_) => log::warn!(
                "{} callback on {} is already running; nested dispatch skipped",
                self.event.kind,
                self.shape.id()
            ),
        }
    }
}

/// Probe factory for pointer events: hit when the pointer lies inside the
/// shape under its current render mode.
#[derive(Debug, Copy, Clone, Default)]
pub struct PointerProbe;

impl ProbeFactory for PointerProbe {
    fn build(&self, shape: ShapeRef, callback: EventFn) -> Probe {
        Box::new(move |event: &PointerEvent, ctx: &mut ProbeCtx<'_>| {
            // The surface may have moved since registration.
            ctx.info.refresh_offset(ctx.surface.offset());
            let local = ctx.info.to_local(event.client);
            if hit_test::contains(&shape, local.x, local.y) {
                Some(Hit::new(Rc::clone(&shape), Rc::clone(&callback), *event))
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::*;
    use crate::scene::Shape;
    use crate::surface::HeadlessSurface;

    fn noop() -> EventFn {
        Rc::new(RefCell::new(|_: &mut Engine, _: &PointerEvent| {}))
    }

    #[test]
    fn probe_uses_current_surface_offset() {
        let shape = Shape::rect(Rect::new(0.0, 0.0, 10.0, 10.0)).into_ref();
        let probe = PointerProbe.build(Rc::clone(&shape), noop());

        let surface = HeadlessSurface::new(100.0, 100.0);
        let mut info = SurfaceInfo::new(100.0, 100.0);

        let ev = PointerEvent::click(105.0, 105.0);
        assert!(probe(&ev, &mut ProbeCtx { surface: &surface, info: &mut info }).is_none());

        surface.set_offset(Point::new(100.0, 100.0));
        let hit = probe(&ev, &mut ProbeCtx { surface: &surface, info: &mut info });
        assert_eq!(hit.map(|h| h.shape().id()), Some(shape.id()));
        assert_eq!(info.offset(), Point::new(100.0, 100.0));
    }
}
