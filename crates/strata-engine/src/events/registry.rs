use std::fmt;
use std::rc::{Rc, Weak};

use crate::engine::Engine;
use crate::input::{EventKind, PointerEvent};
use crate::scene::{Shape, ShapeRef};
use crate::surface::Surface;

use super::handler::EventHandler;
use super::probe::{EventFn, Hit, PointerProbe, ProbeCtx, ProbeFactory};

/// Identity of one registered callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    #[inline]
    pub(crate) const fn new(v: u64) -> Self {
        Self(v)
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Returned by [`Engine::add_event_listener`]; unregisters exactly that callback.
#[must_use = "dropping a Subscription keeps the listener registered"]
#[derive(Debug)]
pub struct Subscription {
    shape: Weak<Shape>,
    kind: EventKind,
    listener: ListenerId,
}

impl Subscription {
    #[inline]
    pub fn listener(&self) -> ListenerId {
        self.listener
    }

    /// Removes the callback. Returns `false` (and logs a warning) when it was
    /// already gone, e.g. because the shape was cleared.
    pub fn unsubscribe(self, engine: &mut Engine) -> bool {
        engine.remove_subscription(&self)
    }
}

/// Routes registrations to the per-kind [`EventHandler`]s and mirrors them on
/// the shapes so they can be removed in bulk.
pub struct EventRegistry {
    handlers: Vec<EventHandler>,
    next_listener: u64,
}

impl EventRegistry {
    /// Creates one handler per [`EventKind`], all using [`PointerProbe`].
    pub fn new() -> Self {
        let handlers = EventKind::ALL
            .into_iter()
            .map(|kind| EventHandler::new(kind, Box::new(PointerProbe)))
            .collect();
        Self { handlers, next_listener: 1 }
    }

    #[inline]
    pub fn handler(&self, kind: EventKind) -> &EventHandler {
        &self.handlers[kind.index()]
    }

    #[inline]
    fn handler_mut(&mut self, kind: EventKind) -> &mut EventHandler {
        &mut self.handlers[kind.index()]
    }

    /// Swaps the probe factory used for future registrations of `kind`.
    pub fn set_probe_factory(&mut self, kind: EventKind, factory: Box<dyn ProbeFactory>) {
        self.handler_mut(kind).set_factory(factory);
    }

    /// Registers `callback` on `shape` for `kind`.
    pub fn push_event(
        &mut self,
        surface: &mut dyn Surface,
        shape: &ShapeRef,
        kind: EventKind,
        callback: EventFn,
    ) -> Subscription {
        let listener = ListenerId::new(self.next_listener);
        self.next_listener += 1;

        self.handler_mut(kind).track(surface, Rc::clone(shape), listener, callback);
        shape.track_listener(kind, listener);

        Subscription { shape: Rc::downgrade(shape), kind, listener }
    }

    /// Removes the single callback behind `subscription`.
    pub fn unsubscribe(&mut self, surface: &mut dyn Surface, subscription: &Subscription) -> bool {
        let handler = self.handler_mut(subscription.kind);
        let removed = handler.remove_listener(subscription.listener);
        if let Some(shape) = subscription.shape.upgrade() {
            shape.untrack_listener(subscription.kind, subscription.listener);
        }
        handler.check_empty(surface);
        removed
    }

    /// Removes every `kind` callback registered on `shape`.
    ///
    /// A shape with no listener set for `kind` is left untouched.
    pub fn remove_listener(&mut self, surface: &mut dyn Surface, shape: &Shape, kind: EventKind) {
        if !shape.clear_listeners(kind) {
            return;
        }
        let handler = self.handler_mut(kind);
        let removed = handler.remove_shape(shape.id());
        log::trace!("cleared {removed} {kind} registration(s) for {}", shape.id());
        handler.check_empty(surface);
    }

    /// Removes every callback of every kind registered on `shape`.
    pub fn remove_all(&mut self, surface: &mut dyn Surface, shape: &Shape) {
        for kind in shape.event_kinds() {
            self.remove_listener(surface, shape, kind);
        }
    }

    /// Resolves the topmost hit for `event` among its kind's registrations.
    pub fn resolve(&self, event: &PointerEvent, ctx: &mut ProbeCtx<'_>) -> Option<Hit> {
        self.handler(event.kind).resolve(event, ctx)
    }

    #[inline]
    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.handler(kind).is_listening()
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use kurbo::Rect;

    use super::*;
    use crate::surface::HeadlessSurface;

    fn noop() -> EventFn {
        Rc::new(RefCell::new(|_: &mut Engine, _: &PointerEvent| {}))
    }

    fn shape() -> ShapeRef {
        Shape::rect(Rect::new(0.0, 0.0, 10.0, 10.0)).into_ref()
    }

    #[test]
    fn push_event_mirrors_listener_on_shape() {
        let mut surface = HeadlessSurface::new(50.0, 50.0);
        let mut registry = EventRegistry::new();
        let s = shape();

        let sub = registry.push_event(&mut surface, &s, EventKind::Click, noop());
        assert_eq!(s.listeners(EventKind::Click), vec![sub.listener()]);
        assert!(registry.is_listening(EventKind::Click));
        assert!(!registry.is_listening(EventKind::DblClick));
    }

    #[test]
    fn unsubscribe_removes_only_that_callback() {
        let mut surface = HeadlessSurface::new(50.0, 50.0);
        let mut registry = EventRegistry::new();
        let s = shape();

        let first = registry.push_event(&mut surface, &s, EventKind::Click, noop());
        let second = registry.push_event(&mut surface, &s, EventKind::Click, noop());

        assert!(registry.unsubscribe(&mut surface, &first));
        assert_eq!(s.listeners(EventKind::Click), vec![second.listener()]);
        assert!(registry.is_listening(EventKind::Click));

        assert!(registry.unsubscribe(&mut surface, &second));
        assert!(!registry.is_listening(EventKind::Click));
        assert!(!surface.is_listening(EventKind::Click));

        assert!(!registry.unsubscribe(&mut surface, &second));
    }

    #[test]
    fn remove_listener_without_set_is_noop() {
        let mut surface = HeadlessSurface::new(50.0, 50.0);
        let mut registry = EventRegistry::new();
        let other = shape();
        let _sub = registry.push_event(&mut surface, &other, EventKind::Click, noop());

        registry.remove_listener(&mut surface, &shape(), EventKind::Click);
        assert_eq!(registry.handler(EventKind::Click).len(), 1);
    }

    #[test]
    fn remove_all_clears_every_kind() {
        let mut surface = HeadlessSurface::new(50.0, 50.0);
        let mut registry = EventRegistry::new();
        let s = shape();
        let _a = registry.push_event(&mut surface, &s, EventKind::Click, noop());
        let _b = registry.push_event(&mut surface, &s, EventKind::MouseMove, noop());

        registry.remove_all(&mut surface, &s);
        assert!(registry.handler(EventKind::Click).is_empty());
        assert!(registry.handler(EventKind::MouseMove).is_empty());
        assert!(!surface.is_listening(EventKind::Click));
        assert!(!surface.is_listening(EventKind::MouseMove));
    }
}
