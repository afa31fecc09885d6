use std::rc::Rc;

use crate::input::{EventKind, PointerEvent};
use crate::scene::{ShapeId, ShapeRef};
use crate::surface::{ListenerToken, Surface};

use super::probe::{EventFn, Hit, Probe, ProbeCtx, ProbeFactory};
use super::ListenerId;

/// One (shape, callback) pair and the probe derived from it.
struct Registration {
    shape: ShapeRef,
    listener: ListenerId,
    probe: Probe,
}

/// Registrations for a single event kind plus the raw surface listener that
/// feeds them.
///
/// The raw listener is installed when the first registration arrives and
/// removed by [`check_empty`](Self::check_empty) once none are left.
pub struct EventHandler {
    kind: EventKind,
    factory: Box<dyn ProbeFactory>,
    registrations: Vec<Registration>,
    raw_listener: Option<ListenerToken>,
}

impl EventHandler {
    pub fn new(kind: EventKind, factory: Box<dyn ProbeFactory>) -> Self {
        Self { kind, factory, registrations: Vec::new(), raw_listener: None }
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Whether the raw listener is currently installed on the surface.
    #[inline]
    pub fn is_listening(&self) -> bool {
        self.raw_listener.is_some()
    }

    /// Replaces the probe factory. Existing registrations keep their probes.
    pub fn set_factory(&mut self, factory: Box<dyn ProbeFactory>) {
        self.factory = factory;
    }

    /// Registers `callback` for `shape`, installing the raw listener if this
    /// is the first registration.
    pub fn track(
        &mut self,
        surface: &mut dyn Surface,
        shape: ShapeRef,
        listener: ListenerId,
        callback: EventFn,
    ) {
        if self.registrations.is_empty() {
            self.install(surface);
        }
        let probe = self.factory.build(Rc::clone(&shape), callback);
        self.registrations.push(Registration { shape, listener, probe });
    }

    fn install(&mut self, surface: &mut dyn Surface) {
        if self.raw_listener.is_none() {
            let token = surface.add_listener(self.kind);
            log::debug!("installed raw {} listener ({token:?})", self.kind);
            self.raw_listener = Some(token);
        }
    }

    /// Removes the registration created for `listener`.
    ///
    /// Unknown listeners are reported and otherwise ignored.
    pub fn remove_listener(&mut self, listener: ListenerId) -> bool {
        match self.registrations.iter().position(|reg| reg.listener == listener) {
            Some(index) => {
                self.registrations.remove(index);
                true
            }
            None => {
                log::warn!("{} listener {listener} is not registered", self.kind);
                false
            }
        }
    }

    /// Drops every registration belonging to `shape`. Returns how many were removed.
    pub fn remove_shape(&mut self, shape: ShapeId) -> usize {
        let before = self.registrations.len();
        self.registrations.retain(|reg| reg.shape.id() != shape);
        before - self.registrations.len()
    }

    /// Uninstalls the raw listener if no registrations remain.
    pub fn check_empty(&mut self, surface: &mut dyn Surface) {
        if self.registrations.is_empty() {
            if let Some(token) = self.raw_listener.take() {
                surface.remove_listener(self.kind, token);
                log::debug!("removed raw {} listener ({token:?})", self.kind);
            }
        }
    }

    /// Runs every probe in registration order and returns all hits.
    pub fn collect_hits(&self, event: &PointerEvent, ctx: &mut ProbeCtx<'_>) -> Vec<Hit> {
        self.registrations
            .iter()
            .filter_map(|reg| (reg.probe)(event, &mut *ctx))
            .collect()
    }

    /// Raw listener body: picks the hit with the highest resolved layer.
    ///
    /// Returns `None` when the raw listener is not installed, exactly as if
    /// the surface had not delivered the event. Hits sharing a layer keep
    /// registration order.
    pub fn resolve(&self, event: &PointerEvent, ctx: &mut ProbeCtx<'_>) -> Option<Hit> {
        if !self.is_listening() {
            return None;
        }
        let mut hits = self.collect_hits(event, ctx);
        hits.sort_by(|a, b| b.layer().cmp(&a.layer()));
        hits.into_iter().next()
    }
}
