//! Pointer event routing.
//!
//! Each [`EventKind`](crate::input::EventKind) has one [`EventHandler`]
//! holding (shape, probe) registrations in registration order. When the
//! surface delivers an event, every probe runs, and only the hit whose shape
//! has the highest resolved layer gets its callback invoked.

pub mod hit_test;

mod handler;
mod probe;
mod registry;

pub use handler::EventHandler;
pub use probe::{EventFn, Hit, PointerProbe, Probe, ProbeCtx, ProbeFactory};
pub use registry::{EventRegistry, ListenerId, Subscription};
