//! Input types.
//!
//! Platform-agnostic pointer events. Hosts translate whatever their windowing
//! layer produces into [`PointerEvent`]s and hand them to
//! [`Engine::dispatch`](crate::engine::Engine::dispatch).

mod types;

pub use types::{EventKind, Modifiers, MouseButton, PointerEvent};
