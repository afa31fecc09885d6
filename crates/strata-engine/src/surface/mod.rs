//! Drawing-surface boundary.
//!
//! The engine never talks to a windowing system or canvas API directly. A
//! host provides a [`Surface`] (usually by resolving a target name through a
//! [`SurfaceBackend`]); the engine uses it to clear, paint, read the surface's
//! position in the pointer frame, and install one raw listener per event kind.
//!
//! [`HeadlessSurface`] is an in-memory implementation that records everything.

mod headless;

use kurbo::{BezPath, Point, Rect, Size};

use crate::coords::Color;
use crate::input::EventKind;

pub use headless::{DrawCmd, HeadlessBackend, HeadlessSurface};

/// Handle for a raw listener installed on a surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ListenerToken(pub u64);

/// Canvas-like drawing target.
pub trait Surface {
    /// Current size in logical pixels.
    fn size(&self) -> Size;

    /// Resizes the drawing buffer.
    fn resize(&mut self, size: Size);

    /// Top-left corner of the surface in the global pointer frame.
    fn offset(&self) -> Point;

    /// Starts delivering `kind` events to the engine.
    fn add_listener(&mut self, kind: EventKind) -> ListenerToken;

    /// Stops delivering events for a listener returned by [`add_listener`](Self::add_listener).
    fn remove_listener(&mut self, kind: EventKind, token: ListenerToken);

    /// Clears `rect` (surface-local) to transparent.
    fn clear_rect(&mut self, rect: Rect);

    fn fill_path(&mut self, path: &BezPath, color: Color);

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Color);
}

/// Resolves a configured target name to a surface.
pub trait SurfaceBackend {
    /// Returns `None` when nothing matches `target`.
    fn acquire(&mut self, target: &str) -> Option<Box<dyn Surface>>;
}
