use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use kurbo::{BezPath, Point, Rect, Size};

use crate::coords::Color;
use crate::input::EventKind;

use super::{ListenerToken, Surface, SurfaceBackend};

/// A recorded surface operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear(Rect),
    Fill { path: BezPath, color: Color },
    Stroke { path: BezPath, width: f64, color: Color },
}

#[derive(Debug, Default)]
struct Recording {
    size: Size,
    offset: Point,
    next_token: u64,
    listeners: BTreeMap<ListenerToken, EventKind>,
    commands: Vec<DrawCmd>,
}

/// In-memory surface that records draw calls and listener installs.
///
/// Clones share the same recording, so a host (or a test) can keep a clone
/// to inspect what the engine did with the one it owns.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    inner: Rc<RefCell<Recording>>,
}

impl HeadlessSurface {
    pub fn new(width: f64, height: f64) -> Self {
        let surface = Self::default();
        surface.inner.borrow_mut().size = Size::new(width, height);
        surface
    }

    /// Moves the surface in the pointer frame, e.g. to simulate page scroll.
    pub fn set_offset(&self, offset: Point) {
        self.inner.borrow_mut().offset = offset;
    }

    pub fn commands(&self) -> Vec<DrawCmd> {
        self.inner.borrow().commands.clone()
    }

    /// Returns and forgets everything recorded so far.
    pub fn clear_count(&self) -> usize {
        self.inner
            .borrow()
            .commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Clear(_)))
            .count()
    }

    /// Paint commands issued after the most recent clear, in paint order.
    pub fn last_frame(&self) -> Vec<DrawCmd> {
        let inner = self.inner.borrow();
        let start = inner
            .commands
            .iter()
            .rposition(|cmd| matches!(cmd, DrawCmd::Clear(_)))
            .map_or(0, |i| i + 1);
        inner.commands[start..].to_vec()
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.inner.borrow().listeners.values().filter(|k| **k == kind).count()
    }

    #[inline]
    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.listener_count(kind) > 0
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> Size {
        self.inner.borrow().size
    }

    fn resize(&mut self, size: Size) {
        self.inner.borrow_mut().size = size;
    }

    fn offset(&self) -> Point {
        self.inner.borrow().offset
    }

    fn add_listener(&mut self, kind: EventKind) -> ListenerToken {
        let mut inner = self.inner.borrow_mut();
        let token = ListenerToken(inner.next_token);
        inner.next_token += 1;
        inner.listeners.insert(token, kind);
        token
    }

    fn remove_listener(&mut self, kind: EventKind, token: ListenerToken) {
        let mut inner = self.inner.borrow_mut();
        if inner.listeners.get(&token) == Some(&kind) {
            inner.listeners.remove(&token);
        }
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.inner.borrow_mut().commands.push(DrawCmd::Clear(rect));
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.inner.borrow_mut().commands.push(DrawCmd::Fill { path: path.clone(), color });
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Color) {
        self.inner
            .borrow_mut()
            .commands
            .push(DrawCmd::Stroke { path: path.clone(), width, color });
    }
}

/// Backend resolving target names to pre-registered headless surfaces.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    surfaces: HashMap<String, HeadlessSurface>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_surface(mut self, target: impl Into<String>, surface: HeadlessSurface) -> Self {
        self.surfaces.insert(target.into(), surface);
        self
    }
}

impl SurfaceBackend for HeadlessBackend {
    fn acquire(&mut self, target: &str) -> Option<Box<dyn Surface>> {
        self.surfaces
            .get(target)
            .map(|surface| Box::new(surface.clone()) as Box<dyn Surface>)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Shape as _;

    use super::*;

    #[test]
    fn clones_share_recording() {
        let surface = HeadlessSurface::new(10.0, 10.0);
        let mut owned = surface.clone();
        owned.clear_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(surface.clear_count(), 1);
    }

    #[test]
    fn listener_tokens_are_scoped_to_kind() {
        let mut surface = HeadlessSurface::new(10.0, 10.0);
        let click = surface.add_listener(EventKind::Click);
        let _dbl = surface.add_listener(EventKind::DblClick);

        surface.remove_listener(EventKind::DblClick, click);
        assert!(surface.is_listening(EventKind::Click));

        surface.remove_listener(EventKind::Click, click);
        assert!(!surface.is_listening(EventKind::Click));
        assert!(surface.is_listening(EventKind::DblClick));
    }

    #[test]
    fn last_frame_starts_after_latest_clear() {
        let mut surface = HeadlessSurface::new(10.0, 10.0);
        let path = Rect::new(0.0, 0.0, 1.0, 1.0).to_path(0.1);
        surface.fill_path(&path, Color::black());
        surface.clear_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        surface.stroke_path(&path, 2.0, Color::white());

        let frame = surface.last_frame();
        assert_eq!(frame.len(), 1);
        assert!(matches!(frame[0], DrawCmd::Stroke { width, .. } if width == 2.0));
    }

    #[test]
    fn backend_resolves_registered_targets_only() {
        let mut backend = HeadlessBackend::new().with_surface("#canvas", HeadlessSurface::new(5.0, 5.0));
        assert!(backend.acquire("#canvas").is_some());
        assert!(backend.acquire("#missing").is_none());
    }
}
