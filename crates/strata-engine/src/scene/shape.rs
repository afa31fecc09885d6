use std::cell::{Cell, Ref, RefCell};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use kurbo::{BezPath, Circle, Point, Rect, Shape as _};

use crate::events::ListenerId;
use crate::input::EventKind;

use super::painter::{PaintCtx, PathPainter, RenderOptions, ShapePainter};
use super::{LayerIndex, ZIndex};

/// Flattening tolerance used when converting curved primitives to paths.
const PATH_TOLERANCE: f64 = 0.1;

static NEXT_SHAPE_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of a shape for the lifetime of the process.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ShapeId(u64);

impl ShapeId {
    fn next() -> Self {
        ShapeId(NEXT_SHAPE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape#{}", self.0)
    }
}

/// How a shape is drawn, which also decides what counts as a hit.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum RenderMode {
    /// Interior of the path (nonzero winding).
    #[default]
    Fill,
    /// The outline of the path, `line_width` wide.
    Stroke,
}

/// Shared handle to a shape. The engine and the application both hold one.
pub type ShapeRef = Rc<Shape>;

/// A drawable, hit-testable scene object.
///
/// All mutable state sits behind `Cell`/`RefCell`: shapes are shared between
/// the application, the render queue and event registrations, and the engine
/// is single-threaded.
pub struct Shape {
    id: ShapeId,
    z_index: Cell<ZIndex>,
    layer: Cell<Option<LayerIndex>>,
    render_mode: Cell<RenderMode>,
    line_width: Cell<f64>,
    path: RefCell<BezPath>,
    painter: RefCell<Box<dyn ShapePainter>>,
    events: RefCell<HashMap<EventKind, HashSet<ListenerId>>>,
}

impl Shape {
    /// Creates a filled shape from a surface-local path, painted by [`PathPainter`].
    pub fn new(path: BezPath) -> Self {
        Self {
            id: ShapeId::next(),
            z_index: Cell::new(ZIndex::default()),
            layer: Cell::new(None),
            render_mode: Cell::new(RenderMode::Fill),
            line_width: Cell::new(1.0),
            path: RefCell::new(path),
            painter: RefCell::new(Box::new(PathPainter)),
            events: RefCell::new(HashMap::new()),
        }
    }

    pub fn rect(rect: Rect) -> Self {
        Self::new(rect.to_path(PATH_TOLERANCE))
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(Circle::new(center, radius).to_path(PATH_TOLERANCE))
    }

    pub fn with_z_index(self, z: impl Into<ZIndex>) -> Self {
        self.z_index.set(z.into());
        self
    }

    pub fn with_render_mode(self, mode: RenderMode) -> Self {
        self.render_mode.set(mode);
        self
    }

    pub fn with_line_width(self, width: f64) -> Self {
        self.line_width.set(width);
        self
    }

    pub fn with_painter(self, painter: impl ShapePainter + 'static) -> Self {
        *self.painter.borrow_mut() = Box::new(painter);
        self
    }

    #[inline]
    pub fn into_ref(self) -> ShapeRef {
        Rc::new(self)
    }

    #[inline]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    #[inline]
    pub fn z_index(&self) -> ZIndex {
        self.z_index.get()
    }

    /// Changes the declared z-index. Takes effect on the next pass; prefer
    /// [`Engine::modify_shape_layer`](crate::engine::Engine::modify_shape_layer),
    /// which also schedules that pass.
    #[inline]
    pub fn set_z_index(&self, z: ZIndex) {
        self.z_index.set(z);
    }

    /// Layer resolved by the most recent pass that painted this shape.
    ///
    /// `None` until the shape has been through at least one pass.
    #[inline]
    pub fn layer(&self) -> Option<LayerIndex> {
        self.layer.get()
    }

    #[inline]
    pub(crate) fn set_layer(&self, layer: LayerIndex) {
        self.layer.set(Some(layer));
    }

    #[inline]
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode.get()
    }

    #[inline]
    pub fn set_render_mode(&self, mode: RenderMode) {
        self.render_mode.set(mode);
    }

    #[inline]
    pub fn line_width(&self) -> f64 {
        self.line_width.get()
    }

    #[inline]
    pub fn set_line_width(&self, width: f64) {
        self.line_width.set(width);
    }

    /// Surface-local geometry used for painting and hit testing.
    #[inline]
    pub fn path(&self) -> Ref<'_, BezPath> {
        self.path.borrow()
    }

    pub fn set_path(&self, path: BezPath) {
        *self.path.borrow_mut() = path;
    }

    pub(crate) fn before_render(&self, ctx: &mut PaintCtx<'_>, options: &RenderOptions) {
        self.painter.borrow_mut().before_render(self, ctx, options);
    }

    pub(crate) fn render(&self, ctx: &mut PaintCtx<'_>, options: &RenderOptions) {
        self.painter.borrow_mut().render(self, ctx, options);
    }

    // ── event bookkeeping ─────────────────────────────────────────────────

    /// Listeners currently registered on this shape for `kind`.
    pub fn listeners(&self, kind: EventKind) -> Vec<ListenerId> {
        let events = self.events.borrow();
        let mut ids: Vec<ListenerId> = events.get(&kind).into_iter().flatten().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Event kinds that have a listener set on this shape (possibly empty).
    pub fn event_kinds(&self) -> Vec<EventKind> {
        let mut kinds: Vec<EventKind> = self.events.borrow().keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    pub(crate) fn track_listener(&self, kind: EventKind, listener: ListenerId) {
        self.events.borrow_mut().entry(kind).or_default().insert(listener);
    }

    /// Drops one listener; the set for `kind` goes away with its last entry.
    pub(crate) fn untrack_listener(&self, kind: EventKind, listener: ListenerId) -> bool {
        let mut events = self.events.borrow_mut();
        let Some(set) = events.get_mut(&kind) else {
            return false;
        };
        let removed = set.remove(&listener);
        if set.is_empty() {
            events.remove(&kind);
        }
        removed
    }

    /// Drops the listener set for `kind`. Returns `false` if the shape had no
    /// set for that kind.
    pub(crate) fn clear_listeners(&self, kind: EventKind) -> bool {
        self.events.borrow_mut().remove(&kind).is_some()
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("id", &self.id)
            .field("z_index", &self.z_index.get())
            .field("layer", &self.layer.get())
            .field("render_mode", &self.render_mode.get())
            .field("line_width", &self.line_width.get())
            .finish_non_exhaustive()
    }
}
