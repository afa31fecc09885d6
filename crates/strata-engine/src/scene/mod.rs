//! Scene objects and paint ordering.
//!
//! Responsibilities:
//! - shape identity, declared z-index and resolved layer
//! - deterministic ordering keys (z-index + insertion order)
//! - paint hooks invoked by the render scheduler

mod key;
mod painter;
mod shape;
mod z_index;

pub use key::SortKey;
pub use painter::{PaintCtx, PathPainter, RenderOptions, ShapePainter};
pub use shape::{RenderMode, Shape, ShapeId, ShapeRef};
pub use z_index::{LayerCounter, LayerIndex, ZIndex};
