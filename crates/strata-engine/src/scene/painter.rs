use crate::coords::{Color, SurfaceInfo};
use crate::surface::Surface;

use super::{LayerIndex, RenderMode, Shape};

/// Per-entry options supplied with [`Engine::render`](crate::engine::Engine::render).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RenderOptions {
    /// Paint color. Painters fall back to black.
    pub color: Option<Color>,
    /// Overrides the shape's render mode for this entry.
    pub mode: Option<RenderMode>,
}

impl RenderOptions {
    pub fn fill(color: Color) -> Self {
        Self { color: Some(color), mode: Some(RenderMode::Fill) }
    }

    pub fn stroke(color: Color) -> Self {
        Self { color: Some(color), mode: Some(RenderMode::Stroke) }
    }
}

/// What a painter gets to work with during a pass.
pub struct PaintCtx<'a> {
    pub surface: &'a mut dyn Surface,
    pub info: &'a SurfaceInfo,
    /// Layer just assigned to the shape being painted.
    pub layer: LayerIndex,
}

/// Paint hooks invoked for each queue entry during a pass.
///
/// `before_render` runs first and may adjust shape state (render mode, path)
/// that hit testing depends on; `render` issues the draw calls.
pub trait ShapePainter {
    fn before_render(&mut self, _shape: &Shape, _ctx: &mut PaintCtx<'_>, _options: &RenderOptions) {}

    fn render(&mut self, shape: &Shape, ctx: &mut PaintCtx<'_>, options: &RenderOptions);
}

/// Default painter: fills or strokes the shape's own path.
#[derive(Debug, Copy, Clone, Default)]
pub struct PathPainter;

impl ShapePainter for PathPainter {
    fn before_render(&mut self, shape: &Shape, _ctx: &mut PaintCtx<'_>, options: &RenderOptions) {
        // Hit testing must follow how the shape was actually drawn.
        if let Some(mode) = options.mode {
            shape.set_render_mode(mode);
        }
    }

    fn render(&mut self, shape: &Shape, ctx: &mut PaintCtx<'_>, options: &RenderOptions) {
        let color = options.color.unwrap_or(Color::black());
        let path = shape.path();
        match shape.render_mode() {
            RenderMode::Fill => ctx.surface.fill_path(&path, color),
            RenderMode::Stroke => ctx.surface.stroke_path(&path, shape.line_width(), color),
        }
    }
}
