//! Point containment under a shape's render mode.

use kurbo::{BezPath, ParamCurveNearest, Point, Shape as _};

use crate::scene::{RenderMode, Shape};

/// Accuracy passed to kurbo's nearest-point search for curved segments.
const NEAREST_ACCURACY: f64 = 1e-3;

/// Distance from the outline within which a point counts as on the path.
const EDGE_TOLERANCE: f64 = 1e-6;

/// Returns `true` if the surface-local point `(x, y)` hits `shape`.
///
/// `Fill` tests the interior using the nonzero winding rule; points on the
/// outline itself are inside on every edge. `Stroke` tests whether the point
/// lies within half the line width of the outline.
pub fn contains(shape: &Shape, x: f64, y: f64) -> bool {
    let point = Point::new(x, y);
    let path = shape.path();
    match shape.render_mode() {
        RenderMode::Fill => fill_contains(&path, point),
        RenderMode::Stroke => stroke_contains(&path, shape.line_width(), point),
    }
}

fn fill_contains(path: &BezPath, point: Point) -> bool {
    // Winding alone puts right and bottom edges outside.
    near_outline(path, point, EDGE_TOLERANCE) || path.winding(point) != 0
}

fn stroke_contains(path: &BezPath, line_width: f64, point: Point) -> bool {
    near_outline(path, point, line_width.max(0.0) / 2.0)
}

fn near_outline(path: &BezPath, point: Point, distance: f64) -> bool {
    let limit = distance * distance;
    path.segments()
        .any(|seg| seg.nearest(point, NEAREST_ACCURACY).distance_sq <= limit)
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;

    fn square() -> Shape {
        Shape::rect(Rect::new(0.0, 0.0, 50.0, 50.0))
    }

    #[test]
    fn fill_hits_interior_only() {
        let shape = square();
        assert!(contains(&shape, 25.0, 25.0));
        assert!(!contains(&shape, 60.0, 25.0));
        assert!(!contains(&shape, -1.0, -1.0));
    }

    #[test]
    fn fill_includes_every_edge_and_corner() {
        let shape = square();
        let outline = [
            (0.0, 0.0),
            (50.0, 0.0),
            (50.0, 50.0),
            (0.0, 50.0),
            (25.0, 0.0),
            (50.0, 25.0),
            (25.0, 50.0),
            (0.0, 25.0),
        ];
        for (x, y) in outline {
            assert!(contains(&shape, x, y), "({x}, {y}) should hit");
        }
        assert!(!contains(&shape, 50.01, 25.0));
        assert!(!contains(&shape, 25.0, 50.01));
    }

    #[test]
    fn stroke_ignores_interior() {
        let shape = square().with_render_mode(RenderMode::Stroke).with_line_width(4.0);
        assert!(!contains(&shape, 25.0, 25.0));
        assert!(contains(&shape, 1.0, 25.0));
        assert!(contains(&shape, 51.5, 25.0));
        assert!(!contains(&shape, 53.0, 25.0));
    }

    #[test]
    fn stroke_covers_closing_edge() {
        // The left edge only exists through the implicit close.
        let shape = square().with_render_mode(RenderMode::Stroke).with_line_width(2.0);
        assert!(contains(&shape, 0.5, 40.0));
    }

    #[test]
    fn circle_fill_respects_curvature() {
        let shape = Shape::circle(Point::new(50.0, 50.0), 10.0);
        assert!(contains(&shape, 55.0, 55.0));
        // Inside the bounding box but outside the circle.
        assert!(!contains(&shape, 41.0, 41.0));
    }

    #[test]
    fn render_mode_switch_changes_result() {
        let shape = square();
        assert!(contains(&shape, 25.0, 25.0));
        shape.set_render_mode(RenderMode::Stroke);
        assert!(!contains(&shape, 25.0, 25.0));
    }
}
