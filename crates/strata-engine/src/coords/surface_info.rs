use kurbo::{Point, Rect, Size};

/// Cached geometry of the drawing surface.
///
/// `width`/`height` are the surface dimensions in logical pixels. `left`/`top`
/// locate the surface in the global pointer coordinate frame and are refreshed
/// before every hit test, so scrolling or moving the surface between
/// registration and dispatch is accounted for.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SurfaceInfo {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

impl SurfaceInfo {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height, left: 0.0, top: 0.0 }
    }

    #[inline]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Surface-local rectangle covering the whole surface.
    #[inline]
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    #[inline]
    pub fn offset(self) -> Point {
        Point::new(self.left, self.top)
    }

    #[inline]
    pub fn refresh_offset(&mut self, offset: Point) {
        self.left = offset.x;
        self.top = offset.y;
    }

    /// Converts an absolute pointer position into surface-local coordinates.
    #[inline]
    pub fn to_local(self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_local_subtracts_offset() {
        let mut info = SurfaceInfo::new(500.0, 500.0);
        info.refresh_offset(Point::new(8.0, 120.0));
        assert_eq!(info.to_local(Point::new(38.0, 150.0)), Point::new(30.0, 30.0));
    }

    #[test]
    fn bounds_are_surface_local() {
        let mut info = SurfaceInfo::new(300.0, 200.0);
        info.refresh_offset(Point::new(50.0, 50.0));
        assert_eq!(info.bounds(), Rect::new(0.0, 0.0, 300.0, 200.0));
    }

    #[test]
    fn zero_or_nan_size_is_invalid() {
        assert!(!SurfaceInfo::new(0.0, 10.0).is_valid());
        assert!(!SurfaceInfo::new(10.0, f64::NAN).is_valid());
        assert!(SurfaceInfo::new(1.0, 1.0).is_valid());
    }
}
