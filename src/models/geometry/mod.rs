// Geometry module
// Plain pixel-space value types produced by the layout engine

use serde::Serialize;

/// Axis-aligned rectangle in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EventRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl EventRect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn horizontal(&self) -> PixelSpan {
        PixelSpan::new(self.x, self.right())
    }

    pub fn vertical(&self) -> PixelSpan {
        PixelSpan::new(self.y, self.bottom())
    }
}

/// One-dimensional pixel interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PixelSpan {
    pub start: f32,
    pub end: f32,
}

impl PixelSpan {
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end: end.max(start) }
    }

    /// Span starting at `offset` and extending `length` pixels.
    pub fn from_offset(offset: f32, length: f32) -> Self {
        Self::new(offset, offset + length.max(0.0))
    }

    pub fn len(&self) -> f32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// True when the two spans share a region of positive length.
    pub fn intersects(&self, other: &PixelSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_touching_edges_do_not_intersect() {
        let a = PixelSpan::new(0.0, 100.0);
        assert!(!a.intersects(&PixelSpan::new(100.0, 150.0)));
        assert!(a.intersects(&PixelSpan::new(99.5, 150.0)));
    }

    #[test]
    fn test_negative_length_collapses() {
        let span = PixelSpan::new(10.0, 5.0);
        assert!(span.is_empty());
        assert_eq!(PixelSpan::from_offset(4.0, -2.0).len(), 0.0);
    }

    #[test]
    fn test_rect_translation() {
        let rect = EventRect { x: 1.0, y: 2.0, width: 10.0, height: 20.0 }.translated(5.0, 5.0);
        assert_eq!(rect.right(), 16.0);
        assert_eq!(rect.bottom(), 27.0);
    }
}
