//! Physical measurement helpers. Layout is specified in millimetres and emitted in PDF points.

use serde::{Deserialize, Serialize};

/// Points per millimetre used for every conversion in the engine.
pub const PT_PER_MM: f32 = 2.83465;

/// Converts millimetres to output points.
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

/// A point in output space (origin bottom-left, y grows upwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned rectangle in output space. `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// True when the two rectangles share interior area. Touching edges do not count.
    #[cfg(test)]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }
}

/// Device RGB colour, components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn grey(level: f32) -> Self {
        Self::new(level, level, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_pt_a4_width() {
        // 210mm ≈ 595.28pt
        assert!((mm_to_pt(210.0) - 595.2765).abs() < 1e-2);
    }

    #[test]
    fn test_rect_touching_edges_do_not_overlap() {
        let a = Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 };
        let b = Rect { x: 10.0, y: 0.0, width: 10.0, height: 10.0 };
        assert!(!a.overlaps(&b));
        let c = Rect { x: 5.0, y: 5.0, width: 10.0, height: 10.0 };
        assert!(a.overlaps(&c));
    }
}
