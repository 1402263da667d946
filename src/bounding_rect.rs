//! Bounding rectangle calculation.
//!
//! Computes the axis-aligned bounds the rasterizer sizes its edge table
//! from, for callers that do not already track them.

use crate::basics::{Bounds, PointD};

/// Compute the bounding rectangle of a point sequence.
///
/// Returns `None` if the sequence is empty or contains a NaN coordinate.
pub fn bounding_rect<I>(points: I) -> Option<Bounds>
where
    I: IntoIterator<Item = PointD>,
{
    let mut first = true;
    let mut x1 = 1.0_f64;
    let mut y1 = 1.0_f64;
    let mut x2 = 0.0_f64;
    let mut y2 = 0.0_f64;

    for p in points {
        if p.x.is_nan() || p.y.is_nan() {
            return None;
        }
        if first {
            x1 = p.x;
            y1 = p.y;
            x2 = p.x;
            y2 = p.y;
            first = false;
        } else {
            if p.x < x1 {
                x1 = p.x;
            }
            if p.y < y1 {
                y1 = p.y;
            }
            if p.x > x2 {
                x2 = p.x;
            }
            if p.y > y2 {
                y2 = p.y;
            }
        }
    }

    if x1 <= x2 && y1 <= y2 {
        Some(Bounds::new(x1, y1, x2 - x1, y2 - y1))
    } else {
        None
    }
}

// ============================================================================
// Tests
// ============================================================================
