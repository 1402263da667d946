//! Foundation types shared by the whole crate.
//!
//! Points and bounds arrive from upstream geometry code as `f64`; they are
//! converted to [`Fixed`](crate::fixed::Fixed) only when edges are built.

use crate::fixed::Fixed;

// ============================================================================
// Filling rule
// ============================================================================

/// Raw selector value for [`FillingRule::EvenOdd`].
pub const RULE_EVEN_ODD: u32 = 0;
/// Raw selector value for [`FillingRule::NonZero`].
pub const RULE_NON_ZERO: u32 = 1;

/// Filling rule for polygon rasterization.
///
/// `Unknown` carries a selector value that matched neither rule. It is
/// accepted everywhere a rule is, and nothing is ever inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillingRule {
    #[default]
    NonZero,
    EvenOdd,
    Unknown(u32),
}

impl FillingRule {
    /// Map a raw selector onto a rule.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            RULE_EVEN_ODD => FillingRule::EvenOdd,
            RULE_NON_ZERO => FillingRule::NonZero,
            other => FillingRule::Unknown(other),
        }
    }

    /// Whether a point with the given accumulated winding number is inside.
    #[inline]
    pub fn is_inside(self, winding: i32) -> bool {
        match self {
            FillingRule::EvenOdd => winding & 1 != 0,
            FillingRule::NonZero => winding != 0,
            FillingRule::Unknown(_) => false,
        }
    }
}

// ============================================================================
// Point
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointBase<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> PointBase<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

pub type PointD = PointBase<f64>;
pub type PointX = PointBase<Fixed>;

impl PointD {
    /// Convert both coordinates to fixed point.
    #[inline]
    pub fn to_fixed(self) -> PointX {
        PointX::new(Fixed::from_f64(self.x), Fixed::from_f64(self.y))
    }

    /// Whether both coordinates convert to fixed point without saturating.
    #[inline]
    pub fn fits_fixed(self) -> bool {
        Fixed::checked_from_f64(self.x).is_some() && Fixed::checked_from_f64(self.y).is_some()
    }
}

// ============================================================================
// Bounds
// ============================================================================

/// Axis-aligned bounding rectangle given as origin plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Build from two corner points, in any order.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (y1, y2) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        Self::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Zero or negative (in fixed point) width or height: nothing can be
    /// filled.
    #[inline]
    pub fn is_empty(&self) -> bool {
        Fixed::from_f64(self.w) <= Fixed::ZERO || Fixed::from_f64(self.h) <= Fixed::ZERO
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

// ============================================================================
// Tests
// ============================================================================
