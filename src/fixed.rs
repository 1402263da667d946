//! 16.16 fixed-point numbers.
//!
//! Every coordinate the rasterizer touches is a `Fixed`: a signed 32-bit
//! integer carrying 16 fractional bits. Multiplication and division widen
//! to `i64` internally, so only the final result has to fit.
//!
//! Rounding rules:
//! - `floor` rounds toward negative infinity (arithmetic shift).
//! - `ceil` rounds toward positive infinity.
//! - `round` rounds half up (`floor(v + 0.5)`).
//! - `mul` truncates toward negative infinity.
//! - `div` truncates toward zero and saturates at the `i32` range.
//! - The arithmetic operators saturate.

use core::fmt;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

// ============================================================================
// Constants
// ============================================================================

/// Number of fractional bits.
pub const FIXED_SHIFT: u32 = 16;
pub const FIXED_SCALE: i32 = 1 << FIXED_SHIFT;
pub const FIXED_MASK: i32 = FIXED_SCALE - 1;

// ============================================================================
// Fixed
// ============================================================================

/// A signed 16.16 fixed-point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed(i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(FIXED_SCALE);
    pub const HALF: Fixed = Fixed(FIXED_SCALE >> 1);
    /// Values at or below this magnitude count as zero for slope and
    /// height tests (1/4096).
    pub const NEAR0: Fixed = Fixed(1 << 4);
    pub const MAX: Fixed = Fixed(i32::MAX);
    pub const MIN: Fixed = Fixed(i32::MIN);

    /// Wrap a raw 16.16 bit pattern.
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Fixed(raw)
    }

    /// The raw 16.16 bit pattern.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Convert an integer. Values outside `i16` range saturate.
    #[inline]
    pub fn from_int(v: i32) -> Self {
        Fixed(saturate(i64::from(v) << FIXED_SHIFT))
    }

    /// Convert a float, rounding to the nearest representable value
    /// (half away from zero). Out-of-range and NaN inputs saturate the
    /// same way an `as` cast does.
    #[inline]
    pub fn from_f64(v: f64) -> Self {
        Fixed((v * FIXED_SCALE as f64).round() as i32)
    }

    /// Convert a float, or `None` when `from_f64` would saturate or the
    /// input is NaN.
    #[inline]
    pub fn checked_from_f64(v: f64) -> Option<Self> {
        let r = (v * FIXED_SCALE as f64).round();
        if (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&r) {
            Some(Fixed(r as i32))
        } else {
            None
        }
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / FIXED_SCALE as f64
    }

    /// Largest integer `<= self`.
    #[inline]
    pub fn floor(self) -> i32 {
        self.0 >> FIXED_SHIFT
    }

    /// Smallest integer `>= self`.
    #[inline]
    pub fn ceil(self) -> i32 {
        ((i64::from(self.0) + i64::from(FIXED_MASK)) >> FIXED_SHIFT) as i32
    }

    /// Nearest integer, halves rounding up.
    #[inline]
    pub fn round(self) -> i32 {
        ((i64::from(self.0) + i64::from(Self::HALF.0)) >> FIXED_SHIFT) as i32
    }

    /// Fractional part, always in `[0, 1)`.
    #[inline]
    pub fn fract(self) -> Fixed {
        Fixed(self.0 & FIXED_MASK)
    }

    #[inline]
    pub fn abs(self) -> Fixed {
        Fixed(self.0.saturating_abs())
    }

    /// Fixed-point product.
    #[inline]
    pub fn mul(self, rhs: Fixed) -> Fixed {
        Fixed(saturate((i64::from(self.0) * i64::from(rhs.0)) >> FIXED_SHIFT))
    }

    /// Fixed-point quotient. Division by zero saturates toward the sign
    /// of the dividend.
    #[inline]
    pub fn div(self, rhs: Fixed) -> Fixed {
        if rhs.0 == 0 {
            return if self.0 < 0 { Fixed::MIN } else { Fixed::MAX };
        }
        Fixed(saturate((i64::from(self.0) << FIXED_SHIFT) / i64::from(rhs.0)))
    }

    /// Multiply by a plain integer.
    #[inline]
    pub fn mul_int(self, n: i32) -> Fixed {
        Fixed(self.0.saturating_mul(n))
    }
}

#[inline]
fn saturate(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl Add for Fixed {
    type Output = Fixed;
    #[inline]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    #[inline]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    #[inline]
    fn neg(self) -> Fixed {
        Fixed(self.0.saturating_neg())
    }
}

impl AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, rhs: Fixed) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl SubAssign for Fixed {
    #[inline]
    fn sub_assign(&mut self, rhs: Fixed) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(Fixed::ONE.raw(), 65536);
        assert_eq!(Fixed::HALF.raw(), 32768);
        assert_eq!(Fixed::NEAR0.raw(), 16);
        assert_eq!(FIXED_MASK, 0xFFFF);
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Fixed::from_f64(1.0), Fixed::ONE);
        assert_eq!(Fixed::from_f64(0.5), Fixed::HALF);
        assert_eq!(Fixed::from_f64(-2.25).raw(), -2 * 65536 - 16384);
        assert_eq!(Fixed::from_f64(1e12), Fixed::MAX);
        assert_eq!(Fixed::from_f64(f64::NAN), Fixed::ZERO);
    }

    #[test]
    fn test_checked_from_f64() {
        assert_eq!(Fixed::checked_from_f64(-2.5), Some(Fixed::from_f64(-2.5)));
        assert_eq!(Fixed::checked_from_f64(-32768.0), Some(Fixed::MIN));
        assert_eq!(Fixed::checked_from_f64(32768.0), None);
        assert_eq!(Fixed::checked_from_f64(-40000.0), None);
        assert_eq!(Fixed::checked_from_f64(f64::NAN), None);
    }

    #[test]
    fn test_from_int_saturates() {
        assert_eq!(Fixed::from_int(3).raw(), 3 << 16);
        assert_eq!(Fixed::from_int(-3).raw(), -3 << 16);
        assert_eq!(Fixed::from_int(1 << 20), Fixed::MAX);
    }

    #[test]
    fn test_floor() {
        assert_eq!(Fixed::from_f64(1.7).floor(), 1);
        assert_eq!(Fixed::from_f64(1.0).floor(), 1);
        assert_eq!(Fixed::from_f64(-1.7).floor(), -2);
        assert_eq!(Fixed::from_f64(-1.0).floor(), -1);
    }

    #[test]
    fn test_ceil() {
        assert_eq!(Fixed::from_f64(1.1).ceil(), 2);
        assert_eq!(Fixed::from_f64(1.0).ceil(), 1);
        assert_eq!(Fixed::from_f64(-1.1).ceil(), -1);
        assert_eq!(Fixed::ZERO.ceil(), 0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(Fixed::from_f64(0.5).round(), 1);
        assert_eq!(Fixed::from_f64(0.49).round(), 0);
        assert_eq!(Fixed::from_f64(-0.5).round(), 0);
        assert_eq!(Fixed::from_f64(-0.51).round(), -1);
        assert_eq!(Fixed::from_f64(2.5).round(), 3);
    }

    #[test]
    fn test_fract_is_positive() {
        assert_eq!(Fixed::from_f64(1.25).fract(), Fixed::from_f64(0.25));
        assert_eq!(Fixed::from_f64(-1.25).fract(), Fixed::from_f64(0.75));
    }

    #[test]
    fn test_mul() {
        let a = Fixed::from_f64(1.5);
        let b = Fixed::from_f64(-2.0);
        assert_eq!(a.mul(b), Fixed::from_f64(-3.0));
        assert_eq!(Fixed::HALF.mul(Fixed::HALF), Fixed::from_f64(0.25));
    }

    #[test]
    fn test_div() {
        let a = Fixed::from_f64(3.0);
        let b = Fixed::from_f64(2.0);
        assert_eq!(a.div(b), Fixed::from_f64(1.5));
        assert_eq!((-a).div(b), Fixed::from_f64(-1.5));
    }

    #[test]
    fn test_div_saturates() {
        let big = Fixed::from_int(30000);
        let tiny = Fixed::from_raw(1);
        assert_eq!(big.div(tiny), Fixed::MAX);
        assert_eq!((-big).div(tiny), Fixed::MIN);
        assert_eq!(big.div(Fixed::ZERO), Fixed::MAX);
    }

    #[test]
    fn test_abs() {
        assert_eq!(Fixed::from_f64(-4.5).abs(), Fixed::from_f64(4.5));
        assert_eq!(Fixed::MIN.abs(), Fixed::MAX);
    }

    #[test]
    fn test_mul_int() {
        assert_eq!(Fixed::from_f64(0.25).mul_int(8), Fixed::from_int(2));
    }

    #[test]
    fn test_ops() {
        let mut v = Fixed::ONE + Fixed::HALF;
        v -= Fixed::ONE;
        assert_eq!(v, Fixed::HALF);
        v += Fixed::HALF;
        assert_eq!(v - Fixed::ONE, Fixed::ZERO);
        assert_eq!(-Fixed::ONE, Fixed::from_int(-1));
    }

    #[test]
    fn test_ops_saturate() {
        assert_eq!(Fixed::MAX + Fixed::ONE, Fixed::MAX);
        assert_eq!(Fixed::MIN - Fixed::ONE, Fixed::MIN);
        assert_eq!(-Fixed::MIN, Fixed::MAX);
    }

    #[test]
    fn test_display() {
        assert_eq!(Fixed::from_f64(1.5).to_string(), "1.5");
    }
}
