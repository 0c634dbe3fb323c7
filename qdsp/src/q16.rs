use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};


/// Signed Q15.16 fixed-point scalar.
///
/// The value is `raw / 2^16`, giving a range of `[-32768, 32768)` with a
/// resolution of about `1.5e-5`.
///
/// Arithmetic follows the two's complement integer it is built on:
///
/// * Addition, subtraction and negation wrap on overflow.
/// * Multiplication rounds half up to the nearest LSB, then wraps.
/// * Conversion from floating point rounds to nearest (half away from zero)
///   and saturates at the range limits. NaN converts to zero.
///
/// Angles are plain radians in this representation. [`Q16::TWO_PI`] is
/// exactly twice [`Q16::PI`] in raw units so that wrapping a phase by one
/// turn is exact.
#[derive(
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Q16(i32);

/// Round to nearest, ties away from zero. `core` has no `f64::round`.
#[inline]
fn round(x: f64) -> f64 {
    if x < 0. {
        x - 0.5
    } else {
        x + 0.5
    }
}

impl Q16 {
    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = 16;
    const SCALE: f64 = (1i64 << Self::FRAC_BITS) as f64;

    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1 << Self::FRAC_BITS);
    pub const MIN: Self = Self(i32::MIN);
    pub const MAX: Self = Self(i32::MAX);
    /// Least significant bit.
    pub const EPSILON: Self = Self(1);

    /// `round(pi * 2^16)`
    pub const PI: Self = Self(205_887);
    /// `round(pi / 2 * 2^16)`
    pub const HALF_PI: Self = Self(102_944);
    pub const TWO_PI: Self = Self(2 * Self::PI.0);

    /// Construct from the raw two's complement representation.
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw two's complement representation.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub fn from_f64(x: f64) -> Self {
        // `as` saturates and maps NaN to zero.
        Self(round(x * Self::SCALE) as i32)
    }

    #[inline]
    pub fn from_f32(x: f32) -> Self {
        Self::from_f64(x as f64)
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE
    }

    #[inline]
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Absolute value, wrapping at `Q16::MIN`.
    #[inline]
    pub fn abs(self) -> Self {
        Self(self.0.wrapping_abs())
    }

    /// Cosine and sine of an angle in radians.
    ///
    /// The angle is mapped onto a full `i32` turn and evaluated with the
    /// interpolated octant table of [`idsp::cossin`]. Any angle is accepted,
    /// the result is periodic in `2 pi`.
    ///
    /// # Returns
    /// `(sin, cos)`
    pub fn sin_cos(self) -> (Self, Self) {
        // Full scale of the `cossin()` output.
        const AMPLITUDE: i64 = (1 << 31) - (1 << 15);
        let turns = (((self.0 as i64) << 32) + (Self::PI.0 as i64))
            .div_euclid(Self::TWO_PI.0 as i64);
        let (cos, sin) = idsp::cossin(turns as i32);
        let scale = |x: i32| {
            Self((((x as i64) << Self::FRAC_BITS) + AMPLITUDE / 2)
                .div_euclid(AMPLITUDE) as i32)
        };
        (scale(sin), scale(cos))
    }

    #[inline]
    pub fn sin(self) -> Self {
        self.sin_cos().0
    }

    #[inline]
    pub fn cos(self) -> Self {
        self.sin_cos().1
    }
}

impl Add for Q16 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Q16 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl Neg for Q16 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }
}

impl Mul for Q16 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // Rounding bias, half up
        let p = (self.0 as i64 * rhs.0 as i64) + (1 << (Self::FRAC_BITS - 1));
        Self((p >> Self::FRAC_BITS) as i32)
    }
}

impl AddAssign for Q16 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Q16 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Q16 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl From<i16> for Q16 {
    /// Integer value, always exact.
    fn from(x: i16) -> Self {
        Self((x as i32) << Self::FRAC_BITS)
    }
}

impl From<Q16> for f64 {
    fn from(x: Q16) -> f64 {
        x.to_f64()
    }
}

impl From<Q16> for f32 {
    fn from(x: Q16) -> f32 {
        x.to_f32()
    }
}

impl fmt::Display for Q16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}
