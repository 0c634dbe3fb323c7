use core::ops::{Add, Mul, Neg, Sub};
use serde::{Deserialize, Serialize};

use super::Q16;

/// Complex number as `(real, imaginary)`.
#[derive(
    Copy, Clone, Default, PartialEq, Eq, Debug, Deserialize, Serialize,
)]
pub struct Complex<T>(pub T, pub T);

impl<T: Copy> Complex<T> {
    #[inline]
    pub fn re(&self) -> T {
        self.0
    }

    #[inline]
    pub fn im(&self) -> T {
        self.1
    }
}

impl<T: Copy + Neg<Output = T>> Complex<T> {
    /// Complex conjugate
    #[inline]
    pub fn conj(self) -> Self {
        Self(self.0, -self.1)
    }
}

impl<T: Add<Output = T>> Add for Complex<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl<T: Sub<Output = T>> Sub for Complex<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl Complex<Q16> {
    pub fn from_f32(re: f32, im: f32) -> Self {
        Self(Q16::from_f32(re), Q16::from_f32(im))
    }

    pub fn to_f32(self) -> Complex<f32> {
        Complex(self.0.to_f32(), self.1.to_f32())
    }

    /// Squared magnitude
    pub fn norm_sqr(&self) -> Q16 {
        self.0 * self.0 + self.1 * self.1
    }
}

impl Mul for Complex<Q16> {
    type Output = Self;

    /// Complex product. Each component is accumulated at full precision,
    /// rounded half up once and wrapped like `Q16`.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        const BIAS: i64 = 1 << (Q16::FRAC_BITS - 1);
        let (a, b) = (self.0.raw() as i64, self.1.raw() as i64);
        let (c, d) = (rhs.0.raw() as i64, rhs.1.raw() as i64);
        let re = (a * c).wrapping_sub(b * d).wrapping_add(BIAS);
        let im = (a * d).wrapping_add(b * c).wrapping_add(BIAS);
        let (re, im) = (re >> Q16::FRAC_BITS, im >> Q16::FRAC_BITS);
        Self(Q16::from_raw(re as i32), Q16::from_raw(im as i32))
    }
}
