//! Complex mixing by the oscillator angle
//!
//! None of the mixers advance the phase. Block mixing rotates every sample by
//! the same angle; call [Oscillator::step] between samples (or mix sample by
//! sample) to shift frequency.
use qdsp::{Complex, Q16};

use super::Oscillator;

impl Oscillator {
    /// Rotate a sample up by the current angle, `y = x exp(+j theta)`.
    pub fn mix_up(&mut self, x: Complex<Q16>) -> Complex<Q16> {
        x * self.cexp()
    }

    /// Rotate a sample down by the current angle, `y = x exp(-j theta)`.
    pub fn mix_down(&mut self, x: Complex<Q16>) -> Complex<Q16> {
        x * self.cexp().conj()
    }

    /// Rotate a block of samples up by the current angle.
    ///
    /// All samples are rotated by the same angle, the phase is not advanced.
    ///
    /// # Panics
    /// If `x` and `y` differ in length.
    pub fn mix_block_up(
        &mut self,
        x: &[Complex<Q16>],
        y: &mut [Complex<Q16>],
    ) {
        assert_eq!(x.len(), y.len());
        for (x, y) in x.iter().zip(y.iter_mut()) {
            *y = self.mix_up(*x);
        }
    }

    /// Rotate a block of samples down by the current angle.
    ///
    /// All samples are rotated by the same angle, the phase is not advanced.
    ///
    /// # Panics
    /// If `x` and `y` differ in length.
    pub fn mix_block_down(
        &mut self,
        x: &[Complex<Q16>],
        y: &mut [Complex<Q16>],
    ) {
        assert_eq!(x.len(), y.len());
        for (x, y) in x.iter().zip(y.iter_mut()) {
            *y = self.mix_down(*x);
        }
    }
}
