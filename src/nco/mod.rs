//! Fixed-point numerically-controlled oscillator
//!
//! # Design
//! An [Oscillator] accumulates a [Q16] phase in radians, advancing it by its
//! frequency (the phase increment per sample) on every [Oscillator::step].
//! The phase is wrapped into `(-pi, pi]` after every change. Frequency is
//! never wrapped implicitly, see [Oscillator::constrain_frequency].
//!
//! Sine and cosine of the phase come from either a 256 entry table
//! ([Mode::Nco]) or the interpolated fixed-point trigonometric primitive
//! ([Mode::Vco]).
//!
//! The oscillator carries a second order PLL loop filter (see [pll]) that
//! turns phase errors into frequency corrections, and complex mixers
//! (see [mixer]) for frequency up- and down-conversion.
use num_enum::{IntoPrimitive, TryFromPrimitive};
use qdsp::{Biquad, Complex, Q16};
use serde::{Deserialize, Serialize};

use crate::Error;

pub mod mixer;
pub mod pll;
mod table;
pub use table::{SineTable, TABLE_SIZE};

/// Strategy for computing sine and cosine.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    IntoPrimitive,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[repr(u8)]
pub enum Mode {
    /// Table lookup, nearest of 256 entries per period.
    Nco = 0,
    /// Direct fixed-point trigonometric evaluation.
    Vco = 1,
}

/// Wrap into `(-pi, pi]` by at most one turn.
///
/// This is not a general modulo: the input must be within `(-3 pi, 3 pi]`.
#[inline]
fn constrain(x: Q16) -> Q16 {
    if x > Q16::PI {
        x - Q16::TWO_PI
    } else if x <= -Q16::PI {
        x + Q16::TWO_PI
    } else {
        x
    }
}

/// Numerically-controlled oscillator with PLL and mixers.
///
/// An oscillator is a plain mutable value. It is `Send` but concurrent use
/// needs external synchronization; prefer one oscillator per thread.
#[derive(Clone, Debug)]
pub struct Oscillator {
    mode: Mode,
    // phase, (-pi, pi]
    phase: Q16,
    // phase increment per step
    frequency: Q16,
    table: SineTable,
    // last sin_cos() result
    sine: Q16,
    cosine: Q16,
    // PLL
    bandwidth: Q16,
    loop_filter: Biquad,
}

impl Oscillator {
    /// Create an oscillator at zero phase and frequency with the default
    /// loop bandwidth ([pll::DEFAULT_BANDWIDTH]).
    pub fn new(mode: Mode) -> Self {
        let mut osc = Self {
            mode,
            phase: Q16::ZERO,
            frequency: Q16::ZERO,
            table: SineTable::new(),
            sine: Q16::ZERO,
            cosine: Q16::ONE,
            bandwidth: Q16::ZERO,
            // Silent (b = 0, a0 = 1) until the default design below.
            loop_filter: Biquad::default(),
        };
        osc.reset();
        osc.pll_set_bandwidth(Q16::from_f64(pll::DEFAULT_BANDWIDTH))
            .expect("default loop bandwidth is representable");
        osc
    }

    /// Create an oscillator from a raw mode tag (see [Mode]).
    pub fn from_tag(tag: u8) -> Result<Self, Error> {
        let mode =
            Mode::try_from(tag).map_err(|e| Error::UnknownMode(e.number))?;
        Ok(Self::new(mode))
    }

    /// Zero phase and frequency and clear the loop filter state.
    ///
    /// The loop bandwidth is retained.
    pub fn reset(&mut self) {
        self.phase = Q16::ZERO;
        self.frequency = Q16::ZERO;
        self.sine = Q16::ZERO;
        self.cosine = Q16::ONE;
        self.pll_reset();
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current phase in radians, within `(-pi, pi]`.
    pub fn phase(&self) -> Q16 {
        self.phase
    }

    /// Current phase increment per step in radians.
    pub fn frequency(&self) -> Q16 {
        self.frequency
    }

    /// Set the frequency. No wrapping is applied.
    pub fn set_frequency(&mut self, frequency: Q16) {
        self.frequency = frequency;
    }

    /// Add to the frequency. No wrapping is applied.
    pub fn adjust_frequency(&mut self, delta: Q16) {
        self.frequency += delta;
    }

    /// Set the phase and wrap it into `(-pi, pi]`.
    ///
    /// # Args
    /// * `phase`: New phase in radians, within `(-3 pi, 3 pi]`.
    pub fn set_phase(&mut self, phase: Q16) {
        self.phase = constrain(phase);
    }

    /// Add to the phase and wrap it into `(-pi, pi]`.
    ///
    /// # Args
    /// * `delta`: Phase change, `|delta| < 2 pi`.
    pub fn adjust_phase(&mut self, delta: Q16) {
        self.phase = constrain(self.phase + delta);
    }

    /// Advance the phase by one frequency increment.
    ///
    /// The frequency must be within `(-2 pi, 2 pi)` for the phase to stay
    /// wrapped.
    pub fn step(&mut self) {
        self.phase = constrain(self.phase + self.frequency);
    }

    /// Wrap the frequency into `(-pi, pi]` by at most one turn.
    ///
    /// This is never done implicitly, not even by [Oscillator::pll_step].
    pub fn constrain_frequency(&mut self) {
        self.frequency = constrain(self.frequency);
    }

    /// Compute sine and cosine of the current phase.
    ///
    /// # Returns
    /// `(sin, cos)`
    pub fn sin_cos(&mut self) -> (Q16, Q16) {
        (self.sine, self.cosine) = match self.mode {
            Mode::Nco => {
                let index = SineTable::index(self.phase);
                (self.table.sin(index), self.table.cos(index))
            }
            Mode::Vco => self.phase.sin_cos(),
        };
        (self.sine, self.cosine)
    }

    /// Sine of the current phase.
    pub fn sin(&mut self) -> Q16 {
        self.sin_cos().0
    }

    /// Cosine of the current phase.
    pub fn cos(&mut self) -> Q16 {
        self.sin_cos().1
    }

    /// Complex exponential of the current phase, `cos + j sin`.
    pub fn cexp(&mut self) -> Complex<Q16> {
        let (sin, cos) = self.sin_cos();
        Complex(cos, sin)
    }
}
