use serde::{Deserialize, Serialize};

use super::Q16;

/// Biquad coefficient or state vector.
///
/// As coefficients this holds the feed-forward coefficients (b0, b1, b2)
/// followed by the negated feed-back coefficients (-a1, -a2), all normalized
/// such that a0 = 1.
///
/// As state it holds (x0, x1, y0, y1, y2) between updates, lower indices
/// being more recent. During an update it is shifted to (x0, x1, x2, y1, y2)
/// to line up with the coefficients.
pub type Vec5 = [i32; 5];

/// Errors when configuring a [`Biquad`].
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// The leading feed-back coefficient is zero or not finite.
    #[error("Leading feed-back coefficient a0 must be finite and non-zero")]
    Normalization,
    /// A normalized coefficient is not representable.
    #[error("Normalized coefficient out of range")]
    CoefficientRange,
}

/// Multiply-accumulate with a rounding bias (half up).
fn macc(x: &[i32], a: &[i32], shift: u32) -> i32 {
    let y0 = 1i64 << (shift - 1);
    let y = x
        .iter()
        .zip(a)
        .map(|(x, a)| *x as i64 * *a as i64)
        .fold(y0, |y, xa| y.wrapping_add(xa));
    (y >> shift) as i32
}

/// Fixed-point second order IIR section, direct form I.
///
/// Samples are [`Q16`], coefficients are signed Q8.24 (range `[-128, 128)`).
/// The filter computes
///
/// `a0 y0 = b0 x0 + b1 x1 + b2 x2 - a1 y1 - a2 y2`
///
/// from the raw (unfiltered) delayed inputs and outputs. Coefficients are
/// normalized by `a0` when installed.
///
/// The default filter has all-zero feed-forward coefficients and `a0 = 1`,
/// i.e. its output is zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Biquad {
    ba: Vec5,
    xy: Vec5,
}

impl Biquad {
    /// Coefficient fixed point format: signed Q8.24.
    pub const SHIFT: u32 = 24;
    const SCALE: f64 = (1i64 << Self::SHIFT) as f64;
    const LIMIT: f64 = 128. * Self::SCALE;

    /// Create a filter from un-normalized coefficients with cleared state.
    ///
    /// # Arguments
    /// * `b` - Feed-forward coefficients `[b0, b1, b2]`
    /// * `a` - Feed-back coefficients `[a0, a1, a2]`
    pub fn new(b: &[f64; 3], a: &[f64; 3]) -> Result<Self, Error> {
        let mut biquad = Self::default();
        biquad.set_coefficients(b, a)?;
        Ok(biquad)
    }

    /// Install new coefficients, keeping the filter state.
    ///
    /// On error the previous coefficients remain in place.
    pub fn set_coefficients(
        &mut self,
        b: &[f64; 3],
        a: &[f64; 3],
    ) -> Result<(), Error> {
        let a0 = a[0];
        if !a0.is_finite() || a0 == 0. {
            return Err(Error::Normalization);
        }
        let normalized = [b[0], b[1], b[2], -a[1], -a[2]].map(|c| c / a0);
        let mut ba = Vec5::default();
        for (q, c) in ba.iter_mut().zip(normalized) {
            let c = c * Self::SCALE;
            // Also rejects NaN
            if !(-Self::LIMIT..Self::LIMIT).contains(&c) {
                return Err(Error::CoefficientRange);
            }
            *q = (if c < 0. { c - 0.5 } else { c + 0.5 }) as i32;
        }
        self.ba = ba;
        Ok(())
    }

    /// The installed coefficients, normalized and quantized.
    ///
    /// # Returns
    /// `([b0, b1, b2], [1, a1, a2])`
    pub fn coefficients(&self) -> ([f64; 3], [f64; 3]) {
        let c = self.ba.map(|c| c as f64 / Self::SCALE);
        ([c[0], c[1], c[2]], [1., -c[3], -c[4]])
    }

    /// Feed a new input into the filter, update the state and return the
    /// new output.
    pub fn execute(&mut self, x0: Q16) -> Q16 {
        let xy = &mut self.xy;
        let n = xy.len();
        // `xy` contains       x0 x1 y0 y1 y2
        // Increment time      x1 x2 y1 y2 y3
        // Shift               x1 x1 x2 y1 y2
        xy.copy_within(0..n - 1, 1);
        // Store x0            x0 x1 x2 y1 y2
        xy[0] = x0.raw();
        let y0 = macc(xy, &self.ba, Self::SHIFT);
        // Store y0            x0 x1 y0 y1 y2
        xy[n / 2] = y0;
        Q16::from_raw(y0)
    }

    /// Clear the delay line, keeping the coefficients.
    pub fn clear(&mut self) {
        self.xy = Vec5::default();
    }
}
