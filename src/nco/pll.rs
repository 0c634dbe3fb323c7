//! Phase-locked loop
//!
//! Second order loop filter design (active lag, bilinear mapping onto a
//! direct form I biquad) driving the oscillator frequency from a phase error.
//!
//! With forward gain `K`, damping `zeta` and natural frequency `wn` (the loop
//! bandwidth in radians per sample):
//!
//! * `t1 = K / wn^2`
//! * `t2 = 2 zeta / wn - 1 / K`
//! * `b = [2 K (1 + t2 / 2), 4 K, 2 K (1 - t2 / 2)]`
//! * `a = [1 + t1 / 2, -1 + t1 / 2, 0]`
use core::f64::consts::FRAC_1_SQRT_2;
use qdsp::Q16;

use super::Oscillator;
use crate::Error;

/// Loop bandwidth of a new oscillator in radians per sample.
pub const DEFAULT_BANDWIDTH: f64 = 0.1;
/// Forward loop gain `K`.
pub const DEFAULT_GAIN: f64 = 1000.;
/// Damping factor `zeta`, critical.
pub const DAMPING: f64 = FRAC_1_SQRT_2;

/// Loop filter coefficients for a bandwidth.
///
/// A zero bandwidth opens the loop: all feed-forward coefficients vanish in
/// that limit.
///
/// # Args
/// * `bandwidth`: Natural frequency `wn`, non-negative.
///
/// # Returns
/// Feed-forward `b` and feed-back `a` coefficients, not normalized.
pub fn design(bandwidth: f64) -> ([f64; 3], [f64; 3]) {
    if bandwidth == 0. {
        return ([0.; 3], [1., 0., 0.]);
    }
    let k = DEFAULT_GAIN;
    let wn = bandwidth;
    let t1 = k / (wn * wn);
    let t2 = 2. * DAMPING / wn - 1. / k;
    (
        [2. * k * (1. + t2 / 2.), 2. * k * 2., 2. * k * (1. - t2 / 2.)],
        [1. + t1 / 2., -1. + t1 / 2., 0.],
    )
}

impl Oscillator {
    /// Current PLL loop bandwidth.
    pub fn bandwidth(&self) -> Q16 {
        self.bandwidth
    }

    /// Set the PLL loop bandwidth and redesign the loop filter.
    ///
    /// The filter state is kept. On error nothing changes.
    ///
    /// # Args
    /// * `bandwidth`: Loop natural frequency in radians per sample,
    ///   `0 <= bandwidth < 4 sqrt(K / (K - 32))` (about 4.0656 for the
    ///   default gain). Beyond that `b1 = 4 K / (1 + K / (2 wn^2))` reaches
    ///   the Q8.24 coefficient limit of 128 and
    ///   [Error::Filter] is returned.
    pub fn pll_set_bandwidth(
        &mut self,
        bandwidth: Q16,
    ) -> Result<(), Error> {
        if bandwidth.is_negative() {
            return Err(Error::NegativeBandwidth(bandwidth));
        }
        let (b, a) = design(bandwidth.to_f64());
        self.loop_filter.set_coefficients(&b, &a)?;
        self.bandwidth = bandwidth;
        log::debug!(
            "PLL bandwidth {bandwidth}: {:?}",
            self.loop_filter.coefficients()
        );
        Ok(())
    }

    /// Clear the loop filter state, keeping bandwidth and frequency.
    pub fn pll_reset(&mut self) {
        self.loop_filter.clear();
    }

    /// Advance the loop with a new phase error sample.
    ///
    /// The error is filtered and the result added to the frequency. The
    /// frequency is not wrapped.
    ///
    /// # Args
    /// * `error`: Phase error in radians, reference minus oscillator.
    ///
    /// # Returns
    /// The frequency correction applied.
    pub fn pll_step(&mut self, error: Q16) -> Q16 {
        let correction = self.loop_filter.execute(error);
        self.adjust_frequency(correction);
        log::trace!("PLL error {error} correction {correction}");
        correction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nco::Mode;

    #[test]
    fn negative_bandwidth() {
        let mut osc = Oscillator::new(Mode::Nco);
        let b = Q16::from_f64(-0.01);
        assert_eq!(
            osc.pll_set_bandwidth(b),
            Err(Error::NegativeBandwidth(b))
        );
        assert_eq!(osc.bandwidth(), Q16::from_f64(DEFAULT_BANDWIDTH));
    }

    #[test]
    fn unrepresentable_bandwidth() {
        let mut osc = Oscillator::new(Mode::Nco);
        assert_eq!(
            osc.pll_set_bandwidth(Q16::from(20)),
            Err(Error::Filter(qdsp::biquad::Error::CoefficientRange))
        );
        assert_eq!(osc.bandwidth(), Q16::from_f64(DEFAULT_BANDWIDTH));
    }

    #[test]
    fn bandwidth_limit() {
        let k = DEFAULT_GAIN;
        let limit = 4. * (k / (k - 32.)).sqrt();
        assert!((limit - 4.0656).abs() < 1e-4);
        let mut osc = Oscillator::new(Mode::Nco);
        osc.pll_set_bandwidth(Q16::from_f64(4.06)).unwrap();
        assert_eq!(
            osc.pll_set_bandwidth(Q16::from_f64(4.07)),
            Err(Error::Filter(qdsp::biquad::Error::CoefficientRange))
        );
        assert_eq!(osc.bandwidth(), Q16::from_f64(4.06));
    }

    #[test]
    fn default_design() {
        let (b, a) = design(DEFAULT_BANDWIDTH);
        let t2 = 2. * DAMPING / 0.1 - 1e-3;
        assert_eq!(b[1], 4000.);
        assert!((b[0] - 2000. * (1. + t2 / 2.)).abs() < 1e-9);
        assert!((a[0] - 50_001.).abs() < 1e-6);
        assert!((a[1] - 49_999.).abs() < 1e-6);
        assert_eq!(a[2], 0.);
        // DC gain sum(b) / sum(a) = 8 wn^2
        let dc = b.iter().sum::<f64>() / a.iter().sum::<f64>();
        assert!((dc - 0.08).abs() < 1e-9);
    }

    #[test]
    fn zero_bandwidth_opens_loop() {
        let mut osc = Oscillator::new(Mode::Nco);
        osc.pll_set_bandwidth(Q16::ZERO).unwrap();
        for _ in 0..10 {
            assert_eq!(osc.pll_step(Q16::ONE), Q16::ZERO);
        }
        assert_eq!(osc.frequency(), Q16::ZERO);
    }

    #[test]
    fn step_response_is_bounded() {
        for bandwidth in [0.01, 0.05, 0.1, 0.5, 2.0] {
            let mut osc = Oscillator::new(Mode::Nco);
            osc.pll_set_bandwidth(Q16::from_f64(bandwidth)).unwrap();
            let error = Q16::from_f64(0.1);
            let dc = 8. * bandwidth * bandwidth * error.to_f64();
            let mut correction = Q16::ZERO;
            for _ in 0..2000 {
                correction = osc.pll_step(error);
                let bound = 4. * error.to_f64() + 1.01 * dc;
                assert!(correction.abs().to_f64() <= bound);
            }
            // Settled to the DC gain
            assert!(
                (correction.to_f64() - dc).abs() < 1e-3,
                "{bandwidth}: {correction} vs {dc}"
            );
        }
    }

    #[test]
    fn reset_clears_filter() {
        let mut osc = Oscillator::new(Mode::Vco);
        let first = osc.pll_step(Q16::ONE);
        osc.pll_step(Q16::ONE);
        osc.pll_reset();
        assert_eq!(osc.pll_step(Q16::ONE), first);
        assert_eq!(osc.bandwidth(), Q16::from_f64(DEFAULT_BANDWIDTH));
    }

    #[test]
    fn correction_feeds_frequency() {
        let mut osc = Oscillator::new(Mode::Nco);
        osc.set_frequency(Q16::from_f64(0.2));
        let mut sum = Q16::from_f64(0.2);
        for _ in 0..5 {
            sum += osc.pll_step(Q16::from_f64(0.01));
        }
        assert_eq!(osc.frequency(), sum);
    }
}
