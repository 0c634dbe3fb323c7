//! Oscillator settings
use core::f64::consts::{PI, TAU};

use miniconf::{Leaf, Tree};
use qdsp::Q16;
use serde::{Deserialize, Serialize};

use crate::nco::{pll::DEFAULT_BANDWIDTH, Mode, Oscillator};
use crate::Error;

/// Run-time oscillator configuration.
#[derive(Clone, Debug, PartialEq, Tree, Serialize, Deserialize)]
pub struct Config {
    /// Sine/cosine strategy. See [Mode] variants.
    pub mode: Leaf<Mode>,

    /// PLL loop bandwidth in radians per sample, non-negative.
    pub bandwidth: Leaf<f32>,

    /// Initial phase increment in radians per sample.
    pub frequency: Leaf<f32>,

    /// Initial phase in radians. Any finite value, wrapped into `(-pi, pi]`.
    pub phase: Leaf<f32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Leaf(Mode::Nco),
            bandwidth: Leaf(DEFAULT_BANDWIDTH as _),
            frequency: Leaf(0.0),
            phase: Leaf(0.0),
        }
    }
}

impl Config {
    /// Create an oscillator with this configuration.
    ///
    /// # Returns
    /// [Error::NonFinite] for NaN or infinite settings, otherwise the
    /// errors of [Oscillator::pll_set_bandwidth].
    pub fn build(&self) -> Result<Oscillator, Error> {
        for (name, value) in [
            ("bandwidth", *self.bandwidth),
            ("frequency", *self.frequency),
            ("phase", *self.phase),
        ] {
            if !value.is_finite() {
                return Err(Error::NonFinite(name));
            }
        }
        let mut osc = Oscillator::new(*self.mode);
        osc.pll_set_bandwidth(Q16::from_f32(*self.bandwidth))?;
        osc.set_frequency(Q16::from_f32(*self.frequency));
        // Wrap by whole turns before conversion, `set_phase` only undoes one.
        let phase = (*self.phase as f64 + PI).rem_euclid(TAU) - PI;
        osc.set_phase(Q16::from_f64(phase));
        log::debug!("Built {} oscillator from {self:?}", self.mode.as_ref());
        Ok(osc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_builds() {
        let osc = Config::default().build().unwrap();
        assert_eq!(osc.mode(), Mode::Nco);
        assert_eq!(osc.bandwidth(), Q16::from_f64(DEFAULT_BANDWIDTH));
        assert_eq!(osc.phase(), Q16::ZERO);
        assert_eq!(osc.frequency(), Q16::ZERO);
    }

    #[test]
    fn from_json() {
        let (config, _): (Config, _) = serde_json_core::from_str(
            r#"{"mode":"Vco","bandwidth":0.05,"frequency":0.25,"phase":4.0}"#,
        )
        .unwrap();
        let osc = config.build().unwrap();
        assert_eq!(osc.mode(), Mode::Vco);
        assert_eq!(osc.frequency(), Q16::from_f32(0.25));
        // 4 - 2 pi
        let phase = osc.phase().to_f64();
        assert!((phase - (4.0 - 2. * core::f64::consts::PI)).abs() < 1e-4);
    }

    #[test]
    fn invalid_bandwidth() {
        let config = Config {
            bandwidth: Leaf(-0.5),
            ..Default::default()
        };
        assert_eq!(
            config.build().unwrap_err(),
            Error::NegativeBandwidth(Q16::from_f32(-0.5))
        );
    }

    #[test]
    fn large_phase() {
        for (phase, want) in [(10.0, 10. - 4. * PI), (-20.0, -20. + 6. * PI)] {
            let config = Config {
                phase: Leaf(phase),
                ..Default::default()
            };
            let mut osc = config.build().unwrap();
            let got = osc.phase();
            assert!(got > Q16::from_f64(-PI) && got <= Q16::from_f64(PI));
            assert!((got.to_f64() - want).abs() < 1e-4);
            osc.sin_cos();
            osc.step();
        }
    }

    #[test]
    fn non_finite() {
        let config = Config {
            phase: Leaf(f32::NAN),
            ..Default::default()
        };
        assert_eq!(config.build().unwrap_err(), Error::NonFinite("phase"));
        let config = Config {
            bandwidth: Leaf(f32::INFINITY),
            ..Default::default()
        };
        assert_eq!(
            config.build().unwrap_err(),
            Error::NonFinite("bandwidth")
        );
    }

    #[test]
    fn set_by_path() {
        let mut config = Config::default();
        miniconf::json::set(&mut config, "/bandwidth", b"0.2").unwrap();
        miniconf::json::set(&mut config, "/mode", br#""Vco""#).unwrap();
        let osc = config.build().unwrap();
        assert_eq!(osc.mode(), Mode::Vco);
        assert_eq!(osc.bandwidth(), Q16::from_f32(0.2));

        miniconf::json::set(&mut config, "/bandwidth", b"-1.0").unwrap();
        assert_eq!(
            config.build().unwrap_err(),
            Error::NegativeBandwidth(Q16::from_f32(-1.0))
        );
        assert!(miniconf::json::set(&mut config, "/gain", b"1").is_err());
    }
}
