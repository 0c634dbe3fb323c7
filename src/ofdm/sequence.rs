//! Short and long preamble symbols
//!
//! Both symbols place pseudo-random BPSK values (`±1`) on the enabled
//! subcarriers of an [Allocation]. The short symbol only uses even
//! subcarriers, which makes its time domain signal repeat twice within one
//! symbol. The long symbol uses every enabled subcarrier and a longer
//! m-sequence than the short symbol.
use rustfft::{num_complex::Complex32, FftPlanner};

use super::{Allocation, SubcarrierType};
use crate::msequence::MSequence;
use crate::Error;

/// A preamble symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    /// Subcarrier values, DC first.
    pub freq: Vec<Complex32>,
    /// Time domain samples, `sum |time|^2 = freq.len()`.
    pub time: Vec<Complex32>,
    /// Number of non-zero subcarriers.
    pub active: usize,
}

impl Sequence {
    fn new(freq: Vec<Complex32>, active: usize) -> Result<Self, Error> {
        if active == 0 {
            return Err(Error::NoActiveSubcarriers);
        }
        let mut time = freq.clone();
        let mut planner = FftPlanner::<f32>::new();
        planner.plan_fft_inverse(time.len()).process(&mut time);
        let g = 1. / (active as f32).sqrt();
        for t in time.iter_mut() {
            *t *= g;
        }
        Ok(Self { freq, time, active })
    }

    /// Total time domain energy.
    pub fn energy(&self) -> f32 {
        self.time.iter().map(|t| t.norm_sqr()).sum()
    }
}

/// m-sequence degree for `m` subcarriers: `ceil(log2(m))` within `4..=8`.
fn degree(m: usize) -> u32 {
    m.next_power_of_two().trailing_zeros().clamp(4, 8)
}

fn bpsk(bit: u32) -> Complex32 {
    Complex32::new(if bit != 0 { 1. } else { -1. }, 0.)
}

fn generate(
    p: &Allocation,
    m: u32,
    enable: impl Fn(usize) -> bool,
) -> Result<Sequence, Error> {
    let mut ms = MSequence::new(m)?;
    let mut active = 0;
    let freq = p
        .iter()
        .enumerate()
        .map(|(i, t)| {
            // Draw for every subcarrier to keep the sequence aligned.
            let s = ms.generate_symbol(3) & 1;
            if *t != SubcarrierType::Null && enable(i) {
                active += 1;
                bpsk(s)
            } else {
                Complex32::default()
            }
        })
        .collect();
    Sequence::new(freq, active)
}

/// Short preamble symbol (S0) on the even enabled subcarriers.
pub fn short_sequence(p: &Allocation) -> Result<Sequence, Error> {
    generate(p, degree(p.len()), |i| i % 2 == 0)
}

/// Long preamble symbol (S1) on all enabled subcarriers.
pub fn long_sequence(p: &Allocation) -> Result<Sequence, Error> {
    generate(p, degree(p.len()) + 1, |_| true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_data(m: usize) -> Allocation {
        vec![SubcarrierType::Data; m].into()
    }

    #[test]
    fn degrees() {
        assert_eq!(degree(0), 4);
        assert_eq!(degree(8), 4);
        assert_eq!(degree(64), 6);
        assert_eq!(degree(65), 7);
        assert_eq!(degree(1024), 8);
    }

    #[test]
    fn short_all_data() {
        let s = short_sequence(&all_data(64)).unwrap();
        assert_eq!(s.active, 32);
        assert_eq!(s.freq.len(), 64);
        assert_eq!(s.time.len(), 64);
        for (i, x) in s.freq.iter().enumerate() {
            assert_eq!(x.im, 0.);
            if i % 2 == 1 {
                assert_eq!(x.re, 0.);
            } else {
                assert_eq!(x.re.abs(), 1.);
            }
        }
        assert!((s.energy() - 64.).abs() < 1e-3);
        // Even subcarriers only: the two halves repeat.
        for i in 0..32 {
            assert!((s.time[i] - s.time[i + 32]).norm() < 1e-5);
        }
    }

    #[test]
    fn long_default() {
        let p = Allocation::default_for(64);
        let s = long_sequence(&p).unwrap();
        assert_eq!(s.active, 50);
        for (t, x) in p.iter().zip(s.freq.iter()) {
            let want = if *t == SubcarrierType::Null { 0. } else { 1. };
            assert_eq!(x.re.abs(), want);
        }
        assert!((s.energy() - 64.).abs() < 1e-3);
        assert_ne!(short_sequence(&p).unwrap().freq, s.freq);
    }

    #[test]
    fn deterministic() {
        let p = Allocation::default_for(128);
        assert_eq!(short_sequence(&p), short_sequence(&p));
        assert_eq!(long_sequence(&p), long_sequence(&p));
    }

    #[test]
    fn no_active() {
        let p: Allocation = vec![SubcarrierType::Null; 64].into();
        assert_eq!(short_sequence(&p), Err(Error::NoActiveSubcarriers));
        assert_eq!(long_sequence(&p), Err(Error::NoActiveSubcarriers));
        // Only odd subcarriers enabled
        let p = Allocation::from_tags(&[0, 2, 0, 1]).unwrap();
        assert_eq!(short_sequence(&p), Err(Error::NoActiveSubcarriers));
        assert_eq!(long_sequence(&p).unwrap().active, 2);
    }
}
