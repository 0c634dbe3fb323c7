//! Maximal-length pseudo-random binary sequences
use crate::Error;

/// Default generator polynomials by degree, including the `x^m` term.
const GENERATORS: [u32; 14] = [
    0x0007, 0x000b, 0x0013, 0x0025, 0x0043, 0x0089, 0x011d, 0x0211, 0x0409,
    0x0805, 0x1053, 0x201b, 0x402b, 0x8003,
];

/// Linear feedback shift register producing an m-sequence.
///
/// The output bit is the parity of the register masked by the generator
/// taps; it is shifted into the register from the LSB side. With the default
/// generators the sequence repeats after `2^m - 1` bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MSequence {
    // degree
    m: u32,
    // feedback taps
    g: u32,
    // register mask, 2^m - 1
    n: u32,
    // register
    a: u32,
    // initial register
    a0: u32,
}

impl MSequence {
    pub const MIN_DEGREE: u32 = 2;
    pub const MAX_DEGREE: u32 = 15;

    /// Create a generator of degree `m` with the default polynomial and an
    /// initial register of `1`.
    pub fn new(m: u32) -> Result<Self, Error> {
        if !(Self::MIN_DEGREE..=Self::MAX_DEGREE).contains(&m) {
            return Err(Error::MSequenceDegree(m));
        }
        let g = GENERATORS[(m - Self::MIN_DEGREE) as usize] >> 1;
        Ok(Self {
            m,
            g,
            n: (1 << m) - 1,
            a: 1,
            a0: 1,
        })
    }

    pub fn degree(&self) -> u32 {
        self.m
    }

    /// Sequence length before it repeats.
    pub fn period(&self) -> u32 {
        self.n
    }

    /// Shift the register once and return the new bit.
    pub fn advance(&mut self) -> u8 {
        let b = (self.a & self.g).count_ones() & 1;
        self.a = ((self.a << 1) | b) & self.n;
        b as u8
    }

    /// Concatenate the next `bits` bits, first bit most significant.
    pub fn generate_symbol(&mut self, bits: u32) -> u32 {
        debug_assert!(bits <= 32);
        (0..bits).fold(0, |s, _| (s << 1) | self.advance() as u32)
    }

    /// Return to the initial register.
    pub fn reset(&mut self) {
        self.a = self.a0;
    }
}

impl Iterator for MSequence {
    type Item = u8;
    #[inline]
    fn next(&mut self) -> Option<u8> {
        Some(self.advance())
    }
}
