use core::f64::consts::PI;
use qdsp::Q16;

/// Number of sine table entries per period.
pub const TABLE_SIZE: usize = 256;
const MASK: usize = TABLE_SIZE - 1;

/// `TABLE_SIZE / (2 pi)` in Q16: table steps per radian.
const INDEX_SCALE: i64 =
    (TABLE_SIZE as f64 / (2. * PI) * (1i64 << Q16::FRAC_BITS) as f64 + 0.5)
        as i64;

/// Index bias, two full periods. Keeps the unmasked index non-negative for
/// any constrained phase without moving phase zero off index zero.
const INDEX_BIAS: i64 = 2 * TABLE_SIZE as i64;

/// One period of a quantized sinusoid.
#[derive(Clone, Debug, PartialEq)]
pub struct SineTable([Q16; TABLE_SIZE]);

impl Default for SineTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SineTable {
    /// Sample `sin(2 pi i / TABLE_SIZE)` for every entry.
    pub fn new() -> Self {
        let mut table = [Q16::ZERO; TABLE_SIZE];
        for (i, v) in table.iter_mut().enumerate() {
            *v = Q16::from_f64((2. * PI * i as f64 / TABLE_SIZE as f64).sin());
        }
        Self(table)
    }

    /// Table index nearest to a phase.
    ///
    /// The phase must be within `(-pi, pi]`. Anything else is a caller bug
    /// and fails a debug assertion.
    pub fn index(phase: Q16) -> usize {
        // Q32 table steps, biased and rounded half up
        let i = (phase.raw() as i64 * INDEX_SCALE
            + (INDEX_BIAS << 32)
            + (1 << 31))
            >> 32;
        const HALF: i64 = TABLE_SIZE as i64 / 2;
        debug_assert!(
            (INDEX_BIAS - HALF..=INDEX_BIAS + HALF).contains(&i),
            "phase {phase} outside (-pi, pi]"
        );
        i as usize & MASK
    }

    #[inline]
    pub fn sin(&self, index: usize) -> Q16 {
        self.0[index & MASK]
    }

    /// Cosine as the sine a quarter period later.
    #[inline]
    pub fn cos(&self, index: usize) -> Q16 {
        self.0[(index + TABLE_SIZE / 4) & MASK]
    }
}
