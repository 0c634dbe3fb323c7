//! OFDM framing: subcarrier allocation and preamble sequences
//!
//! An [Allocation] tags every subcarrier of an `M` point symbol as null,
//! pilot or data. Index 0 is DC, indices above `M/2` are the negative
//! frequencies. The short and long preamble symbols of a frame are derived
//! from it in [sequence].
use core::fmt;
use core::ops::Deref;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use crate::Error;

pub mod sequence;
pub use sequence::{long_sequence, short_sequence, Sequence};

/// Role of a subcarrier.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    IntoPrimitive,
)]
#[repr(u8)]
pub enum SubcarrierType {
    /// Disabled, e.g. guard band or DC.
    Null = 0,
    Pilot = 1,
    Data = 2,
}

impl SubcarrierType {
    /// Display symbol: `.` null, `|` pilot, `+` data.
    pub fn symbol(self) -> char {
        match self {
            Self::Null => '.',
            Self::Pilot => '|',
            Self::Data => '+',
        }
    }
}

/// Number of subcarriers of each type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub null: usize,
    pub pilot: usize,
    pub data: usize,
}

/// Subcarrier allocation of an OFDM symbol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation(Vec<SubcarrierType>);

impl Allocation {
    /// Default allocation of `m` subcarriers.
    ///
    /// DC and a guard band of `2 * max(m / 10, 2) - 1` subcarriers around
    /// Nyquist are null. The rest is data with pilots every 8th subcarrier
    /// (4th for `m <= 34`), placed symmetrically in the upper and lower band.
    ///
    /// ```text
    /// m = 64, centered on DC:
    /// [.......+++++|+++++++|+++++++|+++.+++|+++++++|+++++++|+++++......]
    /// ```
    pub fn default_for(m: usize) -> Self {
        if m < 6 {
            log::warn!("Default allocation of {m} < 6 subcarriers");
        }
        let guard = (m / 10).max(2);
        let spacing = if m > 34 { 8 } else { 4 };
        let mut p = vec![SubcarrierType::Null; m];
        for i in 1..(m / 2).saturating_sub(guard) {
            let tag = if (i + spacing / 2) % spacing == 0 {
                SubcarrierType::Pilot
            } else {
                SubcarrierType::Data
            };
            // upper and lower band
            p[i] = tag;
            p[m - i] = tag;
        }
        Self(p)
    }

    /// Allocation from raw tags (see [SubcarrierType]).
    pub fn from_tags(tags: &[u8]) -> Result<Self, Error> {
        tags.iter()
            .map(|&t| {
                SubcarrierType::try_from(t)
                    .map_err(|e| Error::InvalidSubcarrierType(e.number))
            })
            .collect::<Result<_, _>>()
            .map(Self)
    }

    /// Raw tags, the inverse of [Allocation::from_tags].
    pub fn tags(&self) -> Vec<u8> {
        self.0.iter().map(|&t| t.into()).collect()
    }

    /// Count null, pilot and data subcarriers.
    pub fn counts(&self) -> Counts {
        self.0.iter().fold(Counts::default(), |mut c, t| {
            match t {
                SubcarrierType::Null => c.null += 1,
                SubcarrierType::Pilot => c.pilot += 1,
                SubcarrierType::Data => c.data += 1,
            }
            c
        })
    }
}

impl From<Vec<SubcarrierType>> for Allocation {
    fn from(p: Vec<SubcarrierType>) -> Self {
        Self(p)
    }
}

impl Deref for Allocation {
    type Target = [SubcarrierType];
    fn deref(&self) -> &[SubcarrierType] {
        &self.0
    }
}

impl fmt::Display for Allocation {
    /// Symbols from the most negative frequency to the most positive.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0.len();
        f.write_str("[")?;
        for i in 0..m {
            fmt::Write::write_char(f, self.0[(i + m / 2) % m].symbol())?;
        }
        f.write_str("]")
    }
}
