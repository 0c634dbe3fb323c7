use qdsp::Q16;

/// Errors raised on precondition violations.
///
/// None of these are transient: retrying the same call fails the same way.
/// Invalid inputs are never clamped into a valid range.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// The PLL loop bandwidth is negative.
    #[error("Loop bandwidth must be non-negative, got {0}")]
    NegativeBandwidth(Q16),
    /// The oscillator mode tag is unknown.
    #[error("Unknown oscillator mode {0}")]
    UnknownMode(u8),
    /// A configuration value is NaN or infinite.
    #[error("Setting {0} must be finite")]
    NonFinite(&'static str),
    /// The loop filter rejected the designed coefficients.
    #[error(transparent)]
    Filter(#[from] qdsp::biquad::Error),
    /// A subcarrier allocation tag is unknown.
    #[error("Invalid subcarrier type {0}")]
    InvalidSubcarrierType(u8),
    /// The m-sequence degree has no default generator polynomial.
    #[error("Unsupported m-sequence degree {0}")]
    MSequenceDegree(u32),
    /// No subcarrier of an allocation is enabled for a sequence.
    #[error("No subcarriers enabled; check allocation")]
    NoActiveSubcarriers,
}
