//! Fixed-point oscillators and OFDM preambles for software-defined radio
//!
//! * [nco]: numerically-controlled oscillator with a 256 entry sine table or
//!   direct fixed-point trigonometry, a second order PLL and complex mixers.
//! * [ofdm]: subcarrier allocation and short/long preamble symbols.
//! * [msequence]: maximal-length LFSR bit sequences.
//! * [config]: oscillator settings.
//!
//! All oscillator arithmetic is done in [Q16] fixed point.
pub mod config;
mod error;
pub use error::Error;
pub mod msequence;
pub mod nco;
pub mod ofdm;

pub use qdsp::{Complex, Q16};
