#![cfg_attr(not(test), no_std)]

mod q16;
pub use q16::*;
mod complex;
pub use complex::*;
pub mod biquad;
pub use biquad::Biquad;

#[cfg(test)]
pub mod testing;
