//! A small library for the 6-byte `Real48` floating point format used by
//! Turbo Pascal and friends, and for moving values between it and the
//! IEEE-754 `f32`/`f64` types.
//!
//! The wire form is six bytes, big-endian: the sign in the top bit, then a
//! 39-bit fraction, then an 8-bit exponent biased by 129 in the last byte.
//! An exponent of zero is zero. There are no infinities, NaNs or subnormals,
//! and conversions that would need one fail instead of clamping:
//!
//! ```
//! use real48::{Real48, Real48Error};
//!
//! let x = Real48::from_f64(1.5).unwrap();
//! assert_eq!(x.to_bytes(), [0x40, 0, 0, 0, 0, 0x81]);
//! assert_eq!(x.to_f64(), 1.5);
//!
//! let sum = (x + Real48::from_f64(2.25).unwrap()).unwrap();
//! assert_eq!(sum.to_f64(), 3.75);
//!
//! assert_eq!(Real48::from_f64(f64::INFINITY), Err(Real48Error::NotFinite));
//! ```
//!
//! Going from `f64` drops the low 13 bits of the fraction. Use
//! [`Real48::from_f64_rounded`] with [`Rounding::NearestEven`] to round
//! instead.
mod error;
mod ieee;
mod layout;
mod ops;
mod real48;
mod util;

pub use crate::error::{ErrorKind, Real48Error, Result};
pub use crate::layout::{FRACTION_BITS, WIDTH};
pub use crate::real48::{Category, Real48, Rounding};
