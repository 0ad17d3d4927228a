use crate::error::{Real48Error, Result};
use crate::ieee::{Ieee754, Parts};
use crate::layout::{self, Fields, FRACTION_BITS, FRACTION_MASK, WIDTH};
use crate::util::read_buffer;
use core::convert::TryFrom;
use core::fmt;
use num_traits::{Bounded, FromPrimitive, ToPrimitive};
#[cfg(test)]
use quickcheck::{quickcheck, Arbitrary, Gen, TestResult};
use tracing::trace;

/// The classes a Real48 value can fall into. There are no infinities, NaNs
/// or subnormals in this format, so this is all of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Zero,
    Normal,
}

/// How to drop the low bits of a double's 52-bit fraction when narrowing it
/// to 39 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    /// Discard the low 13 bits. This is what every plain conversion does.
    Truncate,
    /// Round to the nearest representable value, ties to an even fraction.
    /// A carry out of the fraction bumps the exponent.
    NearestEven,
}

impl Default for Rounding {
    fn default() -> Rounding {
        Rounding::Truncate
    }
}

/// A 6-byte Real48 floating point value, as used by Turbo Pascal and its
/// descendants.
///
/// The value is kept in its serialized, big-endian form: sign in bit 47,
/// a 39-bit fraction in bits 46..8 and a biased exponent in bits 7..0. An
/// exponent of zero means the value is zero, whatever the other bits say.
#[derive(Clone, Copy)]
pub struct Real48 {
    bytes: [u8; WIDTH],
}

impl Real48 {
    pub const ZERO: Real48 = Real48 { bytes: [0; WIDTH] };
    /// Smallest positive value, 2^-128.
    pub const MIN: Real48 = Real48::from_fields(Fields { sign: false, exponent: 1, fraction: 0 });
    /// Largest finite value, (2 - 2^-39) * 2^126.
    pub const MAX: Real48 = Real48::from_fields(Fields {
        sign: false,
        exponent: 0xFF,
        fraction: FRACTION_MASK,
    });
    /// 2^-39, the gap between 1.0 and the next value up.
    pub const EPSILON: Real48 = Real48::from_fields(Fields { sign: false, exponent: 90, fraction: 0 });

    const fn from_fields(fields: Fields) -> Real48 {
        Real48 {
            bytes: layout::store(fields.pack()),
        }
    }

    fn fields(&self) -> Fields {
        Fields::unpack(layout::load(&self.bytes))
    }

    pub const fn min() -> Real48 {
        Real48::MIN
    }

    pub const fn max() -> Real48 {
        Real48::MAX
    }

    pub const fn epsilon() -> Real48 {
        Real48::EPSILON
    }

    /// Wrap six bytes in their on-disk order. Every bit pattern is a valid
    /// Real48.
    pub const fn from_bytes(bytes: [u8; WIDTH]) -> Real48 {
        Real48 { bytes }
    }

    pub const fn to_bytes(self) -> [u8; WIDTH] {
        self.bytes
    }

    /// Build a value from a slice that must be exactly six bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Real48> {
        match <[u8; WIDTH]>::try_from(bytes) {
            Ok(bytes) => Ok(Real48 { bytes }),
            Err(_) => Err(Real48Error::LengthMismatch {
                expected: WIDTH,
                found: bytes.len(),
            }),
        }
    }

    /// Read the next value from the provided byte iterator.
    pub fn read<I: Iterator<Item = u8>>(it: &mut I) -> Result<Real48> {
        match read_buffer::<WIDTH, I>(it) {
            Ok(bytes) => Ok(Real48 { bytes }),
            Err(found) => Err(Real48Error::LengthMismatch {
                expected: WIDTH,
                found,
            }),
        }
    }

    /// Append the six serialized bytes to the buffer.
    pub fn write(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.bytes);
    }

    /// Assemble a value from raw fields. The fraction may not use more than
    /// 39 bits.
    pub fn from_parts(sign: bool, exponent: u8, fraction: u64) -> Result<Real48> {
        if fraction & !FRACTION_MASK != 0 {
            return Err(Real48Error::FractionTooWide { fraction });
        }

        Ok(Real48::from_fields(Fields {
            sign,
            exponent,
            fraction,
        }))
    }

    pub const fn sign(&self) -> bool {
        self.bytes[0] & 0x80 != 0
    }

    pub const fn exponent(&self) -> u8 {
        self.bytes[WIDTH - 1]
    }

    pub const fn fraction(&self) -> u64 {
        (layout::load(&self.bytes) >> 8) & FRACTION_MASK
    }

    pub const fn is_zero(&self) -> bool {
        self.exponent() == 0
    }

    /// True for negative values. Zero is never negative, whatever its sign
    /// bit holds.
    pub const fn is_sign_negative(&self) -> bool {
        self.sign() && !self.is_zero()
    }

    pub const fn is_sign_positive(&self) -> bool {
        !self.is_sign_negative()
    }

    pub const fn classify(&self) -> Category {
        if self.is_zero() {
            Category::Zero
        } else {
            Category::Normal
        }
    }

    pub const fn abs(self) -> Real48 {
        let mut bytes = self.bytes;
        bytes[0] &= 0x7F;
        Real48 { bytes }
    }

    /// Convert from single precision. The 23-bit fraction widens into the 39
    /// available bits without loss, so this only fails when the exponent
    /// does not fit.
    pub fn from_f32(value: f32) -> Result<Real48> {
        encode(value, Rounding::Truncate)
    }

    /// Convert from double precision, truncating the fraction to 39 bits.
    pub fn from_f64(value: f64) -> Result<Real48> {
        encode(value, Rounding::Truncate)
    }

    pub fn from_f64_rounded(value: f64, rounding: Rounding) -> Result<Real48> {
        encode(value, rounding)
    }

    /// Convert to single precision. The low 16 bits of the fraction are
    /// dropped; values below 2^-126 have no normal single representation
    /// and are refused.
    pub fn to_f32(self) -> Result<f32> {
        decode(self)
    }

    /// Convert to double precision. This is exact and cannot fail, since
    /// every Real48 exponent lands well inside double's range.
    pub fn to_f64(self) -> f64 {
        let fields = self.fields();

        if fields.exponent == 0 {
            return 0.0;
        }

        f64::compose(Parts {
            sign: fields.sign,
            exponent: (fields.exponent as i32 - f64::EXPONENT_OFFSET) as u32,
            fraction: widen_fraction::<f64>(fields.fraction),
        })
    }
}

fn encode<F: Ieee754>(value: F, rounding: Rounding) -> Result<Real48> {
    if value.is_zero() {
        return Ok(Real48::ZERO);
    }

    if !value.is_finite() {
        trace!("rejecting non-finite source value");
        return Err(Real48Error::NotFinite);
    }

    let parts = value.decompose();

    if parts.exponent == 0 {
        trace!(fraction = parts.fraction, "rejecting subnormal source value");
        return Err(Real48Error::SubnormalSource);
    }

    let (fraction, carry) = narrow_fraction::<F>(parts.fraction, rounding);
    let exponent = parts.exponent as i32 + F::EXPONENT_OFFSET + carry as i32;

    if !(1..=255).contains(&exponent) {
        trace!(source_exponent = parts.exponent, exponent, "exponent out of Real48 range");
        return Err(Real48Error::ExponentOutOfRange { exponent });
    }

    Ok(Real48::from_fields(Fields {
        sign: parts.sign,
        exponent: exponent as u8,
        fraction,
    }))
}

fn decode<F: Ieee754>(value: Real48) -> Result<F> {
    let fields = value.fields();

    if fields.exponent == 0 {
        return Ok(F::zero());
    }

    let exponent = fields.exponent as i32 - F::EXPONENT_OFFSET;

    if exponent < 1 {
        trace!(exponent = fields.exponent, "Real48 value underflows the target format");
        return Err(Real48Error::TargetUnderflow {
            exponent: fields.exponent,
        });
    }

    if exponent >= F::RESERVED_EXPONENT as i32 {
        trace!(exponent = fields.exponent, "Real48 value overflows the target format");
        return Err(Real48Error::TargetOverflow {
            exponent: fields.exponent,
        });
    }

    Ok(F::compose(Parts {
        sign: fields.sign,
        exponent: exponent as u32,
        fraction: widen_fraction::<F>(fields.fraction),
    }))
}

/// Fit a source fraction into 39 bits. The flag is set when rounding carried
/// out of the top of the fraction, in which case the fraction is zero and the
/// exponent has to go up by one.
fn narrow_fraction<F: Ieee754>(fraction: u64, rounding: Rounding) -> (u64, bool) {
    if F::FRACTION_BITS <= FRACTION_BITS {
        return (fraction << (FRACTION_BITS - F::FRACTION_BITS), false);
    }

    let dropped = F::FRACTION_BITS - FRACTION_BITS;
    let kept = fraction >> dropped;

    match rounding {
        Rounding::Truncate => (kept, false),
        Rounding::NearestEven => {
            let rest = fraction & ((1 << dropped) - 1);
            let half = 1 << (dropped - 1);
            let rounded = if rest > half || (rest == half && kept & 1 == 1) {
                kept + 1
            } else {
                kept
            };

            if rounded > FRACTION_MASK {
                (0, true)
            } else {
                (rounded, false)
            }
        }
    }
}

/// Fit a 39-bit fraction into the target format, dropping low bits if the
/// target is narrower.
fn widen_fraction<F: Ieee754>(fraction: u64) -> u64 {
    if F::FRACTION_BITS >= FRACTION_BITS {
        fraction << (F::FRACTION_BITS - FRACTION_BITS)
    } else {
        fraction >> (FRACTION_BITS - F::FRACTION_BITS)
    }
}

impl Default for Real48 {
    fn default() -> Real48 {
        Real48::ZERO
    }
}

impl fmt::Debug for Real48 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Real48")
            .field("sign", &self.sign())
            .field("exponent", &self.exponent())
            .field("fraction", &format_args!("{:#012x}", self.fraction()))
            .finish()
    }
}

impl fmt::Display for Real48 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&Real48::to_f64(*self), f)
    }
}

impl fmt::LowerExp for Real48 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerExp::fmt(&Real48::to_f64(*self), f)
    }
}

impl fmt::UpperExp for Real48 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::UpperExp::fmt(&Real48::to_f64(*self), f)
    }
}

impl TryFrom<f32> for Real48 {
    type Error = Real48Error;

    fn try_from(x: f32) -> Result<Real48> {
        Real48::from_f32(x)
    }
}

impl TryFrom<f64> for Real48 {
    type Error = Real48Error;

    fn try_from(x: f64) -> Result<Real48> {
        Real48::from_f64(x)
    }
}

impl<'a> TryFrom<&'a [u8]> for Real48 {
    type Error = Real48Error;

    fn try_from(x: &[u8]) -> Result<Real48> {
        Real48::from_slice(x)
    }
}

impl TryFrom<Real48> for f32 {
    type Error = Real48Error;

    fn try_from(x: Real48) -> Result<f32> {
        x.to_f32()
    }
}

impl From<Real48> for f64 {
    fn from(x: Real48) -> f64 {
        x.to_f64()
    }
}

impl From<[u8; WIDTH]> for Real48 {
    fn from(x: [u8; WIDTH]) -> Real48 {
        Real48::from_bytes(x)
    }
}

impl From<Real48> for [u8; WIDTH] {
    fn from(x: Real48) -> [u8; WIDTH] {
        x.to_bytes()
    }
}

impl Bounded for Real48 {
    fn min_value() -> Real48 {
        -Real48::MAX
    }

    fn max_value() -> Real48 {
        Real48::MAX
    }
}

impl ToPrimitive for Real48 {
    fn to_i64(&self) -> Option<i64> {
        Real48::to_f64(*self).to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        Real48::to_f64(*self).to_u64()
    }

    fn to_f32(&self) -> Option<f32> {
        Real48::to_f32(*self).ok()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(Real48::to_f64(*self))
    }
}

impl FromPrimitive for Real48 {
    fn from_i64(n: i64) -> Option<Real48> {
        Real48::from_f64(n as f64).ok()
    }

    fn from_u64(n: u64) -> Option<Real48> {
        Real48::from_f64(n as f64).ok()
    }

    fn from_f32(n: f32) -> Option<Real48> {
        Real48::from_f32(n).ok()
    }

    fn from_f64(n: f64) -> Option<Real48> {
        Real48::from_f64(n).ok()
    }
}

#[cfg(test)]
impl Arbitrary for Real48 {
    fn arbitrary(g: &mut Gen) -> Real48 {
        let fields = Fields::arbitrary(g);
        if fields.exponent == 0 {
            Real48::ZERO
        } else {
            Real48::from_fields(fields)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const LOW_13: u64 = (1 << 13) - 1;

    /// Doubles whose exponent fits the Real48 range, with an arbitrary
    /// fraction.
    fn representable_double(rng: &mut StdRng) -> f64 {
        let exponent = rng.gen_range(895u64..=1149);
        let fraction = rng.gen::<u64>() & ((1 << 52) - 1);
        let sign = rng.gen::<bool>() as u64;
        f64::from_bits((sign << 63) | (exponent << 52) | fraction)
    }

    #[test]
    fn zero_encodings() {
        assert_eq!(Real48::from_f64(0.0).unwrap().to_bytes(), [0; WIDTH]);
        assert_eq!(Real48::from_f64(-0.0).unwrap().to_bytes(), [0; WIDTH]);
        assert_eq!(Real48::from_f32(0.0).unwrap().to_bytes(), [0; WIDTH]);
        assert_eq!(Real48::from_f32(-0.0).unwrap().to_bytes(), [0; WIDTH]);
        assert_eq!(Real48::ZERO.to_f64().to_bits(), 0.0f64.to_bits());
        assert_eq!(Real48::ZERO.to_f32().unwrap().to_bits(), 0.0f32.to_bits());
    }

    #[test]
    fn zero_ignores_other_bits() {
        let noisy = Real48::from_bytes([0xFF, 0x12, 0x34, 0x56, 0x78, 0x00]);
        assert!(noisy.is_zero());
        assert_eq!(noisy.classify(), Category::Zero);
        assert_eq!(noisy.to_f64().to_bits(), 0.0f64.to_bits());
        assert_eq!(noisy.to_f32(), Ok(0.0));
        assert!(!noisy.is_sign_negative());
    }

    #[test]
    fn known_encodings() {
        assert_eq!(Real48::from_f64(1.0).unwrap().to_bytes(), [0, 0, 0, 0, 0, 0x81]);
        assert_eq!(Real48::from_f64(-1.0).unwrap().to_bytes(), [0x80, 0, 0, 0, 0, 0x81]);
        assert_eq!(Real48::from_f64(2.0).unwrap().to_bytes(), [0, 0, 0, 0, 0, 0x82]);
        // 1.5 = 1.1b, top fraction bit set
        assert_eq!(Real48::from_f64(1.5).unwrap().to_bytes(), [0x40, 0, 0, 0, 0, 0x81]);
        assert_eq!(Real48::from_f32(1.5).unwrap().to_bytes(), [0x40, 0, 0, 0, 0, 0x81]);
        assert_eq!(Real48::from_f32(-0.75).unwrap().to_bytes(), [0xC0, 0, 0, 0, 0, 0x80]);
    }

    #[test]
    fn non_finite_sources() {
        assert_eq!(Real48::from_f64(f64::INFINITY), Err(Real48Error::NotFinite));
        assert_eq!(Real48::from_f64(f64::NEG_INFINITY), Err(Real48Error::NotFinite));
        assert_eq!(Real48::from_f64(f64::NAN), Err(Real48Error::NotFinite));
        assert_eq!(Real48::from_f32(f32::INFINITY), Err(Real48Error::NotFinite));
        assert_eq!(Real48::from_f32(f32::NAN), Err(Real48Error::NotFinite));
        assert_eq!(Real48::try_from(f64::NAN).map_err(|e| e.kind()), Err(crate::ErrorKind::Overflow));
    }

    #[test]
    fn double_exponent_bounds() {
        // 2^126 * 1.x is the top of the range, 2^127 is past it
        assert!(Real48::from_f64(2f64.powi(126)).is_ok());
        assert_eq!(
            Real48::from_f64(2f64.powi(127)),
            Err(Real48Error::ExponentOutOfRange { exponent: 256 })
        );
        assert_eq!(
            Real48::from_f64(f64::MAX),
            Err(Real48Error::ExponentOutOfRange { exponent: 2046 - 894 })
        );
        // 2^-128 is the bottom, 2^-129 falls off
        assert_eq!(Real48::from_f64(2f64.powi(-128)).unwrap(), Real48::MIN);
        assert_eq!(
            Real48::from_f64(2f64.powi(-129)),
            Err(Real48Error::ExponentOutOfRange { exponent: 0 })
        );
        assert_eq!(
            Real48::from_f64(1e-300),
            Err(Real48Error::ExponentOutOfRange { exponent: 26 - 894 })
        );
        assert_eq!(Real48::from_f64(f64::MIN_POSITIVE / 2.0), Err(Real48Error::SubnormalSource));
    }

    #[test]
    fn single_exponent_bounds() {
        // single's largest exponent would need Real48 exponent 256
        assert_eq!(
            Real48::from_f32(f32::MAX),
            Err(Real48Error::ExponentOutOfRange { exponent: 256 })
        );
        assert_eq!(
            Real48::from_f32(2f32.powi(127)),
            Err(Real48Error::ExponentOutOfRange { exponent: 256 })
        );
        assert_eq!(Real48::from_f32(2f32.powi(126)).unwrap().exponent(), 255);
        assert_eq!(Real48::from_f32(f32::MIN_POSITIVE).unwrap().exponent(), 3);
        assert_eq!(Real48::from_f32(f32::MIN_POSITIVE / 4.0), Err(Real48Error::SubnormalSource));
    }

    #[test]
    fn single_decode_bounds() {
        let tiny = Real48::from_parts(false, 1, 0).unwrap();
        assert_eq!(tiny.to_f32(), Err(Real48Error::TargetUnderflow { exponent: 1 }));
        let small = Real48::from_parts(true, 2, 0x1234).unwrap();
        assert_eq!(small.to_f32(), Err(Real48Error::TargetUnderflow { exponent: 2 }));
        assert_eq!(small.to_f32().map_err(|e| e.kind()), Err(crate::ErrorKind::Range));
        let smallest = Real48::from_parts(false, 3, 0).unwrap();
        assert_eq!(smallest.to_f32(), Ok(f32::MIN_POSITIVE));
        assert_eq!(Real48::MAX.to_f32().unwrap().to_bits(), 0x7EFF_FFFF);
    }

    #[test]
    fn single_decode_drops_low_fraction_bits() {
        let r = Real48::from_parts(false, 129, (1 << 38) | 0xFFFF).unwrap();
        assert_eq!(r.to_f32(), Ok(1.5));
        assert_eq!(f32::try_from(r), Ok(1.5));
    }

    #[test]
    fn double_truncates() {
        // 1 + 2^-40 sits below the last fraction bit
        let just_above_one = 1.0 + 2f64.powi(-40);
        assert_eq!(Real48::from_f64(just_above_one).unwrap().to_f64(), 1.0);
        let all_low = f64::from_bits(1.0f64.to_bits() | LOW_13);
        assert_eq!(Real48::from_f64(all_low).unwrap().to_f64(), 1.0);
        let negative = -f64::from_bits(2.0f64.to_bits() | LOW_13);
        assert_eq!(Real48::from_f64(negative).unwrap().to_f64(), -2.0);
    }

    #[test]
    fn nearest_even_rounding() {
        let one = 1.0f64.to_bits();
        let half = 1 << 12;
        let up = f64::from_bits(one | (half + 1));
        let tie_even = f64::from_bits(one | half);
        let tie_odd = f64::from_bits(one | (1 << 13) | half);
        let rounded = |x| Real48::from_f64_rounded(x, Rounding::NearestEven).unwrap().to_f64();

        assert_eq!(rounded(up), 1.0 + 2f64.powi(-39));
        assert_eq!(rounded(tie_even), 1.0);
        assert_eq!(rounded(tie_odd), 1.0 + 2.0 * 2f64.powi(-39));
        assert_eq!(Real48::from_f64_rounded(up, Rounding::Truncate).unwrap().to_f64(), 1.0);
        assert_eq!(Rounding::default(), Rounding::Truncate);
    }

    #[test]
    fn nearest_even_carries_into_exponent() {
        let almost_two = f64::from_bits(2.0f64.to_bits() - 1);
        let r = Real48::from_f64_rounded(almost_two, Rounding::NearestEven).unwrap();
        assert_eq!(r.exponent(), 130);
        assert_eq!(r.fraction(), 0);
        assert_eq!(r.to_f64(), 2.0);

        let almost_overflow = f64::from_bits(2f64.powi(127).to_bits() - 1);
        assert!(Real48::from_f64(almost_overflow).is_ok());
        assert_eq!(
            Real48::from_f64_rounded(almost_overflow, Rounding::NearestEven),
            Err(Real48Error::ExponentOutOfRange { exponent: 256 })
        );
    }

    #[test]
    fn lossless_double_round_trip() {
        let mut rng = StdRng::seed_from_u64(0x5EA1_4800);
        for _ in 0..10_000 {
            let d = f64::from_bits(representable_double(&mut rng).to_bits() & !LOW_13);
            let r = Real48::from_f64(d).unwrap();
            assert_eq!(r.to_f64().to_bits(), d.to_bits());
        }
    }

    #[test]
    fn truncating_double_round_trip() {
        let mut rng = StdRng::seed_from_u64(48);
        for _ in 0..10_000 {
            let d = representable_double(&mut rng);
            let expected = d.to_bits() & !LOW_13;
            assert_eq!(Real48::from_f64(d).unwrap().to_f64().to_bits(), expected);
        }
    }

    #[test]
    fn constants() {
        assert_eq!(Real48::min().to_bytes(), [0, 0, 0, 0, 0, 1]);
        assert_eq!(Real48::max().to_bytes(), [0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(Real48::epsilon().to_bytes(), [0, 0, 0, 0, 0, 90]);
        assert_eq!(Real48::MIN.to_f64(), 2f64.powi(-128));
        assert_eq!(Real48::EPSILON.to_f64(), 2f64.powi(-39));
        assert_eq!(Real48::MAX.to_f64(), (2.0 - 2f64.powi(-39)) * 2f64.powi(126));
        assert_eq!(Real48::default().to_bytes(), Real48::ZERO.to_bytes());
        assert_eq!(<Real48 as Bounded>::min_value().to_f64(), -Real48::MAX.to_f64());
        assert_eq!(<Real48 as Bounded>::max_value().to_bytes(), Real48::MAX.to_bytes());
    }

    #[test]
    fn accessors() {
        let r = Real48::from_bytes([0xAB, 0xCD, 0xEF, 0x01, 0x23, 0x45]);
        assert!(r.sign());
        assert_eq!(r.exponent(), 0x45);
        assert_eq!(r.fraction(), 0x2B_CDEF_0123);
        assert!(r.is_sign_negative());
        assert_eq!(r.abs().to_bytes(), [0x2B, 0xCD, 0xEF, 0x01, 0x23, 0x45]);
    }

    #[test]
    fn classification() {
        assert_eq!(Real48::from_f64(0.0).unwrap().classify(), Category::Zero);
        assert_eq!(Real48::from_f64(1.0).unwrap().classify(), Category::Normal);
        assert_eq!(Real48::MIN.classify(), Category::Normal);
        assert_eq!(Real48::MAX.classify(), Category::Normal);
    }

    #[test]
    fn parts() {
        assert_eq!(Real48::from_parts(false, 129, 0).unwrap().to_f64(), 1.0);
        assert_eq!(
            Real48::from_parts(false, 129, 1 << 39),
            Err(Real48Error::FractionTooWide { fraction: 1 << 39 })
        );
    }

    #[test]
    fn byte_io() {
        let mut buffer = Vec::new();
        Real48::from_f64(1.5).unwrap().write(&mut buffer);
        Real48::from_f64(-3.0).unwrap().write(&mut buffer);
        assert_eq!(buffer.len(), 12);

        let mut it = buffer.iter().copied();
        assert_eq!(Real48::read(&mut it).unwrap().to_f64(), 1.5);
        assert_eq!(Real48::read(&mut it).unwrap().to_f64(), -3.0);
        assert_eq!(
            Real48::read(&mut it),
            Err(Real48Error::LengthMismatch { expected: 6, found: 0 })
        );

        assert_eq!(Real48::from_slice(&buffer[..6]).unwrap().to_f64(), 1.5);
        assert_eq!(
            Real48::try_from(&buffer[..]),
            Err(Real48Error::LengthMismatch { expected: 6, found: 12 })
        );
        assert_eq!(
            Real48::from_slice(&buffer[..5]),
            Err(Real48Error::LengthMismatch { expected: 6, found: 5 })
        );
    }

    #[test]
    fn formatting() {
        let r = Real48::from_f64(3.75).unwrap();
        assert_eq!(format!("{}", r), "3.75");
        assert_eq!(format!("{:.1}", r), "3.8");
        assert_eq!(format!("{:e}", r), "3.75e0");
        assert_eq!(format!("{:E}", r), "3.75E0");
        assert_eq!(
            format!("{:?}", Real48::from_f64(1.5).unwrap()),
            "Real48 { sign: false, exponent: 129, fraction: 0x4000000000 }"
        );
    }

    #[test]
    fn primitives() {
        let r = Real48::from_f64(-42.75).unwrap();
        assert_eq!(ToPrimitive::to_i64(&r), Some(-42));
        assert_eq!(ToPrimitive::to_u64(&r), None);
        assert_eq!(ToPrimitive::to_f64(&r), Some(-42.75));
        assert_eq!(ToPrimitive::to_f32(&Real48::MIN), None);
        assert_eq!(<Real48 as FromPrimitive>::from_i64(-7).map(Real48::to_f64), Some(-7.0));
        assert_eq!(<Real48 as FromPrimitive>::from_u64(1 << 40).map(Real48::to_f64), Some(2f64.powi(40)));
        assert!(<Real48 as FromPrimitive>::from_f64(f64::INFINITY).is_none());
        assert!(<Real48 as FromPrimitive>::from_f32(f32::MAX).is_none());
    }

    #[test]
    fn conversions_agree() {
        // going through single or double must land on the same bytes
        for x in [1.0f32, -2.5, 1234.5678, 3.0e-38, 1.0e38] {
            let via_single = Real48::from_f32(x).unwrap();
            let via_double = Real48::from_f64(x as f64).unwrap();
            assert_eq!(via_single.to_bytes(), via_double.to_bytes());
            assert_eq!(via_single.to_f64(), x as f64);
            assert_eq!(via_single.to_f32(), Ok(x));
        }
    }

    quickcheck! {
        fn fields_match_layout(r: Real48) -> bool {
            let fields = r.fields();
            r.sign() == fields.sign
                && r.exponent() == fields.exponent
                && r.fraction() == fields.fraction
        }

        fn single_round_trip(x: f32) -> TestResult {
            match Real48::from_f32(x) {
                Err(_) => TestResult::discard(),
                Ok(r) => TestResult::from_bool(r.to_f32() == Ok(x) || x == 0.0),
            }
        }

        fn double_round_trip_truncates(x: f64) -> TestResult {
            match Real48::from_f64(x) {
                Err(_) => TestResult::discard(),
                Ok(r) if x == 0.0 => TestResult::from_bool(r.to_bytes() == [0; WIDTH]),
                Ok(r) => TestResult::from_bool(r.to_f64().to_bits() == x.to_bits() & !LOW_13),
            }
        }

        fn decoded_reencodes(r: Real48) -> bool {
            match Real48::from_f64(r.to_f64()) {
                Err(_) => false,
                Ok(again) => again.to_bytes() == r.to_bytes(),
            }
        }
    }
}
