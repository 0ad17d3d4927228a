/// The sign, biased exponent and fraction of a binary float, widened so that
/// one shape fits both single and double precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parts {
    pub sign: bool,
    pub exponent: u32,
    pub fraction: u64,
}

/// An IEEE-754 binary interchange format that a Real48 can be converted to
/// and from.
///
/// All bit access goes through `to_bits`/`from_bits`; nothing here looks at
/// a float through a pointer.
pub trait Ieee754: Copy {
    const EXPONENT_BITS: u32;
    const FRACTION_BITS: u32;
    /// Added to this format's biased exponent to get the Real48 biased
    /// exponent. Both implementations land on the same true exponent, so
    /// going through either format is numerically consistent.
    const EXPONENT_OFFSET: i32;
    /// The all-ones exponent reserved for infinities and NaNs.
    const RESERVED_EXPONENT: u32 = (1 << Self::EXPONENT_BITS) - 1;

    fn zero() -> Self;
    fn is_zero(self) -> bool;
    fn is_finite(self) -> bool;
    fn decompose(self) -> Parts;
    fn compose(parts: Parts) -> Self;
}

macro_rules! ieee754_impl {
    ($t: ident, $bits: ident, $exp_bits: expr, $frac_bits: expr, $offset: expr) => {
        impl Ieee754 for $t {
            const EXPONENT_BITS: u32 = $exp_bits;
            const FRACTION_BITS: u32 = $frac_bits;
            const EXPONENT_OFFSET: i32 = $offset;

            fn zero() -> $t {
                0.0
            }

            fn is_zero(self) -> bool {
                self == 0.0
            }

            fn is_finite(self) -> bool {
                $t::is_finite(self)
            }

            fn decompose(self) -> Parts {
                let bits = self.to_bits();
                let exponent_mask: $bits = (1 << Self::EXPONENT_BITS) - 1;
                let fraction_mask: $bits = (1 << Self::FRACTION_BITS) - 1;

                Parts {
                    sign: (bits >> (Self::EXPONENT_BITS + Self::FRACTION_BITS)) & 1 == 1,
                    exponent: ((bits >> Self::FRACTION_BITS) & exponent_mask) as u32,
                    fraction: (bits & fraction_mask) as u64,
                }
            }

            fn compose(parts: Parts) -> $t {
                let exponent_mask: $bits = (1 << Self::EXPONENT_BITS) - 1;
                let fraction_mask: $bits = (1 << Self::FRACTION_BITS) - 1;
                let sign = (parts.sign as $bits) << (Self::EXPONENT_BITS + Self::FRACTION_BITS);
                let exponent = ((parts.exponent as $bits) & exponent_mask) << Self::FRACTION_BITS;
                let fraction = (parts.fraction as $bits) & fraction_mask;

                $t::from_bits(sign | exponent | fraction)
            }
        }
    };
}

ieee754_impl!(f32, u32, 8, 23, 2);
ieee754_impl!(f64, u64, 11, 52, -894);
