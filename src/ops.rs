//! Arithmetic and ordering for `Real48`.
//!
//! Nothing here works on the bits directly except negation. Both operands
//! are widened to `f64` (which is exact), the native operation runs there,
//! and the result is narrowed back with the usual truncating conversion.
//! That last step can fail, so the arithmetic operators produce a `Result`
//! rather than a bare `Real48`.
use crate::error::Result;
use crate::real48::Real48;
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::ops::{Add, Div, Mul, Neg, Sub};

macro_rules! promoted_binop {
    ($imp: ident, $method: ident, $checked: ident, $assign: ident, $op: tt) => {
        impl Real48 {
            pub fn $checked(self, rhs: Real48) -> Result<Real48> {
                Real48::from_f64(self.to_f64() $op rhs.to_f64())
            }

            /// In-place form. On failure `self` is left as it was.
            pub fn $assign(&mut self, rhs: Real48) -> Result<()> {
                *self = self.$checked(rhs)?;
                Ok(())
            }
        }

        impl $imp for Real48 {
            type Output = Result<Real48>;

            fn $method(self, rhs: Real48) -> Result<Real48> {
                self.$checked(rhs)
            }
        }

        impl<'a> $imp<&'a Real48> for Real48 {
            type Output = Result<Real48>;

            fn $method(self, rhs: &Real48) -> Result<Real48> {
                self.$checked(*rhs)
            }
        }

        impl<'a> $imp<Real48> for &'a Real48 {
            type Output = Result<Real48>;

            fn $method(self, rhs: Real48) -> Result<Real48> {
                (*self).$checked(rhs)
            }
        }

        impl<'a, 'b> $imp<&'a Real48> for &'b Real48 {
            type Output = Result<Real48>;

            fn $method(self, rhs: &Real48) -> Result<Real48> {
                (*self).$checked(*rhs)
            }
        }
    };
}

promoted_binop!(Add, add, checked_add, try_add_assign, +);
promoted_binop!(Sub, sub, checked_sub, try_sub_assign, -);
promoted_binop!(Mul, mul, checked_mul, try_mul_assign, *);
promoted_binop!(Div, div, checked_div, try_div_assign, /);

impl Real48 {
    /// Unary plus.
    pub const fn pos(self) -> Real48 {
        self
    }
}

/// Flips the sign bit and nothing else. Zero stays zero, so the canonical
/// all-zero pattern never picks up a sign.
impl Neg for Real48 {
    type Output = Real48;

    fn neg(self) -> Real48 {
        if self.is_zero() {
            return self;
        }

        let mut bytes = self.to_bytes();
        bytes[0] ^= 0x80;
        Real48::from_bytes(bytes)
    }
}

impl<'a> Neg for &'a Real48 {
    type Output = Real48;

    fn neg(self) -> Real48 {
        -*self
    }
}

// Equality and ordering are numeric. Every pattern with a zero exponent is
// the same value, and widening never produces a NaN or a negative zero, so
// the order is total.

impl PartialEq for Real48 {
    fn eq(&self, other: &Real48) -> bool {
        self.to_f64() == other.to_f64()
    }
}

impl Eq for Real48 {}

impl PartialOrd for Real48 {
    fn partial_cmp(&self, other: &Real48) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Real48 {
    fn cmp(&self, other: &Real48) -> Ordering {
        self.to_f64().total_cmp(&other.to_f64())
    }
}

impl Hash for Real48 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_zero() {
            Real48::ZERO.to_bytes().hash(state)
        } else {
            self.to_bytes().hash(state)
        }
    }
}
