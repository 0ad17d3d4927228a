//! The 48-bit word behind a Real48 value, and the rules for moving it in and
//! out of its 6-byte big-endian form.
//!
//! ```text
//!   47   46                                     8 7          0
//!  +----+----------------------------------------+------------+
//!  | s  |              fraction (39)             | exponent(8)|
//!  +----+----------------------------------------+------------+
//! ```
#[cfg(test)]
use quickcheck::{quickcheck, Arbitrary, Gen};

/// Width of the serialized form, in bytes.
pub const WIDTH: usize = 6;

pub const FRACTION_BITS: u32 = 39;
pub const FRACTION_MASK: u64 = (1 << FRACTION_BITS) - 1;
pub const EXPONENT_MASK: u64 = 0xFF;
pub const WORD_MASK: u64 = (1 << 48) - 1;

const SIGN_SHIFT: u32 = 47;
const FRACTION_SHIFT: u32 = 8;

/// The three logical fields of a Real48 value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fields {
    pub sign: bool,
    pub exponent: u8,
    pub fraction: u64,
}

impl Fields {
    /// Pack the fields into the low 48 bits of a `u64`. Fraction bits past the
    /// 39th are dropped.
    pub const fn pack(&self) -> u64 {
        ((self.sign as u64) << SIGN_SHIFT)
            | ((self.fraction & FRACTION_MASK) << FRACTION_SHIFT)
            | (self.exponent as u64)
    }

    pub const fn unpack(word: u64) -> Fields {
        Fields {
            sign: (word >> SIGN_SHIFT) & 1 == 1,
            exponent: (word & EXPONENT_MASK) as u8,
            fraction: (word >> FRACTION_SHIFT) & FRACTION_MASK,
        }
    }
}

/// Write the low 48 bits of `word` out, most significant byte first.
pub const fn store(word: u64) -> [u8; WIDTH] {
    let word = word & WORD_MASK;
    let mut res = [0u8; WIDTH];
    let mut idx = 0;

    while idx < WIDTH {
        let shift = (WIDTH - idx - 1) * 8;
        res[idx] = ((word >> shift) & 0xff) as u8;
        idx += 1;
    }

    res
}

/// Rebuild the 48-bit word from its big-endian bytes.
pub const fn load(bytes: &[u8; WIDTH]) -> u64 {
    let mut word = 0u64;
    let mut idx = 0;

    while idx < WIDTH {
        word = (word << 8) | (bytes[idx] as u64);
        idx += 1;
    }

    word
}

#[cfg(test)]
impl Arbitrary for Fields {
    fn arbitrary(g: &mut Gen) -> Fields {
        Fields {
            sign: bool::arbitrary(g),
            exponent: u8::arbitrary(g),
            fraction: u64::arbitrary(g) & FRACTION_MASK,
        }
    }
}

#[cfg(test)]
#[test]
fn basic_layout() {
    assert_eq!(store(0), [0; WIDTH]);
    assert_eq!(store(0x0102_0304_0506), [1, 2, 3, 4, 5, 6]);
    assert_eq!(load(&[1, 2, 3, 4, 5, 6]), 0x0102_0304_0506);
    // bits above 48 never make it onto the wire
    assert_eq!(store(0xFFFF_0000_0000_0001), [0, 0, 0, 0, 0, 1]);
    //
    let one = Fields { sign: false, exponent: 129, fraction: 0 };
    assert_eq!(store(one.pack()), [0, 0, 0, 0, 0, 0x81]);
    //
    let neg = Fields { sign: true, exponent: 1, fraction: 0 };
    assert_eq!(store(neg.pack()), [0x80, 0, 0, 0, 0, 1]);
    //
    let top = Fields { sign: false, exponent: 0xFF, fraction: FRACTION_MASK };
    assert_eq!(store(top.pack()), [0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
    //
    let high_frac = Fields { sign: false, exponent: 0, fraction: 1 << 38 };
    assert_eq!(store(high_frac.pack()), [0x40, 0, 0, 0, 0, 0]);
    let low_frac = Fields { sign: false, exponent: 0, fraction: 1 };
    assert_eq!(store(low_frac.pack()), [0, 0, 0, 0, 1, 0]);
}

#[cfg(test)]
#[test]
fn pack_drops_wide_fractions() {
    let wide = Fields { sign: false, exponent: 7, fraction: FRACTION_MASK + 1 };
    assert_eq!(wide.pack(), 7);
}

#[cfg(test)]
quickcheck! {
    fn fields_word_fields(f: Fields) -> bool {
        Fields::unpack(f.pack()) == f
    }

    fn word_bytes_word(w: u64) -> bool {
        load(&store(w)) == w & WORD_MASK
    }

    fn word_stays_in_48_bits(f: Fields) -> bool {
        f.pack() & !WORD_MASK == 0
    }
}
