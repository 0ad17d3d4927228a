use thiserror::Error;

/// The broad class of a conversion failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source value has no representation in the target format.
    Overflow,
    /// A Real48 value too small for single precision, which would need a
    /// subnormal float to hold it.
    Range,
    /// The raw bytes or fields handed to us were malformed.
    Format,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Real48Error {
    #[error("source value is not finite and has no Real48 representation")]
    NotFinite,
    #[error("biased exponent {exponent} does not fit the Real48 exponent range 1..=255")]
    ExponentOutOfRange { exponent: i32 },
    #[error("subnormal source values have no Real48 representation")]
    SubnormalSource,
    #[error("Real48 exponent {exponent} is too small for the target format")]
    TargetUnderflow { exponent: u8 },
    #[error("Real48 exponent {exponent} is too large for the target format")]
    TargetOverflow { exponent: u8 },
    #[error("fraction {fraction:#x} is wider than 39 bits")]
    FractionTooWide { fraction: u64 },
    #[error("expected {expected} bytes of Real48 data, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

impl Real48Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Real48Error::NotFinite => ErrorKind::Overflow,
            Real48Error::ExponentOutOfRange { .. } => ErrorKind::Overflow,
            Real48Error::SubnormalSource => ErrorKind::Overflow,
            Real48Error::TargetUnderflow { .. } => ErrorKind::Range,
            Real48Error::TargetOverflow { .. } => ErrorKind::Overflow,
            Real48Error::FractionTooWide { .. } => ErrorKind::Format,
            Real48Error::LengthMismatch { .. } => ErrorKind::Format,
        }
    }
}

pub type Result<T> = core::result::Result<T, Real48Error>;
