//! Signed fixed-point numbers with an explicit overflow policy.
//!
//! Two formats share a single arithmetic kernel: [`Fixed32`] (Q16.16 stored
//! in an `i32`) and [`Fixed64`] (Q32.32 stored in an `i64`). Every operation
//! in [`Arith`] is computed exactly in `i128` and then narrowed back to the
//! storage width according to the [`Overflow`] policy it was built with.

use std::{fmt, str::FromStr};
use thiserror::Error;

mod arith;
mod transcendental;

pub use arith::Arith;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FixedError {
    #[error("fixed-point overflow in {op}")]
    Overflow { op: &'static str },
    #[error("fixed-point division by zero")]
    DivisionByZero,
    #[error("{op} is undefined for non-positive input")]
    Domain { op: &'static str },
    #[error("{value} is not representable in {format}")]
    NotRepresentable { value: f64, format: &'static str },
    #[error("invalid fixed-point literal '{raw}'")]
    Parse { raw: String },
}

pub type Result<T, E = FixedError> = std::result::Result<T, E>;

/// What to do when a result does not fit the storage width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Overflow {
    /// Two's complement wraparound, the behavior of plain integer arithmetic.
    /// Out-of-range `exp` and `pow` results keep the low bits of the true
    /// value, which is zero once it is shifted past the storage width.
    Wrapping,
    /// Clamp to the nearest representable value.
    #[default]
    Saturating,
    /// Report [`FixedError::Overflow`].
    Checked,
}

impl Overflow {
    /// Parse a policy name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "wrapping" | "wrap" => Some(Overflow::Wrapping),
            "saturating" | "saturate" => Some(Overflow::Saturating),
            "checked" => Some(Overflow::Checked),
            _ => None,
        }
    }

    pub(crate) fn narrow<F: FixedPoint>(self, raw: i128, op: &'static str) -> Result<F> {
        if (F::MIN_RAW..=F::MAX_RAW).contains(&raw) {
            return Ok(F::from_raw_wrapping(raw));
        }
        match self {
            Overflow::Wrapping => Ok(F::from_raw_wrapping(raw)),
            Overflow::Saturating => Ok(F::from_raw_wrapping(raw.clamp(F::MIN_RAW, F::MAX_RAW))),
            Overflow::Checked => Err(FixedError::Overflow { op }),
        }
    }
}

/// A signed binary fixed-point format.
///
/// Implementors only describe their storage; all arithmetic lives in
/// [`Arith`] and works on the widened raw value.
pub trait FixedPoint:
    Copy + Ord + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Human readable format name, e.g. `q16.16`.
    const NAME: &'static str;
    const FRAC_BITS: u32;
    const MIN_RAW: i128;
    const MAX_RAW: i128;
    const ZERO: Self;
    const ONE: Self;
    /// Digits printed after the decimal point by `Display`.
    const DECIMALS: usize;

    /// Big-endian byte image of the raw integer.
    type Bytes: AsRef<[u8]> + Copy + fmt::Debug + Send + Sync;

    /// The raw scaled integer, widened.
    fn raw(self) -> i128;

    /// Build from a raw integer, truncating to the storage width.
    fn from_raw_wrapping(raw: i128) -> Self;

    fn to_be_bytes(self) -> Self::Bytes;

    fn from_be_bytes(bytes: Self::Bytes) -> Self;

    fn is_negative(self) -> bool {
        self.raw() < 0
    }

    /// Integer part, truncated toward zero.
    fn trunc(self) -> i32 {
        (self.raw() / (1i128 << Self::FRAC_BITS)) as i32
    }

    /// Nearest representable value, or `None` if `value` is out of range.
    fn from_f64(value: f64) -> Option<Self> {
        let scaled = (value * (1u128 << Self::FRAC_BITS) as f64).round();
        // MAX_RAW itself rounds up to a power of two as an f64, the first
        // value past the range.
        let limit = (Self::MAX_RAW + 1) as f64;
        if !scaled.is_finite() || scaled < Self::MIN_RAW as f64 || scaled >= limit {
            return None;
        }
        Some(Self::from_raw_wrapping(scaled as i128))
    }

    fn to_f64(self) -> f64 {
        self.raw() as f64 / (1u128 << Self::FRAC_BITS) as f64
    }
}

macro_rules! fixed_type {
    (
        $(#[$meta:meta])*
        $name:ident, $repr:ty, $label:literal, frac = $frac:literal, decimals = $decimals:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name($repr);

        impl $name {
            pub const fn from_bits(bits: $repr) -> Self {
                Self(bits)
            }

            pub const fn to_bits(self) -> $repr {
                self.0
            }

            /// Exact conversion of a small integer.
            pub const fn from_int(value: i16) -> Self {
                Self((value as $repr) << $frac)
            }
        }

        impl FixedPoint for $name {
            const NAME: &'static str = $label;
            const FRAC_BITS: u32 = $frac;
            const MIN_RAW: i128 = <$repr>::MIN as i128;
            const MAX_RAW: i128 = <$repr>::MAX as i128;
            const ZERO: Self = Self(0);
            const ONE: Self = Self(1 << $frac);
            const DECIMALS: usize = $decimals;

            type Bytes = [u8; std::mem::size_of::<$repr>()];

            fn raw(self) -> i128 {
                self.0 as i128
            }

            fn from_raw_wrapping(raw: i128) -> Self {
                Self(raw as $repr)
            }

            fn to_be_bytes(self) -> Self::Bytes {
                self.0.to_be_bytes()
            }

            fn from_be_bytes(bytes: Self::Bytes) -> Self {
                Self(<$repr>::from_be_bytes(bytes))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                format_fixed(*self, f)
            }
        }

        impl FromStr for $name {
            type Err = FixedError;

            fn from_str(s: &str) -> Result<Self> {
                parse_fixed(s)
            }
        }
    };
}

fixed_type!(
    /// Q16.16 stored in an `i32`; four bytes on the wire.
    Fixed32, i32, "q16.16", frac = 16, decimals = 4
);

fixed_type!(
    /// Q32.32 stored in an `i64`; eight bytes on the wire.
    Fixed64, i64, "q32.32", frac = 32, decimals = 9
);

/// Writes `|value|` digit by digit so the output never goes through `f64`.
fn format_fixed<F: FixedPoint>(value: F, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let raw = value.raw();
    let mask = (1u128 << F::FRAC_BITS) - 1;
    let magnitude = raw.unsigned_abs();
    let int_part = magnitude >> F::FRAC_BITS;
    let mut frac = magnitude & mask;

    let decimals = f.precision().unwrap_or(F::DECIMALS);
    let mut digits = String::with_capacity(decimals);
    for _ in 0..decimals {
        frac *= 10;
        digits.push(char::from(b'0' + (frac >> F::FRAC_BITS) as u8));
        frac &= mask;
    }

    let sign = if raw < 0 { "-" } else { "" };
    if decimals == 0 {
        write!(f, "{sign}{int_part}")
    } else {
        write!(f, "{sign}{int_part}.{digits}")
    }
}

// 10^18 * 2^32 still fits comfortably in an i128.
const MAX_PARSED_DECIMALS: usize = 18;

/// Exact decimal parse: `[+-]digits[.digits]`, rounded to nearest.
fn parse_fixed<F: FixedPoint>(s: &str) -> Result<F> {
    let invalid = || FixedError::Parse { raw: s.to_string() };
    let trimmed = s.trim();
    let (negative, body) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (int_digits, frac_digits) = match body.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (body, ""),
    };
    if int_digits.is_empty() && frac_digits.is_empty() {
        return Err(invalid());
    }
    if !int_digits.bytes().chain(frac_digits.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let mut int_part: i128 = 0;
    for b in int_digits.bytes() {
        int_part = int_part
            .checked_mul(10)
            .and_then(|v| v.checked_add((b - b'0') as i128))
            .filter(|v| *v <= (F::MAX_RAW >> F::FRAC_BITS) + 1)
            .ok_or_else(invalid)?;
    }

    let mut numerator: i128 = 0;
    let mut denominator: i128 = 1;
    for b in frac_digits.bytes().take(MAX_PARSED_DECIMALS) {
        numerator = numerator * 10 + (b - b'0') as i128;
        denominator *= 10;
    }
    let frac_raw = ((numerator << F::FRAC_BITS) + denominator / 2) / denominator;

    let magnitude = (int_part << F::FRAC_BITS) + frac_raw;
    let raw = if negative { -magnitude } else { magnitude };
    if !(F::MIN_RAW..=F::MAX_RAW).contains(&raw) {
        return Err(invalid());
    }
    Ok(F::from_raw_wrapping(raw))
}
