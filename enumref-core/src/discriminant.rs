//! Integer representations an enum can be reflected over.
//!
//! Values are kept in the enum's own representation so that the full range
//! of every primitive integer (including `u64::MAX` and negative values)
//! survives resolution exactly.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::Serialize;

use crate::error::{ReflectError, ReflectResult};

/// Integer type suffixes accepted on literal initializers (`7u8`, `-1i16`).
const INTEGER_SUFFIXES: &[&str] = &[
    "i128", "u128", "isize", "usize", "i64", "u64", "i32", "u32", "i16", "u16", "i8", "u8",
];

/// A primitive integer usable as an enum's underlying representation.
pub trait Discriminant:
    Copy + Eq + Ord + Hash + Debug + Display + Serialize + Send + Sync + 'static
{
    /// Value of the first enumerator when it has no initializer.
    const ZERO: Self;

    /// Rust name of the representation (`"u64"`, `"i16"`, ...).
    const REPR: &'static str;

    /// The next value in auto-increment order, or `None` on overflow.
    fn successor(self) -> Option<Self>;

    /// Lossless conversion into the widest signed integer.
    fn widen(self) -> i128;

    /// Checked narrowing from `i128`.
    fn from_i128(value: i128) -> Option<Self>;

    /// Parse an integer literal initializer into this representation.
    fn parse_literal(literal: &str) -> ReflectResult<Self> {
        let wide = parse_integer_literal(literal).ok_or_else(|| {
            ReflectError::invalid_literal(literal, Self::REPR, "not an integer literal")
        })?;
        Self::from_i128(wide).ok_or_else(|| {
            ReflectError::invalid_literal(literal, Self::REPR, "value out of range")
        })
    }
}

macro_rules! impl_discriminant {
    ($($ty:ident),* $(,)?) => {$(
        impl Discriminant for $ty {
            const ZERO: Self = 0;
            const REPR: &'static str = stringify!($ty);

            #[inline]
            fn successor(self) -> Option<Self> {
                self.checked_add(1)
            }

            #[inline]
            fn widen(self) -> i128 {
                self as i128
            }

            #[inline]
            fn from_i128(value: i128) -> Option<Self> {
                Self::try_from(value).ok()
            }
        }
    )*};
}

impl_discriminant!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

/// Read an integer literal as written in Rust source.
///
/// Accepts an optional sign (possibly separated by whitespace, as
/// `stringify!` renders `-1` as `- 1`), `0x`/`0o`/`0b` prefixes, `_`
/// digit separators, an optional integer type suffix and any number of
/// redundant surrounding parentheses. Anything else, including arithmetic,
/// yields `None`.
pub fn parse_integer_literal(literal: &str) -> Option<i128> {
    let mut text = literal.trim();
    while let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        text = inner.trim();
    }

    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, text[1..].trim_start()),
        b'+' => (false, text[1..].trim_start()),
        _ => (false, text),
    };

    let (radix, body) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        Some("0o") | Some("0O") => (8, &unsigned[2..]),
        Some("0b") | Some("0B") => (2, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let body = INTEGER_SUFFIXES
        .iter()
        .find_map(|suffix| body.strip_suffix(suffix))
        .unwrap_or(body);
    let digits: String = body.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let magnitude = u128::from_str_radix(&digits, radix).ok()?;
    if negative {
        if magnitude == i128::MIN.unsigned_abs() {
            Some(i128::MIN)
        } else {
            i128::try_from(magnitude).ok().map(|m| -m)
        }
    } else {
        i128::try_from(magnitude).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successor_overflow() {
        assert_eq!(41u8.successor(), Some(42));
        assert_eq!(u8::MAX.successor(), None);
        assert_eq!((-1i16).successor(), Some(0));
        assert_eq!(u64::MAX.successor(), None);
    }

    #[test]
    fn test_widen_extremes() {
        assert_eq!(u64::MAX.widen(), 18_446_744_073_709_551_615);
        assert_eq!(i64::MIN.widen(), -9_223_372_036_854_775_808);
        assert_eq!(u64::from_i128(-1), None);
        assert_eq!(i8::from_i128(-128), Some(i8::MIN));
    }

    #[test]
    fn test_parse_decimal_and_signed() {
        assert_eq!(parse_integer_literal("10"), Some(10));
        assert_eq!(parse_integer_literal("-1"), Some(-1));
        assert_eq!(parse_integer_literal("- 1"), Some(-1));
        assert_eq!(parse_integer_literal("+7"), Some(7));
        assert_eq!(parse_integer_literal("1_000"), Some(1000));
    }

    #[test]
    fn test_parse_prefixes_and_suffixes() {
        assert_eq!(parse_integer_literal("0xFF"), Some(255));
        assert_eq!(parse_integer_literal("0o17"), Some(15));
        assert_eq!(parse_integer_literal("0b1010"), Some(10));
        assert_eq!(parse_integer_literal("7u8"), Some(7));
        assert_eq!(parse_integer_literal("-3i16"), Some(-3));
        assert_eq!(parse_integer_literal("((5))"), Some(5));
    }

    #[test]
    fn test_parse_rejects_expressions() {
        assert_eq!(parse_integer_literal("1 << 0"), None);
        assert_eq!(parse_integer_literal("(Sour | Sweet)"), None);
        assert_eq!(parse_integer_literal("CONSTANT"), None);
        assert_eq!(parse_integer_literal(""), None);
        assert_eq!(parse_integer_literal("-"), None);
    }

    #[test]
    fn test_parse_literal_ranges() {
        assert_eq!(u64::parse_literal("18446744073709551615").unwrap(), u64::MAX);
        assert_eq!(i16::parse_literal("-1").unwrap(), -1);

        let err = u8::parse_literal("256").unwrap_err();
        assert!(matches!(err, ReflectError::InvalidLiteral { repr: "u8", .. }));

        let err = u32::parse_literal("1 << 4").unwrap_err();
        assert!(err.to_string().contains("not an integer literal"));
    }
}
