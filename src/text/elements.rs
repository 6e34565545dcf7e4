use crate::{
    dtype::NumericType,
    options::{BoundaryPolicy, IngestOptions, IntegerRadix},
};
use byteorder::{LittleEndian, WriteBytesExt};
use num_traits::{Bounded, Float};
use std::{io, num::IntErrorKind, str::FromStr};
use thiserror::Error;

/// Why a single token could not be converted.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConvertError {
    /// The token is empty or is not a number of the requested kind.
    #[error("malformed number")]
    Malformed,
    /// The value saturated: an integer equal to the type's minimum or maximum
    /// (see [`BoundaryPolicy::Reject`]), or a float that is infinite with
    /// either sign.
    #[error("value saturated")]
    Saturated,
    /// The integer does not fit in the element type.
    #[error("value out of range")]
    OutOfRange,
}

/// An array element type that can be parsed from a text token.
///
/// Implemented for the primitive integers up to 64 bits, `f32` and `f64`.
pub trait TextElement: Copy + Default + Sized {
    /// Numeric type reported in the [`Shape`](crate::Shape) of arrays built
    /// from this element type.
    const NUMERIC_TYPE: NumericType;

    /// Converts one token. Surrounding whitespace has already been handled
    /// according to [`IngestOptions::trim_whitespace`].
    fn parse_token(token: &[u8], options: &IngestOptions) -> Result<Self, ConvertError>;

    /// Writes a slice of `Self` to the writer as little-endian bytes.
    fn write_slice<W: io::Write>(slice: &[Self], writer: W) -> io::Result<()>;
}

fn token_str(token: &[u8]) -> Result<&str, ConvertError> {
    std::str::from_utf8(token).map_err(|_| ConvertError::Malformed)
}

/// Splits an optional sign and radix prefix off an integer token.
fn split_radix(s: &str, radix: IntegerRadix) -> (bool, &str, u32) {
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    match radix {
        IntegerRadix::Decimal => (negative, unsigned, 10),
        IntegerRadix::Auto => {
            if let Some(hex) = unsigned.strip_prefix("0x").or_else(|| unsigned.strip_prefix("0X")) {
                (negative, hex, 16)
            } else if unsigned.len() > 1 && unsigned.starts_with('0') {
                (negative, &unsigned[1..], 8)
            } else {
                (negative, unsigned, 10)
            }
        }
    }
}

fn parse_int<T>(token: &[u8], options: &IngestOptions) -> Result<T, ConvertError>
where
    T: TryFrom<i128> + Bounded + PartialEq,
{
    let (negative, digits, radix) = split_radix(token_str(token)?, options.radix);
    // `from_str_radix` would accept a second sign
    if digits.starts_with(['+', '-']) {
        return Err(ConvertError::Malformed);
    }
    let magnitude = i128::from_str_radix(digits, radix).map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ConvertError::OutOfRange,
        _ => ConvertError::Malformed,
    })?;
    let value = if negative { -magnitude } else { magnitude };
    let value = T::try_from(value).map_err(|_| ConvertError::OutOfRange)?;
    if options.boundary == BoundaryPolicy::Reject
        && (value == T::min_value() || value == T::max_value())
    {
        return Err(ConvertError::Saturated);
    }
    Ok(value)
}

fn parse_float<T: Float + FromStr>(token: &[u8]) -> Result<T, ConvertError> {
    let value: T = token_str(token)?
        .parse()
        .map_err(|_| ConvertError::Malformed)?;
    if value.is_infinite() {
        return Err(ConvertError::Saturated);
    }
    Ok(value)
}

macro_rules! impl_int_element {
    ($($elem:ty => $ty:ident, |$w:ident, $v:ident| $write:expr;)+) => {$(
        impl TextElement for $elem {
            const NUMERIC_TYPE: NumericType = NumericType::$ty;

            fn parse_token(token: &[u8], options: &IngestOptions) -> Result<Self, ConvertError> {
                parse_int(token, options)
            }

            fn write_slice<W: io::Write>(slice: &[Self], mut $w: W) -> io::Result<()> {
                for &$v in slice {
                    $write?;
                }
                Ok(())
            }
        }
    )+};
}

impl_int_element! {
    u8 => U8, |w, v| w.write_u8(v);
    u16 => U16, |w, v| w.write_u16::<LittleEndian>(v);
    u32 => U32, |w, v| w.write_u32::<LittleEndian>(v);
    u64 => U64, |w, v| w.write_u64::<LittleEndian>(v);
    i8 => I8, |w, v| w.write_i8(v);
    i16 => I16, |w, v| w.write_i16::<LittleEndian>(v);
    i32 => I32, |w, v| w.write_i32::<LittleEndian>(v);
    i64 => I64, |w, v| w.write_i64::<LittleEndian>(v);
}

impl TextElement for f32 {
    const NUMERIC_TYPE: NumericType = NumericType::F32;

    fn parse_token(token: &[u8], _: &IngestOptions) -> Result<Self, ConvertError> {
        parse_float(token)
    }

    fn write_slice<W: io::Write>(slice: &[Self], mut writer: W) -> io::Result<()> {
        slice
            .iter()
            .try_for_each(|&v| writer.write_f32::<LittleEndian>(v))
    }
}

impl TextElement for f64 {
    const NUMERIC_TYPE: NumericType = NumericType::F64;

    fn parse_token(token: &[u8], _: &IngestOptions) -> Result<Self, ConvertError> {
        parse_float(token)
    }

    fn write_slice<W: io::Write>(slice: &[Self], mut writer: W) -> io::Result<()> {
        slice
            .iter()
            .try_for_each(|&v| writer.write_f64::<LittleEndian>(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<T: TextElement>(token: &str) -> Result<T, ConvertError> {
        T::parse_token(token.as_bytes(), &IngestOptions::default())
    }

    fn parse_with<T: TextElement>(token: &str, options: IngestOptions) -> Result<T, ConvertError> {
        T::parse_token(token.as_bytes(), &options)
    }

    #[test]
    fn integers() {
        assert_eq!(parse::<u8>("42"), Ok(42));
        assert_eq!(parse::<i16>("-1234"), Ok(-1234));
        assert_eq!(parse::<i64>("+7"), Ok(7));
        assert_eq!(parse::<u64>("18446744073709551614"), Ok(u64::MAX - 1));
    }

    #[test]
    fn boundary_values_are_saturated() {
        assert_eq!(parse::<u8>("255"), Err(ConvertError::Saturated));
        assert_eq!(parse::<u8>("0"), Err(ConvertError::Saturated));
        assert_eq!(parse::<i8>("-128"), Err(ConvertError::Saturated));
        assert_eq!(parse::<i32>("2147483647"), Err(ConvertError::Saturated));
        assert_eq!(parse::<u64>("18446744073709551615"), Err(ConvertError::Saturated));
    }

    #[test]
    fn boundary_values_accepted_on_request() {
        let options = IngestOptions::default().boundary(BoundaryPolicy::Accept);
        assert_eq!(parse_with::<u8>("255", options), Ok(255));
        assert_eq!(parse_with::<u8>("0", options), Ok(0));
        assert_eq!(parse_with::<i64>("-9223372036854775808", options), Ok(i64::MIN));
        assert_eq!(parse_with::<u8>("256", options), Err(ConvertError::OutOfRange));
    }

    #[test]
    fn out_of_range() {
        assert_eq!(parse::<u8>("300"), Err(ConvertError::OutOfRange));
        assert_eq!(parse::<u16>("-1"), Err(ConvertError::OutOfRange));
        assert_eq!(
            parse::<u64>("999999999999999999999999999999999999999999"),
            Err(ConvertError::OutOfRange)
        );
    }

    #[test]
    fn malformed() {
        for token in ["abc", "", "1.5", "12abc", "--1", "+-1", "0x"] {
            assert_eq!(parse::<i32>(token), Err(ConvertError::Malformed), "{token:?}");
        }
        assert_eq!(u8::parse_token(b"\xff", &IngestOptions::default()), Err(ConvertError::Malformed));
    }

    #[test]
    fn auto_radix_by_default() {
        let options = IngestOptions::default();
        assert_eq!(parse_with::<u16>("0x1F", options), Ok(31));
        assert_eq!(parse_with::<i32>("-0X10", options), Ok(-16));
        assert_eq!(parse_with::<u8>("010", options), Ok(8));
        assert_eq!(parse_with::<u8>("7", options), Ok(7));
        assert_eq!(parse_with::<u8>("09", options), Err(ConvertError::Malformed));
        assert_eq!(parse_with::<u8>("0x", options), Err(ConvertError::Malformed));
        assert_eq!(parse_with::<u8>("0x-1", options), Err(ConvertError::Malformed));
    }

    #[test]
    fn decimal_radix() {
        let options = IngestOptions::default().radix(IntegerRadix::Decimal);
        assert_eq!(parse_with::<u8>("010", options), Ok(10));
        assert_eq!(parse_with::<u8>("09", options), Ok(9));
        assert_eq!(parse_with::<i32>("0x10", options), Err(ConvertError::Malformed));
    }

    #[test]
    fn floats() {
        assert_eq!(parse::<f32>("1.5"), Ok(1.5));
        assert_eq!(parse::<f64>("-2.5e3"), Ok(-2500.0));
        assert_eq!(parse::<f64>("0"), Ok(0.0));
        assert!(parse::<f64>("NaN").unwrap().is_nan());
    }

    #[test]
    fn float_errors() {
        assert_eq!(parse::<f64>("abc"), Err(ConvertError::Malformed));
        assert_eq!(parse::<f64>(""), Err(ConvertError::Malformed));
        assert_eq!(parse::<f32>("1e39"), Err(ConvertError::Saturated));
        assert_eq!(parse::<f64>("1e309"), Err(ConvertError::Saturated));
        assert_eq!(parse::<f64>("-inf"), Err(ConvertError::Saturated));
        assert_eq!(parse::<f32>("-1e39"), Err(ConvertError::Saturated));
    }

    #[test]
    fn write_little_endian() {
        let mut out = Vec::new();
        u16::write_slice(&[1, 0x0203], &mut out).unwrap();
        assert_eq!(out, [1, 0, 3, 2]);
        let mut out = Vec::new();
        f32::write_slice(&[1.0], &mut out).unwrap();
        assert_eq!(out, 1.0f32.to_le_bytes());
    }
}
