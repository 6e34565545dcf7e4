use std::{fmt, mem, str::FromStr};
use thiserror::Error;

/// Element type of an ingested array.
///
/// The names accepted by [`FromStr`] are `uint8`, `uint16`, `uint32`,
/// `uint64`, `int8`, `int16`, `int32`, `int64`, `float`, `double` and
/// `longdouble` (ASCII case-insensitive).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumericType {
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// Extended precision. Stored as `f64` since Rust has no wider float
    /// primitive.
    LongDouble,
}

impl NumericType {
    /// All supported types, in the order of their names above.
    pub const ALL: [Self; 11] = [
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::F32,
        Self::F64,
        Self::LongDouble,
    ];

    /// Canonical name of the type.
    pub const fn name(self) -> &'static str {
        match self {
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::F32 => "float",
            Self::F64 => "double",
            Self::LongDouble => "longdouble",
        }
    }

    /// Size in bytes of one stored element.
    pub const fn element_size(self) -> usize {
        match self {
            Self::U8 => mem::size_of::<u8>(),
            Self::U16 => mem::size_of::<u16>(),
            Self::U32 => mem::size_of::<u32>(),
            Self::U64 => mem::size_of::<u64>(),
            Self::I8 => mem::size_of::<i8>(),
            Self::I16 => mem::size_of::<i16>(),
            Self::I32 => mem::size_of::<i32>(),
            Self::I64 => mem::size_of::<i64>(),
            Self::F32 => mem::size_of::<f32>(),
            Self::F64 | Self::LongDouble => mem::size_of::<f64>(),
        }
    }

    /// Returns `true` for `float`, `double` and `longdouble`.
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64 | Self::LongDouble)
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An unknown numeric type name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown numeric type {0:?}; expected one of uint8, uint16, uint32, uint64, int8, int16, int32, int64, float, double, longdouble")]
pub struct ParseNumericTypeError(pub String);

impl FromStr for NumericType {
    type Err = ParseNumericTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseNumericTypeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for ty in NumericType::ALL {
            assert_eq!(ty.name().parse::<NumericType>(), Ok(ty));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("UInt16".parse(), Ok(NumericType::U16));
        assert_eq!("LongDouble".parse(), Ok(NumericType::LongDouble));
    }

    #[test]
    fn unknown_name() {
        let err = "uint128".parse::<NumericType>().unwrap_err();
        assert_eq!(err.0, "uint128");
    }

    #[test]
    fn sizes() {
        assert_eq!(NumericType::U8.element_size(), 1);
        assert_eq!(NumericType::I16.element_size(), 2);
        assert_eq!(NumericType::F32.element_size(), 4);
        assert_eq!(NumericType::LongDouble.element_size(), 8);
        assert!(NumericType::LongDouble.is_float());
        assert!(!NumericType::I64.is_float());
    }
}
