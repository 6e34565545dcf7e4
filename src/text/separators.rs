use std::{fmt, str::FromStr};
use thiserror::Error;

/// Maximum number of axes (and therefore separators).
pub const MAX_AXES: usize = 3;

/// An invalid separator sequence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeparatorError {
    /// No separator was given.
    #[error("separator list is empty")]
    Empty,
    /// More separators than supported axes.
    ///
    /// The readers report this as
    /// [`ShapeError::UnsupportedNdim`](crate::ShapeError::UnsupportedNdim).
    #[error("{0} separators given; at most 3 axes are supported")]
    TooMany(usize),
    /// The same character was given twice.
    #[error("separator {0:?} appears more than once")]
    Duplicate(char),
    /// Separators must be single-byte characters.
    #[error("separator {0:?} is not an ASCII character")]
    NonAscii(char),
}

/// Ordered list of 1 to 3 distinct ASCII separator characters.
///
/// Index 0 delimits the innermost (fastest-varying) axis, higher indices
/// delimit progressively outer axes. `",|^"` describes `z` items separated by
/// `,`, `y` rows separated by `|` and `x` slices separated by `^`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Separators {
    bytes: [u8; MAX_AXES],
    len: usize,
}

impl Separators {
    /// Validates `seps`.
    pub fn new(seps: &str) -> Result<Self, SeparatorError> {
        let count = seps.chars().count();
        if count == 0 {
            return Err(SeparatorError::Empty);
        }
        if count > MAX_AXES {
            return Err(SeparatorError::TooMany(count));
        }
        let mut bytes = [0; MAX_AXES];
        for (i, c) in seps.chars().enumerate() {
            if !c.is_ascii() {
                return Err(SeparatorError::NonAscii(c));
            }
            let b = c as u8;
            if bytes[..i].contains(&b) {
                return Err(SeparatorError::Duplicate(c));
            }
            bytes[i] = b;
        }
        Ok(Self { bytes, len: count })
    }

    /// Number of separators, i.e. the largest dimensionality that can be
    /// detected.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Separators as bytes, innermost first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Separator of axis level `level` (0 = innermost).
    ///
    /// # Panics
    ///
    /// Panics if `level >= self.len()`.
    pub fn get(&self, level: usize) -> u8 {
        self.as_bytes()[level]
    }
}

impl FromStr for Separators {
    type Err = SeparatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Separators {
    type Error = SeparatorError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl fmt::Debug for Separators {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Separators({:?})", self.to_string())
    }
}

impl fmt::Display for Separators {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.as_bytes()
            .iter()
            .try_for_each(|&b| fmt::Write::write_char(f, char::from(b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid() {
        let seps = Separators::new(",|^").unwrap();
        assert_eq!(seps.len(), 3);
        assert_eq!(seps.as_bytes(), b",|^");
        assert_eq!(seps.get(1), b'|');
        assert_eq!(seps.to_string(), ",|^");
    }

    #[test]
    fn whitespace_separators() {
        let seps: Separators = " \n".parse().unwrap();
        assert_eq!(seps.as_bytes(), b" \n");
    }

    #[test]
    fn invalid() {
        assert_eq!(Separators::new(""), Err(SeparatorError::Empty));
        assert_eq!(Separators::new(",|^;"), Err(SeparatorError::TooMany(4)));
        assert_eq!(Separators::new(",|,"), Err(SeparatorError::Duplicate(',')));
        assert_eq!(Separators::new(",§"), Err(SeparatorError::NonAscii('§')));
    }
}
