use crate::{dtype::NumericType, text::MAX_AXES};
use std::fmt;
use thiserror::Error;

/// A structural problem with the input or with a requested shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShapeError {
    /// None of the separators occurs in the input, so there is no usable data.
    #[error("no separator found in the input")]
    NoSeparator,
    /// Dimensionality outside `1..=3`.
    #[error("unsupported dimensionality {0}; expected 1 to 3 axes")]
    UnsupportedNdim(usize),
    /// An axis has zero length.
    #[error("axis {axis} has zero length")]
    ZeroExtent {
        /// Axis index (0 = outermost).
        axis: usize,
    },
    /// An axis holds more items than the length detected for it.
    #[error("axis {axis} has length {extent} but holds more items (line {line})")]
    TooManyItems {
        /// Axis index (0 = outermost).
        axis: usize,
        /// Detected length of the axis.
        extent: usize,
        /// Line of the first extra item.
        line: usize,
    },
    /// An axis holds fewer items than the length detected for it.
    #[error("axis {axis} has length {extent} but holds only {found} items (line {line})")]
    TooFewItems {
        /// Axis index (0 = outermost).
        axis: usize,
        /// Detected length of the axis.
        extent: usize,
        /// Number of items found.
        found: usize,
        /// Line where the short run ends.
        line: usize,
    },
}

/// Element type, dimensionality and axis lengths of an array.
///
/// Axis lengths are stored outermost first: a 3-axis shape is `[x, y, z]`
/// where `z` is the contiguous (innermost) axis. Unused trailing lengths are
/// zero and are not part of [`Shape::extents`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    numeric_type: NumericType,
    ndim: usize,
    extents: [usize; MAX_AXES],
}

impl Shape {
    /// Creates a shape with 1 to 3 nonzero axis lengths, outermost first.
    pub fn new(numeric_type: NumericType, extents: &[usize]) -> Result<Self, ShapeError> {
        if extents.is_empty() || extents.len() > MAX_AXES {
            return Err(ShapeError::UnsupportedNdim(extents.len()));
        }
        if let Some(axis) = extents.iter().position(|&n| n == 0) {
            return Err(ShapeError::ZeroExtent { axis });
        }
        let mut buf = [0; MAX_AXES];
        buf[..extents.len()].copy_from_slice(extents);
        Ok(Self { numeric_type, ndim: extents.len(), extents: buf })
    }

    /// Element type.
    pub fn numeric_type(&self) -> NumericType {
        self.numeric_type
    }

    /// Number of axes (1, 2 or 3).
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Axis lengths, outermost first.
    pub fn extents(&self) -> &[usize] {
        &self.extents[..self.ndim]
    }

    /// Length of the innermost axis.
    pub fn inner_extent(&self) -> usize {
        self.extents[self.ndim - 1]
    }

    /// Total number of elements, or `None` on overflow.
    pub fn len_checked(&self) -> Option<usize> {
        self.extents().iter().try_fold(1usize, |acc, &n| acc.checked_mul(n))
    }

    /// Total number of elements.
    ///
    /// # Panics
    ///
    /// Panics if the product of the axis lengths overflows `usize`.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len_checked().expect("overflow computing number of elements")
    }

    /// Size of the element data in bytes, or `None` if it would exceed
    /// `isize::MAX`.
    pub fn byte_len_checked(&self) -> Option<usize> {
        const MAX: usize = isize::MAX as usize;
        let bytes = self.len_checked()?.checked_mul(self.numeric_type.element_size())?;
        (bytes <= MAX).then_some(bytes)
    }

    /// Row-major strides in elements, outermost first.
    pub fn strides(&self) -> [usize; MAX_AXES] {
        let mut strides = [0; MAX_AXES];
        let mut acc = 1;
        for axis in (0..self.ndim).rev() {
            strides[axis] = acc;
            acc *= self.extents[axis];
        }
        strides
    }

    /// Row-major position of `index` in the backing array, e.g.
    /// `x * (Y * Z) + y * Z + z` for three axes. Returns `None` if `index` has
    /// the wrong number of axes or is out of bounds.
    pub fn flat_index(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.ndim {
            return None;
        }
        let strides = self.strides();
        index
            .iter()
            .zip(self.extents())
            .zip(strides)
            .try_fold(0, |acc, ((&i, &n), stride)| (i < n).then(|| acc + i * stride))
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Shape")
            .field("numeric_type", &self.numeric_type)
            .field("extents", &self.extents())
            .finish()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.numeric_type)?;
        for (i, n) in self.extents().iter().enumerate() {
            write!(f, "{}{n}", if i == 0 { '[' } else { '×' })?;
        }
        f.write_str("]")
    }
}
