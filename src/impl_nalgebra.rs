use crate::NdArray;
use nalgebra::{DMatrix, DVector, Scalar};

impl<T: Scalar + Copy> NdArray<T> {
    /// Copies a 1- or 2-axis array into a matrix.
    ///
    /// A 1-axis array becomes a single row. Returns `None` for 3 axes or once
    /// the array is released.
    pub fn to_dmatrix(&self) -> Option<DMatrix<T>> {
        if self.is_released() {
            return None;
        }
        match *self.shape().extents() {
            [cols] => Some(DMatrix::from_row_slice(1, cols, self.as_slice())),
            [rows, cols] => Some(DMatrix::from_row_slice(rows, cols, self.as_slice())),
            _ => None,
        }
    }

    /// Copies a 1-axis array into a column vector.
    ///
    /// Returns `None` for more than one axis or once the array is released.
    pub fn to_dvector(&self) -> Option<DVector<T>> {
        if self.is_released() || self.shape().ndim() != 1 {
            return None;
        }
        Some(DVector::from_column_slice(self.as_slice()))
    }
}
