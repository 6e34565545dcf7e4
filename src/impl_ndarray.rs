use crate::{read_text_as_with, IngestOptions, NdArray, ReadTextError, TextElement};
use ndarray::{prelude::*, DataOwned};
use std::path::Path;

/// Extension trait for reading `Array` from delimiter-separated text files.
///
/// # Example
///
/// ```
/// use ndarray::Array2;
/// use ndtext::ReadTextExt;
///
/// let arr = Array2::<i32>::read_text("resources/matrix.txt", ",\n")?;
/// assert_eq!(arr, ndarray::array![[1, 2, 3], [4, 5, 6]]);
/// # Ok::<_, ndtext::ReadTextError>(())
/// ```
pub trait ReadTextExt: Sized {
    /// Reads the array from the text file at `path` with default options.
    fn read_text<P: AsRef<Path>>(path: P, seps: &str) -> Result<Self, ReadTextError> {
        Self::read_text_with(path, seps, &IngestOptions::default())
    }

    /// Reads the array from the text file at `path`.
    ///
    /// Fails with [`ReadTextError::WrongNdim`] if the number of axes found in
    /// the file does not match the array's dimension type.
    fn read_text_with<P: AsRef<Path>>(
        path: P,
        seps: &str,
        options: &IngestOptions,
    ) -> Result<Self, ReadTextError>;
}

impl<A, S, D> ReadTextExt for ArrayBase<S, D>
where
    A: TextElement,
    S: DataOwned<Elem = A>,
    D: Dimension,
{
    fn read_text_with<P: AsRef<Path>>(
        path: P,
        seps: &str,
        options: &IngestOptions,
    ) -> Result<Self, ReadTextError> {
        let arr = read_text_as_with::<A, _>(path, seps, options)?;
        let ndim = arr.shape().ndim();
        let shape = IxDyn(arr.shape().extents());
        ArrayBase::from_shape_vec(shape, arr.into_vec())
            .expect("backing array matches its shape")
            .into_dimensionality()
            .map_err(|_| ReadTextError::WrongNdim(D::NDIM, ndim))
    }
}

impl<T> NdArray<T> {
    /// Converts into a dynamic-dimensional `ndarray` array without copying.
    ///
    /// A released array becomes an empty 1-D array.
    pub fn into_ndarray(self) -> ArrayD<T> {
        let shape = if self.is_released() {
            IxDyn(&[0])
        } else {
            IxDyn(self.shape().extents())
        };
        ArrayD::from_shape_vec(shape, self.into_vec()).expect("backing array matches its shape")
    }

    /// Borrows the backing array as a dynamic-dimensional view.
    ///
    /// Returns `None` once the array is released.
    pub fn view(&self) -> Option<ArrayViewD<'_, T>> {
        if self.is_released() {
            return None;
        }
        ArrayViewD::from_shape(IxDyn(self.shape().extents()), self.as_slice()).ok()
    }
}
