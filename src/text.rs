mod detect;
mod elements;
mod fields;
mod fill;
mod separators;

pub use self::{
    detect::{count_axes, detect_shape},
    elements::{ConvertError, TextElement},
    fill::TokenError,
    separators::{SeparatorError, Separators, MAX_AXES},
};
use self::fields::Field;
use crate::{
    array::{AllocError, AnyArray, NdArray},
    dtype::NumericType,
    options::IngestOptions,
    shape::ShapeError,
};
use std::{
    fs,
    io::{self, Read as _},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// An error reading a delimiter-separated text file into an array.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReadTextError {
    /// The file could not be opened, inspected or read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The path exists but is not a regular file.
    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),
    /// The separator list is invalid.
    #[error("invalid separators: {0}")]
    Separator(#[from] SeparatorError),
    /// The content does not describe a 1 to 3 axis array.
    #[error("invalid layout: {0}")]
    Shape(#[from] ShapeError),
    /// The file buffer or the array could not be allocated.
    #[error("allocation failed: {0}")]
    Alloc(#[from] AllocError),
    /// A token could not be converted to the element type.
    #[error("conversion failed: {0}")]
    Token(#[from] TokenError),
    /// The detected number of axes does not match the requested `Dimension`.
    #[cfg(feature = "ndarray")]
    #[error("ndim {1} of array did not match Dimension type with NDIM = {0:?}")]
    WrongNdim(Option<usize>, usize),
}

/// Reads the whole regular file at `path` into memory.
fn read_file(path: &Path) -> Result<Vec<u8>, ReadTextError> {
    let mut file = fs::File::open(path)?;
    let meta = file.metadata()?;
    if !meta.is_file() {
        return Err(ReadTextError::NotAFile(path.to_path_buf()));
    }
    let len = usize::try_from(meta.len()).map_err(|_| AllocError::LengthOverflow)?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|source| AllocError::OutOfMemory { elements: len, elem_size: 1, source })?;
    file.read_to_end(&mut buf)?;
    tracing::debug!(path = %path.display(), bytes = buf.len(), "read file");
    Ok(buf)
}

/// Builds a typed array from in-memory content.
fn parse_typed<T: TextElement>(
    content: &[u8],
    seps: &str,
    numeric_type: NumericType,
    options: &IngestOptions,
) -> Result<NdArray<T>, ReadTextError> {
    let seps = Separators::new(seps).map_err(|err| match err {
        SeparatorError::TooMany(n) => ReadTextError::Shape(ShapeError::UnsupportedNdim(n)),
        err => err.into(),
    })?;
    let field = if options.trim_whitespace {
        Field::new(content).trim_end()
    } else {
        Field::new(content)
    };
    let shape = detect_shape(field.bytes, &seps, numeric_type)?;
    let mut array = NdArray::allocate(shape)?;
    // On error `array` is dropped here, which releases it
    fill::fill(&mut array, field, content, &seps, options)?;
    tracing::debug!(%shape, "ingested array");
    Ok(array)
}

/// Parses delimiter-separated numeric text into an array of element type `T`.
///
/// `seps` lists 1 to 3 separators, innermost axis first. The number of axes
/// is the number of separators found in order (see [`count_axes`]).
///
/// # Example
///
/// ```
/// use ndtext::{parse_text_as, IngestOptions};
///
/// let arr = parse_text_as::<i32>(b"1,2|3,4", ",|", &IngestOptions::default())?;
/// assert_eq!(arr.shape().extents(), [2, 2]);
/// assert_eq!(arr.lane(&[1]), Some(&[3, 4][..]));
/// # Ok::<_, ndtext::ReadTextError>(())
/// ```
pub fn parse_text_as<T: TextElement>(
    content: &[u8],
    seps: &str,
    options: &IngestOptions,
) -> Result<NdArray<T>, ReadTextError> {
    parse_typed(content, seps, T::NUMERIC_TYPE, options)
}

/// Parses delimiter-separated numeric text into an array whose element type
/// is chosen at run time.
pub fn parse_text(
    content: &[u8],
    seps: &str,
    numeric_type: NumericType,
    options: &IngestOptions,
) -> Result<AnyArray, ReadTextError> {
    use NumericType as Ty;
    let ty = numeric_type;
    Ok(match ty {
        Ty::U8 => AnyArray::U8(parse_typed(content, seps, ty, options)?),
        Ty::U16 => AnyArray::U16(parse_typed(content, seps, ty, options)?),
        Ty::U32 => AnyArray::U32(parse_typed(content, seps, ty, options)?),
        Ty::U64 => AnyArray::U64(parse_typed(content, seps, ty, options)?),
        Ty::I8 => AnyArray::I8(parse_typed(content, seps, ty, options)?),
        Ty::I16 => AnyArray::I16(parse_typed(content, seps, ty, options)?),
        Ty::I32 => AnyArray::I32(parse_typed(content, seps, ty, options)?),
        Ty::I64 => AnyArray::I64(parse_typed(content, seps, ty, options)?),
        Ty::F32 => AnyArray::F32(parse_typed(content, seps, ty, options)?),
        Ty::F64 => AnyArray::F64(parse_typed(content, seps, ty, options)?),
        Ty::LongDouble => AnyArray::LongDouble(parse_typed(content, seps, ty, options)?),
    })
}

/// Reads the file at `path` into an array of element type `T`.
///
/// This is a convenience function for [`read_text_as_with`] with default
/// options.
///
/// # Example
///
/// ```
/// use ndtext::read_text_as;
///
/// let arr = read_text_as::<f64, _>("resources/cube.txt", ",|\n")?;
/// assert_eq!(arr.shape().extents(), [2, 2, 3]);
/// assert_eq!(arr.get(&[1, 0, 2]), Some(&9.5));
/// # Ok::<_, ndtext::ReadTextError>(())
/// ```
pub fn read_text_as<T, P>(path: P, seps: &str) -> Result<NdArray<T>, ReadTextError>
where
    T: TextElement,
    P: AsRef<Path>,
{
    read_text_as_with(path, seps, &IngestOptions::default())
}

/// Reads the file at `path` into an array of element type `T`.
pub fn read_text_as_with<T, P>(
    path: P,
    seps: &str,
    options: &IngestOptions,
) -> Result<NdArray<T>, ReadTextError>
where
    T: TextElement,
    P: AsRef<Path>,
{
    let content = read_file(path.as_ref())?;
    parse_text_as(&content, seps, options)
}

/// Reads the file at `path` into an array whose element type is chosen at
/// run time, e.g. from a `--dtype` flag.
///
/// The whole file is loaded into memory, its shape is detected, the array is
/// allocated, and every token is converted. Any failure releases everything
/// allocated so far.
///
/// # Example
///
/// ```
/// use ndtext::{read_text, NumericType};
///
/// let ty: NumericType = "uint8".parse()?;
/// let arr = read_text("resources/vector.txt", ",", ty)?;
/// assert_eq!(arr.shape().extents(), [5]);
/// assert_eq!(arr.as_u8().unwrap().as_slice(), [3, 1, 4, 1, 5]);
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub fn read_text<P: AsRef<Path>>(
    path: P,
    seps: &str,
    numeric_type: NumericType,
) -> Result<AnyArray, ReadTextError> {
    read_text_with(path, seps, numeric_type, &IngestOptions::default())
}

/// Reads the file at `path` into an array whose element type is chosen at
/// run time.
pub fn read_text_with<P: AsRef<Path>>(
    path: P,
    seps: &str,
    numeric_type: NumericType,
    options: &IngestOptions,
) -> Result<AnyArray, ReadTextError> {
    let content = read_file(path.as_ref())?;
    parse_text(&content, seps, numeric_type, options)
}
