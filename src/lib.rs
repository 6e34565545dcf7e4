#![doc = include_str!("../README.md")]
//! ## Read Text Files
//!
//! - Element type known at compile time
//!   - [`read_text_as`] / [`read_text_as_with`] from a file
//!   - [`parse_text_as`] from memory
//! - Element type chosen at run time ([`NumericType`], e.g. parsed from
//!   `"int32"`)
//!   - [`read_text`] / [`read_text_with`] from a file
//!   - [`parse_text`] from memory
//! - With the `ndarray` feature, the [`ReadTextExt`] extension trait
//!
//! ## Layout Detection
//!
//! - [`count_axes`] counts the separators that occur in order
//! - [`detect_shape`] measures the axis lengths
//!
//! ## Arrays
//!
//! [`NdArray`] owns one contiguous row-major buffer plus one index table per
//! outer axis. [`AnyArray`] wraps the eleven element types. Dropping either
//! releases it; [`NdArray::release`] does so explicitly and may be called
//! repeatedly.
//!
//! ## Limitations
//!
//! - At most 3 axes; data must not be ragged.
//! - Numbers are parsed independently of the locale.
//! - `longdouble` data is held as `f64`.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs)]

mod array;
mod dtype;
mod options;
mod shape;
mod text;

#[cfg(feature = "nalgebra")]
mod impl_nalgebra;
#[cfg(feature = "ndarray")]
mod impl_ndarray;

#[cfg(feature = "ndarray")]
pub use crate::impl_ndarray::ReadTextExt;
pub use crate::{
    array::{AllocError, AnyArray, NdArray},
    dtype::{NumericType, ParseNumericTypeError},
    options::{BoundaryPolicy, IngestOptions, IntegerRadix},
    shape::{Shape, ShapeError},
    text::{
        count_axes, detect_shape, parse_text, parse_text_as, read_text, read_text_as,
        read_text_as_with, read_text_with, ConvertError, ReadTextError, SeparatorError,
        Separators, TextElement, TokenError, MAX_AXES,
    },
};
