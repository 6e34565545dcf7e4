//! Owned n-dimensional array backed by a single contiguous allocation.
//!
//! Besides the flat backing array, an [`NdArray`] with more than one axis
//! keeps one *index table* per non-innermost axis. Entry `i` of the table for
//! axis `a` is the position, in the next level down, of the `i`-th run along
//! axis `a` (counted over all outer positions). The last table therefore maps
//! every innermost lane to its offset in the backing array:
//!
//! ```text
//! 3 axes [X, Y, Z]:
//!   table 0 (X slots):      x         -> x * Y        (position in table 1)
//!   table 1 (X * Y slots):  x * Y + y -> (x * Y + y) * Z (offset in data)
//!   data    (X * Y * Z):    offset + z
//! ```
//!
//! Building performs exactly one allocation per axis, outermost first, and
//! teardown releases the tables before the backing array.

use crate::{
    dtype::NumericType,
    shape::Shape,
    text::{TextElement, MAX_AXES},
};
use std::{collections::TryReserveError, io, mem};
use thiserror::Error;

/// Failure to allocate an array.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AllocError {
    /// The number of elements or the size in bytes overflows `isize`.
    #[error("overflow computing length from shape")]
    LengthOverflow,
    /// The allocator could not provide the memory.
    #[error("could not allocate {elements} elements of {elem_size} bytes")]
    OutOfMemory {
        /// Requested number of elements.
        elements: usize,
        /// Size of one element in bytes.
        elem_size: usize,
        /// Reason reported by the allocator.
        #[source]
        source: TryReserveError,
    },
}

/// Allocates a vector of exactly `len` copies of `value`, or reports failure.
fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>, AllocError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|source| AllocError::OutOfMemory {
            elements: len,
            elem_size: mem::size_of::<T>(),
            source,
        })?;
    v.resize(len, value);
    Ok(v)
}

/// An owned array of 1 to 3 axes, stored row-major in one contiguous buffer.
///
/// Dropping the array releases it; [`NdArray::release`] does the same
/// explicitly and leaves an empty, released handle behind.
///
/// A handle may be sent to another thread, but building and releasing one
/// handle happen through `&mut self` and are never shared between threads.
pub struct NdArray<T> {
    shape: Shape,
    /// Index tables, outermost first; only `ndim - 1` are used.
    tables: [Vec<usize>; MAX_AXES - 1],
    data: Vec<T>,
    released: bool,
}

impl<T: Copy + Default> NdArray<T> {
    /// Allocates a zero-filled array of `shape`.
    ///
    /// The element type of `shape` must describe `T`.
    ///
    /// If an allocation fails, everything allocated so far is freed before the
    /// error is returned.
    pub fn allocate(shape: Shape) -> Result<Self, AllocError> {
        debug_assert_eq!(shape.numeric_type().element_size(), mem::size_of::<T>());
        shape.byte_len_checked().ok_or(AllocError::LengthOverflow)?;
        let extents = shape.extents();
        let inner = extents.len() - 1;
        let mut tables: [Vec<usize>; MAX_AXES - 1] = Default::default();
        let mut outer = 1;
        for (axis, table) in tables.iter_mut().enumerate().take(inner) {
            let slots = outer * extents[axis];
            let stride = extents[axis + 1];
            *table = try_filled(slots, 0)?;
            table
                .iter_mut()
                .enumerate()
                .for_each(|(i, slot)| *slot = i * stride);
            tracing::debug!(axis, slots, "allocated index table");
            outer = slots;
        }
        let data = try_filled(outer * extents[inner], T::default())?;
        tracing::debug!(elements = data.len(), "allocated backing array");
        Ok(Self { shape, tables, data, released: false })
    }
}

impl<T> NdArray<T> {
    /// Shape of the array. Still available after release.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of elements currently held (zero once released).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no elements are held.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether [`Self::release`] has been called.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// The backing array in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The backing array in row-major order.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Offset in the backing array of the innermost lane at `outer`, walking
    /// the index tables. `outer` holds one index per non-innermost axis.
    pub(crate) fn lane_offset(&self, outer: &[usize]) -> Option<usize> {
        let extents = self.shape.extents();
        if self.released || outer.len() + 1 != extents.len() {
            return None;
        }
        let mut pos = 0;
        for (axis, &i) in outer.iter().enumerate() {
            if i >= extents[axis] {
                return None;
            }
            pos = self.tables[axis][pos + i];
        }
        Some(pos)
    }

    /// The contiguous innermost lane at `outer` (one index per outer axis).
    ///
    /// For a 1-axis array, `lane(&[])` is the whole array.
    pub fn lane(&self, outer: &[usize]) -> Option<&[T]> {
        let start = self.lane_offset(outer)?;
        self.data.get(start..start + self.shape.inner_extent())
    }

    /// Mutable version of [`Self::lane`].
    pub fn lane_mut(&mut self, outer: &[usize]) -> Option<&mut [T]> {
        let start = self.lane_offset(outer)?;
        let end = start + self.shape.inner_extent();
        self.data.get_mut(start..end)
    }

    /// Iterates over all innermost lanes in row-major order.
    pub fn lanes(&self) -> impl Iterator<Item = &[T]> + '_ {
        let inner = self.shape.inner_extent();
        let offsets: &[usize] = match self.shape.ndim() {
            _ if self.released => &[],
            1 => &[0],
            n => self.tables[n - 2].as_slice(),
        };
        offsets.iter().map(move |&start| &self.data[start..start + inner])
    }

    /// The element at `index` (one index per axis, outermost first).
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        let (&last, outer) = index.split_last()?;
        if last >= self.shape.inner_extent() {
            return None;
        }
        self.data.get(self.lane_offset(outer)? + last)
    }

    /// Mutable version of [`Self::get`].
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        let (&last, outer) = index.split_last()?;
        if last >= self.shape.inner_extent() {
            return None;
        }
        let pos = self.lane_offset(outer)? + last;
        self.data.get_mut(pos)
    }

    /// Releases the index tables, then the backing array.
    ///
    /// Calling this again on a released array does nothing.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        for table in self.tables.iter_mut().rev() {
            drop(mem::take(table));
        }
        drop(mem::take(&mut self.data));
        self.released = true;
        tracing::debug!(shape = %self.shape, "released array");
    }

    /// Consumes the array, returning the backing array in row-major order.
    ///
    /// The index tables are released first. A released array yields an empty
    /// vector.
    pub fn into_vec(mut self) -> Vec<T> {
        for table in self.tables.iter_mut().rev() {
            drop(mem::take(table));
        }
        let data = mem::take(&mut self.data);
        self.released = true;
        data
    }
}

impl<T: TextElement> NdArray<T> {
    /// Writes the backing array as little-endian bytes in row-major order.
    ///
    /// # Example
    ///
    /// ```
    /// use ndtext::read_text_as;
    ///
    /// let arr = read_text_as::<u16, _>("resources/matrix.txt", ",\n")?;
    /// let mut raw = Vec::new();
    /// arr.write_raw(&mut raw)?;
    /// assert_eq!(raw.len(), arr.len() * 2);
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn write_raw<W: io::Write>(&self, writer: W) -> io::Result<()> {
        T::write_slice(&self.data, writer)
    }
}

impl<T> Drop for NdArray<T> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for NdArray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("NdArray")
            .field("shape", &self.shape)
            .field("released", &self.released)
            .field("data", &self.data)
            .finish()
    }
}

/// An [`NdArray`] of any supported element type.
///
/// Returned by [`read_text`](crate::read_text), where the element type is
/// only known at run time. `longdouble` data is held as `f64`.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyArray {
    /// `uint8`
    U8(NdArray<u8>),
    /// `uint16`
    U16(NdArray<u16>),
    /// `uint32`
    U32(NdArray<u32>),
    /// `uint64`
    U64(NdArray<u64>),
    /// `int8`
    I8(NdArray<i8>),
    /// `int16`
    I16(NdArray<i16>),
    /// `int32`
    I32(NdArray<i32>),
    /// `int64`
    I64(NdArray<i64>),
    /// `float`
    F32(NdArray<f32>),
    /// `double`
    F64(NdArray<f64>),
    /// `longdouble`
    LongDouble(NdArray<f64>),
}

macro_rules! for_each_variant {
    ($self:expr, $arr:ident => $body:expr) => {
        match $self {
            AnyArray::U8($arr) => $body,
            AnyArray::U16($arr) => $body,
            AnyArray::U32($arr) => $body,
            AnyArray::U64($arr) => $body,
            AnyArray::I8($arr) => $body,
            AnyArray::I16($arr) => $body,
            AnyArray::I32($arr) => $body,
            AnyArray::I64($arr) => $body,
            AnyArray::F32($arr) => $body,
            AnyArray::F64($arr) => $body,
            AnyArray::LongDouble($arr) => $body,
        }
    };
}

macro_rules! typed_accessors {
    ($($name:ident, $name_mut:ident => $elem:ty, $($variant:ident)|+;)+) => {$(
        #[doc = concat!("The array if it holds `", stringify!($elem), "` elements.")]
        pub fn $name(&self) -> Option<&NdArray<$elem>> {
            match self {
                $(Self::$variant(arr))|+ => Some(arr),
                _ => None,
            }
        }

        #[doc = concat!("The array if it holds `", stringify!($elem), "` elements.")]
        pub fn $name_mut(&mut self) -> Option<&mut NdArray<$elem>> {
            match self {
                $(Self::$variant(arr))|+ => Some(arr),
                _ => None,
            }
        }
    )+};
}

impl AnyArray {
    /// Shape of the array.
    pub fn shape(&self) -> &Shape {
        for_each_variant!(self, arr => arr.shape())
    }

    /// Element type of the array.
    pub fn numeric_type(&self) -> NumericType {
        self.shape().numeric_type()
    }

    /// Releases the array; see [`NdArray::release`].
    pub fn release(&mut self) {
        for_each_variant!(self, arr => arr.release());
    }

    /// Whether the array has been released.
    pub fn is_released(&self) -> bool {
        for_each_variant!(self, arr => arr.is_released())
    }

    /// Writes the backing array as little-endian bytes; see
    /// [`NdArray::write_raw`].
    pub fn write_raw<W: io::Write>(&self, writer: W) -> io::Result<()> {
        for_each_variant!(self, arr => arr.write_raw(writer))
    }

    typed_accessors! {
        as_u8, as_u8_mut => u8, U8;
        as_u16, as_u16_mut => u16, U16;
        as_u32, as_u32_mut => u32, U32;
        as_u64, as_u64_mut => u64, U64;
        as_i8, as_i8_mut => i8, I8;
        as_i16, as_i16_mut => i16, I16;
        as_i32, as_i32_mut => i32, I32;
        as_i64, as_i64_mut => i64, I64;
        as_f32, as_f32_mut => f32, F32;
        as_f64, as_f64_mut => f64, F64 | LongDouble;
    }
}
