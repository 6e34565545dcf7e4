//! Second pass over the content: tokenize and convert into an allocated array.

use super::{
    elements::{ConvertError, TextElement},
    fields::{line_of, Field, Split},
    separators::Separators,
    ReadTextError,
};
use crate::{array::NdArray, options::IngestOptions, shape::ShapeError};
use thiserror::Error;

/// A token that could not be converted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} in token {token:?} (element {index}, line {line})")]
pub struct TokenError {
    /// What went wrong.
    #[source]
    pub kind: ConvertError,
    /// The offending token, lossily decoded as UTF-8.
    pub token: String,
    /// Row-major position of the element in the backing array.
    pub index: usize,
    /// 1-based line of the token in the input.
    pub line: usize,
}

/// Items along one axis, checked against the axis length.
struct Items<'a> {
    split: Split<'a>,
    content: &'a [u8],
    end: usize,
    axis: usize,
    extent: usize,
    next: usize,
    done: bool,
}

impl<'a> Items<'a> {
    fn new(content: &'a [u8], field: Field<'a>, sep: u8, axis: usize, extent: usize) -> Self {
        Self {
            split: field.split(sep),
            content,
            end: field.offset + field.bytes.len(),
            axis,
            extent,
            next: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for Items<'a> {
    type Item = Result<(usize, Field<'a>), ShapeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let (axis, extent) = (self.axis, self.extent);
        match self.split.next() {
            Some(extra) if self.next == extent => {
                self.done = true;
                let line = line_of(self.content, extra.offset);
                Some(Err(ShapeError::TooManyItems { axis, extent, line }))
            }
            Some(field) => {
                self.next += 1;
                Some(Ok((self.next - 1, field)))
            }
            None if self.next < extent => {
                self.done = true;
                let line = line_of(self.content, self.end);
                Some(Err(ShapeError::TooFewItems { axis, extent, found: self.next, line }))
            }
            None => None,
        }
    }
}

/// Fills `array` from `content` using the same nesting as shape detection:
/// outermost separator first, innermost last.
pub(super) fn fill<T: TextElement>(
    array: &mut NdArray<T>,
    content: Field,
    file: &[u8],
    seps: &Separators,
    options: &IngestOptions,
) -> Result<(), ReadTextError> {
    let shape = *array.shape();
    let extents = shape.extents();
    match shape.ndim() {
        1 => fill_lane(array, &[], content, file, seps, options)?,
        2 => {
            for row in Items::new(file, content, seps.get(1), 0, extents[0]) {
                let (y, row) = row?;
                fill_lane(array, &[y], row, file, seps, options)?;
            }
        }
        3 => {
            for slab in Items::new(file, content, seps.get(2), 0, extents[0]) {
                let (x, slab) = slab?;
                for row in Items::new(file, slab, seps.get(1), 1, extents[1]) {
                    let (y, row) = row?;
                    fill_lane(array, &[x, y], row, file, seps, options)?;
                }
            }
        }
        n => return Err(ShapeError::UnsupportedNdim(n).into()),
    }
    Ok(())
}

/// Converts the items of one innermost lane.
fn fill_lane<T: TextElement>(
    array: &mut NdArray<T>,
    outer: &[usize],
    lane: Field,
    file: &[u8],
    seps: &Separators,
    options: &IngestOptions,
) -> Result<(), ReadTextError> {
    let axis = outer.len();
    let extent = array.shape().inner_extent();
    let start = array
        .lane_offset(outer)
        .ok_or(ShapeError::UnsupportedNdim(array.shape().ndim()))?;
    let data = &mut array.as_mut_slice()[start..start + extent];
    for item in Items::new(file, lane, seps.get(0), axis, extent) {
        let (z, token) = item?;
        let token = if options.trim_whitespace { token.trim() } else { token };
        data[z] = T::parse_token(token.bytes, options).map_err(|kind| {
            let err = TokenError {
                kind,
                token: String::from_utf8_lossy(token.bytes).into_owned(),
                index: start + z,
                line: line_of(file, token.offset),
            };
            tracing::debug!(%err, "conversion failed");
            err
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dtype::NumericType, shape::Shape};

    fn items(content: &str, sep: u8, extent: usize) -> Vec<Result<usize, ShapeError>> {
        let bytes = content.as_bytes();
        Items::new(bytes, Field::new(bytes), sep, 0, extent)
            .map(|item| item.map(|(i, _)| i))
            .collect()
    }

    #[test]
    fn items_exact() {
        assert_eq!(items("1,2,3", b',', 3), [Ok(0), Ok(1), Ok(2)]);
    }

    #[test]
    fn items_too_many() {
        let err = ShapeError::TooManyItems { axis: 0, extent: 2, line: 1 };
        assert_eq!(items("1,2,3", b',', 2), [Ok(0), Ok(1), Err(err)]);
    }

    #[test]
    fn too_many_reports_line_of_extra_item() {
        let err = ShapeError::TooManyItems { axis: 0, extent: 2, line: 2 };
        assert_eq!(items("1,2\n,3,\n\n4", b',', 2), [Ok(0), Ok(1), Err(err)]);
    }

    #[test]
    fn items_too_few() {
        let err = ShapeError::TooFewItems { axis: 0, extent: 4, found: 3, line: 2 };
        assert_eq!(items("1,2\n,3", b',', 4), [Ok(0), Ok(1), Ok(2), Err(err)]);
    }

    #[test]
    fn token_error_reports_line() {
        let file = b"1,2\n3,x\n";
        let shape = Shape::new(NumericType::I32, &[2, 2]).unwrap();
        let mut arr = NdArray::<i32>::allocate(shape).unwrap();
        let seps = Separators::new(",\n").unwrap();
        let content = Field::new(file).trim_end();
        let err = fill(&mut arr, content, file, &seps, &IngestOptions::default()).unwrap_err();
        match err {
            ReadTextError::Token(err) => {
                assert_eq!(err.kind, ConvertError::Malformed);
                assert_eq!(err.token, "x");
                assert_eq!(err.index, 3);
                assert_eq!(err.line, 2);
            }
            err => panic!("unexpected error: {err}"),
        }
    }
}
