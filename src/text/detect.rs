use super::{fields::Field, separators::Separators};
use crate::{
    dtype::NumericType,
    shape::{Shape, ShapeError},
};

/// Counts how many separators occur in order.
///
/// Separator `k` is only looked for after separators `0..k` have each been
/// seen once, and scanning stops as soon as every separator was found. This is
/// a presence test, not a grammar check: `"1|2,3|4"` with `",|"` reports two
/// axes because a `|` follows the first `,`.
pub fn count_axes(content: &[u8], seps: &Separators) -> usize {
    let seps = seps.as_bytes();
    let mut found = 0;
    for &b in content {
        if found == seps.len() {
            break;
        }
        if b == seps[found] {
            found += 1;
        }
    }
    found
}

/// Detects the dimensionality and axis lengths of `content`.
///
/// The content is used as-is: no whitespace is trimmed. Each axis length is
/// measured on the first run of that axis (the first row, the first slab),
/// and the outermost length on the whole content.
///
/// # Example
///
/// ```
/// use ndtext::{detect_shape, NumericType, Separators};
///
/// let seps = Separators::new(",|^")?;
/// let shape = detect_shape(b"1,2,3|4,5,6^7,8,9|1,2,3", &seps, NumericType::U8)?;
/// assert_eq!(shape.extents(), [2, 2, 3]);
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub fn detect_shape(
    content: &[u8],
    seps: &Separators,
    numeric_type: NumericType,
) -> Result<Shape, ShapeError> {
    let ndim = count_axes(content, seps);
    tracing::debug!(ndim, "detected dimensionality");
    let content = Field::new(content);
    // `count_axes` has seen every separator below `ndim`, so the prefix exists
    let isolate = |level: usize| content.before(seps.get(level)).unwrap_or(content);
    let count = |field: Field, level: usize| field.split(seps.get(level)).count();
    let shape = match ndim {
        0 => return Err(ShapeError::NoSeparator),
        1 => Shape::new(numeric_type, &[count(content, 0)])?,
        2 => {
            let cols = count(isolate(1), 0);
            let rows = count(content, 1);
            Shape::new(numeric_type, &[rows, cols])?
        }
        3 => {
            let z = count(isolate(1), 0);
            let y = count(isolate(2), 1);
            let x = count(content, 2);
            Shape::new(numeric_type, &[x, y, z])?
        }
        n => return Err(ShapeError::UnsupportedNdim(n)),
    };
    tracing::debug!(extents = ?shape.extents(), "detected axis lengths");
    Ok(shape)
}
