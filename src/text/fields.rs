//! Byte-level field splitting that remembers where each field starts.

/// A slice of the file content together with its byte offset in the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Field<'a> {
    pub offset: usize,
    pub bytes: &'a [u8],
}

impl<'a> Field<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { offset: 0, bytes }
    }

    /// Splits on every occurrence of `sep`. Consecutive separators yield
    /// empty fields, and an input without `sep` yields itself once.
    pub(crate) fn split(self, sep: u8) -> Split<'a> {
        Split { rest: Some(self), sep }
    }

    /// The part before the first `sep`, or `None` if `sep` does not occur.
    pub(crate) fn before(self, sep: u8) -> Option<Self> {
        let end = self.bytes.iter().position(|&b| b == sep)?;
        Some(Self { offset: self.offset, bytes: &self.bytes[..end] })
    }

    /// Removes surrounding ASCII whitespace.
    pub(crate) fn trim(self) -> Self {
        let start = self
            .bytes
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(self.bytes.len());
        let end = self
            .bytes
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(start, |i| i + 1);
        Self { offset: self.offset + start, bytes: &self.bytes[start..end] }
    }

    /// Removes trailing ASCII whitespace.
    pub(crate) fn trim_end(self) -> Self {
        let end = self
            .bytes
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(0, |i| i + 1);
        Self { offset: self.offset, bytes: &self.bytes[..end] }
    }
}

pub(crate) struct Split<'a> {
    rest: Option<Field<'a>>,
    sep: u8,
}

impl<'a> Iterator for Split<'a> {
    type Item = Field<'a>;

    fn next(&mut self) -> Option<Field<'a>> {
        let field = self.rest?;
        match field.bytes.iter().position(|&b| b == self.sep) {
            Some(i) => {
                self.rest = Some(Field {
                    offset: field.offset + i + 1,
                    bytes: &field.bytes[i + 1..],
                });
                Some(Field { offset: field.offset, bytes: &field.bytes[..i] })
            }
            None => {
                self.rest = None;
                Some(field)
            }
        }
    }
}

/// 1-based line number of `offset` in `content`.
pub(crate) fn line_of(content: &[u8], offset: usize) -> usize {
    content[..offset.min(content.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(field: Field, sep: u8) -> Vec<usize> {
        field.split(sep).map(|f| f.offset).collect()
    }

    fn pieces(field: Field, sep: u8) -> Vec<&[u8]> {
        field.split(sep).map(|f| f.bytes).collect()
    }

    #[test]
    fn split_tracks_offsets() {
        let field = Field::new(b"1,22,333");
        assert_eq!(offsets(field, b','), [0, 2, 5]);
        assert_eq!(pieces(field, b','), [&b"1"[..], &b"22"[..], &b"333"[..]]);
    }

    #[test]
    fn split_keeps_empty_fields() {
        let field = Field::new(b"1,,2,");
        assert_eq!(offsets(field, b','), [0, 2, 3, 5]);
        assert_eq!(pieces(field, b','), [&b"1"[..], &b""[..], &b"2"[..], &b""[..]]);
    }

    #[test]
    fn nested_split_offsets_are_absolute() {
        let content = b"1,2|3,4";
        let row = Field::new(content).split(b'|').nth(1).unwrap();
        assert_eq!(offsets(row, b','), [4, 6]);
        assert_eq!(pieces(row, b','), [&b"3"[..], &b"4"[..]]);
    }

    #[test]
    fn before() {
        let field = Field::new(b"a,b|c");
        assert_eq!(field.before(b'|').unwrap().bytes, b"a,b");
        assert!(field.before(b'^').is_none());
    }

    #[test]
    fn trim() {
        let field = Field::new(b"  12 \r").trim();
        assert_eq!(field, Field { offset: 2, bytes: b"12" });
        assert_eq!(Field::new(b"   ").trim().bytes, b"");
        assert_eq!(Field::new(b"1,2\n\n").trim_end().bytes, b"1,2");
    }

    #[test]
    fn lines() {
        let content = b"1,2\n3,4\n5,6";
        assert_eq!(line_of(content, 0), 1);
        assert_eq!(line_of(content, 4), 2);
        assert_eq!(line_of(content, 10), 3);
    }
}
