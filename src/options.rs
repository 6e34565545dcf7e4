/// How integer tokens equal to the type's minimum or maximum are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// A value equal to `T::MIN` or `T::MAX` is reported as
    /// [`ConvertError::Saturated`](crate::ConvertError::Saturated), even when
    /// the text spells that exact value.
    #[default]
    Reject,
    /// Boundary values are accepted; only values that do not fit are errors.
    Accept,
}

/// Radix used for integer tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegerRadix {
    /// `0x`/`0X` prefix is hexadecimal, a leading `0` is octal, anything else
    /// is decimal. A sign may precede the prefix.
    #[default]
    Auto,
    /// Base 10 only; `010` is ten and `0x10` is malformed.
    Decimal,
}

/// Options for reading a text file.
///
/// # Example
///
/// ```
/// use ndtext::{BoundaryPolicy, IngestOptions, IntegerRadix};
///
/// let opts = IngestOptions::default()
///     .boundary(BoundaryPolicy::Accept)
///     .radix(IntegerRadix::Decimal);
/// assert!(opts.trim_whitespace);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IngestOptions {
    /// Integer boundary handling.
    pub boundary: BoundaryPolicy,
    /// Integer radix handling.
    pub radix: IntegerRadix,
    /// Strip ASCII whitespace around every token and at the end of the file.
    pub trim_whitespace: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            boundary: BoundaryPolicy::default(),
            radix: IntegerRadix::default(),
            trim_whitespace: true,
        }
    }
}

impl IngestOptions {
    /// Sets [`Self::boundary`].
    pub fn boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    /// Sets [`Self::radix`].
    pub fn radix(mut self, radix: IntegerRadix) -> Self {
        self.radix = radix;
        self
    }

    /// Sets [`Self::trim_whitespace`].
    pub fn trim_whitespace(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }
}
