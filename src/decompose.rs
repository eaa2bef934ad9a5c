//! Splitting element text into prefix, numeric body and suffix.

/// The three positional pieces of a counter's original text.
///
/// `prefix` holds every character before the first ASCII digit, `number`
/// the digit run being animated, and `suffix` everything else. The original
/// text is always `prefix` + interleaved digits/suffix characters; joining
/// the pieces back is only lossless when the digit run is contiguous.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecomposedText {
    /// Characters before the first digit
    pub prefix: String,
    /// The digit run, kept as the whole-number target magnitude
    pub number: String,
    /// Non-digit characters after the first digit
    pub suffix: String,
}

impl DecomposedText {
    /// Whether the text contained any digits at all.
    #[inline]
    pub fn has_number(&self) -> bool {
        !self.number.is_empty()
    }

    /// The numeric body parsed as a whole number.
    ///
    /// Returns `None` when the text had no digits or the run overflows.
    pub fn magnitude(&self) -> Option<u64> {
        self.number.parse().ok()
    }
}

/// Decompose raw text into [`DecomposedText`].
///
/// Scans left to right. Before the first digit every character accumulates
/// into the prefix. From the first digit on, digits join the numeric body
/// and non-digits the suffix; the scan never re-enters prefix mode. A digit
/// separated from the run by punctuation still joins the body, so grouped
/// numbers collapse: `"1,000"` yields number `"1000"` and suffix `","`.
///
/// ## Example
///
/// ```rust
/// use countup_view::decompose;
///
/// let parts = decompose("Users: 100+");
/// assert_eq!(parts.prefix, "Users: ");
/// assert_eq!(parts.number, "100");
/// assert_eq!(parts.suffix, "+");
/// ```
pub fn decompose(text: &str) -> DecomposedText {
    let mut parts = DecomposedText::default();

    for ch in text.chars() {
        if ch.is_ascii_digit() {
            parts.number.push(ch);
        } else if parts.number.is_empty() {
            parts.prefix.push(ch);
        } else {
            parts.suffix.push(ch);
        }
    }

    parts
}
