use std::error::Error;
use std::fmt::Display;
use std::ops::Range;

/// Half-open byte range into a single line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    lo: u32,
    hi: u32,
}

impl Span {
    #[must_use]
    #[inline]
    pub const fn new(lo: u32, hi: u32) -> Self {
        if hi < lo {
            Self { lo: hi, hi: lo }
        } else {
            Self { lo, hi }
        }
    }

    /// Span of `lexeme` inside `input`, see [`lexeme_offsets`].
    #[must_use]
    pub fn of(lexeme: &str, input: &str) -> Option<Self> {
        let (lo, hi) = lexeme_offsets(lexeme, input)?;
        let lo = u32::try_from(lo).ok()?;
        let hi = u32::try_from(hi).ok()?;
        Some(Self::new(lo, hi))
    }

    #[must_use]
    #[inline]
    pub const fn len(self) -> u32 {
        self.hi - self.lo
    }

    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[must_use]
    #[inline]
    pub fn join(self, other: Self) -> Self {
        let lo = std::cmp::min(self.lo, other.lo);
        let hi = std::cmp::max(self.hi, other.hi);

        Self::new(lo, hi)
    }

    #[must_use]
    #[inline]
    pub const fn lo(self) -> u32 {
        self.lo
    }

    #[must_use]
    #[inline]
    pub const fn hi(self) -> u32 {
        self.hi
    }

    /// The text this span covers, `None` if it does not fit `src`.
    #[must_use]
    pub fn slice(self, src: &str) -> Option<&str> {
        src.get(Range::from(self))
    }
}

impl From<Span> for Range<usize> {
    fn from(value: Span) -> Self {
        value.lo as usize..value.hi as usize
    }
}

/// Byte offsets `(begin, end)` of `lexeme` within `input`.
///
/// `lexeme` must be a view borrowed from `input` itself, not an equal string
/// stored elsewhere: the offsets come from the position of its first byte.
/// Returns `None` when the view starts outside of `input` or runs past its
/// end. An empty `input` only holds the empty lexeme, at `(0, 0)`.
#[must_use]
pub fn lexeme_offsets(lexeme: &str, input: &str) -> Option<(usize, usize)> {
    if input.is_empty() {
        return lexeme.is_empty().then_some((0, 0));
    }

    let base = input.as_ptr() as usize;
    let begin = (lexeme.as_ptr() as usize).checked_sub(base)?;
    if begin >= input.len() {
        return None;
    }

    let end = begin + lexeme.len();
    if end > input.len() {
        return None;
    }

    Some((begin, end))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spand<T> {
    pub kind: T,
    pub span: Span,
}

impl<T: Display> Display for Spand<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.kind(), f)
    }
}

impl<T: Error> Error for Spand<T> {}

impl<T> Spand<T> {
    #[inline]
    pub const fn new(kind: T, span: Span) -> Self {
        Self { kind, span }
    }

    #[inline]
    pub const fn kind(&self) -> &T {
        &self.kind
    }

    /// The source text this value was produced from, empty for synthetic
    /// values whose span lies outside of `input`.
    #[must_use]
    pub fn lexeme<'i>(&self, input: &'i str) -> &'i str {
        self.span.slice(input).unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn offsets_slice_back_to_lexeme() {
        let input = "12 + (345 * 6)";
        for (begin, end) in [(0, 2), (3, 4), (5, 6), (6, 9), (13, 14)] {
            let lexeme = &input[begin..end];
            let offsets = lexeme_offsets(lexeme, input).unwrap();
            assert_eq!(offsets, (begin, end));
            assert_eq!(&input[offsets.0..offsets.1], lexeme);
        }
    }

    #[test]
    fn offsets_reject_foreign_view() {
        let input = String::from("1 + 2");
        let other = String::from("1 + 2");
        assert_eq!(lexeme_offsets(&other[0..1], &input), None);
    }

    #[test]
    fn offsets_of_empty_input() {
        assert_eq!(lexeme_offsets("", ""), Some((0, 0)));

        let other = String::from("12");
        assert_eq!(lexeme_offsets(&other, ""), None);
        assert_eq!(Span::of(&other, ""), None);
    }

    #[test]
    fn span_of_lexeme() {
        let input = "(1 + 23)";
        let span = Span::of(&input[5..7], input).unwrap();
        assert_eq!(span, Span::new(5, 7));
        assert_eq!(span.slice(input), Some("23"));

        let other = String::from(input);
        assert_eq!(Span::of(&other[5..7], input), None);
    }

    #[test]
    fn span_slices_back_to_lexeme() {
        let input = "(1 + 23)";
        let span = Span::new(5, 7);
        let lexeme = span.slice(input).unwrap();
        assert_eq!(lexeme, "23");
        assert_eq!(lexeme_offsets(lexeme, input), Some((5, 7)));
    }

    #[test]
    fn span_normalizes_and_joins() {
        let span = Span::new(7, 3);
        assert_eq!((span.lo(), span.hi()), (3, 7));
        assert_eq!(span.len(), 4);
        assert_eq!(span.join(Span::new(9, 10)), Span::new(3, 10));
        assert!(Span::new(4, 4).is_empty());
    }

    #[test]
    fn slice_out_of_bounds() {
        assert_eq!(Span::new(2, 9).slice("1 + 2"), None);
        assert_eq!(Span::new(5, 5).slice("1 + 2"), Some(""));
    }
}
