//! Positions, spans, and edits over source text.
//!
//! All positions are byte offsets into UTF-8 source text.

use std::fmt;
use std::ops::Range;

/// A byte offset into source text.
pub type TextPos = u32;

/// A span described by its start and length.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextSpan {
    pub start: TextPos,
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end - start,
        }
    }

    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self {
            start: pos,
            length: 0,
        }
    }

    /// The end position of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether `pos` lies in `[start, end)`.
    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.start && pos < self.end()
    }

    #[inline]
    pub fn overlaps(&self, other: &TextSpan) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.start as usize..self.end() as usize
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// A `[pos, end)` range. Node ranges start at the node's full start, i.e.
/// before any leading trivia.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextRange {
    pub pos: TextPos,
    pub end: TextPos,
}

impl TextRange {
    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        Self { pos, end }
    }

    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self { pos, end: pos }
    }

    #[inline]
    pub fn len(&self) -> TextPos {
        self.end - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    #[inline]
    pub fn to_span(&self) -> TextSpan {
        TextSpan::from_bounds(self.pos, self.end)
    }

    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.pos as usize..self.end as usize
    }

    /// Whether `other` lies entirely within this range.
    #[inline]
    pub fn contains_range(&self, other: &TextRange) -> bool {
        other.pos >= self.pos && other.end <= self.end
    }

    /// Shift both ends by `delta` bytes.
    #[inline]
    pub fn shifted(&self, delta: i64) -> TextRange {
        TextRange::new(shift_pos(self.pos, delta), shift_pos(self.end, delta))
    }
}

#[inline]
fn shift_pos(pos: TextPos, delta: i64) -> TextPos {
    (pos as i64 + delta).max(0) as TextPos
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}

impl From<TextRange> for TextSpan {
    fn from(range: TextRange) -> Self {
        range.to_span()
    }
}

impl From<TextSpan> for TextRange {
    fn from(span: TextSpan) -> Self {
        TextRange::new(span.start, span.end())
    }
}

/// One contiguous edit: the span it replaced in the old text and the length
/// of the text that replaced it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextChange {
    pub span: TextSpan,
    pub new_length: TextPos,
}

impl TextChange {
    #[inline]
    pub fn new(span: TextSpan, new_length: TextPos) -> Self {
        Self { span, new_length }
    }

    /// A change that does nothing, positioned at `pos`.
    #[inline]
    pub fn unchanged(pos: TextPos) -> Self {
        Self::new(TextSpan::empty(pos), 0)
    }

    /// The span the replacement occupies in the new text.
    #[inline]
    pub fn new_span(&self) -> TextSpan {
        TextSpan::new(self.span.start, self.new_length)
    }

    /// New length minus old length.
    #[inline]
    pub fn delta(&self) -> i64 {
        self.new_length as i64 - self.span.length as i64
    }

    #[inline]
    pub fn is_unchanged(&self) -> bool {
        self.span.is_empty() && self.new_length == 0
    }

    /// Apply the edit to `old_text`, splicing in `replacement`.
    pub fn apply(&self, old_text: &str, replacement: &str) -> String {
        let mut out = String::with_capacity(old_text.len() + replacement.len());
        out.push_str(&old_text[..self.span.start as usize]);
        out.push_str(replacement);
        out.push_str(&old_text[self.span.end() as usize..]);
        out
    }

    /// The smallest single change turning `old_text` into `new_text`, found
    /// by stripping their common prefix and suffix. Offsets are kept on char
    /// boundaries.
    pub fn between(old_text: &str, new_text: &str) -> TextChange {
        let old = old_text.as_bytes();
        let new = new_text.as_bytes();
        let mut prefix = old
            .iter()
            .zip(new.iter())
            .take_while(|(a, b)| a == b)
            .count();
        while !old_text.is_char_boundary(prefix) || !new_text.is_char_boundary(prefix) {
            prefix -= 1;
        }
        let max_suffix = old.len().min(new.len()) - prefix;
        let mut suffix = old
            .iter()
            .rev()
            .zip(new.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();
        while !old_text.is_char_boundary(old.len() - suffix)
            || !new_text.is_char_boundary(new.len() - suffix)
        {
            suffix -= 1;
        }
        TextChange::new(
            TextSpan::from_bounds(prefix as TextPos, (old.len() - suffix) as TextPos),
            (new.len() - suffix - prefix) as TextPos,
        )
    }
}

impl fmt::Debug for TextChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} -> {}", self.span, self.new_length)
    }
}

/// Validate raw bytes as UTF-8 source text.
pub fn source_from_utf8(bytes: &[u8]) -> Result<&str, simdutf8::basic::Utf8Error> {
    simdutf8::basic::from_utf8(bytes)
}

/// Line and column of a position, both 0-based. Columns count bytes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    pub line: u32,
    pub character: u32,
}

/// Maps byte offsets to lines.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<TextPos>,
}

impl LineMap {
    /// Build a line map. `\r\n`, `\r`, `\n`, U+2028 and U+2029 all end a line.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        let mut chars = text.char_indices().peekable();
        while let Some((i, ch)) = chars.next() {
            match ch {
                '\r' => {
                    if let Some(&(_, '\n')) = chars.peek() {
                        chars.next();
                        line_starts.push((i + 2) as u32);
                    } else {
                        line_starts.push((i + 1) as u32);
                    }
                }
                '\n' => line_starts.push((i + 1) as u32),
                '\u{2028}' | '\u{2029}' => line_starts.push((i + ch.len_utf8()) as u32),
                _ => {}
            }
        }
        Self { line_starts }
    }

    pub fn line_of(&self, pos: TextPos) -> u32 {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line as u32,
            Err(line) => (line - 1) as u32,
        }
    }

    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        let line = self.line_of(pos);
        LineAndColumn {
            line,
            character: pos - self.line_starts[line as usize],
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_starts(&self) -> &[TextPos] {
        &self.line_starts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_span() {
        let span = TextSpan::new(5, 10);
        assert_eq!(span.end(), 15);
        assert!(span.contains(5));
        assert!(span.contains(14));
        assert!(!span.contains(15));
        assert!(span.overlaps(&TextSpan::new(14, 3)));
        assert!(!span.overlaps(&TextSpan::new(15, 3)));
    }

    #[test]
    fn test_range_shift() {
        let range = TextRange::new(10, 20);
        assert_eq!(range.shifted(5), TextRange::new(15, 25));
        assert_eq!(range.shifted(-4), TextRange::new(6, 16));
        assert!(range.contains_range(&TextRange::new(12, 20)));
        assert!(!range.contains_range(&TextRange::new(9, 12)));
    }

    #[test]
    fn test_change_between() {
        let change = TextChange::between("let a = 1;", "let abc = 1;");
        assert_eq!(change.span, TextSpan::new(5, 0));
        assert_eq!(change.new_length, 2);
        assert_eq!(change.delta(), 2);

        let change = TextChange::between("same", "same");
        assert!(change.is_unchanged());

        let change = TextChange::between("x = 10", "x = 7");
        assert_eq!(change.span, TextSpan::new(4, 2));
        assert_eq!(change.new_length, 1);
    }

    #[test]
    fn test_change_between_multibyte() {
        let change = TextChange::between("a = 'é';", "a = 'è';");
        let old = "a = 'é';";
        assert!(old.is_char_boundary(change.span.start as usize));
        assert!(old.is_char_boundary(change.span.end() as usize));
        assert_eq!(change.span.start, 5);
    }

    #[test]
    fn test_change_apply() {
        let change = TextChange::new(TextSpan::new(4, 1), 3);
        assert_eq!(change.apply("let x;", "abc"), "let abc;");
    }

    #[test]
    fn test_line_map() {
        let map = LineMap::new("line1\nline2\r\nline3\rx");
        assert_eq!(map.line_count(), 4);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(5), 0);
        assert_eq!(map.line_of(6), 1);
        assert_eq!(map.line_of(13), 2);
        assert_eq!(map.line_of(19), 3);
        let lc = map.line_and_column_of(8);
        assert_eq!(lc, LineAndColumn { line: 1, character: 2 });
    }

    #[test]
    fn test_source_from_utf8() {
        assert_eq!(source_from_utf8(b"let x;").ok(), Some("let x;"));
        assert!(source_from_utf8(&[0xff, 0xfe]).is_err());
    }
}
