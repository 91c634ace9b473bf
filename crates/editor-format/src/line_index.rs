//! Logical Line Index
//!
//! Rope-backed document text with O(log N) line access and editing. Offsets are character
//! offsets (Unicode scalar values); text is LF-normalized.

use crate::position::Position;
use ropey::Rope;

/// Logical line index - implemented using Rope data structure
#[derive(Debug, Clone)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an empty line index (one empty line).
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build line index from LF-normalized text
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get total line count
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get total character count
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Character length of a line, excluding its newline.
    pub fn line_len(&self, line: usize) -> Option<usize> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let slice = self.rope.line(line);
        let len = slice.len_chars();
        Some(if len > 0 && slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        })
    }

    /// Get text of the specified line (excluding newline)
    pub fn line_text(&self, line: usize) -> Option<String> {
        let len = self.line_len(line)?;
        let start = self.rope.line_to_char(line);
        Some(self.rope.slice(start..start + len).to_string())
    }

    /// Character offset of `pos`, or `None` if it lies outside the document.
    pub fn char_offset(&self, pos: Position) -> Option<usize> {
        let len = self.line_len(pos.line)?;
        if pos.column > len {
            return None;
        }
        Some(self.rope.line_to_char(pos.line) + pos.column)
    }

    /// Position of a character offset (clamped to the document end).
    pub fn position_of(&self, char_offset: usize) -> Position {
        let char_offset = char_offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(char_offset);
        Position::new(line, char_offset - self.rope.line_to_char(line))
    }

    /// Text between two character offsets.
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.rope.slice(start..end).to_string()
    }

    /// Replace `start..end` (character offsets) with `text`.
    pub fn replace(&mut self, start: usize, end: usize, text: &str) {
        if start < end {
            self.rope.remove(start..end);
        }
        if !text.is_empty() {
            self.rope.insert(start, text);
        }
    }

    /// Get complete text
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index_has_one_line() {
        let index = LineIndex::new();
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_text(0).as_deref(), Some(""));
        assert_eq!(index.line_text(1), None);
    }

    #[test]
    fn test_trailing_newline_creates_empty_line() {
        let index = LineIndex::from_text("a\nb\n");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_len(1), Some(1));
        assert_eq!(index.line_len(2), Some(0));
    }

    #[test]
    fn test_offsets_round_trip() {
        let index = LineIndex::from_text("ABC\nDEF\nGHI");

        assert_eq!(index.char_offset(Position::new(0, 2)), Some(2));
        assert_eq!(index.char_offset(Position::new(1, 0)), Some(4));
        assert_eq!(index.char_offset(Position::new(2, 3)), Some(11));
        assert_eq!(index.char_offset(Position::new(2, 4)), None);
        assert_eq!(index.char_offset(Position::new(3, 0)), None);

        assert_eq!(index.position_of(4), Position::new(1, 0));
        assert_eq!(index.position_of(3), Position::new(0, 3));
        assert_eq!(index.position_of(99), Position::new(2, 3));
    }

    #[test]
    fn test_utf8_cjk() {
        let index = LineIndex::from_text("你好\n世界");

        assert_eq!(index.line_count(), 2);
        assert_eq!(index.char_count(), 5);
        assert_eq!(index.position_of(3), Position::new(1, 0));
        assert_eq!(index.slice(1, 4), "好\n世");
    }

    #[test]
    fn test_replace() {
        let mut index = LineIndex::from_text("Hello World");

        index.replace(6, 6, "Beautiful ");
        assert_eq!(index.text(), "Hello Beautiful World");

        index.replace(6, 16, "");
        assert_eq!(index.text(), "Hello World");

        index.replace(0, 5, "Hi\nthere");
        assert_eq!(index.text(), "Hi\nthere World");
        assert_eq!(index.line_count(), 2);
    }
}
