//! Document coordinates.

use std::cmp::Ordering;

/// Position coordinates (line and column numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in characters within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Where a caret placed here ends up after typing `text`.
    pub fn after_text(self, text: &str) -> Position {
        match text.rfind('\n') {
            Some(last_newline) => Position::new(
                self.line + text.matches('\n').count(),
                text[last_newline + 1..].chars().count(),
            ),
            None => Position::new(self.line, self.column + text.chars().count()),
        }
    }

    /// Map this position through the replacement of `range` by `text`.
    ///
    /// Positions before the range are untouched, positions inside it move to the end of the
    /// inserted text, positions after it shift with the edit.
    pub fn map_through(self, range: TextRange, text: &str) -> Position {
        if self < range.from {
            return self;
        }
        let end = range.from.after_text(text);
        if self <= range.to {
            return end;
        }
        if self.line == range.to.line {
            Position::new(end.line, end.column + self.column - range.to.column)
        } else {
            Position::new(self.line + end.line - range.to.line, self.column)
        }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An ordered pair of positions, `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    /// Inclusive start.
    pub from: Position,
    /// Exclusive end.
    pub to: Position,
}

impl TextRange {
    /// Build a range from two positions in any order.
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { from: a, to: b }
        } else {
            Self { from: b, to: a }
        }
    }

    /// An empty range at `pos`.
    pub fn caret(pos: Position) -> Self {
        Self { from: pos, to: pos }
    }

    /// `true` when `from == to`.
    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

/// Selection as anchor (fixed end) and head (moving end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Where the selection started.
    pub anchor: Position,
    /// Where the caret is.
    pub head: Position,
}

impl Selection {
    /// Create a selection.
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// A collapsed selection at `pos`.
    pub fn caret(pos: Position) -> Self {
        Self::new(pos, pos)
    }

    /// `true` when anchor and head coincide.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// The selected range, ordered.
    pub fn range(&self) -> TextRange {
        TextRange::new(self.anchor, self.head)
    }
}
