//! The document interface the formatting operations consume.
//!
//! The operations in this crate never touch text storage directly; they go through
//! [`Document`] (text, selection, tokenizer state, atomic operations) and
//! [`Indenter`](crate::Indenter). [`TextDocument`](crate::TextDocument) is the bundled
//! implementation; hosts with their own buffer implement the traits instead.

use crate::error::EditError;
use crate::position::{Position, Selection, TextRange};
use editor_format_mode::{LexState, Mode};
use std::sync::Arc;

/// Tokenizer context captured at a document position.
#[derive(Debug, Clone)]
pub struct TokenState {
    /// The document's (outer) mode.
    pub mode: Arc<Mode>,
    /// Independent copy of the lexer state at that position.
    pub state: LexState,
}

/// How an atomic operation ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationOutcome {
    /// Keep every edit made inside the operation.
    Commit,
    /// Revert every edit made inside the operation.
    Abort,
}

/// A mutable text document with mode-aware tokenizer state.
pub trait Document {
    /// Number of lines (at least one).
    fn line_count(&self) -> usize;

    /// Text of `line`, without its newline.
    fn line_text(&self, line: usize) -> Option<String>;

    /// Tab width handed to tokenizer streams.
    fn tab_size(&self) -> usize;

    /// Literal text between `range.from` and `range.to`, lines joined by `'\n'`.
    fn text_in_range(&self, range: TextRange) -> Result<String, EditError>;

    /// Replace `range` with `text`.
    fn replace_range(&mut self, text: &str, range: TextRange) -> Result<(), EditError>;

    /// Mode and lexer state in effect at `pos`, as the highlighter saw it.
    fn token_state_at(&mut self, pos: Position) -> Result<TokenState, EditError>;

    /// Current selection.
    fn selection(&self) -> Selection;

    /// Move the selection.
    fn set_selection(&mut self, selection: Selection) -> Result<(), EditError>;

    /// Open an atomic operation. Operations nest; notifications are deferred until the
    /// outermost one ends.
    fn begin_operation(&mut self);

    /// Close the innermost open operation.
    fn end_operation(&mut self, outcome: OperationOutcome);
}
