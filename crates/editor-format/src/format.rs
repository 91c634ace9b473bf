//! Token-driven reformatting of a range.
//!
//! The range is re-tokenized with the same mode and state the highlighter uses, so line
//! breaks are only ever placed between tokens (never inside a string or comment). Leading
//! whitespace of every output line is dropped and then rebuilt by smart indentation.

use crate::comment::{self, CommentAction};
use crate::document::Document;
use crate::error::EditError;
use crate::indent::{self, IndentStrategy, Indenter};
use crate::operation::Operation;
use crate::position::{Position, Selection, TextRange};
use crate::tokenize::{RangeEvent, RangeTokenizer};
use editor_format_mode::{LexState, Mode};
use std::sync::Arc;
use tracing::debug;

/// Reformat `range`, reindent the lines it produced and collapse the selection at the end of
/// the new text.
///
/// Everything happens in one atomic operation: a tokenizer failure leaves the document
/// untouched.
pub fn auto_format_range<D>(doc: &mut D, range: TextRange) -> Result<(), EditError>
where
    D: Document + Indenter + ?Sized,
{
    let token = doc.token_state_at(range.from)?;
    let text = doc.text_in_range(range)?;
    let tail = doc
        .line_text(range.to.line)
        .map(|line| line.chars().count().saturating_sub(range.to.column))
        .ok_or(EditError::InvalidRange(range))?;

    let at_sol = range.from.column == 0;
    let formatted = reformat(&text, token.mode, token.state, doc.tab_size(), at_sol)?;
    let added_lines = formatted.matches('\n').count();
    let last_line = range.from.line + added_lines;

    let mut op = Operation::begin(doc);
    op.replace_range(&formatted, range)?;
    for line in range.from.line + 1..=last_line {
        op.indent_line(line, IndentStrategy::Smart)?;
    }
    let last_len = op
        .line_text(last_line)
        .map_or(0, |line| line.chars().count());
    op.set_selection(Selection::caret(Position::new(
        last_line,
        last_len.saturating_sub(tail),
    )))?;
    op.commit();

    debug!(
        from = range.from.line,
        to = range.to.line,
        lines = added_lines + 1,
        "formatted range"
    );
    Ok(())
}

/// Rebuild `text` with line breaks wherever the owning mode asks for one.
fn reformat(
    text: &str,
    mode: Arc<Mode>,
    state: LexState,
    tab_size: usize,
    mut at_sol: bool,
) -> Result<String, EditError> {
    let mut tokenizer = RangeTokenizer::new(mode, state, text, tab_size);
    let mut out = String::with_capacity(text.len());

    while let Some(event) = tokenizer.next_event() {
        match event? {
            RangeEvent::Token(token) => {
                if !at_sol || token.text.contains(|c: char| !c.is_whitespace()) {
                    out.push_str(token.text);
                    at_sol = false;
                }
                if !at_sol
                    && token.mode.newline_after_token(
                        token.style,
                        token.text,
                        token.lookahead,
                        token.state,
                    )
                {
                    out.push('\n');
                    at_sol = true;
                }
            }
            RangeEvent::LineEnd { last, .. } => {
                if !at_sol && !last {
                    out.push('\n');
                    at_sol = true;
                }
            }
        }
    }
    Ok(out)
}

/// The formatting operations as methods on any document that can also indent.
///
/// ```rust
/// use editor_format::{FormatExt, Position, TextDocument, TextRange};
///
/// let mut doc = TextDocument::new("a  b");
/// let all = TextRange::new(Position::new(0, 0), Position::new(0, 4));
/// doc.auto_format_range(all).unwrap();
/// assert_eq!(doc.text(), "a  b");
/// ```
pub trait FormatExt: Document + Indenter {
    /// See [`toggle_comment`](crate::toggle_comment).
    fn toggle_comment(&mut self, range: TextRange, action: CommentAction) -> Result<(), EditError> {
        comment::toggle_comment(self, range, action)
    }

    /// See [`auto_indent_range`](crate::auto_indent_range).
    fn auto_indent_range(&mut self, range: TextRange) -> Result<(), EditError> {
        indent::auto_indent_range(self, range)
    }

    /// See [`auto_format_range`](crate::auto_format_range).
    fn auto_format_range(&mut self, range: TextRange) -> Result<(), EditError> {
        auto_format_range(self, range)
    }
}

impl<T: Document + Indenter + ?Sized> FormatExt for T {}
