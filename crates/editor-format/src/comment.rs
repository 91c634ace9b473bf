//! Block comment toggling.

use crate::document::Document;
use crate::error::EditError;
use crate::operation::Operation;
use crate::position::{Position, Selection, TextRange};
use std::sync::Arc;
use tracing::debug;

/// Direction of [`toggle_comment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    /// Wrap the range in the mode's delimiters.
    Comment,
    /// Strip one outer delimiter pair from the range.
    Uncomment,
}

/// Comment or uncomment `range` using the delimiters of the mode active at `range.from`.
///
/// Commenting an empty range leaves the caret between the inserted delimiters. Uncommenting
/// text without a well-formed pair writes nothing.
pub fn toggle_comment<D>(
    doc: &mut D,
    range: TextRange,
    action: CommentAction,
) -> Result<(), EditError>
where
    D: Document + ?Sized,
{
    let token = doc.token_state_at(range.from)?;
    let mode = Arc::clone(&token.mode.resolve_inner(&token.state).mode);
    let (start, end) = mode
        .comment_delimiters()
        .ok_or_else(|| EditError::MissingCapability {
            mode: mode.name().to_string(),
            capability: "block comment delimiters",
        })?;

    let mut op = Operation::begin(doc);
    match action {
        CommentAction::Comment => {
            // `to` first, so `from` stays valid when both sit on one line.
            op.replace_range(end, TextRange::caret(range.to))?;
            op.replace_range(start, TextRange::caret(range.from))?;
            if range.is_empty() {
                let caret = Position::new(
                    range.from.line,
                    range.from.column + start.chars().count(),
                );
                op.set_selection(Selection::caret(caret))?;
            }
        }
        CommentAction::Uncomment => {
            let text = op.text_in_range(range)?;
            if let Some(stripped) = strip_delimiters(&text, start, end) {
                op.replace_range(&stripped, range)?;
            }
        }
    }
    op.commit();

    debug!(mode = mode.name(), ?action, "toggled comment");
    Ok(())
}

/// `text` without its first `start` and last `end`, if they form a non-overlapping pair.
fn strip_delimiters(text: &str, start: &str, end: &str) -> Option<String> {
    let open = text.find(start)?;
    let close = text.rfind(end)?;
    let inner_start = open + start.len();
    if close < inner_start {
        return None;
    }
    let mut out = String::with_capacity(text.len() - start.len() - end.len());
    out.push_str(&text[..open]);
    out.push_str(&text[inner_start..close]);
    out.push_str(&text[close + end.len()..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_delimiters() {
        assert_eq!(
            strip_delimiters("/* x=1; */", "/*", "*/").as_deref(),
            Some(" x=1; ")
        );
        assert_eq!(
            strip_delimiters("a /* b /* c */ d */ e", "/*", "*/").as_deref(),
            Some("a  b /* c */ d  e")
        );
        assert_eq!(strip_delimiters("x */ y /* z", "/*", "*/"), None);
        assert_eq!(strip_delimiters("/*/", "/*", "*/"), None);
        assert_eq!(strip_delimiters("plain", "/*", "*/"), None);
    }
}
