//! Streaming tokenization of a range's text.
//!
//! [`RangeTokenizer`] walks the lines of a range with one lexer state, yielding a
//! [`RangeEvent::Token`] per token and a [`RangeEvent::LineEnd`] after every line. Tokens
//! borrow the live state, so the tokenizer is a lending cursor driven through
//! [`RangeTokenizer::next_event`] rather than an [`Iterator`].

use crate::text::split_lines;
use editor_format_mode::{LexState, Mode, ModeError, StringStream, Style, read_token};
use std::sync::Arc;

/// One token produced while walking a range.
#[derive(Debug)]
pub struct RangeToken<'t> {
    /// Style returned by the mode.
    pub style: Option<Style>,
    /// Text consumed by this token.
    pub text: &'t str,
    /// Unconsumed rest of the line, or the next line when the token ends its line.
    pub lookahead: &'t str,
    /// Innermost mode that produced the token.
    pub mode: Arc<Mode>,
    /// That mode's state after the token.
    pub state: &'t LexState,
}

/// Event yielded by [`RangeTokenizer::next_event`].
#[derive(Debug)]
pub enum RangeEvent<'t> {
    /// A token.
    Token(RangeToken<'t>),
    /// The end of line `line` (relative to the range start).
    LineEnd {
        /// Zero-based line index within the range.
        line: usize,
        /// `true` for the range's final line.
        last: bool,
    },
}

/// Forward-only tokenizer over the lines of a range.
pub struct RangeTokenizer<'a> {
    mode: Arc<Mode>,
    state: LexState,
    lines: Vec<&'a str>,
    line: usize,
    stream: Option<StringStream<'a>>,
    tab_size: usize,
}

impl<'a> RangeTokenizer<'a> {
    /// Tokenize `text` with `mode`, starting from `state`.
    pub fn new(mode: Arc<Mode>, state: LexState, text: &'a str, tab_size: usize) -> Self {
        Self {
            mode,
            state,
            lines: split_lines(text),
            line: 0,
            stream: None,
            tab_size,
        }
    }

    /// Index of the line being tokenized.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of lines in the range.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The outer lexer state.
    pub fn state(&self) -> &LexState {
        &self.state
    }

    /// Consume the tokenizer, returning the state after the last event.
    pub fn into_state(self) -> LexState {
        self.state
    }

    /// Produce the next event, or `None` once every line has ended.
    ///
    /// A failing tokenizer ends the walk; the error is yielded once.
    pub fn next_event(&mut self) -> Option<Result<RangeEvent<'_>, ModeError>> {
        let text = *self.lines.get(self.line)?;
        let tab_size = self.tab_size;
        let stream = self
            .stream
            .get_or_insert_with(|| StringStream::new(text, tab_size));

        if stream.eol() {
            let consumed = stream.pos() > 0;
            self.stream = None;
            if !consumed && let Err(err) = self.mode.blank_line(&mut self.state) {
                self.line = self.lines.len();
                return Some(Err(err));
            }
            let line = self.line;
            self.line += 1;
            return Some(Ok(RangeEvent::LineEnd {
                line,
                last: self.line == self.lines.len(),
            }));
        }

        let owner = self.mode.resolve_inner(&self.state).mode;
        let style = match read_token(&self.mode, stream, &mut self.state) {
            Ok(style) => style,
            Err(err) => {
                self.stream = None;
                self.line = self.lines.len();
                return Some(Err(err));
            }
        };
        let token = stream.advance();
        let rest = stream.remainder();
        let lookahead = if rest.is_empty() {
            self.lines.get(self.line + 1).copied().unwrap_or("")
        } else {
            rest
        };

        // The mode active before the step owns the token; it may have nested deeper since.
        let inner = self
            .mode
            .find_inner(&self.state, &owner)
            .unwrap_or_else(|| self.mode.resolve_inner(&self.state));
        Some(Ok(RangeEvent::Token(RangeToken {
            style,
            text: token,
            lookahead,
            mode: inner.mode,
            state: inner.state,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words() -> Arc<Mode> {
        Arc::new(
            Mode::builder(
                "words",
                || 0usize,
                |stream: &mut StringStream<'_>, _: &mut usize| {
                    if stream.eat_space() {
                        return Ok(None);
                    }
                    stream.eat_while(|c| !c.is_whitespace());
                    Ok(Some("word"))
                },
            )
            .blank_line(|blanks: &mut usize| *blanks += 1)
            .build(),
        )
    }

    fn collect(text: &str) -> Vec<String> {
        let mode = words();
        let mut tokenizer = RangeTokenizer::new(Arc::clone(&mode), mode.start_state(), text, 4);
        let mut out = Vec::new();
        while let Some(event) = tokenizer.next_event() {
            match event.unwrap() {
                RangeEvent::Token(token) => {
                    out.push(format!("{}|{}", token.text, token.lookahead));
                }
                RangeEvent::LineEnd { line, last } => {
                    let marker = if last { "!" } else { "" };
                    out.push(format!("<{line}{marker}>"));
                }
            }
        }
        out
    }

    #[test]
    fn test_lookahead_falls_through_to_next_line() {
        assert_eq!(
            collect("a b\nc"),
            vec!["a| b", " |b", "b|c", "<0>", "c|", "<1!>"]
        );
    }

    #[test]
    fn test_blank_lines_run_hook() {
        let mode = words();
        let mut tokenizer =
            RangeTokenizer::new(Arc::clone(&mode), mode.start_state(), "a\n\n\nb", 4);
        while let Some(event) = tokenizer.next_event() {
            event.unwrap();
        }
        assert_eq!(tokenizer.into_state().downcast_ref::<usize>(), Some(&2));
    }

    #[test]
    fn test_error_ends_walk() {
        let failing = Arc::new(
            Mode::builder("failing", || (), |_: &mut StringStream<'_>, _: &mut ()| {
                Err(ModeError::tokenize("failing", "boom"))
            })
            .build(),
        );
        let mut tokenizer =
            RangeTokenizer::new(Arc::clone(&failing), failing.start_state(), "x\ny", 4);
        assert!(matches!(
            tokenizer.next_event(),
            Some(Err(ModeError::Tokenize { .. }))
        ));
        assert!(tokenizer.next_event().is_none());
    }
}
