#![allow(dead_code)]

use editor_format::{Document, Position, TextDocument, TextRange};
use editor_format_mode::{
    Indentation, InnerMode, LexState, Mode, ModeBuilder, ModeError, StringStream, TokenResult,
    read_token,
};
use std::sync::Arc;

/// Lexer state of the C-like test mode.
#[derive(Debug, Clone, Default)]
pub struct CState {
    pub depth: usize,
    pub in_comment: bool,
    pub blank_lines: usize,
}

fn is_special(c: char) -> bool {
    matches!(c, '{' | '}' | ';' | '"' | '/' | '<')
}

fn finish_comment(stream: &mut StringStream<'_>, state: &mut CState) -> TokenResult {
    while !stream.eol() {
        if stream.match_str("*/", true, false) {
            state.in_comment = false;
            break;
        }
        stream.next_char();
    }
    Ok(Some("comment"))
}

fn c_token(stream: &mut StringStream<'_>, state: &mut CState) -> TokenResult {
    if state.in_comment {
        return finish_comment(stream, state);
    }
    if stream.eat_space() {
        return Ok(None);
    }
    if stream.match_str("/*", true, false) {
        state.in_comment = true;
        return finish_comment(stream, state);
    }
    if stream.eat_char('"') {
        while let Some(c) = stream.next_char() {
            if c == '"' {
                break;
            }
        }
        return Ok(Some("string"));
    }
    match stream.peek() {
        Some('{') => {
            stream.next_char();
            state.depth += 1;
            Ok(Some("bracket"))
        }
        Some('}') => {
            stream.next_char();
            state.depth = state.depth.saturating_sub(1);
            Ok(Some("bracket"))
        }
        Some(';') => {
            stream.next_char();
            Ok(Some("punctuation"))
        }
        _ => {
            if !stream.eat_while(|c| !c.is_whitespace() && !is_special(c)) {
                stream.next_char();
            }
            Ok(Some("word"))
        }
    }
}

/// C-like mode without any newline policy.
pub fn c_like_builder() -> ModeBuilder<CState> {
    Mode::builder("clike", CState::default, c_token)
        .comments("/*", "*/")
        .blank_line(|state: &mut CState| state.blank_lines += 1)
        .indent(|state: &CState, text_after: &str, _line: &str| {
            let depth = if text_after.starts_with('}') {
                state.depth.saturating_sub(1)
            } else {
                state.depth
            };
            Indentation::Column(depth * 2)
        })
}

/// C-like mode breaking after every `{` and `;`.
pub fn c_like() -> Arc<Mode> {
    Arc::new(
        c_like_builder()
            .newline_after_token(|_, token, _, _: &CState| matches!(token, "{" | ";"))
            .build(),
    )
}

/// C-like mode failing as soon as it meets a `!`.
pub fn failing() -> Arc<Mode> {
    Arc::new(
        Mode::builder("failing", CState::default, |stream, state: &mut CState| {
            if stream.peek() == Some('!') {
                return Err(ModeError::tokenize("failing", "unexpected '!'"));
            }
            c_token(stream, state)
        })
        .comments("/*", "*/")
        .newline_after_token(|_, token, _, _: &CState| token == ";")
        .build(),
    )
}

/// Markup state with an optional embedded C-like block between `<s>` and `</s>`.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub script: Option<LexState>,
}

/// Markup mode breaking after every tag, embedding [`c_like`] inside `<s>...</s>`.
pub fn page(script: Arc<Mode>) -> Arc<Mode> {
    let inner = Arc::clone(&script);
    Arc::new(
        Mode::builder("page", Page::default, move |stream, page: &mut Page| {
            if page.script.is_some() && stream.match_str("</s>", true, false) {
                page.script = None;
                return Ok(Some("tag"));
            }
            if let Some(state) = page.script.as_mut() {
                return read_token(&script, stream, state);
            }
            if stream.match_str("<s>", true, false) {
                page.script = Some(script.start_state());
                return Ok(Some("tag"));
            }
            if stream.eat_char('<') {
                stream.eat_while(|c| c != '>');
                stream.eat_char('>');
                return Ok(Some("tag"));
            }
            stream.eat_while(|c| c != '<');
            Ok(None)
        })
        .inner_mode(move |page: &Page| {
            page.script.as_ref().map(|state| InnerMode {
                mode: Arc::clone(&inner),
                state,
            })
        })
        .newline_after_token(|_, token, _, _: &Page| token.ends_with('>'))
        .build(),
    )
}

/// Range covering the whole document.
pub fn whole(doc: &TextDocument) -> TextRange {
    let last = doc.line_count() - 1;
    let len = doc.line_text(last).map_or(0, |line| line.chars().count());
    TextRange::new(Position::new(0, 0), Position::new(last, len))
}

pub fn range(from: (usize, usize), to: (usize, usize)) -> TextRange {
    TextRange::new(Position::new(from.0, from.1), Position::new(to.0, to.1))
}
