//! Partial mode properties merged into an already-defined mode.

use crate::mode::{Indentation, IndentFn, Mode, NewlineFn, Style, indent_fn, newline_fn};
use crate::state::LexState;
use std::fmt;

/// HTML elements laid out inline; the `xml` preset in HTML flavour never breaks inside them.
const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "acronym", "area", "base", "bdo", "big", "br", "button", "caption", "cite",
    "code", "col", "colgroup", "dd", "del", "dfn", "em", "frame", "hr", "iframe", "img", "input",
    "ins", "kbd", "label", "legend", "link", "map", "object", "optgroup", "option", "param", "q",
    "samp", "script", "select", "small", "span", "strong", "sub", "sup", "textarea", "tt", "var",
];

/// Extra capabilities layered on top of a mode without touching its tokenizer.
///
/// Fields left unset keep whatever the mode (or an earlier extension) declared.
#[derive(Clone, Default)]
pub struct ModeExtension {
    comment_start: Option<String>,
    comment_end: Option<String>,
    newline_after_token: Option<NewlineFn>,
    indent: Option<IndentFn>,
}

impl ModeExtension {
    /// An empty extension.
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatting extension for CSS-like stylesheets: block comments and a break after every
    /// `;`, `{` and `}`.
    pub fn css() -> Self {
        Self::new()
            .comments("/*", "*/")
            .newline_after_token(|_, token, _, _| matches!(token, ";" | "{" | "}"))
    }

    /// Formatting extension for JavaScript and JSON.
    ///
    /// JSON breaks after `[`, `,` and `{`, and before a closing `}`. Plain JavaScript breaks
    /// after `;`, `{` and `}` unless a `;` follows directly. A `;` inside parentheses (the
    /// header of a `for` loop) never breaks; `in_paren` reports that from the mode's state.
    pub fn javascript<P>(json: bool, in_paren: P) -> Self
    where
        P: Fn(&LexState) -> bool + Send + Sync + 'static,
    {
        Self::new()
            .comments("/*", "*/")
            .newline_after_token(move |_, token, text_after, state| {
                if json {
                    return matches!(token, "[" | "," | "{") || text_after.starts_with('}');
                }
                if token == ";" && in_paren(state) {
                    return false;
                }
                matches!(token, ";" | "{" | "}") && !text_after.starts_with(';')
            })
    }

    /// Formatting extension for XML and HTML.
    ///
    /// Breaks after a tag token ending in `>` while inside an element, and before any text
    /// starting with `<`. With `html` set, nothing breaks while the enclosing element is
    /// inline (`span`, `a`, `em` ...). `context_tag` returns the enclosing element's name.
    pub fn xml<C>(html: bool, context_tag: C) -> Self
    where
        C: Fn(&LexState) -> Option<String> + Send + Sync + 'static,
    {
        Self::new()
            .comments("<!--", "-->")
            .newline_after_token(move |style, token, text_after, state| {
                let context = context_tag(state);
                let inline = html
                    && context
                        .as_deref()
                        .is_some_and(|tag| INLINE_ELEMENTS.contains(&tag));
                if inline {
                    return false;
                }
                (style == Some("tag") && token.ends_with('>') && context.is_some())
                    || text_after.starts_with('<')
            })
    }

    /// Block comment delimiters.
    pub fn comments(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.comment_start = Some(start.into());
        self.comment_end = Some(end.into());
        self
    }

    /// Newline placement predicate. The state is the mode's own, type-erased.
    pub fn newline_after_token<F>(mut self, predicate: F) -> Self
    where
        F: Fn(Option<Style>, &str, &str, &LexState) -> bool + Send + Sync + 'static,
    {
        self.newline_after_token = Some(newline_fn(predicate));
        self
    }

    /// Smart indentation hook.
    pub fn indent<F>(mut self, indent: F) -> Self
    where
        F: Fn(&LexState, &str, &str) -> Indentation + Send + Sync + 'static,
    {
        self.indent = Some(indent_fn(indent));
        self
    }

    /// Layer `other` over `self`; properties set in `other` win.
    pub fn merge(mut self, other: ModeExtension) -> Self {
        if other.comment_start.is_some() {
            self.comment_start = other.comment_start;
        }
        if other.comment_end.is_some() {
            self.comment_end = other.comment_end;
        }
        if other.newline_after_token.is_some() {
            self.newline_after_token = other.newline_after_token;
        }
        if other.indent.is_some() {
            self.indent = other.indent;
        }
        self
    }

    /// Copy of `mode` with this extension applied.
    pub fn apply_to(&self, mode: &Mode) -> Mode {
        let mut extended = mode.clone();
        extended.set_comments(self.comment_start.clone(), self.comment_end.clone());
        if let Some(predicate) = &self.newline_after_token {
            extended.set_newline_after_token(predicate.clone());
        }
        if let Some(indent) = &self.indent {
            extended.set_indent(indent.clone());
        }
        extended
    }
}

impl fmt::Debug for ModeExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeExtension")
            .field("comment_start", &self.comment_start)
            .field("comment_end", &self.comment_end)
            .field("newline_after_token", &self.newline_after_token.is_some())
            .field("indent", &self.indent.is_some())
            .finish()
    }
}
