#![warn(missing_docs)]
//! `editor-format-mode` - the language mode contract used by `editor-format`.
//!
//! A mode is a pluggable, line-oriented tokenizer plus optional formatting metadata:
//!
//! - [`StringStream`] - the cursor a tokenizer consumes one line through
//! - [`LexState`] - opaque, deep-cloneable lexer state threaded through a pass
//! - [`Mode`] / [`ModeBuilder`] - capability bundle (tokenizer, blank-line hook, nested modes,
//!   indentation, comment delimiters, newline placement)
//! - [`ModeExtension`] / [`ModeRegistry`] - name/MIME lookup and late property merging
//!
//! This crate intentionally knows nothing about documents, positions or editing.

mod error;
mod extension;
mod mode;
mod registry;
mod state;
mod stream;

pub use error::ModeError;
pub use extension::ModeExtension;
pub use mode::{
    IndentFn, Indentation, InnerMode, MAX_STALLED_STEPS, Mode, ModeBuilder, NewlineFn, Style,
    TokenResult, read_token,
};
pub use registry::ModeRegistry;
pub use state::{LexState, StateValue};
pub use stream::{StringStream, anchored_regex, count_column, leading_whitespace_len};
