#![warn(missing_docs)]
//! Editor Format - Mode-Driven Reformatting and Comment Toggling
//!
//! # Overview
//!
//! `editor-format` re-tokenizes document ranges with a pluggable language mode (see
//! [`editor_format_mode`]) and rewrites them: it inserts line breaks where the mode asks for
//! them, re-indents the produced lines and toggles block comments with the mode's
//! delimiters. Every transformation is applied as one atomic document operation.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Operations (format / indent / comment)     │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Range Tokenizer                            │  ← Token Stream
//! ├─────────────────────────────────────────────┤
//! │  Document + Indenter traits, Operation      │  ← Atomic Mutation
//! ├─────────────────────────────────────────────┤
//! │  TextDocument (history, state cache)        │  ← In-Memory Model
//! ├─────────────────────────────────────────────┤
//! │  Line Index (Rope-based)                    │  ← Text Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use editor_format::{CommentAction, FormatExt, Position, TextDocument, TextRange};
//! use editor_format_mode::{Mode, ModeExtension, ModeRegistry, StringStream};
//!
//! let mut registry = ModeRegistry::new();
//! registry.define(Mode::builder("css", || (), |stream: &mut StringStream<'_>, _: &mut ()| {
//!     if stream.eat_space() {
//!         return Ok(None);
//!     }
//!     if stream.eat(|c| matches!(c, '{' | '}' | ';')).is_none() {
//!         stream.eat_while(|c| !c.is_whitespace() && !matches!(c, '{' | '}' | ';'));
//!     }
//!     Ok(None)
//! }).build());
//! registry.extend("css", ModeExtension::css());
//!
//! let mut doc = TextDocument::with_mode("a{b:1;c:2}", registry.resolve("css").unwrap());
//! let all = TextRange::new(Position::new(0, 0), Position::new(0, 10));
//! doc.auto_format_range(all).unwrap();
//! assert_eq!(doc.text(), "a{\nb:1;\nc:2}\n");
//!
//! let first = TextRange::new(Position::new(0, 0), Position::new(0, 2));
//! doc.toggle_comment(first, CommentAction::Comment).unwrap();
//! assert_eq!(doc.text(), "/*a{*/\nb:1;\nc:2}\n");
//! ```
//!
//! # Module Description
//!
//! - [`line_index`] - Rope based line index
//! - [`document`] - Document interface consumed by the operations
//! - [`text_document`] - In-memory document with history and notifications
//! - [`tokenize`] - Range tokenizer
//! - [`format`] - Auto-format and the [`FormatExt`] extension trait
//! - [`comment`] - Block comment toggling
//! - [`indent`] - Indentation strategies and auto-indent

pub mod comment;
pub mod delta;
pub mod document;
pub mod error;
pub mod format;
mod history;
pub mod indent;
pub mod line_ending;
pub mod line_index;
pub mod operation;
pub mod position;
pub mod state;
mod text;
pub mod text_document;
pub mod tokenize;

pub use comment::{CommentAction, toggle_comment};
pub use delta::{TextDelta, TextDeltaEdit};
pub use document::{Document, OperationOutcome, TokenState};
pub use error::EditError;
pub use format::{FormatExt, auto_format_range};
pub use indent::{IndentStrategy, Indenter, UnknownIndentStrategy, auto_indent_range};
pub use line_ending::LineEnding;
pub use line_index::LineIndex;
pub use operation::{Operation, atomic};
pub use position::{Position, Selection, TextRange};
pub use state::{StateChange, StateChangeCallback, StateChangeType};
pub use text_document::{DocumentOptions, TextDocument};
pub use tokenize::{RangeEvent, RangeToken, RangeTokenizer};
