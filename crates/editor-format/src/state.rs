//! Change notifications.
//!
//! A [`TextDocument`](crate::TextDocument) never notifies while an atomic operation is open.
//! When the outermost operation ends, subscribers receive at most one
//! [`StateChangeType::DocumentModified`] (carrying the combined [`TextDelta`]) and at most one
//! [`StateChangeType::SelectionChanged`]; each bumps the version by one.
//!
//! ```rust
//! use editor_format::{Document, Position, StateChangeType, TextDocument, TextRange};
//! use std::sync::{Arc, Mutex};
//!
//! let mut doc = TextDocument::new("Hello");
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! doc.subscribe(move |change| sink.lock().unwrap().push(change.change_type));
//!
//! doc.replace_range("y", TextRange::new(Position::new(0, 2), Position::new(0, 5)))
//!     .unwrap();
//! assert_eq!(doc.text(), "Hey");
//! assert_eq!(*seen.lock().unwrap(), vec![StateChangeType::DocumentModified]);
//! assert_eq!(doc.version(), 1);
//! ```

use crate::delta::TextDelta;
use std::sync::Arc;

/// State change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChangeType {
    /// Document content modified
    DocumentModified,
    /// Selection (or caret) moved
    SelectionChanged,
}

/// State change record
#[derive(Debug, Clone)]
pub struct StateChange {
    /// Change type
    pub change_type: StateChangeType,
    /// Old version number
    pub old_version: u64,
    /// New version number
    pub new_version: u64,
    /// Structured text delta for document changes.
    pub text_delta: Option<Arc<TextDelta>>,
}

impl StateChange {
    /// Create a new state change record.
    pub fn new(change_type: StateChangeType, old_version: u64, new_version: u64) -> Self {
        Self {
            change_type,
            old_version,
            new_version,
            text_delta: None,
        }
    }

    /// Attach a structured text delta to this change record.
    pub fn with_text_delta(mut self, delta: Arc<TextDelta>) -> Self {
        self.text_delta = Some(delta);
        self
    }
}

/// State change callback function type
pub type StateChangeCallback = Box<dyn FnMut(&StateChange) + Send>;
