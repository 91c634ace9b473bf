use crate::position::{Position, TextRange};
use editor_format_mode::ModeError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced by document edits and the formatting operations.
pub enum EditError {
    #[error("invalid position: line {}, column {}", .0.line, .0.column)]
    /// The position lies outside the document.
    InvalidPosition(Position),

    #[error("invalid range: {:?}..{:?}", .0.from, .0.to)]
    /// The range is reversed or lies outside the document.
    InvalidRange(TextRange),

    #[error("mode '{mode}' does not declare {capability}")]
    /// The active mode lacks a hook the operation requires.
    MissingCapability {
        /// Mode name.
        mode: String,
        /// Human-readable name of the missing hook.
        capability: &'static str,
    },

    #[error(transparent)]
    /// The mode failed while tokenizing.
    Mode(#[from] ModeError),

    #[error("nothing to undo")]
    /// The undo history is empty.
    NothingToUndo,

    #[error("nothing to redo")]
    /// The redo history is empty.
    NothingToRedo,

    #[error("history cannot move while an operation is open")]
    /// Undo or redo was requested inside an atomic operation.
    OperationOpen,
}
