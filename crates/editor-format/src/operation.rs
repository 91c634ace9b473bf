//! Scoped atomic operations.
//!
//! [`Operation`] opens an operation on construction and closes it exactly once when dropped:
//! with [`OperationOutcome::Commit`] after [`Operation::commit`], with
//! [`OperationOutcome::Abort`] on every other exit path (`?`, early return, panic).
//!
//! ```rust
//! use editor_format::{Document, EditError, Operation, Position, TextDocument, TextRange};
//!
//! fn shout(doc: &mut TextDocument) -> Result<(), EditError> {
//!     let mut op = Operation::begin(doc);
//!     let range = TextRange::new(Position::new(0, 0), Position::new(0, 2));
//!     let text = op.text_in_range(range)?.to_uppercase();
//!     op.replace_range(&text, range)?;
//!     op.commit();
//!     Ok(())
//! }
//!
//! let mut doc = TextDocument::new("hi");
//! shout(&mut doc).unwrap();
//! assert_eq!(doc.text(), "HI");
//! ```

use crate::document::{Document, OperationOutcome};
use crate::error::EditError;
use std::ops::{Deref, DerefMut};
use tracing::trace;

/// RAII guard around [`Document::begin_operation`] / [`Document::end_operation`].
pub struct Operation<'d, D: Document + ?Sized> {
    doc: &'d mut D,
    committed: bool,
}

impl<'d, D: Document + ?Sized> Operation<'d, D> {
    /// Open an operation on `doc`.
    pub fn begin(doc: &'d mut D) -> Self {
        doc.begin_operation();
        trace!("operation opened");
        Self {
            doc,
            committed: false,
        }
    }

    /// Close the operation, keeping its edits.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl<D: Document + ?Sized> Deref for Operation<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.doc
    }
}

impl<D: Document + ?Sized> DerefMut for Operation<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.doc
    }
}

impl<D: Document + ?Sized> Drop for Operation<'_, D> {
    fn drop(&mut self) {
        let outcome = if self.committed {
            OperationOutcome::Commit
        } else {
            OperationOutcome::Abort
        };
        trace!(?outcome, "operation closed");
        self.doc.end_operation(outcome);
    }
}

/// Run `body` inside one atomic operation, committing on `Ok` and aborting on `Err`.
pub fn atomic<D, T, F>(doc: &mut D, body: F) -> Result<T, EditError>
where
    D: Document + ?Sized,
    F: FnOnce(&mut D) -> Result<T, EditError>,
{
    let mut op = Operation::begin(doc);
    let value = body(&mut *op)?;
    op.commit();
    Ok(value)
}
