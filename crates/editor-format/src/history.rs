//! Undo/redo history. One step per committed atomic operation.

use crate::delta::TextDeltaEdit;
use crate::position::Selection;

#[derive(Debug, Clone)]
pub(crate) struct HistoryStep {
    pub(crate) edits: Vec<TextDeltaEdit>,
    pub(crate) selection_before: Selection,
    pub(crate) selection_after: Selection,
}

#[derive(Debug)]
pub(crate) struct History {
    undo_stack: Vec<HistoryStep>,
    redo_stack: Vec<HistoryStep>,
    max_undo: usize,
    /// Clean point tracking. Uses `undo_stack.len()` as the saved position in the linear history.
    /// When `redo_stack` is non-empty, `clean_index` may be greater than `undo_stack.len()`.
    clean_index: Option<usize>,
}

impl History {
    pub(crate) fn new(max_undo: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo: max_undo.max(1),
            clean_index: Some(0),
        }
    }

    pub(crate) fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub(crate) fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub(crate) fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub(crate) fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub(crate) fn is_clean(&self) -> bool {
        self.clean_index == Some(self.undo_stack.len())
    }

    pub(crate) fn mark_clean(&mut self) {
        self.clean_index = Some(self.undo_stack.len());
    }

    /// Record a fresh edit step; discards anything that could be redone.
    pub(crate) fn push(&mut self, step: HistoryStep) {
        if !self.redo_stack.is_empty() {
            // If clean point is in redo area, it becomes unreachable after clearing redo.
            if let Some(clean_index) = self.clean_index
                && clean_index > self.undo_stack.len()
            {
                self.clean_index = None;
            }
            self.redo_stack.clear();
        }

        if self.undo_stack.len() >= self.max_undo {
            self.undo_stack.remove(0);
            self.clean_index = match self.clean_index {
                Some(0) | None => None,
                Some(index) => Some(index - 1),
            };
        }

        self.undo_stack.push(step);
    }

    pub(crate) fn pop_undo(&mut self) -> Option<HistoryStep> {
        self.undo_stack.pop()
    }

    pub(crate) fn pop_redo(&mut self) -> Option<HistoryStep> {
        self.redo_stack.pop()
    }

    pub(crate) fn push_redo(&mut self, step: HistoryStep) {
        self.redo_stack.push(step);
    }

    /// Put a redone step back without touching the redo stack.
    pub(crate) fn push_undo(&mut self, step: HistoryStep) {
        self.undo_stack.push(step);
    }
}
