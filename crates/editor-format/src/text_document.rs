//! In-memory document implementing [`Document`] and [`Indenter`].
//!
//! `TextDocument` aggregates:
//!
//! - **LineIndex**: rope-backed, LF-normalized text
//! - **Selection**: anchor/head, mapped through every edit
//! - **State cache**: lexer state at the start of each line, rebuilt lazily after edits
//! - **History**: one undo step per committed atomic operation
//! - **Notifications**: deferred until the outermost operation closes
//!
//! # Example
//!
//! ```rust
//! use editor_format::{Document, Position, TextDocument, TextRange};
//!
//! let mut doc = TextDocument::new("Hello\nWorld");
//! assert_eq!(doc.line_count(), 2);
//!
//! let range = TextRange::new(Position::new(1, 0), Position::new(1, 5));
//! doc.replace_range("there", range).unwrap();
//! assert_eq!(doc.text(), "Hello\nthere");
//!
//! doc.undo().unwrap();
//! assert_eq!(doc.text(), "Hello\nWorld");
//! ```

use crate::delta::{TextDelta, TextDeltaEdit};
use crate::document::{Document, OperationOutcome, TokenState};
use crate::error::EditError;
use crate::history::{History, HistoryStep};
use crate::indent::{IndentStrategy, Indenter};
use crate::line_ending::LineEnding;
use crate::line_index::LineIndex;
use crate::operation::atomic;
use crate::position::{Position, Selection, TextRange};
use crate::state::{StateChange, StateChangeCallback, StateChangeType};
use crate::text::byte_offset_of_column;
use editor_format_mode::{
    Indentation, LexState, Mode, StringStream, count_column, leading_whitespace_len, read_token,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Smart indentation answers beyond this column are ignored.
const MAX_SMART_INDENT: usize = 150;

/// Editing options of a [`TextDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Width of a tab stop, in columns.
    pub tab_size: usize,
    /// Columns added or removed by one indentation level.
    pub indent_unit: usize,
    /// Build indentation from tabs (padded with spaces) instead of spaces only.
    pub indent_with_tabs: bool,
    /// Maximum number of undo steps kept.
    pub max_undo: usize,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            tab_size: 4,
            indent_unit: 2,
            indent_with_tabs: false,
            max_undo: 1000,
        }
    }
}

#[derive(Debug)]
struct OperationLevel {
    edit_mark: usize,
    selection: Selection,
}

#[derive(Debug)]
struct PendingOperation {
    levels: Vec<OperationLevel>,
    edits: Vec<TextDeltaEdit>,
    before_char_count: usize,
    selection_before: Selection,
}

/// A mode-aware in-memory text document.
pub struct TextDocument {
    lines: LineIndex,
    line_ending: LineEnding,
    mode: Arc<Mode>,
    options: DocumentOptions,
    selection: Selection,
    history: History,
    /// `state_cache[i]` is the lexer state at the start of line `i`.
    state_cache: Vec<LexState>,
    pending: Option<PendingOperation>,
    version: u64,
    callbacks: Vec<StateChangeCallback>,
}

impl TextDocument {
    /// Plain-text document using the `null` mode.
    pub fn new(text: &str) -> Self {
        Self::with_mode(text, Arc::new(Mode::null()))
    }

    /// Document tokenized by `mode`, with default options.
    pub fn with_mode(text: &str, mode: Arc<Mode>) -> Self {
        Self::with_options(text, mode, DocumentOptions::default())
    }

    /// Fully configured document.
    pub fn with_options(text: &str, mode: Arc<Mode>, options: DocumentOptions) -> Self {
        let line_ending = LineEnding::detect_in_text(text);
        let lines = LineIndex::from_text(&LineEnding::normalize(text));
        Self {
            lines,
            line_ending,
            state_cache: vec![mode.start_state()],
            mode,
            history: History::new(options.max_undo),
            options,
            selection: Selection::default(),
            pending: None,
            version: 0,
            callbacks: Vec::new(),
        }
    }

    /// Complete LF-normalized text.
    pub fn text(&self) -> String {
        self.lines.text()
    }

    /// Text with the line ending detected on load.
    pub fn text_for_saving(&self) -> String {
        self.line_ending.apply_to_text(&self.lines.text())
    }

    /// Line ending used by [`text_for_saving`](Self::text_for_saving).
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.lines.char_count()
    }

    /// The document's mode.
    pub fn mode(&self) -> &Arc<Mode> {
        &self.mode
    }

    /// Switch modes; cached lexer states are discarded.
    pub fn set_mode(&mut self, mode: Arc<Mode>) {
        self.state_cache = vec![mode.start_state()];
        self.mode = mode;
    }

    /// Editing options.
    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// Version number, bumped once per emitted [`StateChange`].
    pub fn version(&self) -> u64 {
        self.version
    }

    /// `true` while an atomic operation is open.
    pub fn in_operation(&self) -> bool {
        self.pending.is_some()
    }

    /// Subscribe to state change notifications
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&StateChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// `true` if there is a step to undo.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// `true` if there is a step to redo.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of undo steps.
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    /// Number of redo steps.
    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// `true` if the document matches the last [`mark_clean`](Self::mark_clean) point.
    pub fn is_clean(&self) -> bool {
        self.history.is_clean()
    }

    /// Remember the current history position as saved.
    pub fn mark_clean(&mut self) {
        self.history.mark_clean();
    }

    /// Revert the last committed operation.
    pub fn undo(&mut self) -> Result<(), EditError> {
        if self.pending.is_some() {
            return Err(EditError::OperationOpen);
        }
        let step = self.history.pop_undo().ok_or(EditError::NothingToUndo)?;
        let before_char_count = self.lines.char_count();
        let selection_before = self.selection;

        let edits: Vec<TextDeltaEdit> = step
            .edits
            .iter()
            .rev()
            .map(TextDeltaEdit::inverted)
            .collect();
        for edit in &edits {
            self.splice(edit);
        }
        self.selection = step.selection_before;
        self.history.push_redo(step);

        self.emit_history_change(before_char_count, edits, selection_before);
        Ok(())
    }

    /// Re-apply the last undone operation.
    pub fn redo(&mut self) -> Result<(), EditError> {
        if self.pending.is_some() {
            return Err(EditError::OperationOpen);
        }
        let step = self.history.pop_redo().ok_or(EditError::NothingToRedo)?;
        let before_char_count = self.lines.char_count();
        let selection_before = self.selection;

        for edit in &step.edits {
            self.splice(edit);
        }
        self.selection = step.selection_after;
        let edits = step.edits.clone();
        self.history.push_undo(step);

        self.emit_history_change(before_char_count, edits, selection_before);
        Ok(())
    }

    fn checked_offset(&self, pos: Position) -> Result<usize, EditError> {
        self.lines
            .char_offset(pos)
            .ok_or(EditError::InvalidPosition(pos))
    }

    /// Apply `edit` to the text without recording it.
    fn splice(&mut self, edit: &TextDeltaEdit) {
        let line = self.lines.position_of(edit.start).line;
        self.lines
            .replace(edit.start, edit.start + edit.deleted_len(), &edit.inserted_text);
        self.state_cache.truncate(line + 1);
    }

    /// Lexer state at the start of `line`, replaying the mode from the nearest cached line.
    fn state_before_line(&mut self, line: usize) -> Result<LexState, EditError> {
        if self.state_cache.len() <= line {
            trace!(
                from = self.state_cache.len() - 1,
                to = line,
                "rebuilding lexer states"
            );
        }
        while self.state_cache.len() <= line {
            let index = self.state_cache.len() - 1;
            let mut state = self.state_cache[index].clone();
            let text = self.lines.line_text(index).unwrap_or_default();
            advance_over_line(&self.mode, &text, &mut state, self.tab_size())?;
            self.state_cache.push(state);
        }
        Ok(self.state_cache[line].clone())
    }

    fn flush(&mut self, pending: PendingOperation) {
        if !pending.edits.is_empty() {
            let delta = Arc::new(TextDelta {
                before_char_count: pending.before_char_count,
                after_char_count: self.lines.char_count(),
                edits: pending.edits.clone(),
            });
            self.history.push(HistoryStep {
                edits: pending.edits,
                selection_before: pending.selection_before,
                selection_after: self.selection,
            });
            self.emit(StateChangeType::DocumentModified, Some(delta));
        }
        if self.selection != pending.selection_before {
            self.emit(StateChangeType::SelectionChanged, None);
        }
    }

    fn emit_history_change(
        &mut self,
        before_char_count: usize,
        edits: Vec<TextDeltaEdit>,
        selection_before: Selection,
    ) {
        let delta = Arc::new(TextDelta {
            before_char_count,
            after_char_count: self.lines.char_count(),
            edits,
        });
        self.emit(StateChangeType::DocumentModified, Some(delta));
        if self.selection != selection_before {
            self.emit(StateChangeType::SelectionChanged, None);
        }
    }

    fn emit(&mut self, change_type: StateChangeType, delta: Option<Arc<TextDelta>>) {
        let old_version = self.version;
        self.version += 1;
        let mut change = StateChange::new(change_type, old_version, self.version);
        if let Some(delta) = delta {
            change = change.with_text_delta(delta);
        }
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}

/// Run `mode` over a whole line, as the highlighter would.
fn advance_over_line(
    mode: &Mode,
    text: &str,
    state: &mut LexState,
    tab_size: usize,
) -> Result<(), EditError> {
    if text.is_empty() {
        mode.blank_line(state)?;
        return Ok(());
    }
    let mut stream = StringStream::new(text, tab_size);
    while !stream.eol() {
        read_token(mode, &mut stream, state)?;
        stream.advance();
    }
    Ok(())
}

impl Document for TextDocument {
    fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    fn line_text(&self, line: usize) -> Option<String> {
        self.lines.line_text(line)
    }

    fn tab_size(&self) -> usize {
        self.options.tab_size.max(1)
    }

    fn text_in_range(&self, range: TextRange) -> Result<String, EditError> {
        if range.from > range.to {
            return Err(EditError::InvalidRange(range));
        }
        let start = self.checked_offset(range.from)?;
        let end = self.checked_offset(range.to)?;
        Ok(self.lines.slice(start, end))
    }

    fn replace_range(&mut self, text: &str, range: TextRange) -> Result<(), EditError> {
        if self.pending.is_none() {
            return atomic(self, |doc| doc.replace_range(text, range));
        }
        if range.from > range.to {
            return Err(EditError::InvalidRange(range));
        }
        let start = self.checked_offset(range.from)?;
        let end = self.checked_offset(range.to)?;
        let text = LineEnding::normalize(text);

        let edit = TextDeltaEdit {
            start,
            deleted_text: self.lines.slice(start, end),
            inserted_text: text,
        };
        if edit.deleted_text == edit.inserted_text {
            return Ok(());
        }

        self.splice(&edit);
        self.selection = Selection::new(
            self.selection.anchor.map_through(range, &edit.inserted_text),
            self.selection.head.map_through(range, &edit.inserted_text),
        );
        trace!(
            start,
            deleted = edit.deleted_len(),
            inserted = edit.inserted_len(),
            "replaced range"
        );
        if let Some(pending) = self.pending.as_mut() {
            pending.edits.push(edit);
        }
        Ok(())
    }

    fn token_state_at(&mut self, pos: Position) -> Result<TokenState, EditError> {
        self.checked_offset(pos)?;
        let mut state = self.state_before_line(pos.line)?;
        let text = self.lines.line_text(pos.line).unwrap_or_default();
        let end = byte_offset_of_column(&text, pos.column);

        let mut stream = StringStream::new(&text, self.tab_size());
        while stream.pos() < end && !stream.eol() {
            read_token(&self.mode, &mut stream, &mut state)?;
            stream.advance();
        }
        Ok(TokenState {
            mode: Arc::clone(&self.mode),
            state,
        })
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) -> Result<(), EditError> {
        self.checked_offset(selection.anchor)?;
        self.checked_offset(selection.head)?;
        if self.pending.is_none() {
            return atomic(self, |doc| doc.set_selection(selection));
        }
        self.selection = selection;
        Ok(())
    }

    fn begin_operation(&mut self) {
        let selection = self.selection;
        match self.pending.as_mut() {
            Some(pending) => pending.levels.push(OperationLevel {
                edit_mark: pending.edits.len(),
                selection,
            }),
            None => {
                self.pending = Some(PendingOperation {
                    levels: vec![OperationLevel {
                        edit_mark: 0,
                        selection,
                    }],
                    edits: Vec::new(),
                    before_char_count: self.lines.char_count(),
                    selection_before: selection,
                })
            }
        }
    }

    fn end_operation(&mut self, outcome: OperationOutcome) {
        let Some(mut pending) = self.pending.take() else {
            warn!("end_operation called without an open operation");
            return;
        };
        let Some(level) = pending.levels.pop() else {
            warn!("operation stack underflow");
            return;
        };

        if outcome == OperationOutcome::Abort {
            let reverted: Vec<TextDeltaEdit> = pending.edits.drain(level.edit_mark..).collect();
            for edit in reverted.iter().rev() {
                self.splice(&edit.inverted());
            }
            self.selection = level.selection;
            debug!(reverted = reverted.len(), "operation aborted");
        }

        if pending.levels.is_empty() {
            self.flush(pending);
        } else {
            self.pending = Some(pending);
        }
    }
}

impl Indenter for TextDocument {
    fn indent_line(&mut self, line: usize, strategy: IndentStrategy) -> Result<(), EditError> {
        let text = self
            .lines
            .line_text(line)
            .ok_or(EditError::InvalidPosition(Position::new(line, 0)))?;
        let tab_size = self.tab_size();
        let space_len = leading_whitespace_len(&text);
        let current_space = &text[..space_len];
        let current_column = count_column(&text, space_len, tab_size);

        let strategy = match strategy {
            IndentStrategy::Smart if !self.mode.has_indent() => IndentStrategy::Prev,
            other => other,
        };

        let column = if text.trim().is_empty() {
            0
        } else {
            match strategy {
                IndentStrategy::Smart => {
                    let state = self.state_before_line(line)?;
                    match self.mode.indent(&state, &text[space_len..], &text) {
                        Some(Indentation::Column(column)) if column <= MAX_SMART_INDENT => column,
                        _ => return Ok(()),
                    }
                }
                IndentStrategy::Prev => {
                    let prev = line
                        .checked_sub(1)
                        .and_then(|prev| self.lines.line_text(prev));
                    match prev {
                        Some(prev) => count_column(&prev, leading_whitespace_len(&prev), tab_size),
                        None => 0,
                    }
                }
                IndentStrategy::Add => current_column + self.options.indent_unit,
                IndentStrategy::Subtract => current_column.saturating_sub(self.options.indent_unit),
            }
        };

        let mut indent = String::new();
        let mut filled = 0;
        if self.options.indent_with_tabs {
            for _ in 0..column / tab_size {
                filled += tab_size;
                indent.push('\t');
            }
        }
        if filled < column {
            indent.push_str(&" ".repeat(column - filled));
        }

        if indent != current_space {
            let range = TextRange::new(
                Position::new(line, 0),
                Position::new(line, current_space.chars().count()),
            );
            self.replace_range(&indent, range)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TextDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextDocument")
            .field("lines", &self.lines.line_count())
            .field("mode", &self.mode.name())
            .field("selection", &self.selection)
            .field("version", &self.version)
            .field("in_operation", &self.pending.is_some())
            .finish()
    }
}
