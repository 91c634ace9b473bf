//! Structured text change deltas.
//!
//! Every change notification for document content carries a [`TextDelta`]: the ordered list
//! of edits one atomic operation applied, expressed in **character offsets**. Consumers
//! (highlighters, indexers, remote peers) can replay it without diffing old/new text.

/// A single text edit expressed in character offsets.
///
/// `start` is a character offset in the document **at the time this edit is applied**.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDeltaEdit {
    /// Start character offset of the edit.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextDeltaEdit {
    /// Length of `deleted_text` in characters.
    pub fn deleted_len(&self) -> usize {
        self.deleted_text.chars().count()
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    /// The edit that undoes this one.
    pub fn inverted(&self) -> Self {
        Self {
            start: self.start,
            deleted_text: self.inserted_text.clone(),
            inserted_text: self.deleted_text.clone(),
        }
    }
}

/// A structured description of a document text change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDelta {
    /// Character count before applying `edits`.
    pub before_char_count: usize,
    /// Character count after applying `edits`.
    pub after_char_count: usize,
    /// Ordered list of edits that transforms the "before" document into the "after" document.
    pub edits: Vec<TextDeltaEdit>,
}

impl TextDelta {
    /// Returns `true` if this delta contains no edits.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply the edits, in order, to `text`.
    pub fn apply_to(&self, text: &str) -> String {
        let mut chars: Vec<char> = text.chars().collect();
        for edit in &self.edits {
            let end = (edit.start + edit.deleted_len()).min(chars.len());
            chars.splice(edit.start.min(end)..end, edit.inserted_text.chars());
        }
        chars.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replays_edits_in_order() {
        let delta = TextDelta {
            before_char_count: 4,
            after_char_count: 8,
            edits: vec![
                TextDeltaEdit {
                    start: 4,
                    deleted_text: String::new(),
                    inserted_text: "*/".to_string(),
                },
                TextDeltaEdit {
                    start: 0,
                    deleted_text: String::new(),
                    inserted_text: "/*".to_string(),
                },
            ],
        };
        assert_eq!(delta.apply_to("x=1;"), "/*x=1;*/");
    }

    #[test]
    fn test_inverted_edit() {
        let edit = TextDeltaEdit {
            start: 2,
            deleted_text: "ab".to_string(),
            inserted_text: "xyz".to_string(),
        };
        let inverse = edit.inverted();
        assert_eq!(inverse.deleted_len(), 3);
        assert_eq!(inverse.inserted_text, "ab");
    }
}
