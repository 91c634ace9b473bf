//! Line ending helpers.
//!
//! Documents are held with LF (`'\n'`) newlines so that the tokenizer sees one line per
//! `split('\n')` segment. The line ending found on load is remembered for saving.

/// The preferred newline sequence used when saving a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style LF (`'\n'`).
    #[default]
    Lf,
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
}

impl LineEnding {
    /// Detect the dominant line ending from a source text.
    ///
    /// Policy: if the input contains any CRLF (`"\r\n"`), returns [`LineEnding::Crlf`],
    /// otherwise [`LineEnding::Lf`].
    pub fn detect_in_text(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// Convert CRLF sequences to LF.
    pub fn normalize(text: &str) -> String {
        text.replace("\r\n", "\n")
    }

    /// Convert an LF-normalized text to this line ending for saving.
    pub fn apply_to_text(self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            Self::Crlf => text.replace('\n', "\r\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crlf_round_trip() {
        let source = "a{\r\n  b;\r\n}";
        let ending = LineEnding::detect_in_text(source);
        let normalized = LineEnding::normalize(source);

        assert_eq!(ending, LineEnding::Crlf);
        assert_eq!(normalized, "a{\n  b;\n}");
        assert_eq!(ending.apply_to_text(&normalized), source);
    }
}
