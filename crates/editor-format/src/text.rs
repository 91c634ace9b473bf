/// Split range text into physical lines. `str::split('\n')` keeps trailing empty segments,
/// matching editor line semantics (N newlines => N+1 lines).
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Byte offset of the `column`-th character of `text`, clamped to its length.
pub(crate) fn byte_offset_of_column(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map_or(text.len(), |(offset, _)| offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_keeps_trailing_empty_line() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b", ""]);
        assert_eq!(split_lines(""), vec![""]);
    }

    #[test]
    fn test_byte_offset_of_column() {
        assert_eq!(byte_offset_of_column("a你b", 0), 0);
        assert_eq!(byte_offset_of_column("a你b", 2), 4);
        assert_eq!(byte_offset_of_column("a你b", 9), 5);
    }
}
