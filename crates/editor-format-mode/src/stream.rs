//! Single-line cursor handed to a mode's tokenizer.
//!
//! A [`StringStream`] walks one line of text. A tokenizer consumes characters between
//! `start` and `pos`; the driver then calls [`StringStream::advance`] to close the token
//! and begin the next one. All offsets are byte offsets that sit on `char` boundaries.

use regex::{Captures, Regex};

/// Returns the visual column reached at byte offset `end` of `text`, expanding tabs to
/// `tab_size` stops.
pub fn count_column(text: &str, end: usize, tab_size: usize) -> usize {
    let tab_size = tab_size.max(1);
    let prefix = text.get(..end.min(text.len())).unwrap_or(text);
    prefix.chars().fold(0, |column, ch| {
        if ch == '\t' {
            column + tab_size - column % tab_size
        } else {
            column + 1
        }
    })
}

/// Byte length of the leading whitespace of `text`.
pub fn leading_whitespace_len(text: &str) -> usize {
    text.len() - text.trim_start().len()
}

/// Cursor over a single line of text.
#[derive(Debug, Clone)]
pub struct StringStream<'a> {
    string: &'a str,
    pos: usize,
    start: usize,
    tab_size: usize,
}

impl<'a> StringStream<'a> {
    /// Create a stream positioned at the start of `string`.
    pub fn new(string: &'a str, tab_size: usize) -> Self {
        Self {
            string,
            pos: 0,
            start: 0,
            tab_size,
        }
    }

    /// The whole line being tokenized.
    pub fn string(&self) -> &'a str {
        self.string
    }

    /// Current byte position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Byte position where the current token starts.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Tab width used for column computations.
    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// `true` when the whole line has been consumed.
    pub fn eol(&self) -> bool {
        self.pos >= self.string.len()
    }

    /// `true` when nothing has been consumed yet.
    pub fn sol(&self) -> bool {
        self.pos == 0
    }

    /// Next character, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    /// Consume and return the next character. Returns `None` at end of line.
    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consume the next character if `accept` returns `true` for it.
    pub fn eat<P>(&mut self, accept: P) -> Option<char>
    where
        P: FnOnce(char) -> bool,
    {
        let ch = self.peek()?;
        if accept(ch) {
            self.pos += ch.len_utf8();
            Some(ch)
        } else {
            None
        }
    }

    /// Consume the next character if it equals `expected`.
    pub fn eat_char(&mut self, expected: char) -> bool {
        self.eat(|ch| ch == expected).is_some()
    }

    /// Consume characters while `accept` holds. Returns `true` if anything was consumed.
    pub fn eat_while<P>(&mut self, mut accept: P) -> bool
    where
        P: FnMut(char) -> bool,
    {
        let begin = self.pos;
        while self.eat(&mut accept).is_some() {}
        self.pos > begin
    }

    /// Consume a run of whitespace.
    pub fn eat_space(&mut self) -> bool {
        self.eat_while(char::is_whitespace)
    }

    /// Consume the rest of the line.
    pub fn skip_to_end(&mut self) {
        self.pos = self.string.len();
    }

    /// Move up to (not past) the next occurrence of `ch`. Leaves the stream untouched and
    /// returns `false` when `ch` does not occur in the remainder.
    pub fn skip_to(&mut self, ch: char) -> bool {
        match self.remainder().find(ch) {
            Some(found) => {
                self.pos += found;
                true
            }
            None => false,
        }
    }

    /// Check whether the remainder starts with `pattern`, optionally consuming it.
    pub fn match_str(&mut self, pattern: &str, consume: bool, case_insensitive: bool) -> bool {
        let mut rest = self.remainder().chars();
        let mut len = 0;
        for expected in pattern.chars() {
            match rest.next() {
                Some(ch) if chars_match(ch, expected, case_insensitive) => len += ch.len_utf8(),
                _ => return false,
            }
        }
        if consume {
            self.pos += len;
        }
        true
    }

    /// Match `regex` at the current position, optionally consuming the match.
    ///
    /// A match starting later in the line is rejected, but the search still runs over the
    /// whole remainder unless the pattern begins with `^`. Build hot patterns with
    /// [`anchored_regex`].
    pub fn match_regex(&mut self, regex: &Regex, consume: bool) -> Option<Captures<'a>> {
        let rest: &'a str = self.remainder();
        let captures = regex.captures(rest)?;
        let whole = captures.get(0)?;
        if whole.start() != 0 {
            return None;
        }
        if consume {
            self.pos += whole.end();
        }
        Some(captures)
    }

    /// Un-consume `n` characters of the current token.
    ///
    /// # Panics
    ///
    /// Panics when `n` exceeds the number of characters consumed since `start`.
    pub fn back_up(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let consumed = &self.string[self.start..self.pos];
        match consumed.char_indices().rev().nth(n - 1) {
            Some((offset, _)) => self.pos = self.start + offset,
            None => panic!(
                "cannot back up {n} characters: only {} consumed since token start",
                consumed.chars().count()
            ),
        }
    }

    /// Visual column of the current token start.
    pub fn column(&self) -> usize {
        count_column(self.string, self.start, self.tab_size)
    }

    /// Visual width of the line's leading whitespace.
    pub fn indentation(&self) -> usize {
        count_column(
            self.string,
            leading_whitespace_len(self.string),
            self.tab_size,
        )
    }

    /// Text consumed since the current token started.
    pub fn current(&self) -> &'a str {
        &self.string[self.start..self.pos]
    }

    /// Unconsumed suffix of the line.
    pub fn remainder(&self) -> &'a str {
        &self.string[self.pos..]
    }

    /// Close the current token and return its text. The next token starts at `pos`.
    pub fn advance(&mut self) -> &'a str {
        assert!(
            self.pos <= self.string.len(),
            "stream advanced past end of line"
        );
        let token = self.current();
        self.start = self.pos;
        token
    }
}

/// Compile `pattern` anchored to the start of the haystack, for use with
/// [`StringStream::match_regex`].
pub fn anchored_regex(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})"))
}

fn chars_match(actual: char, expected: char, case_insensitive: bool) -> bool {
    if case_insensitive {
        actual.to_lowercase().eq(expected.to_lowercase())
    } else {
        actual == expected
    }
}
