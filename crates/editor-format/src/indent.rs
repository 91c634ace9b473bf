//! Indentation strategies and the range re-indent driver.

use crate::document::Document;
use crate::error::EditError;
use crate::operation::Operation;
use crate::position::TextRange;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// How [`Indenter::indent_line`] picks a line's indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStrategy {
    /// Ask the mode; falls back to [`IndentStrategy::Prev`] when the mode cannot indent.
    Smart,
    /// Copy the previous line's indentation.
    Prev,
    /// One indent unit deeper than now.
    Add,
    /// One indent unit shallower than now.
    Subtract,
}

impl IndentStrategy {
    /// Canonical name (`"smart"`, `"prev"`, `"add"`, `"subtract"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Smart => "smart",
            Self::Prev => "prev",
            Self::Add => "add",
            Self::Subtract => "subtract",
        }
    }
}

impl fmt::Display for IndentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown indent strategy '{0}'")]
pub struct UnknownIndentStrategy(pub String);

impl FromStr for IndentStrategy {
    type Err = UnknownIndentStrategy;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "smart" => Ok(Self::Smart),
            "prev" => Ok(Self::Prev),
            "add" => Ok(Self::Add),
            "subtract" => Ok(Self::Subtract),
            other => Err(UnknownIndentStrategy(other.to_string())),
        }
    }
}

/// Something that can re-indent a single line.
pub trait Indenter {
    /// Compute and apply the indentation of `line` under `strategy`.
    fn indent_line(&mut self, line: usize, strategy: IndentStrategy) -> Result<(), EditError>;
}

/// Re-indent every line touched by `range` with [`IndentStrategy::Smart`], as one atomic
/// operation.
pub fn auto_indent_range<D>(doc: &mut D, range: TextRange) -> Result<(), EditError>
where
    D: Document + Indenter + ?Sized,
{
    if range.to.line >= doc.line_count() {
        return Err(EditError::InvalidRange(range));
    }

    let mut op = Operation::begin(doc);
    for line in range.from.line..=range.to.line {
        op.indent_line(line, IndentStrategy::Smart)?;
    }
    op.commit();

    debug!(
        from = range.from.line,
        to = range.to.line,
        "auto-indented lines"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_names_round_trip() {
        for strategy in [
            IndentStrategy::Smart,
            IndentStrategy::Prev,
            IndentStrategy::Add,
            IndentStrategy::Subtract,
        ] {
            assert_eq!(strategy.as_str().parse::<IndentStrategy>(), Ok(strategy));
        }
        assert_eq!(
            "clever".parse::<IndentStrategy>(),
            Err(UnknownIndentStrategy("clever".to_string()))
        );
    }
}
