use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors raised while resolving or running a language mode.
pub enum ModeError {
    #[error("mode '{mode}' failed to advance stream")]
    /// The tokenizer returned repeatedly without consuming any input.
    Stalled {
        /// Name of the offending mode.
        mode: String,
    },

    #[error("lexer state does not belong to mode '{mode}'")]
    /// A state created by another mode was handed to this mode.
    StateMismatch {
        /// Name of the mode that rejected the state.
        mode: String,
    },

    #[error("unknown mode '{0}'")]
    /// No mode (or MIME alias) is registered under this name.
    UnknownMode(String),

    #[error("mode '{mode}' failed: {message}")]
    /// The tokenizer itself reported a failure.
    Tokenize {
        /// Name of the failing mode.
        mode: String,
        /// Tokenizer-provided description.
        message: String,
    },
}

impl ModeError {
    /// Convenience constructor for tokenizer failures.
    pub fn tokenize(mode: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tokenize {
            mode: mode.into(),
            message: message.into(),
        }
    }
}
