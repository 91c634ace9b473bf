//! Language mode descriptors.
//!
//! A [`Mode`] is a bundle of capabilities rather than a trait object hierarchy: the tokenizer
//! and start state are mandatory, everything else is an optional field and callers check for
//! its presence before relying on it.

use crate::error::ModeError;
use crate::state::LexState;
use crate::stream::StringStream;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Style tag attached to a token (e.g. `"keyword"`, `"tag"`). `None` means unstyled.
pub type Style = &'static str;

/// Outcome of one tokenizer step.
pub type TokenResult = Result<Option<Style>, ModeError>;

/// Number of times a tokenizer may return without consuming input before the driver gives up.
pub const MAX_STALLED_STEPS: usize = 10;

type StartStateFn = Arc<dyn Fn() -> LexState + Send + Sync>;
type TokenFn = Arc<dyn Fn(&mut StringStream<'_>, &mut LexState) -> TokenResult + Send + Sync>;
type BlankLineFn = Arc<dyn Fn(&mut LexState) -> Result<(), ModeError> + Send + Sync>;
type InnerModeFn = Arc<dyn for<'s> Fn(&'s LexState) -> Option<InnerMode<'s>> + Send + Sync>;

/// Type-erased indentation hook: `(state, text_after_indent, full_line)`.
pub type IndentFn = Arc<dyn Fn(&LexState, &str, &str) -> Indentation + Send + Sync>;

/// Type-erased newline predicate: `(style, token_text, text_after, state)`.
pub type NewlineFn = Arc<dyn Fn(Option<Style>, &str, &str, &LexState) -> bool + Send + Sync>;

/// Answer of a mode's indentation hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indentation {
    /// Indent the line to this visual column.
    Column(usize),
    /// The mode has no opinion; leave the line alone.
    Pass,
}

/// The effective mode and state at some point of a (possibly nested) tokenization.
#[derive(Debug, Clone)]
pub struct InnerMode<'s> {
    /// Innermost mode.
    pub mode: Arc<Mode>,
    /// State owned by `mode`, borrowed from the outer state.
    pub state: &'s LexState,
}

/// A language mode.
#[derive(Clone)]
pub struct Mode {
    name: String,
    start_state: StartStateFn,
    token: TokenFn,
    blank_line: Option<BlankLineFn>,
    inner_mode: Option<InnerModeFn>,
    indent: Option<IndentFn>,
    comment_start: Option<String>,
    comment_end: Option<String>,
    newline_after_token: Option<NewlineFn>,
}

impl Mode {
    /// Start building a mode whose lexer state is `S`.
    ///
    /// ```rust
    /// use editor_format_mode::{Mode, StringStream};
    ///
    /// let words = Mode::builder(
    ///     "words",
    ///     || 0usize,
    ///     |stream: &mut StringStream<'_>, count: &mut usize| {
    ///         if stream.eat_space() {
    ///             return Ok(None);
    ///         }
    ///         stream.eat_while(|c| !c.is_whitespace());
    ///         *count += 1;
    ///         Ok(Some("word"))
    ///     },
    /// )
    /// .build();
    /// assert_eq!(words.name(), "words");
    /// ```
    pub fn builder<S, F, T>(name: impl Into<String>, start_state: F, token: T) -> ModeBuilder<S>
    where
        S: Any + Clone + fmt::Debug + Send,
        F: Fn() -> S + Send + Sync + 'static,
        T: Fn(&mut StringStream<'_>, &mut S) -> TokenResult + Send + Sync + 'static,
    {
        let name = name.into();
        let owner = name.clone();
        ModeBuilder {
            mode: Mode {
                name,
                start_state: Arc::new(move || LexState::new(start_state())),
                token: token_fn(move |stream, state| {
                    let typed = state
                        .downcast_mut::<S>()
                        .ok_or_else(|| state_mismatch(&owner))?;
                    token(stream, typed)
                }),
                blank_line: None,
                inner_mode: None,
                indent: None,
                comment_start: None,
                comment_end: None,
                newline_after_token: None,
            },
            _state: PhantomData,
        }
    }

    /// The minimal mode: every line is a single unstyled token.
    pub fn null() -> Self {
        Mode::builder(
            "null",
            || (),
            |stream: &mut StringStream<'_>, _: &mut ()| {
                stream.skip_to_end();
                Ok(None)
            },
        )
        .build()
    }

    /// Registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fresh state for the beginning of a document.
    pub fn start_state(&self) -> LexState {
        (self.start_state)()
    }

    /// Independent copy of `state`.
    pub fn copy_state(&self, state: &LexState) -> LexState {
        state.clone()
    }

    /// Run one tokenizer step. Prefer [`read_token`], which also guards against stalls.
    pub fn token(&self, stream: &mut StringStream<'_>, state: &mut LexState) -> TokenResult {
        (self.token)(stream, state)
    }

    /// `true` if the mode wants to observe blank lines.
    pub fn has_blank_line(&self) -> bool {
        self.blank_line.is_some()
    }

    /// Advance `state` over an empty line. No-op when the mode has no hook.
    pub fn blank_line(&self, state: &mut LexState) -> Result<(), ModeError> {
        match &self.blank_line {
            Some(hook) => hook(state),
            None => Ok(()),
        }
    }

    /// Walk nested modes down to the innermost one active in `state`.
    pub fn resolve_inner<'s>(self: &Arc<Self>, state: &'s LexState) -> InnerMode<'s> {
        let mut current = InnerMode {
            mode: Arc::clone(self),
            state,
        };
        while let Some(resolve) = current.mode.inner_mode.clone() {
            match resolve(current.state) {
                Some(next) if !Arc::ptr_eq(&next.mode, &current.mode) => current = next,
                _ => break,
            }
        }
        current
    }

    /// Walk nested modes until `target` is reached. `None` if `target` is not active in `state`.
    pub fn find_inner<'s>(
        self: &Arc<Self>,
        state: &'s LexState,
        target: &Arc<Mode>,
    ) -> Option<InnerMode<'s>> {
        let mut current = InnerMode {
            mode: Arc::clone(self),
            state,
        };
        loop {
            if Arc::ptr_eq(&current.mode, target) {
                return Some(current);
            }
            let resolve = current.mode.inner_mode.clone()?;
            match resolve(current.state) {
                Some(next) if !Arc::ptr_eq(&next.mode, &current.mode) => current = next,
                _ => return None,
            }
        }
    }

    /// `true` if the mode computes indentation.
    pub fn has_indent(&self) -> bool {
        self.indent.is_some()
    }

    /// Ask the mode for the indentation of a line. `None` when the mode has no hook.
    pub fn indent(&self, state: &LexState, text_after: &str, line: &str) -> Option<Indentation> {
        self.indent
            .as_ref()
            .map(|indent| indent(state, text_after, line))
    }

    /// Block comment opener, if declared.
    pub fn comment_start(&self) -> Option<&str> {
        self.comment_start.as_deref().filter(|s| !s.is_empty())
    }

    /// Block comment closer, if declared.
    pub fn comment_end(&self) -> Option<&str> {
        self.comment_end.as_deref().filter(|s| !s.is_empty())
    }

    /// Both block comment delimiters, when the mode declares them.
    pub fn comment_delimiters(&self) -> Option<(&str, &str)> {
        Some((self.comment_start()?, self.comment_end()?))
    }

    /// `true` if the mode declares a newline placement predicate.
    pub fn has_newline_policy(&self) -> bool {
        self.newline_after_token.is_some()
    }

    /// Whether a line break should follow `token`. Always `false` without a predicate.
    pub fn newline_after_token(
        &self,
        style: Option<Style>,
        token: &str,
        text_after: &str,
        state: &LexState,
    ) -> bool {
        self.newline_after_token
            .as_ref()
            .is_some_and(|predicate| predicate(style, token, text_after, state))
    }

    pub(crate) fn set_comments(&mut self, start: Option<String>, end: Option<String>) {
        if start.is_some() {
            self.comment_start = start;
        }
        if end.is_some() {
            self.comment_end = end;
        }
    }

    pub(crate) fn set_newline_after_token(&mut self, predicate: NewlineFn) {
        self.newline_after_token = Some(predicate);
    }

    pub(crate) fn set_indent(&mut self, indent: IndentFn) {
        self.indent = Some(indent);
    }
}

impl fmt::Debug for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mode")
            .field("name", &self.name)
            .field("blank_line", &self.blank_line.is_some())
            .field("inner_mode", &self.inner_mode.is_some())
            .field("indent", &self.indent.is_some())
            .field("comment_start", &self.comment_start)
            .field("comment_end", &self.comment_end)
            .field("newline_after_token", &self.newline_after_token.is_some())
            .finish()
    }
}

/// Typed builder for [`Mode`]; every hook receives the concrete state `S`.
pub struct ModeBuilder<S> {
    mode: Mode,
    _state: PhantomData<fn() -> S>,
}

impl<S> ModeBuilder<S>
where
    S: Any + Clone + fmt::Debug + Send,
{
    /// Hook run on empty lines.
    pub fn blank_line<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut S) + Send + Sync + 'static,
    {
        let owner = self.mode.name.clone();
        self.mode.blank_line = Some(Arc::new(move |state: &mut LexState| {
            let typed = state
                .downcast_mut::<S>()
                .ok_or_else(|| state_mismatch(&owner))?;
            hook(typed);
            Ok(())
        }));
        self
    }

    /// Hook exposing a nested mode (e.g. a script block inside markup).
    pub fn inner_mode<F>(mut self, resolve: F) -> Self
    where
        F: for<'s> Fn(&'s S) -> Option<InnerMode<'s>> + Send + Sync + 'static,
    {
        self.mode.inner_mode = Some(inner_mode_fn(move |state| {
            state.downcast_ref::<S>().and_then(|typed| resolve(typed))
        }));
        self
    }

    /// Smart indentation hook: `(state, text_after_indent, full_line)`.
    pub fn indent<F>(mut self, indent: F) -> Self
    where
        F: Fn(&S, &str, &str) -> Indentation + Send + Sync + 'static,
    {
        self.mode.indent = Some(indent_fn(move |state, text_after, line| {
            state
                .downcast_ref::<S>()
                .map_or(Indentation::Pass, |typed| indent(typed, text_after, line))
        }));
        self
    }

    /// Block comment delimiters.
    pub fn comments(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.mode.comment_start = Some(start.into());
        self.mode.comment_end = Some(end.into());
        self
    }

    /// Newline placement predicate used when reformatting.
    pub fn newline_after_token<F>(mut self, predicate: F) -> Self
    where
        F: Fn(Option<Style>, &str, &str, &S) -> bool + Send + Sync + 'static,
    {
        self.mode.newline_after_token = Some(newline_fn(move |style, token, text_after, state| {
            state
                .downcast_ref::<S>()
                .is_some_and(|typed| predicate(style, token, text_after, typed))
        }));
        self
    }

    /// Finish the mode.
    pub fn build(self) -> Mode {
        self.mode
    }
}

/// Run the tokenizer until it consumes input, at most [`MAX_STALLED_STEPS`] times.
pub fn read_token(
    mode: &Mode,
    stream: &mut StringStream<'_>,
    state: &mut LexState,
) -> TokenResult {
    for _ in 0..MAX_STALLED_STEPS {
        let style = mode.token(stream, state)?;
        if stream.pos() > stream.start() {
            return Ok(style);
        }
    }
    Err(ModeError::Stalled {
        mode: mode.name.clone(),
    })
}

fn state_mismatch(mode: &str) -> ModeError {
    ModeError::StateMismatch {
        mode: mode.to_string(),
    }
}

fn token_fn<F>(token: F) -> TokenFn
where
    F: Fn(&mut StringStream<'_>, &mut LexState) -> TokenResult + Send + Sync + 'static,
{
    Arc::new(token)
}

fn inner_mode_fn<F>(resolve: F) -> InnerModeFn
where
    F: for<'s> Fn(&'s LexState) -> Option<InnerMode<'s>> + Send + Sync + 'static,
{
    Arc::new(resolve)
}

pub(crate) fn indent_fn<F>(indent: F) -> IndentFn
where
    F: Fn(&LexState, &str, &str) -> Indentation + Send + Sync + 'static,
{
    Arc::new(indent)
}

pub(crate) fn newline_fn<F>(predicate: F) -> NewlineFn
where
    F: Fn(Option<Style>, &str, &str, &LexState) -> bool + Send + Sync + 'static,
{
    Arc::new(predicate)
}
