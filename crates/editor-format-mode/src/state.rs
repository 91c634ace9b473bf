//! Type-erased lexer state.

use std::any::Any;
use std::fmt;

/// Values that can live inside a [`LexState`].
///
/// Implemented for every `Clone + Debug + Send + 'static` type, so mode authors simply use
/// their own state struct.
pub trait StateValue: Any + fmt::Debug + Send {
    /// Deep copy into a fresh box.
    fn clone_value(&self) -> Box<dyn StateValue>;
    /// Upcast for downcasting.
    fn as_any(&self) -> &dyn Any;
    /// Mutable upcast for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> StateValue for T
where
    T: Any + Clone + fmt::Debug + Send,
{
    fn clone_value(&self) -> Box<dyn StateValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Opaque lexer state owned by one tokenization pass.
///
/// Cloning performs a deep copy, so two passes started from the same state never observe
/// each other's mutations.
pub struct LexState(Box<dyn StateValue>);

impl LexState {
    /// Wrap a mode-defined state value.
    pub fn new<S>(value: S) -> Self
    where
        S: Any + Clone + fmt::Debug + Send,
    {
        Self(Box::new(value))
    }

    /// Borrow the state as `S`, if that is its concrete type.
    pub fn downcast_ref<S: Any>(&self) -> Option<&S> {
        self.0.as_any().downcast_ref::<S>()
    }

    /// Mutably borrow the state as `S`, if that is its concrete type.
    pub fn downcast_mut<S: Any>(&mut self) -> Option<&mut S> {
        self.0.as_any_mut().downcast_mut::<S>()
    }

    /// `true` if the state holds an `S`.
    pub fn is<S: Any>(&self) -> bool {
        self.0.as_any().is::<S>()
    }
}

impl Clone for LexState {
    fn clone(&self) -> Self {
        Self(self.0.clone_value())
    }
}

impl fmt::Debug for LexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LexState").field(&self.0).finish()
    }
}
