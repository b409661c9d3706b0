//! Type-erased dialogues, as held by the context.

use std::any::Any;
use std::io::Write;

use super::Dialogue;
use crate::core::{EditInteractor, Error, StatusCode};

/// Object-safe view of a [`Dialogue`].
///
/// The context stores one of these per slot and feeds it engine events;
/// callers recover the concrete dialogue with [`downcast`].
pub trait Interactor: Send {
    /// Handle one engine event; see [`Dialogue::handle`].
    fn handle(&mut self, status: StatusCode, args: Option<&str>, out: &mut dyn Write) -> Error;

    /// Sticky error.
    fn last_error(&self) -> Error;

    /// Current state, formatted for logs.
    fn state_label(&self) -> String;

    /// Name of the underlying interactor.
    fn interactor_name(&self) -> &'static str;

    /// Borrow as `Any`.
    fn as_any(&self) -> &dyn Any;

    /// Convert into `Box<dyn Any>`.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<I: EditInteractor> Interactor for Dialogue<I> {
    fn handle(&mut self, status: StatusCode, args: Option<&str>, out: &mut dyn Write) -> Error {
        Dialogue::handle(self, status, args, out)
    }

    fn last_error(&self) -> Error {
        Dialogue::last_error(self)
    }

    fn state_label(&self) -> String {
        format!("{:?}", self.state())
    }

    fn interactor_name(&self) -> &'static str {
        self.interactor().name()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Start a dialogue for `interactor` and erase its type.
pub fn boxed<I: EditInteractor>(interactor: I) -> Box<dyn Interactor> {
    Box::new(Dialogue::new(interactor))
}

/// Recover the concrete dialogue from a boxed interactor.
///
/// Returns `None` if the box holds a different interactor.
pub fn downcast<I: EditInteractor>(boxed: Box<dyn Interactor>) -> Option<Dialogue<I>> {
    boxed.into_any().downcast::<Dialogue<I>>().ok().map(|d| *d)
}

/// Borrow the concrete dialogue inside a boxed interactor.
pub fn downcast_ref<I: EditInteractor>(boxed: &dyn Interactor) -> Option<&Dialogue<I>> {
    boxed.as_any().downcast_ref::<Dialogue<I>>()
}
