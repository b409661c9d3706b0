//! Dialogue driver.
//!
//! A [`Dialogue`] pairs an [`EditInteractor`](crate::core::EditInteractor)
//! with its running state and is fed one engine event at a time. The
//! [`Interactor`] trait erases the interactor type so the context can hold
//! any dialogue in a single slot.

mod boxed;
mod dispatch;

pub use boxed::*;
pub use dispatch::*;
