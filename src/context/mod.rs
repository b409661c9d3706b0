//! The context running edit sessions.
//!
//! A [`Context`] owns an [`Engine`] and at most one interactor per dialogue
//! kind. Starting a session installs the interactor in its slot, dropping
//! the one from the previous session; after the session the caller may
//! inspect or take it back.
//!
//! ```no_run
//! # async fn run() -> Result<(), keyedit::Error> {
//! use keyedit::prelude::*;
//!
//! let mut ctx = Context::new(GpgEngine::from_env());
//! let key = Key::new("0123456789ABCDEF0123456789ABCDEF01234567");
//!
//! ctx.edit(&key, boxed(SetExpiryInteractor::new("2y")), &mut std::io::sink())
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod router;
#[cfg(test)]
mod scripted;

use std::io::Write;

use tracing::{debug, warn};

use crate::core::{Error, Key, code};
use crate::dialogue::Interactor;
use crate::engine::{EditKind, EditRequest, Engine};

pub use router::PassphraseProvider;
use router::Router;
#[cfg(test)]
pub(crate) use scripted::ScriptedEngine;

/// Runs edit sessions on an engine.
pub struct Context<E> {
    engine: E,
    passphrase_provider: Option<Box<dyn PassphraseProvider>>,
    edit: Option<Box<dyn Interactor>>,
    card_edit: Option<Box<dyn Interactor>>,
}

impl<E: Engine> Context<E> {
    /// Create a context around `engine`.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            passphrase_provider: None,
            edit: None,
            card_edit: None,
        }
    }

    /// The engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The engine, mutably.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Answer passphrase prompts with `provider`.
    pub fn set_passphrase_provider(&mut self, provider: Box<dyn PassphraseProvider>) {
        self.passphrase_provider = Some(provider);
    }

    /// Remove the passphrase provider.
    pub fn take_passphrase_provider(&mut self) -> Option<Box<dyn PassphraseProvider>> {
        self.passphrase_provider.take()
    }

    /// Run `interactor` on `key` with `--edit-key`.
    ///
    /// Data lines are written to `out`. Returns the engine's error if it
    /// failed, else the dialogue's sticky error.
    pub async fn edit(
        &mut self,
        key: &Key,
        interactor: Box<dyn Interactor>,
        out: &mut dyn Write,
    ) -> Result<(), Error> {
        let interactor = self.edit.insert(interactor);
        let Some(fingerprint) = key.fingerprint() else {
            warn!(interactor = interactor.interactor_name(), "key has no fingerprint");
            return Err(Error::from_code(code::INV_VALUE));
        };

        let request = EditRequest::key(fingerprint);
        run(
            &mut self.engine,
            self.passphrase_provider.as_deref_mut(),
            interactor.as_mut(),
            request,
            out,
        )
        .await
    }

    /// Run `interactor` with `--card-edit`, optionally on `key`.
    pub async fn card_edit(
        &mut self,
        key: Option<&Key>,
        interactor: Box<dyn Interactor>,
        out: &mut dyn Write,
    ) -> Result<(), Error> {
        let interactor = self.card_edit.insert(interactor);
        let request = EditRequest::card(key.and_then(Key::fingerprint));
        run(
            &mut self.engine,
            self.passphrase_provider.as_deref_mut(),
            interactor.as_mut(),
            request,
            out,
        )
        .await
    }

    /// The interactor of the last [`edit`](Context::edit).
    pub fn last_edit_interactor(&self) -> Option<&dyn Interactor> {
        self.edit.as_deref()
    }

    /// Take the interactor of the last [`edit`](Context::edit).
    pub fn take_last_edit_interactor(&mut self) -> Option<Box<dyn Interactor>> {
        self.edit.take()
    }

    /// The interactor of the last [`card_edit`](Context::card_edit).
    pub fn last_card_edit_interactor(&self) -> Option<&dyn Interactor> {
        self.card_edit.as_deref()
    }

    /// Take the interactor of the last [`card_edit`](Context::card_edit).
    pub fn take_last_card_edit_interactor(&mut self) -> Option<Box<dyn Interactor>> {
        self.card_edit.take()
    }
}

async fn run<E: Engine>(
    engine: &mut E,
    provider: Option<&mut (dyn PassphraseProvider + 'static)>,
    interactor: &mut dyn Interactor,
    request: EditRequest<'_>,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let kind = match request.kind {
        EditKind::Key => "edit",
        EditKind::Card => "card-edit",
    };
    debug!(
        kind,
        interactor = interactor.interactor_name(),
        fingerprint = ?request.fingerprint,
        "starting session"
    );

    let provider = provider.map(|p| p as &mut dyn PassphraseProvider);
    let mut router = Router::new(&mut *interactor, provider);
    let result = engine.edit(request, &mut router, out).await;
    drop(router);

    let outcome = result.and_then(|()| interactor.last_error().into_result());
    debug!(kind, state = %interactor.state_label(), ?outcome, "session finished");
    outcome
}
