//! Routes engine statuses to the passphrase provider or the dialogue.

use std::io::{self, Write};

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::{Error, StatusCode, prompt};
use crate::dialogue::Interactor;
use crate::engine::StatusHandler;

/// Supplies passphrases requested during an edit session.
pub trait PassphraseProvider: Send {
    /// Return the passphrase for the key described by `uid_hint`.
    ///
    /// `info` is the argument of the last `NEED_PASSPHRASE*` status;
    /// `prev_was_bad` is set when the previous attempt was rejected.
    /// Returning an error aborts the session.
    fn passphrase(
        &mut self,
        uid_hint: Option<&str>,
        info: Option<&str>,
        prev_was_bad: bool,
    ) -> Result<Zeroizing<String>, Error>;
}

/// [`StatusHandler`] for one session of the context.
pub(crate) struct Router<'a> {
    interactor: &'a mut dyn Interactor,
    provider: Option<&'a mut dyn PassphraseProvider>,
    uid_hint: Option<String>,
    passphrase_info: Option<String>,
    bad_passphrase: bool,
}

impl<'a> Router<'a> {
    pub(crate) fn new(
        interactor: &'a mut dyn Interactor,
        provider: Option<&'a mut dyn PassphraseProvider>,
    ) -> Self {
        Self {
            interactor,
            provider,
            uid_hint: None,
            passphrase_info: None,
            bad_passphrase: false,
        }
    }

    fn track(&mut self, status: StatusCode, args: Option<&str>) {
        match status {
            StatusCode::UseridHint => self.uid_hint = args.map(str::to_owned),
            StatusCode::NeedPassphrase
            | StatusCode::NeedPassphraseSym
            | StatusCode::NeedPassphrasePin => self.passphrase_info = args.map(str::to_owned),
            StatusCode::BadPassphrase => self.bad_passphrase = true,
            StatusCode::GoodPassphrase => {
                self.bad_passphrase = false;
                self.passphrase_info = None;
            }
            _ => {}
        }
    }

    fn answer_passphrase(&mut self, reply: &mut dyn Write) -> Option<Error> {
        let provider = self.provider.as_deref_mut()?;
        debug!(uid_hint = ?self.uid_hint, bad = self.bad_passphrase, "passphrase requested");

        let passphrase = match provider.passphrase(
            self.uid_hint.as_deref(),
            self.passphrase_info.as_deref(),
            self.bad_passphrase,
        ) {
            Ok(passphrase) => passphrase,
            Err(err) => {
                warn!(error = %err, "passphrase provider failed");
                return Some(err);
            }
        };
        self.bad_passphrase = false;

        let written = reply
            .write_all(passphrase.as_bytes())
            .and_then(|()| reply.write_all(b"\n"))
            .and_then(|()| reply.flush());
        Some(match written {
            Ok(()) => Error::NONE,
            Err(err) => err.into(),
        })
    }
}

impl StatusHandler for Router<'_> {
    fn status(
        &mut self,
        status: StatusCode,
        args: Option<&str>,
        reply: Option<&mut dyn Write>,
    ) -> Error {
        self.track(status, args);

        let Some(reply) = reply else {
            return self.interactor.handle(status, args, &mut io::sink());
        };

        let asks_passphrase = status == StatusCode::GetHidden
            && matches!(args, Some(prompt::PASSPHRASE_ENTER | prompt::PASSPHRASE_PIN_ASK));
        if asks_passphrase {
            if let Some(err) = self.answer_passphrase(reply) {
                return err;
            }
        }

        self.interactor.handle(status, args, reply)
    }
}
