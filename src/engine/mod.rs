//! Engine boundary.
//!
//! An [`Engine`] runs one interactive edit session and reports every status
//! line to a [`StatusHandler`]. Prompts (`GET_BOOL`, `GET_LINE`,
//! `GET_HIDDEN`) come with a reply writer; whatever the handler writes there
//! is sent back to the engine as the answer.
//!
//! ```text
//! ┌──────────────┐  status + reply  ┌──────────────┐  event  ┌────────────┐
//! │    Engine    │ ───────────────▶ │ StatusHandler│ ──────▶ │ Interactor │
//! │ (gpg child)  │ ◀─────────────── │   (router)   │ ◀────── │  (dialogue)│
//! └──────────────┘      answer      └──────────────┘  line   └────────────┘
//! ```

mod config;
#[cfg(feature = "gpg")]
#[cfg_attr(docsrs, doc(cfg(feature = "gpg")))]
mod gpg;
mod status_line;

use std::io::Write;

use crate::core::{Error, StatusCode};

pub use config::*;
#[cfg(feature = "gpg")]
pub use gpg::*;
pub use status_line::*;

/// Which edit command to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// `--edit-key`.
    Key,
    /// `--card-edit`.
    Card,
}

/// One edit session request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRequest<'a> {
    /// Edit command.
    pub kind: EditKind,
    /// Key to edit; card sessions may run without one.
    pub fingerprint: Option<&'a str>,
}

impl<'a> EditRequest<'a> {
    /// Edit the key with `fingerprint`.
    pub fn key(fingerprint: &'a str) -> Self {
        Self {
            kind: EditKind::Key,
            fingerprint: Some(fingerprint),
        }
    }

    /// Edit the inserted card.
    pub fn card(fingerprint: Option<&'a str>) -> Self {
        Self {
            kind: EditKind::Card,
            fingerprint,
        }
    }
}

/// Receives the status lines of an edit session.
pub trait StatusHandler {
    /// Handle one status line.
    ///
    /// `reply` is present for prompts only. A non-zero return aborts the
    /// session.
    fn status(&mut self, status: StatusCode, args: Option<&str>, reply: Option<&mut dyn Write>)
    -> Error;
}

/// Runs edit sessions.
///
/// The future returned by [`edit`](Engine::edit) is not required to be
/// `Send`: a session runs on the task that started it and cannot be moved
/// to `tokio::spawn` on a multi-threaded runtime. Use a current-thread
/// runtime or a `LocalSet` to run sessions in the background.
#[allow(async_fn_in_trait)]
pub trait Engine {
    /// Run one session to completion.
    ///
    /// Data lines go to `out`. Returns the first error reported by the
    /// handler, or the engine's own failure.
    async fn edit(
        &mut self,
        request: EditRequest<'_>,
        handler: &mut dyn StatusHandler,
        out: &mut dyn Write,
    ) -> Result<(), Error>;
}
