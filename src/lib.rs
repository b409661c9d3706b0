//! # keyedit
//!
//! Drive gpg's interactive `--edit-key` and `--card-edit` menus from code.
//!
//! The engine asks questions on its status channel (`GET_LINE
//! keyedit.prompt`, `GET_BOOL keyedit.save.okay`, ...). An *interactor* is a
//! small state machine that knows which answers one high-level operation
//! needs; the *dialogue* dispatcher feeds it engine events, writes its
//! answers back and keeps track of the first failure.
//!
//! - **Deterministic**: every interactor is a pure transition function plus
//!   a pure answer function
//! - **Strict**: an unexpected prompt is an error, never silently skipped
//! - **Recoverable**: failed rounds move to an error state from which the
//!   dialogue still quits the menu cleanly
//!
//! ## Feature Flags
//!
//! - `gpg` (default): [`GpgEngine`](engine::GpgEngine), running gpg as a
//!   child process with tokio
//!
//! ## Modules
//!
//! - [`core`]: error values, status codes, prompt tags and the interactor traits
//! - [`dialogue`]: the event dispatcher and type-erased dialogues
//! - [`interactors`]: ready-made dialogues (add user ID, sign key, ...)
//! - [`engine`]: the engine boundary and gpg process driver
//! - [`context`]: runs sessions and keeps the last interactor per kind
//!
//! ## Example Usage
//!
//! ```rust
//! use keyedit::prelude::*;
//!
//! let interactor = SetExpiryInteractor::new("2y");
//! let mut dialogue = Dialogue::new(interactor);
//! let mut answers = Vec::new();
//!
//! for (status, tag) in [
//!     (StatusCode::GetLine, prompt::KEYEDIT),
//!     (StatusCode::GetLine, prompt::KEYGEN_VALID),
//!     (StatusCode::GetLine, prompt::KEYEDIT),
//!     (StatusCode::GetBool, prompt::SAVE_OKAY),
//! ] {
//!     let err = dialogue.handle(status, Some(tag), &mut answers);
//!     assert!(!err.is_error());
//! }
//!
//! assert_eq!(answers, b"expire\n2y\nquit\nY\n");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core module (always included)
pub mod core;

pub mod context;
pub mod dialogue;
pub mod engine;
pub mod interactors;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::context::{Context, PassphraseProvider};
    pub use crate::core::*;
    pub use crate::dialogue::*;
    pub use crate::engine::{
        EditKind, EditRequest, Engine, EngineConfig, PinentryMode, StatusHandler,
    };
    pub use crate::interactors::*;

    #[cfg(feature = "gpg")]
    pub use crate::engine::GpgEngine;
}

// Re-export commonly used items at crate root
pub use crate::context::Context;
pub use crate::core::{ConfigError, EditInteractor, Error, Key, StatusCode, UserId};
pub use crate::dialogue::{Dialogue, Interactor, boxed};

#[cfg(feature = "gpg")]
pub use crate::engine::GpgEngine;
