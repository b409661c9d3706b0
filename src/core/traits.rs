//! Core traits for edit dialogues.
//!
//! These traits define the interface between the generic dispatcher and
//! the dialogue-specific state machines.

use std::borrow::Cow;
use std::fmt;

use super::error::{Error, code};
use super::status::StatusCode;

/// State of one dialogue.
///
/// Every interactor defines its own state enum. Two values are reserved:
/// [`START`](DialogueState::START) is the only legal initial state and
/// [`ERROR`](DialogueState::ERROR) is entered whenever a round fails.
pub trait DialogueState: Copy + Eq + fmt::Debug + Send + 'static {
    /// Initial state.
    const START: Self;

    /// State forced by the dispatcher after a failed round.
    const ERROR: Self;
}

/// A deterministic state machine answering the engine's prompts.
///
/// The dispatcher calls [`next_state`](EditInteractor::next_state) for each
/// event and, when the state changed, [`action`](EditInteractor::action) for
/// the text to write back.
///
/// # Requirements
///
/// - `action` MUST be a pure function of the state and the configuration
/// - `next_state` MUST return an error for every event it does not expect;
///   unexpected input is never ignored
///
/// # Example
///
/// ```
/// use std::borrow::Cow;
/// use keyedit::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Toggle { Start, Command, Error }
///
/// impl DialogueState for Toggle {
///     const START: Self = Toggle::Start;
///     const ERROR: Self = Toggle::Error;
/// }
///
/// struct Disable;
///
/// impl EditInteractor for Disable {
///     type State = Toggle;
///
///     fn name(&self) -> &'static str { "disable" }
///
///     fn action(&self, state: Toggle) -> Result<Option<Cow<'_, str>>, Error> {
///         Ok(match state {
///             Toggle::Command => Some(Cow::Borrowed("disable")),
///             _ => None,
///         })
///     }
///
///     fn next_state(
///         &mut self,
///         state: Toggle,
///         status: StatusCode,
///         args: &str,
///         _last_error: Error,
///     ) -> Result<Toggle, Error> {
///         match (state, status, args) {
///             (Toggle::Start, StatusCode::GetLine, prompt::KEYEDIT) => Ok(Toggle::Command),
///             _ => Err(Error::from_code(code::GENERAL)),
///         }
///     }
/// }
/// ```
pub trait EditInteractor: Send + 'static {
    /// The dialogue's state type.
    type State: DialogueState;

    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// The line to send for `state`.
    ///
    /// `Ok(None)` writes nothing; `Ok(Some(""))` writes an empty line. An
    /// `Err` aborts the round even though the transition succeeded.
    fn action(&self, state: Self::State) -> Result<Option<Cow<'_, str>>, Error>;

    /// Compute the state following `state` for one engine event.
    ///
    /// `last_error` is the dialogue's sticky error, handed back by dialogues
    /// that stay in [`DialogueState::ERROR`] on unexpected input.
    fn next_state(
        &mut self,
        state: Self::State,
        status: StatusCode,
        args: &str,
        last_error: Error,
    ) -> Result<Self::State, Error>;

    /// Informational statuses that leave the state untouched.
    fn needs_no_response(&self, status: StatusCode) -> bool {
        default_needs_no_response(status)
    }

    /// Interpret the argument of an `ERROR` status.
    fn parse_status_error(&self, args: &str) -> Error {
        parse_status_error(args)
    }
}

/// Statuses that take part in the dialogue by default.
pub fn default_needs_no_response(status: StatusCode) -> bool {
    !matches!(
        status,
        StatusCode::AlreadySigned
            | StatusCode::Error
            | StatusCode::GetBool
            | StatusCode::GetLine
            | StatusCode::KeyCreated
            | StatusCode::NeedPassphraseSym
            | StatusCode::ScOpFailure
            | StatusCode::CardCtrl
            | StatusCode::BackupKeyCreated
    )
}

/// Parse `"<location> <code> ..."`, falling back to a general error.
pub fn parse_status_error(args: &str) -> Error {
    args.split(' ')
        .nth(1)
        .and_then(|field| field.parse::<u32>().ok())
        .map(Error::from_raw)
        .unwrap_or(Error::from_code(code::GENERAL))
}

/// Statuses that are errors in themselves.
pub fn status_to_error(status: StatusCode) -> Error {
    match status {
        StatusCode::MissingPassphrase => Error::from_code(code::NO_PASSPHRASE),
        StatusCode::AlreadySigned => Error::from_code(code::ALREADY_SIGNED),
        StatusCode::SigExpired => Error::from_code(code::SIG_EXPIRED),
        _ => Error::NONE,
    }
}

/// Map the first field of an `SC_OP_FAILURE` argument.
pub fn sc_op_failure_to_error(args: &str) -> Error {
    let reason = args.split(' ').next().and_then(|f| f.parse::<u32>().ok());
    let code = match reason {
        Some(1) => code::CANCELED,
        Some(2) => code::BAD_PIN,
        Some(3) => code::PIN_BLOCKED,
        Some(4) => code::NO_RESET_CODE,
        _ => code::CARD,
    };
    Error::from_code(code)
}

/// Unexpected input while already in the error state: keep reporting the
/// sticky error.
pub(crate) fn stay_in_error<S: DialogueState>(last_error: Error) -> Result<S, Error> {
    if last_error.is_error() {
        Err(last_error)
    } else {
        Ok(S::ERROR)
    }
}

/// Unexpected input in any other state.
pub(crate) fn unexpected<S>() -> Result<S, Error> {
    Err(Error::from_code(code::GENERAL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_needs_no_response() {
        assert!(!default_needs_no_response(StatusCode::GetLine));
        assert!(!default_needs_no_response(StatusCode::GetBool));
        assert!(!default_needs_no_response(StatusCode::CardCtrl));
        assert!(!default_needs_no_response(StatusCode::BackupKeyCreated));
        assert!(default_needs_no_response(StatusCode::GetHidden));
        assert!(default_needs_no_response(StatusCode::SigCreated));
        assert!(default_needs_no_response(StatusCode::UseridHint));
        assert!(default_needs_no_response(StatusCode::ScOpSuccess));
    }

    #[test]
    fn test_parse_status_error() {
        let err = parse_status_error("keyedit.sign 87");
        assert_eq!(err.code(), code::BAD_PIN);

        let err = parse_status_error(&format!("keygen {}", (6u32 << 24) | 91));
        assert_eq!(err.code(), code::WRONG_CARD);

        assert_eq!(parse_status_error("onlyone").code(), code::GENERAL);
        assert_eq!(parse_status_error("loc notanumber").code(), code::GENERAL);
        assert_eq!(parse_status_error("").code(), code::GENERAL);
    }

    #[test]
    fn test_status_to_error() {
        assert_eq!(
            status_to_error(StatusCode::MissingPassphrase).code(),
            code::NO_PASSPHRASE
        );
        assert_eq!(
            status_to_error(StatusCode::AlreadySigned).code(),
            code::ALREADY_SIGNED
        );
        assert_eq!(status_to_error(StatusCode::SigExpired).code(), code::SIG_EXPIRED);
        assert!(!status_to_error(StatusCode::GetLine).is_error());
    }

    #[test]
    fn test_sc_op_failure_mapping() {
        assert!(sc_op_failure_to_error("1").is_canceled());
        assert_eq!(sc_op_failure_to_error("2 extra").code(), code::BAD_PIN);
        assert_eq!(sc_op_failure_to_error("3").code(), code::PIN_BLOCKED);
        assert_eq!(sc_op_failure_to_error("4").code(), code::NO_RESET_CODE);
        assert_eq!(sc_op_failure_to_error("9").code(), code::CARD);
        assert_eq!(sc_op_failure_to_error("").code(), code::CARD);
    }
}
