//! Change the expiration time of a key.

use std::borrow::Cow;

use crate::core::{
    DialogueState, EditInteractor, Error, StatusCode, answer, code, command, prompt,
    stay_in_error, unexpected,
};

/// States of the set-expiry dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetExpiryState {
    /// Nothing seen yet.
    Start,
    /// `expire` sent.
    Command,
    /// Expiry date sent.
    Date,
    /// `quit` sent.
    Quit,
    /// Save confirmed.
    Save,
    /// Round failed.
    Error,
}

impl DialogueState for SetExpiryState {
    const START: Self = SetExpiryState::Start;
    const ERROR: Self = SetExpiryState::Error;
}

/// Sets a new expiry on the primary key.
///
/// The expiry is passed to the engine verbatim: an ISO date, a period such
/// as `2y`, or `0` for no expiry.
#[derive(Debug, Clone)]
pub struct SetExpiryInteractor {
    expiry: String,
}

impl SetExpiryInteractor {
    /// Expire at `expiry`.
    pub fn new(expiry: impl Into<String>) -> Self {
        Self {
            expiry: expiry.into(),
        }
    }

    /// Remove the expiry.
    pub fn never() -> Self {
        Self::new("0")
    }

    /// Configured expiry.
    pub fn expiry(&self) -> &str {
        &self.expiry
    }
}

impl EditInteractor for SetExpiryInteractor {
    type State = SetExpiryState;

    fn name(&self) -> &'static str {
        "set-expiry"
    }

    fn action(&self, state: SetExpiryState) -> Result<Option<Cow<'_, str>>, Error> {
        let line = match state {
            SetExpiryState::Command => command::EXPIRE,
            SetExpiryState::Date => self.expiry.as_str(),
            SetExpiryState::Quit => answer::QUIT,
            SetExpiryState::Save => answer::YES,
            SetExpiryState::Start | SetExpiryState::Error => return Ok(None),
        };
        Ok(Some(Cow::Borrowed(line)))
    }

    fn next_state(
        &mut self,
        state: SetExpiryState,
        status: StatusCode,
        args: &str,
        last_error: Error,
    ) -> Result<SetExpiryState, Error> {
        use SetExpiryState as S;
        use StatusCode::{GetBool, GetLine};

        match (state, status, args) {
            (S::Start, GetLine, prompt::KEYEDIT) => Ok(S::Command),
            (S::Command, GetLine, prompt::KEYGEN_VALID) => Ok(S::Date),
            (S::Date, GetLine, prompt::KEYEDIT) => Ok(S::Quit),
            // Asked again: the date was rejected.
            (S::Date, GetLine, prompt::KEYGEN_VALID) => Err(Error::from_code(code::INV_TIME)),
            (S::Quit, GetBool, prompt::SAVE_OKAY) => Ok(S::Save),
            (S::Error, GetLine, prompt::KEYEDIT) => Ok(S::Quit),
            (S::Error, _, _) => stay_in_error(last_error),
            _ => unexpected(),
        }
    }
}
