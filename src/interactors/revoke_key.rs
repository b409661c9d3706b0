//! Revoke a key with a reason and description.

use std::borrow::Cow;

use crate::core::{
    ConfigError, DialogueState, EditInteractor, Error, StatusCode, answer, code, command,
    prompt, stay_in_error, unexpected,
};

/// Reason recorded in the revocation signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RevocationReason {
    /// No reason given.
    #[default]
    Unspecified = 0,
    /// The key was compromised.
    Compromised = 1,
    /// The key was superseded.
    Superseded = 2,
    /// The key is no longer used.
    NoLongerUsed = 3,
}

impl RevocationReason {
    /// The menu entry the engine expects.
    pub fn menu_value(self) -> &'static str {
        match self {
            RevocationReason::Unspecified => "0",
            RevocationReason::Compromised => "1",
            RevocationReason::Superseded => "2",
            RevocationReason::NoLongerUsed => "3",
        }
    }
}

/// States of the revoke-key dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevokeKeyState {
    /// Nothing seen yet.
    Start,
    /// `revkey` sent.
    Command,
    /// Revoking the whole key confirmed.
    ConfirmRevokingEntireKey,
    /// Reason code sent.
    ReasonCode,
    /// Description line `n` sent.
    ReasonText(usize),
    /// Terminating empty line sent.
    ReasonTextDone,
    /// Reason confirmed.
    ConfirmReason,
    /// `quit` sent.
    Quit,
    /// Save confirmed.
    ConfirmSave,
    /// Round failed.
    Error,
}

impl DialogueState for RevokeKeyState {
    const START: Self = RevokeKeyState::Start;
    const ERROR: Self = RevokeKeyState::Error;
}

/// Revokes the primary key.
#[derive(Debug, Clone, Default)]
pub struct RevokeKeyInteractor {
    reason: RevocationReason,
    lines: Vec<String>,
}

impl RevokeKeyInteractor {
    /// Revoke for `reason` with no description.
    pub fn new(reason: RevocationReason) -> Self {
        Self {
            reason,
            lines: Vec::new(),
        }
    }

    /// Revoke for `reason` with a description.
    ///
    /// The engine ends the description at the first empty line, so every
    /// line must be non-empty and contain no line break.
    pub fn with_description<I, S>(reason: RevocationReason, lines: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        for line in &lines {
            if line.is_empty() {
                return Err(ConfigError::EmptyField("revocation description line"));
            }
            if line.contains(['\n', '\r']) {
                return Err(ConfigError::MultiLine("revocation description line"));
            }
        }
        Ok(Self { reason, lines })
    }

    /// Configured reason.
    pub fn reason(&self) -> RevocationReason {
        self.reason
    }

    /// Configured description lines.
    pub fn description(&self) -> &[String] {
        &self.lines
    }

    fn text_state(&self, index: usize) -> RevokeKeyState {
        if index < self.lines.len() {
            RevokeKeyState::ReasonText(index)
        } else {
            RevokeKeyState::ReasonTextDone
        }
    }
}

impl EditInteractor for RevokeKeyInteractor {
    type State = RevokeKeyState;

    fn name(&self) -> &'static str {
        "revoke-key"
    }

    fn action(&self, state: RevokeKeyState) -> Result<Option<Cow<'_, str>>, Error> {
        use RevokeKeyState as S;
        let line = match state {
            S::Command => command::REVOKE_KEY,
            S::ConfirmRevokingEntireKey | S::ConfirmReason | S::ConfirmSave => answer::YES,
            S::ReasonCode => self.reason.menu_value(),
            S::ReasonText(i) => match self.lines.get(i) {
                Some(line) => line.as_str(),
                None => return Err(Error::from_code(code::GENERAL)),
            },
            S::ReasonTextDone => answer::EMPTY,
            S::Quit => answer::QUIT,
            S::Start => return Ok(None),
            S::Error => return Err(Error::from_code(code::GENERAL)),
        };
        Ok(Some(Cow::Borrowed(line)))
    }

    fn next_state(
        &mut self,
        state: RevokeKeyState,
        status: StatusCode,
        args: &str,
        last_error: Error,
    ) -> Result<RevokeKeyState, Error> {
        use RevokeKeyState as S;
        use StatusCode::{GetBool, GetLine};

        match (state, status, args) {
            (S::Start, GetLine, prompt::KEYEDIT) => Ok(S::Command),
            (S::Command, GetBool, prompt::REVOKE_SUBKEY_OKAY) => Ok(S::ConfirmRevokingEntireKey),
            (S::ConfirmRevokingEntireKey, GetLine, prompt::REVOCATION_CODE) => Ok(S::ReasonCode),
            (S::ReasonCode, GetLine, prompt::REVOCATION_TEXT) => Ok(self.text_state(0)),
            (S::ReasonText(i), GetLine, prompt::REVOCATION_TEXT) => Ok(self.text_state(i + 1)),
            (S::ReasonTextDone, GetBool, prompt::REVOCATION_OKAY) => Ok(S::ConfirmReason),
            (S::ConfirmReason, GetLine, prompt::KEYEDIT) => Ok(S::Quit),
            (S::Quit, GetBool, prompt::SAVE_OKAY) => Ok(S::ConfirmSave),
            (S::Error, GetLine, prompt::KEYEDIT) => Ok(S::Quit),
            (S::Error, _, _) => stay_in_error(last_error),
            _ => unexpected(),
        }
    }
}
