//! Attach an existing key, selected by keygrip, as a new subkey.

use std::borrow::Cow;

use crate::core::{
    ConfigError, DialogueState, EditInteractor, Error, StatusCode, answer, code, command,
    prompt, stay_in_error, unexpected,
};

/// States of the add-existing-subkey dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum AddExistingSubkeyState {
    Start,
    Command,
    AddExistingKey,
    Keygrip,
    Flags,
    Valid,
    KeyCreated,
    Quit,
    Save,
    Error,
}

impl DialogueState for AddExistingSubkeyState {
    const START: Self = AddExistingSubkeyState::Start;
    const ERROR: Self = AddExistingSubkeyState::Error;
}

/// Runs `addkey` and picks the "existing key" entry of the algorithm menu.
#[derive(Debug, Clone)]
pub struct AddExistingSubkeyInteractor {
    keygrip: String,
    expiry: Option<String>,
}

impl AddExistingSubkeyInteractor {
    /// Add the key with `keygrip`, without expiry.
    pub fn new(keygrip: impl Into<String>) -> Result<Self, ConfigError> {
        let keygrip = keygrip.into();
        if keygrip.is_empty() {
            return Err(ConfigError::EmptyField("keygrip"));
        }
        Ok(Self {
            keygrip,
            expiry: None,
        })
    }

    /// Expire the new subkey at `expiry`. An empty string means no expiry.
    pub fn with_expiry(mut self, expiry: impl Into<String>) -> Self {
        let expiry = expiry.into();
        self.expiry = (!expiry.is_empty()).then_some(expiry);
        self
    }

    /// Configured keygrip.
    pub fn keygrip(&self) -> &str {
        &self.keygrip
    }

    /// Answer for the validity prompt.
    pub fn expiry(&self) -> &str {
        self.expiry.as_deref().unwrap_or("0")
    }
}

impl EditInteractor for AddExistingSubkeyInteractor {
    type State = AddExistingSubkeyState;

    fn name(&self) -> &'static str {
        "add-existing-subkey"
    }

    fn action(&self, state: AddExistingSubkeyState) -> Result<Option<Cow<'_, str>>, Error> {
        use AddExistingSubkeyState as S;
        let line = match state {
            S::Command => command::ADD_KEY,
            S::AddExistingKey => command::KEYGRIP,
            S::Keygrip => self.keygrip.as_str(),
            S::Flags => command::SUBKEY_FLAGS,
            S::Valid => self.expiry(),
            S::Quit => answer::QUIT,
            S::Save => answer::YES,
            S::Start | S::KeyCreated | S::Error => return Ok(None),
        };
        Ok(Some(Cow::Borrowed(line)))
    }

    fn next_state(
        &mut self,
        state: AddExistingSubkeyState,
        status: StatusCode,
        args: &str,
        last_error: Error,
    ) -> Result<AddExistingSubkeyState, Error> {
        use AddExistingSubkeyState as S;
        use StatusCode::{GetBool, GetLine, KeyCreated};

        match (state, status, args) {
            (S::Start, GetLine, prompt::KEYEDIT) => Ok(S::Command),
            (S::Command, GetLine, prompt::KEYGEN_ALGO) => Ok(S::AddExistingKey),
            (S::AddExistingKey, GetLine, prompt::KEYGEN_KEYGRIP) => Ok(S::Keygrip),
            (S::Keygrip, GetLine, prompt::KEYGEN_FLAGS) => Ok(S::Flags),
            // Asked again: no such key.
            (S::Keygrip, GetLine, prompt::KEYGEN_KEYGRIP) => Err(Error::from_code(code::NO_KEY)),
            (S::Flags, GetLine, prompt::KEYGEN_VALID) => Ok(S::Valid),
            (S::Valid, KeyCreated, _) => Ok(S::KeyCreated),
            (S::Valid, GetLine, prompt::KEYEDIT) => Ok(S::Quit),
            (S::Valid, GetLine, prompt::KEYGEN_VALID) => Err(Error::from_code(code::INV_TIME)),
            (S::KeyCreated, _, _) => Ok(S::Quit),
            (S::Quit, GetBool, prompt::SAVE_OKAY) => Ok(S::Save),
            (S::Error, GetLine, prompt::KEYEDIT) => Ok(S::Quit),
            (S::Error, _, _) => stay_in_error(last_error),
            _ => unexpected(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::Dialogue;

    const GRIP: &str = "0123456789ABCDEF0123456789ABCDEF01234567";

    #[test]
    fn test_add_existing_subkey_dialogue() {
        let interactor = AddExistingSubkeyInteractor::new(GRIP).unwrap().with_expiry("1y");
        let mut d = Dialogue::new(interactor);
        let mut out = Vec::new();

        d.handle(StatusCode::GetLine, Some(prompt::KEYEDIT), &mut out);
        d.handle(StatusCode::GetLine, Some(prompt::KEYGEN_ALGO), &mut out);
        d.handle(StatusCode::GetLine, Some(prompt::KEYGEN_KEYGRIP), &mut out);
        d.handle(StatusCode::GetLine, Some(prompt::KEYGEN_FLAGS), &mut out);
        d.handle(StatusCode::GetLine, Some(prompt::KEYGEN_VALID), &mut out);
        d.handle(StatusCode::KeyCreated, Some("S ABCDEF"), &mut out);
        assert_eq!(d.state(), AddExistingSubkeyState::KeyCreated);
        d.handle(StatusCode::GetLine, Some(prompt::KEYEDIT), &mut out);
        let err = d.handle(StatusCode::GetBool, Some(prompt::SAVE_OKAY), &mut out);

        assert!(!err.is_error());
        assert_eq!(d.state(), AddExistingSubkeyState::Save);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("addkey\nkeygrip\n{GRIP}\nQ\n1y\nquit\nY\n")
        );
    }

    #[test]
    fn test_default_expiry_is_zero() {
        let interactor = AddExistingSubkeyInteractor::new(GRIP).unwrap().with_expiry("");
        assert_eq!(
            interactor.action(AddExistingSubkeyState::Valid),
            Ok(Some(Cow::Borrowed("0")))
        );
    }

    #[test]
    fn test_unknown_keygrip() {
        let mut i = AddExistingSubkeyInteractor::new(GRIP).unwrap();
        let err = i
            .next_state(
                AddExistingSubkeyState::Keygrip,
                StatusCode::GetLine,
                prompt::KEYGEN_KEYGRIP,
                Error::NONE,
            )
            .unwrap_err();
        assert_eq!(err.code(), code::NO_KEY);
    }

    #[test]
    fn test_rejected_expiry() {
        let mut i = AddExistingSubkeyInteractor::new(GRIP).unwrap();
        let err = i
            .next_state(
                AddExistingSubkeyState::Valid,
                StatusCode::GetLine,
                prompt::KEYGEN_VALID,
                Error::NONE,
            )
            .unwrap_err();
        assert_eq!(err.code(), code::INV_TIME);
    }

    #[test]
    fn test_empty_keygrip_rejected() {
        assert_eq!(
            AddExistingSubkeyInteractor::new("").unwrap_err(),
            ConfigError::EmptyField("keygrip")
        );
    }

    #[test]
    fn test_start_and_error_states() {
        let mut i = AddExistingSubkeyInteractor::new(GRIP).unwrap();
        assert!(
            i.next_state(
                AddExistingSubkeyState::Start,
                StatusCode::KeyCreated,
                "",
                Error::NONE
            )
            .is_err()
        );
        assert_eq!(
            i.next_state(
                AddExistingSubkeyState::Error,
                StatusCode::GetLine,
                prompt::KEYEDIT,
                Error::from_code(code::NO_KEY)
            ),
            Ok(AddExistingSubkeyState::Quit)
        );
    }
}
