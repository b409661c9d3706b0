//! Add a user ID to a key.

use std::borrow::Cow;

use crate::core::{
    DialogueState, EditInteractor, Error, StatusCode, answer, code, command, prompt,
    stay_in_error, unexpected,
};

/// States of the add-user-id dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum AddUserIdState {
    Start,
    Command,
    Name,
    Email,
    Comment,
    Quit,
    Save,
    Error,
}

impl DialogueState for AddUserIdState {
    const START: Self = AddUserIdState::Start;
    const ERROR: Self = AddUserIdState::Error;
}

/// Answers `adduid` with a fixed name, email and comment.
#[derive(Debug, Clone)]
pub struct AddUserIdInteractor {
    name: String,
    email: String,
    comment: String,
}

impl AddUserIdInteractor {
    /// Start building the interactor.
    pub fn builder() -> AddUserIdBuilder {
        AddUserIdBuilder::new()
    }

    /// Configured real name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Configured comment.
    pub fn comment(&self) -> &str {
        &self.comment
    }
}

/// Builder for [`AddUserIdInteractor`].
#[derive(Debug, Default)]
pub struct AddUserIdBuilder {
    name: String,
    email: String,
    comment: String,
}

impl AddUserIdBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the real name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the email address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Finish the interactor.
    pub fn build(self) -> AddUserIdInteractor {
        AddUserIdInteractor {
            name: self.name,
            email: self.email,
            comment: self.comment,
        }
    }
}

impl EditInteractor for AddUserIdInteractor {
    type State = AddUserIdState;

    fn name(&self) -> &'static str {
        "add-user-id"
    }

    fn action(&self, state: AddUserIdState) -> Result<Option<Cow<'_, str>>, Error> {
        use AddUserIdState as S;
        let line = match state {
            S::Command => command::ADD_UID,
            S::Name => self.name.as_str(),
            S::Email => self.email.as_str(),
            S::Comment => self.comment.as_str(),
            S::Quit => answer::QUIT,
            S::Save => answer::YES,
            S::Start | S::Error => return Ok(None),
        };
        Ok(Some(Cow::Borrowed(line)))
    }

    fn next_state(
        &mut self,
        state: AddUserIdState,
        status: StatusCode,
        args: &str,
        last_error: Error,
    ) -> Result<AddUserIdState, Error> {
        use AddUserIdState as S;
        use StatusCode::{GetBool, GetLine};

        match (state, status, args) {
            (S::Start, GetLine, prompt::KEYEDIT) => Ok(S::Command),
            (S::Command, GetLine, prompt::KEYGEN_NAME) => Ok(S::Name),
            (S::Name, GetLine, prompt::KEYGEN_EMAIL) => Ok(S::Email),
            (S::Name, GetLine, prompt::KEYGEN_NAME) => Err(Error::from_code(code::INV_NAME)),
            (S::Email, GetLine, prompt::KEYGEN_COMMENT) => Ok(S::Comment),
            (S::Email, GetLine, prompt::KEYGEN_EMAIL) => Err(Error::from_code(code::INV_USER_ID)),
            (S::Comment, GetLine, prompt::KEYEDIT) => Ok(S::Quit),
            (S::Comment, GetLine, prompt::KEYGEN_COMMENT) => {
                Err(Error::from_code(code::INV_USER_ID))
            }
            (S::Quit, GetBool, prompt::SAVE_OKAY) => Ok(S::Save),
            (S::Error, GetLine, prompt::KEYEDIT) => Ok(S::Quit),
            (S::Error, _, _) => stay_in_error(last_error),
            _ => unexpected(),
        }
    }
}
