//! Set the owner trust of a key.

use std::borrow::Cow;

use crate::core::{
    DialogueState, EditInteractor, Error, StatusCode, answer, command, prompt, stay_in_error,
    unexpected,
};

/// Owner trust levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum OwnerTrust {
    /// Not yet assigned.
    #[default]
    Unknown = 0,
    /// Explicitly undecided.
    Undefined = 1,
    /// Never trust.
    Never = 2,
    /// Marginal trust.
    Marginal = 3,
    /// Full trust.
    Full = 4,
    /// Ultimate trust (own keys).
    Ultimate = 5,
}

impl OwnerTrust {
    /// The menu entry the engine expects; unknown and undefined share `1`.
    pub fn menu_value(self) -> &'static str {
        match self {
            OwnerTrust::Unknown | OwnerTrust::Undefined => "1",
            OwnerTrust::Never => "2",
            OwnerTrust::Marginal => "3",
            OwnerTrust::Full => "4",
            OwnerTrust::Ultimate => "5",
        }
    }
}

/// States of the owner-trust dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum OwnerTrustState {
    Start,
    Command,
    Value,
    ReallyUltimate,
    Quit,
    Save,
    Error,
}

impl DialogueState for OwnerTrustState {
    const START: Self = OwnerTrustState::Start;
    const ERROR: Self = OwnerTrustState::Error;
}

/// Answers the `trust` menu.
#[derive(Debug, Clone, Copy)]
pub struct SetOwnerTrustInteractor {
    trust: OwnerTrust,
}

impl SetOwnerTrustInteractor {
    /// Set owner trust to `trust`.
    pub fn new(trust: OwnerTrust) -> Self {
        Self { trust }
    }

    /// Configured trust level.
    pub fn trust(&self) -> OwnerTrust {
        self.trust
    }
}

impl EditInteractor for SetOwnerTrustInteractor {
    type State = OwnerTrustState;

    fn name(&self) -> &'static str {
        "set-owner-trust"
    }

    fn action(&self, state: OwnerTrustState) -> Result<Option<Cow<'_, str>>, Error> {
        let line = match state {
            OwnerTrustState::Command => command::TRUST,
            OwnerTrustState::Value => self.trust.menu_value(),
            OwnerTrustState::ReallyUltimate | OwnerTrustState::Save => answer::YES,
            OwnerTrustState::Quit => answer::QUIT,
            OwnerTrustState::Start | OwnerTrustState::Error => return Ok(None),
        };
        Ok(Some(Cow::Borrowed(line)))
    }

    fn next_state(
        &mut self,
        state: OwnerTrustState,
        status: StatusCode,
        args: &str,
        last_error: Error,
    ) -> Result<OwnerTrustState, Error> {
        use OwnerTrustState as S;
        use StatusCode::{GetBool, GetLine};

        match (state, status, args) {
            (S::Start, GetLine, prompt::KEYEDIT) => Ok(S::Command),
            (S::Command, GetLine, prompt::OWNERTRUST_VALUE) => Ok(S::Value),
            (S::Value, GetLine, prompt::KEYEDIT) => Ok(S::Quit),
            (S::Value, GetBool, prompt::OWNERTRUST_SET_ULTIMATE) => Ok(S::ReallyUltimate),
            (S::ReallyUltimate, GetLine, prompt::KEYEDIT) => Ok(S::Quit),
            (S::Quit, GetBool, prompt::SAVE_OKAY) => Ok(S::Save),
            (S::Error, GetLine, prompt::KEYEDIT) => Ok(S::Quit),
            (S::Error, _, _) => stay_in_error(last_error),
            _ => unexpected(),
        }
    }
}
