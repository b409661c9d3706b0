//! Certify user IDs of a key.
//!
//! Unlike the linear dialogues, the signing dialogue is driven by a
//! transition table: the engine asks a varying subset of questions
//! depending on the key, the signing options and what is already signed.
//! Every row of [`TRANSITIONS`] maps `(state, status, prompt)` to the next
//! state. Two cases are handled outside the table:
//!
//! - selecting individual user IDs, one `keyedit.prompt` per entry of the
//!   configured list ([`SignKeyState::ListUserId`]);
//! - unexpected input in [`SignKeyState::Confirm`] and
//!   [`SignKeyState::Error`], which repeats the sticky error.

use std::borrow::Cow;

use crate::core::{
    ConfigError, DialogueState, EditInteractor, Error, Key, StatusCode, answer, code, prompt,
    stay_in_error, unexpected,
};

/// Flags selecting the signing command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SigningOptions {
    /// Export the certification; otherwise it is local (`lsign`).
    pub exportable: bool,
    /// Make the certification non-revocable.
    pub non_revocable: bool,
    /// Create a trust signature.
    pub trust: bool,
}

impl SigningOptions {
    /// An exportable certification.
    pub fn exportable() -> Self {
        Self {
            exportable: true,
            ..Self::default()
        }
    }

    /// A local certification.
    pub fn local() -> Self {
        Self::default()
    }

    /// Set the non-revocable flag.
    pub fn non_revocable(mut self, value: bool) -> Self {
        self.non_revocable = value;
        self
    }

    /// Set the trust signature flag.
    pub fn trust(mut self, value: bool) -> Self {
        self.trust = value;
        self
    }

    /// The edit menu command for this combination.
    pub fn command(self) -> &'static str {
        let local = !self.exportable;
        match (local, self.non_revocable, self.trust) {
            (true, true, true) => "ltnrsign",
            (true, true, false) => "lnrsign",
            (true, false, true) => "ltsign",
            (true, false, false) => "lsign",
            (false, true, true) => "tnrsign",
            (false, true, false) => "nrsign",
            (false, false, true) => "tsign",
            (false, false, false) => "sign",
        }
    }
}

/// Trust level of a trust signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrustSignatureTrust {
    /// No trust signature.
    #[default]
    None,
    /// Partial trust (`1`).
    Partial,
    /// Complete trust (`2`).
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TrustSignature {
    trust: TrustSignatureTrust,
    depth: String,
    scope: String,
}

impl Default for TrustSignature {
    fn default() -> Self {
        Self {
            trust: TrustSignatureTrust::None,
            depth: "0".to_owned(),
            scope: String::new(),
        }
    }
}

/// States of the sign-key dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignKeyState {
    /// Nothing seen yet.
    Start,
    /// Signing command sent.
    Command,
    /// "Sign all user IDs?" answered.
    UidsAnswerSignAll,
    /// Entry `n` of the user-ID list selected.
    ListUserId(usize),
    /// All listed user IDs selected; signing command sent again.
    ListUserIdDone,
    /// Signature expiry confirmed.
    SetExpire,
    /// Check level sent.
    SetCheckLevel,
    /// Trust signature level sent.
    SetTrustValue,
    /// Trust signature depth sent.
    SetTrustDepth,
    /// Trust signature scope sent.
    SetTrustRegexp,
    /// Signing confirmed.
    Confirm,
    /// Promotion of a local signature confirmed.
    Confirm2,
    /// Re-signing answered.
    DupeOk,
    /// Re-signing answered for a further user ID.
    DupeOk2,
    /// Signing key expired; the dialogue is aborted.
    RejectSignExpired,
    /// `quit` sent.
    Quit,
    /// Save confirmed.
    Save,
    /// Round failed.
    Error,
}

impl DialogueState for SignKeyState {
    const START: Self = SignKeyState::Start;
    const ERROR: Self = SignKeyState::Error;
}

use SignKeyState as S;
use crate::core::StatusCode::{GetBool, GetLine};

/// `(from, status, prompt, to)` rows of the signing dialogue.
pub const TRANSITIONS: &[(SignKeyState, StatusCode, &str, SignKeyState)] = &[
    (S::Start, GetLine, prompt::KEYEDIT, S::Command),
    (S::Command, GetBool, prompt::SIGN_ALL_OKAY, S::UidsAnswerSignAll),
    (S::Command, GetBool, prompt::SIGN_UID_EXPIRED_OKAY, S::RejectSignExpired),
    (S::Command, GetBool, prompt::SIGN_UID_OKAY, S::Confirm),
    (S::Command, GetBool, prompt::SIGN_UID_LOCAL_PROMOTE_OKAY, S::Confirm2),
    (S::Command, GetBool, prompt::SIGN_UID_DUPE_OKAY, S::DupeOk),
    (S::Command, GetLine, prompt::TRUST_VALUE, S::SetTrustValue),
    (S::UidsAnswerSignAll, GetBool, prompt::SIGN_UID_OKAY, S::Confirm),
    (S::UidsAnswerSignAll, GetBool, prompt::SIGN_UID_DUPE_OKAY, S::DupeOk),
    (S::UidsAnswerSignAll, GetLine, prompt::SIGN_UID_EXPIRE, S::SetExpire),
    (S::UidsAnswerSignAll, GetLine, prompt::SIGN_UID_CLASS, S::SetCheckLevel),
    (S::UidsAnswerSignAll, GetLine, prompt::TRUST_VALUE, S::SetTrustValue),
    (S::SetTrustValue, GetLine, prompt::TRUST_DEPTH, S::SetTrustDepth),
    (S::SetTrustDepth, GetLine, prompt::TRUST_REGEXP, S::SetTrustRegexp),
    (S::SetTrustRegexp, GetBool, prompt::SIGN_UID_OKAY, S::Confirm),
    (S::SetCheckLevel, GetBool, prompt::SIGN_UID_OKAY, S::Confirm),
    (S::SetExpire, GetBool, prompt::SIGN_UID_CLASS, S::SetCheckLevel),
    (S::Confirm, GetBool, prompt::SIGN_UID_LOCAL_PROMOTE_OKAY, S::Confirm),
    (S::Confirm, GetBool, prompt::SIGN_UID_OKAY, S::Confirm),
    (S::Confirm, GetLine, prompt::KEYEDIT, S::Quit),
    (S::Confirm, GetLine, prompt::TRUST_VALUE, S::SetTrustValue),
    (S::Confirm, GetLine, prompt::SIGN_UID_EXPIRE, S::SetExpire),
    (S::Confirm, GetLine, prompt::SIGN_UID_CLASS, S::SetCheckLevel),
    (S::Confirm2, GetBool, prompt::SIGN_UID_OKAY, S::Confirm),
    (S::DupeOk, GetBool, prompt::SIGN_UID_OKAY, S::Confirm),
    (S::DupeOk, GetLine, prompt::TRUST_VALUE, S::SetTrustValue),
    (S::DupeOk, GetBool, prompt::SIGN_UID_DUPE_OKAY, S::DupeOk2),
    (S::DupeOk2, GetBool, prompt::SIGN_UID_OKAY, S::Confirm),
    (S::DupeOk2, GetLine, prompt::TRUST_VALUE, S::SetTrustValue),
    (S::DupeOk2, GetBool, prompt::SIGN_UID_DUPE_OKAY, S::DupeOk),
    (S::ListUserIdDone, GetBool, prompt::SIGN_UID_LOCAL_PROMOTE_OKAY, S::Confirm),
    (S::ListUserIdDone, GetLine, prompt::KEYEDIT, S::Command),
    (S::ListUserIdDone, GetLine, prompt::TRUST_VALUE, S::SetTrustValue),
    (S::ListUserIdDone, GetLine, prompt::SIGN_UID_EXPIRE, S::SetExpire),
    (S::ListUserIdDone, GetLine, prompt::SIGN_UID_CLASS, S::SetCheckLevel),
    (S::ListUserIdDone, GetBool, prompt::SIGN_UID_OKAY, S::Confirm),
    (S::ListUserIdDone, GetBool, prompt::SIGN_UID_DUPE_OKAY, S::DupeOk),
    (S::RejectSignExpired, GetLine, prompt::KEYEDIT, S::Quit),
    (S::Error, GetLine, prompt::KEYEDIT, S::Quit),
    (S::Quit, GetBool, prompt::SAVE_OKAY, S::Save),
];

fn lookup(state: SignKeyState, status: StatusCode, args: &str) -> Option<SignKeyState> {
    TRANSITIONS
        .iter()
        .find(|(from, st, tag, _)| *from == state && *st == status && *tag == args)
        .map(|&(_, _, _, to)| to)
}

/// Signs some or all user IDs of a key.
///
/// Built with [`SignKeyInteractor::builder`]; the configuration cannot be
/// changed afterwards.
#[derive(Debug, Clone, Default)]
pub struct SignKeyInteractor {
    options: SigningOptions,
    user_ids: Vec<usize>,
    check_level: u8,
    dupe_ok: bool,
    key: Option<Key>,
    trust_signature: TrustSignature,
}

impl SignKeyInteractor {
    /// Start building the interactor.
    pub fn builder() -> SignKeyBuilder {
        SignKeyBuilder::new()
    }

    /// Configured signing options.
    pub fn options(&self) -> SigningOptions {
        self.options
    }

    /// Indices of the user IDs to sign; empty signs all of them.
    pub fn user_ids(&self) -> &[usize] {
        &self.user_ids
    }

    /// True if every user ID is signed.
    pub fn sign_all(&self) -> bool {
        self.user_ids.is_empty()
    }

    fn trust_value(&self) -> &'static str {
        match self.trust_signature.trust {
            TrustSignatureTrust::Partial => "1",
            _ => "2",
        }
    }

    fn check_level(&self) -> &'static str {
        match self.check_level {
            1 => "1",
            2 => "2",
            3 => "3",
            _ => "0",
        }
    }

    /// Selection for entry `index` of the user-ID list: the uid hash if the
    /// key provides one, the 1-based position otherwise. `None` if there is
    /// no such entry or the position does not fit.
    fn user_id_selection(&self, index: usize) -> Option<String> {
        let uid = *self.user_ids.get(index)?;
        let hash = self
            .key
            .as_ref()
            .and_then(|key| key.user_id(uid))
            .and_then(|u| u.uid_hash.as_deref());
        Some(match hash {
            Some(hash) => format!("uid {hash}"),
            None => uid.checked_add(1)?.to_string(),
        })
    }
}

impl EditInteractor for SignKeyInteractor {
    type State = SignKeyState;

    fn name(&self) -> &'static str {
        "sign-key"
    }

    fn action(&self, state: SignKeyState) -> Result<Option<Cow<'_, str>>, Error> {
        let line = match state {
            S::Command | S::ListUserIdDone => self.options.command(),
            S::UidsAnswerSignAll => answer::yes_no(self.sign_all()),
            S::SetExpire | S::Confirm | S::Confirm2 | S::Save => answer::YES,
            S::SetTrustValue => self.trust_value(),
            S::SetTrustDepth => self.trust_signature.depth.as_str(),
            S::SetTrustRegexp => self.trust_signature.scope.as_str(),
            S::SetCheckLevel => self.check_level(),
            S::DupeOk | S::DupeOk2 => answer::yes_no(self.dupe_ok),
            S::RejectSignExpired => return Err(Error::from_code(code::KEY_EXPIRED)),
            S::Quit => answer::QUIT,
            S::ListUserId(i) => {
                return match self.user_id_selection(i) {
                    Some(selection) => Ok(Some(Cow::Owned(selection))),
                    None => Err(Error::from_code(code::GENERAL)),
                };
            }
            S::Start => return Ok(None),
            S::Error => return Err(Error::from_code(code::GENERAL)),
        };
        Ok(Some(Cow::Borrowed(line)))
    }

    fn next_state(
        &mut self,
        state: SignKeyState,
        status: StatusCode,
        args: &str,
        last_error: Error,
    ) -> Result<SignKeyState, Error> {
        if let Some(next) = lookup(state, status, args) {
            return Ok(next);
        }

        let menu = status == GetLine && args == prompt::KEYEDIT;
        match state {
            S::UidsAnswerSignAll if menu => {
                if self.sign_all() {
                    Err(Error::from_code(code::UNUSABLE_PUBKEY))
                } else {
                    Ok(S::ListUserId(0))
                }
            }
            S::ListUserId(i) if menu => {
                if i + 1 < self.user_ids.len() {
                    Ok(S::ListUserId(i + 1))
                } else {
                    Ok(S::ListUserIdDone)
                }
            }
            S::Confirm | S::Error => stay_in_error(last_error),
            _ => unexpected(),
        }
    }
}

/// Builder for [`SignKeyInteractor`].
#[derive(Debug, Default)]
pub struct SignKeyBuilder {
    inner: SignKeyInteractor,
    check_level: u8,
    trust_depth: u16,
}

impl SignKeyBuilder {
    /// Create a builder for a local certification of all user IDs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the signing options.
    pub fn options(mut self, options: SigningOptions) -> Self {
        self.inner.options = options;
        self
    }

    /// Sign only the user IDs at these 0-based indices.
    pub fn user_ids(mut self, user_ids: impl IntoIterator<Item = usize>) -> Self {
        self.inner.user_ids = user_ids.into_iter().collect();
        self
    }

    /// Set the certification check level (0..=3).
    pub fn check_level(mut self, level: u8) -> Self {
        self.check_level = level;
        self
    }

    /// Answer yes when asked to re-sign an already signed user ID.
    pub fn dupe_ok(mut self, value: bool) -> Self {
        self.inner.dupe_ok = value;
        self
    }

    /// The key being signed, used to select user IDs by hash.
    pub fn key(mut self, key: Key) -> Self {
        self.inner.key = Some(key);
        self
    }

    /// Set the trust signature level.
    pub fn trust_signature_trust(mut self, trust: TrustSignatureTrust) -> Self {
        self.inner.trust_signature.trust = trust;
        self
    }

    /// Set the trust signature depth (0..=255).
    pub fn trust_signature_depth(mut self, depth: u16) -> Self {
        self.trust_depth = depth;
        self
    }

    /// Restrict the trust signature to a domain regexp.
    pub fn trust_signature_scope(mut self, scope: impl Into<String>) -> Self {
        self.inner.trust_signature.scope = scope.into();
        self
    }

    /// Validate and finish the interactor.
    pub fn build(self) -> Result<SignKeyInteractor, ConfigError> {
        let mut inner = self.inner;

        if self.check_level > 3 {
            return Err(ConfigError::InvalidCheckLevel(self.check_level));
        }
        inner.check_level = self.check_level;

        if self.trust_depth > 255 {
            return Err(ConfigError::InvalidTrustDepth(self.trust_depth));
        }
        inner.trust_signature.depth = self.trust_depth.to_string();

        if inner.options.trust && inner.trust_signature.trust == TrustSignatureTrust::None {
            return Err(ConfigError::MissingTrustLevel);
        }
        if inner.trust_signature.scope.contains(['\n', '\r']) {
            return Err(ConfigError::MultiLine("trust signature scope"));
        }

        Ok(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UserId;
    use crate::dialogue::Dialogue;

    fn drive(d: &mut Dialogue<SignKeyInteractor>, events: &[(StatusCode, &str)]) -> Vec<u8> {
        let mut out = Vec::new();
        for (status, tag) in events {
            let err = d.handle(*status, Some(tag), &mut out);
            assert!(!err.is_error(), "{status} {tag}: {err:?}");
        }
        out
    }

    #[test]
    fn test_command_strings() {
        let cases = [
            (false, true, true, "ltnrsign"),
            (false, true, false, "lnrsign"),
            (false, false, true, "ltsign"),
            (false, false, false, "lsign"),
            (true, true, true, "tnrsign"),
            (true, true, false, "nrsign"),
            (true, false, true, "tsign"),
            (true, false, false, "sign"),
        ];
        for (exportable, non_revocable, trust, expected) in cases {
            let options = SigningOptions {
                exportable,
                non_revocable,
                trust,
            };
            assert_eq!(options.command(), expected);
        }
    }

    #[test]
    fn test_nrsign_and_lsign() {
        let nr = SignKeyInteractor::builder()
            .options(SigningOptions::exportable().non_revocable(true))
            .build()
            .unwrap();
        assert_eq!(nr.action(S::Command), Ok(Some(Cow::Borrowed("nrsign"))));

        let local = SignKeyInteractor::builder().build().unwrap();
        assert_eq!(local.action(S::Command), Ok(Some(Cow::Borrowed("lsign"))));
    }

    #[test]
    fn test_sign_all_user_ids() {
        let interactor = SignKeyInteractor::builder()
            .options(SigningOptions::exportable())
            .check_level(2)
            .build()
            .unwrap();
        let mut d = Dialogue::new(interactor);

        let out = drive(
            &mut d,
            &[
                (GetLine, prompt::KEYEDIT),
                (GetBool, prompt::SIGN_ALL_OKAY),
                (GetLine, prompt::SIGN_UID_EXPIRE),
                (GetBool, prompt::SIGN_UID_CLASS),
                (GetBool, prompt::SIGN_UID_OKAY),
                (GetLine, prompt::KEYEDIT),
                (GetBool, prompt::SAVE_OKAY),
            ],
        );

        assert_eq!(d.state(), S::Save);
        assert_eq!(String::from_utf8(out).unwrap(), "sign\nY\nY\n2\nY\nquit\nY\n");
    }

    #[test]
    fn test_sign_selected_user_ids() {
        let key = Key::new("FPR")
            .with_user_id(UserId::new("first"))
            .with_user_id(UserId::new("second").with_hash("ABCDEF"))
            .with_user_id(UserId::new("third"));
        let interactor = SignKeyInteractor::builder()
            .user_ids([1, 2])
            .key(key)
            .build()
            .unwrap();
        let mut d = Dialogue::new(interactor);

        let out = drive(
            &mut d,
            &[
                (GetLine, prompt::KEYEDIT),
                (GetBool, prompt::SIGN_ALL_OKAY),
                (GetLine, prompt::KEYEDIT),
                (GetLine, prompt::KEYEDIT),
                (GetLine, prompt::KEYEDIT),
            ],
        );
        assert_eq!(d.state(), S::ListUserIdDone);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "lsign\nN\nuid ABCDEF\n3\nlsign\n"
        );
    }

    #[test]
    fn test_out_of_range_user_id_index() {
        let i = SignKeyInteractor::builder()
            .user_ids([usize::MAX])
            .build()
            .unwrap();
        assert_eq!(
            i.action(S::ListUserId(0)).unwrap_err().code(),
            code::GENERAL
        );
        assert!(i.action(S::ListUserId(1)).is_err());
    }

    #[test]
    fn test_sign_all_refused_without_selection() {
        let mut i = SignKeyInteractor::builder().build().unwrap();
        let err = i
            .next_state(S::UidsAnswerSignAll, GetLine, prompt::KEYEDIT, Error::NONE)
            .unwrap_err();
        assert_eq!(err.code(), code::UNUSABLE_PUBKEY);
    }

    #[test]
    fn test_trust_signature() {
        let interactor = SignKeyInteractor::builder()
            .options(SigningOptions::exportable().trust(true))
            .trust_signature_trust(TrustSignatureTrust::Partial)
            .trust_signature_depth(1)
            .trust_signature_scope("<[^>]+[@.]example\\.org>$")
            .build()
            .unwrap();
        let mut d = Dialogue::new(interactor);

        let out = drive(
            &mut d,
            &[
                (GetLine, prompt::KEYEDIT),
                (GetLine, prompt::TRUST_VALUE),
                (GetLine, prompt::TRUST_DEPTH),
                (GetLine, prompt::TRUST_REGEXP),
                (GetBool, prompt::SIGN_UID_OKAY),
            ],
        );
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "tsign\n1\n1\n<[^>]+[@.]example\\.org>$\nY\n"
        );
    }

    #[test]
    fn test_complete_trust_value() {
        let i = SignKeyInteractor::builder()
            .options(SigningOptions::local().trust(true))
            .trust_signature_trust(TrustSignatureTrust::Complete)
            .build()
            .unwrap();
        assert_eq!(i.action(S::SetTrustValue), Ok(Some(Cow::Borrowed("2"))));
        assert_eq!(i.action(S::SetTrustDepth), Ok(Some(Cow::Borrowed("0"))));
    }

    #[test]
    fn test_confirm_loop_answers_every_time() {
        let mut d = Dialogue::new(SignKeyInteractor::builder().build().unwrap());
        let out = drive(
            &mut d,
            &[
                (GetLine, prompt::KEYEDIT),
                (GetBool, prompt::SIGN_UID_OKAY),
                (GetBool, prompt::SIGN_UID_OKAY),
                (GetBool, prompt::SIGN_UID_LOCAL_PROMOTE_OKAY),
            ],
        );
        assert_eq!(d.state(), S::Confirm);
        assert_eq!(out, b"lsign\nY\nY\nY\n");
    }

    #[test]
    fn test_dupe_ok_alternates() {
        let mut d = Dialogue::new(SignKeyInteractor::builder().dupe_ok(true).build().unwrap());
        let out = drive(
            &mut d,
            &[
                (GetLine, prompt::KEYEDIT),
                (GetBool, prompt::SIGN_UID_DUPE_OKAY),
                (GetBool, prompt::SIGN_UID_DUPE_OKAY),
                (GetBool, prompt::SIGN_UID_DUPE_OKAY),
            ],
        );
        assert_eq!(d.state(), S::DupeOk);
        assert_eq!(out, b"lsign\nY\nY\nY\n");
    }

    #[test]
    fn test_expired_signing_key_aborts() {
        let mut d = Dialogue::new(SignKeyInteractor::builder().build().unwrap());
        let mut out = Vec::new();

        d.handle(GetLine, Some(prompt::KEYEDIT), &mut out);
        let err = d.handle(GetBool, Some(prompt::SIGN_UID_EXPIRED_OKAY), &mut out);

        assert_eq!(err.code(), code::KEY_EXPIRED);
        assert_eq!(d.state(), S::Error);
        assert_eq!(out, b"lsign\n");
    }

    #[test]
    fn test_unknown_question_in_confirm_falls_to_error_state() {
        let mut d = Dialogue::new(SignKeyInteractor::builder().build().unwrap());
        let mut out = drive(
            &mut d,
            &[(GetLine, prompt::KEYEDIT), (GetBool, prompt::SIGN_UID_OKAY)],
        );

        let err = d.handle(GetBool, Some("sign_uid.new_question"), &mut out);
        assert!(!err.is_error());
        assert_eq!(d.state(), S::Error);

        let err = d.handle(GetLine, Some(prompt::KEYEDIT), &mut out);
        assert!(!err.is_error());
        assert_eq!(d.state(), S::Quit);
        assert_eq!(out, b"lsign\nY\n\nquit\n");
    }

    #[test]
    fn test_already_signed_status_is_an_error() {
        let mut d = Dialogue::new(SignKeyInteractor::builder().build().unwrap());
        let mut out = Vec::new();

        d.handle(GetLine, Some(prompt::KEYEDIT), &mut out);
        let err = d.handle(StatusCode::AlreadySigned, Some("ABCDEF"), &mut out);
        assert_eq!(err.code(), code::ALREADY_SIGNED);
        assert_eq!(d.state(), S::Error);
    }

    #[test]
    fn test_start_rejects_wrong_event() {
        let mut i = SignKeyInteractor::default();
        assert!(i.next_state(S::Start, GetBool, prompt::SIGN_UID_OKAY, Error::NONE).is_err());
        assert_eq!(
            i.next_state(S::Error, GetLine, prompt::KEYEDIT, Error::from_code(code::GENERAL)),
            Ok(S::Quit)
        );
    }

    #[test]
    fn test_builder_validation() {
        assert_eq!(
            SignKeyInteractor::builder().check_level(4).build().unwrap_err(),
            ConfigError::InvalidCheckLevel(4)
        );
        assert_eq!(
            SignKeyInteractor::builder()
                .trust_signature_trust(TrustSignatureTrust::Partial)
                .trust_signature_depth(256)
                .build()
                .unwrap_err(),
            ConfigError::InvalidTrustDepth(256)
        );
        assert_eq!(
            SignKeyInteractor::builder()
                .options(SigningOptions::local().trust(true))
                .build()
                .unwrap_err(),
            ConfigError::MissingTrustLevel
        );
    }

    #[test]
    fn test_table_has_no_duplicate_keys() {
        for (i, (from, status, tag, _)) in TRANSITIONS.iter().enumerate() {
            let dupes = TRANSITIONS[i + 1..]
                .iter()
                .filter(|(f, s, t, _)| f == from && s == status && t == tag)
                .count();
            assert_eq!(dupes, 0, "{from:?} {status} {tag}");
        }
    }
}
