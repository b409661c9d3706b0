//! Generate keys on a smartcard.
//!
//! The shape of this dialogue depends on the engine and the card: the
//! `key-attr` sub-dialogue only exists when the card supports changing key
//! attributes, and the engine asks for one algorithm and size per key slot.
//! The state machine follows whichever prompt arrives next.

use std::borrow::Cow;

use tracing::debug;

use crate::core::{
    ConfigError, DEFAULT_CARD_KEY_SIZE, DialogueState, EditInteractor, Error, StatusCode,
    answer, code, command, prompt, stay_in_error, unexpected,
};

/// Key algorithm for the card slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CardAlgo {
    /// RSA (menu entry `1`).
    #[default]
    Rsa,
    /// Elliptic curve (menu entry `2`).
    Ecc,
}

impl CardAlgo {
    fn menu_value(self) -> &'static str {
        match self {
            CardAlgo::Rsa => "1",
            CardAlgo::Ecc => "2",
        }
    }
}

/// Elliptic curve for [`CardAlgo::Ecc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(missing_docs)]
pub enum Curve {
    /// Let the engine pick (Curve25519).
    #[default]
    Default,
    Curve25519,
    Curve448,
    NistP256,
    NistP384,
    NistP521,
    BrainpoolP256,
    BrainpoolP384,
    BrainpoolP512,
    Secp256k1,
}

impl Curve {
    /// The curve menu entry, or `None` to accept the engine default.
    pub fn menu_value(self) -> Option<&'static str> {
        Some(match self {
            Curve::Default => return None,
            Curve::Curve25519 => "1",
            Curve::Curve448 => "2",
            Curve::NistP256 => "3",
            Curve::NistP384 => "4",
            Curve::NistP521 => "5",
            Curve::BrainpoolP256 => "6",
            Curve::BrainpoolP384 => "7",
            Curve::BrainpoolP512 => "8",
            Curve::Secp256k1 => "9",
        })
    }
}

/// One of the three OpenPGP card key slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySlot {
    /// Signature key.
    First,
    /// Encryption key.
    Second,
    /// Authentication key.
    Third,
}

impl KeySlot {
    /// The following slot, if any.
    pub fn next(self) -> Option<KeySlot> {
        match self {
            KeySlot::First => Some(KeySlot::Second),
            KeySlot::Second => Some(KeySlot::Third),
            KeySlot::Third => None,
        }
    }
}

/// States of the card key generation dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenCardKeyState {
    /// Waiting for the card serial.
    Start,
    /// Card confirmed.
    GotSerial,
    /// `admin` sent.
    DoAdmin,
    /// `key-attr` sent.
    KeyAttr,
    /// Algorithm for a slot sent.
    KeyAlgo(KeySlot),
    /// Curve for a slot sent.
    KeyCurve(KeySlot),
    /// `generate` sent.
    Command,
    /// Backup choice sent.
    Backup,
    /// Replacing existing keys confirmed.
    Replace,
    /// Key size for a slot sent.
    Size(KeySlot),
    /// Expiry sent.
    Expire,
    /// Name sent.
    Name,
    /// Email sent.
    Email,
    /// Empty comment sent.
    Comment,
    /// Off-card backup written.
    BackupKeyCreated,
    /// Keys generated.
    KeyCreated,
    /// `quit` sent.
    Quit,
    /// Round failed.
    Error,
}

impl DialogueState for GenCardKeyState {
    const START: Self = GenCardKeyState::Start;
    const ERROR: Self = GenCardKeyState::Error;
}

/// Generates a full set of keys on the card with the given serial.
#[derive(Debug, Clone)]
pub struct GenCardKeyInteractor {
    serial: String,
    name: String,
    email: String,
    backup: bool,
    key_size: String,
    expiry: String,
    algo: CardAlgo,
    curve: Curve,
    backup_file_name: Option<String>,
}

impl GenCardKeyInteractor {
    /// Start building for the card with `serial`. An empty serial accepts
    /// any card.
    pub fn builder(serial: impl Into<String>) -> GenCardKeyBuilder {
        GenCardKeyBuilder::new(serial)
    }

    /// Expected card serial.
    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// File the engine wrote the encryption key backup to, once known.
    pub fn backup_file_name(&self) -> Option<&str> {
        self.backup_file_name.as_deref()
    }
}

impl EditInteractor for GenCardKeyInteractor {
    type State = GenCardKeyState;

    fn name(&self) -> &'static str {
        "gen-card-key"
    }

    fn action(&self, state: GenCardKeyState) -> Result<Option<Cow<'_, str>>, Error> {
        use GenCardKeyState as S;
        let line = match state {
            S::DoAdmin => command::ADMIN,
            S::KeyAttr => command::KEY_ATTR,
            S::Command => command::GENERATE,
            S::KeyAlgo(_) => self.algo.menu_value(),
            S::KeyCurve(_) => self.curve.menu_value().unwrap_or("1"),
            S::Name => self.name.as_str(),
            S::Email => self.email.as_str(),
            S::Expire => self.expiry.as_str(),
            S::Backup => answer::yes_no(self.backup),
            S::Replace => answer::YES,
            S::Size(_) => self.key_size.as_str(),
            S::Comment => answer::EMPTY,
            S::Quit => answer::QUIT,
            S::Start | S::GotSerial | S::BackupKeyCreated | S::KeyCreated | S::Error => {
                return Ok(None);
            }
        };
        Ok(Some(Cow::Borrowed(line)))
    }

    fn next_state(
        &mut self,
        state: GenCardKeyState,
        status: StatusCode,
        args: &str,
        last_error: Error,
    ) -> Result<GenCardKeyState, Error> {
        use GenCardKeyState as S;
        use StatusCode::{BackupKeyCreated, CardCtrl, GetBool, GetLine, KeyCreated};

        match (state, status, args) {
            (S::Start, _, _) if self.serial.is_empty() => Ok(S::GotSerial),
            (S::Start, CardCtrl, _) => {
                if args.contains(self.serial.as_str()) {
                    debug!(serial = %self.serial, args, "confirmed card serial");
                    Ok(S::GotSerial)
                } else {
                    Err(Error::from_code(code::WRONG_CARD))
                }
            }
            (S::GotSerial, GetLine, prompt::CARDEDIT) => Ok(S::DoAdmin),
            (S::DoAdmin, GetLine, prompt::CARDEDIT) => Ok(S::KeyAttr),

            // No key-attr support: the menu comes straight back.
            (S::KeyAttr, GetLine, prompt::CARDEDIT) => Ok(S::Command),
            (S::KeyAttr, GetLine, prompt::CARD_ALGO) => Ok(S::KeyAlgo(KeySlot::First)),
            (S::KeyAlgo(slot), GetLine, prompt::CARD_SIZE) => Ok(S::Size(slot)),
            (S::KeyAlgo(slot), GetLine, prompt::KEYGEN_CURVE) => Ok(S::KeyCurve(slot)),
            // There is no slot after the third; a further algorithm prompt
            // is answered for the third slot again.
            (S::KeyCurve(slot), GetLine, prompt::CARD_ALGO) => {
                Ok(S::KeyAlgo(slot.next().unwrap_or(KeySlot::Third)))
            }
            (S::KeyCurve(_), GetLine, prompt::CARDEDIT) => Ok(S::Command),

            (S::Command, GetLine, prompt::CARD_BACKUP_ENC) => Ok(S::Backup),
            (S::Backup, GetBool, prompt::CARD_REPLACE_KEYS) => Ok(S::Replace),
            (S::Backup | S::Replace, GetLine, prompt::CARD_SIZE) => Ok(S::Size(KeySlot::First)),
            (S::Backup | S::Replace, GetLine, prompt::KEYGEN_VALID) => Ok(S::Expire),

            (S::Size(slot), GetLine, prompt::CARD_SIZE) => match slot.next() {
                Some(next) => Ok(S::Size(next)),
                None => unexpected(),
            },
            (S::Size(slot), GetLine, prompt::CARD_ALGO) => match slot.next() {
                Some(next) => Ok(S::KeyAlgo(next)),
                None => unexpected(),
            },
            (S::Size(_), GetLine, prompt::KEYGEN_VALID) => Ok(S::Expire),
            (S::Size(_), GetLine, prompt::CARDEDIT) => Ok(S::Command),

            (S::Expire, GetLine, prompt::KEYGEN_NAME) => Ok(S::Name),
            (S::Name, GetLine, prompt::KEYGEN_EMAIL) => Ok(S::Email),
            (S::Name, GetLine, prompt::KEYGEN_NAME) => Err(Error::from_code(code::INV_NAME)),
            (S::Email, GetLine, prompt::KEYGEN_COMMENT) => Ok(S::Comment),
            (S::Email, GetLine, prompt::KEYGEN_EMAIL) => Err(Error::from_code(code::INV_USER_ID)),

            (S::Comment, BackupKeyCreated, _) if args.contains(' ') => {
                if let Some((_, file)) = args.rsplit_once(' ') {
                    self.backup_file_name = Some(file.to_owned());
                }
                Ok(S::BackupKeyCreated)
            }
            (S::Comment, KeyCreated, _) => Ok(S::KeyCreated),
            (S::Comment, GetLine, prompt::KEYEDIT) => Ok(S::Quit),
            (S::Comment, GetLine, prompt::KEYGEN_COMMENT) => {
                Err(Error::from_code(code::INV_USER_ID))
            }
            (S::BackupKeyCreated, KeyCreated, _) => Ok(S::KeyCreated),
            (S::KeyCreated, _, _) => Ok(S::Quit),
            (S::Quit, GetLine, prompt::CARDEDIT) => Ok(S::Quit),

            (S::Error, GetLine, prompt::KEYEDIT | prompt::CARDEDIT) => Ok(S::Quit),
            (S::Error, _, _) => stay_in_error(last_error),
            _ => unexpected(),
        }
    }
}

/// Builder for [`GenCardKeyInteractor`].
#[derive(Debug)]
pub struct GenCardKeyBuilder {
    serial: String,
    name: String,
    email: String,
    backup: bool,
    key_size: Option<u32>,
    expiry: String,
    algo: CardAlgo,
    curve: Curve,
}

impl GenCardKeyBuilder {
    /// Create a builder for the card with `serial`.
    pub fn new(serial: impl Into<String>) -> Self {
        Self {
            serial: serial.into(),
            name: String::new(),
            email: String::new(),
            backup: false,
            key_size: None,
            expiry: String::new(),
            algo: CardAlgo::default(),
            curve: Curve::default(),
        }
    }

    /// Set the real name of the generated user ID.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the email of the generated user ID.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Keep an off-card backup of the encryption key.
    pub fn backup(mut self, value: bool) -> Self {
        self.backup = value;
        self
    }

    /// RSA key size in bits (default 2048).
    pub fn key_size(mut self, bits: u32) -> Self {
        self.key_size = Some(bits);
        self
    }

    /// Key expiry as accepted by the validity prompt.
    pub fn expiry(mut self, expiry: impl Into<String>) -> Self {
        self.expiry = expiry.into();
        self
    }

    /// Key algorithm.
    pub fn algo(mut self, algo: CardAlgo) -> Self {
        self.algo = algo;
        self
    }

    /// Curve for ECC keys.
    pub fn curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    /// Validate and finish the interactor.
    pub fn build(self) -> Result<GenCardKeyInteractor, ConfigError> {
        let key_size = match self.key_size {
            Some(0) => return Err(ConfigError::InvalidKeySize(0)),
            Some(bits) => bits.to_string(),
            None => DEFAULT_CARD_KEY_SIZE.to_owned(),
        };
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("expiry", &self.expiry),
        ] {
            if value.contains(['\n', '\r']) {
                return Err(ConfigError::MultiLine(field));
            }
        }

        Ok(GenCardKeyInteractor {
            serial: self.serial,
            name: self.name,
            email: self.email,
            backup: self.backup,
            key_size,
            expiry: self.expiry,
            algo: self.algo,
            curve: self.curve,
            backup_file_name: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::Dialogue;
    use GenCardKeyState as S;
    use crate::core::StatusCode::{GetBool, GetLine};

    const SERIAL: &str = "D2760001240102010006055532110000";

    fn interactor() -> GenCardKeyBuilder {
        GenCardKeyInteractor::builder(SERIAL)
            .name("Card Holder")
            .email("holder@example.org")
            .expiry("2y")
    }

    fn run(d: &mut Dialogue<GenCardKeyInteractor>, events: &[(StatusCode, &str)]) -> String {
        let mut out = Vec::new();
        for (status, tag) in events {
            let err = d.handle(*status, Some(tag), &mut out);
            assert!(!err.is_error(), "{status} {tag}: {err:?}");
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_rsa_generation_with_backup() {
        let mut d = Dialogue::new(interactor().backup(true).key_size(4096).build().unwrap());
        let cardctrl = format!("3 {SERIAL}");

        let out = run(
            &mut d,
            &[
                (StatusCode::CardCtrl, cardctrl.as_str()),
                (GetLine, prompt::CARDEDIT),
                (GetLine, prompt::CARDEDIT),
                (GetLine, prompt::CARD_ALGO),
                (GetLine, prompt::CARD_SIZE),
                (GetLine, prompt::CARD_ALGO),
                (GetLine, prompt::CARD_SIZE),
                (GetLine, prompt::CARD_ALGO),
                (GetLine, prompt::CARD_SIZE),
                (GetLine, prompt::CARDEDIT),
                (GetLine, prompt::CARD_BACKUP_ENC),
                (GetBool, prompt::CARD_REPLACE_KEYS),
                (GetLine, prompt::KEYGEN_VALID),
                (GetLine, prompt::KEYGEN_NAME),
                (GetLine, prompt::KEYGEN_EMAIL),
                (GetLine, prompt::KEYGEN_COMMENT),
                (StatusCode::BackupKeyCreated, "ABCDEF /home/u/.gnupg/sk_ABCDEF.gpg"),
                (StatusCode::KeyCreated, "B ABCDEF"),
                (GetLine, prompt::CARDEDIT),
                (GetLine, prompt::CARDEDIT),
            ],
        );

        assert_eq!(d.state(), S::Quit);
        assert_eq!(
            d.interactor().backup_file_name(),
            Some("/home/u/.gnupg/sk_ABCDEF.gpg")
        );
        assert_eq!(
            out,
            "admin\nkey-attr\n1\n4096\n1\n4096\n1\n4096\ngenerate\nY\nY\n2y\n\
             Card Holder\nholder@example.org\n\nquit\nquit\n"
        );
    }

    #[test]
    fn test_ecc_curves() {
        let mut d = Dialogue::new(
            interactor()
                .algo(CardAlgo::Ecc)
                .curve(Curve::NistP384)
                .build()
                .unwrap(),
        );
        let cardctrl = format!("3 {SERIAL}");

        let out = run(
            &mut d,
            &[
                (StatusCode::CardCtrl, cardctrl.as_str()),
                (GetLine, prompt::CARDEDIT),
                (GetLine, prompt::CARDEDIT),
                (GetLine, prompt::CARD_ALGO),
                (GetLine, prompt::KEYGEN_CURVE),
                (GetLine, prompt::CARD_ALGO),
                (GetLine, prompt::KEYGEN_CURVE),
                (GetLine, prompt::CARD_ALGO),
                (GetLine, prompt::KEYGEN_CURVE),
                (GetLine, prompt::CARDEDIT),
            ],
        );

        assert_eq!(d.state(), S::Command);
        assert_eq!(out, "admin\nkey-attr\n2\n4\n2\n4\n2\n4\ngenerate\n");
    }

    #[test]
    fn test_fourth_algo_prompt_stays_on_third_slot() {
        let mut i = interactor().build().unwrap();
        assert_eq!(
            i.next_state(S::KeyCurve(KeySlot::Third), GetLine, prompt::CARD_ALGO, Error::NONE),
            Ok(S::KeyAlgo(KeySlot::Third))
        );
        assert!(
            i.next_state(S::Size(KeySlot::Third), GetLine, prompt::CARD_SIZE, Error::NONE)
                .is_err()
        );
        assert!(
            i.next_state(S::Size(KeySlot::Third), GetLine, prompt::CARD_ALGO, Error::NONE)
                .is_err()
        );
    }

    #[test]
    fn test_default_curve_and_size() {
        let i = GenCardKeyInteractor::builder("").build().unwrap();
        assert_eq!(i.action(S::KeyCurve(KeySlot::First)), Ok(Some(Cow::Borrowed("1"))));
        assert_eq!(i.action(S::Size(KeySlot::Second)), Ok(Some(Cow::Borrowed("2048"))));
        assert_eq!(i.action(S::Backup), Ok(Some(Cow::Borrowed("N"))));
    }

    #[test]
    fn test_wrong_card() {
        let mut d = Dialogue::new(interactor().build().unwrap());
        let err = d.handle(
            StatusCode::CardCtrl,
            Some("3 D2760001240102010006099999990000"),
            &mut Vec::new(),
        );
        assert_eq!(err.code(), code::WRONG_CARD);
        assert_eq!(d.state(), S::Error);
    }

    #[test]
    fn test_empty_serial_accepts_any_card() {
        let mut i = GenCardKeyInteractor::builder("").build().unwrap();
        assert_eq!(
            i.next_state(S::Start, StatusCode::CardCtrl, "3 ANY", Error::NONE),
            Ok(S::GotSerial)
        );
    }

    #[test]
    fn test_start_rejects_wrong_event() {
        let mut i = interactor().build().unwrap();
        let err = i
            .next_state(S::Start, GetLine, prompt::CARDEDIT, Error::NONE)
            .unwrap_err();
        assert_eq!(err.code(), code::GENERAL);
    }

    #[test]
    fn test_error_recovers_on_either_menu() {
        let mut i = interactor().build().unwrap();
        let sticky = Error::from_code(code::BAD_PIN);
        assert_eq!(i.next_state(S::Error, GetLine, prompt::CARDEDIT, sticky), Ok(S::Quit));
        assert_eq!(i.next_state(S::Error, GetLine, prompt::KEYEDIT, sticky), Ok(S::Quit));
        assert_eq!(
            i.next_state(S::Error, GetLine, prompt::KEYGEN_NAME, sticky),
            Err(sticky)
        );
    }

    #[test]
    fn test_card_failure_during_generation() {
        let mut d = Dialogue::new(interactor().build().unwrap());
        let cardctrl = format!("3 {SERIAL}");
        run(&mut d, &[(StatusCode::CardCtrl, cardctrl.as_str()), (GetLine, prompt::CARDEDIT)]);

        let err = d.handle(StatusCode::ScOpFailure, Some("2"), &mut Vec::new());
        assert_eq!(err.code(), code::BAD_PIN);
        assert_eq!(d.state(), S::Error);
    }

    #[test]
    fn test_builder_validation() {
        assert_eq!(
            interactor().key_size(0).build().unwrap_err(),
            ConfigError::InvalidKeySize(0)
        );
        assert_eq!(
            interactor().name("a\nb").build().unwrap_err(),
            ConfigError::MultiLine("name")
        );
    }
}
