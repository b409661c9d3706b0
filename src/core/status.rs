//! Status codes emitted by the engine on its status channel.
//!
//! Ordinals match the engine's `gpgme_status_code_t` exactly; they are
//! part of the wire contract and MUST NOT be reordered.

use std::fmt;
use std::str::FromStr;

macro_rules! status_codes {
    ($($variant:ident = $value:literal => $name:literal,)*) => {
        /// A status event reported by the engine.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u32)]
        #[allow(missing_docs)]
        pub enum StatusCode {
            $($variant = $value,)*
        }

        impl StatusCode {
            /// Every known status code, in ordinal order.
            pub const ALL: &'static [StatusCode] = &[$(StatusCode::$variant,)*];

            /// The keyword used on the status channel (e.g. `"GET_LINE"`).
            pub fn name(self) -> &'static str {
                match self {
                    $(StatusCode::$variant => $name,)*
                }
            }

            /// Look up a status code by its ordinal.
            pub fn from_u32(value: u32) -> Option<Self> {
                match value {
                    $($value => Some(StatusCode::$variant),)*
                    _ => None,
                }
            }

            /// Look up a status code by its status-channel keyword.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(StatusCode::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

status_codes! {
    Eof = 0 => "EOF",
    Enter = 1 => "ENTER",
    Leave = 2 => "LEAVE",
    Abort = 3 => "ABORT",
    GoodSig = 4 => "GOODSIG",
    BadSig = 5 => "BADSIG",
    ErrSig = 6 => "ERRSIG",
    BadArmor = 7 => "BADARMOR",
    RsaOrIdea = 8 => "RSA_OR_IDEA",
    KeyExpired = 9 => "KEYEXPIRED",
    KeyRevoked = 10 => "KEYREVOKED",
    TrustUndefined = 11 => "TRUST_UNDEFINED",
    TrustNever = 12 => "TRUST_NEVER",
    TrustMarginal = 13 => "TRUST_MARGINAL",
    TrustFully = 14 => "TRUST_FULLY",
    TrustUltimate = 15 => "TRUST_ULTIMATE",
    ShmInfo = 16 => "SHM_INFO",
    ShmGet = 17 => "SHM_GET",
    ShmGetBool = 18 => "SHM_GET_BOOL",
    ShmGetHidden = 19 => "SHM_GET_HIDDEN",
    NeedPassphrase = 20 => "NEED_PASSPHRASE",
    ValidSig = 21 => "VALIDSIG",
    SigId = 22 => "SIG_ID",
    EncTo = 23 => "ENC_TO",
    NoData = 24 => "NODATA",
    BadPassphrase = 25 => "BAD_PASSPHRASE",
    NoPubkey = 26 => "NO_PUBKEY",
    NoSeckey = 27 => "NO_SECKEY",
    NeedPassphraseSym = 28 => "NEED_PASSPHRASE_SYM",
    DecryptionFailed = 29 => "DECRYPTION_FAILED",
    DecryptionOkay = 30 => "DECRYPTION_OKAY",
    MissingPassphrase = 31 => "MISSING_PASSPHRASE",
    GoodPassphrase = 32 => "GOOD_PASSPHRASE",
    GoodMdc = 33 => "GOODMDC",
    BadMdc = 34 => "BADMDC",
    ErrMdc = 35 => "ERRMDC",
    Imported = 36 => "IMPORTED",
    ImportOk = 37 => "IMPORT_OK",
    ImportProblem = 38 => "IMPORT_PROBLEM",
    ImportRes = 39 => "IMPORT_RES",
    FileStart = 40 => "FILE_START",
    FileDone = 41 => "FILE_DONE",
    FileError = 42 => "FILE_ERROR",
    BeginDecryption = 43 => "BEGIN_DECRYPTION",
    EndDecryption = 44 => "END_DECRYPTION",
    BeginEncryption = 45 => "BEGIN_ENCRYPTION",
    EndEncryption = 46 => "END_ENCRYPTION",
    DeleteProblem = 47 => "DELETE_PROBLEM",
    GetBool = 48 => "GET_BOOL",
    GetLine = 49 => "GET_LINE",
    GetHidden = 50 => "GET_HIDDEN",
    GotIt = 51 => "GOT_IT",
    Progress = 52 => "PROGRESS",
    SigCreated = 53 => "SIG_CREATED",
    SessionKey = 54 => "SESSION_KEY",
    NotationName = 55 => "NOTATION_NAME",
    NotationData = 56 => "NOTATION_DATA",
    PolicyUrl = 57 => "POLICY_URL",
    BeginStream = 58 => "BEGIN_STREAM",
    EndStream = 59 => "END_STREAM",
    KeyCreated = 60 => "KEY_CREATED",
    UseridHint = 61 => "USERID_HINT",
    Unexpected = 62 => "UNEXPECTED",
    InvRecp = 63 => "INV_RECP",
    NoRecp = 64 => "NO_RECP",
    AlreadySigned = 65 => "ALREADY_SIGNED",
    SigExpired = 66 => "SIGEXPIRED",
    ExpSig = 67 => "EXPSIG",
    ExpKeySig = 68 => "EXPKEYSIG",
    Truncated = 69 => "TRUNCATED",
    Error = 70 => "ERROR",
    NewSig = 71 => "NEWSIG",
    RevKeySig = 72 => "REVKEYSIG",
    SigSubpacket = 73 => "SIG_SUBPACKET",
    NeedPassphrasePin = 74 => "NEED_PASSPHRASE_PIN",
    ScOpFailure = 75 => "SC_OP_FAILURE",
    ScOpSuccess = 76 => "SC_OP_SUCCESS",
    CardCtrl = 77 => "CARDCTRL",
    BackupKeyCreated = 78 => "BACKUP_KEY_CREATED",
    PkaTrustBad = 79 => "PKA_TRUST_BAD",
    PkaTrustGood = 80 => "PKA_TRUST_GOOD",
    Plaintext = 81 => "PLAINTEXT",
    InvSgnr = 82 => "INV_SGNR",
    NoSgnr = 83 => "NO_SGNR",
    Success = 84 => "SUCCESS",
    DecryptionInfo = 85 => "DECRYPTION_INFO",
    PlaintextLength = 86 => "PLAINTEXT_LENGTH",
    Mountpoint = 87 => "MOUNTPOINT",
    PinentryLaunched = 88 => "PINENTRY_LAUNCHED",
    Attribute = 89 => "ATTRIBUTE",
    BeginSigning = 90 => "BEGIN_SIGNING",
    KeyNotCreated = 91 => "KEY_NOT_CREATED",
    InquireMaxlen = 92 => "INQUIRE_MAXLEN",
    Failure = 93 => "FAILURE",
    KeyConsidered = 94 => "KEY_CONSIDERED",
    TofuUser = 95 => "TOFU_USER",
    TofuStats = 96 => "TOFU_STATS",
    TofuStatsLong = 97 => "TOFU_STATS_LONG",
    NotationFlags = 98 => "NOTATION_FLAGS",
}

impl StatusCode {
    /// Prompts that expect an answer on the command channel.
    pub fn is_command(self) -> bool {
        matches!(
            self,
            StatusCode::GetBool | StatusCode::GetLine | StatusCode::GetHidden
        )
    }

    /// The numeric ordinal.
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An unrecognised status keyword.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status keyword: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for StatusCode {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusCode::from_name(s).ok_or_else(|| UnknownStatus(s.to_owned()))
    }
}
