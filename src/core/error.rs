//! Error types for the edit protocol.
//!
//! The engine speaks libgpg-error codes on the wire, so the central
//! [`Error`] value is a numeric `(source, code)` pair rather than a
//! descriptive enum. Configuration mistakes caught before a dialogue
//! starts are reported through [`ConfigError`] instead.

use std::fmt;
use std::io;

use thiserror::Error;

/// Numeric error codes understood by the engine (libgpg-error values).
pub mod code {
    /// Success.
    pub const NO_ERROR: u32 = 0;
    /// General error. Also the signal for an unrecognised question.
    pub const GENERAL: u32 = 1;
    /// Bad passphrase.
    pub const BAD_PASSPHRASE: u32 = 11;
    /// Invalid user ID.
    pub const INV_USER_ID: u32 = 37;
    /// Unusable public key.
    pub const UNUSABLE_PUBKEY: u32 = 53;
    /// Invalid value.
    pub const INV_VALUE: u32 = 55;
    /// Bad PIN.
    pub const BAD_PIN: u32 = 87;
    /// Invalid name.
    pub const INV_NAME: u32 = 88;
    /// Wrong smartcard inserted.
    pub const WRONG_CARD: u32 = 91;
    /// Operation cancelled.
    pub const CANCELED: u32 = 99;
    /// Generic smartcard error.
    pub const CARD: u32 = 108;
    /// PIN blocked.
    pub const PIN_BLOCKED: u32 = 130;
    /// Invalid crypto engine.
    pub const INV_ENGINE: u32 = 150;
    /// Key expired.
    pub const KEY_EXPIRED: u32 = 153;
    /// Signature expired.
    pub const SIG_EXPIRED: u32 = 154;
    /// Invalid time.
    pub const INV_TIME: u32 = 161;
    /// No passphrase given.
    pub const NO_PASSPHRASE: u32 = 177;
    /// Operation fully cancelled.
    pub const FULLY_CANCELED: u32 = 198;
    /// No key.
    pub const NO_KEY: u32 = 221;
    /// No reset code available for the card.
    pub const NO_RESET_CODE: u32 = 282;
    /// First user-defined code.
    pub const USER_1: u32 = 1024;
    /// The user ID is already signed (mapped onto [`USER_1`]).
    pub const ALREADY_SIGNED: u32 = USER_1;
    /// A system error occurred but `errno` was not set.
    pub const MISSING_ERRNO: u32 = 16381;
    /// A system error with an errno value the engine does not know.
    pub const UNKNOWN_ERRNO: u32 = 16382;
    /// Flag marking codes derived from an `errno` value.
    pub const SYSTEM_ERROR: u32 = 1 << 15;
}

/// Component that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSource {
    /// Source not specified.
    Unknown,
    /// GnuPG itself.
    Gpg,
    /// The smartcard daemon.
    Scd,
    /// The engine driver (this crate).
    Gpgme,
    /// Any other numeric source.
    Other(u8),
}

impl ErrorSource {
    /// Numeric source identifier.
    pub fn id(self) -> u8 {
        match self {
            ErrorSource::Unknown => 0,
            ErrorSource::Gpg => 2,
            ErrorSource::Scd => 6,
            ErrorSource::Gpgme => 7,
            ErrorSource::Other(id) => id,
        }
    }

    /// Decode a numeric source identifier.
    pub fn from_id(id: u8) -> Self {
        match id {
            0 => ErrorSource::Unknown,
            2 => ErrorSource::Gpg,
            6 => ErrorSource::Scd,
            7 => ErrorSource::Gpgme,
            other => ErrorSource::Other(other),
        }
    }

    /// Human-readable source name.
    pub fn name(self) -> &'static str {
        match self {
            ErrorSource::Unknown => "Unspecified source",
            ErrorSource::Gpg => "GnuPG",
            ErrorSource::Scd => "SCD",
            ErrorSource::Gpgme => "GPGME",
            ErrorSource::Other(_) => "Unknown source",
        }
    }
}

const SOURCE_SHIFT: u32 = 24;
const SOURCE_MASK: u32 = 0x7F;
const CODE_MASK: u32 = 0xFFFF;

/// An engine error value.
///
/// Cheap to copy and compared by code only. `Error::NONE` is success.
#[derive(Clone, Copy, Error)]
#[error("{}", self.message())]
pub struct Error {
    origin: ErrorSource,
    code: u32,
}

impl Error {
    /// The "no error" value.
    pub const NONE: Error = Error {
        origin: ErrorSource::Unknown,
        code: code::NO_ERROR,
    };

    /// Build an error from a code, attributed to this crate.
    pub const fn from_code(code: u32) -> Self {
        Self {
            origin: ErrorSource::Gpgme,
            code: code & CODE_MASK,
        }
    }

    /// Build an error from an explicit source and code.
    pub const fn new(origin: ErrorSource, code: u32) -> Self {
        Self {
            origin,
            code: code & CODE_MASK,
        }
    }

    /// Decode the 32-bit wire form (`source << 24 | code`).
    pub fn from_raw(raw: u32) -> Self {
        let code = raw & CODE_MASK;
        if code == code::NO_ERROR {
            return Self::NONE;
        }
        Self {
            origin: ErrorSource::from_id(((raw >> SOURCE_SHIFT) & SOURCE_MASK) as u8),
            code,
        }
    }

    /// The 32-bit wire form returned to the engine.
    pub fn encoded(&self) -> u32 {
        if self.code == code::NO_ERROR {
            return 0;
        }
        ((self.origin.id() as u32 & SOURCE_MASK) << SOURCE_SHIFT) | self.code
    }

    /// The error code without source.
    pub fn code(&self) -> u32 {
        self.code
    }

    /// The component that produced the error.
    pub fn origin(&self) -> ErrorSource {
        self.origin
    }

    /// True unless this is [`Error::NONE`].
    pub fn is_error(&self) -> bool {
        self.code != code::NO_ERROR
    }

    /// True for both cancellation codes.
    pub fn is_canceled(&self) -> bool {
        self.code == code::CANCELED || self.code == code::FULLY_CANCELED
    }

    /// True if the code was derived from an `errno` value.
    pub fn is_system_error(&self) -> bool {
        self.code & code::SYSTEM_ERROR != 0
    }

    /// Convert into a `Result`, treating [`Error::NONE`] as success.
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_error() { Err(self) } else { Ok(()) }
    }

    /// Description of the error code.
    pub fn message(&self) -> String {
        if self.is_system_error() {
            let errno = (self.code & !code::SYSTEM_ERROR) as i32;
            return io::Error::from_raw_os_error(errno).to_string();
        }
        let text = match self.code {
            code::NO_ERROR => "Success",
            code::GENERAL => "General error",
            code::BAD_PASSPHRASE => "Bad passphrase",
            code::INV_USER_ID => "Invalid user ID",
            code::UNUSABLE_PUBKEY => "Unusable public key",
            code::INV_VALUE => "Invalid value",
            code::BAD_PIN => "Bad PIN",
            code::INV_NAME => "Invalid name",
            code::WRONG_CARD => "Wrong card",
            code::CANCELED => "Operation cancelled",
            code::CARD => "General error reported by smartcard",
            code::PIN_BLOCKED => "PIN blocked",
            code::INV_ENGINE => "Invalid crypto engine",
            code::KEY_EXPIRED => "Key expired",
            code::SIG_EXPIRED => "Signature expired",
            code::INV_TIME => "Invalid time",
            code::NO_PASSPHRASE => "No passphrase given",
            code::FULLY_CANCELED => "Operation fully cancelled",
            code::NO_KEY => "No key",
            code::NO_RESET_CODE => "No reset code found",
            code::ALREADY_SIGNED => "User ID already signed",
            code::MISSING_ERRNO => "System error w/o errno",
            code::UNKNOWN_ERRNO => "Unknown system error",
            _ => return format!("Unknown error code {}", self.code),
        };
        text.to_owned()
    }
}

impl Default for Error {
    fn default() -> Self {
        Self::NONE
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error({} <{}>: {})",
            self.code,
            self.origin.name(),
            self.message()
        )
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        if let Some(errno) = err.raw_os_error() {
            if errno > 0 && (errno as u32) < code::SYSTEM_ERROR {
                return Self::from_code(code::SYSTEM_ERROR | errno as u32);
            }
            return Self::from_code(code::UNKNOWN_ERRNO);
        }
        // Synthetic errors carry no errno; keep the common cases distinguishable.
        let errno = match err.kind() {
            io::ErrorKind::BrokenPipe => 32,
            io::ErrorKind::WriteZero | io::ErrorKind::UnexpectedEof => 5,
            io::ErrorKind::NotFound => 2,
            io::ErrorKind::PermissionDenied => 13,
            io::ErrorKind::Interrupted => 4,
            _ => return Self::from_code(code::UNKNOWN_ERRNO),
        };
        Self::from_code(code::SYSTEM_ERROR | errno)
    }
}

/// Result type for engine operations.
pub type EditResult<T> = Result<T, Error>;

/// Invalid interactor or engine configuration, rejected before any
/// dialogue starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Signature check level must be 0..=3.
    #[error("invalid check level {0} (expected 0..=3)")]
    InvalidCheckLevel(u8),

    /// Trust signature depth must fit in one octet.
    #[error("invalid trust signature depth {0} (expected 0..=255)")]
    InvalidTrustDepth(u16),

    /// Trust signature options given without a trust level.
    #[error("trust signature requested without a trust level")]
    MissingTrustLevel,

    /// A required text field was empty.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// Card key size was zero.
    #[error("invalid key size {0}")]
    InvalidKeySize(u32),

    /// A single-line answer contained a line break.
    #[error("{0} must be a single line")]
    MultiLine(&'static str),
}
