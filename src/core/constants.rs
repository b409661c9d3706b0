//! Prompt tags and answer literals used by the edit dialogues.
//!
//! These strings are fixed by the engine and MUST NOT be changed.

// =============================================================================
// ANSWERS
// =============================================================================

/// Answer literals written on the command channel.
pub mod answer {
    /// Boolean yes.
    pub const YES: &str = "Y";
    /// Boolean no.
    pub const NO: &str = "N";
    /// Leave the edit menu.
    pub const QUIT: &str = "quit";
    /// An empty line (accept default / terminate a list).
    pub const EMPTY: &str = "";

    /// `Y` or `N`.
    pub fn yes_no(value: bool) -> &'static str {
        if value { YES } else { NO }
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Menu commands typed at the edit prompts.
pub mod command {
    /// Add a user ID.
    pub const ADD_UID: &str = "adduid";
    /// Change the expiration time.
    pub const EXPIRE: &str = "expire";
    /// Change owner trust.
    pub const TRUST: &str = "trust";
    /// Revoke the key.
    pub const REVOKE_KEY: &str = "revkey";
    /// Add a subkey.
    pub const ADD_KEY: &str = "addkey";
    /// Enable card admin commands.
    pub const ADMIN: &str = "admin";
    /// Change card key attributes.
    pub const KEY_ATTR: &str = "key-attr";
    /// Generate card keys.
    pub const GENERATE: &str = "generate";
    /// Select an existing key by keygrip at the algorithm menu.
    pub const KEYGRIP: &str = "keygrip";
    /// Capability toggle string for an existing subkey.
    pub const SUBKEY_FLAGS: &str = "Q";
}

// =============================================================================
// PROMPT TAGS
// =============================================================================

/// Question identifiers carried as the argument of `GET_BOOL` / `GET_LINE`.
pub mod prompt {
    /// Main key edit menu.
    pub const KEYEDIT: &str = "keyedit.prompt";
    /// Main card edit menu.
    pub const CARDEDIT: &str = "cardedit.prompt";
    /// Save changes on quit.
    pub const SAVE_OKAY: &str = "keyedit.save.okay";

    /// Real name.
    pub const KEYGEN_NAME: &str = "keygen.name";
    /// Email address.
    pub const KEYGEN_EMAIL: &str = "keygen.email";
    /// Comment.
    pub const KEYGEN_COMMENT: &str = "keygen.comment";
    /// Validity period.
    pub const KEYGEN_VALID: &str = "keygen.valid";
    /// Algorithm menu.
    pub const KEYGEN_ALGO: &str = "keygen.algo";
    /// Keygrip of an existing key.
    pub const KEYGEN_KEYGRIP: &str = "keygen.keygrip";
    /// Capability flags.
    pub const KEYGEN_FLAGS: &str = "keygen.flags";
    /// Elliptic curve menu.
    pub const KEYGEN_CURVE: &str = "keygen.curve";

    /// Owner trust value.
    pub const OWNERTRUST_VALUE: &str = "edit_ownertrust.value";
    /// Confirm ultimate owner trust.
    pub const OWNERTRUST_SET_ULTIMATE: &str = "edit_ownertrust.set_ultimate.okay";

    /// Confirm revoking the whole key.
    pub const REVOKE_SUBKEY_OKAY: &str = "keyedit.revoke.subkey.okay";
    /// Revocation reason code.
    pub const REVOCATION_CODE: &str = "ask_revocation_reason.code";
    /// Revocation description line.
    pub const REVOCATION_TEXT: &str = "ask_revocation_reason.text";
    /// Confirm the revocation reason.
    pub const REVOCATION_OKAY: &str = "ask_revocation_reason.okay";

    /// Sign all user IDs.
    pub const SIGN_ALL_OKAY: &str = "keyedit.sign_all.okay";
    /// Really sign.
    pub const SIGN_UID_OKAY: &str = "sign_uid.okay";
    /// Signing key is expired.
    pub const SIGN_UID_EXPIRED_OKAY: &str = "sign_uid.expired_okay";
    /// Promote a local signature.
    pub const SIGN_UID_LOCAL_PROMOTE_OKAY: &str = "sign_uid.local_promote_okay";
    /// Re-sign an already signed user ID.
    pub const SIGN_UID_DUPE_OKAY: &str = "sign_uid.dupe_okay";
    /// Signature expiration.
    pub const SIGN_UID_EXPIRE: &str = "sign_uid.expire";
    /// Certification check level.
    pub const SIGN_UID_CLASS: &str = "sign_uid.class";
    /// Trust signature level.
    pub const TRUST_VALUE: &str = "trustsig_prompt.trust_value";
    /// Trust signature depth.
    pub const TRUST_DEPTH: &str = "trustsig_prompt.trust_depth";
    /// Trust signature scope.
    pub const TRUST_REGEXP: &str = "trustsig_prompt.trust_regexp";

    /// Card key algorithm.
    pub const CARD_ALGO: &str = "cardedit.genkeys.algo";
    /// Card key size.
    pub const CARD_SIZE: &str = "cardedit.genkeys.size";
    /// Make an off-card encryption key backup.
    pub const CARD_BACKUP_ENC: &str = "cardedit.genkeys.backup_enc";
    /// Replace existing card keys.
    pub const CARD_REPLACE_KEYS: &str = "cardedit.genkeys.replace_keys";

    /// Hidden passphrase entry.
    pub const PASSPHRASE_ENTER: &str = "passphrase.enter";
    /// Hidden PIN entry.
    pub const PASSPHRASE_PIN_ASK: &str = "passphrase.pin.ask";
}

// =============================================================================
// STATUS LINES
// =============================================================================

/// Prefix of every line on the engine's status channel.
pub const STATUS_PREFIX: &str = "[GNUPG:] ";

/// Default key size for card key generation.
pub const DEFAULT_CARD_KEY_SIZE: &str = "2048";
