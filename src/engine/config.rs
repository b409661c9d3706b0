//! Engine configuration.

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// Environment variable overriding the gpg program.
pub const ENV_PROGRAM: &str = "KEYEDIT_GPG";

/// Environment variable naming the gpg home directory.
pub const ENV_HOME_DIR: &str = "GNUPGHOME";

/// How gpg obtains passphrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PinentryMode {
    /// Leave the agent's setting alone.
    #[default]
    Default,
    /// Always use the pinentry.
    Ask,
    /// Refuse all passphrase requests.
    Cancel,
    /// Fail passphrase requests with an error.
    Error,
    /// Ask through the status channel (`GET_HIDDEN`).
    Loopback,
}

impl PinentryMode {
    /// Value for `--pinentry-mode`, `None` for [`PinentryMode::Default`].
    pub fn as_arg(self) -> Option<&'static str> {
        match self {
            PinentryMode::Default => None,
            PinentryMode::Ask => Some("ask"),
            PinentryMode::Cancel => Some("cancel"),
            PinentryMode::Error => Some("error"),
            PinentryMode::Loopback => Some("loopback"),
        }
    }
}

impl fmt::Display for PinentryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg().unwrap_or("default"))
    }
}

/// Settings for spawning gpg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Program to run.
    pub program: PathBuf,
    /// `--homedir`, if any.
    pub home_dir: Option<PathBuf>,
    /// `--pinentry-mode`.
    pub pinentry_mode: PinentryMode,
    /// Pass `--expert` to unlock the extended edit menus.
    pub expert: bool,
    /// Extra arguments placed before the edit command.
    pub extra_args: Vec<OsString>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("gpg"),
            home_dir: None,
            pinentry_mode: PinentryMode::Default,
            expert: false,
            extra_args: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Defaults, overridden by `KEYEDIT_GPG` and `GNUPGHOME` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var_os(name))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let mut config = Self::default();
        if let Some(program) = lookup(ENV_PROGRAM).filter(|v| !v.is_empty()) {
            config.program = program.into();
        }
        if let Some(home) = lookup(ENV_HOME_DIR).filter(|v| !v.is_empty()) {
            config.home_dir = Some(home.into());
        }
        config
    }

    /// Set the program.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the home directory.
    pub fn with_home_dir(mut self, home_dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(home_dir.into());
        self
    }

    /// Set the pinentry mode.
    pub fn with_pinentry_mode(mut self, mode: PinentryMode) -> Self {
        self.pinentry_mode = mode;
        self
    }

    /// Enable or disable expert mode.
    pub fn with_expert(mut self, expert: bool) -> Self {
        self.expert = expert;
        self
    }

    /// Append an extra argument.
    pub fn with_arg(mut self, arg: impl Into<OsString>) -> Self {
        self.extra_args.push(arg.into());
        self
    }
}
