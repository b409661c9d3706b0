//! The gpg engine, driven through a child process.

use std::ffi::OsString;
use std::io::Write;
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{ChildStdin, Command};
use tracing::{debug, trace, warn};
use zeroize::{Zeroize, Zeroizing};

use super::{EditKind, EditRequest, Engine, EngineConfig, OutputLine, StatusHandler, parse_line};
use crate::core::{Error, StatusCode, code};

/// Runs edit sessions with `gpg --edit-key` / `gpg --card-edit`.
///
/// Status lines and data share the child's stdout; answers are written to
/// its stdin.
#[derive(Debug, Clone, Default)]
pub struct GpgEngine {
    config: EngineConfig,
}

impl GpgEngine {
    /// Create an engine with `config`.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Create an engine configured from the environment.
    pub fn from_env() -> Self {
        Self::new(EngineConfig::from_env())
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Arguments passed to the program for `request`.
    pub fn command_args(&self, request: &EditRequest<'_>) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "--no-tty",
            "--status-fd",
            "1",
            "--command-fd",
            "0",
            "--with-colons",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();

        if let Some(home) = &self.config.home_dir {
            args.push("--homedir".into());
            args.push(home.clone().into_os_string());
        }
        if self.config.expert {
            args.push("--expert".into());
        }
        if let Some(mode) = self.config.pinentry_mode.as_arg() {
            args.push("--pinentry-mode".into());
            args.push(mode.into());
        }
        args.extend(self.config.extra_args.iter().cloned());

        args.push(
            match request.kind {
                EditKind::Key => "--edit-key",
                EditKind::Card => "--card-edit",
            }
            .into(),
        );
        if let Some(fingerprint) = request.fingerprint {
            args.push("--".into());
            args.push(fingerprint.into());
        }
        args
    }
}

impl Engine for GpgEngine {
    async fn edit(
        &mut self,
        request: EditRequest<'_>,
        handler: &mut dyn StatusHandler,
        out: &mut dyn Write,
    ) -> Result<(), Error> {
        if request.kind == EditKind::Key && request.fingerprint.is_none() {
            return Err(Error::from_code(code::INV_VALUE));
        }

        let args = self.command_args(&request);
        debug!(program = ?self.config.program, ?args, "spawning engine");

        let mut child = Command::new(&self.config.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let (Some(mut stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.start_kill();
            return Err(Error::from_code(code::GENERAL));
        };

        let mut reader = BufReader::new(stdout);
        let mut raw = Vec::new();
        let mut failure = Error::NONE;

        loop {
            raw.clear();
            if reader.read_until(b'\n', &mut raw).await? == 0 {
                break;
            }
            // User IDs are printed as the engine stores them, not always UTF-8.
            let bytes = raw.strip_suffix(b"\n").unwrap_or(&raw[..]);
            let line = String::from_utf8_lossy(bytes);
            let (status, args) = match parse_line(&line) {
                OutputLine::Data(_) => {
                    out.write_all(bytes)?;
                    out.write_all(b"\n")?;
                    continue;
                }
                OutputLine::UnknownStatus(keyword) => {
                    trace!(keyword, "ignoring unknown status");
                    continue;
                }
                OutputLine::Status(status, args) => (status, args),
            };
            trace!(%status, args, "status");

            let err = if status.is_command() {
                answer(handler, &mut stdin, status, args).await?
            } else {
                handler.status(status, Some(args), None)
            };

            if err.is_error() {
                warn!(%status, args, error = %err, "aborting edit session");
                failure = err;
                let _ = child.start_kill();
                break;
            }
        }

        drop(stdin);
        let exit = child.wait().await?;
        debug!(status = %exit, "engine exited");

        finish(failure, exit)
    }
}

/// Let the handler answer a prompt and send the answer.
async fn answer(
    handler: &mut dyn StatusHandler,
    stdin: &mut ChildStdin,
    status: StatusCode,
    args: &str,
) -> Result<Error, Error> {
    let mut reply = Zeroizing::new(Vec::new());
    let err = handler.status(status, Some(args), Some(&mut *reply));
    if err.is_error() {
        return Ok(err);
    }
    // Waiting for the engine while it waits for us would hang.
    if reply.is_empty() {
        warn!(%status, args, "prompt left unanswered");
        return Ok(Error::from_code(code::GENERAL));
    }

    stdin.write_all(&reply).await?;
    stdin.flush().await?;
    reply.zeroize();
    Ok(Error::NONE)
}

fn finish(failure: Error, exit: ExitStatus) -> Result<(), Error> {
    if failure.is_error() {
        return Err(failure);
    }
    if !exit.success() {
        return Err(Error::from_code(code::GENERAL));
    }
    Ok(())
}
