//! The per-event dispatcher.

use std::io::{self, Write};

use tracing::{debug, warn};

use crate::core::{
    DialogueState, EditInteractor, Error, StatusCode, code, sc_op_failure_to_error,
    status_to_error,
};

/// One running dialogue: an interactor plus its current state and sticky
/// error.
///
/// The state only moves through [`Dialogue::handle`]; the configuration
/// inside the interactor was fixed when it was built.
#[derive(Debug)]
pub struct Dialogue<I: EditInteractor> {
    interactor: I,
    state: I::State,
    last_error: Error,
}

impl<I: EditInteractor> Dialogue<I> {
    /// Start a dialogue in the initial state.
    pub fn new(interactor: I) -> Self {
        Self {
            interactor,
            state: I::State::START,
            last_error: Error::NONE,
        }
    }

    /// Current state.
    pub fn state(&self) -> I::State {
        self.state
    }

    /// Sticky error; [`Error::NONE`] while the dialogue is healthy.
    pub fn last_error(&self) -> Error {
        self.last_error
    }

    /// The interactor driving this dialogue.
    pub fn interactor(&self) -> &I {
        &self.interactor
    }

    /// Give the interactor back.
    pub fn into_inner(self) -> I {
        self.interactor
    }

    /// Handle one engine event and return the sticky error.
    ///
    /// Answers are written to `out` followed by a newline. An event that
    /// fails with exactly [`code::GENERAL`] is taken as a question this
    /// dialogue does not know; it is answered with an empty line and the
    /// round does not fail.
    pub fn handle(&mut self, status: StatusCode, args: Option<&str>, out: &mut dyn Write) -> Error {
        let args = args.unwrap_or("");
        let mut err = status_to_error(status);

        if !err.is_error() {
            let old = self.state;
            let mut prompted = false;

            let next = if self.interactor.needs_no_response(status) {
                old
            } else if status == StatusCode::Error {
                err = self.interactor.parse_status_error(args);
                I::State::ERROR
            } else if status == StatusCode::ScOpFailure {
                err = sc_op_failure_to_error(args);
                I::State::ERROR
            } else {
                match self
                    .interactor
                    .next_state(old, status, args, self.last_error)
                {
                    Ok(next) => {
                        prompted = status.is_command();
                        next
                    }
                    Err(e) => {
                        err = e;
                        I::State::ERROR
                    }
                }
            };

            debug!(
                interactor = self.interactor.name(),
                from = ?old,
                status = status.name(),
                args,
                to = ?next,
                "next state"
            );

            if err.is_error() {
                self.state = old;
            } else {
                self.state = next;
                // A question that loops back onto the same state still wants
                // an answer.
                let moved = next != old || prompted;

                if moved && !self.last_error.is_error() {
                    match self.interactor.action(next) {
                        Err(e) => err = e,
                        Ok(Some(line)) => {
                            debug!(interactor = self.interactor.name(), answer = %line, "action result");
                            if let Err(e) = write_line(out, &line) {
                                warn!(interactor = self.interactor.name(), error = %e, "could not write answer");
                                err = e.into();
                            }
                        }
                        Ok(None) => {
                            debug!(interactor = self.interactor.name(), "no action result");
                        }
                    }
                } else {
                    debug!(interactor = self.interactor.name(), "no action executed");
                }
            }
        }

        if err.code() == code::GENERAL {
            debug!(
                interactor = self.interactor.name(),
                status = status.name(),
                args,
                "unexpected question, accepting the default"
            );
            err = match write_line(out, "") {
                Ok(()) => Error::NONE,
                Err(e) => {
                    warn!(interactor = self.interactor.name(), error = %e, "could not write answer");
                    e.into()
                }
            };
        }

        if err.is_error() {
            self.last_error = err;
            self.state = I::State::ERROR;
        }

        if self.last_error.is_error() {
            debug!(
                interactor = self.interactor.name(),
                error = %self.last_error,
                code = self.last_error.code(),
                "error now"
            );
        }

        self.last_error
    }
}

fn write_line(out: &mut dyn Write, line: &str) -> io::Result<()> {
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}
