//! Engine replaying a fixed list of statuses.

use std::io::Write;

use crate::core::{Error, StatusCode, code};
use crate::engine::{EditKind, EditRequest, Engine, StatusHandler};

/// Replays the same events on every session and records the answers.
pub(crate) struct ScriptedEngine {
    events: Vec<(StatusCode, String)>,
    data: Vec<String>,
    failure: Option<Error>,
    written: String,
    requests: Vec<(EditKind, Option<String>)>,
}

impl ScriptedEngine {
    pub(crate) fn new(events: &[(StatusCode, &str)]) -> Self {
        Self {
            events: events
                .iter()
                .map(|&(status, args)| (status, args.to_owned()))
                .collect(),
            data: Vec::new(),
            failure: None,
            written: String::new(),
            requests: Vec::new(),
        }
    }

    /// Emit `line` on the data channel before the first status.
    pub(crate) fn with_data(mut self, line: &str) -> Self {
        self.data.push(line.to_owned());
        self
    }

    /// Report `err` after the script ran out.
    pub(crate) fn fail_with(mut self, err: Error) -> Self {
        self.failure = Some(err);
        self
    }

    /// Everything answered so far.
    pub(crate) fn written(&self) -> &str {
        &self.written
    }

    pub(crate) fn requests(&self) -> &[(EditKind, Option<String>)] {
        &self.requests
    }
}

impl Engine for ScriptedEngine {
    async fn edit(
        &mut self,
        request: EditRequest<'_>,
        handler: &mut dyn StatusHandler,
        out: &mut dyn Write,
    ) -> Result<(), Error> {
        self.requests
            .push((request.kind, request.fingerprint.map(str::to_owned)));

        for line in &self.data {
            writeln!(out, "{line}")?;
        }

        for (status, args) in &self.events {
            let err = if status.is_command() {
                let mut reply = Vec::new();
                let err = handler.status(*status, Some(args.as_str()), Some(&mut reply));
                if !err.is_error() && reply.is_empty() {
                    return Err(Error::from_code(code::GENERAL));
                }
                self.written.push_str(&String::from_utf8_lossy(&reply));
                err
            } else {
                handler.status(*status, Some(args.as_str()), None)
            };
            if err.is_error() {
                return Err(err);
            }
        }

        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
