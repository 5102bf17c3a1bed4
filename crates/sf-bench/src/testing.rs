//! Scripted process runner for unit tests

use std::cell::RefCell;
use std::io;

use crate::process::{CapturedOutput, CommandSpec, ProcessRunner, ProcessStatus};

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Exit(i32),
    NotFound,
    Stdout(String),
}

/// Records every command it is given and answers from prefix rules
/// (matched against [`CommandSpec::display`]); unmatched commands succeed.
#[derive(Default)]
pub(crate) struct FakeRunner {
    rules: Vec<(String, Reply)>,
    calls: RefCell<Vec<CommandSpec>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(mut self, prefix: &str, reply: Reply) -> Self {
        self.rules.push((prefix.to_string(), reply));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(CommandSpec::display).collect()
    }

    pub(crate) fn specs(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    fn answer(&self, spec: &CommandSpec) -> Option<Reply> {
        self.calls.borrow_mut().push(spec.clone());
        let line = spec.display();
        self.rules
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone())
    }
}

fn not_found() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "No such file or directory")
}

impl ProcessRunner for FakeRunner {
    fn status(&self, spec: &CommandSpec) -> io::Result<ProcessStatus> {
        match self.answer(spec) {
            Some(Reply::Exit(code)) => Ok(ProcessStatus::exited(code)),
            Some(Reply::NotFound) => Err(not_found()),
            Some(Reply::Stdout(_)) | None => Ok(ProcessStatus::exited(0)),
        }
    }

    fn output(&self, spec: &CommandSpec) -> io::Result<CapturedOutput> {
        let (status, stdout) = match self.answer(spec) {
            Some(Reply::Exit(code)) => (ProcessStatus::exited(code), String::new()),
            Some(Reply::NotFound) => return Err(not_found()),
            Some(Reply::Stdout(text)) => (ProcessStatus::exited(0), text),
            None => (ProcessStatus::exited(0), String::new()),
        };
        Ok(CapturedOutput { status, stdout })
    }
}
