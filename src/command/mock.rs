use crate::command::{command_line, CommandRunner};
use crate::error::{Result, SemvertagError};
use std::cell::RefCell;
use std::path::Path;

/// Runner that records invocations instead of spawning processes
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<String>>,
    failing: Vec<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every invocation whose first argument is `subcommand` fail
    pub fn failing(mut self, subcommand: impl Into<String>) -> Self {
        self.failing.push(subcommand.into());
        self
    }

    /// Command lines run so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, _dir: &Path, program: &str, args: &[&str]) -> Result<String> {
        let line = command_line(program, args);
        self.calls.borrow_mut().push(line.clone());

        let fails = args
            .first()
            .is_some_and(|sub| self.failing.iter().any(|f| f == sub));
        if fails {
            return Err(SemvertagError::command(line, "simulated failure"));
        }
        Ok(String::new())
    }
}
