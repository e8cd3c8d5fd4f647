//! External process execution (`git fetch`, `git push`).

pub mod mock;

pub use mock::RecordingRunner;

use crate::error::{Result, SemvertagError};
use std::path::Path;
use std::process::Command;

/// Runs external programs on behalf of the workflow
pub trait CommandRunner {
    /// Run `program` with `args` inside `dir` and wait for it to finish.
    ///
    /// # Returns
    /// * `Ok(String)` - Combined stdout and stderr of a successful run
    /// * `Err` - If the program cannot be started or exits non-zero; the error
    ///   carries the command line and its output
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<String>;
}

/// Render a command line for logs and error messages
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// [CommandRunner] backed by `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<String> {
        let line = command_line(program, args);
        tracing::info!("Executing `{}`", line);

        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| SemvertagError::command(&line, e.to_string()))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(SemvertagError::command(
                line,
                format!(
                    "exit code {}, output was {}",
                    output.status.code().unwrap_or(-1),
                    combined.trim()
                ),
            ));
        }

        tracing::info!("...ok");
        Ok(combined)
    }
}
