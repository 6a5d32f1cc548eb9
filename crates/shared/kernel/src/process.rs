//! External command execution behind a substitutable seam.

use crate::error::{KernelError, KernelErrorExt};
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs an external program and captures its standard output.
pub trait CommandRunner {
    /// Runs `program` with `args` and returns its trimmed standard output.
    ///
    /// # Errors
    /// Returns [`KernelError::Spawn`] if the program cannot be started,
    /// [`KernelError::CommandFailed`] on a non-zero exit status and
    /// [`KernelError::Utf8`] if the output is not valid UTF-8.
    fn run(&self, program: &str, args: &[&str]) -> Result<String, KernelError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, KernelError> {
        (**self).run(program, args)
    }
}

/// Spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, KernelError> {
        let command = render_command(program, args);
        debug!(%command, "Running external command");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .context(format!("Failed to execute `{command}`. Is {program} installed and in your PATH?"))?;

        if !output.status.success() {
            return Err(KernelError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
                context: None,
            });
        }

        let stdout = String::from_utf8(output.stdout).context(command)?;
        Ok(stdout.trim().to_owned())
    }
}

/// Joins a program and its arguments for logs and error messages.
#[must_use]
pub fn render_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program).chain(args.iter().copied()).collect::<Vec<_>>().join(" ")
}

#[cfg(any(test, feature = "testing"))]
pub use fake::FakeRunner;

#[cfg(any(test, feature = "testing"))]
mod fake {
    use super::{CommandRunner, render_command};
    use crate::error::KernelError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Answers commands from a fixed table and records every invocation.
    ///
    /// Commands are matched on their rendered form, e.g. `pkg-config bullet --modversion`.
    #[derive(Debug, Default)]
    pub struct FakeRunner {
        responses: HashMap<String, Result<String, String>>,
        fallback: Option<String>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeRunner {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Registers a successful answer.
        #[must_use]
        pub fn respond(mut self, command: impl Into<String>, stdout: impl Into<String>) -> Self {
            self.responses.insert(command.into(), Ok(stdout.into()));
            self
        }

        /// Registers a failing answer with the given stderr.
        #[must_use]
        pub fn fail(mut self, command: impl Into<String>, stderr: impl Into<String>) -> Self {
            self.responses.insert(command.into(), Err(stderr.into()));
            self
        }

        /// Answer used for commands without a registered response.
        #[must_use]
        pub fn fallback(mut self, stdout: impl Into<String>) -> Self {
            self.fallback = Some(stdout.into());
            self
        }

        /// Every command run so far, in order.
        #[must_use]
        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<String, KernelError> {
            let command = render_command(program, args);
            self.calls.borrow_mut().push(command.clone());

            match self.responses.get(&command).cloned() {
                Some(Ok(stdout)) => Ok(stdout),
                Some(Err(stderr)) => Err(KernelError::CommandFailed {
                    command,
                    status: "exit status: 1".to_owned(),
                    stderr,
                    context: None,
                }),
                None => self.fallback.clone().ok_or_else(|| KernelError::CommandFailed {
                    command,
                    status: "exit status: 1".to_owned(),
                    stderr: "no response registered".to_owned(),
                    context: None,
                }),
            }
        }
    }
}
