//! Resolve a submitted line to a command and run it.

use walletsh_types::error::{Result, ShellError};

use crate::input::SecretInput;
use crate::interpreter::{CommandOutput, CommandRegistry, Environment};
use crate::lexer;
use crate::state::ShellState;

/// A line split into command name and raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// `None` for a blank line, which is a silent no-op.
    pub command: Option<String>,
    pub args: Vec<String>,
}

/// Split a submitted line. Never fails; see [`lexer::tokenize`].
pub fn parse(line: &str) -> ParsedLine {
    let mut words = lexer::tokenize(line).words.into_iter();
    let command = words.next().filter(|w| !w.is_empty());
    ParsedLine {
        command,
        args: words.collect(),
    }
}

/// Runs parsed lines against a registry.
pub struct Dispatcher<'r> {
    registry: &'r CommandRegistry,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r CommandRegistry) -> Self {
        Self { registry }
    }

    /// Parse and dispatch one line.
    pub fn execute_line(
        &self,
        state: &mut ShellState,
        secrets: &mut dyn SecretInput,
        line: &str,
    ) -> Result<CommandOutput> {
        let parsed = parse(line);
        match parsed.command {
            Some(name) => self.dispatch(state, secrets, &name, &parsed.args),
            None => Ok(CommandOutput::None),
        }
    }

    /// Invoke `name` with raw arguments.
    ///
    /// Unknown names fail with [`ShellError::UnknownCommand`]. Arity is left
    /// to the command; anything a command fails with comes back as a
    /// recoverable error, wrapped as [`ShellError::Argument`] unless it
    /// already is one.
    pub fn dispatch(
        &self,
        state: &mut ShellState,
        secrets: &mut dyn SecretInput,
        name: &str,
        args: &[String],
    ) -> Result<CommandOutput> {
        let cmd = self
            .registry
            .lookup(name)
            .ok_or_else(|| ShellError::UnknownCommand(name.to_string()))?;
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        log::debug!("dispatch {name} with {} argument(s)", args.len());

        let mut env = Environment {
            state,
            secrets,
            registry: self.registry,
        };
        match cmd.execute(&args, &mut env) {
            Ok(output) => Ok(output),
            Err(e) if e.is_recoverable() => Err(e),
            Err(e) => Err(ShellError::Argument(format!("{name}: {e}"))),
        }
    }
}
