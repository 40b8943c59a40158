//! The read-dispatch loop and its session state machine.

use std::io::Write;

use walletsh_types::config::InterruptPolicy;
use walletsh_types::error::Result;

use crate::dispatch::Dispatcher;
use crate::input::{LineEditor, ReadOutcome, SecretInput};
use crate::interpreter::{CommandOutput, CommandRegistry};
use crate::state::{SessionState, ShellState};

/// Owns the shell state and drives the editor until `exit`.
pub struct Repl<'r> {
    dispatcher: Dispatcher<'r>,
    state: ShellState,
    on_interrupt: InterruptPolicy,
}

impl<'r> Repl<'r> {
    pub fn new(registry: &'r CommandRegistry, state: ShellState) -> Self {
        Self {
            dispatcher: Dispatcher::new(registry),
            state,
            on_interrupt: InterruptPolicy::default(),
        }
    }

    pub fn with_interrupt_policy(mut self, policy: InterruptPolicy) -> Self {
        self.on_interrupt = policy;
        self
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn session(&self) -> SessionState {
        self.state.session()
    }

    /// Give the state back once the loop is done with it.
    pub fn into_state(self) -> ShellState {
        self.state
    }

    /// Run until the session is stopped.
    ///
    /// Dispatch failures are written to `out` as `error: ...` and the loop
    /// continues. Only editor or output failures end the loop with an error.
    pub fn run(
        &mut self,
        editor: &mut dyn LineEditor,
        secrets: &mut dyn SecretInput,
        out: &mut dyn Write,
    ) -> Result<()> {
        while self.state.running {
            let prompt = self.state.session().prompt();
            match editor.read_line(&prompt, &mut self.state)? {
                ReadOutcome::Line(line) => self.submit(&line, secrets, out)?,
                ReadOutcome::Interrupted => match self.on_interrupt {
                    InterruptPolicy::Reprompt => {
                        writeln!(out, "^C")?;
                    },
                    InterruptPolicy::Exit => {
                        log::info!("interrupted, stopping");
                        self.state.running = false;
                    },
                },
                ReadOutcome::Eof => {
                    log::info!("end of input, stopping");
                    self.state.running = false;
                },
            }
        }
        debug_assert_eq!(self.state.session(), SessionState::Stopped);
        Ok(())
    }

    /// Dispatch one submitted line and report the outcome.
    pub fn submit(
        &mut self,
        line: &str,
        secrets: &mut dyn SecretInput,
        out: &mut dyn Write,
    ) -> Result<()> {
        match self.dispatcher.execute_line(&mut self.state, secrets, line) {
            Ok(CommandOutput::Text(text)) => writeln!(out, "{text}")?,
            Ok(CommandOutput::None) => {},
            Err(e) => {
                log::debug!("dispatch failed: {e}");
                writeln!(out, "error: {e}")?;
            },
        }
        Ok(())
    }
}
