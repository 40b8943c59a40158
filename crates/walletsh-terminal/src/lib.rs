//! Completion and dispatch engine for the wallet shell.
//!
//! Commands declare typed positional parameters and are registered by name.
//! The completion engine maps the parameter under the cursor to a candidate
//! provider over the live [`ShellState`]; the dispatcher resolves submitted
//! lines to a single command and normalises its failures.

pub mod completion;
pub mod dispatch;
pub mod fuzzy;
pub mod input;
mod interpreter;
pub mod lexer;
pub mod params;
pub mod repl;
mod session_commands;
pub mod state;
mod wallet_commands;

use walletsh_types::error::Result;

/// A completion candidate and where it starts relative to the cursor.
pub use completion::Completion;
/// Context-aware completion over the registry and shell state.
pub use completion::CompletionEngine;
/// Parses lines and invokes commands.
pub use dispatch::Dispatcher;
/// Candidate ranking against a partial word.
pub use fuzzy::FuzzyMatcher;
/// Line editor and secret prompt collaborators.
pub use input::{LineEditor, ReadOutcome, SecretInput};
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command.
pub use interpreter::CommandOutput;
/// Registry of available commands.
pub use interpreter::CommandRegistry;
/// Mutable environment passed to every command.
pub use interpreter::Environment;
/// Arity check shared by commands.
pub use interpreter::expect_arity;
/// Typed parameters.
pub use params::{ParamType, Parameter};
/// The read loop.
pub use repl::Repl;
/// Register help, lock, unlock, set_password and exit into a registry.
pub use session_commands::register_session_commands;
/// Session data and the lock/run state machine.
pub use state::{SessionState, ShellState};
/// Register create_account, update_witness and vote_for_witness into a registry.
pub use wallet_commands::register_wallet_commands;

/// Build the merged registry: session commands first, then wallet commands.
///
/// Fails with `DuplicateCommand` if the two namespaces share a name.
pub fn standard_registry() -> Result<CommandRegistry> {
    let mut reg = CommandRegistry::new();
    register_session_commands(&mut reg)?;
    register_wallet_commands(&mut reg)?;
    log::debug!("registered {} commands", reg.len());
    Ok(reg)
}
