//! Command trait, registry, and the environment handed to commands.

use std::collections::HashMap;

use walletsh_types::error::{Result, ShellError};

use crate::input::SecretInput;
use crate::params::Parameter;
use crate::state::ShellState;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text lines.
    Text(String),
    /// Command produced no visible output.
    None,
}

/// Everything a command may touch while it runs.
pub struct Environment<'a> {
    /// Session data; mutations are visible to the next completion query.
    pub state: &'a mut ShellState,
    /// Password prompt for `unlock` and `set_password`.
    pub secrets: &'a mut dyn SecretInput,
    /// The registry the command was resolved from (read-only).
    pub registry: &'a CommandRegistry,
}

/// A single invocable operation with a declared, typed signature.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Positional parameters, in order.
    fn params(&self) -> &[Parameter];

    /// Command category for grouping in `help` output.
    fn category(&self) -> &str {
        "wallet"
    }

    /// Signature string, e.g. `vote_for_witness(voter:account, witness:witness, ...)`.
    fn usage(&self) -> String {
        let params: Vec<String> = self.params().iter().map(|p| p.to_string()).collect();
        format!("{}({})", self.name(), params.join(", "))
    }

    /// Execute the command with raw argument strings.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// Fail with an argument error unless exactly the declared number of
/// arguments was supplied.
pub fn expect_arity(cmd: &dyn Command, args: &[&str]) -> Result<()> {
    let expected = cmd.params().len();
    if args.len() == expected {
        return Ok(());
    }
    Err(ShellError::Argument(format!(
        "{} takes {expected} argument{}, got {}; usage: {}",
        cmd.name(),
        if expected == 1 { "" } else { "s" },
        args.len(),
        cmd.usage()
    )))
}

/// Registry of available commands.
///
/// Built once at startup; names are unique and kept in registration order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
    by_name: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. A name that is already taken is rejected.
    pub fn register(&mut self, cmd: Box<dyn Command>) -> Result<()> {
        let name = cmd.name().to_string();
        if self.by_name.contains_key(&name) {
            return Err(ShellError::DuplicateCommand(name));
        }
        log::trace!("registered {}", cmd.usage());
        self.by_name.insert(name, self.commands.len());
        self.commands.push(cmd);
        Ok(())
    }

    /// Exact-name lookup.
    pub fn lookup(&self, name: &str) -> Option<&dyn Command> {
        self.by_name.get(name).map(|&i| self.commands[i].as_ref())
    }

    /// Command names in registration order.
    pub fn list(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// Commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.iter().map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamType;

    const PAIR: &[Parameter] = &[
        Parameter::new("from", ParamType::AccountName),
        Parameter::new("to", ParamType::AccountName),
    ];

    struct PairCmd(&'static str);
    impl Command for PairCmd {
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> &str {
            "Remember two accounts"
        }
        fn params(&self) -> &[Parameter] {
            PAIR
        }
        fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
            expect_arity(self, args)?;
            env.state.add_account(args[0]);
            env.state.add_account(args[1]);
            Ok(CommandOutput::None)
        }
    }

    #[test]
    fn register_and_lookup() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(PairCmd("pair"))).unwrap();
        let cmd = reg.lookup("pair").unwrap();
        assert_eq!(cmd.name(), "pair");
        assert_eq!(cmd.params().len(), 2);
        assert!(reg.lookup("PAIR").is_none());
        assert!(reg.lookup("missing").is_none());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(PairCmd("pair"))).unwrap();
        let err = reg.register(Box::new(PairCmd("pair"))).unwrap_err();
        assert!(matches!(err, ShellError::DuplicateCommand(ref n) if n == "pair"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn list_keeps_registration_order() {
        let mut reg = CommandRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            reg.register(Box::new(PairCmd(name))).unwrap();
        }
        assert_eq!(reg.list(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn default_creates_empty_registry() {
        let reg = CommandRegistry::default();
        assert!(reg.is_empty());
        assert!(reg.list().is_empty());
    }

    #[test]
    fn usage_lists_typed_params() {
        assert_eq!(PairCmd("pair").usage(), "pair(from:account, to:account)");
    }

    #[test]
    fn arity_mismatch_is_argument_error() {
        let err = expect_arity(&PairCmd("pair"), &["one"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("argument error"));
        assert!(msg.contains("takes 2 arguments, got 1"));
        assert!(msg.contains("pair(from:account, to:account)"));
        assert!(expect_arity(&PairCmd("pair"), &["a", "b"]).is_ok());
    }
}
