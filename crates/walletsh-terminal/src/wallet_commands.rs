//! Wallet operations: create_account, update_witness, vote_for_witness.
//!
//! Only the local bookkeeping is done here: each command records the names
//! it touches so later completions offer them. Signing and broadcasting are
//! left to a wallet backend this crate does not have.

use walletsh_types::error::Result;

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment, expect_arity};
use crate::params::{ParamType, Parameter};

/// Register the wallet namespace into a registry.
pub fn register_wallet_commands(reg: &mut CommandRegistry) -> Result<()> {
    reg.register(Box::new(CreateAccountCmd))?;
    reg.register(Box::new(UpdateWitnessCmd))?;
    reg.register(Box::new(VoteForWitnessCmd))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// create_account
// ---------------------------------------------------------------------------

const CREATE_ACCOUNT_PARAMS: &[Parameter] = &[
    Parameter::new("creator", ParamType::AccountName),
    Parameter::new("new_name", ParamType::AccountName),
    Parameter::new("json_meta", ParamType::FreeText),
    Parameter::new("owner_key", ParamType::PublicKey),
    Parameter::new("active_key", ParamType::PublicKey),
    Parameter::new("posting_key", ParamType::PublicKey),
    Parameter::new("memo_key", ParamType::PublicKey),
    Parameter::new("broadcast", ParamType::Boolean),
];

struct CreateAccountCmd;
impl Command for CreateAccountCmd {
    fn name(&self) -> &str {
        "create_account"
    }
    fn description(&self) -> &str {
        "Create a new account paid for by an existing one"
    }
    fn params(&self) -> &[Parameter] {
        CREATE_ACCOUNT_PARAMS
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        expect_arity(self, args)?;
        let (creator, new_name) = (args[0], args[1]);
        env.state.add_account(creator);
        env.state.add_account(new_name);
        for key in &args[3..7] {
            env.state.add_public_key(key);
        }
        log::debug!("create_account: {creator} -> {new_name}");
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// update_witness
// ---------------------------------------------------------------------------

const UPDATE_WITNESS_PARAMS: &[Parameter] = &[
    Parameter::new("owner", ParamType::AccountName),
    Parameter::new("witness", ParamType::WitnessName),
    Parameter::new("enabled", ParamType::Boolean),
    Parameter::new("broadcast", ParamType::Boolean),
];

struct UpdateWitnessCmd;
impl Command for UpdateWitnessCmd {
    fn name(&self) -> &str {
        "update_witness"
    }
    fn description(&self) -> &str {
        "Create or update a witness owned by an account"
    }
    fn params(&self) -> &[Parameter] {
        UPDATE_WITNESS_PARAMS
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        expect_arity(self, args)?;
        env.state.add_account(args[0]);
        env.state.add_witness(args[1]);
        log::debug!("update_witness: {} owns {}", args[0], args[1]);
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// vote_for_witness
// ---------------------------------------------------------------------------

const VOTE_FOR_WITNESS_PARAMS: &[Parameter] = &[
    Parameter::new("voter", ParamType::AccountName),
    Parameter::new("witness", ParamType::WitnessName),
    Parameter::new("approve", ParamType::Boolean),
    Parameter::new("broadcast", ParamType::Boolean),
];

struct VoteForWitnessCmd;
impl Command for VoteForWitnessCmd {
    fn name(&self) -> &str {
        "vote_for_witness"
    }
    fn description(&self) -> &str {
        "Approve or withdraw an account's vote for a witness"
    }
    fn params(&self) -> &[Parameter] {
        VOTE_FOR_WITNESS_PARAMS
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        expect_arity(self, args)?;
        env.state.add_account(args[0]);
        env.state.add_witness(args[1]);
        log::debug!("vote_for_witness: {} -> {} ({})", args[0], args[1], args[2]);
        Ok(CommandOutput::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SecretInput;
    use crate::state::ShellState;
    use walletsh_types::error::ShellError;

    struct Unused;
    impl SecretInput for Unused {
        fn read_secret(&mut self, _prompt: &str) -> Result<String> {
            panic!("wallet commands never prompt");
        }
    }

    fn exec(state: &mut ShellState, name: &str, args: &[&str]) -> Result<CommandOutput> {
        let mut reg = CommandRegistry::new();
        register_wallet_commands(&mut reg).unwrap();
        let mut secrets = Unused;
        let mut env = Environment {
            state,
            secrets: &mut secrets,
            registry: &reg,
        };
        reg.lookup(name).unwrap().execute(args, &mut env)
    }

    #[test]
    fn wallet_namespace_registers_three_commands() {
        let mut reg = CommandRegistry::new();
        register_wallet_commands(&mut reg).unwrap();
        assert_eq!(reg.list(), vec!["create_account", "update_witness", "vote_for_witness"]);
    }

    #[test]
    fn create_account_signature() {
        assert_eq!(
            CreateAccountCmd.usage(),
            "create_account(creator:account, new_name:account, json_meta:text, \
             owner_key:public_key, active_key:public_key, posting_key:public_key, \
             memo_key:public_key, broadcast:bool)"
        );
    }

    #[test]
    fn create_account_adds_accounts_and_keys() {
        let mut state = ShellState::new();
        exec(
            &mut state,
            "create_account",
            &["alex", "newguy", "{}", "k1", "k2", "k3", "k4", "true"],
        )
        .unwrap();
        assert!(state.accounts.contains("alex"));
        assert!(state.accounts.contains("newguy"));
        assert_eq!(state.public_keys.len(), 4);
        assert!(state.witnesses.is_empty());
    }

    #[test]
    fn update_witness_adds_owner_and_witness() {
        let mut state = ShellState::new();
        exec(&mut state, "update_witness", &["alex", "w9", "true", "true"]).unwrap();
        assert!(state.accounts.contains("alex"));
        assert!(state.witnesses.contains("w9"));
    }

    #[test]
    fn vote_adds_voter_and_witness() {
        let mut state = ShellState::new();
        exec(&mut state, "vote_for_witness", &["bob", "w1", "false", "true"]).unwrap();
        assert!(state.accounts.contains("bob"));
        assert!(state.witnesses.contains("w1"));
    }

    #[test]
    fn values_are_not_validated() {
        let mut state = ShellState::new();
        exec(&mut state, "update_witness", &["a", "b", "maybe", "42"]).unwrap();
        assert!(state.witnesses.contains("b"));
    }

    #[test]
    fn too_many_arguments_is_rejected() {
        let mut state = ShellState::new();
        let err =
            exec(&mut state, "vote_for_witness", &["a", "b", "true", "true", "x"]).unwrap_err();
        assert!(matches!(err, ShellError::Argument(_)));
        assert!(state.accounts.is_empty());
    }
}
