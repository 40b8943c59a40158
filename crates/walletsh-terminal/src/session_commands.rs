//! Session-control commands: help, lock, unlock, set_password, exit.

use walletsh_types::error::{Result, ShellError};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment, expect_arity};
use crate::params::Parameter;

const UNLOCK_PROMPT: &str = "enter password: ";
const SET_PASSWORD_PROMPT: &str = "enter new password: ";

/// Register the session-control namespace into a registry.
pub fn register_session_commands(reg: &mut CommandRegistry) -> Result<()> {
    reg.register(Box::new(HelpCmd))?;
    reg.register(Box::new(LockCmd))?;
    reg.register(Box::new(UnlockCmd))?;
    reg.register(Box::new(SetPasswordCmd))?;
    reg.register(Box::new(ExitCmd))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "List commands, or describe one with `help <command>`"
    }
    fn params(&self) -> &[Parameter] {
        &[]
    }
    fn category(&self) -> &str {
        "session"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        match args {
            [] => Ok(CommandOutput::Text(render_help(env.registry))),
            [name] => {
                let cmd = env
                    .registry
                    .lookup(name)
                    .ok_or_else(|| ShellError::UnknownCommand(name.to_string()))?;
                Ok(CommandOutput::Text(format!(
                    "{} [{}]\n  {}",
                    cmd.usage(),
                    cmd.category(),
                    cmd.description()
                )))
            },
            _ => Err(ShellError::Argument("usage: help [command]".to_string())),
        }
    }
}

/// Every command grouped by category, groups and members in registration order.
fn render_help(registry: &CommandRegistry) -> String {
    let mut groups: Vec<(&str, Vec<&dyn Command>)> = Vec::new();
    for cmd in registry.iter() {
        match groups.iter_mut().find(|(cat, _)| *cat == cmd.category()) {
            Some((_, members)) => members.push(cmd),
            None => groups.push((cmd.category(), vec![cmd])),
        }
    }

    let mut out = format!("Commands ({}):\n", registry.len());
    for (cat, members) in &groups {
        out.push_str(&format!("\n  [{cat}]\n"));
        for cmd in members {
            out.push_str(&format!("    {}\n        {}\n", cmd.usage(), cmd.description()));
        }
    }
    out.push_str("\nType 'help <command>' for details.");
    out
}

// ---------------------------------------------------------------------------
// lock
// ---------------------------------------------------------------------------

struct LockCmd;
impl Command for LockCmd {
    fn name(&self) -> &str {
        "lock"
    }
    fn description(&self) -> &str {
        "Lock the wallet"
    }
    fn params(&self) -> &[Parameter] {
        &[]
    }
    fn category(&self) -> &str {
        "session"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        expect_arity(self, args)?;
        env.state.locked = true;
        log::info!("wallet locked");
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// unlock
// ---------------------------------------------------------------------------

struct UnlockCmd;
impl Command for UnlockCmd {
    fn name(&self) -> &str {
        "unlock"
    }
    fn description(&self) -> &str {
        "Unlock the wallet (prompts for the password)"
    }
    fn params(&self) -> &[Parameter] {
        &[]
    }
    fn category(&self) -> &str {
        "session"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        expect_arity(self, args)?;
        // Verification belongs to the wallet backend, which is not wired in.
        let _password = env.secrets.read_secret(UNLOCK_PROMPT)?;
        env.state.locked = false;
        log::info!("wallet unlocked");
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// set_password
// ---------------------------------------------------------------------------

struct SetPasswordCmd;
impl Command for SetPasswordCmd {
    fn name(&self) -> &str {
        "set_password"
    }
    fn description(&self) -> &str {
        "Set a new wallet password, then lock"
    }
    fn params(&self) -> &[Parameter] {
        &[]
    }
    fn category(&self) -> &str {
        "session"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        expect_arity(self, args)?;
        let _password = env.secrets.read_secret(SET_PASSWORD_PROMPT)?;
        env.state.locked = true;
        log::info!("wallet password set, wallet locked");
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// exit
// ---------------------------------------------------------------------------

struct ExitCmd;
impl Command for ExitCmd {
    fn name(&self) -> &str {
        "exit"
    }
    fn description(&self) -> &str {
        "Leave the shell"
    }
    fn params(&self) -> &[Parameter] {
        &[]
    }
    fn category(&self) -> &str {
        "session"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        expect_arity(self, args)?;
        env.state.running = false;
        Ok(CommandOutput::None)
    }
}
