//! walletsh entry point.
//!
//! Interactive wallet shell with typed, fuzzy tab completion. There are no
//! command-line flags; configuration comes from `WALLETSH_CONFIG` or
//! `./walletsh.toml`, and logging from `RUST_LOG`.

mod editor;
mod secret;

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};

use editor::RustylineEditor;
use secret::TerminalSecretInput;
use walletsh_terminal::{Repl, ShellState, standard_registry};
use walletsh_types::config::{CONFIG_ENV, ShellConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let (config, source) =
        ShellConfig::locate(explicit.as_deref()).context("failed to load configuration")?;
    match &source {
        Some(path) => log::info!("Loaded config from {}", path.display()),
        None => log::info!("Using built-in configuration"),
    }

    let registry = Rc::new(standard_registry().context("failed to register commands")?);
    log::info!("Registered {} commands", registry.len());

    let state = ShellState::with_seed(&config.seed);
    log::info!(
        "Seeded {} accounts, {} witnesses, {} public keys",
        state.accounts.len(),
        state.witnesses.len(),
        state.public_keys.len()
    );

    let mut editor = RustylineEditor::new(Rc::clone(&registry), &config)
        .context("failed to initialise line editor")?;
    let mut secrets = TerminalSecretInput;

    println!("walletsh - type 'help' for available commands");

    let mut repl = Repl::new(&registry, state).with_interrupt_policy(config.repl.on_interrupt);
    repl.run(&mut editor, &mut secrets, &mut std::io::stdout())?;
    log::info!("Session stopped");
    Ok(())
}
