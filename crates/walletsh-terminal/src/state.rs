//! Mutable session data shared by completion and dispatch.

use std::collections::BTreeSet;
use std::fmt;

use walletsh_types::config::SeedConfig;

/// Known names plus the session flags.
///
/// Owned by the read loop. Completion and dispatch only ever borrow it for
/// the duration of a single call. Name sets are ordered so candidate lists
/// come out in a stable order.
#[derive(Debug, PartialEq, Eq)]
pub struct ShellState {
    pub accounts: BTreeSet<String>,
    pub witnesses: BTreeSet<String>,
    pub public_keys: BTreeSet<String>,
    /// Wallet is locked. Initially `true`.
    pub locked: bool,
    /// Cleared by `exit`; the loop stops once it observes `false`.
    pub running: bool,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            accounts: BTreeSet::new(),
            witnesses: BTreeSet::new(),
            public_keys: BTreeSet::new(),
            locked: true,
            running: true,
        }
    }
}

impl ShellState {
    /// Empty, locked, running.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the configured seed names.
    pub fn with_seed(seed: &SeedConfig) -> Self {
        let mut state = Self::new();
        for name in &seed.accounts {
            state.add_account(name);
        }
        for name in &seed.witnesses {
            state.add_witness(name);
        }
        for key in &seed.public_keys {
            state.add_public_key(key);
        }
        state
    }

    pub fn add_account(&mut self, name: &str) {
        self.accounts.insert(name.to_string());
    }

    pub fn add_witness(&mut self, name: &str) {
        self.witnesses.insert(name.to_string());
    }

    pub fn add_public_key(&mut self, key: &str) {
        self.public_keys.insert(key.to_string());
    }

    /// Current position in the session state machine.
    pub fn session(&self) -> SessionState {
        if !self.running {
            SessionState::Stopped
        } else if self.locked {
            SessionState::Locked
        } else {
            SessionState::Unlocked
        }
    }
}

/// Locked -> Unlocked via `unlock`; back via `lock` or `set_password`;
/// any state -> Stopped via `exit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Locked,
    Unlocked,
    Stopped,
}

impl SessionState {
    pub fn label(self) -> &'static str {
        match self {
            SessionState::Locked => "locked",
            SessionState::Unlocked => "unlocked",
            SessionState::Stopped => "stopped",
        }
    }

    /// Prompt shown by the line editor, e.g. `locked > `.
    pub fn prompt(self) -> String {
        format!("{} > ", self.label())
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
