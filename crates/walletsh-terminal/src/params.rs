//! Parameter types and the completion providers bound to them.
//!
//! Every parameter of every command is tagged with a [`ParamType`]. The tag
//! alone decides where completion candidates come from; providers are plain
//! functions of the current [`ShellState`] and are evaluated on every query.

use std::fmt;

use crate::state::ShellState;

/// Closed set of argument kinds a command can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    AccountName,
    WitnessName,
    PublicKey,
    FreeText,
    Boolean,
}

/// Produces the raw candidate set for one parameter type. Never mutates state.
pub type CompletionProvider = fn(&ShellState) -> Vec<String>;

const BOOLEAN_CANDIDATES: &[&str] = &["true", "false"];

/// Placeholders offered for free-form text (empty string, empty JSON object).
const FREE_TEXT_HINTS: &[&str] = &["\"\"", "{}"];

fn known_accounts(state: &ShellState) -> Vec<String> {
    state.accounts.iter().cloned().collect()
}

fn known_witnesses(state: &ShellState) -> Vec<String> {
    state.witnesses.iter().cloned().collect()
}

fn known_public_keys(state: &ShellState) -> Vec<String> {
    state.public_keys.iter().cloned().collect()
}

fn boolean_literals(_state: &ShellState) -> Vec<String> {
    BOOLEAN_CANDIDATES.iter().map(|s| s.to_string()).collect()
}

fn free_text_hints(_state: &ShellState) -> Vec<String> {
    FREE_TEXT_HINTS.iter().map(|s| s.to_string()).collect()
}

impl ParamType {
    /// All variants, in declaration order.
    pub const ALL: [ParamType; 5] = [
        ParamType::AccountName,
        ParamType::WitnessName,
        ParamType::PublicKey,
        ParamType::FreeText,
        ParamType::Boolean,
    ];

    /// The provider table.
    pub fn provider(self) -> CompletionProvider {
        match self {
            ParamType::AccountName => known_accounts,
            ParamType::WitnessName => known_witnesses,
            ParamType::PublicKey => known_public_keys,
            ParamType::FreeText => free_text_hints,
            ParamType::Boolean => boolean_literals,
        }
    }

    /// Evaluate this type's provider against the current state.
    pub fn candidates(self, state: &ShellState) -> Vec<String> {
        (self.provider())(state)
    }

    /// Short name used in signatures and hints.
    pub fn label(self) -> &'static str {
        match self {
            ParamType::AccountName => "account",
            ParamType::WitnessName => "witness",
            ParamType::PublicKey => "public_key",
            ParamType::FreeText => "text",
            ParamType::Boolean => "bool",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A positional, typed command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    pub name: &'static str,
    pub kind: ParamType,
}

impl Parameter {
    pub const fn new(name: &'static str, kind: ParamType) -> Self {
        Self { name, kind }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.kind)
    }
}
