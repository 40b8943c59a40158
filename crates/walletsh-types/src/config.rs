//! Shell configuration loaded from TOML.
//!
//! Every table and key is optional; a missing file means defaults. A file
//! that exists but does not parse is a fatal [`ShellError::Config`].

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, ShellError};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "WALLETSH_CONFIG";

/// Config file picked up from the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "walletsh.toml";

/// Top-level configuration (`walletsh.toml`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Names known before any command runs.
    pub seed: SeedConfig,
    /// Fuzzy ranking knobs.
    pub completion: CompletionConfig,
    /// Read-loop behaviour.
    pub repl: ReplConfig,
}

/// Seed name sets used to bootstrap completion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    pub accounts: Vec<String>,
    pub witnesses: Vec<String>,
    pub public_keys: Vec<String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            accounts: vec!["initminer".to_string()],
            witnesses: vec!["initminer".to_string()],
            public_keys: Vec::new(),
        }
    }
}

/// Fuzzy ranking configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompletionConfig {
    /// How many top-scoring candidates are considered.
    pub max_candidates: usize,
    /// Candidates must score strictly above this to be kept.
    pub min_score: u8,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            max_candidates: 5,
            min_score: 50,
        }
    }
}

/// What an interrupt (Ctrl-C) at the prompt does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterruptPolicy {
    /// Abandon the current line and prompt again.
    #[default]
    Reprompt,
    /// Stop the shell as if `exit` had been typed.
    Exit,
}

/// Read-loop configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplConfig {
    /// In-memory history capacity of the line editor.
    pub history_size: usize,
    pub on_interrupt: InterruptPolicy,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            history_size: 100,
            on_interrupt: InterruptPolicy::Reprompt,
        }
    }
}

impl ShellConfig {
    /// Parse and validate a configuration document.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| ShellError::Config(format!("walletsh.toml: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ShellError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    /// Resolve the configuration to use.
    ///
    /// Resolution order:
    /// 1. `explicit` (normally the value of [`CONFIG_ENV`]); must exist
    /// 2. [`DEFAULT_CONFIG_FILE`] in the working directory, if present
    /// 3. Built-in defaults
    pub fn locate(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Ok((Self::load(local)?, Some(local.to_path_buf())));
        }
        log::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
        Ok((Self::default(), None))
    }

    fn validate(&self) -> Result<()> {
        if self.completion.max_candidates == 0 {
            return Err(ShellError::Config(
                "completion.max_candidates must be at least 1".to_string(),
            ));
        }
        if self.completion.min_score > 100 {
            return Err(ShellError::Config(format!(
                "completion.min_score must be within 0..=100, got {}",
                self.completion.min_score
            )));
        }
        if self.repl.history_size == 0 {
            return Err(ShellError::Config(
                "repl.history_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
