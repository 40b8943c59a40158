//! Error types for walletsh.

use std::io;

/// Errors produced by the wallet shell.
///
/// Only [`ShellError::DuplicateCommand`] and [`ShellError::Config`] are
/// fatal; the REPL reports everything raised by a dispatch and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("duplicate command: {0}")]
    DuplicateCommand(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("argument error: {0}")]
    Argument(String),

    #[error("tokenization failure: {0}")]
    Tokenization(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("input error: {0}")]
    Input(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl ShellError {
    /// Whether the REPL can report this error and keep reading lines.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnknownCommand(_) | Self::Argument(_) | Self::Tokenization(_)
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;
