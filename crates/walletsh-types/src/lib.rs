//! Foundation types for walletsh.
//!
//! This crate holds what every other walletsh crate shares: the error
//! taxonomy and the TOML-backed shell configuration.

pub mod config;
pub mod error;
