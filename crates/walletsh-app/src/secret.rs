//! No-echo password prompt on the controlling terminal.

use walletsh_terminal::SecretInput;
use walletsh_types::error::Result;

pub struct TerminalSecretInput;

impl SecretInput for TerminalSecretInput {
    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        Ok(rpassword::prompt_password(prompt)?)
    }
}
