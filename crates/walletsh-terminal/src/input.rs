//! Blocking input collaborators the shell is driven by.
//!
//! The terminal widget and the no-echo password prompt live outside this
//! crate; the read loop only talks to them through these traits.

use walletsh_types::error::Result;

use crate::state::ShellState;

/// What one read from the line editor produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A submitted line, without its trailing newline.
    Line(String),
    /// The user pressed Ctrl-C while editing.
    Interrupted,
    /// End of input (Ctrl-D or a closed stream).
    Eof,
}

/// Line editor with completion support.
///
/// `state` is handed over for the duration of the read so the editor's
/// completion callback can query it; it must be handed back unchanged in
/// ownership when the call returns.
pub trait LineEditor {
    fn read_line(&mut self, prompt: &str, state: &mut ShellState) -> Result<ReadOutcome>;
}

/// Blocking, non-echoing secret prompt.
pub trait SecretInput {
    fn read_secret(&mut self, prompt: &str) -> Result<String>;
}
