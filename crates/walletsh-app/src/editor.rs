//! rustyline front end: completion, argument hints, in-memory history.

use std::rc::Rc;

use rustyline::completion::{Completer, Pair};
use rustyline::config::{CompletionType, Config};
use rustyline::error::ReadlineError;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::{Context, Editor};
use rustyline::{Helper, Highlighter, Validator};
use walletsh_terminal::{
    CommandRegistry, CompletionEngine, FuzzyMatcher, LineEditor, ReadOutcome, ShellState,
};
use walletsh_types::config::ShellConfig;
use walletsh_types::error::{Result, ShellError};

/// rustyline helper backed by the completion engine.
///
/// Holds the shell state only while a line is being read; see
/// [`RustylineEditor::read_line`].
#[derive(Helper, Highlighter, Validator)]
pub struct WalletHelper {
    registry: Rc<CommandRegistry>,
    matcher: FuzzyMatcher,
    state: ShellState,
}

impl WalletHelper {
    pub fn new(registry: Rc<CommandRegistry>, matcher: FuzzyMatcher) -> Self {
        Self {
            registry,
            matcher,
            state: ShellState::default(),
        }
    }

    fn engine(&self) -> CompletionEngine<'_> {
        CompletionEngine::new(&self.registry, self.matcher)
    }

    /// Absolute start position and candidates for the word under `pos`.
    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let completions = self.engine().complete(&self.state, line, pos);
        let start = completions
            .first()
            .map_or(pos, |c| pos.saturating_sub(c.start.unsigned_abs()));
        let pairs = completions
            .into_iter()
            .map(|c| Pair {
                display: c.replacement.clone(),
                replacement: c.replacement,
            })
            .collect();
        (start, pairs)
    }
}

impl Completer for WalletHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}

impl Hinter for WalletHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.engine().hint(line, pos)
    }
}

/// [`LineEditor`] over a rustyline `Editor`.
pub struct RustylineEditor {
    editor: Editor<WalletHelper, DefaultHistory>,
}

fn input_error(e: ReadlineError) -> ShellError {
    ShellError::Input(e.to_string())
}

impl RustylineEditor {
    pub fn new(registry: Rc<CommandRegistry>, config: &ShellConfig) -> Result<Self> {
        let rl_config = Config::builder()
            .max_history_size(config.repl.history_size)
            .map_err(input_error)?
            .auto_add_history(false)
            .completion_type(CompletionType::List)
            .build();
        let mut editor = Editor::with_config(rl_config).map_err(input_error)?;
        editor.set_helper(Some(WalletHelper::new(
            registry,
            FuzzyMatcher::from_config(&config.completion),
        )));
        Ok(Self { editor })
    }

    /// Exchange the loop's state with the helper's slot.
    fn swap_state(&mut self, state: &mut ShellState) {
        if let Some(helper) = self.editor.helper_mut() {
            std::mem::swap(&mut helper.state, state);
        }
    }
}

impl LineEditor for RustylineEditor {
    /// The state is moved into the helper for the duration of the read, so
    /// completion sees it, and moved back out before returning.
    fn read_line(&mut self, prompt: &str, state: &mut ShellState) -> Result<ReadOutcome> {
        self.swap_state(state);
        let read = self.editor.readline(prompt);
        self.swap_state(state);

        match read {
            Ok(line) => {
                let entry = line.trim();
                if !entry.is_empty() {
                    self.editor.add_history_entry(entry).map_err(input_error)?;
                }
                Ok(ReadOutcome::Line(line))
            },
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(input_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use walletsh_terminal::standard_registry;

    fn helper() -> WalletHelper {
        let registry = Rc::new(standard_registry().unwrap());
        let mut helper = WalletHelper::new(registry, FuzzyMatcher::default());
        helper.state.add_account("alex");
        helper.state.add_account("newguy");
        helper
    }

    #[test]
    fn command_completion_replaces_the_typed_word() {
        let (start, pairs) = helper().candidates("create_acc", 10);
        assert_eq!(start, 0);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].replacement, "create_account");
    }

    #[test]
    fn argument_completion_starts_at_word() {
        let line = "update_witness new";
        let (start, pairs) = helper().candidates(line, line.len());
        assert_eq!(start, "update_witness ".len());
        assert_eq!(pairs[0].replacement, "newguy");
    }

    #[test]
    fn empty_slot_starts_at_cursor() {
        let line = "create_account ";
        let (start, pairs) = helper().candidates(line, line.len());
        assert_eq!(start, line.len());
        let names: Vec<&str> = pairs.iter().map(|p| p.replacement.as_str()).collect();
        assert_eq!(names, vec!["alex", "newguy"]);
    }

    #[test]
    fn no_candidates_keeps_cursor() {
        let line = "exit ";
        let (start, pairs) = helper().candidates(line, line.len());
        assert_eq!(start, line.len());
        assert!(pairs.is_empty());
    }
}
