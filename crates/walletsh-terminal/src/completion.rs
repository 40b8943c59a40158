//! Context-aware completion for the line editor.
//!
//! The engine decides whether the cursor is on the command name or on the
//! Nth argument of a known command, pulls the raw candidates for that slot,
//! and narrows them with the [`FuzzyMatcher`]. It only reads the registry
//! and the shell state; it is safe to call on every keystroke.

use crate::fuzzy::FuzzyMatcher;
use crate::interpreter::{Command, CommandRegistry};
use crate::lexer::{self, Tokens};
use crate::state::ShellState;

/// One candidate replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub replacement: String,
    /// Where the replacement starts, in bytes relative to the cursor (`<= 0`).
    pub start: isize,
}

/// What the cursor is completing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext {
    /// The first word: a command name.
    CommandName,
    /// Argument `index` (0-based, command name excluded) of `command`.
    Argument { command: String, index: usize },
}

impl CompletionContext {
    /// Classify tokenized input.
    pub fn detect(tokens: &Tokens) -> Self {
        let words = &tokens.words;
        if words.is_empty() || (words.len() == 1 && !tokens.trailing_space) {
            return Self::CommandName;
        }
        // Words already finished after the command name; with no trailing
        // space the last word is still being typed.
        let completed = if tokens.trailing_space {
            words.len() - 1
        } else {
            words.len() - 2
        };
        Self::Argument {
            command: words[0].clone(),
            index: completed,
        }
    }
}

/// Produces completions from the registry, the parameter catalog and state.
pub struct CompletionEngine<'r> {
    registry: &'r CommandRegistry,
    matcher: FuzzyMatcher,
}

impl<'r> CompletionEngine<'r> {
    pub fn new(registry: &'r CommandRegistry, matcher: FuzzyMatcher) -> Self {
        Self { registry, matcher }
    }

    /// Completions for `text` with the cursor at byte offset `cursor`.
    ///
    /// Text after the cursor is ignored. All returned completions share the
    /// same start offset: the whole word under the cursor is replaced.
    pub fn complete(&self, state: &ShellState, text: &str, cursor: usize) -> Vec<Completion> {
        let tokens = lexer::tokenize(before_cursor(text, cursor));
        let context = CompletionContext::detect(&tokens);
        let raw = self.raw_candidates(state, &context);
        let partial = tokens.partial();
        let ranked = self.matcher.filter(partial, raw);
        log::debug!(
            "complete {context:?} partial={partial:?}: {} candidate(s)",
            ranked.len()
        );

        let start = -(tokens.tail_len as isize);
        ranked
            .into_iter()
            .map(|replacement| Completion { replacement, start })
            .collect()
    }

    /// Unfiltered candidates for a context. Empty for unknown commands and
    /// for arguments past the end of the signature.
    pub fn raw_candidates(&self, state: &ShellState, context: &CompletionContext) -> Vec<String> {
        match context {
            CompletionContext::CommandName => {
                self.registry.list().into_iter().map(str::to_string).collect()
            },
            CompletionContext::Argument { command, index } => self
                .registry
                .lookup(command)
                .and_then(|cmd| cmd.params().get(*index))
                .map(|param| param.kind.candidates(state))
                .unwrap_or_default(),
        }
    }

    /// Signature of the parameters still to be typed, shown as an inline hint
    /// after a space, e.g. `<witness:witness> <approve:bool> <broadcast:bool>`.
    pub fn hint(&self, text: &str, cursor: usize) -> Option<String> {
        let tokens = lexer::tokenize(before_cursor(text, cursor));
        if !tokens.trailing_space {
            return None;
        }
        let CompletionContext::Argument { command, index } = CompletionContext::detect(&tokens)
        else {
            return None;
        };
        let cmd: &dyn Command = self.registry.lookup(&command)?;
        let remaining = cmd.params().get(index..)?;
        if remaining.is_empty() {
            return None;
        }
        let parts: Vec<String> = remaining.iter().map(|p| format!("<{p}>")).collect();
        Some(parts.join(" "))
    }
}

fn before_cursor(text: &str, cursor: usize) -> &str {
    text.get(..cursor).unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standard_registry;

    fn replacements(out: &[Completion]) -> Vec<&str> {
        out.iter().map(|c| c.replacement.as_str()).collect()
    }

    fn complete(reg: &CommandRegistry, state: &ShellState, text: &str) -> Vec<Completion> {
        CompletionEngine::new(reg, FuzzyMatcher::default()).complete(state, text, text.len())
    }

    fn seeded() -> ShellState {
        let mut state = ShellState::new();
        state.add_account("alex");
        state.add_account("bob");
        state.add_witness("w1");
        state.add_public_key("STM7key");
        state
    }

    #[test]
    fn empty_input_lists_every_command() {
        let reg = standard_registry().unwrap();
        let out = complete(&reg, &ShellState::new(), "");
        assert_eq!(replacements(&out), reg.list());
        assert!(out.iter().all(|c| c.start == 0));
    }

    #[test]
    fn partial_command_name_narrows() {
        let reg = standard_registry().unwrap();
        let out = complete(&reg, &ShellState::new(), "create_acc");
        assert_eq!(
            out,
            vec![Completion {
                replacement: "create_account".to_string(),
                start: -10,
            }]
        );
    }

    #[test]
    fn hopeless_command_name_shows_everything() {
        let reg = standard_registry().unwrap();
        let out = complete(&reg, &ShellState::new(), "zzz");
        assert_eq!(replacements(&out), reg.list());
        assert!(out.iter().all(|c| c.start == -3));
    }

    #[test]
    fn first_argument_after_space_uses_param_type() {
        let reg = standard_registry().unwrap();
        let out = complete(&reg, &seeded(), "create_account ");
        assert_eq!(replacements(&out), vec!["alex", "bob"]);
        assert!(out.iter().all(|c| c.start == 0));
    }

    #[test]
    fn partial_argument_is_its_own_index() {
        let reg = standard_registry().unwrap();
        let out = complete(&reg, &seeded(), "update_witness alex w");
        assert_eq!(replacements(&out), vec!["w1"]);
        assert_eq!(out[0].start, -1);
    }

    #[test]
    fn public_key_and_boolean_slots() {
        let reg = standard_registry().unwrap();
        let state = seeded();
        let keys = complete(&reg, &state, "create_account alex bob {} ");
        assert_eq!(replacements(&keys), vec!["STM7key"]);
        let flags = complete(&reg, &state, "vote_for_witness alex w1 ");
        assert_eq!(replacements(&flags), vec!["true", "false"]);
        let narrowed = complete(&reg, &state, "vote_for_witness alex w1 tr");
        assert_eq!(replacements(&narrowed), vec!["true"]);
    }

    #[test]
    fn free_text_slot_offers_placeholders() {
        let reg = standard_registry().unwrap();
        let out = complete(&reg, &seeded(), "create_account alex bob ");
        assert_eq!(replacements(&out), vec!["\"\"", "{}"]);
    }

    #[test]
    fn unknown_command_has_no_argument_candidates() {
        let reg = standard_registry().unwrap();
        assert!(complete(&reg, &seeded(), "frobnicate ").is_empty());
    }

    #[test]
    fn past_last_parameter_has_no_candidates() {
        let reg = standard_registry().unwrap();
        assert!(complete(&reg, &seeded(), "exit ").is_empty());
        assert!(complete(&reg, &seeded(), "update_witness a b true true ").is_empty());
    }

    #[test]
    fn punctuation_partial_shows_all_for_slot() {
        let reg = standard_registry().unwrap();
        let out = complete(&reg, &seeded(), "create_account a/b");
        assert_eq!(replacements(&out), vec!["alex", "bob"]);
        assert_eq!(out[0].start, -3);
    }

    #[test]
    fn hash_word_completes_its_own_slot() {
        let reg = standard_registry().unwrap();
        let text = "create_account alex newguy #";
        assert_eq!(
            CompletionContext::detect(&lexer::tokenize(text)),
            CompletionContext::Argument {
                command: "create_account".to_string(),
                index: 2
            }
        );
        let out = complete(&reg, &seeded(), text);
        assert_eq!(replacements(&out), vec!["\"\"", "{}"]);
        assert!(out.iter().all(|c| c.start == -1));
    }

    #[test]
    fn quoted_partial_is_replaced_whole() {
        let reg = standard_registry().unwrap();
        let text = "create_account 'al ex'";
        let out = complete(&reg, &seeded(), text);
        assert_eq!(replacements(&out), vec!["alex", "bob"]);

        let start = text.len() - out[0].start.unsigned_abs();
        let applied = format!("{}{}", &text[..start], out[0].replacement);
        assert_eq!(applied, "create_account alex");
    }

    #[test]
    fn unterminated_quote_degrades_to_command_context() {
        let reg = standard_registry().unwrap();
        let text = "create_account \"al";
        let out = complete(&reg, &seeded(), text);
        assert_eq!(replacements(&out), reg.list());
        assert!(out.iter().all(|c| c.start == -(text.len() as isize)));
    }

    #[test]
    fn text_after_cursor_is_ignored() {
        let reg = standard_registry().unwrap();
        let engine = CompletionEngine::new(&reg, FuzzyMatcher::default());
        let out = engine.complete(&seeded(), "create_account trailing", 15);
        assert_eq!(replacements(&out), vec!["alex", "bob"]);
    }

    #[test]
    fn completion_reflects_state_changes() {
        let reg = standard_registry().unwrap();
        let mut state = ShellState::new();
        assert!(complete(&reg, &state, "update_witness ").is_empty());
        state.add_account("carol");
        assert_eq!(replacements(&complete(&reg, &state, "update_witness ")), vec!["carol"]);
    }

    #[test]
    fn detect_contexts() {
        let ctx = |text: &str| CompletionContext::detect(&lexer::tokenize(text));
        assert_eq!(ctx(""), CompletionContext::CommandName);
        assert_eq!(ctx("vote"), CompletionContext::CommandName);
        assert_eq!(
            ctx("vote_for_witness "),
            CompletionContext::Argument {
                command: "vote_for_witness".to_string(),
                index: 0
            }
        );
        assert_eq!(
            ctx("vote_for_witness alex w"),
            CompletionContext::Argument {
                command: "vote_for_witness".to_string(),
                index: 1
            }
        );
    }

    #[test]
    fn hint_shows_remaining_params() {
        let reg = standard_registry().unwrap();
        let engine = CompletionEngine::new(&reg, FuzzyMatcher::default());
        let text = "vote_for_witness alex ";
        assert_eq!(
            engine.hint(text, text.len()).as_deref(),
            Some("<witness:witness> <approve:bool> <broadcast:bool>")
        );
    }

    #[test]
    fn no_hint_mid_word_or_when_done() {
        let reg = standard_registry().unwrap();
        let engine = CompletionEngine::new(&reg, FuzzyMatcher::default());
        assert_eq!(engine.hint("vote_for_witness al", 19), None);
        assert_eq!(engine.hint("exit ", 5), None);
        assert_eq!(engine.hint("nosuch ", 7), None);
        assert_eq!(engine.hint("", 0), None);
    }
}
