//! Whitespace tokenizer shared by completion and dispatch.
//!
//! Words are separated by unquoted whitespace. Quotes and backslash escapes
//! are honoured on a best-effort basis and removed per word (via
//! `shell-words`); `#` is an ordinary character, never a comment. Completion
//! runs on half-typed input, so [`tokenize`] never fails: text that does not
//! split cleanly becomes one token.

use std::ops::Range;

use walletsh_types::error::{Result, ShellError};

/// A tokenized line, plus what completion needs to know about its tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    pub words: Vec<String>,
    /// Input ended in unquoted whitespace, so the cursor sits on a fresh, empty word.
    pub trailing_space: bool,
    /// Byte length of the raw text occupied by the word under the cursor,
    /// quotes and escapes included.
    pub tail_len: usize,
    /// Splitting failed and `words` holds the whole text as a single token.
    pub degraded: bool,
}

impl Tokens {
    /// The word being typed at the cursor (empty after trailing whitespace).
    pub fn partial(&self) -> &str {
        if self.trailing_space {
            ""
        } else {
            self.words.last().map(String::as_str).unwrap_or("")
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Byte spans of the raw words, and whether a quote or escape is still open
/// at the end of the text.
fn scan(text: &str) -> (Vec<Range<usize>>, bool) {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    let mut quote = Quote::None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match quote {
            Quote::Single => {
                if c == '\'' {
                    quote = Quote::None;
                }
            },
            Quote::Double => match c {
                '\\' => escaped = true,
                '"' => quote = Quote::None,
                _ => {},
            },
            Quote::None => {
                if c.is_whitespace() {
                    if let Some(s) = start.take() {
                        spans.push(s..i);
                    }
                    continue;
                }
                start.get_or_insert(i);
                match c {
                    '\\' => escaped = true,
                    '\'' => quote = Quote::Single,
                    '"' => quote = Quote::Double,
                    _ => {},
                }
            },
        }
    }
    if let Some(s) = start {
        spans.push(s..text.len());
    }
    (spans, escaped || quote != Quote::None)
}

/// Strip quoting from one raw word.
fn unquote(raw: &str) -> Result<String> {
    // shell-words reads a word-initial `#` as a comment.
    let escaped;
    let input = if raw.starts_with('#') {
        escaped = format!("\\{raw}");
        escaped.as_str()
    } else {
        raw
    };
    let mut words =
        shell_words::split(input).map_err(|e| ShellError::Tokenization(e.to_string()))?;
    match (words.pop(), words.is_empty()) {
        (Some(word), true) => Ok(word),
        _ => Err(ShellError::Tokenization(format!("{raw:?} is not a single word"))),
    }
}

fn words_of(text: &str, spans: &[Range<usize>], open: bool) -> Result<Vec<String>> {
    if open {
        return Err(ShellError::Tokenization(
            "unterminated quote or trailing escape".to_string(),
        ));
    }
    spans.iter().map(|r| unquote(&text[r.clone()])).collect()
}

/// Split strictly, reporting malformed quoting.
pub fn split(text: &str) -> Result<Vec<String>> {
    let (spans, open) = scan(text);
    words_of(text, &spans, open)
}

/// Split leniently. Never fails.
pub fn tokenize(text: &str) -> Tokens {
    let (spans, open) = scan(text);
    match words_of(text, &spans, open) {
        Ok(words) => {
            let last = spans.last();
            let trailing_space = last.map_or(!text.is_empty(), |r| r.end < text.len());
            let tail_len = match last {
                Some(r) if !trailing_space => r.len(),
                _ => 0,
            };
            Tokens {
                words,
                trailing_space,
                tail_len,
                degraded: false,
            }
        },
        Err(e) => {
            log::debug!("tokenizer fallback for {text:?}: {e}");
            let whole = text.trim_start();
            Tokens {
                words: vec![whole.trim_end().to_string()],
                trailing_space: false,
                tail_len: whole.len(),
                degraded: true,
            }
        },
    }
}
