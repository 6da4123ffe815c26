//! Splitting raw text into tokens.
//!
//! Three token definitions are supported, from crudest to most useful:
//!
//! - [`TokenMode::Whitespace`] keeps whatever sits between whitespace, so
//!   `"sea."` stays `"sea."`. Cheap, but punctuation pollutes the counts.
//! - [`TokenMode::Letters`] keeps maximal runs of alphabetic characters.
//!   Clean counts, but `"don't"` falls apart into `"don"` and `"t"`.
//! - [`TokenMode::Words`] keeps runs of word characters (alphanumeric or
//!   `_`) and allows a single apostrophe-joined continuation, so `"don't"`
//!   survives as one token while a trailing quote still separates.
//!
//! Tokenization is a pure function of the input string; lowercase folding
//! (on by default) happens per character as tokens are built.

/// Token boundary rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TokenMode {
    /// Split on whitespace only; punctuation stays attached.
    Whitespace,
    /// Maximal runs of alphabetic characters.
    Letters,
    /// Word-character runs with one optional `'`-joined continuation.
    #[default]
    Words,
}

/// Configurable text tokenizer.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    mode: TokenMode,
    lowercase: bool,
}

impl Tokenizer {
    /// Create a tokenizer with the default settings (`Words`, lowercased).
    pub fn new() -> Self {
        Self {
            mode: TokenMode::Words,
            lowercase: true,
        }
    }

    /// Set the token boundary rule.
    pub fn with_mode(mut self, mode: TokenMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable lowercase folding (default: enabled).
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Split `text` into tokens according to the configured mode.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        match self.mode {
            TokenMode::Whitespace => text
                .split_whitespace()
                .map(|raw| {
                    if self.lowercase {
                        raw.to_lowercase()
                    } else {
                        raw.to_string()
                    }
                })
                .collect(),
            TokenMode::Letters => self.split_runs(text),
            TokenMode::Words => self.split_words(text),
        }
    }

    fn push_char(&self, token: &mut String, c: char) {
        if self.lowercase {
            token.extend(c.to_lowercase());
        } else {
            token.push(c);
        }
    }

    fn split_runs(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        for c in text.chars() {
            if c.is_alphabetic() {
                self.push_char(&mut current, c);
            } else if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            tokens.push(current);
        }
        tokens
    }

    fn split_words(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut chars = text.chars().peekable();

        while let Some(&c) = chars.peek() {
            if !is_word_char(c) {
                chars.next();
                continue;
            }

            let mut token = String::new();
            while let Some(&c) = chars.peek() {
                if !is_word_char(c) {
                    break;
                }
                self.push_char(&mut token, c);
                chars.next();
            }

            // At most one apostrophe-joined continuation, so contractions
            // like "don't" stay whole but a closing quote still separates.
            if chars.peek() == Some(&'\'') {
                let mut lookahead = chars.clone();
                lookahead.next();
                if lookahead.peek().copied().is_some_and(is_word_char) {
                    token.push('\'');
                    chars.next();
                    while let Some(&c) = chars.peek() {
                        if !is_word_char(c) {
                            break;
                        }
                        self.push_char(&mut token, c);
                        chars.next();
                    }
                }
            }

            tokens.push(token);
        }

        tokens
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
