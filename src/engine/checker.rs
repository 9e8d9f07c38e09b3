use std::collections::HashSet;
use std::sync::Arc;

use super::{
    DEFAULT_DISABLED_RULES, Dictionary, EngineFactory, LanguageChecker, RuleMatch, SPELLING_RULE,
    WHITESPACE_RULE, WORD_REPEAT_RULE,
};
use crate::error::Result;

const MAX_SUGGESTIONS: usize = 5;

/// A word token and its byte span in the checked text.
#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

/// Dictionary-backed checking engine.
///
/// The dictionary is shared; each instance owns only its rule switches.
pub struct DictionaryChecker {
    dictionary: Arc<Dictionary>,
    disabled: HashSet<String>,
}

impl DictionaryChecker {
    #[must_use]
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self {
            dictionary,
            disabled: HashSet::new(),
        }
    }

    fn is_enabled(&self, rule_id: &str) -> bool {
        !self.disabled.contains(rule_id)
    }

    fn check_spelling(
        &self,
        text: &str,
        tokens: &[Token<'_>],
        out: &mut Vec<(usize, RuleMatch)>,
    ) {
        for token in tokens {
            let word = token.text;
            if word.chars().count() < 2 || word.chars().all(|c| !c.is_lowercase()) {
                continue;
            }
            let stem = strip_possessive(word);
            if self.dictionary.contains(stem) {
                continue;
            }

            out.push((
                token.start,
                new_match(
                    text,
                    token.start,
                    SPELLING_RULE,
                    "Possible spelling mistake found.",
                    self.dictionary.suggest(word, MAX_SUGGESTIONS),
                ),
            ));
        }
    }
}

impl LanguageChecker for DictionaryChecker {
    fn check(&self, text: &str) -> Result<Vec<RuleMatch>> {
        let tokens = tokenize(text);
        let mut found = Vec::new();

        if self.is_enabled(SPELLING_RULE) {
            self.check_spelling(text, &tokens, &mut found);
        }
        if self.is_enabled(WORD_REPEAT_RULE) {
            check_word_repeat(text, &tokens, &mut found);
        }
        if self.is_enabled(WHITESPACE_RULE) {
            check_whitespace(text, &mut found);
        }

        found.sort_by_key(|(offset, _)| *offset);
        Ok(found.into_iter().map(|(_, m)| m).collect())
    }

    fn disable_rule(&mut self, rule_id: &str) {
        self.disabled.insert(rule_id.to_string());
    }
}

/// Builds a [`DictionaryChecker`] per file with the configured rules disabled.
pub struct DictionaryCheckerFactory {
    dictionary: Arc<Dictionary>,
    disabled_rules: Vec<String>,
}

impl DictionaryCheckerFactory {
    /// Factory disabling [`DEFAULT_DISABLED_RULES`] plus `extra_disabled`.
    #[must_use]
    pub fn new(dictionary: Arc<Dictionary>, extra_disabled: &[String]) -> Self {
        let disabled_rules = DEFAULT_DISABLED_RULES
            .iter()
            .map(|id| (*id).to_string())
            .chain(extra_disabled.iter().cloned())
            .collect();
        Self {
            dictionary,
            disabled_rules,
        }
    }

    /// Factory with exactly the given rules disabled.
    #[must_use]
    pub const fn with_disabled_rules(
        dictionary: Arc<Dictionary>,
        disabled_rules: Vec<String>,
    ) -> Self {
        Self {
            dictionary,
            disabled_rules,
        }
    }
}

impl EngineFactory for DictionaryCheckerFactory {
    fn build(&self) -> Result<Box<dyn LanguageChecker>> {
        let mut checker = DictionaryChecker::new(Arc::clone(&self.dictionary));
        for rule_id in &self.disabled_rules {
            checker.disable_rule(rule_id);
        }
        Ok(Box::new(checker))
    }
}

fn check_word_repeat(text: &str, tokens: &[Token<'_>], out: &mut Vec<(usize, RuleMatch)>) {
    for pair in tokens.windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        let gap = &text[previous.end..current.start];
        if !gap.chars().all(char::is_whitespace) {
            continue;
        }
        if previous.text.eq_ignore_ascii_case(current.text) {
            out.push((
                current.start,
                new_match(
                    text,
                    current.start,
                    WORD_REPEAT_RULE,
                    "Possible typo: you repeated a word",
                    vec![current.text.to_string()],
                ),
            ));
        }
    }
}

fn check_whitespace(text: &str, out: &mut Vec<(usize, RuleMatch)>) {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b' ' && bytes[i + 1] == b' ' {
            out.push((
                i,
                new_match(
                    text,
                    i,
                    WHITESPACE_RULE,
                    "Possible typo: you repeated a whitespace",
                    vec![" ".to_string()],
                ),
            ));
            while i < bytes.len() && bytes[i] == b' ' {
                i += 1;
            }
        } else {
            i += 1;
        }
    }
}

/// Split text into alphabetic words; apostrophes are kept only between letters.
fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (index, c) in text.char_indices() {
        let is_word_char = c.is_alphabetic() || c == '\'';
        match (start, is_word_char) {
            (None, true) => start = Some(index),
            (Some(s), false) => {
                push_token(text, s, index, &mut tokens);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        push_token(text, s, text.len(), &mut tokens);
    }

    tokens
}

fn push_token<'a>(text: &'a str, start: usize, end: usize, tokens: &mut Vec<Token<'a>>) {
    let raw = &text[start..end];
    let word = raw.trim_matches('\'');
    if word.is_empty() {
        return;
    }
    let start = start + (raw.len() - raw.trim_start_matches('\'').len());
    tokens.push(Token {
        text: word,
        start,
        end: start + word.len(),
    });
}

fn strip_possessive(word: &str) -> &str {
    word.strip_suffix("'s")
        .or_else(|| word.strip_suffix("'S"))
        .unwrap_or(word)
}

fn new_match(
    text: &str,
    offset: usize,
    rule_id: &str,
    message: &str,
    suggestions: Vec<String>,
) -> RuleMatch {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = text[line_start..offset].chars().count() + 1;

    RuleMatch {
        rule_id: rule_id.to_string(),
        line,
        column,
        message: message.to_string(),
        suggestions,
    }
}

#[cfg(test)]
#[path = "checker_tests.rs"]
mod tests;
