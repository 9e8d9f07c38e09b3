mod checker;
mod dictionary;
mod text;

pub use checker::{DictionaryChecker, DictionaryCheckerFactory};
pub use dictionary::{DEFAULT_DICTIONARY_PATHS, Dictionary};
pub use text::{MAX_TEXT_FILE_SIZE, is_text_file, is_text_sample, read_latin1};

use std::fmt;

use crate::error::Result;

pub const SPELLING_RULE: &str = "SPELLING_RULE";
pub const WORD_REPEAT_RULE: &str = "ENGLISH_WORD_REPEAT_RULE";
pub const WHITESPACE_RULE: &str = "WHITESPACE_RULE";

/// Rules disabled on every engine before use; most are style or grammar
/// rules that misfire on code fragments.
pub const DEFAULT_DISABLED_RULES: &[&str] = &[
    "COMMA_PARENTHESIS_WHITESPACE",
    "EN_UNPAIRED_BRACKETS",
    "UPPERCASE_SENTENCE_START",
    "WHITESPACE_RULE",
    "DOUBLE_PUNCTUATION",
    "ENGLISH_WORD_REPEAT_RULE",
    "ENGLISH_WORD_REPEAT_BEGINNING_RULE",
    "EN_QUOTES",
    "DT_JJ_NO_NOUN",
    "THREE_NN",
    "HE_VERB_AGR",
    "PERIOD_OF_TIME",
    "BEEN_PART_AGREEMENT",
];

/// One issue flagged by a checking engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub rule_id: String,
    /// 1-based line inside the checked text.
    pub line: usize,
    /// 1-based column inside the checked text.
    pub column: usize,
    pub message: String,
    pub suggestions: Vec<String>,
}

/// Renders suggestions the way a list prints: `[a, b]`.
pub struct Suggestions<'a>(pub &'a [String]);

impl fmt::Display for Suggestions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Natural-language checking capability.
pub trait LanguageChecker {
    /// Check a span of text and return the issues found, in text order.
    ///
    /// # Errors
    /// Returns an error if the engine fails to analyse the text.
    fn check(&self, text: &str) -> Result<Vec<RuleMatch>>;

    /// Turn off a rule by id. Unknown ids are ignored.
    fn disable_rule(&mut self, rule_id: &str);
}

/// Builds a fresh checking engine for each file.
pub trait EngineFactory: Send + Sync {
    /// # Errors
    /// Returns an error if the engine cannot be constructed.
    fn build(&self) -> Result<Box<dyn LanguageChecker>>;
}
