use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{Result, SpellcheckError};

/// Word lists probed when no dictionary is given on the command line.
pub const DEFAULT_DICTIONARY_PATHS: &[&str] = &["/usr/share/dict/words", "/usr/dict/words"];

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Case-insensitive set of known words.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Load a word list, one word per line. Blank lines and `#` comments are skipped.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or read.
    pub fn load(path: &Path) -> Result<Self> {
        let to_error = |source| SpellcheckError::DictionaryLoad {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(to_error)?;
        let dictionary = Self::from_reader(BufReader::new(file)).map_err(to_error)?;

        debug!(path = %path.display(), words = dictionary.len(), "Loaded dictionary");
        Ok(dictionary)
    }

    /// Read a word list from any buffered reader.
    ///
    /// # Errors
    /// Returns an I/O error if reading fails.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut words = HashSet::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            words.insert(word.to_lowercase());
        }
        Ok(Self { words })
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Find the first dictionary file that exists among `candidates`.
    #[must_use]
    pub fn locate_default<'a>(candidates: &[&'a str]) -> Option<&'a Path> {
        candidates
            .iter()
            .map(|candidate| Path::new(*candidate))
            .find(|path| path.is_file())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Known words one edit away from `word`.
    ///
    /// Candidates are produced by deletion, transposition, substitution and
    /// insertion, in that order, and keep the capitalization of `word`.
    #[must_use]
    pub fn suggest(&self, word: &str, limit: usize) -> Vec<String> {
        let lower = word.to_lowercase();
        let chars: Vec<char> = lower.chars().collect();
        let capitalized = word.chars().next().is_some_and(char::is_uppercase);

        let mut seen = HashSet::new();
        let mut suggestions = Vec::new();
        for candidate in edits(&chars) {
            if suggestions.len() >= limit {
                break;
            }
            if candidate == lower || !self.words.contains(&candidate) {
                continue;
            }
            if seen.insert(candidate.clone()) {
                suggestions.push(if capitalized {
                    capitalize(&candidate)
                } else {
                    candidate
                });
            }
        }
        suggestions
    }
}

fn edits(chars: &[char]) -> impl Iterator<Item = String> + '_ {
    let len = chars.len();

    let deletes = (0..len).map(move |i| splice(chars, i, 1, None));
    let transposes = (0..len.saturating_sub(1)).map(move |i| {
        let mut swapped = chars.to_vec();
        swapped.swap(i, i + 1);
        swapped.into_iter().collect::<String>()
    });
    let replaces = (0..len)
        .flat_map(move |i| ALPHABET.chars().map(move |c| splice(chars, i, 1, Some(c))));
    let inserts = (0..=len)
        .flat_map(move |i| ALPHABET.chars().map(move |c| splice(chars, i, 0, Some(c))));

    deletes.chain(transposes).chain(replaces).chain(inserts)
}

/// Replace `remove` chars at `at` with `insert`.
fn splice(chars: &[char], at: usize, remove: usize, insert: Option<char>) -> String {
    chars[..at]
        .iter()
        .copied()
        .chain(insert)
        .chain(chars[at + remove..].iter().copied())
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[path = "dictionary_tests.rs"]
mod tests;
