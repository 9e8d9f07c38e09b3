/// Words must be strictly longer than this to be worth checking.
pub const MIN_WORD_LENGTH: usize = 4;

/// Lazy camel-case split of an identifier; see [`decompose`].
#[derive(Debug, Clone)]
pub struct Words<'a> {
    identifier: &'a str,
    position: usize,
}

/// Split an identifier at camel-case boundaries.
///
/// A boundary sits before an uppercase letter that follows a non-uppercase
/// character, and before an uppercase letter that starts a capitalized word
/// after an uppercase run, so `XMLParserFoo` yields `XML`, `Parser`, `Foo`.
#[must_use]
pub const fn decompose(identifier: &str) -> Words<'_> {
    Words {
        identifier,
        position: 0,
    }
}

/// Words of `identifier` long enough to be sent to the checking engine.
pub fn checkable_words(identifier: &str) -> impl Iterator<Item = &str> {
    decompose(identifier).filter(|word| word.chars().count() > MIN_WORD_LENGTH)
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.identifier[self.position..];
        if rest.is_empty() {
            return None;
        }

        let chars: Vec<(usize, char)> = rest.char_indices().collect();
        let end = (1..chars.len())
            .find(|&i| is_boundary(&chars, i))
            .map_or(rest.len(), |i| chars[i].0);

        self.position += end;
        Some(&rest[..end])
    }
}

fn is_boundary(chars: &[(usize, char)], i: usize) -> bool {
    let current = chars[i].1;
    if !current.is_uppercase() {
        return false;
    }

    let previous = chars[i - 1].1;
    if !previous.is_uppercase() {
        return true;
    }

    chars.get(i + 1).is_some_and(|&(_, next)| next.is_lowercase())
}

#[cfg(test)]
#[path = "identifier_tests.rs"]
mod tests;
