use std::collections::HashMap;

/// Keeps ASCII word characters (`[A-Za-z0-9_]`) and token separators
/// ([`is_token_whitespace`]), drops everything else, then lowercases what
/// remains.
pub fn clean_text(input: &str) -> String {
    input
        .chars()
        .filter(|ch| is_word_char(*ch) || is_token_whitespace(*ch))
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Token separators: the ECMAScript `\s` set. Unlike `char::is_whitespace` it includes
/// U+FEFF and excludes U+0085.
pub fn is_token_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Cleaned, whitespace-delimited tokens in input order.
pub fn tokenize(input: &str) -> Vec<String> {
    clean_text(input)
        .split(is_token_whitespace)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn is_blank(input: &str) -> bool {
    input.chars().all(is_token_whitespace)
}

/// Word counts in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequencyTable {
    entries: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl WordFrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(input: &str) -> Self {
        let mut table = Self::new();
        for token in tokenize(input) {
            table.record(token);
        }
        table
    }

    pub fn record(&mut self, word: String) {
        if let Some(&slot) = self.index.get(&word) {
            self.entries[slot].1 = self.entries[slot].1.saturating_add(1);
            return;
        }
        self.index.insert(word.clone(), self.entries.len());
        self.entries.push((word, 1));
    }

    pub fn count(&self, word: &str) -> Option<u32> {
        self.index.get(word).map(|&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .map(|(_, count)| u64::from(*count))
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.entries
            .iter()
            .map(|(word, count)| (word.as_str(), *count))
    }
}
