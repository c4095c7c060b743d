//! Word separators, word connectors and sentence terminators per locale.

use crate::locale::LocaleSpec;

const DEFAULT_WORD_SEPARATORS: &str = "\t\n\r \u{00A0}()[]{}*&<>+=|.,;:!?/_\"";
const DEFAULT_WORD_CONNECTORS: &str = "'-";
const DEFAULT_SENTENCE_TERMINATORS: &str = ".?!";

/// Character classes that drive tokenization and sentence-boundary detection.
///
/// All lists are kept sorted so membership is a binary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Punctuation {
    word_separators: Vec<char>,
    word_connectors: Vec<char>,
    sentence_terminators: Vec<char>,
}

fn sorted(chars: impl IntoIterator<Item = char>) -> Vec<char> {
    let mut v: Vec<char> = chars.into_iter().collect();
    v.sort_unstable();
    v.dedup();
    v
}

impl Punctuation {
    pub fn new(word_separators: &str, word_connectors: &str, sentence_terminators: &str) -> Self {
        Self {
            word_separators: sorted(word_separators.chars()),
            word_connectors: sorted(word_connectors.chars()),
            sentence_terminators: sorted(sentence_terminators.chars()),
        }
    }

    /// Punctuation rules for a locale: the defaults plus script-specific marks.
    pub fn for_locale(locale: Option<&LocaleSpec>) -> Self {
        let mut separators = DEFAULT_WORD_SEPARATORS.to_string();
        let mut connectors = DEFAULT_WORD_CONNECTORS.to_string();
        let mut terminators = DEFAULT_SENTENCE_TERMINATORS.to_string();
        match locale.map(LocaleSpec::language) {
            // full stop, comma, emphasis/exclamation/question marks
            Some("hy") => {
                separators.push_str("\u{0589}\u{055D}\u{055C}\u{055E}");
                terminators.push_str("\u{0589}");
                connectors.push('\u{055A}');
            }
            Some("ar") | Some("fa") | Some("ur") => {
                separators.push_str("\u{060C}\u{061B}\u{061F}\u{06D4}");
                terminators.push_str("\u{061F}\u{06D4}");
            }
            Some("hi") | Some("mr") | Some("ne") | Some("sa") | Some("bn") => {
                separators.push_str("\u{0964}\u{0965}");
                terminators.push_str("\u{0964}\u{0965}");
            }
            Some("el") => {
                // Greek question mark is U+037E, which normalizes to ';'
                separators.push('\u{037E}');
                terminators.push_str(";\u{037E}");
            }
            Some("th") => {
                separators.push('\u{0E2F}');
            }
            _ => {}
        }
        Self::new(&separators, &connectors, &terminators)
    }

    pub fn is_word_separator(&self, c: char) -> bool {
        self.word_separators.binary_search(&c).is_ok()
    }

    pub fn is_word_connector(&self, c: char) -> bool {
        self.word_connectors.binary_search(&c).is_ok()
    }

    pub fn is_sentence_terminator(&self, c: char) -> bool {
        self.sentence_terminators.binary_search(&c).is_ok()
    }

    pub fn sorted_word_separators(&self) -> &[char] {
        &self.word_separators
    }
}

impl Default for Punctuation {
    fn default() -> Self {
        Self::new(
            DEFAULT_WORD_SEPARATORS,
            DEFAULT_WORD_CONNECTORS,
            DEFAULT_SENTENCE_TERMINATORS,
        )
    }
}
