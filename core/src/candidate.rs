//! Suggestion candidates produced by the decoder.
//!
//! `SuggestedCandidate` carries a strict total order (score, then length, then
//! word) so a sorted collection can evict its worst entry unambiguously.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::locale::LocaleSpec;

/// Which dictionary produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DictionaryKind {
    Main,
    User,
    Contacts,
    UserHistory,
    Emoji,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Provenance {
    pub dictionary: DictionaryKind,
    pub locale: Option<LocaleSpec>,
}

/// A single scored suggestion. Higher scores are better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedCandidate {
    pub word: String,
    pub score: i32,
    pub code_point_count: usize,
    pub is_emoji: bool,
    pub source: Provenance,
}

impl SuggestedCandidate {
    pub fn new<T: Into<String>>(
        word: T,
        score: i32,
        dictionary: DictionaryKind,
        locale: Option<LocaleSpec>,
    ) -> Self {
        let word = word.into();
        let is_emoji = dictionary == DictionaryKind::Emoji || is_emoji_text(&word);
        SuggestedCandidate {
            code_point_count: word.chars().count(),
            word,
            score,
            is_emoji,
            source: Provenance { dictionary, locale },
        }
    }

    /// Shorthand for a main-dictionary candidate without locale.
    pub fn main<T: Into<String>>(word: T, score: i32) -> Self {
        Self::new(word, score, DictionaryKind::Main, None)
    }

    /// Whether this candidate ranks strictly ahead of `other`.
    pub fn outranks(&self, other: &SuggestedCandidate) -> bool {
        self < other
    }
}

/// Rank order: `Less` means "better". Descending score, then fewer code points,
/// then lexicographic word.
impl Ord for SuggestedCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.code_point_count.cmp(&other.code_point_count))
            .then_with(|| self.word.cmp(&other.word))
    }
}

impl PartialOrd for SuggestedCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality follows the rank order, so provenance does not distinguish
// otherwise identical candidates.
impl PartialEq for SuggestedCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SuggestedCandidate {}

fn is_emoji_code_point(c: char) -> bool {
    matches!(c as u32,
        0x1F000..=0x1FAFF | 0x2600..=0x27BF | 0x2B00..=0x2BFF | 0x2190..=0x21FF | 0x3030 | 0x303D)
}

/// Whether `text` is made only of emoji (plus joiners and presentation selectors).
pub fn is_emoji_text(text: &str) -> bool {
    let mut saw_emoji = false;
    for c in text.chars() {
        match c {
            '\u{200D}' | '\u{FE0F}' | '\u{20E3}' => {}
            c if is_emoji_code_point(c) => saw_emoji = true,
            _ => return false,
        }
    }
    saw_emoji
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_counts_code_points() {
        let c = SuggestedCandidate::main("naïve", 10);
        assert_eq!(c.code_point_count, 5);
        assert!(!c.is_emoji);
        assert_eq!(c.source.dictionary, DictionaryKind::Main);
    }

    #[test]
    fn test_order_by_score_then_length_then_word() {
        let high = SuggestedCandidate::main("zzz", 10);
        let low = SuggestedCandidate::main("a", 5);
        assert!(high < low);

        let short = SuggestedCandidate::main("ab", 5);
        let long = SuggestedCandidate::main("aa", 5);
        // same score and length: lexicographic
        assert!(long < short);
        let longer = SuggestedCandidate::main("aaa", 5);
        assert!(short < longer);
    }

    #[test]
    fn test_equality_ignores_provenance() {
        let a = SuggestedCandidate::new("word", 3, DictionaryKind::Main, None);
        let b = SuggestedCandidate::new("word", 3, DictionaryKind::User, Some(LocaleSpec::new("en")));
        assert_eq!(a, b);
        assert!(!a.outranks(&b));
    }

    #[test]
    fn test_emoji_detection() {
        assert!(is_emoji_text("😀"));
        assert!(is_emoji_text("👍🏽"));
        assert!(is_emoji_text("❤\u{FE0F}"));
        assert!(!is_emoji_text("ok😀"));
        assert!(!is_emoji_text(""));
        assert!(SuggestedCandidate::main("🎉", 1).is_emoji);
        assert!(SuggestedCandidate::new(":)", 1, DictionaryKind::Emoji, None).is_emoji);
    }
}
