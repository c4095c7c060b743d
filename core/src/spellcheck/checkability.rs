//! Pre-lookup text cleanup and the "is this worth checking" classification.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::script::Script;

static URL_OR_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        ^(?:
            [a-z][a-z0-9+.\-]*://\S+            # scheme://anything
          | www\.\S+                            # bare www host
          | [^\s@]+@[^\s@]+\.[^\s@]+            # user@host.tld
          | (?:[a-z0-9\-]+\.)+(?:com|org|net|edu|gov|io|co|de|fr|uk|ru)(?:/\S*)?
        )$",
    )
    .unwrap()
});

/// Apostrophe look-alikes folded into `'` before lookup.
const APOSTROPHES: [char; 6] = ['\u{2019}', '\u{2018}', '\u{02BC}', '\u{201B}', '\u{2032}', '\u{FF07}'];

/// Characters stripped once from each end of a query.
const QUOTES: [char; 7] = ['"', '\'', '`', '\u{00B4}', '\u{2018}', '\u{201C}', '\u{201D}'];

/// Why a piece of text is or is not handed to the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Checkability {
    Checkable,
    TooShort,
    FirstCharUncheckable,
    EmailOrUrl,
    ContainsPeriod,
    TooManyNonLetters,
}

impl Checkability {
    /// Classes that end the pipeline with an unremarkable result.
    pub fn is_unremarkable(self) -> bool {
        !matches!(self, Checkability::Checkable | Checkability::ContainsPeriod)
    }
}

/// Fold apostrophe variants to `'`, then strip one leading and one trailing
/// quote character.
pub fn normalize_quotes(text: &str) -> String {
    let folded: String = text
        .chars()
        .map(|c| if APOSTROPHES.contains(&c) { '\'' } else { c })
        .collect();
    let mut trimmed = folded.as_str();
    if let Some(rest) = trimmed.strip_prefix(|c: char| QUOTES.contains(&c)) {
        trimmed = rest;
    }
    if let Some(rest) = trimmed.strip_suffix(|c: char| QUOTES.contains(&c)) {
        trimmed = rest;
    }
    trimmed.to_string()
}

pub fn looks_like_url_or_email(text: &str) -> bool {
    text.contains('@') || text.contains('/') || URL_OR_EMAIL.is_match(text)
}

fn counts_as_letter(c: char, script: Script) -> bool {
    script.contains_letter(c) || c == '\'' || c == '-'
}

/// Classify `text` for a session writing in `script`.
pub fn checkability(text: &str, script: Script, url_detection: bool) -> Checkability {
    let length = text.chars().count();
    if length <= 1 {
        return Checkability::TooShort;
    }
    let first = text.chars().next().unwrap_or_default();
    if !script.contains_letter(first) && first != '\'' {
        return Checkability::FirstCharUncheckable;
    }
    if url_detection && looks_like_url_or_email(text) {
        return Checkability::EmailOrUrl;
    }
    if text.contains('.') {
        return Checkability::ContainsPeriod;
    }
    let non_letters = text.chars().filter(|&c| !counts_as_letter(c, script)).count();
    if non_letters * 4 > length {
        return Checkability::TooManyNonLetters;
    }
    Checkability::Checkable
}
