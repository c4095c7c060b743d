//! Locale-aware case transforms and capitalization classes.
//!
//! Case mapping uses the full Unicode mappings (`ß` uppercases to `SS`), with
//! the Turkic dotted/dotless `i` rules applied for `tr` and `az`.

use crate::locale::LocaleSpec;

/// How a typed word is capitalized, as far as suggestions are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capitalization {
    /// All lowercase, camel case, or no letters at all.
    None,
    /// First letter uppercase, every other letter lowercase.
    First,
    /// Every letter uppercase (a single uppercase letter counts as `First`).
    All,
}

/// Classify the capitalization of `text`.
///
/// Non-letters (apostrophes, digits) are ignored. Text whose first letter is
/// lowercase is always `None`, even if later letters are uppercase.
pub fn capitalization_of(text: &str) -> Capitalization {
    let mut letters = text.chars().filter(|c| c.is_alphabetic());
    let Some(first) = letters.next() else {
        return Capitalization::None;
    };
    if !first.is_uppercase() {
        return Capitalization::None;
    }
    let mut caps_count = 1usize;
    let mut letter_count = 1usize;
    for c in letters {
        if caps_count != 1 && caps_count != letter_count {
            break;
        }
        if c.is_uppercase() {
            caps_count += 1;
        }
        letter_count += 1;
    }
    if caps_count == 1 {
        Capitalization::First
    } else if caps_count == letter_count {
        Capitalization::All
    } else {
        Capitalization::None
    }
}

fn is_turkic(locale: Option<&LocaleSpec>) -> bool {
    matches!(locale.map(LocaleSpec::language), Some("tr") | Some("az"))
}

fn push_upper(out: &mut String, c: char, turkic: bool) {
    if turkic && c == 'i' {
        out.push('\u{0130}');
    } else {
        out.extend(c.to_uppercase());
    }
}

fn push_lower(out: &mut String, c: char, turkic: bool) {
    match c {
        'I' if turkic => out.push('\u{0131}'),
        '\u{0130}' if turkic => out.push('i'),
        _ => out.extend(c.to_lowercase()),
    }
}

pub fn to_upper(text: &str, locale: Option<&LocaleSpec>) -> String {
    let turkic = is_turkic(locale);
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        push_upper(&mut out, c, turkic);
    }
    out
}

pub fn to_lower(text: &str, locale: Option<&LocaleSpec>) -> String {
    let turkic = is_turkic(locale);
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        push_lower(&mut out, c, turkic);
    }
    out
}

/// Uppercase the first code point and leave the rest untouched.
pub fn capitalize_first_code_point(text: &str, locale: Option<&LocaleSpec>) -> String {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::with_capacity(text.len());
    push_upper(&mut out, first, is_turkic(locale));
    out.push_str(chars.as_str());
    out
}

/// Uppercase the first code point and lowercase the rest.
pub fn capitalize_first_and_downcase_rest(text: &str, locale: Option<&LocaleSpec>) -> String {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let turkic = is_turkic(locale);
    let mut out = String::with_capacity(text.len());
    push_upper(&mut out, first, turkic);
    for c in chars {
        push_lower(&mut out, c, turkic);
    }
    out
}

/// Whether `c` is in the sorted separator list.
pub fn is_separator(c: char, sorted_separators: &[char]) -> bool {
    sorted_separators.binary_search(&c).is_ok()
}

/// Uppercase the first code point of every word and lowercase the rest.
///
/// A code point directly after a separator starts a new word.
pub fn capitalize_each_word(
    text: &str,
    sorted_separators: &[char],
    locale: Option<&LocaleSpec>,
) -> String {
    let turkic = is_turkic(locale);
    let mut out = String::with_capacity(text.len());
    let mut needs_caps_next = true;
    for c in text.chars() {
        if needs_caps_next {
            push_upper(&mut out, c, turkic);
        } else {
            push_lower(&mut out, c, turkic);
        }
        needs_caps_next = is_separator(c, sorted_separators);
    }
    out
}

pub fn is_identical_after_upcase(text: &str) -> bool {
    text == to_upper(text, None)
}

pub fn is_identical_after_downcase(text: &str) -> bool {
    text == to_lower(text, None)
}

pub fn is_identical_after_capitalize_each_word(text: &str, sorted_separators: &[char]) -> bool {
    text == capitalize_each_word(text, sorted_separators, None)
}

/// Re-case a suggestion to follow the capitalization of the typed word.
pub fn apply_capitalization(
    word: &str,
    capitalization: Capitalization,
    locale: Option<&LocaleSpec>,
) -> String {
    match capitalization {
        Capitalization::All => to_upper(word, locale),
        Capitalization::First => capitalize_first_code_point(word, locale),
        Capitalization::None => word.to_string(),
    }
}
