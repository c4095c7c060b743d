//! Previous-word context for the decoder.
//!
//! `extract` reads the text before the cursor and produces up to
//! [`MAX_PREV_WORD_COUNT`] previous words, or a beginning-of-sentence marker
//! where the context resets.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::punctuation::Punctuation;

/// Number of previous words the decoder's n-gram lookups consume.
pub const MAX_PREV_WORD_COUNT: usize = 3;

static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n]+").unwrap());
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\n\x0B\x0C\r]+").unwrap());

/// One slot of an n-gram context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum WordInfo {
    /// No usable context for this slot.
    #[default]
    Empty,
    BeginningOfSentence,
    Word(String),
}

impl WordInfo {
    pub fn word<T: Into<String>>(word: T) -> Self {
        WordInfo::Word(word.into())
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, WordInfo::Empty)
    }

    pub fn as_word(&self) -> Option<&str> {
        match self {
            WordInfo::Word(w) => Some(w),
            _ => None,
        }
    }
}

/// Immutable sequence of previous words; slot 0 is nearest the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NgramContext {
    prev_words: Vec<WordInfo>,
}

impl NgramContext {
    /// Build a context from slots, nearest word first. Extra slots are dropped.
    pub fn new(mut prev_words: Vec<WordInfo>) -> Self {
        prev_words.truncate(MAX_PREV_WORD_COUNT);
        Self { prev_words }
    }

    pub fn empty() -> Self {
        Self::new(vec![WordInfo::Empty])
    }

    pub fn beginning_of_sentence() -> Self {
        Self::new(vec![WordInfo::BeginningOfSentence])
    }

    pub fn prev_word_count(&self) -> usize {
        self.prev_words.len()
    }

    pub fn slots(&self) -> &[WordInfo] {
        &self.prev_words
    }

    /// The `n`th previous word, 1-based.
    pub fn nth_prev_word(&self, n: usize) -> Option<&str> {
        if n == 0 {
            return None;
        }
        self.prev_words.get(n - 1).and_then(WordInfo::as_word)
    }

    pub fn is_nth_prev_word_beginning_of_sentence(&self, n: usize) -> bool {
        n > 0 && matches!(self.prev_words.get(n - 1), Some(WordInfo::BeginningOfSentence))
    }

    pub fn is_beginning_of_sentence_context(&self) -> bool {
        self.is_nth_prev_word_beginning_of_sentence(1)
    }

    pub fn is_valid(&self) -> bool {
        self.prev_words.first().is_some_and(WordInfo::is_valid)
    }

    /// Context for the word after this one: `word` becomes slot 0.
    pub fn next_ngram_context(&self, word: WordInfo) -> Self {
        let mut prev_words = Vec::with_capacity(MAX_PREV_WORD_COUNT);
        prev_words.push(word);
        prev_words.extend(self.prev_words.iter().cloned());
        Self::new(prev_words)
    }
}

impl Default for NgramContext {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for NgramContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.prev_words.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match slot {
                WordInfo::Empty => write!(f, "PrevWord[{}]: <empty>", i)?,
                WordInfo::BeginningOfSentence => write!(f, "PrevWord[{}]: <bos>", i)?,
                WordInfo::Word(w) => write!(f, "PrevWord[{}]: {}", i, w)?,
            }
        }
        Ok(())
    }
}

/// Split like the platform tokenizer: no match keeps the input whole, trailing
/// empty fields are dropped, a leading empty field survives.
fn split_dropping_trailing<'a>(re: &Regex, text: &'a str) -> Vec<&'a str> {
    if !re.is_match(text) {
        return vec![text];
    }
    let mut fields: Vec<&str> = re.split(text).collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Build the context for the word `n` positions before the cursor (`n = 1` is
/// the word being typed right now, so its predecessors fill the slots).
/// `n = 0` names no word and yields the empty context.
///
/// A focused token followed by one starting with a word connector (`abc 'def`)
/// stops the fill: that continuation is ambiguous and is deliberately left as
/// empty context.
pub fn extract(text_before_cursor: Option<&str>, punctuation: &Punctuation, n: usize) -> NgramContext {
    let Some(text) = text_before_cursor else {
        return NgramContext::empty();
    };
    if n == 0 {
        return NgramContext::empty();
    }
    let lines = split_dropping_trailing(&LINE_BREAKS, text);
    let Some(last_line) = lines.last() else {
        return NgramContext::beginning_of_sentence();
    };
    let w = split_dropping_trailing(&SPACES, last_line);
    let len = w.len() as isize;
    // anything past len + 2 lands before the first token just the same
    let n = isize::try_from(n).map_or(len + 2, |n| n.min(len + 2));

    let mut prev_words = vec![WordInfo::Empty; MAX_PREV_WORD_COUNT];
    for (i, slot) in prev_words.iter_mut().enumerate() {
        let focused = len - n - i as isize;

        let following = focused + 1;
        if following >= 0 && following < len {
            let next_first = w[following as usize].chars().next();
            if next_first.is_some_and(|c| punctuation.is_word_connector(c)) {
                break;
            }
        }

        if focused < 0 {
            *slot = WordInfo::BeginningOfSentence;
            break;
        }
        let word = w[focused as usize];
        let Some(last) = word.chars().next_back() else {
            *slot = WordInfo::BeginningOfSentence;
            break;
        };
        if punctuation.is_sentence_terminator(last) {
            *slot = WordInfo::BeginningOfSentence;
            break;
        }
        if punctuation.is_word_separator(last) || punctuation.is_word_connector(last) {
            break;
        }
        *slot = WordInfo::word(word);
    }
    NgramContext::new(prev_words)
}
