//! The decoder boundary.
//!
//! The spell-check pipeline never reads a dictionary format itself; it talks to a
//! [`DictionaryFacilitator`]. [`WordListDictionary`] is a small in-memory
//! implementation backed by plain word lists, used by the CLI and tests.

use ahash::AHashMap;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::candidate::{DictionaryKind, SuggestedCandidate};
use crate::error::{Error, Result};
use crate::locale::LocaleSpec;
use crate::ngram_context::NgramContext;
use crate::spellcheck::score::edit_distance;

/// Everything the decoder needs for one suggestion lookup.
#[derive(Debug, Clone)]
pub struct LookupRequest {
    /// The typed text, before any case transformation.
    pub composition: String,
    /// Key centres for each code point of `composition`.
    pub coordinates: Vec<(i32, i32)>,
    pub ngram_context: NgramContext,
    pub locale: LocaleSpec,
    /// Session slot the lookup runs in; decoders keep per-slot scratch state.
    pub slot: usize,
    pub block_offensive_words: bool,
}

/// Dictionary and decoder services consumed by the spell checker.
pub trait DictionaryFacilitator: Send + Sync {
    /// Raw scored candidates for a composition, best first.
    fn lookup(&self, request: &LookupRequest) -> anyhow::Result<Vec<SuggestedCandidate>>;

    fn is_valid_word(&self, locale: &LocaleSpec, word: &str) -> bool;

    fn has_loaded_dictionary(&self, locale: &LocaleSpec) -> bool;

    /// Locales a dictionary is loaded for.
    fn available_locales(&self) -> Vec<LocaleSpec>;
}

type Listener = Box<dyn Fn() + Send + Sync>;

/// Handle returned by [`ChangeNotifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

/// Fan-out of "the user or contacts word store changed" events.
///
/// Clones share the same subscriber list.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    listeners: Arc<Mutex<Listeners>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.lock();
        let id = SubscriptionId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, Box::new(listener)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry, _)| *entry != id);
        listeners.entries.len() != before
    }

    pub fn notify(&self) {
        let listeners = self.listeners.lock();
        tracing::debug!(subscribers = listeners.entries.len(), "word store changed");
        for (_, listener) in listeners.entries.iter() {
            listener();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.lock().entries.len()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
struct WordEntry {
    frequency: u8,
    offensive: bool,
}

/// Edits allowed between the typed text and a suggested word.
const MAX_EDIT_DISTANCE: usize = 2;
const MAX_LENGTH_EXPONENT: usize = 20;

/// In-memory word lists keyed by locale.
///
/// Word list format: one `word<whitespace>frequency[<whitespace>offensive]` per
/// line, frequency in `0..=255`; blank lines and `#` comments are skipped.
#[derive(Debug, Default)]
pub struct WordListDictionary {
    words: RwLock<AHashMap<LocaleSpec, AHashMap<String, WordEntry>>>,
    notifier: Option<ChangeNotifier>,
}

impl WordListDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `notifier` whenever words are added or removed.
    pub fn with_notifier(mut self, notifier: ChangeNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    fn changed(&self) {
        if let Some(notifier) = &self.notifier {
            notifier.notify();
        }
    }

    pub fn add_word(&self, locale: &LocaleSpec, word: &str, frequency: u8) {
        self.insert(locale, word, WordEntry { frequency, offensive: false });
        self.changed();
    }

    pub fn add_offensive_word(&self, locale: &LocaleSpec, word: &str, frequency: u8) {
        self.insert(locale, word, WordEntry { frequency, offensive: true });
        self.changed();
    }

    fn insert(&self, locale: &LocaleSpec, word: &str, entry: WordEntry) {
        self.words
            .write()
            .entry(locale.clone())
            .or_default()
            .insert(word.to_string(), entry);
    }

    pub fn remove_word(&self, locale: &LocaleSpec, word: &str) -> bool {
        let removed = self
            .words
            .write()
            .get_mut(locale)
            .is_some_and(|words| words.remove(word).is_some());
        if removed {
            self.changed();
        }
        removed
    }

    pub fn word_count(&self, locale: &LocaleSpec) -> usize {
        self.words.read().get(locale).map_or(0, |words| words.len())
    }

    /// Load a word list for `locale` from text. Returns the number of words read.
    pub fn load_str(&self, locale: &LocaleSpec, content: &str) -> Result<usize> {
        let mut parsed = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let word = fields.next().unwrap_or_default();
            let frequency = match fields.next() {
                Some(f) => f.parse::<u8>().map_err(|e| Error::WordList {
                    line: idx + 1,
                    reason: format!("bad frequency {:?}: {}", f, e),
                })?,
                None => {
                    return Err(Error::WordList {
                        line: idx + 1,
                        reason: "missing frequency".to_string(),
                    })
                }
            };
            let offensive = match fields.next() {
                None => false,
                Some("offensive") => true,
                Some(other) => {
                    return Err(Error::WordList {
                        line: idx + 1,
                        reason: format!("unknown flag {:?}", other),
                    })
                }
            };
            parsed.push((word.to_string(), WordEntry { frequency, offensive }));
        }

        let count = parsed.len();
        {
            let mut words = self.words.write();
            let list = words.entry(locale.clone()).or_default();
            list.extend(parsed);
        }
        tracing::debug!(%locale, count, "loaded word list");
        self.changed();
        Ok(count)
    }

    pub fn load_file<P: AsRef<Path>>(&self, locale: &LocaleSpec, path: P) -> Result<usize> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(locale, &content)
    }
}

/// Frequency scaled the way a decoder scores a full-word match of this length,
/// divided by the number of edits.
fn candidate_score(frequency: u8, typed_len: usize, word_len: usize, distance: usize) -> i32 {
    let exponent = typed_len.min(word_len).min(MAX_LENGTH_EXPONENT) as u32;
    let score = i64::from(frequency) * (1i64 << exponent) * 2 / (distance as i64 + 1);
    score.min(i64::from(i32::MAX)) as i32
}

impl DictionaryFacilitator for WordListDictionary {
    fn lookup(&self, request: &LookupRequest) -> anyhow::Result<Vec<SuggestedCandidate>> {
        let words = self.words.read();
        let Some(list) = words.get(&request.locale) else {
            anyhow::bail!("no dictionary loaded for {}", request.locale);
        };
        let typed_len = request.composition.chars().count();
        let mut candidates: Vec<SuggestedCandidate> = list
            .iter()
            .filter(|(_, entry)| !(request.block_offensive_words && entry.offensive))
            .filter_map(|(word, entry)| {
                let word_len = word.chars().count();
                let distance = edit_distance(&request.composition, word);
                if distance > MAX_EDIT_DISTANCE || distance >= word_len {
                    return None;
                }
                let score = candidate_score(entry.frequency, typed_len, word_len, distance);
                Some(SuggestedCandidate::new(
                    word.as_str(),
                    score,
                    DictionaryKind::Main,
                    Some(request.locale.clone()),
                ))
            })
            .collect();
        candidates.sort();
        tracing::trace!(
            composition = %request.composition,
            slot = request.slot,
            found = candidates.len(),
            "word list lookup"
        );
        Ok(candidates)
    }

    fn is_valid_word(&self, locale: &LocaleSpec, word: &str) -> bool {
        self.words
            .read()
            .get(locale)
            .is_some_and(|words| words.contains_key(word))
    }

    fn has_loaded_dictionary(&self, locale: &LocaleSpec) -> bool {
        self.words
            .read()
            .get(locale)
            .is_some_and(|words| !words.is_empty())
    }

    fn available_locales(&self) -> Vec<LocaleSpec> {
        let mut locales: Vec<LocaleSpec> = self
            .words
            .read()
            .iter()
            .filter(|(_, words)| !words.is_empty())
            .map(|(locale, _)| locale.clone())
            .collect();
        locales.sort_by_key(|l| l.to_string());
        locales
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn en() -> LocaleSpec {
        LocaleSpec::new("en").with_region("US")
    }

    fn request(text: &str, block: bool) -> LookupRequest {
        LookupRequest {
            composition: text.to_string(),
            coordinates: Vec::new(),
            ngram_context: NgramContext::empty(),
            locale: en(),
            slot: 0,
            block_offensive_words: block,
        }
    }

    #[test]
    fn test_load_str() {
        let dict = WordListDictionary::new();
        let n = dict
            .load_str(&en(), "# comment\nhello 200\n\nhelp 150\nheck 90 offensive\n")
            .unwrap();
        assert_eq!(n, 3);
        assert_eq!(dict.word_count(&en()), 3);
        assert!(dict.is_valid_word(&en(), "hello"));
        assert!(!dict.is_valid_word(&en(), "Hello"));
        assert!(dict.has_loaded_dictionary(&en()));
        assert!(!dict.has_loaded_dictionary(&LocaleSpec::new("fr")));
        assert_eq!(dict.available_locales(), vec![en()]);
    }

    #[test]
    fn test_load_str_errors() {
        let dict = WordListDictionary::new();
        let err = dict.load_str(&en(), "hello 200\nworld lots\n").unwrap_err();
        assert!(matches!(err, Error::WordList { line: 2, .. }));
        assert!(matches!(
            dict.load_str(&en(), "hello\n"),
            Err(Error::WordList { line: 1, .. })
        ));
        assert!(matches!(
            dict.load_str(&en(), "hello 300\n"),
            Err(Error::WordList { line: 1, .. })
        ));
        assert!(matches!(
            dict.load_str(&en(), "hello 3 rude\n"),
            Err(Error::WordList { line: 1, .. })
        ));
        // nothing from a failed load is kept
        assert_eq!(dict.word_count(&en()), 0);
    }

    #[test]
    fn test_load_missing_file() {
        let dict = WordListDictionary::new();
        let err = dict.load_file(&en(), "/nonexistent/words.txt").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_lookup_ranks_by_frequency_and_distance() {
        let dict = WordListDictionary::new();
        dict.load_str(&en(), "hello 200\nhelp 150\nhell 100\nworld 255\n").unwrap();
        let found = dict.lookup(&request("helo", false)).unwrap();
        let words: Vec<&str> = found.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words, vec!["hello", "help", "hell"]);
        assert!(found.iter().all(|c| c.source.locale == Some(en())));
    }

    #[test]
    fn test_lookup_blocks_offensive_words() {
        let dict = WordListDictionary::new();
        dict.load_str(&en(), "duck 100\ndamn 100 offensive\n").unwrap();
        let open = dict.lookup(&request("dack", false)).unwrap();
        assert_eq!(open.len(), 2);
        let blocked = dict.lookup(&request("dack", true)).unwrap();
        let words: Vec<&str> = blocked.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words, vec!["duck"]);
    }

    #[test]
    fn test_lookup_without_dictionary_fails() {
        let dict = WordListDictionary::new();
        assert!(dict.lookup(&request("helo", false)).is_err());
    }

    #[test]
    fn test_notifier_fires_on_mutation() {
        let notifier = ChangeNotifier::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let id = notifier.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(notifier.subscriber_count(), 1);

        let dict = WordListDictionary::new().with_notifier(notifier.clone());
        dict.add_word(&en(), "hello", 10);
        assert!(dict.remove_word(&en(), "hello"));
        assert!(!dict.remove_word(&en(), "hello"));
        assert_eq!(fired.load(Ordering::SeqCst), 2);

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        assert_eq!(notifier.subscriber_count(), 0);
        dict.add_word(&en(), "hello", 10);
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_candidate_score() {
        assert_eq!(candidate_score(255, 4, 5, 0), 255 * 16 * 2);
        assert_eq!(candidate_score(255, 4, 5, 1), 255 * 16);
        assert!(candidate_score(255, 100, 100, 0) > 0);
    }
}
