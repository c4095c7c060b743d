//! Spell-check sessions.
//!
//! A [`SpellChecker`] owns the shared pieces (dictionary facilitator, config,
//! lookup slots, change notifier) and hands out [`SpellCheckSession`]s. Each
//! session keeps its own decision cache and locale state, so sessions never
//! see each other's results.
//!
//! `SpellCheckSession::check` runs the word pipeline:
//!
//! 1. NFC-normalize, fold apostrophes, strip one quote from each end
//! 2. serve from the cache when the entry is still valid for the session locale
//! 3. pick the enabled locale whose script the word is written in
//! 4. strip script-specific punctuation
//! 5. classify checkability
//! 6. dictionary membership, trying the lowercase forms of capitalized words
//! 7. decoder lookup for suggestions
//! 8. re-case suggestions to match the typed word, dedup, truncate
//! 9. mark the best suggestion as recommended when it scores high enough
//! 10. cache the decision under the step-1 text

pub mod cache;
pub mod checkability;
pub mod score;
pub mod slots;

use parking_lot::Mutex;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::casing::{
    apply_capitalization, capitalization_of, capitalize_first_and_downcase_rest, to_lower,
    Capitalization,
};
use crate::collector::RankedSuggestionCollector;
use crate::config::Config;
use crate::dictionary::{ChangeNotifier, DictionaryFacilitator, LookupRequest, SubscriptionId};
use crate::error::Result;
use crate::keyboard::KeyboardLayout;
use crate::locale::{best_match, LocaleSpec};
use crate::ngram_context::{self, NgramContext};
use crate::punctuation::Punctuation;
use crate::script::Script;
use crate::utils;

use cache::{CachedResult, SuggestionCache};
use checkability::{checkability, normalize_quotes, Checkability};
use score::normalized_score;
use slots::SessionSlots;

/// Outcome of checking one word.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Decision {
    /// Not something to spell-check (too short, URL, other script, ...).
    Unremarkable,
    InDictionary,
    NotInDictionary {
        suggestions: Vec<String>,
        /// The first suggestion is close enough to offer as a correction.
        recommended: bool,
    },
}

impl Decision {
    pub fn not_in_dictionary_empty() -> Self {
        Decision::NotInDictionary {
            suggestions: Vec::new(),
            recommended: false,
        }
    }

    /// Decisions that do not depend on the session locale once made.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Decision::Unremarkable | Decision::InDictionary)
    }

    pub fn suggestions(&self) -> &[String] {
        match self {
            Decision::NotInDictionary { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

/// A checked word inside a sentence, in code points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceSpan {
    pub start: usize,
    pub length: usize,
    pub decision: Decision,
}

/// Factory for sessions sharing one dictionary and configuration.
pub struct SpellChecker {
    facilitator: Arc<dyn DictionaryFacilitator>,
    config: Arc<Config>,
    punctuation_patterns: Arc<BTreeMap<Script, Regex>>,
    slots: Arc<SessionSlots>,
    notifier: ChangeNotifier,
}

impl SpellChecker {
    /// Fails only when the configured punctuation patterns do not compile.
    pub fn new(
        facilitator: Arc<dyn DictionaryFacilitator>,
        config: Config,
        notifier: ChangeNotifier,
    ) -> Result<Self> {
        let punctuation_patterns = config.punctuation_patterns()?;
        let slots = SessionSlots::new(config.max_concurrent_lookups);
        Ok(Self {
            facilitator,
            config: Arc::new(config),
            punctuation_patterns: Arc::new(punctuation_patterns),
            slots: Arc::new(slots),
            notifier,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Dictionary locales serving the enabled locales, in enabled order.
    ///
    /// With no enabled locales configured, every loaded dictionary is used.
    pub fn resolved_locales(&self) -> Vec<LocaleSpec> {
        let available = self.facilitator.available_locales();
        if self.config.enabled_locales.is_empty() {
            return available;
        }
        let mut resolved: Vec<LocaleSpec> = Vec::new();
        for enabled in &self.config.enabled_locales {
            match best_match(Some(enabled), &available) {
                Some((index, level)) => {
                    let locale = &available[index];
                    tracing::trace!(%enabled, %locale, level = level.value(), "resolved locale");
                    if !resolved.contains(locale) {
                        resolved.push(locale.clone());
                    }
                }
                None => tracing::debug!(%enabled, "no dictionary for enabled locale"),
            }
        }
        resolved
    }

    /// Open a session preferring `locale`; falls back to the first resolved
    /// locale when it has no dictionary.
    pub fn new_session(&self, locale: Option<&LocaleSpec>) -> SpellCheckSession {
        let resolved = self.resolved_locales();
        let session_locale = locale
            .and_then(|wanted| best_match(Some(wanted), &resolved))
            .map(|(index, _)| resolved[index].clone())
            .or_else(|| resolved.first().cloned());

        let mut scripts_to_check: Vec<LocaleSpec> = Vec::new();
        for candidate in session_locale.iter().chain(resolved.iter()) {
            let script = Script::for_locale(candidate);
            if !scripts_to_check
                .iter()
                .any(|l| Script::for_locale(l) == script)
            {
                scripts_to_check.push(candidate.clone());
            }
        }

        let cache = Arc::new(SuggestionCache::new(self.config.cache_size));
        let weak = Arc::downgrade(&cache);
        let subscription = self.notifier.subscribe(move || {
            if let Some(cache) = weak.upgrade() {
                cache.clear();
            }
        });

        tracing::debug!(
            locale = ?session_locale.as_ref().map(ToString::to_string),
            candidates = scripts_to_check.len(),
            "opened spell-check session"
        );
        SpellCheckSession {
            facilitator: Arc::clone(&self.facilitator),
            config: Arc::clone(&self.config),
            punctuation_patterns: Arc::clone(&self.punctuation_patterns),
            slots: Arc::clone(&self.slots),
            cache,
            notifier: self.notifier.clone(),
            subscription,
            state: Mutex::new(SessionState::new(session_locale, scripts_to_check)),
        }
    }
}

struct SessionState {
    locale: Option<LocaleSpec>,
    script: Script,
    /// One locale per script, most recently matched first.
    scripts_to_check: Vec<LocaleSpec>,
    punctuation: Punctuation,
    layout: KeyboardLayout,
}

impl SessionState {
    fn new(locale: Option<LocaleSpec>, scripts_to_check: Vec<LocaleSpec>) -> Self {
        let mut state = Self {
            locale: None,
            script: Script::Unknown,
            scripts_to_check,
            punctuation: Punctuation::default(),
            layout: KeyboardLayout::new(),
        };
        state.set_locale(locale);
        state
    }

    fn set_locale(&mut self, locale: Option<LocaleSpec>) {
        self.script = locale.as_ref().map_or(Script::Unknown, Script::for_locale);
        self.punctuation = Punctuation::for_locale(locale.as_ref());
        self.layout = KeyboardLayout::for_script(self.script);
        self.locale = locale;
    }

    /// Promote the first candidate locale whose script contains a code point
    /// of `text`, evicting other candidates of that script.
    fn select_locale(&mut self, text: &str) -> Option<LocaleSpec> {
        for c in text.chars() {
            let Some(index) = self
                .scripts_to_check
                .iter()
                .position(|l| Script::for_locale(l).contains_letter(c))
            else {
                continue;
            };
            let chosen = self.scripts_to_check.remove(index);
            let script = Script::for_locale(&chosen);
            self.scripts_to_check
                .retain(|l| Script::for_locale(l) != script);
            self.scripts_to_check.insert(0, chosen.clone());
            if self.locale.as_ref() != Some(&chosen) {
                tracing::debug!(locale = %chosen, %script, "switching session locale");
                self.set_locale(Some(chosen.clone()));
            }
            return Some(chosen);
        }
        None
    }
}

/// One caller's spell-check state. Checks on one session are serialized.
pub struct SpellCheckSession {
    facilitator: Arc<dyn DictionaryFacilitator>,
    config: Arc<Config>,
    punctuation_patterns: Arc<BTreeMap<Script, Regex>>,
    slots: Arc<SessionSlots>,
    cache: Arc<SuggestionCache>,
    notifier: ChangeNotifier,
    subscription: SubscriptionId,
    state: Mutex<SessionState>,
}

impl Drop for SpellCheckSession {
    fn drop(&mut self) {
        self.notifier.unsubscribe(self.subscription);
    }
}

impl SpellCheckSession {
    pub fn locale(&self) -> Option<LocaleSpec> {
        self.state.lock().locale.clone()
    }

    pub fn script(&self) -> Script {
        self.state.lock().script
    }

    /// Candidate locales in the order they are tried.
    pub fn scripts_to_check(&self) -> Vec<LocaleSpec> {
        self.state.lock().scripts_to_check.clone()
    }

    pub fn cache(&self) -> &SuggestionCache {
        &self.cache
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Check one word. Never fails: internal faults come back as an empty
    /// "not in dictionary" decision.
    pub fn check(
        &self,
        text: &str,
        ngram_context: Option<&NgramContext>,
        suggestions_limit: usize,
    ) -> Decision {
        match self.run_pipeline(text, ngram_context, suggestions_limit) {
            Ok(decision) => decision,
            Err(err) => {
                tracing::warn!(error = %err, "spell check failed, reporting no suggestions");
                Decision::not_in_dictionary_empty()
            }
        }
    }

    fn run_pipeline(
        &self,
        text: &str,
        ngram_context: Option<&NgramContext>,
        suggestions_limit: usize,
    ) -> anyhow::Result<Decision> {
        let query = normalize_quotes(&utils::normalize(text));
        let mut state = self.state.lock();

        if let Some(cached) = self.cache.get(&query) {
            if cached.decision.is_terminal() || cached.locale == state.locale {
                tracing::debug!(%query, "cache hit");
                return Ok(cached.decision);
            }
            tracing::debug!(%query, "discarding cached suggestions for another locale");
        }

        let Some(locale) = state.select_locale(&query) else {
            tracing::trace!(%query, "no enabled script matches");
            return Ok(self.remember(query, Decision::Unremarkable, &state));
        };
        if !self.facilitator.has_loaded_dictionary(&locale) {
            tracing::trace!(%locale, "no dictionary loaded");
            return Ok(self.remember(query, Decision::Unremarkable, &state));
        }

        let cleaned = match self.punctuation_patterns.get(&state.script) {
            Some(pattern) => pattern.replace_all(&query, "").into_owned(),
            None => query.clone(),
        };

        let class = checkability(&cleaned, state.script, self.config.url_detection);
        tracing::trace!(%cleaned, ?class, "checkability");
        if class.is_unremarkable() {
            return Ok(self.remember(query, Decision::Unremarkable, &state));
        }
        if class == Checkability::ContainsPeriod {
            let decision = self.check_period_split(&locale, &cleaned);
            return Ok(self.remember(query, decision, &state));
        }

        let capitalization = capitalization_of(&cleaned);
        if self.is_in_dict_for_any_capitalization(&locale, &cleaned, capitalization) {
            return Ok(self.remember(query, Decision::InDictionary, &state));
        }

        let context = ngram_context.cloned().unwrap_or_default();
        let mut request = LookupRequest {
            composition: cleaned.clone(),
            coordinates: state.layout.coordinates(&cleaned),
            ngram_context: context,
            locale: locale.clone(),
            slot: 0,
            block_offensive_words: self.config.block_offensive_words,
        };
        let raw = {
            let slot = self.slots.acquire();
            request.slot = slot.index();
            self.facilitator.lookup(&request)?
        };

        let mut collector = RankedSuggestionCollector::with_emoji_quota(
            self.config.suggestion_capacity,
            self.config.emoji_capacity,
        );
        collector
            .set_beginning_of_sentence(request.ngram_context.is_beginning_of_sentence_context());
        collector.bulk_insert(Some(raw));

        // suggestions for a sentence-initial word start with a capital
        let suggestion_case = if collector.is_beginning_of_sentence()
            && capitalization == Capitalization::None
        {
            Capitalization::First
        } else {
            capitalization
        };

        let mut suggestions: Vec<String> = Vec::new();
        let mut best_score = None;
        for candidate in &collector {
            let word = apply_capitalization(&candidate.word, suggestion_case, Some(&locale));
            if suggestions.contains(&word) {
                continue;
            }
            if best_score.is_none() {
                best_score = Some(candidate.score);
            }
            suggestions.push(word);
        }
        suggestions.truncate(suggestions_limit);

        let recommended = match (suggestions.first(), best_score) {
            (Some(best), Some(score)) => {
                normalized_score(&cleaned, best, score) > self.config.recommended_threshold
            }
            _ => false,
        };
        let decision = Decision::NotInDictionary {
            suggestions,
            recommended,
        };
        Ok(self.remember(query, decision, &state))
    }

    fn remember(&self, query: String, decision: Decision, state: &SessionState) -> Decision {
        self.cache.put(
            query,
            CachedResult {
                decision: decision.clone(),
                locale: state.locale.clone(),
            },
        );
        decision
    }

    fn is_in_dict_for_any_capitalization(
        &self,
        locale: &LocaleSpec,
        text: &str,
        capitalization: Capitalization,
    ) -> bool {
        if self.facilitator.is_valid_word(locale, text) {
            return true;
        }
        if capitalization == Capitalization::None {
            return false;
        }
        if self.facilitator.is_valid_word(locale, &to_lower(text, Some(locale))) {
            return true;
        }
        if capitalization == Capitalization::First {
            return false;
        }
        self.facilitator
            .is_valid_word(locale, &capitalize_first_and_downcase_rest(text, Some(locale)))
    }

    /// Words run together with periods (`hello.world`) get the spaced-out
    /// version as a recommended fix when every piece is a word. Trailing
    /// periods are ignored; an empty piece anywhere else is never a word.
    fn check_period_split(&self, locale: &LocaleSpec, text: &str) -> Decision {
        let mut pieces: Vec<&str> = text.split('.').collect();
        while pieces.last().is_some_and(|p| p.is_empty()) {
            pieces.pop();
        }
        if pieces.len() > 1
            && pieces
                .iter()
                .all(|piece| self.facilitator.is_valid_word(locale, piece))
        {
            return Decision::NotInDictionary {
                suggestions: vec![pieces.join(" ")],
                recommended: true,
            };
        }
        if self.facilitator.is_valid_word(locale, text) {
            Decision::InDictionary
        } else {
            Decision::not_in_dictionary_empty()
        }
    }

    /// Check every word of a sentence, feeding each the context of the text
    /// before it. Unremarkable words are left out of the result.
    pub fn check_sentence(&self, text: &str, suggestions_limit: usize) -> Vec<SentenceSpan> {
        let punctuation = self.state.lock().punctuation.clone();
        let chars: Vec<char> = text.chars().collect();
        let mut spans = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            if punctuation.is_word_separator(chars[start]) {
                start += 1;
                continue;
            }
            let mut end = start;
            while end < chars.len() && !punctuation.is_word_separator(chars[end]) {
                end += 1;
            }
            let before: String = chars[..start].iter().collect();
            let word: String = chars[start..end].iter().collect();
            let context = ngram_context::extract(Some(&before), &punctuation, 1);
            let decision = self.check(&word, Some(&context), suggestions_limit);
            if decision != Decision::Unremarkable {
                spans.push(SentenceSpan {
                    start,
                    length: end - start,
                    decision,
                });
            }
            start = end;
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::SuggestedCandidate;
    use crate::dictionary::WordListDictionary;
    use crate::ngram_context::WordInfo;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Word-list dictionary that counts lookups and can be told to fail.
    struct CountingDictionary {
        inner: WordListDictionary,
        lookups: AtomicUsize,
        fail: bool,
    }

    impl DictionaryFacilitator for CountingDictionary {
        fn lookup(&self, request: &LookupRequest) -> anyhow::Result<Vec<SuggestedCandidate>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("decoder crashed");
            }
            self.inner.lookup(request)
        }

        fn is_valid_word(&self, locale: &LocaleSpec, word: &str) -> bool {
            self.inner.is_valid_word(locale, word)
        }

        fn has_loaded_dictionary(&self, locale: &LocaleSpec) -> bool {
            self.inner.has_loaded_dictionary(locale)
        }

        fn available_locales(&self) -> Vec<LocaleSpec> {
            self.inner.available_locales()
        }
    }

    fn en() -> LocaleSpec {
        LocaleSpec::new("en").with_region("US")
    }

    fn hy() -> LocaleSpec {
        LocaleSpec::new("hy")
    }

    fn dictionary(fail: bool) -> Arc<CountingDictionary> {
        let inner = WordListDictionary::new();
        inner
            .load_str(&en(), "hello 200\nhelp 150\nworld 180\nnasa 90\nNASA 120\nit 200\nis 200\n")
            .unwrap();
        inner.load_str(&hy(), "բարեւ 200\n").unwrap();
        Arc::new(CountingDictionary {
            inner,
            lookups: AtomicUsize::new(0),
            fail,
        })
    }

    fn checker(dict: Arc<CountingDictionary>) -> SpellChecker {
        let config = Config {
            enabled_locales: vec![en(), hy()],
            ..Config::default()
        };
        SpellChecker::new(dict, config, ChangeNotifier::new()).unwrap()
    }

    #[test]
    fn test_capitalized_word_found_through_lowercase() {
        let dict = dictionary(false);
        let session = checker(Arc::clone(&dict)).new_session(Some(&en()));
        assert_eq!(session.check("Hello", None, 5), Decision::InDictionary);
        assert_eq!(session.check("HELLO", None, 5), Decision::InDictionary);
        assert_eq!(session.check("hello", None, 5), Decision::InDictionary);
        assert_eq!(dict.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_lowercase_word_does_not_match_capitalized_entry() {
        let dict = dictionary(false);
        let inner = &dict.inner;
        inner.add_word(&en(), "Paris", 150);
        let session = checker(Arc::clone(&dict)).new_session(Some(&en()));
        assert_eq!(session.check("Paris", None, 5), Decision::InDictionary);
        assert!(matches!(
            session.check("paris", None, 5),
            Decision::NotInDictionary { .. }
        ));
    }

    #[test]
    fn test_suggestions_follow_typed_capitalization() {
        let dict = dictionary(false);
        let session = checker(Arc::clone(&dict)).new_session(Some(&en()));
        match session.check("Helo", None, 5) {
            Decision::NotInDictionary { suggestions, recommended } => {
                assert_eq!(suggestions[0], "Hello");
                assert!(suggestions.contains(&"Help".to_string()));
                assert!(recommended);
            }
            other => panic!("unexpected {:?}", other),
        }
        match session.check("HELO", None, 5) {
            Decision::NotInDictionary { suggestions, .. } => {
                assert_eq!(suggestions[0], "HELLO");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_suggestions_deduplicated_after_recasing() {
        let dict = dictionary(false);
        let session = checker(Arc::clone(&dict)).new_session(Some(&en()));
        // "nasa" and "NASA" both uppercase to "NASA"
        let decision = session.check("NASS", None, 5);
        let nasa = decision.suggestions().iter().filter(|s| *s == "NASA").count();
        assert_eq!(nasa, 1);
    }

    #[test]
    fn test_suggestion_limit() {
        let dict = dictionary(false);
        let session = checker(Arc::clone(&dict)).new_session(Some(&en()));
        let decision = session.check("helo", None, 1);
        assert_eq!(decision.suggestions(), ["hello".to_string()]);
    }

    #[test]
    fn test_cache_serves_repeat_queries() {
        let dict = dictionary(false);
        let session = checker(Arc::clone(&dict)).new_session(Some(&en()));
        let first = session.check("wrold", None, 5);
        let second = session.check("wrold", None, 5);
        assert_eq!(first, second);
        assert_eq!(dict.lookups.load(Ordering::SeqCst), 1);
        assert_eq!(session.cache().stats(), (1, 1));

        session.clear_cache();
        session.check("wrold", None, 5);
        assert_eq!(dict.lookups.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_notifier_invalidates_sessions() {
        let dict = dictionary(false);
        let checker = checker(Arc::clone(&dict));
        let session = checker.new_session(Some(&en()));
        session.check("wrold", None, 5);
        checker.notifier().notify();
        assert!(session.cache().is_empty());
        session.check("wrold", None, 5);
        assert_eq!(dict.lookups.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dropped_sessions_unsubscribe() {
        let dict = dictionary(false);
        let checker = checker(Arc::clone(&dict));
        let kept = checker.new_session(Some(&en()));
        for _ in 0..100 {
            drop(checker.new_session(None));
        }
        assert_eq!(checker.notifier().subscriber_count(), 1);

        kept.check("wrold", None, 5);
        checker.notifier().notify();
        assert!(kept.cache().is_empty());
        drop(kept);
        assert_eq!(checker.notifier().subscriber_count(), 0);
    }

    #[test]
    fn test_quotes_and_apostrophes_share_cache_key() {
        let dict = dictionary(false);
        let session = checker(Arc::clone(&dict)).new_session(Some(&en()));
        session.check("\"wrold\"", None, 5);
        session.check("wrold", None, 5);
        assert_eq!(dict.lookups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_faults_degrade_to_empty_result() {
        let dict = dictionary(true);
        let session = checker(Arc::clone(&dict)).new_session(Some(&en()));
        assert_eq!(session.check("wrold", None, 5), Decision::not_in_dictionary_empty());
        // valid words never reach the decoder
        assert_eq!(session.check("world", None, 5), Decision::InDictionary);
    }

    #[test]
    fn test_unremarkable_inputs() {
        let dict = dictionary(false);
        let session = checker(Arc::clone(&dict)).new_session(Some(&en()));
        for text in ["a", "", "  ", "42abc", "me@example.com", "http://example.org", "ab12"] {
            assert_eq!(session.check(text, None, 5), Decision::Unremarkable, "{:?}", text);
        }
        // no enabled locale writes in Greek
        assert_eq!(session.check("καλημέρα", None, 5), Decision::Unremarkable);
        assert_eq!(dict.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_period_split() {
        let dict = dictionary(false);
        let session = checker(Arc::clone(&dict)).new_session(Some(&en()));
        assert_eq!(
            session.check("hello.world", None, 5),
            Decision::NotInDictionary {
                suggestions: vec!["hello world".to_string()],
                recommended: true,
            }
        );
        assert_eq!(
            session.check("hello.wrold", None, 5),
            Decision::not_in_dictionary_empty()
        );
        // an empty piece between periods is not a word
        assert_eq!(
            session.check("hello..world", None, 5),
            Decision::not_in_dictionary_empty()
        );
        // a trailing period is not an extra piece
        assert_eq!(
            session.check("hello.world.", None, 5),
            Decision::NotInDictionary {
                suggestions: vec!["hello world".to_string()],
                recommended: true,
            }
        );
    }

    #[test]
    fn test_sentence_start_capitalizes_suggestions() {
        let dict = dictionary(false);
        let session = checker(Arc::clone(&dict)).new_session(Some(&en()));
        let bos = NgramContext::beginning_of_sentence();
        match session.check("helo", Some(&bos), 5) {
            Decision::NotInDictionary { suggestions, .. } => {
                assert_eq!(suggestions[0], "Hello");
                assert!(suggestions.contains(&"Help".to_string()));
            }
            other => panic!("unexpected {:?}", other),
        }

        let mid = NgramContext::new(vec![WordInfo::word("it")]);
        match session.check("wrold", Some(&mid), 5) {
            Decision::NotInDictionary { suggestions, .. } => {
                assert_eq!(suggestions[0], "world");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_script_switches_session_locale() {
        let dict = dictionary(false);
        let session = checker(Arc::clone(&dict)).new_session(Some(&en()));
        assert_eq!(session.script(), Script::Latin);
        // the Armenian question mark inside the word is stripped first
        assert_eq!(session.check("բար\u{055E}եւ", None, 5), Decision::InDictionary);
        assert_eq!(session.locale(), Some(hy()));
        assert_eq!(session.script(), Script::Armenian);
        assert_eq!(session.scripts_to_check()[0], hy());

        assert_eq!(session.check("hello", None, 5), Decision::InDictionary);
        assert_eq!(session.locale(), Some(en()));
        assert_eq!(session.scripts_to_check(), vec![en(), hy()]);
    }

    #[test]
    fn test_stale_locale_suggestions_are_recomputed() {
        let dict = dictionary(false);
        let session = checker(Arc::clone(&dict)).new_session(Some(&en()));
        session.check("wrold", None, 5);
        session.check("բարեւ", None, 5);
        // the cached suggestions were made for en_US, the session is now hy
        session.check("wrold", None, 5);
        assert_eq!(dict.lookups.load(Ordering::SeqCst), 2);
        assert_eq!(session.locale(), Some(en()));
    }

    #[test]
    fn test_unknown_session_locale_falls_back() {
        let dict = dictionary(false);
        let session = checker(Arc::clone(&dict)).new_session(Some(&LocaleSpec::new("de")));
        assert_eq!(session.locale(), Some(en()));
        let session = checker(Arc::clone(&dict)).new_session(Some(&LocaleSpec::new("en")));
        assert_eq!(session.locale(), Some(en()));
    }

    #[test]
    fn test_resolved_locales_follow_enabled_order() {
        let dict = dictionary(false);
        let config = Config {
            enabled_locales: vec![hy(), LocaleSpec::new("en").with_region("GB"), LocaleSpec::new("de")],
            ..Config::default()
        };
        let checker = SpellChecker::new(dict, config, ChangeNotifier::new()).unwrap();
        assert_eq!(checker.resolved_locales(), vec![hy(), en()]);
    }

    #[test]
    fn test_check_sentence() {
        let dict = dictionary(false);
        let session = checker(Arc::clone(&dict)).new_session(Some(&en()));
        let spans = session.check_sentence("hello wrold, it is", 5);
        assert_eq!(spans.len(), 4);
        assert_eq!((spans[0].start, spans[0].length), (0, 5));
        assert_eq!(spans[0].decision, Decision::InDictionary);
        assert_eq!((spans[1].start, spans[1].length), (6, 5));
        assert!(matches!(spans[1].decision, Decision::NotInDictionary { .. }));
        assert_eq!((spans[2].start, spans[2].length), (13, 2));
        assert_eq!((spans[3].start, spans[3].length), (16, 2));
    }
}
