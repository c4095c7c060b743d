//! keyspell-core
//!
//! Linguistic decision core of a soft-keyboard input method: previous-word
//! context extraction, locale matching, bounded suggestion ranking, spell-check
//! sessions with a result cache, and recapitalization.
//!
//! The dictionary and decoder are external; they are reached through the
//! [`DictionaryFacilitator`] trait.
//!
//! Public API:
//! - `match_level` / `best_match` - Graded locale matching
//! - `ngram_context::extract` - Previous words before the cursor
//! - `RankedSuggestionCollector` - Capacity-bounded ranking with an emoji quota
//! - `SpellChecker` / `SpellCheckSession` - Word and sentence checking
//! - `RecapitalizeStatus` - Capitalization cycling for a selection
//! - `Config` - Preferences, loaded from TOML

pub mod error;
pub use error::{Error, Result};

pub mod locale;
pub use locale::{best_match, match_level, match_level_str, LocaleSpec, MatchLevel};

pub mod script;
pub use script::Script;

pub mod casing;
pub use casing::Capitalization;

pub mod punctuation;
pub use punctuation::Punctuation;

pub mod ngram_context;
pub use ngram_context::{NgramContext, WordInfo, MAX_PREV_WORD_COUNT};

pub mod candidate;
pub use candidate::{DictionaryKind, Provenance, SuggestedCandidate};

pub mod collector;
pub use collector::RankedSuggestionCollector;

pub mod recapitalize;
pub use recapitalize::{RecapitalizeMode, RecapitalizeStatus};

pub mod keyboard;
pub use keyboard::{KeyboardLayout, NOT_A_COORDINATE};

pub mod dictionary;
pub use dictionary::{
    ChangeNotifier, DictionaryFacilitator, LookupRequest, SubscriptionId, WordListDictionary,
};

pub mod config;
pub use config::Config;

pub mod spellcheck;
pub use spellcheck::{Decision, SentenceSpan, SpellCheckSession, SpellChecker};

pub mod utils {
    /// Normalize input strings (NFC) and trim whitespace.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_string()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_normalize() {
            // e + combining acute composes to é
            assert_eq!(normalize("  cafe\u{0301} "), "caf\u{00E9}");
            assert_eq!(normalize(""), "");
        }
    }
}
