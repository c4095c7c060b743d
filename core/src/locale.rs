//! Locale specifications and graded locale matching.
//!
//! A `LocaleSpec` is the `lang[_region[_variant]]` triple used to name keyboard
//! subtypes and dictionaries. `match_level` grades how well a candidate locale
//! satisfies a required one; callers use the grade to pick which enabled
//! dictionary should interpret a word.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A parsed `lang[_region[_variant]]` locale.
///
/// The language is always present. An absent region with a present variant is
/// legal (`en__POSIX`) and keeps the three-part arity of the original string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleSpec {
    language: String,
    region: Option<String>,
    variant: Option<String>,
}

impl LocaleSpec {
    /// Language-only locale, e.g. `LocaleSpec::new("fr")`.
    pub fn new<T: Into<String>>(language: T) -> Self {
        Self {
            language: language.into().to_lowercase(),
            region: None,
            variant: None,
        }
    }

    pub fn with_region<T: Into<String>>(mut self, region: T) -> Self {
        self.region = non_empty(region.into()).map(|r| r.to_uppercase());
        self
    }

    pub fn with_variant<T: Into<String>>(mut self, variant: T) -> Self {
        self.variant = non_empty(variant.into());
        self
    }

    /// Parse `lang[_region[_variant]]`; `-` is accepted as separator too.
    ///
    /// Returns `Ok(None)` for an empty string: "no locale" is distinct from a
    /// malformed one.
    pub fn parse(s: &str) -> Result<Option<Self>> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        let mut parts = s.splitn(3, |c| c == '_' || c == '-');
        let language = parts.next().unwrap_or_default();
        if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::InvalidLocale(s.to_string()));
        }
        let mut spec = LocaleSpec::new(language);
        if let Some(region) = parts.next() {
            spec = spec.with_region(region);
        }
        if let Some(variant) = parts.next() {
            if variant.is_empty() {
                return Err(Error::InvalidLocale(s.to_string()));
            }
            spec = spec.with_variant(variant);
        }
        Ok(Some(spec))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Number of specified parts as written: 1, 2 or 3.
    fn arity(&self) -> usize {
        if self.variant.is_some() {
            3
        } else if self.region.is_some() {
            2
        } else {
            1
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

impl fmt::Display for LocaleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        match (&self.region, &self.variant) {
            (Some(r), Some(v)) => write!(f, "_{}_{}", r, v),
            (None, Some(v)) => write!(f, "__{}", v),
            (Some(r), None) => write!(f, "_{}", r),
            (None, None) => Ok(()),
        }
    }
}

impl FromStr for LocaleSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        LocaleSpec::parse(s)?.ok_or_else(|| Error::InvalidLocale(s.to_string()))
    }
}

impl TryFrom<String> for LocaleSpec {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<LocaleSpec> for String {
    fn from(spec: LocaleSpec) -> Self {
        spec.to_string()
    }
}

/// Graded closeness between a required and a candidate locale.
///
/// Discriminants are the historical numeric values; a higher value is always a
/// closer match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchLevel {
    NoMatch = 0,
    LanguageMatchCountryDiffer = 3,
    LanguageAndCountryMatchVariantDiffer = 6,
    AnyMatch = 10,
    LanguageMatch = 15,
    LanguageAndCountryMatch = 20,
    FullMatch = 30,
}

impl MatchLevel {
    pub fn value(self) -> u8 {
        self as u8
    }

    /// A strong match is one at or above `AnyMatch`.
    pub fn is_strong(self) -> bool {
        self >= MatchLevel::AnyMatch
    }

    /// Any grade above `NoMatch`.
    pub fn is_match(self) -> bool {
        self > MatchLevel::NoMatch
    }

    /// Zero-padded so lexical order equals numeric order.
    pub fn sorted_string(self) -> String {
        format!("{:02}", self.value())
    }
}

/// Grade how well `candidate` satisfies `required`. Pure.
pub fn match_level(required: Option<&LocaleSpec>, candidate: Option<&LocaleSpec>) -> MatchLevel {
    let Some(required) = required else {
        return if candidate.is_none() {
            MatchLevel::FullMatch
        } else {
            MatchLevel::AnyMatch
        };
    };
    let Some(candidate) = candidate else {
        return MatchLevel::NoMatch;
    };
    // Language is a hard filter.
    if required.language != candidate.language {
        return MatchLevel::NoMatch;
    }

    match required.arity() {
        1 => {
            if candidate.arity() == 1 {
                MatchLevel::FullMatch
            } else {
                MatchLevel::LanguageMatch
            }
        }
        2 => {
            if candidate.arity() == 1 || required.region != candidate.region {
                MatchLevel::LanguageMatchCountryDiffer
            } else if candidate.arity() == 3 {
                MatchLevel::LanguageAndCountryMatch
            } else {
                MatchLevel::FullMatch
            }
        }
        _ => {
            if candidate.arity() == 1 || required.region != candidate.region {
                MatchLevel::LanguageMatchCountryDiffer
            } else if candidate.arity() == 2 || required.variant != candidate.variant {
                MatchLevel::LanguageAndCountryMatchVariantDiffer
            } else {
                MatchLevel::FullMatch
            }
        }
    }
}

/// String form of [`match_level`]. Unparseable strings count as no locale.
pub fn match_level_str(required: &str, candidate: &str) -> MatchLevel {
    let required = LocaleSpec::parse(required).ok().flatten();
    let candidate = LocaleSpec::parse(candidate).ok().flatten();
    match_level(required.as_ref(), candidate.as_ref())
}

/// Pick the candidate that best satisfies `required`.
///
/// Only candidates that match at all are considered; among equal grades the
/// earliest candidate wins, so callers pass candidates in preference order.
pub fn best_match(
    required: Option<&LocaleSpec>,
    candidates: &[LocaleSpec],
) -> Option<(usize, MatchLevel)> {
    let mut best: Option<(usize, MatchLevel)> = None;
    for (i, candidate) in candidates.iter().enumerate() {
        let level = match_level(required, Some(candidate));
        if !level.is_match() {
            continue;
        }
        match best {
            Some((_, best_level)) if best_level >= level => {}
            _ => best = Some((i, level)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use MatchLevel::*;

    fn ml(required: &str, candidate: &str) -> MatchLevel {
        match_level_str(required, candidate)
    }

    #[test]
    fn test_parse_and_display() {
        let spec: LocaleSpec = "en_US".parse().unwrap();
        assert_eq!(spec.language(), "en");
        assert_eq!(spec.region(), Some("US"));
        assert_eq!(spec.variant(), None);
        assert_eq!(spec.to_string(), "en_US");

        let spec: LocaleSpec = "sr-rs-Latn".parse().unwrap();
        assert_eq!(spec.to_string(), "sr_RS_Latn");

        let posix: LocaleSpec = "en__POSIX".parse().unwrap();
        assert_eq!(posix.region(), None);
        assert_eq!(posix.variant(), Some("POSIX"));
        assert_eq!(posix.to_string(), "en__POSIX");

        assert!(LocaleSpec::parse("").unwrap().is_none());
        assert!(LocaleSpec::parse("_US").is_err());
        assert!("".parse::<LocaleSpec>().is_err());
    }

    #[test]
    fn test_empty_required() {
        assert_eq!(match_level(None, None), FullMatch);
        let fr = LocaleSpec::new("fr");
        assert_eq!(match_level(None, Some(&fr)), AnyMatch);
        assert_eq!(match_level(Some(&fr), None), NoMatch);
        assert_eq!(ml("", "en_US_POSIX"), AnyMatch);
    }

    #[test]
    fn test_all_arity_combinations() {
        // required \ candidate: 1, 2 and 3 parts with matching prefixes
        assert_eq!(ml("en", "en"), FullMatch);
        assert_eq!(ml("en", "en_US"), LanguageMatch);
        assert_eq!(ml("en", "en_US_POSIX"), LanguageMatch);

        assert_eq!(ml("en_US", "en"), LanguageMatchCountryDiffer);
        assert_eq!(ml("en_US", "en_US"), FullMatch);
        assert_eq!(ml("en_US", "en_US_POSIX"), LanguageAndCountryMatch);

        assert_eq!(ml("en_US_POSIX", "en"), LanguageMatchCountryDiffer);
        assert_eq!(ml("en_US_POSIX", "en_US"), LanguageAndCountryMatchVariantDiffer);
        assert_eq!(ml("en_US_POSIX", "en_US_POSIX"), FullMatch);

        // mismatching region or variant
        assert_eq!(ml("en_US", "en_GB"), LanguageMatchCountryDiffer);
        assert_eq!(ml("en_US", "en_GB_OED"), LanguageMatchCountryDiffer);
        assert_eq!(ml("en_US_POSIX", "en_GB"), LanguageMatchCountryDiffer);
        assert_eq!(ml("en_US_POSIX", "en_GB_POSIX"), LanguageMatchCountryDiffer);
        assert_eq!(
            ml("en_US_POSIX", "en_US_OTHER"),
            LanguageAndCountryMatchVariantDiffer
        );
    }

    #[test]
    fn test_language_is_hard_filter() {
        for required in ["en", "en_US", "en_US_POSIX"] {
            for candidate in ["fr", "fr_US", "fr_US_POSIX"] {
                assert_eq!(ml(required, candidate), NoMatch, "{} vs {}", required, candidate);
            }
        }
    }

    #[test]
    fn test_self_match_is_full() {
        for s in ["de", "de_CH", "de_CH_1901", "en__POSIX"] {
            let spec: LocaleSpec = s.parse().unwrap();
            assert_eq!(match_level(Some(&spec), Some(&spec)), FullMatch, "{}", s);
        }
    }

    #[test]
    fn test_monotonic_as_fewer_parts_agree() {
        let full = ml("pt_BR_X", "pt_BR_X");
        let variant_differ = ml("pt_BR_X", "pt_BR_Y");
        let country_differ = ml("pt_BR_X", "pt_PT_X");
        let language_differ = ml("pt_BR_X", "es_BR_X");
        assert!(full > variant_differ);
        assert!(variant_differ > country_differ);
        assert!(country_differ > language_differ);
    }

    #[test]
    fn test_strength_and_sorted_string() {
        assert!(FullMatch.is_strong());
        assert!(AnyMatch.is_strong());
        assert!(!LanguageAndCountryMatchVariantDiffer.is_strong());
        assert!(LanguageMatchCountryDiffer.is_match());
        assert!(!NoMatch.is_match());
        assert_eq!(LanguageMatchCountryDiffer.sorted_string(), "03");
        assert_eq!(FullMatch.sorted_string(), "30");
        assert!(NoMatch.sorted_string() < LanguageMatch.sorted_string());
    }

    #[test]
    fn test_best_match_prefers_level_then_position() {
        let candidates: Vec<LocaleSpec> = ["fr", "en_GB", "en", "en_US"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let required: LocaleSpec = "en_US".parse().unwrap();
        assert_eq!(best_match(Some(&required), &candidates), Some((3, FullMatch)));

        let required: LocaleSpec = "en_AU".parse().unwrap();
        // en_GB and en both differ in country: first wins
        assert_eq!(
            best_match(Some(&required), &candidates),
            Some((1, LanguageMatchCountryDiffer))
        );

        let required: LocaleSpec = "ru".parse().unwrap();
        assert_eq!(best_match(Some(&required), &candidates), None);
    }

    #[test]
    fn test_repeated_calls_are_equal() {
        let a = ml("en_US", "en_US_POSIX");
        for _ in 0..10 {
            assert_eq!(ml("en_US", "en_US_POSIX"), a);
        }
    }

    #[test]
    fn test_serde_as_string() {
        let spec: LocaleSpec = "hy_AM".parse().unwrap();
        let s: String = spec.clone().into();
        assert_eq!(s, "hy_AM");
        assert_eq!(LocaleSpec::try_from(s).unwrap(), spec);
    }
}
