//! Spell-checker preferences, loaded from and saved to TOML.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::locale::LocaleSpec;
use crate::script::Script;

/// Preferences read by the spell checker.
///
/// Every field has a default, so a partial TOML file is valid.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Treat URL- and email-looking text as unremarkable.
    pub url_detection: bool,
    pub block_offensive_words: bool,
    /// Normalized score a best suggestion must exceed to be recommended.
    pub recommended_threshold: f32,
    /// Locales the user enabled, in preference order.
    pub enabled_locales: Vec<LocaleSpec>,
    pub cache_size: usize,
    pub max_concurrent_lookups: usize,
    /// Capacity of the collector fed with decoder candidates.
    pub suggestion_capacity: usize,
    /// Slots reserved for emoji inside `suggestion_capacity`; 0 keeps emoji out.
    pub emoji_capacity: usize,
    pub default_suggestions_limit: usize,
    /// Script name to a regex of characters removed before checking.
    pub script_punctuation: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        let mut script_punctuation = BTreeMap::new();
        // Armenian emphasis, exclamation and question marks sit inside words
        script_punctuation.insert(
            Script::Armenian.name().to_string(),
            "[\u{055E}\u{055C}\u{055B}]".to_string(),
        );
        Self {
            url_detection: true,
            block_offensive_words: true,
            recommended_threshold: 0.11,
            enabled_locales: Vec::new(),
            cache_size: 50,
            max_concurrent_lookups: 2,
            suggestion_capacity: 18,
            emoji_capacity: 0,
            default_suggestions_limit: 5,
            script_punctuation,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Compile `script_punctuation` into per-script patterns.
    pub fn punctuation_patterns(&self) -> Result<BTreeMap<Script, Regex>> {
        let mut patterns = BTreeMap::new();
        for (name, pattern) in &self.script_punctuation {
            let script: Script = name
                .parse()
                .map_err(|_| Error::UnknownScript(name.clone()))?;
            let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
                script: name.clone(),
                source,
            })?;
            patterns.insert(script, regex);
        }
        Ok(patterns)
    }
}
