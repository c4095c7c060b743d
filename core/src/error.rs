//! Error type for the fallible parts of the core (configuration, locale parsing,
//! word-list loading).
//!
//! The spell-check pipeline itself never returns these to its caller: faults there
//! degrade to an empty "not in dictionary" decision.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid locale string {0:?}")]
    InvalidLocale(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    #[error("invalid punctuation pattern for script {script}: {source}")]
    InvalidPattern {
        script: String,
        #[source]
        source: regex::Error,
    },
    #[error("unknown script name {0:?}")]
    UnknownScript(String),
    #[error("word list line {line}: {reason}")]
    WordList { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
