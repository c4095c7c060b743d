use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use keyspell_core::{
    match_level_str, ngram_context, ChangeNotifier, Config, Decision, LocaleSpec, Punctuation,
    RecapitalizeStatus, SpellChecker, WordInfo, WordListDictionary,
};
use serde::Serialize;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keyspell")]
#[command(about = "Spell checking, word context and recapitalization for keyboard text")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DictArgs {
    /// Word list for a locale, as LOCALE=PATH (repeatable)
    #[arg(long = "dict", value_name = "LOCALE=PATH", value_parser = parse_dict, required = true)]
    dicts: Vec<(LocaleSpec, PathBuf)>,

    /// Preferred session locale
    #[arg(long)]
    locale: Option<LocaleSpec>,

    /// Maximum suggestions per word
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check words; reads one word per line from stdin when none are given
    Check {
        #[command(flatten)]
        dict: DictArgs,
        words: Vec<String>,
    },
    /// Check every word of a sentence
    Sentence {
        #[command(flatten)]
        dict: DictArgs,
        text: String,
    },
    /// Show the previous-word context for text before the cursor
    Context {
        text: String,
        /// Which word before the cursor to build the context for
        #[arg(short, long, default_value_t = 1)]
        n: usize,
        #[arg(long)]
        locale: Option<LocaleSpec>,
    },
    /// Cycle a selection through its capitalization variants
    Recap {
        text: String,
        /// Number of rotations to print
        #[arg(long, default_value_t = 3)]
        times: usize,
        #[arg(long)]
        locale: Option<LocaleSpec>,
    },
    /// Grade candidate locales against a required locale
    Match {
        required: String,
        candidates: Vec<String>,
    },
}

fn parse_dict(s: &str) -> std::result::Result<(LocaleSpec, PathBuf), String> {
    let (locale, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected LOCALE=PATH, got {:?}", s))?;
    let locale = locale.parse::<LocaleSpec>().map_err(|e| e.to_string())?;
    Ok((locale, PathBuf::from(path)))
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_toml(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn build_checker(config: Config, args: &DictArgs) -> Result<SpellChecker> {
    let notifier = ChangeNotifier::new();
    let dictionary = WordListDictionary::new().with_notifier(notifier.clone());
    for (locale, path) in &args.dicts {
        let count = dictionary
            .load_file(locale, path)
            .with_context(|| format!("loading word list for {}", locale))?;
        tracing::info!(%locale, count, path = %path.display(), "word list loaded");
    }
    Ok(SpellChecker::new(Arc::new(dictionary), config, notifier)?)
}

fn describe(decision: &Decision) -> String {
    match decision {
        Decision::Unremarkable => "unremarkable".to_string(),
        Decision::InDictionary => "ok".to_string(),
        Decision::NotInDictionary {
            suggestions,
            recommended,
        } => {
            let marker = if *recommended { " (recommended)" } else { "" };
            if suggestions.is_empty() {
                "misspelled, no suggestions".to_string()
            } else {
                format!("misspelled -> {}{}", suggestions.join(", "), marker)
            }
        }
    }
}

#[derive(Serialize)]
struct WordResult<'a> {
    word: &'a str,
    #[serde(flatten)]
    decision: &'a Decision,
}

fn handle_check(config: Config, dict: &DictArgs, words: &[String], json: bool) -> Result<()> {
    let limit = dict.limit.unwrap_or(config.default_suggestions_limit);
    let checker = build_checker(config, dict)?;
    let session = checker.new_session(dict.locale.as_ref());

    let report = |word: &str| -> Result<()> {
        let decision = session.check(word, None, limit);
        if json {
            let line = serde_json::to_string(&WordResult {
                word,
                decision: &decision,
            })?;
            println!("{}", line);
        } else {
            println!("{}: {}", word, describe(&decision));
        }
        Ok(())
    };

    if words.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("reading stdin")?;
            let word = line.trim();
            if !word.is_empty() {
                report(word)?;
            }
        }
    } else {
        for word in words {
            report(word.as_str())?;
        }
    }

    let (hits, misses) = session.cache().stats();
    tracing::debug!(hits, misses, "cache statistics");
    Ok(())
}

fn handle_sentence(config: Config, dict: &DictArgs, text: &str, json: bool) -> Result<()> {
    let limit = dict.limit.unwrap_or(config.default_suggestions_limit);
    let checker = build_checker(config, dict)?;
    let session = checker.new_session(dict.locale.as_ref());
    let spans = session.check_sentence(text, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&spans)?);
        return Ok(());
    }
    let chars: Vec<char> = text.chars().collect();
    for span in &spans {
        let word: String = chars[span.start..span.start + span.length].iter().collect();
        println!("{:>4} {}: {}", span.start, word, describe(&span.decision));
    }
    Ok(())
}

fn slot_label(slot: &WordInfo) -> String {
    match slot {
        WordInfo::Empty => "<empty>".to_string(),
        WordInfo::BeginningOfSentence => "<bos>".to_string(),
        WordInfo::Word(word) => word.clone(),
    }
}

fn handle_context(text: &str, n: usize, locale: Option<&LocaleSpec>, json: bool) -> Result<()> {
    let punctuation = Punctuation::for_locale(locale);
    let context = ngram_context::extract(Some(text), &punctuation, n);
    if json {
        let slots: Vec<String> = context.slots().iter().map(slot_label).collect();
        println!("{}", serde_json::to_string(&slots)?);
    } else {
        println!("{}", context);
    }
    Ok(())
}

#[derive(Serialize)]
struct RecapStep {
    mode: String,
    text: String,
    cursor_start: usize,
    cursor_end: usize,
}

fn handle_recap(text: &str, times: usize, locale: Option<&LocaleSpec>, json: bool) -> Result<()> {
    let punctuation = Punctuation::for_locale(locale);
    let mut status = RecapitalizeStatus::new();
    status.start(
        0,
        text.chars().count(),
        text,
        locale,
        punctuation.sorted_word_separators(),
    );

    let mut steps = Vec::with_capacity(times);
    for _ in 0..times {
        status.rotate();
        steps.push(RecapStep {
            mode: format!("{:?}", status.current_mode()),
            text: status.recapitalized_string().to_string(),
            cursor_start: status.new_cursor_start(),
            cursor_end: status.new_cursor_end(),
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&steps)?);
    } else {
        for step in &steps {
            println!("{:<18} {}", step.mode, step.text);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct MatchRow<'a> {
    candidate: &'a str,
    level: u8,
    strong: bool,
}

fn handle_match(required: &str, candidates: &[String], json: bool) -> Result<()> {
    let rows: Vec<MatchRow> = candidates
        .iter()
        .map(|candidate| {
            let level = match_level_str(required, candidate);
            MatchRow {
                candidate,
                level: level.value(),
                strong: level.is_strong(),
            }
        })
        .collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            let strength = if row.strong { "strong" } else { "weak" };
            println!("{:<16} {:>2} {}", row.candidate, row.level, strength);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Check { dict, words } => {
            let config = load_config(cli.config.as_ref())?;
            handle_check(config, dict, words, cli.json)
        }
        Commands::Sentence { dict, text } => {
            let config = load_config(cli.config.as_ref())?;
            handle_sentence(config, dict, text, cli.json)
        }
        Commands::Context { text, n, locale } => handle_context(text, *n, locale.as_ref(), cli.json),
        Commands::Recap {
            text,
            times,
            locale,
        } => handle_recap(text, *times, locale.as_ref(), cli.json),
        Commands::Match {
            required,
            candidates,
        } => handle_match(required, candidates, cli.json),
    }
}
