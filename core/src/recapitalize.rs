//! Recapitalization: cycling a selected span through capitalization variants.
//!
//! Each invocation of the recapitalize action either starts a new status for the
//! current selection or rotates the existing one to the next mode. Transforms
//! are always applied to the text as it was when the status started.
//! Cursor offsets are counted in code points.

use crate::casing::{
    capitalize_each_word, is_identical_after_capitalize_each_word, is_identical_after_downcase,
    is_identical_after_upcase, to_lower, to_upper,
};
use crate::locale::LocaleSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecapitalizeMode {
    OriginalMixedCase,
    AllLower,
    FirstWordUpper,
    AllUpper,
}

/// Rotation order; the index into this array is the status' position.
const ROTATION_STYLE: [RecapitalizeMode; 4] = [
    RecapitalizeMode::OriginalMixedCase,
    RecapitalizeMode::AllLower,
    RecapitalizeMode::FirstWordUpper,
    RecapitalizeMode::AllUpper,
];

/// Transform `original` into `mode`.
pub fn apply(
    mode: RecapitalizeMode,
    original: &str,
    sorted_separators: &[char],
    locale: Option<&LocaleSpec>,
) -> String {
    match mode {
        RecapitalizeMode::OriginalMixedCase => original.to_string(),
        RecapitalizeMode::AllLower => to_lower(original, locale),
        RecapitalizeMode::FirstWordUpper => capitalize_each_word(original, sorted_separators, locale),
        RecapitalizeMode::AllUpper => to_upper(original, locale),
    }
}

/// The mode whose transform reproduces `text` unchanged.
fn mode_of(text: &str, sorted_separators: &[char]) -> RecapitalizeMode {
    if is_identical_after_upcase(text) {
        RecapitalizeMode::AllUpper
    } else if is_identical_after_downcase(text) {
        RecapitalizeMode::AllLower
    } else if is_identical_after_capitalize_each_word(text, sorted_separators) {
        RecapitalizeMode::FirstWordUpper
    } else {
        RecapitalizeMode::OriginalMixedCase
    }
}

#[derive(Debug, Clone)]
pub struct RecapitalizeStatus {
    cursor_start_before: usize,
    string_before: String,
    cursor_start_after: usize,
    cursor_end_after: usize,
    string_after: String,
    rotation_index: usize,
    skip_original_mixed_case: bool,
    locale: Option<LocaleSpec>,
    sorted_separators: Vec<char>,
    is_started: bool,
    is_enabled: bool,
}

impl RecapitalizeStatus {
    pub fn new() -> Self {
        Self {
            cursor_start_before: 0,
            string_before: String::new(),
            cursor_start_after: 0,
            cursor_end_after: 0,
            string_after: String::new(),
            rotation_index: 0,
            skip_original_mixed_case: false,
            locale: None,
            sorted_separators: Vec::new(),
            is_started: false,
            is_enabled: true,
        }
    }

    /// Begin a status for `text` selected at `cursor_start..cursor_end`.
    ///
    /// No-op while disabled.
    pub fn start(
        &mut self,
        cursor_start: usize,
        cursor_end: usize,
        text: &str,
        locale: Option<&LocaleSpec>,
        sorted_separators: &[char],
    ) {
        if !self.is_enabled {
            return;
        }
        self.cursor_start_before = cursor_start;
        self.string_before = text.to_string();
        self.cursor_start_after = cursor_start;
        self.cursor_end_after = cursor_end;
        self.string_after = text.to_string();
        self.locale = locale.cloned();
        self.sorted_separators = sorted_separators.to_vec();

        let initial_mode = mode_of(text, sorted_separators);
        if initial_mode == RecapitalizeMode::OriginalMixedCase {
            self.rotation_index = 0;
            self.skip_original_mixed_case = false;
        } else {
            self.rotation_index = ROTATION_STYLE
                .iter()
                .rposition(|&m| m == initial_mode)
                .unwrap_or(0);
            self.skip_original_mixed_case = true;
        }
        tracing::debug!(
            mode = ?initial_mode,
            skip_mixed = self.skip_original_mixed_case,
            "recapitalize started"
        );
        self.is_started = true;
    }

    pub fn stop(&mut self) {
        self.is_started = false;
    }

    pub fn is_started(&self) -> bool {
        self.is_started
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    pub fn enable(&mut self) {
        self.is_enabled = true;
    }

    pub fn disable(&mut self) {
        self.is_enabled = false;
    }

    /// Whether the current result occupies exactly `cursor_start..cursor_end`.
    pub fn is_set_at(&self, cursor_start: usize, cursor_end: usize) -> bool {
        cursor_start == self.cursor_start_after && cursor_end == self.cursor_end_after
    }

    /// Advance to the next mode that changes the visible text.
    ///
    /// Gives up after one full cycle plus one step when every mode yields the
    /// same text (digits, symbols).
    pub fn rotate(&mut self) {
        let old_result = std::mem::take(&mut self.string_after);
        let mut count = 0;
        loop {
            self.rotation_index = (self.rotation_index + 1) % ROTATION_STYLE.len();
            if self.skip_original_mixed_case
                && ROTATION_STYLE[self.rotation_index] == RecapitalizeMode::OriginalMixedCase
            {
                self.rotation_index = (self.rotation_index + 1) % ROTATION_STYLE.len();
            }
            count += 1;
            self.string_after = apply(
                ROTATION_STYLE[self.rotation_index],
                &self.string_before,
                &self.sorted_separators,
                self.locale.as_ref(),
            );
            if self.string_after != old_result || count >= ROTATION_STYLE.len() + 1 {
                break;
            }
        }
        self.cursor_end_after = self.cursor_start_after + self.string_after.chars().count();
    }

    /// Drop leading and trailing whitespace from the considered span.
    ///
    /// A span made only of whitespace is left as it is.
    pub fn trim(&mut self) {
        let chars: Vec<char> = self.string_before.chars().collect();
        let len = chars.len();
        let start = chars.iter().position(|c| !c.is_whitespace()).unwrap_or(len);
        let end = chars
            .iter()
            .rposition(|c| !c.is_whitespace())
            .map_or(0, |i| i + 1);
        if (start != 0 || end != len) && start < end {
            self.cursor_end_after = self.cursor_start_before + end;
            self.cursor_start_before += start;
            self.cursor_start_after = self.cursor_start_before;
            self.string_before = chars[start..end].iter().collect();
            self.string_after = self.string_before.clone();
        }
    }

    pub fn current_mode(&self) -> RecapitalizeMode {
        ROTATION_STYLE[self.rotation_index]
    }

    pub fn recapitalized_string(&self) -> &str {
        &self.string_after
    }

    pub fn new_cursor_start(&self) -> usize {
        self.cursor_start_after
    }

    pub fn new_cursor_end(&self) -> usize {
        self.cursor_end_after
    }
}

impl Default for RecapitalizeStatus {
    fn default() -> Self {
        Self::new()
    }
}
