//! Key-centre geometry handed to the decoder alongside a composition.

use ahash::AHashMap;

use crate::script::Script;

/// Coordinate value for a code point with no key on the layout.
pub const NOT_A_COORDINATE: i32 = -1;

const KEY_WIDTH: i32 = 100;
const KEY_HEIGHT: i32 = 150;

/// Rows of a staggered layout; each row is shifted right by half a key.
const QWERTY_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];
const JCUKEN_ROWS: [&str; 3] = ["йцукенгшщзхъ", "фывапролджэ", "ячсмитьбю"];
const GREEK_ROWS: [&str; 3] = [";ςερτυθιοπ", "ασδφγηξκλ", "ζχψωβνμ"];

#[derive(Debug, Clone, Default)]
pub struct KeyboardLayout {
    keys: AHashMap<char, (i32, i32)>,
}

impl KeyboardLayout {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_rows(rows: &[&str]) -> Self {
        let mut layout = Self::new();
        for (row, keys) in rows.iter().enumerate() {
            let row = row as i32;
            let offset = row * KEY_WIDTH / 2;
            for (col, c) in keys.chars().enumerate() {
                let x = offset + col as i32 * KEY_WIDTH + KEY_WIDTH / 2;
                let y = row * KEY_HEIGHT + KEY_HEIGHT / 2;
                layout.keys.insert(c, (x, y));
            }
        }
        layout
    }

    pub fn qwerty() -> Self {
        Self::from_rows(&QWERTY_ROWS)
    }

    /// Default layout for a script; scripts without one get an empty layout,
    /// so every code point maps to [`NOT_A_COORDINATE`].
    pub fn for_script(script: Script) -> Self {
        match script {
            Script::Latin => Self::from_rows(&QWERTY_ROWS),
            Script::Cyrillic => Self::from_rows(&JCUKEN_ROWS),
            Script::Greek => Self::from_rows(&GREEK_ROWS),
            _ => Self::new(),
        }
    }

    pub fn with_key(mut self, c: char, x: i32, y: i32) -> Self {
        self.keys.insert(c, (x, y));
        self
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Centre of the key producing `c`, matched case-insensitively.
    pub fn key_center(&self, c: char) -> Option<(i32, i32)> {
        self.keys.get(&c).copied().or_else(|| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => self.keys.get(&l).copied(),
                _ => None,
            }
        })
    }

    /// One coordinate pair per code point of `text`.
    pub fn coordinates(&self, text: &str) -> Vec<(i32, i32)> {
        text.chars()
            .map(|c| {
                self.key_center(c)
                    .unwrap_or((NOT_A_COORDINATE, NOT_A_COORDINATE))
            })
            .collect()
    }
}
