//! Writing-system classification.
//!
//! Each locale is written in one script; a spell-check session uses the script
//! of each candidate locale to decide which locale a typed word belongs to.

use std::fmt;
use std::str::FromStr;

use crate::locale::LocaleSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Script {
    Latin,
    Cyrillic,
    Greek,
    Armenian,
    Hebrew,
    Arabic,
    Georgian,
    Devanagari,
    Bengali,
    Gurmukhi,
    Gujarati,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Sinhala,
    Thai,
    Lao,
    Myanmar,
    Khmer,
    Hangul,
    Unknown,
}

const ALL_SCRIPTS: [Script; 22] = [
    Script::Latin,
    Script::Cyrillic,
    Script::Greek,
    Script::Armenian,
    Script::Hebrew,
    Script::Arabic,
    Script::Georgian,
    Script::Devanagari,
    Script::Bengali,
    Script::Gurmukhi,
    Script::Gujarati,
    Script::Tamil,
    Script::Telugu,
    Script::Kannada,
    Script::Malayalam,
    Script::Sinhala,
    Script::Thai,
    Script::Lao,
    Script::Myanmar,
    Script::Khmer,
    Script::Hangul,
    Script::Unknown,
];

impl Script {
    pub fn name(self) -> &'static str {
        match self {
            Script::Latin => "latin",
            Script::Cyrillic => "cyrillic",
            Script::Greek => "greek",
            Script::Armenian => "armenian",
            Script::Hebrew => "hebrew",
            Script::Arabic => "arabic",
            Script::Georgian => "georgian",
            Script::Devanagari => "devanagari",
            Script::Bengali => "bengali",
            Script::Gurmukhi => "gurmukhi",
            Script::Gujarati => "gujarati",
            Script::Tamil => "tamil",
            Script::Telugu => "telugu",
            Script::Kannada => "kannada",
            Script::Malayalam => "malayalam",
            Script::Sinhala => "sinhala",
            Script::Thai => "thai",
            Script::Lao => "lao",
            Script::Myanmar => "myanmar",
            Script::Khmer => "khmer",
            Script::Hangul => "hangul",
            Script::Unknown => "unknown",
        }
    }

    /// The script a locale is written in.
    ///
    /// An explicit `Latn`/`Cyrl` variant overrides the language default, and the
    /// `ZZ` pseudo-region marks a transliterated (Latin) layout such as `hi_ZZ`.
    pub fn for_locale(locale: &LocaleSpec) -> Script {
        match locale.variant() {
            Some(v) if v.eq_ignore_ascii_case("latn") => return Script::Latin,
            Some(v) if v.eq_ignore_ascii_case("cyrl") => return Script::Cyrillic,
            _ => {}
        }
        if locale.region() == Some("ZZ") {
            return Script::Latin;
        }
        match locale.language() {
            "be" | "bg" | "kk" | "ky" | "mk" | "mn" | "ru" | "sr" | "tg" | "tt" | "uk" | "ba" => {
                Script::Cyrillic
            }
            "el" => Script::Greek,
            "hy" => Script::Armenian,
            "he" | "iw" | "yi" => Script::Hebrew,
            "ar" | "fa" | "ur" | "ps" | "ckb" | "ug" | "sd" => Script::Arabic,
            "ka" => Script::Georgian,
            "hi" | "mr" | "ne" | "sa" => Script::Devanagari,
            "bn" | "as" => Script::Bengali,
            "pa" => Script::Gurmukhi,
            "gu" => Script::Gujarati,
            "ta" => Script::Tamil,
            "te" => Script::Telugu,
            "kn" => Script::Kannada,
            "ml" => Script::Malayalam,
            "si" => Script::Sinhala,
            "th" => Script::Thai,
            "lo" => Script::Lao,
            "my" => Script::Myanmar,
            "km" => Script::Khmer,
            "ko" => Script::Hangul,
            _ => Script::Latin,
        }
    }

    /// Whether `c` is a letter written in this script.
    ///
    /// Latin requires an alphabetic code point inside the Latin blocks; the other
    /// scripts accept their whole block so that combining vowel signs count.
    pub fn contains_letter(self, c: char) -> bool {
        let cp = c as u32;
        match self {
            Script::Latin => {
                c.is_alphabetic()
                    && (cp <= 0x2AF
                        || (0x1E00..=0x1EFF).contains(&cp)
                        || (0x2C60..=0x2C7F).contains(&cp)
                        || (0xA720..=0xA7FF).contains(&cp)
                        || (0xFB00..=0xFB06).contains(&cp))
            }
            Script::Cyrillic => {
                (0x0400..=0x052F).contains(&cp)
                    || (0x1C80..=0x1C8F).contains(&cp)
                    || (0x2DE0..=0x2DFF).contains(&cp)
                    || (0xA640..=0xA69F).contains(&cp)
            }
            Script::Greek => (0x0370..=0x03FF).contains(&cp) || (0x1F00..=0x1FFF).contains(&cp),
            Script::Armenian => {
                (0x0531..=0x0556).contains(&cp)
                    || cp == 0x0559
                    || (0x0560..=0x0588).contains(&cp)
                    || (0xFB13..=0xFB17).contains(&cp)
            }
            Script::Hebrew => (0x05D0..=0x05F2).contains(&cp) || (0xFB1D..=0xFB4F).contains(&cp),
            Script::Arabic => {
                (0x0600..=0x06FF).contains(&cp)
                    || (0x0750..=0x077F).contains(&cp)
                    || (0x08A0..=0x08FF).contains(&cp)
                    || (0xFB50..=0xFDFF).contains(&cp)
                    || (0xFE70..=0xFEFF).contains(&cp)
            }
            Script::Georgian => {
                (0x10A0..=0x10FF).contains(&cp)
                    || (0x1C90..=0x1CBF).contains(&cp)
                    || (0x2D00..=0x2D2F).contains(&cp)
            }
            Script::Devanagari => (0x0900..=0x097F).contains(&cp) || (0xA8E0..=0xA8FF).contains(&cp),
            Script::Bengali => (0x0980..=0x09FF).contains(&cp),
            Script::Gurmukhi => (0x0A00..=0x0A7F).contains(&cp),
            Script::Gujarati => (0x0A80..=0x0AFF).contains(&cp),
            Script::Tamil => (0x0B80..=0x0BFF).contains(&cp),
            Script::Telugu => (0x0C00..=0x0C7F).contains(&cp),
            Script::Kannada => (0x0C80..=0x0CFF).contains(&cp),
            Script::Malayalam => (0x0D00..=0x0D7F).contains(&cp),
            Script::Sinhala => (0x0D80..=0x0DFF).contains(&cp),
            Script::Thai => (0x0E00..=0x0E7F).contains(&cp),
            Script::Lao => (0x0E80..=0x0EFF).contains(&cp),
            Script::Myanmar => (0x1000..=0x109F).contains(&cp),
            Script::Khmer => (0x1780..=0x17FF).contains(&cp) || (0x19E0..=0x19FF).contains(&cp),
            Script::Hangul => {
                (0xAC00..=0xD7AF).contains(&cp)
                    || (0x1100..=0x11FF).contains(&cp)
                    || (0x3130..=0x318F).contains(&cp)
            }
            Script::Unknown => false,
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Script {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        ALL_SCRIPTS
            .iter()
            .copied()
            .find(|script| script.name() == s)
            .ok_or(())
    }
}
