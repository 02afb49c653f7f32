// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation catalog for idiom-match.
//!
//! Embeds the game's own prompts and labels for the six play languages as
//! a compile-time static table. Lookup is O(n) on the key list per
//! language; there are only a couple dozen keys and lookups happen once
//! per rendered frame at most.
//!
//! Catalog entry text (idioms, proverbs, stories) does not live here; it
//! comes from the data files and is selected with [`super::localize`].
//!
//! ## Adding a new language
//!
//! 1. Add a variant to [`Lang`]
//! 2. Add arms to `Lang::code()` and `Lang::from_code()`
//! 3. Add a field to [`crate::types::LocalizedText`] and an arm to `localize`
//! 4. Create a `const XX: &[(&str, &str)]` table below
//! 5. Add `Lang::Xx => XX` to the match in `catalog_for()`
//!
//! ## Adding a new key
//!
//! 1. Add the English entry to `EN`
//! 2. Add translations to the other tables (missing keys fall back to English)

use serde::{Deserialize, Serialize};

/// Supported play languages.
///
/// Each variant maps to an ISO 639-1 two-letter code. [`Lang::all`] lists
/// them in the game's dropdown order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Hi,
    Te,
    Ta,
    Kn,
    Sa,
}

impl Lang {
    /// ISO 639-1 two-letter code for this language.
    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Hi => "hi",
            Lang::Te => "te",
            Lang::Ta => "ta",
            Lang::Kn => "kn",
            Lang::Sa => "sa",
        }
    }

    /// Parse an ISO 639-1 code into a supported language.
    ///
    /// Returns `None` for unsupported codes. Case-sensitive (codes must be
    /// lowercase per ISO 639-1).
    pub fn from_code(code: &str) -> Option<Lang> {
        match code {
            "en" => Some(Lang::En),
            "hi" => Some(Lang::Hi),
            "te" => Some(Lang::Te),
            "ta" => Some(Lang::Ta),
            "kn" => Some(Lang::Kn),
            "sa" => Some(Lang::Sa),
            _ => None,
        }
    }

    /// All supported languages, in dropdown order.
    pub fn all() -> &'static [Lang] {
        &[Lang::En, Lang::Hi, Lang::Te, Lang::Ta, Lang::Kn, Lang::Sa]
    }

    /// The next language in dropdown order, wrapping around.
    pub fn next(&self) -> Lang {
        let all = Self::all();
        let pos = all.iter().position(|l| l == self).unwrap_or(0);
        all[(pos + 1) % all.len()]
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ─── Translation Lookup ─────────────────────────────────────────────

/// Look up a translation key in the specified language.
///
/// Falls back to English if the key is not found in the requested language.
/// If the key is missing in English too, returns `""`.
///
/// # Examples
///
/// ```
/// use idiom_match::i18n::{t, Lang};
/// assert_eq!(t(Lang::En, "feedback.correct"), "Correct!");
/// assert_eq!(t(Lang::Hi, "feedback.correct"), "सही!");
/// ```
pub fn t(lang: Lang, key: &str) -> &'static str {
    if let Some(value) = lookup(catalog_for(lang), key) {
        return value;
    }
    if lang != Lang::En {
        if let Some(value) = lookup(EN, key) {
            return value;
        }
    }
    ""
}

fn lookup(catalog: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    for &(k, v) in catalog {
        if k == key {
            return Some(v);
        }
    }
    None
}

fn catalog_for(lang: Lang) -> &'static [(&'static str, &'static str)] {
    match lang {
        Lang::En => EN,
        Lang::Hi => HI,
        Lang::Te => TE,
        Lang::Ta => TA,
        Lang::Kn => KN,
        Lang::Sa => SA,
    }
}

// ─── English (source language, all keys defined here) ──────────────

const EN: &[(&str, &str)] = &[
    // Prompts
    ("prompt.pick_idiom", "Elder: Pick an idiom."),
    ("prompt.pick_proverb", "Child: Pick the matching proverb."),
    ("prompt.idiom_first", "Please pick an idiom first."),
    // Feedback
    ("feedback.correct", "Correct!"),
    ("feedback.wrong", "Wrong Match!"),
    ("feedback.correct_label", "Correct"),
    ("feedback.try_again", "Try again!"),
    ("round.congrats", "Congratulations! You matched all {n} cards!"),
    ("story.continue", "Press Enter to continue"),
    // Timer
    ("timer.label", "Time"),
    ("timer.total", "Total"),
    // Summary
    ("summary.title", "Session Summary"),
    ("summary.rounds", "Rounds completed"),
    ("summary.matches", "Correct matches"),
    ("summary.mistakes", "Wrong matches"),
    ("summary.total_time", "Total play time"),
];

// ─── Hindi ──────────────────────────────────────────────────────────

const HI: &[(&str, &str)] = &[
    ("prompt.pick_idiom", "बुज़ुर्ग: एक मुहावरा चुनें।"),
    ("prompt.pick_proverb", "बच्चा: मिलती-जुलती कहावत चुनें।"),
    ("prompt.idiom_first", "कृपया पहले एक मुहावरा चुनें।"),
    ("feedback.correct", "सही!"),
    ("feedback.wrong", "गलत जोड़ी!"),
    ("feedback.correct_label", "सही"),
    ("feedback.try_again", "फिर से कोशिश करें!"),
    ("round.congrats", "बधाई हो! आपने सभी {n} कार्ड मिला लिए!"),
    ("story.continue", "आगे बढ़ने के लिए Enter दबाएँ"),
    ("timer.label", "समय"),
    ("timer.total", "कुल"),
    ("summary.title", "सत्र सारांश"),
    ("summary.rounds", "पूरे किए गए दौर"),
    ("summary.matches", "सही जोड़ियाँ"),
    ("summary.mistakes", "गलत जोड़ियाँ"),
    ("summary.total_time", "कुल खेल समय"),
];

// ─── Telugu ─────────────────────────────────────────────────────────

const TE: &[(&str, &str)] = &[
    ("prompt.pick_idiom", "పెద్దలు: ఒక జాతీయాన్ని ఎంచుకోండి."),
    ("prompt.pick_proverb", "పిల్లవాడు: సరిపోయే సామెతను ఎంచుకోండి."),
    ("prompt.idiom_first", "దయచేసి ముందుగా ఒక జాతీయాన్ని ఎంచుకోండి."),
    ("feedback.correct", "సరైనది!"),
    ("feedback.wrong", "తప్పు జత!"),
    ("feedback.correct_label", "సరైనది"),
    ("feedback.try_again", "మళ్ళీ ప్రయత్నించండి!"),
    ("round.congrats", "అభినందనలు! మీరు మొత్తం {n} కార్డులను జత చేశారు!"),
    ("timer.label", "సమయం"),
    ("timer.total", "మొత్తం"),
];

// ─── Tamil ──────────────────────────────────────────────────────────

const TA: &[(&str, &str)] = &[
    ("prompt.pick_idiom", "பெரியவர்: ஒரு மரபுத்தொடரைத் தேர்ந்தெடுக்கவும்."),
    ("prompt.pick_proverb", "குழந்தை: பொருந்தும் பழமொழியைத் தேர்ந்தெடுக்கவும்."),
    ("prompt.idiom_first", "முதலில் ஒரு மரபுத்தொடரைத் தேர்ந்தெடுக்கவும்."),
    ("feedback.correct", "சரி!"),
    ("feedback.wrong", "தவறான பொருத்தம்!"),
    ("feedback.correct_label", "சரியானது"),
    ("feedback.try_again", "மீண்டும் முயற்சிக்கவும்!"),
    ("round.congrats", "வாழ்த்துகள்! நீங்கள் அனைத்து {n} அட்டைகளையும் பொருத்திவிட்டீர்கள்!"),
    ("timer.label", "நேரம்"),
    ("timer.total", "மொத்தம்"),
];

// ─── Kannada ────────────────────────────────────────────────────────

const KN: &[(&str, &str)] = &[
    ("prompt.pick_idiom", "ಹಿರಿಯರು: ಒಂದು ನುಡಿಗಟ್ಟನ್ನು ಆಯ್ಕೆಮಾಡಿ."),
    ("prompt.pick_proverb", "ಮಗು: ಹೊಂದುವ ಗಾದೆಯನ್ನು ಆಯ್ಕೆಮಾಡಿ."),
    ("prompt.idiom_first", "ದಯವಿಟ್ಟು ಮೊದಲು ಒಂದು ನುಡಿಗಟ್ಟನ್ನು ಆಯ್ಕೆಮಾಡಿ."),
    ("feedback.correct", "ಸರಿ!"),
    ("feedback.wrong", "ತಪ್ಪು ಜೋಡಿ!"),
    ("feedback.correct_label", "ಸರಿಯಾದದ್ದು"),
    ("feedback.try_again", "ಮತ್ತೆ ಪ್ರಯತ್ನಿಸಿ!"),
    ("round.congrats", "ಅಭಿನಂದನೆಗಳು! ನೀವು ಎಲ್ಲಾ {n} ಕಾರ್ಡ್‌ಗಳನ್ನು ಹೊಂದಿಸಿದ್ದೀರಿ!"),
    ("timer.label", "ಸಮಯ"),
    ("timer.total", "ಒಟ್ಟು"),
];

// ─── Sanskrit ───────────────────────────────────────────────────────

const SA: &[(&str, &str)] = &[
    ("prompt.pick_idiom", "वृद्धः: एकं वाक्प्रयोगं चिनोतु।"),
    ("prompt.pick_proverb", "बालः: समानं सुभाषितं चिनोतु।"),
    ("feedback.correct", "साधु!"),
    ("feedback.wrong", "अयुक्तं युग्मम्!"),
    ("feedback.try_again", "पुनः प्रयतताम्!"),
    ("timer.label", "समयः"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_keys_all_resolve() {
        for &(key, _) in EN {
            for lang in Lang::all() {
                let result = t(*lang, key);
                assert!(!result.is_empty(), "{:?} key '{}' should resolve", lang, key);
            }
        }
    }

    #[test]
    fn translated_prompts_differ_from_english() {
        for lang in [Lang::Hi, Lang::Te, Lang::Ta, Lang::Kn, Lang::Sa] {
            assert_ne!(
                t(lang, "prompt.pick_idiom"),
                t(Lang::En, "prompt.pick_idiom"),
                "{:?} should translate the idiom prompt",
                lang
            );
        }
    }

    #[test]
    fn fallback_to_english() {
        // Sanskrit has no summary labels yet
        assert_eq!(t(Lang::Sa, "summary.title"), "Session Summary");
        assert_eq!(t(Lang::Te, "story.continue"), "Press Enter to continue");
    }

    #[test]
    fn no_table_defines_unknown_keys() {
        for table in [HI, TE, TA, KN, SA] {
            for &(key, _) in table {
                assert!(lookup(EN, key).is_some(), "'{}' missing from EN", key);
            }
        }
    }

    #[test]
    fn unknown_key_returns_empty() {
        assert_eq!(t(Lang::En, "nonexistent.key"), "");
        assert_eq!(t(Lang::Hi, "nonexistent.key"), "");
    }

    #[test]
    fn lang_roundtrip() {
        for lang in Lang::all() {
            let parsed = Lang::from_code(lang.code()).expect("should parse");
            assert_eq!(*lang, parsed);
        }
        assert_eq!(Lang::from_code("EN"), None);
    }

    #[test]
    fn dropdown_order_and_cycling() {
        assert_eq!(Lang::all().first(), Some(&Lang::En));
        assert_eq!(Lang::all().last(), Some(&Lang::Sa));
        assert_eq!(Lang::En.next(), Lang::Hi);
        assert_eq!(Lang::Sa.next(), Lang::En);
    }
}
