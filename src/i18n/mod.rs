// SPDX-License-Identifier: PMPL-1.0-or-later

//! Internationalisation for idiom-match.
//!
//! Two kinds of text are localized:
//!
//! - **Catalog text** (idioms, proverbs, stories) arrives from the data
//!   files as a [`LocalizedText`] with one field per language and is
//!   selected with [`localize`].
//! - **Game text** (prompts, feedback, timer labels) is embedded in
//!   [`catalog`] and looked up with [`t`].
//!
//! ## Supported languages
//!
//! | Code | Language | Native name |
//! |------|----------|-------------|
//! | en   | English  | English     |
//! | hi   | Hindi    | हिन्दी        |
//! | te   | Telugu   | తెలుగు       |
//! | ta   | Tamil    | தமிழ்        |
//! | kn   | Kannada  | ಕನ್ನಡ        |
//! | sa   | Sanskrit | संस्कृतम्     |
//!
//! Both lookups fall back to English, and only to English.

mod catalog;
mod iso639;

pub use catalog::{t, Lang};
pub use iso639::{language_name, native_name, parse_language, supported_codes};

use crate::types::LocalizedText;

/// Select the variant of `text` for `lang`.
///
/// Returns the English variant when the requested one is empty or
/// whitespace-only. There is no further fallback chain.
pub fn localize(text: &LocalizedText, lang: Lang) -> &str {
    let candidate = variant(text, lang);
    if candidate.trim().is_empty() {
        &text.en
    } else {
        candidate
    }
}

/// The raw variant of `text` for `lang`, without fallback.
pub fn variant(text: &LocalizedText, lang: Lang) -> &str {
    match lang {
        Lang::En => &text.en,
        Lang::Hi => &text.hi,
        Lang::Te => &text.te,
        Lang::Ta => &text.ta,
        Lang::Kn => &text.kn,
        Lang::Sa => &text.sa,
    }
}
