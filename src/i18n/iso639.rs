// SPDX-License-Identifier: PMPL-1.0-or-later

//! ISO 639-1 metadata for the play languages.
//!
//! Reference: <https://www.loc.gov/standards/iso639-2/php/code_list.php>

use super::Lang;

/// Returns the English name of a supported ISO 639-1 code.
pub fn language_name(code: &str) -> Option<&'static str> {
    match code {
        "en" => Some("English"),
        "hi" => Some("Hindi"),
        "te" => Some("Telugu"),
        "ta" => Some("Tamil"),
        "kn" => Some("Kannada"),
        "sa" => Some("Sanskrit"),
        _ => None,
    }
}

/// Returns the native name of a supported ISO 639-1 code.
///
/// Used in the language picker so players see their language written in
/// its own script.
pub fn native_name(code: &str) -> Option<&'static str> {
    match code {
        "en" => Some("English"),
        "hi" => Some("हिन्दी"),
        "te" => Some("తెలుగు"),
        "ta" => Some("தமிழ்"),
        "kn" => Some("ಕನ್ನಡ"),
        "sa" => Some("संस्कृतम्"),
        _ => None,
    }
}

/// Parse a language given either as a code or an English name.
///
/// Accepts any case for names (`"Hindi"`, `"hindi"`) but codes must be
/// lowercase, as in [`Lang::from_code`].
pub fn parse_language(value: &str) -> Option<Lang> {
    let trimmed = value.trim();
    Lang::from_code(trimmed).or_else(|| {
        Lang::all()
            .iter()
            .copied()
            .find(|lang| {
                language_name(lang.code())
                    .map(|name| name.eq_ignore_ascii_case(trimmed))
                    .unwrap_or(false)
            })
    })
}

/// Comma-separated list of supported codes, for error messages.
pub fn supported_codes() -> String {
    Lang::all()
        .iter()
        .map(|lang| lang.code())
        .collect::<Vec<_>>()
        .join(", ")
}
