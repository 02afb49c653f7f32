// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core data types: localized text, catalog entries and story modes.

use serde::{Deserialize, Serialize};

/// One phrase in each of the six supported languages.
///
/// Missing fields deserialize to empty strings. An entry is only usable
/// when its English (default) variant is non-blank; see [`Entry::is_usable`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizedText {
    pub en: String,
    pub hi: String,
    pub te: String,
    pub ta: String,
    pub kn: String,
    pub sa: String,
}

impl LocalizedText {
    /// English-only text; the other variants stay empty.
    pub fn english(text: impl Into<String>) -> Self {
        Self {
            en: text.into(),
            ..Self::default()
        }
    }

    /// The default-language (English) variant.
    pub fn default_text(&self) -> &str {
        &self.en
    }

    pub fn is_blank(&self) -> bool {
        self.en.trim().is_empty()
    }
}

/// An idiom, its matching proverb and the story that explains both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "idioms", default)]
    pub idiom: LocalizedText,
    #[serde(rename = "proverbs", default)]
    pub proverb: LocalizedText,
    #[serde(rename = "stories", default)]
    pub story: LocalizedText,
}

impl Entry {
    pub fn is_usable(&self) -> bool {
        !self.idiom.is_blank()
    }
}

/// Which story collection to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoryMode {
    Ramayan,
    #[default]
    Mahabharat,
    Casual,
}

impl StoryMode {
    /// Catalog file name for this mode, relative to the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            StoryMode::Ramayan => "ramayan_fixed.json",
            StoryMode::Mahabharat => "mahabhart_fixed.json",
            StoryMode::Casual => "Casual_fixed.json",
        }
    }

    pub fn all() -> &'static [StoryMode] {
        &[StoryMode::Ramayan, StoryMode::Mahabharat, StoryMode::Casual]
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ramayan" | "ramayana" => Some(StoryMode::Ramayan),
            "mahabharat" | "mahabharata" => Some(StoryMode::Mahabharat),
            "casual" => Some(StoryMode::Casual),
            _ => None,
        }
    }
}

impl std::fmt::Display for StoryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StoryMode::Ramayan => "ramayan",
            StoryMode::Mahabharat => "mahabharat",
            StoryMode::Casual => "casual",
        };
        write!(f, "{}", name)
    }
}
