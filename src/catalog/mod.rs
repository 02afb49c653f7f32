// SPDX-License-Identifier: PMPL-1.0-or-later

//! Entry catalog loading and data-quality inspection.
//!
//! A catalog is loaded once per story mode and shared read-only with every
//! round built from it. Entries are reference-counted so that a round can
//! hold its pairs while the session keeps the catalog, and so that match
//! judging can compare entries by identity.

use crate::error::{DataLoadError, Result};
use crate::i18n::{localize, variant, Lang};
use crate::types::{Entry, LocalizedText, StoryMode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    entries: Vec<Entry>,
}

/// Ordered, immutable list of entries for one story mode.
#[derive(Debug, Clone)]
pub struct EntryCatalog {
    source: PathBuf,
    mode: Option<StoryMode>,
    entries: Vec<Arc<Entry>>,
}

impl EntryCatalog {
    /// Build a catalog from in-memory entries.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self {
            source: PathBuf::from("<memory>"),
            mode: None,
            entries: entries.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn entries(&self) -> &[Arc<Entry>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn mode(&self) -> Option<StoryMode> {
        self.mode
    }
}

/// Path of the catalog file for `mode` under `data_dir`.
pub fn catalog_path(data_dir: &Path, mode: StoryMode) -> PathBuf {
    data_dir.join(mode.file_name())
}

/// Load the catalog for a story mode from the data directory.
pub fn load_catalog(data_dir: &Path, mode: StoryMode) -> Result<EntryCatalog> {
    let path = catalog_path(data_dir, mode);
    let mut catalog = load_catalog_file(&path)?;
    catalog.mode = Some(mode);
    Ok(catalog)
}

/// Load a catalog document from an explicit path.
///
/// `.yaml`/`.yml` files are parsed as YAML, everything else as JSON.
pub fn load_catalog_file(path: &Path) -> Result<EntryCatalog> {
    if !path.exists() {
        return Err(DataLoadError::NotFound(path.to_path_buf()).into());
    }
    let content = fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    );
    let document: CatalogDocument = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| DataLoadError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    } else {
        serde_json::from_str(&content).map_err(|e| DataLoadError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    };

    if document.entries.is_empty() {
        return Err(DataLoadError::Empty(path.to_path_buf()).into());
    }

    info!(
        path = %path.display(),
        entries = document.entries.len(),
        "loaded entry catalog"
    );

    Ok(EntryCatalog {
        source: path.to_path_buf(),
        mode: None,
        entries: document.entries.into_iter().map(Arc::new).collect(),
    })
}

/// Data-quality findings for a catalog in one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogInspection {
    pub source: PathBuf,
    pub language: Lang,
    pub total_entries: usize,
    pub usable_entries: usize,
    pub unique_idioms: usize,
    /// Entries whose chosen-language text is missing and falls back to English,
    /// counted per field.
    pub missing_idioms: usize,
    pub missing_proverbs: usize,
    pub missing_stories: usize,
    /// Localized proverb texts shared by more than one entry, with the
    /// indexes of those entries.
    pub duplicate_proverbs: BTreeMap<String, Vec<usize>>,
    /// The most slots a round can have in this language.
    pub max_slots: usize,
}

impl CatalogInspection {
    pub fn has_findings(&self) -> bool {
        self.usable_entries < self.total_entries
            || !self.duplicate_proverbs.is_empty()
            || self.missing_idioms + self.missing_proverbs + self.missing_stories > 0
    }
}

/// Inspect `catalog` as it would be played in `lang`.
pub fn inspect_catalog(catalog: &EntryCatalog, lang: Lang) -> CatalogInspection {
    let mut usable = 0usize;
    let mut idioms = HashSet::new();
    let mut missing_idioms = 0usize;
    let mut missing_proverbs = 0usize;
    let mut missing_stories = 0usize;
    let mut proverb_owners: BTreeMap<String, Vec<usize>> = BTreeMap::new();

    for (index, entry) in catalog.entries().iter().enumerate() {
        if entry.is_usable() {
            usable += 1;
            idioms.insert(entry.idiom.default_text().to_string());
        }
        if lang != Lang::En {
            if is_missing(&entry.idiom, lang) {
                missing_idioms += 1;
            }
            if is_missing(&entry.proverb, lang) {
                missing_proverbs += 1;
            }
            if is_missing(&entry.story, lang) {
                missing_stories += 1;
            }
        }
        proverb_owners
            .entry(localize(&entry.proverb, lang).to_string())
            .or_default()
            .push(index);
    }

    let duplicate_proverbs: BTreeMap<String, Vec<usize>> = proverb_owners
        .into_iter()
        .filter(|(_, owners)| owners.len() > 1)
        .collect();
    for (text, owners) in &duplicate_proverbs {
        warn!(proverb = %text, entries = ?owners, "duplicate localized proverb text");
    }

    CatalogInspection {
        source: catalog.source().to_path_buf(),
        language: lang,
        total_entries: catalog.len(),
        usable_entries: usable,
        unique_idioms: idioms.len(),
        missing_idioms,
        missing_proverbs,
        missing_stories,
        duplicate_proverbs,
        max_slots: crate::round::max_slots(catalog, lang),
    }
}

fn is_missing(text: &LocalizedText, lang: Lang) -> bool {
    variant(text, lang).trim().is_empty() && !text.is_blank()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use std::io::Write;
    use tempfile::TempDir;

    fn entry(idiom: &str, proverb: &str) -> Entry {
        Entry {
            idiom: LocalizedText::english(idiom),
            proverb: LocalizedText::english(proverb),
            story: LocalizedText::english(format!("story of {}", idiom)),
        }
    }

    #[test]
    fn test_load_json_catalog_for_mode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ramayan_fixed.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"entries": [{{"idioms": {{"en": "I1"}}, "proverbs": {{"en": "P1"}}, "stories": {{"en": "S1"}}}}]}}"#
        )
        .unwrap();

        let catalog = load_catalog(dir.path(), StoryMode::Ramayan).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.mode(), Some(StoryMode::Ramayan));
        assert_eq!(catalog.entries()[0].proverb.en, "P1");
    }

    #[test]
    fn test_load_yaml_catalog() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(
            &path,
            "entries:\n  - idioms: {en: I1, hi: इ1}\n    proverbs: {en: P1}\n    stories: {en: S1}\n",
        )
        .unwrap();
        let catalog = load_catalog_file(&path).unwrap();
        assert_eq!(catalog.entries()[0].idiom.hi, "इ1");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_catalog(dir.path(), StoryMode::Casual).unwrap_err();
        assert!(matches!(err, GameError::DataLoad(DataLoadError::NotFound(_))));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ entries: oops").unwrap();
        let err = load_catalog_file(&path).unwrap_err();
        assert!(matches!(err, GameError::DataLoad(DataLoadError::Parse { .. })));
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, r#"{"entries": []}"#).unwrap();
        let err = load_catalog_file(&path).unwrap_err();
        assert!(matches!(err, GameError::DataLoad(DataLoadError::Empty(_))));

        fs::write(&path, "{}").unwrap();
        let err = load_catalog_file(&path).unwrap_err();
        assert!(matches!(err, GameError::DataLoad(DataLoadError::Empty(_))));
    }

    #[test]
    fn test_inspection_reports_duplicates_and_gaps() {
        let mut translated = entry("I1", "P1");
        translated.idiom.hi = "इ1".to_string();
        translated.proverb.hi = "क1".to_string();
        translated.story.hi = "कथा".to_string();
        let catalog = EntryCatalog::from_entries(vec![
            translated,
            entry("I2", "P2"),
            entry("I3", "P2"),
            entry("", "P4"),
        ]);

        let report = inspect_catalog(&catalog, Lang::Hi);
        assert_eq!(report.total_entries, 4);
        assert_eq!(report.usable_entries, 3);
        assert_eq!(report.unique_idioms, 3);
        assert_eq!(report.missing_idioms, 2);
        assert_eq!(report.missing_proverbs, 3);
        assert_eq!(report.duplicate_proverbs.get("P2"), Some(&vec![1, 2]));
        assert_eq!(report.max_slots, 2);
        assert!(report.has_findings());
    }

    #[test]
    fn test_clean_catalog_has_no_findings() {
        let catalog = EntryCatalog::from_entries(vec![entry("I1", "P1"), entry("I2", "P2")]);
        let report = inspect_catalog(&catalog, Lang::En);
        assert!(!report.has_findings());
        assert_eq!(report.max_slots, 2);
    }
}
