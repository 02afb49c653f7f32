// SPDX-License-Identifier: PMPL-1.0-or-later

//! Game configuration: defaults, file loading and validation.

use crate::i18n::Lang;
use crate::types::StoryMode;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SLOT_COUNT: usize = 4;
pub const DEFAULT_WRONG_MATCH_DISPLAY_SECS: f64 = 3.0;
pub const MAX_WRONG_MATCH_DISPLAY_SECS: f64 = 3600.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding the per-mode catalog files.
    pub data_dir: PathBuf,
    pub mode: StoryMode,
    pub language: Lang,
    /// Number of idiom slots (and proverb options) per round.
    pub slot_count: usize,
    /// How long a wrong match stays on screen before play resumes.
    pub wrong_match_display_secs: f64,
    /// Fixed RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            mode: StoryMode::default(),
            language: Lang::default(),
            slot_count: DEFAULT_SLOT_COUNT,
            wrong_match_display_secs: DEFAULT_WRONG_MATCH_DISPLAY_SECS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// The wrong-match delay, clamped to `0..=MAX_WRONG_MATCH_DISPLAY_SECS`.
    /// Unvalidated nonsense (NaN) reads as zero.
    pub fn wrong_match_display(&self) -> Duration {
        Duration::try_from_secs_f64(
            self.wrong_match_display_secs
                .clamp(0.0, MAX_WRONG_MATCH_DISPLAY_SECS),
        )
        .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.slot_count == 0 {
            return Err(anyhow!("slot_count must be at least 1"));
        }
        let secs = self.wrong_match_display_secs;
        if !(0.0..=MAX_WRONG_MATCH_DISPLAY_SECS).contains(&secs) {
            return Err(anyhow!(
                "wrong_match_display_secs must be between 0 and {}, got {}",
                MAX_WRONG_MATCH_DISPLAY_SECS,
                secs
            ));
        }
        Ok(())
    }
}

/// Load a config file; YAML for `.yaml`/`.yml`, JSON otherwise.
pub fn load_config(path: &Path) -> Result<GameConfig> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    let config: GameConfig = if matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    ) {
        serde_yaml::from_str(&content)
            .with_context(|| format!("parsing yaml config {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("parsing json config {}", path.display()))?
    };
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}
