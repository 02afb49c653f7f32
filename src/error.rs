// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for the game core.
//!
//! Catalog and round-setup failures are fatal to the session; the caller
//! is expected to stop offering interaction and surface the message.
//! `UnknownProverb` and `SlotOutOfRange` are contract faults between the
//! front-end and the state machine.

use crate::i18n::Lang;
use std::path::PathBuf;

pub type Result<T, E = GameError> = core::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("data load failed: {0}")]
    DataLoad(#[from] DataLoadError),
    #[error("not enough unique idioms: need {required}, found {available}")]
    InsufficientData { available: usize, required: usize },
    /// Enough idioms, but too many share a proverb text in `language`.
    #[error("not enough distinct proverbs in {language}: need {required}, found {available}")]
    InsufficientProverbs {
        available: usize,
        required: usize,
        language: Lang,
    },
    #[error("selected proverb not found in round: {0:?}")]
    UnknownProverb(String),
    #[error("slot {slot} out of range (round has {len} slots)")]
    SlotOutOfRange { slot: usize, len: usize },
}

#[derive(thiserror::Error, Debug)]
pub enum DataLoadError {
    #[error("catalog file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("catalog {} contains no entries", .0.display())]
    Empty(PathBuf),
}

impl GameError {
    /// True for failures that end the session rather than a single action.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GameError::DataLoad(_)
                | GameError::InsufficientData { .. }
                | GameError::InsufficientProverbs { .. }
        )
    }
}
