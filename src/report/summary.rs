// SPDX-License-Identifier: PMPL-1.0-or-later

//! Session summary generation

use crate::i18n::Lang;
use crate::session::SessionContext;
use crate::types::StoryMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub created_at: String,
    pub mode: Option<StoryMode>,
    pub catalog: PathBuf,
    pub language: Lang,
    pub rounds_started: usize,
    pub rounds_completed: usize,
    pub correct_matches: usize,
    pub wrong_matches: usize,
    pub total_seconds: f64,
    /// Share of proverb picks that were correct, 0.0 to 1.0.
    pub accuracy: f64,
    /// Average play time per completed round.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds_per_round: Option<f64>,
}

pub fn summarize(
    context: &SessionContext,
    mode: Option<StoryMode>,
    catalog: &Path,
) -> SessionSummary {
    let attempts = context.correct_matches + context.wrong_matches;
    let accuracy = if attempts == 0 {
        0.0
    } else {
        context.correct_matches as f64 / attempts as f64
    };
    let total_seconds = context.total_time.as_secs_f64();
    let seconds_per_round = (context.rounds_completed > 0)
        .then(|| total_seconds / context.rounds_completed as f64);

    SessionSummary {
        created_at: chrono::Utc::now().to_rfc3339(),
        mode,
        catalog: catalog.to_path_buf(),
        language: context.language,
        rounds_started: context.rounds_started,
        rounds_completed: context.rounds_completed,
        correct_matches: context.correct_matches,
        wrong_matches: context.wrong_matches,
        total_seconds,
        accuracy,
        seconds_per_round,
    }
}
