// SPDX-License-Identifier: PMPL-1.0-or-later

//! Match judging.

use crate::error::{GameError, Result};
use crate::round::RoundState;
use crate::types::Entry;
use std::sync::Arc;

/// Outcome of pairing the selected idiom with a proverb option.
#[derive(Debug, Clone)]
pub enum MatchResult {
    Correct(Arc<Entry>),
    /// Carries the entry bound to the selected idiom slot, so the correct
    /// pairing can be shown.
    Incorrect {
        correct: Arc<Entry>,
    },
    /// Guidance state: the player has to pick an idiom first.
    NoIdiomSelected,
}

impl MatchResult {
    pub fn is_correct(&self) -> bool {
        matches!(self, MatchResult::Correct(_))
    }
}

/// Judge `proverb_text` against the entry bound to `selected_idiom`.
///
/// A match is correct only when the proverb's owning entry is the very
/// same entry as the idiom slot's (identity, not equality).
pub fn judge(
    selected_idiom: Option<usize>,
    proverb_text: &str,
    round: &RoundState,
) -> Result<MatchResult> {
    let Some(slot) = selected_idiom else {
        return Ok(MatchResult::NoIdiomSelected);
    };
    let selected = round
        .pairs()
        .get(slot)
        .ok_or(GameError::SlotOutOfRange {
            slot,
            len: round.slot_count(),
        })?;
    let owner = round
        .proverb_map()
        .get(proverb_text)
        .ok_or_else(|| GameError::UnknownProverb(proverb_text.to_string()))?;

    if Arc::ptr_eq(owner, selected) {
        Ok(MatchResult::Correct(Arc::clone(selected)))
    } else {
        Ok(MatchResult::Incorrect {
            correct: Arc::clone(selected),
        })
    }
}
