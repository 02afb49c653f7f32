// SPDX-License-Identifier: PMPL-1.0-or-later

//! Presentation snapshot of a game, for front-ends.

use crate::i18n::{localize, t, Lang};
use crate::round::{Phase, SlotStatus};
use crate::types::Entry;
use std::time::Duration;

/// What the prompt line asks of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    PickIdiom,
    PickProverb,
    /// A proverb was picked before any idiom.
    PickIdiomFirst,
    /// A story is showing and waits to be dismissed.
    Continue,
    /// A wrong match is showing; play resumes on its own.
    TryAgain,
}

impl Prompt {
    pub fn key(self) -> &'static str {
        match self {
            Prompt::PickIdiom => "prompt.pick_idiom",
            Prompt::PickProverb => "prompt.pick_proverb",
            Prompt::PickIdiomFirst => "prompt.idiom_first",
            Prompt::Continue => "story.continue",
            Prompt::TryAgain => "feedback.try_again",
        }
    }

    pub fn text(self, lang: Lang) -> &'static str {
        t(lang, self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub text: String,
    pub status: SlotStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView {
    pub correct: bool,
    /// "Correct!" or "Wrong Match!".
    pub headline: String,
    /// The idiom → proverb pairing that was (or should have been) made.
    pub pair: String,
    /// The entry's story, shown after a correct match.
    pub story: Option<String>,
}

impl FeedbackView {
    pub(crate) fn correct(entry: &Entry, lang: Lang, congratulate: Option<usize>) -> Self {
        let mut story = localize(&entry.story, lang).to_string();
        if let Some(cards) = congratulate {
            story.push_str("\n\n");
            story.push_str(&t(lang, "round.congrats").replace("{n}", &cards.to_string()));
        }
        Self {
            correct: true,
            headline: t(lang, "feedback.correct").to_string(),
            pair: pairing(entry, lang),
            story: Some(story),
        }
    }

    pub(crate) fn wrong(correct: &Entry, lang: Lang) -> Self {
        Self {
            correct: false,
            headline: t(lang, "feedback.wrong").to_string(),
            pair: format!("{}: {}", t(lang, "feedback.correct_label"), pairing(correct, lang)),
            story: None,
        }
    }
}

fn pairing(entry: &Entry, lang: Lang) -> String {
    format!(
        "{} → {}",
        localize(&entry.idiom, lang),
        localize(&entry.proverb, lang)
    )
}

#[derive(Debug, Clone)]
pub struct GameView {
    pub language: Lang,
    pub phase: Phase,
    pub prompt: String,
    pub idioms: Vec<SlotView>,
    pub proverbs: Vec<SlotView>,
    pub feedback: Option<FeedbackView>,
    pub round_number: usize,
    pub matched: usize,
    pub slots: usize,
    pub round_time: Duration,
    pub total_time: Duration,
    pub timer_running: bool,
}

impl GameView {
    /// Timer line, e.g. `Time: 12.3s (Total: 40.0s)`.
    pub fn timer_text(&self) -> String {
        let label = t(self.language, "timer.label");
        if self.timer_running {
            format!("{}: {:.1}s", label, self.round_time.as_secs_f64())
        } else {
            format!(
                "{}: {:.1}s ({}: {:.1}s)",
                label,
                self.round_time.as_secs_f64(),
                t(self.language, "timer.total"),
                self.total_time.as_secs_f64()
            )
        }
    }
}
