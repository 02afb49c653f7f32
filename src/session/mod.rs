// SPDX-License-Identifier: PMPL-1.0-or-later

//! Round state machine.
//!
//! A [`Game`] owns the current [`RoundState`] and advances it in response
//! to discrete [`GameEvent`]s, returning the [`Effect`]s a front-end should
//! present. Phases:
//!
//! ```text
//! AwaitingIdiom --pick idiom--> IdiomPicked
//! IdiomPicked --correct proverb--> StoryShown --dismiss--> AwaitingIdiom | next round
//! IdiomPicked --wrong proverb--> RetryDisplay --deadline--> AwaitingIdiom
//! ```
//!
//! Session-wide values (language, total time, counters) live in a
//! [`SessionContext`] that survives round rebuilds and can be carried by the
//! caller into a new game, e.g. after switching story mode.

mod clock;
mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use view::{FeedbackView, GameView, Prompt, SlotView};

use crate::catalog::EntryCatalog;
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::i18n::Lang;
use crate::judge::{judge, MatchResult};
use crate::round::{build_round, Phase, RoundState};
use crate::types::Entry;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Input to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    PickIdiom(usize),
    PickProverb(String),
    DismissStory,
    ChangeLanguage(Lang),
    Leave,
    /// Periodic poll; fires the wrong-match deadline once it has passed.
    Tick,
}

/// Output of the state machine, in the order it happened.
#[derive(Debug, Clone)]
pub enum Effect {
    RoundStarted {
        round: usize,
        slots: usize,
    },
    Prompt(Prompt),
    IdiomHighlighted(usize),
    Matched {
        idiom_slot: usize,
        proverb_slot: Option<usize>,
        entry: Arc<Entry>,
        segment_time: Duration,
        total_time: Duration,
        round_complete: bool,
    },
    Mismatched {
        idiom_slot: usize,
        proverb_slot: Option<usize>,
        correct: Arc<Entry>,
    },
    RetryEnded,
    StoryDismissed,
    RoundCompleted {
        round: usize,
        round_time: Duration,
        total_time: Duration,
    },
    LanguageChanged(Lang),
    SessionEnded(SessionContext),
}

/// Session-wide state that outlives individual rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub language: Lang,
    pub total_time: Duration,
    pub rounds_started: usize,
    pub rounds_completed: usize,
    pub correct_matches: usize,
    pub wrong_matches: usize,
}

impl SessionContext {
    pub fn new(language: Lang) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }
}

/// Tunables for a game, usually taken from [`GameConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameSettings {
    pub slot_count: usize,
    pub wrong_match_display: Duration,
    pub seed: Option<u64>,
}

impl From<&GameConfig> for GameSettings {
    fn from(config: &GameConfig) -> Self {
        Self {
            slot_count: config.slot_count,
            wrong_match_display: config.wrong_match_display(),
            seed: config.seed,
        }
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}

pub struct Game<C: Clock = SystemClock> {
    catalog: EntryCatalog,
    settings: GameSettings,
    rng: StdRng,
    clock: C,
    context: SessionContext,
    round: RoundState,
    round_complete: bool,
    retry_deadline: Option<Duration>,
    feedback: Option<FeedbackView>,
    prompt: Prompt,
    finished: bool,
}

impl<C: Clock> Game<C> {
    /// Start a session and deal its first round.
    ///
    /// Fails with [`GameError::InsufficientData`] or
    /// [`GameError::InsufficientProverbs`] when the catalog cannot fill a
    /// round; the caller should then disable play.
    pub fn new(
        catalog: EntryCatalog,
        settings: GameSettings,
        clock: C,
        mut context: SessionContext,
    ) -> Result<Self> {
        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut round = build_round(&catalog, settings.slot_count, context.language, &mut rng)?;
        round.segment_start = Some(clock.now());
        context.rounds_started += 1;
        info!(
            round = context.rounds_started,
            slots = settings.slot_count,
            language = %context.language,
            "round started"
        );

        Ok(Self {
            catalog,
            settings,
            rng,
            clock,
            context,
            round,
            round_complete: false,
            retry_deadline: None,
            feedback: None,
            prompt: Prompt::PickIdiom,
            finished: false,
        })
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn into_context(self) -> SessionContext {
        self.context
    }

    pub fn catalog(&self) -> &EntryCatalog {
        &self.catalog
    }

    pub fn phase(&self) -> Phase {
        self.round.phase()
    }

    pub fn language(&self) -> Lang {
        self.context.language
    }

    /// Set once the last pair of a round is matched; cleared when the
    /// story is dismissed and the next round is dealt.
    pub fn is_round_complete(&self) -> bool {
        self.round_complete
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn prompt(&self) -> Prompt {
        self.prompt
    }

    /// Clock reading at which the wrong-match display ends, if one is showing.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.retry_deadline
    }

    /// Time left until [`Self::next_deadline`], zero when already due.
    pub fn time_until_deadline(&self) -> Option<Duration> {
        self.retry_deadline
            .map(|deadline| deadline.saturating_sub(self.clock.now()))
    }

    /// Elapsed time of the current round, including a running segment.
    pub fn round_time(&self) -> Duration {
        self.round.elapsed() + self.running_segment()
    }

    /// Total session time, including a running segment.
    pub fn total_time(&self) -> Duration {
        self.context.total_time + self.running_segment()
    }

    /// Single entry point for front-end input.
    ///
    /// Events that do not apply to the current phase produce no effects.
    /// Errors are fatal round-setup failures only.
    pub fn handle_event(&mut self, event: GameEvent) -> Result<Vec<Effect>> {
        let mut effects = Vec::new();
        if self.finished {
            debug!(?event, "session finished, ignoring event");
            return Ok(effects);
        }
        self.fire_deadline(&mut effects);

        match event {
            GameEvent::Tick => {}
            GameEvent::PickIdiom(slot) => self.pick_idiom(slot, &mut effects),
            GameEvent::PickProverb(text) => self.pick_proverb(&text, &mut effects),
            GameEvent::DismissStory => self.dismiss_story(&mut effects)?,
            GameEvent::ChangeLanguage(lang) => self.change_language(lang, &mut effects)?,
            GameEvent::Leave => self.leave(&mut effects),
        }
        Ok(effects)
    }

    pub fn view(&self) -> GameView {
        let lang = self.context.language;
        let idioms = (0..self.round.slot_count())
            .map(|slot| SlotView {
                text: self.round.idiom_text(slot).unwrap_or_default().to_string(),
                status: self.round.idiom_status(slot).unwrap_or(crate::round::SlotStatus::Open),
            })
            .collect();
        let proverbs = self
            .round
            .proverb_options()
            .iter()
            .enumerate()
            .map(|(slot, text)| SlotView {
                text: text.clone(),
                status: self
                    .round
                    .proverb_status(slot)
                    .unwrap_or(crate::round::SlotStatus::Open),
            })
            .collect();

        GameView {
            language: lang,
            phase: self.round.phase(),
            prompt: self.prompt.text(lang).to_string(),
            idioms,
            proverbs,
            feedback: self.feedback.clone(),
            round_number: self.context.rounds_started,
            matched: self.round.matched_count(),
            slots: self.round.slot_count(),
            round_time: self.round_time(),
            total_time: self.total_time(),
            timer_running: self.round.is_timer_running(),
        }
    }

    fn pick_idiom(&mut self, slot: usize, effects: &mut Vec<Effect>) {
        if !matches!(self.round.phase(), Phase::AwaitingIdiom | Phase::IdiomPicked) {
            debug!(slot, phase = ?self.round.phase(), "idiom pick ignored");
            return;
        }
        match self.round.idiom_status(slot) {
            None => {
                warn!(
                    "{}",
                    GameError::SlotOutOfRange {
                        slot,
                        len: self.round.slot_count()
                    }
                );
                return;
            }
            Some(status) if !status.is_selectable() => {
                debug!(slot, "idiom slot already matched");
                return;
            }
            Some(_) => {}
        }

        self.round.select_idiom(slot);
        self.round.set_phase(Phase::IdiomPicked);
        debug!(slot, "idiom picked");
        effects.push(Effect::IdiomHighlighted(slot));
        self.set_prompt(Prompt::PickProverb, effects);
    }

    fn pick_proverb(&mut self, text: &str, effects: &mut Vec<Effect>) {
        if !matches!(self.round.phase(), Phase::AwaitingIdiom | Phase::IdiomPicked) {
            debug!(phase = ?self.round.phase(), "proverb pick ignored");
            return;
        }
        let proverb_slot = self.round.proverb_slot(text);
        if let Some(status) = proverb_slot.and_then(|slot| self.round.proverb_status(slot)) {
            if !status.is_selectable() {
                debug!(proverb = %text, "proverb slot already matched");
                return;
            }
        }

        let result = match judge(self.round.selected_idiom(), text, &self.round) {
            Ok(result) => result,
            Err(err) => {
                warn!("{}", err);
                return;
            }
        };

        match result {
            MatchResult::NoIdiomSelected => {
                self.set_prompt(Prompt::PickIdiomFirst, effects);
            }
            MatchResult::Correct(entry) => {
                let Some(idiom_slot) = self.round.selected_idiom() else {
                    return;
                };
                let segment_time = self.stop_segment();
                self.round.mark_matched(idiom_slot, proverb_slot);
                self.round.clear_selection();
                self.context.correct_matches += 1;
                self.round_complete = self.round.is_complete();
                self.round.set_phase(Phase::StoryShown);
                self.feedback = Some(FeedbackView::correct(
                    &entry,
                    self.context.language,
                    self.round_complete.then_some(self.round.slot_count()),
                ));
                debug!(
                    idiom_slot,
                    matched = self.round.matched_count(),
                    complete = self.round_complete,
                    "correct match"
                );
                effects.push(Effect::Matched {
                    idiom_slot,
                    proverb_slot,
                    entry,
                    segment_time,
                    total_time: self.context.total_time,
                    round_complete: self.round_complete,
                });
                self.set_prompt(Prompt::Continue, effects);
            }
            MatchResult::Incorrect { correct } => {
                let Some(idiom_slot) = self.round.selected_idiom() else {
                    return;
                };
                self.stop_segment();
                self.round.flag_wrong(proverb_slot);
                self.context.wrong_matches += 1;
                self.round.set_phase(Phase::RetryDisplay);
                self.retry_deadline = Some(
                    self.clock
                        .now()
                        .saturating_add(self.settings.wrong_match_display),
                );
                self.feedback = Some(FeedbackView::wrong(&correct, self.context.language));
                debug!(idiom_slot, "wrong match");
                effects.push(Effect::Mismatched {
                    idiom_slot,
                    proverb_slot,
                    correct,
                });
                self.set_prompt(Prompt::TryAgain, effects);
            }
        }
    }

    fn dismiss_story(&mut self, effects: &mut Vec<Effect>) -> Result<()> {
        if self.round.phase() != Phase::StoryShown {
            debug!(phase = ?self.round.phase(), "dismiss ignored");
            return Ok(());
        }
        self.feedback = None;

        if self.round_complete {
            self.context.rounds_completed += 1;
            info!(
                round = self.context.rounds_started,
                round_secs = self.round.elapsed().as_secs_f64(),
                total_secs = self.context.total_time.as_secs_f64(),
                "round completed"
            );
            effects.push(Effect::RoundCompleted {
                round: self.context.rounds_started,
                round_time: self.round.elapsed(),
                total_time: self.context.total_time,
            });
            return self.start_round(effects);
        }

        self.round.clear_selection();
        self.round.set_phase(Phase::AwaitingIdiom);
        self.start_segment();
        effects.push(Effect::StoryDismissed);
        self.set_prompt(Prompt::PickIdiom, effects);
        Ok(())
    }

    fn change_language(&mut self, lang: Lang, effects: &mut Vec<Effect>) -> Result<()> {
        if lang == self.context.language {
            return Ok(());
        }
        let previous = self.context.language;
        let was_running = self.round.is_timer_running();
        self.stop_segment();
        self.context.language = lang;
        if let Err(err) = self.start_round(effects) {
            // The old round stays in play; story and retry panels stay untimed.
            self.context.language = previous;
            if was_running {
                self.start_segment();
            }
            return Err(err);
        }
        info!(from = %previous, to = %lang, "language changed, round rebuilt");
        effects.insert(0, Effect::LanguageChanged(lang));
        Ok(())
    }

    fn leave(&mut self, effects: &mut Vec<Effect>) {
        self.stop_segment();
        self.finished = true;
        self.retry_deadline = None;
        info!(
            total_secs = self.context.total_time.as_secs_f64(),
            rounds = self.context.rounds_completed,
            "session ended"
        );
        effects.push(Effect::SessionEnded(self.context.clone()));
    }

    /// End the wrong-match display once its deadline has passed.
    fn fire_deadline(&mut self, effects: &mut Vec<Effect>) {
        let Some(deadline) = self.retry_deadline else {
            return;
        };
        if self.clock.now() < deadline {
            return;
        }
        self.retry_deadline = None;
        self.feedback = None;
        self.round.clear_wrong_flags();
        self.round.clear_selection();
        self.round.set_phase(Phase::AwaitingIdiom);
        self.start_segment();
        debug!("wrong-match display ended");
        effects.push(Effect::RetryEnded);
        self.set_prompt(Prompt::PickIdiom, effects);
    }

    /// Deal a fresh round in the current language, replacing all round state.
    fn start_round(&mut self, effects: &mut Vec<Effect>) -> Result<()> {
        let mut round = build_round(
            &self.catalog,
            self.settings.slot_count,
            self.context.language,
            &mut self.rng,
        )?;
        round.segment_start = Some(self.clock.now());
        self.round = round;
        self.round_complete = false;
        self.retry_deadline = None;
        self.feedback = None;
        self.context.rounds_started += 1;
        info!(
            round = self.context.rounds_started,
            slots = self.settings.slot_count,
            language = %self.context.language,
            "round started"
        );
        effects.push(Effect::RoundStarted {
            round: self.context.rounds_started,
            slots: self.round.slot_count(),
        });
        self.set_prompt(Prompt::PickIdiom, effects);
        Ok(())
    }

    fn set_prompt(&mut self, prompt: Prompt, effects: &mut Vec<Effect>) {
        self.prompt = prompt;
        effects.push(Effect::Prompt(prompt));
    }

    fn start_segment(&mut self) {
        if self.round.segment_start.is_none() {
            self.round.segment_start = Some(self.clock.now());
        }
    }

    /// Close the running segment and add it to round and session totals.
    fn stop_segment(&mut self) -> Duration {
        let Some(start) = self.round.segment_start.take() else {
            return Duration::ZERO;
        };
        let segment = self.clock.now().saturating_sub(start);
        self.round.elapsed += segment;
        self.context.total_time += segment;
        segment
    }

    fn running_segment(&self) -> Duration {
        self.round
            .segment_start
            .map(|start| self.clock.now().saturating_sub(start))
            .unwrap_or_default()
    }
}
