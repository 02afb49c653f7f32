// SPDX-License-Identifier: PMPL-1.0-or-later

//! Round selection: drawing unique idiom/proverb pairs from a catalog.
//!
//! A round is a fixed number of idiom slots, each bound to a distinct
//! entry, plus a shuffled list of proverb options keyed by their localized
//! text. Rounds are rebuilt from scratch on language change, on
//! completion, and at session start.

use crate::catalog::EntryCatalog;
use crate::error::{GameError, Result};
use crate::i18n::{localize, Lang};
use crate::types::Entry;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Where a round is in its lifecycle.
///
/// `Correct` and `Incorrect` judgments are not resting phases; they move
/// the round straight into `StoryShown` or `RetryDisplay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingIdiom,
    IdiomPicked,
    StoryShown,
    RetryDisplay,
}

/// Display state of one idiom or proverb slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Open,
    Selected,
    Matched,
    /// Proverb picked in the last wrong match; still selectable.
    Wrong,
}

impl SlotStatus {
    pub fn is_selectable(self) -> bool {
        !matches!(self, SlotStatus::Matched)
    }
}

/// Localized proverb text → owning entry, for one round.
#[derive(Debug, Clone, Default)]
pub struct ProverbOptionMap {
    owners: HashMap<String, Arc<Entry>>,
}

impl ProverbOptionMap {
    /// Insert `text` unless it is already a key. Returns whether it was new.
    pub fn insert_if_absent(&mut self, text: String, entry: Arc<Entry>) -> bool {
        if self.owners.contains_key(&text) {
            return false;
        }
        self.owners.insert(text, entry);
        true
    }

    pub fn get(&self, text: &str) -> Option<&Arc<Entry>> {
        self.owners.get(text)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// Per-round state, owned and mutated by the session state machine.
#[derive(Debug, Clone)]
pub struct RoundState {
    language: Lang,
    pairs: Vec<Arc<Entry>>,
    proverb_options: Vec<String>,
    proverb_map: ProverbOptionMap,
    idiom_status: Vec<SlotStatus>,
    proverb_status: Vec<SlotStatus>,
    selected_idiom: Option<usize>,
    matched_count: usize,
    phase: Phase,
    pub(crate) segment_start: Option<Duration>,
    pub(crate) elapsed: Duration,
}

impl RoundState {
    pub fn language(&self) -> Lang {
        self.language
    }

    /// Entries bound to idiom slots, in display order.
    pub fn pairs(&self) -> &[Arc<Entry>] {
        &self.pairs
    }

    /// Proverb option texts, in display order.
    pub fn proverb_options(&self) -> &[String] {
        &self.proverb_options
    }

    pub fn proverb_map(&self) -> &ProverbOptionMap {
        &self.proverb_map
    }

    pub fn slot_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    pub fn selected_idiom(&self) -> Option<usize> {
        self.selected_idiom
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.matched_count == self.pairs.len()
    }

    /// Time spent in this round's finished segments.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_timer_running(&self) -> bool {
        self.segment_start.is_some()
    }

    pub fn idiom_text(&self, slot: usize) -> Option<&str> {
        self.pairs
            .get(slot)
            .map(|entry| localize(&entry.idiom, self.language))
    }

    pub fn idiom_status(&self, slot: usize) -> Option<SlotStatus> {
        self.idiom_status.get(slot).copied()
    }

    pub fn proverb_status(&self, slot: usize) -> Option<SlotStatus> {
        self.proverb_status.get(slot).copied()
    }

    pub fn proverb_slot(&self, text: &str) -> Option<usize> {
        self.proverb_options.iter().position(|option| option == text)
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn select_idiom(&mut self, slot: usize) {
        for (index, status) in self.idiom_status.iter_mut().enumerate() {
            if *status == SlotStatus::Matched {
                continue;
            }
            *status = if index == slot {
                SlotStatus::Selected
            } else {
                SlotStatus::Open
            };
        }
        self.selected_idiom = Some(slot);
    }

    pub(crate) fn clear_selection(&mut self) {
        if let Some(slot) = self.selected_idiom.take() {
            if let Some(status) = self.idiom_status.get_mut(slot) {
                if *status == SlotStatus::Selected {
                    *status = SlotStatus::Open;
                }
            }
        }
    }

    /// Consume an idiom slot and its proverb option after a correct match.
    pub(crate) fn mark_matched(&mut self, idiom_slot: usize, proverb_slot: Option<usize>) {
        if let Some(status) = self.idiom_status.get_mut(idiom_slot) {
            *status = SlotStatus::Matched;
        }
        if let Some(status) = proverb_slot.and_then(|slot| self.proverb_status.get_mut(slot)) {
            *status = SlotStatus::Matched;
        }
        self.matched_count += 1;
    }

    pub(crate) fn flag_wrong(&mut self, proverb_slot: Option<usize>) {
        if let Some(status) = proverb_slot.and_then(|slot| self.proverb_status.get_mut(slot)) {
            if *status != SlotStatus::Matched {
                *status = SlotStatus::Wrong;
            }
        }
    }

    pub(crate) fn clear_wrong_flags(&mut self) {
        for status in &mut self.proverb_status {
            if *status == SlotStatus::Wrong {
                *status = SlotStatus::Open;
            }
        }
    }
}

/// Usable entries, deduplicated by English idiom text (first occurrence wins).
pub fn candidate_pool(catalog: &EntryCatalog) -> Vec<Arc<Entry>> {
    let mut seen = HashSet::new();
    catalog
        .entries()
        .iter()
        .filter(|entry| entry.is_usable())
        .filter(|entry| seen.insert(entry.idiom.default_text().to_string()))
        .cloned()
        .collect()
}

/// Largest slot count a round in `lang` can be built with.
///
/// Limited by the number of distinct localized proverb texts among the
/// candidate pool, since every slot needs its own proverb option.
pub fn max_slots(catalog: &EntryCatalog, lang: Lang) -> usize {
    candidate_pool(catalog)
        .iter()
        .map(|entry| localize(&entry.proverb, lang))
        .collect::<HashSet<_>>()
        .len()
}

/// Build a new round of `slot_count` pairs.
///
/// Entries are drawn by rejection sampling from the candidate pool. A
/// candidate is rejected when it is already in the round or when its
/// localized proverb text collides with one already chosen, so every idiom
/// slot gets its own proverb option.
pub fn build_round<R: Rng + ?Sized>(
    catalog: &EntryCatalog,
    slot_count: usize,
    lang: Lang,
    rng: &mut R,
) -> Result<RoundState> {
    let pool = candidate_pool(catalog);
    if pool.len() < slot_count {
        error!(available = pool.len(), required = slot_count, "not enough unique idioms");
        return Err(GameError::InsufficientData {
            available: pool.len(),
            required: slot_count,
        });
    }
    let distinct_proverbs = max_slots(catalog, lang);
    if distinct_proverbs < slot_count {
        error!(
            available = distinct_proverbs,
            required = slot_count,
            language = %lang,
            "not enough distinct proverbs"
        );
        return Err(GameError::InsufficientProverbs {
            available: distinct_proverbs,
            required: slot_count,
            language: lang,
        });
    }

    let mut pairs: Vec<Arc<Entry>> = Vec::with_capacity(slot_count);
    let mut used_proverbs: HashSet<&str> = HashSet::new();
    while pairs.len() < slot_count {
        let candidate = &pool[rng.gen_range(0..pool.len())];
        if pairs.iter().any(|chosen| Arc::ptr_eq(chosen, candidate)) {
            continue;
        }
        if !used_proverbs.insert(localize(&candidate.proverb, lang)) {
            continue;
        }
        pairs.push(Arc::clone(candidate));
    }
    pairs.shuffle(rng);

    let mut proverb_map = ProverbOptionMap::default();
    let mut proverb_options = Vec::with_capacity(slot_count);
    for entry in &pairs {
        let text = localize(&entry.proverb, lang).to_string();
        if proverb_map.insert_if_absent(text.clone(), Arc::clone(entry)) {
            proverb_options.push(text);
        }
    }
    proverb_options.shuffle(rng);

    debug!(slots = slot_count, language = %lang, "built round");

    Ok(RoundState {
        language: lang,
        idiom_status: vec![SlotStatus::Open; pairs.len()],
        proverb_status: vec![SlotStatus::Open; proverb_options.len()],
        pairs,
        proverb_options,
        proverb_map,
        selected_idiom: None,
        matched_count: 0,
        phase: Phase::AwaitingIdiom,
        segment_start: None,
        elapsed: Duration::ZERO,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocalizedText;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry(idiom: &str, proverb: &str) -> Entry {
        Entry {
            idiom: LocalizedText::english(idiom),
            proverb: LocalizedText::english(proverb),
            story: LocalizedText::english(format!("story of {}", idiom)),
        }
    }

    fn catalog(n: usize) -> EntryCatalog {
        EntryCatalog::from_entries(
            (0..n)
                .map(|i| entry(&format!("idiom {}", i), &format!("proverb {}", i)))
                .collect(),
        )
    }

    #[test]
    fn test_round_has_distinct_pairs() {
        let catalog = catalog(5);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let round = build_round(&catalog, 4, Lang::En, &mut rng).unwrap();
            assert_eq!(round.slot_count(), 4);
            let idioms: HashSet<&str> = round
                .pairs()
                .iter()
                .map(|e| e.idiom.default_text())
                .collect();
            assert_eq!(idioms.len(), 4);
            assert_eq!(round.proverb_map().len(), 4);
            assert_eq!(round.proverb_options().len(), 4);
            assert_eq!(round.phase(), Phase::AwaitingIdiom);
            assert_eq!(round.matched_count(), 0);
        }
    }

    #[test]
    fn test_every_pair_has_its_proverb_option() {
        let catalog = catalog(8);
        let mut rng = StdRng::seed_from_u64(7);
        let round = build_round(&catalog, 6, Lang::En, &mut rng).unwrap();
        for pair in round.pairs() {
            let owner = round.proverb_map().get(&pair.proverb.en).unwrap();
            assert!(Arc::ptr_eq(owner, pair));
            assert!(round.proverb_slot(&pair.proverb.en).is_some());
        }
    }

    #[test]
    fn test_duplicate_idioms_collapse_to_first() {
        let catalog = EntryCatalog::from_entries(vec![
            entry("same", "first"),
            entry("same", "second"),
            entry("other", "third"),
        ]);
        let pool = candidate_pool(&catalog);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].proverb.en, "first");

        let mut rng = StdRng::seed_from_u64(1);
        let err = build_round(&catalog, 3, Lang::En, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            GameError::InsufficientData {
                available: 2,
                required: 3
            }
        ));
    }

    #[test]
    fn test_blank_idioms_are_not_candidates() {
        let catalog = EntryCatalog::from_entries(vec![entry("", "p"), entry(" ", "q")]);
        assert!(candidate_pool(&catalog).is_empty());
    }

    #[test]
    fn test_colliding_proverbs_never_share_a_round() {
        let mut hindi_collision = entry("a", "pa");
        hindi_collision.proverb.hi = "एक".to_string();
        let mut other = entry("b", "pb");
        other.proverb.hi = "एक".to_string();
        let catalog =
            EntryCatalog::from_entries(vec![hindi_collision, other, entry("c", "pc"), entry("d", "pd")]);

        assert_eq!(max_slots(&catalog, Lang::En), 4);
        assert_eq!(max_slots(&catalog, Lang::Hi), 3);

        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let round = build_round(&catalog, 3, Lang::Hi, &mut rng).unwrap();
            assert_eq!(round.proverb_options().len(), 3);
            assert_eq!(round.proverb_map().len(), 3);
        }

        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            build_round(&catalog, 4, Lang::Hi, &mut rng),
            Err(GameError::InsufficientProverbs {
                available: 3,
                required: 4,
                language: Lang::Hi
            })
        ));
    }

    #[test]
    fn test_same_seed_same_round() {
        let catalog = catalog(10);
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first = build_round(&catalog, 4, Lang::En, &mut a).unwrap();
        let second = build_round(&catalog, 4, Lang::En, &mut b).unwrap();
        assert_eq!(first.proverb_options(), second.proverb_options());
        for (x, y) in first.pairs().iter().zip(second.pairs()) {
            assert!(Arc::ptr_eq(x, y));
        }
    }

    #[test]
    fn test_option_map_keeps_first_owner() {
        let mut map = ProverbOptionMap::default();
        let a = Arc::new(entry("a", "p"));
        let b = Arc::new(entry("b", "p"));
        assert!(map.insert_if_absent("p".to_string(), Arc::clone(&a)));
        assert!(!map.insert_if_absent("p".to_string(), b));
        assert!(Arc::ptr_eq(map.get("p").unwrap(), &a));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_slot_bookkeeping() {
        let catalog = catalog(4);
        let mut rng = StdRng::seed_from_u64(3);
        let mut round = build_round(&catalog, 4, Lang::En, &mut rng).unwrap();

        round.select_idiom(1);
        assert_eq!(round.idiom_status(1), Some(SlotStatus::Selected));
        round.select_idiom(2);
        assert_eq!(round.idiom_status(1), Some(SlotStatus::Open));

        round.mark_matched(2, Some(0));
        assert_eq!(round.idiom_status(2), Some(SlotStatus::Matched));
        assert_eq!(round.proverb_status(0), Some(SlotStatus::Matched));
        assert!(!SlotStatus::Matched.is_selectable());

        round.flag_wrong(Some(0));
        assert_eq!(round.proverb_status(0), Some(SlotStatus::Matched));
        round.flag_wrong(Some(1));
        assert_eq!(round.proverb_status(1), Some(SlotStatus::Wrong));
        round.clear_wrong_flags();
        assert_eq!(round.proverb_status(1), Some(SlotStatus::Open));
        assert_eq!(round.matched_count(), 1);
    }
}
