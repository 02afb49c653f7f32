// SPDX-License-Identifier: PMPL-1.0-or-later

//! Whole-session play through the event interface

use idiom_match::catalog::{load_catalog, EntryCatalog};
use idiom_match::config::GameConfig;
use idiom_match::i18n::{localize, Lang};
use idiom_match::report::{self, OutputFormat};
use idiom_match::round::{Phase, SlotStatus};
use idiom_match::session::{
    Effect, Game, GameEvent, GameSettings, ManualClock, Prompt, SessionContext,
};
use idiom_match::types::{Entry, LocalizedText, StoryMode};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

fn shipped(mode: StoryMode) -> EntryCatalog {
    load_catalog(&Path::new(env!("CARGO_MANIFEST_DIR")).join("data"), mode).unwrap()
}

fn settings(seed: u64) -> GameSettings {
    GameSettings {
        seed: Some(seed),
        ..GameSettings::from(&GameConfig::default())
    }
}

fn proverb_for(game: &Game<ManualClock>, slot: usize) -> String {
    localize(&game.round().pairs()[slot].proverb, game.language()).to_string()
}

fn count(effects: &[Effect], pred: impl Fn(&Effect) -> bool) -> usize {
    effects.iter().filter(|e| pred(e)).count()
}

#[test]
fn test_two_rounds_in_hindi() {
    let clock = ManualClock::new();
    let mut game = Game::new(
        shipped(StoryMode::Mahabharat),
        settings(42),
        clock.clone(),
        SessionContext::new(Lang::Hi),
    )
    .unwrap();

    for round in 1..=2 {
        assert_eq!(game.context().rounds_started, round);
        let slots = game.round().slot_count();
        for slot in 0..slots {
            game.handle_event(GameEvent::PickIdiom(slot)).unwrap();
            clock.advance(Duration::from_secs(2));
            let effects = game
                .handle_event(GameEvent::PickProverb(proverb_for(&game, slot)))
                .unwrap();
            assert!(matches!(effects[0], Effect::Matched { .. }));
            assert_eq!(game.phase(), Phase::StoryShown);

            let feedback = game.view().feedback.unwrap();
            assert!(feedback.correct);
            assert_eq!(feedback.headline, "सही!");

            let effects = game.handle_event(GameEvent::DismissStory).unwrap();
            let started = count(&effects, |e| matches!(e, Effect::RoundStarted { .. }));
            if slot + 1 == slots {
                assert_eq!(started, 1);
                assert!(matches!(effects[0], Effect::RoundCompleted { .. }));
            } else {
                assert_eq!(started, 0);
                assert!(matches!(effects[0], Effect::StoryDismissed));
            }
        }
    }

    assert_eq!(game.context().rounds_completed, 2);
    assert_eq!(game.context().correct_matches, 8);
    assert_eq!(game.context().total_time, Duration::from_secs(16));
}

#[test]
fn test_wrong_match_waits_for_deadline() {
    let clock = ManualClock::new();
    let mut game = Game::new(
        shipped(StoryMode::Ramayan),
        settings(7),
        clock.clone(),
        SessionContext::default(),
    )
    .unwrap();

    game.handle_event(GameEvent::PickIdiom(1)).unwrap();
    let wrong = proverb_for(&game, 0);
    let effects = game.handle_event(GameEvent::PickProverb(wrong)).unwrap();
    assert!(matches!(effects[0], Effect::Mismatched { idiom_slot: 1, .. }));
    assert_eq!(game.prompt(), Prompt::TryAgain);

    // Picks are refused until the display ends.
    clock.advance(Duration::from_secs(1));
    assert!(game
        .handle_event(GameEvent::PickIdiom(2))
        .unwrap()
        .is_empty());
    assert_eq!(game.time_until_deadline(), Some(Duration::from_secs(2)));

    clock.advance(Duration::from_secs(2));
    let effects = game.handle_event(GameEvent::Tick).unwrap();
    assert!(matches!(effects[0], Effect::RetryEnded));
    assert_eq!(game.prompt(), Prompt::PickIdiom);
    assert!(game
        .round()
        .proverb_options()
        .iter()
        .enumerate()
        .all(|(slot, _)| game.round().proverb_status(slot) == Some(SlotStatus::Open)));

    // The segment ended at the mismatch; the retry display is not timed.
    assert_eq!(game.total_time(), Duration::ZERO);
    clock.advance(Duration::from_secs(1));
    assert_eq!(game.total_time(), Duration::from_secs(1));
}

#[test]
fn test_language_cycle_and_summary() {
    let clock = ManualClock::new();
    let mut game = Game::new(
        shipped(StoryMode::Casual),
        settings(3),
        clock.clone(),
        SessionContext::default(),
    )
    .unwrap();

    let mut lang = game.language();
    for _ in 0..Lang::all().len() {
        clock.advance(Duration::from_secs(1));
        lang = lang.next();
        let effects = game.handle_event(GameEvent::ChangeLanguage(lang)).unwrap();
        assert!(matches!(effects[0], Effect::LanguageChanged(l) if l == lang));
        assert_eq!(game.round().language(), lang);
        assert_eq!(game.round().proverb_options().len(), 4);
    }
    assert_eq!(game.language(), Lang::En);
    assert_eq!(game.context().rounds_started, 1 + Lang::all().len());

    clock.advance(Duration::from_secs(4));
    let effects = game.handle_event(GameEvent::Leave).unwrap();
    let Some(Effect::SessionEnded(context)) = effects.last() else {
        panic!("expected session end, got {:?}", effects);
    };
    assert_eq!(context.total_time, Duration::from_secs(10));

    let summary = report::generate_summary(context, Some(StoryMode::Casual), Path::new("data"));
    assert_eq!(summary.rounds_completed, 0);
    assert_eq!(summary.seconds_per_round, None);
    assert!((summary.total_seconds - 10.0).abs() < 1e-9);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summary.yaml");
    report::save_summary(&summary, &path).unwrap();
    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.contains("mode: casual"));
    assert_eq!(OutputFormat::for_path(&path), OutputFormat::Yaml);
}

#[test]
fn test_english_only_catalog_plays_in_any_language() {
    let catalog = EntryCatalog::from_entries(
        (0..4)
            .map(|i| Entry {
                idiom: LocalizedText::english(format!("idiom {}", i)),
                proverb: LocalizedText::english(format!("proverb {}", i)),
                story: LocalizedText::english(format!("story {}", i)),
            })
            .collect(),
    );
    let clock = ManualClock::new();
    let mut game = Game::new(catalog, settings(1), clock, SessionContext::new(Lang::Sa)).unwrap();

    let view = game.view();
    assert!(view.idioms.iter().all(|idiom| idiom.text.starts_with("idiom ")));

    game.handle_event(GameEvent::PickIdiom(0)).unwrap();
    let text = proverb_for(&game, 0);
    assert!(text.starts_with("proverb "));
    game.handle_event(GameEvent::PickProverb(text)).unwrap();
    let story = game.view().feedback.unwrap().story.unwrap();
    assert!(story.starts_with("story "));
}
