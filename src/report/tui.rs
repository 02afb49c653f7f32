// SPDX-License-Identifier: PMPL-1.0-or-later

//! Terminal front-end for playing rounds

use crate::i18n::{native_name, t};
use crate::report::formatter::slot_letter;
use crate::round::{Phase, SlotStatus};
use crate::session::{Clock, Effect, Game, GameEvent, GameView, SessionContext};
use anyhow::Result;
use colored::*;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};
use std::time::Duration;
use tracing::{debug, warn};

const REFRESH: Duration = Duration::from_millis(100);

/// What the play loop does after one event.
#[derive(Debug)]
enum Step {
    /// Keep playing; carries a message to show when the event failed.
    Continue(Option<String>),
    Ended(SessionContext),
}

/// Feed one event to the game. A failed event leaves the current round in
/// play, so the error becomes a notice instead of ending the session.
fn step<C: Clock>(game: &mut Game<C>, event: GameEvent) -> Step {
    match game.handle_event(event) {
        Ok(effects) => {
            for effect in effects {
                debug!(?effect, "effect");
                if let Effect::SessionEnded(context) = effect {
                    return Step::Ended(context);
                }
            }
            Step::Continue(None)
        }
        Err(err) => {
            warn!(error = %err, "event failed");
            Step::Continue(Some(err.to_string()))
        }
    }
}

pub struct PlayTui;

impl PlayTui {
    /// Play until the player leaves; returns the final session context.
    pub fn run<C: Clock>(game: &mut Game<C>) -> Result<SessionContext> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        let result = Self::run_inner(game);
        execute!(out, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        result
    }

    fn run_inner<C: Clock>(game: &mut Game<C>) -> Result<SessionContext> {
        let mut stdout = stdout();
        let mut notice: Option<String> = None;
        loop {
            Self::render(&mut stdout, &game.view(), notice.as_deref())?;

            // Wake for the wrong-match deadline or the next timer refresh.
            let timeout = game
                .time_until_deadline()
                .map(|left| left.min(REFRESH))
                .unwrap_or(REFRESH);

            let game_event = if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => Self::map_key(key, game),
                    _ => None,
                }
            } else {
                Some(GameEvent::Tick)
            };

            let Some(game_event) = game_event else {
                continue;
            };
            let is_tick = game_event == GameEvent::Tick;
            match step(game, game_event) {
                Step::Ended(context) => return Ok(context),
                Step::Continue(Some(message)) => notice = Some(message),
                // A notice stays up until the player does something else.
                Step::Continue(None) if !is_tick => notice = None,
                Step::Continue(None) => {}
            }
        }
    }

    fn map_key<C: Clock>(key: KeyEvent, game: &Game<C>) -> Option<GameEvent> {
        let KeyEvent {
            code, modifiers, ..
        } = key;
        match code {
            KeyCode::Esc => Some(GameEvent::Leave),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(GameEvent::Leave)
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(GameEvent::DismissStory),
            KeyCode::Tab => Some(GameEvent::ChangeLanguage(game.language().next())),
            KeyCode::Char(c @ '1'..='9') => {
                let slot = c.to_digit(10).map(|d| d as usize - 1)?;
                Some(GameEvent::PickIdiom(slot))
            }
            KeyCode::Char(c @ 'a'..='z') => {
                let slot = (c as u8 - b'a') as usize;
                game.round()
                    .proverb_options()
                    .get(slot)
                    .map(|text| GameEvent::PickProverb(text.clone()))
            }
            _ => None,
        }
    }

    fn render(stdout: &mut impl Write, view: &GameView, notice: Option<&str>) -> Result<()> {
        execute!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        let lang = view.language;
        writeln!(
            stdout,
            "{}  {}\r",
            "IDIOM MATCH".bold().cyan(),
            format!(
                "[{}] round {} ┃ {}/{}",
                native_name(lang.code()).unwrap_or(lang.code()),
                view.round_number,
                view.matched,
                view.slots
            )
            .dimmed()
        )?;
        writeln!(stdout, "{}\r", view.timer_text())?;
        writeln!(stdout, "\r")?;

        for (slot, idiom) in view.idioms.iter().enumerate() {
            writeln!(
                stdout,
                "  {} {}\r",
                format!("{}.", slot + 1).bold(),
                paint(&idiom.text, idiom.status)
            )?;
        }
        writeln!(stdout, "\r")?;
        for (slot, proverb) in view.proverbs.iter().enumerate() {
            writeln!(
                stdout,
                "  {} {}\r",
                format!("{}.", slot_letter(slot)).bold(),
                paint(&proverb.text, proverb.status)
            )?;
        }
        writeln!(stdout, "\r")?;

        if let Some(feedback) = &view.feedback {
            let headline = if feedback.correct {
                feedback.headline.green().bold()
            } else {
                feedback.headline.red().bold()
            };
            writeln!(stdout, "{}\r", headline)?;
            writeln!(stdout, "{}\r", feedback.pair)?;
            if let Some(story) = &feedback.story {
                writeln!(stdout, "\r")?;
                for line in story.lines() {
                    writeln!(stdout, "{}\r", line)?;
                }
            }
            writeln!(stdout, "\r")?;
        }

        let prompt = match view.phase {
            Phase::RetryDisplay => view.prompt.yellow(),
            _ => view.prompt.normal(),
        };
        writeln!(stdout, "{}\r", prompt)?;
        if let Some(notice) = notice {
            writeln!(stdout, "{}\r", notice.red())?;
        }
        writeln!(stdout, "\r")?;
        writeln!(
            stdout,
            "{}\r",
            format!(
                "Controls: [1-9] Idiom, [a-z] Proverb, [Enter] {}, [Tab] Language, [Esc] Quit",
                t(lang, "story.continue")
            )
            .dimmed()
        )?;
        stdout.flush()?;
        Ok(())
    }
}

fn paint(text: &str, status: SlotStatus) -> ColoredString {
    match status {
        SlotStatus::Open => text.normal(),
        SlotStatus::Selected => text.black().on_yellow(),
        SlotStatus::Matched => text.green().dimmed(),
        SlotStatus::Wrong => text.white().on_red(),
    }
}
