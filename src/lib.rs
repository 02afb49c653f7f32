// SPDX-License-Identifier: PMPL-1.0-or-later

//! Idiom-Match: the game core of an idiom/proverb matching game.
//!
//! Players pair idioms with proverbs, read the story behind each pair and
//! play round after round in any of six Indian languages. This crate holds
//! everything except rendering and input:
//!
//! 1. **Catalog**: loads the per-mode entry files.
//! 2. **Round**: deals unique, shuffled idiom/proverb slots.
//! 3. **Judge**: decides whether a picked pair belongs together.
//! 4. **Session**: the event-driven round state machine and its timer.
//! 5. **I18n**: language selection for catalog text and game prompts.

pub mod catalog;
pub mod config;
pub mod error;
pub mod i18n;
pub mod judge;
pub mod report;
pub mod round;
pub mod session;
pub mod types;

pub use error::{DataLoadError, GameError};
