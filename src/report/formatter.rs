// SPDX-License-Identifier: PMPL-1.0-or-later

//! Console formatting for summaries, catalog inspections and dealt rounds

use crate::catalog::CatalogInspection;
use crate::i18n::{language_name, t, Lang};
use crate::report::output::OutputFormat;
use crate::report::summary::SessionSummary;
use crate::round::RoundState;
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn print_summary(&self, summary: &SessionSummary) {
        let lang = summary.language;
        println!("\n{}", format!("=== {} ===", t(lang, "summary.title")).bold().cyan());
        if let Some(mode) = summary.mode {
            println!("  Mode: {}", mode);
        }
        println!(
            "  Language: {}",
            language_name(lang.code()).unwrap_or(lang.code())
        );
        println!(
            "  {}: {}",
            t(lang, "summary.rounds"),
            summary.rounds_completed.to_string().bold()
        );
        println!(
            "  {}: {}",
            t(lang, "summary.matches"),
            summary.correct_matches.to_string().green()
        );
        println!(
            "  {}: {}",
            t(lang, "summary.mistakes"),
            summary.wrong_matches.to_string().red()
        );
        println!(
            "  {}: {:.1}s",
            t(lang, "summary.total_time"),
            summary.total_seconds
        );

        let accuracy_color = if summary.accuracy >= 0.8 {
            "green"
        } else if summary.accuracy >= 0.5 {
            "yellow"
        } else {
            "red"
        };
        println!(
            "  Accuracy: {}",
            format!("{:.0}%", summary.accuracy * 100.0)
                .color(accuracy_color)
                .bold()
        );
        if let Some(pace) = summary.seconds_per_round {
            println!("  Average round: {:.1}s", pace);
        }
    }

    pub fn print_inspection(&self, inspection: &CatalogInspection) {
        println!("{}", "CATALOG INSPECTION".bold().yellow());
        println!("  Source: {}", inspection.source.display());
        println!("  Language: {}", inspection.language);
        println!("  Entries: {}", inspection.total_entries);
        println!("  Usable entries: {}", inspection.usable_entries);
        println!("  Unique idioms: {}", inspection.unique_idioms);
        println!(
            "  Largest round: {} slots",
            inspection.max_slots.to_string().bold()
        );

        if inspection.language != Lang::En {
            println!();
            println!("  Missing translations (falling back to English):");
            println!("    Idioms: {}", count_color(inspection.missing_idioms));
            println!("    Proverbs: {}", count_color(inspection.missing_proverbs));
            println!("    Stories: {}", count_color(inspection.missing_stories));
        }

        if !inspection.duplicate_proverbs.is_empty() {
            println!();
            println!("  {}", "Duplicate proverb texts:".red().bold());
            for (text, owners) in &inspection.duplicate_proverbs {
                println!("    - {} (entries {:?})", text, owners);
            }
        }

        println!();
        if inspection.has_findings() {
            println!("{}", "Findings reported above".yellow());
        } else {
            println!("{}", "No data-quality findings".green());
        }
    }

    pub fn print_round(&self, round: &RoundState) {
        println!("{}", "IDIOMS".bold().yellow());
        for slot in 0..round.slot_count() {
            println!("  {}. {}", slot + 1, round.idiom_text(slot).unwrap_or_default());
        }
        println!();
        println!("{}", "PROVERBS".bold().yellow());
        for (slot, text) in round.proverb_options().iter().enumerate() {
            println!("  {}. {}", slot_letter(slot), text);
        }
    }

    pub fn save<T: serde::Serialize, P: AsRef<Path>>(&self, value: &T, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = OutputFormat::for_path(path).serialize(value)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        println!("Saved to: {}", path.display());
        Ok(())
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Key label for a proverb slot: `a`, `b`, ...
pub fn slot_letter(slot: usize) -> char {
    u8::try_from(slot)
        .ok()
        .filter(|s| *s < 26)
        .map(|s| char::from(b'a' + s))
        .unwrap_or('?')
}

fn count_color(count: usize) -> ColoredString {
    if count == 0 {
        count.to_string().green()
    } else {
        count.to_string().yellow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_letters() {
        assert_eq!(slot_letter(0), 'a');
        assert_eq!(slot_letter(25), 'z');
        assert_eq!(slot_letter(26), '?');
    }
}
