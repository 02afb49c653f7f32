// SPDX-License-Identifier: PMPL-1.0-or-later

//! Session summaries, console output and the terminal front-end

pub mod formatter;
pub mod output;
pub mod summary;
pub mod tui;

use crate::session::SessionContext;
use crate::types::StoryMode;
use anyhow::Result;
use std::path::Path;

pub use formatter::ReportFormatter;
pub use output::OutputFormat;
pub use summary::SessionSummary;
pub use tui::PlayTui;

/// Summarize a finished session
pub fn generate_summary(
    context: &SessionContext,
    mode: Option<StoryMode>,
    catalog: &Path,
) -> SessionSummary {
    summary::summarize(context, mode, catalog)
}

/// Save a summary to file; format follows the extension
pub fn save_summary<P: AsRef<Path>>(summary: &SessionSummary, path: P) -> Result<()> {
    let formatter = ReportFormatter::new();
    formatter.save(summary, path)
}

/// Print a summary to console
pub fn print_summary(summary: &SessionSummary) {
    let formatter = ReportFormatter::new();
    formatter.print_summary(summary);
}
