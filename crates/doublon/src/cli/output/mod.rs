//! Rendering and JSON serialization for CLI output.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use comfy_table::{Cell, Color, Table, presets::UTF8_FULL_CONDENSED};
use doublon_engine::{Query, ResultBundle, ScoredCandidate};
pub use doublon_highlight::{dim, error, header, subheader, success, warning};
use doublon_highlight::Highlighter;
use doublon_similarity::{MatchLevel, Signals, SimilarityScore, Thresholds};
use doublon_store::{Controversy, Proposition};

/// Prints a result bundle as pretty JSON, in the shape the HTTP API returns.
///
/// The JSON is highlighted only when stdout is a terminal, so piped output stays parseable.
pub fn output_bundle_json(bundle: &ResultBundle) -> ExitCode {
    match render_bundle_json(bundle, io::stdout().is_terminal()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Pretty JSON for `bundle`, optionally with ANSI highlighting.
fn render_bundle_json(bundle: &ResultBundle, highlight: bool) -> serde_json::Result<String> {
    let json = serde_json::to_string_pretty(bundle)?;
    if highlight {
        Ok(Highlighter::new().highlight_json(&json))
    } else {
        Ok(json)
    }
}

/// Prints one table per non-empty collection.
pub fn output_bundle_tables(
    query: &Query,
    bundle: &ResultBundle,
    thresholds: &Thresholds,
) -> ExitCode {
    println!(
        "{} {}",
        header(&format!("Similar to {:?}", query.brand_name)),
        dim(&format!("({})", query.kind))
    );
    println!();

    if bundle.is_empty() {
        println!("{}", dim("No similar records found."));
        return ExitCode::SUCCESS;
    }

    if !bundle.brands.is_empty() {
        println!("{}", subheader(&format!("Brands ({}):", bundle.brands.len())));
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["ID", "Name", "Score", "Match"]);
        for scored in &bundle.brands {
            table.add_row(vec![
                Cell::new(scored.candidate.id.to_string()),
                Cell::new(&scored.candidate.name),
                Cell::new(format!("{:.2}", scored.score.overall)),
                level_cell(thresholds, &scored.score),
            ]);
        }
        println!("{table}");
        println!();
    }

    if !bundle.controversies.is_empty() {
        println!(
            "{}",
            subheader(&format!("Controversies ({}):", bundle.controversies.len()))
        );
        println!("{}", report_table(&bundle.controversies, thresholds));
        println!();
    }

    if !bundle.propositions.is_empty() {
        println!(
            "{}",
            subheader(&format!("Pending propositions ({}):", bundle.propositions.len()))
        );
        println!("{}", report_table(&bundle.propositions, thresholds));
        println!();
    }

    ExitCode::SUCCESS
}

/// Columns shown for controversies and propositions beyond their [`Signals`].
trait ReportRow: Signals {
    /// Record key.
    fn id(&self) -> String;
}

impl ReportRow for Controversy {
    fn id(&self) -> String {
        self.id.to_string()
    }
}

impl ReportRow for Proposition {
    fn id(&self) -> String {
        self.id.to_string()
    }
}

/// Builds the table for controversies or propositions.
fn report_table<T: ReportRow>(rows: &[ScoredCandidate<T>], thresholds: &Thresholds) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        "ID", "Brand", "Title", "Date", "Name", "Desc", "Year", "Score", "Match",
    ]);
    for scored in rows {
        let row = &scored.candidate;
        let score = &scored.score;
        table.add_row(vec![
            Cell::new(row.id()),
            Cell::new(row.brand_name()),
            Cell::new(truncate(row.description().unwrap_or(""), 48)),
            Cell::new(row.occurred_on().unwrap_or("")),
            Cell::new(format!("{:.2}", score.name)),
            Cell::new(format!("{:.2}", score.description)),
            Cell::new(format!("{:.0}", score.date)),
            Cell::new(format!("{:.2}", score.overall)),
            level_cell(thresholds, score),
        ]);
    }
    table
}

/// Colored match label for a score.
fn level_cell(thresholds: &Thresholds, score: &SimilarityScore) -> Cell {
    match thresholds.level(score.overall) {
        Some(level @ MatchLevel::High) => Cell::new(level.label()).fg(Color::Red),
        Some(level @ MatchLevel::Medium) => Cell::new(level.label()).fg(Color::Yellow),
        Some(level @ MatchLevel::Low) => Cell::new(level.label()),
        None => Cell::new(""),
    }
}

/// Shortens `text` to at most `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}
