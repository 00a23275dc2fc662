pub mod types;

pub use types::{Report, SummaryRow, HEADER};

use crate::github::RepoId;
use crate::stats::{self, ReviewTimes};
use colored::Colorize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report file: {0}")]
    FileWrite(#[from] std::io::Error),
}

/// Build a Report with one row per reviewer in `times`.
///
/// Rows are sorted by login so repeated runs print the same table.
pub fn build(repo: RepoId, times: &ReviewTimes) -> Report {
    let mut rows: Vec<SummaryRow> = times
        .iter()
        .filter_map(|(name, samples)| {
            stats::summarize(samples).map(|summary| SummaryRow {
                name: name.clone(),
                summary,
            })
        })
        .collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));

    Report { repo, rows }
}

/// Output the report to terminal (default) or to a markdown file.
#[instrument(skip(report), fields(repo = %report.repo, rows = report.rows.len()))]
pub fn output(report: &Report, output_path: Option<&Path>) -> Result<(), ReportError> {
    match output_path {
        None => {
            debug!("writing report to terminal");
            print_terminal_report(report);
            Ok(())
        }
        Some(path) => {
            debug!(path = %path.display(), "writing report to file");
            write_markdown_report(report, path)
        }
    }
}

/// Print the latency table to stdout, header in bold:
///
/// +-------+-----+--------------+-----+-------+
/// | Name  | p25 | p50 (Median) | p75 | Count |
/// +-------+-----+--------------+-----+-------+
/// | alice | 1m0s| ...
fn print_terminal_report(report: &Report) {
    let lines = render_table(report);
    for (i, line) in lines.iter().enumerate() {
        if i == 1 {
            println!("{}", line.bold());
        } else {
            println!("{}", line);
        }
    }
}

/// Lay out the header and rows as a bordered, left-aligned text table.
fn render_table(report: &Report) -> Vec<String> {
    let cells: Vec<[String; 5]> = report.rows.iter().map(SummaryRow::cells).collect();
    let mut widths = HEADER.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = widths
        .iter()
        .fold(String::from("+"), |mut acc, w| {
            acc.push_str(&"-".repeat(w + 2));
            acc.push('+');
            acc
        });
    let format_row = |row: &[&str]| {
        row.iter()
            .zip(&widths)
            .fold(String::from("|"), |mut acc, (cell, w)| {
                let pad = w - cell.chars().count();
                acc.push_str(&format!(" {}{} |", cell, " ".repeat(pad)));
                acc
            })
    };

    let mut lines = vec![border.clone(), format_row(&HEADER[..]), border.clone()];
    for row in &cells {
        let row: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(format_row(&row));
    }
    if !cells.is_empty() {
        lines.push(border);
    }
    lines
}

/// Write the report as a markdown file:
/// # Review latency: org/repo
///
/// | Name | p25 | p50 (Median) | p75 | Count |
/// |---|---|---|---|---|
/// | alice | 1m0s | 5m0s | 1h0m0s | 3 |
fn write_markdown_report(report: &Report, path: &Path) -> Result<(), ReportError> {
    let mut md = String::new();
    md.push_str(&format!("# Review latency: {}\n\n", report.repo));

    if report.rows.is_empty() {
        md.push_str("No submitted reviews found.\n");
    } else {
        md.push_str(&format!("| {} |\n", HEADER.join(" | ")));
        md.push_str(&format!("|{}\n", "---|".repeat(HEADER.len())));
        for row in &report.rows {
            md.push_str(&format!("| {} |\n", row.cells().join(" | ")));
        }
    }

    std::fs::write(path, md)?;
    Ok(())
}
