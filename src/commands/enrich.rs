use std::fs;
use std::path::Path;

use colored::Colorize;

use crate::assemble::DETAIL_CONTENT_COLUMN;
use crate::csv;
use crate::error::{PlanmapError, Result};
use crate::source::{ENRICHED_SUBTASKS_FILE, SUBTASKS_FILE};

/// Pre-join referenced documents into the subtasks table.
///
/// Reads `subtasks.csv` from the data directory, resolves each row's
/// `template_files` path under the document root, and writes
/// `subtasks_with_content.csv` with an appended `detail_content` column.
/// A missing or unreadable document logs a warning and embeds an empty
/// string; processing continues.
pub fn run(data_dir: &Path, docs_dir: &Path) -> Result<()> {
    let input = data_dir.join(SUBTASKS_FILE);
    let output = data_dir.join(ENRICHED_SUBTASKS_FILE);

    println!("reading {}", input.display());
    let content = fs::read_to_string(&input).map_err(|e| PlanmapError::TableUnavailable {
        table: "subtasks",
        detail: format!("{}: {e}", input.display()),
    })?;

    let rows = csv::parse_document(&content);
    if rows.is_empty() {
        return Err(PlanmapError::EmptyTable { table: "subtasks" });
    }

    let header = &rows[0];
    let template_index = header
        .iter()
        .position(|c| c == "template_files")
        .ok_or_else(|| PlanmapError::ColumnMissing {
            column: "template_files",
            path: input.display().to_string(),
        })?;

    let mut new_header = header.clone();
    new_header.push(DETAIL_CONTENT_COLUMN.to_string());

    let mut out_rows = Vec::with_capacity(rows.len());
    out_rows.push(new_header);

    let mut embedded = 0usize;
    for row in &rows[1..] {
        let reference = row
            .get(template_index)
            .map(String::as_str)
            .unwrap_or("")
            .trim();

        let detail = if reference.is_empty() {
            String::new()
        } else {
            let path = docs_dir.join(reference.trim_start_matches('/'));
            match fs::read_to_string(&path) {
                Ok(text) => {
                    println!("  {} ({} bytes)", reference, text.len());
                    embedded += 1;
                    text
                }
                Err(e) => {
                    eprintln!("{} {}: {e}", "warning:".yellow().bold(), path.display());
                    String::new()
                }
            }
        };

        let mut new_row = row.clone();
        new_row.push(detail);
        out_rows.push(new_row);
    }

    fs::write(&output, csv::write_document(&out_rows))?;
    println!(
        "wrote {} ({} rows, {} with detail content)",
        output.display(),
        out_rows.len() - 1,
        embedded
    );
    Ok(())
}
