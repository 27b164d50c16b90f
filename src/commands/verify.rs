use std::fs;
use std::path::Path;

use colored::Colorize;

use crate::assemble::DETAIL_CONTENT_COLUMN;
use crate::csv;
use crate::error::{PlanmapError, Result};
use crate::source::ENRICHED_SUBTASKS_FILE;

/// Structural integrity report for an enriched subtasks CSV.
///
/// Re-parses the file the enrichment tool produced and reports: column
/// names, row count, presence of the `detail_content` column, per-row field
/// counts against the header, and content samples. Findings are printed, not
/// raised; the process exits 1 when a structural check fails.
pub fn run(data_dir: &Path) -> Result<()> {
    let path = data_dir.join(ENRICHED_SUBTASKS_FILE);
    println!("verifying {}", path.display());

    let content = fs::read_to_string(&path).map_err(|e| PlanmapError::TableUnavailable {
        table: "subtasks",
        detail: format!("{}: {e} (run `planmap enrich` first)", path.display()),
    })?;
    println!("  file size: {:.2} KB", content.len() as f64 / 1024.0);

    let rows = csv::parse_document(&content);
    let mut ok = true;

    if rows.is_empty() {
        println!("  {} no rows parsed", "FAIL".red());
        std::process::exit(1);
    }

    let header = &rows[0];
    println!("  columns ({}): {}", header.len(), header.join(", "));
    println!("  data rows: {}", rows.len() - 1);

    let detail_index = header.iter().position(|c| c == DETAIL_CONTENT_COLUMN);
    match detail_index {
        Some(i) => println!("  [{}] {} column present (index {i})", "PASS".green(), DETAIL_CONTENT_COLUMN),
        None => {
            println!("  [{}] {} column missing", "FAIL".red(), DETAIL_CONTENT_COLUMN);
            ok = false;
        }
    }

    let mut ragged = 0usize;
    for (i, row) in rows.iter().enumerate().skip(1) {
        if row.len() != header.len() {
            println!(
                "  [{}] row {i} has {} fields (expected {})",
                "FAIL".red(),
                row.len(),
                header.len()
            );
            ragged += 1;
        }
    }
    if ragged == 0 {
        println!("  [{}] every row matches the header field count", "PASS".green());
    } else {
        ok = false;
    }

    if let Some(detail_index) = detail_index {
        let title_index = header.iter().position(|c| c == "title");
        let samples = rows.len().saturating_sub(1).min(5);
        if samples > 0 {
            println!("  samples:");
        }
        for row in rows.iter().skip(1).take(samples) {
            let title = title_index
                .and_then(|i| row.get(i))
                .map(String::as_str)
                .filter(|t| !t.is_empty())
                .unwrap_or("(no title)");
            let detail = row.get(detail_index).map(String::as_str).unwrap_or("");
            let preview: String = detail.chars().take(50).collect();
            println!(
                "    {title}: {} bytes, {} lines | {}",
                detail.len(),
                detail.lines().count(),
                preview.replace('\n', "\\n")
            );
        }
    }

    if !ok {
        std::process::exit(1);
    }
    println!("verification complete");
    Ok(())
}
