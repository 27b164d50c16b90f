//! Fetching raw CSV text and referenced documents.
//!
//! Two source modes: a local data directory, or a published Google
//! Spreadsheet's per-sheet CSV export endpoints. Both table fetches are
//! issued concurrently and awaited together; failure of either one is fatal
//! to the load and surfaces an actionable error.

use std::path::{Path, PathBuf};

use crate::error::{PlanmapError, Result};

pub const TASKS_FILE: &str = "tasks.csv";
pub const SUBTASKS_FILE: &str = "subtasks.csv";
/// Output of the enrichment tool; preferred over the raw subtasks table when
/// present so production loads skip the per-subtask document fetches.
pub const ENRICHED_SUBTASKS_FILE: &str = "subtasks_with_content.csv";

#[derive(Debug, Clone)]
pub enum DataSource {
    /// CSV files under a local directory.
    Local { dir: PathBuf },
    /// A spreadsheet published to the web, addressed by its `/d/e/...` token
    /// and per-sheet gids.
    Sheet {
        spreadsheet: String,
        tasks_gid: String,
        subtasks_gid: String,
    },
}

impl DataSource {
    /// Fetch the raw tasks and subtasks tables, concurrently.
    pub async fn fetch_tables(&self) -> Result<(String, String)> {
        match self {
            Self::Local { dir } => tokio::try_join!(
                read_local_table(dir, "tasks", &[TASKS_FILE]),
                read_local_table(dir, "subtasks", &[ENRICHED_SUBTASKS_FILE, SUBTASKS_FILE]),
            ),
            Self::Sheet {
                spreadsheet,
                tasks_gid,
                subtasks_gid,
            } => {
                let client = reqwest::Client::new();
                tokio::try_join!(
                    fetch_sheet(&client, spreadsheet, tasks_gid, "tasks"),
                    fetch_sheet(&client, spreadsheet, subtasks_gid, "subtasks"),
                )
            }
        }
    }
}

async fn read_local_table(dir: &Path, table: &'static str, candidates: &[&str]) -> Result<String> {
    for name in candidates {
        let path = dir.join(name);
        if path.exists() {
            return tokio::fs::read_to_string(&path).await.map_err(|e| {
                PlanmapError::TableUnavailable {
                    table,
                    detail: format!("{}: {e}", path.display()),
                }
            });
        }
    }
    Err(PlanmapError::TableUnavailable {
        table,
        detail: format!(
            "no {} under {} (check --data-dir, or use --sheet for a published spreadsheet)",
            candidates.join(" or "),
            dir.display()
        ),
    })
}

pub fn sheet_export_url(spreadsheet: &str, gid: &str) -> String {
    format!(
        "https://docs.google.com/spreadsheets/d/e/{spreadsheet}/pub?gid={gid}&single=true&output=csv"
    )
}

async fn fetch_sheet(
    client: &reqwest::Client,
    spreadsheet: &str,
    gid: &str,
    table: &'static str,
) -> Result<String> {
    let url = sheet_export_url(spreadsheet, gid);
    let response =
        client
            .get(&url)
            .send()
            .await
            .map_err(|e| PlanmapError::TableUnavailable {
                table,
                detail: format!("{url}: {e}"),
            })?;
    let status = response.status();
    // The export endpoint answers 400 for an unknown gid, not 404.
    if status == reqwest::StatusCode::BAD_REQUEST {
        return Err(PlanmapError::SheetExportRejected { table });
    }
    if !status.is_success() {
        return Err(PlanmapError::SheetExportStatus {
            table,
            status: status.as_u16(),
        });
    }
    Ok(response.text().await?)
}

/// Where `template_files` references resolve to.
#[derive(Debug, Clone)]
pub enum DocumentRoot {
    Local(PathBuf),
    Remote(String),
}

impl DocumentRoot {
    pub async fn fetch(&self, reference: &str) -> Result<String> {
        match self {
            Self::Local(dir) => {
                let path = dir.join(reference.trim_start_matches('/'));
                tokio::fs::read_to_string(&path).await.map_err(|e| {
                    PlanmapError::DocumentUnavailable {
                        reference: reference.to_string(),
                        detail: format!("{}: {e}", path.display()),
                    }
                })
            }
            Self::Remote(base) => {
                // Relative references are rooted before joining the base URL.
                let normalized = if reference.starts_with('/') {
                    reference.to_string()
                } else {
                    format!("/{reference}")
                };
                let url = format!("{}{normalized}", base.trim_end_matches('/'));
                let response = reqwest::get(&url).await.map_err(|e| {
                    PlanmapError::DocumentUnavailable {
                        reference: reference.to_string(),
                        detail: e.to_string(),
                    }
                })?;
                if !response.status().is_success() {
                    return Err(PlanmapError::DocumentUnavailable {
                        reference: reference.to_string(),
                        detail: format!("HTTP {}", response.status().as_u16()),
                    });
                }
                Ok(response.text().await?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn local_source_reads_both_tables_when_present() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(TASKS_FILE), "id,title\n").unwrap();
        fs::write(dir.path().join(SUBTASKS_FILE), "task_id,title\n").unwrap();

        let source = DataSource::Local {
            dir: dir.path().to_path_buf(),
        };
        let (tasks, subtasks) = source.fetch_tables().await.unwrap();
        assert_eq!(tasks, "id,title\n");
        assert_eq!(subtasks, "task_id,title\n");
    }

    #[tokio::test]
    async fn enriched_subtasks_table_wins_over_raw() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(TASKS_FILE), "id\n").unwrap();
        fs::write(dir.path().join(SUBTASKS_FILE), "raw\n").unwrap();
        fs::write(dir.path().join(ENRICHED_SUBTASKS_FILE), "enriched\n").unwrap();

        let source = DataSource::Local {
            dir: dir.path().to_path_buf(),
        };
        let (_, subtasks) = source.fetch_tables().await.unwrap();
        assert_eq!(subtasks, "enriched\n");
    }

    #[tokio::test]
    async fn missing_tasks_table_is_a_descriptive_fatal_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SUBTASKS_FILE), "task_id\n").unwrap();

        let source = DataSource::Local {
            dir: dir.path().to_path_buf(),
        };
        let err = source.fetch_tables().await.unwrap_err();
        assert_eq!(err.code(), "table_unavailable");
        let message = err.to_string();
        assert!(message.contains("tasks table"));
        assert!(message.contains("--data-dir"));
    }

    #[tokio::test]
    async fn local_document_root_resolves_rooted_references() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("templates")).unwrap();
        fs::write(dir.path().join("templates/venue.md"), "# Venue\n").unwrap();

        let root = DocumentRoot::Local(dir.path().to_path_buf());
        // With and without the leading slash.
        assert_eq!(root.fetch("templates/venue.md").await.unwrap(), "# Venue\n");
        assert_eq!(root.fetch("/templates/venue.md").await.unwrap(), "# Venue\n");
    }

    #[test]
    fn sheet_export_url_shape() {
        assert_eq!(
            sheet_export_url("2PACX-abc", "123"),
            "https://docs.google.com/spreadsheets/d/e/2PACX-abc/pub?gid=123&single=true&output=csv"
        );
    }
}
