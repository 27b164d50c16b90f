//! Joining the parsed tasks and subtasks tables into the nested task graph.
//!
//! Subtasks are grouped by `task_id` in first-seen order and attached to
//! their owning task; tasks keep the table's row order. Document fetches for
//! `template_files` references fan out concurrently and are joined before
//! assembly returns; an individual failure degrades to a placeholder string
//! and never fails the load.

use std::collections::HashMap;

use tokio::task::JoinSet;

use crate::csv::Table;
use crate::model::{SubTask, Task};
use crate::schema::{AnnotationColumns, DatasetSchema, split_list};
use crate::source::DocumentRoot;

/// Substituted for `template_content` when a referenced document cannot be
/// retrieved.
pub const DETAIL_FETCH_PLACEHOLDER: &str = "failed to load subtask detail";

/// Column added by the enrichment tool. When the subtasks table carries this
/// header the dataset is treated as pre-joined and no document fetches are
/// made, even for rows whose embedded value is empty.
pub const DETAIL_CONTENT_COLUMN: &str = "detail_content";

/// Assemble the task dataset from the two parsed tables.
///
/// Subtask rows whose `task_id` matches no task are dropped silently, and
/// dependency entries pointing at unknown task ids are kept as-is; neither is
/// validated here.
pub async fn assemble(
    tasks: &Table,
    subtasks: &Table,
    schema: &DatasetSchema,
    docs: Option<&DocumentRoot>,
) -> Vec<Task> {
    let enriched = subtasks.has_column(DETAIL_CONTENT_COLUMN);

    // Grouped subtasks, keyed by task_id in first-seen order.
    let mut groups: Vec<(String, Vec<SubTask>)> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();
    // (group, position, reference) for the fetch fan-out below.
    let mut pending: Vec<(usize, usize, String)> = Vec::new();

    for row in subtasks.rows() {
        let task_id = row.get("task_id").to_string();
        let gi = *group_index.entry(task_id.clone()).or_insert_with(|| {
            groups.push((task_id.clone(), Vec::new()));
            groups.len() - 1
        });
        let position = groups[gi].1.len();
        // Trimmed like the enrichment tool trims it, so a whitespace-only
        // cell is a blank reference, not a doomed fetch.
        let template_files = non_empty(row.get("template_files").trim());

        let mut subtask = SubTask {
            id: format!("{task_id}-{}", position + 1),
            task_id,
            title: row.get("title").to_string(),
            instructions: row.get("instructions").to_string(),
            deliverables: row.get("deliverables").to_string(),
            estimated_hours: row.get("estimated_hours").trim().parse().unwrap_or(0.0),
            template_files: template_files.clone(),
            template_content: None,
        };

        if let Some(embedded) = non_empty(row.get(DETAIL_CONTENT_COLUMN)) {
            subtask.template_content = Some(embedded);
        } else if !enriched
            && docs.is_some()
            && let Some(reference) = template_files
        {
            pending.push((gi, position, reference));
        }

        groups[gi].1.push(subtask);
    }

    if let Some(root) = docs
        && !pending.is_empty()
    {
        let mut fetches = JoinSet::new();
        for (gi, position, reference) in pending {
            let root = root.clone();
            fetches.spawn(async move {
                let content = root
                    .fetch(&reference)
                    .await
                    .unwrap_or_else(|_| DETAIL_FETCH_PLACEHOLDER.to_string());
                (gi, position, content)
            });
        }
        while let Some(joined) = fetches.join_next().await {
            if let Ok((gi, position, content)) = joined {
                groups[gi].1[position].template_content = Some(content);
            }
        }
    }

    let mut subtasks_by_task: HashMap<String, Vec<SubTask>> = groups.into_iter().collect();

    tasks
        .rows()
        .map(|row| {
            let id = row.get("id").to_string();
            let (overview, tips, reason) = match schema.annotations {
                AnnotationColumns::Overview => (non_empty(row.get("overview")), None, None),
                AnnotationColumns::TipsReason => (
                    None,
                    non_empty(row.get("tips")),
                    non_empty(row.get("reason")),
                ),
            };
            Task {
                title: row.get("title").to_string(),
                category: row.get("category").to_string(),
                dependencies: split_list(row.get("dependencies"), schema.dependency_delimiter),
                checklist: split_list(row.get("checklist"), schema.checklist_delimiter),
                overview,
                tips,
                reason,
                subtasks: subtasks_by_task.remove(&id).unwrap_or_default(),
                id,
            }
        })
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
