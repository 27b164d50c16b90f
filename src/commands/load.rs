use crate::assemble::assemble;
use crate::csv::Table;
use crate::error::{PlanmapError, Result};
use crate::model::Task;
use crate::output::{self, Format};
use crate::schema::DatasetSchema;
use crate::source::{DataSource, DocumentRoot};

/// Fetch both tables, parse them, and assemble the task dataset.
///
/// The whole dataset is rebuilt from scratch on every call; there is no
/// caching across loads.
pub async fn load_dataset(
    source: &DataSource,
    schema: &DatasetSchema,
    docs: Option<&DocumentRoot>,
) -> Result<Vec<Task>> {
    let (tasks_csv, subtasks_csv) = source.fetch_tables().await?;
    let tasks = Table::parse(&tasks_csv).ok_or(PlanmapError::EmptyTable { table: "tasks" })?;
    let subtasks =
        Table::parse(&subtasks_csv).ok_or(PlanmapError::EmptyTable { table: "subtasks" })?;
    Ok(assemble(&tasks, &subtasks, schema, docs).await)
}

/// Load the dataset and print it.
pub async fn run(
    source: &DataSource,
    schema: &DatasetSchema,
    docs: Option<&DocumentRoot>,
    format: Format,
) -> Result<()> {
    let tasks = load_dataset(source, schema, docs).await?;
    output::print_tasks(&tasks, format)
}
