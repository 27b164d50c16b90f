//! Dataset schema configuration.
//!
//! The observed datasets drift in two ways: dependency/checklist cells are
//! joined with either `,` or `|`, and the free-text annotation on a task is
//! either a single `overview` column or a `tips` + `reason` pair. Rather than
//! branching per dataset, the assembler is parameterized by this config,
//! which can be loaded from a JSON file via `--schema`.
//!
//! Category labels are not part of this config: the graph layer keys its
//! color table on the snake_case phase labels listed at
//! [`crate::graph::category_color`], and anything else renders in the
//! neutral default color rather than erroring.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlanmapError, Result};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListDelimiter {
    #[default]
    Comma,
    Pipe,
}

impl ListDelimiter {
    pub fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Pipe => '|',
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationColumns {
    /// A single `overview` column.
    #[default]
    Overview,
    /// Separate `tips` and `reason` columns.
    TipsReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSchema {
    pub dependency_delimiter: ListDelimiter,
    pub checklist_delimiter: ListDelimiter,
    pub annotations: AnnotationColumns,
}

impl Default for DatasetSchema {
    /// The shipped dataset: comma-joined dependencies, pipe-joined checklist,
    /// `overview` annotation.
    fn default() -> Self {
        Self {
            dependency_delimiter: ListDelimiter::Comma,
            checklist_delimiter: ListDelimiter::Pipe,
            annotations: AnnotationColumns::Overview,
        }
    }
}

impl DatasetSchema {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| PlanmapError::SchemaConfig {
            detail: format!("{}: {e}", path.display()),
        })?;
        serde_json::from_str(&data).map_err(|e| PlanmapError::SchemaConfig {
            detail: format!("{}: {e}", path.display()),
        })
    }
}

/// Split a delimiter-joined cell into entries: trim each, drop empties.
pub fn split_list(value: &str, delimiter: ListDelimiter) -> Vec<String> {
    value
        .split(delimiter.as_char())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_drops_empty_entries() {
        assert_eq!(
            split_list("t1, t2 ,t3", ListDelimiter::Comma),
            vec!["t1", "t2", "t3"]
        );
        assert_eq!(split_list("", ListDelimiter::Comma), Vec::<String>::new());
        assert_eq!(split_list(" , ,", ListDelimiter::Comma), Vec::<String>::new());
        assert_eq!(
            split_list("a|b| c ", ListDelimiter::Pipe),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn default_schema_matches_shipped_dataset() {
        let schema = DatasetSchema::default();
        assert_eq!(schema.dependency_delimiter, ListDelimiter::Comma);
        assert_eq!(schema.checklist_delimiter, ListDelimiter::Pipe);
        assert_eq!(schema.annotations, AnnotationColumns::Overview);
    }

    #[test]
    fn schema_json_overrides_are_partial() {
        let schema: DatasetSchema =
            serde_json::from_str(r#"{"dependency_delimiter":"pipe","annotations":"tips_reason"}"#)
                .unwrap();
        assert_eq!(schema.dependency_delimiter, ListDelimiter::Pipe);
        assert_eq!(schema.checklist_delimiter, ListDelimiter::Pipe);
        assert_eq!(schema.annotations, AnnotationColumns::TipsReason);
    }
}
