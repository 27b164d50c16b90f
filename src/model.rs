use serde::{Deserialize, Serialize};

/// A step owned by exactly one task. The id is synthesized at assembly time
/// as `<task_id>-<1-based position>` and is only stable within one load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: String,
    pub task_id: String,
    pub title: String,
    pub instructions: String,
    pub deliverables: String,
    pub estimated_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_files: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_content: Option<String>,
}

/// A top-level unit of work in the dependency network.
///
/// `overview` and `tips`/`reason` are alternative annotation columns; which
/// set is populated depends on the active [`crate::schema::DatasetSchema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checklist: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<SubTask>,
}

impl Task {
    pub fn total_estimated_hours(&self) -> f64 {
        self.subtasks.iter().map(|s| s.estimated_hours).sum()
    }
}
