//! Adapter from the assembled task list to the node/edge structures the
//! external layered-layout renderer consumes. Positions are never computed
//! here; the renderer runs its own dagre-style algorithm from the layout
//! hints and size hints supplied below.

use serde::Serialize;

use crate::model::Task;

pub const NODE_WIDTH: u32 = 200;
pub const NODE_HEIGHT: u32 = 80;

pub const RANK_DIRECTION: &str = "LR";
pub const RANK_SEPARATION: u32 = 100;
pub const NODE_SEPARATION: u32 = 30;

const DEFAULT_NODE_COLOR: &str = "#ffffff";

/// Background color per category, phase-ordered from planning to follow-up.
///
/// The keys are the category labels this crate's datasets ship: the
/// snake_case phase names below. Datasets using other label conventions
/// (translations included) render every node in the neutral default until
/// their `category` column is mapped onto these labels; the color table is a
/// presentation constant, deliberately not part of [`crate::schema::DatasetSchema`].
pub fn category_color(category: &str) -> &'static str {
    match category {
        "planning" => "#bfdbfe",
        "preparation" => "#bbf7d0",
        "final_week" => "#fed7aa",
        "event_day" => "#fca5a5",
        "wrap_up" => "#d1d5db",
        _ => DEFAULT_NODE_COLOR,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub color: String,
    /// The full task payload, carried opaquely for detail lookup on click.
    pub data: Task,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LayoutHints {
    pub rank_direction: &'static str,
    pub rank_separation: u32,
    pub node_separation: u32,
}

#[derive(Debug, Serialize)]
pub struct TaskGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub layout: LayoutHints,
}

/// One node per task, one directed edge per (prerequisite, dependent) pair.
///
/// Edges whose source id matches no node are emitted as-is, and no cycle
/// check is made; both are left to the consuming layout component.
pub fn build_graph(tasks: &[Task]) -> TaskGraph {
    let nodes = tasks
        .iter()
        .map(|task| GraphNode {
            id: task.id.clone(),
            label: task.title.clone(),
            width: NODE_WIDTH,
            height: NODE_HEIGHT,
            color: category_color(&task.category).to_string(),
            data: task.clone(),
        })
        .collect();

    let mut edges = Vec::new();
    for task in tasks {
        for dep in &task.dependencies {
            edges.push(GraphEdge {
                id: format!("e{dep}-{}", task.id),
                source: dep.clone(),
                target: task.id.clone(),
            });
        }
    }

    TaskGraph {
        nodes,
        edges,
        layout: LayoutHints {
            rank_direction: RANK_DIRECTION,
            rank_separation: RANK_SEPARATION,
            node_separation: NODE_SEPARATION,
        },
    }
}
