use crate::commands::load::load_dataset;
use crate::error::Result;
use crate::graph::build_graph;
use crate::output::Format;
use crate::schema::DatasetSchema;
use crate::source::{DataSource, DocumentRoot};

/// Load the dataset and emit the node/edge structures for the renderer.
pub async fn run(
    source: &DataSource,
    schema: &DatasetSchema,
    docs: Option<&DocumentRoot>,
    format: Format,
) -> Result<()> {
    let tasks = load_dataset(source, schema, docs).await?;
    let graph = build_graph(&tasks);

    match format {
        Format::Json => println!("{}", serde_json::to_string(&graph)?),
        Format::Pretty => {
            println!(
                "{} nodes, {} edges (rankdir {})",
                graph.nodes.len(),
                graph.edges.len(),
                graph.layout.rank_direction
            );
            for node in &graph.nodes {
                println!("  [{}] {} {}", node.id, node.label, node.color);
            }
            for edge in &graph.edges {
                println!("  {} -> {}", edge.source, edge.target);
            }
        }
        Format::Minimal => {
            println!("{} {}", graph.nodes.len(), graph.edges.len());
        }
    }
    Ok(())
}
