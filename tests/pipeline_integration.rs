use std::fs;
use std::path::Path;

use planmap::assemble::DETAIL_FETCH_PLACEHOLDER;
use planmap::commands::load::load_dataset;
use planmap::graph::build_graph;
use planmap::schema::DatasetSchema;
use planmap::source::{DataSource, DocumentRoot};
use tempfile::tempdir;

fn write_fixture(dir: &Path) {
    fs::write(
        dir.join("tasks.csv"),
        concat!(
            "id,title,category,dependencies,checklist,overview\n",
            "concept,Define the concept,planning,,goal agreed|budget drafted,\"Pin down scope,\naudience and budget.\"\n",
            "venue,Book the venue,preparation,concept,contract signed,\n",
            "announce,Announce the event,preparation,\"concept, venue\",,\n",
            "\n",
        ),
    )
    .unwrap();
    fs::write(
        dir.join("subtasks.csv"),
        concat!(
            "task_id,title,instructions,deliverables,estimated_hours,template_files\n",
            "concept,Draft one-pager,Write it up,one-pager,3,templates/one-pager.md\n",
            "venue,Shortlist rooms,Compare options,shortlist,2.5,\n",
            "concept,Review with team,Walk through the draft,sign-off,abc,\n",
        ),
    )
    .unwrap();
    fs::create_dir_all(dir.join("templates")).unwrap();
    fs::write(dir.join("templates/one-pager.md"), "# One-pager\n").unwrap();
}

fn local_source(dir: &Path) -> (DataSource, DocumentRoot) {
    (
        DataSource::Local {
            dir: dir.to_path_buf(),
        },
        DocumentRoot::Local(dir.to_path_buf()),
    )
}

#[tokio::test]
async fn loads_a_local_dataset_end_to_end() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    let (source, docs) = local_source(dir.path());

    let tasks = load_dataset(&source, &DatasetSchema::default(), Some(&docs))
        .await
        .unwrap();

    let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["concept", "venue", "announce"]);

    let concept = &tasks[0];
    assert_eq!(
        concept.overview.as_deref(),
        Some("Pin down scope,\naudience and budget.")
    );
    assert_eq!(concept.checklist, vec!["goal agreed", "budget drafted"]);
    assert_eq!(concept.subtasks.len(), 2);
    assert_eq!(concept.subtasks[0].id, "concept-1");
    assert_eq!(concept.subtasks[1].id, "concept-2");
    assert_eq!(
        concept.subtasks[0].template_content.as_deref(),
        Some("# One-pager\n")
    );
    // "abc" coerces to zero rather than erroring.
    assert_eq!(concept.subtasks[1].estimated_hours, 0.0);

    assert_eq!(tasks[2].dependencies, vec!["concept", "venue"]);

    let graph = build_graph(&tasks);
    assert_eq!(graph.nodes.len(), 3);
    let mut pairs: Vec<_> = graph
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("concept", "announce"),
            ("concept", "venue"),
            ("venue", "announce"),
        ]
    );
}

#[tokio::test]
async fn missing_tasks_table_rejects_the_whole_load() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("subtasks.csv"), "task_id,title\n").unwrap();
    let (source, docs) = local_source(dir.path());

    let err = load_dataset(&source, &DatasetSchema::default(), Some(&docs))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "table_unavailable");
    assert!(err.to_string().contains("tasks table"));
}

#[tokio::test]
async fn one_failed_document_fetch_does_not_fail_the_load() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    fs::remove_file(dir.path().join("templates/one-pager.md")).unwrap();
    let (source, docs) = local_source(dir.path());

    let tasks = load_dataset(&source, &DatasetSchema::default(), Some(&docs))
        .await
        .unwrap();
    assert_eq!(
        tasks[0].subtasks[0].template_content.as_deref(),
        Some(DETAIL_FETCH_PLACEHOLDER)
    );
}

#[tokio::test]
async fn enriched_dataset_loads_without_touching_documents() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    // Enriched table shadows subtasks.csv; its reference points nowhere, so
    // any fetch attempt would surface as the placeholder.
    fs::write(
        dir.path().join("subtasks_with_content.csv"),
        concat!(
            "task_id,title,instructions,deliverables,estimated_hours,template_files,detail_content\n",
            "concept,Draft one-pager,Write it up,one-pager,3,missing.md,\"# Embedded\ncontent\"\n",
        ),
    )
    .unwrap();
    let (source, docs) = local_source(dir.path());

    let tasks = load_dataset(&source, &DatasetSchema::default(), Some(&docs))
        .await
        .unwrap();
    assert_eq!(
        tasks[0].subtasks[0].template_content.as_deref(),
        Some("# Embedded\ncontent")
    );
}
