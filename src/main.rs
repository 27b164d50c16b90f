use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use planmap::error::Result;
use planmap::output::Format;
use planmap::schema::DatasetSchema;
use planmap::source::{DataSource, DocumentRoot};

#[derive(Parser)]
#[command(
    name = "planmap",
    version,
    about = "CSV-backed task network explorer for event planning"
)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "json")]
    format: Format,
    /// Shorthand for --format pretty
    #[arg(long, global = true, hide = true)]
    pretty: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Directory holding tasks.csv and subtasks.csv
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    /// Published spreadsheet token (the /d/e/... segment); overrides --data-dir
    #[arg(long)]
    sheet: Option<String>,
    /// gid of the tasks sheet (with --sheet)
    #[arg(long, default_value = "0")]
    tasks_gid: String,
    /// gid of the subtasks sheet (with --sheet)
    #[arg(long, default_value = "1")]
    subtasks_gid: String,
    /// Local root for template_files documents (default: the data directory)
    #[arg(long)]
    docs_dir: Option<PathBuf>,
    /// Remote base URL for template_files documents
    #[arg(long, conflicts_with = "docs_dir")]
    docs_url: Option<String>,
    /// Dataset schema JSON (delimiters and annotation columns)
    #[arg(long)]
    schema: Option<PathBuf>,
}

impl SourceArgs {
    fn data_source(&self) -> DataSource {
        match &self.sheet {
            Some(spreadsheet) => DataSource::Sheet {
                spreadsheet: spreadsheet.clone(),
                tasks_gid: self.tasks_gid.clone(),
                subtasks_gid: self.subtasks_gid.clone(),
            },
            None => DataSource::Local {
                dir: self.data_dir.clone(),
            },
        }
    }

    fn document_root(&self) -> DocumentRoot {
        if let Some(url) = &self.docs_url {
            DocumentRoot::Remote(url.clone())
        } else if let Some(dir) = &self.docs_dir {
            DocumentRoot::Local(dir.clone())
        } else {
            DocumentRoot::Local(self.data_dir.clone())
        }
    }

    fn schema(&self) -> Result<DatasetSchema> {
        match &self.schema {
            Some(path) => DatasetSchema::load(path),
            None => Ok(DatasetSchema::default()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Load and display the assembled task dataset
    Load {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Emit the node/edge graph consumed by the diagram renderer
    Graph {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Pre-join template documents into subtasks_with_content.csv
    Enrich {
        /// Directory holding subtasks.csv
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        /// Root directory template_files paths resolve against (default: --data-dir)
        #[arg(long)]
        docs_dir: Option<PathBuf>,
    },
    /// Check the structural integrity of an enriched subtasks CSV
    Verify {
        /// Directory holding subtasks_with_content.csv
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

async fn run(cli: Cli, format: Format) -> Result<()> {
    match cli.command {
        Commands::Load { source } => {
            let schema = source.schema()?;
            let docs = source.document_root();
            planmap::commands::load::run(&source.data_source(), &schema, Some(&docs), format).await
        }
        Commands::Graph { source } => {
            let schema = source.schema()?;
            let docs = source.document_root();
            planmap::commands::graph::run(&source.data_source(), &schema, Some(&docs), format).await
        }
        Commands::Enrich { data_dir, docs_dir } => {
            let docs = docs_dir.unwrap_or_else(|| data_dir.clone());
            planmap::commands::enrich::run(&data_dir, &docs)
        }
        Commands::Verify { data_dir } => planmap::commands::verify::run(&data_dir),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let format = if cli.pretty {
        Format::Pretty
    } else {
        cli.format
    };
    if let Err(e) = run(cli, format).await {
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            _ => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}
