use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanmapError {
    #[error("could not load the {table} table: {detail}")]
    TableUnavailable { table: &'static str, detail: String },

    #[error(
        "the spreadsheet export endpoint rejected the {table} sheet (HTTP 400); \
         check that the gid matches a sheet of the published spreadsheet and that \
         the document is shared via File > Share > Publish to web as CSV"
    )]
    SheetExportRejected { table: &'static str },

    #[error("the spreadsheet export endpoint returned HTTP {status} for the {table} sheet")]
    SheetExportStatus { table: &'static str, status: u16 },

    #[error("the {table} table is empty (no rows parsed)")]
    EmptyTable { table: &'static str },

    #[error("column '{column}' not found in {path}")]
    ColumnMissing { column: &'static str, path: String },

    #[error("could not read document '{reference}': {detail}")]
    DocumentUnavailable { reference: String, detail: String },

    #[error("invalid schema file: {detail}")]
    SchemaConfig { detail: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlanmapError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TableUnavailable { .. } => "table_unavailable",
            Self::SheetExportRejected { .. } => "sheet_export_rejected",
            Self::SheetExportStatus { .. } => "sheet_export_status",
            Self::EmptyTable { .. } => "empty_table",
            Self::ColumnMissing { .. } => "column_missing",
            Self::DocumentUnavailable { .. } => "document_unavailable",
            Self::SchemaConfig { .. } => "schema_config",
            Self::Io(_) => "io_error",
            Self::Http(_) => "http_error",
            Self::Json(_) => "json_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanmapError>;
