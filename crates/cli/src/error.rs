use model::schema::SchemaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the expression file: {0}")]
    ExprFileRead(#[from] std::io::Error),

    #[error("Failed to parse the expression file as JSON: {0}")]
    ExprParse(#[from] serde_json::Error),

    #[error("Invalid storage schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Failed to write output file {path}: {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Filter has {0} compile error(s)")]
    CompileFailed(usize),
}
