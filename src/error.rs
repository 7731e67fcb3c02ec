use crate::parsers::POSTMAN_SCHEMA_V2_1;

/// Errors raised by the collection pipeline.
///
/// The command-line layer wraps these in `anyhow` and decides the exit code.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Malformed collection JSON: {0}")]
    MalformedInput(#[source] serde_json::Error),

    #[error(
        "Unknown JSON schema {}. When exporting from Postman, export as Collection v2.1.0 ({})",
        .found.as_deref().unwrap_or("(none)"),
        POSTMAN_SCHEMA_V2_1
    )]
    SchemaMismatch { found: Option<String> },

    #[error("Invalid status range format in {token:?}: {reason}")]
    StatusRangeFormat { token: String, reason: String },

    #[error("Unexpected collection shape: {0}")]
    TypeShape(#[source] serde_json::Error),

    #[error(transparent)]
    Template(#[from] tera::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
