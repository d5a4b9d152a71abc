use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error body returned by the ingestion server, e.g. `{"detail": "..."}`.
///
/// Request validation failures carry a list of objects instead of a string,
/// so `detail` is kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub detail: Value,
}

impl ApiError {
    pub fn message(&self) -> String {
        match &self.detail {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Input rejected locally, before any request is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a valid JSON file.")]
    InvalidFileType { media_type: String },
    #[error("Please select a file first.")]
    MissingFile,
    #[error("search query is empty")]
    EmptyQuery,
}
