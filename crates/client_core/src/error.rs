use thiserror::Error;

/// Any way a request to the ingestion server can fail.
///
/// The orchestrator treats every variant as the same failure kind; the
/// distinction only matters for logs.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("malformed response body: {0}")]
    Decode(String),
    #[error("backend worker unavailable: {0}")]
    Dispatch(String),
    #[error("invalid server url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ClientError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
