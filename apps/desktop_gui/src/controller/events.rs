//! Backend-to-UI events.

use client_core::ClientError;
use shared::protocol::{SearchResponse, UploadResponse};

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    BackendUnavailable(String),
    UploadSettled(Result<UploadResponse, ClientError>),
    SearchSettled {
        seq: u64,
        outcome: Result<SearchResponse, ClientError>,
    },
}

/// Banner line at the bottom of the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendBanner {
    Info(String),
    Error(String),
}

impl BackendBanner {
    pub fn text(&self) -> &str {
        match self {
            BackendBanner::Info(text) | BackendBanner::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, BackendBanner::Error(_))
    }
}

pub fn classify_backend_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("backend worker startup failure") {
        "Backend worker failed to start; check the server URL setting and relaunch.".to_string()
    } else if lower.contains("invalid server url") {
        format!("Server URL is not usable: {message}")
    } else {
        format!("Backend error: {message}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_startup_failures() {
        let text = classify_backend_failure(
            "backend worker startup failure: failed to build runtime: no threads",
        );
        assert!(text.starts_with("Backend worker failed to start"));
    }

    #[test]
    fn passes_through_unknown_failures() {
        assert_eq!(classify_backend_failure("boom"), "Backend error: boom");
    }
}
