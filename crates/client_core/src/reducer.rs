//! Pure state transitions for the upload and search domains.
//!
//! Each reducer takes the current domain state and one event and returns the
//! next state plus, at most, one request the caller must execute. Nothing here
//! performs I/O, so every transition can be exercised without a server or UI.

use shared::{
    domain::SelectedFile,
    error::ValidationError,
    protocol::{SearchFilters, SearchParams, SearchResponse, SearchResult, UploadResponse},
};
use tracing::{debug, info, warn};

use crate::error::ClientError;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded successfully!";
pub const UPLOAD_FAILURE_MESSAGE: &str = "Error uploading file. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSeverity {
    Success,
    Error,
}

/// Inline message shown under the upload control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub severity: StatusSeverity,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            severity: StatusSeverity::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: StatusSeverity::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == StatusSeverity::Error
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading,
    Succeeded,
    Failed(String),
}

impl UploadState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, UploadState::Uploading)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadDomain {
    pub selected: Option<SelectedFile>,
    pub state: UploadState,
    pub status: Option<StatusMessage>,
    /// Bumped every time a successful upload clears the selection, so the
    /// widget layer knows to reset its own file input.
    pub selection_generation: u64,
}

#[derive(Debug)]
pub enum UploadEvent {
    FileChosen(Option<SelectedFile>),
    Submit,
    Settled(Result<UploadResponse, ClientError>),
}

/// A multipart upload the caller must post to `/upload-json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: SelectedFile,
}

pub fn reduce_upload(
    mut state: UploadDomain,
    event: UploadEvent,
) -> (UploadDomain, Option<UploadRequest>) {
    match event {
        UploadEvent::FileChosen(None) => {
            debug!("upload: file chooser closed without a file");
        }
        UploadEvent::FileChosen(Some(file)) if file.is_json() => {
            debug!(file = %file.name, "upload: file selected");
            state.selected = Some(file);
            state.status = None;
        }
        UploadEvent::FileChosen(Some(file)) => {
            let rejection = ValidationError::InvalidFileType {
                media_type: file.media_type.clone(),
            };
            debug!(file = %file.name, media_type = %file.media_type, "upload: rejected selection");
            state.selected = None;
            state.status = Some(StatusMessage::error(rejection.to_string()));
        }
        UploadEvent::Submit => {
            if state.state.is_in_flight() {
                debug!("upload: submit ignored while a request is in flight");
                return (state, None);
            }
            let Some(file) = state.selected.clone() else {
                state.status = Some(StatusMessage::error(ValidationError::MissingFile.to_string()));
                return (state, None);
            };

            info!(file = %file.name, "upload: submitting");
            state.state = UploadState::Uploading;
            state.status = None;
            return (state, Some(UploadRequest { file }));
        }
        UploadEvent::Settled(outcome) => {
            if !state.state.is_in_flight() {
                debug!("upload: ignoring settlement with no request in flight");
                return (state, None);
            }
            match outcome {
                Ok(_) => {
                    state.state = UploadState::Succeeded;
                    state.status = Some(StatusMessage::success(UPLOAD_SUCCESS_MESSAGE));
                    state.selected = None;
                    state.selection_generation += 1;
                }
                Err(err) => {
                    warn!("upload failed: {err}");
                    state.state = UploadState::Failed(UPLOAD_FAILURE_MESSAGE.to_string());
                    state.status = Some(StatusMessage::error(UPLOAD_FAILURE_MESSAGE));
                }
            }
        }
    }

    (state, None)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
    #[default]
    Idle,
    Searching,
    Results(Vec<SearchResult>),
    /// The server answered without a `results` field.
    Empty,
}

impl SearchState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SearchState::Searching)
    }

    /// Settled hits in server order; empty while idle or searching.
    pub fn results(&self) -> &[SearchResult] {
        match self {
            SearchState::Results(results) => results,
            _ => &[],
        }
    }

    pub fn has_settled(&self) -> bool {
        matches!(self, SearchState::Results(_) | SearchState::Empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTrigger {
    Button,
    ConfirmKey,
}

/// Key presses delivered while the query field holds focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Enter,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchDomain {
    /// Raw contents of the query field.
    pub query: String,
    pub filters: SearchFilters,
    pub state: SearchState,
    /// Sequence number of the most recently issued request.
    pub latest_seq: u64,
    /// Why the last search failed. Rendering still shows zero results.
    pub last_failure: Option<String>,
}

#[derive(Debug)]
pub enum SearchEvent {
    QueryEdited(String),
    FiltersEdited(SearchFilters),
    Submit(SearchTrigger),
    Settled {
        seq: u64,
        outcome: Result<SearchResponse, ClientError>,
    },
}

/// A `GET /search` the caller must issue, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub params: SearchParams,
}

pub fn reduce_search(
    mut state: SearchDomain,
    event: SearchEvent,
) -> (SearchDomain, Option<SearchRequest>) {
    match event {
        SearchEvent::QueryEdited(query) => {
            state.query = query;
        }
        SearchEvent::FiltersEdited(filters) => {
            state.filters = filters;
        }
        SearchEvent::Submit(trigger) => {
            if state.state.is_in_flight() {
                debug!(?trigger, "search: submit ignored while a request is in flight");
                return (state, None);
            }
            let query = state.query.trim();
            if query.is_empty() {
                debug!(?trigger, "search: {}", ValidationError::EmptyQuery);
                return (state, None);
            }

            let params = SearchParams::new(query).with_filters(state.filters.clone());
            state.latest_seq += 1;
            state.state = SearchState::Searching;
            state.last_failure = None;
            info!(seq = state.latest_seq, ?trigger, query = %params.query, "search: submitting");
            let request = SearchRequest {
                seq: state.latest_seq,
                params,
            };
            return (state, Some(request));
        }
        SearchEvent::Settled { seq, outcome } => {
            if seq != state.latest_seq || !state.state.is_in_flight() {
                debug!(seq, latest = state.latest_seq, "search: discarding stale response");
                return (state, None);
            }
            match outcome {
                Ok(response) => {
                    state.state = match response.results {
                        Some(results) => SearchState::Results(results),
                        None => SearchState::Empty,
                    };
                }
                Err(err) => {
                    warn!(seq, "search failed: {err}");
                    state.state = SearchState::Results(Vec::new());
                    state.last_failure = Some(err.to_string());
                }
            }
        }
    }

    (state, None)
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
