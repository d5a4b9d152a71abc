use std::mem;

use shared::{
    domain::SelectedFile,
    protocol::{SearchFilters, SearchResponse, UploadResponse},
};

use crate::{
    error::ClientError,
    reducer::{
        reduce_search, reduce_upload, InputKey, SearchDomain, SearchEvent, SearchRequest,
        SearchState, SearchTrigger, StatusMessage, UploadDomain, UploadEvent, UploadRequest,
        UploadState,
    },
    view::{self, SearchView, UploadView},
};

/// Owns all UI session state for uploading and searching.
///
/// Actions that need the network return a request ticket; the caller runs it
/// and hands the outcome back through `settle_upload` / `settle_search`.
/// Upload and search are independent: each allows one request in flight.
#[derive(Debug, Default)]
pub struct RequestOrchestrator {
    upload: UploadDomain,
    search: SearchDomain,
}

impl RequestOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_file(&mut self, file: Option<SelectedFile>) {
        self.apply_upload(UploadEvent::FileChosen(file));
    }

    pub fn submit_upload(&mut self) -> Option<UploadRequest> {
        self.apply_upload(UploadEvent::Submit)
    }

    pub fn settle_upload(&mut self, outcome: Result<UploadResponse, ClientError>) {
        self.apply_upload(UploadEvent::Settled(outcome));
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.apply_search(SearchEvent::QueryEdited(query.into()));
    }

    pub fn set_filters(&mut self, filters: SearchFilters) {
        self.apply_search(SearchEvent::FiltersEdited(filters));
    }

    pub fn submit_search(&mut self, trigger: SearchTrigger) -> Option<SearchRequest> {
        self.apply_search(SearchEvent::Submit(trigger))
    }

    /// Keys typed into the query field. Only the confirm key submits.
    pub fn key_pressed(&mut self, key: InputKey) -> Option<SearchRequest> {
        match key {
            InputKey::Enter => self.submit_search(SearchTrigger::ConfirmKey),
            InputKey::Other => None,
        }
    }

    pub fn settle_search(&mut self, seq: u64, outcome: Result<SearchResponse, ClientError>) {
        self.apply_search(SearchEvent::Settled { seq, outcome });
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.upload.selected.as_ref()
    }

    pub fn upload_state(&self) -> &UploadState {
        &self.upload.state
    }

    pub fn upload_status(&self) -> Option<&StatusMessage> {
        self.upload.status.as_ref()
    }

    pub fn selection_generation(&self) -> u64 {
        self.upload.selection_generation
    }

    pub fn query(&self) -> &str {
        &self.search.query
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.search.filters
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search.state
    }

    pub fn last_search_failure(&self) -> Option<&str> {
        self.search.last_failure.as_deref()
    }

    pub fn upload_view(&self) -> UploadView {
        view::upload_view(&self.upload)
    }

    pub fn search_view(&self) -> SearchView {
        view::search_view(&self.search)
    }

    fn apply_upload(&mut self, event: UploadEvent) -> Option<UploadRequest> {
        let (next, request) = reduce_upload(mem::take(&mut self.upload), event);
        self.upload = next;
        request
    }

    fn apply_search(&mut self, event: SearchEvent) -> Option<SearchRequest> {
        let (next, request) = reduce_search(mem::take(&mut self.search), event);
        self.search = next;
        request
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
