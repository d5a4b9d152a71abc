//! Backend commands queued from UI to backend worker.

use client_core::{SearchRequest, UploadRequest};

#[derive(Debug)]
pub enum BackendCommand {
    Upload(UploadRequest),
    Search(SearchRequest),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Upload(_) => "upload",
            BackendCommand::Search(_) => "search",
        }
    }
}
