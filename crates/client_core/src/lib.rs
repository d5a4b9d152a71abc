use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use shared::{
    domain::SelectedFile,
    error::ApiError,
    protocol::{SearchParams, SearchResponse, UploadResponse},
};
use tracing::{debug, info, warn};

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod reducer;
pub mod view;

pub use config::{load_settings, ClientSettings};
pub use error::ClientError;
pub use orchestrator::RequestOrchestrator;
pub use reducer::{
    InputKey, SearchRequest, SearchState, SearchTrigger, StatusMessage, StatusSeverity,
    UploadRequest, UploadState,
};

/// Multipart part name expected by `POST /upload-json`.
const UPLOAD_PART_NAME: &str = "file";

/// The two endpoints of the ingestion server.
#[async_trait]
pub trait IngestionBackend: Send + Sync {
    async fn upload_json(&self, file: &SelectedFile) -> Result<UploadResponse, ClientError>;
    async fn search(&self, params: &SearchParams) -> Result<SearchResponse, ClientError>;
}

pub struct ChunkSearchClient {
    http: Client,
    server_url: String,
}

impl ChunkSearchClient {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::new(),
            server_url: config::normalize_server_url(server_url)?,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            server_url: config::normalize_server_url(&settings.server_url)?,
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }
}

#[async_trait]
impl IngestionBackend for ChunkSearchClient {
    async fn upload_json(&self, file: &SelectedFile) -> Result<UploadResponse, ClientError> {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)?;
        let form = Form::new().part(UPLOAD_PART_NAME, part);

        info!(file = %file.name, bytes = file.len(), "upload: posting json document");
        let response = self
            .http
            .post(format!("{}/upload-json", self.server_url))
            .multipart(form)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        // Only the status code is significant; an unexpected body is not a failure.
        let body = response.bytes().await?;
        let receipt = serde_json::from_slice::<UploadResponse>(&body).unwrap_or_default();
        info!(
            file = %file.name,
            message = receipt.message.as_deref().unwrap_or(""),
            "upload: accepted"
        );
        Ok(receipt)
    }

    async fn search(&self, params: &SearchParams) -> Result<SearchResponse, ClientError> {
        debug!(
            query = %params.query,
            top_k = params.top_k,
            file_source = params.file_source.as_deref(),
            label = params.label.as_deref(),
            "search: querying index"
        );
        let response = self
            .http
            .get(format!("{}/search", self.server_url))
            .query(params)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let body = response.bytes().await?;
        let decoded: SearchResponse =
            serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
        info!(
            query = %params.query,
            hits = decoded.results.as_ref().map_or(0, Vec::len),
            "search: response received"
        );
        Ok(decoded)
    }
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ApiError>(&body)
        .ok()
        .map(|err| err.message())
        .filter(|message| !message.is_empty())
        .unwrap_or(body);
    warn!(status = status.as_u16(), %detail, "request rejected by server");
    Err(ClientError::Status {
        status: status.as_u16(),
        detail,
    })
}

/// Runs one upload through the orchestrator: submit, await the backend, settle.
///
/// Returns `false` when the orchestrator refused to issue a request.
pub async fn drive_upload<B>(orchestrator: &mut RequestOrchestrator, backend: &B) -> bool
where
    B: IngestionBackend + ?Sized,
{
    let Some(request) = orchestrator.submit_upload() else {
        return false;
    };
    let outcome = backend.upload_json(&request.file).await;
    orchestrator.settle_upload(outcome);
    true
}

/// Runs one search through the orchestrator: submit, await the backend, settle.
///
/// Returns `false` when the orchestrator refused to issue a request.
pub async fn drive_search<B>(
    orchestrator: &mut RequestOrchestrator,
    backend: &B,
    trigger: SearchTrigger,
) -> bool
where
    B: IngestionBackend + ?Sized,
{
    let Some(request) = orchestrator.submit_search(trigger) else {
        return false;
    };
    let outcome = backend.search(&request.params).await;
    orchestrator.settle_search(request.seq, outcome);
    true
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
