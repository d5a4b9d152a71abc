//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{ChunkSearchClient, ClientSettings, IngestionBackend};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Spawns the worker thread. Each command runs as its own task so an upload
/// and a search can be in flight at the same time.
pub fn launch(
    settings: ClientSettings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let client = match ChunkSearchClient::from_settings(&settings) {
            Ok(client) => Arc::new(client),
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: {err}"
                )));
                tracing::error!("failed to build search client: {err}");
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Using server {}",
            client.server_url()
        )));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend received command");
                let client = Arc::clone(&client);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = execute(client.as_ref(), cmd).await;
                    if ui_tx.send(event).is_err() {
                        tracing::debug!("ui event queue closed; dropping settlement");
                    }
                });
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}

/// Runs one command to completion and reports its settlement.
pub async fn execute<B>(backend: &B, cmd: BackendCommand) -> UiEvent
where
    B: IngestionBackend + ?Sized,
{
    match cmd {
        BackendCommand::Upload(request) => {
            UiEvent::UploadSettled(backend.upload_json(&request.file).await)
        }
        BackendCommand::Search(request) => UiEvent::SearchSettled {
            seq: request.seq,
            outcome: backend.search(&request.params).await,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use client_core::{ClientError, SearchRequest, UploadRequest};
    use shared::{
        domain::{SelectedFile, JSON_MEDIA_TYPE},
        protocol::{SearchParams, SearchResponse, UploadResponse},
    };

    struct FixedBackend;

    #[async_trait]
    impl IngestionBackend for FixedBackend {
        async fn upload_json(&self, file: &SelectedFile) -> Result<UploadResponse, ClientError> {
            Err(ClientError::Status {
                status: 400,
                detail: format!("rejected {}", file.name),
            })
        }

        async fn search(&self, params: &SearchParams) -> Result<SearchResponse, ClientError> {
            assert_eq!(params.top_k, 50);
            Ok(SearchResponse {
                results: Some(Vec::new()),
            })
        }
    }

    #[tokio::test]
    async fn search_settlement_keeps_sequence_number() {
        let event = execute(
            &FixedBackend,
            BackendCommand::Search(SearchRequest {
                seq: 7,
                params: SearchParams::new("ERP"),
            }),
        )
        .await;

        let UiEvent::SearchSettled { seq, outcome } = event else {
            panic!("expected search settlement");
        };
        assert_eq!(seq, 7);
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn upload_failure_is_reported_not_raised() {
        let event = execute(
            &FixedBackend,
            BackendCommand::Upload(UploadRequest {
                file: SelectedFile::new("data.json", JSON_MEDIA_TYPE, b"{}".to_vec()),
            }),
        )
        .await;

        let UiEvent::UploadSettled(Err(err)) = event else {
            panic!("expected failed upload settlement");
        };
        assert_eq!(err.status_code(), Some(400));
    }
}
