//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{ClientError, RequestOrchestrator};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{classify_backend_failure, BackendBanner, UiEvent};

/// Queues a request for the backend worker.
///
/// A command that cannot be queued is settled as failed right away, so the
/// in-flight guard it set is always released.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    orchestrator: &mut RequestOrchestrator,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(cmd)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            settle_undelivered(orchestrator, cmd, "UI command queue is full; please retry");
        }
        Err(TrySendError::Disconnected(cmd)) => {
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            settle_undelivered(
                orchestrator,
                cmd,
                "Backend command processor disconnected (possible startup/runtime failure)",
            );
        }
    }
}

fn settle_undelivered(orchestrator: &mut RequestOrchestrator, cmd: BackendCommand, reason: &str) {
    let err = ClientError::Dispatch(reason.to_string());
    match cmd {
        BackendCommand::Upload(_) => orchestrator.settle_upload(Err(err)),
        BackendCommand::Search(request) => orchestrator.settle_search(request.seq, Err(err)),
    }
}

pub fn apply_ui_event(
    orchestrator: &mut RequestOrchestrator,
    event: UiEvent,
    banner: &mut Option<BackendBanner>,
) {
    match event {
        UiEvent::Info(text) => *banner = Some(BackendBanner::Info(text)),
        UiEvent::BackendUnavailable(reason) => {
            *banner = Some(BackendBanner::Error(classify_backend_failure(&reason)));
        }
        UiEvent::UploadSettled(outcome) => orchestrator.settle_upload(outcome),
        UiEvent::SearchSettled { seq, outcome } => orchestrator.settle_search(seq, outcome),
    }
}
