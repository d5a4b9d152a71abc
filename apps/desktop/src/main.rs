use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    drive_search, drive_upload, load_settings, ChunkSearchClient, RequestOrchestrator,
    SearchTrigger,
};
use shared::{domain::SelectedFile, protocol::SearchFilters};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(about = "Upload JSON chunk files and search them with BM25 ranking")]
struct Cli {
    /// Overrides `server_url` from chunksearch.toml / APP__SERVER_URL.
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit one JSON document for ingestion.
    Upload { path: PathBuf },
    /// Query the index and print ranked chunks.
    Search {
        query: String,
        #[arg(long)]
        file_source: Option<String>,
        #[arg(long)]
        label: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }
    let client = ChunkSearchClient::from_settings(&settings)?;
    tracing::debug!(server_url = client.server_url(), "client configured");

    let mut orchestrator = RequestOrchestrator::new();
    let succeeded = match cli.command {
        Command::Upload { path } => {
            let file = read_selected_file(&path).await?;
            orchestrator.select_file(Some(file));
            // A rejected selection already carries its own status message.
            if orchestrator.selected_file().is_some() {
                drive_upload(&mut orchestrator, &client).await;
            }
            let view = orchestrator.upload_view();
            print!("{}", render::upload(&view));
            !view.status.is_some_and(|status| status.is_error())
        }
        Command::Search {
            query,
            file_source,
            label,
        } => {
            orchestrator.set_query(query);
            orchestrator.set_filters(SearchFilters::new(file_source, label));
            drive_search(&mut orchestrator, &client, SearchTrigger::Button).await;
            print!("{}", render::search(&orchestrator.search_view()));
            orchestrator.last_search_failure().is_none()
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn read_selected_file(path: &Path) -> Result<SelectedFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let media_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream");
    Ok(SelectedFile::new(name, media_type, bytes))
}
