use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use client_core::{
    view::{ResultItemView, ResultsView},
    InputKey, RequestOrchestrator, SearchTrigger, StatusSeverity,
};
use crossbeam_channel::{Receiver, Sender};
use shared::{domain::SelectedFile, protocol::SearchFilters};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{BackendBanner, UiEvent},
    orchestration::{apply_ui_event, dispatch_backend_command},
};

const QUERY_HINT: &str = "e.g., ERP, technology, 2025 predictions...";

pub struct ChunkSearchApp {
    orchestrator: RequestOrchestrator,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    banner: Option<BackendBanner>,
    /// What the file-picker control currently shows.
    file_input: Option<PathBuf>,
    observed_selection_generation: u64,
    query_input: String,
    file_source_filter: String,
    label_filter: String,
}

impl ChunkSearchApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            orchestrator: RequestOrchestrator::new(),
            cmd_tx,
            ui_rx,
            banner: None,
            file_input: None,
            observed_selection_generation: 0,
            query_input: String::new(),
            file_source_filter: String::new(),
            label_filter: String::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.orchestrator, event, &mut self.banner);
        }

        let generation = self.orchestrator.selection_generation();
        if generation != self.observed_selection_generation {
            self.observed_selection_generation = generation;
            self.file_input = None;
        }
    }

    fn choose_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        else {
            self.orchestrator.select_file(None);
            return;
        };

        match load_selected_file(&path) {
            Ok(file) => {
                self.file_input = Some(path);
                self.orchestrator.select_file(Some(file));
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "failed to read chosen file: {err}");
                self.banner = Some(BackendBanner::Error(format!(
                    "Could not read '{}': {err}",
                    path.display()
                )));
            }
        }
    }

    fn submit_upload(&mut self) {
        if let Some(request) = self.orchestrator.submit_upload() {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::Upload(request),
                &mut self.orchestrator,
            );
        }
    }

    fn submit_search(&mut self, trigger: SearchTrigger) {
        let request = match trigger {
            SearchTrigger::ConfirmKey => self.orchestrator.key_pressed(InputKey::Enter),
            SearchTrigger::Button => self.orchestrator.submit_search(trigger),
        };
        if let Some(request) = request {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::Search(request),
                &mut self.orchestrator,
            );
        }
    }

    fn show_upload_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Upload JSON File");
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            ui.label("Select JSON File:");
            if ui.button("Choose file…").clicked() {
                self.choose_file();
            }
            match &self.file_input {
                Some(path) => ui.label(
                    path.file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string()),
                ),
                None => ui.weak("No file chosen"),
            };
        });

        let view = self.orchestrator.upload_view();
        if let Some(name) = &view.selected_file_name {
            ui.label(egui::RichText::new(format!("Selected file: {name}")).strong());
        }

        ui.add_space(4.0);
        if ui
            .add_enabled(view.submit_enabled, egui::Button::new(view.submit_label))
            .clicked()
        {
            self.submit_upload();
        }

        if let Some(status) = &view.status {
            let color = match status.severity {
                StatusSeverity::Error => egui::Color32::RED,
                StatusSeverity::Success => egui::Color32::GREEN,
            };
            ui.colored_label(color, status.text.as_str());
        }
    }

    fn show_search_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Search Chunks");
        ui.add_space(4.0);
        ui.label("Enter your search query:");

        let query_response = ui.add(
            egui::TextEdit::singleline(&mut self.query_input)
                .id_salt("search_query_input")
                .hint_text(QUERY_HINT)
                .desired_width(f32::INFINITY),
        );
        if query_response.changed() {
            self.orchestrator.set_query(self.query_input.clone());
        }
        let enter_pressed = (query_response.has_focus() || query_response.lost_focus())
            && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.horizontal(|ui| {
            ui.label("Source:");
            let source_changed = ui
                .add(
                    egui::TextEdit::singleline(&mut self.file_source_filter)
                        .id_salt("file_source_filter")
                        .hint_text("any")
                        .desired_width(160.0),
                )
                .changed();
            ui.label("Label:");
            let label_changed = ui
                .add(
                    egui::TextEdit::singleline(&mut self.label_filter)
                        .id_salt("label_filter")
                        .hint_text("any")
                        .desired_width(160.0),
                )
                .changed();
            if source_changed || label_changed {
                self.orchestrator.set_filters(SearchFilters::new(
                    Some(self.file_source_filter.clone()),
                    Some(self.label_filter.clone()),
                ));
            }
        });

        let view = self.orchestrator.search_view();
        let clicked = ui
            .add_enabled(view.submit_enabled, egui::Button::new(view.submit_label))
            .clicked();
        if enter_pressed {
            self.submit_search(SearchTrigger::ConfirmKey);
        } else if clicked {
            self.submit_search(SearchTrigger::Button);
        }

        ui.add_space(8.0);
        match self.orchestrator.search_view().results {
            ResultsView::Hidden => {}
            ResultsView::Searching { notice } => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(notice);
                });
            }
            ResultsView::NoResults { notice } => {
                ui.weak(notice);
            }
            ResultsView::Results { heading, items } => {
                ui.label(egui::RichText::new(heading).strong().size(16.0));
                egui::ScrollArea::vertical()
                    .id_salt("search_results")
                    .show(ui, |ui| {
                        for item in &items {
                            show_result_item(ui, item);
                        }
                    });
            }
        }
    }
}

fn show_result_item(ui: &mut egui::Ui, item: &ResultItemView) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(item.content.as_str());
        ui.horizontal_wrapped(|ui| {
            for tag in &item.tags {
                ui.label(egui::RichText::new(tag.to_string()).small())
                    .on_hover_text(tag.field.title());
            }
            ui.label(
                egui::RichText::new(format!("Score: {}", item.score))
                    .small()
                    .color(egui::Color32::GRAY),
            );
        });
    });
    ui.add_space(4.0);
}

/// Reads a picked file and tags it with the media type its extension implies.
pub fn load_selected_file(path: &Path) -> io::Result<SelectedFile> {
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let media_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream");
    Ok(SelectedFile::new(name, media_type, bytes))
}

impl eframe::App for ChunkSearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("ChunkSearch");
            ui.weak("Upload JSON files and search through document chunks using BM25 ranking");
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("backend_status").show(ctx, |ui| match &self.banner {
            Some(banner) if banner.is_error() => {
                ui.colored_label(egui::Color32::RED, banner.text());
            }
            Some(banner) => {
                ui.weak(banner.text());
            }
            None => {
                ui.weak("Backend worker starting...");
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_upload_section(ui);
            ui.add_space(12.0);
            ui.separator();
            ui.add_space(12.0);
            self.show_search_section(ui);
        });

        let busy = self.orchestrator.upload_state().is_in_flight()
            || self.orchestrator.search_state().is_in_flight();
        ctx.request_repaint_after(if busy {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        });
    }
}
