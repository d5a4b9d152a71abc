//! Plain-text rendering of the orchestrator's view models.

use std::fmt::Write as _;

use client_core::view::{ResultsView, SearchView, UploadView};

pub fn upload(view: &UploadView) -> String {
    let mut out = String::new();
    if let Some(name) = &view.selected_file_name {
        let _ = writeln!(out, "Selected file: {name}");
    }
    if let Some(status) = &view.status {
        let marker = if status.is_error() { "error" } else { "ok" };
        let _ = writeln!(out, "[{marker}] {}", status.text);
    }
    out
}

pub fn search(view: &SearchView) -> String {
    let mut out = String::new();
    match &view.results {
        ResultsView::Hidden => {}
        ResultsView::Searching { notice } | ResultsView::NoResults { notice } => {
            let _ = writeln!(out, "{notice}");
        }
        ResultsView::Results { heading, items } => {
            let _ = writeln!(out, "{heading}");
            for (rank, item) in items.iter().enumerate() {
                let _ = writeln!(out);
                let _ = writeln!(out, "{:>3}. {}", rank + 1, item.content);
                let mut line = String::from("     ");
                for tag in &item.tags {
                    let _ = write!(line, "{tag}  ");
                }
                let _ = write!(line, "Score: {}", item.score);
                let _ = writeln!(out, "{line}");
            }
        }
    }
    out
}
