//! Rendering contract derived from orchestrator state.
//!
//! Widgets draw these view models as-is; no rendering decision lives in the
//! GUI or CLI layers.

use std::fmt;

use shared::{domain::MetadataField, protocol::SearchResult};

use crate::reducer::{SearchDomain, StatusMessage, UploadDomain};

pub const UPLOAD_LABEL: &str = "Upload File";
pub const UPLOADING_LABEL: &str = "Uploading...";
pub const SEARCH_LABEL: &str = "Search";
pub const SEARCHING_LABEL: &str = "Searching...";
pub const SEARCHING_NOTICE: &str = "Searching for relevant chunks...";
pub const NO_RESULTS_NOTICE: &str = "No relevant chunks found for your query.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadView {
    pub selected_file_name: Option<String>,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub status: Option<StatusMessage>,
    pub selection_generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub results: ResultsView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    /// Nothing searched yet, or the field was cleared.
    Hidden,
    Searching { notice: &'static str },
    Results {
        heading: String,
        items: Vec<ResultItemView>,
    },
    NoResults { notice: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItemView {
    pub content: String,
    pub tags: Vec<MetadataTag>,
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataTag {
    pub field: MetadataField,
    pub value: String,
}

impl fmt::Display for MetadataTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.icon(), self.value)
    }
}

/// Fixed-point, three decimals.
pub fn format_score(score: f64) -> String {
    format!("{score:.3}")
}

pub fn upload_view(domain: &UploadDomain) -> UploadView {
    let uploading = domain.state.is_in_flight();
    UploadView {
        selected_file_name: domain.selected.as_ref().map(|file| file.name.clone()),
        submit_enabled: domain.selected.is_some() && !uploading,
        submit_label: if uploading { UPLOADING_LABEL } else { UPLOAD_LABEL },
        status: domain.status.clone(),
        selection_generation: domain.selection_generation,
    }
}

pub fn search_view(domain: &SearchDomain) -> SearchView {
    let searching = domain.state.is_in_flight();
    SearchView {
        submit_enabled: !domain.query.trim().is_empty() && !searching,
        submit_label: if searching { SEARCHING_LABEL } else { SEARCH_LABEL },
        results: results_view(domain),
    }
}

fn results_view(domain: &SearchDomain) -> ResultsView {
    if domain.state.is_in_flight() {
        return ResultsView::Searching {
            notice: SEARCHING_NOTICE,
        };
    }

    let results = domain.state.results();
    if !results.is_empty() {
        return ResultsView::Results {
            heading: format!("Search Results ({} chunks found)", results.len()),
            items: results.iter().map(result_item).collect(),
        };
    }

    // "Never searched" stays hidden; only a settled search can report no hits.
    if !domain.state.has_settled() || domain.query.trim().is_empty() {
        return ResultsView::Hidden;
    }
    ResultsView::NoResults {
        notice: NO_RESULTS_NOTICE,
    }
}

pub fn result_item(result: &SearchResult) -> ResultItemView {
    let tags = MetadataField::ALL
        .into_iter()
        .filter_map(|field| {
            result.metadata.get(field).map(|value| MetadataTag {
                field,
                value: value.to_string(),
            })
        })
        .collect();

    ResultItemView {
        content: result.content.clone(),
        tags,
        score: format_score(result.score),
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
