use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{MetadataField, DEFAULT_TOP_K};

/// Query string of `GET /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub top_k: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: DEFAULT_TOP_K,
            file_source: None,
            label: None,
        }
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.file_source = filters.file_source;
        self.label = filters.label;
        self
    }
}

/// Optional exact-match metadata filters applied server side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub file_source: Option<String>,
    pub label: Option<String>,
}

impl SearchFilters {
    /// Blank values are treated as "no filter".
    pub fn new(file_source: Option<String>, label: Option<String>) -> Self {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            file_source: non_blank(file_source),
            label: non_blank(label),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.file_source.is_none() && self.label.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// `None` when the server omitted the field; callers treat it as no hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<SearchResult>>,
}

impl SearchResponse {
    pub fn into_results(self) -> Vec<SearchResult> {
        self.results.unwrap_or_default()
    }
}

/// One ranked chunk. Order within a response is the server's ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub content: String,
    pub score: f64,
    #[serde(default)]
    pub metadata: ResultMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Everything else the index stores (`id`, `page_number`, `tags`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultMetadata {
    /// Present, non-empty value of a recognized field.
    pub fn get(&self, field: MetadataField) -> Option<&str> {
        let value = match field {
            MetadataField::FileSource => self.file_source.as_deref(),
            MetadataField::Label => self.label.as_deref(),
            MetadataField::Author => self.author.as_deref(),
            MetadataField::Category => self.category.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }
}

/// Success body of `POST /upload-json`. Only the status code matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,
}
