use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// The only media type accepted for ingestion.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Number of ranked chunks requested per search.
pub const DEFAULT_TOP_K: u32 = 50;

/// A file the user picked for upload, already read into memory.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.media_type == JSON_MEDIA_TYPE
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Metadata keys that get their own tag when a result is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataField {
    FileSource,
    Label,
    Author,
    Category,
}

impl MetadataField {
    /// Render order.
    pub const ALL: [MetadataField; 4] = [
        MetadataField::FileSource,
        MetadataField::Label,
        MetadataField::Author,
        MetadataField::Category,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MetadataField::FileSource => "file_source",
            MetadataField::Label => "label",
            MetadataField::Author => "author",
            MetadataField::Category => "category",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            MetadataField::FileSource => "📄",
            MetadataField::Label => "📍",
            MetadataField::Author => "👤",
            MetadataField::Category => "🏷️",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MetadataField::FileSource => "Source",
            MetadataField::Label => "Label",
            MetadataField::Author => "Author",
            MetadataField::Category => "Category",
        }
    }
}
