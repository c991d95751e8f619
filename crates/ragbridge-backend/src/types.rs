// Wire types for the RAG backend endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /query/stream`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub question: String,
    pub filters: QueryFilters,
    pub top_k: u32,
}

impl QueryRequest {
    pub fn new(question: impl Into<String>, top_k: u32) -> Self {
        Self {
            question: question.into(),
            filters: QueryFilters::default(),
            top_k,
        }
    }

    /// Restrict retrieval to the given file pathnames. An empty selection
    /// keeps `filters` as the empty object.
    pub fn with_selected_files(mut self, files: Vec<String>) -> Self {
        if !files.is_empty() {
            self.filters.selected_files = Some(files);
        }
        self
    }
}

/// Retrieval filter carried inside a [`QueryRequest`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_files: Option<Vec<String>>,
}

/// Ingestion formats the backend accepts, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestFormat {
    Csv,
    Pdf,
}

impl IngestFormat {
    /// Classify a filename by its extension, case-insensitively.
    /// Returns `None` for anything the backend cannot ingest.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_ascii_lowercase();
        if lower.ends_with(".csv") {
            Some(IngestFormat::Csv)
        } else if lower.ends_with(".pdf") {
            Some(IngestFormat::Pdf)
        } else {
            None
        }
    }

    /// Backend ingestion endpoint for this format.
    pub fn ingestion_path(&self) -> &'static str {
        match self {
            IngestFormat::Csv => "/ingestion/csv",
            IngestFormat::Pdf => "/ingestion/pdf",
        }
    }
}
