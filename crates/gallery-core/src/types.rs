//! Domain types shared by the store, the ranker and the search front end.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One precomputed gallery image.
///
/// - `id`: identifier from the embeddings resource (also used as alt text)
/// - `url`: display URL of the image
/// - `embedding`: image embedding, same dimensionality for every record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub id: String,
    pub url: String,
    pub embedding: Vec<f32>,
}

/// A record paired with its similarity to the current query.
///
/// Higher scores are better. Recomputed per query, never stored.
#[derive(Debug, Clone)]
pub struct ScoredResult {
    pub record: Arc<EmbeddingRecord>,
    pub score: f32,
}

/// Which tab the search front end is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Images,
    Texts,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Images => f.write_str("images"),
            Self::Texts => f.write_str("texts"),
        }
    }
}

/// Placeholder row shown by the texts tab, which has no corpus behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderResult {
    pub title: String,
    pub body: String,
    pub score: f32,
}

/// What a search produced, keyed by the mode that ran it.
#[derive(Debug, Clone)]
pub enum SearchResponse {
    Images(Vec<ScoredResult>),
    /// No real text search exists; carries placeholder rows for display.
    TextSearchUnavailable(Vec<PlaceholderResult>),
}

impl SearchResponse {
    pub fn len(&self) -> usize {
        match self {
            Self::Images(hits) => hits.len(),
            Self::TextSearchUnavailable(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
