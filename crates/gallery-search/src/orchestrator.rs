use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use gallery_core::config::SearchSettings;
use gallery_core::traits::Embedder;
use gallery_core::types::{PlaceholderResult, ScoredResult, SearchMode, SearchResponse};
use gallery_core::{Error, Result};
use gallery_vector::{rank, top_k, EmbeddingStore};

/// Rows produced by the texts tab.
pub const PLACEHOLDER_COUNT: usize = 5;

const PLACEHOLDER_BODY: &str = "This is a sample text search result that would match your query. \
In a real implementation, this would be an actual text from your dataset.";

/// Turns raw input into ranked results for the current mode.
///
/// Every call takes a fresh request token. A call that resolves after a newer
/// one has started fails with `Error::Superseded` instead of returning stale
/// results.
pub struct SearchOrchestrator {
    embedder: Arc<dyn Embedder>,
    query_prefix: String,
    embed_timeout: Duration,
    limit: Option<usize>,
    latest: AtomicU64,
}

impl SearchOrchestrator {
    pub fn new(embedder: Arc<dyn Embedder>, settings: &SearchSettings) -> Self {
        Self {
            embedder,
            query_prefix: settings.query_prefix.clone(),
            embed_timeout: settings.embed_timeout(),
            limit: None,
            latest: AtomicU64::new(0),
        }
    }

    /// Keep at most `limit` results per search. `None` keeps all of them.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Effective image query: the prefix followed by the trimmed input.
    ///
    /// Empty input is allowed and yields the bare prefix.
    pub fn query_for(&self, raw_input: &str) -> String {
        format!("{}{}", self.query_prefix, raw_input.trim())
    }

    /// Token of the most recent request, 0 before the first.
    pub fn latest_token(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Make every in-flight request stale.
    pub fn invalidate(&self) {
        self.begin();
    }

    pub async fn search(&self, mode: SearchMode, raw_input: &str, store: Option<&EmbeddingStore>) -> Result<SearchResponse> {
        let token = self.begin();
        let response = match mode {
            SearchMode::Images => {
                let store = store.ok_or_else(|| Error::Load("embeddings are not loaded".to_string()))?;
                SearchResponse::Images(self.search_images(token, raw_input, store).await?)
            }
            SearchMode::Texts => {
                let mut rows = placeholder_results(raw_input);
                if let Some(k) = self.limit {
                    rows.truncate(k);
                }
                SearchResponse::TextSearchUnavailable(rows)
            }
        };
        self.ensure_current(token)?;
        Ok(response)
    }

    async fn search_images(&self, token: u64, raw_input: &str, store: &EmbeddingStore) -> Result<Vec<ScoredResult>> {
        let query = self.query_for(raw_input);
        tracing::debug!(token, %query, "image search");
        let vector = self.embed_query(&query).await?;
        // the embedding await is where a newer request can overtake this one
        self.ensure_current(token)?;
        match self.limit {
            Some(k) => top_k(&vector, store, k),
            None => rank(&vector, store),
        }
    }

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        let embedder = Arc::clone(&self.embedder);
        let text = query.to_string();
        let task = tokio::task::spawn_blocking(move || embedder.embed_text(&text));
        match tokio::time::timeout(self.embed_timeout, task).await {
            Err(_) => Err(Error::Timeout { operation: "query embedding", after: self.embed_timeout }),
            Ok(Err(join_err)) => Err(Error::Embedding(format!("embedding task failed: {join_err}"))),
            Ok(Ok(Err(e))) => Err(Error::Embedding(format!("{e:#}"))),
            Ok(Ok(Ok(vector))) => Ok(vector),
        }
    }

    fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn ensure_current(&self, token: u64) -> Result<()> {
        if self.latest_token() == token {
            Ok(())
        } else {
            tracing::debug!(token, latest = self.latest_token(), "dropping stale search");
            Err(Error::Superseded { token })
        }
    }
}

/// Fixed rows for the texts tab; there is no text corpus to search.
///
/// Scores fall from 0.9 in steps of 0.1. Blank questions get no rows.
pub fn placeholder_results(question: &str) -> Vec<PlaceholderResult> {
    let question = question.trim();
    if question.is_empty() {
        return Vec::new();
    }
    (0..PLACEHOLDER_COUNT)
        .map(|i| PlaceholderResult {
            title: format!("Result {} for \"{}\"", i + 1, question),
            body: PLACEHOLDER_BODY.to_string(),
            score: 0.9 - 0.1 * i as f32,
        })
        .collect()
}
