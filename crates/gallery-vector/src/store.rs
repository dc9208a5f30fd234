use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use gallery_core::config::resolve_with_base;
use gallery_core::types::EmbeddingRecord;
use gallery_core::{Error, Result};

/// Where the embeddings document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddingSource {
    File(PathBuf),
    Url(String),
}

impl EmbeddingSource {
    /// `http(s)://` strings are URLs; anything else is a path resolved against `base`.
    pub fn parse(raw: &str, base: &Path) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::File(resolve_with_base(base, raw))
        }
    }
}

impl fmt::Display for EmbeddingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(p) => write!(f, "{}", p.display()),
            Self::Url(u) => f.write_str(u),
        }
    }
}

#[derive(Deserialize)]
struct EmbeddingsDocument {
    images: Vec<EmbeddingRecord>,
}

/// Immutable, ordered gallery of image embeddings.
///
/// Order is load order. Every embedding has the same dimensionality; an
/// empty store has none.
#[derive(Debug, Default)]
pub struct EmbeddingStore {
    records: Vec<Arc<EmbeddingRecord>>,
    dim: Option<usize>,
}

impl EmbeddingStore {
    /// Fetch and parse `source`. All-or-nothing: any problem fails the whole load.
    pub async fn load(source: &EmbeddingSource, timeout: Duration) -> Result<Self> {
        tracing::info!(%source, "loading embeddings");
        let bytes = tokio::time::timeout(timeout, read_source(source))
            .await
            .map_err(|_| Error::Timeout { operation: "embeddings load", after: timeout })??;
        let store = Self::from_json(&bytes)?;
        tracing::info!(count = store.len(), dim = ?store.dim(), "embeddings loaded");
        Ok(store)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let doc: EmbeddingsDocument = serde_json::from_slice(bytes)
            .map_err(|e| Error::Load(format!("malformed embeddings document: {e}")))?;
        Self::from_records(doc.images)
    }

    pub fn from_records(records: Vec<EmbeddingRecord>) -> Result<Self> {
        let mut dim = None;
        for record in &records {
            let n = record.embedding.len();
            if n == 0 {
                return Err(Error::Load(format!("image '{}' has an empty embedding", record.id)));
            }
            if record.embedding.iter().any(|x| !x.is_finite()) {
                return Err(Error::Load(format!("image '{}' has a non-finite embedding value", record.id)));
            }
            match dim {
                None => dim = Some(n),
                Some(d) if d != n => {
                    return Err(Error::Load(format!(
                        "image '{}' has a {n}-d embedding, expected {d}",
                        record.id
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(Self { records: records.into_iter().map(Arc::new).collect(), dim })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Shared embedding dimensionality, `None` for an empty store.
    pub fn dim(&self) -> Option<usize> {
        self.dim
    }

    pub fn records(&self) -> &[Arc<EmbeddingRecord>] {
        &self.records
    }
}

async fn read_source(source: &EmbeddingSource) -> Result<Vec<u8>> {
    match source {
        EmbeddingSource::File(path) => tokio::fs::read(path)
            .await
            .map_err(|e| Error::Load(format!("{}: {e}", path.display()))),
        EmbeddingSource::Url(url) => {
            let response = reqwest::get(url)
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(|e| Error::Load(format!("{url}: {e}")))?;
            let body = response.bytes().await.map_err(|e| Error::Load(format!("{url}: {e}")))?;
            Ok(body.to_vec())
        }
    }
}
