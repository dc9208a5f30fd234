use std::cmp::Ordering;
use std::sync::Arc;

use gallery_core::types::ScoredResult;
use gallery_core::{Error, Result};

use crate::store::EmbeddingStore;

/// Cosine of the angle between `a` and `b`, 0 when either has zero norm.
///
/// Accumulates in f64. Callers guarantee equal lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let (mut dot, mut na, mut nb) = (0f64, 0f64, 0f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    (dot / (na.sqrt() * nb.sqrt())) as f32
}

/// Score every record against `query`, best first. Equal scores keep store order.
///
/// A query with NaN or infinite components is an embedding failure, since it
/// would score every record NaN.
pub fn rank(query: &[f32], store: &EmbeddingStore) -> Result<Vec<ScoredResult>> {
    if let Some(expected) = store.dim() {
        if query.len() != expected {
            return Err(Error::DimensionMismatch { expected, actual: query.len() });
        }
    }
    if query.iter().any(|x| !x.is_finite()) {
        return Err(Error::Embedding("query embedding has a non-finite value".to_string()));
    }
    let mut scored: Vec<ScoredResult> = store
        .records()
        .iter()
        .map(|record| ScoredResult { score: cosine_similarity(query, &record.embedding), record: Arc::clone(record) })
        .collect();
    // sort_by is stable
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    Ok(scored)
}

pub fn top_k(query: &[f32], store: &EmbeddingStore, k: usize) -> Result<Vec<ScoredResult>> {
    let mut ranked = rank(query, store)?;
    ranked.truncate(k);
    Ok(ranked)
}
