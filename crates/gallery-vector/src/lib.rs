//! Precomputed image embeddings and cosine ranking over them.
//!
//! `store` loads the read-only gallery once; `rank` scores every record
//! against a query vector and sorts best-first.

pub mod rank;
pub mod store;

pub use rank::{cosine_similarity, rank, top_k};
pub use store::{EmbeddingSource, EmbeddingStore};
