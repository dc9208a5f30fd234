use std::path::Path;
use std::time::Duration;

use gallery_vector::{EmbeddingSource, EmbeddingStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let raw = std::env::args().nth(1).unwrap_or_else(|| "image-embeddings.json".to_string());
    let source = EmbeddingSource::parse(&raw, Path::new("."));
    let store = EmbeddingStore::load(&source, Duration::from_secs(30)).await?;
    println!("source: {}", source);
    println!("images: total={} dim={}", store.len(), store.dim().map_or_else(|| "-".to_string(), |d| d.to_string()));
    for record in store.records().iter().take(5) {
        println!("  {}  {}", record.id, record.url);
    }
    Ok(())
}
