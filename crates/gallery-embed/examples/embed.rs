use gallery_core::config::EmbeddingSettings;
use gallery_core::traits::Embedder;
use gallery_embed::get_default_embedder;

fn main() -> anyhow::Result<()> {
    let embedder = get_default_embedder(&EmbeddingSettings::default(), &|pct| println!("Loading models: {pct}%"))?;
    let texts = vec!["photo of a lighthouse".to_string(), "photo of a red door".to_string()];
    let embs = embedder.embed_batch(&texts)?;
    println!("B={} dim={}", embs.len(), embedder.dim());
    Ok(())
}
