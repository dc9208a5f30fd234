use std::env;

use gallery_cli::{embeddings_source, init_tracing, load_embedder};
use gallery_core::config::Config;
use gallery_core::types::{SearchMode, SearchResponse};
use gallery_search::SearchOrchestrator;
use gallery_vector::EmbeddingStore;

/// One-shot search: `gallery-query [--texts] [-n N] <query...>`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    init_tracing(&settings.logging);

    let args: Vec<String> = env::args().collect();
    let prog = args.first().cloned().unwrap_or_else(|| "gallery-query".to_string());
    let mut mode = SearchMode::Images;
    let mut limit = None;
    let mut query_parts = Vec::new();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--texts" | "-t" => mode = SearchMode::Texts,
            "-n" | "--limit" => match args.get(i + 1).and_then(|n| n.parse::<usize>().ok()) {
                Some(n) => {
                    limit = Some(n);
                    i += 1;
                }
                None => {
                    eprintln!("Error: {} requires a number", args[i]);
                    std::process::exit(1);
                }
            },
            "-h" | "--help" => {
                eprintln!("Usage: {} [--texts] [-n N] <query...>", prog);
                return Ok(());
            }
            other => query_parts.push(other.to_string()),
        }
        i += 1;
    }
    let query = query_parts.join(" ");

    let store = match mode {
        SearchMode::Images => {
            let source = embeddings_source(&settings)?;
            Some(EmbeddingStore::load(&source, settings.search.load_timeout()).await?)
        }
        SearchMode::Texts => None,
    };
    let embedder = load_embedder(&settings)?;
    let orchestrator = SearchOrchestrator::new(embedder, &settings.search).with_limit(limit);

    let response = orchestrator.search(mode, &query, store.as_ref()).await?;
    if response.is_empty() {
        println!("❌ No results for: \"{}\"", query);
        return Ok(());
    }
    match &response {
        SearchResponse::Images(hits) => {
            println!("🔍 {} results for: \"{}\"", response.len(), orchestrator.query_for(&query));
            for (i, hit) in hits.iter().enumerate() {
                println!("  {}. score={:.4}  id={}  url={}", i + 1, hit.score, hit.record.id, hit.record.url);
            }
        }
        SearchResponse::TextSearchUnavailable(rows) => {
            println!("📝 Text search is not available; showing {} placeholder results", response.len());
            for row in rows {
                println!("  {:.2}  {}", row.score, row.title);
            }
        }
    }
    Ok(())
}
