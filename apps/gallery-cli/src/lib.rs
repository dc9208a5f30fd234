//! Shared startup pieces for the gallery binaries.

use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use gallery_core::config::{LoggingSettings, Settings};
use gallery_core::traits::Embedder;
use gallery_embed::get_default_embedder;
use gallery_vector::EmbeddingSource;

pub mod presenter;

pub use presenter::TerminalPresenter;

/// Log to stderr; `RUST_LOG` overrides `logging.filter`.
pub fn init_tracing(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// Load the query embedder behind a progress bar.
pub fn load_embedder(settings: &Settings) -> anyhow::Result<Arc<dyn Embedder>> {
    let pb = ProgressBar::new(100);
    pb.set_style(ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {msg}: {pos}%")?.progress_chars("#>-"));
    pb.set_message("Loading models");
    let embedder = get_default_embedder(&settings.embedding, &|pct| pb.set_position(u64::from(pct)));
    match embedder {
        Ok(embedder) => {
            pb.finish();
            Ok(Arc::from(embedder))
        }
        Err(e) => {
            pb.abandon_with_message("Model loading failed");
            Err(e)
        }
    }
}

/// Resolve `data.embeddings_source` against the working directory.
pub fn embeddings_source(settings: &Settings) -> anyhow::Result<EmbeddingSource> {
    let cwd = std::env::current_dir()?;
    Ok(EmbeddingSource::parse(&settings.data.embeddings_source, &cwd))
}
