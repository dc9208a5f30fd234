//! Query embedders for the gallery search.
//!
//! `get_default_embedder` loads the CLIP text tower, or the hashing
//! `FakeEmbedder` when `APP_USE_FAKE_EMBEDDINGS=1` / `embedding.use_fake` is set.

use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

use gallery_core::config::{EmbeddingSettings, expand_path};
use gallery_core::traits::Embedder;

pub mod clip;
pub mod device;
pub mod fake;
pub mod normalize;
pub mod tokenize;

pub use clip::{ClipTextEmbedder, CLIP_DIM, CLIP_MAX_LEN};
pub use fake::FakeEmbedder;
pub use normalize::l2_normalize;

const DEFAULT_MODEL_DIR: &str = "models/clip-vit-base-patch32";

pub fn get_default_embedder(settings: &EmbeddingSettings, on_progress: &dyn Fn(u8)) -> Result<Box<dyn Embedder>> {
    let use_fake = settings.use_fake
        || std::env::var("APP_USE_FAKE_EMBEDDINGS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false);
    if use_fake {
        tracing::info!(dim = settings.fake_dimension, "using FakeEmbedder");
        on_progress(100);
        return Ok(Box::new(FakeEmbedder::new(settings.fake_dimension)));
    }
    let model_dir = resolve_model_dir(settings.model_dir.as_deref())?;
    Ok(Box::new(ClipTextEmbedder::load(&model_dir, on_progress)?))
}

fn resolve_model_dir(configured: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = configured { let p = expand_path(dir); if p.exists() { return Ok(p); } tracing::warn!(dir = %p.display(), "configured model_dir does not exist"); }
    for var in ["APP_MODEL_DIR", "MODEL_DIR"] {
        if let Ok(dir) = std::env::var(var) { let p = expand_path(&dir); if p.exists() { tracing::info!(dir = %p.display(), "using {}", var); return Ok(p); } }
    }
    for candidate in [Path::new(DEFAULT_MODEL_DIR).to_path_buf(), Path::new("..").join(DEFAULT_MODEL_DIR)] {
        if candidate.exists() { tracing::info!(dir = %candidate.display(), "using model dir"); return Ok(candidate); }
    }
    Err(anyhow!("Could not locate CLIP model directory (set embedding.model_dir or APP_MODEL_DIR)"))
}
