use anyhow::{Context, Result, anyhow};
use std::path::Path;
use std::time::Instant;

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use candle_transformers::models::clip::{ClipConfig, ClipModel};
use tokenizers::Tokenizer;

use gallery_core::traits::Embedder;

use crate::device::select_device;
use crate::normalize::l2_normalize;
use crate::tokenize::tokenize_on_device;

/// Output width of the ViT-B/32 text projection.
pub const CLIP_DIM: usize = 512;
/// Context length of the CLIP text transformer.
pub const CLIP_MAX_LEN: usize = 77;

/// Text tower of CLIP ViT-B/32, the model the gallery embeddings are built with.
pub struct ClipTextEmbedder { model: ClipModel, tokenizer: Tokenizer, device: Device }

impl ClipTextEmbedder {
    /// Load `tokenizer.json` and `model.safetensors` from `model_dir`.
    ///
    /// `on_progress` receives a monotonic percentage, ending at 100 once the
    /// model is ready.
    pub fn load(model_dir: &Path, on_progress: &dyn Fn(u8)) -> Result<Self> {
        let device = select_device();
        tracing::info!(dir = %model_dir.display(), "loading CLIP text model");
        on_progress(0);

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", tokenizer_path.display(), e))?;
        on_progress(10);

        let weights_path = model_dir.join("model.safetensors");
        let weights = candle_core::safetensors::load(&weights_path, &device)
            .with_context(|| format!("Failed to load weights from {}", weights_path.display()))?;
        on_progress(70);

        let vb = VarBuilder::from_tensors(weights, DType::F32, &device);
        let model = ClipModel::new(vb, &ClipConfig::vit_base_patch32()).context("Failed to build CLIP model")?;
        on_progress(100);
        tracing::info!("CLIP text model loaded");
        Ok(Self { model, tokenizer, device })
    }
}

impl Embedder for ClipTextEmbedder {
    fn dim(&self) -> usize { CLIP_DIM }

    fn max_len(&self) -> usize { CLIP_MAX_LEN }

    fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let start = Instant::now();
        let input_ids = tokenize_on_device(&self.tokenizer, text, self.max_len(), &self.device)?;
        let features = self.model.get_text_features(&input_ids)?;
        let mut v: Vec<f32> = features.to_device(&Device::Cpu)?.squeeze(0)?.to_vec1()?;
        if v.len() != self.dim() { return Err(anyhow!("CLIP returned {} values, expected {}", v.len(), self.dim())); }
        l2_normalize(&mut v);
        if start.elapsed().as_millis() > 100 { tracing::warn!(elapsed_ms = start.elapsed().as_millis() as u64, "slow text embedding"); }
        Ok(v)
    }
}
