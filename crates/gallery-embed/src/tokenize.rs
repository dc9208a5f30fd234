use anyhow::{Result, anyhow};
use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;

/// Encode `text` as a `[1, T]` id tensor, `T <= max_len`.
///
/// CLIP pools at the end-of-text token, so overlong input keeps its final
/// token after truncation instead of losing it.
pub fn tokenize_on_device(tokenizer: &Tokenizer, text: &str, max_len: usize, device: &Device) -> Result<Tensor> {
    let enc = tokenizer.encode(text, true).map_err(|e| anyhow!("Tokenization failed: {}", e))?;
    let mut ids = enc.get_ids().to_vec();
    let eos = *ids.last().ok_or_else(|| anyhow!("Tokenizer produced no tokens for {:?}", text))?;
    if ids.len() > max_len { ids.truncate(max_len - 1); ids.push(eos); }
    let len = ids.len();
    Ok(Tensor::from_vec(ids, (1, len), device)?)
}
