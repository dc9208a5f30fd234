use crate::types::{PlaceholderResult, ScoredResult, SearchMode};

pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn max_len(&self) -> usize;
    fn embed_text(&self, text: &str) -> anyhow::Result<Vec<f32>>;

    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed_text(t)).collect()
    }
}

/// Rendering surface for the search front end.
///
/// Implementations only display; all state lives in the caller.
pub trait Presenter: Send {
    /// Replace the one-line status text.
    fn show_status(&mut self, status: &str);
    /// Update visible controls after a mode switch. Results are already cleared.
    fn show_mode(&mut self, mode: SearchMode, button_label: &str, placeholder: &str);
    /// Render image hits in order.
    fn render_images(&mut self, results: &[ScoredResult]);
    /// Render placeholder text rows in order.
    fn render_texts(&mut self, rows: &[PlaceholderResult]);
    fn clear_results(&mut self);
}
