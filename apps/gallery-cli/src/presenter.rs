use gallery_core::traits::Presenter;
use gallery_core::types::{PlaceholderResult, ScoredResult, SearchMode};

/// Prints the search front end to stdout.
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    last_status: String,
}

impl TerminalPresenter {
    pub fn last_status(&self) -> &str {
        &self.last_status
    }
}

impl Presenter for TerminalPresenter {
    fn show_status(&mut self, status: &str) {
        println!("📟 {}", status);
        self.last_status = status.to_string();
    }

    fn show_mode(&mut self, mode: SearchMode, button_label: &str, placeholder: &str) {
        println!("🔀 Mode: {}  [{}]  {}", mode, button_label, placeholder);
    }

    fn render_images(&mut self, results: &[ScoredResult]) {
        if results.is_empty() { println!("🔍 No images in the gallery"); return; }
        for (i, result) in results.iter().enumerate() {
            println!("  {}. {:.2}  {:<24}  {}", i + 1, result.score, result.record.id, result.record.url);
        }
    }

    fn render_texts(&mut self, rows: &[PlaceholderResult]) {
        for row in rows {
            println!("\n  {}", row.title);
            println!("     {}", row.body);
            println!("     Similarity: {:.2}", row.score);
        }
    }

    fn clear_results(&mut self) {}
}
