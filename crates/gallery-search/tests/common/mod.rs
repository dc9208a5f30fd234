#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use anyhow::anyhow;
use gallery_core::config::SearchSettings;
use gallery_core::traits::{Embedder, Presenter};
use gallery_core::types::{EmbeddingRecord, PlaceholderResult, ScoredResult, SearchMode};
use gallery_vector::EmbeddingStore;

/// Maps a query to a 2-d vector: "cat" queries point along x, everything else along y.
/// Queries containing "slow" sleep first.
#[derive(Default)]
pub struct AxisEmbedder {
    pub seen: Mutex<Vec<String>>,
    pub delay: Duration,
}

impl AxisEmbedder {
    pub fn slow(delay: Duration) -> Self {
        Self { seen: Mutex::new(Vec::new()), delay }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().expect("lock").clone()
    }
}

impl Embedder for AxisEmbedder {
    fn dim(&self) -> usize { 2 }
    fn max_len(&self) -> usize { 77 }
    fn embed_text(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.seen.lock().expect("lock").push(text.to_string());
        if text.contains("slow") {
            std::thread::sleep(self.delay);
        }
        Ok(if text.contains("cat") { vec![1.0, 0.0] } else { vec![0.0, 1.0] })
    }
}

pub struct FailingEmbedder;

impl Embedder for FailingEmbedder {
    fn dim(&self) -> usize { 2 }
    fn max_len(&self) -> usize { 77 }
    fn embed_text(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        Err(anyhow!("model not initialised"))
    }
}

/// Produces vectors of the wrong width for a 2-d gallery.
pub struct WideEmbedder;

impl Embedder for WideEmbedder {
    fn dim(&self) -> usize { 3 }
    fn max_len(&self) -> usize { 77 }
    fn embed_text(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        Ok(vec![1.0, 0.0, 0.0])
    }
}

pub fn gallery() -> EmbeddingStore {
    EmbeddingStore::from_records(vec![
        EmbeddingRecord { id: "cat".into(), url: "images/cat.jpg".into(), embedding: vec![1.0, 0.0] },
        EmbeddingRecord { id: "boat".into(), url: "images/boat.jpg".into(), embedding: vec![0.0, 1.0] },
        EmbeddingRecord { id: "cat-on-boat".into(), url: "images/cat-on-boat.jpg".into(), embedding: vec![1.0, 1.0] },
    ])
    .expect("gallery")
}

pub const GALLERY_JSON: &str = r#"{"images": [
    {"id": "cat", "url": "images/cat.jpg", "embedding": [1.0, 0.0]},
    {"id": "boat", "url": "images/boat.jpg", "embedding": [0.0, 1.0]},
    {"id": "cat-on-boat", "url": "images/cat-on-boat.jpg", "embedding": [1.0, 1.0]}
]}"#;

pub fn settings(embed_timeout_ms: u64) -> SearchSettings {
    SearchSettings { embed_timeout_ms, ..SearchSettings::default() }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Status(String),
    Mode(SearchMode, String, String),
    Images(Vec<String>),
    Texts(Vec<String>),
    Clear,
}

#[derive(Default)]
pub struct RecordingPresenter {
    pub events: Vec<Event>,
}

impl RecordingPresenter {
    pub fn statuses(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Status(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn show_status(&mut self, status: &str) {
        self.events.push(Event::Status(status.to_string()));
    }
    fn show_mode(&mut self, mode: SearchMode, button_label: &str, placeholder: &str) {
        self.events.push(Event::Mode(mode, button_label.to_string(), placeholder.to_string()));
    }
    fn render_images(&mut self, results: &[ScoredResult]) {
        self.events.push(Event::Images(results.iter().map(|r| r.record.id.clone()).collect()));
    }
    fn render_texts(&mut self, rows: &[PlaceholderResult]) {
        self.events.push(Event::Texts(rows.iter().map(|r| r.title.clone()).collect()));
    }
    fn clear_results(&mut self) {
        self.events.push(Event::Clear);
    }
}
