use std::sync::Arc;

use gallery_core::config::Settings;
use gallery_core::traits::{Embedder, Presenter};
use gallery_core::types::{SearchMode, SearchResponse};
use gallery_core::Result;
use gallery_vector::{EmbeddingSource, EmbeddingStore};

use crate::orchestrator::SearchOrchestrator;
use crate::view::{ModeLabels, SearchView};

/// Application context: owns the store, the orchestrator, the view state and
/// the presenter. Built once at startup.
pub struct App<P: Presenter> {
    settings: Settings,
    source: EmbeddingSource,
    store: Option<Arc<EmbeddingStore>>,
    orchestrator: SearchOrchestrator,
    view: SearchView,
    presenter: P,
}

impl<P: Presenter> App<P> {
    /// Load the embeddings and get ready for the first search.
    ///
    /// A failed load does not fail startup: the load error stays on the status
    /// line, image search reports it until `reload` succeeds, and the texts tab
    /// keeps working.
    pub async fn start(settings: Settings, source: EmbeddingSource, embedder: Arc<dyn Embedder>, presenter: P) -> Self {
        let orchestrator = SearchOrchestrator::new(embedder, &settings.search);
        let mut app = Self { settings, source, store: None, orchestrator, view: SearchView::new(), presenter };
        let labels = app.view.labels();
        app.presenter.show_mode(app.view.mode(), labels.button, labels.placeholder);
        if app.reload().await {
            app.set_status("Ready!");
        }
        app
    }

    /// Replace the store with a fresh load of the configured source.
    pub async fn reload(&mut self) -> bool {
        self.set_status("Loading embeddings...");
        match EmbeddingStore::load(&self.source, self.settings.search.load_timeout()).await {
            Ok(store) => {
                self.set_status(format!("Loaded {} image embeddings", store.len()));
                self.store = Some(Arc::new(store));
                true
            }
            Err(e) => {
                tracing::error!(source = %self.source, error = %e, "error loading embeddings");
                self.set_status("Error loading embeddings!");
                self.store = None;
                false
            }
        }
    }

    pub fn switch_mode(&mut self, mode: SearchMode) {
        self.orchestrator.invalidate();
        self.view.switch_mode(mode);
        self.presenter.clear_results();
        let labels = ModeLabels::for_mode(mode);
        self.presenter.show_mode(mode, labels.button, labels.placeholder);
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.view.set_input(input);
    }

    /// Run the current input through the search for the current mode.
    ///
    /// Failures are shown as the status line and returned. A superseded search
    /// is dropped without touching the view. A blank question in the texts tab
    /// only clears the previous results.
    pub async fn submit(&mut self) -> Result<()> {
        let mode = self.view.mode();
        let input = self.view.input().to_string();
        self.view.begin_search();
        self.presenter.clear_results();
        match mode {
            SearchMode::Images => {
                let query = self.orchestrator.query_for(&input);
                self.set_status(format!("Searching for: {query}"));
            }
            SearchMode::Texts if input.trim().is_empty() => return Ok(()),
            SearchMode::Texts => self.set_status("Processing question..."),
        }

        match self.orchestrator.search(mode, &input, self.store.as_deref()).await {
            Ok(response) => {
                tracing::debug!(%mode, results = response.len(), "search finished");
                let done = match &response {
                    SearchResponse::Images(hits) => {
                        self.presenter.render_images(hits);
                        "Ready!"
                    }
                    SearchResponse::TextSearchUnavailable(rows) => {
                        self.presenter.render_texts(rows);
                        "Ready"
                    }
                };
                self.view.show_results(response);
                self.set_status(done);
                Ok(())
            }
            Err(e) if e.is_superseded() => Ok(()),
            Err(e) => {
                tracing::warn!(%mode, error = %e, "search failed");
                self.set_status(e.to_string());
                Err(e)
            }
        }
    }

    pub fn view(&self) -> &SearchView {
        &self.view
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn store(&self) -> Option<&EmbeddingStore> {
        self.store.as_deref()
    }

    pub fn source(&self) -> &EmbeddingSource {
        &self.source
    }

    pub fn orchestrator(&self) -> &SearchOrchestrator {
        &self.orchestrator
    }

    fn set_status(&mut self, status: impl Into<String>) {
        let status = status.into();
        self.presenter.show_status(&status);
        self.view.set_status(status);
    }
}
