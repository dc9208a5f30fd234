use gallery_core::types::{SearchMode, SearchResponse};

/// Control text for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeLabels {
    pub button: &'static str,
    pub placeholder: &'static str,
}

impl ModeLabels {
    pub fn for_mode(mode: SearchMode) -> Self {
        match mode {
            SearchMode::Images => Self { button: "Guccione Search", placeholder: "Search images..." },
            SearchMode::Texts => Self { button: "Search Texts", placeholder: "Ask a question..." },
        }
    }
}

/// What the user currently sees.
#[derive(Debug, Clone)]
pub struct SearchView {
    mode: SearchMode,
    input: String,
    results: Option<SearchResponse>,
    status: String,
    title_visible: bool,
}

impl Default for SearchView {
    fn default() -> Self {
        Self { mode: SearchMode::Images, input: String::new(), results: None, status: String::new(), title_visible: true }
    }
}

impl SearchView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset input and results and show the title again.
    pub fn switch_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
        self.input.clear();
        self.results = None;
        self.title_visible = true;
    }

    /// Clear the previous results and hide the title while a search runs.
    pub fn begin_search(&mut self) {
        self.results = None;
        self.title_visible = false;
    }

    pub fn show_results(&mut self, response: SearchResponse) {
        self.results = Some(response);
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn labels(&self) -> ModeLabels {
        ModeLabels::for_mode(self.mode)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn results(&self) -> Option<&SearchResponse> {
        self.results.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn title_visible(&self) -> bool {
        self.title_visible
    }
}
