//! Search front end: the mode-aware orchestrator, the view state it drives,
//! and `App`, the single context object built at startup.

pub mod app;
pub mod orchestrator;
pub mod view;

pub use app::App;
pub use orchestrator::{placeholder_results, SearchOrchestrator, PLACEHOLDER_COUNT};
pub use view::{ModeLabels, SearchView};
