use std::io::{self, Write};

use gallery_cli::{embeddings_source, init_tracing, load_embedder, TerminalPresenter};
use gallery_core::config::Config;
use gallery_core::types::SearchMode;
use gallery_search::App;

/// Interactive gallery search.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    init_tracing(&settings.logging);

    println!("🔍 Gallery Search ({})", config.env_name());
    println!("==================");

    let embedder = load_embedder(&settings)?;
    let source = embeddings_source(&settings)?;
    let mut app = App::start(settings, source, embedder, TerminalPresenter::default()).await;

    show_help();
    let stdin = io::stdin();
    loop {
        print!("{}> ", app.view().mode());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        match input {
            "/help" | "/h" => show_help(),
            "/images" | "/i" => app.switch_mode(SearchMode::Images),
            "/texts" | "/t" => app.switch_mode(SearchMode::Texts),
            "/reload" | "/r" => { app.reload().await; }
            "/stats" | "/s" => show_stats(&app),
            "/quit" | "/q" | "quit" | "exit" => {
                println!("👋 Goodbye!");
                break;
            }
            // blank lines are submitted too: an empty image query searches the prefix alone
            _ => {
                app.set_input(input);
                if let Err(e) = app.submit().await {
                    tracing::debug!(error = %e, "search failed");
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_help() {
    println!("🎯 Commands:");
    println!("  /images, /i    Search the image gallery (default)");
    println!("  /texts, /t     Switch to text questions (placeholder results)");
    println!("  /reload, /r    Reload the embeddings file");
    println!("  /stats, /s     Show gallery statistics");
    println!("  /help, /h      Show this help");
    println!("  /quit, /q      Exit");
    println!("  <query>        Search in the current mode");
    println!();
}

fn show_stats(app: &App<TerminalPresenter>) {
    println!("📈 Gallery Statistics");
    println!("=====================");
    println!("  Source: {}", app.source());
    match app.store() {
        Some(store) => {
            println!("  Images: {}", store.len());
            println!("  Dimension: {}", store.dim().map_or_else(|| "-".to_string(), |d| d.to_string()));
        }
        None => println!("  Images: not loaded"),
    }
    println!("  Mode: {}", app.view().mode());
    println!("  Status: {}", app.presenter().last_status());
    println!("  Searches issued: {}", app.orchestrator().latest_token());
}
