//! Interactive literacy assessment in the terminal.
//!
//! Shows a splash screen, then a random writing prompt. Type an answer and
//! press Enter to have it assessed.
//!
//! Reads the API key from the `API_KEY` environment variable (a `.env` file
//! in the working directory is honoured).

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::Parser;
use litscore::config::AppConfig;
use litscore::session::{DEFAULT_POLL_INTERVAL, Session};
use litscore::ui::tracing::UiTracingLayer;
use litscore::ui::{UiState, quit_requested, request_quit};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Literacy assessment TUI.
#[derive(Parser)]
#[command(name = "litscore-tui", version)]
struct Cli {
    /// Path to a TOML config file (default: ./litscore.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Model to use
    #[arg(long)]
    model: Option<String>,

    /// Chat completions endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// How long the splash screen stays up, in seconds
    #[arg(long)]
    splash_secs: Option<u64>,
}

fn load_config(cli: &Cli) -> Result<AppConfig, String> {
    let mut config = AppConfig::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout_secs = secs;
    }
    if let Some(secs) = cli.splash_secs {
        config.splash_secs = secs;
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Resolves once the front end has asked to quit.
async fn wait_for_quit(state: &Arc<Mutex<UiState>>) {
    while !quit_requested(state) {
        tokio::time::sleep(DEFAULT_POLL_INTERVAL).await;
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Tracing goes to the in-app log pane, installed before the analyzer is
    // built so its init event lands there too.
    let (tracing_layer, log_buffer) = UiTracingLayer::new();
    let filter = EnvFilter::try_from_env("LITSCORE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("litscore=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_layer)
        .init();

    // Everything that can fail happens before the terminal is taken over.
    let (config, bank, analyzer) = match load_config(&cli).and_then(|config| {
        let bank = config.prompt_bank().map_err(|e| e.to_string())?;
        let analyzer = config.build_analyzer().map_err(|e| e.to_string())?;
        Ok((config, bank, analyzer))
    }) {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let ui_state = Arc::new(Mutex::new(UiState::with_splash(config.splash_duration())));
    let session = Session::new(ui_state.clone(), bank, analyzer);

    let tui_config = litscore_tui::TuiConfig {
        log_buffer: Some(log_buffer),
    };
    let tui_handle = litscore_tui::spawn_tui(ui_state.clone(), tui_config);

    // An in-flight assessment is abandoned when the user quits.
    tokio::select! {
        () = session.run(DEFAULT_POLL_INTERVAL) => {}
        () = wait_for_quit(&ui_state) => {}
    }
    request_quit(&ui_state);

    tui_handle.join().ok();
}
