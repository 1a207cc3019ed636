//! Assess a piece of writing from the command line.
//!
//! Reads the API key from the `API_KEY` environment variable (a `.env` file
//! in the working directory is honoured).
//!
//! # Examples
//!
//! ```sh
//! # Get a writing prompt
//! litscore --show-prompt
//!
//! # Assess an answer
//! litscore --text "My favorite book is Dune because..."
//!
//! # Pipe an answer in, with a different model
//! cat essay.txt | litscore --stdin --model gpt-4o
//! ```

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use litscore::analyzer::AnalysisOutcome;
use litscore::config::AppConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Assess the literacy of a piece of writing with a language model.
#[derive(Parser)]
#[command(name = "litscore", version)]
struct Cli {
    /// Text to assess
    #[arg(long, conflicts_with = "stdin")]
    text: Option<String>,

    /// Read the text to assess from stdin
    #[arg(long)]
    stdin: bool,

    /// Print a random writing prompt and exit
    #[arg(long)]
    show_prompt: bool,

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

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

const EXIT_ASSESSED: i32 = 0;
const EXIT_FAILED: i32 = 1;
const EXIT_EMPTY: i32 = 2;

fn init_logging(verbose: bool) {
    let default = if verbose {
        "litscore=debug,warn"
    } else {
        "litscore=warn"
    };
    let filter = EnvFilter::try_from_env("LITSCORE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
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
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn read_answer(cli: &Cli) -> Result<String, String> {
    match (&cli.text, cli.stdin) {
        (Some(text), _) => Ok(text.clone()),
        (None, true) => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("failed to read stdin: {e}"))?;
            Ok(buf)
        }
        (None, false) => Err("provide --text, --stdin, or --show-prompt".to_string()),
    }
}

/// Process exit status for an assessment outcome.
fn exit_code(outcome: &AnalysisOutcome) -> i32 {
    match outcome {
        AnalysisOutcome::Assessed(_) => EXIT_ASSESSED,
        AnalysisOutcome::EmptyInput => EXIT_EMPTY,
        AnalysisOutcome::Failed(_) => EXIT_FAILED,
    }
}

/// Print the outcome (assessment to `out`, anything else to `err`) and
/// return the exit status.
fn report(outcome: &AnalysisOutcome, out: &mut impl Write, err: &mut impl Write) -> i32 {
    // Write errors (closed pipe) leave the exit status unchanged.
    let _ = match outcome {
        AnalysisOutcome::Assessed(text) => writeln!(out, "{text}"),
        _ => writeln!(err, "{}", outcome.message()),
    };
    exit_code(outcome)
}

/// Assess `answer`. Blank answers are rejected before the client is built,
/// so a missing API key never hides the empty-input message.
async fn assess(config: &AppConfig, answer: &str) -> Result<AnalysisOutcome, String> {
    if answer.trim().is_empty() {
        return Ok(AnalysisOutcome::EmptyInput);
    }
    let analyzer = config.build_analyzer().map_err(|e| e.to_string())?;
    Ok(analyzer.analyze_answer(answer).await)
}

fn show_prompt(config: &AppConfig) -> Result<String, String> {
    let bank = config.prompt_bank().map_err(|e| e.to_string())?;
    Ok(bank.pick().to_string())
}

async fn run(cli: &Cli) -> Result<i32, String> {
    let config = load_config(cli)?;

    if cli.show_prompt {
        println!("{}", show_prompt(&config)?);
        return Ok(EXIT_ASSESSED);
    }

    let answer = read_answer(cli)?;
    let outcome = assess(&config, &answer).await?;
    Ok(report(&outcome, &mut io::stdout(), &mut io::stderr()))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(EXIT_FAILED);
        }
    }
}
