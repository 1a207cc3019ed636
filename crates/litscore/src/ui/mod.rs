//! UI state shared between the assessment runtime and a front end.
//!
//! Plain data plus small updaters; no rendering dependencies.
//!
//! ```text
//! Session (tokio) ──writes──▶ Arc<Mutex<UiState>> ◀──reads/writes── TUI thread
//! ```
//!
//! The front end never calls the provider itself. It records intents
//! (`question_requested`, `pending_answer`) and the
//! [`Session`](crate::session::Session) picks them up.

pub mod tracing;

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Maximum log lines kept in memory.
pub const MAX_LOG_LINES: usize = 2000;
/// Trim to this many when the cap is exceeded.
pub const LOG_TRIM_TO: usize = 1200;

/// Which screen is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Main,
}

/// A single log line captured from tracing.
#[derive(Clone, Debug)]
pub struct LogLine {
    pub time: String,
    pub level: LogLevel,
    pub message: String,
}

/// Log severity level (mirrors tracing levels).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Short fixed-width label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO ",
            Self::Warn => "WARN ",
            Self::Error => "ERROR",
        }
    }
}

/// State shared by the session driver and the front end.
pub struct UiState {
    pub screen: Screen,
    /// When the splash screen should give way to the main screen.
    pub splash_until: Option<Instant>,

    // ── Exchange ──
    /// Prompt currently shown to the user.
    pub question: String,
    /// Last assessment (or error / empty-input message).
    pub analysis_result: String,
    /// Rating parsed from the last assessment, if any.
    pub rating: Option<u8>,
    /// True while a provider call is in flight.
    pub busy: bool,

    // ── Front-end intents ──
    /// Set by the front end to ask for a fresh prompt.
    pub question_requested: bool,
    /// Answer submitted by the front end, awaiting assessment.
    pub pending_answer: Option<String>,

    // ── Display ──
    pub model: String,
    pub logs: Vec<LogLine>,

    // ── Lifecycle ──
    /// The front end sets this to `true` when the user requests quit.
    pub quit_requested: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            screen: Screen::Splash,
            splash_until: None,
            question: String::new(),
            analysis_result: String::new(),
            rating: None,
            busy: false,
            question_requested: false,
            pending_answer: None,
            model: String::new(),
            logs: Vec::new(),
            quit_requested: false,
        }
    }
}

impl UiState {
    /// Start on the splash screen for `splash` before switching to main.
    pub fn with_splash(splash: Duration) -> Self {
        Self {
            splash_until: Some(Instant::now() + splash),
            ..Default::default()
        }
    }
}

// ── Convenience Updaters ──────────────────────────────────────────────

/// Lock the shared state mutex and run a closure on the guard.
/// Silently ignores poisoned locks (no log spam inside UI frontends).
macro_rules! with_state {
    ($state:expr, |$s:ident| $body:block) => {
        if let Ok(mut $s) = $state.lock() {
            $body
        }
    };
}

/// Switch to the main screen and ask for a fresh prompt.
///
/// No-op when already on the main screen.
pub fn enter_main_screen(state: &Arc<Mutex<UiState>>) {
    with_state!(state, |s| {
        if s.screen != Screen::Main {
            s.screen = Screen::Main;
            s.splash_until = None;
            s.question_requested = true;
        }
    });
}

/// Whether the splash deadline has passed while still on the splash screen.
pub fn splash_expired(state: &Arc<Mutex<UiState>>, now: Instant) -> bool {
    state.lock().is_ok_and(|s| {
        s.screen == Screen::Splash && s.splash_until.is_none_or(|deadline| now >= deadline)
    })
}

/// Ask the session for a new prompt. Ignored while an assessment runs.
pub fn request_new_question(state: &Arc<Mutex<UiState>>) -> bool {
    let mut accepted = false;
    with_state!(state, |s| {
        if !s.busy {
            s.question_requested = true;
            accepted = true;
        }
    });
    accepted
}

/// Hand an answer to the session. Rejected (returns `false`) while an
/// assessment is already in flight or another answer is queued.
pub fn submit_answer(state: &Arc<Mutex<UiState>>, answer: &str) -> bool {
    let mut accepted = false;
    with_state!(state, |s| {
        if !s.busy && s.pending_answer.is_none() {
            s.pending_answer = Some(answer.to_string());
            accepted = true;
        }
    });
    accepted
}

/// Take the question request flag, clearing it.
pub fn take_question_request(state: &Arc<Mutex<UiState>>) -> bool {
    let mut requested = false;
    with_state!(state, |s| {
        requested = std::mem::take(&mut s.question_requested);
    });
    requested
}

/// Take the queued answer and mark the state busy.
pub fn take_pending_answer(state: &Arc<Mutex<UiState>>) -> Option<String> {
    let mut answer = None;
    with_state!(state, |s| {
        answer = s.pending_answer.take();
        if answer.is_some() {
            s.busy = true;
        }
    });
    answer
}

/// Show a new prompt and clear the previous result.
pub fn set_question(state: &Arc<Mutex<UiState>>, question: &str) {
    with_state!(state, |s| {
        s.question = question.to_string();
        s.analysis_result.clear();
        s.rating = None;
    });
}

/// Record the outcome of an assessment and clear the busy flag.
pub fn set_analysis_result(state: &Arc<Mutex<UiState>>, message: &str, rating: Option<u8>) {
    with_state!(state, |s| {
        s.analysis_result = message.to_string();
        s.rating = rating;
        s.busy = false;
    });
}

pub fn set_model(state: &Arc<Mutex<UiState>>, model: &str) {
    with_state!(state, |s| { s.model = model.to_string() });
}

pub fn request_quit(state: &Arc<Mutex<UiState>>) {
    with_state!(state, |s| { s.quit_requested = true });
}

pub fn quit_requested(state: &Arc<Mutex<UiState>>) -> bool {
    // A poisoned lock means a panicked front end; shut down.
    state.lock().map_or(true, |s| s.quit_requested)
}

// ── Tests ─────────────────────────────────────────────────────────────
