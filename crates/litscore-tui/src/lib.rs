//! Terminal front end for `litscore`.
//!
//! Renders the shared [`UiState`] with ratatui + crossterm on its own OS
//! thread. The assessment itself runs in a [`Session`](litscore::session::Session)
//! on the tokio runtime; this crate only records intents.
//!
//! # Quick start
//!
//! ```ignore
//! use litscore_tui::{TuiConfig, spawn_tui};
//! use litscore::ui::UiState;
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//!
//! let ui_state = Arc::new(Mutex::new(UiState::with_splash(Duration::from_secs(2))));
//! let handle = spawn_tui(ui_state.clone(), TuiConfig::default());
//! // ... run a Session against ui_state ...
//! handle.join().unwrap();
//! ```

use std::io;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{cursor, execute};
use litscore::ui::tracing::LogBuffer;
use litscore::ui::{UiState, enter_main_screen, quit_requested, request_quit, splash_expired};
use ratatui::prelude::*;

mod app;
mod input;
mod render;

pub use render::{log_level_style, rating_style, truncate_str};

use app::App;
use input::handle_key_event;
use render::render;

/// Input poll timeout; also bounds how late the splash can switch over.
const FRAME_POLL: Duration = Duration::from_millis(100);

/// Configuration for the TUI.
#[derive(Default)]
pub struct TuiConfig {
    /// Optional log buffer from the tracing layer.
    ///
    /// Drained once per frame into `UiState::logs`, so tracing events never
    /// wait on the state lock.
    pub log_buffer: Option<LogBuffer>,
}

/// Spawn the TUI on a dedicated OS thread.
///
/// Quit is always signalled through the shared state when the thread ends,
/// including on a terminal error, so the session can stop too.
pub fn spawn_tui(state: Arc<Mutex<UiState>>, config: TuiConfig) -> JoinHandle<()> {
    std::thread::spawn(move || {
        if let Err(e) = run_tui(state.clone(), &config) {
            eprintln!("TUI error: {e}");
        }
        request_quit(&state);
    })
}

/// Run the TUI event loop (blocking). Call this from a dedicated OS thread.
///
/// Returns when the user quits or another party sets `quit_requested`.
pub fn run_tui(state: Arc<Mutex<UiState>>, config: &TuiConfig) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let result = event_loop(&mut terminal, &state, config);

    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;
    terminal.show_cursor()?;
    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &Arc<Mutex<UiState>>,
    config: &TuiConfig,
) -> io::Result<()> {
    let mut app = App::new();

    loop {
        if app.should_quit || quit_requested(state) {
            request_quit(state);
            return Ok(());
        }

        if splash_expired(state, Instant::now()) {
            enter_main_screen(state);
        }

        if let Some(ref log_buf) = config.log_buffer {
            log_buf.flush_into(state);
        }

        terminal.draw(|frame| render(frame, state, &mut app))?;

        if event::poll(FRAME_POLL)?
            && let Event::Key(key) = event::read()?
        {
            handle_key_event(key, &mut app, state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{ActivePane, InputMode};

    #[test]
    fn tui_config_default_has_no_log_buffer() {
        assert!(TuiConfig::default().log_buffer.is_none());
    }

    #[test]
    fn app_defaults() {
        let app = App::new();
        assert!(!app.should_quit);
        assert!(!app.show_logs);
        assert!(app.status_message.is_none());
        assert!(app.input_buffer.is_empty());
        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.active_pane, ActivePane::Result);
        assert_eq!(app.log_scroll, 0);
        assert_eq!(app.result_scroll, 0);
    }
}
