//! Key handling for the splash and main screens.

use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use litscore::ui::{Screen, UiState, enter_main_screen, request_new_question, submit_answer};

use crate::app::{ActivePane, App, InputMode};

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App, state: &Arc<Mutex<UiState>>) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Ctrl+C always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    let screen = state.lock().map_or(Screen::Main, |s| s.screen);
    if screen == Screen::Splash {
        enter_main_screen(state);
        return;
    }

    app.status_message = None;
    match app.input_mode {
        InputMode::Normal => handle_normal_key(key, app, state),
        InputMode::Editing => handle_editing_key(key, app, state),
    }
}

fn handle_normal_key(key: KeyEvent, app: &mut App, state: &Arc<Mutex<UiState>>) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('i') | KeyCode::Char('e') | KeyCode::Enter => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('n') => new_question(app, state),
        KeyCode::Char(',') => {
            app.show_logs = !app.show_logs;
            app.active_pane = if app.show_logs {
                ActivePane::Log
            } else {
                ActivePane::Result
            };
        }
        KeyCode::Tab | KeyCode::BackTab => {
            if app.show_logs {
                app.active_pane = match app.active_pane {
                    ActivePane::Log => ActivePane::Result,
                    ActivePane::Result => ActivePane::Log,
                };
            }
        }
        KeyCode::Up | KeyCode::Char('k') => scroll(app, 3, true),
        KeyCode::Down | KeyCode::Char('j') => scroll(app, 3, false),
        KeyCode::PageUp => scroll(app, 20, true),
        KeyCode::PageDown => scroll(app, 20, false),
        KeyCode::Home => {
            app.result_scroll = 0;
        }
        KeyCode::End => {
            app.log_scroll = 0;
        }
        _ => {}
    }
}

fn handle_editing_key(key: KeyEvent, app: &mut App, state: &Arc<Mutex<UiState>>) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
            app.input_buffer.push('\n');
        }
        KeyCode::Enter => {
            if submit_answer(state, &app.input_buffer) {
                app.result_scroll = 0;
                app.status_message = Some("Analyzing\u{2026}".into());
            } else {
                app.status_message = Some("An assessment is already running.".into());
            }
        }
        KeyCode::Char('u') if ctrl => app.input_buffer.clear(),
        KeyCode::Char('n') if ctrl => new_question(app, state),
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) if !ctrl => app.input_buffer.push(c),
        KeyCode::Up => scroll(app, 3, true),
        KeyCode::Down => scroll(app, 3, false),
        KeyCode::PageUp => scroll(app, 20, true),
        KeyCode::PageDown => scroll(app, 20, false),
        _ => {}
    }
}

fn new_question(app: &mut App, state: &Arc<Mutex<UiState>>) {
    if request_new_question(state) {
        app.input_buffer.clear();
        app.result_scroll = 0;
    } else {
        app.status_message = Some("Wait for the current assessment to finish.".into());
    }
}

/// Scroll the active pane. `back` means toward older content: up in the
/// result, further from the tail in the log.
fn scroll(app: &mut App, lines: usize, back: bool) {
    match (app.active_pane, back) {
        (ActivePane::Result, true) => app.result_scroll = app.result_scroll.saturating_sub(lines),
        (ActivePane::Result, false) => {
            app.result_scroll = app
                .result_scroll
                .saturating_add(lines)
                .min(app.result_max_scroll);
        }
        (ActivePane::Log, true) => app.log_scroll = app.log_scroll.saturating_add(lines),
        (ActivePane::Log, false) => app.log_scroll = app.log_scroll.saturating_sub(lines),
    }
}
