//! Rendering for the splash and main screens.

use std::sync::{Arc, Mutex};

use litscore::ui::{LogLevel, LogLine, Screen, UiState};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{ActivePane, App, InputMode};

// ── Public Utilities ──────────────────────────────────────────────────

/// Truncate a string to at most `max` characters, appending "..." if cut.
pub fn truncate_str(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", s.get(..idx).unwrap_or(s)),
        None => s.to_string(),
    }
}

/// Map a log level to a ratatui [`Style`].
pub fn log_level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Trace => Style::default().fg(Color::DarkGray),
        LogLevel::Debug => Style::default().fg(Color::Cyan),
        LogLevel::Info => Style::default().fg(Color::Green),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// Colour for a 0-10 rating: red below 5, yellow below 8, green otherwise.
pub fn rating_style(rating: u8) -> Style {
    let color = match rating {
        0..=4 => Color::Red,
        5..=7 => Color::Yellow,
        _ => Color::Green,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Rows `lines` occupy when word-wrapped to `width` columns, as with
/// `Wrap { trim: false }`: words move to the next row when they don't fit,
/// words longer than a row are split, trailing spaces never start a row.
pub(crate) fn wrapped_line_count<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    width: usize,
) -> usize {
    if width == 0 {
        return 0;
    }
    lines
        .into_iter()
        .map(|line| {
            let mut rows = 1;
            let mut col = 0;
            for word in line.split_inclusive(' ') {
                let mut visible = word.trim_end_matches(' ').chars().count();
                let spaces = word.chars().count() - visible;
                if col > 0 && col + visible > width {
                    rows += 1;
                    col = 0;
                }
                // col is 0 here whenever the word still overflows.
                while col + visible > width {
                    visible -= width;
                    rows += 1;
                }
                col = (col + visible + spaces).min(width);
            }
            rows
        })
        .sum()
}

// ── Root Render ───────────────────────────────────────────────────────

/// Everything the frame needs, cloned out of `UiState` so the lock is not
/// held while widgets are built.
struct RenderSnapshot {
    screen: Screen,
    question: String,
    analysis_result: String,
    rating: Option<u8>,
    busy: bool,
    model: String,
    logs: Vec<LogLine>,
}

pub(crate) fn render(frame: &mut Frame, state: &Arc<Mutex<UiState>>, app: &mut App) {
    let snap = {
        let Ok(s) = state.lock() else {
            return;
        };
        RenderSnapshot {
            screen: s.screen,
            question: s.question.clone(),
            analysis_result: s.analysis_result.clone(),
            rating: s.rating,
            busy: s.busy,
            model: s.model.clone(),
            logs: if app.show_logs {
                s.logs.clone()
            } else {
                Vec::new()
            },
        }
    };

    match snap.screen {
        Screen::Splash => render_splash(frame, frame.area()),
        Screen::Main => render_main(frame, &snap, app),
    }
}

// ── Splash Screen ─────────────────────────────────────────────────────

fn render_splash(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(5),
            Constraint::Fill(1),
        ])
        .split(inner);

    let text = vec![
        Line::from(Span::styled(
            "Literacy Assessment",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Answer a writing prompt and get feedback on your literacy.",
            Style::default().fg(Color::Gray),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), rows[1]);
}

// ── Main Screen ───────────────────────────────────────────────────────

fn render_main(frame: &mut Frame, snap: &RenderSnapshot, app: &mut App) {
    // [3] status | [4] prompt | [7] answer | [flex] result (+ log) | [1] help
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(7),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_status(frame, chunks[0], snap);
    render_question(frame, chunks[1], &snap.question);
    render_answer(frame, chunks[2], app);

    if app.show_logs {
        let bottom = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[3]);
        render_result(frame, bottom[0], snap, app);
        render_logs(frame, bottom[1], &snap.logs, app);
    } else {
        render_result(frame, chunks[3], snap, app);
    }

    render_help(frame, chunks[4], app);
}

fn render_status(frame: &mut Frame, area: Rect, snap: &RenderSnapshot) {
    let mut spans = vec![
        Span::styled("Model: ", Style::default().fg(Color::DarkGray)),
        Span::raw(snap.model.clone()),
        Span::raw("   "),
        Span::styled("Rating: ", Style::default().fg(Color::DarkGray)),
    ];
    match snap.rating {
        Some(r) => spans.push(Span::styled(format!("{r}/10"), rating_style(r))),
        None => spans.push(Span::styled("\u{2014}", Style::default().fg(Color::DarkGray))),
    }
    if snap.busy {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            "Analyzing\u{2026}",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Literacy Assessment ");
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_question(frame: &mut Frame, area: Rect, question: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Prompt ");
    let paragraph = Paragraph::new(Span::styled(
        question.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
    .block(block)
    .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_answer(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;
    let (border, title) = if editing {
        (Color::Yellow, " Your answer (Enter to analyze) ")
    } else {
        (Color::DarkGray, " Your answer ")
    };

    let mut lines: Vec<Line> = app
        .input_buffer
        .split('\n')
        .map(|l| Line::from(l.to_string()))
        .collect();
    if editing && let Some(last) = lines.last_mut() {
        last.push_span(Span::styled("\u{2588}", Style::default().fg(Color::Yellow)));
    }

    // Keep the cursor row visible when the wrapped answer outgrows the box.
    let inner_height = area.height.saturating_sub(2) as usize;
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor = if editing { "\u{2588}" } else { "" };
    let with_cursor = format!("{}{cursor}", app.input_buffer);
    let rows = wrapped_line_count(with_cursor.split('\n'), inner_width);
    let scroll = rows.saturating_sub(inner_height);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title),
        )
        .scroll((scroll as u16, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_result(frame: &mut Frame, area: Rect, snap: &RenderSnapshot, app: &mut App) {
    let inner_height = area.height.saturating_sub(2) as usize;
    let inner_width = area.width.saturating_sub(2) as usize;
    let text = if snap.busy {
        Text::from(Span::styled(
            "Analyzing your answer\u{2026}",
            Style::default().fg(Color::Yellow),
        ))
    } else if snap.analysis_result.is_empty() {
        Text::from(Span::styled(
            "Write an answer and press Enter to get an assessment.",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(
            snap.analysis_result
                .lines()
                .map(|l| Line::from(l.to_string()))
                .collect::<Vec<_>>(),
        )
    };

    let border_color = if app.active_pane == ActivePane::Result {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Assessment ");

    let rows = if snap.busy || snap.analysis_result.is_empty() {
        1
    } else {
        wrapped_line_count(snap.analysis_result.lines(), inner_width)
    };
    app.result_max_scroll = rows.saturating_sub(inner_height);
    app.result_scroll = app.result_scroll.min(app.result_max_scroll);

    let paragraph = Paragraph::new(text)
        .block(block)
        .scroll((app.result_scroll.min(u16::MAX as usize) as u16, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ── Log Pane ──────────────────────────────────────────────────────────

fn render_logs(frame: &mut Frame, area: Rect, logs: &[LogLine], app: &App) {
    let inner_height = area.height.saturating_sub(2) as usize;
    let max_msg = area.width.saturating_sub(20).max(20) as usize;

    let lines: Vec<Line> = logs
        .iter()
        .filter(|log| !matches!(log.level, LogLevel::Trace))
        .map(|log| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", log.time),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{} ", log.level.label()),
                    log_level_style(log.level),
                ),
                Span::raw(truncate_str(&log.message, max_msg)),
            ])
        })
        .collect();

    let scroll = lines
        .len()
        .saturating_sub(inner_height)
        .saturating_sub(app.log_scroll);

    let border_color = if app.active_pane == ActivePane::Log {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Log ");

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(paragraph, area);
}

// ── Help Line ─────────────────────────────────────────────────────────

fn render_help(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(msg) = &app.status_message {
        Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        let hints = match app.input_mode {
            InputMode::Editing => {
                "[Enter] analyze  [Alt+Enter] newline  [Ctrl+N] new prompt  [Ctrl+U] clear  [Esc] commands"
            }
            InputMode::Normal => {
                "[i] edit  [n] new prompt  [,] logs  [Tab] pane  [\u{2191}\u{2193}] scroll  [q] quit"
            }
        };
        Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use litscore::ui::{enter_main_screen, set_analysis_result, set_model, set_question};
    use ratatui::backend::TestBackend;

    fn draw(state: &Arc<Mutex<UiState>>, app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, state, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("abcdef", 3), "abc...");
        assert_eq!(truncate_str("héllo wörld", 4), "héll...");
    }

    #[test]
    fn rating_colours_by_band() {
        assert_eq!(rating_style(0).fg, Some(Color::Red));
        assert_eq!(rating_style(3).fg, Some(Color::Red));
        assert_eq!(rating_style(6).fg, Some(Color::Yellow));
        assert_eq!(rating_style(9).fg, Some(Color::Green));
        assert_eq!(rating_style(10).fg, Some(Color::Green));
    }

    #[test]
    fn splash_screen_shows_title() {
        let state = Arc::new(Mutex::new(UiState::default()));
        let out = draw(&state, &mut App::new());
        assert!(out.contains("Literacy Assessment"));
        assert!(out.contains("Press any key to continue"));
    }

    #[test]
    fn main_screen_shows_prompt_result_and_rating() {
        let state = Arc::new(Mutex::new(UiState::default()));
        enter_main_screen(&state);
        set_model(&state, "gpt-4o-mini");
        set_question(&state, "What is your favorite book and why?");
        set_analysis_result(&state, "Clear writing.\nOverall: 8/10", Some(8));

        let mut app = App::new();
        app.input_buffer = "Dune, for its world".into();
        let out = draw(&state, &mut app);

        assert!(out.contains("What is your favorite book and why?"));
        assert!(out.contains("Dune, for its world"));
        assert!(out.contains("Clear writing."));
        assert!(out.contains("gpt-4o-mini"));
        assert!(out.contains("8/10"));
    }

    #[test]
    fn busy_state_shows_indicator() {
        let state = Arc::new(Mutex::new(UiState::default()));
        enter_main_screen(&state);
        state.lock().unwrap().busy = true;
        let out = draw(&state, &mut App::new());
        assert!(out.contains("Analyzing your answer"));
    }

    #[test]
    fn status_message_replaces_hints() {
        let state = Arc::new(Mutex::new(UiState::default()));
        enter_main_screen(&state);
        let mut app = App::new();
        app.status_message = Some("An assessment is already running.".into());
        let out = draw(&state, &mut app);
        assert!(out.contains("An assessment is already running."));
        assert!(!out.contains("[Ctrl+U] clear"));
    }

    #[test]
    fn wrapped_line_count_follows_word_wrap() {
        assert_eq!(wrapped_line_count(["hello world"], 20), 1);
        assert_eq!(wrapped_line_count(["hello world"], 5), 2);
        assert_eq!(wrapped_line_count(["abcdefghij"], 4), 3);
        assert_eq!(wrapped_line_count(["", "a"], 10), 2);
        assert_eq!(wrapped_line_count(["abc      "], 3), 1);
        assert_eq!(wrapped_line_count(["anything"], 0), 0);
    }

    #[test]
    fn result_scroll_is_clamped_to_content() {
        let state = Arc::new(Mutex::new(UiState::default()));
        enter_main_screen(&state);
        let result: Vec<String> = (0..50).map(|i| format!("row-{i:03}")).collect();
        set_analysis_result(&state, &result.join("\n"), None);

        let mut app = App::new();
        app.result_scroll = 1000;
        let out = draw(&state, &mut app);

        assert!(app.result_max_scroll > 0);
        assert_eq!(app.result_scroll, app.result_max_scroll);
        assert!(out.contains("row-049"), "last row stays visible");
        assert!(!out.contains("row-000"));
    }

    #[test]
    fn short_result_cannot_scroll() {
        let state = Arc::new(Mutex::new(UiState::default()));
        enter_main_screen(&state);
        set_analysis_result(&state, "One line.", Some(7));
        let mut app = App::new();
        app.result_scroll = 5;
        let out = draw(&state, &mut app);
        assert_eq!(app.result_max_scroll, 0);
        assert_eq!(app.result_scroll, 0);
        assert!(out.contains("One line."));
    }

    #[test]
    fn cursor_stays_visible_in_long_unbroken_answer() {
        let state = Arc::new(Mutex::new(UiState::default()));
        enter_main_screen(&state);
        let mut app = App::new();
        app.input_buffer = "x".repeat(500);
        let out = draw(&state, &mut app);
        assert!(out.contains('\u{2588}'));
    }
}
