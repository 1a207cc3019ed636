//! TUI-local state (not shared with the session).

/// Input mode for the main screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InputMode {
    /// Keys are commands: `q` quits, `n` new prompt, arrows scroll.
    Normal,
    /// Keys go into the answer box; Enter submits, Esc leaves.
    Editing,
}

/// Which pane receives scroll input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ActivePane {
    Result,
    Log,
}

pub(crate) struct App {
    pub(crate) input_mode: InputMode,
    /// The answer being typed. Kept after submission so it can be revised.
    pub(crate) input_buffer: String,
    pub(crate) active_pane: ActivePane,
    /// Whether the log pane is visible (toggled with `,`).
    pub(crate) show_logs: bool,
    /// Lines scrolled down from the top of the result.
    pub(crate) result_scroll: usize,
    /// Largest useful `result_scroll`, set on each draw from the wrapped
    /// result height. Unbounded until the first frame.
    pub(crate) result_max_scroll: usize,
    /// Offset from the bottom of the log (0 = follow tail).
    pub(crate) log_scroll: usize,
    /// Shown in the help line until the next key press.
    pub(crate) status_message: Option<String>,
    pub(crate) should_quit: bool,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            input_mode: InputMode::Editing,
            input_buffer: String::new(),
            active_pane: ActivePane::Result,
            show_logs: false,
            result_scroll: 0,
            result_max_scroll: usize::MAX,
            log_scroll: 0,
            status_message: None,
            should_quit: false,
        }
    }
}
