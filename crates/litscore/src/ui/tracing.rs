//! Tracing layer that captures log events for display in a front end.
//!
//! Events land in a [`LogBuffer`] with its own mutex. The front end drains
//! it once per frame into [`UiState::logs`](super::UiState::logs), so a log
//! call from the async side never waits on a render.

use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use chrono::Local;
use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use super::{LOG_TRIM_TO, LogLevel, LogLine, MAX_LOG_LINES, UiState};

/// Pending log lines waiting to be drained by the front end.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<LogLine>>>);

impl LogBuffer {
    /// Take every pending line.
    pub fn drain(&self) -> Vec<LogLine> {
        let mut pending = self.0.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *pending)
    }

    /// Move pending lines into `UiState::logs`, keeping the log capped.
    /// Locks the state only when there is something to move.
    pub fn flush_into(&self, state: &Arc<Mutex<UiState>>) {
        let lines = self.drain();
        if lines.is_empty() {
            return;
        }
        if let Ok(mut s) = state.lock() {
            s.logs.extend(lines);
            cap(&mut s.logs);
        }
    }

    fn push(&self, line: LogLine) {
        if let Ok(mut pending) = self.0.lock() {
            pending.push(line);
            cap(&mut pending);
        }
    }
}

fn cap(lines: &mut Vec<LogLine>) {
    if lines.len() > MAX_LOG_LINES {
        let excess = lines.len() - LOG_TRIM_TO;
        lines.drain(..excess);
    }
}

/// [`Layer`] writing every event into a [`LogBuffer`].
pub struct UiTracingLayer {
    buffer: LogBuffer,
}

impl UiTracingLayer {
    /// Create the layer and the buffer the front end should drain.
    pub fn new() -> (Self, LogBuffer) {
        let buffer = LogBuffer::default();
        (
            Self {
                buffer: buffer.clone(),
            },
            buffer,
        )
    }
}

impl<S: Subscriber + for<'a> LookupSpan<'a>> Layer<S> for UiTracingLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = FieldCollector::default();
        event.record(&mut fields);

        self.buffer.push(LogLine {
            time: Local::now().format("%H:%M:%S").to_string(),
            level: level_of(event.metadata().level()),
            message: fields.render(),
        });
    }
}

fn level_of(level: &tracing::Level) -> LogLevel {
    match *level {
        tracing::Level::TRACE => LogLevel::Trace,
        tracing::Level::DEBUG => LogLevel::Debug,
        tracing::Level::INFO => LogLevel::Info,
        tracing::Level::WARN => LogLevel::Warn,
        tracing::Level::ERROR => LogLevel::Error,
    }
}

/// Collects the `message` field and any structured extras of one event.
#[derive(Default)]
struct FieldCollector {
    message: String,
    extras: Vec<String>,
}

impl FieldCollector {
    fn render(self) -> String {
        match (self.message.is_empty(), self.extras.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.extras.join(" "),
            (false, false) => format!("{} {{{}}}", self.message, self.extras.join(", ")),
        }
    }
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.extras.push(format!("{}={value}", field.name()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            // `format_args!` messages arrive here; their Debug output is unquoted.
            self.message = format!("{value:?}");
        } else {
            self.extras.push(format!("{}={value:?}", field.name()));
        }
    }
}
