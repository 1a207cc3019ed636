//! Convenience re-exports for common `litscore` types.
//!
//! ```ignore
//! use litscore::prelude::*;
//! ```

pub use crate::analyzer::{AnalysisOutcome, LiteracyAnalyzer};
pub use crate::config::AppConfig;
pub use crate::error::{AssessmentError, ConfigError};
pub use crate::prompts::PromptBank;
pub use crate::provider::{CompletionFuture, CompletionProvider};
pub use crate::session::Session;
pub use crate::ui::tracing::{LogBuffer, UiTracingLayer};
pub use crate::ui::{Screen, UiState};
pub use crate::{ChatRequest, ClientConfig, Message, MessageRole, OpenAiClient};
